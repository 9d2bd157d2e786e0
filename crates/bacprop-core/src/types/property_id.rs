/// BACnet property identifiers.
///
/// Properties with a codec in the property table, plus a few ubiquitous ones,
/// are named variants; vendor-specific or unrecognised identifiers use
/// [`Proprietary`](Self::Proprietary).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyId {
    ActiveText,
    All,
    BbmdBroadcastDistributionTable,
    ControlledVariableUnits,
    CredentialDisable,
    Description,
    DirectReading,
    DoorExtendedPulseTime,
    DoorMembers,
    FaultHighLimit,
    FirmwareRevision,
    InputReference,
    InterfaceValue,
    LoggingObject,
    NetworkAccessSecurityPolicies,
    NotificationThreshold,
    ObjectIdentifier,
    ObjectName,
    ObjectType,
    OperationDirection,
    PassengerAlarm,
    PresentValue,
    ProcessIdentifier,
    ProtocolRevision,
    RelinquishDefault,
    SecuredStatus,
    SetpointReference,
    SlaveProxyEnable,
    StateChangeValues,
    StatusFlags,
    TrackingValue,
    UserInformationReference,
    VendorName,
    Proprietary(u32),
}

impl PropertyId {
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::ActiveText => 4,
            Self::All => 8,
            Self::ControlledVariableUnits => 20,
            Self::Description => 28,
            Self::FirmwareRevision => 44,
            Self::ObjectIdentifier => 75,
            Self::ObjectName => 77,
            Self::ObjectType => 79,
            Self::PresentValue => 85,
            Self::ProcessIdentifier => 89,
            Self::RelinquishDefault => 104,
            Self::SetpointReference => 109,
            Self::StatusFlags => 111,
            Self::VendorName => 121,
            Self::NotificationThreshold => 137,
            Self::ProtocolRevision => 139,
            Self::DirectReading => 156,
            Self::TrackingValue => 164,
            Self::SlaveProxyEnable => 172,
            Self::InputReference => 181,
            Self::LoggingObject => 183,
            Self::DoorExtendedPulseTime => 227,
            Self::DoorMembers => 228,
            Self::SecuredStatus => 235,
            Self::CredentialDisable => 263,
            Self::UserInformationReference => 311,
            Self::NetworkAccessSecurityPolicies => 332,
            Self::InterfaceValue => 387,
            Self::FaultHighLimit => 388,
            Self::StateChangeValues => 396,
            Self::BbmdBroadcastDistributionTable => 414,
            Self::OperationDirection => 477,
            Self::PassengerAlarm => 478,
            Self::Proprietary(v) => v,
        }
    }

    pub const fn from_u32(value: u32) -> Self {
        match value {
            4 => Self::ActiveText,
            8 => Self::All,
            20 => Self::ControlledVariableUnits,
            28 => Self::Description,
            44 => Self::FirmwareRevision,
            75 => Self::ObjectIdentifier,
            77 => Self::ObjectName,
            79 => Self::ObjectType,
            85 => Self::PresentValue,
            89 => Self::ProcessIdentifier,
            104 => Self::RelinquishDefault,
            109 => Self::SetpointReference,
            111 => Self::StatusFlags,
            121 => Self::VendorName,
            137 => Self::NotificationThreshold,
            139 => Self::ProtocolRevision,
            156 => Self::DirectReading,
            164 => Self::TrackingValue,
            172 => Self::SlaveProxyEnable,
            181 => Self::InputReference,
            183 => Self::LoggingObject,
            227 => Self::DoorExtendedPulseTime,
            228 => Self::DoorMembers,
            235 => Self::SecuredStatus,
            263 => Self::CredentialDisable,
            311 => Self::UserInformationReference,
            332 => Self::NetworkAccessSecurityPolicies,
            387 => Self::InterfaceValue,
            388 => Self::FaultHighLimit,
            396 => Self::StateChangeValues,
            414 => Self::BbmdBroadcastDistributionTable,
            477 => Self::OperationDirection,
            478 => Self::PassengerAlarm,
            v => Self::Proprietary(v),
        }
    }
}

wire_value_eq!(PropertyId, to_u32);

#[cfg(test)]
mod tests {
    use super::PropertyId;

    #[test]
    fn named_identifiers_roundtrip() {
        for raw in 0..600u32 {
            let id = PropertyId::from_u32(raw);
            assert_eq!(id.to_u32(), raw);
        }
        assert_eq!(PropertyId::from_u32(85), PropertyId::PresentValue);
        assert_eq!(PropertyId::from_u32(8), PropertyId::All);
        assert_eq!(PropertyId::from_u32(9999), PropertyId::Proprietary(9999));
        assert_eq!(PropertyId::Proprietary(85), PropertyId::PresentValue);
    }
}
