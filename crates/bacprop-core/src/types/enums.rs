//! BACnet enumerations carried by the properties in the codec table.
//!
//! Every enumeration keeps a raw fallback so values outside the named set,
//! vendor extensions included, decode and re-encode unchanged.

macro_rules! bacnet_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($variant,)+
            Proprietary(u32),
        }

        impl $name {
            pub const fn to_u32(self) -> u32 {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Proprietary(v) => v,
                }
            }

            pub const fn from_u32(value: u32) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    v => Self::Proprietary(v),
                }
            }
        }

        wire_value_eq!($name, to_u32);
    };
}

bacnet_enum! {
    pub enum BinaryPv {
        Inactive = 0,
        Active = 1,
    }
}

bacnet_enum! {
    /// A subset of the engineering units enumeration.
    pub enum EngineeringUnits {
        Amperes = 3,
        Volts = 5,
        Kilowatts = 48,
        Pascals = 53,
        DegreesCelsius = 62,
        DegreesFahrenheit = 64,
        Hours = 71,
        Minutes = 72,
        Seconds = 73,
        NoUnits = 95,
        Percent = 98,
    }
}

bacnet_enum! {
    pub enum AccessCredentialDisable {
        None = 0,
        Disable = 1,
        DisableManual = 2,
        DisableLockout = 3,
    }
}

bacnet_enum! {
    pub enum DoorSecuredStatus {
        Secured = 0,
        Unsecured = 1,
        Unknown = 2,
    }
}

bacnet_enum! {
    pub enum EscalatorOperationDirection {
        Unknown = 0,
        Stopped = 1,
        UpRatedSpeed = 2,
        UpReducedSpeed = 3,
        DownRatedSpeed = 4,
        DownReducedSpeed = 5,
    }
}

bacnet_enum! {
    pub enum SecurityLevel {
        Incapable = 0,
        Plain = 1,
        Signed = 2,
        Encrypted = 3,
        SignedEndToEnd = 4,
        EncryptedEndToEnd = 5,
    }
}

bacnet_enum! {
    pub enum LightingOperation {
        None = 0,
        FadeTo = 1,
        RampTo = 2,
        StepUp = 3,
        StepDown = 4,
        StepOn = 5,
        StepOff = 6,
        Warn = 7,
        WarnOff = 8,
        WarnRelinquish = 9,
        Stop = 10,
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryPv, EngineeringUnits, LightingOperation};

    #[test]
    fn named_and_raw_values() {
        assert_eq!(BinaryPv::from_u32(1), BinaryPv::Active);
        assert_eq!(BinaryPv::from_u32(7), BinaryPv::Proprietary(7));
        assert_eq!(BinaryPv::Proprietary(7).to_u32(), 7);
        assert_eq!(EngineeringUnits::from_u32(62), EngineeringUnits::DegreesCelsius);
        assert_eq!(EngineeringUnits::from_u32(256).to_u32(), 256);
        assert_eq!(LightingOperation::Stop.to_u32(), 10);
    }

    #[test]
    fn raw_fallback_equals_its_named_variant() {
        use core::hash::{Hash, Hasher};
        use std::collections::hash_map::DefaultHasher;

        assert_eq!(BinaryPv::Proprietary(1), BinaryPv::Active);
        assert_ne!(BinaryPv::Proprietary(2), BinaryPv::Active);
        let hash = |v: BinaryPv| {
            let mut h = DefaultHasher::new();
            v.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(BinaryPv::Proprietary(0)), hash(BinaryPv::Inactive));
    }
}
