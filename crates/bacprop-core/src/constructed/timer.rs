use alloc::boxed::Box;

use crate::constructed::records::{read_enclosed, write_enclosed};
use crate::constructed::{ConstructedData, PropertyArgs};
use crate::encoding::fields::{read_field, read_optional, write_field, write_optional};
use crate::encoding::reader::Reader;
use crate::encoding::tag::{TagClass, TagHeader};
use crate::encoding::writer::Writer;
use crate::tags::{ApplicationTag, Null, Tagged};
use crate::types::{Date, LightingOperation, PropertyId, Time};
use crate::{DecodeError, EncodeError};

/// Property used for the payload of a constructed state change value. It has
/// no codec, so the payload decodes as unspecified elements.
pub const VENDOR_PROPRIETARY_VALUE: PropertyId = PropertyId::Proprietary(9999);

/// A value a timer object writes on a state transition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerStateChangeValue {
    Application(ApplicationTag),
    NoValue(Tagged<Null>),
    ConstructedValue(Box<ConstructedData>),
    DateTime(DateTimeEnclosed),
    LightingCommand(LightingCommandEnclosed),
}

impl TimerStateChangeValue {
    const CONTEXT: &'static str = "BACnetTimerStateChangeValue";

    pub fn no_value() -> Self {
        Self::NoValue(Tagged::context(0, Null))
    }

    pub fn decode(r: &mut Reader<'_>, args: &PropertyArgs) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let peeked = TagHeader::peek(r)?;
        let tag_number = peeked.actual_tag_number();
        r.read_virtual("peekedTagNumber", &tag_number);
        let value = match (peeked.class(), tag_number) {
            (TagClass::Application, _) => {
                Self::Application(read_field(r, "applicationValue", ApplicationTag::decode)?)
            }
            (TagClass::Context, 0) => {
                Self::NoValue(read_field(r, "noValue", |r| Tagged::decode_context(r, 0))?)
            }
            (TagClass::Context, 1) => {
                let inner = PropertyArgs {
                    tag_number: 1,
                    object_type: args.object_type,
                    property_id: VENDOR_PROPRIETARY_VALUE,
                    array_index: None,
                };
                let data =
                    read_field(r, "constructedValue", |r| ConstructedData::decode(r, inner))?;
                Self::ConstructedValue(Box::new(data))
            }
            (TagClass::Context, 2) => {
                Self::DateTime(read_field(r, "dateTimeValue", |r| DateTimeEnclosed::decode(r, 2))?)
            }
            (TagClass::Context, 3) => Self::LightingCommand(read_field(
                r,
                "lightingCommandValue",
                |r| LightingCommandEnclosed::decode(r, 3),
            )?),
            (TagClass::Context, _) => {
                return Err(DecodeError::UnknownChoice {
                    choice: Self::CONTEXT,
                    tag_number,
                })
            }
        };
        r.close_context(Self::CONTEXT)?;
        Ok(value)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        match self {
            Self::Application(t) => write_field(w, "applicationValue", |w| t.encode(w))?,
            Self::NoValue(t) => write_field(w, "noValue", |w| t.encode(w))?,
            Self::ConstructedValue(data) => write_field(w, "constructedValue", |w| data.encode(w))?,
            Self::DateTime(dt) => write_field(w, "dateTimeValue", |w| dt.encode(w))?,
            Self::LightingCommand(cmd) => {
                write_field(w, "lightingCommandValue", |w| cmd.encode(w))?
            }
        }
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Application(t) => t.encoded_len(),
            Self::NoValue(t) => t.encoded_len(),
            Self::ConstructedValue(data) => data.encoded_len(),
            Self::DateTime(dt) => dt.encoded_len(),
            Self::LightingCommand(cmd) => cmd.encoded_len(),
        }
    }

    pub fn leading_header(&self) -> TagHeader {
        match self {
            Self::Application(t) => *t.header(),
            Self::NoValue(t) => *t.header(),
            Self::ConstructedValue(data) => *data.opening_tag(),
            Self::DateTime(dt) => dt.opening,
            Self::LightingCommand(cmd) => cmd.opening,
        }
    }
}

/// Application date and time between opening and closing tag `[n]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTimeEnclosed {
    opening: TagHeader,
    date: Tagged<Date>,
    time: Tagged<Time>,
    closing: TagHeader,
}

impl DateTimeEnclosed {
    const CONTEXT: &'static str = "BACnetDateTimeEnclosed";

    pub fn new(tag_number: u8, date: Date, time: Time) -> Self {
        Self {
            opening: TagHeader::opening(tag_number),
            date: Tagged::application(date),
            time: Tagged::application(time),
            closing: TagHeader::closing(tag_number),
        }
    }

    pub fn date(&self) -> Date {
        *self.date.value()
    }

    pub fn time(&self) -> Time {
        *self.time.value()
    }

    pub fn decode(r: &mut Reader<'_>, tag_number: u8) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let (opening, (date, time), closing) = read_enclosed(r, tag_number, |r| {
            let date = read_field(r, "dateValue", Tagged::decode_application)?;
            let time = read_field(r, "timeValue", Tagged::decode_application)?;
            Ok((date, time))
        })?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            opening,
            date,
            time,
            closing,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_enclosed(w, &self.opening, &self.closing, |w| {
            write_field(w, "dateValue", |w| self.date.encode(w))?;
            write_field(w, "timeValue", |w| self.time.encode(w))
        })?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.opening.encoded_len()
            + self.date.encoded_len()
            + self.time.encoded_len()
            + self.closing.encoded_len()
    }
}

/// A lighting output command. Everything after the operation is optional.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightingCommand {
    operation: Tagged<LightingOperation>,
    target_level: Option<Tagged<f32>>,
    ramp_rate: Option<Tagged<f32>>,
    step_increment: Option<Tagged<f32>>,
    fade_time: Option<Tagged<u64>>,
    priority: Option<Tagged<u64>>,
}

impl LightingCommand {
    const CONTEXT: &'static str = "BACnetLightingCommand";

    pub fn new(operation: LightingOperation) -> Self {
        Self {
            operation: Tagged::context(0, operation),
            target_level: None,
            ramp_rate: None,
            step_increment: None,
            fade_time: None,
            priority: None,
        }
    }

    pub fn with_target_level(mut self, level: f32) -> Self {
        self.target_level = Some(Tagged::context(1, level));
        self
    }

    pub fn with_ramp_rate(mut self, rate: f32) -> Self {
        self.ramp_rate = Some(Tagged::context(2, rate));
        self
    }

    pub fn with_step_increment(mut self, step: f32) -> Self {
        self.step_increment = Some(Tagged::context(3, step));
        self
    }

    pub fn with_fade_time(mut self, millis: u64) -> Self {
        self.fade_time = Some(Tagged::context(4, millis));
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(Tagged::context(5, u64::from(priority)));
        self
    }

    pub fn operation(&self) -> LightingOperation {
        *self.operation.value()
    }

    pub fn target_level(&self) -> Option<f32> {
        self.target_level.as_ref().map(|t| *t.value())
    }

    pub fn ramp_rate(&self) -> Option<f32> {
        self.ramp_rate.as_ref().map(|t| *t.value())
    }

    pub fn step_increment(&self) -> Option<f32> {
        self.step_increment.as_ref().map(|t| *t.value())
    }

    pub fn fade_time(&self) -> Option<u64> {
        self.fade_time.as_ref().map(|t| *t.value())
    }

    pub fn priority(&self) -> Option<u64> {
        self.priority.as_ref().map(|t| *t.value())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let operation = read_field(r, "lightingOperation", |r| Tagged::decode_context(r, 0))?;
        let target_level = read_optional(r, "targetLevel", |r| Tagged::decode_context(r, 1))?;
        let ramp_rate = read_optional(r, "rampRate", |r| Tagged::decode_context(r, 2))?;
        let step_increment = read_optional(r, "stepIncrement", |r| Tagged::decode_context(r, 3))?;
        let fade_time = read_optional(r, "fadeTime", |r| Tagged::decode_context(r, 4))?;
        let priority = read_optional(r, "priority", |r| Tagged::decode_context(r, 5))?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            operation,
            target_level,
            ramp_rate,
            step_increment,
            fade_time,
            priority,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_field(w, "lightingOperation", |w| self.operation.encode(w))?;
        write_optional(w, "targetLevel", self.target_level.as_ref(), |w, t| t.encode(w))?;
        write_optional(w, "rampRate", self.ramp_rate.as_ref(), |w, t| t.encode(w))?;
        write_optional(w, "stepIncrement", self.step_increment.as_ref(), |w, t| {
            t.encode(w)
        })?;
        write_optional(w, "fadeTime", self.fade_time.as_ref(), |w, t| t.encode(w))?;
        write_optional(w, "priority", self.priority.as_ref(), |w, t| t.encode(w))?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.operation.encoded_len()
            + self.target_level.as_ref().map_or(0, Tagged::encoded_len)
            + self.ramp_rate.as_ref().map_or(0, Tagged::encoded_len)
            + self.step_increment.as_ref().map_or(0, Tagged::encoded_len)
            + self.fade_time.as_ref().map_or(0, Tagged::encoded_len)
            + self.priority.as_ref().map_or(0, Tagged::encoded_len)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightingCommandEnclosed {
    opening: TagHeader,
    command: LightingCommand,
    closing: TagHeader,
}

impl LightingCommandEnclosed {
    const CONTEXT: &'static str = "BACnetLightingCommandEnclosed";

    pub fn new(tag_number: u8, command: LightingCommand) -> Self {
        Self {
            opening: TagHeader::opening(tag_number),
            command,
            closing: TagHeader::closing(tag_number),
        }
    }

    pub fn command(&self) -> &LightingCommand {
        &self.command
    }

    pub fn decode(r: &mut Reader<'_>, tag_number: u8) -> Result<Self, DecodeError> {
        r.pull_context(Self::CONTEXT)?;
        let (opening, command, closing) = read_enclosed(r, tag_number, |r| {
            read_field(r, "lightingCommand", LightingCommand::decode)
        })?;
        r.close_context(Self::CONTEXT)?;
        Ok(Self {
            opening,
            command,
            closing,
        })
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.push_context(Self::CONTEXT)?;
        write_enclosed(w, &self.opening, &self.closing, |w| {
            write_field(w, "lightingCommand", |w| self.command.encode(w))
        })?;
        w.pop_context(Self::CONTEXT)
    }

    pub fn encoded_len(&self) -> usize {
        self.opening.encoded_len() + self.command.encoded_len() + self.closing.encoded_len()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DateTimeEnclosed, LightingCommand, LightingCommandEnclosed, TimerStateChangeValue,
    };
    use crate::constructed::{PropertyArgs, PropertyValue};
    use crate::encoding::reader::Reader;
    use crate::encoding::writer::Writer;
    use crate::types::{Date, LightingOperation, ObjectType, PropertyId, Time};
    use crate::DecodeError;

    fn args() -> PropertyArgs {
        PropertyArgs::new(ObjectType::Timer, PropertyId::StateChangeValues)
    }

    fn roundtrip(bytes: &[u8]) -> TimerStateChangeValue {
        let mut r = Reader::new(bytes);
        let value = TimerStateChangeValue::decode(&mut r, &args()).unwrap();
        assert!(r.is_empty());
        assert_eq!(value.encoded_len(), bytes.len());
        let mut buf = alloc::vec![0u8; bytes.len()];
        let mut w = Writer::new(&mut buf);
        value.encode(&mut w).unwrap();
        assert_eq!(buf, bytes);
        value
    }

    #[test]
    fn application_and_no_value() {
        assert!(matches!(
            roundtrip(&[0x44, 0x42, 0xC8, 0x00, 0x00]),
            TimerStateChangeValue::Application(_)
        ));
        assert_eq!(roundtrip(&[0x08]), TimerStateChangeValue::no_value());
    }

    #[test]
    fn date_time_choice() {
        let bytes = [0x2E, 0xA4, 124, 6, 1, 6, 0xB4, 8, 30, 0, 0, 0x2F];
        let TimerStateChangeValue::DateTime(dt) = roundtrip(&bytes) else {
            panic!("expected a date-time value");
        };
        assert_eq!(dt.date().month, 6);
        assert_eq!(dt.time().hour, 8);
        assert_eq!(
            dt,
            DateTimeEnclosed::new(
                2,
                Date::from_bytes([124, 6, 1, 6]),
                Time::from_bytes([8, 30, 0, 0])
            )
        );
    }

    #[test]
    fn lighting_command_choice() {
        // fade-to 80.0 with priority 8
        let bytes = [0x3E, 0x09, 0x01, 0x1C, 0x42, 0xA0, 0x00, 0x00, 0x59, 0x08, 0x3F];
        let TimerStateChangeValue::LightingCommand(cmd) = roundtrip(&bytes) else {
            panic!("expected a lighting command");
        };
        assert_eq!(cmd.command().operation(), LightingOperation::FadeTo);
        assert_eq!(cmd.command().target_level(), Some(80.0));
        assert_eq!(cmd.command().ramp_rate(), None);
        assert_eq!(cmd.command().priority(), Some(8));
        let built = LightingCommandEnclosed::new(
            3,
            LightingCommand::new(LightingOperation::FadeTo)
                .with_target_level(80.0)
                .with_priority(8),
        );
        assert_eq!(cmd, built);
    }

    #[test]
    fn constructed_choice_holds_unspecified_elements() {
        let bytes = [0x1E, 0x21, 0x05, 0x09, 0x01, 0x1F];
        let TimerStateChangeValue::ConstructedValue(data) = roundtrip(&bytes) else {
            panic!("expected a constructed value");
        };
        let PropertyValue::Unspecified(elements) = data.value() else {
            panic!("expected unspecified elements");
        };
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn unknown_context_choice() {
        let err =
            TimerStateChangeValue::decode(&mut Reader::new(&[0x49, 0x00]), &args()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownChoice {
                choice: "BACnetTimerStateChangeValue",
                tag_number: 4
            }
        );
    }
}
