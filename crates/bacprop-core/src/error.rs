use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use thiserror::Error;

use crate::constructed::{ElementKind, FieldShape};
use crate::encoding::context::ContextError;
use crate::encoding::tag::TagClass;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("buffer too small")]
    BufferTooSmall,
    #[error("value out of range")]
    ValueOutOfRange,
    #[error("invalid length")]
    InvalidLength,
    #[error("operation unsupported")]
    Unsupported,
    #[error("{0}")]
    Message(&'static str),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("error serializing '{field}' field: {source}")]
    Field {
        field: &'static str,
        source: Box<EncodeError>,
    },
}

impl EncodeError {
    /// Wraps this error with the name of the field being written.
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping field wrappers.
    pub fn root(&self) -> &EncodeError {
        let mut err = self;
        while let Self::Field { source, .. } = err {
            err = source.as_ref();
        }
        err
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid tag")]
    InvalidTag,
    #[error("tag number {found} does not match expected {expected}")]
    TagNumberMismatch { expected: u8, found: u8 },
    #[error("expected {expected:?} tag, found {found:?} tag")]
    TagClassMismatch { expected: TagClass, found: TagClass },
    #[error("unexpected opening or closing tag [{tag_number}]")]
    UnexpectedBoundary { tag_number: u8 },
    #[error("unmapped {choice} choice for tag number {tag_number}")]
    UnknownChoice {
        choice: &'static str,
        tag_number: u8,
    },
    #[error("invalid length")]
    InvalidLength,
    #[error("invalid value")]
    InvalidValue,
    #[error("expected exactly {expected} elements, found {found}")]
    ElementCount { expected: usize, found: usize },
    #[error("operation unsupported")]
    Unsupported,
    #[error("{0}")]
    Message(&'static str),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("error parsing '{field}' field: {source}")]
    Field {
        field: &'static str,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wraps this error with the name of the field being read.
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping field wrappers.
    pub fn root(&self) -> &DecodeError {
        let mut err = self;
        while let Self::Field { source, .. } = err {
            err = source.as_ref();
        }
        err
    }

    /// Whether this error means "the optional field is not there".
    ///
    /// Running out of input, a tag-number assertion failure, or meeting an
    /// opening/closing tag where a primitive was expected all count as
    /// absence. A tag-class mismatch is a validation failure and does not.
    pub fn is_absence(&self) -> bool {
        matches!(
            self.root(),
            Self::UnexpectedEof | Self::TagNumberMismatch { .. } | Self::UnexpectedBoundary { .. }
        )
    }
}

/// Everything wrong with a value handed to
/// [`ConstructedData::build`](crate::ConstructedData::build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error occurred during build: {}", ProblemList(.problems))]
pub struct BuildError {
    pub problems: Vec<BuildProblem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildProblem {
    #[error("mandatory field '{0}' not set")]
    MissingField(&'static str),
    #[error("field '{field}' must have shape {expected:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: FieldShape,
    },
    #[error("field '{field}' element {index:?} is {found:?}, expected {expected:?}")]
    KindMismatch {
        field: &'static str,
        index: Option<usize>,
        expected: ElementKind,
        found: ElementKind,
    },
    #[error("'numberOfDataElements' is only read for arrays addressed with array index 0")]
    UnexpectedCount,
    #[error("field '{field}' must have exactly {expected} elements, found {found}")]
    ElementCount {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("property 'all' never occurs in constructed data")]
    AllProperty,
    #[error("no codec for this property; only unspecified data can be built")]
    UnspecifiedOnly,
}

struct ProblemList<'a>(&'a [BuildProblem]);

impl fmt::Display for ProblemList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BuildError, BuildProblem, DecodeError};
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn absence_is_classified_through_field_wrappers() {
        let err = DecodeError::UnexpectedEof
            .in_field("arrayIndex")
            .in_field("inputReference");
        assert!(err.is_absence());
        assert_eq!(err.root(), &DecodeError::UnexpectedEof);

        let err = DecodeError::TagNumberMismatch {
            expected: 2,
            found: 3,
        }
        .in_field("arrayIndex");
        assert!(err.is_absence());
    }

    #[test]
    fn class_mismatch_is_not_absence() {
        let err = DecodeError::TagClassMismatch {
            expected: crate::encoding::tag::TagClass::Context,
            found: crate::encoding::tag::TagClass::Application,
        };
        assert!(!err.is_absence());
        assert!(!DecodeError::InvalidLength.in_field("x").is_absence());
    }

    #[test]
    fn field_errors_name_the_field() {
        let err = DecodeError::UnexpectedEof.in_field("closingTag");
        assert_eq!(
            err.to_string(),
            "error parsing 'closingTag' field: unexpected end of input"
        );
    }

    #[test]
    fn build_error_lists_every_problem() {
        let err = BuildError {
            problems: vec![
                BuildProblem::MissingField("faultHighLimit"),
                BuildProblem::UnexpectedCount,
            ],
        };
        let text = err.to_string();
        assert!(text.contains("mandatory field 'faultHighLimit' not set"));
        assert!(text.contains("; 'numberOfDataElements'"));
    }
}
