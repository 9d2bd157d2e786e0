/// Any application-tagged value.
pub mod application;
/// The [`TagPayload`] trait and its implementations.
pub mod payload;
/// Payloads paired with their exact tag header.
pub mod tagged;

pub use application::ApplicationTag;
pub use payload::{Enumerated, Null, OctetString, TagPayload, Unknown};
pub use tagged::Tagged;
