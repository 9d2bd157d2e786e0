/// Named context stack used for trace output and nesting limits.
pub mod context;
/// Simple, optional, and terminated field helpers.
pub mod fields;
/// Integer payload encoders and small tag-writing helpers.
pub mod primitives;
/// Zero-copy byte reader for decoding BACnet payloads.
pub mod reader;
/// BACnet tag headers (application, context, opening/closing).
pub mod tag;
/// Byte writer for encoding into a caller-owned buffer.
pub mod writer;
