//! Field-level read/write protocol shared by every composite value.
//!
//! Each helper opens a context named after the field, runs the element codec,
//! and wraps any error with the field name.

use alloc::vec::Vec;

use crate::encoding::{reader::Reader, tag::TagHeader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Reads a mandatory field.
pub fn read_field<'a, T>(
    r: &mut Reader<'a>,
    field: &'static str,
    f: impl FnOnce(&mut Reader<'a>) -> Result<T, DecodeError>,
) -> Result<T, DecodeError> {
    r.pull_context(field)?;
    let value = f(r).map_err(|e| e.in_field(field))?;
    r.close_context(field)?;
    Ok(value)
}

/// Reads a field that may be missing.
///
/// On an absence signal (see [`DecodeError::is_absence`]) the reader is
/// restored to where it was before the attempt and `None` is returned. Any
/// other error is fatal.
pub fn read_optional<'a, T>(
    r: &mut Reader<'a>,
    field: &'static str,
    f: impl FnOnce(&mut Reader<'a>) -> Result<T, DecodeError>,
) -> Result<Option<T>, DecodeError> {
    let snapshot = *r;
    match read_field(r, field, f) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_absence() => {
            log::debug!(
                "optional field '{field}' absent at {} ({})",
                snapshot.position(),
                err.root()
            );
            *r = snapshot;
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Whether the next header is the closing tag `[number]`.
///
/// A header that cannot be read counts as closing; the caller's closing-tag
/// read then reports the real error.
pub fn is_closing_tag(r: &Reader<'_>, number: u8) -> bool {
    TagHeader::peek(r).map_or(true, |h| h.closes(number))
}

/// Reads elements until the closing tag `[closing]` is next, without
/// consuming it.
pub fn read_terminated<'a, T>(
    r: &mut Reader<'a>,
    field: &'static str,
    closing: u8,
    mut f: impl FnMut(&mut Reader<'a>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    r.pull_context(field)?;
    let mut items = Vec::new();
    while !is_closing_tag(r, closing) {
        let item = f(r).map_err(|e| e.in_field(field))?;
        items.push(item);
    }
    r.close_context(field)?;
    Ok(items)
}

pub fn write_field<'b>(
    w: &mut Writer<'b>,
    field: &'static str,
    f: impl FnOnce(&mut Writer<'b>) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    w.push_context(field)?;
    f(w).map_err(|e| e.in_field(field))?;
    w.pop_context(field)
}

/// Writes `value` if it is set; an unset optional field writes nothing.
pub fn write_optional<'b, T>(
    w: &mut Writer<'b>,
    field: &'static str,
    value: Option<&T>,
    f: impl FnOnce(&mut Writer<'b>, &T) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    match value {
        Some(value) => write_field(w, field, |w| f(w, value)),
        None => Ok(()),
    }
}

pub fn write_terminated<'b, T>(
    w: &mut Writer<'b>,
    field: &'static str,
    items: &[T],
    mut f: impl FnMut(&mut Writer<'b>, &T) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    w.push_context(field)?;
    for item in items {
        f(w, item).map_err(|e| e.in_field(field))?;
    }
    w.pop_context(field)
}
