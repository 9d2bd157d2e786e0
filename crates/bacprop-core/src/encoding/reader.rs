use core::fmt;

use crate::encoding::context::ContextStack;
use crate::DecodeError;

/// Cursor over a borrowed byte slice.
///
/// `Reader` is `Copy`: copying it takes a snapshot of the position and the
/// open contexts, and assigning the copy back rewinds both.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    contexts: ContextStack,
}

impl<'a> Reader<'a> {
    pub const fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            contexts: ContextStack::new(),
        }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor back (or forward) to an absolute position.
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.buf.len());
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unread bytes.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn contexts(&self) -> &ContextStack {
        &self.contexts
    }

    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEof)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof);
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..start + len])
    }

    pub fn read_be_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_be_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_exact(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn pull_context(&mut self, name: &'static str) -> Result<(), DecodeError> {
        self.contexts.push(name)?;
        log::trace!("read {:?} @{}", self.contexts, self.pos);
        Ok(())
    }

    pub fn close_context(&mut self, name: &'static str) -> Result<(), DecodeError> {
        log::trace!("done {:?} @{}", self.contexts, self.pos);
        self.contexts.pop(name)?;
        Ok(())
    }

    /// Records a derived field in the trace. Nothing is consumed.
    pub fn read_virtual(&self, name: &'static str, value: &dyn fmt::Debug) {
        log::trace!("virtual {:?}.{name} = {value:?}", self.contexts);
    }
}
