//! Cursor decoder for the archive wire format.
//!
//! The inverse of [`super::Writer`]: a position cursor over a byte
//! slice, reading big-endian values. The format carries no length
//! fields, so every read is bounds-checked and truncation surfaces as
//! [`Error::UnexpectedEof`] rather than a panic.

use glam::Vec3;

use crate::util::{Error, Result};

use super::format::{STRING_DELIMITER, TERMINATOR};

/// Input cursor for decoding archive records.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over the given archive bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// True when every byte has been consumed.
    #[inline]
    pub fn finished(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            return Err(Error::UnexpectedEof(self.pos));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a big-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a big-endian f32.
    pub fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read three big-endian f32 components.
    pub fn read_vec3(&mut self) -> Result<Vec3> {
        Ok(Vec3::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Read bytes up to the next `#` delimiter as a UTF-8 string.
    /// The delimiter is consumed and not part of the result.
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        loop {
            match self.read_u8()? {
                STRING_DELIMITER => break,
                _ => {}
            }
        }
        let bytes = self.data[start..self.pos - 1].to_vec();
        Ok(String::from_utf8(bytes)?)
    }

    /// Consume the 3-byte `END` terminator. `name` identifies the
    /// record in the error when the literal is not found.
    pub fn read_terminator(&mut self, name: &str) -> Result<()> {
        let b = self
            .take(TERMINATOR.len())
            .map_err(|_| Error::MissingTerminator(name.to_string()))?;
        if b != TERMINATOR {
            return Err(Error::MissingTerminator(name.to_string()));
        }
        Ok(())
    }
}
