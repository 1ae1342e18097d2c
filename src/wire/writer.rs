//! Append-only encoder for the archive wire format.
//!
//! Every multi-byte value is written big-endian. The writer owns a
//! single byte buffer; one writer instance accumulates every record of
//! a batch and is finalized exactly once with [`Writer::into_bytes`].

use glam::{Mat4, Vec3, Vec4};

use crate::util::{Error, Result};

use super::format::STRING_DELIMITER;

/// Output buffer for encoding archive records.
#[derive(Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of encoded bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been encoded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write a single unsigned byte. Fails with
    /// [`Error::ValueOutOfRange`] if the value does not fit.
    pub fn write_u8(&mut self, v: u32) -> Result<()> {
        if v > 255 {
            return Err(Error::ValueOutOfRange(v));
        }
        self.buf.push(v as u8);
        Ok(())
    }

    /// Write a u32 value (big-endian).
    #[inline]
    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Write one literal byte, used for record type tags.
    #[inline]
    pub fn write_byte_tag(&mut self, b: u8) {
        self.buf.push(b);
    }

    /// Write a byte sequence verbatim.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write the UTF-8 bytes of `s` followed by the `#` delimiter.
    ///
    /// `s` must not itself contain `#`: the delimiter is the only
    /// length signal, so an embedded `#` silently truncates the string
    /// on decode. No validation is performed, matching the format.
    pub fn write_string(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(STRING_DELIMITER);
    }

    /// Write an f32 value (big-endian).
    #[inline]
    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Write three big-endian f32 components.
    #[inline]
    pub fn write_vec3(&mut self, v: Vec3) {
        self.write_f32(v.x);
        self.write_f32(v.y);
        self.write_f32(v.z);
    }

    /// Write four big-endian f32 components.
    #[inline]
    pub fn write_vec4(&mut self, v: Vec4) {
        self.write_f32(v.x);
        self.write_f32(v.y);
        self.write_f32(v.z);
        self.write_f32(v.w);
    }

    /// Write 16 big-endian f32 values in column-major order.
    ///
    /// Not used by the animation pipeline; kept as a general-purpose
    /// encoder for matrix-valued records.
    pub fn write_mat4(&mut self, m: Mat4) {
        self.write_vec4(m.x_axis);
        self.write_vec4(m.y_axis);
        self.write_vec4(m.z_axis);
        self.write_vec4(m.w_axis);
    }
}
