//! Big-endian, 4-byte aligned XDR encoder.

use bytes::{BufMut, BytesMut};

use super::{padding, WriteXdr};
use crate::error::{CodecError, Result};

/// Append-only XDR output buffer.
///
/// Callers write into a fresh writer and only take the bytes out once the
/// whole value has been written, so a failed encode never leaks a partial
/// buffer.
#[derive(Debug, Default)]
pub struct XdrWriter {
    buf: BytesMut,
}

impl XdrWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(128),
        }
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.put_i64(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.put_u64(value);
    }

    /// XDR booleans are a full 4-byte word holding 0 or 1.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(u32::from(value));
    }

    /// Writes fixed-length opaque data followed by zero padding.
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
        self.buf.put_bytes(0, padding(bytes.len()));
    }

    /// Writes variable-length opaque data: length word, bytes, padding.
    pub fn write_var_opaque(&mut self, bytes: &[u8], max: usize) -> Result<()> {
        if bytes.len() > max {
            return Err(CodecError::constraint(format!(
                "opaque field is {} bytes, limit is {}",
                bytes.len(),
                max
            )));
        }
        self.write_u32(bytes.len() as u32);
        self.write_fixed_opaque(bytes);
        Ok(())
    }

    /// Writes a bounded XDR string. XDR strings are opaque bytes on the wire.
    pub fn write_string(&mut self, value: &str, max: usize) -> Result<()> {
        self.write_var_opaque(value.as_bytes(), max)
    }

    /// Writes an XDR optional: a presence word, then the value if present.
    pub fn write_optional<T: WriteXdr>(&mut self, value: Option<&T>) -> Result<()> {
        match value {
            Some(inner) => {
                self.write_bool(true);
                inner.write_xdr(self)
            }
            None => {
                self.write_bool(false);
                Ok(())
            }
        }
    }

    /// Writes a variable-length array bounded by `max` elements.
    pub fn write_array<T: WriteXdr>(&mut self, items: &[T], max: usize) -> Result<()> {
        if items.len() > max {
            return Err(CodecError::constraint(format!(
                "array has {} elements, limit is {}",
                items.len(),
                max
            )));
        }
        self.write_u32(items.len() as u32);
        for item in items {
            item.write_xdr(self)?;
        }
        Ok(())
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the writer and returns the encoded bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
