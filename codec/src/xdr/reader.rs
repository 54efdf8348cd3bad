//! Big-endian, 4-byte aligned XDR decoder over a borrowed buffer.

use bytes::Buf;

use super::{padding, ReadXdr};
use crate::config::DecodeLimits;
use crate::error::{CodecError, Result};

/// Cursor over an XDR buffer.
///
/// Every read checks the remaining length first, so a truncated buffer
/// surfaces as [`CodecError::MalformedXdr`] instead of a panic inside
/// `bytes::Buf`.
#[derive(Debug)]
pub struct XdrReader<'a> {
    buf: &'a [u8],
    depth_remaining: u32,
}

impl<'a> XdrReader<'a> {
    /// Creates a reader with the default recursion budget and no input cap.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            depth_remaining: DecodeLimits::default().max_depth,
        }
    }

    /// Creates a reader that enforces `limits`.
    pub fn with_limits(buf: &'a [u8], limits: DecodeLimits) -> Result<Self> {
        if buf.len() > limits.max_input_length {
            return Err(CodecError::malformed(format!(
                "input is {} bytes, limit is {}",
                buf.len(),
                limits.max_input_length
            )));
        }
        Ok(Self {
            buf,
            depth_remaining: limits.max_depth,
        })
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.buf.remaining() < needed {
            return Err(CodecError::malformed(format!(
                "truncated buffer: need {} bytes, {} remaining",
                needed,
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.buf.get_u32())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.ensure(8)?;
        Ok(self.buf.get_i64())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        Ok(self.buf.get_u64())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::malformed(format!(
                "boolean word must be 0 or 1, got {}",
                other
            ))),
        }
    }

    /// Reads `len` bytes of opaque data and consumes its padding, which must
    /// be zero.
    fn read_padded(&mut self, len: usize) -> Result<&'a [u8]> {
        let pad = padding(len);
        self.ensure(len + pad)?;
        let (data, rest) = self.buf.split_at(len);
        let (pad_bytes, rest) = rest.split_at(pad);
        if pad_bytes.iter().any(|&b| b != 0) {
            return Err(CodecError::malformed("non-zero padding bytes"));
        }
        self.buf = rest;
        Ok(data)
    }

    /// Reads a fixed-length opaque array.
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        let data = self.read_padded(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(data);
        Ok(out)
    }

    /// Reads variable-length opaque data of at most `max` bytes.
    pub fn read_var_opaque(&mut self, max: usize) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(CodecError::malformed(format!(
                "opaque length {} exceeds limit {}",
                len, max
            )));
        }
        Ok(self.read_padded(len)?.to_vec())
    }

    /// Reads a bounded XDR string; the bytes must be valid UTF-8.
    pub fn read_string(&mut self, max: usize) -> Result<String> {
        let bytes = self.read_var_opaque(max)?;
        String::from_utf8(bytes).map_err(|_| CodecError::malformed("string is not valid UTF-8"))
    }

    /// Reads an XDR optional.
    pub fn read_optional<T: ReadXdr>(&mut self) -> Result<Option<T>> {
        if self.read_bool()? {
            Ok(Some(T::read_xdr(self)?))
        } else {
            Ok(None)
        }
    }

    /// Reads a variable-length array of at most `max` elements.
    pub fn read_array<T: ReadXdr>(&mut self, max: usize) -> Result<Vec<T>> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(CodecError::malformed(format!(
                "array length {} exceeds limit {}",
                len, max
            )));
        }
        // Every element takes at least one word.
        let mut items = Vec::with_capacity(len.min(self.buf.remaining() / 4));
        for _ in 0..len {
            items.push(T::read_xdr(self)?);
        }
        Ok(items)
    }

    /// Runs `f` one level deeper in a recursive structure.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth_remaining == 0 {
            return Err(CodecError::malformed("recursion depth limit exceeded"));
        }
        self.depth_remaining -= 1;
        let result = f(self);
        self.depth_remaining += 1;
        result
    }

    /// Fails if any input is left over.
    pub fn finish(self) -> Result<()> {
        if self.buf.has_remaining() {
            return Err(CodecError::malformed(format!(
                "{} trailing bytes after value",
                self.buf.remaining()
            )));
        }
        Ok(())
    }
}
