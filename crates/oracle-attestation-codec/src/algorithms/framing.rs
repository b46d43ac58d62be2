//! # Framing Primitives
//!
//! Forward-only cursor over an untrusted buffer. Outer attestation fields use
//! big-endian length prefixes, the argument list uses little-endian ones; the
//! two readers and writers are kept separate so the byte order is always named
//! at the call site.

use crate::domain::{invariant_within_buffer, CodecError, Field};

/// Size of a u32 length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Forward-only reader. Every read checks bounds before slicing.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Start reading at offset 0.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Returns true once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Take exactly `len` bytes.
    pub fn take(&mut self, field: Field, len: usize) -> Result<&'a [u8], CodecError> {
        invariant_within_buffer(field, self.offset, len, self.buf.len())?;
        let start = self.offset;
        self.offset += len;
        Ok(&self.buf[start..self.offset])
    }

    fn take_array<const N: usize>(&mut self, field: Field) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(field, N)?);
        Ok(out)
    }

    /// Read one byte.
    pub fn read_u8(&mut self, field: Field) -> Result<u8, CodecError> {
        Ok(self.take_array::<1>(field)?[0])
    }

    /// Read a big-endian u16.
    pub fn read_u16_be(&mut self, field: Field) -> Result<u16, CodecError> {
        Ok(u16::from_be_bytes(self.take_array(field)?))
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self, field: Field) -> Result<u32, CodecError> {
        Ok(u32::from_be_bytes(self.take_array(field)?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self, field: Field) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.take_array(field)?))
    }

    /// Read a big-endian u64.
    pub fn read_u64_be(&mut self, field: Field) -> Result<u64, CodecError> {
        Ok(u64::from_be_bytes(self.take_array(field)?))
    }

    /// Read a u32 BE length prefix followed by that many bytes.
    pub fn read_be_prefixed(&mut self, field: Field) -> Result<&'a [u8], CodecError> {
        let len = self.read_u32_be(field.clone())? as usize;
        self.take(field, len)
    }

    /// Read a u32 LE length prefix followed by that many bytes.
    ///
    /// The prefix and the body are reported under separate fields so a short
    /// prefix and a short body are distinguishable.
    pub fn read_le_prefixed(
        &mut self,
        prefix_field: Field,
        body_field: Field,
    ) -> Result<&'a [u8], CodecError> {
        let len = self.read_u32_le(prefix_field)? as usize;
        self.take(body_field, len)
    }

    /// Fail if any bytes remain.
    pub fn finish(&self, last_field: Field) -> Result<(), CodecError> {
        if self.is_exhausted() {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes {
                field: last_field,
                count: self.remaining(),
            })
        }
    }
}

fn prefix_len(field: &'static str, len: usize) -> Result<u32, CodecError> {
    u32::try_from(len)
        .map_err(|_| CodecError::validation(field, format!("length {len} exceeds u32 prefix")))
}

/// Append a u32 BE length prefix and the bytes.
pub fn write_be_prefixed(
    out: &mut Vec<u8>,
    field: &'static str,
    bytes: &[u8],
) -> Result<(), CodecError> {
    out.extend_from_slice(&prefix_len(field, bytes.len())?.to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

/// Append a u32 LE length prefix and the bytes.
pub fn write_le_prefixed(
    out: &mut Vec<u8>,
    field: &'static str,
    bytes: &[u8],
) -> Result<(), CodecError> {
    out.extend_from_slice(&prefix_len(field, bytes.len())?.to_le_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}
