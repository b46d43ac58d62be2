//! Canonical Value Codec Adapter
//!
//! Implements the `ValueCodec` port with the oracle network's tagged value
//! encoding:
//!
//! ```text
//! value := tag:u8 body
//! 0x00 Null     -
//! 0x01 Int64    i64 BE
//! 0x02 Text     len:u32BE utf8
//! 0x03 Bytes    len:u32BE bytes
//! 0x04 Bool     u8 (0 | 1)
//! 0x05 Uuid     16 bytes
//! 0x06 Decimal  scale:u16BE len:u32BE unscaled:two's-complement BE
//! 0x07 Array    count:u32BE value{count}
//! ```

use crate::domain::CanonicalValue;
use crate::ports::outbound::{ValueCodec, ValueCodecError};
use num_bigint::BigInt;
use uuid::Uuid;

const TAG_NULL: u8 = 0x00;
const TAG_INT64: u8 = 0x01;
const TAG_TEXT: u8 = 0x02;
const TAG_BYTES: u8 = 0x03;
const TAG_BOOL: u8 = 0x04;
const TAG_UUID: u8 = 0x05;
const TAG_DECIMAL: u8 = 0x06;
const TAG_ARRAY: u8 = 0x07;

/// Tagged canonical value codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalValueCodec;

impl ValueCodec for CanonicalValueCodec {
    fn encode(&self, value: &CanonicalValue) -> Result<Vec<u8>, ValueCodecError> {
        let mut out = Vec::new();
        encode_into(&mut out, value, false)?;
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<CanonicalValue, ValueCodecError> {
        let mut reader = Reader { buf: bytes, pos: 0 };
        let value = decode_value(&mut reader, false)?;
        if reader.pos != bytes.len() {
            return Err(ValueCodecError(format!(
                "{} trailing bytes after {} value",
                bytes.len() - reader.pos,
                value.type_name()
            )));
        }
        Ok(value)
    }
}

fn len_u32(len: usize) -> Result<[u8; 4], ValueCodecError> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| ValueCodecError(format!("length {len} exceeds u32")))
}

fn encode_into(
    out: &mut Vec<u8>,
    value: &CanonicalValue,
    in_array: bool,
) -> Result<(), ValueCodecError> {
    match value {
        CanonicalValue::Null => out.push(TAG_NULL),
        CanonicalValue::Int64(v) => {
            out.push(TAG_INT64);
            out.extend_from_slice(&v.to_be_bytes());
        }
        CanonicalValue::Text(s) => {
            out.push(TAG_TEXT);
            out.extend_from_slice(&len_u32(s.len())?);
            out.extend_from_slice(s.as_bytes());
        }
        CanonicalValue::Bytes(b) => {
            out.push(TAG_BYTES);
            out.extend_from_slice(&len_u32(b.len())?);
            out.extend_from_slice(b);
        }
        CanonicalValue::Bool(b) => {
            out.push(TAG_BOOL);
            out.push(u8::from(*b));
        }
        CanonicalValue::Uuid(u) => {
            out.push(TAG_UUID);
            out.extend_from_slice(u.as_bytes());
        }
        CanonicalValue::Decimal { unscaled, scale } => {
            let digits = unscaled.to_signed_bytes_be();
            out.push(TAG_DECIMAL);
            out.extend_from_slice(&scale.to_be_bytes());
            out.extend_from_slice(&len_u32(digits.len())?);
            out.extend_from_slice(&digits);
        }
        CanonicalValue::Array(items) => {
            if in_array {
                return Err(ValueCodecError("nested arrays are not supported".into()));
            }
            out.push(TAG_ARRAY);
            out.extend_from_slice(&len_u32(items.len())?);
            for item in items {
                encode_into(out, item, true)?;
            }
        }
    }
    Ok(())
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], ValueCodecError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| {
                ValueCodecError(format!(
                    "{what}: need {len} bytes, {} available",
                    self.buf.len() - self.pos
                ))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], ValueCodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

fn decode_value(reader: &mut Reader<'_>, in_array: bool) -> Result<CanonicalValue, ValueCodecError> {
    let [tag] = reader.array::<1>("tag")?;
    match tag {
        TAG_NULL => Ok(CanonicalValue::Null),
        TAG_INT64 => Ok(CanonicalValue::Int64(i64::from_be_bytes(
            reader.array("int64")?,
        ))),
        TAG_TEXT => {
            let len = u32::from_be_bytes(reader.array("text length")?) as usize;
            let bytes = reader.take(len, "text")?;
            let text = std::str::from_utf8(bytes)
                .map_err(|e| ValueCodecError(format!("text is not UTF-8: {e}")))?;
            Ok(CanonicalValue::Text(text.to_string()))
        }
        TAG_BYTES => {
            let len = u32::from_be_bytes(reader.array("bytes length")?) as usize;
            Ok(CanonicalValue::Bytes(reader.take(len, "bytes")?.to_vec()))
        }
        TAG_BOOL => match reader.array::<1>("bool")? {
            [0] => Ok(CanonicalValue::Bool(false)),
            [1] => Ok(CanonicalValue::Bool(true)),
            [other] => Err(ValueCodecError(format!("invalid bool byte 0x{other:02x}"))),
        },
        TAG_UUID => Ok(CanonicalValue::Uuid(Uuid::from_bytes(reader.array("uuid")?))),
        TAG_DECIMAL => {
            let scale = u16::from_be_bytes(reader.array("decimal scale")?);
            let len = u32::from_be_bytes(reader.array("decimal length")?) as usize;
            let digits = reader.take(len, "decimal")?;
            Ok(CanonicalValue::Decimal {
                unscaled: BigInt::from_signed_bytes_be(digits),
                scale,
            })
        }
        TAG_ARRAY => {
            if in_array {
                return Err(ValueCodecError("nested arrays are not supported".into()));
            }
            let count = u32::from_be_bytes(reader.array("array count")?) as usize;
            // Every element takes at least its tag byte.
            if count > reader.remaining() {
                return Err(ValueCodecError(format!(
                    "array declares {count} elements, only {} bytes remain",
                    reader.remaining()
                )));
            }
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(decode_value(reader, true)?);
            }
            Ok(CanonicalValue::Array(items))
        }
        other => Err(ValueCodecError(format!("unknown value tag 0x{other:02x}"))),
    }
}
