use super::value::{Map, Value};
use thiserror::Error;

/// Nesting limit applied by [`decode_value`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

const BREAK: u8 = 0xFF;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Need at least {0} more bytes")]
    NeedMoreData(usize),

    #[error("Invalid minor-type value {0}")]
    InvalidMinorValue(u8),

    #[error("Invalid simple type {0}")]
    InvalidSimpleType(u8),

    #[error("Unsupported major type {0}")]
    UnsupportedMajorType(u8),

    #[error("Maximum nesting depth exceeded")]
    MaxRecursion,

    #[error("Incorrect type, expected {expected}, found {found}")]
    IncorrectType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Integer value out of range")]
    IntegerOverflow,

    #[error("Chunked string contains an invalid chunk")]
    InvalidChunk,

    #[error(transparent)]
    InvalidUtf8(#[from] core::str::Utf8Error),
}

/// Borrow `len` bytes at `offset`, or report how many are missing.
fn take(data: &[u8], offset: usize, len: usize) -> Result<&[u8], Error> {
    let available = data.len().saturating_sub(offset);
    if len > available {
        Err(Error::NeedMoreData(len - available))
    } else {
        Ok(&data[offset..offset + len])
    }
}

fn take_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], Error> {
    take(data, offset, N)?
        .try_into()
        .map_err(|_| Error::NeedMoreData(N))
}

/// Decode the argument that follows an initial byte with the given
/// additional information.
///
/// Returns the argument and the offset of the first byte after it. `None`
/// means the item has indefinite length (additional information 31).
pub fn decode_length(
    data: &[u8],
    offset: usize,
    minor: u8,
) -> Result<(Option<u64>, usize), Error> {
    match minor {
        0..=23 => Ok((Some(minor as u64), offset)),
        24 => Ok((Some(take_array::<1>(data, offset)?[0] as u64), offset + 1)),
        25 => Ok((
            Some(u16::from_be_bytes(take_array(data, offset)?) as u64),
            offset + 2,
        )),
        26 => Ok((
            Some(u32::from_be_bytes(take_array(data, offset)?) as u64),
            offset + 4,
        )),
        27 => Ok((Some(u64::from_be_bytes(take_array(data, offset)?)), offset + 8)),
        31 => Ok((None, offset)),
        _ => Err(Error::InvalidMinorValue(minor)),
    }
}

fn definite_length(data: &[u8], offset: usize, minor: u8) -> Result<(u64, usize), Error> {
    match decode_length(data, offset, minor)? {
        (Some(v), offset) => Ok((v, offset)),
        (None, _) => Err(Error::InvalidMinorValue(minor)),
    }
}

fn to_usize(len: u64) -> Result<usize, Error> {
    usize::try_from(len).map_err(|_| Error::IntegerOverflow)
}

/// Convert the bits of an IEEE 754 binary16 value.
pub fn f16_to_f64(bits: u16) -> f64 {
    let sign = if bits & 0x8000 != 0 { -1.0 } else { 1.0 };
    let exponent = (bits >> 10) & 0x1F;
    let fraction = (bits & 0x03FF) as f64;
    match exponent {
        // Subnormal: 2^-14 * (fraction / 1024)
        0 => sign * fraction * 2f64.powi(-24),
        0x1F if fraction == 0.0 => sign * f64::INFINITY,
        0x1F => f64::NAN,
        _ => sign * 2f64.powi(exponent as i32 - 15) * (1.0 + fraction / 1024.0),
    }
}

/* Indefinite length strings are not reassembled: the chunks are skipped and
 * an empty string is produced in their place. */
fn skip_chunks(data: &[u8], mut offset: usize, major: u8) -> Result<usize, Error> {
    loop {
        let initial = take_array::<1>(data, offset)?[0];
        offset += 1;
        if initial == BREAK {
            return Ok(offset);
        }
        if initial >> 5 != major {
            return Err(Error::InvalidChunk);
        }
        let (len, o) = match decode_length(data, offset, initial & 0x1F)? {
            (Some(len), o) => (to_usize(len)?, o),
            (None, _) => return Err(Error::InvalidChunk),
        };
        take(data, o, len)?;
        offset = o + len;
    }
}

fn decode_item(data: &[u8], offset: usize, depth: usize) -> Result<(Value, usize), Error> {
    decode_at(data, offset, depth)?.ok_or(Error::NeedMoreData(1))
}

fn at_break(data: &[u8], offset: usize) -> Result<bool, Error> {
    Ok(take_array::<1>(data, offset)?[0] == BREAK)
}

fn decode_array(
    data: &[u8],
    mut offset: usize,
    count: Option<u64>,
    depth: usize,
) -> Result<(Value, usize), Error> {
    let depth = depth.checked_sub(1).ok_or(Error::MaxRecursion)?;
    let mut items = Vec::new();
    match count {
        Some(count) => {
            for _ in 0..count {
                let (item, o) = decode_item(data, offset, depth)?;
                items.push(item);
                offset = o;
            }
        }
        None => {
            while !at_break(data, offset)? {
                let (item, o) = decode_item(data, offset, depth)?;
                items.push(item);
                offset = o;
            }
            offset += 1;
        }
    }
    Ok((Value::Array(items), offset))
}

fn decode_map(
    data: &[u8],
    mut offset: usize,
    count: Option<u64>,
    depth: usize,
) -> Result<(Value, usize), Error> {
    let depth = depth.checked_sub(1).ok_or(Error::MaxRecursion)?;
    let mut map = Map::new();
    let mut entry = |offset: usize| -> Result<usize, Error> {
        let (key, o) = decode_item(data, offset, depth)?;
        let (value, o) = decode_item(data, o, depth)?;
        map.insert(key, value);
        Ok(o)
    };
    match count {
        Some(count) => {
            for _ in 0..count {
                offset = entry(offset)?;
            }
        }
        None => {
            while !at_break(data, offset)? {
                offset = entry(offset)?;
            }
            offset += 1;
        }
    }
    Ok((Value::Map(map), offset))
}

fn decode_simple(data: &[u8], offset: usize, minor: u8) -> Result<(Value, usize), Error> {
    match minor {
        0..=19 => Ok((Value::Simple(minor), offset)),
        20 => Ok((Value::Bool(false), offset)),
        21 => Ok((Value::Bool(true), offset)),
        // Undefined is folded into null
        22 | 23 => Ok((Value::Null, offset)),
        24 => {
            let v = take_array::<1>(data, offset)?[0];
            if v < 32 {
                Err(Error::InvalidSimpleType(v))
            } else {
                Ok((Value::Simple(v), offset + 1))
            }
        }
        25 => Ok((
            Value::Float(f16_to_f64(u16::from_be_bytes(take_array(data, offset)?))),
            offset + 2,
        )),
        26 => Ok((
            Value::Float(f32::from_be_bytes(take_array(data, offset)?) as f64),
            offset + 4,
        )),
        27 => Ok((
            Value::Float(f64::from_be_bytes(take_array(data, offset)?)),
            offset + 8,
        )),
        // A break outside of an indefinite length container
        31 => Ok((Value::Null, offset)),
        _ => Err(Error::InvalidMinorValue(minor)),
    }
}

fn decode_at(
    data: &[u8],
    offset: usize,
    depth: usize,
) -> Result<Option<(Value, usize)>, Error> {
    if offset >= data.len() {
        return Ok(None);
    }

    let (major, minor) = (data[offset] >> 5, data[offset] & 0x1F);
    let offset = offset + 1;
    let decoded = match major {
        0 => {
            let (v, offset) = definite_length(data, offset, minor)?;
            Ok((Value::Unsigned(v), offset))
        }
        1 => {
            let (v, offset) = definite_length(data, offset, minor)?;
            Ok((Value::Negative(v), offset))
        }
        2 => match decode_length(data, offset, minor)? {
            (Some(len), offset) => {
                let len = to_usize(len)?;
                Ok((Value::Bytes(take(data, offset, len)?.to_vec()), offset + len))
            }
            (None, offset) => Ok((Value::Bytes(Vec::new()), skip_chunks(data, offset, 2)?)),
        },
        3 => match decode_length(data, offset, minor)? {
            (Some(len), offset) => {
                let len = to_usize(len)?;
                let s = core::str::from_utf8(take(data, offset, len)?)?;
                Ok((Value::Text(s.to_string()), offset + len))
            }
            (None, offset) => Ok((Value::Text(String::new()), skip_chunks(data, offset, 3)?)),
        },
        4 => {
            let (count, offset) = decode_length(data, offset, minor)?;
            decode_array(data, offset, count, depth)
        }
        5 => {
            let (count, offset) = decode_length(data, offset, minor)?;
            decode_map(data, offset, count, depth)
        }
        7 => decode_simple(data, offset, minor),
        _ => Err(Error::UnsupportedMajorType(major)),
    };
    decoded.map(Some)
}

/// Decode the value starting at `offset`.
///
/// Returns `Ok(None)` when `offset` is at or past the end of `data`,
/// otherwise the value and the offset of the first byte after it.
pub fn decode_value(data: &[u8], offset: usize) -> Result<Option<(Value, usize)>, Error> {
    decode_value_with_depth(data, offset, DEFAULT_MAX_DEPTH)
}

/// As [`decode_value`], with an explicit limit on array/map nesting.
pub fn decode_value_with_depth(
    data: &[u8],
    offset: usize,
    max_depth: usize,
) -> Result<Option<(Value, usize)>, Error> {
    decode_at(data, offset, max_depth)
}

/// Decode the first value in `data`, which must not be empty.
pub fn parse(data: &[u8]) -> Result<(Value, usize), Error> {
    decode_value(data, 0)?.ok_or(Error::NeedMoreData(1))
}
