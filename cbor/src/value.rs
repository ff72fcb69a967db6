/*!
The owned value tree produced by the decoder.

Accessors never coerce silently: asking for the wrong kind of value returns
[`Error::IncorrectType`] naming both the expected and the actual kind.
*/

use super::decode::Error;
use core::cmp::Ordering;
use num_traits::NumCast;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub enum Value {
    Unsigned(u64),
    /// Stores the encoded argument `n`; the value is `-1 - n`.
    Negative(u64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
    Map(Map),
    Float(f64),
    Bool(bool),
    Null,
    Simple(u8),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unsigned(_) => "unsigned integer",
            Value::Negative(_) => "negative integer",
            Value::Bytes(_) => "byte string",
            Value::Text(_) => "text string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Simple(_) => "simple value",
        }
    }

    fn incorrect<T>(&self, expected: &'static str) -> Result<T, Error> {
        Err(Error::IncorrectType {
            expected,
            found: self.type_name(),
        })
    }

    pub fn as_u64(&self) -> Result<u64, Error> {
        match self {
            Value::Unsigned(v) => Ok(*v),
            _ => self.incorrect("unsigned integer"),
        }
    }

    pub fn as_i64(&self) -> Result<i64, Error> {
        match self {
            Value::Unsigned(v) => i64::try_from(*v).map_err(|_| Error::IntegerOverflow),
            Value::Negative(v) => i64::try_from(*v)
                .map(|v| -1 - v)
                .map_err(|_| Error::IntegerOverflow),
            _ => self.incorrect("integer"),
        }
    }

    pub fn as_f64(&self) -> Result<f64, Error> {
        match self {
            Value::Float(v) => Ok(*v),
            _ => self.incorrect("float"),
        }
    }

    /// Convert an integer or float to `T`, truncating floats towards zero.
    ///
    /// Fails with [`Error::IntegerOverflow`] if the value does not fit, which
    /// includes NaN and the infinities.
    pub fn to_int<T: NumCast>(&self) -> Result<T, Error> {
        let converted = match self {
            Value::Unsigned(v) => T::from(*v),
            Value::Negative(v) => T::from(-1i128 - *v as i128),
            Value::Float(v) => T::from(v.trunc()),
            _ => return self.incorrect("number"),
        };
        converted.ok_or(Error::IntegerOverflow)
    }

    pub fn as_bool(&self) -> Result<bool, Error> {
        match self {
            Value::Bool(v) => Ok(*v),
            _ => self.incorrect("boolean"),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], Error> {
        match self {
            Value::Bytes(v) => Ok(v),
            _ => self.incorrect("byte string"),
        }
    }

    pub fn as_text(&self) -> Result<&str, Error> {
        match self {
            Value::Text(v) => Ok(v),
            _ => self.incorrect("text string"),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], Error> {
        match self {
            Value::Array(v) => Ok(v),
            _ => self.incorrect("array"),
        }
    }

    pub fn as_map(&self) -> Result<&Map, Error> {
        match self {
            Value::Map(v) => Ok(v),
            _ => self.incorrect("map"),
        }
    }

    pub fn into_map(self) -> Result<Map, Error> {
        match self {
            Value::Map(v) => Ok(v),
            _ => self.incorrect("map"),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Zero, empty, false and null values.
    pub fn is_empty_or_zero(&self) -> bool {
        match self {
            Value::Unsigned(v) => *v == 0,
            Value::Negative(_) => false,
            Value::Bytes(v) => v.is_empty(),
            Value::Text(v) => v.is_empty(),
            Value::Array(v) => v.is_empty(),
            Value::Map(v) => v.is_empty(),
            Value::Float(v) => *v == 0.0,
            Value::Bool(v) => !v,
            Value::Null => true,
            Value::Simple(_) => false,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Unsigned(_) => 0,
            Value::Negative(_) => 1,
            Value::Bytes(_) => 2,
            Value::Text(_) => 3,
            Value::Array(_) => 4,
            Value::Map(_) => 5,
            Value::Float(_) => 6,
            Value::Bool(_) => 7,
            Value::Null => 8,
            Value::Simple(_) => 9,
        }
    }
}

// Total order so values can key a map; floats compare by `total_cmp`.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Unsigned(a), Value::Unsigned(b)) => a.cmp(b),
            (Value::Negative(a), Value::Negative(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Simple(a), Value::Simple(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Unsigned(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// A CBOR map. Inserting an existing key replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Map(BTreeMap<Value, Value>);

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up an unsigned integer key.
    pub fn get_uint(&self, key: u64) -> Option<&Value> {
        self.0.get(&Value::Unsigned(key))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(Value, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
