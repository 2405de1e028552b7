//! Document implementation for `serde_json::Value`.
//!
//! _Requires Cargo feature `json`._
//!
//! Integers are read strictly: the number must be integral and fit the target
//! type. Floating point targets accept any number their range can hold.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::document::{Coerce, Document};

/// Errors occurring while coercing a JSON value.
#[derive(Debug, Error)]
pub enum Error {
    /// The value has the wrong JSON type.
    #[error("Expected {expected}, found {found}.")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The number cannot be represented by the target type.
    #[error("Number {number} is out of range for `{target}`.")]
    OutOfRange { number: Number, target: &'static str },
}

impl Error {
    fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::Mismatch {
            expected,
            found: kind(found),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Document for Value {
    type Error = Error;

    fn object() -> Self {
        Value::Object(Map::new())
    }

    fn array() -> Self {
        Value::Array(Vec::new())
    }

    fn null() -> Self {
        Value::Null
    }

    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: Self) {
        if !matches!(self, Value::Object(_)) {
            *self = Value::Object(Map::new());
        }

        if let Value::Object(map) = self {
            map.insert(key.to_string(), value);
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    fn array_len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    fn at(&self, index: usize) -> Option<&Self> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    fn push_back(&mut self, value: Self) {
        if !matches!(self, Value::Array(_)) {
            *self = Value::Array(Vec::new());
        }

        if let Value::Array(items) = self {
            items.push(value);
        }
    }
}

impl Coerce<bool> for Value {
    fn coerce(&self) -> Result<bool, Error> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(Error::mismatch("boolean", self)),
        }
    }

    fn from_scalar(value: &bool) -> Self {
        Value::Bool(*value)
    }
}

impl Coerce<String> for Value {
    fn coerce(&self) -> Result<String, Error> {
        match self {
            Value::String(s) => Ok(s.clone()),
            _ => Err(Error::mismatch("string", self)),
        }
    }

    fn from_scalar(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl Coerce<char> for Value {
    fn coerce(&self) -> Result<char, Error> {
        let Value::String(s) = self else {
            Err(Error::mismatch("string", self))?
        };

        let mut chars = s.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::Mismatch {
                expected: "single character",
                found: "string",
            }),
        }
    }

    fn from_scalar(value: &char) -> Self {
        Value::String(value.to_string())
    }
}

macro_rules! coerce_integer {
    ($as:ident: $($t:ident),*) => {
        $(
            impl Coerce<$t> for Value {
                fn coerce(&self) -> Result<$t, Error> {
                    let Value::Number(n) = self else {
                        Err(Error::mismatch("number", self))?
                    };

                    n.$as()
                        .and_then(|x| $t::try_from(x).ok())
                        .ok_or_else(|| Error::OutOfRange {
                            number: n.clone(),
                            target: stringify!($t),
                        })
                }

                fn from_scalar(value: &$t) -> Self {
                    Value::from(*value)
                }
            }
        )*
    };
}

coerce_integer!(as_i64: i8, i16, i32, i64, isize);
coerce_integer!(as_u64: u8, u16, u32, u64, usize);

impl Coerce<f64> for Value {
    fn coerce(&self) -> Result<f64, Error> {
        match self {
            Value::Number(n) => n.as_f64().ok_or_else(|| Error::OutOfRange {
                number: n.clone(),
                target: "f64",
            }),
            _ => Err(Error::mismatch("number", self)),
        }
    }

    /// Non-finite values have no JSON representation and become null.
    fn from_scalar(value: &f64) -> Self {
        Value::from(*value)
    }
}

impl Coerce<f32> for Value {
    /// Numbers beyond the range of `f32` fail rather than becoming infinite.
    fn coerce(&self) -> Result<f32, Error> {
        let Value::Number(n) = self else {
            Err(Error::mismatch("number", self))?
        };

        let x = Coerce::<f64>::coerce(self)?;
        let narrowed = x as f32;

        if x.is_finite() && narrowed.is_infinite() {
            Err(Error::OutOfRange {
                number: n.clone(),
                target: "f32",
            })?
        }

        Ok(narrowed)
    }

    fn from_scalar(value: &f32) -> Self {
        Value::from(*value)
    }
}

/// Fields holding raw JSON are passed through unchanged.
impl Coerce<Value> for Value {
    fn coerce(&self) -> Result<Value, Error> {
        Ok(self.clone())
    }

    fn from_scalar(value: &Value) -> Self {
        value.clone()
    }
}

crate::scalar!(Value);
