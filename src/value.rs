use std::{collections::HashMap, fmt, str::FromStr};

use crate::BoxError;

/// Bound option values of one context level, keyed by option key.
pub type Values = HashMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    String,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
        }
    }

    /// Whether this is the zero value of its type. Zero defaults count as unset.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Bool(it) => !it,
            Value::String(it) => it.is_empty(),
            Value::Int32(it) => *it == 0,
            Value::Int64(it) => *it == 0,
            Value::Float32(it) => *it == 0.0,
            Value::Float64(it) => *it == 0.0,
        }
    }

    /// Parses `text` as a value of the given kind.
    pub fn parse(kind: Kind, text: &str) -> Result<Value, BoxError> {
        let res = match kind {
            Kind::Bool => Value::Bool(bool::parse_text(text)?),
            Kind::String => Value::String(text.to_string()),
            Kind::Int32 => Value::Int32(i32::parse_text(text)?),
            Kind::Int64 => Value::Int64(i64::parse_text(text)?),
            Kind::Float32 => Value::Float32(f32::parse_text(text)?),
            Kind::Float64 => Value::Float64(f64::parse_text(text)?),
        };
        Ok(res)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Display` for floats is the shortest representation that round-trips.
        match self {
            Value::Bool(it) => fmt::Display::fmt(it, f),
            Value::String(it) => f.write_str(it),
            Value::Int32(it) => fmt::Display::fmt(it, f),
            Value::Int64(it) => fmt::Display::fmt(it, f),
            Value::Float32(it) => fmt::Display::fmt(it, f),
            Value::Float64(it) => fmt::Display::fmt(it, f),
        }
    }
}

impl From<bool> for Value {
    fn from(it: bool) -> Value {
        Value::Bool(it)
    }
}

impl From<&str> for Value {
    fn from(it: &str) -> Value {
        Value::String(it.to_string())
    }
}

impl From<String> for Value {
    fn from(it: String) -> Value {
        Value::String(it)
    }
}

impl From<i32> for Value {
    fn from(it: i32) -> Value {
        Value::Int32(it)
    }
}

impl From<i64> for Value {
    fn from(it: i64) -> Value {
        Value::Int64(it)
    }
}

impl From<f32> for Value {
    fn from(it: f32) -> Value {
        Value::Float32(it)
    }
}

impl From<f64> for Value {
    fn from(it: f64) -> Value {
        Value::Float64(it)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
pub struct InvalidBool;

/// Conversion between a Rust type and the [`Value`] variant that holds it.
pub trait FromValue: Sized {
    const KIND: Kind;

    fn from_value(value: &Value) -> Option<Self>;

    /// Parses user supplied text, as typed on the command line or at a prompt.
    fn parse_text(text: &str) -> Result<Self, BoxError>;
}

impl FromValue for bool {
    const KIND: Kind = Kind::Bool;

    fn from_value(value: &Value) -> Option<bool> {
        match value {
            Value::Bool(it) => Some(*it),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Result<bool, BoxError> {
        match text {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(InvalidBool.into()),
        }
    }
}

impl FromValue for String {
    const KIND: Kind = Kind::String;

    fn from_value(value: &Value) -> Option<String> {
        match value {
            Value::String(it) => Some(it.clone()),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Result<String, BoxError> {
        Ok(text.to_string())
    }
}

macro_rules! from_str_values {
    ($($ty:ty => $variant:ident;)*) => {$(
        impl FromValue for $ty {
            const KIND: Kind = Kind::$variant;

            fn from_value(value: &Value) -> Option<$ty> {
                match value {
                    Value::$variant(it) => Some(*it),
                    _ => None,
                }
            }

            fn parse_text(text: &str) -> Result<$ty, BoxError> {
                <$ty as FromStr>::from_str(text).map_err(BoxError::from)
            }
        }
    )*};
}

from_str_values! {
    i32 => Int32;
    i64 => Int64;
    f32 => Float32;
    f64 => Float64;
}
