//! Typed parameter values inferred from benchmark name segments.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Discriminant of a [`Value`], used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    Uint,
    Float,
    Bool,
    String,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Uint => "uint64",
            ValueKind::Float => "float64",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Uint | ValueKind::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter or output value.
///
/// Parameters parsed from a name are only ever `Int`, `Float`, `Bool` or
/// `String`; `Uint` carries the unsigned memory counters of an output record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl Value {
    /// Infer the most specific value for `raw`.
    ///
    /// Tries a signed integer, then a float, then `true`/`false`; each attempt
    /// must consume the whole string. Falls back to the string unchanged.
    pub fn infer(raw: &str) -> Value {
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
        if let Ok(b) = raw.parse::<bool>() {
            return Value::Bool(b);
        }
        Value::String(raw.to_string())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Uint(_) => ValueKind::Uint,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
        }
    }

    /// Widen a numeric value to `f64` for plotting.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Int(i) => Ok(*i as f64),
            Value::Uint(u) => Ok(*u as f64),
            Value::Float(f) => Ok(*f),
            Value::Bool(_) | Value::String(_) => Err(Error::UnsupportedValueKind(self.kind())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_order() {
        assert_eq!(Value::infer("3"), Value::Int(3));
        assert_eq!(Value::infer("-2"), Value::Int(-2));
        assert_eq!(Value::infer("3.0"), Value::Float(3.0));
        assert_eq!(Value::infer("0.001000"), Value::Float(0.001));
        assert_eq!(Value::infer("true"), Value::Bool(true));
        assert_eq!(Value::infer("false"), Value::Bool(false));
        assert_eq!(Value::infer("sin(x)"), Value::String("sin(x)".to_string()));
        assert_eq!(Value::infer("2x+3"), Value::String("2x+3".to_string()));
    }

    #[test]
    fn test_infer_requires_whole_string() {
        assert_eq!(Value::infer("12abc"), Value::String("12abc".to_string()));
        assert_eq!(Value::infer("truest"), Value::String("truest".to_string()));
        assert_eq!(Value::infer(""), Value::String(String::new()));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::Int(-2).as_f64().unwrap(), -2.0);
        assert_eq!(Value::Uint(7).as_f64().unwrap(), 7.0);
        assert_eq!(Value::Float(0.5).as_f64().unwrap(), 0.5);

        let err = Value::Bool(true).as_f64().unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueKind(ValueKind::Bool)));
        let err = Value::from("sin(x)").as_f64().unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueKind(ValueKind::String)));
    }

    #[test]
    fn test_display_matches_group_key_format() {
        assert_eq!(Value::Float(0.001).to_string(), "0.001");
        assert_eq!(Value::Float(1.0).to_string(), "1");
        assert_eq!(Value::Int(-2).to_string(), "-2");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::from("sin(x)").to_string(), "sin(x)");
    }
}
