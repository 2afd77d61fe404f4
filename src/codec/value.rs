//
//  bitbucket-api
//  codec/value.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Conversions between Rust values and JSON trees.
//!
//! [`WireValue`] is implemented for the scalar types used by the API,
//! for lists, for [`Timestamp`], for untyped JSON, and (in the parent
//! module) for every [`Entity`](super::Entity). Closed string vocabularies
//! implement [`WireEnum`] and route through [`enum_to_wire`] /
//! [`enum_from_wire`].

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde_json::{Number, Value};

use super::error::{DecodeError, DecodeErrorKind};

/// A value that can be written to and read from a JSON tree.
pub trait WireValue: Sized {
    /// Encodes the value.
    fn to_wire(&self) -> Value;

    /// Decodes the value, failing with a path-less [`DecodeError`]; callers
    /// that know the key or index prefix it.
    fn from_wire(value: Value) -> Result<Self, DecodeError>;
}

impl WireValue for String {
    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(DecodeError::invalid_type("string", &other)),
        }
    }
}

impl WireValue for bool {
    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(DecodeError::invalid_type("boolean", &other)),
        }
    }
}

impl WireValue for i64 {
    fn to_wire(&self) -> Value {
        Value::Number((*self).into())
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        value
            .as_i64()
            .ok_or_else(|| DecodeError::invalid_type("integer", &value))
    }
}

impl WireValue for i32 {
    fn to_wire(&self) -> Value {
        Value::Number((*self).into())
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| DecodeError::invalid_type("32-bit integer", &value))
    }
}

impl WireValue for f64 {
    fn to_wire(&self) -> Value {
        // JSON has no NaN or infinity
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        value
            .as_f64()
            .ok_or_else(|| DecodeError::invalid_type("number", &value))
    }
}

/// A JSON number kept exactly as received, so `25` does not come back as `25.0`.
impl WireValue for Number {
    fn to_wire(&self) -> Value {
        Value::Number(self.clone())
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Number(n) => Ok(n),
            other => Err(DecodeError::invalid_type("number", &other)),
        }
    }
}

/// Untyped JSON passes through unchanged.
impl WireValue for Value {
    fn to_wire(&self) -> Value {
        self.clone()
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        Ok(value)
    }
}

/// The empty body of endpoints whose documented responses are all raw.
impl WireValue for () {
    fn to_wire(&self) -> Value {
        Value::Null
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(()),
            other => Err(DecodeError::invalid_type("null", &other)),
        }
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn to_wire(&self) -> Value {
        Value::Array(self.iter().map(WireValue::to_wire).collect())
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_wire(item).map_err(|e| e.at_index(i)))
                .collect(),
            other => Err(DecodeError::invalid_type("array", &other)),
        }
    }
}

/// An ISO-8601 timestamp that re-encodes exactly as it was received.
///
/// Bitbucket emits timestamps with varying fractional precision and offset
/// spellings (`+00:00` vs `Z`). Formatting a parsed `DateTime` back out would
/// normalize those, so the original text is kept alongside the parsed value.
///
/// # Example
///
/// ```rust
/// use bitbucket_api::codec::Timestamp;
///
/// let ts = Timestamp::parse("2024-03-01T09:30:12.345678+00:00").unwrap();
/// assert_eq!(ts.as_str(), "2024-03-01T09:30:12.345678+00:00");
/// assert_eq!(ts.datetime().timestamp(), 1709285412);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    value: DateTime<FixedOffset>,
    raw: String,
}

impl Timestamp {
    /// Parses an RFC 3339 / ISO-8601 timestamp with offset.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let value = DateTime::parse_from_rfc3339(raw)?;
        Ok(Self {
            value,
            raw: raw.to_string(),
        })
    }

    pub fn datetime(&self) -> &DateTime<FixedOffset> {
        &self.value
    }

    /// The exact text that will be written to the wire.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self {
            raw: value.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            value,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl WireValue for Timestamp {
    fn to_wire(&self) -> Value {
        Value::String(self.raw.clone())
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Timestamp::parse(&s)
                .map_err(|_| DecodeError::new(DecodeErrorKind::InvalidTimestamp(s))),
            other => Err(DecodeError::invalid_type("timestamp string", &other)),
        }
    }
}

/// A closed string vocabulary fixed when the schema was generated.
///
/// Decoding is an exact, case-sensitive match against [`WireEnum::NAMES`];
/// anything else is [`DecodeErrorKind::UnknownVariant`].
pub trait WireEnum: Sized + Copy + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The wire string of every variant, in the same order as `VARIANTS`.
    const NAMES: &'static [&'static str];

    /// The wire string for this variant.
    fn as_str(&self) -> &'static str;

    /// Looks up a variant by its exact wire string.
    fn from_wire_str(s: &str) -> Result<Self, DecodeError> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| {
                DecodeError::new(DecodeErrorKind::UnknownVariant {
                    found: s.to_string(),
                    expected: Self::NAMES,
                })
            })
    }
}

/// [`WireValue::to_wire`] for enums.
pub fn enum_to_wire<E: WireEnum>(value: &E) -> Value {
    Value::String(value.as_str().to_string())
}

/// [`WireValue::from_wire`] for enums.
pub fn enum_from_wire<E: WireEnum>(value: Value) -> Result<E, DecodeError> {
    match value {
        Value::String(s) => E::from_wire_str(&s),
        other => Err(DecodeError::invalid_type("string", &other)),
    }
}
