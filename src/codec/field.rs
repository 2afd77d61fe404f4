//
//  bitbucket-api
//  codec/field.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Three-state field values.
//!
//! The Bitbucket API distinguishes between a key that is absent, a key that
//! is present with `null`, and a key carrying a value. `Option<T>` collapses
//! the first two, so every optional wire attribute in this crate is a
//! [`FieldValue`] instead.
//!
//! | State | Encodes as | Decoded from |
//! |-------|------------|--------------|
//! | `Unset` | key omitted | key absent |
//! | `Null` | `"key": null` | `"key": null` (nullable fields only) |
//! | `Value(v)` | `"key": <v>` | any other value |
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::codec::FieldValue;
//!
//! let unset: FieldValue<String> = FieldValue::Unset;
//! let null: FieldValue<String> = FieldValue::Null;
//! let value = FieldValue::Value("main".to_string());
//!
//! assert!(!unset.is_set());
//! assert!(null.is_set());
//! assert_eq!(value.value().map(String::as_str), Some("main"));
//! ```

use serde_json::Value;

use super::error::{DecodeError, SchemaViolation};
use super::value::WireValue;

/// An optional wire attribute: absent, explicitly `null`, or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldValue<T> {
    /// The key is not present. Never serialized.
    #[default]
    Unset,
    /// The key is present with JSON `null`.
    Null,
    /// The key is present with a value.
    Value(T),
}

impl<T> FieldValue<T> {
    /// Returns `true` for `Null` and `Value`, `false` for `Unset`.
    ///
    /// This is the single test used both when deciding whether an entity
    /// key is emitted and whether a query parameter is sent.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrows the concrete value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Collapses `Unset` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Lifts an `Option`, mapping `None` to `Unset`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Unset,
        }
    }

    pub fn as_ref(&self) -> FieldValue<&T> {
        match self {
            Self::Unset => FieldValue::Unset,
            Self::Null => FieldValue::Null,
            Self::Value(v) => FieldValue::Value(v),
        }
    }

    /// Maps the concrete value, keeping `Unset` and `Null` as they are.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FieldValue<U> {
        match self {
            Self::Unset => FieldValue::Unset,
            Self::Null => FieldValue::Null,
            Self::Value(v) => FieldValue::Value(f(v)),
        }
    }

    /// Rejects `Null` for a field that the schema declares non-nullable.
    pub fn check_nullable(&self, field: &str, nullable: bool) -> Result<(), SchemaViolation> {
        if self.is_null() && !nullable {
            return Err(SchemaViolation::new(field));
        }
        Ok(())
    }
}

impl<T: WireValue> FieldValue<T> {
    /// Builds a field value from what was found on the wire.
    ///
    /// * `field` - the key being decoded, named in a [`SchemaViolation`]
    /// * `raw` - `None` when the key was absent, `Some` with the raw JSON otherwise
    /// * `nullable` - whether the schema allows `null` for this field
    ///
    /// A `null` for a non-nullable field is a [`SchemaViolation`], reported
    /// as a decode error rather than coerced to `Unset`.
    pub fn from_wire(field: &str, raw: Option<Value>, nullable: bool) -> Result<Self, DecodeError> {
        match raw {
            None => Ok(Self::Unset),
            Some(Value::Null) if nullable => Ok(Self::Null),
            Some(Value::Null) => Err(SchemaViolation::new(field).into()),
            Some(value) => T::from_wire(value).map(Self::Value),
        }
    }

    /// The JSON to emit for this field, or `None` when the key must be omitted.
    pub fn to_wire(&self) -> Option<Value> {
        match self {
            Self::Unset => None,
            Self::Null => Some(Value::Null),
            Self::Value(v) => Some(v.to_wire()),
        }
    }
}

impl<T> From<T> for FieldValue<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DecodeErrorKind;
    use serde_json::json;

    #[test]
    fn test_is_set() {
        assert!(!FieldValue::<i64>::Unset.is_set());
        assert!(FieldValue::<i64>::Null.is_set());
        assert!(FieldValue::Value(3).is_set());
    }

    #[test]
    fn test_from_wire_absent_is_unset() {
        let field = FieldValue::<String>::from_wire("title", None, true).unwrap();
        assert_eq!(field, FieldValue::Unset);
    }

    #[test]
    fn test_from_wire_null_on_nullable_field() {
        let field = FieldValue::<String>::from_wire("title", Some(Value::Null), true).unwrap();
        assert_eq!(field, FieldValue::Null);
    }

    #[test]
    fn test_from_wire_null_on_non_nullable_field_is_schema_violation() {
        let err = FieldValue::<String>::from_wire("title", Some(Value::Null), false).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorKind::SchemaViolation(SchemaViolation::new("title"))
        );
    }

    #[test]
    fn test_from_wire_decodes_value() {
        let field = FieldValue::<i64>::from_wire("count", Some(json!(42)), false).unwrap();
        assert_eq!(field, FieldValue::Value(42));

        let err = FieldValue::<i64>::from_wire("count", Some(json!("42")), false).unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorKind::InvalidType { .. }));
    }

    #[test]
    fn test_to_wire() {
        assert_eq!(FieldValue::<bool>::Unset.to_wire(), None);
        assert_eq!(FieldValue::<bool>::Null.to_wire(), Some(Value::Null));
        assert_eq!(FieldValue::Value(true).to_wire(), Some(json!(true)));
    }

    #[test]
    fn test_check_nullable() {
        assert!(FieldValue::<bool>::Null.check_nullable("async", true).is_ok());
        assert_eq!(
            FieldValue::<bool>::Null.check_nullable("async", false),
            Err(SchemaViolation::new("async"))
        );
        assert!(FieldValue::Value(true).check_nullable("async", false).is_ok());
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(FieldValue::from_option(Some(1)), FieldValue::Value(1));
        assert_eq!(FieldValue::<i32>::from_option(None), FieldValue::Unset);
        assert_eq!(FieldValue::<i32>::Null.into_option(), None);
        assert_eq!(FieldValue::<i32>::from(5).map(|v| v * 2), FieldValue::Value(10));
    }
}
