//
//  bitbucket-api
//  codec/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Decode error taxonomy for the entity codec.
//!
//! Every failure carries the path of the value that failed, so a caller
//! decoding a deeply nested page of commits learns exactly which element
//! was malformed (`values[3].parents[0].hash`).

use thiserror::Error;

/// A nullable/required invariant was broken while constructing a field value.
///
/// This is a generation-time bug, not a runtime condition: either the wire
/// sent `null` for a field the schema says can never be null, or a caller
/// handed `Null` to a request parameter that is not nullable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field `{field}` is not nullable")]
pub struct SchemaViolation {
    /// Name of the offending field or parameter.
    pub field: String,
}

impl SchemaViolation {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// One step in the path to a failing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// A position in an array.
    Index(usize),
}

/// What went wrong at the failing path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The entity requires a `type` key and none was present.
    #[error("missing discriminator, expected type `{expected}`")]
    MissingDiscriminator {
        /// The type tag the entity declares.
        expected: &'static str,
    },

    /// The `type` key named a different entity.
    #[error("unexpected discriminator `{found}`, expected `{expected}`")]
    UnexpectedDiscriminator {
        /// The type tag the entity declares.
        expected: &'static str,
        /// The tag found on the wire.
        found: String,
    },

    /// A required key was absent.
    #[error("missing required field")]
    MissingField,

    /// A required value was `null`.
    #[error("unexpected null")]
    UnexpectedNull,

    /// The JSON value had the wrong shape.
    #[error("invalid type: expected {expected}, found {found}")]
    InvalidType {
        /// Human description of the expected JSON type.
        expected: &'static str,
        /// Human description of the JSON value that was found.
        found: String,
    },

    /// A string was outside a closed enum vocabulary.
    #[error("unknown variant `{found}`, expected one of {expected:?}")]
    UnknownVariant {
        /// The string found on the wire.
        found: String,
        /// The declared vocabulary.
        expected: &'static [&'static str],
    },

    /// A timestamp string was not valid ISO-8601.
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),

    /// A non-nullable field was `null` on the wire.
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),
}

/// The JSON tree did not match the declared entity shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.path, .kind))]
pub struct DecodeError {
    path: Vec<PathSegment>,
    kind: DecodeErrorKind,
}

impl DecodeError {
    /// Creates an error located at the value currently being decoded.
    pub fn new(kind: DecodeErrorKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }

    pub(crate) fn invalid_type(expected: &'static str, found: &serde_json::Value) -> Self {
        Self::new(DecodeErrorKind::InvalidType {
            expected,
            found: describe(found).to_string(),
        })
    }

    /// Prefixes the path with an object key.
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.path.insert(0, PathSegment::Key(key.into()));
        self
    }

    /// Prefixes the path with an array index.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Renders the path as `a.b[2].c`; empty for the root value.
    pub fn path_string(&self) -> String {
        path_string(&self.path)
    }
}

fn path_string(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push_str(&format!("[{index}]"));
            }
        }
    }
    out
}

fn render(path: &[PathSegment], kind: &DecodeErrorKind) -> String {
    if path.is_empty() {
        kind.to_string()
    } else {
        format!("at `{}`: {}", path_string(path), kind)
    }
}

impl From<SchemaViolation> for DecodeError {
    fn from(violation: SchemaViolation) -> Self {
        Self::new(DecodeErrorKind::SchemaViolation(violation))
    }
}

fn describe(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
