//
//  bitbucket-api
//  api/cloud/errors.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud error body.
//!
//! Bitbucket Cloud reports failures as:
//!
//! ```json
//! {
//!   "type": "error",
//!   "error": {
//!     "message": "Repository not found",
//!     "detail": "There is no repository named 'x' in workspace 'y'",
//!     "data": {"key": "..."}
//!   }
//! }
//! ```

use serde_json::Value;

use crate::codec::{DecodeError, Entity, FieldValue, ObjectReader, ObjectWriter, Overflow};

/// The body returned with documented 4xx/5xx statuses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Error {
    pub error: FieldValue<ErrorDetail>,
    pub additional_properties: Overflow,
}

impl Error {
    /// Creates an error body with just a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            error: FieldValue::Value(ErrorDetail::new(message)),
            ..Default::default()
        }
    }

    /// The human-readable message, if the server sent one.
    pub fn message(&self) -> Option<&str> {
        self.error.value().map(|detail| detail.message.as_str())
    }

    /// The longer explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        self.error
            .value()
            .and_then(|detail| detail.detail.value())
            .map(String::as_str)
    }
}

impl Entity for Error {
    const TYPE_TAG: Option<&'static str> = Some("error");
    const FIELDS: &'static [&'static str] = &["error"];

    fn write_fields(&self, out: &mut ObjectWriter) {
        out.optional("error", &self.error);
    }

    fn read_fields(input: &mut ObjectReader) -> Result<Self, DecodeError> {
        Ok(Self {
            error: input.optional("error")?,
            additional_properties: Overflow::new(),
        })
    }

    fn additional_properties(&self) -> &Overflow {
        &self.additional_properties
    }

    fn additional_properties_mut(&mut self) -> &mut Overflow {
        &mut self.additional_properties
    }
}

/// The nested `error` object. It carries no discriminator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorDetail {
    pub message: String,
    pub detail: FieldValue<String>,
    /// Optional structured data provided by the server.
    pub data: FieldValue<Value>,
    pub additional_properties: Overflow,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

impl Entity for ErrorDetail {
    const TYPE_TAG: Option<&'static str> = None;
    const FIELDS: &'static [&'static str] = &["message", "detail", "data"];

    fn write_fields(&self, out: &mut ObjectWriter) {
        out.required("message", &self.message);
        out.optional("detail", &self.detail);
        out.optional("data", &self.data);
    }

    fn read_fields(input: &mut ObjectReader) -> Result<Self, DecodeError> {
        Ok(Self {
            message: input.required("message")?,
            detail: input.optional("detail")?,
            data: input.optional("data")?,
            additional_properties: Overflow::new(),
        })
    }

    fn additional_properties(&self) -> &Overflow {
        &self.additional_properties
    }

    fn additional_properties_mut(&mut self) -> &mut Overflow {
        &mut self.additional_properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode, DecodeErrorKind};
    use serde_json::json;

    #[test]
    fn test_error_round_trip() {
        let wire = json!({
            "type": "error",
            "error": {
                "message": "Bad request",
                "detail": "redirect_to must be a URL",
                "data": {"field": "redirect_to"},
                "id": "e-17"
            }
        });
        let err: Error = decode(wire.clone()).unwrap();
        assert_eq!(err.message(), Some("Bad request"));
        assert_eq!(err.detail(), Some("redirect_to must be a URL"));

        let detail = err.error.value().unwrap();
        assert_eq!(detail.data, FieldValue::Value(json!({"field": "redirect_to"})));
        assert_eq!(detail.additional_properties["id"], json!("e-17"));
        assert_eq!(Value::Object(encode(&err)), wire);
    }

    #[test]
    fn test_error_detail_requires_message() {
        let err = decode::<Error>(json!({"type": "error", "error": {"detail": "x"}})).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::MissingField);
        assert_eq!(err.path_string(), "error.message");
    }

    #[test]
    fn test_bare_error_has_no_message() {
        let err: Error = decode(json!({"type": "error"})).unwrap();
        assert!(err.error.is_unset());
        assert_eq!(err.message(), None);
    }

    #[test]
    fn test_overflow_type_keeps_error_tag() {
        let mut err = Error::with_message("x");
        err.additional_properties
            .insert("type".to_string(), json!("something_else"));

        let tree = encode(&err);
        assert_eq!(tree["type"], json!("error"));
        let back: Error = decode(Value::Object(tree)).unwrap();
        assert_eq!(back.message(), Some("x"));
    }

    #[test]
    fn test_with_message_encodes_minimal_body() {
        let tree = encode(&Error::with_message("nope"));
        assert_eq!(
            Value::Object(tree),
            json!({"type": "error", "error": {"message": "nope"}})
        );
    }
}
