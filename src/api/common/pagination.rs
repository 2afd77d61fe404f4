//
//  bitbucket-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Bitbucket Cloud Responses
//!
//! Bitbucket Cloud list endpoints return one page at a time with `next`
//! and `previous` URLs. This crate does not walk pages for you: callers
//! read [`Page::next_url`] and issue the follow-up request themselves.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::api::cloud::Commit;
//! use bitbucket_api::api::common::Page;
//! use bitbucket_api::codec::decode;
//! use serde_json::json;
//!
//! let page: Page<Commit> = decode(json!({
//!     "pagelen": 1,
//!     "values": [{"type": "commit", "hash": "a1b2c3"}],
//!     "next": "https://api.bitbucket.org/2.0/repositories/ws/repo/commits?page=2"
//! }))
//! .unwrap();
//!
//! assert_eq!(page.values().len(), 1);
//! assert!(page.has_next());
//! ```

use crate::codec::{DecodeError, Entity, FieldValue, ObjectReader, ObjectWriter, Overflow, WireValue};

/// A single page from a Bitbucket Cloud list endpoint.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `size` | `FieldValue<i64>` | Total number of items across all pages |
/// | `page` | `FieldValue<i64>` | Current page number (1-indexed) |
/// | `pagelen` | `FieldValue<i64>` | Requested page length |
/// | `next` | `FieldValue<String>` | URL of the next page |
/// | `previous` | `FieldValue<String>` | URL of the previous page |
/// | `values` | `FieldValue<Vec<T>>` | Items in this page |
///
/// Page shapes carry no `type` discriminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub size: FieldValue<i64>,
    pub page: FieldValue<i64>,
    pub pagelen: FieldValue<i64>,
    pub next: FieldValue<String>,
    pub previous: FieldValue<String>,
    pub values: FieldValue<Vec<T>>,
    pub additional_properties: Overflow,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            size: FieldValue::Unset,
            page: FieldValue::Unset,
            pagelen: FieldValue::Unset,
            next: FieldValue::Unset,
            previous: FieldValue::Unset,
            values: FieldValue::Unset,
            additional_properties: Overflow::new(),
        }
    }
}

impl<T> Page<T> {
    /// Items in this page; empty when `values` was absent.
    pub fn values(&self) -> &[T] {
        self.values.value().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Checks if there are more pages of results available.
    ///
    /// # Returns
    ///
    /// - `true` - More pages are available; call [`next_url()`](Self::next_url) to get the URL
    /// - `false` - This is the last page
    pub fn has_next(&self) -> bool {
        self.next.value().is_some()
    }

    /// URL of the next page, used verbatim for the follow-up request.
    pub fn next_url(&self) -> Option<&str> {
        self.next.value().map(String::as_str)
    }

    /// URL of the previous page.
    pub fn previous_url(&self) -> Option<&str> {
        self.previous.value().map(String::as_str)
    }
}

impl<T: WireValue> Entity for Page<T> {
    const TYPE_TAG: Option<&'static str> = None;
    const FIELDS: &'static [&'static str] = &["size", "page", "pagelen", "next", "previous", "values"];

    fn write_fields(&self, out: &mut ObjectWriter) {
        out.optional("size", &self.size);
        out.optional("page", &self.page);
        out.optional("pagelen", &self.pagelen);
        out.optional("next", &self.next);
        out.optional("previous", &self.previous);
        out.optional("values", &self.values);
    }

    fn read_fields(input: &mut ObjectReader) -> Result<Self, DecodeError> {
        Ok(Self {
            size: input.optional("size")?,
            page: input.optional("page")?,
            pagelen: input.optional("pagelen")?,
            next: input.optional("next")?,
            previous: input.optional("previous")?,
            values: input.optional("values")?,
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
    use crate::codec::{decode, encode};
    use serde_json::{json, Value};

    #[test]
    fn test_last_page_has_no_next() {
        let page: Page<Value> = decode(json!({"page": 3, "values": []})).unwrap();
        assert!(!page.has_next());
        assert_eq!(page.next_url(), None);
        assert!(page.values().is_empty());
    }

    #[test]
    fn test_page_round_trip_keeps_unknown_keys() {
        let wire = json!({
            "size": 2,
            "pagelen": 10,
            "values": [{"a": 1}, {"b": 2}],
            "previous": "https://api.bitbucket.org/2.0/x?page=1",
            "cursor_hint": "opaque"
        });
        let page: Page<Value> = decode(wire.clone()).unwrap();
        assert_eq!(page.previous_url(), Some("https://api.bitbucket.org/2.0/x?page=1"));
        assert_eq!(Value::Object(encode(&page)), wire);
    }

    #[test]
    fn test_bad_item_reports_index() {
        let err = decode::<Page<i64>>(json!({"values": [1, "two"]})).unwrap_err();
        assert_eq!(err.path_string(), "values[1]");
    }
}
