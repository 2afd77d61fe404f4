//
//  bitbucket-api
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Resolver
//!
//! Turns a raw HTTP response into a typed, discriminated result using a
//! per-endpoint [`DecoderTable`].
//!
//! ## Resolution
//!
//! | Table entry for the status | Result |
//! |----------------------------|--------|
//! | [`Decoder::Raw`] | [`Parsed::Raw`] with the content bytes, never parsed |
//! | [`Decoder::Success`] | JSON-parse then decode, [`Parsed::Success`] |
//! | [`Decoder::Error`] | JSON-parse then decode, [`Parsed::DomainError`] |
//! | no entry | [`Parsed::Unmatched`], envelope still returned |
//!
//! A documented status whose body is not valid JSON, or does not match the
//! declared shape, is a [`ResponseDecodeError`]. Documented error statuses
//! with a well-formed body are ordinary return values.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_api::api::cloud::{Commit, Error};
//! use bitbucket_api::api::{resolve, DecoderTable, Parsed, RawResponse};
//! use reqwest::StatusCode;
//!
//! let table = DecoderTable::<Commit, Error>::new().success(200).error(404);
//! let raw = RawResponse::new(
//!     StatusCode::NOT_FOUND,
//!     br#"{"type": "error", "error": {"message": "Commit not found"}}"#.to_vec(),
//! );
//!
//! let response = resolve(&table, raw).unwrap();
//! match response.parsed {
//!     Parsed::DomainError(err) => assert_eq!(err.message(), Some("Commit not found")),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::codec::{DecodeError, WireValue};

/// Status code, headers and undecoded content of an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub content: Vec<u8>,
}

impl RawResponse {
    /// A response with no headers.
    pub fn new(status: StatusCode, content: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            content: content.into(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Decoder function for one JSON shape.
pub type DecodeFn<T> = fn(Value) -> Result<T, DecodeError>;

/// How the body of one status code is handled.
pub enum Decoder<S, E> {
    /// Decode as the endpoint's success type.
    Success(DecodeFn<S>),
    /// Decode as the endpoint's error type.
    Error(DecodeFn<E>),
    /// Return the bytes untouched (diffs, patches, redirects, archives).
    Raw,
}

impl<S, E> Clone for Decoder<S, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, E> Copy for Decoder<S, E> {}

impl<S, E> fmt::Debug for Decoder<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(_) => f.write_str("Success"),
            Self::Error(_) => f.write_str("Error"),
            Self::Raw => f.write_str("Raw"),
        }
    }
}

/// Per-endpoint mapping from status code to [`Decoder`].
///
/// # Example
///
/// ```rust
/// use bitbucket_api::api::cloud::Error;
/// use bitbucket_api::api::DecoderTable;
///
/// // DELETE /repositories/{workspace}/{repo_slug}
/// let table = DecoderTable::<(), Error>::new()
///     .raw(204)
///     .error(400)
///     .error(403)
///     .error(404);
///
/// assert!(table.contains(204));
/// assert!(!table.contains(500));
/// ```
pub struct DecoderTable<S, E> {
    entries: BTreeMap<u16, Decoder<S, E>>,
}

impl<S, E> DecoderTable<S, E> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registers a raw passthrough status.
    pub fn raw(mut self, status: u16) -> Self {
        self.entries.insert(status, Decoder::Raw);
        self
    }

    pub fn get(&self, status: u16) -> Option<Decoder<S, E>> {
        self.entries.get(&status).copied()
    }

    pub fn contains(&self, status: u16) -> bool {
        self.entries.contains_key(&status)
    }

    /// Documented status codes in ascending order.
    pub fn statuses(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.keys().copied()
    }
}

impl<S: WireValue, E> DecoderTable<S, E> {
    /// Registers a status whose body decodes as `S`.
    pub fn success(mut self, status: u16) -> Self {
        self.entries.insert(status, Decoder::Success(S::from_wire));
        self
    }
}

impl<S, E: WireValue> DecoderTable<S, E> {
    /// Registers a status whose body decodes as `E`.
    pub fn error(mut self, status: u16) -> Self {
        self.entries.insert(status, Decoder::Error(E::from_wire));
        self
    }
}

impl<S, E> Default for DecoderTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> Clone for DecoderTable<S, E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<S, E> fmt::Debug for DecoderTable<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

/// The discriminated outcome of one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<S, E> {
    /// A documented success status with a decoded body.
    Success(S),
    /// A documented error status with a decoded error body.
    DomainError(E),
    /// A documented passthrough status; content is untouched.
    Raw(Vec<u8>),
    /// The status is not in the endpoint's table.
    Unmatched,
}

impl<S, E> Parsed<S, E> {
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Self::Unmatched)
    }
}

/// The response envelope handed back to the caller.
///
/// Status, headers and content are always intact, whichever way the body
/// was resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<S, E> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub content: Vec<u8>,
    pub parsed: Parsed<S, E>,
}

impl<S, E> Response<S, E> {
    /// The parsed result, or `None` when the status was not documented.
    pub fn into_parsed(self) -> Option<Parsed<S, E>> {
        match self.parsed {
            Parsed::Unmatched => None,
            parsed => Some(parsed),
        }
    }

    pub fn success(&self) -> Option<&S> {
        match &self.parsed {
            Parsed::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn domain_error(&self) -> Option<&E> {
        match &self.parsed {
            Parsed::DomainError(err) => Some(err),
            _ => None,
        }
    }

    /// Content as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// A documented status came back with a body that could not be decoded.
#[derive(Error, Debug)]
pub enum ResponseDecodeError {
    /// The body is not valid JSON.
    #[error("response with status {status} is not valid JSON: {source}")]
    InvalidJson {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// The body is JSON but does not match the declared shape.
    #[error("response with status {status} does not match its schema: {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: DecodeError,
    },
}

impl ResponseDecodeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson { status, .. } | Self::Decode { status, .. } => *status,
        }
    }
}

/// Resolves a raw response against a decoder table.
///
/// # Errors
///
/// Returns [`ResponseDecodeError`] when the status has a typed decoder and
/// the body is not valid JSON or does not decode. Unmatched statuses are
/// not errors.
pub fn resolve<S, E>(
    table: &DecoderTable<S, E>,
    raw: RawResponse,
) -> Result<Response<S, E>, ResponseDecodeError> {
    let status = raw.status;
    let parsed = match table.get(status.as_u16()) {
        None => Parsed::Unmatched,
        Some(Decoder::Raw) => Parsed::Raw(raw.content.clone()),
        Some(Decoder::Success(decode)) => Parsed::Success(decode_body(status, &raw.content, decode)?),
        Some(Decoder::Error(decode)) => {
            Parsed::DomainError(decode_body(status, &raw.content, decode)?)
        }
    };

    Ok(Response {
        status,
        headers: raw.headers,
        content: raw.content,
        parsed,
    })
}

fn decode_body<T>(status: StatusCode, content: &[u8], decode: DecodeFn<T>) -> Result<T, ResponseDecodeError> {
    let value: Value = serde_json::from_slice(content)
        .map_err(|source| ResponseDecodeError::InvalidJson { status, source })?;
    decode(value).map_err(|source| ResponseDecodeError::Decode { status, source })
}
