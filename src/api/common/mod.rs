//
//  bitbucket-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! This module provides the error type shared by every stage of an API call
//! and the paginated page shape used by list endpoints.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for building, sending and decoding a call
//! - [`Page`] - A single page of a Bitbucket Cloud list response
//!
//! # Errors Versus Domain Errors
//!
//! An `ApiError` means the call could not produce a typed result: the
//! request could not be assembled, the network failed, or a documented
//! status came back with a body that does not match its declared shape.
//!
//! A documented 4xx/5xx with a well-formed error body is *not* an
//! `ApiError`. It arrives as [`Parsed::DomainError`](crate::api::Parsed)
//! and callers branch on it like any other result.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::api::common::ApiError;
//!
//! fn describe(result: Result<(), ApiError>) -> &'static str {
//!     match result {
//!         Ok(()) => "ok",
//!         Err(ApiError::Build(_)) => "bad arguments",
//!         Err(ApiError::Network(_)) => "network",
//!         Err(ApiError::InvalidHeader(_)) => "bad header",
//!         Err(ApiError::ResponseDecode(_)) => "contract breach",
//!     }
//! }
//!
//! assert_eq!(describe(Ok(())), "ok");
//! ```

use thiserror::Error;

use super::request::BuildError;
use super::response::ResponseDecodeError;

mod pagination;

pub use pagination::*;

/// Unified error type for all API calls.
///
/// | Variant | Stage | Typical cause |
/// |---------|-------|---------------|
/// | `Build` | Request assembly | Bad base URL, wrong number of path parameters, `Null` for a non-nullable parameter |
/// | `InvalidHeader` | Transport | A configured header name or value is not valid HTTP |
/// | `Network` | Transport | Connection failure, TLS failure, timeout |
/// | `ResponseDecode` | Resolution | A documented status with a malformed body |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request descriptor could not be assembled.
    #[error("Failed to build request: {0}")]
    Build(#[from] BuildError),

    /// A header from the configuration or the request is not valid HTTP.
    ///
    /// # Parameters
    ///
    /// - `0` - The offending header name
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// and other transport-layer issues.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A documented status carried a body that could not be decoded.
    #[error(transparent)]
    ResponseDecode(#[from] ResponseDecodeError),
}
