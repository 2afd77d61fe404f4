//
//  bitbucket-api
//  api/call.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Call Pipeline
//!
//! A [`Call`] is a built request paired with its endpoint's decoder table.
//! Endpoint functions return one; the caller then picks how to run it:
//!
//! | Method | Mode | Returns |
//! |--------|------|---------|
//! | [`Call::send`] | async | the full [`Response`] envelope |
//! | [`Call::parsed`] | async | only the [`Parsed`] result |
//! | [`Call::send_blocking`] | blocking | the full [`Response`] envelope |
//! | [`Call::parsed_blocking`] | blocking | only the [`Parsed`] result |
//!
//! All four share the same build and resolve steps, so the blocking and
//! async forms of an endpoint cannot drift apart.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::commits;
//! use bitbucket_api::api::{Client, HttpTransport, Parsed};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::cloud();
//! let transport = HttpTransport::from_config(&client)?;
//!
//! let call = commits::get_commit(&client, "atlassian", "python-bitbucket", "a1b2c3")?;
//! match call.parsed(&transport).await? {
//!     Some(Parsed::Success(commit)) => println!("{:?}", commit.message),
//!     Some(Parsed::DomainError(err)) => eprintln!("{:?}", err.message()),
//!     _ => eprintln!("unexpected response"),
//! }
//! # Ok(())
//! # }
//! ```

use super::common::ApiError;
use super::request::RequestDescriptor;
use super::response::{resolve, DecoderTable, Parsed, RawResponse, Response};
use super::transport::{AsyncTransport, Transport};

/// A ready-to-send request and the table used to resolve its response.
#[derive(Debug, Clone)]
pub struct Call<S, E> {
    request: RequestDescriptor,
    table: DecoderTable<S, E>,
}

impl<S, E> Call<S, E> {
    pub fn new(request: RequestDescriptor, table: DecoderTable<S, E>) -> Self {
        Self { request, table }
    }

    /// The request that will be sent.
    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    pub fn table(&self) -> &DecoderTable<S, E> {
        &self.table
    }

    /// Resolves a response obtained elsewhere against this call's table.
    pub fn resolve(&self, raw: RawResponse) -> Result<Response<S, E>, ApiError> {
        let status = raw.status;
        let response = resolve(&self.table, raw)?;
        if response.parsed.is_unmatched() {
            tracing::debug!("{} returned undocumented status {}", self.request, status);
        }
        Ok(response)
    }

    /// Sends the request and returns the full response envelope.
    ///
    /// # Errors
    ///
    /// Network failures and undecodable documented bodies. Documented error
    /// statuses are returned as [`Parsed::DomainError`].
    pub fn send_blocking<T: Transport + ?Sized>(&self, transport: &T) -> Result<Response<S, E>, ApiError> {
        let raw = transport.execute(&self.request)?;
        self.resolve(raw)
    }

    /// Sends the request and returns only the parsed result, or `None` for
    /// an undocumented status.
    pub fn parsed_blocking<T: Transport + ?Sized>(&self, transport: &T) -> Result<Option<Parsed<S, E>>, ApiError> {
        Ok(self.send_blocking(transport)?.into_parsed())
    }

    /// Async form of [`send_blocking`](Self::send_blocking).
    pub async fn send<T: AsyncTransport + ?Sized>(&self, transport: &T) -> Result<Response<S, E>, ApiError> {
        let raw = transport.execute(&self.request).await?;
        self.resolve(raw)
    }

    /// Async form of [`parsed_blocking`](Self::parsed_blocking).
    pub async fn parsed<T: AsyncTransport + ?Sized>(&self, transport: &T) -> Result<Option<Parsed<S, E>>, ApiError> {
        Ok(self.send(transport).await?.into_parsed())
    }
}
