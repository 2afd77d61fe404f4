//
//  bitbucket-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the runtime that every Bitbucket Cloud 2.0 endpoint
//! binding is built on.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: Shared configuration ([`Client`], [`AuthenticatedClient`])
//! - [`request`]: Turns typed arguments into a [`RequestDescriptor`]
//! - [`transport`]: Sends a descriptor over HTTP, blocking or async
//! - [`response`]: Resolves a raw response against a per-endpoint [`DecoderTable`]
//! - [`call`]: Ties a descriptor and a table together ([`Call`])
//! - [`cloud`]: Entities and endpoint bindings for Bitbucket Cloud
//! - [`common`]: Shared types (errors, pagination)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::repositories;
//! use bitbucket_api::api::{BlockingHttpTransport, Client, Parsed};
//! use bitbucket_api::auth::AuthCredential;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::cloud().with_auth(AuthCredential::bearer("your-token"));
//! let transport = BlockingHttpTransport::from_config(&client)?;
//!
//! let call = repositories::delete_repository(&client, "acme", "old-repo", Default::default())?;
//! match call.parsed_blocking(&transport)? {
//!     Some(Parsed::Raw(_)) => println!("deleted"),
//!     Some(Parsed::DomainError(err)) => eprintln!("{}", err.message().unwrap_or("failed")),
//!     _ => eprintln!("unexpected response"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod call;
pub mod client;
pub mod cloud;
pub mod common;
pub mod request;
pub mod response;
pub mod transport;

pub use call::Call;
pub use client::{AuthenticatedClient, Client, ClientConfig, CLOUD_BASE_URL};
pub use common::ApiError;
pub use request::{BuildError, QueryValue, RequestBuilder, RequestDescriptor};
pub use response::{resolve, Decoder, DecoderTable, Parsed, RawResponse, Response, ResponseDecodeError};
pub use transport::{AsyncTransport, BlockingHttpTransport, HttpTransport, Transport};
