//
//  bitbucket-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket API Library
//!
//! A typed client runtime for the Bitbucket Cloud 2.0 REST API, plus the
//! `bb-api` command-line tool built on it.
//!
//! ## Overview
//!
//! Every endpoint binding is a thin, mechanical layer over four pieces:
//!
//! - **Field states**: [`codec::FieldValue`] keeps "absent", "explicitly
//!   null" and "present" apart, so partial updates and nullable fields
//!   survive a round trip
//! - **Entity codec**: [`codec::encode`] / [`codec::decode`] map entities to
//!   and from JSON, checking the `type` discriminator and keeping unknown
//!   keys in an overflow map
//! - **Request builder**: [`api::RequestBuilder`] turns typed arguments into
//!   a transport-agnostic [`api::RequestDescriptor`]
//! - **Response resolver**: [`api::resolve`] dispatches on the status code
//!   through a per-endpoint [`api::DecoderTable`]
//!
//! ## Module Structure
//!
//! - [`codec`]: Field states, entity codec, wire conversions
//! - [`api`]: Client configuration, request building, transports, resolution, Cloud bindings
//! - [`auth`]: Credential presentation
//! - [`config`]: Settings file management
//! - [`output`]: Terminal output
//! - [`cli`]: Command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_api::api::cloud::pullrequests;
//! use bitbucket_api::api::{Client, HttpTransport, Parsed};
//! use bitbucket_api::auth::AuthCredential;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::cloud().with_auth(AuthCredential::bearer("your-token"));
//! let transport = HttpTransport::from_config(&client)?;
//!
//! let call = pullrequests::get_pullrequest(&client, "acme", "rocket", 42)?;
//! match call.parsed(&transport).await? {
//!     Some(Parsed::Success(pr)) => println!("{:?} is {:?}", pr.title, pr.state),
//!     Some(Parsed::DomainError(err)) => eprintln!("{}", err.message().unwrap_or("error")),
//!     Some(Parsed::Raw(_)) | Some(Parsed::Unmatched) | None => eprintln!("unexpected response"),
//! }
//! # Ok(())
//! # }
//! ```

/// Field state model and entity codec.
pub mod codec;

/// Client configuration, request building, transports and response
/// resolution, plus the Bitbucket Cloud bindings.
pub mod api;

/// Credentials attached by an authenticated client.
pub mod auth;

/// Settings file management.
///
/// Settings are stored in TOML format in the platform-specific config
/// directory.
pub mod config;

/// Terminal output helpers for the command-line tool.
pub mod output;

/// Command-line interface definitions.
pub mod cli;

pub use cli::Cli;

pub use config::Settings;

/// The name of the CLI application binary.
pub const APP_NAME: &str = "bb-api";

/// The current version of the library, taken from `Cargo.toml`.
///
/// Sent in the `User-Agent` header as `bb-api/<VERSION>`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Standard exit codes for the CLI application.
///
/// | Code | Constant | Description |
/// |------|----------|-------------|
/// | 0 | `SUCCESS` | Command completed successfully |
/// | 1 | `ERROR` | General error, or a documented error status |
/// | 2 | `USAGE` | Invalid command-line usage |
/// | 4 | `AUTH_ERROR` | The API answered 401 or 403 |
/// | 8 | `NOT_FOUND` | The API answered 404 |
/// | 32 | `UNEXPECTED_STATUS` | The API answered a status the endpoint does not document |
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_api::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::NOT_FOUND);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred, or the API returned a documented
    /// error status other than 401, 403 or 404. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// The command was invoked with invalid arguments or options.
    /// Use `--help` to see correct usage.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// The credential is missing, invalid, or lacks the required scope.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested resource does not exist or the user does not have
    /// permission to see it.
    pub const NOT_FOUND: i32 = 8;

    /// Undocumented response status.
    ///
    /// The server answered with a status the endpoint does not declare.
    /// The status and body are printed to stderr.
    pub const UNEXPECTED_STATUS: i32 = 32;
}
