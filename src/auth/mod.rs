//
//  bitbucket-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Turns a credential into the header value an [`AuthenticatedClient`]
//! attaches to every request. Acquiring the credential (OAuth consent,
//! token refresh) happens elsewhere; this module only presents it.
//!
//! ## Supported Credentials
//!
//! - **Bearer**: OAuth 2.0 access tokens, repository/workspace access tokens
//! - **Basic**: Username plus app password
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_api::auth::AuthCredential;
//!
//! let bearer = AuthCredential::bearer("abc123");
//! assert_eq!(bearer.header_value(), "Bearer abc123");
//!
//! let basic = AuthCredential::basic("user", "pass");
//! assert_eq!(basic.header_value(), "Basic dXNlcjpwYXNz");
//! ```
//!
//! [`AuthenticatedClient`]: crate::api::AuthenticatedClient

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// A credential presented to the Bitbucket API.
///
/// `Debug` output redacts the secret so configurations can be logged.
///
/// # Variants
///
/// - `Bearer`: sent as `Bearer <token>`
/// - `Basic`: sent as `Basic base64(<username>:<password>)`
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Token authentication (OAuth 2.0 access token or access token).
    Bearer {
        /// The token string.
        token: String,
    },
    /// HTTP Basic authentication, typically with an app password.
    Basic {
        /// The Bitbucket username.
        username: String,
        /// The app password.
        password: String,
    },
}

impl AuthCredential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The value for the authorization header.
    pub fn header_value(&self) -> String {
        match self {
            Self::Bearer { token } => format!("Bearer {token}"),
            Self::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
        }
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}
