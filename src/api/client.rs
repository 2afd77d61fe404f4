//
//  bitbucket-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Configuration
//!
//! Shared, read-only settings that every request is built from: base URL,
//! default headers, cookies, timeout, TLS verification and redirect policy.
//!
//! ## Flavors
//!
//! - [`Client`]: no credentials; for public endpoints
//! - [`AuthenticatedClient`]: a `Client` plus an [`AuthCredential`] that is
//!   sent as an authorization header on every request
//!
//! Both implement [`ClientConfig`], which is all the request builder and
//! the transports need. Builder methods consume `self`, so a configuration
//! is never mutated once it is shared between calls.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use bitbucket_api::api::{ClientConfig, Client};
//! use bitbucket_api::auth::AuthCredential;
//!
//! let client = Client::cloud()
//!     .with_timeout(Duration::from_secs(10))
//!     .with_auth(AuthCredential::bearer("your-token"));
//!
//! assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
//! assert_eq!(client.headers()["Authorization"], "Bearer your-token");
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use crate::auth::AuthCredential;

/// Base URL of the Bitbucket Cloud REST API v2.0.
pub const CLOUD_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Read-only configuration consulted while building and sending a request.
pub trait ClientConfig {
    /// Base URL that endpoint paths are appended to.
    fn base_url(&self) -> &str;

    /// Headers sent with every request, including any credential header.
    fn headers(&self) -> BTreeMap<String, String>;

    /// Cookies sent with every request.
    fn cookies(&self) -> &BTreeMap<String, String>;

    /// Per-request timeout; `None` waits indefinitely.
    fn timeout(&self) -> Option<Duration>;

    /// Whether TLS certificates are verified.
    fn verify_ssl(&self) -> bool;

    /// Whether 3xx responses are followed instead of returned.
    fn follow_redirects(&self) -> bool;
}

/// Configuration for unauthenticated calls.
///
/// # Defaults
///
/// | Setting | Default |
/// |---------|---------|
/// | headers | none |
/// | cookies | none |
/// | timeout | none |
/// | `verify_ssl` | `true` |
/// | `follow_redirects` | `false` |
///
/// Redirects are not followed by default so that endpoints which document a
/// 3xx response get to see it.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    base_url: String,
    headers: BTreeMap<String, String>,
    cookies: BTreeMap<String, String>,
    timeout: Option<Duration>,
    verify_ssl: bool,
    follow_redirects: bool,
}

impl Client {
    /// Creates a client for the given base URL.
    ///
    /// A trailing slash is dropped so templates can always start with `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            timeout: None,
            verify_ssl: true,
            follow_redirects: false,
        }
    }

    /// Creates a client for Bitbucket Cloud at [`CLOUD_BASE_URL`].
    pub fn cloud() -> Self {
        Self::new(CLOUD_BASE_URL)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_cookies<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.cookies
            .extend(cookies.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disabling verification accepts any certificate. Only for test servers.
    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn with_follow_redirects(mut self, follow_redirects: bool) -> Self {
        self.follow_redirects = follow_redirects;
        self
    }

    /// Upgrades to an [`AuthenticatedClient`].
    pub fn with_auth(self, credential: AuthCredential) -> AuthenticatedClient {
        AuthenticatedClient::new(self, credential)
    }
}

impl Default for Client {
    /// Returns a client for Bitbucket Cloud.
    fn default() -> Self {
        Self::cloud()
    }
}

impl ClientConfig for Client {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> BTreeMap<String, String> {
        self.headers.clone()
    }

    fn cookies(&self) -> &BTreeMap<String, String> {
        &self.cookies
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }
}

/// Configuration for calls that require a credential.
///
/// The credential header is added on top of the wrapped client's headers
/// and wins over a configured header with the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedClient {
    client: Client,
    credential: AuthCredential,
    auth_header_name: String,
}

impl AuthenticatedClient {
    pub fn new(client: Client, credential: AuthCredential) -> Self {
        Self {
            client,
            credential,
            auth_header_name: "Authorization".to_string(),
        }
    }

    /// Sends the credential under a different header name.
    pub fn with_auth_header_name(mut self, name: impl Into<String>) -> Self {
        self.auth_header_name = name.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.client = self.client.with_header(name, value);
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.client = self.client.with_cookie(name, value);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.client = self.client.with_verify_ssl(verify_ssl);
        self
    }

    pub fn with_follow_redirects(mut self, follow_redirects: bool) -> Self {
        self.client = self.client.with_follow_redirects(follow_redirects);
        self
    }

    pub fn credential(&self) -> &AuthCredential {
        &self.credential
    }

    /// The unauthenticated configuration underneath.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl ClientConfig for AuthenticatedClient {
    fn base_url(&self) -> &str {
        self.client.base_url()
    }

    fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = self.client.headers();
        headers.insert(self.auth_header_name.clone(), self.credential.header_value());
        headers
    }

    fn cookies(&self) -> &BTreeMap<String, String> {
        self.client.cookies()
    }

    fn timeout(&self) -> Option<Duration> {
        self.client.timeout()
    }

    fn verify_ssl(&self) -> bool {
        self.client.verify_ssl()
    }

    fn follow_redirects(&self) -> bool {
        self.client.follow_redirects()
    }
}
