//
//  bitbucket-api
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transports
//!
//! A transport performs exactly one HTTP request described by a
//! [`RequestDescriptor`] and hands back the [`RawResponse`]. It never looks
//! at the status code: deciding what a status means is the resolver's job.
//!
//! | Transport | Trait | Backed by |
//! |-----------|-------|-----------|
//! | [`HttpTransport`] | [`AsyncTransport`] | `reqwest::Client` |
//! | [`BlockingHttpTransport`] | [`Transport`] | `reqwest::blocking::Client` |
//!
//! Both are built from a [`ClientConfig`], which supplies TLS verification
//! and the redirect policy. Everything else (headers, cookies, timeout)
//! travels with the descriptor.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use reqwest::redirect::Policy;

use super::client::ClientConfig;
use super::common::ApiError;
use super::request::RequestDescriptor;
use super::response::RawResponse;

/// Sends a request and blocks until the full body has been read.
pub trait Transport {
    fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, ApiError>;
}

/// Sends a request on the async runtime.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, ApiError>;
}

fn user_agent() -> String {
    format!("bb-api/{}", crate::VERSION)
}

fn redirect_policy<C: ClientConfig + ?Sized>(config: &C) -> Policy {
    if config.follow_redirects() {
        Policy::default()
    } else {
        Policy::none()
    }
}

/// Converts descriptor headers and cookies into a `HeaderMap`.
///
/// Cookies are joined into a single `Cookie` header in name order.
fn header_map(request: &RequestDescriptor) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &request.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name.clone()))?;
        headers.insert(header_name, header_value);
    }

    if !request.cookies.is_empty() {
        let cookie = request
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        let value =
            HeaderValue::from_str(&cookie).map_err(|_| ApiError::InvalidHeader("Cookie".to_string()))?;
        headers.insert(COOKIE, value);
    }

    Ok(headers)
}

/// Async transport over a shared `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Wraps an existing client as-is.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Builds a client honoring the configuration's TLS and redirect settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the TLS backend cannot be initialized.
    pub fn from_config<C: ClientConfig + ?Sized>(config: &C) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent())
            .danger_accept_invalid_certs(!config.verify_ssl())
            .redirect(redirect_policy(config))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl AsyncTransport for HttpTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, ApiError> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .headers(header_map(request)?);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes().await?.to_vec();

        tracing::debug!("{} {} -> {} ({} bytes)", request.method, request.url, status, content.len());

        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }
}

/// Blocking transport over `reqwest::blocking::Client`.
///
/// Must not be created or dropped from inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingHttpTransport {
    http: reqwest::blocking::Client,
}

impl BlockingHttpTransport {
    pub fn new(http: reqwest::blocking::Client) -> Self {
        Self { http }
    }

    /// Builds a client honoring the configuration's TLS and redirect settings.
    pub fn from_config<C: ClientConfig + ?Sized>(config: &C) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(user_agent())
            .danger_accept_invalid_certs(!config.verify_ssl())
            .redirect(redirect_policy(config))
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for BlockingHttpTransport {
    fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, ApiError> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .headers(header_map(request)?);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let content = response.bytes()?.to_vec();

        tracing::debug!("{} {} -> {} ({} bytes)", request.method, request.url, status, content.len());

        Ok(RawResponse {
            status,
            headers,
            content,
        })
    }
}
