//
//  bitbucket-api
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Builder
//!
//! Assembles a transport-agnostic [`RequestDescriptor`] from typed call
//! arguments and the shared client configuration. Nothing here touches the
//! network, so every endpoint's request shape can be unit-tested directly.
//!
//! ## Path Parameters
//!
//! URL templates use `{name}` placeholders. Values passed to
//! [`RequestBuilder::path_param`] are substituted positionally, in the order
//! the placeholders appear, and percent-encoded as path segment text.
//!
//! ## Query Parameters
//!
//! Optional query parameters are [`FieldValue`]s. The value is first
//! converted to its wire string(s) via [`QueryValue`], then only set
//! parameters are emitted:
//!
//! | State | Emitted |
//! |-------|---------|
//! | `Unset` | nothing |
//! | `Null` | `name=null` (nullable parameters only) |
//! | `Value(v)` | `name=<v>`, once per item for lists |
//!
//! Passing `Null` to a parameter that is not nullable is a
//! [`SchemaViolation`], reported when [`RequestBuilder::build`] runs.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_api::api::{Client, RequestBuilder};
//! use bitbucket_api::codec::FieldValue;
//! use reqwest::Method;
//!
//! let client = Client::cloud();
//! let request = RequestBuilder::new(Method::GET, "/repositories/{workspace}/{repo_slug}/commits")
//!     .path_param("acme")
//!     .path_param("rocket")
//!     .query("include", FieldValue::Value("main".to_string()))
//!     .query("exclude", FieldValue::<String>::Unset)
//!     .build(&client)
//!     .unwrap();
//!
//! assert_eq!(
//!     request.url.as_str(),
//!     "https://api.bitbucket.org/2.0/repositories/acme/rocket/commits"
//! );
//! assert_eq!(request.query, vec![("include".to_string(), "main".to_string())]);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::client::ClientConfig;
use crate::codec::{FieldValue, SchemaViolation, WireEnum, WireValue};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^{}/]+\}").unwrap());

/// A request could not be assembled.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The configured base URL does not parse or cannot take path segments.
    #[error("invalid base URL `{0}`")]
    InvalidBaseUrl(String),

    /// The number of path parameters does not match the template.
    #[error("URL template `{template}` has {expected} placeholders but {given} path parameters were given")]
    PathParams {
        template: String,
        expected: usize,
        given: usize,
    },

    /// `Null` was given for a parameter that is not nullable.
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),
}

/// Everything a transport needs to perform one HTTP request.
///
/// Built fresh for each call; it has no identity beyond that call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Base URL joined with the substituted path, without the query string.
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub cookies: BTreeMap<String, String>,
    /// Query parameters in the order they were added. Only set parameters appear.
    pub query: Vec<(String, String)>,
    /// `None` means no body at all, which is different from an empty object.
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// First value of a query parameter.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The URL with the query string appended, as it goes on the wire.
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        url
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.full_url())
    }
}

/// Conversion of a query argument to its wire string(s).
///
/// Lists produce one entry per item; everything else produces one.
pub trait QueryValue {
    fn to_query(&self) -> Vec<String>;
}

impl QueryValue for String {
    fn to_query(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl QueryValue for &str {
    fn to_query(&self) -> Vec<String> {
        vec![(*self).to_string()]
    }
}

impl QueryValue for bool {
    fn to_query(&self) -> Vec<String> {
        vec![if *self { "true" } else { "false" }.to_string()]
    }
}

impl QueryValue for i64 {
    fn to_query(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl QueryValue for i32 {
    fn to_query(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn to_query(&self) -> Vec<String> {
        self.iter().flat_map(QueryValue::to_query).collect()
    }
}

/// Enums go out as their wire string.
impl<E: WireEnum> QueryValue for E {
    fn to_query(&self) -> Vec<String> {
        vec![self.as_str().to_string()]
    }
}

/// Builder for a single [`RequestDescriptor`].
///
/// Like `reqwest::RequestBuilder`, argument problems are recorded and
/// surfaced once by [`build`](Self::build), so endpoint code reads as a
/// straight chain.
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    template: String,
    path_params: Vec<String>,
    query: Vec<(String, String)>,
    headers: BTreeMap<String, String>,
    body: Option<Value>,
    error: Option<BuildError>,
}

impl RequestBuilder {
    pub fn new(method: Method, template: impl Into<String>) -> Self {
        Self {
            method,
            template: template.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
            error: None,
        }
    }

    /// Supplies the next positional path parameter.
    pub fn path_param(mut self, value: impl fmt::Display) -> Self {
        self.path_params.push(value.to_string());
        self
    }

    /// Adds an optional query parameter whose schema forbids `null`.
    pub fn query<T: QueryValue>(self, name: &str, value: FieldValue<T>) -> Self {
        self.push_query(name, value, false)
    }

    /// Adds an optional query parameter whose schema allows `null`.
    pub fn nullable_query<T: QueryValue>(self, name: &str, value: FieldValue<T>) -> Self {
        self.push_query(name, value, true)
    }

    fn push_query<T: QueryValue>(mut self, name: &str, value: FieldValue<T>, nullable: bool) -> Self {
        // encode before filtering so enums never reach the filter as objects
        let encoded = value.map(|v| v.to_query());
        if let Err(violation) = encoded.check_nullable(name, nullable) {
            self.error.get_or_insert(violation.into());
            return self;
        }
        match encoded {
            FieldValue::Unset => {}
            FieldValue::Null => self.query.push((name.to_string(), "null".to_string())),
            FieldValue::Value(values) => {
                for v in values {
                    self.query.push((name.to_string(), v));
                }
            }
        }
        self
    }

    /// Adds a request-specific header; it overrides a configured header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attaches a JSON body encoded from a typed value.
    pub fn json_body<T: WireValue>(mut self, body: &T) -> Self {
        self.body = Some(body.to_wire());
        self
    }

    /// Attaches an already-encoded JSON body.
    pub fn json_value(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Produces the descriptor using the client's base URL, headers,
    /// cookies and timeout.
    pub fn build<C: ClientConfig + ?Sized>(self, config: &C) -> Result<RequestDescriptor, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let url = join_url(config.base_url(), &self.template, &self.path_params)?;

        let mut headers = config.headers();
        headers.extend(self.headers);

        Ok(RequestDescriptor {
            method: self.method,
            url,
            headers,
            cookies: config.cookies().clone(),
            query: self.query,
            body: self.body,
            timeout: config.timeout(),
        })
    }
}

fn join_url(base_url: &str, template: &str, params: &[String]) -> Result<Url, BuildError> {
    let expected = PLACEHOLDER.find_iter(template).count();
    if expected != params.len() {
        return Err(BuildError::PathParams {
            template: template.to_string(),
            expected,
            given: params.len(),
        });
    }

    let mut url = Url::parse(base_url).map_err(|_| BuildError::InvalidBaseUrl(base_url.to_string()))?;
    let mut params = params.iter();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| BuildError::InvalidBaseUrl(base_url.to_string()))?;
        segments.pop_if_empty();
        for segment in template.split('/').filter(|s| !s.is_empty()) {
            let substituted = PLACEHOLDER.replace_all(segment, |_: &regex::Captures| {
                params.next().cloned().unwrap_or_default()
            });
            segments.push(&substituted);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cloud::MergeStrategy;
    use crate::api::Client;
    use serde_json::json;

    fn client() -> Client {
        Client::new("https://api.bitbucket.org/2.0")
    }

    #[test]
    fn test_only_set_query_params_are_sent() {
        let request = RequestBuilder::new(Method::GET, "/repositories")
            .query("role", FieldValue::<String>::Unset)
            .query("q", FieldValue::Value("foo".to_string()))
            .build(&client())
            .unwrap();
        assert_eq!(request.query, vec![("q".to_string(), "foo".to_string())]);
    }

    #[test]
    fn test_path_params_are_substituted_in_order_and_encoded() {
        let request = RequestBuilder::new(
            Method::GET,
            "/repositories/{workspace}/{repo_slug}/diff/{spec}",
        )
        .path_param("{a1b2-c3}")
        .path_param("my repo")
        .path_param("feature/x..main")
        .build(&client())
        .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.bitbucket.org/2.0/repositories/%7Ba1b2-c3%7D/my%20repo/diff/feature%2Fx..main"
        );
    }

    #[test]
    fn test_placeholders_inside_a_segment() {
        let request = RequestBuilder::new(
            Method::GET,
            "/repositories/{workspace}/{repo_slug}/issues/export/{repo_name}-issues-{task_id}.zip",
        )
        .path_param("ws")
        .path_param("repo")
        .path_param("repo")
        .path_param(42)
        .build(&client())
        .unwrap();
        assert!(request
            .url
            .as_str()
            .ends_with("/repositories/ws/repo/issues/export/repo-issues-42.zip"));
    }

    #[test]
    fn test_path_param_count_mismatch() {
        let err = RequestBuilder::new(Method::GET, "/repositories/{workspace}/{repo_slug}")
            .path_param("ws")
            .build(&client())
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::PathParams {
                expected: 2,
                given: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_enum_and_list_query_values() {
        let request = RequestBuilder::new(Method::GET, "/x")
            .query("strategy", FieldValue::Value(MergeStrategy::FastForward))
            .query(
                "include",
                FieldValue::Value(vec!["main".to_string(), "dev".to_string()]),
            )
            .query("async", FieldValue::Value(true))
            .build(&client())
            .unwrap();
        assert_eq!(
            request.query,
            vec![
                ("strategy".to_string(), "fast_forward".to_string()),
                ("include".to_string(), "main".to_string()),
                ("include".to_string(), "dev".to_string()),
                ("async".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_null_query_param() {
        let request = RequestBuilder::new(Method::GET, "/x")
            .nullable_query("state", FieldValue::<MergeStrategy>::Null)
            .build(&client())
            .unwrap();
        assert_eq!(request.query_value("state"), Some("null"));

        let err = RequestBuilder::new(Method::GET, "/x")
            .query("strategy", FieldValue::<MergeStrategy>::Null)
            .build(&client())
            .unwrap_err();
        assert!(matches!(err, BuildError::SchemaViolation(v) if v.field == "strategy"));
    }

    #[test]
    fn test_body_absent_versus_empty() {
        let without = RequestBuilder::new(Method::POST, "/x").build(&client()).unwrap();
        assert_eq!(without.body, None);

        let with = RequestBuilder::new(Method::POST, "/x")
            .json_value(json!({}))
            .build(&client())
            .unwrap();
        assert_eq!(with.body, Some(json!({})));
    }

    #[test]
    fn test_configuration_is_applied() {
        let config = client()
            .with_header("X-Trace", "configured")
            .with_header("Accept", "application/json")
            .with_cookie("session", "abc")
            .with_timeout(Duration::from_secs(7));
        let request = RequestBuilder::new(Method::GET, "/x")
            .header("X-Trace", "per-call")
            .build(&config)
            .unwrap();
        assert_eq!(request.headers["X-Trace"], "per-call");
        assert_eq!(request.headers["Accept"], "application/json");
        assert_eq!(request.cookies["session"], "abc");
        assert_eq!(request.timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_full_url_appends_query() {
        let request = RequestBuilder::new(Method::DELETE, "/repositories/{workspace}/{repo_slug}")
            .path_param("ws")
            .path_param("repo")
            .query("redirect_to", FieldValue::Value("https://example.com/new home".to_string()))
            .build(&client())
            .unwrap();
        assert_eq!(
            request.to_string(),
            "DELETE https://api.bitbucket.org/2.0/repositories/ws/repo?redirect_to=https%3A%2F%2Fexample.com%2Fnew+home"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = RequestBuilder::new(Method::GET, "/x")
            .build(&Client::new("not a url"))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidBaseUrl(_)));
    }
}
