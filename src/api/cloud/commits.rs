//
//  bitbucket-api
//  api/cloud/commits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud commit and diff endpoints.
//!
//! # Endpoints
//!
//! | Function | Request | Documented statuses |
//! |----------|---------|---------------------|
//! | [`get_commit`] | `GET /repositories/{workspace}/{repo_slug}/commit/{commit}` | 200 [`Commit`], 404 [`Error`] |
//! | [`list_commits`] | `GET /repositories/{workspace}/{repo_slug}/commits` | 200 [`Page<Commit>`], 404 [`Error`] |
//! | [`get_diff`] | `GET /repositories/{workspace}/{repo_slug}/diff/{spec}` | 200 raw patch, 555 [`Error`] |
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::api::cloud::commits::{self, ListCommitsParams};
//! use bitbucket_api::api::Client;
//! use bitbucket_api::codec::FieldValue;
//!
//! let client = Client::cloud();
//! let params = ListCommitsParams {
//!     include: FieldValue::Value("main".to_string()),
//!     ..Default::default()
//! };
//! let call = commits::list_commits(&client, "acme", "rocket", &params).unwrap();
//!
//! assert_eq!(
//!     call.request().to_string(),
//!     "GET https://api.bitbucket.org/2.0/repositories/acme/rocket/commits?include=main"
//! );
//! ```

use reqwest::Method;

use super::Error;
use crate::api::client::ClientConfig;
use crate::api::common::Page;
use crate::api::request::{BuildError, RequestBuilder};
use crate::api::response::DecoderTable;
use crate::api::Call;
use crate::codec::{DecodeError, Entity, FieldValue, ObjectReader, ObjectWriter, Overflow, Timestamp};

/// A commit in a Bitbucket Cloud repository.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `hash` | `FieldValue<String>` | Full SHA-1 |
/// | `date` | `FieldValue<Timestamp>` | Author date, ISO 8601 |
/// | `message` | `FieldValue<String>` | Full commit message |
/// | `parents` | `FieldValue<Vec<Commit>>` | Parent commits, usually abbreviated |
///
/// Author, repository and link objects are not declared and land in
/// `additional_properties`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Commit {
    pub hash: FieldValue<String>,
    pub date: FieldValue<Timestamp>,
    pub message: FieldValue<String>,
    pub parents: FieldValue<Vec<Commit>>,
    pub additional_properties: Overflow,
}

impl Commit {
    /// The first line of the commit message.
    pub fn summary(&self) -> Option<&str> {
        self.message.value().and_then(|m| m.lines().next())
    }

    /// The first 12 characters of the hash.
    pub fn short_hash(&self) -> Option<&str> {
        self.hash
            .value()
            .map(|h| h.char_indices().nth(12).map_or(h.as_str(), |(end, _)| &h[..end]))
    }
}

impl Entity for Commit {
    const TYPE_TAG: Option<&'static str> = Some("commit");
    const FIELDS: &'static [&'static str] = &["hash", "date", "message", "parents"];

    fn write_fields(&self, out: &mut ObjectWriter) {
        out.optional("hash", &self.hash);
        out.optional("date", &self.date);
        out.optional("message", &self.message);
        out.optional("parents", &self.parents);
    }

    fn read_fields(input: &mut ObjectReader) -> Result<Self, DecodeError> {
        Ok(Self {
            hash: input.optional("hash")?,
            date: input.optional("date")?,
            message: input.optional("message")?,
            parents: input.optional("parents")?,
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

/// Optional query parameters for [`list_commits`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCommitsParams {
    /// Only commits reachable from this ref.
    pub include: FieldValue<String>,
    /// Leave out commits reachable from this ref.
    pub exclude: FieldValue<String>,
    /// Only commits that touch this path.
    pub path: FieldValue<String>,
}

/// Optional query parameters for [`get_diff`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffParams {
    /// Lines of context around each change.
    pub context: FieldValue<i64>,
    /// Limit the diff to this path.
    pub path: FieldValue<String>,
    pub ignore_whitespace: FieldValue<bool>,
    /// Include binary files.
    pub binary: FieldValue<bool>,
}

/// Builds `GET /repositories/{workspace}/{repo_slug}/commit/{commit}`.
pub fn get_commit<C: ClientConfig + ?Sized>(
    client: &C,
    workspace: &str,
    repo_slug: &str,
    commit: &str,
) -> Result<Call<Commit, Error>, BuildError> {
    let request = RequestBuilder::new(Method::GET, "/repositories/{workspace}/{repo_slug}/commit/{commit}")
        .path_param(workspace)
        .path_param(repo_slug)
        .path_param(commit)
        .build(client)?;
    Ok(Call::new(request, DecoderTable::new().success(200).error(404)))
}

/// Builds `GET /repositories/{workspace}/{repo_slug}/commits`.
///
/// Returns one page; follow [`Page::next_url`] for more.
pub fn list_commits<C: ClientConfig + ?Sized>(
    client: &C,
    workspace: &str,
    repo_slug: &str,
    params: &ListCommitsParams,
) -> Result<Call<Page<Commit>, Error>, BuildError> {
    let request = RequestBuilder::new(Method::GET, "/repositories/{workspace}/{repo_slug}/commits")
        .path_param(workspace)
        .path_param(repo_slug)
        .query("include", params.include.clone())
        .query("exclude", params.exclude.clone())
        .query("path", params.path.clone())
        .build(client)?;
    Ok(Call::new(request, DecoderTable::new().success(200).error(404)))
}

/// Builds `GET /repositories/{workspace}/{repo_slug}/diff/{spec}`.
///
/// `spec` is a single commit or a `source..destination` pair. The 200 body
/// is a unified diff and is returned untouched as [`Parsed::Raw`].
///
/// [`Parsed::Raw`]: crate::api::Parsed::Raw
pub fn get_diff<C: ClientConfig + ?Sized>(
    client: &C,
    workspace: &str,
    repo_slug: &str,
    spec: &str,
    params: &DiffParams,
) -> Result<Call<(), Error>, BuildError> {
    let request = RequestBuilder::new(Method::GET, "/repositories/{workspace}/{repo_slug}/diff/{spec}")
        .path_param(workspace)
        .path_param(repo_slug)
        .path_param(spec)
        .query("context", params.context)
        .query("path", params.path.clone())
        .query("ignore_whitespace", params.ignore_whitespace)
        .query("binary", params.binary)
        .build(client)?;
    Ok(Call::new(request, DecoderTable::new().raw(200).error(555)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Client;
    use crate::codec::{decode, encode};
    use serde_json::{json, Value};

    #[test]
    fn test_commit_round_trip_with_nested_parents() {
        let wire = json!({
            "type": "commit",
            "hash": "7d8f2a1c9e0b4d6f8a2c1e3b5d7f9a0c2e4b6d8f",
            "date": "2026-01-12T09:30:00+02:00",
            "message": "Fix login redirect\n\nLonger body.",
            "parents": [{"type": "commit", "hash": "0a1b2c", "links": {"self": {"href": "x"}}}],
            "author": {"raw": "Dev <dev@example.com>"}
        });
        let commit: Commit = decode(wire.clone()).unwrap();

        assert_eq!(commit.summary(), Some("Fix login redirect"));
        assert_eq!(commit.short_hash(), Some("7d8f2a1c9e0b"));
        assert_eq!(commit.date.value().unwrap().as_str(), "2026-01-12T09:30:00+02:00");
        assert!(commit.additional_properties.contains_key("author"));

        let parent = &commit.parents.value().unwrap()[0];
        assert!(parent.additional_properties.contains_key("links"));

        assert_eq!(Value::Object(encode(&commit)), wire);
    }

    #[test]
    fn test_commit_field_states_round_trip() {
        for message in [
            FieldValue::Unset,
            FieldValue::Value("m".to_string()),
        ] {
            let commit = Commit {
                hash: FieldValue::Value("abc".to_string()),
                message,
                ..Default::default()
            };
            let back: Commit = decode(Value::Object(encode(&commit))).unwrap();
            assert_eq!(back, commit);
        }
    }

    #[test]
    fn test_short_hash_counts_characters() {
        let commit: Commit = decode(json!({"type": "commit", "hash": "aéééééééééééééé"})).unwrap();
        assert_eq!(commit.short_hash(), Some("aééééééééééé"));

        let short: Commit = decode(json!({"type": "commit", "hash": "é1"})).unwrap();
        assert_eq!(short.short_hash(), Some("é1"));
        assert_eq!(Commit::default().short_hash(), None);
    }

    #[test]
    fn test_overflow_does_not_shadow_hash() {
        let mut commit = Commit {
            hash: FieldValue::Value("abc".to_string()),
            ..Default::default()
        };
        commit.additional_properties.insert("hash".to_string(), json!(7));
        commit.additional_properties.insert("type".to_string(), json!("tag"));

        let tree = Value::Object(encode(&commit));
        assert_eq!(tree, json!({"type": "commit", "hash": "abc"}));

        let back: Commit = decode(tree).unwrap();
        assert_eq!(back.hash, FieldValue::Value("abc".to_string()));
        assert!(back.additional_properties.is_empty());
    }

    #[test]
    fn test_commit_rejects_null_message() {
        let err = decode::<Commit>(json!({"type": "commit", "message": null})).unwrap_err();
        assert_eq!(err.path_string(), "message");
    }

    #[test]
    fn test_get_commit_request() {
        let call = get_commit(&Client::cloud(), "ws", "repo", "abc123").unwrap();
        assert_eq!(
            call.request().url.as_str(),
            "https://api.bitbucket.org/2.0/repositories/ws/repo/commit/abc123"
        );
        assert_eq!(call.table().statuses().collect::<Vec<_>>(), vec![200, 404]);
    }

    #[test]
    fn test_list_commits_sends_only_set_params() {
        let params = ListCommitsParams {
            exclude: FieldValue::Value("release".to_string()),
            path: FieldValue::Value("src/lib.rs".to_string()),
            ..Default::default()
        };
        let call = list_commits(&Client::cloud(), "ws", "repo", &params).unwrap();
        assert_eq!(call.request().query_value("include"), None);
        assert_eq!(call.request().query_value("exclude"), Some("release"));
        assert_eq!(call.request().query_value("path"), Some("src/lib.rs"));
    }

    #[test]
    fn test_get_diff_request() {
        let params = DiffParams {
            context: FieldValue::Value(5),
            ignore_whitespace: FieldValue::Value(true),
            ..Default::default()
        };
        let call = get_diff(&Client::cloud(), "ws", "repo", "feature..main", &params).unwrap();
        assert_eq!(
            call.request().to_string(),
            "GET https://api.bitbucket.org/2.0/repositories/ws/repo/diff/feature..main?context=5&ignore_whitespace=true"
        );
        assert_eq!(call.table().statuses().collect::<Vec<_>>(), vec![200, 555]);
    }
}
