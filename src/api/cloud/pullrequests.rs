//
//  bitbucket-api
//  api/cloud/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pull request types and endpoints.
//!
//! # Pull Request Lifecycle
//!
//! 1. **OPEN** - Initial state when created
//! 2. **MERGED** - Successfully merged into the destination branch
//! 3. **DECLINED** - Rejected and closed without merging
//! 4. **SUPERSEDED** - Replaced by another pull request
//!
//! # Endpoints
//!
//! | Function | Request | Documented statuses |
//! |----------|---------|---------------------|
//! | [`get_pullrequest`] | `GET .../pullrequests/{pull_request_id}` | 200 [`Pullrequest`], 404 [`Error`] |
//! | [`merge_pullrequest`] | `POST .../pullrequests/{pull_request_id}/merge` | 200 [`Pullrequest`], 202 raw, 555 [`Error`] |
//!
//! A merge requested with `async=true` may answer 202 with a `Location`
//! header to poll instead of the merged pull request.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_api::api::cloud::pullrequests::{self, MergeStrategy, PullrequestMergeParameters};
//! use bitbucket_api::api::Client;
//! use bitbucket_api::codec::FieldValue;
//! use serde_json::json;
//!
//! let body = PullrequestMergeParameters {
//!     merge_strategy: FieldValue::Value(MergeStrategy::Squash),
//!     close_source_branch: FieldValue::Value(true),
//!     ..Default::default()
//! };
//! let call = pullrequests::merge_pullrequest(
//!     &Client::cloud(), "acme", "rocket", 42, Some(&body), FieldValue::Unset,
//! ).unwrap();
//!
//! assert_eq!(
//!     call.request().body,
//!     Some(json!({
//!         "type": "pullrequest_merge_parameters",
//!         "close_source_branch": true,
//!         "merge_strategy": "squash"
//!     }))
//! );
//! ```

use std::fmt;

use reqwest::Method;
use serde_json::Value;

use super::{Commit, Error};
use crate::api::client::ClientConfig;
use crate::api::request::{BuildError, RequestBuilder};
use crate::api::response::DecoderTable;
use crate::api::Call;
use crate::codec::{
    enum_from_wire, enum_to_wire, DecodeError, Entity, FieldValue, ObjectReader, ObjectWriter,
    Overflow, Timestamp, WireEnum, WireValue,
};

/// State of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PullrequestState {
    Open,
    Merged,
    Declined,
    Superseded,
}

impl WireEnum for PullrequestState {
    const VARIANTS: &'static [Self] = &[Self::Open, Self::Merged, Self::Declined, Self::Superseded];
    const NAMES: &'static [&'static str] = &["OPEN", "MERGED", "DECLINED", "SUPERSEDED"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
            Self::Superseded => "SUPERSEDED",
        }
    }
}

impl WireValue for PullrequestState {
    fn to_wire(&self) -> Value {
        enum_to_wire(self)
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        enum_from_wire(value)
    }
}

impl fmt::Display for PullrequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the merge is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeStrategy {
    MergeCommit,
    Squash,
    FastForward,
}

impl WireEnum for MergeStrategy {
    const VARIANTS: &'static [Self] = &[Self::MergeCommit, Self::Squash, Self::FastForward];
    const NAMES: &'static [&'static str] = &["merge_commit", "squash", "fast_forward"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::MergeCommit => "merge_commit",
            Self::Squash => "squash",
            Self::FastForward => "fast_forward",
        }
    }
}

impl WireValue for MergeStrategy {
    fn to_wire(&self) -> Value {
        enum_to_wire(self)
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        enum_from_wire(value)
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request in Bitbucket Cloud.
///
/// # Fields
///
/// * `id` - Numeric identifier within the repository
/// * `title` - Short summary of the changes
/// * `state` - Current [`PullrequestState`]
/// * `created_on` - Creation timestamp
/// * `merge_commit` - The merge commit; explicitly `null` while unmerged
///
/// Source, destination, author, reviewers and the rest are kept in
/// `additional_properties`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pullrequest {
    pub id: FieldValue<i64>,
    pub title: FieldValue<String>,
    pub state: FieldValue<PullrequestState>,
    pub created_on: FieldValue<Timestamp>,
    pub merge_commit: FieldValue<Commit>,
    pub additional_properties: Overflow,
}

impl Entity for Pullrequest {
    const TYPE_TAG: Option<&'static str> = Some("pullrequest");
    const FIELDS: &'static [&'static str] = &["id", "title", "state", "created_on", "merge_commit"];

    fn write_fields(&self, out: &mut ObjectWriter) {
        out.optional("id", &self.id);
        out.optional("title", &self.title);
        out.optional("state", &self.state);
        out.optional("created_on", &self.created_on);
        out.optional("merge_commit", &self.merge_commit);
    }

    fn read_fields(input: &mut ObjectReader) -> Result<Self, DecodeError> {
        Ok(Self {
            id: input.optional("id")?,
            title: input.optional("title")?,
            state: input.optional("state")?,
            created_on: input.optional("created_on")?,
            merge_commit: input.nullable("merge_commit")?,
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

/// Request body for [`merge_pullrequest`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PullrequestMergeParameters {
    /// Commit message for the merge commit.
    pub message: FieldValue<String>,
    pub close_source_branch: FieldValue<bool>,
    pub merge_strategy: FieldValue<MergeStrategy>,
    pub additional_properties: Overflow,
}

impl Entity for PullrequestMergeParameters {
    const TYPE_TAG: Option<&'static str> = Some("pullrequest_merge_parameters");
    const FIELDS: &'static [&'static str] = &["message", "close_source_branch", "merge_strategy"];

    fn write_fields(&self, out: &mut ObjectWriter) {
        out.optional("message", &self.message);
        out.optional("close_source_branch", &self.close_source_branch);
        out.optional("merge_strategy", &self.merge_strategy);
    }

    fn read_fields(input: &mut ObjectReader) -> Result<Self, DecodeError> {
        Ok(Self {
            message: input.optional("message")?,
            close_source_branch: input.optional("close_source_branch")?,
            merge_strategy: input.optional("merge_strategy")?,
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

/// Builds `GET /repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}`.
pub fn get_pullrequest<C: ClientConfig + ?Sized>(
    client: &C,
    workspace: &str,
    repo_slug: &str,
    pull_request_id: i64,
) -> Result<Call<Pullrequest, Error>, BuildError> {
    let request = RequestBuilder::new(
        Method::GET,
        "/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}",
    )
    .path_param(workspace)
    .path_param(repo_slug)
    .path_param(pull_request_id)
    .build(client)?;
    Ok(Call::new(request, DecoderTable::new().success(200).error(404)))
}

/// Builds `POST /repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/merge`.
///
/// # Parameters
///
/// * `body` - Merge options; `None` sends no body at all
/// * `asynchronous` - The `async` query flag
pub fn merge_pullrequest<C: ClientConfig + ?Sized>(
    client: &C,
    workspace: &str,
    repo_slug: &str,
    pull_request_id: i64,
    body: Option<&PullrequestMergeParameters>,
    asynchronous: FieldValue<bool>,
) -> Result<Call<Pullrequest, Error>, BuildError> {
    let mut builder = RequestBuilder::new(
        Method::POST,
        "/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/merge",
    )
    .path_param(workspace)
    .path_param(repo_slug)
    .path_param(pull_request_id)
    .query("async", asynchronous);
    if let Some(body) = body {
        builder = builder.json_body(body);
    }
    let request = builder.build(client)?;
    Ok(Call::new(
        request,
        DecoderTable::new().success(200).raw(202).error(555),
    ))
}
