//
//  bitbucket-api
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 bindings.
//!
//! Entities and endpoint functions, organized by resource type. Each
//! endpoint function builds a [`Call`](crate::api::Call) and never touches
//! the network itself.
//!
//! # Module Organization
//!
//! - [`errors`] - The error body shared by every endpoint
//! - [`commits`] - Commits and diffs
//! - [`pullrequests`] - Pull request lookup and merge
//! - [`issues`] - Issue export job status
//! - [`repositories`] - Repository deletion
//!
//! # Notes
//!
//! - Timestamps are ISO 8601 and re-encode exactly as received
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`) and
//!   are percent-encoded when used as path parameters
//! - Keys an entity does not declare are kept in `additional_properties`

pub mod commits;
pub mod errors;
pub mod issues;
pub mod pullrequests;
pub mod repositories;

pub use commits::Commit;
pub use errors::{Error, ErrorDetail};
pub use issues::{IssueJobStatus, IssueJobStatusStatus};
pub use pullrequests::{MergeStrategy, Pullrequest, PullrequestMergeParameters, PullrequestState};
