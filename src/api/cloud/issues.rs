//
//  bitbucket-api
//  api/cloud/issues.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud issue tracker export status.
//!
//! Exporting a repository's issues is an asynchronous job. While the job
//! runs, polling its archive URL answers 202 with an [`IssueJobStatus`].

use std::fmt;

use reqwest::Method;
use serde_json::{Number, Value};

use super::Error;
use crate::api::client::ClientConfig;
use crate::api::request::{BuildError, RequestBuilder};
use crate::api::response::DecoderTable;
use crate::api::Call;
use crate::codec::{
    enum_from_wire, enum_to_wire, DecodeError, Entity, FieldValue, ObjectReader, ObjectWriter,
    Overflow, WireEnum, WireValue,
};

/// Status of an issue import/export job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueJobStatusStatus {
    Accepted,
    Started,
    Running,
    Failure,
}

impl WireEnum for IssueJobStatusStatus {
    const VARIANTS: &'static [Self] = &[Self::Accepted, Self::Started, Self::Running, Self::Failure];
    const NAMES: &'static [&'static str] = &["ACCEPTED", "STARTED", "RUNNING", "FAILURE"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Started => "STARTED",
            Self::Running => "RUNNING",
            Self::Failure => "FAILURE",
        }
    }
}

impl WireValue for IssueJobStatusStatus {
    fn to_wire(&self) -> Value {
        enum_to_wire(self)
    }

    fn from_wire(value: Value) -> Result<Self, DecodeError> {
        enum_from_wire(value)
    }
}

impl fmt::Display for IssueJobStatusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of an issue export job.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `status` | Job state |
/// | `phase` | Free-text name of the current phase |
/// | `total` | Number of issues to process |
/// | `count` | Number processed so far |
/// | `pct` | Completion percentage, 0 to 100 |
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueJobStatus {
    pub status: FieldValue<IssueJobStatusStatus>,
    pub phase: FieldValue<String>,
    pub total: FieldValue<i64>,
    pub count: FieldValue<i64>,
    pub pct: FieldValue<Number>,
    pub additional_properties: Overflow,
}

impl IssueJobStatus {
    /// Whether the job has stopped without producing an archive.
    pub fn is_failed(&self) -> bool {
        self.status.value() == Some(&IssueJobStatusStatus::Failure)
    }

    /// Completion percentage as a float.
    pub fn percent(&self) -> Option<f64> {
        self.pct.value().and_then(Number::as_f64)
    }
}

impl Entity for IssueJobStatus {
    const TYPE_TAG: Option<&'static str> = Some("issue_job_status");
    const FIELDS: &'static [&'static str] = &["status", "phase", "total", "count", "pct"];

    fn write_fields(&self, out: &mut ObjectWriter) {
        out.optional("status", &self.status);
        out.optional("phase", &self.phase);
        out.optional("total", &self.total);
        out.optional("count", &self.count);
        out.optional("pct", &self.pct);
    }

    fn read_fields(input: &mut ObjectReader) -> Result<Self, DecodeError> {
        Ok(Self {
            status: input.optional("status")?,
            phase: input.optional("phase")?,
            total: input.optional("total")?,
            count: input.optional("count")?,
            pct: input.optional("pct")?,
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

/// Builds `GET /repositories/{workspace}/{repo_slug}/issues/export/{repo_name}-issues-{task_id}.zip`.
///
/// Documented statuses: 202 [`IssueJobStatus`], 401 and 404 [`Error`].
/// Once the archive is ready the server answers with the zip itself,
/// which arrives as an unmatched response with the bytes in `content`.
pub fn get_issue_export_status<C: ClientConfig + ?Sized>(
    client: &C,
    workspace: &str,
    repo_slug: &str,
    repo_name: &str,
    task_id: &str,
) -> Result<Call<IssueJobStatus, Error>, BuildError> {
    let request = RequestBuilder::new(
        Method::GET,
        "/repositories/{workspace}/{repo_slug}/issues/export/{repo_name}-issues-{task_id}.zip",
    )
    .path_param(workspace)
    .path_param(repo_slug)
    .path_param(repo_name)
    .path_param(task_id)
    .build(client)?;
    Ok(Call::new(
        request,
        DecoderTable::new().success(202).error(401).error(404),
    ))
}
