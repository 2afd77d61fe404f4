//
//  bitbucket-api
//  cli/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit commands
//!
//! ## Examples
//!
//! ```bash
//! bb-api commit view acme/rocket 7d8f2a1c
//! bb-api commit list acme/rocket --include main --path src/lib.rs
//! bb-api commit diff acme/rocket feature..main --context 5 > change.patch
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{parse_repo, GlobalOptions};
use crate::api::cloud::commits::{self, DiffParams, ListCommitsParams};
use crate::codec::FieldValue;

#[derive(Args, Debug)]
pub struct CommitCommand {
    #[command(subcommand)]
    pub command: CommitSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CommitSubcommand {
    /// Show a single commit
    View(ViewArgs),

    /// List commits, one page at a time
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Print the unified diff for a commit or a range
    Diff(DiffArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository as WORKSPACE/REPO
    pub repo: String,

    /// Commit hash
    pub commit: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository as WORKSPACE/REPO
    pub repo: String,

    /// Only commits reachable from this ref
    #[arg(long)]
    pub include: Option<String>,

    /// Leave out commits reachable from this ref
    #[arg(long)]
    pub exclude: Option<String>,

    /// Only commits touching this path
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Repository as WORKSPACE/REPO
    pub repo: String,

    /// A commit, or SOURCE..DESTINATION
    pub spec: String,

    /// Lines of context
    #[arg(long, short = 'U')]
    pub context: Option<i64>,

    /// Limit the diff to this path
    #[arg(long)]
    pub path: Option<String>,

    /// Ignore whitespace changes
    #[arg(long, short = 'w')]
    pub ignore_whitespace: bool,

    /// Include binary files
    #[arg(long)]
    pub binary: bool,
}

impl CommitCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<i32> {
        let session = global.session()?;
        let client = session.client.as_ref();

        match &self.command {
            CommitSubcommand::View(args) => {
                let (workspace, repo_slug) = parse_repo(&args.repo)?;
                let call = commits::get_commit(client, &workspace, &repo_slug, &args.commit)?;
                session.run(call).await
            }
            CommitSubcommand::List(args) => {
                let (workspace, repo_slug) = parse_repo(&args.repo)?;
                let params = ListCommitsParams {
                    include: FieldValue::from_option(args.include.clone()),
                    exclude: FieldValue::from_option(args.exclude.clone()),
                    path: FieldValue::from_option(args.path.clone()),
                };
                let call = commits::list_commits(client, &workspace, &repo_slug, &params)?;
                session.run(call).await
            }
            CommitSubcommand::Diff(args) => {
                let (workspace, repo_slug) = parse_repo(&args.repo)?;
                let params = args.params();
                let call = commits::get_diff(client, &workspace, &repo_slug, &args.spec, &params)?;
                session.run(call).await
            }
        }
    }
}

impl DiffArgs {
    /// Boolean flags are only sent when given.
    fn params(&self) -> DiffParams {
        DiffParams {
            context: FieldValue::from_option(self.context),
            path: FieldValue::from_option(self.path.clone()),
            ignore_whitespace: if self.ignore_whitespace {
                FieldValue::Value(true)
            } else {
                FieldValue::Unset
            },
            binary: if self.binary {
                FieldValue::Value(true)
            } else {
                FieldValue::Unset
            },
        }
    }
}
