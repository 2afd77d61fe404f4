//
//  bitbucket-api
//  cli/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{parse_repo, GlobalOptions};
use crate::api::cloud::issues;

#[derive(Args, Debug)]
pub struct IssueCommand {
    #[command(subcommand)]
    pub command: IssueSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IssueSubcommand {
    /// Check on an issue export job
    #[command(name = "export-status")]
    ExportStatus(ExportStatusArgs),
}

#[derive(Args, Debug)]
pub struct ExportStatusArgs {
    /// Repository as WORKSPACE/REPO
    pub repo: String,

    /// Task ID returned when the export was started
    pub task_id: String,

    /// Repository name used in the archive file name (defaults to the slug)
    #[arg(long)]
    pub repo_name: Option<String>,
}

impl IssueCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<i32> {
        match &self.command {
            IssueSubcommand::ExportStatus(args) => {
                let session = global.authenticated_session()?;
                let (workspace, repo_slug) = parse_repo(&args.repo)?;
                let repo_name = args.repo_name.as_deref().unwrap_or(&repo_slug);
                let call = issues::get_issue_export_status(
                    session.client.as_ref(),
                    &workspace,
                    &repo_slug,
                    repo_name,
                    &args.task_id,
                )?;
                session.run(call).await
            }
        }
    }
}
