//
//  bitbucket-api
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use super::{parse_repo, report, GlobalOptions};
use crate::api::cloud::repositories::{self, DeleteRepositoryParams};
use crate::api::Parsed;
use crate::codec::FieldValue;
use crate::exit_codes;

#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// Delete a repository
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Repository as WORKSPACE/REPO
    pub repo: String,

    /// URL to redirect visitors of the deleted repository to
    #[arg(long)]
    pub redirect_to: Option<String>,

    /// Confirm deletion
    #[arg(long)]
    pub yes: bool,
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<i32> {
        match &self.command {
            RepoSubcommand::Delete(args) => {
                let (workspace, repo_slug) = parse_repo(&args.repo)?;
                if !args.yes {
                    bail!(
                        "Refusing to delete {} without --yes. This cannot be undone.",
                        style(&args.repo).bold()
                    );
                }

                let session = global.authenticated_session()?;
                let params = DeleteRepositoryParams {
                    redirect_to: FieldValue::from_option(args.redirect_to.clone()),
                };
                let call = repositories::delete_repository(
                    session.client.as_ref(),
                    &workspace,
                    &repo_slug,
                    params,
                )?;

                let response = call.send(&session.transport).await?;
                if let Parsed::Raw(_) = response.parsed {
                    session
                        .output
                        .write_success(&format!("Deleted repository {}", args.repo));
                    return Ok(exit_codes::SUCCESS);
                }
                report(&session.output, response)
            }
        }
    }
}
