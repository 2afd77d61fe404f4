//
//  bitbucket-api
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};
use reqwest::header::LOCATION;

use super::{parse_repo, report, GlobalOptions};
use crate::api::cloud::pullrequests::{self, MergeStrategy, PullrequestMergeParameters};
use crate::api::Parsed;
use crate::codec::{FieldValue, WireEnum};
use crate::exit_codes;

#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// Show a pull request
    View(ViewArgs),

    /// Merge a pull request
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository as WORKSPACE/REPO
    pub repo: String,

    /// Pull request ID
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Repository as WORKSPACE/REPO
    pub repo: String,

    /// Pull request ID
    pub id: i64,

    /// Merge strategy
    #[arg(long, short = 's', value_parser = ["merge_commit", "squash", "fast_forward"])]
    pub strategy: Option<String>,

    /// Commit message for the merge
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Delete the source branch after merging
    #[arg(long, short = 'd')]
    pub close_source_branch: bool,

    /// Ask the server to merge in the background
    #[arg(long = "async")]
    pub asynchronous: bool,
}

impl MergeArgs {
    /// The request body, or `None` when no merge option was given.
    fn body(&self) -> Result<Option<PullrequestMergeParameters>> {
        let merge_strategy = match &self.strategy {
            Some(name) => FieldValue::Value(MergeStrategy::from_wire_str(name)?),
            None => FieldValue::Unset,
        };
        let body = PullrequestMergeParameters {
            message: FieldValue::from_option(self.message.clone()),
            close_source_branch: if self.close_source_branch {
                FieldValue::Value(true)
            } else {
                FieldValue::Unset
            },
            merge_strategy,
            ..Default::default()
        };
        Ok((body != PullrequestMergeParameters::default()).then_some(body))
    }
}

impl PrCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<i32> {
        match &self.command {
            PrSubcommand::View(args) => {
                let session = global.session()?;
                let (workspace, repo_slug) = parse_repo(&args.repo)?;
                let call =
                    pullrequests::get_pullrequest(session.client.as_ref(), &workspace, &repo_slug, args.id)?;
                session.run(call).await
            }
            PrSubcommand::Merge(args) => {
                let session = global.authenticated_session()?;
                let (workspace, repo_slug) = parse_repo(&args.repo)?;
                let body = args.body()?;
                let asynchronous = if args.asynchronous {
                    FieldValue::Value(true)
                } else {
                    FieldValue::Unset
                };
                let call = pullrequests::merge_pullrequest(
                    session.client.as_ref(),
                    &workspace,
                    &repo_slug,
                    args.id,
                    body.as_ref(),
                    asynchronous,
                )?;

                let response = call.send(&session.transport).await?;
                if let Parsed::Raw(_) = response.parsed {
                    // 202: the merge continues in the background
                    let poll = response
                        .headers
                        .get(LOCATION)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("no Location header");
                    session
                        .output
                        .write_success(&format!("Merge of #{} accepted; poll {}", args.id, poll));
                    return Ok(exit_codes::SUCCESS);
                }
                report(&session.output, response)
            }
        }
    }
}
