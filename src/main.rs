//
//  bitbucket-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitbucket_api::api::ApiError;
use bitbucket_api::cli::{describe_error, Cli, Commands};
use bitbucket_api::exit_codes;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            match e.downcast_ref::<ApiError>() {
                Some(api) => eprintln!("Error: {}", describe_error(api)),
                None => eprintln!("Error: {e:#}"),
            }
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Logs go to stderr; `BB_API_DEBUG=debug` shows every request.
fn init_logging() {
    let filter = EnvFilter::try_from_env("BB_API_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Request(cmd) => cmd.run(&cli.global).await,
        Commands::Commit(cmd) => cmd.run(&cli.global).await,
        Commands::Pr(cmd) => cmd.run(&cli.global).await,
        Commands::Issue(cmd) => cmd.run(&cli.global).await,
        Commands::Repo(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("bb-api version {}", bitbucket_api::VERSION);
            Ok(exit_codes::SUCCESS)
        }
    }
}
