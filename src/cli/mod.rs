//
//  bitbucket-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod commit;
mod issue;
mod pr;
mod repo;
mod request;

pub use commit::CommitCommand;
pub use issue::IssueCommand;
pub use pr::PrCommand;
pub use repo::RepoCommand;
pub use request::RequestCommand;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

use crate::api::cloud::Error;
use crate::api::{ApiError, Call, ClientConfig, HttpTransport, Parsed, Response};
use crate::codec::WireValue;
use crate::config::Settings;
use crate::exit_codes;
use crate::output::OutputWriter;

/// Command-line front end for the Bitbucket Cloud 2.0 API.
#[derive(Parser, Debug)]
#[command(
    name = "bb-api",
    version,
    about = "Call the Bitbucket Cloud 2.0 API from the command line",
    long_about = "bb-api sends typed requests to the Bitbucket Cloud 2.0 REST API.\n\n\
                  Documented responses are decoded and printed as JSON; raw responses\n\
                  such as diffs are written to stdout unchanged.",
    propagate_version = true,
    after_help = "Use 'bb-api <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options shared by every command. Flags win over environment variables,
/// which win over the settings file.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API base URL
    #[arg(long, global = true, env = "BB_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Access token sent as a Bearer credential
    #[arg(long, global = true, env = "BB_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Username for app password authentication
    #[arg(long, global = true, env = "BB_API_USERNAME")]
    pub username: Option<String>,

    /// App password for Basic authentication
    #[arg(long, global = true, env = "BB_API_APP_PASSWORD", hide_env_values = true)]
    pub app_password: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "BB_API_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Loads the settings file and applies flag and environment overrides.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load()?,
        };
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(token) = &self.token {
            settings.auth.token = Some(token.clone());
        }
        if let Some(username) = &self.username {
            settings.auth.username = Some(username.clone());
        }
        if let Some(app_password) = &self.app_password {
            settings.auth.app_password = Some(app_password.clone());
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if self.insecure {
            settings.verify_ssl = false;
        }
        Ok(settings)
    }

    /// Opens a session, authenticated when credentials are available.
    pub fn session(&self) -> Result<Session> {
        let settings = self.settings()?;
        let client: Box<dyn ClientConfig> = match settings.auth.credential() {
            Some(credential) => Box::new(settings.to_client().with_auth(credential)),
            None => Box::new(settings.to_client()),
        };
        Session::new(client)
    }

    /// Opens a session that must carry credentials.
    pub fn authenticated_session(&self) -> Result<Session> {
        let client = self.settings()?.to_authenticated_client()?;
        Session::new(Box::new(client))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send an arbitrary request through the typed pipeline
    Request(RequestCommand),

    /// View commits and diffs
    Commit(CommitCommand),

    /// View and merge pull requests
    Pr(PrCommand),

    /// Issue tracker jobs
    Issue(IssueCommand),

    /// Manage repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Show version information
    Version,
}

/// A client configuration plus the transport built from it.
pub struct Session {
    pub client: Box<dyn ClientConfig>,
    pub transport: HttpTransport,
    pub output: OutputWriter,
}

impl Session {
    fn new(client: Box<dyn ClientConfig>) -> Result<Self> {
        let transport = HttpTransport::from_config(client.as_ref())?;
        Ok(Self {
            client,
            transport,
            output: OutputWriter::new(),
        })
    }

    /// Sends a call and reports its outcome, returning the exit code.
    pub async fn run<S, E>(&self, call: Call<S, E>) -> Result<i32>
    where
        S: WireValue,
        E: ErrorReport,
    {
        let response = call.send(&self.transport).await?;
        report(&self.output, response)
    }
}

/// How a decoded error body is shown to the user.
pub trait ErrorReport {
    fn error_message(&self) -> String;
}

impl ErrorReport for Error {
    fn error_message(&self) -> String {
        match (self.message(), self.detail()) {
            (Some(message), Some(detail)) => format!("{message}: {detail}"),
            (Some(message), None) => message.to_string(),
            _ => "the server returned an error without a message".to_string(),
        }
    }
}

impl ErrorReport for Value {
    fn error_message(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }
}

/// Exit code for a documented error status.
pub fn status_exit_code(status: StatusCode) -> i32 {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => exit_codes::AUTH_ERROR,
        StatusCode::NOT_FOUND => exit_codes::NOT_FOUND,
        _ => exit_codes::ERROR,
    }
}

/// Prints a response according to how it was resolved and returns the
/// exit code.
pub fn report<S, E>(output: &OutputWriter, response: Response<S, E>) -> Result<i32>
where
    S: WireValue,
    E: ErrorReport,
{
    match &response.parsed {
        Parsed::Success(value) => {
            output.write_entity(value)?;
            Ok(exit_codes::SUCCESS)
        }
        Parsed::Raw(content) => {
            output.write_raw(content)?;
            Ok(exit_codes::SUCCESS)
        }
        Parsed::DomainError(err) => {
            output.write_error(&format!("{} ({})", err.error_message(), response.status));
            Ok(status_exit_code(response.status))
        }
        Parsed::Unmatched => {
            output.write_warning(&format!("undocumented response status {}", response.status));
            if !response.content.is_empty() {
                eprintln!("{}", response.text());
            }
            Ok(exit_codes::UNEXPECTED_STATUS)
        }
    }
}

/// Splits `WORKSPACE/REPO` into its two parts.
pub fn parse_repo(repo: &str) -> Result<(String, String)> {
    match repo.split_once('/') {
        Some((workspace, slug)) if !workspace.is_empty() && !slug.is_empty() && !slug.contains('/') => {
            Ok((workspace.to_string(), slug.to_string()))
        }
        _ => bail!("Invalid repository '{}'. Expected WORKSPACE/REPO", repo),
    }
}

/// Maps a library error to a message for the top-level handler.
pub fn describe_error(err: &ApiError) -> String {
    match err {
        ApiError::Network(e) if e.is_timeout() => "request timed out".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo() {
        assert_eq!(
            parse_repo("acme/rocket").unwrap(),
            ("acme".to_string(), "rocket".to_string())
        );
        assert!(parse_repo("acme").is_err());
        assert!(parse_repo("acme/").is_err());
        assert!(parse_repo("a/b/c").is_err());
    }

    #[test]
    fn test_status_exit_codes() {
        assert_eq!(status_exit_code(StatusCode::UNAUTHORIZED), exit_codes::AUTH_ERROR);
        assert_eq!(status_exit_code(StatusCode::FORBIDDEN), exit_codes::AUTH_ERROR);
        assert_eq!(status_exit_code(StatusCode::NOT_FOUND), exit_codes::NOT_FOUND);
        assert_eq!(status_exit_code(StatusCode::BAD_REQUEST), exit_codes::ERROR);
    }

    #[test]
    fn test_flags_override_settings_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"https://file.example/2.0\"\ntimeout_secs = 5\n").unwrap();

        let global = GlobalOptions {
            config: Some(path),
            base_url: Some("http://127.0.0.1:1".to_string()),
            token: Some("t".to_string()),
            insecure: true,
            ..Default::default()
        };
        let settings = global.settings().unwrap();
        assert_eq!(settings.base_url, "http://127.0.0.1:1");
        assert_eq!(settings.timeout_secs, 5);
        assert!(!settings.verify_ssl);
        assert_eq!(settings.auth.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_error_report_message() {
        let mut err = Error::with_message("Bad request");
        assert_eq!(err.error_message(), "Bad request");

        if let crate::codec::FieldValue::Value(detail) = &mut err.error {
            detail.detail = crate::codec::FieldValue::Value("name is taken".to_string());
        }
        assert_eq!(err.error_message(), "Bad request: name is taken");
        assert!(Error::default().error_message().contains("without a message"));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
