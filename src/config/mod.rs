//
//  bitbucket-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Persistent settings for the `bb-api` command-line tool, stored as TOML
//! in a platform-specific directory and turned into a [`Client`] or
//! [`AuthenticatedClient`] on demand.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bb-api/config.toml`
//! - **macOS**: `~/Library/Application Support/bb-api/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bb-api\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://api.bitbucket.org/2.0"
//! timeout_secs = 30
//! verify_ssl = true
//! follow_redirects = false
//!
//! [headers]
//! Accept = "application/json"
//!
//! [cookies]
//! session = "abc"
//!
//! [auth]
//! token = "your-access-token"
//! # or
//! # username = "me"
//! # app_password = "app-password"
//! ```
//!
//! ## Precedence
//!
//! Command-line flags win over environment variables (`BB_API_BASE_URL`,
//! `BB_API_TOKEN`, `BB_API_USERNAME`, `BB_API_APP_PASSWORD`), which win
//! over the file. The file wins over built-in defaults.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level settings file I/O

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::{AuthenticatedClient, Client, CLOUD_BASE_URL};
use crate::auth::AuthCredential;

/// Persistent client settings.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `base_url` | `https://api.bitbucket.org/2.0` |
/// | `timeout_secs` | `30` (`0` disables the timeout) |
/// | `verify_ssl` | `true` |
/// | `follow_redirects` | `false` |
/// | `headers`, `cookies` | empty |
/// | `auth` | no credential |
///
/// # Notes
///
/// - All fields use `#[serde(default)]`, so a partial file is valid
/// - A missing file means all defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub verify_ssl: bool,
    pub follow_redirects: bool,
    pub headers: BTreeMap<String, String>,
    pub cookies: BTreeMap<String, String>,
    pub auth: AuthSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: CLOUD_BASE_URL.to_string(),
            timeout_secs: 30,
            verify_ssl: true,
            follow_redirects: false,
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            auth: AuthSettings::default(),
        }
    }
}

/// The `[auth]` table.
///
/// A token takes precedence over username and app password.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_password: Option<String>,
}

impl AuthSettings {
    /// The configured credential, if complete.
    pub fn credential(&self) -> Option<AuthCredential> {
        if let Some(token) = &self.token {
            return Some(AuthCredential::bearer(token.clone()));
        }
        match (&self.username, &self.app_password) {
            (Some(username), Some(password)) => Some(AuthCredential::basic(username.clone(), password.clone())),
            _ => None,
        }
    }
}

impl Settings {
    /// Loads settings from the default location.
    ///
    /// # Returns
    ///
    /// Defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads settings from an explicit path; defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!("no settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Writes settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Path of the settings file in the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "bb-api")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Builds an unauthenticated client from these settings.
    pub fn to_client(&self) -> Client {
        let client = Client::new(&self.base_url)
            .with_headers(self.headers.clone())
            .with_cookies(self.cookies.clone())
            .with_verify_ssl(self.verify_ssl)
            .with_follow_redirects(self.follow_redirects);
        match self.timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }

    /// Builds an authenticated client.
    ///
    /// # Errors
    ///
    /// Fails when no token and no complete username/app password pair is set.
    pub fn to_authenticated_client(&self) -> Result<AuthenticatedClient> {
        let credential = self.auth.credential().ok_or_else(|| {
            anyhow::anyhow!("No credentials configured. Set BB_API_TOKEN or pass --token.")
        })?;
        Ok(self.to_client().with_auth(credential))
    }
}
