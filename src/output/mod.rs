//
//  bitbucket-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Terminal output for the `bb-api` tool.
//!
//! - Decoded entities are printed as pretty JSON, re-encoded through the
//!   entity codec so unknown server fields are shown too
//! - Raw content (diffs, archives) is written to stdout byte for byte
//! - Status messages go to stderr, styled with `console` when colors are on
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_api::output::OutputWriter;
//!
//! let writer = OutputWriter::new();
//! writer.write_success("Repository deleted");
//! writer.write_error("Access denied");
//! ```

use std::io::Write;

use console::style;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::codec::WireValue;

/// Writes command results and status messages.
#[derive(Debug, Clone, Copy)]
pub struct OutputWriter {
    color: bool,
}

impl OutputWriter {
    /// Creates a writer that follows the terminal's color support.
    pub fn new() -> Self {
        Self {
            color: console::colors_enabled_stderr(),
        }
    }

    /// Prints a decoded value as pretty JSON on stdout.
    pub fn write_entity<T: WireValue>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", render_json(value)?);
        Ok(())
    }

    /// Writes raw content to stdout untouched.
    pub fn write_raw(&self, content: &[u8]) -> anyhow::Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content)?;
        stdout.flush()?;
        Ok(())
    }

    /// Prints the status line and headers to stderr, like `curl -i`.
    pub fn write_head(&self, status: StatusCode, headers: &HeaderMap) {
        if self.color {
            eprintln!("{}", style(status).bold());
        } else {
            eprintln!("{}", status);
        }
        for (name, value) in headers {
            let value = value.to_str().unwrap_or("<binary>");
            if self.color {
                eprintln!("{}: {}", style(name).dim(), value);
            } else {
                eprintln!("{}: {}", name, value);
            }
        }
        eprintln!();
    }

    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_success(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("✓").green().bold(), msg);
        } else {
            eprintln!("✓ {}", msg);
        }
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pretty JSON for a wire value.
pub fn render_json<T: WireValue>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&value.to_wire())?)
}
