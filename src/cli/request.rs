//
//  bitbucket-api
//  cli/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends a request to any path under the configured base URL, through the
//! same builder, transport and resolver as the typed commands. Any 2xx is
//! decoded as JSON (or passed through with `--raw`), any 4xx/5xx as a JSON
//! error body.
//!
//! ## Examples
//!
//! ```bash
//! # Get repository info
//! bb-api request /repositories/acme/rocket
//!
//! # Query parameters
//! bb-api request /repositories/acme -q role=member -q pagelen=50
//!
//! # Create an issue with POST
//! bb-api request -X POST /repositories/acme/rocket/issues \
//!     -F title="Bug report" -F content.raw="Description here"
//!
//! # Non-JSON responses
//! bb-api request /repositories/acme/rocket/diff/main..dev --raw
//! ```

use std::fs;

use anyhow::{bail, Result};
use clap::Args;
use reqwest::Method;
use serde_json::{Map, Value};

use super::{report, GlobalOptions};
use crate::api::{Call, DecoderTable, RequestBuilder};
use crate::codec::FieldValue;

#[derive(Args, Debug)]
pub struct RequestCommand {
    /// Path below the base URL, with unencoded segments
    pub path: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Extra header as 'Name: Value'
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Query parameter as key=value
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Body field as key=value; values are typed (numbers, booleans, null, JSON)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Body field as key=value; values are always strings
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Read the JSON body from a file, or '-' for stdin
    #[arg(long, short = 'f', conflicts_with_all = ["field", "raw_field"])]
    pub input: Option<String>,

    /// Pass 2xx bodies through without parsing them
    #[arg(long)]
    pub raw: bool,

    /// Print the status line and response headers to stderr
    #[arg(long, short = 'i')]
    pub include: bool,
}

impl RequestCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<i32> {
        let session = global.session()?;

        let mut builder = RequestBuilder::new(self.parse_method()?, path_template(&self.path));
        for segment in path_segments(&self.path) {
            builder = builder.path_param(segment);
        }
        for (name, value) in self.parse_query()? {
            builder = builder.query(&name, FieldValue::Value(value));
        }
        for (name, value) in self.parse_headers()? {
            builder = builder.header(name, value);
        }
        if let Some(body) = self.build_body()? {
            builder = builder.json_value(body);
        }
        let request = builder.build(session.client.as_ref())?;

        let call = Call::new(request, self.table());
        let response = call.send(&session.transport).await?;
        if self.include {
            session.output.write_head(response.status, &response.headers);
        }
        report(&session.output, response)
    }

    /// Every 2xx decodes as JSON (or raw), every 4xx/5xx as a JSON error body.
    fn table(&self) -> DecoderTable<Value, Value> {
        let table = if self.raw {
            (200..300).fold(DecoderTable::new(), |t, status| t.raw(status))
        } else {
            (200..300).fold(DecoderTable::new(), |t, status| t.success(status))
        };
        let table = table.raw(204);
        (400..600).fold(table, |t, status| t.error(status))
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "HEAD" => Ok(Method::HEAD),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    fn parse_query(&self) -> Result<Vec<(String, String)>> {
        self.query.iter().map(|pair| split_pair(pair)).collect()
    }

    fn parse_headers(&self) -> Result<Vec<(String, String)>> {
        self.header
            .iter()
            .map(|header| match header.split_once(':') {
                Some((name, value)) => Ok((name.trim().to_string(), value.trim().to_string())),
                None => bail!("Invalid header format: {}. Expected 'Name: Value'", header),
            })
            .collect()
    }

    fn build_body(&self) -> Result<Option<Value>> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };
            return Ok(Some(serde_json::from_str(&content)?));
        }

        if self.field.is_empty() && self.raw_field.is_empty() {
            return Ok(None);
        }

        let mut body = Map::new();
        for field in &self.field {
            let (key, value) = split_pair(field)?;
            set_nested_value(&mut body, &key, typed_value(&value));
        }
        for field in &self.raw_field {
            let (key, value) = split_pair(field)?;
            set_nested_value(&mut body, &key, Value::String(value));
        }
        Ok(Some(Value::Object(body)))
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// One placeholder per segment, so braces in a segment (UUIDs) are data.
fn path_template(path: &str) -> String {
    let template: String = path_segments(path)
        .enumerate()
        .map(|(index, _)| format!("/{{s{index}}}"))
        .collect();
    if template.is_empty() {
        "/".to_string()
    } else {
        template
    }
}

fn split_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => bail!("Invalid field format: {}. Expected key=value", pair),
    }
}

fn typed_value(value: &str) -> Value {
    match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = value.parse::<i64>() {
                Value::Number(n.into())
            } else if let Some(n) = value.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                Value::Number(n)
            } else if value.starts_with('[') || value.starts_with('{') {
                serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
            } else {
                Value::String(value.to_string())
            }
        }
    }
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}
