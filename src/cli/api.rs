//
//  bitbucket-api
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends a request to any API path, similar to `gh api` for GitHub. Useful
//! for endpoints without a dedicated command, and for debugging.
//!
//! ## Examples
//!
//! ```bash
//! # Get repository info
//! bb-api api /repositories/workspace/repo
//!
//! # Create an issue with POST
//! bb-api api -X POST /repositories/workspace/repo/issues \
//!     -F title="Bug report" -F content.raw="Description here"
//!
//! # Paginate through results
//! bb-api api /repositories/workspace/repo/commits --paginate
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};

use crate::api::common::ApiError;
use crate::api::{Client, RawRequest, RequestBody, Response};
use crate::models::ErrorResponse;

use super::GlobalOptions;

/// Stop following `next` links after this many pages.
const MAX_PAGES: usize = 100;

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API path relative to the base URL (e.g. /repositories/workspace/repo)
    pub endpoint: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request header as 'Name: Value' (repeatable)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Typed field key=value; dots nest, e.g. content.raw=Text (repeatable)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// String field key=value (repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Read the JSON request body from a file (- for stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Follow `next` links and print every page's values as one array
    #[arg(long)]
    pub paginate: bool,

    /// Include the status line and response headers in output
    #[arg(long, short = 'i')]
    pub include: bool,

    /// Print nothing; only the exit status reports failure
    #[arg(long)]
    pub silent: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let method = RawRequest::parse_method(&self.method)?;
        let client = global.client()?.with_headers(self.build_headers()?);
        let request = self.build_request(method)?;

        if self.paginate {
            self.execute_paginated(&client, request).await
        } else {
            self.execute_single(&client, &request).await
        }
    }

    fn build_request(&self, method: Method) -> Result<RawRequest> {
        let mut request = RawRequest::new(method.clone(), self.endpoint.as_str());
        let fields = self.build_fields()?;

        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
            };
            let value: Value =
                serde_json::from_str(&content).context("Request body is not valid JSON")?;
            request = request.with_body(RequestBody::Json(value));
            // Fields still go in the query string alongside an explicit body.
            for (key, value) in flatten(&fields) {
                request = request.with_query(&key, value);
            }
            return Ok(request);
        }

        if fields.is_empty() {
            return Ok(request);
        }

        if method == Method::GET || method == Method::DELETE {
            for (key, value) in flatten(&fields) {
                request = request.with_query(&key, value);
            }
            Ok(request)
        } else {
            Ok(request.with_body(RequestBody::Json(Value::Object(fields))))
        }
    }

    fn build_fields(&self) -> Result<Map<String, Value>> {
        let mut body = Map::new();

        for field in &self.field {
            let (key, value) = split_field(field)?;
            set_nested_value(&mut body, key, parse_typed_value(value));
        }

        for field in &self.raw_field {
            let (key, value) = split_field(field)?;
            set_nested_value(&mut body, key, Value::String(value.to_string()));
        }

        Ok(body)
    }

    fn build_headers(&self) -> Result<Vec<(String, String)>> {
        self.header
            .iter()
            .map(|header| match header.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    Ok((name.trim().to_string(), value.trim().to_string()))
                }
                _ => bail!("Invalid header format: {}. Expected 'Name: Value'", header),
            })
            .collect()
    }

    async fn execute_single(&self, client: &Client, request: &RawRequest) -> Result<()> {
        let response = client.send_detailed(request).await?;

        if self.include && !self.silent {
            print_status_and_headers(&response);
        }

        if !self.silent {
            print_body(response.parsed.as_ref(), &response.text());
        }

        check_status(&response)
    }

    async fn execute_paginated(&self, client: &Client, first: RawRequest) -> Result<()> {
        let mut all_values: Vec<Value> = Vec::new();
        let mut request = first;

        for page in 1.. {
            let response = client.send_detailed(&request).await?;
            if self.include && !self.silent {
                print_status_and_headers(&response);
            }
            check_status(&response)?;

            let json = response.parsed.unwrap_or(Value::Null);
            let Some(values) = json.get("values").and_then(Value::as_array) else {
                // Not a paginated response.
                if !self.silent {
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
                return Ok(());
            };
            all_values.extend(values.iter().cloned());

            let Some(next) = json.get("next").and_then(Value::as_str) else {
                break;
            };
            if page >= MAX_PAGES {
                eprintln!("{} Stopping at {} pages", style("!").yellow(), MAX_PAGES);
                break;
            }
            tracing::debug!("Following next page {}", next);
            request = RawRequest::new(Method::GET, next);
        }

        if !self.silent {
            println!("{}", serde_json::to_string_pretty(&all_values)?);
        }
        Ok(())
    }
}

fn print_status_and_headers(response: &Response<Value>) {
    println!("{} {}", style("HTTP").dim(), response.status_code);
    for (name, value) in response.headers.iter() {
        println!("{}: {}", name, value.to_str().unwrap_or(""));
    }
    println!();
}

fn print_body(parsed: Option<&Value>, text: &str) {
    match parsed {
        Some(Value::Null) | None => {}
        Some(Value::String(_)) => println!("{}", text),
        Some(json) => match serde_json::to_string_pretty(json) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", text),
        },
    }
}

/// Turns an error status into the matching [`ApiError`].
fn check_status(response: &Response<Value>) -> Result<()> {
    let status = response.status_code;
    if status.is_success() || status == StatusCode::NOT_MODIFIED {
        return Ok(());
    }
    let error = ErrorResponse::from_body(status, &response.content);
    Err(ApiError::from_status(status, error.message().to_string()).into())
}

fn split_field(field: &str) -> Result<(&str, &str)> {
    match field.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("Invalid field format: {}. Expected key=value", field),
    }
}

/// `true`, `false`, `null`, numbers and JSON arrays/objects keep their type;
/// anything else is a string.
fn parse_typed_value(value: &str) -> Value {
    match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = value.parse::<i64>() {
                Value::Number(n.into())
            } else if let Some(n) = value
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
            {
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
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

/// Dotted `key=value` pairs for the query string.
fn flatten(fields: &Map<String, Value>) -> Vec<(String, String)> {
    fn walk(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    let key = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    walk(&key, value, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    walk(prefix, item, out);
                }
            }
            Value::String(s) => out.push((prefix.to_string(), s.clone())),
            other => out.push((prefix.to_string(), other.to_string())),
        }
    }

    let mut out = Vec::new();
    for (key, value) in fields {
        walk(key, value, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command(method: &str) -> ApiCommand {
        ApiCommand {
            endpoint: "repositories/ws/repo/issues".to_string(),
            method: method.to_string(),
            header: vec![],
            field: vec![],
            raw_field: vec![],
            input: None,
            paginate: false,
            include: false,
            silent: false,
        }
    }

    #[test]
    fn test_typed_values() {
        assert_eq!(parse_typed_value("true"), json!(true));
        assert_eq!(parse_typed_value("42"), json!(42));
        assert_eq!(parse_typed_value("1.5"), json!(1.5));
        assert_eq!(parse_typed_value("[1,2]"), json!([1, 2]));
        assert_eq!(parse_typed_value("hello"), json!("hello"));
    }

    #[test]
    fn test_nested_fields_build_json_body() {
        let mut cmd = command("post");
        cmd.field = vec!["title=Bug".to_string(), "content.raw=Details".to_string()];
        cmd.raw_field = vec!["priority=42".to_string()];

        let request = cmd.build_request(Method::POST).unwrap();
        assert_eq!(request.path, "/repositories/ws/repo/issues");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({
                "title": "Bug",
                "content": {"raw": "Details"},
                "priority": "42"
            }))
        );
    }

    #[test]
    fn test_get_fields_become_query() {
        let mut cmd = command("GET");
        cmd.field = vec!["pagelen=50".to_string(), "q=state=\"OPEN\"".to_string()];

        let request = cmd.build_request(Method::GET).unwrap();
        assert!(request.body.is_empty());
        assert_eq!(request.query.get("pagelen"), Some("50"));
        assert_eq!(request.query.get("q"), Some("state=\"OPEN\""));
    }

    #[test]
    fn test_invalid_field_and_header() {
        let mut cmd = command("POST");
        cmd.field = vec!["novalue".to_string()];
        assert!(cmd.build_fields().is_err());

        cmd.header = vec!["Accept: application/json".to_string()];
        assert_eq!(
            cmd.build_headers().unwrap(),
            vec![("Accept".to_string(), "application/json".to_string())]
        );
        cmd.header = vec!["bogus".to_string()];
        assert!(cmd.build_headers().is_err());
    }
}
