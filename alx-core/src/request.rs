// SPDX-License-Identifier: AGPL-3.0-or-later
//! Request descriptors handed to the HTTP layer
//!
//! Every path operation is a `POST` to
//! `<base>/paths/<path>/<action>/` with the option payload as JSON body.
//! Path segments are percent-encoded and the leading slash is kept, so
//! absolute paths produce a double slash after `paths`, which is what the
//! proxy expects.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ProxyConfig;
use crate::error::{AlxError, AlxResult};
use crate::options::{Mount, PathOptions, Rename};
use crate::path::AlluxioPath;
use crate::payload::Payload;
use crate::Operation;

/// A fully described proxy request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRequest {
    pub operation: Operation,
    pub path: AlluxioPath,
    pub query: Vec<(String, String)>,
    pub body: Payload,
}

impl PathRequest {
    pub const METHOD: &'static str = "POST";

    pub fn new<O: PathOptions>(path: AlluxioPath, options: &O) -> Self {
        let body = options.to_payload();
        tracing::debug!(
            operation = %O::OPERATION,
            path = %path,
            fields = body.len(),
            "built path request"
        );
        Self {
            operation: O::OPERATION,
            path,
            query: Vec::new(),
            body,
        }
    }

    pub fn rename(src: AlluxioPath, dst: &AlluxioPath, options: &Rename) -> Self {
        Self::new(src, options).with_query("dst", dst.to_path_string())
    }

    /// Mount the under storage at `src` (e.g. `s3a://bucket/dir`) on `path`.
    pub fn mount(path: AlluxioPath, src: impl Into<String>, options: &Mount) -> Self {
        Self::new(path, options).with_query("src", src)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check that the query parameters the endpoint needs are present.
    pub fn validate(&self) -> AlxResult<()> {
        if let Some(key) = self.operation.required_query() {
            match self.query_value(key) {
                Some(value) if !value.is_empty() => {}
                _ => {
                    return Err(AlxError::InvalidOption {
                        operation: self.operation,
                        message: format!("missing query parameter {key}"),
                    })
                }
            }
        }
        Ok(())
    }

    pub fn url(&self, config: &ProxyConfig) -> String {
        format!(
            "{}/paths/{}/{}/",
            config.base_url(),
            to_url_path(&self.path),
            self.operation.action()
        )
    }

    /// Method, URL, query and body as one JSON document.
    pub fn describe(&self, config: &ProxyConfig) -> Value {
        let query: Payload = self
            .query
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        json!({
            "method": Self::METHOD,
            "url": self.url(config),
            "query": query,
            "body": self.body,
        })
    }
}

/// Absolute path with every segment percent-encoded
fn to_url_path(path: &AlluxioPath) -> String {
    let encoded: Vec<String> = path
        .segments
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("/{}", encoded.join("/"))
}
