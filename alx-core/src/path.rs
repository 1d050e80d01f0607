// SPDX-License-Identifier: AGPL-3.0-or-later
//! Paths in the storage namespace

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AlxError, AlxResult};

const URI_SCHEME: &str = "alluxio://";

/// Absolute, normalized path, optionally tied to a master authority
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlluxioPath {
    /// `host:port` of the master, when parsed from a URI
    pub authority: Option<String>,
    /// Path segments
    pub segments: Vec<String>,
}

impl AlluxioPath {
    pub fn new(path: impl AsRef<str>) -> AlxResult<Self> {
        let path = path.as_ref();
        if path.is_empty() || path.contains('\0') {
            return Err(AlxError::InvalidPath(path.escape_debug().to_string()));
        }
        Ok(Self::root().join(path))
    }

    pub fn root() -> Self {
        Self {
            authority: None,
            segments: Vec::new(),
        }
    }

    fn with_segments(&self, segments: Vec<String>) -> Self {
        Self {
            authority: self.authority.clone(),
            segments,
        }
    }

    /// Parse `alluxio://host:port/path` or a plain absolute path.
    pub fn parse_uri(uri: &str) -> AlxResult<Self> {
        let Some(rest) = uri.strip_prefix(URI_SCHEME) else {
            return Self::new(uri);
        };
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let mut parsed = if path.is_empty() { Self::root() } else { Self::new(path)? };
        if !authority.is_empty() {
            parsed.authority = Some(authority.to_string());
        }
        Ok(parsed)
    }

    /// Resolve `name` against this path; `.` is skipped and `..` never
    /// climbs above the root.
    pub fn join(&self, name: impl AsRef<str>) -> Self {
        let segments = name
            .as_ref()
            .split('/')
            .fold(self.segments.clone(), push_segment);
        self.with_segments(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, ancestors) = self.segments.split_last()?;
        Some(self.with_segments(ancestors.to_vec()))
    }

    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Number of segments below the root
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.depth() == 0
    }

    pub fn to_path_string(&self) -> String {
        match self.segments.as_slice() {
            [] => String::from("/"),
            segments => segments.iter().fold(String::new(), |mut out, segment| {
                out.push('/');
                out.push_str(segment);
                out
            }),
        }
    }

    pub fn to_uri(&self) -> String {
        match &self.authority {
            Some(authority) => format!("{URI_SCHEME}{authority}{}", self.to_path_string()),
            None => self.to_path_string(),
        }
    }
}

fn push_segment(mut segments: Vec<String>, part: &str) -> Vec<String> {
    match part {
        "" | "." => {}
        ".." => {
            segments.pop();
        }
        _ => segments.push(part.to_owned()),
    }
    segments
}

impl FromStr for AlluxioPath {
    type Err = AlxError;

    fn from_str(s: &str) -> AlxResult<Self> {
        Self::parse_uri(s)
    }
}

impl fmt::Display for AlluxioPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uri())
    }
}
