// SPDX-License-Identifier: AGPL-3.0-or-later
//! Filesystem operations exposed by the proxy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AlxError, AlxResult};
use crate::options::*;
use crate::payload::FieldSpec;

/// A path operation; each has its own option type in [`crate::options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    CreateDirectory,
    CreateFile,
    Delete,
    Exists,
    Free,
    GetStatus,
    ListStatus,
    Mount,
    OpenFile,
    Rename,
    SetAttribute,
    Unmount,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::CreateDirectory,
        Operation::CreateFile,
        Operation::Delete,
        Operation::Exists,
        Operation::Free,
        Operation::GetStatus,
        Operation::ListStatus,
        Operation::Mount,
        Operation::OpenFile,
        Operation::Rename,
        Operation::SetAttribute,
        Operation::Unmount,
    ];

    /// Action segment of the REST endpoint
    pub fn action(&self) -> &'static str {
        match self {
            Operation::CreateDirectory => "create-directory",
            Operation::CreateFile => "create-file",
            Operation::Delete => "delete",
            Operation::Exists => "exists",
            Operation::Free => "free",
            Operation::GetStatus => "get-status",
            Operation::ListStatus => "list-status",
            Operation::Mount => "mount",
            Operation::OpenFile => "open-file",
            Operation::Rename => "rename",
            Operation::SetAttribute => "set-attribute",
            Operation::Unmount => "unmount",
        }
    }

    /// Query parameter the endpoint requires besides the body
    pub fn required_query(&self) -> Option<&'static str> {
        match self {
            Operation::Rename => Some("dst"),
            Operation::Mount => Some("src"),
            _ => None,
        }
    }

    /// Schema of the operation's option type
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Operation::CreateDirectory => CreateDirectory::FIELDS,
            Operation::CreateFile => CreateFile::FIELDS,
            Operation::Delete => Delete::FIELDS,
            Operation::Exists => Exists::FIELDS,
            Operation::Free => Free::FIELDS,
            Operation::GetStatus => GetStatus::FIELDS,
            Operation::ListStatus => ListStatus::FIELDS,
            Operation::Mount => Mount::FIELDS,
            Operation::OpenFile => OpenFile::FIELDS,
            Operation::Rename => Rename::FIELDS,
            Operation::SetAttribute => SetAttribute::FIELDS,
            Operation::Unmount => Unmount::FIELDS,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

impl FromStr for Operation {
    type Err = AlxError;

    fn from_str(s: &str) -> AlxResult<Self> {
        let wanted = s.trim().replace('_', "-").to_ascii_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.action() == wanted)
            .ok_or_else(|| AlxError::UnknownOperation(s.to_string()))
    }
}
