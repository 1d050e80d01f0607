// SPDX-License-Identifier: AGPL-3.0-or-later
//! Operation options
//!
//! One option type per [`Operation`]. Every field is optional and tracked
//! with `Option`, so a field explicitly set to `false`, `0` or `""` is sent,
//! while a field left unset never appears in the payload.
//!
//! ```
//! use alx_core::options::{CreateFile, PathOptions};
//!
//! let options = CreateFile::new().recursive(true).ttl(3_600_000);
//! let payload = options.to_payload();
//! assert_eq!(payload.len(), 2);
//! assert_eq!(payload["ttl"], 3_600_000);
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::error::{AlxError, AlxResult};
use crate::payload::{FieldSpec, FieldValue, Payload};
use crate::wire::{LoadMetadataType, Mode, ReadType, TtlAction, WriteType};
use crate::Operation;

/// Options of one path operation
pub trait PathOptions:
    fmt::Debug + Clone + Default + PartialEq + DeserializeOwned + Send + Sync
{
    const OPERATION: Operation;

    /// Field name, payload key and kind of every declared field
    const FIELDS: &'static [FieldSpec];

    /// Payload holding only the fields that are set.
    fn to_payload(&self) -> Payload;

    /// Build options from snake_case field names.
    ///
    /// Keys outside [`Self::FIELDS`] are rejected with
    /// [`AlxError::UnknownOption`]; a `null` value leaves the field unset.
    fn from_config(config: &Payload) -> AlxResult<Self> {
        if let Some(option) = config
            .keys()
            .find(|key| !Self::FIELDS.iter().any(|field| field.name == key.as_str()))
        {
            return Err(AlxError::UnknownOption {
                operation: Self::OPERATION,
                option: option.clone(),
            });
        }

        let options = serde_json::from_value(Value::Object(config.clone())).map_err(|e| {
            AlxError::InvalidOption {
                operation: Self::OPERATION,
                message: e.to_string(),
            }
        })?;

        tracing::debug!(operation = %Self::OPERATION, fields = config.len(), "parsed options");
        Ok(options)
    }
}

macro_rules! path_options {
    (
        $(#[$meta:meta])*
        $name:ident => $operation:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $key:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }

        impl PathOptions for $name {
            const OPERATION: Operation = Operation::$operation;

            const FIELDS: &'static [FieldSpec] = &[
                $(
                    FieldSpec {
                        name: stringify!($field),
                        key: $key,
                        kind: <$ty as FieldValue>::KIND,
                        text: <$ty as FieldValue>::TEXT,
                    },
                )*
            ];

            #[allow(unused_mut)]
            fn to_payload(&self) -> Payload {
                let mut payload = Payload::new();
                $(
                    if let Some(value) = &self.$field {
                        payload.insert($key.to_string(), value.to_field_value());
                    }
                )*
                payload
            }
        }
    };
}

path_options! {
    /// Options for creating a directory
    CreateDirectory => CreateDirectory {
        /// Succeed when the directory already exists
        allow_exists: bool => "allowExists",
        mode: Mode => "mode",
        /// Create missing parent directories
        recursive: bool => "recursive",
        write_type: WriteType => "writeType",
    }
}

path_options! {
    /// Options for creating a file
    CreateFile => CreateFile {
        block_size_bytes: i64 => "blockSizeBytes",
        /// Class name of the worker location policy used for writes
        location_policy_class: String => "locationPolicyClass",
        mode: Mode => "mode",
        /// Create missing parent directories
        recursive: bool => "recursive",
        /// Milliseconds before the file expires; [`NO_TTL`](crate::wire::NO_TTL) disables it
        ttl: i64 => "ttl",
        ttl_action: TtlAction => "ttlAction",
        write_type: WriteType => "writeType",
    }
}

path_options! {
    /// Options for deleting a path
    Delete => Delete {
        /// Delete a directory together with its contents
        recursive: bool => "recursive",
    }
}

path_options! {
    /// Options for checking whether a path exists
    Exists => Exists {}
}

path_options! {
    /// Options for freeing a path from the cache
    Free => Free {
        /// Free a directory together with its contents
        recursive: bool => "recursive",
    }
}

path_options! {
    /// Options for fetching the status of a path
    GetStatus => GetStatus {}
}

path_options! {
    /// Options for listing a directory
    ListStatus => ListStatus {
        load_metadata_type: LoadMetadataType => "loadMetadataType",
    }
}

path_options! {
    /// Options for mounting an under storage at a path
    Mount => Mount {
        /// Under storage properties
        properties: HashMap<String, String> => "properties",
        read_only: bool => "readOnly",
        /// Visible to all users
        shared: bool => "shared",
    }
}

path_options! {
    /// Options for opening a file for reading
    OpenFile => OpenFile {
        /// Class name of the location policy used when caching the file
        cache_location_policy_class: String => "cacheLocationPolicyClass",
        /// Maximum concurrent under storage reads of one block on one worker
        max_ufs_read_concurrency: i32 => "maxUfsReadConcurrency",
        read_type: ReadType => "readType",
        /// Class name of the location policy used when reading from under storage
        ufs_read_location_policy_class: String => "ufsReadLocationPolicyClass",
    }
}

path_options! {
    /// Options for renaming a path
    Rename => Rename {}
}

path_options! {
    /// Options for changing the attributes of a path
    SetAttribute => SetAttribute {
        owner: String => "owner",
        group: String => "group",
        mode: Mode => "mode",
        /// Keep the path in memory
        pinned: bool => "pinned",
        /// Apply to everything under a directory
        recursive: bool => "recursive",
        /// Milliseconds before the path expires; [`NO_TTL`](crate::wire::NO_TTL) disables it
        ttl: i64 => "ttl",
        ttl_action: TtlAction => "ttlAction",
    }
}

path_options! {
    /// Options for unmounting a path
    Unmount => Unmount {}
}
