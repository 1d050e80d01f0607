// SPDX-License-Identifier: AGPL-3.0-or-later
//! Request payloads and the field schema that produces them

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::wire::{LoadMetadataType, Mode, ReadType, ToPayload, TtlAction, WriteType};

/// JSON object sent as the body of a proxy request
pub type Payload = serde_json::Map<String, Value>;

/// How a field's value is carried into the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Copied verbatim
    Primitive,
    /// Replaced by the value's own payload
    Nested,
    /// String to string mapping, copied verbatim
    Mapping,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Primitive => "primitive",
            FieldKind::Nested => "nested",
            FieldKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// One row of an option type's schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Name accepted at construction
    pub name: &'static str,
    /// Key written to the payload
    pub key: &'static str,
    pub kind: FieldKind,
    /// Takes free text, so raw command-line values must not be read as JSON
    pub text: bool,
}

/// A value that can sit in an option field.
pub trait FieldValue {
    const KIND: FieldKind;
    const TEXT: bool = false;

    fn to_field_value(&self) -> Value;
}

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Primitive;

    fn to_field_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for i32 {
    const KIND: FieldKind = FieldKind::Primitive;

    fn to_field_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for i64 {
    const KIND: FieldKind = FieldKind::Primitive;

    fn to_field_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::Primitive;
    const TEXT: bool = true;

    fn to_field_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for HashMap<String, String> {
    const KIND: FieldKind = FieldKind::Mapping;

    fn to_field_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

macro_rules! nested_field {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Nested;

                fn to_field_value(&self) -> Value {
                    self.to_payload()
                }
            }
        )+
    };
}

nested_field!(Mode, WriteType, ReadType, TtlAction, LoadMetadataType);
