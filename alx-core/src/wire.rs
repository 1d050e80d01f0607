// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wire values embedded in option payloads
//!
//! These are the enumerations and value objects the proxy understands
//! (access modes, write and read types, TTL actions, metadata loading).
//! Each one knows how to render itself through [`ToPayload`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{AlxError, AlxResult};

/// TTL value meaning "no TTL set", in milliseconds.
pub const NO_TTL: i64 = -1;

/// A value with its own payload representation.
pub trait ToPayload {
    fn to_payload(&self) -> Value;
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AlxError;

            fn from_str(s: &str) -> AlxResult<Self> {
                $name::VARIANTS
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| AlxError::InvalidValue { kind: $kind, value: s.to_string() })
            }
        }

        impl ToPayload for $name {
            fn to_payload(&self) -> Value {
                Value::String(self.as_str().to_string())
            }
        }
    };
}

wire_enum! {
    /// Permission bits for one class of users (owner, group or other)
    Bits ("bits") {
        None => "NONE",
        Execute => "EXECUTE",
        Write => "WRITE",
        WriteExecute => "WRITE_EXECUTE",
        Read => "READ",
        ReadExecute => "READ_EXECUTE",
        ReadWrite => "READ_WRITE",
        All => "ALL",
    }
}

impl Bits {
    /// Bits for a single octal digit (`0..=7`).
    pub fn from_octal_digit(digit: u32) -> Option<Self> {
        Self::VARIANTS.get(digit as usize).copied()
    }

    pub fn to_octal_digit(self) -> u32 {
        match self {
            Bits::None => 0,
            Bits::Execute => 1,
            Bits::Write => 2,
            Bits::WriteExecute => 3,
            Bits::Read => 4,
            Bits::ReadExecute => 5,
            Bits::ReadWrite => 6,
            Bits::All => 7,
        }
    }

    pub fn is_readable(self) -> bool {
        self.to_octal_digit() & 0o4 != 0
    }

    pub fn is_writable(self) -> bool {
        self.to_octal_digit() & 0o2 != 0
    }

    pub fn is_executable(self) -> bool {
        self.to_octal_digit() & 0o1 != 0
    }
}

wire_enum! {
    /// Where a write lands: cache only, cache and under storage, or under storage only
    WriteType ("write type") {
        MustCache => "MUST_CACHE",
        CacheThrough => "CACHE_THROUGH",
        Through => "THROUGH",
        AsyncThrough => "ASYNC_THROUGH",
    }
}

wire_enum! {
    /// Whether data read through the proxy gets cached
    ReadType ("read type") {
        NoCache => "NO_CACHE",
        Cache => "CACHE",
        CachePromote => "CACHE_PROMOTE",
    }
}

wire_enum! {
    /// Action taken when a path's TTL expires
    TtlAction ("TTL action") {
        Delete => "DELETE",
        Free => "FREE",
    }
}

wire_enum! {
    /// When to load metadata from under storage while listing
    LoadMetadataType ("load metadata type") {
        Never => "Never",
        Once => "Once",
        Always => "Always",
    }
}

/// Access mode of a path
///
/// Deserializes from an octal string (`"755"`, `"0755"`, `"0o755"`),
/// a raw numeric mode (`493`), or the object form the proxy uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ModeRepr")]
pub struct Mode {
    pub owner_bits: Bits,
    pub group_bits: Bits,
    pub other_bits: Bits,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeRepr {
    Octal(String),
    Numeric(u32),
    Object {
        #[serde(rename = "ownerBits", alias = "owner_bits")]
        owner_bits: Bits,
        #[serde(rename = "groupBits", alias = "group_bits")]
        group_bits: Bits,
        #[serde(rename = "otherBits", alias = "other_bits")]
        other_bits: Bits,
    },
}

impl TryFrom<ModeRepr> for Mode {
    type Error = AlxError;

    fn try_from(repr: ModeRepr) -> AlxResult<Self> {
        match repr {
            ModeRepr::Octal(s) => s.parse(),
            ModeRepr::Numeric(bits) => Mode::from_bits(bits),
            ModeRepr::Object { owner_bits, group_bits, other_bits } => {
                Ok(Mode::new(owner_bits, group_bits, other_bits))
            }
        }
    }
}

impl Mode {
    pub fn new(owner_bits: Bits, group_bits: Bits, other_bits: Bits) -> Self {
        Self { owner_bits, group_bits, other_bits }
    }

    /// Mode from numeric permission bits, e.g. `0o755`.
    pub fn from_bits(bits: u32) -> AlxResult<Self> {
        if bits > 0o777 {
            return Err(AlxError::InvalidMode(format!("{bits:o} exceeds 777")));
        }
        let digit = |shift: u32| Bits::from_octal_digit((bits >> shift) & 0o7);
        match (digit(6), digit(3), digit(0)) {
            (Some(owner), Some(group), Some(other)) => Ok(Self::new(owner, group, other)),
            _ => Err(AlxError::InvalidMode(format!("{bits:o}"))),
        }
    }

    pub fn bits(&self) -> u32 {
        (self.owner_bits.to_octal_digit() << 6)
            | (self.group_bits.to_octal_digit() << 3)
            | self.other_bits.to_octal_digit()
    }
}

impl FromStr for Mode {
    type Err = AlxError;

    fn from_str(s: &str) -> AlxResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);
        let octal = digits.bytes().all(|b| matches!(b, b'0'..=b'7'));
        if !octal || digits.is_empty() || digits.len() > 4 {
            return Err(AlxError::InvalidMode(s.to_string()));
        }
        let bits = u32::from_str_radix(digits, 8).map_err(|_| AlxError::InvalidMode(s.to_string()))?;
        Self::from_bits(bits)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.bits())
    }
}

impl ToPayload for Mode {
    fn to_payload(&self) -> Value {
        json!({
            "ownerBits": self.owner_bits.to_payload(),
            "groupBits": self.group_bits.to_payload(),
            "otherBits": self.other_bits.to_payload(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_octal_digits() {
        for digit in 0..8 {
            let bits = Bits::from_octal_digit(digit).unwrap();
            assert_eq!(bits.to_octal_digit(), digit);
        }
        assert!(Bits::from_octal_digit(8).is_none());

        assert!(Bits::ReadExecute.is_readable());
        assert!(Bits::ReadExecute.is_executable());
        assert!(!Bits::ReadExecute.is_writable());
    }

    #[test]
    fn test_mode_from_str() {
        let mode: Mode = "755".parse().unwrap();
        assert_eq!(mode, Mode::new(Bits::All, Bits::ReadExecute, Bits::ReadExecute));
        assert_eq!("0755".parse::<Mode>().unwrap(), mode);
        assert_eq!("0o755".parse::<Mode>().unwrap(), mode);
        assert_eq!(mode.bits(), 0o755);
        assert_eq!(mode.to_string(), "0755");
    }

    #[test]
    fn test_mode_rejects_invalid() {
        assert!(matches!("".parse::<Mode>(), Err(AlxError::InvalidMode(_))));
        assert!(matches!("789".parse::<Mode>(), Err(AlxError::InvalidMode(_))));
        assert!(matches!("rwx".parse::<Mode>(), Err(AlxError::InvalidMode(_))));
        assert!(matches!("1777".parse::<Mode>(), Err(AlxError::InvalidMode(_))));
        assert!(matches!("+755".parse::<Mode>(), Err(AlxError::InvalidMode(_))));
        assert!(matches!("0o+75".parse::<Mode>(), Err(AlxError::InvalidMode(_))));
        assert!(serde_json::from_value::<Mode>(json!("+644")).is_err());
        assert!(Mode::from_bits(0o1000).is_err());
    }

    #[test]
    fn test_mode_payload() {
        let mode = Mode::from_bits(0o640).unwrap();
        assert_eq!(
            mode.to_payload(),
            json!({"ownerBits": "READ_WRITE", "groupBits": "READ", "otherBits": "NONE"})
        );
    }

    #[test]
    fn test_mode_deserialize_forms() {
        let expected = Mode::from_bits(0o750).unwrap();

        let from_octal: Mode = serde_json::from_value(json!("0750")).unwrap();
        let from_number: Mode = serde_json::from_value(json!(0o750)).unwrap();
        let from_object: Mode = serde_json::from_value(json!({
            "ownerBits": "ALL",
            "groupBits": "READ_EXECUTE",
            "otherBits": "NONE"
        }))
        .unwrap();

        assert_eq!(from_octal, expected);
        assert_eq!(from_number, expected);
        assert_eq!(from_object, expected);
        assert!(serde_json::from_value::<Mode>(json!(1024)).is_err());
    }

    #[test]
    fn test_enum_payloads() {
        assert_eq!(WriteType::CacheThrough.to_payload(), json!("CACHE_THROUGH"));
        assert_eq!(ReadType::NoCache.to_payload(), json!("NO_CACHE"));
        assert_eq!(TtlAction::Free.to_payload(), json!("FREE"));
        assert_eq!(LoadMetadataType::Once.to_payload(), json!("Once"));
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!("must_cache".parse::<WriteType>().unwrap(), WriteType::MustCache);
        assert_eq!("ALWAYS".parse::<LoadMetadataType>().unwrap(), LoadMetadataType::Always);

        let err = "EVICT".parse::<TtlAction>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid TTL action: EVICT");
    }

    #[test]
    fn test_enum_deserialize_uses_wire_names() {
        let write_type: WriteType = serde_json::from_value(json!("ASYNC_THROUGH")).unwrap();
        assert_eq!(write_type, WriteType::AsyncThrough);
        assert!(serde_json::from_value::<WriteType>(json!("AsyncThrough")).is_err());
    }
}
