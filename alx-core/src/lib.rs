// SPDX-License-Identifier: AGPL-3.0-or-later
//! alx core
//!
//! Option types for the storage proxy's path operations, the payloads they
//! serialize to, and the request descriptors the HTTP layer sends.

pub mod config;
pub mod error;
pub mod operation;
pub mod options;
pub mod path;
pub mod payload;
pub mod request;
pub mod wire;

pub use config::ProxyConfig;
pub use error::{AlxError, AlxResult};
pub use operation::Operation;
pub use options::PathOptions;
pub use path::AlluxioPath;
pub use payload::{FieldKind, FieldSpec, Payload};
pub use request::PathRequest;
pub use wire::{Bits, LoadMetadataType, Mode, ReadType, ToPayload, TtlAction, WriteType, NO_TTL};
