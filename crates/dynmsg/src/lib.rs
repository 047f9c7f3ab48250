// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dynmsg - Reflection-based message serialization
//!
//! Runtime type descriptors drive a generic traversal that converts typed
//! message values to and from a JSON tree, and onward to and from wire text,
//! without hand-written per-type marshalling code. A schema registry maps
//! message type identities to their ordered field descriptors and resolves
//! by-name message references to concrete constructors at decode time.
//!
//! ## Quick Start
//!
//! ```rust
//! use dynmsg::{FieldsBuilder, SchemaRegistry};
//! # use dynmsg::{FieldTable, FieldView, FromFields, Message, Result, TypeKey};
//! # use std::any::Any;
//! # #[derive(Debug, Clone, PartialEq)]
//! # struct Reading { id: i64, note: Option<String> }
//! # impl Message for Reading {
//! #     fn type_key(&self) -> TypeKey { TypeKey::of::<Self>() }
//! #     fn field(&self, name: &str) -> Option<FieldView<'_>> {
//! #         match name {
//! #             "id" => Some(FieldView::Int(self.id)),
//! #             "note" => Some(self.note.as_deref().into()),
//! #             _ => None,
//! #         }
//! #     }
//! #     fn into_any(self: Box<Self>) -> Box<dyn Any> { self }
//! # }
//! # impl FromFields for Reading {
//! #     fn from_fields(mut fields: FieldTable) -> Result<Self> {
//! #         Ok(Self { id: fields.take("id")?, note: fields.take("note")? })
//! #     }
//! # }
//! # fn main() -> dynmsg::Result<()> {
//! let mut registry = SchemaRegistry::new();
//! registry.register::<Reading>(
//!     FieldsBuilder::new().primitive("id").primitive("note").build(),
//! );
//!
//! let reading = Reading { id: 7, note: None };
//! let text = dynmsg::pack(&reading, &registry)?;
//! assert_eq!(text, r#"{"id":7,"note":null}"#);
//!
//! let back: Reading = dynmsg::unpack(&text, &registry)?;
//! assert_eq!(back, reading);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! typed value --(codec::encode)--> JSON tree --(wire::pack)--> text
//! typed value <--(codec::decode)-- JSON tree <--(wire::unpack)-- text
//!                       ^
//!                       | field lists, name resolution, constructors
//!                 SchemaRegistry
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeKind`] | Recursive descriptor: primitive, message, or array |
//! | [`FieldDescriptor`] | Field name paired with its descriptor |
//! | [`SchemaRegistry`] | Message shapes plus the wire-name map |
//! | [`Message`] | Reflective read surface of a typed value |
//! | [`FromFields`] | Construction from decoded fields |
//!
//! The registry is plain owned state: populate it during startup
//! (`&mut self`), then share it by reference into every encode/decode call.
//! A populated registry is `Sync`, so concurrent readers need no locking.

/// Encode/decode between message values and the generic JSON tree.
pub mod codec;
/// Runtime type descriptors and the field-list builder.
pub mod descriptor;
/// Crate-level error type.
pub mod error;
/// Message reflection surface: identity, field views, construction.
pub mod message;
/// Schema registry: message shapes and name resolution.
pub mod registry;
/// Wire adapter: JSON text entry points.
pub mod wire;

#[cfg(test)]
mod testutil;

pub use codec::{decode_message, decode_value, encode_message, encode_value};
pub use descriptor::{FieldDescriptor, FieldsBuilder, MessageRef, TypeKind};
pub use error::{Error, Result};
pub use message::{FieldTable, FieldValue, FieldView, FromField, FromFields, Message, TypeKey};
pub use registry::{MessageSchema, SchemaRegistry};
pub use wire::{pack, pack_pretty, unpack};
