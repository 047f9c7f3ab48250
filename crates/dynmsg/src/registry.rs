// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema registry: message shapes and name resolution.

use std::collections::HashMap;

use crate::descriptor::{FieldDescriptor, MessageRef};
use crate::error::{Error, Result};
use crate::message::{FieldTable, FromFields, Message, TypeKey};

/// Type-erased constructor stored per registered message type.
type ConstructFn = fn(FieldTable) -> Result<Box<dyn Message>>;

fn construct_erased<M: FromFields>(fields: FieldTable) -> Result<Box<dyn Message>> {
    M::from_fields(fields).map(|message| Box::new(message) as Box<dyn Message>)
}

/// Registered shape of one message type: its ordered field descriptors plus
/// the constructor the decoder invokes.
#[derive(Debug)]
pub struct MessageSchema {
    type_key: TypeKey,
    fields: Vec<FieldDescriptor>,
    construct: ConstructFn,
}

impl MessageSchema {
    /// Identity of the registered type.
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Rust type name (diagnostics only).
    pub fn type_name(&self) -> &'static str {
        self.type_key.type_name()
    }

    /// Ordered field descriptors.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub(crate) fn construct(&self, fields: FieldTable) -> Result<Box<dyn Message>> {
        (self.construct)(fields)
    }
}

/// Message-shape and name registry.
///
/// Populated during schema setup (all writers take `&mut self`), then shared
/// read-only into every encode/decode call. A populated registry is `Sync`,
/// so concurrent readers need no locking; write-before-read is a borrow-check
/// contract here rather than a runtime discipline.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<TypeKey, MessageSchema>,
    names: HashMap<String, TypeKey>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `M`'s ordered field list and capture its constructor.
    ///
    /// Registering the same type again replaces the previous shape (last
    /// write wins; only meaningful during schema setup).
    pub fn register<M: FromFields>(&mut self, fields: Vec<FieldDescriptor>) {
        let key = TypeKey::of::<M>();
        let schema = MessageSchema {
            type_key: key,
            fields,
            construct: construct_erased::<M>,
        };
        if self.schemas.insert(key, schema).is_some() {
            log::debug!("[registry] re-registered {}, shape replaced", key);
        } else {
            log::debug!("[registry] registered {}", key);
        }
    }

    /// Map a wire-visible name to a type identity for by-name references.
    pub fn register_name(&mut self, name: impl Into<String>, key: TypeKey) {
        self.names.insert(name.into(), key);
    }

    /// Register shape and name in one call.
    pub fn register_named<M: FromFields>(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) {
        self.register::<M>(fields);
        self.register_name(name, TypeKey::of::<M>());
    }

    /// Resolve a message reference to a concrete type identity.
    ///
    /// Direct references pass through unchanged; names go through the name
    /// map and fail with [`Error::UnknownTypeName`] when absent.
    pub fn resolve(&self, reference: &MessageRef) -> Result<TypeKey> {
        match reference {
            MessageRef::ByType(key) => Ok(*key),
            MessageRef::ByName(name) => self.names.get(name).copied().ok_or_else(|| {
                log::warn!("[registry] unknown type name {:?}", name);
                Error::UnknownTypeName(name.clone())
            }),
        }
    }

    /// Ordered field descriptors of a registered type.
    pub fn fields_of(&self, key: TypeKey) -> Result<&[FieldDescriptor]> {
        self.schema_of(key).map(MessageSchema::fields)
    }

    /// Full schema (fields + constructor) of a registered type.
    pub fn schema_of(&self, key: TypeKey) -> Result<&MessageSchema> {
        self.schemas
            .get(&key)
            .ok_or_else(|| Error::UnregisteredType(key.type_name().to_string()))
    }

    /// Number of registered message types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
