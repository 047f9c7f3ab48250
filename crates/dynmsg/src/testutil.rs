// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared unit-test fixtures.

use std::any::Any;

use crate::descriptor::{FieldDescriptor, FieldsBuilder};
use crate::error::Result;
use crate::message::{FieldTable, FieldView, FromFields, Message, TypeKey};
use crate::registry::SchemaRegistry;

/// Single-scalar message used across registry, codec, and wire tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub level: i64,
}

impl Message for Probe {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }

    fn field(&self, name: &str) -> Option<FieldView<'_>> {
        match name {
            "level" => Some(FieldView::Int(self.level)),
            _ => None,
        }
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl FromFields for Probe {
    fn from_fields(mut fields: FieldTable) -> Result<Self> {
        Ok(Self {
            level: fields.take("level")?,
        })
    }
}

crate::impl_message_field!(Probe);

pub fn probe_fields() -> Vec<FieldDescriptor> {
    FieldsBuilder::new().primitive("level").build()
}

pub fn probe_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry.register_named::<Probe>("Probe", probe_fields());
    registry
}
