// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime message shapes.

use crate::message::{Message, TypeKey};

/// Reference to a message type inside a descriptor.
///
/// `ByName` references are resolved through the registry's name map at decode
/// time, so a shape may reference a type whose name is registered later
/// (forward references across message types are allowed).
#[derive(Debug, Clone, PartialEq)]
pub enum MessageRef {
    /// Resolved concrete type identity.
    ByType(TypeKey),
    /// Registered name, resolved lazily.
    ByName(String),
}

/// Shape of one piece of data: scalar leaf, nested message, or array.
///
/// Descriptor graphs are finite trees terminating at [`Primitive`] leaves;
/// nesting depth is unbounded (array-of-array-of-message is a valid shape).
///
/// [`Primitive`]: TypeKind::Primitive
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Leaf scalar; the value passes through unchanged.
    Primitive,
    /// Nested message, by type or by registered name.
    Message(MessageRef),
    /// Homogeneous array; the element descriptor applies to every element.
    Array(Box<TypeKind>),
}

impl TypeKind {
    /// Message descriptor with a resolved type reference.
    pub fn message<M: Message>() -> Self {
        Self::Message(MessageRef::ByType(TypeKey::of::<M>()))
    }

    /// Message descriptor referenced by registered name.
    pub fn message_named(type_name: impl Into<String>) -> Self {
        Self::Message(MessageRef::ByName(type_name.into()))
    }

    /// Array descriptor over an element shape.
    pub fn array(element: TypeKind) -> Self {
        Self::Array(Box::new(element))
    }

    /// Check if this is a primitive descriptor.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive)
    }

    /// Check if this is a message descriptor.
    pub fn is_message(&self) -> bool {
        matches!(self, Self::Message(_))
    }

    /// Check if this is an array descriptor.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

/// One named field of a message shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, as it appears in the wire object.
    pub name: String,
    /// Field shape.
    pub kind: TypeKind,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Fluent builder for a message type's ordered field list.
///
/// Declaration order is preserved; it drives emission order on encode.
#[derive(Debug, Default)]
pub struct FieldsBuilder {
    fields: Vec<FieldDescriptor>,
}

impl FieldsBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar field.
    pub fn primitive(self, name: impl Into<String>) -> Self {
        self.field(name, TypeKind::Primitive)
    }

    /// Add a nested message field with a resolved type reference.
    pub fn message<M: Message>(self, name: impl Into<String>) -> Self {
        self.field(name, TypeKind::message::<M>())
    }

    /// Add a nested message field referenced by registered name.
    pub fn message_named(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.field(name, TypeKind::message_named(type_name))
    }

    /// Add an array field over an element shape.
    pub fn array(self, name: impl Into<String>, element: TypeKind) -> Self {
        self.field(name, TypeKind::array(element))
    }

    /// Add a field with an explicit shape.
    pub fn field(mut self, name: impl Into<String>, kind: TypeKind) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }

    /// Finish, yielding the ordered field list.
    pub fn build(self) -> Vec<FieldDescriptor> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_declaration_order() {
        let fields = FieldsBuilder::new()
            .primitive("id")
            .primitive("label")
            .array("tags", TypeKind::Primitive)
            .build();

        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "label", "tags"]);
        assert!(fields[0].kind.is_primitive());
        assert!(fields[2].kind.is_array());
    }

    #[test]
    fn test_nested_array_shape() {
        let kind = TypeKind::array(TypeKind::array(TypeKind::message_named("Cell")));

        let TypeKind::Array(outer) = &kind else {
            panic!("expected array");
        };
        let TypeKind::Array(inner) = outer.as_ref() else {
            panic!("expected inner array");
        };
        assert_eq!(
            inner.as_ref(),
            &TypeKind::Message(MessageRef::ByName("Cell".to_string()))
        );
    }

    #[test]
    fn test_by_name_needs_no_prior_registration() {
        // Constructing a forward reference is always allowed; resolution is
        // deferred to decode time.
        let kind = TypeKind::message_named("NotRegisteredYet");
        assert!(kind.is_message());
    }
}
