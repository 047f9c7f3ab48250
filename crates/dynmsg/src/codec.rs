// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encode/decode between message values and the generic JSON tree.
//!
//! Both walkers are pure recursive traversals bounded by the descriptor's
//! structural depth. Null short-circuits every descriptor shape in both
//! directions; primitives pass through unchanged; messages recurse per
//! declared field; arrays map element-wise against the single element
//! descriptor.

use serde_json::{Map, Number, Value};

use crate::descriptor::{MessageRef, TypeKind};
use crate::error::{Error, Result};
use crate::message::{FieldTable, FieldValue, FieldView, Message, TypeKey};
use crate::registry::SchemaRegistry;

/// Encode a message against a descriptor built from its own runtime type.
pub fn encode_message(message: &dyn Message, registry: &SchemaRegistry) -> Result<Value> {
    let kind = TypeKind::Message(MessageRef::ByType(message.type_key()));
    Encoder { registry }.value(FieldView::Message(message), &kind)
}

/// Encode any field value against an explicit descriptor.
pub fn encode_value(
    value: FieldView<'_>,
    kind: &TypeKind,
    registry: &SchemaRegistry,
) -> Result<Value> {
    Encoder { registry }.value(value, kind)
}

/// Decode a tree node against an explicit descriptor.
pub fn decode_value(node: &Value, kind: &TypeKind, registry: &SchemaRegistry) -> Result<FieldValue> {
    Decoder { registry }.value(node, kind)
}

/// Decode a tree node into a concrete message type.
///
/// The node is decoded against a direct descriptor for `M`, so no name
/// resolution is involved at the top level. A JSON `null` node cannot
/// produce an `M` and is rejected as a type mismatch.
pub fn decode_message<M: Message>(node: &Value, registry: &SchemaRegistry) -> Result<M> {
    let kind = TypeKind::Message(MessageRef::ByType(TypeKey::of::<M>()));
    let decoded = Decoder { registry }.value(node, &kind)?;
    match decoded {
        FieldValue::Message(message) => message
            .into_any()
            .downcast::<M>()
            .map(|boxed| *boxed)
            .map_err(|_| Error::TypeMismatch {
                expected: TypeKey::of::<M>().type_name().to_string(),
                found: "message".to_string(),
            }),
        other => Err(Error::TypeMismatch {
            expected: "message".to_string(),
            found: other.kind_name().to_string(),
        }),
    }
}

fn mismatch(expected: &str, found: &str) -> Error {
    Error::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

fn json_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Tree encoder: walks a value against its descriptor.
struct Encoder<'a> {
    registry: &'a SchemaRegistry,
}

impl Encoder<'_> {
    fn value(&self, value: FieldView<'_>, kind: &TypeKind) -> Result<Value> {
        // Null short-circuits every descriptor shape.
        if matches!(value, FieldView::Null) {
            return Ok(Value::Null);
        }
        match kind {
            TypeKind::Primitive => self.primitive(value),
            TypeKind::Message(_) => match value {
                // Fields come from the value's own runtime type; the
                // descriptor's reference is not consulted for encoding.
                FieldView::Message(message) => self.message(message),
                other => Err(mismatch("message", other.kind_name())),
            },
            TypeKind::Array(element) => match value {
                FieldView::List(items) => items
                    .into_iter()
                    .map(|item| self.value(item, element))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
                other => Err(mismatch("array", other.kind_name())),
            },
        }
    }

    fn primitive(&self, value: FieldView<'_>) -> Result<Value> {
        match value {
            FieldView::Bool(v) => Ok(Value::Bool(v)),
            FieldView::Int(v) => Ok(Value::Number(v.into())),
            // JSON has no encoding for NaN or infinities.
            FieldView::Float(v) => Number::from_f64(v)
                .map(Value::Number)
                .ok_or_else(|| mismatch("finite number", "non-finite float")),
            FieldView::Str(v) => Ok(Value::String(v.to_string())),
            other => Err(mismatch("primitive", other.kind_name())),
        }
    }

    fn message(&self, message: &dyn Message) -> Result<Value> {
        let key = message.type_key();
        let fields = self.registry.fields_of(key)?;
        let mut object = Map::with_capacity(fields.len());
        for field in fields {
            let view = message.field(&field.name).ok_or_else(|| Error::MissingField {
                message: key.type_name().to_string(),
                field: field.name.clone(),
            })?;
            object.insert(field.name.clone(), self.value(view, &field.kind)?);
        }
        Ok(Value::Object(object))
    }
}

/// Tree decoder: rebuilds typed values, resolving by-name references and
/// invoking registered constructors.
struct Decoder<'a> {
    registry: &'a SchemaRegistry,
}

impl Decoder<'_> {
    fn value(&self, node: &Value, kind: &TypeKind) -> Result<FieldValue> {
        // JSON null decodes to a null field under any descriptor.
        if node.is_null() {
            return Ok(FieldValue::Null);
        }
        match kind {
            TypeKind::Primitive => self.primitive(node),
            TypeKind::Message(reference) => self.message(node, reference),
            TypeKind::Array(element) => match node {
                Value::Array(items) => items
                    .iter()
                    .map(|item| self.value(item, element))
                    .collect::<Result<Vec<_>>>()
                    .map(FieldValue::List),
                other => Err(mismatch("array", json_kind(other))),
            },
        }
    }

    fn primitive(&self, node: &Value) -> Result<FieldValue> {
        match node {
            Value::Bool(v) => Ok(FieldValue::Bool(*v)),
            // Integral numbers stay integral; everything else is a float.
            Value::Number(n) => match n.as_i64() {
                Some(v) => Ok(FieldValue::Int(v)),
                None => n
                    .as_f64()
                    .map(FieldValue::Float)
                    .ok_or_else(|| mismatch("number", "unrepresentable number")),
            },
            Value::String(s) => Ok(FieldValue::Str(s.clone())),
            other => Err(mismatch("primitive", json_kind(other))),
        }
    }

    fn message(&self, node: &Value, reference: &MessageRef) -> Result<FieldValue> {
        let key = self.registry.resolve(reference)?;
        let schema = self.registry.schema_of(key)?;
        let Value::Object(object) = node else {
            return Err(mismatch("object", json_kind(node)));
        };

        let mut table = FieldTable::new(schema.type_name());
        for field in schema.fields() {
            // An absent key is malformed input, not an implicit null.
            let child = object.get(&field.name).ok_or_else(|| Error::MissingField {
                message: schema.type_name().to_string(),
                field: field.name.clone(),
            })?;
            table.insert(field.name.clone(), self.value(child, &field.kind)?);
        }
        // Keys beyond the declared field list are ignored.
        schema.construct(table).map(FieldValue::Message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::testutil::{probe_registry, Probe};

    #[test]
    fn test_null_short_circuits_every_shape() {
        let registry = SchemaRegistry::new();
        let shapes = [
            TypeKind::Primitive,
            TypeKind::message_named("Anything"),
            TypeKind::array(TypeKind::Primitive),
        ];

        for kind in &shapes {
            let encoded = encode_value(FieldView::Null, kind, &registry).expect("encode");
            assert_eq!(encoded, Value::Null);

            let decoded = decode_value(&Value::Null, kind, &registry).expect("decode");
            assert!(decoded.is_null());
        }
    }

    #[test]
    fn test_primitive_passthrough() {
        let registry = SchemaRegistry::new();

        let encoded =
            encode_value(FieldView::Int(45), &TypeKind::Primitive, &registry).expect("encode");
        assert_eq!(encoded, json!(45));

        let encoded =
            encode_value(FieldView::Str("on"), &TypeKind::Primitive, &registry).expect("encode");
        assert_eq!(encoded, json!("on"));

        let decoded = decode_value(&json!(4.5), &TypeKind::Primitive, &registry).expect("decode");
        assert_eq!(decoded.as_f64(), Some(4.5));

        let decoded = decode_value(&json!(45), &TypeKind::Primitive, &registry).expect("decode");
        assert_eq!(decoded.as_i64(), Some(45));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let registry = SchemaRegistry::new();
        let err = encode_value(FieldView::Float(f64::NAN), &TypeKind::Primitive, &registry)
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_shape_conflicts_rejected() {
        let registry = SchemaRegistry::new();

        // List under a primitive descriptor.
        let err = encode_value(
            FieldView::List(vec![]),
            &TypeKind::Primitive,
            &registry,
        )
        .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        // Object under a primitive descriptor.
        let err = decode_value(&json!({}), &TypeKind::Primitive, &registry).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        // Scalar under an array descriptor.
        let err =
            decode_value(&json!(1), &TypeKind::array(TypeKind::Primitive), &registry).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_array_preserves_order_and_length() {
        let registry = SchemaRegistry::new();
        let kind = TypeKind::array(TypeKind::Primitive);

        let items = FieldView::List(vec![
            FieldView::Int(3),
            FieldView::Int(1),
            FieldView::Int(2),
        ]);
        let encoded = encode_value(items, &kind, &registry).expect("encode");
        assert_eq!(encoded, json!([3, 1, 2]));

        let decoded = decode_value(&encoded, &kind, &registry).expect("decode");
        let list = decoded.as_list().expect("list");
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].as_i64(), Some(3));
        assert_eq!(list[2].as_i64(), Some(2));
    }

    #[test]
    fn test_message_tree_round_trip() {
        let registry = probe_registry();
        let probe = Probe { level: 9 };

        let tree = encode_message(&probe, &registry).expect("encode");
        assert_eq!(tree, json!({ "level": 9 }));

        let back: Probe = decode_message(&tree, &registry).expect("decode");
        assert_eq!(back, probe);
    }

    #[test]
    fn test_missing_field_rejected() {
        let registry = probe_registry();
        let err = decode_message::<Probe>(&json!({}), &registry).unwrap_err();
        assert!(matches!(err, Error::MissingField { field, .. } if field == "level"));
    }

    #[test]
    fn test_encode_requires_registered_runtime_type() {
        let registry = SchemaRegistry::new();
        let probe = Probe { level: 1 };
        let err = encode_message(&probe, &registry).unwrap_err();
        assert!(matches!(err, Error::UnregisteredType(_)));
    }
}
