// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message reflection surface: runtime identity, field views, and construction.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Runtime identity of a message type.
///
/// Equality and hashing use the `TypeId` alone; the Rust type name rides
/// along for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Identity of a concrete type.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name (diagnostics only).
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A message value the engine can traverse.
///
/// Implementations expose their runtime identity and a reflective,
/// borrow-based read of each field; the field list itself lives in the
/// registry, so the traversal stays fully generic.
pub trait Message: Any + fmt::Debug {
    /// Runtime type identity, as used for registration.
    fn type_key(&self) -> TypeKey;

    /// Borrow one named field, or `None` if the type has no such field.
    fn field(&self, name: &str) -> Option<FieldView<'_>>;

    /// Consume the boxed value for downcasting to the concrete type.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Construction half of the reflection contract.
///
/// The registry captures `from_fields` at registration time; the decoder
/// invokes it with a table holding every declared field.
pub trait FromFields: Message + Sized {
    /// Construct a value from its decoded fields.
    fn from_fields(fields: FieldTable) -> Result<Self>;
}

/// Borrowed view of a field value, consumed by the encoder.
#[derive(Debug, Clone)]
pub enum FieldView<'a> {
    /// Absent value; encodes as JSON null under any descriptor.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    /// Nested message, traversed through its own registered shape.
    Message(&'a dyn Message),
    /// Array elements, each encoded against the element descriptor.
    List(Vec<FieldView<'a>>),
}

impl<'a> FieldView<'a> {
    /// View of a nested message.
    pub fn message(message: &'a dyn Message) -> Self {
        Self::Message(message)
    }

    /// View of a list built from element views.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = FieldView<'a>>,
    {
        Self::List(items.into_iter().collect())
    }

    /// Shape tag, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Message(_) => "message",
            Self::List(_) => "list",
        }
    }
}

impl From<bool> for FieldView<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FieldView<'_> {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for FieldView<'_> {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FieldView<'_> {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<'a> From<&'a str> for FieldView<'a> {
    fn from(v: &'a str) -> Self {
        Self::Str(v)
    }
}

impl<'a, T: Into<FieldView<'a>>> From<Option<T>> for FieldView<'a> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Owned field value, produced by the decoder.
#[derive(Debug)]
pub enum FieldValue {
    /// JSON null decoded under any descriptor.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Constructed nested message.
    Message(Box<dyn Message>),
    /// Decoded array elements, input order preserved.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Shape tag, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Message(_) => "message",
            Self::List(_) => "list",
        }
    }
}

/// Decoded fields of one message, keyed by field name.
///
/// Handed to [`FromFields::from_fields`]; every declared field is present
/// (the decoder rejects absent keys before construction).
#[derive(Debug)]
pub struct FieldTable {
    message: String,
    values: HashMap<String, FieldValue>,
}

impl FieldTable {
    /// Create an empty table for the named message type.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            values: HashMap::new(),
        }
    }

    /// Insert one decoded field.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Remove and convert one named field.
    pub fn take<T: FromField>(&mut self, name: &str) -> Result<T> {
        let value = self.values.remove(name).ok_or_else(|| Error::MissingField {
            message: self.message.clone(),
            field: name.to_string(),
        })?;
        T::from_field(value)
    }

    /// Number of fields still in the table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no fields remain.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Conversion from a decoded [`FieldValue`] into a concrete field type.
pub trait FromField: Sized {
    /// Convert, failing with `TypeMismatch` on shape conflict.
    fn from_field(value: FieldValue) -> Result<Self>;
}

macro_rules! impl_scalar_from_field {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl FromField for $ty {
            fn from_field(value: FieldValue) -> Result<Self> {
                match value {
                    FieldValue::$variant(v) => Ok(v),
                    other => Err(Error::TypeMismatch {
                        expected: $name.to_string(),
                        found: other.kind_name().to_string(),
                    }),
                }
            }
        }
    };
}

impl_scalar_from_field!(bool, Bool, "bool");
impl_scalar_from_field!(i64, Int, "int");
impl_scalar_from_field!(String, Str, "string");

// JSON does not distinguish 45 from 45.0, so float fields accept both.
impl FromField for f64 {
    fn from_field(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Float(v) => Ok(v),
            FieldValue::Int(v) => Ok(v as f64),
            other => Err(Error::TypeMismatch {
                expected: "float".to_string(),
                found: other.kind_name().to_string(),
            }),
        }
    }
}

impl<T: FromField> FromField for Option<T> {
    fn from_field(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Null => Ok(None),
            other => T::from_field(other).map(Some),
        }
    }
}

impl<T: FromField> FromField for Vec<T> {
    fn from_field(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::List(items) => items.into_iter().map(T::from_field).collect(),
            other => Err(Error::TypeMismatch {
                expected: "list".to_string(),
                found: other.kind_name().to_string(),
            }),
        }
    }
}

/// Implement [`FromField`] for a concrete message type, so it composes with
/// the `Option<T>` and `Vec<T>` conversions.
///
/// # Example
/// ```ignore
/// impl_message_field!(CellReading);
/// // ...enables fields.take::<Vec<Vec<CellReading>>>("cells")
/// ```
#[macro_export]
macro_rules! impl_message_field {
    ($ty:ty) => {
        impl $crate::FromField for $ty {
            fn from_field(value: $crate::FieldValue) -> $crate::Result<Self> {
                match value {
                    $crate::FieldValue::Message(message) => message
                        .into_any()
                        .downcast::<$ty>()
                        .map(|boxed| *boxed)
                        .map_err(|_| $crate::Error::TypeMismatch {
                            expected: ::std::any::type_name::<$ty>().to_string(),
                            found: "message".to_string(),
                        }),
                    other => Err($crate::Error::TypeMismatch {
                        expected: "message".to_string(),
                        found: other.kind_name().to_string(),
                    }),
                }
            }
        }
    };
}
