// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate-level error type.

use std::fmt;

/// Errors raised by schema lookup, tree traversal, and the wire layer.
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// A message type reached during encode or decode has no registry entry.
    UnregisteredType(String),
    /// A by-name message reference has no name-map entry.
    UnknownTypeName(String),

    // ========================================================================
    // Traversal Errors
    // ========================================================================
    /// Decode input lacks a key required by the target type's field list, or
    /// a value cannot reflectively produce a declared field.
    MissingField {
        /// Message type being decoded or encoded.
        message: String,
        /// Name of the absent field.
        field: String,
    },
    /// Value shape and descriptor shape disagree.
    TypeMismatch {
        /// Shape the descriptor called for.
        expected: String,
        /// Shape actually found.
        found: String,
    },

    // ========================================================================
    // Wire Errors
    // ========================================================================
    /// The wire text is not valid JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Schema
            Error::UnregisteredType(name) => write!(f, "Unregistered message type: {}", name),
            Error::UnknownTypeName(name) => write!(f, "Unknown type name: {}", name),
            // Traversal
            Error::MissingField { message, field } => {
                write!(f, "Missing field: {}.{}", message, field)
            }
            Error::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            // Wire
            Error::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Convenient alias for API results using the public `Error` type.
pub type Result<T> = core::result::Result<T, Error>;
