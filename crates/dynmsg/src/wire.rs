// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire adapter: JSON text on top of the tree codec.

use serde_json::Value;

use crate::codec::{decode_message, encode_message};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::registry::SchemaRegistry;

/// Serialize a message to compact JSON text.
///
/// The message is encoded against a descriptor built from its own runtime
/// type; object keys follow field-declaration order.
pub fn pack(message: &dyn Message, registry: &SchemaRegistry) -> Result<String> {
    let tree = encode_message(message, registry)?;
    serde_json::to_string(&tree).map_err(Error::Parse)
}

/// Serialize a message to human-readable JSON text.
pub fn pack_pretty(message: &dyn Message, registry: &SchemaRegistry) -> Result<String> {
    let tree = encode_message(message, registry)?;
    serde_json::to_string_pretty(&tree).map_err(Error::Parse)
}

/// Parse JSON text and decode it into a concrete message type.
///
/// Malformed text fails with [`Error::Parse`]; decode failures inside
/// propagate unchanged.
pub fn unpack<M: Message>(text: &str, registry: &SchemaRegistry) -> Result<M> {
    let tree: Value = serde_json::from_str(text).map_err(|e| {
        log::debug!("[wire] unpack rejected malformed input: {}", e);
        Error::Parse(e)
    })?;
    decode_message(&tree, registry)
}
