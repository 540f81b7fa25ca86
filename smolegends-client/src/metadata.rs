// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MetadataError;

/// Prefix of the embedded metadata URIs reported by the contract.
pub const DATA_URI_PREFIX: &str = "data:application/json;base64,";

/// Decoded metadata of a minted token.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TokenMetadata {
    /// Locator of the token's image.
    pub image: String,
}

/// Decodes the `data:application/json;base64,` URI reported by the contract
/// into the token metadata.
pub fn decode_token_metadata(uri: &str) -> Result<TokenMetadata, MetadataError> {
    let payload = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or(MetadataError::NotADataUri)?;
    let raw = STANDARD.decode(payload)?;
    let value: Value = serde_json::from_slice(&raw)?;
    let image = value
        .get("image")
        .and_then(Value::as_str)
        .ok_or(MetadataError::MissingImage)?;
    Ok(TokenMetadata {
        image: image.to_string(),
    })
}

/// Encodes metadata into the data URI format understood by
/// [`decode_token_metadata`]. Used by tests and fixtures.
pub fn encode_token_metadata(metadata: &TokenMetadata) -> String {
    let json = serde_json::to_vec(metadata).expect("metadata serialization cannot fail");
    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(json))
}
