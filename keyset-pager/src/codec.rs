//! Opaque continuation tokens.
//!
//! A token is the URL-safe, unpadded base64 form of a small JSON object. The
//! keyset engine stores a boundary row's sort-key tuple in it; the offset
//! helper stores its window position. Decoding never fails loudly: anything
//! that isn't a well-formed token comes back as `None`.

use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine as _, alphabet};
use log::trace;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Upper bound on accepted token length before any decoding is attempted.
///
/// This caps the work spent on forged input. Tokens this crate issues stay
/// well below it for natural values up to tens of kilobytes; a row whose
/// token would exceed it gets a cursor that no longer decodes.
pub const MAX_CURSOR_TOKEN_LEN: usize = 64 * 1024;

// Encoded without padding; padded tokens from other clients are still accepted.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Sort-key tuple of a boundary row: the natural ordering value and the
/// unique id that breaks ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorPayload {
    pub natural: String,
    pub id: i64,
}

impl CursorPayload {
    pub fn new(natural: impl Into<String>, id: i64) -> Self {
        Self {
            natural: natural.into(),
            id,
        }
    }
}

/// Token encoder/decoder with a configurable length bound.
#[derive(Debug, Clone, Copy)]
pub struct CursorCodec {
    max_token_len: usize,
}

impl Default for CursorCodec {
    fn default() -> Self {
        Self::new(MAX_CURSOR_TOKEN_LEN)
    }
}

impl CursorCodec {
    pub const fn new(max_token_len: usize) -> Self {
        Self { max_token_len }
    }

    pub const fn max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Encode a boundary tuple. Deterministic: equal payloads give equal tokens.
    pub fn encode(&self, payload: &CursorPayload) -> String {
        // A string and an integer always serialize.
        let json = serde_json::to_vec(payload).unwrap_or_default();
        TOKEN_ENGINE.encode(json)
    }

    /// Decode a boundary tuple, or `None` for anything that isn't one.
    pub fn decode(&self, token: &str) -> Option<CursorPayload> {
        self.decode_token(token)
    }

    /// Encode any serializable value as a token. `None` if it can't be serialized.
    pub fn encode_token<T: Serialize>(&self, value: &T) -> Option<String> {
        let json = serde_json::to_vec(value).ok()?;
        Some(TOKEN_ENGINE.encode(json))
    }

    /// Decode a token whose JSON body is an object deserializable into `T`.
    pub fn decode_token<T: DeserializeOwned>(&self, token: &str) -> Option<T> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        if token.len() > self.max_token_len {
            trace!(
                "Rejecting cursor token of {} chars (max {})",
                token.len(),
                self.max_token_len
            );
            return None;
        }

        let bytes = TOKEN_ENGINE.decode(token).ok()?;
        let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

/// Encode a boundary tuple with the default codec.
pub fn encode_cursor(payload: &CursorPayload) -> String {
    CursorCodec::default().encode(payload)
}

/// Decode a boundary tuple with the default codec.
pub fn decode_cursor(token: &str) -> Option<CursorPayload> {
    CursorCodec::default().decode(token)
}
