//! Serialization of resolved emoji into attachment payloads.

use crate::catalog::EmojiSource;
use crate::prelude::*;

/// Turns an [`EmojiSource`] into the opaque bytes stored in an attachment, and back.
pub trait Encoder: Send + Sync {
    fn encode(&self, source: &EmojiSource) -> Result<Vec<u8>>;

    fn decode(&self, payload: &[u8]) -> Result<EmojiSource>;
}

/// Encodes payloads as CBOR.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cbor;

impl Encoder for Cbor {
    fn encode(&self, source: &EmojiSource) -> Result<Vec<u8>> {
        serde_cbor::to_vec(source).wrap_err("Could not encode emoji payload as CBOR.")
    }

    fn decode(&self, payload: &[u8]) -> Result<EmojiSource> {
        serde_cbor::from_slice(payload).wrap_err("Could not decode emoji payload from CBOR.")
    }
}
