//! Fixed-width bincode framing of [`InteractRequest`].

use bincode::Options;
use interaction_core::{ErrorSeverity, InteractRequest, InteractionFault};
use thiserror::Error;

/// Encoded size of a request: a `u64` interactable id and a `u32` interaction id.
pub const REQUEST_FRAME_LEN: usize = 12;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("failed to encode interact request: {0}")]
    Encode(String),

    #[error("failed to decode interact request: {0}")]
    Decode(String),

    #[error("interact frame of {len} bytes exceeds limit of {max}")]
    Oversize { len: usize, max: usize },
}

impl InteractionFault for ProtocolError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encode(_) => ErrorSeverity::Internal,
            Self::Decode(_) | Self::Oversize { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "PROTOCOL_ENCODE",
            Self::Decode(_) => "PROTOCOL_DECODE",
            Self::Oversize { .. } => "PROTOCOL_OVERSIZE",
        }
    }
}

fn options() -> impl Options {
    bincode::options()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
        .with_limit(REQUEST_FRAME_LEN as u64)
}

pub fn encode_request(request: &InteractRequest) -> Result<Vec<u8>, ProtocolError> {
    options()
        .serialize(request)
        .map_err(|e| ProtocolError::Encode(e.to_string()))
}

/// Decodes a request frame, refusing anything longer than `max_len` before
/// touching its contents.
pub fn decode_request(frame: &[u8], max_len: usize) -> Result<InteractRequest, ProtocolError> {
    if frame.len() > max_len {
        return Err(ProtocolError::Oversize {
            len: frame.len(),
            max: max_len,
        });
    }

    options()
        .deserialize(frame)
        .map_err(|e| ProtocolError::Decode(e.to_string()))
}
