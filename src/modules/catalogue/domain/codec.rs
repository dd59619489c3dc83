//! Text-safe representation of uploaded files.
//!
//! Payloads are `data:` URLs, `data:<mime>;base64,<bytes>`, the same shape a
//! browser `FileReader` produces, so stored CVs can be previewed directly.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::catalogue::domain::entities::FileType;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Payload is not a data URL")]
    MissingDataPrefix,

    #[error("Payload has no ';base64,' marker")]
    MissingMimeMarker,

    #[error("Payload declares an empty MIME type")]
    EmptyMimeType,

    #[error("Payload is not valid base64: {0}")]
    InvalidBase64(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_type: FileType,
}

/// MIME type actually written for a declared one.
pub fn effective_mime_type(mime_type: &str) -> &str {
    if mime_type.is_empty() {
        DEFAULT_MIME_TYPE
    } else {
        mime_type
    }
}

pub fn encode(bytes: &[u8], mime_type: &str) -> String {
    format!(
        "{DATA_PREFIX}{}{BASE64_MARKER}{}",
        effective_mime_type(mime_type),
        STANDARD.encode(bytes)
    )
}

pub fn decode(payload: &str) -> Result<DecodedPayload, CodecError> {
    let body = payload
        .strip_prefix(DATA_PREFIX)
        .ok_or(CodecError::MissingDataPrefix)?;

    // Base64 never contains ';' or ',', so the last marker is the separator
    // even when the MIME string itself contains one.
    let marker = body
        .rfind(BASE64_MARKER)
        .ok_or(CodecError::MissingMimeMarker)?;

    let mime_type = &body[..marker];
    if mime_type.is_empty() {
        return Err(CodecError::EmptyMimeType);
    }

    let bytes = STANDARD
        .decode(&body[marker + BASE64_MARKER.len()..])
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;

    Ok(DecodedPayload {
        bytes,
        mime_type: mime_type.to_string(),
        file_type: FileType::from_mime(mime_type),
    })
}
