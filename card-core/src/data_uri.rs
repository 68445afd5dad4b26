//! Base64 data URIs for images.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{CardError, CardResult};

/// A decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime: String,
    bytes: Vec<u8>,
}

impl DataUri {
    /// Wrap raw bytes.
    #[must_use]
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parse a base64 data URI.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::InvalidDataUri`] if the scheme, encoding or
    /// payload is malformed.
    pub fn parse(uri: &str) -> CardResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| CardError::InvalidDataUri("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CardError::InvalidDataUri("missing payload".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| CardError::InvalidDataUri("payload is not base64".to_string()))?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| CardError::InvalidDataUri(e.to_string()))?;
        Ok(Self::new(mime, bytes))
    }

    /// Parse a data URI that must carry an image.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::InvalidDataUri`] if the URI is malformed, its
    /// MIME type is not `image/*`, or it is empty.
    pub fn parse_image(uri: &str) -> CardResult<Self> {
        let parsed = Self::parse(uri)?;
        if !parsed.is_image() {
            return Err(CardError::InvalidDataUri(format!(
                "expected an image, got {}",
                parsed.mime
            )));
        }
        if parsed.bytes.is_empty() {
            return Err(CardError::InvalidDataUri("empty image".to_string()));
        }
        Ok(parsed)
    }

    /// MIME type.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decoded payload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume into the decoded payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Whether the MIME type is an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_and_parses_back() {
        let uri = DataUri::new("image/png", vec![0x89, b'P', b'N', b'G']).to_string();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");

        let parsed = DataUri::parse_image(&uri).expect("parse");
        assert_eq!(parsed.mime(), "image/png");
        assert_eq!(parsed.bytes(), &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn non_images_are_rejected() {
        let uri = DataUri::new("text/plain", b"hello".to_vec()).to_string();
        assert!(DataUri::parse(&uri).is_ok());
        assert!(DataUri::parse_image(&uri).is_err());
    }

    #[test]
    fn malformed_uris_are_rejected() {
        for uri in [
            "https://example.com/a.png",
            "data:image/png;base64",
            "data:image/png,plain",
            "data:image/png;base64,@@@",
            "data:image/png;base64,",
        ] {
            assert!(DataUri::parse_image(uri).is_err(), "{uri} should fail");
        }
    }
}
