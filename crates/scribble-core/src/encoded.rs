//! The persisted artifact: a whole-surface snapshot as a data URL.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// An opaque, string-encoded snapshot of a surface's pixels.
///
/// Always shaped `data:image/<subtype>[;params];base64,<payload>` with a
/// non-empty payload. Serializes as the bare string.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Validate a string read back from storage.
    pub fn from_stored(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::MalformedImage("empty string".into()));
        }
        let rest = raw
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::MalformedImage("missing `data:` scheme".into()))?;
        let marker = rest
            .find(BASE64_MARKER)
            .ok_or_else(|| Error::MalformedImage("payload is not base64".into()))?;
        let media_type = &rest[..marker];
        if !media_type.starts_with("image/") {
            return Err(Error::MalformedImage(format!(
                "`{media_type}` is not an image media type"
            )));
        }
        if rest[marker + BASE64_MARKER.len()..].is_empty() {
            return Err(Error::MalformedImage("empty payload".into()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Wrap a base64 payload produced by an encoder.
    pub(crate) fn from_parts(media_type: &str, payload: &str) -> Self {
        Self(format!("{SCHEME}{media_type}{BASE64_MARKER}{payload}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type without parameters, e.g. `image/png`.
    pub fn media_type(&self) -> &str {
        let header = &self.0[SCHEME.len()..self.marker()];
        header.split(';').next().unwrap_or(header)
    }

    /// The base64 text after the comma.
    pub fn payload(&self) -> &str {
        &self.0[self.marker() + BASE64_MARKER.len()..]
    }

    fn marker(&self) -> usize {
        // Checked on construction.
        self.0.find(BASE64_MARKER).unwrap_or(self.0.len())
    }
}

impl TryFrom<String> for EncodedImage {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_stored(&value)
    }
}

impl From<EncodedImage> for String {
    fn from(image: EncodedImage) -> Self {
        image.0
    }
}

impl fmt::Debug for EncodedImage {
    // Payloads run to hundreds of kilobytes; keep debug output readable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EncodedImage({}, {} bytes)",
            self.media_type(),
            self.payload().len()
        )
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
