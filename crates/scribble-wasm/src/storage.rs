//! The saved drawing in `localStorage`.
//!
//! Values are stored JSON-encoded, so the drawing is kept as a quoted string
//! (`"\"data:image/png;base64,...\""`) and a cleared drawing as `null`.

use scribble_core::EncodedImage;
use wasm_bindgen::JsValue;
use web_sys::Storage;

pub struct DrawingStore {
    storage: Storage,
    key: String,
}

impl DrawingStore {
    /// The window's `localStorage` under `key`.
    pub fn open(key: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
        Ok(Self {
            storage,
            key: key.to_string(),
        })
    }

    /// The saved drawing as the raw string to restore from, if any.
    pub fn load(&self) -> Option<String> {
        match self.storage.get_item(&self.key) {
            Ok(stored) => stored.as_deref().and_then(decode_stored),
            Err(e) => {
                log::warn!("reading `{}` from localStorage failed: {e:?}", self.key);
                None
            }
        }
    }

    pub fn save(&self, image: &EncodedImage) {
        let value = encode_for_storage(image);
        if let Err(e) = self.storage.set_item(&self.key, &value) {
            // Usually the storage quota.
            log::warn!("saving drawing to `{}` failed: {e:?}", self.key);
        }
    }

    pub fn clear(&self) -> Result<(), JsValue> {
        self.storage.remove_item(&self.key)
    }
}

/// Unwrap a JSON-encoded stored value. `null`, non-strings and invalid JSON
/// all mean "nothing saved".
pub fn decode_stored(stored: &str) -> Option<String> {
    match serde_json::from_str::<Option<String>>(stored) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("stored drawing is not a JSON string: {e}");
            None
        }
    }
}

pub fn encode_for_storage(image: &EncodedImage) -> String {
    serde_json::Value::String(image.as_str().to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[test]
    fn stored_values_are_json_strings() {
        let image = EncodedImage::from_stored(URL).unwrap();
        let stored = encode_for_storage(&image);
        assert_eq!(stored, format!("\"{URL}\""));
        assert_eq!(decode_stored(&stored).as_deref(), Some(URL));
    }

    #[test]
    fn null_and_garbage_mean_nothing_saved() {
        assert_eq!(decode_stored("null"), None);
        assert_eq!(decode_stored("42"), None);
        assert_eq!(decode_stored(URL), None, "unquoted value is not JSON");
        assert_eq!(decode_stored(""), None);
    }
}
