//! Host configuration passed from JavaScript as JSON.

use serde::Deserialize;

pub const DEFAULT_STORAGE_KEY: &str = "drawing";

/// Options for `mount_with_storage` / `clear_saved_drawing`.
///
/// Every field is optional; `{}` and a missing argument mean the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MountOptions {
    /// localStorage key holding the saved drawing. Default: **`"drawing"`**.
    pub storage_key: String,

    /// Console log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    /// Default: **`warn`**.
    pub log_level: String,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl MountOptions {
    /// Parse the optional JSON argument.
    ///
    /// # Errors
    /// Returns a message for invalid JSON, unknown fields, an empty storage
    /// key, or an unknown log level.
    pub fn from_json(json: Option<&str>) -> Result<Self, String> {
        let options: Self = match json.map(str::trim) {
            None | Some("") => Self::default(),
            Some(text) => serde_json::from_str(text).map_err(|e| format!("invalid options: {e}"))?,
        };
        if options.storage_key.is_empty() {
            return Err("invalid options: storageKey must not be empty".to_string());
        }
        options.level_filter()?;
        Ok(options)
    }

    pub fn level_filter(&self) -> Result<log::LevelFilter, String> {
        self.log_level
            .parse()
            .map_err(|_| format!("invalid options: unknown logLevel `{}`", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_options_use_defaults() {
        assert_eq!(MountOptions::from_json(None).unwrap(), MountOptions::default());
        assert_eq!(MountOptions::from_json(Some("  ")).unwrap(), MountOptions::default());
        assert_eq!(MountOptions::from_json(Some("{}")).unwrap().storage_key, "drawing");
    }

    #[test]
    fn camel_case_fields() {
        let options =
            MountOptions::from_json(Some(r#"{"storageKey":"sketch","logLevel":"debug"}"#)).unwrap();
        assert_eq!(options.storage_key, "sketch");
        assert_eq!(options.level_filter().unwrap(), log::LevelFilter::Debug);
    }

    #[test]
    fn rejects_bad_options() {
        assert!(MountOptions::from_json(Some("{")).is_err());
        assert!(MountOptions::from_json(Some(r#"{"storage_key":"x"}"#)).is_err());
        assert!(MountOptions::from_json(Some(r#"{"storageKey":""}"#)).is_err());
        assert!(MountOptions::from_json(Some(r#"{"logLevel":"loud"}"#)).is_err());
    }
}
