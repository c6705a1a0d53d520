//! # gloss-settings
//!
//! Configuration management with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`GlossSettings::default()`]
//! 2. **User file** — `~/.gloss/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `GLOSS_*` overrides (highest priority)
//!
//! ## Crate Position
//!
//! Leaf crate; the CLI reads it once at startup to build the transport
//! configuration. The core never validates or persists these values.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{ApiSettings, GlossSettings};

use std::sync::OnceLock;

/// Global settings singleton, initialized on first access.
static SETTINGS: OnceLock<GlossSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.gloss/settings.json` with env var
/// overrides; on failure, falls back to compiled defaults. Subsequent calls
/// return the cached value.
pub fn get_settings() -> &'static GlossSettings {
    SETTINGS.get_or_init(|| load_settings().unwrap_or_default())
}

/// Initialize the global settings with a specific value.
///
/// # Errors
///
/// Returns the provided settings back if the global was already initialized.
pub fn init_settings(settings: GlossSettings) -> std::result::Result<(), GlossSettings> {
    SETTINGS.set(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = GlossSettings::default();
        let _path = settings_path();
    }

    #[test]
    fn deep_merge_re_exported() {
        let merged = deep_merge(serde_json::json!({"x": 1}), serde_json::json!({"y": 2}));
        assert_eq!(merged, serde_json::json!({"x": 1, "y": 2}));
    }
}
