//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`GlossSettings::default()`]
//! 2. If `~/.gloss/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::GlossSettings;

/// Resolve the path to the settings file (`~/.gloss/settings.json`).
#[must_use]
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".gloss").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<GlossSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<GlossSettings> {
    let defaults = serde_json::to_value(GlossSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: GlossSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
#[must_use]
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `GLOSS_*` environment variable overrides to loaded settings.
///
/// Invalid values are ignored with a warning, falling back to file/default.
pub fn apply_env_overrides(settings: &mut GlossSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides from an arbitrary variable source.
///
/// Split out from [`apply_env_overrides`] so precedence and fallback rules
/// can be tested without touching process-wide environment state.
fn apply_overrides_from<F>(settings: &mut GlossSettings, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = read_string(&var, "GLOSS_ENDPOINT") {
        settings.api.endpoint = v;
    }
    if let Some(v) = read_string(&var, "GLOSS_MODEL") {
        settings.api.model = v;
    }
    if let Some(v) = read_string(&var, "GLOSS_API_KEY") {
        settings.api.api_key = v;
    }
    if let Some(v) = read_f32(&var, "GLOSS_TEMPERATURE", 0.0, 2.0) {
        settings.api.temperature = v;
    }
    if let Some(v) = read_u64(&var, "GLOSS_TIMEOUT_MS", 1_000, 600_000) {
        settings.api.timeout_ms = v;
    }
    if let Some(v) = read_string(&var, "GLOSS_SYSTEM_PROMPT") {
        settings.api.system_prompt = Some(v);
    }
}

/// Parse a string as a `u64` within a range.
#[must_use]
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as an `f32` within a range.
#[must_use]
pub fn parse_f32_range(val: &str, min: f32, max: f32) -> Option<f32> {
    let n: f32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Variable readers (thin wrappers) ─────────────────────────────────────────

fn read_string<F>(var: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    var(name).filter(|v| !v.is_empty())
}

fn read_u64<F>(var: &F, name: &str, min: u64, max: u64) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let val = var(name)?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

fn read_f32<F>(var: &F, name: &str, min: f32, max: f32) -> Option<f32>
where
    F: Fn(&str) -> Option<String>,
{
    let val = var(name)?;
    let result = parse_f32_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid f32 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── deep_merge ───────────────────────────────────────────────────────

    #[test]
    fn merge_overrides_scalar() {
        let merged = deep_merge(json!({"a": 1, "b": 2}), json!({"b": 3}));
        assert_eq!(merged, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn merge_recurses_into_objects() {
        let merged = deep_merge(
            json!({"api": {"model": "gpt-4o-mini", "temperature": 0.2}}),
            json!({"api": {"model": "gpt-4o"}}),
        );
        assert_eq!(
            merged,
            json!({"api": {"model": "gpt-4o", "temperature": 0.2}})
        );
    }

    #[test]
    fn merge_skips_nulls() {
        let merged = deep_merge(json!({"a": 1}), json!({"a": null}));
        assert_eq!(merged, json!({"a": 1}));
    }

    #[test]
    fn merge_replaces_arrays_entirely() {
        let merged = deep_merge(json!({"a": [1, 2]}), json!({"a": [3]}));
        assert_eq!(merged, json!({"a": [3]}));
    }

    #[test]
    fn merge_adds_new_keys() {
        let merged = deep_merge(json!({"a": 1}), json!({"b": 2}));
        assert_eq!(merged, json!({"a": 1, "b": 2}));
    }

    // ── file loading ─────────────────────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from_path(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, GlossSettings::default());
    }

    #[test]
    fn load_partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"api":{"apiKey":"sk-file","model":"gpt-4o"}}"#).unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.api.api_key, "sk-file");
        assert_eq!(settings.api.model, "gpt-4o");
        // Untouched fields keep their defaults.
        assert_eq!(settings.api.timeout_ms, 30_000);
    }

    #[test]
    fn load_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_settings_from_path(&path).is_err());
    }

    // ── env overrides ────────────────────────────────────────────────────

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn env_layer_wins_over_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"api":{"model":"gpt-4o","temperature":0.5,"apiKey":"sk-file"}}"#,
        )
        .unwrap();

        let mut settings = load_settings_from_path(&path).unwrap();
        apply_overrides_from(
            &mut settings,
            vars(&[("GLOSS_MODEL", "gpt-4o-mini"), ("GLOSS_TEMPERATURE", "0.9")]),
        );

        assert_eq!(settings.api.model, "gpt-4o-mini");
        assert!((settings.api.temperature - 0.9).abs() < f32::EPSILON);
        // Fields without an override keep the file layer's values.
        assert_eq!(settings.api.api_key, "sk-file");
    }

    #[test]
    fn out_of_range_env_values_fall_back() {
        let mut settings = GlossSettings::default();
        settings.api.temperature = 0.5;
        settings.api.timeout_ms = 5_000;

        apply_overrides_from(
            &mut settings,
            vars(&[("GLOSS_TEMPERATURE", "2.5"), ("GLOSS_TIMEOUT_MS", "10")]),
        );

        assert!((settings.api.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(settings.api.timeout_ms, 5_000);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut settings = GlossSettings::default();
        settings.api.model = "gpt-4o".to_owned();

        apply_overrides_from(&mut settings, vars(&[("GLOSS_MODEL", "")]));

        assert_eq!(settings.api.model, "gpt-4o");
    }

    #[test]
    fn env_sets_fields_the_file_never_mentions() {
        let mut settings = GlossSettings::default();
        assert!(settings.api.system_prompt.is_none());

        apply_overrides_from(
            &mut settings,
            vars(&[
                ("GLOSS_SYSTEM_PROMPT", "translate tersely"),
                ("GLOSS_ENDPOINT", "https://proxy.local/v1/chat/completions"),
            ]),
        );

        assert_eq!(settings.api.system_prompt.as_deref(), Some("translate tersely"));
        assert_eq!(settings.api.endpoint, "https://proxy.local/v1/chat/completions");
    }

    // ── range parsing ────────────────────────────────────────────────────

    #[test]
    fn u64_range_enforced() {
        assert_eq!(parse_u64_range("5000", 1_000, 600_000), Some(5000));
        assert_eq!(parse_u64_range("1", 1_000, 600_000), None);
        assert_eq!(parse_u64_range("abc", 1_000, 600_000), None);
    }

    #[test]
    fn f32_range_enforced() {
        assert_eq!(parse_f32_range("0.7", 0.0, 2.0), Some(0.7));
        assert_eq!(parse_f32_range("2.5", 0.0, 2.0), None);
        assert_eq!(parse_f32_range("warm", 0.0, 2.0), None);
    }
}
