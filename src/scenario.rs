//! Scenario records and the override applier.
//!
//! A scenario is a named set of dotted-path overrides plus metadata the
//! harness interprets itself: whether the scenario attaches the shared
//! tracking experiment and whether the trainer's end-to-end loss path is
//! enabled. Metadata lives in explicit fields, never in the override map.
//!
//! # Example
//!
//! ```rust
//! use gan_smoke_rs::config::string_list;
//! use gan_smoke_rs::Scenario;
//!
//! let scenario = Scenario::named("Painter")
//!     .with_override("tasks", string_list(&["p"]))
//!     .with_override("domains", string_list(&["rf"]));
//!
//! assert!(scenario.track);
//! assert!(!scenario.end_to_end);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{HarnessError, Result};
use crate::paths::set_path;

/// Reserved key prefix from hand-written suites of the pre-metadata era.
///
/// Keys carrying it are interpreted by the harness only and must never be
/// written into a configuration tree.
pub const RESERVED_PREFIX: &str = "__";

fn default_true() -> bool {
    true
}

/// One smoke-test scenario: overrides plus harness metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Human-readable description; the runner warns when it is absent.
    #[serde(default)]
    pub description: Option<String>,

    /// Dotted-path overrides, applied in insertion order.
    #[serde(default)]
    pub overrides: Mapping,

    /// Attach the shared tracking experiment to this scenario.
    #[serde(default = "default_true")]
    pub track: bool,

    /// Enable the trainer's auxiliary end-to-end loss path.
    #[serde(default)]
    pub end_to_end: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            description: None,
            overrides: Mapping::new(),
            track: true,
            end_to_end: false,
        }
    }
}

impl Scenario {
    /// Create an empty scenario with a description.
    #[must_use]
    pub fn named(description: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            ..Self::default()
        }
    }

    /// Add a dotted-path override.
    #[must_use]
    pub fn with_override(mut self, key: &str, value: Value) -> Self {
        self.overrides.insert(Value::from(key), value);
        self
    }

    /// Run this scenario without the shared tracking experiment.
    #[must_use]
    pub fn untracked(mut self) -> Self {
        self.track = false;
        self
    }

    /// Enable the end-to-end loss path for this scenario.
    #[must_use]
    pub fn with_end_to_end(mut self) -> Self {
        self.end_to_end = true;
        self
    }
}

/// Apply a scenario's overrides to a configuration tree, in order.
///
/// Later entries win when dotted paths collide. Keys starting with
/// [`RESERVED_PREFIX`] are skipped with a warning; suites should carry
/// harness behavior in the explicit metadata fields instead.
///
/// # Errors
///
/// Returns an error when a key is not a string or does not resolve through
/// existing mappings. Path errors are fatal to the whole run: they indicate
/// a broken suite, not a failing trainer.
pub fn apply_overrides(config: &mut Value, overrides: &Mapping) -> Result<()> {
    for (key, value) in overrides {
        let key = key.as_str().ok_or_else(|| {
            HarnessError::Config(format!("override keys must be strings, got {key:?}"))
        })?;
        if key.starts_with(RESERVED_PREFIX) {
            tracing::warn!(key, "reserved key skipped; use scenario metadata fields instead");
            continue;
        }
        set_path(config, key, value.clone())?;
    }
    Ok(())
}

/// The built-in scenario suite.
///
/// Covers the masker tasks with and without tracking, the painter alone,
/// and the combined task set with and without the end-to-end loss path.
#[must_use]
pub fn default_suite() -> Vec<Scenario> {
    use crate::config::string_list;

    vec![
        Scenario::named("MSD no tracking").untracked(),
        Scenario::named("MSD with tracking"),
        Scenario::named("Painter")
            .with_override("tasks", string_list(&["p"]))
            .with_override("domains", string_list(&["rf"])),
        Scenario::named("MSDP no end-to-end")
            .with_override("tasks", string_list(&["m", "s", "d", "p"]))
            .with_override("domains", string_list(&["rf", "r", "s"])),
        Scenario::named("MSDP with end-to-end")
            .with_override("tasks", string_list(&["m", "s", "d", "p"]))
            .with_override("domains", string_list(&["rf", "r", "s"]))
            .with_end_to_end(),
    ]
}

/// Load a scenario suite from a YAML file (a list of scenarios).
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse as a list
/// of scenarios.
pub fn load_suite<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{base_config, string_list};
    use crate::paths::get_path;

    #[test]
    fn test_scenario_defaults() {
        let scenario = Scenario::default();
        assert!(scenario.track);
        assert!(!scenario.end_to_end);
        assert!(scenario.description.is_none());
        assert!(scenario.overrides.is_empty());
    }

    #[test]
    fn test_apply_overrides_in_order() {
        let mut config = base_config().unwrap();
        let scenario = Scenario::named("order")
            .with_override("train.epochs", Value::from(5))
            .with_override("train.epochs", Value::from(7));
        apply_overrides(&mut config, &scenario.overrides).unwrap();
        // last write wins
        assert_eq!(get_path(&config, "train.epochs"), Some(&Value::from(7)));
    }

    #[test]
    fn test_apply_overrides_skips_reserved_keys() {
        let mut config = base_config().unwrap();
        let mut overrides = Mapping::new();
        overrides.insert(Value::from("__doc"), Value::from("legacy description"));
        overrides.insert(Value::from("train.epochs"), Value::from(2));

        apply_overrides(&mut config, &overrides).unwrap();

        assert_eq!(get_path(&config, "__doc"), None);
        assert_eq!(get_path(&config, "train.epochs"), Some(&Value::from(2)));
    }

    #[test]
    fn test_apply_overrides_rejects_non_string_keys() {
        let mut config = base_config().unwrap();
        let mut overrides = Mapping::new();
        overrides.insert(Value::from(42), Value::from("x"));
        assert!(apply_overrides(&mut config, &overrides).is_err());
    }

    #[test]
    fn test_apply_overrides_missing_path_is_fatal() {
        let mut config = base_config().unwrap();
        let mut overrides = Mapping::new();
        overrides.insert(Value::from("gen.encoder.depth"), Value::from(3));
        let err = apply_overrides(&mut config, &overrides).unwrap_err();
        assert!(matches!(err, HarnessError::Path { .. }));
    }

    #[test]
    fn test_task_and_domain_replacement() {
        let mut config = base_config().unwrap();
        let epochs_before = get_path(&config, "train.epochs").cloned();

        let scenario = Scenario::named("Painter")
            .with_override("tasks", string_list(&["p"]))
            .with_override("domains", string_list(&["rf"]));
        apply_overrides(&mut config, &scenario.overrides).unwrap();

        assert_eq!(get_path(&config, "tasks"), Some(&string_list(&["p"])));
        assert_eq!(get_path(&config, "domains"), Some(&string_list(&["rf"])));
        assert_eq!(get_path(&config, "train.epochs"), epochs_before.as_ref());
    }

    #[test]
    fn test_default_suite_shape() {
        let suite = default_suite();
        assert_eq!(suite.len(), 5);
        assert!(suite.iter().all(|s| s.description.is_some()));
        assert!(!suite[0].track);
        assert!(suite[1].track);
        assert!(suite[4].end_to_end);
        assert!(!suite[3].end_to_end);
    }

    #[test]
    fn test_suite_parses_from_yaml() {
        let suite: Vec<Scenario> = serde_yaml::from_str(
            r"
            - description: quick painter
              overrides:
                tasks: [p]
                domains: [rf]
              track: false
            - overrides:
                train.epochs: 2
              end_to_end: true
            ",
        )
        .unwrap();

        assert_eq!(suite.len(), 2);
        assert_eq!(suite[0].description.as_deref(), Some("quick painter"));
        assert!(!suite[0].track);
        assert!(suite[1].track);
        assert!(suite[1].end_to_end);
        assert!(suite[1].description.is_none());
        assert_eq!(
            suite[1].overrides.get(&Value::from("train.epochs")),
            Some(&Value::from(2))
        );
    }

    #[test]
    fn test_suite_rejects_unknown_fields() {
        let parsed: std::result::Result<Vec<Scenario>, _> =
            serde_yaml::from_str("- doc: old-style field");
        assert!(parsed.is_err());
    }
}
