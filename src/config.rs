//! Baseline configuration loading and smoke-test tuning.
//!
//! The harness treats the configuration as a schema-less tree
//! ([`serde_yaml::Value`]); the trainer collaborator is the only component
//! that interprets it. A built-in baseline covers every path the default
//! scenario suite touches, and [`tune_for_smoke`] shrinks it down to an
//! abbreviated run.
//!
//! # Example
//!
//! ```rust
//! use gan_smoke_rs::config::{base_config, tune_for_smoke};
//! use gan_smoke_rs::paths::get_path;
//! use serde_yaml::Value;
//!
//! # fn main() -> gan_smoke_rs::Result<()> {
//! let mut config = base_config()?;
//! tune_for_smoke(&mut config)?;
//! assert_eq!(get_path(&config, "train.epochs"), Some(&Value::from(1)));
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{HarnessError, Result};
use crate::paths::set_path;

/// Built-in baseline for the multi-task translation stack.
///
/// Carries every nested path the default scenario suite and the smoke tuning
/// reference: task and domain lists, loader settings, the transform pipeline
/// and the training schedule.
const BASE_YAML: &str = r"
tasks: [m, s, d]
domains: [r, s]
data:
  check_samples: true
  max_samples: -1
  loaders:
    batch_size: 8
    num_workers: 8
    shuffle: true
  transforms:
    - name: hflip
      ignore: false
      p: 0.5
    - name: crop
      ignore: false
      height: 600
      width: 600
    - name: resize
      ignore: false
      new_size:
        default: 640
        d: 160
        s: 256
train:
  epochs: 300
  lr: 0.0005
  fid:
    n_images: 57
tracking:
  display_size: 10
";

/// Return the built-in baseline configuration.
///
/// # Errors
///
/// Returns an error if the embedded baseline fails to parse; this indicates
/// a broken build rather than a user mistake.
pub fn base_config() -> Result<Value> {
    Ok(serde_yaml::from_str(BASE_YAML)?)
}

/// Load a configuration tree from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Tune a baseline configuration down to an abbreviated smoke run.
///
/// Disables sample checking, shrinks loader/epoch/FID settings and pins the
/// task and domain lists so every scenario starts from the same small, fast
/// baseline. The final transform's `new_size` is forced to 256 whether it is
/// a plain integer or a mapping carrying a `default` field.
///
/// # Errors
///
/// Returns an error if the configuration is missing one of the baseline
/// paths; smoke tuning never creates intermediate nodes.
pub fn tune_for_smoke(config: &mut Value) -> Result<()> {
    set_path(config, "data.check_samples", Value::from(false))?;
    set_path(config, "train.fid.n_images", Value::from(5))?;
    set_path(config, "tracking.display_size", Value::from(5))?;
    set_path(config, "tasks", string_list(&["m", "s", "d"]))?;
    set_path(config, "domains", string_list(&["r", "s"]))?;
    set_path(config, "data.loaders.num_workers", Value::from(4))?;
    set_path(config, "data.loaders.batch_size", Value::from(2))?;
    set_path(config, "data.max_samples", Value::from(9))?;
    set_path(config, "train.epochs", Value::from(1))?;
    shrink_final_resize(config)
}

/// Force the last transform's `new_size` to 256.
///
/// The pipeline's final entry carries either a bare integer or a per-task
/// mapping with a `default` field; both shapes are shrunk in place.
fn shrink_final_resize(config: &mut Value) -> Result<()> {
    let transforms = config
        .get_mut("data")
        .and_then(|data| data.get_mut("transforms"))
        .and_then(Value::as_sequence_mut)
        .ok_or_else(|| HarnessError::Config("data.transforms is not a list".to_string()))?;

    let Some(last) = transforms.last_mut() else {
        return Ok(());
    };
    let slot = last
        .get_mut("new_size")
        .ok_or_else(|| HarnessError::Config("final transform has no new_size".to_string()))?;

    if slot.is_number() {
        *slot = Value::from(256);
    } else {
        let mapping = slot.as_mapping_mut().ok_or_else(|| {
            HarnessError::Config("new_size must be a number or a mapping".to_string())
        })?;
        mapping.insert(Value::from("default"), Value::from(256));
    }
    Ok(())
}

/// Build a YAML sequence of strings.
#[must_use]
pub fn string_list(items: &[&str]) -> Value {
    Value::Sequence(items.iter().map(|item| Value::from(*item)).collect())
}
