//! Dotted-path resolution over the configuration tree.
//!
//! A configuration is a plain [`serde_yaml::Value`] tree. Overrides address
//! leaves with dotted keys (`"data.loaders.batch_size"`); resolution descends
//! through existing mappings only and never creates intermediate nodes.
//!
//! # Example
//!
//! ```rust
//! use gan_smoke_rs::paths::{get_path, set_path};
//! use serde_yaml::Value;
//!
//! # fn main() -> gan_smoke_rs::Result<()> {
//! let mut config: Value = serde_yaml::from_str("data:\n  loaders:\n    batch_size: 8")?;
//! set_path(&mut config, "data.loaders.batch_size", Value::from(2))?;
//! assert_eq!(get_path(&config, "data.loaders.batch_size"), Some(&Value::from(2)));
//! # Ok(())
//! # }
//! ```

use serde_yaml::Value;

use crate::error::{HarnessError, Result};

/// Look up a dotted path, returning `None` if any segment is missing.
#[must_use]
pub fn get_path<'a>(config: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted.split('.').try_fold(config, |node, segment| node.get(segment))
}

/// Set the leaf addressed by a dotted path to exactly `value`.
///
/// Every segment except the last must already exist as a mapping; missing
/// intermediates are an error, never created. The leaf itself may be inserted
/// or replaced with a value of any type.
///
/// # Errors
///
/// Returns [`HarnessError::Path`] naming the segment at which resolution
/// failed, or [`HarnessError::Config`] for a malformed key (empty segment).
pub fn set_path(config: &mut Value, dotted: &str, value: Value) -> Result<()> {
    let segments: Vec<&str> = dotted.split('.').collect();
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| HarnessError::Config("override key cannot be empty".to_string()))?;
    if last.is_empty() || parents.iter().any(|s| s.is_empty()) {
        return Err(HarnessError::Config(format!(
            "malformed override key `{dotted}`"
        )));
    }

    let mut node = config;
    for segment in parents {
        node = node.get_mut(*segment).ok_or_else(|| HarnessError::Path {
            key: dotted.to_string(),
            segment: (*segment).to_string(),
        })?;
    }

    let mapping = node.as_mapping_mut().ok_or_else(|| HarnessError::Path {
        key: dotted.to_string(),
        segment: (*last).to_string(),
    })?;
    mapping.insert(Value::from(*last), value);
    Ok(())
}
