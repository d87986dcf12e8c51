//! sbk-config
//!
//! Layered YAML report configuration.
//! - Layers merge in order: earlier docs are base, later docs override
//! - The merged document is hashed (SHA-256 over canonical JSON) so a report
//!   can be tied to the exact settings that produced it
//! - Leaf keys nothing reads are reported (warn) or rejected (fail)
//! - [`ReportConfig`] is the typed view the CLI consumes

use std::fs;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

mod report;

pub use report::{ReportConfig, DEFAULT_PAGE_SIZE};

// ---------------------------------------------------------------------------
// Layered load + hash
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for (i, raw) in yaml_docs.iter().enumerate() {
        let v_yaml: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {i}"))?;
        // an empty document is a no-op layer
        if v_yaml.is_null() {
            continue;
        }
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        if !v_json.is_object() {
            bail!("CONFIG_NOT_A_MAPPING: layer {i} must be a mapping at the top level");
        }
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

/// Compact JSON. `serde_json::Map` is key-sorted, so source key order in
/// the YAML never reaches the hash.
fn canonicalize_json(v: &Value) -> Result<String> {
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// Unused-key guard
// ---------------------------------------------------------------------------

/// JSON pointers read by [`ReportConfig::from_config_json`].
///
/// Keep this list in step with the reads in `report.rs`.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/report/timezone",
    "/report/spread_mode",
    "/report/velocity_window",
    "/report/chart_range",
    "/history/page_size",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Sorted.
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// List every leaf of `config_json` that no report reads.
///
/// `Warn` always returns the report; `Fail` errors when anything is unused.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let mut unused = Vec::new();
    collect_leaves(config_json, String::new(), &mut unused);
    unused.retain(|leaf| !CONSUMED_POINTERS.contains(&leaf.as_str()));
    unused.sort();

    if policy == UnusedKeyPolicy::Fail && !unused.is_empty() {
        bail!("CONFIG_UNUSED_KEYS: no report reads {}", unused.join(", "));
    }

    Ok(UnusedKeyReport {
        unused_leaf_pointers: unused,
    })
}

/// Anything that is not a non-empty mapping is a leaf; report settings are
/// all scalars.
fn collect_leaves(v: &Value, at: String, out: &mut Vec<String>) {
    match v {
        Value::Object(map) if !map.is_empty() => {
            for (k, child) in map {
                collect_leaves(child, format!("{at}/{k}"), out);
            }
        }
        _ if !at.is_empty() => out.push(at),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_stop_at_scalars_and_lists() {
        let v = serde_json::json!({"report": {"timezone": "UTC", "extra": [1, 2]}, "empty": {}});
        let mut out = Vec::new();
        collect_leaves(&v, String::new(), &mut out);
        out.sort();
        assert_eq!(out, vec!["/empty", "/report/extra", "/report/timezone"]);
    }

    #[test]
    fn fail_message_names_the_keys() {
        let v = serde_json::json!({"report": {"colour": "blue"}});
        let err = report_unused_keys(&v, UnusedKeyPolicy::Fail).unwrap_err();
        assert_eq!(err.to_string(), "CONFIG_UNUSED_KEYS: no report reads /report/colour");
    }

    #[test]
    fn empty_layers_are_ignored() {
        let a = load_layered_yaml_from_strings(&["", "report:\n  timezone: UTC\n"]).unwrap();
        let b = load_layered_yaml_from_strings(&["report:\n  timezone: UTC\n"]).unwrap();
        assert_eq!(a.config_hash, b.config_hash);
    }

    #[test]
    fn scalar_top_level_is_rejected() {
        let err = load_layered_yaml_from_strings(&["42"]).unwrap_err();
        assert!(err.to_string().contains("CONFIG_NOT_A_MAPPING"));
    }
}
