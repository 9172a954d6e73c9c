//! Manifest Validation
//!
//! Structural checks over an untyped payload. `validate_manifest` is the soft
//! form used for diagnostics; `assert_manifest` and `decode_manifest` guard the
//! load path so that nothing malformed reaches a runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{Manifest, SCHEMA_VERSION};

const TOP_LEVEL_SEQUENCES: [&str; 4] = ["navigationGroups", "screens", "actions", "dataSources"];

/// A single structural problem, located by a dotted/indexed path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Structural validation failure carrying every issue found
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid manifest. Issue count: {}", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

/// Collect every structural issue in `raw`. Never fails.
pub fn validate_manifest(raw: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let Some(root) = raw.as_object() else {
        issues.push(ValidationIssue::new("$", "manifest must be an object"));
        return issues;
    };

    if root.get("schemaVersion").and_then(Value::as_str) != Some(SCHEMA_VERSION) {
        issues.push(ValidationIssue::new(
            "schemaVersion",
            format!("schemaVersion must be '{}'", SCHEMA_VERSION),
        ));
    }

    for field in TOP_LEVEL_SEQUENCES {
        if !root.get(field).is_some_and(Value::is_array) {
            issues.push(ValidationIssue::new(field, format!("{} must be an array", field)));
        }
    }

    if let Some(screens) = root.get("screens").and_then(Value::as_array) {
        for (index, screen) in screens.iter().enumerate() {
            for field in ["screenKey", "route"] {
                if !has_non_empty_string(screen, field) {
                    issues.push(ValidationIssue::new(
                        format!("screens[{}].{}", index, field),
                        format!("{} is required", field),
                    ));
                }
            }
        }
    }

    if let Some(actions) = root.get("actions").and_then(Value::as_array) {
        for (index, action) in actions.iter().enumerate() {
            if !has_non_empty_string(action, "actionKey") {
                issues.push(ValidationIssue::new(
                    format!("actions[{}].actionKey", index),
                    "actionKey is required",
                ));
            }
        }
    }

    issues
}

/// Fail with the complete issue list when `raw` is structurally invalid
pub fn assert_manifest(raw: &Value) -> Result<(), ValidationError> {
    let issues = validate_manifest(raw);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

/// Assert, then decode into the typed model.
///
/// A payload that passes the structural checks but does not fit the typed
/// model is reported as a single issue at `$`.
pub fn decode_manifest(raw: &Value) -> Result<Manifest, ValidationError> {
    assert_manifest(raw)?;

    Manifest::deserialize(raw).map_err(|e| ValidationError {
        issues: vec![ValidationIssue::new("$", e.to_string())],
    })
}

fn has_non_empty_string(value: &Value, field: &str) -> bool {
    value
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}
