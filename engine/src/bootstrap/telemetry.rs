//! Telemetry events emitted on cache, load and validation milestones.

use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryKind {
    CacheHit,
    CacheMiss,
    ManifestLoaded,
    ManifestInvalid,
    ContractChecked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Current,
    ByUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub kind: TelemetryKind,
    pub source: LoadSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_count: Option<usize>,
}

impl TelemetryEvent {
    pub fn new(kind: TelemetryKind, source: LoadSource, user_id: Option<&str>) -> Self {
        Self {
            kind,
            source,
            user_id: user_id.map(str::to_string),
            elapsed_ms: None,
            schema_version: None,
            issue_count: None,
        }
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: i64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }

    pub fn with_schema_version(mut self, schema_version: impl Into<String>) -> Self {
        self.schema_version = Some(schema_version.into());
        self
    }

    pub fn with_issue_count(mut self, issue_count: usize) -> Self {
        self.issue_count = Some(issue_count);
        self
    }
}

/// Callback receiving one event per significant action
pub type TelemetrySink = Arc<dyn Fn(&TelemetryEvent) + Send + Sync>;
