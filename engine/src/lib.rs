//! UI manifest engine.
//!
//! Validates server-issued UI manifests, caches them per identity with a TTL,
//! and exposes a queryable runtime (visibility-pruned navigation, route/key
//! resolution, render plans) for front-end rendering adapters.

pub mod bootstrap;
pub mod common;
pub mod config;
pub mod manifest;
pub mod provider;
pub mod render;
pub mod runtime;

pub use bootstrap::{
    BootstrapOptions, Bootstrapper, CacheKey, Clock, LoadSource, ManualClock, SystemClock,
    TelemetryEvent, TelemetryKind, TelemetrySink,
};
pub use common::{EngineError, EngineResult, ProviderError};
pub use config::EngineConfig;
pub use manifest::{
    assert_manifest, decode_manifest, validate_manifest, ContractInfo, Manifest,
    ValidationError, ValidationIssue, SCHEMA_VERSION,
};
pub use provider::{ContractIntrospection, FileManifestProvider, ManifestProvider};
pub use render::{build_render_plan, DefaultRenderAdapter, Framework, RenderAdapter, RenderPlanItem};
pub use runtime::{
    can_execute_action, can_execute_node, can_render_action, can_render_node, can_render_screen,
    Runtime, RuntimeSnapshot,
};
