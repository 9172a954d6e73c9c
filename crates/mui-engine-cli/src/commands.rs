use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use mui_engine::{
    build_render_plan, decode_manifest, validate_manifest, Bootstrapper, EngineConfig, Framework,
    Runtime, TelemetryEvent, TelemetrySink,
};
use mui_engine_http::HttpManifestProvider;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

fn read_manifest(file: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let raw = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    Ok(raw)
}

fn load_runtime(file: &Path) -> anyhow::Result<Runtime> {
    let raw = read_manifest(file)?;
    let manifest = decode_manifest(&raw).map_err(|e| {
        for issue in &e.issues {
            eprintln!("{}: {}", issue.path, issue.message);
        }
        anyhow::anyhow!(e)
    })?;
    Ok(Runtime::new(Arc::new(manifest)))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print every issue; returns whether the manifest is clean
pub fn validate(file: &Path) -> anyhow::Result<bool> {
    let raw = read_manifest(file)?;
    let issues = validate_manifest(&raw);

    if issues.is_empty() {
        println!("{}: ok", file.display());
        return Ok(true);
    }

    for issue in &issues {
        println!("{}: {}", issue.path, issue.message);
    }
    println!("{} issue(s) in {}", issues.len(), file.display());
    Ok(false)
}

pub fn snapshot(file: &Path) -> anyhow::Result<()> {
    let runtime = load_runtime(file)?;
    print_json(&runtime.snapshot())
}

pub fn plan(file: &Path, screen: &str, framework: &str) -> anyhow::Result<()> {
    let runtime = load_runtime(file)?;
    let framework: Framework = framework.parse().map_err(anyhow::Error::msg)?;

    let Some(screen) = runtime
        .resolve_screen_by_key(screen)
        .or_else(|| runtime.resolve_screen_by_route(screen))
    else {
        bail!("no screen with key or route {:?}", screen);
    };

    let adapter = framework.adapter(HashMap::new());
    print_json(&build_render_plan(screen, &adapter))
}

pub async fn fetch(
    config: &EngineConfig,
    user: Option<&str>,
    contract: Option<&str>,
) -> anyhow::Result<()> {
    let provider = HttpManifestProvider::from_config(config)?;

    let sink: TelemetrySink = Arc::new(|event: &TelemetryEvent| {
        info!(
            kind = ?event.kind,
            source = ?event.source,
            user_id = event.user_id.as_deref().unwrap_or("-"),
            elapsed_ms = event.elapsed_ms.unwrap_or_default(),
            issue_count = event.issue_count.unwrap_or_default(),
            "telemetry"
        );
    });
    let bootstrapper = Bootstrapper::new(
        Arc::new(provider),
        config.bootstrap_options().with_telemetry(sink),
    );

    let expected = contract.unwrap_or(&config.expected_schema_version);
    ensure_contract(&bootstrapper, expected).await?;

    let runtime = match user {
        Some(user_id) => bootstrapper.load_runtime_by_user_id(user_id, false).await,
        None => bootstrapper.load_current_runtime(false).await,
    }
    .map_err(|e| {
        if let Some(issues) = e.validation_issues() {
            for issue in issues {
                eprintln!("{}: {}", issue.path, issue.message);
            }
        }
        anyhow::anyhow!(e)
    })?;

    print_json(&runtime.snapshot())
}

/// Fail unless the backend supports `expected`. Backends without contract
/// introspection are assumed compatible.
async fn ensure_contract(bootstrapper: &Bootstrapper, expected: &str) -> anyhow::Result<()> {
    if !bootstrapper.check_contract_compatibility(expected).await? {
        bail!("backend does not support schema version {}", expected);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mui_engine::{BootstrapOptions, FileManifestProvider, SCHEMA_VERSION};
    use serde_json::json;

    fn manifest_file(dir: &Path, value: &Value) -> std::path::PathBuf {
        let path = dir.join("manifest.json");
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    fn manifest() -> Value {
        json!({
            "schemaVersion": "mui.engine.v1",
            "generatedAtUtc": "2026-01-01T00:00:00Z",
            "userId": "u-1",
            "navigationGroups": [],
            "screens": [{
                "screenKey": "screen:home",
                "uiKey": "home",
                "title": "Home",
                "route": "/home",
                "isVisible": true,
                "isEnabled": true,
                "layout": { "template": "default-page" },
                "components": [{
                    "componentKey": "component:home:main",
                    "uiKey": "home",
                    "screenKey": "screen:home",
                    "componentType": "page-content",
                    "slot": "main",
                    "order": 0
                }]
            }],
            "actions": [],
            "dataSources": []
        })
    }

    #[test]
    fn test_validate_reports_clean_and_dirty_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = manifest_file(dir.path(), &manifest());
        assert!(validate(&good).unwrap());

        let bad = manifest_file(dir.path(), &json!({ "schemaVersion": "mui.engine.v0" }));
        assert!(!validate(&bad).unwrap());
    }

    #[test]
    fn test_plan_resolves_screen_by_route_or_key() {
        let dir = tempfile::tempdir().unwrap();
        let file = manifest_file(dir.path(), &manifest());

        assert!(plan(&file, "/home", "primeng").is_ok());
        assert!(plan(&file, "screen:home", "default").is_ok());
        assert!(plan(&file, "/missing", "default").is_err());
        assert!(plan(&file, "/home", "vue").is_err());
    }

    #[test]
    fn test_snapshot_rejects_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let file = manifest_file(dir.path(), &json!([]));
        assert!(snapshot(&file).is_err());
    }

    #[tokio::test]
    async fn test_ensure_contract_checks_expected_version() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("contract.json"),
            json!({
                "runtimeSchemaVersion": "mui.engine.v1",
                "supportedSchemaVersions": ["mui.engine.v1"],
                "currentManifestEndpoint": "/api/v1/auth/ui-engine/current",
                "userManifestEndpointTemplate": "/api/v1/auth/ui-engine/{userId}",
                "generatedAtUtc": "2026-01-01T00:00:00Z"
            })
            .to_string(),
        )
        .unwrap();
        let bootstrapper = Bootstrapper::new(
            Arc::new(FileManifestProvider::new(dir.path())),
            BootstrapOptions::default(),
        );

        let config = EngineConfig::default();
        assert!(ensure_contract(&bootstrapper, &config.expected_schema_version).await.is_ok());
        assert!(ensure_contract(&bootstrapper, SCHEMA_VERSION).await.is_ok());
        assert!(ensure_contract(&bootstrapper, "mui.engine.v2").await.is_err());
    }

    #[tokio::test]
    async fn test_ensure_contract_passes_without_introspection() {
        let dir = tempfile::tempdir().unwrap();
        let bootstrapper = Bootstrapper::new(
            Arc::new(FileManifestProvider::new(dir.path())),
            BootstrapOptions::default(),
        );
        assert!(ensure_contract(&bootstrapper, "mui.engine.v2").await.is_ok());
    }
}
