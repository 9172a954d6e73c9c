//! Manifest Bootstrapper
//!
//! Fetches manifests through a provider, validates them, wraps them in a
//! runtime and caches the result per identity with a TTL.
//!
//! The cache lock is never held across the provider call. Two overlapping
//! loads for the same key can therefore both miss and both reach the provider;
//! whichever completes last owns the slot.

pub mod cache;
pub mod clock;
pub mod telemetry;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::common::EngineResult;
use crate::manifest::{decode_manifest, SCHEMA_VERSION};
use crate::provider::ManifestProvider;
use crate::runtime::Runtime;

pub use cache::{CacheEntry, CacheKey};
pub use clock::{Clock, ManualClock, SystemClock};
pub use telemetry::{LoadSource, TelemetryEvent, TelemetryKind, TelemetrySink};

/// Default cache lifetime
pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);

#[derive(Clone)]
pub struct BootstrapOptions {
    pub ttl: Duration,
    pub clock: Arc<dyn Clock>,
    pub telemetry: Option<TelemetrySink>,
}

impl BootstrapOptions {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_telemetry(mut self, sink: TelemetrySink) -> Self {
        self.telemetry = Some(sink);
        self
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            clock: Arc::new(SystemClock),
            telemetry: None,
        }
    }
}

pub struct Bootstrapper {
    provider: Arc<dyn ManifestProvider>,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
    telemetry: Option<TelemetrySink>,
    cache: RwLock<HashMap<CacheKey, Arc<CacheEntry>>>,
}

impl Bootstrapper {
    pub fn new(provider: Arc<dyn ManifestProvider>, options: BootstrapOptions) -> Self {
        Self {
            provider,
            ttl_ms: i64::try_from(options.ttl.as_millis()).unwrap_or(i64::MAX),
            clock: options.clock,
            telemetry: options.telemetry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn load_current_runtime(&self, force_refresh: bool) -> EngineResult<Arc<Runtime>> {
        self.load(CacheKey::Current, force_refresh).await
    }

    pub async fn load_runtime_by_user_id(
        &self,
        user_id: &str,
        force_refresh: bool,
    ) -> EngineResult<Arc<Runtime>> {
        self.load(CacheKey::User(user_id.to_string()), force_refresh)
            .await
    }

    /// Drop every cached entry
    pub async fn reset_cache(&self) {
        let mut cache = self.cache.write().await;
        let dropped = cache.len();
        cache.clear();
        info!("Manifest cache reset ({} entries dropped)", dropped);
    }

    /// Keys with a cached entry, fresh or not
    pub async fn cached_keys(&self) -> Vec<CacheKey> {
        self.cache.read().await.keys().cloned().collect()
    }

    /// Whether the backend serves `expected_version`.
    ///
    /// Providers without contract introspection are assumed compatible.
    pub async fn check_contract_compatibility(&self, expected_version: &str) -> EngineResult<bool> {
        let Some(introspection) = self.provider.contract_introspection() else {
            debug!("Provider has no contract introspection; assuming compatible");
            return Ok(true);
        };

        let info = introspection.load_contract_info().await?;
        let compatible = info.supports(expected_version);

        self.emit(
            TelemetryEvent::new(TelemetryKind::ContractChecked, LoadSource::Current, None)
                .with_schema_version(info.runtime_schema_version.clone()),
        );

        if !compatible {
            warn!(
                "Backend serves {} (supported: {:?}); expected {}",
                info.runtime_schema_version, info.supported_schema_versions, expected_version
            );
        }

        Ok(compatible)
    }

    /// Contract check against the engine's own schema version
    pub async fn check_default_contract(&self) -> EngineResult<bool> {
        self.check_contract_compatibility(SCHEMA_VERSION).await
    }

    async fn load(&self, key: CacheKey, force_refresh: bool) -> EngineResult<Arc<Runtime>> {
        let source = key.source();
        let user_id = key.user_id();
        let started_ms = self.clock.now_ms();

        if !force_refresh {
            let cached = self
                .cache
                .read()
                .await
                .get(&key)
                .filter(|entry| entry.is_fresh(started_ms))
                .map(|entry| Arc::clone(&entry.runtime));

            if let Some(runtime) = cached {
                self.emit(TelemetryEvent::new(TelemetryKind::CacheHit, source, user_id));
                return Ok(runtime);
            }
        }

        self.emit(TelemetryEvent::new(TelemetryKind::CacheMiss, source, user_id));

        let fetched = match &key {
            CacheKey::Current => self.provider.load_current().await,
            CacheKey::User(id) => self.provider.load_by_user_id(id).await,
        };
        let raw = fetched.map_err(|e| {
            warn!("Manifest provider failed for {}: {}", key, e);
            e
        })?;

        // A rejected manifest leaves any existing entry for this key in place
        let manifest = match decode_manifest(&raw) {
            Ok(manifest) => Arc::new(manifest),
            Err(e) => {
                warn!("Rejected manifest for {}: {} issues", key, e.issues.len());
                self.emit(
                    TelemetryEvent::new(TelemetryKind::ManifestInvalid, source, user_id)
                        .with_issue_count(e.issues.len()),
                );
                return Err(e.into());
            }
        };

        let runtime = Arc::new(Runtime::new(Arc::clone(&manifest)));
        let loaded_ms = self.clock.now_ms();
        let entry = CacheEntry {
            runtime: Arc::clone(&runtime),
            manifest: Arc::clone(&manifest),
            expires_at_ms: loaded_ms.saturating_add(self.ttl_ms),
        };

        self.cache.write().await.insert(key.clone(), Arc::new(entry));

        info!(
            "Loaded manifest for {}: {} screens, {} actions",
            key,
            manifest.screens.len(),
            manifest.actions.len()
        );
        self.emit(
            TelemetryEvent::new(TelemetryKind::ManifestLoaded, source, user_id)
                .with_elapsed_ms(loaded_ms - started_ms)
                .with_schema_version(manifest.schema_version.clone()),
        );

        Ok(runtime)
    }

    fn emit(&self, event: TelemetryEvent) {
        debug!(kind = ?event.kind, source = ?event.source, "Manifest telemetry");
        if let Some(sink) = &self.telemetry {
            sink(&event);
        }
    }
}
