//! Manifest Providers
//!
//! Capability traits the bootstrapper consumes to fetch raw manifest payloads,
//! plus a directory-backed implementation for offline preview.

pub mod file;

use async_trait::async_trait;
use serde_json::Value;

use crate::common::ProviderError;
use crate::manifest::ContractInfo;

pub use file::FileManifestProvider;

/// Source of raw manifest payloads.
///
/// Payloads are returned untyped; the engine validates them before use.
#[async_trait]
pub trait ManifestProvider: Send + Sync {
    async fn load_current(&self) -> Result<Value, ProviderError>;

    async fn load_by_user_id(&self, user_id: &str) -> Result<Value, ProviderError>;

    /// Contract introspection, when the backend supports it
    fn contract_introspection(&self) -> Option<&dyn ContractIntrospection> {
        None
    }
}

/// Optional capability: report which schema versions the backend serves.
#[async_trait]
pub trait ContractIntrospection: Send + Sync {
    async fn load_contract_info(&self) -> Result<ContractInfo, ProviderError>;
}
