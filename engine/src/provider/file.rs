//! File Manifest Provider
//!
//! Serves manifests from a directory:
//!
//! ```text
//! <base>/current.json
//! <base>/users/<userId>.json
//! <base>/contract.json      (optional; enables contract introspection)
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{ContractIntrospection, ManifestProvider};
use crate::common::ProviderError;
use crate::manifest::ContractInfo;

/// Upper bound on a manifest file (1MB)
const MAX_MANIFEST_BYTES: u64 = 1_000_000;

pub struct FileManifestProvider {
    base_dir: PathBuf,
    has_contract: bool,
}

impl FileManifestProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let has_contract = base_dir.join("contract.json").is_file();
        info!(
            "File manifest provider at {:?} (contract introspection: {})",
            base_dir, has_contract
        );
        Self {
            base_dir,
            has_contract,
        }
    }

    fn user_path(&self, user_id: &str) -> Result<PathBuf, ProviderError> {
        if user_id.is_empty() || user_id.contains(['/', '\\']) || user_id.contains("..") {
            return Err(ProviderError::NotFound(format!("Invalid user id: {}", user_id)));
        }
        Ok(self.base_dir.join("users").join(format!("{}.json", user_id)))
    }
}

#[async_trait]
impl ManifestProvider for FileManifestProvider {
    async fn load_current(&self) -> Result<Value, ProviderError> {
        read_json_file(&self.base_dir.join("current.json")).await
    }

    async fn load_by_user_id(&self, user_id: &str) -> Result<Value, ProviderError> {
        let path = self.user_path(user_id)?;
        read_json_file(&path).await
    }

    fn contract_introspection(&self) -> Option<&dyn ContractIntrospection> {
        if self.has_contract {
            Some(self as &dyn ContractIntrospection)
        } else {
            None
        }
    }
}

#[async_trait]
impl ContractIntrospection for FileManifestProvider {
    async fn load_contract_info(&self) -> Result<ContractInfo, ProviderError> {
        let raw = read_json_file(&self.base_dir.join("contract.json")).await?;
        serde_json::from_value(raw)
            .map_err(|e| ProviderError::Decode(format!("Failed to parse contract info: {}", e)))
    }
}

/// Read and parse a JSON file, rejecting anything over the size limit
pub async fn read_json_file(path: &Path) -> Result<Value, ProviderError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ProviderError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(ProviderError::Io(format!("Failed to stat {:?}: {}", path, e))),
    };

    if metadata.len() > MAX_MANIFEST_BYTES {
        return Err(ProviderError::Io(format!(
            "Manifest file too large (max 1MB): {:?}",
            path
        )));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ProviderError::Io(format!("Failed to read {:?}: {}", path, e)))?;

    debug!("Read {} bytes from {:?}", content.len(), path);

    serde_json::from_str(&content)
        .map_err(|e| ProviderError::Decode(format!("Failed to parse JSON in {:?}: {}", path, e)))
}
