use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use mui_engine::{
    ContractInfo, ContractIntrospection, EngineConfig, EngineResult, ManifestProvider,
    ProviderError,
};

use crate::client::EngineClient;

pub const CURRENT_MANIFEST_PATH: &str = "/auth/ui-engine/current";

/// Manifest provider backed by the authorization service's REST endpoints
pub struct HttpManifestProvider {
    client: EngineClient,
    contract_path: Option<String>,
}

impl HttpManifestProvider {
    pub fn new(client: EngineClient) -> Self {
        Self {
            client,
            contract_path: None,
        }
    }

    /// Enable contract introspection through `path`
    pub fn with_contract_path(mut self, path: impl Into<String>) -> Self {
        self.contract_path = Some(path.into());
        self
    }

    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        let mut client = EngineClient::new(config.require_base_url()?, config.timeout())?;

        if let Some(token) = config.access_token.clone() {
            client = client.with_access_token(Arc::new(move || Some(token.clone())));
        }
        if let Some(tenant) = config.tenant_id.clone() {
            client = client.with_tenant_id(Arc::new(move || Some(tenant.clone())));
        }

        let mut provider = Self::new(client);
        if let Some(path) = &config.contract_path {
            provider = provider.with_contract_path(path.clone());
        }
        Ok(provider)
    }
}

pub fn user_manifest_path(user_id: &str) -> String {
    format!("/auth/ui-engine/{}", urlencoding::encode(user_id))
}

#[async_trait]
impl ManifestProvider for HttpManifestProvider {
    async fn load_current(&self) -> Result<Value, ProviderError> {
        self.client.get_json(CURRENT_MANIFEST_PATH).await
    }

    async fn load_by_user_id(&self, user_id: &str) -> Result<Value, ProviderError> {
        self.client.get_json(&user_manifest_path(user_id)).await
    }

    fn contract_introspection(&self) -> Option<&dyn ContractIntrospection> {
        self.contract_path
            .as_ref()
            .map(|_| self as &dyn ContractIntrospection)
    }
}

#[async_trait]
impl ContractIntrospection for HttpManifestProvider {
    async fn load_contract_info(&self) -> Result<ContractInfo, ProviderError> {
        let Some(path) = &self.contract_path else {
            return Err(ProviderError::NotFound("contract endpoint not configured".into()));
        };

        let raw = self.client.get_json(path).await?;
        serde_json::from_value(raw)
            .map_err(|e| ProviderError::Decode(format!("Failed to parse contract info: {}", e)))
    }
}
