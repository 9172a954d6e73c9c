//! Render Adapters
//!
//! Map abstract component descriptors (e.g. `page-content`) to concrete,
//! framework-specific component identifiers. Unmapped descriptors pass through
//! unchanged so newer component types still reach the consumer as raw strings.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Component-type resolution capability.
pub trait RenderAdapter: Send + Sync {
    fn resolve_component_type(&self, component_type: &str) -> String;
}

/// Dictionary-backed adapter with passthrough fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRenderAdapter {
    map: HashMap<String, String>,
}

impl DefaultRenderAdapter {
    /// Use exactly the given mapping
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    /// Seed mapping with caller overrides applied on top
    pub fn seeded(seed: &[(&str, &str)], overrides: HashMap<String, String>) -> Self {
        let mut map: HashMap<String, String> = seed
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        map.extend(overrides);
        Self { map }
    }
}

impl Default for DefaultRenderAdapter {
    fn default() -> Self {
        Self::seeded(DEFAULT_COMPONENTS, HashMap::new())
    }
}

impl RenderAdapter for DefaultRenderAdapter {
    fn resolve_component_type(&self, component_type: &str) -> String {
        self.map
            .get(component_type)
            .cloned()
            .unwrap_or_else(|| component_type.to_string())
    }
}

/// Overrides consulted first, then delegation to an inner adapter.
pub struct LayeredRenderAdapter<A> {
    overrides: HashMap<String, String>,
    inner: A,
}

impl<A: RenderAdapter> LayeredRenderAdapter<A> {
    pub fn new(inner: A, overrides: HashMap<String, String>) -> Self {
        Self { overrides, inner }
    }

    pub fn with_override(
        mut self,
        component_type: impl Into<String>,
        resolved: impl Into<String>,
    ) -> Self {
        self.overrides.insert(component_type.into(), resolved.into());
        self
    }
}

impl<A: RenderAdapter> RenderAdapter for LayeredRenderAdapter<A> {
    fn resolve_component_type(&self, component_type: &str) -> String {
        match self.overrides.get(component_type) {
            Some(resolved) => resolved.clone(),
            None => self.inner.resolve_component_type(component_type),
        }
    }
}

const DEFAULT_COMPONENTS: &[(&str, &str)] = &[
    ("page-content", "PageContent"),
    ("tab-content", "TabContent"),
    ("panel", "Panel"),
];

const PRIMENG_COMPONENTS: &[(&str, &str)] = &[
    ("page-content", "MPrimeNgPageContent"),
    ("tab-content", "MPrimeNgTabContent"),
    ("panel", "MPrimeNgPanel"),
];

/// Frameworks with a pre-seeded component mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framework {
    #[default]
    Default,
    PrimeNg,
}

impl Framework {
    fn seed(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Default => DEFAULT_COMPONENTS,
            Self::PrimeNg => PRIMENG_COMPONENTS,
        }
    }

    /// Adapter seeded with this framework's defaults; overrides win.
    pub fn adapter(self, overrides: HashMap<String, String>) -> DefaultRenderAdapter {
        DefaultRenderAdapter::seeded(self.seed(), overrides)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::PrimeNg => write!(f, "primeng"),
        }
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "primeng" | "prime-ng" => Ok(Self::PrimeNg),
            other => Err(format!("Unknown framework: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_default_mapping_and_passthrough() {
        let adapter = DefaultRenderAdapter::default();
        assert_eq!(adapter.resolve_component_type("page-content"), "PageContent");
        assert_eq!(adapter.resolve_component_type("panel"), "Panel");
        assert_eq!(adapter.resolve_component_type("data-grid"), "data-grid");
    }

    #[test]
    fn test_explicit_map_replaces_defaults() {
        let adapter = DefaultRenderAdapter::new(map(&[("page-content", "PrimeTableShell")]));
        assert_eq!(adapter.resolve_component_type("page-content"), "PrimeTableShell");
        assert_eq!(adapter.resolve_component_type("panel"), "panel");
    }

    #[test]
    fn test_primeng_seed_with_overrides() {
        let adapter = Framework::PrimeNg.adapter(map(&[("panel", "CustomPanel")]));
        assert_eq!(adapter.resolve_component_type("page-content"), "MPrimeNgPageContent");
        assert_eq!(adapter.resolve_component_type("panel"), "CustomPanel");
        assert_eq!(adapter.resolve_component_type("chart"), "chart");
    }

    #[test]
    fn test_layered_adapter_delegates() {
        let adapter =
            LayeredRenderAdapter::new(Framework::PrimeNg.adapter(HashMap::new()), HashMap::new())
                .with_override("chart", "MChart");
        assert_eq!(adapter.resolve_component_type("chart"), "MChart");
        assert_eq!(adapter.resolve_component_type("tab-content"), "MPrimeNgTabContent");
        assert_eq!(adapter.resolve_component_type("unknown"), "unknown");
    }

    #[test]
    fn test_framework_parsing() {
        assert_eq!("PrimeNG".parse::<Framework>().unwrap(), Framework::PrimeNg);
        assert_eq!("prime-ng".parse::<Framework>().unwrap(), Framework::PrimeNg);
        assert_eq!("default".parse::<Framework>().unwrap(), Framework::Default);
        assert!("vue".parse::<Framework>().is_err());
        assert_eq!(Framework::PrimeNg.to_string(), "primeng");
    }
}
