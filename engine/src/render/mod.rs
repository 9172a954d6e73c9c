//! Render Plans
//!
//! Turns a screen's component list into an ordered, adapter-resolved plan.

pub mod adapter;

use serde::Serialize;
use std::collections::HashMap;

use crate::manifest::{sort_by_order, Screen};

pub use adapter::{DefaultRenderAdapter, Framework, LayeredRenderAdapter, RenderAdapter};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlanItem {
    pub component_key: String,
    pub slot: String,
    pub order: i64,
    pub resolved_component_type: String,
    pub props: HashMap<String, String>,
}

/// Components sorted ascending by `order` (stable), types resolved through
/// `adapter`, props passed through unmodified. The screen is not touched.
pub fn build_render_plan(screen: &Screen, adapter: &dyn RenderAdapter) -> Vec<RenderPlanItem> {
    sort_by_order(screen.components.iter().collect())
        .into_iter()
        .map(|component| RenderPlanItem {
            component_key: component.component_key.clone(),
            slot: component.slot.clone(),
            order: component.order,
            resolved_component_type: adapter.resolve_component_type(&component.component_type),
            props: component.props.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::fixtures::ops_manifest;
    use crate::runtime::Runtime;
    use std::sync::Arc;

    #[test]
    fn test_plan_uses_adapter_mapping() {
        let runtime = Runtime::new(Arc::new(ops_manifest()));
        let screen = runtime.resolve_screen_by_key("screen:ops").unwrap();
        let adapter = DefaultRenderAdapter::new(HashMap::from([(
            "page-content".to_string(),
            "PrimeTableShell".to_string(),
        )]));

        let plan = build_render_plan(screen, &adapter);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].component_key, "component:ops:tabs");
        assert_eq!(plan[0].resolved_component_type, "data-grid");
        assert_eq!(plan[1].component_key, "component:ops:main");
        assert_eq!(plan[1].resolved_component_type, "PrimeTableShell");
        assert_eq!(plan[1].props.get("test").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_plan_sort_is_stable_and_leaves_screen_untouched() {
        let mut screen = ops_manifest().screens[0].clone();
        for component in &mut screen.components {
            component.order = 5;
        }
        let before = screen.clone();

        let plan = build_render_plan(&screen, &DefaultRenderAdapter::default());

        let keys: Vec<&str> = plan.iter().map(|item| item.component_key.as_str()).collect();
        assert_eq!(keys, vec!["component:ops:main", "component:ops:tabs"]);
        assert_eq!(screen, before);
    }

    #[test]
    fn test_plan_serializes_camel_case() {
        let screen = ops_manifest().screens[0].clone();
        let plan = build_render_plan(&screen, &Framework::PrimeNg.adapter(HashMap::new()));
        let value = serde_json::to_value(&plan).unwrap();

        assert_eq!(value[1]["resolvedComponentType"], "MPrimeNgPageContent");
        assert_eq!(value[1]["componentKey"], "component:ops:main");
    }
}
