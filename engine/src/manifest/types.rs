//! Manifest Types
//!
//! Rust structs matching the UI engine manifest JSON schema `mui.engine.v1`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Manifest schema version
pub const SCHEMA_VERSION: &str = "mui.engine.v1";

/// Declarative UI manifest issued by the authorization service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub schema_version: String,
    pub generated_at_utc: String,
    pub user_id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub navigation_groups: Vec<NavigationGroup>,
    pub screens: Vec<Screen>,
    pub actions: Vec<Action>,
    pub data_sources: Vec<DataSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationGroup {
    pub group_name: String,
    pub group_display_name: String,
    #[serde(default)]
    pub items: Vec<NavigationNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Menu,
    Tab,
    Action,
}

/// Navigation tree entry; leaf or container of further nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
    pub node_key: String,
    pub ui_key: String,
    #[serde(default)]
    pub parent_ui_key: Option<String>,
    pub title: String,
    pub route: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub icon: Option<String>,
    pub order: i64,
    pub is_visible: bool,
    pub is_enabled: bool,
    #[serde(default)]
    pub disabled_reason: Option<String>,
    #[serde(default)]
    pub screen_key: Option<String>,
    #[serde(default)]
    pub action_keys: Vec<String>,
    #[serde(default)]
    pub children: Vec<NavigationNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub screen_key: String,
    pub ui_key: String,
    pub title: String,
    pub route: String,
    pub is_visible: bool,
    pub is_enabled: bool,
    #[serde(default)]
    pub disabled_reason: Option<String>,
    #[serde(default)]
    pub data_source_key: Option<String>,
    #[serde(default)]
    pub action_keys: Vec<String>,
    pub layout: Layout,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub template: String,
    #[serde(default)]
    pub areas: Vec<LayoutArea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutArea {
    pub area_key: String,
    pub purpose: String,
    pub order: i64,
}

/// Renderable component descriptor. `screen_key` is a back-reference only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub component_key: String,
    pub ui_key: String,
    pub screen_key: String,
    pub component_type: String,
    pub slot: String,
    pub order: i64,
    #[serde(default)]
    pub data_source_key: Option<String>,
    #[serde(default)]
    pub action_keys: Vec<String>,
    #[serde(default)]
    pub props: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub action_key: String,
    pub ui_key: String,
    pub permission_name: String,
    pub label: String,
    pub route: String,
    pub action_type: String,
    pub is_visible: bool,
    pub is_enabled: bool,
    #[serde(default)]
    pub disabled_reason: Option<String>,
    #[serde(default)]
    pub target_screen_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub data_source_key: String,
    pub ui_key: String,
    pub screen_key: String,
    pub endpoint_path: String,
    pub http_method: String,
    #[serde(default)]
    pub request_model: Option<String>,
    #[serde(default)]
    pub response_model: Option<String>,
}

/// Contract introspection payload reported by a manifest backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    pub runtime_schema_version: String,
    #[serde(default)]
    pub supported_schema_versions: Vec<String>,
    pub current_manifest_endpoint: String,
    pub user_manifest_endpoint_template: String,
    pub generated_at_utc: String,
}

impl ContractInfo {
    pub fn supports(&self, schema_version: &str) -> bool {
        self.supported_schema_versions
            .iter()
            .any(|v| v == schema_version)
    }
}

impl NavigationGroup {
    /// Top-level items in presentation order.
    ///
    /// Ordering only: apply it to a pruned group, where hidden parents that
    /// still lead to visible descendants are kept on purpose.
    pub fn ordered_items(&self) -> Vec<&NavigationNode> {
        sort_by_order(self.items.iter().collect())
    }
}

impl NavigationNode {
    /// Children in presentation order
    pub fn ordered_children(&self) -> Vec<&NavigationNode> {
        sort_by_order(self.children.iter().collect())
    }
}

/// Anything carrying a sibling `order` field.
pub trait Ordered {
    fn order(&self) -> i64;
}

impl Ordered for NavigationNode {
    fn order(&self) -> i64 {
        self.order
    }
}

impl Ordered for Component {
    fn order(&self) -> i64 {
        self.order
    }
}

impl Ordered for LayoutArea {
    fn order(&self) -> i64 {
        self.order
    }
}

impl<T: Ordered + ?Sized> Ordered for &T {
    fn order(&self) -> i64 {
        (**self).order()
    }
}

/// Ascending by `order`; ties keep their input position.
pub fn sort_by_order<T: Ordered>(mut items: Vec<T>) -> Vec<T> {
    // sort_by_key is stable
    items.sort_by_key(|item| item.order());
    items
}
