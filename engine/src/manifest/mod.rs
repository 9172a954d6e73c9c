//! Manifest System
//!
//! Wire types and structural validation for UI engine manifests.

pub mod types;
pub mod validation;

pub use types::{
    sort_by_order, Action, Component, ContractInfo, DataSource, Layout, LayoutArea, Manifest,
    NavigationGroup, NavigationNode, NodeType, Ordered, Screen, SCHEMA_VERSION,
};
pub use validation::{
    assert_manifest, decode_manifest, validate_manifest, ValidationError, ValidationIssue,
};
