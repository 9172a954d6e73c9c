//! Visibility pruning over the navigation tree.
//!
//! Post-order and non-mutating: every call builds a new tree and leaves the
//! loaded manifest untouched. Sibling order is preserved as stored; sorting by
//! `order` happens wherever nodes are presented.

use crate::manifest::{NavigationGroup, NavigationNode};

use super::can_render_node;

/// Prune a node. A hidden node survives as a pass-through container when at
/// least one descendant is visible, carrying only the surviving descendants.
pub fn prune_node(node: &NavigationNode) -> Option<NavigationNode> {
    let children = prune_nodes(&node.children);

    if !can_render_node(node) && children.is_empty() {
        return None;
    }

    Some(NavigationNode {
        children,
        ..clone_shallow(node)
    })
}

pub fn prune_nodes(nodes: &[NavigationNode]) -> Vec<NavigationNode> {
    nodes.iter().filter_map(prune_node).collect()
}

/// Prune a group; it survives only with at least one surviving item.
pub fn prune_group(group: &NavigationGroup) -> Option<NavigationGroup> {
    let items = prune_nodes(&group.items);
    if items.is_empty() {
        return None;
    }

    Some(NavigationGroup {
        group_name: group.group_name.clone(),
        group_display_name: group.group_display_name.clone(),
        items,
    })
}

// Copies every field except the subtree, which the caller rebuilds.
fn clone_shallow(node: &NavigationNode) -> NavigationNode {
    NavigationNode {
        node_key: node.node_key.clone(),
        ui_key: node.ui_key.clone(),
        parent_ui_key: node.parent_ui_key.clone(),
        title: node.title.clone(),
        route: node.route.clone(),
        node_type: node.node_type,
        icon: node.icon.clone(),
        order: node.order,
        is_visible: node.is_visible,
        is_enabled: node.is_enabled,
        disabled_reason: node.disabled_reason.clone(),
        screen_key: node.screen_key.clone(),
        action_keys: node.action_keys.clone(),
        children: Vec::new(),
    }
}
