//! Manifest Runtime
//!
//! Read-only view over a validated manifest with O(1) route/key lookup and
//! visibility-filtered snapshots for rendering adapters.
//!
//! Visibility and enablement are server-authoritative: the predicates below
//! mirror `isVisible` / `isEnabled` and nothing else.

pub mod prune;

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::manifest::{Action, Manifest, NavigationGroup, NavigationNode, Screen};

/// Visibility-filtered payload handed to rendering adapters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSnapshot {
    pub navigation_groups: Vec<NavigationGroup>,
    pub screens: Vec<Screen>,
    pub actions: Vec<Action>,
}

/// Runtime over a manifest that has already passed validation
#[derive(Debug)]
pub struct Runtime {
    manifest: Arc<Manifest>,
    /// route → index into `manifest.screens`
    screens_by_route: HashMap<String, usize>,
    /// screenKey → index into `manifest.screens`
    screens_by_key: HashMap<String, usize>,
    /// actionKey → index into `manifest.actions`
    actions_by_key: HashMap<String, usize>,
}

impl Runtime {
    pub fn new(manifest: Arc<Manifest>) -> Self {
        let mut screens_by_route = HashMap::with_capacity(manifest.screens.len());
        let mut screens_by_key = HashMap::with_capacity(manifest.screens.len());
        let mut actions_by_key = HashMap::with_capacity(manifest.actions.len());

        // Duplicate keys overwrite earlier entries (last wins)
        for (idx, screen) in manifest.screens.iter().enumerate() {
            screens_by_route.insert(screen.route.clone(), idx);
            screens_by_key.insert(screen.screen_key.clone(), idx);
        }
        for (idx, action) in manifest.actions.iter().enumerate() {
            actions_by_key.insert(action.action_key.clone(), idx);
        }

        Self {
            manifest,
            screens_by_route,
            screens_by_key,
            actions_by_key,
        }
    }

    /// The raw, unfiltered manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn snapshot(&self) -> RuntimeSnapshot {
        RuntimeSnapshot {
            navigation_groups: self.visible_navigation_groups(),
            screens: self.visible_screens().into_iter().cloned().collect(),
            actions: self.visible_actions().into_iter().cloned().collect(),
        }
    }

    /// Navigation groups after recursive visibility pruning
    pub fn visible_navigation_groups(&self) -> Vec<NavigationGroup> {
        self.manifest
            .navigation_groups
            .iter()
            .filter_map(prune::prune_group)
            .collect()
    }

    pub fn resolve_screen_by_route(&self, route: &str) -> Option<&Screen> {
        let idx = self.screens_by_route.get(route)?;
        self.manifest.screens.get(*idx)
    }

    pub fn resolve_screen_by_key(&self, screen_key: &str) -> Option<&Screen> {
        let idx = self.screens_by_key.get(screen_key)?;
        self.manifest.screens.get(*idx)
    }

    pub fn resolve_action(&self, action_key: &str) -> Option<&Action> {
        let idx = self.actions_by_key.get(action_key)?;
        self.manifest.actions.get(*idx)
    }

    pub fn visible_screens(&self) -> Vec<&Screen> {
        self.manifest
            .screens
            .iter()
            .filter(|screen| can_render_screen(screen))
            .collect()
    }

    pub fn visible_actions(&self) -> Vec<&Action> {
        self.manifest
            .actions
            .iter()
            .filter(|action| can_render_action(action))
            .collect()
    }
}

pub fn can_render_node(node: &NavigationNode) -> bool {
    node.is_visible
}

pub fn can_render_screen(screen: &Screen) -> bool {
    screen.is_visible
}

pub fn can_render_action(action: &Action) -> bool {
    action.is_visible
}

pub fn can_execute_node(node: &NavigationNode) -> bool {
    node.is_enabled
}

pub fn can_execute_action(action: &Action) -> bool {
    action.is_enabled
}
