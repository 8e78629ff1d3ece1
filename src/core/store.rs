//! Catalog state and its transitions.
//!
//! [`CatalogState`] is an immutable value; each event produces a new state
//! through [`CatalogState::transition`]. [`CatalogStore`] holds the current
//! state and exposes the operations the session and front ends use.

use std::sync::Arc;

use crate::domain::{Resource, Tab};

/// Snapshot of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Currently selected tab
    pub active_tab: Tab,

    /// Resources from the latest applied query, in API order
    pub resources: Arc<Vec<Resource>>,

    /// Current contents of the search box
    pub pending_search_term: String,
}

/// Something that happened to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// Initial load finished (or fell back to empty)
    Initialized(Vec<Resource>),

    /// User picked a tab
    TabSelected(Tab),

    /// The latest search completed
    SearchApplied(Vec<Resource>),

    /// Search box contents changed
    SearchTermChanged(String),
}

impl CatalogState {
    /// Pure transition function
    pub fn transition(&self, event: CatalogEvent) -> CatalogState {
        match event {
            CatalogEvent::Initialized(resources) => CatalogState {
                active_tab: Tab::All,
                resources: Arc::new(resources),
                pending_search_term: self.pending_search_term.clone(),
            },
            CatalogEvent::TabSelected(tab) => CatalogState {
                active_tab: tab,
                ..self.clone()
            },
            CatalogEvent::SearchApplied(resources) => CatalogState {
                resources: Arc::new(resources),
                ..self.clone()
            },
            CatalogEvent::SearchTermChanged(term) => CatalogState {
                pending_search_term: term,
                ..self.clone()
            },
        }
    }

    /// Resources under the active tab, in original order
    pub fn visible_resources(&self) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| self.active_tab.matches(&r.kind))
            .collect()
    }

    /// The first `max` featured resources, in original order, one each
    pub fn featured_resources(&self, max: usize) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.featured)
            .take(max)
            .collect()
    }
}

/// Holder of the current catalog state
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    state: CatalogState,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial resources and reset to the `All` tab
    pub fn initialize(&mut self, resources: Vec<Resource>) {
        self.apply(CatalogEvent::Initialized(resources));
    }

    /// Switch tabs. Local only, never fetches.
    pub fn select_tab(&mut self, tab: Tab) {
        self.apply(CatalogEvent::TabSelected(tab));
    }

    /// Replace the resources wholesale, keeping the active tab
    pub fn apply_search_result(&mut self, resources: Vec<Resource>) {
        self.apply(CatalogEvent::SearchApplied(resources));
    }

    pub fn set_pending_term(&mut self, term: impl Into<String>) {
        self.apply(CatalogEvent::SearchTermChanged(term.into()));
    }

    pub fn visible_resources(&self) -> Vec<&Resource> {
        self.state.visible_resources()
    }

    pub fn featured_resources(&self, max: usize) -> Vec<&Resource> {
        self.state.featured_resources(max)
    }

    pub fn active_tab(&self) -> Tab {
        self.state.active_tab
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.state.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.resources.is_empty()
    }

    fn apply(&mut self, event: CatalogEvent) {
        self.state = self.state.transition(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Resource> {
        vec![
            Resource::new("Creed Booklet", "text"),
            Resource::new("Homily", "audio").featured(),
            Resource::new("Lecture", "video").featured(),
        ]
    }

    fn titles(resources: &[&Resource]) -> Vec<String> {
        resources.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_initialize_resets_tab() {
        let mut store = CatalogStore::new();
        store.select_tab(Tab::Video);
        store.initialize(sample());

        assert_eq!(store.active_tab(), Tab::All);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_visible_all_keeps_order() {
        let mut store = CatalogStore::new();
        store.initialize(sample());

        assert_eq!(
            titles(&store.visible_resources()),
            vec!["Creed Booklet", "Homily", "Lecture"]
        );
    }

    #[test]
    fn test_visible_filtered_by_tab() {
        let mut store = CatalogStore::new();
        store.initialize(sample());
        store.select_tab(Tab::Audio);

        assert_eq!(titles(&store.visible_resources()), vec!["Homily"]);
        assert_eq!(titles(&store.featured_resources(4)), vec!["Homily", "Lecture"]);
    }

    #[test]
    fn test_unknown_type_only_under_all() {
        let mut store = CatalogStore::new();
        store.initialize(vec![Resource::new("Brochure", "brochure")]);

        assert_eq!(store.visible_resources().len(), 1);
        for tab in [Tab::Audio, Tab::Text, Tab::Video] {
            store.select_tab(tab);
            assert!(store.visible_resources().is_empty());
        }
    }

    #[test]
    fn test_search_result_keeps_tab() {
        let mut store = CatalogStore::new();
        store.initialize(sample());
        store.select_tab(Tab::Video);

        store.apply_search_result(vec![
            Resource::new("Talk", "audio"),
            Resource::new("Documentary", "video"),
        ]);

        assert_eq!(store.active_tab(), Tab::Video);
        assert_eq!(titles(&store.visible_resources()), vec!["Documentary"]);
    }

    #[test]
    fn test_featured_first_four_in_order() {
        let mut resources = Vec::new();
        for i in 0..6 {
            resources.push(Resource::new(format!("featured {}", i), "text").featured());
            if i % 2 == 0 {
                resources.push(Resource::new(format!("plain {}", i), "text"));
            }
        }

        let mut store = CatalogStore::new();
        store.initialize(resources);

        assert_eq!(
            titles(&store.featured_resources(4)),
            vec!["featured 0", "featured 1", "featured 2", "featured 3"]
        );
    }

    #[test]
    fn test_transition_is_pure() {
        let before = CatalogState::default().transition(CatalogEvent::Initialized(sample()));
        let after = before.transition(CatalogEvent::TabSelected(Tab::Text));

        assert_eq!(before.active_tab, Tab::All);
        assert_eq!(after.active_tab, Tab::Text);
        // Tab selection shares the resource list instead of copying it
        assert!(Arc::ptr_eq(&before.resources, &after.resources));
    }
}
