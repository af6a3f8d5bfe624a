// SPDX-License-Identifier: LGPL-3.0-only
//! Tab strip whose trailing tabs collapse into an overflow menu.
//!
//! When the selected tab ends up in the overflow menu, the menu trigger shows
//! the selected tab's label instead of "More".

use crate::adapter::{present, PresentationAdapter};
use crease_core::binding::{MeasurementBinding, ResizeObserver};
use crease_core::collapsible::Collapsible;
use crease_core::item::{Badge, ItemFlags, ItemId, Measurable};
use crease_core::layout::{CollapsePolicy, LayoutContext};
use crease_core::signal::state::StateSignal;
use crease_core::signal::Signal;
use nalgebra::Vector2;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use thiserror::Error;

/// Error type for tab operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabsError {
    /// Tab ID not found
    #[error("Tab not found: {0}")]
    TabNotFound(ItemId),

    /// The tab is disabled and cannot be selected
    #[error("Tab is disabled: {0}")]
    TabDisabled(ItemId),

    /// The tab has no close affordance
    #[error("Tab cannot be closed: {0}")]
    NotClosable(ItemId),
}

/// A single tab item
#[derive(Clone, Debug, PartialEq)]
pub struct TabItem {
    /// Unique identifier for the tab
    pub id: ItemId,
    /// Display label for the tab
    pub label: String,
    /// Whether a leading icon is shown
    pub icon: bool,
    /// Optional badge (counter, marker)
    pub badge: Option<Badge>,
    /// Whether the tab shows a close button
    pub closable: bool,
    /// Whether the tab is enabled
    pub enabled: bool,
    /// Secondary text shown instead of the label in some layouts
    pub description: Option<String>,
}

impl TabItem {
    /// Create a new tab item
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: false,
            badge: None,
            closable: false,
            enabled: true,
            description: None,
        }
    }

    /// Set whether a leading icon is shown
    pub fn with_icon(mut self, icon: bool) -> Self {
        self.icon = icon;
        self
    }

    /// Attach a badge
    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Set whether the tab shows a close button
    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Set whether the tab is enabled
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the secondary text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Measurable for TabItem {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn flags(&self) -> ItemFlags {
        let mut flags = ItemFlags::empty();
        flags.set(ItemFlags::ICON, self.icon);
        flags.set(ItemFlags::CLOSABLE, self.closable);
        flags.set(ItemFlags::DISABLED, !self.enabled);
        flags
    }

    fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A horizontal tab strip that collapses its trailing tabs when space runs out.
///
/// ### Usage Examples
///
/// ```rust
/// use crease_widgets::tabs::{TabItem, Tabs};
/// use crease_widgets::adapter::TextAdapter;
///
/// let tabs = Tabs::new()
///     .with_tab(TabItem::new("main", "main.rs"))
///     .with_tab(TabItem::new("lib", "lib.rs").with_closable(true))
///     .with_tab(TabItem::new("cargo", "Cargo.toml"));
///
/// tabs.select(&"lib".into()).unwrap();
/// tabs.resize_width(Some(2000.0));
/// assert_eq!(tabs.present(&mut TextAdapter), vec!["main.rs", "[lib.rs]", "Cargo.toml"]);
/// ```
pub struct Tabs {
    tabs: StateSignal<Vec<TabItem>>,
    selected: StateSignal<Option<ItemId>>,
    binding: MeasurementBinding<TabItem>,
}

impl std::fmt::Debug for Tabs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tabs")
            .field("tabs", &self.tabs())
            .field("selected", &self.selected())
            .field("available_width", &self.binding.available_width())
            .finish()
    }
}

impl Tabs {
    /// Create an empty strip with the default layout context.
    pub fn new() -> Self {
        let tabs = StateSignal::new(Vec::new());
        let selected = StateSignal::new(None);
        let binding = MeasurementBinding::new(Vec::new(), LayoutContext::default(), CollapsePolicy::tail());
        binding.bind_items(&tabs);
        binding.bind_active(&selected);

        Self {
            tabs,
            selected,
            binding,
        }
    }

    /// Add a tab (builder pattern)
    pub fn with_tab(self, tab: TabItem) -> Self {
        self.add_tab(tab);
        self
    }

    /// Set the layout context used for width estimation.
    pub fn with_context(self, context: LayoutContext) -> Self {
        self.binding.set_context(context);
        self
    }

    /// Keep at least `count` tabs visible next to the overflow menu.
    pub fn with_min_visible(self, count: usize) -> Self {
        self.binding
            .set_policy(CollapsePolicy::tail().with_min_visible(count));
        self
    }

    /// Append a tab.
    ///
    /// The first enabled tab becomes selected when nothing is selected yet.
    pub fn add_tab(&self, tab: TabItem) {
        let select = self.selected.get().is_none() && tab.enabled;
        let id = tab.id.clone();

        self.tabs.mutate(|tabs| tabs.push(tab));
        self.validate_ids();

        if select {
            self.selected.set_value(Some(id));
        }
    }

    /// Select the tab with the given id.
    pub fn select(&self, id: &ItemId) -> Result<(), TabsError> {
        let enabled = self
            .tabs
            .get()
            .iter()
            .find(|tab| &tab.id == id)
            .map(|tab| tab.enabled);

        match enabled {
            None => Err(TabsError::TabNotFound(id.clone())),
            Some(false) => Err(TabsError::TabDisabled(id.clone())),
            Some(true) => {
                if self.selected.get().as_ref() != Some(id) {
                    self.selected.set_value(Some(id.clone()));
                }
                Ok(())
            },
        }
    }

    /// Close the tab with the given id and return it.
    ///
    /// Closing the selected tab selects its nearest enabled neighbour,
    /// preferring the one that takes its place.
    pub fn close(&self, id: &ItemId) -> Result<TabItem, TabsError> {
        let (index, closable) = {
            let tabs = self.tabs.get();
            let index = tabs
                .iter()
                .position(|tab| &tab.id == id)
                .ok_or_else(|| TabsError::TabNotFound(id.clone()))?;
            (index, tabs[index].closable)
        };

        if !closable {
            return Err(TabsError::NotClosable(id.clone()));
        }

        let was_selected = self.selected.get().as_ref() == Some(id);
        let mut removed = None;
        self.tabs.mutate(|tabs| removed = Some(tabs.remove(index)));

        if was_selected {
            let next = neighbour(&self.tabs.get(), index);
            log::debug!("Tabs: closed selected tab {}, selecting {:?}", id, next);
            self.selected.set_value(next);
        }

        removed.ok_or_else(|| TabsError::TabNotFound(id.clone()))
    }

    /// The selected tab id.
    pub fn selected(&self) -> Option<ItemId> {
        self.selected.get().clone()
    }

    /// The selected tab.
    pub fn selected_tab(&self) -> Option<TabItem> {
        let selected = self.selected.get();
        let id = selected.as_ref()?;
        let tabs = self.tabs.get();
        tabs.iter().find(|tab| &tab.id == id).cloned()
    }

    /// A copy of all tabs.
    pub fn tabs(&self) -> Vec<TabItem> {
        self.tabs.get().clone()
    }

    /// Get the tabs signal
    pub fn tabs_signal(&self) -> StateSignal<Vec<TabItem>> {
        self.tabs.clone()
    }

    /// Get the selection signal
    pub fn selected_signal(&self) -> StateSignal<Option<ItemId>> {
        self.selected.clone()
    }

    /// Report the container size; only the width is used.
    pub fn resize(&self, size: Vector2<f32>) {
        self.binding.observe_size(size);
    }

    /// Report the container width, or [None] while it is unknown.
    pub fn resize_width(&self, width: Option<f32>) {
        self.binding.observe_width(width);
    }

    /// Follow container widths reported by `observer`.
    pub fn attach<O: ResizeObserver + 'static>(&mut self, observer: Rc<RefCell<O>>) {
        self.binding.attach(observer);
    }

    /// The collapsed strip as it should be shown.
    pub fn visible(&self) -> Vec<Collapsible<TabItem>> {
        self.binding.collapsed()
    }

    /// The signal carrying the collapsed strip.
    pub fn visible_signal(&self) -> StateSignal<Vec<Collapsible<TabItem>>> {
        self.binding.output()
    }

    /// Render the collapsed strip through `adapter`.
    pub fn present<A: PresentationAdapter<TabItem>>(&self, adapter: &mut A) -> Vec<A::Output> {
        let context = self.binding.context();
        let selected = self.selected();
        present(&self.visible(), selected.as_ref(), &context.more_label, adapter)
    }

    fn validate_ids(&self) {
        let tabs = self.tabs.get();
        let mut seen = HashSet::with_capacity(tabs.len());
        for tab in tabs.iter() {
            if !seen.insert(&tab.id) {
                log::warn!("Tabs: Duplicate tab ID detected: {}", tab.id);
            }
        }
    }
}

impl Default for Tabs {
    fn default() -> Self {
        Self::new()
    }
}

/// The enabled tab closest to `index` after the tab there was removed.
fn neighbour(tabs: &[TabItem], index: usize) -> Option<ItemId> {
    let after = tabs[index.min(tabs.len())..].iter().find(|tab| tab.enabled);
    let before = || tabs[..index.min(tabs.len())].iter().rev().find(|tab| tab.enabled);
    after.or_else(before).map(|tab| tab.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> Vec<TabItem> {
        vec![
            TabItem::new("a", "Alpha").with_closable(true),
            TabItem::new("b", "Beta").with_enabled(false),
            TabItem::new("c", "Gamma").with_closable(true),
        ]
    }

    #[test]
    fn test_neighbour_prefers_next_enabled() {
        let mut list = tabs();
        list.remove(0);
        assert_eq!(neighbour(&list, 0), Some(ItemId::from("c")));
    }

    #[test]
    fn test_neighbour_falls_back_to_previous() {
        let mut list = tabs();
        list.remove(2);
        assert_eq!(neighbour(&list, 2), Some(ItemId::from("a")));
    }

    #[test]
    fn test_neighbour_of_empty_strip() {
        assert_eq!(neighbour(&[], 0), None);
    }

    #[test]
    fn test_flags_follow_tab_state() {
        let tab = TabItem::new(1u64, "One")
            .with_icon(true)
            .with_closable(true)
            .with_enabled(false);
        assert_eq!(
            tab.flags(),
            ItemFlags::ICON | ItemFlags::CLOSABLE | ItemFlags::DISABLED
        );
    }
}
