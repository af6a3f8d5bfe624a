// SPDX-License-Identifier: LGPL-3.0-only
//! Breadcrumb trail for navigation within hierarchical structures.
//!
//! The trail lets users trace their way back to parent levels of a folder
//! structure, a web page or documentation. When the container is too narrow
//! the leading crumbs collapse into one overflow group so the current
//! location, the last crumb, always stays visible.

use crate::adapter::{present, PresentationAdapter};
use crease_core::binding::{MeasurementBinding, ResizeObserver};
use crease_core::collapsible::Collapsible;
use crease_core::item::{ItemFlags, ItemId, Measurable};
use crease_core::layout::{CollapsePolicy, LayoutContext};
use crease_core::signal::state::StateSignal;
use crease_core::signal::Signal;
use nalgebra::Vector2;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Default separator drawn between crumbs.
pub const DEFAULT_SEPARATOR: &str = " > ";

/// Errors of breadcrumb navigation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreadcrumbsError {
    /// The index does not name a crumb of the trail.
    #[error("Breadcrumb index {index} out of range (trail has {len} items)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of crumbs.
        len: usize,
    },

    /// No crumb carries the id.
    #[error("Breadcrumb not found: {0}")]
    ItemNotFound(ItemId),
}

/// Represents a single breadcrumb item in the navigation path
#[derive(Clone, Debug, PartialEq)]
pub struct BreadcrumbItem {
    /// The display text for this breadcrumb
    pub label: String,
    /// Identifier for this breadcrumb (e.g., path, URL). Defaults to the label.
    pub id: ItemId,
    /// Whether this breadcrumb is clickable
    pub clickable: bool,
    /// Whether a leading icon is shown
    pub icon: bool,
}

impl BreadcrumbItem {
    /// Create a new breadcrumb item
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: ItemId::Name(label.clone()),
            label,
            clickable: true,
            icon: false,
        }
    }

    /// Set the identifier for this breadcrumb
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set whether this breadcrumb is clickable
    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// Set whether a leading icon is shown
    pub fn with_icon(mut self, icon: bool) -> Self {
        self.icon = icon;
        self
    }
}

impl Measurable for BreadcrumbItem {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn flags(&self) -> ItemFlags {
        let mut flags = ItemFlags::empty();
        flags.set(ItemFlags::ICON, self.icon);
        flags.set(ItemFlags::DISABLED, !self.clickable);
        flags
    }
}

type NavigateCallback = Rc<dyn Fn(&BreadcrumbItem)>;

/// A breadcrumb trail that collapses its leading crumbs when space runs out.
///
/// The last crumb is the current location and is treated as the active item.
///
/// ### Usage Examples
///
/// ```rust
/// use crease_widgets::breadcrumbs::{BreadcrumbItem, Breadcrumbs};
/// use nalgebra::Vector2;
///
/// let breadcrumbs = Breadcrumbs::new().with_items(vec![
///     BreadcrumbItem::new("Home").with_id("/home/user"),
///     BreadcrumbItem::new("Documents").with_id("/home/user/Documents"),
///     BreadcrumbItem::new("Projects").with_id("/home/user/Documents/Projects"),
///     BreadcrumbItem::new("MyApp").with_clickable(false),
/// ]);
///
/// breadcrumbs.resize(Vector2::new(180.0, 24.0));
/// let visible = breadcrumbs.visible();
/// assert!(visible[0].is_group());
/// assert_eq!(visible.last().and_then(|e| e.as_item()).map(|i| i.label.as_str()), Some("MyApp"));
/// ```
pub struct Breadcrumbs {
    items: StateSignal<Vec<BreadcrumbItem>>,
    binding: MeasurementBinding<BreadcrumbItem>,
    separator: String,
    on_navigate: Option<NavigateCallback>,
}

impl std::fmt::Debug for Breadcrumbs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Breadcrumbs")
            .field("items", &self.items())
            .field("separator", &self.separator)
            .field("available_width", &self.binding.available_width())
            .finish()
    }
}

impl Breadcrumbs {
    /// Create an empty trail with the default layout context.
    pub fn new() -> Self {
        let separator = DEFAULT_SEPARATOR.to_string();
        let context = with_separator_width(LayoutContext::default(), &separator);
        let binding = MeasurementBinding::new(Vec::new(), context, CollapsePolicy::head());
        let items = StateSignal::new(Vec::new());
        binding.bind_items_with_active(&items, current_id);

        Self {
            items,
            binding,
            separator,
            on_navigate: None,
        }
    }

    /// Set the breadcrumb items
    pub fn with_items(self, items: Vec<BreadcrumbItem>) -> Self {
        self.items.set_value(items);
        self
    }

    /// Drive the trail from an external signal.
    ///
    /// Changes made through the signal and through this widget are visible to both.
    pub fn with_items_signal(mut self, items: StateSignal<Vec<BreadcrumbItem>>) -> Self {
        self.binding.bind_items_with_active(&items, current_id);
        self.items = items;
        self
    }

    /// Set the separator between breadcrumb items (default: " > ")
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self.binding
            .set_context(with_separator_width(self.binding.context(), &self.separator));
        self
    }

    /// Set the layout context used for width estimation.
    ///
    /// The separator width is derived from the separator text.
    pub fn with_context(self, context: LayoutContext) -> Self {
        self.binding
            .set_context(with_separator_width(context, &self.separator));
        self
    }

    /// Keep at least `count` crumbs visible next to the overflow group.
    pub fn with_min_visible(self, count: usize) -> Self {
        self.binding
            .set_policy(CollapsePolicy::head().with_min_visible(count));
        self
    }

    /// Set the callback for when the trail navigates to a crumb
    pub fn with_on_navigate<F>(mut self, callback: F) -> Self
    where
        F: Fn(&BreadcrumbItem) + 'static,
    {
        self.on_navigate = Some(Rc::new(callback));
        self
    }

    /// Get the current breadcrumb items
    pub fn items(&self) -> Vec<BreadcrumbItem> {
        self.items.get().clone()
    }

    /// Get the items signal
    pub fn items_signal(&self) -> StateSignal<Vec<BreadcrumbItem>> {
        self.items.clone()
    }

    /// The current location, i.e. the last crumb.
    pub fn current(&self) -> Option<BreadcrumbItem> {
        self.items.get().last().cloned()
    }

    /// The separator text.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Add a breadcrumb item
    pub fn add_item(&self, item: BreadcrumbItem) {
        self.items.mutate(|items| items.push(item));
    }

    /// Remove the last breadcrumb item (navigate back)
    pub fn pop_item(&self) -> Option<BreadcrumbItem> {
        let mut result = None;
        self.items.mutate(|items| result = items.pop());
        result
    }

    /// Clear all breadcrumb items
    pub fn clear(&self) {
        self.items.mutate(|items| items.clear());
    }

    /// Navigate to a specific breadcrumb by index (removes items after it)
    pub fn navigate_to_index(&self, index: usize) -> Result<(), BreadcrumbsError> {
        let len = self.items.get().len();
        if index >= len {
            return Err(BreadcrumbsError::IndexOutOfRange { index, len });
        }

        if index + 1 < len {
            log::debug!("Breadcrumbs: navigating to {} of {}", index, len);
            self.items.mutate(|items| items.truncate(index + 1));
        }

        if let (Some(callback), Some(current)) = (&self.on_navigate, self.current()) {
            callback(&current);
        }
        Ok(())
    }

    /// Navigate to the crumb with the given id (removes items after it)
    pub fn navigate_to(&self, id: &ItemId) -> Result<(), BreadcrumbsError> {
        let index = self.items.get().iter().position(|item| &item.id == id);
        match index {
            Some(index) => self.navigate_to_index(index),
            None => Err(BreadcrumbsError::ItemNotFound(id.clone())),
        }
    }

    /// Report the container size; only the width is used.
    pub fn resize(&self, size: Vector2<f32>) {
        self.binding.observe_size(size);
    }

    /// Follow container widths reported by `observer`.
    pub fn attach<O: ResizeObserver + 'static>(&mut self, observer: Rc<RefCell<O>>) {
        self.binding.attach(observer);
    }

    /// The collapsed trail as it should be shown.
    pub fn visible(&self) -> Vec<Collapsible<BreadcrumbItem>> {
        self.binding.collapsed()
    }

    /// The signal carrying the collapsed trail.
    pub fn visible_signal(&self) -> StateSignal<Vec<Collapsible<BreadcrumbItem>>> {
        self.binding.output()
    }

    /// Render the collapsed trail through `adapter`.
    pub fn present<A: PresentationAdapter<BreadcrumbItem>>(&self, adapter: &mut A) -> Vec<A::Output> {
        let context = self.binding.context();
        let active = self.binding.active_id();
        present(&self.visible(), active.as_ref(), &context.more_label, adapter)
    }
}

impl Default for Breadcrumbs {
    fn default() -> Self {
        Self::new()
    }
}

fn current_id(items: &[BreadcrumbItem]) -> Option<ItemId> {
    items.last().map(|item| item.id.clone())
}

fn with_separator_width(context: LayoutContext, separator: &str) -> LayoutContext {
    let width = if separator.is_empty() {
        0.0
    } else {
        context.text_width(separator)
    };
    context.with_separator_px(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail() -> Breadcrumbs {
        Breadcrumbs::new().with_items(vec![
            BreadcrumbItem::new("Home"),
            BreadcrumbItem::new("Documents"),
            BreadcrumbItem::new("Projects"),
            BreadcrumbItem::new("crease"),
        ])
    }

    #[test]
    fn test_separator_width_follows_text() {
        let narrow = Breadcrumbs::new().with_separator("/");
        let wide = Breadcrumbs::new().with_separator("  >>  ");
        assert!(narrow.binding.context().separator_px < wide.binding.context().separator_px);

        let none = Breadcrumbs::new().with_separator("");
        assert_eq!(none.binding.context().separator_px, 0.0);
    }

    #[test]
    fn test_last_crumb_is_active() {
        let breadcrumbs = trail();
        assert_eq!(breadcrumbs.binding.active_id(), Some(ItemId::from("crease")));

        breadcrumbs.pop_item();
        assert_eq!(breadcrumbs.binding.active_id(), Some(ItemId::from("Projects")));

        breadcrumbs.clear();
        assert_eq!(breadcrumbs.binding.active_id(), None);
    }

    #[test]
    fn test_navigate_out_of_range() {
        let breadcrumbs = trail();
        assert_eq!(
            breadcrumbs.navigate_to_index(4),
            Err(BreadcrumbsError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(breadcrumbs.items().len(), 4);
    }

    #[test]
    fn test_flags_follow_item_state() {
        let item = BreadcrumbItem::new("Root").with_icon(true).with_clickable(false);
        assert_eq!(item.flags(), ItemFlags::ICON | ItemFlags::DISABLED);
    }
}
