// SPDX-License-Identifier: LGPL-3.0-only
use crate::item::{ItemId, Measurable};

/// An ordered, non-empty bucket of collapsed items.
///
/// Rendered as a single disclosure trigger whose content lists the items.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGroup<T> {
    items: Vec<T>,
}

impl<T> ItemGroup<T> {
    /// Create a group from its items. Returns [None] for an empty list.
    pub fn new(items: Vec<T>) -> Option<Self> {
        (!items.is_empty()).then_some(Self { items })
    }

    /// The grouped items in their original order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of grouped items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; groups are never empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the grouped items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Take the grouped items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Measurable> ItemGroup<T> {
    /// Check if the group contains an item with the given id.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// The grouped item matching `active_id`, if the active item was collapsed.
    pub fn active_member(&self, active_id: Option<&ItemId>) -> Option<&T> {
        let active_id = active_id?;
        self.items.iter().find(|item| item.id() == active_id)
    }

    /// Label of the disclosure trigger.
    ///
    /// Stands in for the active item when it is inside the group, otherwise
    /// shows `more_label`.
    pub fn trigger_label<'a>(&'a self, active_id: Option<&ItemId>, more_label: &'a str) -> &'a str {
        self.active_member(active_id)
            .and_then(|item| item.label())
            .unwrap_or(more_label)
    }
}

impl<'a, T> IntoIterator for &'a ItemGroup<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// One position of a collapsed strip: a plain item or the overflow group.
#[derive(Debug, Clone, PartialEq)]
pub enum Collapsible<T> {
    /// An item shown inline.
    Item(T),
    /// The overflow group.
    Group(ItemGroup<T>),
}

impl<T> Collapsible<T> {
    /// Check if this position holds the overflow group.
    pub fn is_group(&self) -> bool {
        matches!(self, Collapsible::Group(_))
    }

    /// Get the inline item.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Collapsible::Item(item) => Some(item),
            Collapsible::Group(_) => None,
        }
    }

    /// Get the overflow group.
    pub fn as_group(&self) -> Option<&ItemGroup<T>> {
        match self {
            Collapsible::Item(_) => None,
            Collapsible::Group(group) => Some(group),
        }
    }
}

/// Expand the overflow group back into a flat list of items.
pub fn flatten<T: Clone>(list: &[Collapsible<T>]) -> Vec<T> {
    let mut items = Vec::with_capacity(list.len());
    for element in list {
        match element {
            Collapsible::Item(item) => items.push(item.clone()),
            Collapsible::Group(group) => items.extend(group.iter().cloned()),
        }
    }
    items
}

/// The overflow group of a collapsed list, if any.
pub fn find_group<T>(list: &[Collapsible<T>]) -> Option<&ItemGroup<T>> {
    list.iter().find_map(Collapsible::as_group)
}

/// Number of items shown inline.
pub fn inline_count<T>(list: &[Collapsible<T>]) -> usize {
    list.iter().filter(|element| !element.is_group()).count()
}
