// SPDX-License-Identifier: LGPL-3.0-only
//! Greedy collapsing of overflowing strips into a single overflow group.
//!
//! Items leave the visible strip one at a time from the collapsing end until
//! the strip fits the available width. The working state is a single split
//! index over the borrowed input, so the transform never mutates or reorders
//! the caller's items and the output is always the input with one contiguous
//! end replaced by a group.

use crate::collapsible::{Collapsible, ItemGroup};
use crate::item::{ItemId, Measurable};
use crate::layout::collection::{estimate_elements_width, Element};
use crate::layout::LayoutContext;

/// The end of the strip that collapses first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollapseDirection {
    /// Trailing items collapse; the group takes the last position.
    #[default]
    Tail,
    /// Leading items collapse; the group takes the first position.
    Head,
}

/// How a strip collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollapsePolicy {
    /// The end that collapses first.
    pub direction: CollapseDirection,
    /// Items that always stay inline. Never less than one.
    pub min_visible: usize,
}

impl CollapsePolicy {
    /// Collapse trailing items (tab strips).
    pub const fn tail() -> Self {
        Self {
            direction: CollapseDirection::Tail,
            min_visible: 1,
        }
    }

    /// Collapse leading items so the last one stays visible (breadcrumbs).
    pub const fn head() -> Self {
        Self {
            direction: CollapseDirection::Head,
            min_visible: 1,
        }
    }

    /// Keep at least `count` items inline.
    pub fn with_min_visible(mut self, count: usize) -> Self {
        self.min_visible = count.max(1);
        self
    }
}

impl Default for CollapsePolicy {
    fn default() -> Self {
        Self::tail()
    }
}

/// The working state of one collapse: how many items sit in the group.
#[derive(Debug)]
struct WorkingView<'a, T> {
    items: &'a [T],
    grouped: usize,
    direction: CollapseDirection,
}

impl<'a, T> WorkingView<'a, T> {
    fn new(items: &'a [T], direction: CollapseDirection) -> Self {
        Self {
            items,
            grouped: 0,
            direction,
        }
    }

    fn split(&self) -> (&'a [T], &'a [T]) {
        match self.direction {
            CollapseDirection::Tail => {
                let (inline, group) = self.items.split_at(self.items.len() - self.grouped);
                (inline, group)
            },
            CollapseDirection::Head => {
                let (group, inline) = self.items.split_at(self.grouped);
                (inline, group)
            },
        }
    }

    fn elements(&self) -> impl Iterator<Item = Element<'a, T>> {
        let (inline, group) = self.split();
        let group = (!group.is_empty()).then_some(Element::Group(group));
        let (lead, trail) = match self.direction {
            CollapseDirection::Tail => (None, group),
            CollapseDirection::Head => (group, None),
        };

        lead.into_iter()
            .chain(inline.iter().map(Element::Item))
            .chain(trail)
    }

    /// Another item may move into the group without going below `min_visible`.
    fn can_absorb(&self, min_visible: usize) -> bool {
        self.items.len() - self.grouped > min_visible.max(1)
    }

    fn absorb(&mut self) {
        self.grouped += 1;
    }
}

impl<T: Clone> WorkingView<'_, T> {
    fn into_output(self) -> Vec<Collapsible<T>> {
        let (inline, group) = self.split();
        let mut output = Vec::with_capacity(inline.len() + 1);
        let group = ItemGroup::new(group.to_vec()).map(Collapsible::Group);

        let inline = inline.iter().cloned().map(Collapsible::Item);
        match self.direction {
            CollapseDirection::Tail => {
                output.extend(inline);
                output.extend(group);
            },
            CollapseDirection::Head => {
                output.extend(group);
                output.extend(inline);
            },
        }

        output
    }
}

/// Number of items that end up in the overflow group.
///
/// `None` or `0` for `available_width` means the container has not been
/// measured yet, and nothing collapses.
pub fn collapsed_count<T: Measurable>(
    items: &[T],
    available_width: Option<u32>,
    active_id: Option<&ItemId>,
    context: &LayoutContext,
    policy: CollapsePolicy,
) -> usize {
    let available = match available_width {
        Some(width) if width > 0 => width,
        _ => return 0,
    };

    let mut view = WorkingView::new(items, policy.direction);
    loop {
        let width = estimate_elements_width(view.elements(), context, active_id);
        log::trace!(
            "collapse: {} of {} grouped, {}px needed, {}px available",
            view.grouped,
            items.len(),
            width,
            available
        );

        if width <= available || !view.can_absorb(policy.min_visible) {
            return view.grouped;
        }

        view.absorb();
    }
}

/// Collapse `items` so that the strip fits `available_width`.
///
/// Returns the items in their original order with one end replaced by a
/// single [ItemGroup]. When nothing needs to collapse the output holds only
/// plain items. When even the minimum number of inline items overflows, the
/// overflowing strip is returned as-is.
pub fn collapse<T: Measurable + Clone>(
    items: &[T],
    available_width: Option<u32>,
    active_id: Option<&ItemId>,
    context: &LayoutContext,
    policy: CollapsePolicy,
) -> Vec<Collapsible<T>> {
    let grouped = collapsed_count(items, available_width, active_id, context, policy);

    WorkingView {
        items,
        grouped,
        direction: policy.direction,
    }
    .into_output()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collapsible::flatten;
    use crate::item::Item;

    fn strip(count: u64) -> Vec<Item> {
        (1..=count)
            .map(|id| Item::new(id).with_label(format!("Item {}", id)).with_max_width(100))
            .collect()
    }

    #[test]
    fn test_unmeasured_width_is_noop() {
        let ctx = LayoutContext::default();
        let items = strip(4);

        for width in [None, Some(0)] {
            let output = collapse(&items, width, None, &ctx, CollapsePolicy::tail());
            assert!(output.iter().all(|e| !e.is_group()));
            assert_eq!(flatten(&output), items);
        }
    }

    #[test]
    fn test_head_collapse_keeps_last_item() {
        let ctx = LayoutContext::default();
        let items = strip(5);
        let output = collapse(&items, Some(300), None, &ctx, CollapsePolicy::head());

        assert!(output[0].is_group());
        assert_eq!(output.last().and_then(Collapsible::as_item), items.last());
        assert_eq!(flatten(&output), items);
    }

    #[test]
    fn test_min_visible_is_respected() {
        let ctx = LayoutContext::default();
        let items = strip(5);
        let policy = CollapsePolicy::tail().with_min_visible(3);

        assert_eq!(collapsed_count(&items, Some(1), None, &ctx, policy), 2);
        assert_eq!(collapsed_count(&items, Some(1), None, &ctx, CollapsePolicy::tail()), 4);
    }

    #[test]
    fn test_min_visible_never_zero() {
        assert_eq!(CollapsePolicy::tail().with_min_visible(0).min_visible, 1);
    }
}
