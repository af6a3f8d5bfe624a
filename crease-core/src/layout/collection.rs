// SPDX-License-Identifier: LGPL-3.0-only
use crate::collapsible::Collapsible;
use crate::item::{ItemId, Measurable};
use crate::layout::measure::{estimate_group_width, estimate_item_width, to_px};
use crate::layout::LayoutContext;

/// A borrowed position of a strip, used while measuring without cloning items.
#[derive(Debug)]
pub(crate) enum Element<'a, T> {
    Item(&'a T),
    Group(&'a [T]),
}

impl<T> Clone for Element<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Element<'_, T> {}

impl<'a, T> From<&'a Collapsible<T>> for Element<'a, T> {
    fn from(element: &'a Collapsible<T>) -> Self {
        match element {
            Collapsible::Item(item) => Element::Item(item),
            Collapsible::Group(group) => Element::Group(group.items()),
        }
    }
}

/// Estimate the total width of a strip rendered inline without wrapping.
///
/// Every element pays the fixed per-item overhead; groups are measured as
/// their disclosure trigger. Consecutive elements are separated by
/// [LayoutContext::separator_px]. An empty strip measures 0.
pub fn estimate_collection_width<T: Measurable>(
    elements: &[Collapsible<T>],
    context: &LayoutContext,
    active_id: Option<&ItemId>,
) -> u32 {
    estimate_elements_width(elements.iter().map(Element::from), context, active_id)
}

pub(crate) fn estimate_elements_width<'a, T: Measurable + 'a>(
    elements: impl IntoIterator<Item = Element<'a, T>>,
    context: &LayoutContext,
    active_id: Option<&ItemId>,
) -> u32 {
    let overhead = to_px(context.item_overhead());
    let separator = to_px(context.separator_px);

    let mut count = 0u32;
    let mut total = 0u32;
    for element in elements {
        let width = match element {
            Element::Item(item) => estimate_item_width(item, context),
            Element::Group(group) => estimate_group_width(group, active_id, context),
        };
        total = total.saturating_add(width).saturating_add(overhead);
        count += 1;
    }

    total.saturating_add(separator.saturating_mul(count.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collapsible::ItemGroup;
    use crate::item::Item;
    use crease_theme::size::SizeScale;

    fn fixed(id: u64, width: u32) -> Item {
        Item::new(id).with_label(format!("Item {}", id)).with_max_width(width)
    }

    #[test]
    fn test_empty_is_zero() {
        let ctx = LayoutContext::new(SizeScale::Normal).with_separator_px(8.0);
        assert_eq!(estimate_collection_width::<Item>(&[], &ctx, None), 0);
    }

    #[test]
    fn test_sums_items_and_overhead() {
        let ctx = LayoutContext::new(SizeScale::Normal);
        let strip = vec![
            Collapsible::Item(fixed(1, 100)),
            Collapsible::Item(fixed(2, 50)),
        ];
        assert_eq!(estimate_collection_width(&strip, &ctx, None), 100 + 50 + 2 * 20);
    }

    #[test]
    fn test_separators_between_elements() {
        let ctx = LayoutContext::new(SizeScale::Normal).with_separator_px(10.0);
        let strip: Vec<_> = (1..=3).map(|id| Collapsible::Item(fixed(id, 10))).collect();
        assert_eq!(estimate_collection_width(&strip, &ctx, None), 3 * 30 + 2 * 10);
    }

    #[test]
    fn test_group_measured_as_trigger() {
        let ctx = LayoutContext::new(SizeScale::Normal);
        let members = vec![fixed(2, 500), fixed(3, 500)];
        let strip = vec![
            Collapsible::Item(fixed(1, 100)),
            Collapsible::Group(ItemGroup::new(members.clone()).unwrap()),
        ];

        let trigger = estimate_group_width(&members, None, &ctx);
        assert!(trigger < 100);
        assert_eq!(estimate_collection_width(&strip, &ctx, None), 100 + 20 + trigger + 20);
    }
}
