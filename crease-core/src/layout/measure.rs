// SPDX-License-Identifier: LGPL-3.0-only
//! Approximate width estimation of single items.
//!
//! Widths are derived from the [LayoutContext] alone; no font is loaded and
//! no layout pass runs. Every function here is pure and never fails.

use crate::item::{Badge, ItemFlags, ItemId, Measurable};
use crate::layout::LayoutContext;

/// Counts above this value are shown as `99+`.
const MAX_BADGE_COUNT: u64 = 99;

/// Estimate the rendered width of an item in pixels.
///
/// An explicit [Measurable::max_width] wins over estimation. Otherwise the
/// wider of label and description is combined with icons, the close
/// affordance and the badge.
pub fn estimate_item_width<M: Measurable + ?Sized>(item: &M, context: &LayoutContext) -> u32 {
    if let Some(width) = item.max_width() {
        return width;
    }

    to_px(content_width(item, context))
}

/// Estimate the width of the disclosure trigger standing for `group`.
pub fn estimate_group_width<T: Measurable>(
    group: &[T],
    active_id: Option<&ItemId>,
    context: &LayoutContext,
) -> u32 {
    match GroupTrigger::for_group(group, active_id, &context.more_label) {
        Some(trigger) => estimate_item_width(&trigger, context),
        None => 0,
    }
}

/// Estimate the width of a badge in pixels, including its padding.
pub fn estimate_badge_width(badge: &Badge, context: &LayoutContext) -> f32 {
    let metrics = &context.metrics;
    let padding = metrics.badge_padding_px * 2.0;

    match badge {
        Badge::Text(text) => context.glyphs.text_width(text, metrics.badge_font_px()) + padding,
        Badge::Count(count) => {
            context.glyphs.text_width(&format_count(*count), metrics.badge_font_px()) + padding
        },
        Badge::Icon => metrics.icon_px + padding,
        Badge::List(badges) => {
            let gaps = badges.len().saturating_sub(1) as f32 * metrics.gap_px;
            badges
                .iter()
                .map(|badge| estimate_badge_width(badge, context))
                .sum::<f32>()
                + gaps
        },
    }
}

/// Text shown for a numeric badge.
pub fn format_count(count: u64) -> String {
    if count > MAX_BADGE_COUNT {
        format!("{}+", MAX_BADGE_COUNT)
    } else {
        count.to_string()
    }
}

fn content_width<M: Measurable + ?Sized>(item: &M, context: &LayoutContext) -> f32 {
    let metrics = &context.metrics;
    let flags = item.flags();

    let label = item.label().map(|text| context.text_width(text));
    let description = item.description().map(|text| context.text_width(text));

    // Only one of label and description is visible at a time.
    let mut width = match (label, description) {
        (None, None) if !flags.contains(ItemFlags::ICON) => {
            context.glyphs.average() * metrics.font_px
        },
        (label, description) => label.unwrap_or(0.0).max(description.unwrap_or(0.0)),
    };

    if flags.contains(ItemFlags::ICON) {
        width += metrics.icon_px + metrics.gap_px;
    }
    if flags.contains(ItemFlags::RIGHT_ICON) {
        width += metrics.icon_px + metrics.gap_px;
    }
    if flags.contains(ItemFlags::CLOSABLE) {
        width += metrics.close_icon_px * 2.0;
    }
    if let Some(badge) = item.badge() {
        width += metrics.gap_px + estimate_badge_width(badge, context);
    }

    width
}

/// Round an estimate up to whole pixels.
pub(crate) fn to_px(width: f32) -> u32 {
    width.max(0.0).ceil() as u32
}

/// The measurable stand-in for an overflow group's disclosure trigger.
///
/// Reads as the active item when the active item is inside the group, and as
/// the overflow token otherwise. Always carries a trailing chevron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTrigger<'a> {
    id: &'a ItemId,
    label: &'a str,
    icon: bool,
    active: bool,
}

impl<'a> GroupTrigger<'a> {
    /// Build the trigger for a group of items. Returns [None] for an empty group.
    pub fn for_group<T: Measurable>(
        group: &'a [T],
        active_id: Option<&ItemId>,
        more_label: &'a str,
    ) -> Option<Self> {
        let first = group.first()?;
        let active = active_id.and_then(|id| group.iter().find(|item| item.id() == id));

        Some(match active {
            Some(item) => Self {
                id: item.id(),
                label: item.label().unwrap_or(more_label),
                icon: item.flags().contains(ItemFlags::ICON),
                active: true,
            },
            None => Self {
                id: first.id(),
                label: more_label,
                icon: false,
                active: false,
            },
        })
    }

    /// The label the trigger displays.
    pub fn display_label(&self) -> &'a str {
        self.label
    }

    /// Check if the trigger stands in for the active item.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Measurable for GroupTrigger<'_> {
    fn id(&self) -> &ItemId {
        self.id
    }

    fn label(&self) -> Option<&str> {
        Some(self.label)
    }

    fn flags(&self) -> ItemFlags {
        let mut flags = ItemFlags::RIGHT_ICON;
        flags.set(ItemFlags::ICON, self.icon);
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crease_theme::size::SizeScale;

    fn context() -> LayoutContext {
        LayoutContext::new(SizeScale::Normal)
    }

    #[test]
    fn test_max_width_overrides_estimation() {
        let item = Item::new(1u64)
            .with_label("A very long label that would be wide")
            .with_icon(true)
            .with_max_width(42);
        assert_eq!(estimate_item_width(&item, &context()), 42);
    }

    #[test]
    fn test_icons_add_icon_and_gap() {
        let ctx = context();
        let plain = estimate_item_width(&Item::new(1u64).with_label("Files"), &ctx);
        let icon = estimate_item_width(&Item::new(1u64).with_label("Files").with_icon(true), &ctx);
        let both = estimate_item_width(
            &Item::new(1u64).with_label("Files").with_icon(true).with_right_icon(true),
            &ctx,
        );

        // 16px icon + 4px gap each, allowing for rounding.
        assert!((19..=21).contains(&(icon - plain)));
        assert!((39..=41).contains(&(both - plain)));
    }

    #[test]
    fn test_description_competes_with_label() {
        let ctx = context();
        let short = Item::new(1u64).with_label("Hi");
        let described = short.clone().with_description("A much longer secondary text");
        let long_desc_alone =
            estimate_item_width(&Item::new(2u64).with_label("A much longer secondary text"), &ctx);

        assert_eq!(estimate_item_width(&described, &ctx), long_desc_alone);
        assert!(estimate_item_width(&short, &ctx) < long_desc_alone);
    }

    #[test]
    fn test_closable_adds_double_close_icon() {
        let ctx = context();
        let open = estimate_item_width(&Item::new(1u64).with_label("Tab"), &ctx);
        let closable = estimate_item_width(&Item::new(1u64).with_label("Tab").with_closable(true), &ctx);
        assert!((27..=29).contains(&(closable - open)));
    }

    #[test]
    fn test_badge_list_is_sum_of_parts() {
        let ctx = context();
        let a = estimate_badge_width(&Badge::Count(3), &ctx);
        let b = estimate_badge_width(&Badge::Icon, &ctx);
        let list = estimate_badge_width(&Badge::List(vec![Badge::Count(3), Badge::Icon]), &ctx);
        assert!((list - (a + b + ctx.metrics.gap_px)).abs() < 1e-3);
        assert_eq!(estimate_badge_width(&Badge::List(Vec::new()), &ctx), 0.0);
    }

    #[test]
    fn test_large_counts_are_capped() {
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(1500), "99+");
        let ctx = context();
        assert_eq!(
            estimate_badge_width(&Badge::Count(1500), &ctx),
            estimate_badge_width(&Badge::Count(100), &ctx)
        );
    }

    #[test]
    fn test_unmeasurable_items_are_never_zero() {
        let ctx = context();
        assert!(estimate_item_width(&Item::new(1u64), &ctx) > 0);
        assert!(estimate_item_width(&Item::new(1u64).with_label(""), &ctx) > 0);
        assert!(estimate_item_width(&Item::new(1u64).with_label("\u{fffd}\u{1}"), &ctx) > 0);
    }

    #[test]
    fn test_zero_width_labels_measure_like_empty_ones() {
        let ctx = context();
        let empty = estimate_item_width(&Item::new(1u64).with_label(""), &ctx);
        for label in ["\u{200b}", "\u{301}\u{200d}"] {
            let width = estimate_item_width(&Item::new(1u64).with_label(label), &ctx);
            assert!(width > 0);
            assert_eq!(width, empty);
        }
    }

    #[test]
    fn test_trigger_reads_as_active_item() {
        let group = vec![
            Item::new("a").with_label("Alpha"),
            Item::new("b").with_label("Settings").with_icon(true),
        ];

        let more = GroupTrigger::for_group(&group, None, "More").unwrap();
        assert_eq!(more.display_label(), "More");
        assert!(!more.is_active());

        let active = GroupTrigger::for_group(&group, Some(&"b".into()), "More").unwrap();
        assert_eq!(active.display_label(), "Settings");
        assert!(active.flags().contains(ItemFlags::ICON | ItemFlags::RIGHT_ICON));

        let ctx = context();
        assert!(
            estimate_group_width(&group, Some(&"b".into()), &ctx)
                > estimate_group_width(&group, None, &ctx)
        );
        assert_eq!(estimate_group_width::<Item>(&[], None, &ctx), 0);
    }
}
