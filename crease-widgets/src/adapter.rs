// SPDX-License-Identifier: LGPL-3.0-only
//! Rendering of collapsed strips.
//!
//! The engine only decides *what* is inline and what sits in the overflow
//! group. A [PresentationAdapter] decides how each of them looks: plain items
//! become interactive controls, the group becomes a disclosure trigger whose
//! menu lists the grouped items.

use crease_core::collapsible::Collapsible;
use crease_core::item::{ItemId, Measurable};

/// Turns the positions of a collapsed strip into rendered output.
pub trait PresentationAdapter<T> {
    /// The rendered form of one position.
    type Output;

    /// Render an inline item.
    fn item(&mut self, item: &T, active: bool) -> Self::Output;

    /// Render the overflow group as a disclosure trigger.
    ///
    /// `trigger_label` already stands in for the active item when it was
    /// collapsed. Menu entries should be rendered through [PresentationAdapter::item]
    /// so grouped items look the same wherever they appear.
    fn group(&mut self, trigger_label: &str, items: &[T], contains_active: bool) -> Self::Output;
}

/// Render a collapsed strip position by position.
pub fn present<T, A>(
    list: &[Collapsible<T>],
    active_id: Option<&ItemId>,
    more_label: &str,
    adapter: &mut A,
) -> Vec<A::Output>
where
    T: Measurable,
    A: PresentationAdapter<T>,
{
    let is_active = |item: &T| active_id.is_some_and(|id| item.id() == id);

    list.iter()
        .map(|element| match element {
            Collapsible::Item(item) => adapter.item(item, is_active(item)),
            Collapsible::Group(group) => {
                let label = group.trigger_label(active_id, more_label);
                let contains_active = group.active_member(active_id).is_some();
                adapter.group(label, group.items(), contains_active)
            },
        })
        .collect()
}

/// A [PresentationAdapter] producing one line of text per position.
///
/// Active items are wrapped in brackets, the group is shown as its trigger
/// label followed by its menu entries. Handy for logging and terminal hosts.
#[derive(Debug, Clone, Default)]
pub struct TextAdapter;

impl<T: Measurable> PresentationAdapter<T> for TextAdapter {
    type Output = String;

    fn item(&mut self, item: &T, active: bool) -> String {
        let text = match item.label() {
            Some(label) => label.to_string(),
            None => item.id().to_string(),
        };

        if active {
            format!("[{}]", text)
        } else {
            text
        }
    }

    fn group(&mut self, trigger_label: &str, items: &[T], contains_active: bool) -> String {
        let entries: Vec<String> = items.iter().map(|item| self.item(item, false)).collect();
        let trigger = if contains_active {
            format!("[{}]", trigger_label)
        } else {
            trigger_label.to_string()
        };

        format!("{} ▾ ({})", trigger, entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crease_core::collapsible::ItemGroup;
    use crease_core::item::Item;

    fn strip() -> Vec<Collapsible<Item>> {
        vec![
            Collapsible::Item(Item::new("a").with_label("Alpha")),
            Collapsible::Item(Item::new("b")),
            Collapsible::Group(
                ItemGroup::new(vec![
                    Item::new("c").with_label("Gamma"),
                    Item::new("d").with_label("Delta"),
                ])
                .unwrap(),
            ),
        ]
    }

    #[test]
    fn test_present_without_active() {
        let lines = present(&strip(), None, "More", &mut TextAdapter);
        assert_eq!(lines, vec!["Alpha", "b", "More ▾ (Gamma, Delta)"]);
    }

    #[test]
    fn test_present_marks_inline_active() {
        let active = ItemId::from("a");
        let lines = present(&strip(), Some(&active), "More", &mut TextAdapter);
        assert_eq!(lines[0], "[Alpha]");
        assert_eq!(lines[2], "More ▾ (Gamma, Delta)");
    }

    #[test]
    fn test_present_names_trigger_after_collapsed_active() {
        let active = ItemId::from("d");
        let lines = present(&strip(), Some(&active), "More", &mut TextAdapter);
        assert_eq!(lines[2], "[Delta] ▾ (Gamma, Delta)");
    }

    #[derive(Default)]
    struct Counting {
        items: usize,
        groups: usize,
    }

    impl PresentationAdapter<Item> for Counting {
        type Output = ();

        fn item(&mut self, _item: &Item, _active: bool) {
            self.items += 1;
        }

        fn group(&mut self, _trigger_label: &str, items: &[Item], _contains_active: bool) {
            self.groups += 1;
            for item in items {
                self.item(item, false);
            }
        }
    }

    #[test]
    fn test_group_members_use_item_renderer() {
        let mut adapter = Counting::default();
        let output = present(&strip(), None, "More", &mut adapter);

        assert_eq!(output.len(), 3);
        assert_eq!(adapter.groups, 1);
        assert_eq!(adapter.items, 4);
    }
}
