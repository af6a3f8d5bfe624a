use crease_core::collapsible::{find_group, flatten, inline_count};
use crease_core::item::{Badge, ItemId};
use crease_core::layout::LayoutContext;
use crease_core::theme::size::SizeScale;
use crease_widgets::adapter::TextAdapter;
use crease_widgets::tabs::{TabItem, Tabs, TabsError};

fn editor_tabs() -> Tabs {
    (1..=8u64).fold(Tabs::new(), |tabs, id| {
        tabs.with_tab(TabItem::new(id, format!("Tab {}", id)).with_closable(id % 2 == 0))
    })
}

#[test]
fn test_first_enabled_tab_is_selected() {
    let tabs = Tabs::new()
        .with_tab(TabItem::new("a", "Alpha").with_enabled(false))
        .with_tab(TabItem::new("b", "Beta"))
        .with_tab(TabItem::new("c", "Gamma"));

    assert_eq!(tabs.selected(), Some(ItemId::from("b")));
    assert_eq!(tabs.selected_tab().map(|t| t.label), Some("Beta".to_string()));
}

#[test]
fn test_select_errors() {
    let tabs = Tabs::new()
        .with_tab(TabItem::new("a", "Alpha"))
        .with_tab(TabItem::new("b", "Beta").with_enabled(false));

    let missing = ItemId::from("z");
    assert_eq!(tabs.select(&missing), Err(TabsError::TabNotFound(missing.clone())));

    let disabled = ItemId::from("b");
    assert_eq!(tabs.select(&disabled), Err(TabsError::TabDisabled(disabled.clone())));
    assert_eq!(tabs.selected(), Some(ItemId::from("a")));
}

#[test]
fn test_close_errors() {
    let tabs = editor_tabs();

    let pinned = ItemId::from(1u64);
    assert_eq!(tabs.close(&pinned), Err(TabsError::NotClosable(pinned.clone())));

    let missing = ItemId::from(42u64);
    assert_eq!(tabs.close(&missing), Err(TabsError::TabNotFound(missing.clone())));
    assert_eq!(tabs.tabs().len(), 8);
}

#[test]
fn test_close_selected_moves_to_neighbour() {
    let tabs = editor_tabs();
    tabs.select(&ItemId::from(4u64)).unwrap();

    let closed = tabs.close(&ItemId::from(4u64)).unwrap();
    assert_eq!(closed.label, "Tab 4");
    assert_eq!(tabs.selected(), Some(ItemId::from(5u64)));

    tabs.select(&ItemId::from(8u64)).unwrap();
    tabs.close(&ItemId::from(8u64)).unwrap();
    assert_eq!(tabs.selected(), Some(ItemId::from(7u64)));
}

#[test]
fn test_close_other_tab_keeps_selection() {
    let tabs = editor_tabs();
    tabs.select(&ItemId::from(3u64)).unwrap();
    tabs.close(&ItemId::from(6u64)).unwrap();

    assert_eq!(tabs.selected(), Some(ItemId::from(3u64)));
    assert_eq!(tabs.tabs().len(), 7);
}

#[test]
fn test_duplicate_ids_are_kept() {
    let tabs = Tabs::new()
        .with_tab(TabItem::new("same", "One"))
        .with_tab(TabItem::new("same", "Two"));

    assert_eq!(tabs.tabs().len(), 2);
}

#[test]
fn test_narrow_strip_collapses_trailing_tabs() {
    let tabs = editor_tabs();
    tabs.resize_width(Some(300.0));

    let visible = tabs.visible();
    assert!(visible.last().is_some_and(|e| e.is_group()));
    assert!(visible[..visible.len() - 1].iter().all(|e| !e.is_group()));
    assert_eq!(flatten(&visible), tabs.tabs());

    let lines = tabs.present(&mut TextAdapter);
    assert_eq!(lines[0], "[Tab 1]");
    assert!(lines.last().is_some_and(|line| line.starts_with("More ▾ (")));
}

#[test]
fn test_selecting_collapsed_tab_names_the_trigger() {
    let tabs = editor_tabs();
    tabs.resize_width(Some(300.0));
    tabs.select(&ItemId::from(8u64)).unwrap();

    let visible = tabs.visible();
    let group = find_group(&visible).expect("overflow group");
    assert!(group.contains(&ItemId::from(8u64)));

    let lines = tabs.present(&mut TextAdapter);
    assert!(lines.last().is_some_and(|line| line.starts_with("[Tab 8] ▾ (")));
    assert_eq!(lines[0], "Tab 1");
}

#[test]
fn test_closing_tabs_restores_inline_tabs() {
    let tabs = editor_tabs();
    tabs.resize_width(Some(300.0));
    let before = inline_count(&tabs.visible());

    for id in [2u64, 4, 6] {
        tabs.close(&ItemId::from(id)).unwrap();
    }

    let after = tabs.visible();
    assert!(inline_count(&after) >= before);
    assert_eq!(flatten(&after).len(), 5);
}

#[test]
fn test_badges_and_scale_change_the_split() {
    let plain = editor_tabs();
    let decorated = (1..=8u64).fold(Tabs::new(), |tabs, id| {
        tabs.with_tab(
            TabItem::new(id, format!("Tab {}", id))
                .with_icon(true)
                .with_badge(Badge::Count(id * 40)),
        )
    });

    for tabs in [&plain, &decorated] {
        tabs.resize_width(Some(400.0));
    }
    assert!(inline_count(&decorated.visible()) < inline_count(&plain.visible()));

    let huge = editor_tabs().with_context(LayoutContext::new(SizeScale::Huge));
    huge.resize_width(Some(400.0));
    assert!(inline_count(&huge.visible()) < inline_count(&plain.visible()));
}

#[test]
fn test_unknown_width_shows_everything() {
    let tabs = editor_tabs();
    tabs.resize_width(Some(300.0));
    tabs.resize_width(None);

    assert!(find_group(&tabs.visible()).is_none());
    assert_eq!(tabs.visible().len(), 8);
}
