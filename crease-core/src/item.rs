// SPDX-License-Identifier: LGPL-3.0-only
use bitflags::bitflags;
use std::fmt;

/// Stable identifier of an item, unique within its list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemId {
    /// A textual identifier (path, URL, key).
    Name(String),
    /// A numeric identifier.
    Index(u64),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Name(name) => f.write_str(name),
            ItemId::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Name(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Name(value)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        ItemId::Index(value)
    }
}

impl From<usize> for ItemId {
    fn from(value: usize) -> Self {
        ItemId::Index(value as u64)
    }
}

bitflags! {
    /// Presence and state flags of an item.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// A leading icon is shown.
        const ICON = 1 << 0;
        /// A trailing icon is shown.
        const RIGHT_ICON = 1 << 1;
        /// A close affordance is shown.
        const CLOSABLE = 1 << 2;
        /// The item cannot be interacted with.
        const DISABLED = 1 << 3;
    }
}

/// Decoration attached to an item, measured as part of its width.
#[derive(Debug, Clone, PartialEq)]
pub enum Badge {
    /// A short text badge.
    Text(String),
    /// A numeric counter.
    Count(u64),
    /// An icon-only badge.
    Icon,
    /// Several badges shown side by side.
    List(Vec<Badge>),
}

/// The measurable surface shared by every item shape.
///
/// Call sites implement this for their own item types; only [Measurable::id]
/// is required.
pub trait Measurable {
    /// Stable identifier of the item.
    fn id(&self) -> &ItemId;

    /// Primary text.
    fn label(&self) -> Option<&str> {
        None
    }

    /// Presence and state flags.
    fn flags(&self) -> ItemFlags {
        ItemFlags::empty()
    }

    /// Optional badge.
    fn badge(&self) -> Option<&Badge> {
        None
    }

    /// Secondary text competing with the label for width.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Explicit width in pixels, bypassing estimation.
    fn max_width(&self) -> Option<u32> {
        None
    }
}

impl<T: Measurable + ?Sized> Measurable for &T {
    fn id(&self) -> &ItemId {
        (**self).id()
    }

    fn label(&self) -> Option<&str> {
        (**self).label()
    }

    fn flags(&self) -> ItemFlags {
        (**self).flags()
    }

    fn badge(&self) -> Option<&Badge> {
        (**self).badge()
    }

    fn description(&self) -> Option<&str> {
        (**self).description()
    }

    fn max_width(&self) -> Option<u32> {
        (**self).max_width()
    }
}

/// A general purpose item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Identifier of the item.
    pub id: ItemId,
    /// Optional label.
    pub label: Option<String>,
    /// Presence and state flags.
    pub flags: ItemFlags,
    /// Optional badge.
    pub badge: Option<Badge>,
    /// Optional secondary text.
    pub description: Option<String>,
    /// Optional explicit width.
    pub max_width: Option<u32>,
}

impl Item {
    /// Create an item with the given identifier and no content.
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            flags: ItemFlags::empty(),
            badge: None,
            description: None,
            max_width: None,
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Show or hide the leading icon.
    pub fn with_icon(mut self, icon: bool) -> Self {
        self.flags.set(ItemFlags::ICON, icon);
        self
    }

    /// Show or hide the trailing icon.
    pub fn with_right_icon(mut self, icon: bool) -> Self {
        self.flags.set(ItemFlags::RIGHT_ICON, icon);
        self
    }

    /// Show or hide the close affordance.
    pub fn with_closable(mut self, closable: bool) -> Self {
        self.flags.set(ItemFlags::CLOSABLE, closable);
        self
    }

    /// Mark the item disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.flags.set(ItemFlags::DISABLED, disabled);
        self
    }

    /// Set the badge.
    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Set the secondary text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set an explicit width.
    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }
}

impl Measurable for Item {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn flags(&self) -> ItemFlags {
        self.flags
    }

    fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn max_width(&self) -> Option<u32> {
        self.max_width
    }
}
