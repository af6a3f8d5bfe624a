#![warn(missing_docs)]

//! Fit breadcrumb trails and tab strips into containers of changing width.
//!
//! Items that do not fit are collapsed into a single overflow group at one
//! end of the strip, while the active item stays reachable through the
//! group's trigger label.

pub use nalgebra as math;

pub use crease_core as core;
pub use crease_theme as theme;

/// Widgets built on the collapsing engine.
#[cfg(feature = "lgpl-widgets")]
pub mod widgets {
    pub use crease_widgets::*;
}

/// A "prelude" for users of crease.
///
/// Importing this module brings into scope the most common types
/// needed to collapse a strip.
///
/// ```rust
/// use crease::prelude::*;
///
/// let items: Vec<_> = (1..=5u64).map(|id| Item::new(id).with_max_width(95)).collect();
/// let strip = collapse(&items, Some(300), None, &LayoutContext::default(), CollapsePolicy::tail());
/// assert!(strip[2].is_group());
/// ```
pub mod prelude {
    pub use crate::core::binding::{
        ManualResizeObserver, MeasureState, MeasurementBinding, ResizeObserver,
    };
    pub use crate::core::collapsible::{find_group, flatten, Collapsible, ItemGroup};
    pub use crate::core::item::{Badge, Item, ItemFlags, ItemId, Measurable};
    pub use crate::core::layout::*;
    pub use crate::core::reference::Ref;
    pub use crate::core::signal::{state::StateSignal, *};

    // Metrics
    pub use crate::theme::config::MetricsConfig;
    pub use crate::theme::error::{MetricsError, MetricsResult};
    pub use crate::theme::metrics::GlyphWidthTable;
    pub use crate::theme::size::{SizeMetrics, SizeScale};

    // Math
    pub use nalgebra::Vector2;

    // Widgets (LGPL)
    #[cfg(feature = "lgpl-widgets")]
    pub use crate::widgets::adapter::{present, PresentationAdapter, TextAdapter};
    #[cfg(feature = "lgpl-widgets")]
    pub use crate::widgets::breadcrumbs::{BreadcrumbItem, Breadcrumbs, BreadcrumbsError};
    #[cfg(feature = "lgpl-widgets")]
    pub use crate::widgets::tabs::{TabItem, Tabs, TabsError};
}
