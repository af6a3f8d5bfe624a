// SPDX-License-Identifier: LGPL-3.0-only

/// Contains the greedy collapsing transformer.
pub mod collapse;

/// Contains the collection width estimator.
pub mod collection;

mod context;

/// Contains the single item width estimator.
pub mod measure;

pub use collapse::{collapse, collapsed_count, CollapseDirection, CollapsePolicy};
pub use collection::estimate_collection_width;
pub use context::LayoutContext;
pub use measure::{estimate_group_width, estimate_item_width, GroupTrigger};
