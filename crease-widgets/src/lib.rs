// SPDX-License-Identifier: LGPL-3.0-only
#![warn(missing_docs)]

//! Collapsing strips for crease.
//!
//! Contains the breadcrumb trail and the tab strip, both backed by a
//! [MeasurementBinding](crease_core::binding::MeasurementBinding), and the
//! presentation adapter that turns a collapsed strip into rendered output.

/// Contains the [adapter::PresentationAdapter] trait and [adapter::present].
pub mod adapter;

/// Contains the [breadcrumbs::Breadcrumbs] trail.
pub mod breadcrumbs;
pub use breadcrumbs::{BreadcrumbItem, Breadcrumbs, BreadcrumbsError};

/// Contains the [tabs::Tabs] strip.
pub mod tabs;
pub use tabs::{TabItem, Tabs, TabsError};
