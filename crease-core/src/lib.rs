#![warn(missing_docs)]

//! Core library for crease => See `crease` crate.
//!
//! Contains the item model, width estimation, the collapsing transformer and
//! the reactive measurement binding.

pub use crease_theme as theme;

/// Contains the [MeasurementBinding](binding::MeasurementBinding) and resize observation.
pub mod binding;

/// Contains the collapsed output types.
pub mod collapsible;

/// Contains the item model and the [Measurable](item::Measurable) trait.
pub mod item;

/// Contains width estimation and collapsing.
pub mod layout;

/// Contains the [reference::Ref] for representing a reference to a value.
pub mod reference;

/// Contains the signal system for reactive programming
pub mod signal;
