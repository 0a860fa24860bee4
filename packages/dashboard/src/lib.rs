#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard controller for the crime incident analytics engine.
//!
//! A [`Dashboard`] owns the current [`FilterSelection`] over a shared,
//! read-only [`Dataset`]. Every transition ([`Dashboard::set_field`],
//! [`Dashboard::reset`]) swaps in a new selection, filters the dataset
//! once, runs every reducer over that subset and publishes one immutable
//! [`DashboardSnapshot`] to the caller and to registered observers.
//!
//! [`FilterSelection`]: crime_dashboard_filter_models::FilterSelection
//! [`Dataset`]: crime_dashboard_dataset::Dataset

pub mod config;
pub mod controller;
pub mod error;
pub mod snapshot;

pub use config::{ConfigError, DashboardConfig};
pub use controller::{Dashboard, SnapshotObserver};
pub use error::DashboardError;
pub use snapshot::{DashboardSnapshot, DashboardStats, compute_stats};
