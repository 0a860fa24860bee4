#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Faceted filtering over incident records.
//!
//! [`facets::extract_options`] scans the full dataset once to build the
//! selectable values for every filter control. [`predicate::matches`] and
//! [`predicate::apply_filter`] evaluate a [`FilterSelection`] against
//! records using conjunctive, wildcard-aware matching.
//!
//! [`FilterSelection`]: crime_dashboard_filter_models::FilterSelection

pub mod facets;
pub mod predicate;

pub use facets::extract_options;
pub use predicate::{apply_filter, matches};
