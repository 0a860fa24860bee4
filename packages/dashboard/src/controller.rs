//! Selection state machine.

use std::sync::Arc;

use crime_dashboard_analytics_models::DashboardLimits;
use crime_dashboard_dataset::Dataset;
use crime_dashboard_filter::extract_options;
use crime_dashboard_filter_models::{
    FilterChange, FilterDimension, FilterOptionSet, FilterSelection,
};

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::snapshot::DashboardSnapshot;

/// Receives every snapshot the controller publishes.
pub trait SnapshotObserver {
    /// Called once per transition with the new snapshot.
    fn on_snapshot(&self, snapshot: &Arc<DashboardSnapshot>);
}

impl<F> SnapshotObserver for F
where
    F: Fn(&Arc<DashboardSnapshot>),
{
    fn on_snapshot(&self, snapshot: &Arc<DashboardSnapshot>) {
        self(snapshot);
    }
}

/// Owns the current filter selection and the snapshot computed for it.
///
/// The dataset and its option sets are computed once and shared; the
/// selection is replaced wholesale on each transition and the snapshot is
/// recomputed synchronously before the transition returns.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    options: Arc<FilterOptionSet>,
    limits: DashboardLimits,
    snapshot: Arc<DashboardSnapshot>,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("records", &self.dataset.len())
            .field("limits", &self.limits)
            .field("selection", &self.snapshot.selection)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Extracts the option sets and computes the unfiltered snapshot.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, limits: DashboardLimits) -> Self {
        let options = Arc::new(extract_options(dataset.records()));
        let snapshot = Arc::new(DashboardSnapshot::compute(
            dataset.records(),
            FilterSelection::default(),
            &limits,
        ));

        Self {
            dataset,
            options,
            limits,
            snapshot,
            observers: Vec::new(),
        }
    }

    /// Builds a dashboard from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if `config` has a zero limit.
    pub fn from_config(
        dataset: Arc<Dataset>,
        config: &DashboardConfig,
    ) -> Result<Self, DashboardError> {
        config.validate()?;
        Ok(Self::new(dataset, config.limits))
    }

    /// The shared dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Selectable values for each filter control.
    #[must_use]
    pub const fn options(&self) -> &Arc<FilterOptionSet> {
        &self.options
    }

    /// Top-N sizes in effect.
    #[must_use]
    pub const fn limits(&self) -> &DashboardLimits {
        &self.limits
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.snapshot.selection
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Registers an observer notified after every transition.
    pub fn subscribe(&mut self, observer: impl SnapshotObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replaces one dimension of the selection and recomputes.
    ///
    /// Values not offered by [`Self::options`] are accepted; they simply
    /// match nothing.
    pub fn set_field(&mut self, change: FilterChange) -> Arc<DashboardSnapshot> {
        if !self.options.offers(&change) {
            log::debug!("set_field: {change:?} is not an offered option");
        }
        let selection = self.snapshot.selection.with_change(change);
        self.transition(selection)
    }

    /// Replaces several dimensions at once with a single recomputation.
    pub fn set_fields(
        &mut self,
        changes: impl IntoIterator<Item = FilterChange>,
    ) -> Arc<DashboardSnapshot> {
        let selection = changes
            .into_iter()
            .fold(self.snapshot.selection.clone(), |selection, change| {
                selection.with_change(change)
            });
        self.transition(selection)
    }

    /// Parses a dimension name and raw value, then applies the change.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Filter`] if the dimension is unknown or
    /// the value does not parse for it.
    pub fn set_field_str(
        &mut self,
        dimension: &str,
        value: &str,
    ) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        let dimension = FilterDimension::parse(dimension)?;
        let change = FilterChange::parse(dimension, value)?;
        Ok(self.set_field(change))
    }

    /// Restores the all-wildcard selection and recomputes.
    pub fn reset(&mut self) -> Arc<DashboardSnapshot> {
        self.transition(FilterSelection::default())
    }

    fn transition(&mut self, selection: FilterSelection) -> Arc<DashboardSnapshot> {
        log::debug!("transition: {selection:?}");

        let snapshot = Arc::new(DashboardSnapshot::compute(
            self.dataset.records(),
            selection,
            &self.limits,
        ));
        self.snapshot = Arc::clone(&snapshot);

        for observer in &self.observers {
            observer.on_snapshot(&snapshot);
        }

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crime_dashboard_filter_models::{Choice, FilterError};
    use crime_dashboard_incident_models::AgeGroup;

    use super::*;
    use crate::fixtures::scenario;

    fn dashboard() -> Dashboard {
        Dashboard::new(scenario(), DashboardLimits::default())
    }

    #[test]
    fn starts_unfiltered_with_extracted_options() {
        let dashboard = dashboard();
        assert!(dashboard.selection().is_unfiltered());
        assert_eq!(dashboard.options().cities, vec!["Delhi", "Mumbai"]);
        assert_eq!(dashboard.options().years, vec![2022, 2023]);
        assert_eq!(dashboard.snapshot().stats.filtered_count, 3);
    }

    #[test]
    fn set_field_replaces_one_dimension() {
        let mut dashboard = dashboard();
        let snapshot = dashboard.set_field(FilterChange::City(Choice::Only("Delhi".to_string())));

        assert_eq!(snapshot.selection.city, Choice::Only("Delhi".to_string()));
        assert!(snapshot.selection.year.is_all());
        assert_eq!(snapshot.stats.filtered_count, 2);
        assert!((snapshot.stats.kpis.closure_rate - 50.0).abs() < 1e-9);
        assert!(Arc::ptr_eq(&snapshot, &dashboard.snapshot()));
    }

    #[test]
    fn transitions_compose() {
        let mut dashboard = dashboard();
        dashboard.set_field(FilterChange::CrimeType(Choice::Only("Theft".to_string())));
        let snapshot = dashboard.set_field(FilterChange::Year(Choice::Only(2023)));

        assert_eq!(snapshot.stats.filtered_count, 1);
        assert_eq!(snapshot.stats.kpis.highest_crime_city, "Mumbai");
    }

    #[test]
    fn unknown_city_yields_empty_snapshot() {
        let mut dashboard = dashboard();
        let snapshot = dashboard.set_field(FilterChange::City(Choice::Only("Atlantis".to_string())));

        assert_eq!(snapshot.stats.kpis.total_crimes, 0);
        assert_eq!(snapshot.stats.kpis.closure_rate_label, "0%");
        assert_eq!(snapshot.stats.kpis.most_common_crime, "N/A");
        assert!(snapshot.stats.time_series.points.is_empty());
    }

    #[test]
    fn reset_reproduces_unfiltered_snapshot() {
        let mut dashboard = dashboard();
        let initial = dashboard.snapshot();

        dashboard.set_field(FilterChange::City(Choice::Only("Delhi".to_string())));
        dashboard.set_field(FilterChange::AgeGroup(Choice::Only(AgeGroup::Senior)));
        dashboard.set_field(FilterChange::Year(Choice::Only(2022)));
        let reset = dashboard.reset();

        assert_eq!(*reset, *initial);
        assert!(reset.selection.is_unfiltered());
    }

    #[test]
    fn set_field_str_parses_dimension_and_value() {
        let mut dashboard = dashboard();
        let snapshot = dashboard.set_field_str("age-group", "65+").unwrap();
        assert_eq!(snapshot.stats.filtered_count, 1);

        let snapshot = dashboard.set_field_str("ageGroup", "All").unwrap();
        assert_eq!(snapshot.stats.filtered_count, 3);
    }

    #[test]
    fn set_field_str_rejects_bad_input_without_transition() {
        let mut dashboard = dashboard();
        let before = dashboard.snapshot();

        assert!(matches!(
            dashboard.set_field_str("year", "twenty"),
            Err(DashboardError::Filter(FilterError::InvalidYear { .. }))
        ));
        assert!(matches!(
            dashboard.set_field_str("district", "North"),
            Err(DashboardError::Filter(FilterError::UnknownDimension { .. }))
        ));
        assert!(Arc::ptr_eq(&before, &dashboard.snapshot()));
    }

    #[test]
    fn observers_see_every_transition() {
        let seen: Rc<RefCell<Vec<u64>>> = Rc::default();
        let mut dashboard = dashboard();
        let sink = Rc::clone(&seen);
        dashboard.subscribe(move |snapshot: &Arc<DashboardSnapshot>| {
            sink.borrow_mut().push(snapshot.stats.filtered_count);
        });

        dashboard.set_field(FilterChange::Gender(Choice::Only("M".to_string())));
        dashboard.reset();

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn set_fields_matches_sequential_transitions() {
        let changes = [
            FilterChange::Gender(Choice::Only("M".to_string())),
            FilterChange::Year(Choice::Only(2022)),
        ];

        let mut batched = dashboard();
        let seen = Rc::new(RefCell::new(0u32));
        let counter = Rc::clone(&seen);
        batched.subscribe(move |_: &Arc<DashboardSnapshot>| *counter.borrow_mut() += 1);
        let batched_snapshot = batched.set_fields(changes.clone());

        let mut sequential = dashboard();
        for change in changes {
            sequential.set_field(change);
        }

        assert_eq!(*batched_snapshot, *sequential.snapshot());
        assert_eq!(batched_snapshot.stats.filtered_count, 1);
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn from_config_rejects_zero_limits() {
        let mut config = DashboardConfig::default();
        config.limits.city_ranking = 0;
        assert!(matches!(
            Dashboard::from_config(scenario(), &config),
            Err(DashboardError::Config(_))
        ));
    }
}
