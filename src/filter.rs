//! Year/route/station selection applied before any view is computed.

use std::collections::BTreeSet;

use tracing::debug;

use crate::analyzers::utility::natural_cmp;
use crate::records::{RecordSet, TripRecord};

/// A dashboard selection. An empty list selects everything on that axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub years: Vec<i32>,
    pub routes: Vec<String>,
    pub stations: Vec<String>,
}

impl RecordFilter {
    pub fn all_years(&self) -> bool {
        self.years.is_empty()
    }

    /// Whether `record` passes every axis of the selection. Undated records
    /// fail an explicit year selection.
    pub fn matches(&self, record: &TripRecord) -> bool {
        let year_ok = self.years.is_empty()
            || record.year.is_some_and(|y| self.years.contains(&y));
        let route_ok = self.routes.is_empty() || self.routes.contains(&record.route);
        let station_ok =
            self.stations.is_empty() || self.stations.contains(&record.boarding_station);

        year_ok && route_ok && station_ok
    }

    /// A new record set holding the selected records.
    pub fn apply(&self, set: &RecordSet) -> RecordSet {
        let filtered = set.filtered(|r| self.matches(r));
        debug!(
            before = set.len(),
            after = filtered.len(),
            "Filter applied"
        );
        filtered
    }

    /// Caption such as `2023, 2024 | All Routes | Katraj`.
    pub fn describe(&self) -> String {
        let years = if self.years.is_empty() {
            "All Years".to_string()
        } else {
            join(self.years.iter().map(|y| y.to_string()))
        };
        let routes = if self.routes.is_empty() {
            "All Routes".to_string()
        } else {
            join(self.routes.iter().cloned())
        };
        let stations = if self.stations.is_empty() {
            "All Stations".to_string()
        } else {
            join(self.stations.iter().cloned())
        };

        format!("{years} | {routes} | {stations}")
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// The record subset used for monthly trends.
///
/// With no year selection this is `filtered` limited to the last
/// `trend_years` years present in `full`; otherwise `filtered` limited to
/// the selected years.
pub fn trend_window(
    full: &RecordSet,
    filtered: &RecordSet,
    filter: &RecordFilter,
    trend_years: usize,
) -> RecordSet {
    let years: Vec<i32> = if filter.all_years() {
        let all = available_years(full);
        let skip = all.len().saturating_sub(trend_years);
        all.into_iter().skip(skip).collect()
    } else {
        filter.years.clone()
    };

    filtered.filtered(|r| r.year.is_some_and(|y| years.contains(&y)))
}

/// Distinct years present, ascending.
pub fn available_years(set: &RecordSet) -> Vec<i32> {
    set.iter()
        .filter_map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct routes present, in natural order.
pub fn available_routes(set: &RecordSet) -> Vec<String> {
    distinct_sorted(set.iter().map(|r| r.route.clone()))
}

/// Distinct boarding stations present, in natural order.
pub fn available_stations(set: &RecordSet) -> Vec<String> {
    distinct_sorted(set.iter().map(|r| r.boarding_station.clone()))
}

fn distinct_sorted(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = values.collect::<BTreeSet<_>>().into_iter().collect();
    out.sort_by(|a, b| natural_cmp(a, b));
    out
}
