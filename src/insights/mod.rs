//! Short bullet-text summaries of the aggregate views.
//!
//! Each generator reads views and never re-derives record fields. Empty
//! input yields a fixed "no data" message; a sub-rule whose column is
//! hidden from the record set is skipped.

pub mod fare;
pub mod sections;
pub mod trends;

pub use fare::generate_fare_insight;
pub use sections::{generate_overview_insight, generate_routes_insight, generate_stations_insight};
pub use trends::generate_trends_insight;

use crate::analyzers::types::{Entry, Series};
use crate::analyzers::utility::pct;

pub const NO_OVERVIEW_DATA: &str = "No data available to generate insights.";
pub const NO_ROUTES_DATA: &str = "No data available for routes insights.";
pub const NO_STATIONS_DATA: &str = "No data available for stations insights.";
pub const NO_TRENDS_DATA: &str = "No data available for trends insights.";
pub const NO_FARE_DATA: &str = "No data available for fare insights.";
pub const NO_FARE_COLUMN: &str = "No fare column found.";
pub const NO_FARE_INSIGHTS: &str = "No insights generated due to missing data.";

/// Change between the two most recent years of a yearly view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearOverYear {
    pub previous_year: i32,
    pub latest_year: i32,
    pub change_pct: f64,
}

impl YearOverYear {
    pub fn trend(&self) -> &'static str {
        if self.change_pct >= 0.0 {
            "increase"
        } else {
            "decrease"
        }
    }
}

/// Computes the change from the second most recent year to the most recent.
///
/// `None` with fewer than two dated years or a zero previous-year total.
pub fn year_over_year(yearly: &Series<Option<i32>>) -> Option<YearOverYear> {
    let mut years: Vec<(i32, f64)> = yearly
        .iter()
        .filter_map(|e| e.key.map(|y| (y, e.value)))
        .collect();
    years.sort_by_key(|(y, _)| *y);

    let [.., (previous_year, previous), (latest_year, latest)] = years.as_slice() else {
        return None;
    };
    if *previous == 0.0 {
        return None;
    }

    Some(YearOverYear {
        previous_year: *previous_year,
        latest_year: *latest_year,
        change_pct: (latest - previous) / previous * 100.0,
    })
}

/// Indefinite article for `word`.
pub(crate) fn article(word: &str) -> &'static str {
    if word.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    }
}

/// Labels of the leading entries and their combined share of `total`.
pub(crate) fn top_share(entries: &[Entry<String>], total: f64) -> (String, f64) {
    let labels: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    let sum: f64 = entries.iter().map(|e| e.value).sum();
    (labels.join(", "), pct(sum, total))
}
