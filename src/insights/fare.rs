//! Fare collection summary.

use tracing::debug;

use crate::analyzers::aggregate::{fare_by_route, fare_by_station};
use crate::analyzers::trends::yearly_fare;
use crate::insights::{NO_FARE_COLUMN, NO_FARE_DATA, NO_FARE_INSIGHTS, article, top_share, year_over_year};
use crate::records::{Column, RecordSet, TripRecord};

/// Year-over-year fare change and the top three routes and stations by fare.
///
/// Each line needs its own column (date, route, station); lines whose
/// column is hidden are skipped.
pub fn generate_fare_insight(set: &RecordSet) -> String {
    if set.is_empty() {
        return NO_FARE_DATA.to_string();
    }
    if !set.has(Column::Fare) {
        return NO_FARE_COLUMN.to_string();
    }

    let total_fare: f64 = set.iter().map(TripRecord::fare_amount).sum();
    let mut lines = Vec::new();

    if set.has(Column::Date) {
        if let Some(yoy) = year_over_year(&yearly_fare(set)) {
            lines.push(format!(
                "- Yearly fare shows {} {} of ~{:.1}% compared to {}.",
                article(yoy.trend()),
                yoy.trend(),
                yoy.change_pct.abs(),
                yoy.previous_year
            ));
        }
    }

    if set.has(Column::Route) {
        let routes = fare_by_route(set);
        let (labels, share) = top_share(routes.head(3), total_fare);
        lines.push(format!(
            "- Top routes ({labels}) contribute ~{share:.1}% of total fare."
        ));
    }

    if set.has(Column::BoardingStation) {
        let stations = fare_by_station(set);
        let (labels, share) = top_share(stations.head(3), total_fare);
        lines.push(format!(
            "- Top stations ({labels}) handle ~{share:.1}% of total fare."
        ));
    }

    if lines.is_empty() {
        debug!("No fare sub-insight applies");
        NO_FARE_INSIGHTS.to_string()
    } else {
        lines.join("\n")
    }
}
