//! Overview, route and station summaries.

use tracing::debug;

use crate::analyzers::aggregate::{
    busiest_stations, distinct_count, passengers_by_time_slot, top_routes, weekday_vs_weekend,
};
use crate::analyzers::utility::pct;
use crate::insights::{NO_OVERVIEW_DATA, NO_ROUTES_DATA, NO_STATIONS_DATA, top_share};
use crate::records::{Column, DayType, RecordSet};

fn passenger_total(set: &RecordSet) -> f64 {
    set.iter().map(|r| r.passenger_count).sum()
}

/// Weekday/weekend split and the two busiest time slots.
pub fn generate_overview_insight(set: &RecordSet) -> String {
    if set.is_empty() {
        return NO_OVERVIEW_DATA.to_string();
    }

    let total = passenger_total(set);
    let weekday = weekday_vs_weekend(set)
        .get(&Some(DayType::Weekday))
        .unwrap_or(0.0);
    let weekday_pct = pct(weekday, total);
    let weekend_pct = if total > 0.0 { 100.0 - weekday_pct } else { 0.0 };

    let mut lines = vec![
        format!("- Weekdays account for ~{weekday_pct:.1}% of total ridership."),
        format!("- Weekends account for ~{weekend_pct:.1}% of total ridership."),
    ];

    if set.has(Column::TimeSlot) {
        let slots = passengers_by_time_slot(set);
        let top = slots.head(2);
        if !top.is_empty() {
            let (labels, share) = top_share(top, total);
            lines.push(format!("- Peak slots ({labels}) cover ~{share:.1}% of passengers."));
        }
    } else {
        debug!("Time Slot hidden, skipping peak slot insight");
    }

    lines.join("\n")
}

/// The three busiest routes and the peak slot of the busiest one.
pub fn generate_routes_insight(set: &RecordSet) -> String {
    if set.is_empty() || !set.has(Column::Route) {
        return NO_ROUTES_DATA.to_string();
    }

    let routes = top_routes(set);
    let top = routes.head(3);
    let (labels, share) = top_share(top, passenger_total(set));
    let mut insight =
        format!("- Top routes ({labels}) account for ~{share:.1}% of total ridership.");

    if set.has(Column::TimeSlot) {
        if let Some(busiest) = top.first() {
            let route_set = set.filtered(|r| r.route == busiest.key);
            if let Some(slot) = passengers_by_time_slot(&route_set).first() {
                insight.push_str(&format!(
                    "\n- For {}, the busiest slot is {}.",
                    busiest.key, slot.key
                ));
            }
        }
    } else {
        debug!("Time Slot hidden, skipping busiest route slot insight");
    }

    insight
}

/// The three busiest stations and how many routes serve the busiest one.
pub fn generate_stations_insight(set: &RecordSet) -> String {
    if set.is_empty() || !set.has(Column::BoardingStation) {
        return NO_STATIONS_DATA.to_string();
    }

    let stations = busiest_stations(set);
    let top = stations.head(3);
    let (labels, share) = top_share(top, passenger_total(set));
    let mut insight =
        format!("- Top stations ({labels}) handle ~{share:.1}% of total ridership.");

    if set.has(Column::Route) {
        if let Some(busiest) = top.first() {
            let station_set = set.filtered(|r| r.boarding_station == busiest.key);
            let routes = distinct_count(&station_set, |r| r.route.clone());
            insight.push_str(&format!(
                "\n- {} connects to {} different routes.",
                busiest.key, routes
            ));
        }
    } else {
        debug!("Route hidden, skipping station route count insight");
    }

    insight
}
