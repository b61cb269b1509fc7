use serde::Serialize;

use crate::analyzers::aggregate::{distinct_count, total_fare, total_passengers};
use crate::analyzers::trends::average_daily_passengers;
use crate::records::RecordSet;

/// Headline figures for a filtered record set.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_passengers: u64,
    pub avg_daily_passengers: u64,
    pub total_routes: usize,
    pub total_stations: usize,
    pub total_fare: f64,
}

impl DashboardMetrics {
    pub fn from_records(set: &RecordSet) -> Self {
        DashboardMetrics {
            total_passengers: total_passengers(set),
            avg_daily_passengers: average_daily_passengers(set),
            total_routes: distinct_count(set, |r| r.route.clone()),
            total_stations: distinct_count(set, |r| r.boarding_station.clone()),
            total_fare: total_fare(set),
        }
    }
}
