//! Dashboard report assembly: every view and insight for one selection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analyzers::aggregate::{
    busiest_stations, fare_by_route, fare_by_station, passengers_by_time_slot, peak_time_slots,
    top_routes, weekday_vs_weekend,
};
use crate::analyzers::pivot::{route_peak_timeslot, route_weekday_weekend, station_vs_routes};
use crate::analyzers::trends::{
    daily_ridership, monthly_fare_trend, monthly_passenger_trend, weekday_pattern, yearly_fare,
    yearly_ridership,
};
use crate::analyzers::types::{CrossTab, Series, WeekdayMean, YearMonth};
use crate::config::DashboardConfig;
use crate::filter::{RecordFilter, available_years, trend_window};
use crate::insights::{
    generate_fare_insight, generate_overview_insight, generate_routes_insight,
    generate_stations_insight, generate_trends_insight,
};
use crate::output::Table;
use crate::records::{Column, DayType, RecordSet, TripRecord};
use crate::stats::DashboardMetrics;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSection {
    pub weekday_vs_weekend: Series<Option<DayType>>,
    pub peak_time_slots: Series<String>,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutesSection {
    pub top_routes: Series<String>,
    pub route_peak_timeslot: CrossTab<String, String>,
    pub route_weekday_weekend: CrossTab<String, Option<DayType>>,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationsSection {
    /// Cut to `top_stations` rows.
    pub busiest_stations: Series<String>,
    pub station_vs_routes: CrossTab<String, String>,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsSection {
    /// Years covered by the monthly trends.
    pub trend_years: Vec<i32>,
    pub monthly_passengers: Series<YearMonth>,
    pub monthly_fare: Option<Series<YearMonth>>,
    pub yearly_ridership: Series<Option<i32>>,
    pub daily_ridership: Series<Option<chrono::NaiveDate>>,
    pub weekday_pattern: Vec<WeekdayMean>,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareSection {
    pub yearly_fare: Series<Option<i32>>,
    pub fare_by_route: Series<String>,
    pub fare_by_station: Series<String>,
    pub insight: String,
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub filter: String,
    pub record_count: usize,
    pub metrics: DashboardMetrics,
    pub preview: Vec<TripRecord>,
    pub overview: OverviewSection,
    pub routes: RoutesSection,
    pub stations: StationsSection,
    pub trends: TrendsSection,
    pub fare: FareSection,
}

/// Applies `filter` to `full` and computes every section of the report.
///
/// Monthly trends use [`trend_window`]; every other view uses the filtered
/// set as is.
#[tracing::instrument(skip_all, fields(filter = %filter.describe()))]
pub fn build_report(
    full: &RecordSet,
    filter: &RecordFilter,
    config: &DashboardConfig,
) -> DashboardReport {
    let set = filter.apply(full);
    let window = trend_window(full, &set, filter, config.trend_years);

    let monthly_passengers = monthly_passenger_trend(&window);
    let monthly_fare = set.has(Column::Fare).then(|| monthly_fare_trend(&window));
    let yearly = yearly_ridership(&set);
    let pattern = weekday_pattern(&set);
    let trends_insight =
        generate_trends_insight(&monthly_passengers, monthly_fare.as_ref(), &yearly, Some(&pattern));

    let report = DashboardReport {
        generated_at: Utc::now(),
        filter: filter.describe(),
        record_count: set.len(),
        metrics: DashboardMetrics::from_records(&set),
        preview: set.head(config.preview_rows).to_vec(),
        overview: OverviewSection {
            weekday_vs_weekend: weekday_vs_weekend(&set),
            peak_time_slots: peak_time_slots(&set),
            insight: generate_overview_insight(&set),
        },
        routes: RoutesSection {
            top_routes: top_routes(&set),
            route_peak_timeslot: route_peak_timeslot(&set),
            route_weekday_weekend: route_weekday_weekend(&set),
            insight: generate_routes_insight(&set),
        },
        stations: StationsSection {
            busiest_stations: busiest_stations(&set).top(config.top_stations),
            station_vs_routes: station_vs_routes(&set),
            insight: generate_stations_insight(&set),
        },
        trends: TrendsSection {
            trend_years: available_years(&window),
            monthly_passengers,
            monthly_fare,
            yearly_ridership: yearly,
            daily_ridership: daily_ridership(&set),
            weekday_pattern: pattern,
            insight: trends_insight,
        },
        fare: FareSection {
            yearly_fare: yearly_fare(&set),
            fare_by_route: fare_by_route(&set),
            fare_by_station: fare_by_station(&set),
            insight: generate_fare_insight(&set),
        },
    };

    info!(
        records = report.record_count,
        total_passengers = report.metrics.total_passengers,
        "Report built"
    );
    report
}

/// A single view selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewKind {
    WeekdayVsWeekend,
    PeakTimeSlots,
    TimeSlots,
    TopRoutes,
    BusiestStations,
    FareByRoute,
    FareByStation,
    Daily,
    Yearly,
    YearlyFare,
    MonthlyPassengers,
    MonthlyFare,
    WeekdayPattern,
    RoutePeakTimeslot,
    RouteWeekdayWeekend,
    StationVsRoutes,
}

/// Computes one view for `filter` and renders it as a [`Table`].
pub fn compute_view(
    kind: ViewKind,
    full: &RecordSet,
    filter: &RecordFilter,
    config: &DashboardConfig,
) -> Table {
    let set = filter.apply(full);

    match kind {
        ViewKind::WeekdayVsWeekend => {
            Table::from_series("Day Type", "Passengers", &weekday_vs_weekend(&set))
        }
        ViewKind::PeakTimeSlots => {
            Table::from_series("Time Slot", "Passengers", &peak_time_slots(&set))
        }
        ViewKind::TimeSlots => {
            Table::from_series("Time Slot", "Passengers", &passengers_by_time_slot(&set))
        }
        ViewKind::TopRoutes => Table::from_series("Route", "Passengers", &top_routes(&set)),
        ViewKind::BusiestStations => Table::from_series(
            "Boarding Station",
            "Passengers",
            &busiest_stations(&set).top(config.top_stations),
        ),
        ViewKind::FareByRoute => Table::from_series("Route", "Fare", &fare_by_route(&set)),
        ViewKind::FareByStation => {
            Table::from_series("Boarding Station", "Fare", &fare_by_station(&set))
        }
        ViewKind::Daily => Table::from_series("Date", "Passengers", &daily_ridership(&set)),
        ViewKind::Yearly => Table::from_series("Year", "Passengers", &yearly_ridership(&set)),
        ViewKind::YearlyFare => Table::from_series("Year", "Fare", &yearly_fare(&set)),
        ViewKind::MonthlyPassengers => {
            let window = trend_window(full, &set, filter, config.trend_years);
            Table::from_series("Month", "Passengers", &monthly_passenger_trend(&window))
        }
        ViewKind::MonthlyFare => {
            let window = trend_window(full, &set, filter, config.trend_years);
            Table::from_series("Month", "Fare", &monthly_fare_trend(&window))
        }
        ViewKind::WeekdayPattern => Table::from_weekday_pattern(&weekday_pattern(&set)),
        ViewKind::RoutePeakTimeslot => Table::from_cross_tab("Route", &route_peak_timeslot(&set)),
        ViewKind::RouteWeekdayWeekend => {
            Table::from_cross_tab("Route", &route_weekday_weekend(&set))
        }
        ViewKind::StationVsRoutes => {
            Table::from_cross_tab("Boarding Station", &station_vs_routes(&set))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{NO_FARE_COLUMN, NO_OVERVIEW_DATA, NO_TRENDS_DATA};
    use chrono::NaiveDate;

    fn rec(date: &str, slot: &str, route: &str, station: &str, pax: f64, fare: f64) -> TripRecord {
        TripRecord::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            slot,
            route,
            station,
            pax,
            Some(fare),
        )
    }

    fn sample() -> RecordSet {
        RecordSet::new(vec![
            rec("2021-03-01", "5:00-6:00", "R1", "Katraj", 10.0, 100.0),
            rec("2022-03-01", "7:00-8:00", "R2", "Swargate", 20.0, 200.0),
            rec("2023-01-02", "7:00-8:00", "R1", "Katraj", 30.0, 300.0),
            rec("2024-01-06", "8:00-9:00", "R2", "Hadapsar", 40.0, 400.0),
        ])
    }

    #[test]
    fn test_report_uses_filtered_set() {
        let filter = RecordFilter {
            routes: vec!["R1".into()],
            ..Default::default()
        };
        let report = build_report(&sample(), &filter, &DashboardConfig::default());

        assert_eq!(report.filter, "All Years | R1 | All Stations");
        assert_eq!(report.record_count, 2);
        assert_eq!(report.metrics.total_passengers, 40);
        assert_eq!(report.routes.top_routes.len(), 1);
        assert_eq!(report.preview.len(), 2);
    }

    #[test]
    fn test_trend_window_limits_monthly_views() {
        let report = build_report(
            &sample(),
            &RecordFilter::default(),
            &DashboardConfig::default(),
        );

        assert_eq!(report.trends.trend_years, vec![2022, 2023, 2024]);
        assert_eq!(report.trends.monthly_passengers.total(), 90.0);
        // Yearly view is not windowed.
        assert_eq!(report.trends.yearly_ridership.len(), 4);
        assert!(report.trends.monthly_fare.is_some());
    }

    #[test]
    fn test_config_limits_rows() {
        let config = DashboardConfig {
            top_stations: 2,
            preview_rows: 1,
            ..Default::default()
        };
        let report = build_report(&sample(), &RecordFilter::default(), &config);

        assert_eq!(report.stations.busiest_stations.len(), 2);
        assert_eq!(report.preview.len(), 1);
    }

    #[test]
    fn test_empty_selection_reports_no_data() {
        let filter = RecordFilter {
            years: vec![1999],
            ..Default::default()
        };
        let report = build_report(&sample(), &filter, &DashboardConfig::default());

        assert_eq!(report.record_count, 0);
        assert_eq!(report.overview.insight, NO_OVERVIEW_DATA);
        assert_eq!(report.trends.insight, NO_TRENDS_DATA);
        assert!(report.routes.route_peak_timeslot.is_empty());
        assert!(report.trends.weekday_pattern.is_empty());
    }

    #[test]
    fn test_hidden_fare_column() {
        let set = sample().without_column(Column::Fare);
        let report = build_report(&set, &RecordFilter::default(), &DashboardConfig::default());

        assert!(report.trends.monthly_fare.is_none());
        assert_eq!(report.fare.insight, NO_FARE_COLUMN);
    }

    #[test]
    fn test_report_serializes() {
        let report = build_report(
            &sample(),
            &RecordFilter::default(),
            &DashboardConfig::default(),
        );
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["metrics"]["total_passengers"], 100);
        assert_eq!(value["routes"]["top_routes"][0]["key"], "R2");
        assert!(value["overview"]["insight"].as_str().unwrap().contains("Weekdays"));
    }

    #[test]
    fn test_compute_view_cross_tab() {
        let table = compute_view(
            ViewKind::RouteWeekdayWeekend,
            &sample(),
            &RecordFilter::default(),
            &DashboardConfig::default(),
        );

        assert_eq!(table.headers, vec!["Route", "Weekday", "Weekend"]);
        assert_eq!(table.rows[0], vec!["R1", "40", "0"]);
        assert_eq!(table.rows[1], vec!["R2", "20", "40"]);
    }

    #[test]
    fn test_compute_view_monthly_uses_window() {
        let config = DashboardConfig {
            trend_years: 1,
            ..Default::default()
        };
        let table = compute_view(
            ViewKind::MonthlyPassengers,
            &sample(),
            &RecordFilter::default(),
            &config,
        );

        assert_eq!(table.rows, vec![vec!["2024 January", "40"]]);
    }
}
