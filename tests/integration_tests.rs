use ridership_insights::analyzers::aggregate::{
    busiest_stations, peak_time_slots, top_routes, total_fare, total_passengers,
    weekday_vs_weekend,
};
use ridership_insights::analyzers::pivot::route_peak_timeslot;
use ridership_insights::analyzers::trends::{
    monthly_fare_trend, monthly_passenger_trend, weekday_pattern, yearly_ridership,
};
use ridership_insights::analyzers::types::Label;
use ridership_insights::config::DashboardConfig;
use ridership_insights::error::IngestError;
use ridership_insights::filter::RecordFilter;
use ridership_insights::insights::{
    NO_FARE_DATA, NO_OVERVIEW_DATA, NO_ROUTES_DATA, NO_STATIONS_DATA, NO_TRENDS_DATA,
    generate_fare_insight, generate_overview_insight, generate_routes_insight,
    generate_stations_insight, generate_trends_insight,
};
use ridership_insights::output::render_text;
use ridership_insights::parser::parse_csv;
use ridership_insights::records::{DayType, RecordSet};
use ridership_insights::report::build_report;

fn sample() -> RecordSet {
    let bytes = include_bytes!("fixtures/sample_ridership.csv");
    parse_csv(bytes).expect("Failed to parse fixture")
}

#[test]
fn test_full_pipeline() {
    let set = sample();
    assert_eq!(set.len(), 7);

    assert_eq!(total_passengers(&set), 105);
    assert_eq!(total_fare(&set), 1050.0);

    let routes: Vec<_> = top_routes(&set).keys().cloned().collect();
    assert_eq!(routes, vec!["101", "9", "115"]);

    let stations: Vec<_> = busiest_stations(&set).keys().cloned().collect();
    assert_eq!(stations, vec!["Katraj", "Hadapsar", "Swargate"]);
}

#[test]
fn test_ingestion_degrades_per_field() {
    let set = sample();
    let records = set.records();

    assert_eq!(records[0].time_slot, "1:00PM - 2:00PM");
    assert_eq!(records[1].time_slot, "5:00AM - 6:00AM");
    assert_eq!(records[5].time_slot, "not-a-slot");
    assert_eq!(records[5].passenger_count, 0.0);
    assert_eq!(records[6].date, None);
    assert_eq!(records[6].year, None);
    assert_eq!(records[6].fare, None);
}

#[test]
fn test_weekday_split_sums_to_hundred() {
    let set = sample();
    let split = weekday_vs_weekend(&set);

    assert_eq!(split.get(&Some(DayType::Weekday)), Some(60.0));
    assert_eq!(split.get(&Some(DayType::Weekend)), Some(40.0));
    assert_eq!(split.get(&None), Some(5.0));

    let insight = generate_overview_insight(&set);
    assert!(insight.contains("Weekdays account for ~57.1%"));
    assert!(insight.contains("Weekends account for ~42.9%"));
    assert!(insight.contains("(8:00AM - 9:00AM, 10:00PM - 11:00PM) cover ~52.4%"));
}

#[test]
fn test_peak_slots_latest_first_and_canonical_only() {
    let slots: Vec<_> = peak_time_slots(&sample()).keys().cloned().collect();
    assert_eq!(
        slots,
        vec![
            "10:00PM - 11:00PM",
            "1:00PM - 2:00PM",
            "8:00AM - 9:00AM",
            "7:00AM - 8:00AM",
            "5:00AM - 6:00AM",
        ]
    );
}

#[test]
fn test_monthly_trend_calendar_order() {
    let labels: Vec<_> = monthly_passenger_trend(&sample())
        .keys()
        .map(Label::label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "2023 January",
            "2023 March",
            "2024 February",
            "2024 March",
            "Unknown Unknown",
        ]
    );
}

#[test]
fn test_route_slot_matrix_fills_zero() {
    let tab = route_peak_timeslot(&sample());

    assert_eq!(tab.rows, vec!["9", "101", "115"]);
    assert_eq!(tab.columns.last().map(String::as_str), Some("not-a-slot"));
    assert_eq!(
        tab.get(&"101".to_string(), &"10:00PM - 11:00PM".to_string()),
        Some(25.0)
    );
    assert_eq!(
        tab.get(&"9".to_string(), &"5:00AM - 6:00AM".to_string()),
        Some(0.0)
    );
}

#[test]
fn test_section_insights() {
    let set = sample();

    let routes = generate_routes_insight(&set);
    assert!(routes.contains("Top routes (101, 9, 115) account for ~100.0%"));
    assert!(routes.contains("For 101, the busiest slot is 10:00PM - 11:00PM."));

    let stations = generate_stations_insight(&set);
    assert!(stations.contains("Katraj connects to 3 different routes."));

    let yearly = yearly_ridership(&set);
    let pattern = weekday_pattern(&set);
    let trends = generate_trends_insight(
        &monthly_passenger_trend(&set),
        Some(&monthly_fare_trend(&set)),
        &yearly,
        Some(&pattern),
    );
    assert!(trends.contains("February is the busiest month (~52.4%)"));
    assert!(trends.contains("February contributes the most to fare (~52.4%)"));
    assert!(trends.contains("There's an increase of ~22.2% in ridership"));

    let fare = generate_fare_insight(&set);
    assert!(fare.contains("Yearly fare shows an increase of ~33.3% compared to 2023."));
    assert!(fare.contains("Top routes (101, 9, 115) contribute ~100.0% of total fare."));
}

#[test]
fn test_empty_set_never_fails() {
    let empty = RecordFilter {
        years: vec![1990],
        ..Default::default()
    }
    .apply(&sample());

    assert_eq!(total_passengers(&empty), 0);
    assert!(top_routes(&empty).is_empty());
    assert!(monthly_passenger_trend(&empty).is_empty());
    assert!(route_peak_timeslot(&empty).is_empty());
    assert!(weekday_pattern(&empty).is_empty());

    assert_eq!(generate_overview_insight(&empty), NO_OVERVIEW_DATA);
    assert_eq!(generate_routes_insight(&empty), NO_ROUTES_DATA);
    assert_eq!(generate_stations_insight(&empty), NO_STATIONS_DATA);
    assert_eq!(generate_fare_insight(&empty), NO_FARE_DATA);
    assert_eq!(
        generate_trends_insight(
            &monthly_passenger_trend(&empty),
            None,
            &yearly_ridership(&empty),
            None
        ),
        NO_TRENDS_DATA
    );
}

#[test]
fn test_aggregations_are_repeatable() {
    let set = sample();
    assert_eq!(top_routes(&set), top_routes(&set));
    assert_eq!(route_peak_timeslot(&set), route_peak_timeslot(&set));
    let trends = || {
        generate_trends_insight(
            &monthly_passenger_trend(&set),
            None,
            &yearly_ridership(&set),
            None,
        )
    };
    assert_eq!(trends(), trends());
    assert_eq!(set.len(), 7);
}

#[test]
fn test_missing_column_is_hard_failure() {
    let err = parse_csv(b"Date,Time Slot,Route,Passenger Count,Fare\n").unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn(ref c) if c == "Boarding Station"));
    assert_eq!(err.to_string(), "missing required column Boarding Station");
}

#[test]
fn test_invalid_number_reports_row() {
    let csv = "Date,Time Slot,Route,Boarding Station,Passenger Count,Fare\n\
               2024-01-01,5:00-6:00,R1,Katraj,3,10\n\
               2024-01-01,5:00-6:00,R1,Katraj,lots,10\n";
    let err = parse_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidNumber { row: 2, .. }));
}

#[test]
fn test_report_text_and_json() {
    let config = DashboardConfig::default();
    let filter = RecordFilter {
        years: vec![2024],
        ..Default::default()
    };
    let report = build_report(&sample(), &filter, &config);

    assert_eq!(report.metrics.total_passengers, 55);
    assert_eq!(report.trends.trend_years, vec![2024]);

    let text = render_text(&report, &config);
    assert!(text.starts_with("Ridership Insights: 2024 | All Routes | All Stations"));
    assert!(text.contains("== Fare =="));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["record_count"], 3);
}
