//! Calendar-keyed views: daily, yearly, monthly and day-of-week patterns.
//!
//! Undated records land in a `None` bucket that sorts after every real
//! date, so they still count toward totals.

use chrono::NaiveDate;

use crate::analyzers::types::{Series, WeekdayMean, YearMonth};
use crate::analyzers::utility::{group_sum, mean, nulls_last};
use crate::records::{RecordSet, TripRecord, Weekday};

/// Passengers per calendar day, earliest first.
pub fn daily_ridership(set: &RecordSet) -> Series<Option<NaiveDate>> {
    let mut entries = group_sum(set, |r| r.date, |r| r.passenger_count);
    entries.sort_by(|a, b| nulls_last(&a.key, &b.key));
    Series::new(entries)
}

/// Mean of [`daily_ridership`], truncated. 0 for an empty set.
pub fn average_daily_passengers(set: &RecordSet) -> u64 {
    let daily: Vec<f64> = daily_ridership(set).values().collect();
    mean(&daily) as u64
}

/// Passengers per year, ascending.
pub fn yearly_ridership(set: &RecordSet) -> Series<Option<i32>> {
    yearly(set, |r| r.passenger_count)
}

/// Fare collected per year, ascending.
pub fn yearly_fare(set: &RecordSet) -> Series<Option<i32>> {
    yearly(set, TripRecord::fare_amount)
}

fn yearly<F>(set: &RecordSet, value: F) -> Series<Option<i32>>
where
    F: Fn(&TripRecord) -> f64,
{
    let mut entries = group_sum(set, |r| r.year, value);
    entries.sort_by(|a, b| nulls_last(&a.key, &b.key));
    Series::new(entries)
}

/// Passengers per (year, month), by year then calendar month.
pub fn monthly_passenger_trend(set: &RecordSet) -> Series<YearMonth> {
    monthly(set, |r| r.passenger_count)
}

/// Fare collected per (year, month), by year then calendar month.
pub fn monthly_fare_trend(set: &RecordSet) -> Series<YearMonth> {
    monthly(set, TripRecord::fare_amount)
}

fn monthly<F>(set: &RecordSet, value: F) -> Series<YearMonth>
where
    F: Fn(&TripRecord) -> f64,
{
    let mut entries = group_sum(
        set,
        |r| YearMonth {
            year: r.year,
            month: r.month,
        },
        value,
    );
    entries.sort_by(|a, b| {
        nulls_last(&a.key.year, &b.key.year).then_with(|| nulls_last(&a.key.month, &b.key.month))
    });
    Series::new(entries)
}

/// Mean passengers per record for each day of the week, Monday through
/// Sunday. Days with no records have no mean; an empty set gives no rows.
pub fn weekday_pattern(set: &RecordSet) -> Vec<WeekdayMean> {
    if set.is_empty() {
        return Vec::new();
    }

    let mut sums = [0.0f64; 7];
    let mut counts = [0usize; 7];

    for record in set {
        if let Some(day) = record.weekday {
            sums[day.index()] += record.passenger_count;
            counts[day.index()] += 1;
        }
    }

    Weekday::ALL
        .iter()
        .map(|&weekday| {
            let i = weekday.index();
            WeekdayMean {
                weekday,
                avg_passengers: (counts[i] > 0).then(|| sums[i] / counts[i] as f64),
            }
        })
        .collect()
}
