use crate::analyzers::types::{Entry, Series};
use crate::analyzers::utility::{group_sum, nulls_last, round_to, sort_desc};
use crate::records::{DayType, RecordSet, TripRecord};
use crate::timeslot::slot_order;

/// Total passengers across the set, truncated to a whole number.
pub fn total_passengers(set: &RecordSet) -> u64 {
    set.iter().map(|r| r.passenger_count).sum::<f64>() as u64
}

/// Total fare across the set, rounded to two decimals. Missing fares count as 0.
pub fn total_fare(set: &RecordSet) -> f64 {
    round_to(set.iter().map(TripRecord::fare_amount).sum(), 2)
}

/// Passengers per day type: Weekday, then Weekend, then undated records.
pub fn weekday_vs_weekend(set: &RecordSet) -> Series<Option<DayType>> {
    let mut entries = group_sum(set, |r| r.day_type, |r| r.passenger_count);
    entries.sort_by(|a, b| nulls_last(&a.key, &b.key));
    Series::new(entries)
}

/// Passengers per slot of the service-day schedule, latest slot first.
///
/// Slots outside the schedule are dropped.
pub fn peak_time_slots(set: &RecordSet) -> Series<String> {
    let mut ranked: Vec<(usize, Entry<String>)> =
        group_sum(set, |r| r.time_slot.clone(), |r| r.passenger_count)
            .into_iter()
            .filter_map(|e| slot_order(&e.key).map(|rank| (rank, e)))
            .collect();

    ranked.sort_by_key(|(rank, _)| *rank);
    Series::new(ranked.into_iter().rev().map(|(_, e)| e).collect())
}

/// Passengers per time slot, busiest first. Unlike [`peak_time_slots`] this
/// keeps every slot label.
pub fn passengers_by_time_slot(set: &RecordSet) -> Series<String> {
    ranked(set, |r| r.time_slot.clone(), |r| r.passenger_count)
}

/// Passengers per route, busiest first.
pub fn top_routes(set: &RecordSet) -> Series<String> {
    ranked(set, |r| r.route.clone(), |r| r.passenger_count)
}

/// Passengers per boarding station, busiest first.
pub fn busiest_stations(set: &RecordSet) -> Series<String> {
    ranked(set, |r| r.boarding_station.clone(), |r| r.passenger_count)
}

/// Fare collected per route, highest first.
pub fn fare_by_route(set: &RecordSet) -> Series<String> {
    ranked(set, |r| r.route.clone(), TripRecord::fare_amount)
}

/// Fare collected per boarding station, highest first.
pub fn fare_by_station(set: &RecordSet) -> Series<String> {
    ranked(set, |r| r.boarding_station.clone(), TripRecord::fare_amount)
}

fn ranked<FK, FV>(set: &RecordSet, key: FK, value: FV) -> Series<String>
where
    FK: Fn(&TripRecord) -> String,
    FV: Fn(&TripRecord) -> f64,
{
    let mut entries = group_sum(set, key, value);
    sort_desc(&mut entries);
    Series::new(entries)
}

/// Number of distinct values `key` takes across the set.
pub fn distinct_count<K, F>(set: &RecordSet, key: F) -> usize
where
    K: Eq + std::hash::Hash,
    F: Fn(&TripRecord) -> K,
{
    set.iter().map(key).collect::<std::collections::HashSet<_>>().len()
}
