//! Passenger cross tabs between two categorical dimensions.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::analyzers::types::CrossTab;
use crate::analyzers::utility::{natural_cmp, nulls_last};
use crate::records::{DayType, RecordSet, TripRecord};
use crate::timeslot::compare_slots;

/// Routes by time slot. Slot columns follow the service-day schedule.
pub fn route_peak_timeslot(set: &RecordSet) -> CrossTab<String, String> {
    cross_tab(
        set,
        |r| r.route.clone(),
        |r| r.time_slot.clone(),
        |a, b| natural_cmp(a, b),
        |a, b| compare_slots(a, b),
    )
}

/// Routes by day type.
pub fn route_weekday_weekend(set: &RecordSet) -> CrossTab<String, Option<DayType>> {
    cross_tab(
        set,
        |r| r.route.clone(),
        |r| r.day_type,
        |a, b| natural_cmp(a, b),
        nulls_last,
    )
}

/// Boarding stations by route.
pub fn station_vs_routes(set: &RecordSet) -> CrossTab<String, String> {
    cross_tab(
        set,
        |r| r.boarding_station.clone(),
        |r| r.route.clone(),
        |a, b| natural_cmp(a, b),
        |a, b| natural_cmp(a, b),
    )
}

fn cross_tab<R, C, FR, FC, OR, OC>(
    set: &RecordSet,
    row_key: FR,
    col_key: FC,
    row_order: OR,
    col_order: OC,
) -> CrossTab<R, C>
where
    R: Eq + Hash + Clone,
    C: Eq + Hash + Clone,
    FR: Fn(&TripRecord) -> R,
    FC: Fn(&TripRecord) -> C,
    OR: Fn(&R, &R) -> Ordering,
    OC: Fn(&C, &C) -> Ordering,
{
    let mut sums: HashMap<(R, C), f64> = HashMap::new();
    let mut rows: HashSet<R> = HashSet::new();
    let mut columns: HashSet<C> = HashSet::new();

    for record in set {
        let r = row_key(record);
        let c = col_key(record);
        rows.insert(r.clone());
        columns.insert(c.clone());
        *sums.entry((r, c)).or_insert(0.0) += record.passenger_count;
    }

    let mut rows: Vec<R> = rows.into_iter().collect();
    rows.sort_by(|a, b| row_order(a, b));
    let mut columns: Vec<C> = columns.into_iter().collect();
    columns.sort_by(|a, b| col_order(a, b));

    let cells = rows
        .iter()
        .map(|r| {
            columns
                .iter()
                .map(|c| {
                    sums.get(&(r.clone(), c.clone()))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    CrossTab {
        rows,
        columns,
        cells,
    }
}
