//! Normalized trip records and the calendar types derived from their dates.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::timeslot::format_timeslot;

/// Calendar month, ordered January through December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month for a 1-based month number.
    pub fn from_number(n: u32) -> Option<Month> {
        Self::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Day of week, ordered Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn of(date: NaiveDate) -> Weekday {
        Self::ALL[date.weekday().num_days_from_monday() as usize]
    }

    /// Zero-based index in a Monday-start week.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weekday/Weekend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn of(weekday: Weekday) -> DayType {
        if weekday.index() >= 5 {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One normalized row of the ridership dataset.
///
/// Calendar fields are derived from `date` on construction and are `None`
/// exactly when the date failed to parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<Month>,
    pub day_type: Option<DayType>,
    pub weekday: Option<Weekday>,
    pub time_slot: String,
    pub route: String,
    pub boarding_station: String,
    pub passenger_count: f64,
    pub fare: Option<f64>,
}

impl TripRecord {
    pub fn new(
        date: Option<NaiveDate>,
        time_slot: &str,
        route: &str,
        boarding_station: &str,
        passenger_count: f64,
        fare: Option<f64>,
    ) -> Self {
        let weekday = date.map(Weekday::of);
        TripRecord {
            date,
            year: date.map(|d| d.year()),
            month: date.and_then(|d| Month::from_number(d.month())),
            day_type: weekday.map(DayType::of),
            weekday,
            time_slot: format_timeslot(time_slot),
            route: route.to_string(),
            boarding_station: boarding_station.to_string(),
            passenger_count,
            fare,
        }
    }

    /// Fare with a missing value counted as zero, for summing.
    pub fn fare_amount(&self) -> f64 {
        self.fare.unwrap_or(0.0)
    }
}

/// Source columns of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    TimeSlot,
    Route,
    BoardingStation,
    PassengerCount,
    Fare,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Date,
        Column::TimeSlot,
        Column::Route,
        Column::BoardingStation,
        Column::PassengerCount,
        Column::Fare,
    ];

    /// Header name in the input CSV.
    pub fn header(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::TimeSlot => "Time Slot",
            Column::Route => "Route",
            Column::BoardingStation => "Boarding Station",
            Column::PassengerCount => "Passenger Count",
            Column::Fare => "Fare",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The set of columns a [`RecordSet`] exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSet(u8);

impl ColumnSet {
    pub fn all() -> Self {
        ColumnSet(Column::ALL.iter().fold(0, |acc, c| acc | c.bit()))
    }

    pub fn contains(self, column: Column) -> bool {
        self.0 & column.bit() != 0
    }

    pub fn without(self, column: Column) -> Self {
        ColumnSet(self.0 & !column.bit())
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::all()
    }
}

/// An immutable collection of trip records in input order.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<TripRecord>,
    columns: ColumnSet,
}

impl RecordSet {
    pub fn new(records: Vec<TripRecord>) -> Self {
        RecordSet {
            records,
            columns: ColumnSet::all(),
        }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> ColumnSet {
        self.columns
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(column)
    }

    /// A projection of this set with `column` hidden from readers.
    pub fn without_column(&self, column: Column) -> Self {
        RecordSet {
            records: self.records.clone(),
            columns: self.columns.without(column),
        }
    }

    /// A new set holding the records that satisfy `keep`.
    pub fn filtered<F>(&self, keep: F) -> Self
    where
        F: Fn(&TripRecord) -> bool,
    {
        RecordSet {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
            columns: self.columns,
        }
    }

    /// The first `n` records, for previews.
    pub fn head(&self, n: usize) -> &[TripRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
