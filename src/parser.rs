//! CSV ingestion for ridership datasets.
//!
//! Reading is split in two: [`read_rows`] checks the header and pulls raw
//! string rows, [`normalize`] types them and derives the calendar fields.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::records::{Column, RecordSet, TripRecord};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d-%b-%Y",
];

/// Two-digit-year layouts, tried only after every four-digit layout fails.
const SHORT_YEAR_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m-%d-%y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d-%b-%y",
    "%d %b %y",
];

/// `%Y` also accepts one or two digits; such a year is a short-year date
/// read in the wrong layout.
const MIN_FULL_YEAR: i32 = 1000;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A row as it appears in the input file. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time Slot")]
    pub time_slot: String,
    #[serde(rename = "Route")]
    pub route: String,
    #[serde(rename = "Boarding Station")]
    pub boarding_station: String,
    #[serde(rename = "Passenger Count")]
    pub passenger_count: Option<String>,
    #[serde(rename = "Fare")]
    pub fare: Option<String>,
}

/// Parses CSV bytes straight into a normalized [`RecordSet`].
///
/// # Errors
///
/// Fails if a required column is absent, the CSV is malformed, or a
/// numeric cell holds something other than a number.
pub fn parse_csv(bytes: &[u8]) -> Result<RecordSet, IngestError> {
    normalize(read_rows(bytes)?)
}

/// Reads raw rows, rejecting the file if any required column is missing.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(clean_header).collect();
    for column in Column::ALL {
        if !headers.iter().any(|h| h == column.header()) {
            return Err(IngestError::MissingColumn(column.header().to_string()));
        }
    }
    let headers = StringRecord::from(headers);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let mut record = result?;
        // Short rows read as empty trailing cells.
        while record.len() < headers.len() {
            record.push_field("");
        }
        rows.push(record.deserialize(Some(&headers))?);
    }

    debug!(rows = rows.len(), "CSV rows read");
    Ok(rows)
}

fn clean_header(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_string()
}

/// Types raw rows and derives their calendar fields, keeping input order.
///
/// Unparseable dates become `None`, unparseable time slots are kept
/// verbatim and a missing passenger count becomes 0.
pub fn normalize(rows: Vec<RawRow>) -> Result<RecordSet, IngestError> {
    let mut records = Vec::with_capacity(rows.len());
    let mut bad_dates = 0usize;
    let mut missing_counts = 0usize;

    for (i, raw) in rows.into_iter().enumerate() {
        let row = i + 1;

        let date = parse_date(&raw.date);
        if date.is_none() {
            bad_dates += 1;
        }

        let passenger_count = match parse_number(row, Column::PassengerCount, raw.passenger_count)? {
            Some(n) => n,
            None => {
                missing_counts += 1;
                0.0
            }
        };
        let fare = parse_number(row, Column::Fare, raw.fare)?;

        records.push(TripRecord::new(
            date,
            &raw.time_slot,
            &raw.route,
            &raw.boarding_station,
            passenger_count,
            fare,
        ));
    }

    if bad_dates > 0 {
        warn!(bad_dates, "Rows with unparseable dates kept without calendar fields");
    }
    debug!(
        records = records.len(),
        missing_counts, "Records normalized"
    );

    Ok(RecordSet::new(records))
}

fn parse_number(
    row: usize,
    column: Column,
    value: Option<String>,
) -> Result<Option<f64>, IngestError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| IngestError::InvalidNumber {
            row,
            column: column.header().to_string(),
            value,
        })
}

/// Best-effort calendar date parsing across common layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let full_year = |d: &NaiveDate| d.year() >= MIN_FULL_YEAR;

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .find(full_year)
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
                .find(full_year)
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
                .filter(full_year)
        })
        .or_else(|| {
            SHORT_YEAR_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}
