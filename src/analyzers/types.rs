//! View types produced by the aggregation engine.

use chrono::NaiveDate;
use serde::Serialize;

use crate::records::{DayType, Month, Weekday};

/// One keyed measure in a [`Series`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<K> {
    pub key: K,
    pub value: f64,
}

/// A one-dimensional view: keyed measures in a defined order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series<K> {
    entries: Vec<Entry<K>>,
}

impl<K> Series<K> {
    pub fn new(entries: Vec<Entry<K>>) -> Self {
        Series { entries }
    }

    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry<K>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    /// The first `n` entries in series order.
    pub fn head(&self, n: usize) -> &[Entry<K>] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn first(&self) -> Option<&Entry<K>> {
        self.entries.first()
    }
}

impl<K: Clone> Series<K> {
    /// A new series holding the first `n` entries.
    pub fn top(&self, n: usize) -> Series<K> {
        Series::new(self.head(n).to_vec())
    }
}

impl<K: PartialEq> Series<K> {
    pub fn get(&self, key: &K) -> Option<f64> {
        self.entries.iter().find(|e| e.key == *key).map(|e| e.value)
    }
}

impl<'a, K> IntoIterator for &'a Series<K> {
    type Item = &'a Entry<K>;
    type IntoIter = std::slice::Iter<'a, Entry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Key of a monthly trend row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearMonth {
    pub year: Option<i32>,
    pub month: Option<Month>,
}

/// Mean passengers per record on one day of the week. `None` when no
/// record falls on that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekdayMean {
    pub weekday: Weekday,
    pub avg_passengers: Option<f64>,
}

/// A two-dimensional view. Absent combinations read as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab<R, C> {
    pub rows: Vec<R>,
    pub columns: Vec<C>,
    pub cells: Vec<Vec<f64>>,
}

impl<R: PartialEq, C: PartialEq> CrossTab<R, C> {
    pub fn get(&self, row: &R, column: &C) -> Option<f64> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        Some(self.cells[r][c])
    }

    pub fn row_total(&self, row: &R) -> Option<f64> {
        let r = self.rows.iter().position(|x| x == row)?;
        Some(self.cells[r].iter().sum())
    }
}

impl<R, C> CrossTab<R, C> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Human-readable label of a view key, used by text and CSV output.
pub trait Label {
    fn label(&self) -> String;
}

impl Label for String {
    fn label(&self) -> String {
        self.clone()
    }
}

impl Label for i32 {
    fn label(&self) -> String {
        self.to_string()
    }
}

impl Label for NaiveDate {
    fn label(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl Label for Month {
    fn label(&self) -> String {
        self.name().to_string()
    }
}

impl Label for Weekday {
    fn label(&self) -> String {
        self.name().to_string()
    }
}

impl Label for DayType {
    fn label(&self) -> String {
        self.name().to_string()
    }
}

impl Label for YearMonth {
    fn label(&self) -> String {
        format!("{} {}", self.year.label(), self.month.label())
    }
}

impl<T: Label> Label for Option<T> {
    fn label(&self) -> String {
        match self {
            Some(v) => v.label(),
            None => "Unknown".to_string(),
        }
    }
}
