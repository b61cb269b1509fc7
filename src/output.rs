//! Output formatting for views and dashboard reports.
//!
//! Supports JSON serialization, plain-text tables and CSV export.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use tracing::debug;

use crate::analyzers::types::{CrossTab, Label, Series, WeekdayMean};
use crate::analyzers::utility::round_to;
use crate::config::DashboardConfig;
use crate::records::{Column, TripRecord};
use crate::report::DashboardReport;

/// A rendered view: header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn cell(value: f64) -> String {
    round_to(value, 2).to_string()
}

impl Table {
    pub fn from_series<K: Label>(key_header: &str, value_header: &str, series: &Series<K>) -> Self {
        Table {
            headers: vec![key_header.to_string(), value_header.to_string()],
            rows: series
                .iter()
                .map(|e| vec![e.key.label(), cell(e.value)])
                .collect(),
        }
    }

    /// One row per cross-tab row; `corner` heads the row-label column.
    pub fn from_cross_tab<R: Label, C: Label>(corner: &str, tab: &CrossTab<R, C>) -> Self {
        let mut headers = vec![corner.to_string()];
        headers.extend(tab.columns.iter().map(Label::label));

        let rows = tab
            .rows
            .iter()
            .zip(&tab.cells)
            .map(|(row, cells)| {
                let mut out = vec![row.label()];
                out.extend(cells.iter().map(|v| cell(*v)));
                out
            })
            .collect();

        Table { headers, rows }
    }

    pub fn from_weekday_pattern(pattern: &[WeekdayMean]) -> Self {
        Table {
            headers: vec!["Weekday".to_string(), "Avg Passengers".to_string()],
            rows: pattern
                .iter()
                .map(|d| {
                    let avg = d.avg_passengers.map(cell).unwrap_or_default();
                    vec![d.weekday.label(), avg]
                })
                .collect(),
        }
    }

    pub fn from_records(records: &[TripRecord]) -> Self {
        Table {
            headers: Column::ALL.iter().map(|c| c.header().to_string()).collect(),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.date.label(),
                        r.time_slot.clone(),
                        r.route.clone(),
                        r.boarding_station.clone(),
                        cell(r.passenger_count),
                        r.fare.map(cell).unwrap_or_default(),
                    ]
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the table as CSV, header first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Space-aligned text rendering with a rule under the header.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(value.chars().count());
                }
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = line(&self.headers);
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("  "));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}

/// Writes `table` to a CSV file at `path`, replacing any existing file.
pub fn write_table_csv(path: &str, table: &Table) -> Result<()> {
    debug!(path, rows = table.rows.len(), "Writing CSV view");
    let file = File::create(path)?;
    table.write_csv(file)
}

/// Serializes any report or view as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Groups digits the Indian way: the last three, then pairs
/// (`123456789` becomes `12,34,56,789`). The fractional part is dropped.
pub fn format_inr(number: f64) -> String {
    let digits = (number.trunc().abs() as u64).to_string();
    let sign = if number <= -1.0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{sign}{},{last_three}", groups.join(","))
}

fn section(out: &mut String, title: &str, insight: &str) {
    let _ = writeln!(out, "\n== {title} ==");
    let _ = writeln!(out, "{insight}");
}

fn table(out: &mut String, title: &str, table: &Table) {
    if table.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}");
    let _ = writeln!(out, "{}", table.render());
}

/// Human-readable rendering of a full report. Rankings are cut to
/// `config.top_routes` rows.
pub fn render_text(report: &DashboardReport, config: &DashboardConfig) -> String {
    let top = config.top_routes;
    let m = &report.metrics;
    let mut out = String::new();

    let _ = writeln!(out, "Ridership Insights: {}", report.filter);
    let _ = writeln!(out, "Total Passengers:   {}", format_inr(m.total_passengers as f64));
    let _ = writeln!(out, "Avg Daily:          {}", format_inr(m.avg_daily_passengers as f64));
    let _ = writeln!(out, "Routes:             {}", m.total_routes);
    let _ = writeln!(out, "Stations:           {}", m.total_stations);
    let _ = writeln!(out, "Total Fare:         ₹{}", format_inr(m.total_fare));

    let o = &report.overview;
    section(&mut out, "Overview", &o.insight);
    table(
        &mut out,
        "Weekday vs Weekend",
        &Table::from_series("Day Type", "Passengers", &o.weekday_vs_weekend),
    );
    table(
        &mut out,
        "Peak Time Slots",
        &Table::from_series("Time Slot", "Passengers", &o.peak_time_slots),
    );

    let r = &report.routes;
    section(&mut out, "Routes", &r.insight);
    table(
        &mut out,
        "Top Routes",
        &Table::from_series("Route", "Passengers", &r.top_routes.top(top)),
    );

    let s = &report.stations;
    section(&mut out, "Stations", &s.insight);
    table(
        &mut out,
        "Busiest Stations",
        &Table::from_series("Boarding Station", "Passengers", &s.busiest_stations),
    );

    let t = &report.trends;
    section(&mut out, "Trends", &t.insight);
    table(
        &mut out,
        "Yearly Ridership",
        &Table::from_series("Year", "Passengers", &t.yearly_ridership),
    );
    table(
        &mut out,
        "Monthly Passengers",
        &Table::from_series("Month", "Passengers", &t.monthly_passengers),
    );
    table(
        &mut out,
        "Weekday Pattern",
        &Table::from_weekday_pattern(&t.weekday_pattern),
    );

    let f = &report.fare;
    section(&mut out, "Fare", &f.insight);
    table(
        &mut out,
        "Fare by Route",
        &Table::from_series("Route", "Fare", &f.fare_by_route.top(top)),
    );
    table(
        &mut out,
        "Fare by Station",
        &Table::from_series("Boarding Station", "Fare", &f.fare_by_station.top(top)),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Entry;
    use crate::records::{DayType, Weekday};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn routes() -> Series<String> {
        Series::new(vec![
            Entry { key: "R2".to_string(), value: 30.0 },
            Entry { key: "R1".to_string(), value: 12.5 },
        ])
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0.0), "0");
        assert_eq!(format_inr(999.0), "999");
        assert_eq!(format_inr(1000.0), "1,000");
        assert_eq!(format_inr(123456.0), "1,23,456");
        assert_eq!(format_inr(123456789.0), "12,34,56,789");
        assert_eq!(format_inr(1234567.89), "12,34,567");
        assert_eq!(format_inr(-1234.0), "-1,234");
    }

    #[test]
    fn test_series_table() {
        let table = Table::from_series("Route", "Passengers", &routes());
        assert_eq!(table.headers, vec!["Route", "Passengers"]);
        assert_eq!(table.rows[0], vec!["R2", "30"]);
        assert_eq!(table.rows[1], vec!["R1", "12.5"]);
    }

    #[test]
    fn test_option_keys_render_unknown() {
        let series = Series::new(vec![
            Entry { key: Some(DayType::Weekday), value: 5.0 },
            Entry { key: None, value: 1.0 },
        ]);
        let table = Table::from_series("Day Type", "Passengers", &series);
        assert_eq!(table.rows[0][0], "Weekday");
        assert_eq!(table.rows[1][0], "Unknown");
    }

    #[test]
    fn test_cross_tab_table() {
        let tab = CrossTab {
            rows: vec!["R1".to_string()],
            columns: vec![Some(DayType::Weekday), Some(DayType::Weekend)],
            cells: vec![vec![4.0, 0.0]],
        };
        let table = Table::from_cross_tab("Route", &tab);
        assert_eq!(table.headers, vec!["Route", "Weekday", "Weekend"]);
        assert_eq!(table.rows, vec![vec!["R1", "4", "0"]]);
    }

    #[test]
    fn test_weekday_pattern_table_leaves_missing_blank() {
        let pattern = [
            WeekdayMean { weekday: Weekday::Monday, avg_passengers: Some(10.0 / 3.0) },
            WeekdayMean { weekday: Weekday::Tuesday, avg_passengers: None },
        ];
        let table = Table::from_weekday_pattern(&pattern);
        assert_eq!(table.rows[0], vec!["Monday", "3.33"]);
        assert_eq!(table.rows[1], vec!["Tuesday", ""]);
    }

    #[test]
    fn test_render_aligns_columns() {
        let rendered = Table::from_series("Route", "Passengers", &routes()).render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Route  Passengers");
        assert_eq!(lines[1], "-----  ----------");
        assert_eq!(lines[2], "R2     30");
    }

    #[test]
    fn test_write_table_csv() {
        let path = temp_path("ridership_insights_test_view.csv");
        let _ = fs::remove_file(&path);

        let table = Table::from_series("Route", "Passengers", &routes());
        write_table_csv(&path, &table).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Route,Passengers\nR2,30\nR1,12.5\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&routes()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["key"], "R2");
        assert_eq!(value[1]["value"], 12.5);
    }
}
