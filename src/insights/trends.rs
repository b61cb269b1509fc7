//! Seasonality, year-over-year and day-of-week summary.

use crate::analyzers::types::{Series, WeekdayMean, YearMonth};
use crate::analyzers::utility::pct;
use crate::insights::{NO_TRENDS_DATA, article, year_over_year};
use crate::records::Month;

/// Summarizes monthly and yearly trends.
///
/// The busiest month is taken across every year in `monthly_passengers`
/// combined. `monthly_fare` and `weekday` are optional inputs; their lines
/// are left out when absent or empty.
pub fn generate_trends_insight(
    monthly_passengers: &Series<YearMonth>,
    monthly_fare: Option<&Series<YearMonth>>,
    yearly_passengers: &Series<Option<i32>>,
    weekday: Option<&[WeekdayMean]>,
) -> String {
    if monthly_passengers.is_empty() || yearly_passengers.is_empty() {
        return NO_TRENDS_DATA.to_string();
    }

    let mut lines = Vec::new();

    if let Some((month, value)) = busiest_month(monthly_passengers) {
        let share = pct(value, monthly_passengers.total());
        lines.push(format!(
            "- {month} is the busiest month (~{share:.1}%) for passengers."
        ));
    }

    if let Some(fare) = monthly_fare.filter(|f| !f.is_empty()) {
        if let Some((month, value)) = busiest_month(fare) {
            let share = pct(value, fare.total());
            lines.push(format!(
                "- {month} contributes the most to fare (~{share:.1}%)."
            ));
        }
    }

    if let Some(yoy) = year_over_year(yearly_passengers) {
        lines.push(format!(
            "- There's {} {} of ~{:.1}% in ridership compared to the previous year.",
            article(yoy.trend()),
            yoy.trend(),
            yoy.change_pct.abs()
        ));
    }

    if let Some(day) = weekday.and_then(top_weekday) {
        lines.push(format!("- {day} shows the highest average daily ridership."));
    }

    lines.join("\n")
}

/// Month with the largest total across all years; the earliest calendar
/// month wins a tie.
fn busiest_month(trend: &Series<YearMonth>) -> Option<(Month, f64)> {
    let mut totals: [Option<f64>; 12] = [None; 12];
    for entry in trend {
        if let Some(month) = entry.key.month {
            *totals[month as usize].get_or_insert(0.0) += entry.value;
        }
    }

    Month::ALL
        .iter()
        .zip(totals)
        .filter_map(|(m, total)| total.map(|t| (*m, t)))
        .fold(None, |best, (m, t)| match best {
            Some((_, bt)) if bt >= t => best,
            _ => Some((m, t)),
        })
}

fn top_weekday(pattern: &[WeekdayMean]) -> Option<crate::records::Weekday> {
    pattern
        .iter()
        .filter_map(|d| d.avg_passengers.map(|avg| (d.weekday, avg)))
        .fold(None, |best: Option<(_, f64)>, (day, avg)| match best {
            Some((_, b)) if b >= avg => best,
            _ => Some((day, avg)),
        })
        .map(|(day, _)| day)
}
