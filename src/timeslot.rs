//! Time-slot labels: canonicalization and the fixed service-day schedule.

use std::cmp::Ordering;

/// The hourly boarding windows of a service day, earliest first.
///
/// A slot's rank is its 1-based position in this table.
pub const CANONICAL_SLOTS: [&str; 18] = [
    "5:00AM - 6:00AM",
    "6:00AM - 7:00AM",
    "7:00AM - 8:00AM",
    "8:00AM - 9:00AM",
    "9:00AM - 10:00AM",
    "10:00AM - 11:00AM",
    "11:00AM - 12:00PM",
    "12:00PM - 1:00PM",
    "1:00PM - 2:00PM",
    "2:00PM - 3:00PM",
    "3:00PM - 4:00PM",
    "4:00PM - 5:00PM",
    "5:00PM - 6:00PM",
    "6:00PM - 7:00PM",
    "7:00PM - 8:00PM",
    "8:00PM - 9:00PM",
    "9:00PM - 10:00PM",
    "10:00PM - 11:00PM",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Formats a raw `"<start>-<end>"` slot as `"H:00AM - H:00PM"`.
///
/// Only the hour of each side is read. Sides already carrying an AM/PM
/// suffix are read on a 12-hour clock, so canonical labels pass through
/// unchanged. Anything that does not parse is returned verbatim.
pub fn format_timeslot(ts: &str) -> String {
    canonicalize(ts).unwrap_or_else(|| ts.to_string())
}

fn canonicalize(ts: &str) -> Option<String> {
    let mut sides = ts.split('-');
    let start = sides.next()?;
    let end = sides.next()?;
    if sides.next().is_some() {
        return None;
    }

    let start = parse_hour(start)?;
    let end = parse_hour(end)?;
    Some(format!("{} - {}", clock_label(start), clock_label(end)))
}

/// Hour on a 24-hour clock.
fn parse_hour(side: &str) -> Option<u32> {
    let (body, meridiem) = split_meridiem(side.trim());
    let hour: u32 = body.split(':').next()?.trim().parse().ok()?;

    match meridiem {
        None => Some(hour),
        Some(_) if !(1..=12).contains(&hour) => None,
        Some(Meridiem::Am) => Some(hour % 12),
        Some(Meridiem::Pm) => Some(hour % 12 + 12),
    }
}

fn split_meridiem(side: &str) -> (&str, Option<Meridiem>) {
    let upper = side.to_ascii_uppercase();
    let cut = side.len().saturating_sub(2);
    if upper.ends_with("AM") {
        (&side[..cut], Some(Meridiem::Am))
    } else if upper.ends_with("PM") {
        (&side[..cut], Some(Meridiem::Pm))
    } else {
        (side, None)
    }
}

fn clock_label(hour: u32) -> String {
    let period = if hour < 12 { "AM" } else { "PM" };
    let display = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{display}:00{period}")
}

/// 1-based rank of `slot` in [`CANONICAL_SLOTS`].
pub fn slot_order(slot: &str) -> Option<usize> {
    CANONICAL_SLOTS
        .iter()
        .position(|s| *s == slot)
        .map(|i| i + 1)
}

/// Orders slots by schedule rank; slots outside the schedule sort after it,
/// alphabetically.
pub fn compare_slots(a: &str, b: &str) -> Ordering {
    match (slot_order(a), slot_order(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_morning_slot() {
        assert_eq!(format_timeslot("5:00-6:00"), "5:00AM - 6:00AM");
    }

    #[test]
    fn test_afternoon_slot() {
        assert_eq!(format_timeslot("13:00-14:00"), "1:00PM - 2:00PM");
    }

    #[test]
    fn test_noon_and_midnight() {
        assert_eq!(format_timeslot("11:00-12:00"), "11:00AM - 12:00PM");
        assert_eq!(format_timeslot("0:00-1:00"), "12:00AM - 1:00AM");
    }

    #[test]
    fn test_minutes_are_ignored() {
        assert_eq!(format_timeslot("7:30-8:45"), "7:00AM - 8:00AM");
        assert_eq!(format_timeslot(" 9 - 10 "), "9:00AM - 10:00AM");
    }

    #[test]
    fn test_unparseable_is_returned_verbatim() {
        assert_eq!(format_timeslot("not-a-slot"), "not-a-slot");
        assert_eq!(format_timeslot("morning"), "morning");
        assert_eq!(format_timeslot(""), "");
        assert_eq!(format_timeslot("a:00-6:00"), "a:00-6:00");
    }

    #[test]
    fn test_canonical_labels_are_stable() {
        for slot in CANONICAL_SLOTS {
            assert_eq!(format_timeslot(slot), slot);
        }
    }

    #[test]
    fn test_slot_order_table() {
        assert_eq!(slot_order("5:00AM - 6:00AM"), Some(1));
        assert_eq!(slot_order("12:00PM - 1:00PM"), Some(8));
        assert_eq!(slot_order("10:00PM - 11:00PM"), Some(18));
        assert_eq!(slot_order("11:00PM - 12:00AM"), None);
    }

    #[test]
    fn test_compare_slots_puts_unknown_last() {
        assert_eq!(
            compare_slots("10:00AM - 11:00AM", "9:00AM - 10:00AM"),
            Ordering::Greater
        );
        assert_eq!(compare_slots("morning", "5:00AM - 6:00AM"), Ordering::Greater);
        assert_eq!(compare_slots("a", "b"), Ordering::Less);
    }
}
