//! Calendar range calculation
//!
//! Turns a reference date and a granularity into the concrete window shown on
//! the timeline, and moves the reference by one granularity unit.

use chrono::{Datelike, Months, NaiveDate};
use roadmap_core::{days_between, Direction, Granularity, TimelineWindow};

const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Window containing `reference` for the given granularity.
///
/// * `Month`: first to last day of the reference month
/// * `Quarter`: first to last day of the 3-month block (Jan, Apr, Jul, Oct)
/// * `Year`: January 1st to December 31st
pub fn get_range(reference: NaiveDate, granularity: Granularity) -> TimelineWindow {
    let start = window_start(reference, granularity);
    let end = start
        .checked_add_months(Months::new(granularity.months()))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    TimelineWindow {
        start_date: start,
        end_date: end,
        total_days: days_between(start, end) + 1,
        label: range_label(start, granularity),
    }
}

/// Shift `reference` by one granularity unit.
///
/// The day of month is clamped to the target month's length, so a forward
/// step followed by a backward step always lands in the original window.
/// Steps past the representable calendar leave the reference unchanged.
pub fn navigate(reference: NaiveDate, granularity: Granularity, direction: Direction) -> NaiveDate {
    let step = Months::new(granularity.months());
    let shifted = match direction {
        Direction::Next => reference.checked_add_months(step),
        Direction::Previous => reference.checked_sub_months(step),
    };
    shifted.unwrap_or(reference)
}

/// Display label for a window starting at `start`
pub fn range_label(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Month => format!("{} {}", MONTH_NAMES[start.month0() as usize], start.year()),
        Granularity::Quarter => format!("T{} {}", start.month0() / 3 + 1, start.year()),
        Granularity::Year => start.year().to_string(),
    }
}

fn window_start(reference: NaiveDate, granularity: Granularity) -> NaiveDate {
    let month = match granularity {
        Granularity::Month => reference.month(),
        Granularity::Quarter => reference.month0() / 3 * 3 + 1,
        Granularity::Year => 1,
    };
    NaiveDate::from_ymd_opt(reference.year(), month, 1).unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_range() {
        let window = get_range(date(2025, 1, 17), Granularity::Month);
        assert_eq!(window.start_date, date(2025, 1, 1));
        assert_eq!(window.end_date, date(2025, 1, 31));
        assert_eq!(window.total_days, 31);
        assert_eq!(window.label, "Janvier 2025");
    }

    #[test]
    fn february_leap_year() {
        let window = get_range(date(2024, 2, 10), Granularity::Month);
        assert_eq!(window.end_date, date(2024, 2, 29));
        assert_eq!(window.total_days, 29);
        assert_eq!(window.label, "Février 2024");
    }

    #[test]
    fn quarter_range() {
        let window = get_range(date(2025, 8, 15), Granularity::Quarter);
        assert_eq!(window.start_date, date(2025, 7, 1));
        assert_eq!(window.end_date, date(2025, 9, 30));
        assert_eq!(window.total_days, 92);
        assert_eq!(window.label, "T3 2025");
    }

    #[test]
    fn year_range() {
        let window = get_range(date(2024, 6, 1), Granularity::Year);
        assert_eq!(window.start_date, date(2024, 1, 1));
        assert_eq!(window.end_date, date(2024, 12, 31));
        assert_eq!(window.total_days, 366);
        assert_eq!(window.label, "2024");
    }

    #[test]
    fn navigate_clamps_day_of_month() {
        assert_eq!(
            navigate(date(2025, 1, 31), Granularity::Month, Direction::Next),
            date(2025, 2, 28)
        );
        assert_eq!(
            navigate(date(2024, 2, 29), Granularity::Year, Direction::Next),
            date(2025, 2, 28)
        );
        assert_eq!(
            navigate(date(2025, 5, 31), Granularity::Quarter, Direction::Previous),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn navigate_at_calendar_edge_is_noop() {
        assert_eq!(
            navigate(NaiveDate::MAX, Granularity::Year, Direction::Next),
            NaiveDate::MAX
        );
    }
}
