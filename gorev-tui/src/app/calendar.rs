//! Calendar-month grid and `YYYY-MM-DD` date helpers.

use time::{Date, Duration, Month, OffsetDateTime, UtcOffset};

/// 6 full weeks, enough to cover any month from the Monday before its
/// 1st.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: Date,
    pub in_month: bool,
}

impl CalendarCell {
    pub fn iso(&self) -> String {
        format_iso_date(self.date)
    }

    /// Stable cell key. The in/out-of-month marker keeps keys unique
    /// when the same date could appear in adjacent months' grids.
    pub fn key(&self) -> String {
        format!("{}{}", self.iso(), if self.in_month { 'm' } else { 'o' })
    }
}

/// The 42-cell grid for the month containing `first_of_month`, starting
/// on the Monday on/before the 1st. Pure function of its input.
pub fn month_grid(first_of_month: Date) -> Vec<CalendarCell> {
    let offset = first_of_month.weekday().number_days_from_monday() as i64;
    let start = first_of_month - Duration::days(offset);

    (0..GRID_CELLS as i64)
        .map(|i| {
            let date = start + Duration::days(i);
            CalendarCell {
                date,
                in_month: date.month() == first_of_month.month()
                    && date.year() == first_of_month.year(),
            }
        })
        .collect()
}

pub fn first_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

pub fn prev_month(first: Date) -> Date {
    let (year, month) = match first.month() {
        Month::January => (first.year() - 1, Month::December),
        other => (first.year(), other.previous()),
    };
    Date::from_calendar_date(year, month, 1).unwrap_or(first)
}

pub fn next_month(first: Date) -> Date {
    let (year, month) = match first.month() {
        Month::December => (first.year() + 1, Month::January),
        other => (first.year(), other.next()),
    };
    Date::from_calendar_date(year, month, 1).unwrap_or(first)
}

/// e.g. "March 2024"
pub fn month_label(first: Date) -> String {
    format!("{} {}", first.month(), first.year())
}

pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

pub fn parse_iso_date(s: &str) -> Option<Date> {
    let mut parts = s.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// Today in the machine's local timezone, falling back to UTC when the
/// local offset cannot be determined.
pub fn local_today() -> Date {
    OffsetDateTime::now_utc()
        .to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
        .date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use time::Weekday;

    fn date(year: i32, month: u8, day: u8) -> Date {
        parse_iso_date(&format!("{year:04}-{month:02}-{day:02}")).unwrap()
    }

    #[test]
    fn grid_has_42_cells_starting_on_monday() {
        // March 2024 starts on a Friday; the grid must back up to
        // Monday 2024-02-26.
        let grid = month_grid(date(2024, 3, 1));
        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0].date, date(2024, 2, 26));
        assert_eq!(grid[0].date.weekday(), Weekday::Monday);
        assert!(!grid[0].in_month);
        assert_eq!(grid[4].date, date(2024, 3, 1));
        assert!(grid[4].in_month);
    }

    #[test]
    fn grid_month_starting_on_monday_has_no_leading_cells() {
        // April 2024 starts on a Monday.
        let grid = month_grid(date(2024, 4, 1));
        assert_eq!(grid[0].date, date(2024, 4, 1));
        assert!(grid[0].in_month);
    }

    #[test]
    fn cell_keys_are_unique_across_month_boundaries() {
        let grid = month_grid(date(2024, 3, 1));
        let keys: HashSet<String> = grid.iter().map(CalendarCell::key).collect();
        assert_eq!(keys.len(), GRID_CELLS);
        assert_eq!(grid[0].key(), "2024-02-26o");
        assert_eq!(grid[4].key(), "2024-03-01m");
    }

    #[test]
    fn month_navigation_wraps_at_year_edges() {
        assert_eq!(prev_month(date(2024, 1, 1)), date(2023, 12, 1));
        assert_eq!(next_month(date(2023, 12, 1)), date(2024, 1, 1));
        assert_eq!(next_month(date(2024, 3, 1)), date(2024, 4, 1));
    }

    #[test]
    fn iso_round_trip() {
        assert_eq!(format_iso_date(date(2024, 3, 5)), "2024-03-05");
        assert_eq!(parse_iso_date("2024-03-05"), Some(date(2024, 3, 5)));
        assert_eq!(parse_iso_date("2024-02-30"), None);
        assert_eq!(parse_iso_date("not-a-date"), None);
    }

    #[test]
    fn month_label_is_name_and_year() {
        assert_eq!(month_label(date(2024, 3, 1)), "March 2024");
    }
}
