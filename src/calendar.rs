use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Single-character column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

fn first_of(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

/// Number of days in the given month, leap years included.
/// Computed from calendar arithmetic (day before the 1st of the next month).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month >= 12 {
        first_of(year + 1, 1)
    } else {
        first_of(year, month + 1)
    };
    next.signed_duration_since(first_of(year, month)).num_days() as u32
}

/// Weekday index of the 1st of the month, Sunday = 0.
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    first_of(year, month).weekday().num_days_from_sunday()
}

/// Canonical `YYYY-MM-DD` key. Lexicographic order equals chronological order.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Everything the layout needs to know about one displayed month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub first_weekday_offset: u32,
    pub weeks_needed: u32,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Self {
        let days_in_month = days_in_month(year, month);
        let first_weekday_offset = first_weekday_offset(year, month);
        Self {
            year,
            month,
            days_in_month,
            first_weekday_offset,
            weeks_needed: (first_weekday_offset + days_in_month).div_ceil(7),
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// Date key for a day number within this month.
    pub fn day_key(&self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_days_in_month_in_range_for_all_months() {
        for year in [1999, 2020, 2024, 2025] {
            for month in 1..=12 {
                let days = days_in_month(year, month);
                assert!((28..=31).contains(&days), "{year}-{month}: {days}");
            }
        }
    }

    #[test]
    fn test_first_weekday_offset_in_range() {
        for year in [2000, 2023, 2024] {
            for month in 1..=12 {
                assert!(first_weekday_offset(year, month) <= 6);
            }
        }
    }

    #[test]
    fn test_first_weekday_offset_known_dates() {
        // March 1 2024 was a Friday
        assert_eq!(first_weekday_offset(2024, 3), 5);
        // September 1 2024 was a Sunday
        assert_eq!(first_weekday_offset(2024, 9), 0);
        // June 1 2024 was a Saturday
        assert_eq!(first_weekday_offset(2024, 6), 6);
    }

    #[test]
    fn test_date_key_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_key(d), "2024-03-05");
    }

    #[test]
    fn test_date_key_chronologically_monotonic() {
        let mut prev: Option<(NaiveDate, String)> = None;
        let mut date = NaiveDate::from_ymd_opt(2023, 11, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        while date <= end {
            let key = date_key(date);
            if let Some((pd, pk)) = prev {
                assert!(pd < date);
                assert!(pk < key, "{pk} not < {key}");
            }
            prev = Some((date, key));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_month_view_weeks_needed() {
        // March 2024: offset 5, 31 days -> ceil(36/7) = 6
        let march = MonthView::new(2024, 3);
        assert_eq!(march.first_weekday_offset, 5);
        assert_eq!(march.days_in_month, 31);
        assert_eq!(march.weeks_needed, 6);

        // February 2015: offset 0, 28 days -> exactly 4 weeks
        let feb = MonthView::new(2015, 2);
        assert_eq!(feb.first_weekday_offset, 0);
        assert_eq!(feb.weeks_needed, 4);

        // September 2024: offset 0, 30 days -> 5 weeks
        assert_eq!(MonthView::new(2024, 9).weeks_needed, 5);
    }

    #[test]
    fn test_month_view_day_key_matches_date_key() {
        let view = MonthView::new(2024, 3);
        let d = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(view.day_key(7), date_key(d));
    }

    #[test]
    fn test_month_view_contains() {
        let view = MonthView::new(2024, 3);
        assert!(view.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!view.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!view.contains(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()));
    }
}
