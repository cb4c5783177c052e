//! Shared utility functions for FormFlow crates.

/// Date utility functions
pub mod dates {
    use chrono::{Days, NaiveDate, NaiveDateTime};

    /// Canonical date format used in reports and exported CSVs: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Date-only layouts accepted on input, tried in order.
    const DATE_LAYOUTS: [&str; 3] = [DATE_FORMAT, "%Y/%m/%d", "%Y%m%d"];

    /// Date-time layouts accepted on input; the time of day is dropped.
    const DATE_TIME_LAYOUTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in any of the accepted layouts.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYYMMDD` and the date-time forms
    /// `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM:SS`. Surrounding whitespace
    /// is ignored.
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        for layout in DATE_LAYOUTS {
            if let Ok(date) = NaiveDate::parse_from_str(s, layout) {
                return Ok(date);
            }
        }
        for layout in DATE_TIME_LAYOUTS {
            if let Ok(stamp) = NaiveDateTime::parse_from_str(s, layout) {
                return Ok(stamp.date());
            }
        }
        anyhow::bail!("unrecognised date '{}'", s)
    }

    /// Shift a date forward by `days`, or `None` past the end of the calendar.
    pub fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
        date.checked_add_days(Days::new(u64::from(days)))
    }

    /// Whole days from `start` to `end` (negative when `end` is earlier).
    pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
        (end - start).num_days()
    }

}
