//! Date and time display utilities.
//!
//! Audit timestamps are shown in the system time zone; calendar dates are
//! zone-free and shown as written on a wall calendar.

use std::fmt;

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// A wrapper around `Timestamp` that formats it in the system time zone.
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A calendar date with its weekday, e.g. `Fri 2026-04-03`.
pub struct CalendarDate<'a>(pub &'a Date);

impl fmt::Display for CalendarDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %Y-%m-%d"))
    }
}

/// A due date and optional end date, e.g. `2026-04-10` or
/// `2026-04-10 to 2026-04-17`.
pub struct DateSpan<'a>(pub &'a Date, pub Option<&'a Date>);

impl fmt::Display for DateSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(end) if end != self.0 => write!(f, "{} to {end}", self.0),
            _ => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_calendar_date_includes_weekday() {
        assert_eq!(
            CalendarDate(&date(2026, 4, 3)).to_string(),
            "Fri 2026-04-03"
        );
    }

    #[test]
    fn test_date_span() {
        let due = date(2026, 4, 10);
        let end = date(2026, 4, 17);
        assert_eq!(DateSpan(&due, None).to_string(), "2026-04-10");
        assert_eq!(DateSpan(&due, Some(&due)).to_string(), "2026-04-10");
        assert_eq!(
            DateSpan(&due, Some(&end)).to_string(),
            "2026-04-10 to 2026-04-17"
        );
    }
}
