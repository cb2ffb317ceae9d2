//! Time utilities
//!
//! Activity days are UTC calendar days.

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC calendar day
pub fn today_utc() -> NaiveDate {
    now_utc().date_naive()
}

/// Format milliseconds as a human-readable string
pub fn format_milliseconds(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let seconds = ms / 1000;
        format!("{}m {}s", seconds / 60, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_milliseconds() {
        assert_eq!(format_milliseconds(500), "500ms");
        assert_eq!(format_milliseconds(1500), "1.50s");
        assert_eq!(format_milliseconds(65000), "1m 5s");
    }

    #[test]
    fn test_today_matches_now() {
        assert_eq!(today_utc(), now_utc().date_naive());
    }
}
