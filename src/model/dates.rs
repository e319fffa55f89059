//! Date helpers on the fixed `YYYY-MM-DD` form used everywhere tasks are
//! stored or tagged.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{PlannerError, Result};

/// The one date format used for storage and day-cell tags.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string.
pub fn parse(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| PlannerError::InvalidDate(s.to_string()))
}

/// Format a date as `YYYY-MM-DD`.
pub fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Serde helper that pins task dates to `YYYY-MM-DD`.
pub mod ymd_serde {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_and_format_round_trip() {
        let date = d(2024, 2, 29);
        assert_eq!(format(date), "2024-02-29");
        assert_eq!(parse(&format(date)).unwrap(), date);
    }

    #[test]
    fn parse_rejects_other_layouts() {
        assert!(matches!(parse("29/02/2024"), Err(PlannerError::InvalidDate(_))));
        assert!(parse("2024-13-01").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn arithmetic_helpers() {
        assert_eq!(add_days(d(2024, 6, 30), 1), d(2024, 7, 1));
        assert_eq!(add_days(d(2024, 3, 1), -1), d(2024, 2, 29));
        assert_eq!(days_between(d(2024, 6, 1), d(2024, 6, 3)), 2);
        assert_eq!(days_between(d(2024, 6, 3), d(2024, 6, 1)), -2);
        assert!(same_month(d(2024, 6, 1), d(2024, 6, 30)));
        assert!(!same_month(d(2024, 6, 1), d(2023, 6, 1)));
    }

    #[test]
    fn month_bounds() {
        assert_eq!(month_start(d(2024, 2, 17)), d(2024, 2, 1));
        assert_eq!(month_end(d(2024, 2, 17)), d(2024, 2, 29));
        assert_eq!(month_end(d(2023, 12, 5)), d(2023, 12, 31));
    }
}
