use chrono::{Datelike, NaiveDate, Weekday};

use super::dates;
use super::task::DateRange;

/// One calendar row: seven consecutive days.
pub type Week = [NaiveDate; 7];

/// The weeks that fully cover one month, padded with leading and trailing
/// days from the neighbouring months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month_start: NaiveDate,
    first_weekday: Weekday,
    weeks: Vec<Week>,
}

impl MonthGrid {
    /// Build the grid for the month containing `date`.
    pub fn for_month(date: NaiveDate, first_weekday: Weekday) -> Self {
        let month_start = dates::month_start(date);
        let month_end = dates::month_end(date);

        let lead = (month_start.weekday().num_days_from_monday() + 7
            - first_weekday.num_days_from_monday())
            % 7;
        let mut cursor = dates::add_days(month_start, -(lead as i64));

        let mut weeks = Vec::with_capacity(6);
        while cursor <= month_end {
            let mut week = [cursor; 7];
            for (offset, day) in week.iter_mut().enumerate() {
                *day = dates::add_days(cursor, offset as i64);
            }
            weeks.push(week);
            cursor = dates::add_days(cursor, 7);
        }

        Self {
            month_start,
            first_weekday,
            weeks,
        }
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub fn month_start(&self) -> NaiveDate {
        self.month_start
    }

    pub fn month_end(&self) -> NaiveDate {
        dates::month_end(self.month_start)
    }

    /// First to last day shown on the grid.
    pub fn span(&self) -> DateRange {
        // The loop in `for_month` always emits at least one week.
        let first = self.weeks.first().map(|w| w[0]).unwrap_or(self.month_start);
        let last = self.weeks.last().map(|w| w[6]).unwrap_or(self.month_start);
        DateRange {
            start: first,
            end: last,
        }
    }

    pub fn is_in_month(&self, date: NaiveDate) -> bool {
        dates::same_month(date, self.month_start)
    }

    /// The n-th seven-day block counted from the 1st of the month (1-based),
    /// independent of where grid rows start.
    pub fn week_of_month_range(&self, n: u8) -> Option<DateRange> {
        if n == 0 {
            return None;
        }
        let start = dates::add_days(self.month_start, (n as i64 - 1) * 7);
        if start > self.month_end() {
            return None;
        }
        Some(DateRange {
            start,
            end: dates::add_days(start, 6),
        })
    }

    /// Number of seven-day blocks from the 1st needed to reach month end.
    pub fn weeks_of_month(&self) -> u8 {
        ((self.month_end().day() + 6) / 7) as u8
    }

    /// Short weekday names in column order.
    pub fn weekday_labels(&self) -> [&'static str; 7] {
        let mut labels = [""; 7];
        let mut day = self.first_weekday;
        for label in labels.iter_mut() {
            *label = weekday_short(day);
            day = day.succ();
        }
        labels
    }

    /// The grid for the previous month.
    pub fn prev(&self) -> Self {
        Self::for_month(dates::add_days(self.month_start, -1), self.first_weekday)
    }

    /// The grid for the following month.
    pub fn next(&self) -> Self {
        Self::for_month(dates::add_days(self.month_end(), 1), self.first_weekday)
    }
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
