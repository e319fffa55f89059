//! Splits task date ranges into per-week bar fragments.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::dates;
use super::grid::MonthGrid;
use super::task::{DateRange, Task};

/// Tentative dates shown while a resize is in progress, keyed by task id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewOverlay {
    ranges: HashMap<String, DateRange>,
}

impl PreviewOverlay {
    pub fn set(&mut self, task_id: &str, range: DateRange) {
        self.ranges.insert(task_id.to_string(), range);
    }

    pub fn get(&self, task_id: &str) -> Option<DateRange> {
        self.ranges.get(task_id).copied()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Dates to draw for `task`: the preview if one exists, else the stored range.
    pub fn effective_range(&self, task: &Task) -> DateRange {
        self.get(&task.id).unwrap_or_else(|| task.range())
    }
}

/// One week-row segment of a task bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub task: &'a Task,
    /// Task dates used for this pass (preview applied).
    pub range: DateRange,
    pub week_index: usize,
    pub week_start: NaiveDate,
    /// Column of the first covered day, 0..=6.
    pub left: u8,
    /// Days covered in this week, 1..=7.
    pub width: u8,
}

impl Fragment<'_> {
    /// The days of this week the fragment covers.
    pub fn covered(&self) -> DateRange {
        let start = dates::add_days(self.week_start, self.left as i64);
        DateRange {
            start,
            end: dates::add_days(start, self.width as i64 - 1),
        }
    }

    /// True when the task continues into the previous week row.
    pub fn continues_left(&self) -> bool {
        self.range.start < self.week_start
    }

    /// True when the task continues into the next week row.
    pub fn continues_right(&self) -> bool {
        self.range.end > dates::add_days(self.week_start, 6)
    }
}

/// Compute the bar fragments for `tasks` on `grid`, with `preview` overriding
/// stored dates. Output is in task order, then week order.
pub fn segment<'a>(tasks: &'a [Task], grid: &MonthGrid, preview: &PreviewOverlay) -> Vec<Fragment<'a>> {
    let span = grid.span();
    let mut out = Vec::new();

    for task in tasks {
        let range = preview.effective_range(task);
        if !range.intersects(&span) {
            continue;
        }

        for (week_index, week) in grid.weeks().iter().enumerate() {
            let week_start = week[0];
            let week_end = week[6];
            let frag_start = range.start.max(week_start);
            let frag_end = range.end.min(week_end);
            if frag_start > frag_end {
                continue;
            }

            let left = dates::days_between(week_start, frag_start);
            let width = dates::days_between(frag_start, frag_end) + 1;
            out.push(Fragment {
                task,
                range,
                week_index,
                week_start,
                left: left as u8,
                width: width as u8,
            });
        }
    }

    out
}
