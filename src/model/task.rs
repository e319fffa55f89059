use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dates::{self, ymd_serde};

/// Workflow stage of a task. Serialized with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Completed")]
    Completed,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::ToDo,
            Category::InProgress,
            Category::Review,
            Category::Completed,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::ToDo => "To Do",
            Category::InProgress => "In Progress",
            Category::Review => "Review",
            Category::Completed => "Completed",
        }
    }

    /// Bar fill colour for this category.
    pub fn color(&self) -> Color32 {
        match self {
            Category::ToDo => Color32::from_rgb(0x00, 0xa3, 0xff),
            Category::InProgress => Color32::from_rgb(0xff, 0xb0, 0x20),
            Category::Review => Color32::from_rgb(0x7c, 0x4d, 0xff),
            Category::Completed => Color32::from_rgb(0x2e, 0xcc, 0x71),
        }
    }
}

/// An inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn normalized(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// Number of days covered, counting both ends.
    pub fn days(&self) -> i64 {
        dates::days_between(self.start, self.end) + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn intersects(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Same length, starting on `day`.
    pub fn moved_to(&self, day: NaiveDate) -> Self {
        let span = dates::days_between(self.start, self.end);
        Self {
            start: day,
            end: dates::add_days(day, span),
        }
    }
}

/// A single task shown as a bar on the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredTask")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(with = "ymd_serde")]
    pub start: NaiveDate,
    /// Inclusive.
    #[serde(with = "ymd_serde")]
    pub end: NaiveDate,
    pub category: Category,
}

/// Task as read from storage. Converting puts the bounds in order.
#[derive(Deserialize)]
struct StoredTask {
    id: String,
    title: String,
    #[serde(with = "ymd_serde")]
    start: NaiveDate,
    #[serde(with = "ymd_serde")]
    end: NaiveDate,
    category: Category,
}

impl From<StoredTask> for Task {
    fn from(stored: StoredTask) -> Self {
        if stored.start > stored.end {
            log::warn!("Task {} was stored with start after end; swapping", stored.id);
        }
        let range = DateRange::normalized(stored.start, stored.end);
        Self {
            id: stored.id,
            title: stored.title,
            start: range.start,
            end: range.end,
            category: stored.category,
        }
    }
}

impl Task {
    /// Create a task with a freshly generated id. Reversed bounds are swapped.
    pub fn new(
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        category: Category,
    ) -> Self {
        let range = DateRange::normalized(start, end);
        Self {
            id: new_task_id(),
            title: title.into(),
            start: range.start,
            end: range.end,
            category,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn set_range(&mut self, range: DateRange) {
        self.start = range.start;
        self.end = range.end;
    }

    /// Hover text for the bar.
    pub fn tooltip(&self) -> String {
        format!(
            "{} ({} → {})",
            self.title,
            dates::format(self.start),
            dates::format(self.end)
        )
    }
}

pub fn new_task_id() -> String {
    Uuid::new_v4().simple().to_string()
}
