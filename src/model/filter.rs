use std::collections::BTreeSet;

use super::fragment::Fragment;
use super::grid::MonthGrid;
use super::task::Category;

/// Search text, week-of-month and category filters applied to fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentFilter {
    pub search: String,
    /// 1-based seven-day block counted from the 1st of the month.
    pub week_of_month: Option<u8>,
    /// Empty means every category is shown.
    pub categories: BTreeSet<Category>,
}

impl FragmentFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.week_of_month.is_some() || !self.categories.is_empty()
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Keep the fragments that pass every filter, in their original order.
    pub fn apply<'a>(&self, fragments: Vec<Fragment<'a>>, grid: &MonthGrid) -> Vec<Fragment<'a>> {
        let needle = self.search.to_lowercase();
        let week = self.week_of_month.and_then(|n| grid.week_of_month_range(n));

        fragments
            .into_iter()
            .filter(|f| f.task.title.to_lowercase().contains(&needle))
            .filter(|f| match (self.week_of_month, week) {
                (None, _) => true,
                (Some(_), Some(range)) => f.range.intersects(&range),
                // A week past the end of this month matches nothing.
                (Some(_), None) => false,
            })
            .filter(|f| self.categories.is_empty() || self.has_category(f.task.category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fragment::{segment, PreviewOverlay};
    use crate::model::task::Task;
    use chrono::{NaiveDate, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn grid() -> MonthGrid {
        MonthGrid::for_month(d(2024, 6, 1), Weekday::Sun)
    }

    fn report() -> Vec<Task> {
        // Inside the second seven-day block of June (8th .. 14th).
        vec![Task::new("Report", d(2024, 6, 10), d(2024, 6, 11), Category::Review)]
    }

    fn visible(filter: &FragmentFilter, tasks: &[Task]) -> usize {
        let g = grid();
        let frags = segment(tasks, &g, &PreviewOverlay::default());
        filter.apply(frags, &g).len()
    }

    #[test]
    fn no_filters_keep_everything() {
        let tasks = report();
        assert!(!FragmentFilter::default().is_active());
        assert_eq!(visible(&FragmentFilter::default(), &tasks), 1);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = report();
        let mut f = FragmentFilter { search: "REP".into(), ..Default::default() };
        assert_eq!(visible(&f, &tasks), 1);
        f.search = "port".into();
        assert_eq!(visible(&f, &tasks), 1);
        f.search = "budget".into();
        assert_eq!(visible(&f, &tasks), 0);
    }

    #[test]
    fn category_filter() {
        let tasks = report();
        let mut f = FragmentFilter::default();
        f.toggle_category(Category::Review);
        assert_eq!(visible(&f, &tasks), 1);
        f.toggle_category(Category::Review);
        f.toggle_category(Category::ToDo);
        assert_eq!(visible(&f, &tasks), 0);
        f.toggle_category(Category::Review);
        assert_eq!(visible(&f, &tasks), 1);
    }

    #[test]
    fn week_filter() {
        let tasks = report();
        let mut f = FragmentFilter { week_of_month: Some(2), ..Default::default() };
        assert_eq!(visible(&f, &tasks), 1);
        f.week_of_month = Some(1);
        assert_eq!(visible(&f, &tasks), 0);
        f.week_of_month = Some(9);
        assert_eq!(visible(&f, &tasks), 0);
    }

    #[test]
    fn filters_compose_by_conjunction() {
        let tasks = report();
        let mut f = FragmentFilter {
            search: "report".into(),
            week_of_month: Some(2),
            ..Default::default()
        };
        f.toggle_category(Category::Review);
        assert_eq!(visible(&f, &tasks), 1);

        let mut wrong_text = f.clone();
        wrong_text.search = "memo".into();
        assert_eq!(visible(&wrong_text, &tasks), 0);

        let mut wrong_week = f.clone();
        wrong_week.week_of_month = Some(3);
        assert_eq!(visible(&wrong_week, &tasks), 0);

        let mut wrong_category = f;
        wrong_category.categories.clear();
        wrong_category.toggle_category(Category::Completed);
        assert_eq!(visible(&wrong_category, &tasks), 0);
    }

    #[test]
    fn all_fragments_of_a_matching_task_are_kept() {
        let tasks = vec![Task::new("Sprint", d(2024, 6, 5), d(2024, 6, 20), Category::ToDo)];
        let f = FragmentFilter { week_of_month: Some(2), ..Default::default() };
        assert_eq!(visible(&f, &tasks), 3);
    }
}
