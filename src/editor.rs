//! Create/edit form state behind the task modal.

use chrono::NaiveDate;

use crate::error::{PlannerError, Result};
use crate::model::{Category, DateRange, Task, TaskList};

/// Whether the modal creates a task or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(String),
}

/// Dates a task had before a resize that opened this editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOrigin {
    pub task_id: String,
    pub original: DateRange,
}

/// Editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(String),
    Updated(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Discarded,
    /// The resize that opened the editor was rolled back.
    ResizeReverted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub form: EditorForm,
    mode: EditorMode,
    resize_origin: Option<ResizeOrigin>,
}

impl EditorState {
    /// Blank form for a single day.
    pub fn open_for_create(date: NaiveDate) -> Self {
        Self::open_for_range(DateRange::single(date))
    }

    /// Blank form for a selected range.
    pub fn open_for_range(range: DateRange) -> Self {
        Self {
            form: EditorForm {
                title: String::new(),
                start: range.start,
                end: range.end,
                category: Category::ToDo,
            },
            mode: EditorMode::Create,
            resize_origin: None,
        }
    }

    pub fn open_for_edit(task: &Task) -> Self {
        Self {
            form: EditorForm {
                title: task.title.clone(),
                start: task.start,
                end: task.end,
                category: task.category,
            },
            mode: EditorMode::Edit(task.id.clone()),
            resize_origin: None,
        }
    }

    /// Edit form for a task whose resize was just committed. Cancelling
    /// puts `original` back.
    pub fn open_after_resize(task: &Task, original: DateRange) -> Self {
        let mut state = Self::open_for_edit(task);
        state.resize_origin = Some(ResizeOrigin {
            task_id: task.id.clone(),
            original,
        });
        state
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn resize_origin(&self) -> Option<&ResizeOrigin> {
        self.resize_origin.as_ref()
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::Edit(id) => Some(id),
            EditorMode::Create => None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Create Task",
            EditorMode::Edit(_) => "Edit Task",
        }
    }

    /// Read-only range label, e.g. `01-Jun-2024 - 03-Jun-2024`.
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.form.start.format("%d-%b-%Y"),
            self.form.end.format("%d-%b-%Y")
        )
    }

    /// Keep `end >= start` after the start picker moved.
    pub fn start_changed(&mut self) {
        if self.form.end < self.form.start {
            self.form.end = self.form.start;
        }
    }

    /// Keep `start <= end` after the end picker moved.
    pub fn end_changed(&mut self) {
        if self.form.start > self.form.end {
            self.form.start = self.form.end;
        }
    }

    /// Write the form into `tasks`. An empty title is rejected and nothing
    /// is stored.
    pub fn save(&self, tasks: &mut TaskList) -> Result<SaveOutcome> {
        let title = self.form.title.trim();
        if title.is_empty() {
            log::debug!("save rejected: empty title");
            return Err(PlannerError::Validation("Enter title".to_string()));
        }
        let range = DateRange::normalized(self.form.start, self.form.end);

        match &self.mode {
            EditorMode::Edit(id) => {
                tasks.update(Task {
                    id: id.clone(),
                    title: title.to_string(),
                    start: range.start,
                    end: range.end,
                    category: self.form.category,
                })?;
                log::info!("updated task {id}");
                Ok(SaveOutcome::Updated(id.clone()))
            }
            EditorMode::Create => {
                let task = Task::new(title, range.start, range.end, self.form.category);
                let id = task.id.clone();
                tasks.add(task);
                log::info!("created task {id}");
                Ok(SaveOutcome::Created(id))
            }
        }
    }

    /// Drop the form. Only an edit opened by a resize commit rolls the
    /// resize back; a cancelled create has nothing to restore.
    pub fn cancel(&self, tasks: &mut TaskList) -> CancelOutcome {
        if let (EditorMode::Edit(id), Some(origin)) = (&self.mode, &self.resize_origin) {
            if *id == origin.task_id {
                match tasks.set_range(id, origin.original) {
                    Ok(_) => {
                        log::info!("reverted resize of task {id}");
                        return CancelOutcome::ResizeReverted(id.clone());
                    }
                    Err(e) => log::warn!("could not revert resize: {e}"),
                }
            }
        }
        CancelOutcome::Discarded
    }

    /// Remove the task being edited.
    pub fn delete(&self, tasks: &mut TaskList) -> Result<Task> {
        match &self.mode {
            EditorMode::Edit(id) => {
                let removed = tasks.delete(id)?;
                log::info!("deleted task {id}");
                Ok(removed)
            }
            EditorMode::Create => Err(PlannerError::Validation(
                "Only saved tasks can be deleted".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn report() -> Task {
        Task::new("Report", d(2024, 6, 10), d(2024, 6, 12), Category::Review)
    }

    #[test]
    fn create_form_starts_blank_on_the_day() {
        let editor = EditorState::open_for_create(d(2024, 6, 5));
        assert_eq!(editor.form.title, "");
        assert_eq!((editor.form.start, editor.form.end), (d(2024, 6, 5), d(2024, 6, 5)));
        assert_eq!(editor.form.category, Category::ToDo);
        assert_eq!(editor.heading(), "Create Task");
        assert_eq!(editor.range_label(), "05-Jun-2024 - 05-Jun-2024");
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut tasks = TaskList::default();
        let mut editor = EditorState::open_for_create(d(2024, 6, 5));
        editor.form.title = "   ".into();
        assert!(matches!(editor.save(&mut tasks), Err(PlannerError::Validation(_))));
        assert!(tasks.is_empty());
    }

    #[test]
    fn create_appends_with_fresh_id() {
        let mut tasks = TaskList::new(vec![report()]);
        let mut editor = EditorState::open_for_range(DateRange { start: d(2024, 6, 3), end: d(2024, 6, 4) });
        editor.form.title = " Memo ".into();
        editor.form.category = Category::InProgress;

        let SaveOutcome::Created(id) = editor.save(&mut tasks).unwrap() else {
            panic!("expected a new task");
        };
        assert_eq!(tasks.len(), 2);
        let created = tasks.get(&id).unwrap();
        assert_eq!(created.title, "Memo");
        assert_eq!(created.category, Category::InProgress);
        assert_eq!(created.range(), DateRange { start: d(2024, 6, 3), end: d(2024, 6, 4) });
        assert_ne!(created.id, tasks.tasks()[0].id);
    }

    #[test]
    fn edit_updates_in_place() {
        let task = report();
        let id = task.id.clone();
        let mut tasks = TaskList::new(vec![task.clone()]);
        let mut editor = EditorState::open_for_edit(&task);
        editor.form.title = "Final report".into();
        editor.form.category = Category::Completed;

        assert_eq!(editor.save(&mut tasks).unwrap(), SaveOutcome::Updated(id.clone()));
        assert_eq!(tasks.len(), 1);
        let stored = tasks.get(&id).unwrap();
        assert_eq!(stored.title, "Final report");
        assert_eq!(stored.category, Category::Completed);
    }

    #[test]
    fn date_pickers_keep_order() {
        let mut editor = EditorState::open_for_create(d(2024, 6, 5));
        editor.form.start = d(2024, 6, 9);
        editor.start_changed();
        assert_eq!(editor.form.end, d(2024, 6, 9));
        editor.form.end = d(2024, 6, 1);
        editor.end_changed();
        assert_eq!(editor.form.start, d(2024, 6, 1));
    }

    #[test]
    fn cancel_after_resize_restores_original() {
        let task = report();
        let id = task.id.clone();
        let original = task.range();
        let mut tasks = TaskList::new(vec![task]);

        tasks
            .set_range(&id, DateRange { start: d(2024, 6, 10), end: d(2024, 6, 20) })
            .unwrap();
        let resized = tasks.get(&id).unwrap().clone();
        let editor = EditorState::open_after_resize(&resized, original);

        assert_eq!(editor.cancel(&mut tasks), CancelOutcome::ResizeReverted(id.clone()));
        assert_eq!(tasks.get(&id).unwrap().range(), original);
    }

    #[test]
    fn cancel_of_plain_edit_or_create_restores_nothing() {
        let task = report();
        let id = task.id.clone();
        let mut tasks = TaskList::new(vec![task.clone()]);

        let mut edit = EditorState::open_for_edit(&task);
        edit.form.title = "changed".into();
        assert_eq!(edit.cancel(&mut tasks), CancelOutcome::Discarded);
        assert_eq!(tasks.get(&id).unwrap(), &task);

        let create = EditorState::open_for_create(d(2024, 6, 1));
        assert_eq!(create.cancel(&mut tasks), CancelOutcome::Discarded);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn save_after_resize_keeps_resized_dates() {
        let task = report();
        let id = task.id.clone();
        let original = task.range();
        let mut tasks = TaskList::new(vec![task]);
        tasks.set_range(&id, DateRange::single(d(2024, 6, 12))).unwrap();

        let resized = tasks.get(&id).unwrap().clone();
        let editor = EditorState::open_after_resize(&resized, original);
        editor.save(&mut tasks).unwrap();
        assert_eq!(tasks.get(&id).unwrap().range(), DateRange::single(d(2024, 6, 12)));
    }

    #[test]
    fn delete_only_for_existing_tasks() {
        let task = report();
        let mut tasks = TaskList::new(vec![task.clone()]);
        assert!(EditorState::open_for_create(d(2024, 6, 1)).delete(&mut tasks).is_err());
        let removed = EditorState::open_for_edit(&task).delete(&mut tasks).unwrap();
        assert_eq!(removed.id, task.id);
        assert!(tasks.is_empty());
    }
}
