pub mod dialogs;
pub mod month_grid;
pub mod task_editor;
pub mod theme;
pub mod toolbar;
