use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::{FirstWeekday, PlannerSettings};
use crate::editor::{CancelOutcome, EditorState, SaveOutcome};
use crate::error::PlannerError;
use crate::interaction::{InteractionMachine, Outcome};
use crate::io::{FileStore, TaskRepository};
use crate::model::{self, FragmentFilter, MonthGrid, TaskList};
use crate::ui;
use crate::ui::month_grid::{GridEvent, GridInteraction};
use crate::ui::task_editor::EditorAction;

/// Main application state.
pub struct PlannerApp {
    pub tasks: TaskList,
    repository: TaskRepository<FileStore>,
    pub settings: PlannerSettings,
    settings_path: PathBuf,
    pub grid: MonthGrid,
    pub machine: InteractionMachine,
    pub filter: FragmentFilter,

    // Dialog state
    pub editor: Option<EditorState>,
    pub show_about: bool,

    // Status message
    pub status_message: String,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = PlannerSettings::default_path();
        let settings = PlannerSettings::load(&settings_path);

        let store = FileStore::in_data_dir().unwrap_or_else(|e| {
            log::warn!("{e}; storing tasks in the working directory");
            FileStore::new("month-planner-data")
        });
        log::info!("task storage: {}", store.dir().display());
        let repository = TaskRepository::with_key(store, settings.storage_key.clone());

        let today = Self::today();
        let tasks = repository.load(today);
        let grid = MonthGrid::for_month(today, settings.first_weekday.weekday());

        Self {
            tasks,
            repository,
            settings,
            settings_path,
            grid,
            machine: InteractionMachine::new(),
            filter: FragmentFilter::default(),
            editor: None,
            show_about: false,
            status_message: "Ready".to_string(),
        }
    }

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    // --- Navigation ---

    pub fn prev_month(&mut self) {
        self.machine.abort();
        self.grid = self.grid.prev();
    }

    pub fn next_month(&mut self) {
        self.machine.abort();
        self.grid = self.grid.next();
    }

    pub fn go_to_today(&mut self) {
        self.machine.abort();
        self.grid = MonthGrid::for_month(Self::today(), self.settings.first_weekday.weekday());
    }

    // --- Settings ---

    pub fn set_first_weekday(&mut self, first: FirstWeekday) {
        if self.settings.first_weekday == first {
            return;
        }
        self.machine.abort();
        self.settings.first_weekday = first;
        self.grid = MonthGrid::for_month(self.grid.month_start(), first.weekday());
        self.save_settings();
    }

    pub fn set_show_week_numbers(&mut self, show: bool) {
        self.settings.show_week_numbers = show;
        self.save_settings();
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::error!("saving settings failed: {e}");
            self.status_message = format!("Could not save settings: {e}");
        }
    }

    // --- File operations ---

    pub fn open_data_folder(&mut self) {
        let dir = self.repository.store().dir().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
            log::warn!("could not open {}: {e}", dir.display());
            self.status_message = format!("Could not open {}", dir.display());
        }
    }

    pub fn reset_to_samples(&mut self) {
        if !ui::dialogs::confirm(
            "Reset Tasks",
            "This replaces every task with the sample tasks. Continue?",
        ) {
            return;
        }
        self.machine.abort();
        self.editor = None;
        self.tasks = TaskList::sample(Self::today());
        self.persist("Sample tasks restored".to_string());
    }

    /// Save the task list and report the result in the status bar.
    fn persist(&mut self, message: String) {
        match self.repository.save(&self.tasks) {
            Ok(()) => self.status_message = message,
            Err(e) => {
                log::error!("saving tasks failed: {e}");
                self.status_message = format!("Save failed: {e}");
            }
        }
    }

    // --- Grid interaction ---

    fn open_editor_for(&mut self, task_id: &str) {
        match self.tasks.get(task_id) {
            Some(task) => self.editor = Some(EditorState::open_for_edit(task)),
            None => log::warn!("clicked task {task_id} no longer exists"),
        }
    }

    fn apply_grid_interaction(&mut self, ctx: &egui::Context, interaction: GridInteraction) {
        let GridInteraction { events, cells } = interaction;

        for event in events {
            let outcome = match event {
                GridEvent::DayPressed(day) => self.machine.pointer_down_on_day(day),
                GridEvent::EdgePressed { task_id, edge, day } => match self.tasks.get(&task_id) {
                    Some(task) => self.machine.begin_resize(task, edge, day),
                    None => Outcome::None,
                },
                GridEvent::TaskDropped { task_id, day } => {
                    self.machine.drop_on_day(task_id.as_deref(), day, &mut self.tasks)
                }
                GridEvent::BarClicked(task_id) => {
                    self.open_editor_for(&task_id);
                    Outcome::None
                }
            };
            self.apply_outcome(outcome);
        }

        // Global pointer routing while a gesture holds the pointer. A button
        // that is no longer down counts as a release, wherever it happened.
        if self.machine.is_capturing() {
            let (pos, down) = ctx.input(|i| (i.pointer.latest_pos(), i.pointer.primary_down()));
            if let Some(pos) = pos {
                let outcome = self.machine.pointer_move(pos, &cells);
                self.apply_outcome(outcome);
            }
            if !down {
                let outcome = self.machine.pointer_up(&mut self.tasks);
                self.apply_outcome(outcome);
            }
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::None | Outcome::SelectionChanged(_) | Outcome::PreviewChanged { .. } => {}
            Outcome::RangeSelected(range) => {
                self.editor = Some(EditorState::open_for_range(range));
            }
            Outcome::ResizeCommitted {
                task_id,
                original,
                committed,
            } => {
                self.persist(format!(
                    "Resized to {} → {}",
                    model::dates::format(committed.start),
                    model::dates::format(committed.end)
                ));
                if let Some(task) = self.tasks.get(&task_id) {
                    self.editor = Some(EditorState::open_after_resize(task, original));
                }
            }
            Outcome::Moved { task_id, range } => {
                let title = self
                    .tasks
                    .get(&task_id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                self.persist(format!(
                    "Moved '{}' to {} → {}",
                    title,
                    model::dates::format(range.start),
                    model::dates::format(range.end)
                ));
            }
        }
    }

    // --- Editor ---

    fn handle_editor_action(&mut self, action: EditorAction) {
        let Some(editor) = self.editor.take() else {
            return;
        };

        match action {
            EditorAction::None => self.editor = Some(editor),
            EditorAction::Save => match editor.save(&mut self.tasks) {
                Ok(SaveOutcome::Created(_)) => self.persist("Task created".to_string()),
                Ok(SaveOutcome::Updated(_)) => self.persist("Task updated".to_string()),
                Err(PlannerError::Validation(message)) => {
                    ui::dialogs::show_validation_error(&message);
                    self.editor = Some(editor);
                }
                Err(e) => {
                    log::warn!("save failed: {e}");
                    self.status_message = e.to_string();
                }
            },
            EditorAction::Cancel => {
                if let CancelOutcome::ResizeReverted(_) = editor.cancel(&mut self.tasks) {
                    self.persist("Resize reverted".to_string());
                }
            }
            EditorAction::Delete => {
                if !ui::dialogs::confirm("Delete Task", "Delete this task?") {
                    self.editor = Some(editor);
                    return;
                }
                match editor.delete(&mut self.tasks) {
                    Ok(task) => self.persist(format!("Deleted '{}'", task.title)),
                    Err(e) => {
                        log::warn!("delete failed: {e}");
                        self.status_message = e.to_string();
                    }
                }
            }
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if self.editor.is_none() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.machine.abort();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.tasks.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        if self.filter.is_active() {
                            ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                            ui.label(
                                egui::RichText::new("Filtered")
                                    .size(10.5)
                                    .color(ui::theme::ACCENT),
                            );
                        }
                    });
                });
            });

        // Central panel: month grid. Fragments come from this frame's
        // snapshot; the grid's events are applied after it is drawn.
        let today = Self::today();
        let editor_open = self.editor.is_some() || self.show_about;
        let mut grid_interaction = GridInteraction::default();
        let grid_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(grid_frame).show(ctx, |ui| {
            let fragments = model::segment(self.tasks.tasks(), &self.grid, self.machine.preview());
            let fragments = self.filter.apply(fragments, &self.grid);
            ui.add_enabled_ui(!editor_open, |ui| {
                grid_interaction = ui::month_grid::show_month_grid(
                    &self.grid,
                    &fragments,
                    &self.machine,
                    today,
                    self.settings.show_week_numbers,
                    ui,
                );
            });
        });
        self.apply_grid_interaction(ctx, grid_interaction);

        // Dialogs
        if let Some(editor) = self.editor.as_mut() {
            let action = ui::task_editor::show_task_editor(editor, ctx);
            self.handle_editor_action(action);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }

        if !self.machine.is_idle() {
            ctx.request_repaint();
        }
    }
}
