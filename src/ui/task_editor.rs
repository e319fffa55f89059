use crate::editor::EditorState;
use crate::model::Category;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Actions the editor can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Save,
    Cancel,
    Delete,
}

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Render the create/edit task window.
pub fn show_task_editor(editor: &mut EditorState, ctx: &Context) -> EditorAction {
    let mut action = EditorAction::None;
    let is_edit = editor.editing_id().is_some();

    Window::new(RichText::new(editor.heading()).strong().size(14.0))
        .id(egui::Id::new("task_editor"))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.spacing_mut().item_spacing.y = 6.0;
            ui.add_space(4.0);

            // ── Title ────────────────────────────────────────────────────
            field_label(ui, "Title");
            let title = ui.add_sized(
                [ui.available_width(), 24.0],
                egui::TextEdit::singleline(&mut editor.form.title)
                    .hint_text("Task title...")
                    .text_color(theme::TEXT_PRIMARY),
            );
            if title.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = EditorAction::Save;
            }

            // ── Category ─────────────────────────────────────────────────
            field_label(ui, "Category");
            egui::ComboBox::from_id_salt("category_combo")
                .selected_text(theme::category_label(editor.form.category))
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for c in Category::all() {
                        ui.selectable_value(&mut editor.form.category, *c, theme::category_label(*c));
                    }
                });

            // ── Dates ────────────────────────────────────────────────────
            let mut start_moved = false;
            let mut end_moved = false;
            egui::Grid::new("editor_dates")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    field_label(ui, "Start");
                    field_label(ui, "End");
                    ui.end_row();
                    start_moved = ui
                        .add(
                            egui_extras::DatePickerButton::new(&mut editor.form.start)
                                .id_salt("editor_dp_start"),
                        )
                        .changed();
                    end_moved = ui
                        .add(
                            egui_extras::DatePickerButton::new(&mut editor.form.end)
                                .id_salt("editor_dp_end"),
                        )
                        .changed();
                    ui.end_row();
                });
            if start_moved {
                editor.start_changed();
            }
            if end_moved {
                editor.end_changed();
            }

            ui.label(
                RichText::new(format!("{} {}", egui_phosphor::regular::CALENDAR_BLANK, editor.range_label()))
                    .color(theme::TEXT_SECONDARY),
            );

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], save_btn).clicked() {
                    action = EditorAction::Save;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    action = EditorAction::Cancel;
                }
                if is_edit {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete_btn = egui::Button::new(
                            RichText::new(format!("{} Delete", egui_phosphor::regular::TRASH))
                                .color(Color32::WHITE),
                        )
                        .fill(theme::DANGER)
                        .rounding(egui::Rounding::same(4.0));
                        if ui.add_sized([90.0, 28.0], delete_btn).clicked() {
                            action = EditorAction::Delete;
                        }
                    });
                }
            });
            ui.add_space(2.0);
        });

    if action == EditorAction::None && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = EditorAction::Cancel;
    }
    action
}
