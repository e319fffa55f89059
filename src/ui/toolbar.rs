use crate::app::PlannerApp;
use crate::config::FirstWeekday;
use crate::model::Category;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the menu bar and the month navigation row.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button("  File  ", |ui| {
            if ui.button(format!("{} Open Data Folder", icons::FOLDER_OPEN)).clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{} Reset to Sample Tasks", icons::ARROW_COUNTER_CLOCKWISE)).clicked() {
                ui.close_menu();
                app.reset_to_samples();
            }
        });

        ui.menu_button("  View  ", |ui| {
            ui.label(RichText::new("First Day of Week").small().weak());
            let mut first = app.settings.first_weekday;
            let sunday = ui.radio_value(&mut first, FirstWeekday::Sunday, "Sunday");
            let monday = ui.radio_value(&mut first, FirstWeekday::Monday, "Monday");
            if sunday.clicked() || monday.clicked() {
                app.set_first_weekday(first);
                ui.close_menu();
            }
            ui.separator();
            let mut week_numbers = app.settings.show_week_numbers;
            if ui.checkbox(&mut week_numbers, "Week Numbers").changed() {
                app.set_show_week_numbers(week_numbers);
            }
        });

        let filter_title = if app.filter.is_active() {
            RichText::new("  Filter •  ").color(theme::ACCENT)
        } else {
            RichText::new("  Filter  ")
        };
        ui.menu_button(filter_title, |ui| {
            ui.label(RichText::new("Categories").small().weak());
            for c in Category::all() {
                let mut on = app.filter.has_category(*c);
                if ui.checkbox(&mut on, theme::category_label(*c)).changed() {
                    app.filter.toggle_category(*c);
                }
            }
            ui.separator();
            ui.label(RichText::new("Week of Month").small().weak());
            if ui.radio_value(&mut app.filter.week_of_month, None, "Show all").clicked() {
                ui.close_menu();
            }
            for n in 1..=app.grid.weeks_of_month() {
                if ui
                    .radio_value(&mut app.filter.week_of_month, Some(n), format!("Week {n}"))
                    .clicked()
                {
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Clear Filters").clicked() {
                app.filter.clear();
                ui.close_menu();
            }
        });

        ui.menu_button("  Help  ", |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });
    });

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        if ui.button(icons::CARET_LEFT).on_hover_text("Previous month").clicked() {
            app.prev_month();
        }
        ui.add_sized(
            [150.0, 24.0],
            egui::Label::new(
                RichText::new(app.grid.month_start().format("%B %Y").to_string())
                    .font(theme::font_month())
                    .strong(),
            ),
        );
        if ui.button(icons::CARET_RIGHT).on_hover_text("Next month").clicked() {
            app.next_month();
        }
        if ui.button("Today").clicked() {
            app.go_to_today();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if !app.filter.search.is_empty() && ui.small_button(icons::X).clicked() {
                app.filter.search.clear();
            }
            ui.add_sized(
                [200.0, 22.0],
                egui::TextEdit::singleline(&mut app.filter.search).hint_text("Search tasks..."),
            );
            ui.label(RichText::new(icons::MAGNIFYING_GLASS).color(theme::TEXT_SECONDARY));
        });
    });
    ui.add_space(2.0);
}
