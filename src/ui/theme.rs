use egui::{Color32, FontId, RichText, Rounding, Stroke, Visuals};

use crate::model::Category;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const CELL_BG: Color32 = Color32::from_rgb(30, 31, 42);
pub const CELL_BG_MUTED: Color32 = Color32::from_rgb(25, 25, 34);
pub const CELL_BG_HOVER: Color32 = Color32::from_rgb(38, 40, 54);
pub const CELL_SELECTING: Color32 = Color32::from_rgba_premultiplied(40, 75, 120, 110);
pub const DROP_TARGET: Color32 = Color32::from_rgba_premultiplied(60, 110, 60, 90);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY: Color32 = Color32::from_rgb(240, 75, 75);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const DANGER: Color32 = Color32::from_rgb(200, 60, 60);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const WEEKDAY_HEADER_HEIGHT: f32 = 28.0;
pub const WEEK_NUMBER_WIDTH: f32 = 32.0;
pub const MIN_ROW_HEIGHT: f32 = 84.0;
pub const DAY_NUMBER_HEIGHT: f32 = 24.0;
pub const BAR_HEIGHT: f32 = 22.0;
pub const BAR_GAP: f32 = 3.0;
pub const BAR_INSET: f32 = 3.0; // horizontal inset so bars don't touch cell borders
pub const BAR_ROUNDING: f32 = 5.0;
pub const HANDLE_WIDTH: f32 = 8.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const DIALOG_WIDTH: f32 = 420.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_day() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_month() -> FontId {
    FontId::proportional(16.0)
}

/// Category name with its colour swatch.
pub fn category_label(category: Category) -> RichText {
    RichText::new(format!("{} {}", egui_phosphor::regular::CIRCLE, category.label()))
        .color(category.color())
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD; // TextEdit bg

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(12.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
