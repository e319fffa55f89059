use chrono::{Datelike, NaiveDate};
use egui::{Align2, CursorIcon, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::interaction::{DayLookup, Edge, InteractionMachine};
use crate::model::{dates, Fragment, MonthGrid};
use crate::ui::theme;

/// Payload a task bar carries while it is dragged.
#[derive(Debug, Clone)]
pub struct TaskDragPayload {
    pub task_id: String,
}

/// A painted day cell, tagged with its `YYYY-MM-DD` date string.
#[derive(Debug, Clone)]
pub struct DayCell {
    pub rect: Rect,
    pub tag: String,
}

/// Day cells laid out this frame.
#[derive(Debug, Clone, Default)]
pub struct DayCells {
    cells: Vec<DayCell>,
}

impl DayCells {
    fn push(&mut self, rect: Rect, day: NaiveDate) {
        self.cells.push(DayCell {
            rect,
            tag: dates::format(day),
        });
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl DayLookup for DayCells {
    fn day_at(&self, pos: Pos2) -> Option<NaiveDate> {
        let cell = self.cells.iter().find(|c| c.rect.contains(pos))?;
        match dates::parse(&cell.tag) {
            Ok(day) => Some(day),
            Err(e) => {
                log::debug!("unreadable day cell: {e}");
                None
            }
        }
    }
}

/// Pointer input the grid saw this frame, for the app to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// Primary button went down on a day, away from any bar.
    DayPressed(NaiveDate),
    /// Primary button went down on a bar's edge handle.
    EdgePressed {
        task_id: String,
        edge: Edge,
        day: Option<NaiveDate>,
    },
    /// A dragged bar was released over a day cell.
    TaskDropped {
        task_id: Option<String>,
        day: NaiveDate,
    },
    BarClicked(String),
}

/// Result of drawing the grid.
#[derive(Debug, Default)]
pub struct GridInteraction {
    pub events: Vec<GridEvent>,
    /// Cell layout, for resolving the day under a global pointer position.
    pub cells: DayCells,
}

/// Render the month grid with its task bars.
pub fn show_month_grid(
    grid: &MonthGrid,
    fragments: &[Fragment<'_>],
    machine: &InteractionMachine,
    today: NaiveDate,
    show_week_numbers: bool,
    ui: &mut Ui,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();
    let weeks = grid.weeks();

    // Bars in a week row are stacked in the order they arrive.
    let mut bars_per_week = vec![0usize; weeks.len()];
    let slots: Vec<usize> = fragments
        .iter()
        .map(|f| {
            let slot = bars_per_week[f.week_index];
            bars_per_week[f.week_index] += 1;
            slot
        })
        .collect();

    let available = ui.available_size();
    let gutter = if show_week_numbers { theme::WEEK_NUMBER_WIDTH } else { 0.0 };
    let col_w = ((available.x - gutter) / 7.0).max(48.0);
    let fill_h = (available.y - theme::WEEKDAY_HEADER_HEIGHT) / weeks.len().max(1) as f32;
    let row_heights: Vec<f32> = bars_per_week
        .iter()
        .map(|&n| {
            let needed = theme::DAY_NUMBER_HEIGHT
                + n as f32 * (theme::BAR_HEIGHT + theme::BAR_GAP)
                + theme::BAR_GAP;
            needed.max(theme::MIN_ROW_HEIGHT).max(fill_h)
        })
        .collect();
    let total_h = theme::WEEKDAY_HEADER_HEIGHT + row_heights.iter().sum::<f32>();

    // Dragging on the grid selects days; only the wheel and scrollbar scroll it.
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(gutter + col_w * 7.0, total_h), Sense::hover());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_weekday_header(&painter, grid, origin, gutter, col_w);

            let mut row_tops = Vec::with_capacity(weeks.len());
            let mut y = origin.y + theme::WEEKDAY_HEADER_HEIGHT;
            for h in &row_heights {
                row_tops.push(y);
                y += h;
            }
            let day_rect = |week: usize, col: usize| {
                Rect::from_min_size(
                    Pos2::new(origin.x + gutter + col as f32 * col_w, row_tops[week]),
                    Vec2::new(col_w, row_heights[week]),
                )
            };

            // Day cells
            let selection = machine.selection();
            for (w, week) in weeks.iter().enumerate() {
                if show_week_numbers {
                    // ISO week of the row's midweek day
                    painter.text(
                        Pos2::new(origin.x + gutter * 0.5, row_tops[w] + 6.0),
                        Align2::CENTER_TOP,
                        format!("W{}", week[3].iso_week().week()),
                        theme::font_small(),
                        theme::TEXT_DIM,
                    );
                }

                for (col, &day) in week.iter().enumerate() {
                    let rect = day_rect(w, col);
                    interaction.cells.push(rect, day);

                    let cell_response =
                        ui.interact(rect, ui.id().with(("day-cell", day)), Sense::click());
                    let in_month = grid.is_in_month(day);

                    let fill = if cell_response.hovered() && machine.is_idle() {
                        theme::CELL_BG_HOVER
                    } else if in_month {
                        theme::CELL_BG
                    } else {
                        theme::CELL_BG_MUTED
                    };
                    painter.rect_filled(rect, 0.0, fill);
                    if selection.is_some_and(|s| s.contains(day)) {
                        painter.rect_filled(rect, 0.0, theme::CELL_SELECTING);
                    }
                    if cell_response.dnd_hover_payload::<TaskDragPayload>().is_some() {
                        painter.rect_filled(rect, 0.0, theme::DROP_TARGET);
                    }
                    painter.rect_stroke(rect, 0.0, Stroke::new(0.5, theme::BORDER_SUBTLE));
                    draw_day_number(&painter, rect, day, in_month, day == today);

                    if let Some(payload) = cell_response.dnd_release_payload::<TaskDragPayload>() {
                        interaction.events.push(GridEvent::TaskDropped {
                            task_id: Some(payload.task_id.clone()),
                            day,
                        });
                    }
                }
            }

            // Task bars
            let mut bar_rects = Vec::with_capacity(fragments.len());
            let mut handles: Vec<(Rect, String, Edge)> = Vec::new();
            for (frag, &slot) in fragments.iter().zip(&slots) {
                let task = frag.task;
                let first_cell = day_rect(frag.week_index, frag.left as usize);
                let top = row_tops[frag.week_index]
                    + theme::DAY_NUMBER_HEIGHT
                    + slot as f32 * (theme::BAR_HEIGHT + theme::BAR_GAP);
                let bar_rect = Rect::from_min_max(
                    Pos2::new(first_cell.left() + theme::BAR_INSET, top),
                    Pos2::new(
                        first_cell.left() + frag.width as f32 * col_w - theme::BAR_INSET,
                        top + theme::BAR_HEIGHT,
                    ),
                );
                let resizing = machine.resizing_task() == Some(task.id.as_str());
                draw_task_bar(&painter, frag, bar_rect, resizing);

                let bar_response = ui
                    .interact(
                        bar_rect,
                        ui.id().with(("task-bar", &task.id, frag.week_index)),
                        Sense::click_and_drag(),
                    )
                    .on_hover_text(task.tooltip());
                bar_response.dnd_set_drag_payload(TaskDragPayload {
                    task_id: task.id.clone(),
                });
                if bar_response.dragged() {
                    ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
                } else if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
                }
                if bar_response.clicked() {
                    interaction.events.push(GridEvent::BarClicked(task.id.clone()));
                }
                bar_rects.push(bar_rect);

                // Handles only where the task really starts or ends.
                let mut edges = Vec::with_capacity(2);
                if !frag.continues_left() {
                    edges.push((Edge::Left, bar_rect.left()));
                }
                if !frag.continues_right() {
                    edges.push((Edge::Right, bar_rect.right()));
                }
                for (edge, x) in edges {
                    let handle_rect = Rect::from_center_size(
                        Pos2::new(x, bar_rect.center().y),
                        Vec2::new(theme::HANDLE_WIDTH, bar_rect.height()),
                    );
                    let handle_response = ui.interact(
                        handle_rect,
                        ui.id().with(("task-resize", &task.id, frag.week_index, edge == Edge::Left)),
                        Sense::drag(),
                    );
                    if handle_response.hovered() || resizing {
                        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
                        draw_handle(&painter, bar_rect, edge);
                    }
                    handles.push((handle_rect, task.id.clone(), edge));
                }
            }

            if machine.resizing_task().is_some() {
                ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
            }

            // A press goes to a handle first, then a bar, then the cell beneath.
            if ui.is_enabled() && response.contains_pointer() {
                let press = ui.input(|i| {
                    if i.pointer.primary_pressed() {
                        i.pointer.interact_pos()
                    } else {
                        None
                    }
                });
                if let Some(pos) = press {
                    if let Some((_, task_id, edge)) = handles.iter().rev().find(|(r, ..)| r.contains(pos)) {
                        interaction.events.push(GridEvent::EdgePressed {
                            task_id: task_id.clone(),
                            edge: *edge,
                            day: interaction.cells.day_at(pos),
                        });
                    } else if !bar_rects.iter().any(|r| r.contains(pos)) {
                        if let Some(day) = interaction.cells.day_at(pos) {
                            interaction.events.push(GridEvent::DayPressed(day));
                        }
                    }
                }
            }
        });

    interaction
}

fn draw_weekday_header(painter: &egui::Painter, grid: &MonthGrid, origin: Pos2, gutter: f32, col_w: f32) {
    let header_rect = Rect::from_min_size(
        origin,
        Vec2::new(gutter + col_w * 7.0, theme::WEEKDAY_HEADER_HEIGHT),
    );
    painter.rect_filled(header_rect, 0.0, theme::BG_HEADER);

    for (col, label) in grid.weekday_labels().iter().enumerate() {
        let x = origin.x + gutter + col as f32 * col_w + col_w * 0.5;
        painter.text(
            Pos2::new(x, origin.y + theme::WEEKDAY_HEADER_HEIGHT * 0.5),
            Align2::CENTER_CENTER,
            *label,
            theme::font_header(),
            theme::TEXT_SECONDARY,
        );
    }
    painter.line_segment(
        [header_rect.left_bottom(), header_rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_day_number(painter: &egui::Painter, cell: Rect, day: NaiveDate, in_month: bool, is_today: bool) {
    let text = if day.day() == 1 {
        day.format("%b %-d").to_string()
    } else {
        day.day().to_string()
    };
    let pos = Pos2::new(cell.left() + 8.0, cell.top() + theme::DAY_NUMBER_HEIGHT * 0.5);

    if is_today {
        let galley = painter.layout_no_wrap(text.clone(), theme::font_day(), theme::TEXT_ON_BAR);
        let badge = Rect::from_min_size(
            Pos2::new(pos.x - 4.0, pos.y - 9.0),
            Vec2::new(galley.size().x + 8.0, 18.0),
        );
        painter.rect_filled(badge, Rounding::same(9.0), theme::TODAY);
        painter.text(pos, Align2::LEFT_CENTER, text, theme::font_day(), theme::TEXT_ON_BAR);
    } else {
        let color = if in_month { theme::TEXT_PRIMARY } else { theme::TEXT_DIM };
        painter.text(pos, Align2::LEFT_CENTER, text, theme::font_day(), color);
    }
}

fn draw_task_bar(painter: &egui::Painter, frag: &Fragment<'_>, rect: Rect, resizing: bool) {
    let left = if frag.continues_left() { 0.0 } else { theme::BAR_ROUNDING };
    let right = if frag.continues_right() { 0.0 } else { theme::BAR_ROUNDING };
    let rounding = Rounding {
        nw: left,
        sw: left,
        ne: right,
        se: right,
    };

    painter.rect_filled(rect, rounding, frag.task.category.color());
    if resizing {
        painter.rect_stroke(rect, rounding, Stroke::new(1.5, theme::HANDLE_COLOR));
    }

    let label = if frag.continues_left() {
        format!("{} {}", egui_phosphor::regular::CARET_LEFT, frag.task.title)
    } else {
        frag.task.title.clone()
    };
    painter.with_clip_rect(rect.shrink2(Vec2::new(4.0, 0.0))).text(
        Pos2::new(rect.left() + 6.0, rect.center().y),
        Align2::LEFT_CENTER,
        label,
        theme::font_bar(),
        theme::TEXT_ON_BAR,
    );
}

fn draw_handle(painter: &egui::Painter, bar: Rect, edge: Edge) {
    let h = bar.height() * 0.55;
    let x = match edge {
        Edge::Left => bar.left() + 1.5,
        Edge::Right => bar.right() - 5.5,
    };
    let pill = Rect::from_min_size(Pos2::new(x, bar.center().y - h / 2.0), Vec2::new(4.0, h));
    painter.rect_filled(pill, Rounding::same(2.0), theme::HANDLE_COLOR);
}
