//! Pointer gestures on the month grid: range selection, edge resize with
//! live preview, and drop-to-move.
//!
//! The machine is independent of how the view finds the day under the
//! pointer (`DayLookup`) and of how global pointer listening is wired up
//! (`PointerHooks`). At most one gesture is active at a time.

use chrono::NaiveDate;
use egui::Pos2;

use crate::model::{DateRange, PreviewOverlay, Task, TaskList};

/// Which end of a task bar is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

impl Edge {
    /// The date this edge sits on for `range`.
    pub fn date_in(&self, range: DateRange) -> NaiveDate {
        match self {
            Edge::Left => range.start,
            Edge::Right => range.end,
        }
    }
}

/// Resolves a screen position to the day cell drawn there.
pub trait DayLookup {
    fn day_at(&self, pos: Pos2) -> Option<NaiveDate>;
}

/// Global pointer-move / pointer-up listening that only exists while a
/// gesture is active.
pub trait PointerHooks {
    fn attach(&mut self);
    fn detach(&mut self);
}

/// Flag the grid view polls to decide whether to route global pointer
/// motion and release into the machine.
#[derive(Debug, Default)]
pub struct GlobalPointerHooks {
    attached: bool,
}

impl GlobalPointerHooks {
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl PointerHooks for GlobalPointerHooks {
    fn attach(&mut self) {
        if self.attached {
            log::warn!("pointer hooks attached twice");
        }
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }
}

/// An in-progress edge drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeGesture {
    pub task_id: String,
    pub edge: Edge,
    /// Task dates when the drag started.
    pub original: DateRange,
    /// Last day the pointer was seen over.
    pub hover: NaiveDate,
}

impl ResizeGesture {
    /// Dates implied by the current hover day. The dragged edge stops at the
    /// fixed one, so the task never inverts.
    pub fn resized(&self) -> DateRange {
        match self.edge {
            Edge::Left => DateRange {
                start: self.hover.min(self.original.end),
                end: self.original.end,
            },
            Edge::Right => DateRange {
                start: self.original.start,
                end: self.hover.max(self.original.start),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Selecting {
        anchor: NaiveDate,
        current: NaiveDate,
    },
    Resizing(ResizeGesture),
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    None,
    /// Selection highlight moved.
    SelectionChanged(DateRange),
    /// Selection finished; the app opens the create form for this range.
    RangeSelected(DateRange),
    /// Resize preview moved; nothing stored yet.
    PreviewChanged { task_id: String, range: DateRange },
    /// Resize stored; the app opens the editor so it can be confirmed or
    /// reverted to `original`.
    ResizeCommitted {
        task_id: String,
        original: DateRange,
        committed: DateRange,
    },
    /// Task moved by drag-and-drop.
    Moved { task_id: String, range: DateRange },
}

impl Outcome {
    /// True when the task list changed and must be saved.
    pub fn mutated_tasks(&self) -> bool {
        matches!(self, Outcome::ResizeCommitted { .. } | Outcome::Moved { .. })
    }
}

/// Owns the active gesture and the resize preview.
#[derive(Debug, Default)]
pub struct InteractionMachine<H: PointerHooks = GlobalPointerHooks> {
    gesture: Gesture,
    preview: PreviewOverlay,
    hooks: H,
}

impl<H: PointerHooks> InteractionMachine<H> {
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            gesture: Gesture::Idle,
            preview: PreviewOverlay::default(),
            hooks,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn preview(&self) -> &PreviewOverlay {
        &self.preview
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Current selection highlight, if a range select is running.
    pub fn selection(&self) -> Option<DateRange> {
        match self.gesture {
            Gesture::Selecting { anchor, current } => Some(DateRange::normalized(anchor, current)),
            _ => None,
        }
    }

    /// Id of the task whose edge is being dragged.
    pub fn resizing_task(&self) -> Option<&str> {
        match &self.gesture {
            Gesture::Resizing(g) => Some(g.task_id.as_str()),
            _ => None,
        }
    }

    fn start(&mut self, gesture: Gesture) {
        self.gesture = gesture;
        self.hooks.attach();
    }

    /// End whatever gesture is active. Hooks are detached only if one was.
    fn finish(&mut self) -> Gesture {
        let ended = std::mem::take(&mut self.gesture);
        self.preview.clear();
        if ended != Gesture::Idle {
            self.hooks.detach();
        }
        ended
    }

    /// Pointer pressed on an empty day cell.
    pub fn pointer_down_on_day(&mut self, day: NaiveDate) -> Outcome {
        if !self.is_idle() {
            return Outcome::None;
        }
        self.start(Gesture::Selecting {
            anchor: day,
            current: day,
        });
        Outcome::SelectionChanged(DateRange::single(day))
    }

    /// Pointer entered a day cell.
    pub fn pointer_enter_day(&mut self, day: NaiveDate) -> Outcome {
        match &mut self.gesture {
            Gesture::Selecting { anchor, current } => {
                if *current == day {
                    return Outcome::None;
                }
                *current = day;
                Outcome::SelectionChanged(DateRange::normalized(*anchor, day))
            }
            _ => Outcome::None,
        }
    }

    /// Pointer pressed on one of `task`'s edge handles. `under_pointer` is
    /// the day cell beneath the press, if the view found one.
    pub fn begin_resize(&mut self, task: &Task, edge: Edge, under_pointer: Option<NaiveDate>) -> Outcome {
        if !self.is_idle() {
            log::debug!("ignoring resize on '{}': another gesture is active", task.id);
            return Outcome::None;
        }
        let original = task.range();
        let hover = under_pointer.unwrap_or_else(|| edge.date_in(original));
        self.preview.set(&task.id, original);
        self.start(Gesture::Resizing(ResizeGesture {
            task_id: task.id.clone(),
            edge,
            original,
            hover,
        }));
        Outcome::PreviewChanged {
            task_id: task.id.clone(),
            range: original,
        }
    }

    /// Global pointer motion while a gesture holds the pointer.
    pub fn pointer_move(&mut self, pos: Pos2, lookup: &impl DayLookup) -> Outcome {
        let day = lookup.day_at(pos);
        match &mut self.gesture {
            Gesture::Idle => Outcome::None,
            Gesture::Selecting { .. } => match day {
                Some(day) => self.pointer_enter_day(day),
                None => Outcome::None,
            },
            Gesture::Resizing(g) => {
                if let Some(day) = day {
                    g.hover = day;
                }
                let range = g.resized();
                if self.preview.get(&g.task_id) == Some(range) {
                    return Outcome::None;
                }
                self.preview.set(&g.task_id, range);
                Outcome::PreviewChanged {
                    task_id: g.task_id.clone(),
                    range,
                }
            }
        }
    }

    /// Pointer released, wherever it is. Also used for abnormal release
    /// (button no longer held, pointer gone).
    pub fn pointer_up(&mut self, tasks: &mut TaskList) -> Outcome {
        match self.finish() {
            Gesture::Idle => Outcome::None,
            Gesture::Selecting { anchor, current } => {
                Outcome::RangeSelected(DateRange::normalized(anchor, current))
            }
            Gesture::Resizing(g) => {
                let committed = g.resized();
                match tasks.set_range(&g.task_id, committed) {
                    Ok(_) => {
                        log::info!(
                            "resized task {} to {} .. {}",
                            g.task_id,
                            committed.start,
                            committed.end
                        );
                        Outcome::ResizeCommitted {
                            task_id: g.task_id,
                            original: g.original,
                            committed,
                        }
                    }
                    Err(e) => {
                        log::warn!("dropping resize: {e}");
                        Outcome::None
                    }
                }
            }
        }
    }

    /// End the active gesture without committing anything.
    pub fn abort(&mut self) {
        if self.finish() != Gesture::Idle {
            log::debug!("gesture aborted");
        }
    }

    /// A dragged task bar was released over `day`. `task_id` is the payload
    /// the drag carried, if any.
    pub fn drop_on_day(&mut self, task_id: Option<&str>, day: NaiveDate, tasks: &mut TaskList) -> Outcome {
        let Some(task_id) = task_id.filter(|id| !id.is_empty()) else {
            log::debug!("drop on {day} without a task id ignored");
            return Outcome::None;
        };
        match tasks.move_to_day(task_id, day) {
            Ok(range) => {
                log::info!("moved task {task_id} to {} .. {}", range.start, range.end);
                Outcome::Moved {
                    task_id: task_id.to_string(),
                    range,
                }
            }
            Err(e) => {
                log::warn!("drop ignored: {e}");
                Outcome::None
            }
        }
    }
}

impl InteractionMachine<GlobalPointerHooks> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while global pointer events must be routed here.
    pub fn is_capturing(&self) -> bool {
        self.hooks.is_attached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[derive(Debug, Default)]
    struct CountingHooks {
        attached: u32,
        detached: u32,
    }

    impl PointerHooks for CountingHooks {
        fn attach(&mut self) {
            self.attached += 1;
        }
        fn detach(&mut self) {
            self.detached += 1;
        }
    }

    /// Maps x = 0, 1, 2 ... to consecutive days from `first`.
    struct Row {
        first: NaiveDate,
        days: i64,
    }

    impl DayLookup for Row {
        fn day_at(&self, pos: Pos2) -> Option<NaiveDate> {
            let i = pos.x.floor() as i64;
            (0..self.days)
                .contains(&i)
                .then(|| crate::model::dates::add_days(self.first, i))
        }
    }

    fn june_row() -> Row {
        Row { first: d(2024, 6, 1), days: 30 }
    }

    /// x coordinate of a June day on `june_row`.
    fn at(day: u32) -> Pos2 {
        Pos2::new(day as f32 - 1.0 + 0.5, 0.0)
    }

    fn nowhere() -> Pos2 {
        Pos2::new(-100.0, 0.0)
    }

    fn fixture() -> (TaskList, String) {
        let task = Task::new("Report", d(2024, 6, 10), d(2024, 6, 14), Category::Review);
        let id = task.id.clone();
        (TaskList::new(vec![task]), id)
    }

    #[test]
    fn range_select_normalizes_backwards_drag() {
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let mut tasks = TaskList::default();

        assert_eq!(
            m.pointer_down_on_day(d(2024, 6, 12)),
            Outcome::SelectionChanged(DateRange::single(d(2024, 6, 12)))
        );
        m.pointer_enter_day(d(2024, 6, 5));
        assert_eq!(
            m.selection(),
            Some(DateRange { start: d(2024, 6, 5), end: d(2024, 6, 12) })
        );
        assert_eq!(
            m.pointer_up(&mut tasks),
            Outcome::RangeSelected(DateRange { start: d(2024, 6, 5), end: d(2024, 6, 12) })
        );
        assert!(m.is_idle());
        assert_eq!(m.selection(), None);
    }

    #[test]
    fn selection_follows_pointer_motion() {
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        m.pointer_down_on_day(d(2024, 6, 3));
        assert_eq!(
            m.pointer_move(at(6), &june_row()),
            Outcome::SelectionChanged(DateRange { start: d(2024, 6, 3), end: d(2024, 6, 6) })
        );
        assert_eq!(m.pointer_move(nowhere(), &june_row()), Outcome::None);
        assert_eq!(
            m.selection(),
            Some(DateRange { start: d(2024, 6, 3), end: d(2024, 6, 6) })
        );
    }

    #[test]
    fn click_without_motion_selects_one_day() {
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        m.pointer_down_on_day(d(2024, 6, 3));
        assert_eq!(
            m.pointer_up(&mut TaskList::default()),
            Outcome::RangeSelected(DateRange::single(d(2024, 6, 3)))
        );
    }

    #[test]
    fn resize_right_edge_previews_then_commits() {
        let (mut tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Right, Some(d(2024, 6, 14)));
        assert_eq!(m.preview().get(&id), Some(task.range()));

        m.pointer_move(at(20), &june_row());
        assert_eq!(
            m.preview().get(&id),
            Some(DateRange { start: d(2024, 6, 10), end: d(2024, 6, 20) })
        );
        // Preview only; the stored task is unchanged until release.
        assert_eq!(tasks.get(&id).unwrap().end, d(2024, 6, 14));

        let out = m.pointer_up(&mut tasks);
        assert_eq!(
            out,
            Outcome::ResizeCommitted {
                task_id: id.clone(),
                original: DateRange { start: d(2024, 6, 10), end: d(2024, 6, 14) },
                committed: DateRange { start: d(2024, 6, 10), end: d(2024, 6, 20) },
            }
        );
        assert!(out.mutated_tasks());
        assert_eq!(tasks.get(&id).unwrap().end, d(2024, 6, 20));
        assert!(m.preview().is_empty());
    }

    #[test]
    fn left_edge_clamps_at_end_date() {
        let (mut tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Left, None);
        m.pointer_move(at(25), &june_row());
        assert_eq!(m.preview().get(&id), Some(DateRange::single(d(2024, 6, 14))));
        m.pointer_up(&mut tasks);
        let stored = tasks.get(&id).unwrap();
        assert_eq!(stored.start, stored.end);
        assert_eq!(stored.start, d(2024, 6, 14));
    }

    #[test]
    fn right_edge_clamps_at_start_date() {
        let (mut tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Right, None);
        m.pointer_move(at(2), &june_row());
        m.pointer_up(&mut tasks);
        assert_eq!(tasks.get(&id).unwrap().range(), DateRange::single(d(2024, 6, 10)));
    }

    #[test]
    fn left_edge_can_extend_earlier() {
        let (mut tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Left, Some(d(2024, 6, 10)));
        m.pointer_move(at(4), &june_row());
        m.pointer_up(&mut tasks);
        assert_eq!(
            tasks.get(&id).unwrap().range(),
            DateRange { start: d(2024, 6, 4), end: d(2024, 6, 14) }
        );
    }

    #[test]
    fn hover_falls_back_to_grabbed_edge() {
        let (mut tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Left, None);
        // Pointer never over a day cell: nothing changes.
        assert_eq!(m.pointer_move(nowhere(), &june_row()), Outcome::None);
        m.pointer_up(&mut tasks);
        assert_eq!(tasks.get(&id).unwrap().range(), task.range());
    }

    #[test]
    fn last_hover_is_kept_when_pointer_leaves_the_grid() {
        let (mut tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Right, Some(d(2024, 6, 14)));
        m.pointer_move(at(17), &june_row());
        m.pointer_move(nowhere(), &june_row());
        m.pointer_up(&mut tasks);
        assert_eq!(tasks.get(&id).unwrap().end, d(2024, 6, 17));
    }

    #[test]
    fn hooks_detach_exactly_once_and_no_stale_preview() {
        let (mut tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Right, None);
        assert_eq!(m.hooks().attached, 1);
        m.pointer_up(&mut tasks);
        assert_eq!(m.hooks().detached, 1);

        // Late events after release change nothing.
        assert_eq!(m.pointer_move(at(28), &june_row()), Outcome::None);
        assert_eq!(m.pointer_up(&mut tasks), Outcome::None);
        m.abort();
        assert!(m.preview().is_empty());
        assert_eq!(m.hooks().detached, 1);
        assert_eq!(tasks.get(&id).unwrap().range(), task.range());

        // The selection path pairs them the same way.
        m.pointer_down_on_day(d(2024, 6, 1));
        m.pointer_up(&mut tasks);
        assert_eq!((m.hooks().attached, m.hooks().detached), (2, 2));
    }

    #[test]
    fn only_one_gesture_at_a_time() {
        let (tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Right, None);
        assert_eq!(m.pointer_down_on_day(d(2024, 6, 2)), Outcome::None);
        assert_eq!(m.selection(), None);
        assert_eq!(m.resizing_task(), Some(id.as_str()));

        let mut other = InteractionMachine::with_hooks(CountingHooks::default());
        other.pointer_down_on_day(d(2024, 6, 2));
        assert_eq!(other.begin_resize(&task, Edge::Left, None), Outcome::None);
        assert_eq!(other.hooks().attached, 1);
    }

    #[test]
    fn abort_discards_preview_without_commit() {
        let (tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Right, None);
        m.pointer_move(at(22), &june_row());
        m.abort();
        assert!(m.is_idle());
        assert!(m.preview().is_empty());
        assert_eq!(m.hooks().detached, 1);
        assert_eq!(tasks.get(&id).unwrap().end, d(2024, 6, 14));
    }

    #[test]
    fn resize_of_vanished_task_is_dropped() {
        let (mut tasks, id) = fixture();
        let mut m = InteractionMachine::with_hooks(CountingHooks::default());
        let task = tasks.get(&id).unwrap().clone();

        m.begin_resize(&task, Edge::Right, None);
        tasks.delete(&id).unwrap();
        assert_eq!(m.pointer_up(&mut tasks), Outcome::None);
        assert_eq!(m.hooks().detached, 1);
    }

    #[test]
    fn drop_moves_and_keeps_duration() {
        let task = Task::new("Report", d(2024, 6, 1), d(2024, 6, 3), Category::Review);
        let id = task.id.clone();
        let mut tasks = TaskList::new(vec![task]);
        let mut m = InteractionMachine::new();

        let out = m.drop_on_day(Some(&id), d(2024, 6, 10), &mut tasks);
        assert_eq!(
            out,
            Outcome::Moved {
                task_id: id.clone(),
                range: DateRange { start: d(2024, 6, 10), end: d(2024, 6, 12) },
            }
        );
        assert!(!m.is_capturing());
    }

    #[test]
    fn drop_without_id_is_ignored() {
        let (mut tasks, id) = fixture();
        let before = tasks.clone();
        let mut m = InteractionMachine::new();
        assert_eq!(m.drop_on_day(None, d(2024, 6, 20), &mut tasks), Outcome::None);
        assert_eq!(m.drop_on_day(Some(""), d(2024, 6, 20), &mut tasks), Outcome::None);
        assert_eq!(m.drop_on_day(Some("missing"), d(2024, 6, 20), &mut tasks), Outcome::None);
        assert_eq!(tasks, before);
        assert!(tasks.get(&id).is_some());
    }

    #[test]
    fn global_hooks_track_capture() {
        let mut m = InteractionMachine::new();
        assert!(!m.is_capturing());
        m.pointer_down_on_day(d(2024, 6, 1));
        assert!(m.is_capturing());
        m.pointer_up(&mut TaskList::default());
        assert!(!m.is_capturing());
    }
}
