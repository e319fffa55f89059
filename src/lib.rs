//! Month-view task planner: a calendar grid with task bars that can be
//! created by dragging across days, resized by their edges and moved by
//! drag-and-drop.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod io;
pub mod model;
pub mod ui;

pub use error::{PlannerError, Result};
