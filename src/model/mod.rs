pub mod dates;
pub mod filter;
pub mod fragment;
pub mod grid;
pub mod task;
pub mod task_list;

pub use filter::FragmentFilter;
pub use fragment::{segment, Fragment, PreviewOverlay};
pub use grid::MonthGrid;
pub use task::{Category, DateRange, Task};
pub use task_list::TaskList;
