pub mod enums;
pub mod task;
pub mod views;

pub use enums::{ErrorKind, Filter, Focus};
pub use task::{NewTask, PendingTask, Row, Task, TaskId, TaskPatch};
pub use views::{active_count, all_completed, filter_tasks, has_completed, set_loading, visible_rows};
