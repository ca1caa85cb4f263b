//! Application services for task ordering and workflow transitions.

mod bounded;
mod error;
mod locks;
mod ordering;
mod requests;
mod task_service;
mod transition;
mod view;

pub use error::{TaskServiceError, TaskServiceResult};
pub use ordering::OrderingEngine;
pub use requests::{CreateTaskRequest, EditTaskRequest, ReorderTaskRequest, SetStatusRequest};
pub use task_service::TaskService;
pub use transition::StatusTransitionManager;
pub use view::{TaskBoard, ViewMode};
