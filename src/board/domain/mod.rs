//! Domain model for the task board.
//!
//! The board domain models the closed task status vocabulary, the task
//! aggregate consumed by the reconciliation controller, the pure transition
//! policy, and the ephemeral drag session, while keeping all infrastructure
//! concerns outside of the domain boundary.

mod drag;
mod error;
mod ids;
pub mod policy;
mod status;
mod task;

pub use drag::DragSession;
pub use error::{
    BoardDomainError, ParseTaskPriorityError, ParseTaskSizeError, ParseTaskStatusError,
};
pub use ids::{MemberId, TaskId};
pub use policy::{ActorRole, DeletionPolicy, allowed_transitions, can_transition};
pub use status::{TaskPriority, TaskSize, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch, TaskTitle};
