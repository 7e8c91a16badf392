//! Ephemeral drag session value object.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};

/// The single in-flight drag operation on a board.
///
/// Exists only between drag-start and drop/drag-end and is destroyed
/// unconditionally at drag-end regardless of outcome, so a drop handler that
/// never fires cannot leave ghost drag state behind. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    task_id: TaskId,
    source_status: TaskStatus,
    started_at: DateTime<Utc>,
}

impl DragSession {
    /// Opens a session for the given card.
    #[must_use]
    pub const fn new(task_id: TaskId, source_status: TaskStatus, started_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            source_status,
            started_at,
        }
    }

    /// Returns the card being dragged.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status the card rested in when the drag started.
    ///
    /// Informational only: drop validation always re-reads the current
    /// status, never this captured one.
    #[must_use]
    pub const fn source_status(&self) -> TaskStatus {
        self.source_status
    }

    /// Returns when the drag started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
