//! Shared fixtures for the crate-level behaviour tests.

use trestle::board::domain::{
    PersistedTaskData, Task, TaskId, TaskPriority, TaskSize, TaskStatus, TaskTitle,
};

/// Builds a task with the given title and status over a neutral payload.
pub fn make_task(title: &str, status: TaskStatus) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        status,
        size: TaskSize::M,
        priority: TaskPriority::Medium,
        title: TaskTitle::new(title).expect("valid title"),
        description: None,
        due_date: None,
        assigned_to: None,
    })
}
