//! Task aggregate, creation draft, and partial-update payload.

use super::{BoardDomainError, MemberId, TaskId, TaskPriority, TaskSize, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task record as consumed by the board core.
///
/// All fields except `status` are opaque payload that the board relays
/// unchanged during moves; status is mutated exclusively through the
/// sanctioned policy paths (drag-and-drop or edit-save).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    status: TaskStatus,
    size: TaskSize,
    priority: TaskPriority,
    title: TaskTitle,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<MemberId>,
}

/// Parameter object for reconstructing a task arriving from the read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted effort estimate.
    pub size: TaskSize,
    /// Persisted scheduling priority.
    pub priority: TaskPriority,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted free-form description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted assignee, if any.
    pub assigned_to: Option<MemberId>,
}

impl Task {
    /// Materialises a new task from a creation draft.
    ///
    /// Status always starts at [`TaskStatus::Todo`]; a draft carries no
    /// status field so creation cannot bypass the lifecycle entry point.
    #[must_use]
    pub fn from_draft(draft: TaskDraft) -> Self {
        Self {
            id: TaskId::new(),
            status: TaskStatus::Todo,
            size: draft.size,
            priority: draft.priority,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            assigned_to: draft.assigned_to,
        }
    }

    /// Reconstructs a task from read-model data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            status: data.status,
            size: data.size,
            priority: data.priority,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            assigned_to: data.assigned_to,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the effort estimate.
    #[must_use]
    pub const fn size(&self) -> TaskSize {
        self.size
    }

    /// Returns the scheduling priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the free-form description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<MemberId> {
        self.assigned_to
    }

    /// Merges a partial payload into this task.
    ///
    /// Absent patch fields leave the corresponding task fields untouched.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = Some(assigned_to);
        }
    }
}

/// Creation payload for a new task.
///
/// Deliberately has no status field: every created task enters the board at
/// [`TaskStatus::Todo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    title: TaskTitle,
    size: TaskSize,
    priority: TaskPriority,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<MemberId>,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        size: TaskSize,
        priority: TaskPriority,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            title: TaskTitle::new(title)?,
            size,
            priority,
            description: None,
            due_date: None,
            assigned_to: None,
        })
    }

    /// Sets the free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, member: MemberId) -> Self {
        self.assigned_to = Some(member);
        self
    }
}

/// Partial-update payload accepted by the mutation gateway.
///
/// The drag path builds status-only patches so a drag-induced transition
/// touches no other field; the edit path builds full patches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<TaskSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<TaskTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_to: Option<MemberId>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch that changes the status and nothing else.
    #[must_use]
    pub const fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            size: None,
            priority: None,
            title: None,
            description: None,
            due_date: None,
            assigned_to: None,
        }
    }

    /// Returns the status this patch would set, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Sets the status field.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the size field.
    #[must_use]
    pub const fn with_size(mut self, size: TaskSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the priority field.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the title field.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the description field.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date field.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee field.
    #[must_use]
    pub const fn with_assignee(mut self, member: MemberId) -> Self {
        self.assigned_to = Some(member);
        self
    }
}
