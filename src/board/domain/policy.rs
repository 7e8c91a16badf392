//! Pure transition and deletion policy for task statuses.
//!
//! Every authorization decision about a status change flows through this
//! module: the drag gate, the edit-save gate, and the status selector all
//! call the same two functions, so the policy cannot drift between entry
//! points. The functions are deterministic, synchronous, and perform no I/O.

use super::TaskStatus;
use serde::{Deserialize, Serialize};

/// Privilege level of the acting user for a given project.
///
/// Supplied fresh by the hosting layer for every decision; the board never
/// caches it across a task's lifetime because a user's privilege can change
/// between renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Project owner with full transition and blocking authority.
    Owner,
    /// Regular project member limited to the active progression.
    Collaborator,
}

impl ActorRole {
    /// Maps the hosting layer's `is_project_owner` flag onto a role.
    #[must_use]
    pub const fn from_owner_flag(is_project_owner: bool) -> Self {
        if is_project_owner {
            Self::Owner
        } else {
            Self::Collaborator
        }
    }

    /// Returns whether this role carries owner privileges.
    #[must_use]
    pub const fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }
}

/// Returns the statuses the actor may move a task to from `from`.
///
/// The result never contains `from` itself and is always a subset of the
/// closed status set. Collaborators may only advance a task along the active
/// progression (`TODO -> IN_PROGRESS -> IN_REVIEW`); validating, blocking,
/// and discarding are judgment calls reserved for owners. Owners may reach
/// any status other than the source.
#[must_use]
pub fn allowed_transitions(from: TaskStatus, actor: ActorRole) -> Vec<TaskStatus> {
    match actor {
        ActorRole::Owner => TaskStatus::ALL
            .into_iter()
            .filter(|status| *status != from)
            .collect(),
        ActorRole::Collaborator => match from {
            TaskStatus::Todo => vec![TaskStatus::InProgress],
            TaskStatus::InProgress => vec![TaskStatus::InReview],
            TaskStatus::InReview
            | TaskStatus::Validated
            | TaskStatus::Blocked
            | TaskStatus::Trash => Vec::new(),
        },
    }
}

/// Returns whether the actor may move a task from `from` to `to`.
///
/// Equivalent to membership in [`allowed_transitions`]. A same-status move is
/// never a transition; callers treat same-column drops as a cancelled
/// operation, not a rejected one.
#[must_use]
pub fn can_transition(from: TaskStatus, to: TaskStatus, actor: ActorRole) -> bool {
    from != to && allowed_transitions(from, actor).contains(&to)
}

/// The statuses from which a task may be deleted.
///
/// Deletion-by-status is a data-integrity rule, not an authorization rule:
/// it is independent of actor privilege, and ownership checks for deletion
/// live with the hosting collaborator. The boundary between deletable parked
/// work and protected active work is a product decision, so the set is
/// configurable rather than hard-coded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionPolicy {
    deletable: Vec<TaskStatus>,
}

impl DeletionPolicy {
    /// Creates a policy permitting deletion from the given statuses.
    #[must_use]
    pub fn new(deletable: impl IntoIterator<Item = TaskStatus>) -> Self {
        Self {
            deletable: deletable.into_iter().collect(),
        }
    }

    /// Returns whether a task with the given status may be deleted.
    ///
    /// Pure function of status alone.
    #[must_use]
    pub fn can_delete(&self, status: TaskStatus) -> bool {
        self.deletable.contains(&status)
    }
}

impl Default for DeletionPolicy {
    /// Trash is always deletable; never-started and parked work may also be
    /// discarded, while active work is protected.
    fn default() -> Self {
        Self::new([TaskStatus::Todo, TaskStatus::Blocked, TaskStatus::Trash])
    }
}
