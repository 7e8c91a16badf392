//! Mutation gateway port: the asynchronous capability through which every
//! write to the authoritative task store travels.

use crate::board::domain::{Task, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
///
/// Returning at all is "settled": `Ok` is the success hook, `Err` the
/// failure hook. Callers that need settled-regardless behaviour act after
/// the await, whichever arm they land in.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Asynchronous create/update/delete capability over the task store.
///
/// The board core depends only on this contract, never on a transport. The
/// core fires a mutation and continues handling UI events; settlement of the
/// returned future is what resolves the optimistic local state.
#[async_trait]
pub trait MutationGateway: Send + Sync {
    /// Creates a task from a draft and returns the authoritative record.
    ///
    /// Invoked only from the non-drag creation flow.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Rejected`] when the server refuses the draft
    /// or [`GatewayError::Transport`] on delivery failure.
    async fn create(&self, draft: TaskDraft) -> GatewayResult<Task>;

    /// Applies a partial payload to an existing task and returns the
    /// authoritative record.
    ///
    /// Must accept partial payloads: the drag path sends status-only
    /// patches, the edit path full ones.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist,
    /// [`GatewayError::Rejected`] when the server refuses the change, or
    /// [`GatewayError::Transport`] on delivery failure.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> GatewayResult<Task>;

    /// Deletes a task.
    ///
    /// Invoked only after the deletion policy has permitted the task's
    /// status; ownership authorization is enforced by a separate
    /// collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when the task does not exist or
    /// [`GatewayError::Transport`] on delivery failure.
    async fn delete(&self, id: TaskId) -> GatewayResult<()>;
}

/// Errors returned by mutation gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The task was not found on the authoritative store.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The server refused the mutation (validation, stale data, or an
    /// authorization mismatch discovered server-side).
    #[error("mutation rejected for task {id}: {reason}")]
    Rejected {
        /// Task the refusal concerns.
        id: TaskId,
        /// Server-supplied refusal reason.
        reason: String,
    },

    /// Transport-layer failure.
    #[error("gateway transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
