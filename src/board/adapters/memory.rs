//! In-memory mutation gateway for board services and tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Task, TaskDraft, TaskId, TaskPatch},
    ports::{GatewayError, GatewayResult, MutationGateway},
};

/// Thread-safe in-memory mutation gateway.
///
/// Honours the create/update/delete contract against a local map and can be
/// scripted to refuse mutations, so the reconciliation revert path can be
/// exercised deterministically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMutationGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    tasks: HashMap<TaskId, Task>,
    queued_rejections: VecDeque<String>,
    failing_tasks: HashSet<TaskId>,
    update_log: Vec<TaskId>,
}

impl InMemoryMutationGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway pre-seeded with tasks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the internal lock is
    /// poisoned.
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> GatewayResult<Self> {
        let gateway = Self::new();
        {
            let mut state = gateway.write_state()?;
            for task in tasks {
                state.tasks.insert(task.id(), task);
            }
        }
        Ok(gateway)
    }

    /// Scripts the next update call to settle as a rejection.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the internal lock is
    /// poisoned.
    pub fn reject_next_update(&self, reason: impl Into<String>) -> GatewayResult<()> {
        self.write_state()?.queued_rejections.push_back(reason.into());
        Ok(())
    }

    /// Scripts every update for the given task to settle as a rejection.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the internal lock is
    /// poisoned.
    pub fn fail_updates_for(&self, id: TaskId) -> GatewayResult<()> {
        self.write_state()?.failing_tasks.insert(id);
        Ok(())
    }

    /// Returns the authoritative record for a task, if present.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the internal lock is
    /// poisoned.
    pub fn task(&self, id: TaskId) -> GatewayResult<Option<Task>> {
        Ok(self.read_state()?.tasks.get(&id).cloned())
    }

    /// Returns the task ids of every update call received, in order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the internal lock is
    /// poisoned.
    pub fn recorded_updates(&self) -> GatewayResult<Vec<TaskId>> {
        Ok(self.read_state()?.update_log.clone())
    }

    fn read_state(&self) -> GatewayResult<std::sync::RwLockReadGuard<'_, InMemoryGatewayState>> {
        self.state
            .read()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> GatewayResult<std::sync::RwLockWriteGuard<'_, InMemoryGatewayState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl MutationGateway for InMemoryMutationGateway {
    async fn create(&self, draft: TaskDraft) -> GatewayResult<Task> {
        let task = Task::from_draft(draft);
        let mut state = self.write_state()?;
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> GatewayResult<Task> {
        let mut state = self.write_state()?;
        state.update_log.push(id);

        if let Some(reason) = state.queued_rejections.pop_front() {
            return Err(GatewayError::Rejected { id, reason });
        }
        if state.failing_tasks.contains(&id) {
            return Err(GatewayError::Rejected {
                id,
                reason: "scripted failure".to_owned(),
            });
        }

        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(GatewayError::NotFound(id))?;
        task.apply_patch(&patch);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> GatewayResult<()> {
        let mut state = self.write_state()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(GatewayError::NotFound(id))
    }
}
