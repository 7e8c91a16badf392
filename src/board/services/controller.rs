//! Board reconciliation controller.
//!
//! Owns the local card layout, arbitrates drag-and-drop against the
//! transition policy, and keeps the visual state consistent with eventual
//! server truth: a drop is optimistically repainted, the mutation is
//! dispatched, and settlement either commits the move or restores the exact
//! pre-drag snapshot. The board never shows a state the server did not
//! ultimately accept.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{
    domain::{
        self, ActorRole, DeletionPolicy, DragSession, Task, TaskDraft, TaskId, TaskPatch,
        TaskStatus,
    },
    ports::{GatewayError, MutationGateway},
};

/// Tuning knobs for a board instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Maximum age of a card's last sync before a drop on it is refused
    /// conservatively.
    pub staleness_limit: Duration,
    /// Statuses from which deletion is permitted.
    pub deletion_policy: DeletionPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            staleness_limit: Duration::seconds(30),
            deletion_policy: DeletionPolicy::default(),
        }
    }
}

/// Errors surfaced by board operations that are genuine failures rather
/// than policy refusals.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// The task is not on this board.
    #[error("task not on board: {0}")]
    UnknownTask(TaskId),

    /// The mutation gateway failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Refusals to open a drag session.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DragRejection {
    /// Another card's drag session is already open.
    #[error("another drag is already in progress for task {0}")]
    DragInProgress(TaskId),

    /// The card's previous move has not settled yet.
    #[error("task {0} has an unsettled move in flight")]
    MoveUnsettled(TaskId),

    /// The task is not on this board.
    #[error("task not on board: {0}")]
    UnknownTask(TaskId),

    /// The actor has no legal destination from the card's status, so a drag
    /// could never succeed.
    #[error("task {0} has no legal destinations for this actor")]
    NotDraggable(TaskId),
}

/// Outcome of dropping the dragged card onto a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The move was legal: the card has been optimistically repainted and a
    /// mutation must now be dispatched.
    Staged(StagedMove),
    /// Nothing to do: no drag was open, or the drop landed on the card's own
    /// column. No mutation is issued.
    Ignored,
    /// The drop was refused; the card snaps back and no mutation is issued.
    Rejected(DropRejection),
}

/// Reasons a drop is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// The dragged card is no longer on the board.
    UnknownTask(TaskId),
    /// The card's read-model snapshot is older than the staleness limit, so
    /// the move cannot be validated against fresh data.
    Stale(TaskId),
    /// The transition policy forbids the move for this actor.
    Disallowed {
        /// Card whose move was refused.
        task_id: TaskId,
        /// Current status at validation time.
        from: TaskStatus,
        /// Requested destination.
        to: TaskStatus,
    },
}

/// An optimistically applied move awaiting settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedMove {
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
}

impl StagedMove {
    /// Returns the moved card.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status the card held before the optimistic repaint.
    #[must_use]
    pub const fn source_status(&self) -> TaskStatus {
        self.from
    }

    /// Returns the optimistic destination status.
    #[must_use]
    pub const fn target_status(&self) -> TaskStatus {
        self.to
    }
}

/// Terminal resolution of a staged move.
#[derive(Debug, Clone)]
pub enum MoveResolution {
    /// The gateway accepted the move; the optimistic status is now
    /// authoritative.
    Committed(Task),
    /// The gateway refused the move; the pre-drag snapshot has been
    /// restored.
    Reverted {
        /// Card that was reverted.
        task_id: TaskId,
        /// Status the card was restored to.
        restored_status: TaskStatus,
        /// The settlement failure.
        error: GatewayError,
    },
}

/// Outcome of an edit-save request.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The gateway accepted the payload; the returned record is now on the
    /// board.
    Saved(Task),
    /// The payload carried a status change the policy forbids; nothing was
    /// sent to the gateway.
    Refused {
        /// Status at validation time.
        from: TaskStatus,
        /// Requested destination.
        to: TaskStatus,
    },
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The task was deleted and its card removed.
    Deleted,
    /// The deletion policy forbids deleting from the card's current status;
    /// nothing was sent to the gateway.
    Refused(TaskStatus),
}

/// A card with the read-model freshness of its backing record.
#[derive(Debug, Clone)]
struct BoardCard {
    task: Task,
    synced_at: DateTime<Utc>,
}

/// The exact pre-move card state, captured at drop time for revert.
#[derive(Debug, Clone)]
struct PendingMove {
    snapshot: Task,
    synced_at: DateTime<Utc>,
}

/// Board reconciliation controller.
///
/// The controller is the sole mutator of its local card map; every write to
/// the authoritative copy passes through the mutation gateway. One drag
/// session may be open at a time, while moves on distinct cards may be
/// pending concurrently; per card, the settlement of a move is what frees
/// the card for its next drag.
pub struct BoardController<G, C>
where
    G: MutationGateway,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    clock: Arc<C>,
    config: BoardConfig,
    cards: HashMap<TaskId, BoardCard>,
    order: Vec<TaskId>,
    drag: Option<DragSession>,
    pending: HashMap<TaskId, PendingMove>,
}

impl<G, C> BoardController<G, C>
where
    G: MutationGateway,
    C: Clock + Send + Sync,
{
    /// Creates a controller with default configuration.
    #[must_use]
    pub fn new(gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self::with_config(gateway, clock, BoardConfig::default())
    }

    /// Creates a controller with explicit configuration.
    #[must_use]
    pub fn with_config(gateway: Arc<G>, clock: Arc<C>, config: BoardConfig) -> Self {
        Self {
            gateway,
            clock,
            config,
            cards: HashMap::new(),
            order: Vec::new(),
            drag: None,
            pending: HashMap::new(),
        }
    }

    /// Seeds the board from the read model, replacing any prior layout.
    pub fn load(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.cards.clear();
        self.order.clear();
        self.drag = None;
        self.pending.clear();
        for task in tasks {
            self.put_card(task);
        }
    }

    /// Absorbs an authoritative task record, refreshing its card and its
    /// sync timestamp.
    ///
    /// This is also the landing point for poll- or push-driven concurrent
    /// updates arriving mid-drag.
    pub fn absorb(&mut self, task: Task) {
        self.put_card(task);
    }

    /// Returns the task backing a card.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.cards.get(&id).map(|card| &card.task)
    }

    /// Returns the cards resting in the given column, in stable board order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.order
            .iter()
            .filter_map(|id| self.cards.get(id))
            .filter(|card| card.task.status() == status)
            .map(|card| &card.task)
            .collect()
    }

    /// Returns whether the card has a move awaiting settlement.
    #[must_use]
    pub fn is_move_pending(&self, id: TaskId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Returns the open drag session, if any.
    #[must_use]
    pub const fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Opens a drag session for a card.
    ///
    /// The actor's privilege is read at call time, never cached. A card with
    /// zero legal destinations never starts a drag, and a card whose
    /// previous move has not settled stays locked even though every other
    /// card remains draggable.
    ///
    /// # Errors
    ///
    /// Returns a [`DragRejection`] describing why the drag cannot open.
    pub fn begin_drag(&mut self, id: TaskId, actor: ActorRole) -> Result<&DragSession, DragRejection> {
        if let Some(active) = &self.drag {
            return Err(DragRejection::DragInProgress(active.task_id()));
        }
        if self.pending.contains_key(&id) {
            return Err(DragRejection::MoveUnsettled(id));
        }
        let card = self
            .cards
            .get(&id)
            .ok_or(DragRejection::UnknownTask(id))?;
        let status = card.task.status();
        if domain::allowed_transitions(status, actor).is_empty() {
            return Err(DragRejection::NotDraggable(id));
        }

        let session = DragSession::new(id, status, self.clock.utc());
        debug!(task_id = %id, source = %status, "drag session opened");
        Ok(self.drag.insert(session))
    }

    /// Destroys the drag session unconditionally.
    ///
    /// Covers cancelled drags, drops outside any column, and drops on the
    /// source column. Never issues a mutation.
    pub const fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Drops the dragged card onto a column.
    ///
    /// The session is consumed whatever the outcome. Legality is
    /// re-validated against the card's *current* status, not the one
    /// captured at drag-start, so an update landing mid-drag cannot be
    /// overwritten by a decision made against stale data; a card whose
    /// snapshot is older than the staleness limit is refused outright. Only
    /// a staged outcome issues a mutation, and the mutation carries a
    /// status-only patch.
    pub fn drop_on(&mut self, target: TaskStatus, actor: ActorRole) -> DropOutcome {
        let Some(session) = self.drag.take() else {
            return DropOutcome::Ignored;
        };
        let id = session.task_id();
        let now = self.clock.utc();

        let Some(card) = self.cards.get_mut(&id) else {
            warn!(task_id = %id, "drop refused: card vanished mid-drag");
            return DropOutcome::Rejected(DropRejection::UnknownTask(id));
        };
        if now - card.synced_at > self.config.staleness_limit {
            warn!(task_id = %id, "drop refused: read model stale beyond limit");
            return DropOutcome::Rejected(DropRejection::Stale(id));
        }

        let from = card.task.status();
        if from == target {
            return DropOutcome::Ignored;
        }
        if !domain::can_transition(from, target, actor) {
            debug!(task_id = %id, %from, to = %target, "drop refused by transition policy");
            return DropOutcome::Rejected(DropRejection::Disallowed {
                task_id: id,
                from,
                to: target,
            });
        }

        let snapshot = card.task.clone();
        let synced_at = card.synced_at;
        card.task.apply_patch(&TaskPatch::status_only(target));
        self.pending.insert(id, PendingMove { snapshot, synced_at });
        debug!(task_id = %id, %from, to = %target, "move staged optimistically");
        DropOutcome::Staged(StagedMove {
            task_id: id,
            from,
            to: target,
        })
    }

    /// Settles a pending move.
    ///
    /// Always clears the pending marker, freeing the card for its next
    /// drag. On success the authoritative record is absorbed; on failure
    /// the pre-move snapshot is restored exactly, leaving the board
    /// indistinguishable from one where the drag never happened. Settling a
    /// card with no pending move is a no-op.
    pub fn settle_move(
        &mut self,
        id: TaskId,
        outcome: Result<Task, GatewayError>,
    ) -> Option<MoveResolution> {
        let pending_move = self.pending.remove(&id)?;
        match outcome {
            Ok(task) => {
                self.put_card(task.clone());
                Some(MoveResolution::Committed(task))
            }
            Err(error) => {
                let restored_status = pending_move.snapshot.status();
                warn!(task_id = %id, restored = %restored_status, %error, "move reverted");
                self.cards.insert(
                    id,
                    BoardCard {
                        task: pending_move.snapshot,
                        synced_at: pending_move.synced_at,
                    },
                );
                Some(MoveResolution::Reverted {
                    task_id: id,
                    restored_status,
                    error,
                })
            }
        }
    }

    /// Dispatches a staged move through the gateway and settles it.
    ///
    /// Returns `None` when the move is no longer pending (already settled).
    pub async fn submit_move(&mut self, staged: StagedMove) -> Option<MoveResolution> {
        let outcome = self
            .gateway
            .update(staged.task_id(), TaskPatch::status_only(staged.target_status()))
            .await;
        self.settle_move(staged.task_id(), outcome)
    }

    /// Returns the statuses the detail editor may offer for a card.
    ///
    /// The current status comes first so "no change" is always selectable,
    /// followed by the actor's legal destinations.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the card is not on the
    /// board.
    pub fn status_choices(&self, id: TaskId, actor: ActorRole) -> BoardResult<Vec<TaskStatus>> {
        let current = self
            .task(id)
            .ok_or(BoardError::UnknownTask(id))?
            .status();
        let mut choices = vec![current];
        choices.extend(domain::allowed_transitions(current, actor));
        Ok(choices)
    }

    /// Saves a detail-editor payload.
    ///
    /// When the patch changes status, the transition is re-checked against
    /// the current status and the current actor even though the selector
    /// already filtered the choices: a privilege change mid-edit must not
    /// slip through on stale selector state. A refused save sends nothing
    /// to the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the card is not on the
    /// board, or [`BoardError::Gateway`] when the gateway fails; the board
    /// is unchanged in either case.
    pub async fn save_edit(
        &mut self,
        id: TaskId,
        patch: TaskPatch,
        actor: ActorRole,
    ) -> BoardResult<SaveOutcome> {
        let current = self
            .task(id)
            .ok_or(BoardError::UnknownTask(id))?
            .status();
        if let Some(to) = patch.status()
            && to != current
            && !domain::can_transition(current, to, actor)
        {
            debug!(task_id = %id, from = %current, %to, "edit-save refused by transition policy");
            return Ok(SaveOutcome::Refused { from: current, to });
        }

        let saved = self.gateway.update(id, patch).await?;
        self.put_card(saved.clone());
        Ok(SaveOutcome::Saved(saved))
    }

    /// Creates a task through the gateway and places its card on the board.
    ///
    /// Every created task enters at [`TaskStatus::Todo`]; the draft carries
    /// no status field. Never invoked from the drag path.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the gateway refuses the draft.
    pub async fn create_task(&mut self, draft: TaskDraft) -> BoardResult<Task> {
        let created = self.gateway.create(draft).await?;
        self.put_card(created.clone());
        Ok(created)
    }

    /// Deletes a task if the deletion policy permits its current status.
    ///
    /// A refusal sends nothing to the gateway. Ownership authorization is
    /// the hosting collaborator's concern, not this controller's.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the card is not on the
    /// board, or [`BoardError::Gateway`] when the gateway fails.
    pub async fn delete_task(&mut self, id: TaskId) -> BoardResult<DeleteOutcome> {
        let status = self
            .task(id)
            .ok_or(BoardError::UnknownTask(id))?
            .status();
        if !self.config.deletion_policy.can_delete(status) {
            debug!(task_id = %id, %status, "delete refused by deletion policy");
            return Ok(DeleteOutcome::Refused(status));
        }

        self.gateway.delete(id).await?;
        self.remove_card(id);
        Ok(DeleteOutcome::Deleted)
    }

    /// Inserts or refreshes a card, stamping it with the current clock.
    fn put_card(&mut self, task: Task) {
        let id = task.id();
        let synced_at = self.clock.utc();
        if self.cards.insert(id, BoardCard { task, synced_at }).is_none() {
            self.order.push(id);
        }
    }

    fn remove_card(&mut self, id: TaskId) {
        self.cards.remove(&id);
        self.order.retain(|existing| *existing != id);
        self.pending.remove(&id);
        if self.drag.is_some_and(|session| session.task_id() == id) {
            self.drag = None;
        }
    }
}
