//! Shared world state for drag-and-drop BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use trestle::board::{
    adapters::memory::InMemoryMutationGateway,
    domain::{ActorRole, TaskId},
    services::{BoardController, DropOutcome, MoveResolution, StagedMove},
};

/// Controller type used by the BDD world.
pub type TestBoard = BoardController<InMemoryMutationGateway, DefaultClock>;

/// Scenario world for drag-and-drop behaviour tests.
pub struct DragDropWorld {
    pub controller: TestBoard,
    pub gateway: Arc<InMemoryMutationGateway>,
    pub task_id: Option<TaskId>,
    pub actor: ActorRole,
    pub staged: Option<StagedMove>,
    pub last_drop: Option<DropOutcome>,
    pub last_resolution: Option<MoveResolution>,
}

impl DragDropWorld {
    /// Creates a world with an empty board and a collaborator actor.
    #[must_use]
    pub fn new() -> Self {
        let gateway = Arc::new(InMemoryMutationGateway::new());
        let controller = BoardController::new(Arc::clone(&gateway), Arc::new(DefaultClock));

        Self {
            controller,
            gateway,
            task_id: None,
            actor: ActorRole::Collaborator,
            staged: None,
            last_drop: None,
            last_resolution: None,
        }
    }
}

impl Default for DragDropWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DragDropWorld {
    DragDropWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
