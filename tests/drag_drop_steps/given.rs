//! Given steps for drag-and-drop BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use trestle::board::{
    adapters::memory::InMemoryMutationGateway,
    domain::{
        ActorRole, PersistedTaskData, Task, TaskId, TaskPriority, TaskSize, TaskStatus, TaskTitle,
    },
    services::BoardController,
};

use super::world::DragDropWorld;

#[given(r#"a board with a task "{title}" in status "{status}""#)]
fn board_with_task(
    world: &mut DragDropWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let parsed_status =
        TaskStatus::try_from(status.as_str()).wrap_err("parse scenario status")?;
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        status: parsed_status,
        size: TaskSize::M,
        priority: TaskPriority::Medium,
        title: TaskTitle::new(title).wrap_err("build scenario title")?,
        description: None,
        due_date: None,
        assigned_to: None,
    });

    world.task_id = Some(task.id());
    world.gateway = Arc::new(
        InMemoryMutationGateway::with_tasks([task.clone()]).wrap_err("seed scenario gateway")?,
    );
    world.controller =
        BoardController::new(Arc::clone(&world.gateway), Arc::new(DefaultClock));
    world.controller.load([task]);
    Ok(())
}

#[given("the actor is a collaborator")]
fn actor_is_collaborator(world: &mut DragDropWorld) {
    world.actor = ActorRole::Collaborator;
}

#[given("the actor is an owner")]
fn actor_is_owner(world: &mut DragDropWorld) {
    world.actor = ActorRole::Owner;
}

#[given("the gateway will reject the next update")]
fn gateway_rejects_next_update(world: &mut DragDropWorld) -> Result<(), eyre::Report> {
    world
        .gateway
        .reject_next_update("scenario rejection")
        .wrap_err("script gateway rejection")?;
    Ok(())
}
