//! Then steps for drag-and-drop BDD scenarios.

use super::world::DragDropWorld;
use eyre::WrapErr;
use rstest_bdd_macros::then;
use trestle::board::{
    domain::TaskStatus,
    services::{DropOutcome, MoveResolution},
};

#[then(r#"the task rests in "{status}""#)]
fn task_rests_in(world: &DragDropWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str()).wrap_err("parse expected status")?;
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let task = world
        .controller
        .task(task_id)
        .ok_or_else(|| eyre::eyre!("task missing from board"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the board has no pending move")]
fn board_has_no_pending_move(world: &DragDropWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    if world.controller.is_move_pending(task_id) {
        return Err(eyre::eyre!("move still pending after settlement"));
    }
    Ok(())
}

#[then("the move was committed")]
fn move_was_committed(world: &DragDropWorld) -> Result<(), eyre::Report> {
    match world.last_resolution {
        Some(MoveResolution::Committed(_)) => Ok(()),
        ref other => Err(eyre::eyre!("expected committed move, got {other:?}")),
    }
}

#[then("the move was reverted")]
fn move_was_reverted(world: &DragDropWorld) -> Result<(), eyre::Report> {
    match world.last_resolution {
        Some(MoveResolution::Reverted { .. }) => Ok(()),
        ref other => Err(eyre::eyre!("expected reverted move, got {other:?}")),
    }
}

#[then("the drop is rejected")]
fn drop_is_rejected(world: &DragDropWorld) -> Result<(), eyre::Report> {
    match world.last_drop {
        Some(DropOutcome::Rejected(_)) => Ok(()),
        ref other => Err(eyre::eyre!("expected rejected drop, got {other:?}")),
    }
}

#[then("the drop is ignored")]
fn drop_is_ignored(world: &DragDropWorld) -> Result<(), eyre::Report> {
    match world.last_drop {
        Some(DropOutcome::Ignored) => Ok(()),
        ref other => Err(eyre::eyre!("expected ignored drop, got {other:?}")),
    }
}

#[then("the gateway received no update calls")]
fn gateway_received_no_updates(world: &DragDropWorld) -> Result<(), eyre::Report> {
    let updates = world
        .gateway
        .recorded_updates()
        .wrap_err("read gateway update log")?;
    if !updates.is_empty() {
        return Err(eyre::eyre!("gateway saw {} update call(s)", updates.len()));
    }
    Ok(())
}
