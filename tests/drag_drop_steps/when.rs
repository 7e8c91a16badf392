//! When steps for drag-and-drop BDD scenarios.

use super::world::{DragDropWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use trestle::board::{domain::TaskStatus, services::DropOutcome};

#[when(r#"the task is dragged to "{target}""#)]
fn task_is_dragged(world: &mut DragDropWorld, target: String) -> Result<(), eyre::Report> {
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let target_status =
        TaskStatus::try_from(target.as_str()).wrap_err("parse scenario target status")?;

    world
        .controller
        .begin_drag(task_id, world.actor)
        .wrap_err("open drag session")?;
    let outcome = world.controller.drop_on(target_status, world.actor);
    if let DropOutcome::Staged(staged) = outcome {
        world.staged = Some(staged);
    }
    world.last_drop = Some(outcome);
    Ok(())
}

#[when("the move settles")]
fn move_settles(world: &mut DragDropWorld) -> Result<(), eyre::Report> {
    let staged = world
        .staged
        .take()
        .ok_or_else(|| eyre::eyre!("no staged move in scenario world"))?;
    world.last_resolution = run_async(world.controller.submit_move(staged));
    Ok(())
}
