//! When steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, run_async, scenario_date};
use projexa::sprint::services::{CompleteSprintRequest, StartSprintRequest};
use rstest_bdd_macros::when;

#[when(r#"sprint "{name}" is started from {start} to {end}"#)]
fn start_sprint(
    world: &mut SprintWorld,
    name: String,
    start: String,
    end: String,
) -> Result<(), eyre::Report> {
    let sprint_id = world.sprint(&name)?.id();
    let request = StartSprintRequest::new(scenario_date(&start)?, scenario_date(&end)?);
    let result = run_async(world.sprint_service.start(&world.context, sprint_id, request));
    world.record(name, result);
    Ok(())
}

#[when(r#"sprint "{name}" is completed moving unfinished issues to "{destination}""#)]
fn complete_into_sprint(
    world: &mut SprintWorld,
    name: String,
    destination: String,
) -> Result<(), eyre::Report> {
    let sprint_id = world.sprint(&name)?.id();
    let destination_id = world.sprint(&destination)?.id();
    let request = CompleteSprintRequest::new().move_incomplete_issues_to(destination_id.to_string());
    let result = run_async(world.sprint_service.complete(&world.context, sprint_id, request));
    world.record(name, result.map(|outcome| outcome.sprint().clone()));
    Ok(())
}

#[when(r#"sprint "{name}" is completed moving unfinished issues to the backlog"#)]
fn complete_into_backlog(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    let sprint_id = world.sprint(&name)?.id();
    let request = CompleteSprintRequest::new().move_incomplete_issues_to("backlog");
    let result = run_async(world.sprint_service.complete(&world.context, sprint_id, request));
    world.record(name, result.map(|outcome| outcome.sprint().clone()));
    Ok(())
}
