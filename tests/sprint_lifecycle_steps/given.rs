//! Given steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, run_async, scenario_date};
use eyre::WrapErr;
use projexa::{
    issue::{
        domain::{IssueStatus, IssueType},
        services::CreateIssueRequest,
    },
    sprint::services::{CompleteSprintRequest, CreateSprintRequest, StartSprintRequest},
};
use rstest_bdd_macros::given;

#[given(r#"a planned sprint "{name}""#)]
fn planned_sprint(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .sprint_service
            .create(&world.context, CreateSprintRequest::new(name.clone())),
    )
    .wrap_err("create sprint in scenario setup")?;
    world.sprints.insert(name, created);
    Ok(())
}

#[given(r#"a "{status}" issue "{title}" in sprint "{sprint}""#)]
fn issue_in_sprint(
    world: &mut SprintWorld,
    status: String,
    title: String,
    sprint: String,
) -> Result<(), eyre::Report> {
    let target = IssueStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let sprint_id = world.sprint(&sprint)?.id();

    let created = run_async(world.issue_service.create(
        &world.context,
        CreateIssueRequest::new(title.clone(), IssueType::Task).with_status(target),
    ))
    .wrap_err("create issue in scenario setup")?;
    let assigned = run_async(world.sprint_service.assign_issue(
        &world.context,
        created.id(),
        Some(sprint_id),
    ))
    .wrap_err("assign issue in scenario setup")?;
    world.issues.insert(title, assigned);
    Ok(())
}

#[given(r#"sprint "{name}" runs from {start} to {end}"#)]
fn sprint_running(
    world: &mut SprintWorld,
    name: String,
    start: String,
    end: String,
) -> Result<(), eyre::Report> {
    let sprint_id = world.sprint(&name)?.id();
    let request = StartSprintRequest::new(scenario_date(&start)?, scenario_date(&end)?);
    let started = run_async(world.sprint_service.start(&world.context, sprint_id, request))
        .wrap_err("start sprint in scenario setup")?;
    world.sprints.insert(name, started);
    Ok(())
}

#[given(r#"sprint "{name}" has been completed"#)]
fn sprint_completed(world: &mut SprintWorld, name: String) -> Result<(), eyre::Report> {
    let sprint_id = world.sprint(&name)?.id();
    let outcome = run_async(world.sprint_service.complete(
        &world.context,
        sprint_id,
        CompleteSprintRequest::new(),
    ))
    .wrap_err("complete sprint in scenario setup")?;
    world.sprints.insert(name, outcome.sprint().clone());
    Ok(())
}
