//! Then steps for sprint lifecycle BDD scenarios.

use super::world::{SprintWorld, run_async};
use projexa::sprint::domain::SprintStatus;
use rstest_bdd_macros::then;

#[then(r#"sprint "{name}" has status "{status}""#)]
fn sprint_has_status(
    world: &SprintWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = SprintStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid sprint status in scenario: {err}"))?;
    let sprint_id = world.sprint(&name)?.id();
    let stored = run_async(world.sprint_service.find(&world.context, sprint_id))?
        .ok_or_else(|| eyre::eyre!("sprint {name:?} missing from the repository"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected {name:?} to be {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"issue "{title}" belongs to sprint "{sprint}""#)]
fn issue_in_sprint(
    world: &SprintWorld,
    title: String,
    sprint: String,
) -> Result<(), eyre::Report> {
    let expected = world.sprint(&sprint)?.id();
    let issue_id = world.issue(&title)?.id();
    let stored = run_async(world.issue_service.find(&world.context, issue_id))?
        .ok_or_else(|| eyre::eyre!("issue {title:?} missing from the repository"))?;

    if stored.sprint_id() != Some(expected) {
        return Err(eyre::eyre!(
            "expected {title:?} in {sprint:?}, found {:?}",
            stored.sprint_id()
        ));
    }
    Ok(())
}

#[then(r#"issue "{title}" is in the backlog"#)]
fn issue_in_backlog(world: &SprintWorld, title: String) -> Result<(), eyre::Report> {
    let issue_id = world.issue(&title)?.id();
    let stored = run_async(world.issue_service.find(&world.context, issue_id))?
        .ok_or_else(|| eyre::eyre!("issue {title:?} missing from the repository"))?;

    if let Some(sprint_id) = stored.sprint_id() {
        return Err(eyre::eyre!("expected {title:?} in the backlog, found {sprint_id}"));
    }
    Ok(())
}

#[then("the sprint request is rejected by a lifecycle guard")]
fn rejected_by_guard(world: &SprintWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the sprint request to fail"))?;
    if !error.is_guard_violation() {
        return Err(eyre::eyre!("expected a guard violation, got {error:?}"));
    }
    Ok(())
}

#[then("the sprint request is rejected as invalid input")]
fn rejected_as_validation(world: &SprintWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the sprint request to fail"))?;
    if !error.is_validation() {
        return Err(eyre::eyre!("expected a validation error, got {error:?}"));
    }
    if error.to_string() != "End date must be after start date" {
        return Err(eyre::eyre!("unexpected validation message: {error}"));
    }
    Ok(())
}
