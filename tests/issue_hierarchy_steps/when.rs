//! When steps for issue hierarchy BDD scenarios.

use super::world::{IssueHierarchyWorld, run_async};
use projexa::issue::{
    domain::{IssueStatus, IssueType},
    services::CreateIssueRequest,
};
use rstest_bdd_macros::when;

#[when(r#""{title}" is moved to "{status}""#)]
fn move_issue(
    world: &mut IssueHierarchyWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let context = world.session()?;
    let target = IssueStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let issue_id = world.issue(&title)?.id();

    match run_async(world.service.change_status(&context, issue_id, target)) {
        Ok(updated) => {
            world.issues.insert(title, updated);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when(r#"a {kind} "{title}" is created under "{parent}""#)]
fn create_child(
    world: &mut IssueHierarchyWorld,
    kind: String,
    title: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let context = world.session()?;
    let issue_type = IssueType::try_from(kind.as_str())
        .map_err(|err| eyre::eyre!("invalid issue type in scenario: {err}"))?;
    let parent_id = world.issue(&parent)?.id();

    let result = run_async(world.service.create(
        &context,
        CreateIssueRequest::new(title.clone(), issue_type).with_parent(parent_id),
    ));
    match result {
        Ok(created) => {
            world.issues.insert(title, created);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}
