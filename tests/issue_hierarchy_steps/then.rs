//! Then steps for issue hierarchy BDD scenarios.

use super::world::{IssueHierarchyWorld, run_async};
use projexa::issue::domain::IssueStatus;
use rstest_bdd_macros::then;

#[then("the change is rejected because children are unfinished")]
fn rejected_by_guard(world: &IssueHierarchyWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the status change to fail"))?;
    if !error.is_guard_violation() {
        return Err(eyre::eyre!("expected a guard violation, got {error:?}"));
    }
    if error.to_string() != "Finish all subtasks before moving to done" {
        return Err(eyre::eyre!("unexpected guard message: {error}"));
    }
    Ok(())
}

#[then("the creation is rejected as invalid input")]
fn rejected_as_validation(world: &IssueHierarchyWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the creation to fail"))?;
    if !error.is_validation() {
        return Err(eyre::eyre!("expected a validation error, got {error:?}"));
    }
    Ok(())
}

#[then(r#"issue "{title}" has status "{status}""#)]
fn issue_has_status(
    world: &IssueHierarchyWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let context = world.session()?;
    let expected = IssueStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let issue_id = world.issue(&title)?.id();
    let stored = run_async(world.service.find(&context, issue_id))?
        .ok_or_else(|| eyre::eyre!("issue {title:?} missing from the repository"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected {title:?} to be {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"issue "{title}" has {completed:usize} of {total:usize} children done"#)]
fn issue_completion(
    world: &IssueHierarchyWorld,
    title: String,
    completed: usize,
    total: usize,
) -> Result<(), eyre::Report> {
    let context = world.session()?;
    let issue_id = world.issue(&title)?.id();
    let summary = run_async(world.service.completion(&context, issue_id))?;

    if summary.completed != completed || summary.total != total {
        return Err(eyre::eyre!(
            "expected {completed}/{total} done, found {}/{}",
            summary.completed,
            summary.total
        ));
    }
    Ok(())
}

#[then(r#"the project holds {count:usize} issues"#)]
fn project_issue_count(world: &IssueHierarchyWorld, count: usize) -> Result<(), eyre::Report> {
    let context = world.session()?;
    let issues = run_async(world.service.list(&context))?;
    if issues.len() != count {
        return Err(eyre::eyre!("expected {count} issues, found {}", issues.len()));
    }
    Ok(())
}

#[then(r#"issue "{title}" has key "{key}""#)]
fn issue_has_key(
    world: &IssueHierarchyWorld,
    title: String,
    key: String,
) -> Result<(), eyre::Report> {
    let issue = world.issue(&title)?;
    if issue.key().to_string() != key {
        return Err(eyre::eyre!("expected key {key}, found {}", issue.key()));
    }
    Ok(())
}
