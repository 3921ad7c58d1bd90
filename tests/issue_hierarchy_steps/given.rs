//! Given steps for issue hierarchy BDD scenarios.

use super::world::{IssueHierarchyWorld, run_async};
use eyre::WrapErr;
use projexa::issue::{domain::IssueType, services::CreateIssueRequest};
use rstest_bdd_macros::given;

#[given(r#"a project with key "{key}""#)]
fn project_with_key(world: &mut IssueHierarchyWorld, key: String) -> Result<(), eyre::Report> {
    world.select_project(&key)
}

#[given(r#"an epic "{title}""#)]
fn an_epic(world: &mut IssueHierarchyWorld, title: String) -> Result<(), eyre::Report> {
    let context = world.session()?;
    let created = run_async(
        world
            .service
            .create(&context, CreateIssueRequest::new(title.clone(), IssueType::Epic)),
    )
    .wrap_err("create epic in scenario setup")?;
    world.issues.insert(title, created);
    Ok(())
}

#[given(r#"a {kind} "{title}" under "{parent}""#)]
fn a_child_issue(
    world: &mut IssueHierarchyWorld,
    kind: String,
    title: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let context = world.session()?;
    let issue_type = IssueType::try_from(kind.as_str())
        .map_err(|err| eyre::eyre!("invalid issue type in scenario: {err}"))?;
    let parent_id = world.issue(&parent)?.id();
    let created = run_async(world.service.create(
        &context,
        CreateIssueRequest::new(title.clone(), issue_type).with_parent(parent_id),
    ))
    .wrap_err("create child issue in scenario setup")?;
    world.issues.insert(title, created);
    Ok(())
}
