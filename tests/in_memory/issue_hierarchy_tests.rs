//! In-memory integration tests for issue hierarchy operations.

use super::helpers::{Workbench, bench};
use projexa::issue::{
    domain::{IssueStatus, IssueType},
    services::{CreateIssueRequest, IssueServiceError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn launch_epic_end_to_end(bench: Workbench) -> Result<(), eyre::Report> {
    let ctx = &bench.context;
    let launch = bench
        .issues
        .create(ctx, CreateIssueRequest::new("Launch", IssueType::Epic))
        .await?;
    eyre::ensure!(launch.parent_id().is_none());

    let choices = bench.issues.allowed_child_types(ctx, Some(launch.id())).await?;
    eyre::ensure!(choices == [IssueType::Story, IssueType::Task, IssueType::Bug]);
    let design = bench
        .issues
        .create(
            ctx,
            CreateIssueRequest::new("Design", IssueType::Story).with_parent(launch.id()),
        )
        .await?;

    let subtask_choices = bench.issues.allowed_child_types(ctx, Some(design.id())).await?;
    eyre::ensure!(subtask_choices == [IssueType::Subtask]);
    let wireframes = bench
        .issues
        .create(
            ctx,
            CreateIssueRequest::new("Wireframes", IssueType::Subtask).with_parent(design.id()),
        )
        .await?;

    let rejected = bench
        .issues
        .change_status(ctx, design.id(), IssueStatus::Done)
        .await;
    let Err(error) = rejected else {
        eyre::bail!("Design must not move to done while Wireframes is open");
    };
    eyre::ensure!(error.to_string() == "Finish all subtasks before moving to done");

    bench
        .issues
        .change_status(ctx, wireframes.id(), IssueStatus::Done)
        .await?;
    let design_done = bench
        .issues
        .change_status(ctx, design.id(), IssueStatus::Done)
        .await?;
    eyre::ensure!(design_done.status() == IssueStatus::Done);

    let progress = bench.issues.completion(ctx, launch.id()).await?;
    eyre::ensure!(progress.completed == 1 && progress.total == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_under_epic_is_rejected(bench: Workbench) -> Result<(), eyre::Report> {
    let ctx = &bench.context;
    let epic = bench
        .issues
        .create(ctx, CreateIssueRequest::new("Launch", IssueType::Epic))
        .await?;

    let result = bench
        .issues
        .create(
            ctx,
            CreateIssueRequest::new("Too deep", IssueType::Subtask).with_parent(epic.id()),
        )
        .await;
    let Err(error) = result else {
        eyre::bail!("subtask directly under an epic must be rejected");
    };
    eyre::ensure!(error.is_validation());
    eyre::ensure!(bench.issues.list(ctx).await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reopening_a_done_parent_is_allowed(bench: Workbench) -> Result<(), eyre::Report> {
    let ctx = &bench.context;
    let story = bench
        .issues
        .create(
            ctx,
            CreateIssueRequest::new("Design", IssueType::Story).with_status(IssueStatus::Done),
        )
        .await?;
    bench
        .issues
        .create(
            ctx,
            CreateIssueRequest::new("Late subtask", IssueType::Subtask).with_parent(story.id()),
        )
        .await?;

    let reopened = bench
        .issues
        .change_status(ctx, story.id(), IssueStatus::InProgress)
        .await?;
    eyre::ensure!(reopened.status() == IssueStatus::InProgress);

    let result = bench
        .issues
        .change_status(ctx, story.id(), IssueStatus::Done)
        .await;
    eyre::ensure!(result.as_ref().is_err_and(IssueServiceError::is_guard_violation));
    Ok(())
}
