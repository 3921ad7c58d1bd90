//! In-memory integration tests for sprint lifecycle operations.

use super::helpers::{Workbench, april, bench};
use projexa::{
    config::ProjexaConfig,
    issue::{
        domain::{Issue, IssueStatus, IssueType},
        services::CreateIssueRequest,
    },
    sprint::{
        domain::{SprintId, SprintStatus},
        services::{CompleteSprintRequest, CreateSprintRequest, StartSprintRequest},
    },
};
use rstest::rstest;

async fn planned_issue(
    bench: &Workbench,
    title: &str,
    sprint_id: SprintId,
    status: IssueStatus,
) -> Result<Issue, eyre::Report> {
    let ctx = &bench.context;
    let issue = bench
        .issues
        .create(ctx, CreateIssueRequest::new(title, IssueType::Task))
        .await?;
    bench
        .sprints
        .assign_issue(ctx, issue.id(), Some(sprint_id))
        .await?;
    if status != IssueStatus::Todo {
        bench.issues.change_status(ctx, issue.id(), status).await?;
    }
    let refreshed = bench
        .issues
        .find(ctx, issue.id())
        .await?
        .ok_or_else(|| eyre::eyre!("issue {} vanished", issue.key()))?;
    Ok(refreshed)
}

async fn sprint_of(bench: &Workbench, issue: &Issue) -> Result<Option<SprintId>, eyre::Report> {
    let stored = bench
        .issues
        .find(&bench.context, issue.id())
        .await?
        .ok_or_else(|| eyre::eyre!("issue {} vanished", issue.key()))?;
    Ok(stored.sprint_id())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_sprint_cycle_carries_work_forward(bench: Workbench) -> Result<(), eyre::Report> {
    let ctx = &bench.context;
    let first = bench
        .sprints
        .create(ctx, CreateSprintRequest::new("Sprint 1").with_goal("Beta"))
        .await?;
    let second = bench
        .sprints
        .create(ctx, CreateSprintRequest::new("Sprint 2"))
        .await?;

    let shipped = planned_issue(&bench, "Ship login", first.id(), IssueStatus::Done).await?;
    let pending = planned_issue(&bench, "Ship signup", first.id(), IssueStatus::InProgress).await?;
    let todo = planned_issue(&bench, "Ship reset", first.id(), IssueStatus::Todo).await?;

    bench
        .sprints
        .start(ctx, first.id(), StartSprintRequest::new(april(1), april(14)))
        .await?;
    let outcome = bench
        .sprints
        .complete(
            ctx,
            first.id(),
            CompleteSprintRequest::new().move_incomplete_issues_to(second.id().to_string()),
        )
        .await?;

    eyre::ensure!(outcome.sprint().status() == SprintStatus::Completed);
    eyre::ensure!(outcome.moved() == [pending.id(), todo.id()]);
    eyre::ensure!(sprint_of(&bench, &shipped).await? == Some(first.id()));
    eyre::ensure!(sprint_of(&bench, &pending).await? == Some(second.id()));
    eyre::ensure!(sprint_of(&bench, &todo).await? == Some(second.id()));

    let started = bench
        .sprints
        .start(ctx, second.id(), StartSprintRequest::new(april(15), april(28)))
        .await?;
    eyre::ensure!(started.status() == SprintStatus::Active);
    eyre::ensure!(bench.sprints.active(ctx).await? == Some(started));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backlog_is_the_default_destination(bench: Workbench) -> Result<(), eyre::Report> {
    let ctx = &bench.context;
    let sprint = bench
        .sprints
        .create(ctx, CreateSprintRequest::new("Sprint 1"))
        .await?;
    let open = planned_issue(&bench, "Open", sprint.id(), IssueStatus::Todo).await?;
    bench
        .sprints
        .start(ctx, sprint.id(), StartSprintRequest::new(april(1), april(14)))
        .await?;

    bench
        .sprints
        .complete(ctx, sprint.id(), CompleteSprintRequest::new())
        .await?;
    eyre::ensure!(sprint_of(&bench, &open).await?.is_none());
    eyre::ensure!(bench.sprints.active(ctx).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_sprints_stay_completed(bench: Workbench) -> Result<(), eyre::Report> {
    let ctx = &bench.context;
    let sprint = bench
        .sprints
        .create(ctx, CreateSprintRequest::new("Sprint 1"))
        .await?;
    bench
        .sprints
        .start(ctx, sprint.id(), StartSprintRequest::new(april(1), april(14)))
        .await?;
    bench
        .sprints
        .complete(ctx, sprint.id(), CompleteSprintRequest::new())
        .await?;

    let restart = bench
        .sprints
        .start(ctx, sprint.id(), StartSprintRequest::new(april(15), april(28)))
        .await;
    eyre::ensure!(restart.as_ref().is_err_and(|error| error.is_guard_violation()));

    let recomplete = bench
        .sprints
        .complete(ctx, sprint.id(), CompleteSprintRequest::new())
        .await;
    eyre::ensure!(recomplete.is_err());

    let listed = bench.sprints.list(ctx).await?;
    eyre::ensure!(listed.len() == 1);
    eyre::ensure!(
        listed
            .first()
            .is_some_and(|stored| stored.status() == SprintStatus::Completed)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn parallel_sprints_follow_configuration() -> Result<(), eyre::Report> {
    let mut config = ProjexaConfig::default();
    config.lifecycle.single_active_sprint = false;
    let bench = Workbench::new(&config);
    let ctx = &bench.context;

    for name in ["Team A", "Team B"] {
        let sprint = bench
            .sprints
            .create(ctx, CreateSprintRequest::new(name))
            .await?;
        bench
            .sprints
            .start(ctx, sprint.id(), StartSprintRequest::new(april(1), april(14)))
            .await?;
    }
    let active = bench
        .sprints
        .list(ctx)
        .await?
        .into_iter()
        .filter(|sprint| sprint.status() == SprintStatus::Active)
        .count();
    eyre::ensure!(active == 2);
    Ok(())
}
