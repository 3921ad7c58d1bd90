//! In-memory integration tests for issue attachments.

use super::helpers::{Workbench, bench, session};
use projexa::{
    attachment::{domain::FileUpload, services::AttachmentServiceError},
    issue::{
        domain::{AttachmentKind, IssueType},
        services::CreateIssueRequest,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploaded_file_is_served_from_public_base_url(
    bench: Workbench,
) -> Result<(), eyre::Report> {
    let ctx = &bench.context;
    let issue = bench
        .issues
        .create(ctx, CreateIssueRequest::new("Brand refresh", IssueType::Story))
        .await?;

    let updated = bench
        .attachments
        .attach_file(
            ctx,
            issue.id(),
            FileUpload::new("palette.pdf", "application/pdf", b"%PDF-1.7".to_vec())?,
        )
        .await?;
    let attachment = updated
        .attachments()
        .first()
        .ok_or_else(|| eyre::eyre!("attachment missing"))?;
    eyre::ensure!(attachment.kind() == AttachmentKind::File);
    eyre::ensure!(attachment.url().starts_with("https://files.projexa.local/"));

    let stored = bench
        .storage
        .stored_object(attachment.url())?
        .ok_or_else(|| eyre::eyre!("object missing from storage"))?;
    eyre::ensure!(stored.content_type == "application/pdf");

    let reloaded = bench
        .issues
        .find(ctx, issue.id())
        .await?
        .ok_or_else(|| eyre::eyre!("issue vanished"))?;
    eyre::ensure!(reloaded.attachments() == updated.attachments());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attachments_are_scoped_to_the_session_project(
    bench: Workbench,
) -> Result<(), eyre::Report> {
    let issue = bench
        .issues
        .create(
            &bench.context,
            CreateIssueRequest::new("Internal", IssueType::Task),
        )
        .await?;

    let result = bench
        .attachments
        .attach_link(&session("OPS"), issue.id(), "https://example.com", "Example")
        .await;
    eyre::ensure!(matches!(
        result,
        Err(AttachmentServiceError::IssueNotFound(id)) if id == issue.id()
    ));
    Ok(())
}
