//! `PostgreSQL` repository implementation for issue storage.

use super::{
    models::{IssueChangeset, IssueRow, NewIssueRow},
    schema::{issues, project_issue_counters},
};
use crate::issue::{
    domain::{
        Attachment, Issue, IssueId, IssueKey, IssueNumber, IssueStatus, IssueType,
        PersistedIssueData,
    },
    ports::{IssueRepository, IssueRepositoryError, IssueRepositoryResult},
};
use crate::sprint::domain::SprintId;
use crate::workspace::domain::{ProjectId, ProjectKey, UserId, WorkspaceId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by issue adapters.
pub type IssuePgPool = Pool<ConnectionManager<PgConnection>>;

const ISSUE_KEY_UNIQUE_CONSTRAINT: &str = "idx_issues_project_key_unique";

/// `PostgreSQL`-backed issue repository.
#[derive(Debug, Clone)]
pub struct PostgresIssueRepository {
    pool: IssuePgPool,
}

impl PostgresIssueRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IssuePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> IssueRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> IssueRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(IssueRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(IssueRepositoryError::persistence)?
    }
}

impl From<DieselError> for IssueRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn next_issue_number(&self, project_id: ProjectId) -> IssueRepositoryResult<IssueNumber> {
        self.run_blocking(move |connection| {
            let last_number = diesel::insert_into(project_issue_counters::table)
                .values((
                    project_issue_counters::project_id.eq(project_id.into_inner()),
                    project_issue_counters::last_number.eq(1_i64),
                ))
                .on_conflict(project_issue_counters::project_id)
                .do_update()
                .set(
                    project_issue_counters::last_number
                        .eq(project_issue_counters::last_number + 1_i64),
                )
                .returning(project_issue_counters::last_number)
                .get_result::<i64>(connection)?;
            let value = u64::try_from(last_number).map_err(IssueRepositoryError::persistence)?;
            IssueNumber::new(value).map_err(IssueRepositoryError::persistence)
        })
        .await
    }

    async fn store(&self, issue: &Issue) -> IssueRepositoryResult<()> {
        let issue_id = issue.id();
        let issue_key = issue.key().clone();
        let new_row = to_new_row(issue)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(issues::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_issue_key_unique_violation(info.as_ref()) =>
                    {
                        IssueRepositoryError::DuplicateKey(issue_key.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        IssueRepositoryError::DuplicateIssue(issue_id)
                    }
                    _ => IssueRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, issue: &Issue) -> IssueRepositoryResult<()> {
        let issue_id = issue.id();
        let changeset = to_changeset(issue)?;

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(issues::table.filter(issues::id.eq(issue_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)?;
            if updated == 0 {
                return Err(IssueRepositoryError::NotFound(issue_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_many(&self, issue_ids: &[IssueId]) -> IssueRepositoryResult<()> {
        let ids = issue_ids.to_vec();
        self.run_blocking(move |connection| {
            connection.transaction::<_, IssueRepositoryError, _>(|transaction| {
                ensure_all_exist(transaction, &ids)?;
                let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
                diesel::delete(issues::table.filter(issues::id.eq_any(uuids)))
                    .execute(transaction)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>> {
        self.run_blocking(move |connection| {
            let row = issues::table
                .filter(issues::id.eq(id.into_inner()))
                .select(IssueRow::as_select())
                .first::<IssueRow>(connection)
                .optional()?;
            row.map(row_to_issue).transpose()
        })
        .await
    }

    async fn find_by_key(
        &self,
        project_id: ProjectId,
        key: &IssueKey,
    ) -> IssueRepositoryResult<Option<Issue>> {
        let prefix = key.project_key().as_str().to_owned();
        let number =
            i64::try_from(key.number().value()).map_err(IssueRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let row = issues::table
                .filter(issues::project_id.eq(project_id.into_inner()))
                .filter(issues::key_prefix.eq(prefix))
                .filter(issues::key_number.eq(number))
                .select(IssueRow::as_select())
                .first::<IssueRow>(connection)
                .optional()?;
            row.map(row_to_issue).transpose()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> IssueRepositoryResult<Vec<Issue>> {
        self.run_blocking(move |connection| {
            issues::table
                .filter(issues::project_id.eq(project_id.into_inner()))
                .order((issues::created_at.asc(), issues::key_number.asc()))
                .select(IssueRow::as_select())
                .load::<IssueRow>(connection)?
                .into_iter()
                .map(row_to_issue)
                .collect()
        })
        .await
    }

    async fn list_by_sprint(&self, sprint_id: SprintId) -> IssueRepositoryResult<Vec<Issue>> {
        self.run_blocking(move |connection| {
            issues::table
                .filter(issues::sprint_id.eq(sprint_id.into_inner()))
                .order((issues::created_at.asc(), issues::key_number.asc()))
                .select(IssueRow::as_select())
                .load::<IssueRow>(connection)?
                .into_iter()
                .map(row_to_issue)
                .collect()
        })
        .await
    }

    async fn reassign_sprint(
        &self,
        issue_ids: &[IssueId],
        sprint_id: Option<SprintId>,
        updated_at: DateTime<Utc>,
    ) -> IssueRepositoryResult<()> {
        let ids = issue_ids.to_vec();
        let target = sprint_id.map(SprintId::into_inner);
        self.run_blocking(move |connection| {
            connection.transaction::<_, IssueRepositoryError, _>(|transaction| {
                ensure_all_exist(transaction, &ids)?;
                let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
                diesel::update(issues::table.filter(issues::id.eq_any(uuids)))
                    .set((
                        issues::sprint_id.eq(target),
                        issues::updated_at.eq(updated_at),
                    ))
                    .execute(transaction)?;
                Ok(())
            })
        })
        .await
    }
}

fn ensure_all_exist(connection: &mut PgConnection, ids: &[IssueId]) -> IssueRepositoryResult<()> {
    let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
    let existing: Vec<uuid::Uuid> = issues::table
        .filter(issues::id.eq_any(uuids))
        .select(issues::id)
        .load(connection)?;
    match ids.iter().find(|id| !existing.contains(&id.into_inner())) {
        Some(missing) => Err(IssueRepositoryError::NotFound(*missing)),
        None => Ok(()),
    }
}

fn to_new_row(issue: &Issue) -> IssueRepositoryResult<NewIssueRow> {
    let key_number =
        i64::try_from(issue.key().number().value()).map_err(IssueRepositoryError::persistence)?;
    let attachments =
        serde_json::to_value(issue.attachments()).map_err(IssueRepositoryError::persistence)?;

    Ok(NewIssueRow {
        id: issue.id().into_inner(),
        workspace_id: issue.workspace_id().into_inner(),
        project_id: issue.project_id().into_inner(),
        key_prefix: issue.key().project_key().as_str().to_owned(),
        key_number,
        title: issue.title().to_owned(),
        description: issue.description().map(str::to_owned),
        issue_type: issue.issue_type().as_str().to_owned(),
        status: issue.status().as_str().to_owned(),
        parent_id: issue.parent_id().map(IssueId::into_inner),
        sprint_id: issue.sprint_id().map(SprintId::into_inner),
        assignee_id: issue.assignee_id().map(UserId::into_inner),
        start_date: issue.start_date(),
        end_date: issue.end_date(),
        attachments,
        created_at: issue.created_at(),
        updated_at: issue.updated_at(),
    })
}

fn to_changeset(issue: &Issue) -> IssueRepositoryResult<IssueChangeset> {
    let attachments =
        serde_json::to_value(issue.attachments()).map_err(IssueRepositoryError::persistence)?;

    Ok(IssueChangeset {
        title: issue.title().to_owned(),
        description: issue.description().map(str::to_owned),
        status: issue.status().as_str().to_owned(),
        sprint_id: issue.sprint_id().map(SprintId::into_inner),
        assignee_id: issue.assignee_id().map(UserId::into_inner),
        start_date: issue.start_date(),
        end_date: issue.end_date(),
        attachments,
        updated_at: issue.updated_at(),
    })
}

fn row_to_issue(row: IssueRow) -> IssueRepositoryResult<Issue> {
    let IssueRow {
        id,
        workspace_id,
        project_id,
        key_prefix,
        key_number,
        title,
        description,
        issue_type: persisted_type,
        status: persisted_status,
        parent_id,
        sprint_id,
        assignee_id,
        start_date,
        end_date,
        attachments: persisted_attachments,
        created_at,
        updated_at,
    } = row;

    let project_key = ProjectKey::new(key_prefix).map_err(IssueRepositoryError::persistence)?;
    let number = u64::try_from(key_number).map_err(IssueRepositoryError::persistence)?;
    let issue_number = IssueNumber::new(number).map_err(IssueRepositoryError::persistence)?;
    let issue_type =
        IssueType::try_from(persisted_type.as_str()).map_err(IssueRepositoryError::persistence)?;
    let status = IssueStatus::try_from(persisted_status.as_str())
        .map_err(IssueRepositoryError::persistence)?;
    let attachments = serde_json::from_value::<Vec<Attachment>>(persisted_attachments)
        .map_err(IssueRepositoryError::persistence)?;

    Ok(Issue::from_persisted(PersistedIssueData {
        id: IssueId::from_uuid(id),
        workspace_id: WorkspaceId::from_uuid(workspace_id),
        project_id: ProjectId::from_uuid(project_id),
        key: IssueKey::new(project_key, issue_number),
        title,
        description,
        issue_type,
        status,
        parent_id: parent_id.map(IssueId::from_uuid),
        sprint_id: sprint_id.map(SprintId::from_uuid),
        assignee_id: assignee_id.map(UserId::from_uuid),
        start_date,
        end_date,
        attachments,
        created_at,
        updated_at,
    }))
}

fn is_issue_key_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == ISSUE_KEY_UNIQUE_CONSTRAINT)
}
