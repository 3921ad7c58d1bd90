//! `PostgreSQL` repository implementation for sprint storage.

use super::{
    models::{SprintChangeset, SprintRow},
    schema::sprints,
};
use crate::sprint::{
    domain::{PersistedSprintData, Sprint, SprintId, SprintStatus},
    ports::{SprintRepository, SprintRepositoryError, SprintRepositoryResult},
};
use crate::workspace::domain::{ProjectId, WorkspaceId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by sprint adapters.
pub type SprintPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed sprint repository.
#[derive(Debug, Clone)]
pub struct PostgresSprintRepository {
    pool: SprintPgPool,
}

impl PostgresSprintRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SprintPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SprintRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SprintRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SprintRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SprintRepositoryError::persistence)?
    }
}

impl From<DieselError> for SprintRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl SprintRepository for PostgresSprintRepository {
    async fn store(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let sprint_id = sprint.id();
        let row = to_row(sprint);
        self.run_blocking(move |connection| {
            diesel::insert_into(sprints::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SprintRepositoryError::DuplicateSprint(sprint_id)
                    }
                    _ => SprintRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let sprint_id = sprint.id();
        let changeset = to_changeset(sprint);
        self.run_blocking(move |connection| {
            let updated =
                diesel::update(sprints::table.filter(sprints::id.eq(sprint_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)?;
            if updated == 0 {
                return Err(SprintRepositoryError::NotFound(sprint_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        self.run_blocking(move |connection| {
            let row = sprints::table
                .filter(sprints::id.eq(id.into_inner()))
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        self.run_blocking(move |connection| load_project_sprints(connection, project_id, None))
            .await
    }

    async fn find_active(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        self.run_blocking(move |connection| {
            load_project_sprints(connection, project_id, Some(SprintStatus::Active))
        })
        .await
    }
}

fn load_project_sprints(
    connection: &mut PgConnection,
    project_id: ProjectId,
    status: Option<SprintStatus>,
) -> SprintRepositoryResult<Vec<Sprint>> {
    let mut query = sprints::table
        .filter(sprints::project_id.eq(project_id.into_inner()))
        .order(sprints::created_at.asc())
        .select(SprintRow::as_select())
        .into_boxed();
    if let Some(wanted) = status {
        query = query.filter(sprints::status.eq(wanted.as_str()));
    }
    query
        .load::<SprintRow>(connection)?
        .into_iter()
        .map(row_to_sprint)
        .collect()
}

fn to_row(sprint: &Sprint) -> SprintRow {
    SprintRow {
        id: sprint.id().into_inner(),
        workspace_id: sprint.workspace_id().into_inner(),
        project_id: sprint.project_id().into_inner(),
        name: sprint.name().to_owned(),
        goal: sprint.goal().map(str::to_owned),
        start_date: sprint.start_date(),
        end_date: sprint.end_date(),
        status: sprint.status().as_str().to_owned(),
        completed_at: sprint.completed_at(),
        created_at: sprint.created_at(),
        updated_at: sprint.updated_at(),
    }
}

fn to_changeset(sprint: &Sprint) -> SprintChangeset {
    SprintChangeset {
        name: sprint.name().to_owned(),
        goal: sprint.goal().map(str::to_owned),
        start_date: sprint.start_date(),
        end_date: sprint.end_date(),
        status: sprint.status().as_str().to_owned(),
        completed_at: sprint.completed_at(),
        updated_at: sprint.updated_at(),
    }
}

fn row_to_sprint(row: SprintRow) -> SprintRepositoryResult<Sprint> {
    let status =
        SprintStatus::try_from(row.status.as_str()).map_err(SprintRepositoryError::persistence)?;
    Ok(Sprint::from_persisted(PersistedSprintData {
        id: SprintId::from_uuid(row.id),
        workspace_id: WorkspaceId::from_uuid(row.workspace_id),
        project_id: ProjectId::from_uuid(row.project_id),
        name: row.name,
        goal: row.goal,
        start_date: row.start_date,
        end_date: row.end_date,
        status,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
