//! Diesel row models for sprint persistence.

use super::schema::sprints;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Row model shared by inserts and queries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SprintRow {
    /// Internal sprint identifier.
    pub id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Sprint name.
    pub name: String,
    /// Optional sprint goal.
    pub goal: Option<String>,
    /// First day of the sprint.
    pub start_date: Option<NaiveDate>,
    /// Last day of the sprint.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: String,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable sprint columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = sprints)]
#[diesel(treat_none_as_null = true)]
pub struct SprintChangeset {
    /// Sprint name.
    pub name: String,
    /// Optional sprint goal.
    pub goal: Option<String>,
    /// First day of the sprint.
    pub start_date: Option<NaiveDate>,
    /// Last day of the sprint.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: String,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
