//! Diesel row models for issue persistence.

use super::schema::issues;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for issue records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IssueRow {
    /// Internal issue identifier.
    pub id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Issue key prefix.
    pub key_prefix: String,
    /// Issue key number.
    pub key_number: i64,
    /// Issue title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Issue classification.
    pub issue_type: String,
    /// Workflow status.
    pub status: String,
    /// Parent issue reference.
    pub parent_id: Option<uuid::Uuid>,
    /// Sprint reference.
    pub sprint_id: Option<uuid::Uuid>,
    /// Assigned user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned end date.
    pub end_date: Option<NaiveDate>,
    /// Attachment JSON payload.
    pub attachments: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for issue records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = issues)]
pub struct NewIssueRow {
    /// Internal issue identifier.
    pub id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Issue key prefix.
    pub key_prefix: String,
    /// Issue key number.
    pub key_number: i64,
    /// Issue title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Issue classification.
    pub issue_type: String,
    /// Workflow status.
    pub status: String,
    /// Parent issue reference.
    pub parent_id: Option<uuid::Uuid>,
    /// Sprint reference.
    pub sprint_id: Option<uuid::Uuid>,
    /// Assigned user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned end date.
    pub end_date: Option<NaiveDate>,
    /// Attachment JSON payload.
    pub attachments: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable issue columns.
///
/// `None` values write `NULL` so cleared fields are persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = issues)]
#[diesel(treat_none_as_null = true)]
pub struct IssueChangeset {
    /// Issue title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Sprint reference.
    pub sprint_id: Option<uuid::Uuid>,
    /// Assigned user.
    pub assignee_id: Option<uuid::Uuid>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned end date.
    pub end_date: Option<NaiveDate>,
    /// Attachment JSON payload.
    pub attachments: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
