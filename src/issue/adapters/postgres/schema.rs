//! Diesel schema for issue persistence.

diesel::table! {
    /// Issue records, one row per issue regardless of type.
    issues (id) {
        /// Internal issue identifier.
        id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Project key prefix of the issue key.
        #[max_length = 10]
        key_prefix -> Varchar,
        /// Per-project sequence number of the issue key.
        key_number -> Int8,
        /// Issue title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Issue classification.
        #[max_length = 20]
        issue_type -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Parent issue reference.
        parent_id -> Nullable<Uuid>,
        /// Sprint reference; null means backlog.
        sprint_id -> Nullable<Uuid>,
        /// Assigned user.
        assignee_id -> Nullable<Uuid>,
        /// Planned start date.
        start_date -> Nullable<Date>,
        /// Planned end date.
        end_date -> Nullable<Date>,
        /// Attachment list payload.
        attachments -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Last issued issue number per project.
    project_issue_counters (project_id) {
        /// Project identifier.
        project_id -> Uuid,
        /// Highest issue number handed out so far.
        last_number -> Int8,
    }
}
