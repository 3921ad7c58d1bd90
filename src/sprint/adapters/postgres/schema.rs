//! Diesel schema for sprint persistence.

diesel::table! {
    /// Sprint records.
    sprints (id) {
        /// Internal sprint identifier.
        id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Sprint name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional sprint goal.
        goal -> Nullable<Text>,
        /// First day of the sprint.
        start_date -> Nullable<Date>,
        /// Last day of the sprint.
        end_date -> Nullable<Date>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
