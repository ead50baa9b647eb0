//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with embedded comment threads.
    tasks (row_id) {
        /// Storage-assigned row identifier; also defines insertion order.
        row_id -> Int8,
        /// Domain task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Task priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Owning project identifier, if bound.
        project_id -> Nullable<Uuid>,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Comment thread in insertion order.
        comments -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
