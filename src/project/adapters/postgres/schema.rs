//! Diesel schema for project persistence.

diesel::table! {
    /// Project records with their ordered member list.
    projects (row_id) {
        /// Storage-assigned row identifier; also defines insertion order.
        row_id -> Int8,
        /// Domain project identifier.
        id -> Uuid,
        /// Project name.
        name -> Text,
        /// Project description.
        description -> Text,
        /// Project deadline.
        deadline -> Timestamptz,
        /// Member task identifiers in display order.
        task_ids -> Array<Uuid>,
        /// Completion percentage.
        progress -> Int2,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
