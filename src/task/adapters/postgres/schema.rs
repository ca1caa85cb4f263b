//! Diesel schema for task persistence.

diesel::table! {
    /// Owner-scoped task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Owning user.
        owner_id -> Uuid,
        /// Trimmed task text.
        content -> Text,
        /// Task priority.
        #[max_length = 16]
        priority -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Workflow status.
        #[max_length = 16]
        status -> Varchar,
        /// Zero-based position within the owner's status column.
        order_position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
