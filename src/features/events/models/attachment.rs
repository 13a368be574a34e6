use sqlx::FromRow;

/// Database model for an event attachment
///
/// Rows are removed with their event. An event's attachment list is
/// ordered by `sort_order` ascending.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct EventAttachment {
    pub id: i64,
    pub event_id: i64,
    /// image, file, link
    #[sqlx(rename = "type")]
    pub kind: String,
    /// File path or URL
    pub path: String,
    pub title: Option<String>,
    pub sort_order: i32,
}
