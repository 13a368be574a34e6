use sqlx::FromRow;

/// Database model for a per-locale event translation
///
/// `(event_id, locale)` is unique; rows are removed with their event.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct EventTranslation {
    pub id: i64,
    pub event_id: i64,
    /// Locale code such as "zh-TW"
    pub locale: String,
    pub title: String,
    pub content: Option<String>,
    pub location: Option<String>,
}
