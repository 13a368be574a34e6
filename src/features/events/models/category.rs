use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::HashMap;

/// Database model for an event category
///
/// Categories are created and retired independently of events; an event
/// always references exactly one.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct EventCategory {
    pub id: i64,
    /// URL-safe unique identifier
    pub slug: String,
    /// Display names keyed by locale code
    pub names: Json<HashMap<String, String>>,
    pub is_active: bool,
    pub sort_order: i32,
}
