use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{EventAttachment, EventCategory, EventTranslation};

/// Event publication status, stored as SMALLINT
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[repr(i16)]
pub enum EventStatus {
    Draft = 0,
    Published = 1,
    Archived = 2,
}

/// Database model for an event
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Event {
    pub id: i64,
    pub category_id: i64,
    pub status: EventStatus,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    /// Free-form organizer details, passed through to display output as-is
    pub organizer_info: Option<serde_json::Value>,
    pub is_target: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Non-null marks the row as logically deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

/// An event with its category, translations and attachments eagerly
/// loaded. Translations are in insertion (id) order; attachments are in
/// sort_order.
#[derive(Debug, Clone)]
pub struct EventWithRelations {
    pub event: Event,
    pub category: EventCategory,
    pub translations: Vec<EventTranslation>,
    pub attachments: Vec<EventAttachment>,
}
