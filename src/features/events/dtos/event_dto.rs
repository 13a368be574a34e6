use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category as shown inside event views: slug plus a single resolved name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryPublicDto {
    pub slug: String,
    pub name: String,
}

/// Attachment as shown on the detail page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentPublicDto {
    /// image, file, link
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub path: String,
}

/// Response DTO for the event listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListViewDto {
    pub id: i64,
    /// Composite routing slug, "{category.slug}-{event.id}"
    pub slug: String,
    /// Title from the resolved translation
    pub title: String,
    pub category: CategoryPublicDto,
    pub published_at: Option<DateTime<Utc>>,
    pub organizer_info: Option<serde_json::Value>,
}

/// Response DTO for the event detail page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDetailViewDto {
    #[serde(flatten)]
    pub summary: EventListViewDto,
    pub content: Option<String>,
    pub location: Option<String>,
    /// Always present, empty when the event has no attachments
    pub attachments: Vec<AttachmentPublicDto>,
}
