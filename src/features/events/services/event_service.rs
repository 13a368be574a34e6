use std::collections::HashMap;

use crate::core::error::{AppError, Result};
use crate::features::events::dtos::{
    AttachmentPublicDto, CategoryPublicDto, EventDetailViewDto, EventListViewDto,
};
use crate::features::events::models::{EventTranslation, EventWithRelations};
use crate::features::events::repositories::EventRepository;
use crate::shared::constants::{DEFAULT_LOCALE, NO_CATEGORY_NAME, NO_TRANSLATION_TITLE};

/// Service for public event reads: picks the translation for the
/// requested locale and assembles display DTOs from the loaded record
/// graph.
pub struct EventService {
    repository: EventRepository,
}

impl EventService {
    pub fn new(repository: EventRepository) -> Self {
        Self { repository }
    }

    /// List published events for one page, localized for `locale`
    pub async fn list(
        &self,
        locale: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<EventListViewDto>> {
        let skip = (page - 1) * page_size;
        let events = self.repository.list_published(skip, page_size).await?;

        Ok(events
            .iter()
            .map(|event| Self::to_list_view(event, locale))
            .collect())
    }

    /// Get one published event as a detail view, or 404
    pub async fn get_detail(&self, event_id: i64, locale: &str) -> Result<EventDetailViewDto> {
        let event = self
            .repository
            .get_published(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        Ok(Self::to_detail_view(&event, locale))
    }

    /// Pick the translation to surface: exact locale match, then the
    /// default locale, then the first stored translation. None only when
    /// the event has no translations at all.
    fn resolve_translation<'a>(
        event: &'a EventWithRelations,
        locale: &str,
    ) -> Option<&'a EventTranslation> {
        event
            .translations
            .iter()
            .find(|t| t.locale == locale)
            .or_else(|| {
                event
                    .translations
                    .iter()
                    .find(|t| t.locale == DEFAULT_LOCALE)
            })
            .or_else(|| event.translations.first())
    }

    /// Resolve one locale's text out of a names map. An empty string
    /// counts as missing and falls through to the next candidate.
    fn localized_text(names: &HashMap<String, String>, locale: &str, default: &str) -> String {
        names
            .get(locale)
            .filter(|text| !text.is_empty())
            .or_else(|| names.get(DEFAULT_LOCALE).filter(|text| !text.is_empty()))
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn to_list_view(event: &EventWithRelations, locale: &str) -> EventListViewDto {
        let title = Self::resolve_translation(event, locale)
            .map(|t| t.title.clone())
            .unwrap_or_else(|| NO_TRANSLATION_TITLE.to_string());

        let category = CategoryPublicDto {
            slug: event.category.slug.clone(),
            name: Self::localized_text(&event.category.names, locale, NO_CATEGORY_NAME),
        };

        EventListViewDto {
            id: event.event.id,
            // Composite slug so the frontend can route on category and id
            slug: format!("{}-{}", event.category.slug, event.event.id),
            title,
            category,
            published_at: event.event.published_at,
            organizer_info: event.event.organizer_info.clone(),
        }
    }

    fn to_detail_view(event: &EventWithRelations, locale: &str) -> EventDetailViewDto {
        let summary = Self::to_list_view(event, locale);
        let translation = Self::resolve_translation(event, locale);

        let attachments = event
            .attachments
            .iter()
            .map(|attachment| AttachmentPublicDto {
                kind: attachment.kind.clone(),
                title: attachment.title.clone().unwrap_or_default(),
                path: attachment.path.clone(),
            })
            .collect();

        EventDetailViewDto {
            summary,
            content: translation.and_then(|t| t.content.clone()),
            location: translation.and_then(|t| t.location.clone()),
            attachments,
        }
    }
}
