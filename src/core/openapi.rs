use utoipa::{Modify, OpenApi};

use crate::features::events::{dtos as events_dtos, handlers as events_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Events (public)
        events_handlers::list_events,
        events_handlers::get_event,
    ),
    components(
        schemas(
            // Events
            events_dtos::CategoryPublicDto,
            events_dtos::AttachmentPublicDto,
            events_dtos::EventListViewDto,
            events_dtos::EventDetailViewDto,
        )
    ),
    tags(
        (name = "events", description = "Localized event listings and detail pages (public)"),
    ),
    info(
        title = "Eventboard API",
        version = "0.1.0",
        description = "Read API for localized event listings and detail pages",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
