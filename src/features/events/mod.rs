//! Public event listings feature.
//!
//! Serves paginated, localized event data and detail pages. Only events
//! that are published and not soft-deleted are visible; each event's
//! translations and attachments are loaded with it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/events` | List published events (paginated, localized) |
//! | GET | `/api/events/{event_id}` | Get one published event |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::EventService;
