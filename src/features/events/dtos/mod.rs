mod event_dto;

pub use event_dto::{AttachmentPublicDto, CategoryPublicDto, EventDetailViewDto, EventListViewDto};
