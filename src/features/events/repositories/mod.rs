mod event_repository;

pub use event_repository::EventRepository;
