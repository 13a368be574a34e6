use std::collections::HashMap;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::events::models::{
    Event, EventAttachment, EventCategory, EventStatus, EventTranslation, EventWithRelations,
};

/// Read-only data access for public event listings
///
/// Both queries apply the visibility filter (not soft-deleted, status
/// published) and return events with category, translations and
/// attachments populated.
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a page of published events, newest publication first.
    ///
    /// Events without a publication timestamp sort last; id breaks ties
    /// so paging stays deterministic. An empty page is not an error.
    pub async fn list_published(&self, skip: i64, limit: i64) -> Result<Vec<EventWithRelations>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, category_id, status, starts_at, ends_at, published_at,
                   organizer_info, is_target, is_featured,
                   created_at, updated_at, deleted_at
            FROM events
            WHERE deleted_at IS NULL AND status = $1
            ORDER BY published_at DESC NULLS LAST, id DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(EventStatus::Published)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list published events: {:?}", e);
            AppError::Database(e)
        })?;

        self.load_relations(events).await
    }

    /// Fetch a single published event by id, or None when the row is
    /// missing, soft-deleted or not published.
    pub async fn get_published(&self, event_id: i64) -> Result<Option<EventWithRelations>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, category_id, status, starts_at, ends_at, published_at,
                   organizer_info, is_target, is_featured,
                   created_at, updated_at, deleted_at
            FROM events
            WHERE id = $1 AND deleted_at IS NULL AND status = $2
            "#,
        )
        .bind(event_id)
        .bind(EventStatus::Published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch event {}: {:?}", event_id, e);
            AppError::Database(e)
        })?;

        let Some(event) = event else {
            return Ok(None);
        };

        let mut loaded = self.load_relations(vec![event]).await?;
        Ok(loaded.pop())
    }

    /// Eager-load categories, translations and attachments for a batch of
    /// events with one query per related table.
    async fn load_relations(&self, events: Vec<Event>) -> Result<Vec<EventWithRelations>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let event_ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        let mut category_ids: Vec<i64> = events.iter().map(|e| e.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let categories = sqlx::query_as::<_, EventCategory>(
            r#"
            SELECT id, slug, names, is_active, sort_order
            FROM event_categories
            WHERE id = ANY($1)
            "#,
        )
        .bind(&category_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch event categories: {:?}", e);
            AppError::Database(e)
        })?;

        // Insertion order of translations is their id order
        let translations = sqlx::query_as::<_, EventTranslation>(
            r#"
            SELECT id, event_id, locale, title, content, location
            FROM event_translations
            WHERE event_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch event translations: {:?}", e);
            AppError::Database(e)
        })?;

        let attachments = sqlx::query_as::<_, EventAttachment>(
            r#"
            SELECT id, event_id, type, path, title, sort_order
            FROM event_attachments
            WHERE event_id = ANY($1)
            ORDER BY sort_order, id
            "#,
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch event attachments: {:?}", e);
            AppError::Database(e)
        })?;

        let categories_by_id: HashMap<i64, EventCategory> =
            categories.into_iter().map(|c| (c.id, c)).collect();
        let mut translations_by_event = group_by_event(translations, |t| t.event_id);
        let mut attachments_by_event = group_by_event(attachments, |a| a.event_id);

        events
            .into_iter()
            .map(|event| {
                let category = categories_by_id
                    .get(&event.category_id)
                    .cloned()
                    .ok_or_else(|| {
                        tracing::error!(
                            "Event {} references missing category {}",
                            event.id,
                            event.category_id
                        );
                        AppError::Internal(format!(
                            "event {} references missing category {}",
                            event.id, event.category_id
                        ))
                    })?;

                Ok(EventWithRelations {
                    translations: translations_by_event.remove(&event.id).unwrap_or_default(),
                    attachments: attachments_by_event.remove(&event.id).unwrap_or_default(),
                    category,
                    event,
                })
            })
            .collect()
    }
}

/// Group child rows by their event id, keeping the per-event row order
/// the query produced.
fn group_by_event<T>(rows: Vec<T>, event_id: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(event_id(&row)).or_default().push(row);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use serial_test::serial;
    use sqlx::postgres::PgPoolOptions;
    use sqlx::types::Json;

    fn translation(id: i64, event_id: i64, locale: &str, title: &str) -> EventTranslation {
        EventTranslation {
            id,
            event_id,
            locale: locale.to_string(),
            title: title.to_string(),
            content: None,
            location: None,
        }
    }

    #[test]
    fn group_by_event_keeps_row_order_per_key() {
        let rows = vec![
            translation(1, 10, "zh-TW", "a"),
            translation(2, 20, "zh-TW", "b"),
            translation(3, 10, "en-US", "c"),
            translation(4, 10, "fr-FR", "d"),
        ];

        let grouped = group_by_event(rows, |t| t.event_id);

        let ids: Vec<i64> = grouped[&10].iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(grouped[&20].len(), 1);
        assert!(!grouped.contains_key(&30));
    }

    // ------------------------------------------------------------------
    // Database-backed tests. Run with a disposable PostgreSQL:
    //   DATABASE_URL=postgres://... cargo test -- --ignored
    // ------------------------------------------------------------------

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for these tests");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("failed to connect to test database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");
        sqlx::query(
            "TRUNCATE event_attachments, event_translations, events, event_categories RESTART IDENTITY",
        )
        .execute(&pool)
        .await
        .expect("failed to truncate tables");
        pool
    }

    async fn insert_category(pool: &PgPool, slug: &str) -> i64 {
        let names: HashMap<String, String> =
            HashMap::from([("zh-TW".to_string(), format!("{} 名稱", slug))]);
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO event_categories (slug, names) VALUES ($1, $2) RETURNING id",
        )
        .bind(slug)
        .bind(Json(names))
        .fetch_one(pool)
        .await
        .expect("failed to insert category")
    }

    async fn insert_event(
        pool: &PgPool,
        category_id: i64,
        status: EventStatus,
        published_at: Option<DateTime<Utc>>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> i64 {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO events (category_id, status, published_at, deleted_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(category_id)
        .bind(status)
        .bind(published_at)
        .bind(deleted_at)
        .fetch_one(pool)
        .await
        .expect("failed to insert event")
    }

    async fn insert_attachment(pool: &PgPool, event_id: i64, path: &str, sort_order: i32) {
        sqlx::query(
            "INSERT INTO event_attachments (event_id, type, path, sort_order) VALUES ($1, 'image', $2, $3)",
        )
        .bind(event_id)
        .bind(path)
        .bind(sort_order)
        .execute(pool)
        .await
        .expect("failed to insert attachment");
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn list_skips_soft_deleted_and_unpublished_events() {
        let pool = test_pool().await;
        let repository = EventRepository::new(pool.clone());
        let category_id = insert_category(&pool, "talks").await;

        let now = Utc::now();
        let visible =
            insert_event(&pool, category_id, EventStatus::Published, Some(now), None).await;
        insert_event(&pool, category_id, EventStatus::Draft, Some(now), None).await;
        insert_event(&pool, category_id, EventStatus::Archived, Some(now), None).await;
        insert_event(
            &pool,
            category_id,
            EventStatus::Published,
            Some(now),
            Some(now),
        )
        .await;

        let events = repository.list_published(0, 10).await.unwrap();
        let ids: Vec<i64> = events.iter().map(|e| e.event.id).collect();
        assert_eq!(ids, vec![visible]);
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn list_orders_newest_first_with_nulls_last() {
        let pool = test_pool().await;
        let repository = EventRepository::new(pool.clone());
        let category_id = insert_category(&pool, "talks").await;

        let now = Utc::now();
        let older = insert_event(
            &pool,
            category_id,
            EventStatus::Published,
            Some(now - Duration::days(2)),
            None,
        )
        .await;
        let newer =
            insert_event(&pool, category_id, EventStatus::Published, Some(now), None).await;
        let undated = insert_event(&pool, category_id, EventStatus::Published, None, None).await;

        let events = repository.list_published(0, 10).await.unwrap();
        let ids: Vec<i64> = events.iter().map(|e| e.event.id).collect();
        assert_eq!(ids, vec![newer, older, undated]);
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn list_applies_offset_and_limit() {
        let pool = test_pool().await;
        let repository = EventRepository::new(pool.clone());
        let category_id = insert_category(&pool, "talks").await;

        let now = Utc::now();
        let mut ids = Vec::new();
        for i in 0..15 {
            ids.push(
                insert_event(
                    &pool,
                    category_id,
                    EventStatus::Published,
                    Some(now - Duration::hours(i)),
                    None,
                )
                .await,
            );
        }

        let first_page = repository.list_published(0, 10).await.unwrap();
        let second_page = repository.list_published(10, 10).await.unwrap();

        let first_ids: Vec<i64> = first_page.iter().map(|e| e.event.id).collect();
        let second_ids: Vec<i64> = second_page.iter().map(|e| e.event.id).collect();
        assert_eq!(first_ids, ids[..10].to_vec());
        assert_eq!(second_ids, ids[10..].to_vec());
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn get_published_filters_hidden_events() {
        let pool = test_pool().await;
        let repository = EventRepository::new(pool.clone());
        let category_id = insert_category(&pool, "talks").await;

        let now = Utc::now();
        let draft = insert_event(&pool, category_id, EventStatus::Draft, Some(now), None).await;
        let deleted = insert_event(
            &pool,
            category_id,
            EventStatus::Published,
            Some(now),
            Some(now),
        )
        .await;
        let published =
            insert_event(&pool, category_id, EventStatus::Published, Some(now), None).await;

        assert!(repository.get_published(draft).await.unwrap().is_none());
        assert!(repository.get_published(deleted).await.unwrap().is_none());
        assert!(repository.get_published(9_999_999).await.unwrap().is_none());
        assert!(repository.get_published(published).await.unwrap().is_some());
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn attachments_come_back_in_sort_order() {
        let pool = test_pool().await;
        let repository = EventRepository::new(pool.clone());
        let category_id = insert_category(&pool, "talks").await;
        let event_id = insert_event(
            &pool,
            category_id,
            EventStatus::Published,
            Some(Utc::now()),
            None,
        )
        .await;

        insert_attachment(&pool, event_id, "/uploads/c.jpg", 3).await;
        insert_attachment(&pool, event_id, "/uploads/a.jpg", 1).await;
        insert_attachment(&pool, event_id, "/uploads/b.jpg", 2).await;

        let event = repository.get_published(event_id).await.unwrap().unwrap();
        let paths: Vec<&str> = event.attachments.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(paths, vec!["/uploads/a.jpg", "/uploads/b.jpg", "/uploads/c.jpg"]);
    }
}
