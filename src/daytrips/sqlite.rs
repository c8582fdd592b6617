//! Local SQLite mirror of the hosted day-trip relations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, QueryBuilder, Sqlite};

use super::source::{escape_like, DayTripFilter, DayTripSource, TripKey};
use crate::{
    db::DbPool,
    error::QueryError,
    models::day_trip::{DayTripPhoto, DayTripRecord, TagLink},
};

// Rebuilds the `[{tag: {name}}]` embedding the hosted store returns.
const TAGS_JSON: &str = "(SELECT json_group_array(json_object('tag', json_object('name', t.name))) \
FROM day_trip_tags dtt JOIN tags t ON t.id = dtt.tag_id \
WHERE dtt.day_trip_id = d.id) AS tags";

const PHOTOS_JSON: &str = "(SELECT json_group_array(json_object(\
'image_url', p.image_url, 'caption', p.caption, 'display_order', p.display_order)) \
FROM day_trip_photos p WHERE p.day_trip_id = d.id) AS photos";

const LIST_COLUMNS: &str = "d.id, d.base_id, d.base_name, d.name, d.slug, d.distance, \
d.drive_time, d.train_time, d.description, d.short_description, d.best_for, d.difficulty, \
d.cost, d.image_url, d.hero_image_url, d.rating, d.is_must_see, d.recommended_duration, \
d.featured, d.latitude, d.longitude";

#[derive(Debug, FromRow)]
struct DayTripRow {
    id: String,
    base_id: String,
    base_name: String,
    name: String,
    slug: Option<String>,
    distance: String,
    drive_time: String,
    train_time: Option<String>,
    description: String,
    short_description: Option<String>,
    #[sqlx(default)]
    full_description: Option<String>,
    best_for: Json<Vec<String>>,
    difficulty: String,
    cost: String,
    image_url: Option<String>,
    hero_image_url: Option<String>,
    rating: Option<f64>,
    is_must_see: Option<bool>,
    recommended_duration: Option<String>,
    #[sqlx(default)]
    food_info: Option<String>,
    #[sqlx(default)]
    ticket_info: Option<String>,
    #[sqlx(default)]
    official_website: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[sqlx(default)]
    what_to_see: Option<String>,
    #[sqlx(default)]
    local_tips: Option<String>,
    #[sqlx(default)]
    best_time_to_visit: Option<String>,
    featured: Option<bool>,
    #[sqlx(default)]
    created_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    updated_at: Option<DateTime<Utc>>,
    tags: Json<Vec<TagLink>>,
    #[sqlx(default)]
    photos: Option<Json<Vec<DayTripPhoto>>>,
}

impl From<DayTripRow> for DayTripRecord {
    fn from(row: DayTripRow) -> Self {
        Self {
            id: row.id,
            base_id: row.base_id,
            base_name: row.base_name,
            name: row.name,
            slug: row.slug,
            distance: row.distance,
            drive_time: row.drive_time,
            train_time: row.train_time,
            description: row.description,
            short_description: row.short_description,
            full_description: row.full_description,
            best_for: row.best_for.0,
            difficulty: row.difficulty,
            cost: row.cost,
            image_url: row.image_url,
            hero_image_url: row.hero_image_url,
            rating: row.rating,
            is_must_see: row.is_must_see,
            recommended_duration: row.recommended_duration,
            food_info: row.food_info,
            ticket_info: row.ticket_info,
            official_website: row.official_website,
            latitude: row.latitude,
            longitude: row.longitude,
            what_to_see: row.what_to_see,
            local_tips: row.local_tips,
            best_time_to_visit: row.best_time_to_visit,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
            tags: Some(row.tags.0),
            photos: row.photos.map(|photos| photos.0),
        }
    }
}

#[derive(Clone)]
pub struct SqliteSource {
    pool: DbPool,
}

impl SqliteSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DayTripSource for SqliteSource {
    async fn fetch_list(&self, filter: &DayTripFilter) -> Result<Vec<DayTripRecord>, QueryError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {LIST_COLUMNS}, {TAGS_JSON} FROM day_trips d WHERE 1 = 1"
        ));

        if let Some(base_id) = &filter.base_id {
            query.push(" AND d.base_id = ").push_bind(base_id.clone());
        }
        if let Some(difficulty) = &filter.difficulty {
            query.push(" AND d.difficulty = ").push_bind(difficulty.clone());
        }
        if let Some(tag) = &filter.tag {
            query
                .push(
                    " AND EXISTS (SELECT 1 FROM day_trip_tags ft JOIN tags ftn ON ftn.id = ft.tag_id \
                     WHERE ft.day_trip_id = d.id AND ftn.name = ",
                )
                .push_bind(tag.clone())
                .push(")");
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", escape_like(search));
            query
                .push(" AND (d.name LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR d.description LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        if filter.featured_only {
            query.push(" AND d.featured = 1");
        }
        query.push(" ORDER BY d.featured DESC, d.rating DESC NULLS LAST");

        let rows: Vec<DayTripRow> = query.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(DayTripRecord::from).collect())
    }

    async fn fetch_one(&self, key: TripKey<'_>) -> Result<DayTripRecord, QueryError> {
        let sql = format!(
            "SELECT d.*, {TAGS_JSON}, {PHOTOS_JSON} FROM day_trips d WHERE d.{} = ?",
            key.column()
        );
        let row: Option<DayTripRow> = sqlx::query_as(&sql)
            .bind(key.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(DayTripRecord::from).ok_or(QueryError::NotFound)
    }
}
