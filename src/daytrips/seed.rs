use std::path::Path;

use serde::Deserialize;
use tokio::fs;
use tracing::info;

use crate::{
    db::DbPool,
    error::AppError,
    models::day_trip::{DayTripPhoto, DayTripRecord},
};

/// A day trip as written in a fixture file: the row itself plus plain tag
/// names and its photos.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTrip {
    #[serde(flatten)]
    pub trip: DayTripRecord,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub photos: Vec<DayTripPhoto>,
}

pub async fn load_seed_file(path: &Path) -> Result<Vec<SeedTrip>, AppError> {
    let raw = fs::read(path).await?;
    let trips: Vec<SeedTrip> =
        serde_json::from_slice(&raw).map_err(|err| AppError::Other(err.into()))?;
    Ok(trips)
}

/// Upserts the given trips by id with their tags and photos. Existing links
/// and photos of a reseeded trip are replaced. A slug already held by another
/// trip fails the whole batch and leaves the catalog untouched.
pub async fn seed_catalog(pool: &DbPool, trips: &[SeedTrip]) -> Result<usize, AppError> {
    let mut tx = pool.begin().await?;

    for seed in trips {
        let trip = &seed.trip;
        let best_for =
            serde_json::to_string(&trip.best_for).map_err(|err| AppError::Other(err.into()))?;

        sqlx::query(
            "INSERT INTO day_trips (
                id, base_id, base_name, name, slug, distance, drive_time, train_time,
                description, short_description, full_description, best_for, difficulty, cost,
                image_url, hero_image_url, rating, is_must_see, recommended_duration,
                food_info, ticket_info, official_website, latitude, longitude,
                what_to_see, local_tips, best_time_to_visit, featured, created_at, updated_at
            ) VALUES (
                ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                COALESCE(?, CURRENT_TIMESTAMP), COALESCE(?, CURRENT_TIMESTAMP)
            )
            ON CONFLICT(id) DO UPDATE SET
                base_id = excluded.base_id, base_name = excluded.base_name,
                name = excluded.name, slug = excluded.slug, distance = excluded.distance,
                drive_time = excluded.drive_time, train_time = excluded.train_time,
                description = excluded.description,
                short_description = excluded.short_description,
                full_description = excluded.full_description, best_for = excluded.best_for,
                difficulty = excluded.difficulty, cost = excluded.cost,
                image_url = excluded.image_url, hero_image_url = excluded.hero_image_url,
                rating = excluded.rating, is_must_see = excluded.is_must_see,
                recommended_duration = excluded.recommended_duration,
                food_info = excluded.food_info, ticket_info = excluded.ticket_info,
                official_website = excluded.official_website, latitude = excluded.latitude,
                longitude = excluded.longitude, what_to_see = excluded.what_to_see,
                local_tips = excluded.local_tips,
                best_time_to_visit = excluded.best_time_to_visit, featured = excluded.featured,
                updated_at = excluded.updated_at",
        )
        .bind(&trip.id)
        .bind(&trip.base_id)
        .bind(&trip.base_name)
        .bind(&trip.name)
        .bind(&trip.slug)
        .bind(&trip.distance)
        .bind(&trip.drive_time)
        .bind(&trip.train_time)
        .bind(&trip.description)
        .bind(&trip.short_description)
        .bind(&trip.full_description)
        .bind(best_for)
        .bind(&trip.difficulty)
        .bind(&trip.cost)
        .bind(&trip.image_url)
        .bind(&trip.hero_image_url)
        .bind(trip.rating)
        .bind(trip.is_must_see)
        .bind(&trip.recommended_duration)
        .bind(&trip.food_info)
        .bind(&trip.ticket_info)
        .bind(&trip.official_website)
        .bind(trip.latitude)
        .bind(trip.longitude)
        .bind(&trip.what_to_see)
        .bind(&trip.local_tips)
        .bind(&trip.best_time_to_visit)
        .bind(trip.featured)
        .bind(trip.created_at)
        .bind(trip.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM day_trip_tags WHERE day_trip_id = ?")
            .bind(&trip.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM day_trip_photos WHERE day_trip_id = ?")
            .bind(&trip.id)
            .execute(&mut *tx)
            .await?;

        for tag in &seed.tags {
            sqlx::query("INSERT OR IGNORE INTO tags (name) VALUES (?)")
                .bind(tag)
                .execute(&mut *tx)
                .await?;
            sqlx::query(
                "INSERT OR IGNORE INTO day_trip_tags (day_trip_id, tag_id)
                 SELECT ?, id FROM tags WHERE name = ?",
            )
            .bind(&trip.id)
            .bind(tag)
            .execute(&mut *tx)
            .await?;
        }

        for photo in &seed.photos {
            sqlx::query(
                "INSERT INTO day_trip_photos (day_trip_id, image_url, caption, display_order)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&trip.id)
            .bind(&photo.image_url)
            .bind(&photo.caption)
            .bind(photo.display_order)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    info!(count = trips.len(), "seeded day trips");
    Ok(trips.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_separates_tag_names_from_the_row() {
        let trips: Vec<SeedTrip> =
            serde_json::from_str(include_str!("../../seeds/day_trips.json")).expect("fixture");

        assert_eq!(trips.len(), 4);
        let castle = &trips[0];
        assert_eq!(castle.trip.slug.as_deref(), Some("hohenzollern-castle"));
        assert_eq!(castle.tags, ["castle", "views"]);
        assert!(castle.trip.tags.is_none());
        assert_eq!(castle.photos.len(), 2);
        assert_eq!(castle.trip.featured, Some(true));
        assert!(trips[3].trip.rating.is_none());
    }
}
