//! Pure reshaping of store rows into the view models served to the site.

use std::cmp::Ordering;

use crate::models::day_trip::{
    Base, BaseDayTrips, DayTrip, DayTripPhoto, DayTripRecord, DayTripSummary, Tag, TagLink,
};

/// Collapses `[{tag: {name}}]` into `[{name}]`. Links whose tag row is gone
/// are dropped.
pub fn flatten_tags(links: Vec<TagLink>) -> Vec<Tag> {
    links.into_iter().filter_map(|link| link.tag).collect()
}

pub fn sort_photos(photos: &mut [DayTripPhoto]) {
    photos.sort_by_key(|photo| photo.display_order);
}

/// Featured trips first, then higher ratings; unrated trips sink to the end.
pub fn listing_order(a: &DayTripSummary, b: &DayTripSummary) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| match (a.rating, b.rating) {
            (Some(left), Some(right)) => right.total_cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

pub fn order_for_listing(trips: &mut [DayTripSummary]) {
    trips.sort_by(listing_order);
}

pub fn into_summary(record: DayTripRecord) -> DayTripSummary {
    DayTripSummary {
        id: record.id,
        base_id: record.base_id,
        base_name: record.base_name,
        name: record.name,
        slug: record.slug,
        distance: record.distance,
        drive_time: record.drive_time,
        train_time: record.train_time,
        description: record.description,
        short_description: record.short_description,
        best_for: record.best_for,
        difficulty: record.difficulty,
        cost: record.cost,
        image_url: record.image_url,
        hero_image_url: record.hero_image_url,
        rating: record.rating,
        is_must_see: record.is_must_see.unwrap_or(false),
        recommended_duration: record.recommended_duration,
        featured: record.featured.unwrap_or(false),
        latitude: record.latitude,
        longitude: record.longitude,
        tags: flatten_tags(record.tags.unwrap_or_default()),
    }
}

pub fn into_detail(record: DayTripRecord) -> DayTrip {
    let mut photos = record.photos.unwrap_or_default();
    sort_photos(&mut photos);

    DayTrip {
        id: record.id,
        base_id: record.base_id,
        base_name: record.base_name,
        name: record.name,
        slug: record.slug,
        distance: record.distance,
        drive_time: record.drive_time,
        train_time: record.train_time,
        description: record.description,
        short_description: record.short_description,
        full_description: record.full_description,
        best_for: record.best_for,
        difficulty: record.difficulty,
        cost: record.cost,
        image_url: record.image_url,
        hero_image_url: record.hero_image_url,
        rating: record.rating,
        is_must_see: record.is_must_see.unwrap_or(false),
        recommended_duration: record.recommended_duration,
        food_info: record.food_info,
        ticket_info: record.ticket_info,
        official_website: record.official_website,
        latitude: record.latitude,
        longitude: record.longitude,
        what_to_see: record.what_to_see,
        local_tips: record.local_tips,
        best_time_to_visit: record.best_time_to_visit,
        featured: record.featured.unwrap_or(false),
        created_at: record.created_at,
        updated_at: record.updated_at,
        tags: flatten_tags(record.tags.unwrap_or_default()),
        photos,
    }
}

/// Buckets trips per base. Bases and the trips inside each base come out
/// alphabetically by name.
pub fn group_by_base(mut trips: Vec<DayTripSummary>) -> Vec<BaseDayTrips> {
    trips.sort_by(|a, b| {
        a.base_name
            .cmp(&b.base_name)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut groups: Vec<BaseDayTrips> = Vec::new();
    for trip in trips {
        match groups.iter_mut().find(|group| group.base_id == trip.base_id) {
            Some(group) => group.trips.push(trip),
            None => groups.push(BaseDayTrips {
                base_id: trip.base_id.clone(),
                base_name: trip.base_name.clone(),
                trips: vec![trip],
            }),
        }
    }
    groups
}

pub fn distinct_bases(trips: &[DayTripSummary]) -> Vec<Base> {
    let mut bases: Vec<Base> = Vec::new();
    for trip in trips {
        if !bases.iter().any(|base| base.id == trip.base_id) {
            bases.push(Base {
                id: trip.base_id.clone(),
                name: trip.base_name.clone(),
            });
        }
    }
    bases.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    bases
}
