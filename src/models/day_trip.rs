use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// One entry of the `day_trip_tags` join as the store embeds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagLink {
    #[serde(default)]
    pub tag: Option<Tag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTripPhoto {
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub display_order: i32,
}

/// A `day_trips` row exactly as the store hands it back: every column it
/// was asked for, tags still in join form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTripRecord {
    pub id: String,
    pub base_id: String,
    pub base_name: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub distance: String,
    pub drive_time: String,
    #[serde(default)]
    pub train_time: Option<String>,
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub best_for: Vec<String>,
    pub difficulty: String,
    pub cost: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_must_see: Option<bool>,
    #[serde(default)]
    pub recommended_duration: Option<String>,
    #[serde(default)]
    pub food_info: Option<String>,
    #[serde(default)]
    pub ticket_info: Option<String>,
    #[serde(default)]
    pub official_website: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub what_to_see: Option<String>,
    #[serde(default)]
    pub local_tips: Option<String>,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Option<Vec<TagLink>>,
    #[serde(default)]
    pub photos: Option<Vec<DayTripPhoto>>,
}

/// List view of a day trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTripSummary {
    pub id: String,
    pub base_id: String,
    pub base_name: String,
    pub name: String,
    pub slug: Option<String>,
    pub distance: String,
    pub drive_time: String,
    pub train_time: Option<String>,
    pub description: String,
    pub short_description: Option<String>,
    pub best_for: Vec<String>,
    pub difficulty: String,
    pub cost: String,
    pub image_url: Option<String>,
    pub hero_image_url: Option<String>,
    pub rating: Option<f64>,
    pub is_must_see: bool,
    pub recommended_duration: Option<String>,
    pub featured: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tags: Vec<Tag>,
}

/// Detail view of a day trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTrip {
    pub id: String,
    pub base_id: String,
    pub base_name: String,
    pub name: String,
    pub slug: Option<String>,
    pub distance: String,
    pub drive_time: String,
    pub train_time: Option<String>,
    pub description: String,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub best_for: Vec<String>,
    pub difficulty: String,
    pub cost: String,
    pub image_url: Option<String>,
    pub hero_image_url: Option<String>,
    pub rating: Option<f64>,
    pub is_must_see: bool,
    pub recommended_duration: Option<String>,
    pub food_info: Option<String>,
    pub ticket_info: Option<String>,
    pub official_website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub what_to_see: Option<String>,
    pub local_tips: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub featured: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tags: Vec<Tag>,
    pub photos: Vec<DayTripPhoto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseDayTrips {
    pub base_id: String,
    pub base_name: String,
    pub trips: Vec<DayTripSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    pub id: String,
    pub name: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 as well as zone-less `timestamp` columns, which are taken
/// as UTC. Anything else reads as missing instead of failing the row.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(parse_timestamp(&raw))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn row(extra: serde_json::Value) -> serde_json::Value {
        let mut row = json!({
            "id": "trip-ulm",
            "base_id": "stuttgart",
            "base_name": "Stuttgart",
            "name": "Ulm",
            "distance": "95 km",
            "drive_time": "1h",
            "description": "Minster town",
            "difficulty": "easy",
            "cost": "free",
        });
        if let (Some(row), Some(extra)) = (row.as_object_mut(), extra.as_object()) {
            row.extend(extra.clone());
        }
        row
    }

    #[test]
    fn null_best_for_reads_as_empty() {
        let trip: DayTripRecord =
            serde_json::from_value(row(json!({ "best_for": null }))).expect("row");
        assert!(trip.best_for.is_empty());
    }

    #[test]
    fn zone_less_timestamps_are_taken_as_utc() {
        let trip: DayTripRecord = serde_json::from_value(row(json!({
            "created_at": "2024-06-01T12:00:00",
            "updated_at": "2024-06-02 08:30:00.250",
        })))
        .expect("row");

        assert_eq!(
            trip.created_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(
            trip.updated_at.map(|stamp| stamp.timestamp_millis()),
            Some(Utc.with_ymd_and_hms(2024, 6, 2, 8, 30, 0).unwrap().timestamp_millis() + 250)
        );
    }

    #[test]
    fn zoned_and_unreadable_timestamps() {
        let trip: DayTripRecord = serde_json::from_value(row(json!({
            "created_at": "2024-06-01T12:00:00+02:00",
            "updated_at": "last tuesday",
        })))
        .expect("row");

        assert_eq!(
            trip.created_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap())
        );
        assert!(trip.updated_at.is_none());
    }
}
