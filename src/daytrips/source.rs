use async_trait::async_trait;
use serde::Deserialize;

use crate::{error::QueryError, models::day_trip::DayTripRecord};

/// Optional narrowing of the list query. An empty filter lists everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayTripFilter {
    pub base_id: Option<String>,
    pub difficulty: Option<String>,
    /// Keep trips carrying this tag. Matching trips still report all tags.
    pub tag: Option<String>,
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
    #[serde(default, rename = "featured")]
    pub featured_only: bool,
}

impl DayTripFilter {
    pub fn for_base(base_id: impl Into<String>) -> Self {
        Self {
            base_id: Some(base_id.into()),
            ..Self::default()
        }
    }

    /// Drops blank values so `?tag=` behaves like no tag at all.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            base_id: clean(self.base_id),
            difficulty: clean(self.difficulty),
            tag: clean(self.tag),
            search: clean(self.search),
            featured_only: self.featured_only,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripKey<'a> {
    Id(&'a str),
    Slug(&'a str),
}

impl TripKey<'_> {
    pub fn column(&self) -> &'static str {
        match self {
            TripKey::Id(_) => "id",
            TripKey::Slug(_) => "slug",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            TripKey::Id(value) | TripKey::Slug(value) => value,
        }
    }
}

/// Read access to the `day_trips` relation and its joined tags and photos.
///
/// Implementations return rows in the store's own nested shape; reshaping
/// happens in [`crate::daytrips::shape`].
#[async_trait]
pub trait DayTripSource: Send + Sync {
    async fn fetch_list(&self, filter: &DayTripFilter) -> Result<Vec<DayTripRecord>, QueryError>;

    /// Full row plus tags and photos. Zero matches is [`QueryError::NotFound`].
    async fn fetch_one(&self, key: TripKey<'_>) -> Result<DayTripRecord, QueryError>;
}

/// Backslash-escapes LIKE wildcards so a search term matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
