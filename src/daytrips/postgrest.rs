//! Client for the hosted store's PostgREST surface.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use url::Url;

use super::source::{escape_like, DayTripFilter, DayTripSource, TripKey};
use crate::{
    error::{AppError, QueryError},
    models::day_trip::DayTripRecord,
};

const LIST_COLUMNS: &str = "id,base_id,base_name,name,slug,distance,drive_time,train_time,\
description,short_description,best_for,difficulty,cost,image_url,hero_image_url,rating,\
is_must_see,recommended_duration,featured,latitude,longitude";
const TAGS_EMBED: &str = "tags:day_trip_tags(tag:tags(name))";
// Separate alias so filtering by tag does not prune the reported tags.
const TAG_FILTER_EMBED: &str = "tag_filter:day_trip_tags!inner(tag:tags!inner(name))";
const PHOTOS_EMBED: &str = "photos:day_trip_photos(image_url,caption,display_order)";
const LIST_ORDER: &str = "featured.desc.nullslast,rating.desc.nullslast";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const NO_ROWS_CODE: &str = "PGRST116";

#[derive(Debug, Clone)]
pub struct PostgrestSource {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl PostgrestSource {
    pub fn new(project_url: &Url, anon_key: &str) -> Result<Self, AppError> {
        let endpoint = project_url
            .join("rest/v1/day_trips")
            .map_err(|err| AppError::Config(format!("invalid store url: {err}")))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(anon_key)
            .map_err(|err| AppError::Config(format!("invalid store key: {err}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {anon_key}"))
            .map_err(|err| AppError::Config(format!("invalid store key: {err}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| AppError::Other(err.into()))?;

        Ok(Self { client, endpoint })
    }

    fn list_params(filter: &DayTripFilter) -> Vec<(String, String)> {
        let mut select = format!("{LIST_COLUMNS},{TAGS_EMBED}");
        if filter.tag.is_some() {
            select.push(',');
            select.push_str(TAG_FILTER_EMBED);
        }

        let mut params = vec![
            ("select".to_string(), select),
            ("order".to_string(), LIST_ORDER.to_string()),
        ];
        if let Some(base_id) = &filter.base_id {
            params.push(("base_id".into(), format!("eq.{base_id}")));
        }
        if let Some(difficulty) = &filter.difficulty {
            params.push(("difficulty".into(), format!("eq.{difficulty}")));
        }
        if let Some(tag) = &filter.tag {
            params.push(("tag_filter.tag.name".into(), format!("eq.{tag}")));
        }
        if let Some(search) = &filter.search {
            let stripped: String = search
                .chars()
                .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '"'))
                .collect();
            let needle = escape_like(&stripped);
            params.push((
                "or".into(),
                format!("(name.ilike.*{needle}*,description.ilike.*{needle}*)"),
            ));
        }
        if filter.featured_only {
            params.push(("featured".into(), "is.true".into()));
        }
        params
    }

    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, QueryError> {
        let status = response.status();
        let body = response.bytes().await?;
        if status.is_success() {
            return Ok(body.to_vec());
        }

        let error: PostgrestError = serde_json::from_slice(&body).unwrap_or_default();
        let code = error.code.unwrap_or_default();
        let zero_rows = error
            .details
            .as_deref()
            .is_some_and(|details| details.contains(" 0 rows"));
        if code == NO_ROWS_CODE && zero_rows {
            return Err(QueryError::NotFound);
        }

        Err(QueryError::Rejected {
            status: status.as_u16(),
            code,
            message: error
                .message
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned()),
        })
    }
}

#[async_trait]
impl DayTripSource for PostgrestSource {
    async fn fetch_list(&self, filter: &DayTripFilter) -> Result<Vec<DayTripRecord>, QueryError> {
        tracing::debug!("fetching day trips from {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&Self::list_params(filter))
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_one(&self, key: TripKey<'_>) -> Result<DayTripRecord, QueryError> {
        tracing::debug!("fetching day trip {}={}", key.column(), key.value());

        let select = format!("*,{TAGS_EMBED},{PHOTOS_EMBED}");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[
                ("select", select),
                (key.column(), format!("eq.{}", key.value())),
            ])
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
