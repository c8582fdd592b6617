use std::sync::Arc;

use tracing::error;

use super::{
    shape,
    source::{DayTripFilter, DayTripSource, TripKey},
};
use crate::{
    error::QueryError,
    models::day_trip::{Base, BaseDayTrips, DayTrip, DayTripSummary},
};

/// Read-side of the day-trip catalog.
///
/// Stateless apart from the source handle; concurrent calls each go to the
/// source on their own. Errors are logged and returned as produced.
#[derive(Clone)]
pub struct DayTripService {
    source: Arc<dyn DayTripSource>,
}

impl DayTripService {
    pub fn new(source: Arc<dyn DayTripSource>) -> Self {
        Self { source }
    }

    pub async fn list_day_trips(
        &self,
        filter: &DayTripFilter,
    ) -> Result<Vec<DayTripSummary>, QueryError> {
        let records = match self.source.fetch_list(filter).await {
            Ok(records) => records,
            Err(err) => {
                error!("error fetching day trips: {err}");
                return Err(err);
            }
        };

        let mut trips: Vec<DayTripSummary> =
            records.into_iter().map(shape::into_summary).collect();
        shape::order_for_listing(&mut trips);
        Ok(trips)
    }

    pub async fn get_day_trip(&self, id: &str) -> Result<DayTrip, QueryError> {
        self.fetch_detail(TripKey::Id(id)).await
    }

    pub async fn get_day_trip_by_slug(&self, slug: &str) -> Result<DayTrip, QueryError> {
        self.fetch_detail(TripKey::Slug(slug)).await
    }

    pub async fn list_grouped_by_base(&self) -> Result<Vec<BaseDayTrips>, QueryError> {
        let trips = self.list_day_trips(&DayTripFilter::default()).await?;
        Ok(shape::group_by_base(trips))
    }

    pub async fn list_bases(&self) -> Result<Vec<Base>, QueryError> {
        let trips = self.list_day_trips(&DayTripFilter::default()).await?;
        Ok(shape::distinct_bases(&trips))
    }

    async fn fetch_detail(&self, key: TripKey<'_>) -> Result<DayTrip, QueryError> {
        match self.source.fetch_one(key).await {
            Ok(record) => Ok(shape::into_detail(record)),
            Err(err) => {
                error!(
                    key = key.column(),
                    value = key.value(),
                    "error fetching day trip: {err}"
                );
                Err(err)
            }
        }
    }
}
