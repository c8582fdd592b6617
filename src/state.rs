use std::sync::Arc;

use crate::{
    config::AppConfig,
    daytrips::{DayTripService, DayTripSource},
    services::{cms::CmsClient, content::ContentLoader},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub day_trips: DayTripService,
    pub cms: Arc<dyn CmsClient>,
    pub content: ContentLoader,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        source: Arc<dyn DayTripSource>,
        cms: Arc<dyn CmsClient>,
        content: ContentLoader,
    ) -> Self {
        Self {
            config,
            day_trips: DayTripService::new(source),
            cms,
            content,
        }
    }
}
