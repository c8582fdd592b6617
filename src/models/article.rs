use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleMeta {
    pub slug: &'static str,
    pub title: String,
    pub category: &'static str,
    pub reading_time_minutes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Article {
    #[serde(flatten)]
    pub meta: ArticleMeta,
    pub content: &'static str,
}
