use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use crate::{
    config::SanityConfig,
    error::{AppError, CmsError},
};

/// Document creation against a headless CMS.
#[async_trait]
pub trait CmsClient: Send + Sync {
    /// Stores `document` as-is and returns the document the CMS created.
    async fn create(&self, document: Value) -> Result<Value, CmsError>;
}

#[derive(Debug, Clone)]
pub struct SanityClient {
    client: reqwest::Client,
    mutate_url: Url,
    token: Option<String>,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Result<Self, AppError> {
        let mutate_url = config
            .api_host
            .join(&format!(
                "v{}/data/mutate/{}",
                config.api_version, config.dataset
            ))
            .map_err(|err| AppError::Config(format!("invalid sanity endpoint: {err}")))?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| AppError::Other(err.into()))?;

        Ok(Self {
            client,
            mutate_url,
            token: config.write_token.clone(),
        })
    }
}

#[async_trait]
impl CmsClient for SanityClient {
    async fn create(&self, document: Value) -> Result<Value, CmsError> {
        if !document.get("_type").is_some_and(Value::is_string) {
            return Err(CmsError::MissingType);
        }

        debug!("creating document via {}", self.mutate_url);

        let mut request = self
            .client
            .post(self.mutate_url.clone())
            .query(&[
                ("returnIds", "true"),
                ("returnDocuments", "true"),
                ("visibility", "sync"),
            ])
            .json(&json!({ "mutations": [{ "create": document }] }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.bytes().await?;
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(CmsError::Api {
                status: status.as_u16(),
                message: error_message(&body, status.as_u16()),
            });
        }

        let created = body
            .pointer("/results/0/document")
            .cloned()
            .ok_or_else(|| CmsError::Malformed("no document in mutation result".into()))?;
        info!(
            id = created.get("_id").and_then(|id| id.as_str()).unwrap_or("?"),
            "cms document created"
        );
        Ok(created)
    }
}

fn error_message(body: &Value, status: u16) -> String {
    if let Some(description) = body.pointer("/error/description").and_then(Value::as_str) {
        return description.to_string();
    }
    match (
        body.get("error").and_then(Value::as_str),
        body.get("message").and_then(Value::as_str),
    ) {
        (Some(error), Some(message)) => format!("{error} - {message}"),
        (None, Some(message)) => message.to_string(),
        _ => format!("Server responded with HTTP {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_description() {
        let body = json!({ "error": { "description": "Document already exists", "type": "mutationError" } });
        assert_eq!(error_message(&body, 409), "Document already exists");
    }

    #[test]
    fn error_message_joins_error_and_message() {
        let body = json!({ "error": "Unauthorized", "message": "Session not found", "statusCode": 401 });
        assert_eq!(error_message(&body, 401), "Unauthorized - Session not found");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            error_message(&Value::Null, 502),
            "Server responded with HTTP 502"
        );
    }
}
