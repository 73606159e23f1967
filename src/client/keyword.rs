use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::SovApi;
use crate::config::ApiConfig;
use crate::model::FlatGroup;
use crate::params::ConfigParams;

/// HTTP client for the Keyword.com v2 API.
///
/// Authenticates with the `api_token` query parameter taken from the
/// request's config params.
pub struct KeywordClient {
    http_client: Client,
    base_url: String,
}

impl KeywordClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with a custom base URL (for testing with a mock server).
    pub fn with_base_url(base_url: String) -> Result<Self> {
        Self::new(&ApiConfig {
            base_url,
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Errors are stripped of the request URL, which carries the API token.
    async fn get(&self, url: &str, what: &str) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to send {} request", what))?;

        check_response_status(&response)?;
        response
            .text()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to read {} response", what))
    }
}

#[async_trait]
impl SovApi for KeywordClient {
    async fn fetch_groups(&self, params: &ConfigParams) -> Result<String> {
        let url = groups_url(&self.base_url, params);
        tracing::debug!(base_url = %self.base_url, "Fetching active groups");
        self.get(&url, "groups").await
    }

    async fn fetch_sov(&self, params: &ConfigParams, group: &FlatGroup) -> Result<String> {
        let url = sov_url(&self.base_url, params, group);
        tracing::debug!(
            project_id = %segment(&group.project_id),
            tag_id = ?group.tag_filter(),
            "Fetching mindshare series"
        );
        self.get(&url, "mindshare").await
    }
}

/// `GET /api/v2/groups/active`
///
/// Values are embedded verbatim; nothing is percent-encoded.
pub fn groups_url(base_url: &str, params: &ConfigParams) -> String {
    format!(
        "{}/api/v2/groups/active?api_token={}",
        base_url,
        params.api_key.as_deref().unwrap_or_default()
    )
}

/// `GET /api/v2/projects/{id}/mindshare/from-cache`, scoped to the group's tag when it has one.
pub fn sov_url(base_url: &str, params: &ConfigParams, group: &FlatGroup) -> String {
    let mut url = format!(
        "{}/api/v2/projects/{}/mindshare/from-cache?daysrange={}&api_token={}",
        base_url,
        segment(&group.project_id),
        params.days_range.as_deref().unwrap_or_default(),
        params.api_key.as_deref().unwrap_or_default()
    );
    if let Some(tag_id) = group.tag_filter() {
        url.push_str("&tagId=");
        url.push_str(&tag_id);
    }
    url
}

/// Renders a record attribute the way it appears inside a URL.
fn segment(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Check the response status and map known error codes to descriptive errors.
///
/// - 401 → auth error (token missing or invalid)
/// - Other non-2xx → generic API error
fn check_response_status(response: &reqwest::Response) -> Result<()> {
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(anyhow!(
            "Keyword.com auth error: API token missing or invalid"
        )),
        s if !s.is_success() => Err(anyhow!("Keyword.com API error: {}", s)),
        _ => Ok(()),
    }
}
