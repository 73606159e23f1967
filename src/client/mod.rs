mod keyword;

pub use keyword::{groups_url, sov_url, KeywordClient};

use anyhow::Result;
use async_trait::async_trait;

use crate::model::FlatGroup;
use crate::params::ConfigParams;

/// Source of the two raw API payloads the connector works from.
///
/// Implementations return the response body untouched; parsing happens in
/// the connector so that the raw text can be shown when it fails.
#[async_trait]
pub trait SovApi: Send + Sync {
    /// Active projects and tags of the account.
    async fn fetch_groups(&self, params: &ConfigParams) -> Result<String>;

    /// Share-of-voice series for one group (whole project, or one tag).
    async fn fetch_sov(&self, params: &ConfigParams, group: &FlatGroup) -> Result<String>;
}
