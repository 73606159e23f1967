//! Request orchestration: the boundary the host platform calls into.
//!
//! # Data request
//!
//! ```text
//! config params ──normalize──► fetch groups ──► parse ──► filter by project id
//!                                                              │
//!                                                           flatten
//!                                                              │
//!            ┌──────────────── for each group, in order ───────┘
//!            ▼
//!      fetch SOV series ──► parse ──► one row per (date, point) ──► table
//! ```
//!
//! Any failure aborts the whole request with a [`UserError`]; partial tables
//! are never returned.

pub mod descriptor;

pub use descriptor::{connector_config, ConfigDescriptor, ConfigEntry, SelectOption};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::client::SovApi;
use crate::error::UserError;
use crate::fields::{self, FieldDescriptor, FieldId, OutputRow, RequestedField};
use crate::flatten::{filter_projects, flatten_projects, flatten_series, parse_projects};
use crate::model::FlatGroup;
use crate::params::{normalize, ConfigParams};
use crate::response::normalize_response;

/// Data request as sent by the host platform.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequest {
    #[serde(default)]
    pub config_params: ConfigParams,
    #[serde(default)]
    pub fields: Vec<RequestedField>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataResponse {
    pub schema: Vec<FieldDescriptor>,
    pub rows: Vec<OutputRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SchemaResponse {
    pub schema: Vec<FieldDescriptor>,
}

/// Share-of-voice connector over an injected API client.
#[derive(Clone)]
pub struct Connector {
    api: Arc<dyn SovApi>,
}

impl Connector {
    pub fn new(api: Arc<dyn SovApi>) -> Self {
        Self { api }
    }

    pub fn get_config(&self) -> ConfigDescriptor {
        connector_config()
    }

    /// Every field the connector can report.
    pub fn get_schema(&self) -> SchemaResponse {
        SchemaResponse {
            schema: fields::catalog(),
        }
    }

    pub fn is_admin_user(&self) -> bool {
        true
    }

    /// Fetches, flattens and formats the SOV table for the configured project.
    ///
    /// Groups are fetched strictly one after another so that rows come out in
    /// group order, then date-key order, then point order.
    pub async fn get_data(&self, request: DataRequest) -> Result<DataResponse, UserError> {
        let params = normalize(request.config_params);

        let groups = self.group_table(&params).await?;
        debug!(groups = groups.len(), "Groups flattened");

        let requested = fields::resolve(&request.fields);
        let mut table: Vec<OutputRow> = Vec::new();

        for group in &groups {
            match self.sov_rows(&params, group, &requested).await {
                Ok(rows) => {
                    debug!(rows = rows.len(), "SOV series formatted");
                    table.extend(rows);
                }
                Err(e) => {
                    warn!(error = %e, rows_so_far = table.len(), "SOV fetch failed");
                    return Err(UserError::sov(&e, &table));
                }
            }
        }

        info!(
            project_id = params.project_id.as_deref().unwrap_or_default(),
            groups = groups.len(),
            rows = table.len(),
            "Data request assembled"
        );

        Ok(DataResponse {
            schema: fields::schema_for(&request.fields),
            rows: table,
        })
    }

    async fn group_table(&self, params: &ConfigParams) -> Result<Vec<FlatGroup>, UserError> {
        let body = self.api.fetch_groups(params).await.map_err(|e| {
            warn!(error = %e, "Groups fetch failed");
            UserError::groups(&e, None)
        })?;
        debug!(bytes = body.len(), "Groups fetched");

        let projects = normalize_response(&body)
            .and_then(parse_projects)
            .map_err(|e| {
                warn!(error = %e, "Groups response could not be parsed");
                UserError::groups(&anyhow::Error::new(e), Some(&body))
            })?;

        let projects = filter_projects(projects, params.project_id.as_deref());
        debug!(projects = projects.len(), "Groups filtered");

        Ok(flatten_projects(&projects))
    }

    async fn sov_rows(
        &self,
        params: &ConfigParams,
        group: &FlatGroup,
        requested: &[Option<FieldId>],
    ) -> anyhow::Result<Vec<OutputRow>> {
        let body = self.api.fetch_sov(params, group).await?;
        debug!(bytes = body.len(), "SOV fetched");

        let data = normalize_response(&body).context("Invalid SOV response")?;
        debug!("SOV normalized");

        let rows = flatten_series(group, &data, requested).context("Invalid SOV series")?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Serves canned bodies and records every SOV lookup.
    struct StubApi {
        groups: Result<String, String>,
        sov: Vec<Result<String, String>>,
        calls: Mutex<Vec<FlatGroup>>,
    }

    impl StubApi {
        fn new(groups: &str, sov: &[&str]) -> Self {
            Self {
                groups: Ok(groups.to_string()),
                sov: sov.iter().map(|s| Ok(s.to_string())).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SovApi for StubApi {
        async fn fetch_groups(&self, _params: &ConfigParams) -> Result<String> {
            self.groups.clone().map_err(|e| anyhow!(e))
        }

        async fn fetch_sov(&self, _params: &ConfigParams, group: &FlatGroup) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(group.clone());
            match self.sov.get(index) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(e)) => Err(anyhow!(e.clone())),
                None => Err(anyhow!("unexpected SOV call #{}", index)),
            }
        }
    }

    fn request(fields: &[&str]) -> DataRequest {
        serde_json::from_value(json!({
            "configParams": {"api_key": "T", "project_id": "7", "daysRange": "30"},
            "fields": fields.iter().map(|f| json!({"name": f})).collect::<Vec<_>>()
        }))
        .unwrap()
    }

    const GROUPS: &str = r#"{"data":[{"project_id":7,"name":"P","keywords_count":{"ACTIVE":5},"tags_count":0,"tags":[]}]}"#;

    #[tokio::test]
    async fn test_single_group_scenario() {
        let api = Arc::new(StubApi::new(
            GROUPS,
            &[r#"{"data":{"2024-01-01":[{"url":"/x","clicks":3,"percentage":50}]}}"#],
        ));
        let connector = Connector::new(api.clone());

        let response = connector
            .get_data(request(&["project_id", "date", "clicks", "share"]))
            .await
            .unwrap();

        assert_eq!(response.rows.len(), 1);
        assert_eq!(
            response.rows[0].values,
            vec![json!(7), json!("2024-01-01"), json!(3), json!(0.5)]
        );
        let ids: Vec<&str> = response.schema.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["project_id", "date", "clicks", "share"]);
        assert_eq!(api.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_schema_aligned_with_rows_for_unknown_ids() {
        let api = Arc::new(StubApi::new(
            GROUPS,
            &[r#"{"data":{"2024-01-01":[{"url":"/x","clicks":3,"percentage":50}]}}"#],
        ));

        let response = Connector::new(api)
            .get_data(request(&["share", "bogus", "date"]))
            .await
            .unwrap();

        let ids: Vec<&str> = response.schema.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["share", "bogus", "date"]);
        for row in &response.rows {
            assert_eq!(row.values.len(), response.schema.len());
        }
        assert_eq!(
            response.rows[0].values,
            vec![json!(0.5), json!(""), json!("2024-01-01")]
        );
    }

    #[tokio::test]
    async fn test_rows_follow_group_order() {
        let groups = r#"{"data":[{"attributes":{"project_id":7,"name":"P","keywords_count":{"ACTIVE":5},"tags_count":2,"tags":[
            {"id":1,"name":"a","created_at":"c","updated_at":"u","keywords_count":1},
            {"id":2,"name":"b","created_at":"c","updated_at":"u","keywords_count":4}
        ]}}]}"#;
        let api = Arc::new(StubApi::new(
            groups,
            &[
                r#"{"data":{"2024-01-01":[{"url":"/a","clicks":1,"percentage":10}]}}"#,
                r#"{"data":{"2024-01-01":[{"url":"/b","clicks":2,"percentage":20}],"2024-01-02":[{"url":"/c","clicks":3,"percentage":30}]}}"#,
            ],
        ));
        let connector = Connector::new(api.clone());

        let response = connector
            .get_data(request(&["tag_name", "url"]))
            .await
            .unwrap();

        let values: Vec<Vec<serde_json::Value>> =
            response.rows.into_iter().map(|r| r.values).collect();
        assert_eq!(
            values,
            vec![
                vec![json!("a"), json!("/a")],
                vec![json!("b"), json!("/b")],
                vec![json!("b"), json!("/c")],
            ]
        );

        let calls = api.calls.lock().unwrap();
        assert_eq!(calls[0].tag_id, json!(1));
        assert_eq!(calls[1].tag_id, json!(2));
    }

    #[tokio::test]
    async fn test_project_mismatch_yields_empty_table() {
        let api = Arc::new(StubApi::new(GROUPS, &[]));
        let connector = Connector::new(api.clone());

        let mut req = request(&["clicks"]);
        req.config_params.project_id = Some("8".to_string());
        let response = connector.get_data(req).await.unwrap();

        assert!(response.rows.is_empty());
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_groups_fetch_failure() {
        let api = Arc::new(StubApi {
            groups: Err("connection refused".to_string()),
            sov: vec![],
            calls: Mutex::new(Vec::new()),
        });
        let err = Connector::new(api)
            .get_data(request(&["clicks"]))
            .await
            .unwrap_err();

        assert!(err.debug_text.contains("project and tag list"));
        assert!(err.debug_text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_groups_non_json_aborts_with_raw_response() {
        let api = Arc::new(StubApi::new("<html>Maintenance</html>", &[]));
        let err = Connector::new(api)
            .get_data(request(&["clicks"]))
            .await
            .unwrap_err();

        assert!(err.text.ends_with("API RESPONSE: <html>Maintenance</html>"));
        assert!(err.debug_text.contains("not valid JSON"));
    }

    #[tokio::test]
    async fn test_sov_failure_discards_partial_table() {
        let groups = r#"{"data":[{"project_id":7,"tags_count":2,"tags":[{"id":1},{"id":2}]}]}"#;
        let api = Arc::new(StubApi::new(
            groups,
            &[
                r#"{"data":{"2024-01-01":[{"url":"/a","clicks":1,"percentage":10}]}}"#,
                "not json",
            ],
        ));
        let err = Connector::new(api)
            .get_data(request(&["url"]))
            .await
            .unwrap_err();

        assert!(err.debug_text.starts_with("Error fetching SOV data from API"));
        assert!(err.debug_text.contains("Invalid SOV response"));
        assert!(err.text.contains(r#"DATA RETRIEVED: [{"values":["/a"]}]"#));
    }

    #[test]
    fn test_schema_and_config() {
        let connector = Connector::new(Arc::new(StubApi::new("{}", &[])));
        assert_eq!(connector.get_schema().schema.len(), 13);
        assert_eq!(connector.get_config().config_params.len(), 4);
        assert!(connector.is_admin_user());
    }
}
