//! User-entered connection parameters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PACKAGE: &str = "googleapis";

/// Connection parameters as entered in the host platform's config screen.
///
/// Only `package` is normalized. The token, project id and day range are
/// passed through as-is; bad values surface as API failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(
        default,
        rename = "daysRange",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Any other keys the host sends along, kept untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fills in defaults: `package` falls back to [`DEFAULT_PACKAGE`], and a
/// supplied package list is trimmed segment by segment.
pub fn normalize(mut params: ConfigParams) -> ConfigParams {
    let package = match params.package.as_deref() {
        None | Some("") => DEFAULT_PACKAGE.to_string(),
        Some(list) => list.split(',').map(str::trim).collect::<Vec<_>>().join(","),
    };
    params.package = Some(package);
    params
}
