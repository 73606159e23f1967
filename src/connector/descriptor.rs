//! Connection settings the host platform renders for the user.

use serde::Serialize;

/// Day ranges offered by the API's mindshare cache.
pub const DAYS_RANGE_OPTIONS: [u32; 5] = [7, 30, 90, 180, 365];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDescriptor {
    pub config_params: Vec<ConfigEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigEntry {
    Info {
        id: &'static str,
        text: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    TextInput {
        id: &'static str,
        name: &'static str,
        placeholder: &'static str,
        allow_override: bool,
    },
    #[serde(rename_all = "camelCase")]
    SelectSingle {
        id: &'static str,
        name: &'static str,
        help_text: &'static str,
        allow_override: bool,
        options: Vec<SelectOption>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// The connector's settings: API token (fixed per data source), project id
/// and day range (both overridable in reports).
pub fn connector_config() -> ConfigDescriptor {
    let options = DAYS_RANGE_OPTIONS
        .iter()
        .map(|days| SelectOption {
            label: format!("{} days", days),
            value: days.to_string(),
        })
        .collect();

    ConfigDescriptor {
        config_params: vec![
            ConfigEntry::Info {
                id: "instructions",
                text: "Enter your keyword.com API token to authenticate",
            },
            ConfigEntry::TextInput {
                id: "api_key",
                name: "Keyword.com API Token",
                placeholder: "xxxxxxxxxxxxxx",
                allow_override: false,
            },
            ConfigEntry::TextInput {
                id: "project_id",
                name: "Keyword.com Project ID #",
                placeholder: "12345",
                allow_override: true,
            },
            ConfigEntry::SelectSingle {
                id: "daysRange",
                name: "Date Range",
                help_text: "Select the date range for the requests",
                allow_override: true,
                options,
            },
        ],
    }
}
