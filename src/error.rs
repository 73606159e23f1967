use serde::Serialize;
use std::fmt;

use crate::fields::OutputRow;

/// Generic message shown to the end user when a data request has to be aborted.
pub const UNRECOVERABLE_MESSAGE: &str = "The connector has encountered an unrecoverable error. \
     Please screenshot this error popup and contact the connector maintainer if this error persists.";

/// Errors raised while turning an API response body into records.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Body is not valid JSON.
    InvalidJson(String),
    /// Payload does not have the shape the flattener expects.
    UnexpectedShape(String),
    /// A date key of the series maps to something other than a list.
    DateNotArray(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidJson(e) => write!(f, "response is not valid JSON: {}", e),
            ParseError::UnexpectedShape(e) => write!(f, "unexpected response shape: {}", e),
            ParseError::DateNotArray(date) => {
                write!(f, "series entry for date '{}' is not a list", date)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Fatal error for a data request, split into the text shown to the user
/// and the debug text carrying the underlying cause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserError {
    pub text: String,
    pub debug_text: String,
}

impl UserError {
    /// Groups listing could not be fetched, parsed or flattened.
    ///
    /// The raw API response, when one was received, is appended to the text.
    pub fn groups(error: &anyhow::Error, response: Option<&str>) -> Self {
        Self {
            text: format!(
                "{} API RESPONSE: {}",
                UNRECOVERABLE_MESSAGE,
                response.unwrap_or_default()
            ),
            debug_text: format!(
                "Error fetching project and tag list data from API. Exception details: {:#}",
                error
            ),
        }
    }

    /// SOV series for one of the groups could not be fetched or parsed.
    ///
    /// The rows assembled before the failure are appended to the text.
    pub fn sov(error: &anyhow::Error, partial: &[OutputRow]) -> Self {
        let retrieved = serde_json::to_string(partial).unwrap_or_default();
        Self {
            text: format!("{} DATA RETRIEVED: {}", UNRECOVERABLE_MESSAGE, retrieved),
            debug_text: format!(
                "Error fetching SOV data from API. Exception details: {:#}",
                error
            ),
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.debug_text)
    }
}

impl std::error::Error for UserError {}
