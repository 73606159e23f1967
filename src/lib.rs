//! Keyword.com share-of-voice connector for dashboarding platforms.
//!
//! Fetches a project's tags and its "mindshare" series from the Keyword.com
//! API and shapes them into a flat table the host platform can chart.
//!
//! # Usage
//!
//! ```no_run
//! use mindshare::client::KeywordClient;
//! use mindshare::config::ServiceConfig;
//! use mindshare::connector::{Connector, DataRequest};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ServiceConfig::from_env()?;
//! let connector = Connector::new(Arc::new(KeywordClient::new(&config.api)?));
//!
//! let request: DataRequest = serde_json::from_str(
//!     r#"{"configParams": {"api_key": "T", "project_id": "7", "daysRange": "30"},
//!         "fields": [{"name": "date"}, {"name": "share"}]}"#,
//! )?;
//! let table = connector.get_data(request).await?;
//! println!("{} rows", table.rows.len());
//! # Ok(())
//! # }
//! ```

// API client and response envelope
pub mod client;
pub mod response;

// Service and connection configuration
pub mod config;
pub mod params;

// Records, flattening and field formatting
pub mod fields;
pub mod flatten;
pub mod model;

// Request orchestration
pub mod connector;

pub mod error;

pub use connector::{Connector, DataRequest, DataResponse};
pub use error::{ParseError, UserError};
