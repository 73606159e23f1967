//! HTTP front end for the Keyword.com share-of-voice connector.
//!
//! ```text
//! Reporting platform
//!          ↓  (config / schema / data requests)
//! ┌─────────────────────────────────────────┐
//! │       connector-server (axum)            │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       mindshare::Connector               │
//! │  - fetch groups, then SOV per group      │
//! │  - flatten into rows                     │
//! └─────────────────────────────────────────┘
//!          ↓
//!     Keyword.com API
//! ```

pub mod api;

pub use api::{create_router, ApiState};
