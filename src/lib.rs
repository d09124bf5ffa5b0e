// API Ingestion Engine
// Author: Gabriel Demetrios Lafis

//! # API Ingestion Engine
//!
//! A secure API ingestion and schema inference engine written in Rust.
//!
//! ## Features
//!
//! - Request validation (URL safety, header allow-listing, method and payload checks)
//! - Response sanitization against embedded script and markup content
//! - Sliding-window rate limiting with per-instance, injectable state
//! - Automatic schema detection for arbitrary JSON payloads
//! - Table column projection for tabular display of detected schemas
//! - A single orchestrated entry point producing a uniform result envelope
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//!
//! use api_ingestion_engine::{
//!     request::{ApiClient, RequestConfig},
//!     utils::Config,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiClient::new(Config::default());
//!
//!     let result = client
//!         .make_api_request(RequestConfig {
//!             url: "https://jsonplaceholder.typicode.com/posts".to_string(),
//!             method: Some("GET".to_string()),
//!             headers: HashMap::new(),
//!             body: None,
//!             client_id: Some("demo".to_string()),
//!         })
//!         .await;
//!
//!     if result.success {
//!         println!("fetched {} records", result.metadata.record_count.unwrap_or(0));
//!         for column in &result.columns {
//!             println!("column: {} ({})", column.title, column.data_type.as_str());
//!         }
//!     } else {
//!         println!("request failed: {}", result.error.unwrap_or_default());
//!     }
//! }
//! ```

pub mod request;
pub mod schema;
pub mod security;
pub mod utils;

// Re-export main types
pub use request::{ApiClient, RequestConfig, RequestResult, TestResult};
pub use schema::{detect_api_schema, generate_table_columns, ColumnSpec, SchemaInfo};
pub use security::{sanitize_api_response, validate_api_request, RateLimiter};
pub use utils::Config;
