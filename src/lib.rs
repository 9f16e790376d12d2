//! Job board scraper built around label-driven field extraction
//!
//! Listing pages are parsed into row summaries; each row's detail page is
//! run through a cascade of extraction strategies:
//! - page heading (titles)
//! - table rows
//! - definition lists
//! - labelled page sections (skills, descriptions)
//! - loose text adjacency
//!
//! The merged records are exported as delimited text.

pub mod config;
pub mod document;
pub mod driver;
pub mod error;
pub mod export;
pub mod extractors;
pub mod fetch;
pub mod listing;
pub mod record;
pub mod robots;

pub use config::{default_field_specs, FieldKind, FieldSpec, ListingLayout, ScraperConfig};
pub use document::Document;
pub use driver::Driver;
pub use error::{ConfigError, FetchError};
pub use export::{export_to_path, write_records, Column, ExportOptions};
pub use extractors::{extract, ExtractionResult, Extractor, Strategy};
pub use fetch::{Fetch, HttpFetcher};
pub use listing::{parse_listing, RowSummary};
pub use record::JobRecord;
