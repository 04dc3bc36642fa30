#![deny(unsafe_code)]

//! Data model for APC dataset enrichment: semantic columns, the ordered
//! column registry, rows with an explicit NA sentinel, and metadata
//! records as handed over by external sources.

pub mod column;
pub mod dataset;
pub mod error;
pub mod numfmt;
pub mod registry;
pub mod row;

pub use column::{Column, OverwritePolicy, Requirement};
pub use dataset::{Dataset, SourceRow};
pub use error::{RegistryError, Result};
pub use numfmt::{NumberFormat, format_amount};
pub use registry::ColumnRegistry;
pub use row::{CellValue, MetadataRecord, NA, Row};
