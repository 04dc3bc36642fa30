#![deny(unsafe_code)]

//! File-boundary I/O: CSV ingestion into clean row sequences and
//! quote-masked CSV output of enriched rows.

pub mod csv_table;
pub mod writer;

pub use csv_table::{HeaderMode, read_dataset};
pub use writer::write_output;
