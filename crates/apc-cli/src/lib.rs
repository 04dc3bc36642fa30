//! Library components of the APC enrichment CLI.

pub mod logging;
pub mod prompt;
pub mod sources;
