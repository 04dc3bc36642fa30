#![deny(unsafe_code)]

//! Metadata reconciliation for APC datasets: the overwrite resolver with
//! its memoized per-column decision store, the boundary traits for
//! external metadata/membership sources, and the engine that merges
//! row-native values with source records in priority order.

pub mod engine;
pub mod error;
pub mod resolver;
pub mod sources;
pub mod unify;

pub use engine::{Diagnostic, EnrichedOutput, EnrichedRow, ReconciliationEngine};
pub use error::{EnrichError, Result};
pub use resolver::{Conflict, DecisionProvider, FixedDecision, OverwriteDecision, OverwriteResolver};
pub use sources::{MembershipOutcome, MembershipSource, MetadataSource, SourceResult};
pub use unify::{IdentityUnifier, MapUnifier, ValueUnifier};
