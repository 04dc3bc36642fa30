use thiserror::Error;

use apc_model::RegistryError;

#[derive(Debug, Error)]
pub enum EnrichError {
    /// A mandatory numeric cell did not parse under the active number
    /// format. Fatal: output correctness depends on canonical amounts.
    #[error(
        "could not process the monetary value '{value}' in column {column}: \
         the value is not a number, or its decimal mark does not match the \
         active number format (try the other --decimal-mark setting)"
    )]
    ValueParse { value: String, column: String },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, EnrichError>;
