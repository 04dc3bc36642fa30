use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("role '{0}' is already registered")]
    DuplicateRole(String),
    #[error("role '{role}' is already assigned to column index {existing}, cannot reassign to {index}")]
    AlreadyAssigned {
        role: String,
        existing: usize,
        index: usize,
    },
    #[error("column index {index} is already claimed by role '{role}'")]
    IndexInUse { index: usize, role: String },
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
