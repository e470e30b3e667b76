use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid entity id: {0:?}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
