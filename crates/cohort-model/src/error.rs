use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid field identifier: {0:?}")]
    InvalidFieldId(String),
    #[error("invalid participant identifier: {0:?}")]
    InvalidParticipantId(String),
    #[error("not a biobank column name: {0:?}")]
    InvalidColumnName(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
