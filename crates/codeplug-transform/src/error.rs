use thiserror::Error;

use codeplug_model::ModelError;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A stable id was kept across a transform that dropped its object.
    #[error("no grouplist or scanlist with id {id}; the id may be stale")]
    NotFound { id: String },

    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
