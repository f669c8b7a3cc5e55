use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// A CSV header does not name a known container type (or pattern/repl
    /// column). Misspelled headers would otherwise silently drop directives.
    #[error("unknown column {column:?} in {table} table")]
    UnknownColumn { table: &'static str, column: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
