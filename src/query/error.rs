use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),
}
