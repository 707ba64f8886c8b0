pub mod error;
pub mod filter;
pub mod types;

pub use error::QueryError;
pub use filter::{FileFilter, SqlFragment};
pub use types::{FileQuery, ListFilesRequest, SortDirection, SortField, SortSpec};
