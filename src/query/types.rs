use serde::Deserialize;

use super::error::QueryError;
use super::filter::FileFilter;

/// Filter request for the owner's file listing, as sent by the client.
/// Field names preserve the existing wire contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesRequest {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub private_status: bool,
    #[serde(default)]
    pub public_status: bool,
    #[serde(default = "default_sort_field")]
    pub sort_field: String,
    #[serde(default)]
    pub sort_order: Option<String>,
}

fn default_sort_field() -> String {
    "file_name".to_string()
}

/// The closed set of record attributes a caller may sort on. Anything else
/// fails the request before it can reach a SQL identifier position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    FileName,
    SizeBytes,
    CreatedAt,
    Public,
}

impl SortField {
    pub fn parse(name: &str) -> Result<Self, QueryError> {
        match name {
            "file_name" => Ok(SortField::FileName),
            "size_bytes" => Ok(SortField::SizeBytes),
            "created_at" => Ok(SortField::CreatedAt),
            "public" => Ok(SortField::Public),
            other => Err(QueryError::UnknownSortField(other.to_string())),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::FileName => "file_name",
            SortField::SizeBytes => "size_bytes",
            SortField::CreatedAt => "created_at",
            SortField::Public => "public",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything that is not "desc" sorts ascending.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// A validated, store-executable query: matching predicate plus sort order.
#[derive(Debug, Clone)]
pub struct FileQuery {
    pub filter: FileFilter,
    pub sort: SortSpec,
}

impl FileQuery {
    pub fn build(req: &ListFilesRequest) -> Result<Self, QueryError> {
        let field = SortField::parse(&req.sort_field)?;
        let direction = SortDirection::parse(req.sort_order.as_deref().unwrap_or("asc"));

        Ok(Self {
            filter: FileFilter::new(
                &req.search,
                &req.types,
                req.private_status,
                req.public_status,
            ),
            sort: SortSpec { field, direction },
        })
    }
}
