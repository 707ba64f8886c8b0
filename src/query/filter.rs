use serde_json::Value;

use crate::store::models::FileRecord;

/// Composable matching predicate over an owner's file records.
///
/// The same filter evaluates two ways: as an in-memory predicate
/// ([`matches`](Self::matches)) and as a parameterized SQL fragment
/// ([`to_sql`](Self::to_sql)). Both read:
/// `file_name` contains `search` (case-insensitive) AND ends in one of
/// `types` (case-insensitive) AND, when exactly one visibility flag was
/// requested, `public` equals that flag.
#[derive(Debug, Clone)]
pub struct FileFilter {
    search: String,
    types: Vec<String>,
    visibility: Option<bool>,
}

/// A WHERE fragment with positional placeholders and its bind parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<Value>,
}

impl FileFilter {
    pub fn new(search: &str, types: &[String], private_status: bool, public_status: bool) -> Self {
        // Exactly one flag set constrains visibility; both or neither means
        // "all records". The symmetric rule is intentional wire behavior.
        let visibility = match (private_status, public_status) {
            (true, false) => Some(false),
            (false, true) => Some(true),
            _ => None,
        };

        Self {
            search: search.to_lowercase(),
            types: types.iter().map(|t| t.to_lowercase()).collect(),
            visibility,
        }
    }

    pub fn visibility(&self) -> Option<bool> {
        self.visibility
    }

    /// In-memory evaluation of the predicate.
    pub fn matches(&self, record: &FileRecord) -> bool {
        let name = record.file_name.to_lowercase();

        if !name.contains(&self.search) {
            return false;
        }

        // An empty suffix set leaves names unconstrained
        if !self.types.is_empty() && !self.types.iter().any(|t| name.ends_with(t.as_str())) {
            return false;
        }

        match self.visibility {
            Some(public) => record.public == public,
            None => true,
        }
    }

    /// SQL rendering of the predicate, with placeholders numbered from
    /// `first_param`. Returns an empty clause when nothing is constrained.
    pub fn to_sql(&self, first_param: usize) -> SqlFragment {
        let mut conditions = Vec::new();
        let mut params: Vec<Value> = Vec::new();
        let mut next = first_param;

        if !self.search.is_empty() {
            conditions.push(format!("file_name ILIKE ${}", next));
            params.push(Value::String(format!("%{}%", like_escape(&self.search))));
            next += 1;
        }

        if !self.types.is_empty() {
            let mut suffixes = Vec::new();
            for t in &self.types {
                suffixes.push(format!("file_name ILIKE ${}", next));
                params.push(Value::String(format!("%{}", like_escape(t))));
                next += 1;
            }
            conditions.push(format!("({})", suffixes.join(" OR ")));
        }

        if let Some(public) = self.visibility {
            conditions.push(format!("public = ${}", next));
            params.push(Value::Bool(public));
        }

        SqlFragment {
            clause: conditions.join(" AND "),
            params,
        }
    }
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn like_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
