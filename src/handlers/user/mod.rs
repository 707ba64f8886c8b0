pub mod check;
pub mod delete;
pub mod files;
pub mod name;
pub mod visibility;

// Re-export handler functions for use in routing
pub use check::check;
pub use delete::delete_file;
pub use files::{check_files, files};
pub use name::get_name;
pub use visibility::make_public;
