//! Schema-tree (JSON) encoding of the constraints file

pub mod canonical;
pub mod document;
pub mod reader;
pub mod schema;

pub use canonical::{canonical_file_content, render_canonical};
pub use document::SUPPORTED_VERSION;
pub use reader::{canonicalize, check_formatting, read_from_json, read_from_json_str};
