//! Reading of changeset files.
//!
//! A changeset file is markdown with a YAML front matter block that maps
//! package names to bump types. An optional `category` key classifies the
//! change; the body below the front matter is the summary.

mod error;
mod parse;

pub use error::{FormatError, FrontMatterError, Result, ValidationError};
pub use parse::{CHANGESET_EXTENSION, MAX_INPUT_SIZE, parse_changeset};
