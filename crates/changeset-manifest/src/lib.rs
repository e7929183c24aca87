//! Format-preserving reads and writes of `Cargo.toml` files.

mod error;
mod reader;
mod writer;

pub use error::{Access, ManifestError};
pub use reader::{has_inherited_version, read_document, read_version};
pub use writer::{update_dependency_requirement, verify_version, write_version};

pub type Result<T> = std::result::Result<T, ManifestError>;
