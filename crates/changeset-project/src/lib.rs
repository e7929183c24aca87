mod config;
mod error;
mod manifest;
mod project;

pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";

pub use config::{ChangelogSetting, GitConfig, RootChangesetConfig, parse_root_config};
pub use error::ProjectError;
pub use project::{CargoProject, ProjectKind, discover_project};

pub type Result<T> = std::result::Result<T, ProjectError>;
