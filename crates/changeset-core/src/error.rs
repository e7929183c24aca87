use thiserror::Error;

/// Inconsistencies in the workspace description, detected before planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("package '{name}' is declared more than once")]
    DuplicatePackage { name: String },

    #[error("package '{package}' depends on '{dependency}', which is not part of the workspace")]
    UnknownDependency { package: String, dependency: String },

    #[error("linked group member '{member}' is not part of the workspace")]
    UnknownLinkedMember { member: String },

    #[error("linked group [{}] needs at least two distinct packages", members.join(", "))]
    LinkedGroupTooSmall { members: Vec<String> },

    #[error("package '{package}' belongs to more than one linked group")]
    OverlappingLinkedGroups { package: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
