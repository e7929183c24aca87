use changeset_version::VersionError;
use thiserror::Error;

/// Conditions that only a defect in the planner can produce.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("dependency propagation did not converge within {rounds} rounds")]
    PropagationDidNotConverge { rounds: usize },

    #[error("package '{package}' reached version calculation without a bump")]
    NoBump { package: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("changeset '{changeset_id}' references unknown package '{package}'")]
    UnknownPackage {
        changeset_id: String,
        package: String,
    },

    #[error("changeset id '{id}' appears more than once")]
    DuplicateChangeset { id: String },

    #[error("cannot compute the next version of '{package}'")]
    VersionOverflow {
        package: String,
        #[source]
        source: VersionError,
    },

    #[error("release planner invariant violated")]
    InvariantViolation(#[from] InvariantViolation),
}
