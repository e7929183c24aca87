mod release;
mod status;
mod workspace;

pub use release::{
    GitOperationResult, PlannedTag, ReleaseInput, ReleaseOperation, ReleaseOutcome, ReleaseOutput,
};
pub use status::{StatusOperation, StatusOutput};
