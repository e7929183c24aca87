mod changeset_io;
mod git;
mod manifest;
mod project;

pub use changeset_io::FileSystemChangesetIO;
pub use git::Git2Provider;
pub use manifest::FileSystemManifestWriter;
pub use project::FileSystemProjectProvider;
