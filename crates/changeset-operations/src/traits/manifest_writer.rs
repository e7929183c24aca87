use std::path::Path;

use semver::Version;

use super::inherited_version_checker::InheritedVersionChecker;
use crate::Result;

pub trait ManifestWriter: InheritedVersionChecker + Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or written.
    fn write_version(&self, manifest_path: &Path, new_version: &Version) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the version does not match the expected value.
    fn verify_version(&self, manifest_path: &Path, expected: &Version) -> Result<()>;

    /// Points requirements on `package` inside `manifest_path` at
    /// `new_version`. Returns whether the file changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or written.
    fn update_dependency_requirement(
        &self,
        manifest_path: &Path,
        package: &str,
        new_version: &Version,
    ) -> Result<bool>;
}

impl<T: ManifestWriter + ?Sized> ManifestWriter for &T {
    fn write_version(&self, manifest_path: &Path, new_version: &Version) -> Result<()> {
        (**self).write_version(manifest_path, new_version)
    }

    fn verify_version(&self, manifest_path: &Path, expected: &Version) -> Result<()> {
        (**self).verify_version(manifest_path, expected)
    }

    fn update_dependency_requirement(
        &self,
        manifest_path: &Path,
        package: &str,
        new_version: &Version,
    ) -> Result<bool> {
        (**self).update_dependency_requirement(manifest_path, package, new_version)
    }
}
