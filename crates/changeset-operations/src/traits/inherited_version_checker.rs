use std::path::Path;

use changeset_core::PackageInfo;

use crate::Result;

/// Detects packages whose version is `version.workspace = true`.
///
/// Such a version lives in the root manifest and is shared, so it cannot be
/// bumped per package.
pub trait InheritedVersionChecker: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read.
    fn has_inherited_version(&self, manifest_path: &Path) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if any manifest cannot be read.
    fn find_packages_with_inherited_versions<'a>(
        &self,
        packages: impl IntoIterator<Item = &'a PackageInfo>,
    ) -> Result<Vec<String>>
    where
        Self: Sized,
    {
        let mut inherited = Vec::new();
        for pkg in packages {
            if self.has_inherited_version(&pkg.manifest_path())? {
                inherited.push(pkg.name.clone());
            }
        }
        Ok(inherited)
    }
}

impl<T: InheritedVersionChecker + ?Sized> InheritedVersionChecker for &T {
    fn has_inherited_version(&self, manifest_path: &Path) -> Result<bool> {
        (**self).has_inherited_version(manifest_path)
    }
}
