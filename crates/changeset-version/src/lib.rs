use changeset_core::BumpType;
use semver::Version;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("cannot apply bump 'none' to version {version}")]
    NoBump { version: Version },

    #[error("cannot apply bump '{bump_type}' to version {version}: component overflows")]
    Overflow {
        version: Version,
        bump_type: BumpType,
    },
}

/// Applies `bump_type` to `version`.
///
/// The result is always a plain release version: pre-release and build
/// metadata on the input are dropped.
///
/// # Errors
///
/// Returns [`VersionError::NoBump`] for [`BumpType::None`]; callers only ask
/// for versions of packages that are actually released. Returns
/// [`VersionError::Overflow`] when the bumped component is already
/// `u64::MAX`.
pub fn bump_version(version: &Version, bump_type: BumpType) -> Result<Version, VersionError> {
    let Version {
        major,
        minor,
        patch,
        ..
    } = *version;

    let bumped = match bump_type {
        BumpType::Major => major.checked_add(1).map(|major| Version::new(major, 0, 0)),
        BumpType::Minor => minor
            .checked_add(1)
            .map(|minor| Version::new(major, minor, 0)),
        BumpType::Patch => patch
            .checked_add(1)
            .map(|patch| Version::new(major, minor, patch)),
        BumpType::None => {
            return Err(VersionError::NoBump {
                version: version.clone(),
            });
        }
    };

    bumped.ok_or_else(|| VersionError::Overflow {
        version: version.clone(),
        bump_type,
    })
}
