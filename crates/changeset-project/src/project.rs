use std::collections::HashSet;
use std::path::{Path, PathBuf};

use changeset_core::PackageInfo;
use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexMap;
use semver::Version;

use crate::error::ProjectError;
use crate::manifest::{CargoManifest, DependencyTable, Package, VersionField, read_manifest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    VirtualWorkspace,
    WorkspaceWithRoot,
    SinglePackage,
}

/// A discovered Cargo project.
///
/// `packages` are in discovery order: the root package first (if any), then
/// members in glob expansion order. Each package carries its dependency edges
/// to other packages of the same project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoProject {
    pub root: PathBuf,
    pub kind: ProjectKind,
    pub packages: Vec<PackageInfo>,
}

impl CargoProject {
    #[must_use]
    pub fn is_workspace(&self) -> bool {
        self.kind != ProjectKind::SinglePackage
    }
}

/// Dependency edges of one package before they are narrowed to the project.
struct DiscoveredPackage {
    info: PackageInfo,
    dependencies: Vec<(String, String)>,
}

/// # Errors
///
/// Returns `ProjectError` if no project root can be found or if manifest parsing fails.
pub fn discover_project(start_dir: &Path) -> Result<CargoProject, ProjectError> {
    let start_dir = start_dir
        .canonicalize()
        .map_err(|source| ProjectError::io(start_dir, source))?;

    let (root, manifest) = find_project_root(&start_dir)?;
    let kind = determine_project_kind(&manifest);
    let discovered = collect_packages(&root, &manifest, kind)?;
    let packages = link_internal_dependencies(discovered);

    Ok(CargoProject {
        root,
        kind,
        packages,
    })
}

fn find_project_root(start_dir: &Path) -> Result<(PathBuf, CargoManifest), ProjectError> {
    let mut fallback: Option<(PathBuf, CargoManifest)> = None;

    for dir in start_dir.ancestors() {
        let manifest_path = dir.join("Cargo.toml");
        if !manifest_path.exists() {
            continue;
        }

        let manifest = read_manifest(&manifest_path)?;
        if manifest.workspace.is_some() {
            return Ok((dir.to_path_buf(), manifest));
        }
        if manifest.package.is_some() && fallback.is_none() {
            fallback = Some((dir.to_path_buf(), manifest));
        }
    }

    fallback.ok_or_else(|| ProjectError::NoManifest {
        start_dir: start_dir.to_path_buf(),
    })
}

fn determine_project_kind(manifest: &CargoManifest) -> ProjectKind {
    match (&manifest.workspace, &manifest.package) {
        (Some(_), Some(_)) => ProjectKind::WorkspaceWithRoot,
        (None, Some(_)) => ProjectKind::SinglePackage,
        (Some(_) | None, None) => ProjectKind::VirtualWorkspace,
    }
}

fn collect_packages(
    root: &Path,
    manifest: &CargoManifest,
    kind: ProjectKind,
) -> Result<Vec<DiscoveredPackage>, ProjectError> {
    let workspace_version = manifest
        .workspace
        .as_ref()
        .and_then(|ws| ws.package.as_ref())
        .and_then(|pkg| pkg.version.as_deref());
    let empty = DependencyTable::new();
    let workspace_deps = manifest
        .workspace
        .as_ref()
        .map_or(&empty, |ws| &ws.dependencies);

    let describe = |dir: &Path, manifest: &CargoManifest, package: &Package| {
        let manifest_path = dir.join("Cargo.toml");
        let version = resolve_version(package.version.as_ref(), workspace_version, &manifest_path)?;
        let dependencies = resolve_dependencies(&package.name, manifest, workspace_deps)?;
        Ok::<_, ProjectError>(DiscoveredPackage {
            info: PackageInfo::new(package.name.clone(), version, dir),
            dependencies,
        })
    };

    let mut packages = Vec::new();

    if let Some(package) = &manifest.package {
        packages.push(describe(root, manifest, package)?);
    }
    if kind == ProjectKind::SinglePackage {
        return Ok(packages);
    }

    if let Some(workspace) = &manifest.workspace {
        let members = workspace.members.as_deref().unwrap_or(&[]);
        let excludes = workspace.exclude.as_deref().unwrap_or(&[]);

        for pattern in members {
            for member_dir in expand_glob_pattern(root, pattern, excludes)? {
                let member_manifest_path = member_dir.join("Cargo.toml");
                if !member_manifest_path.exists() {
                    continue;
                }

                let member_manifest = read_manifest(&member_manifest_path)?;
                if let Some(package) = &member_manifest.package {
                    packages.push(describe(&member_dir, &member_manifest, package)?);
                }
            }
        }
    }

    Ok(packages)
}

/// Resolves `[dependencies]` and `[build-dependencies]` to `(package, requirement)`
/// pairs. Path-only dependencies get the requirement `*`.
fn resolve_dependencies(
    package: &str,
    manifest: &CargoManifest,
    workspace_deps: &DependencyTable,
) -> Result<Vec<(String, String)>, ProjectError> {
    manifest
        .release_dependencies()
        .map(|(key, spec)| {
            let spec = if spec.is_inherited() {
                workspace_deps
                    .get(key)
                    .ok_or_else(|| ProjectError::MissingWorkspaceDependency {
                        package: package.to_string(),
                        dependency: key.clone(),
                    })?
            } else {
                spec
            };
            Ok::<_, ProjectError>((
                spec.package_name(key).to_string(),
                spec.requirement().unwrap_or("*").to_string(),
            ))
        })
        .collect()
}

fn link_internal_dependencies(discovered: Vec<DiscoveredPackage>) -> Vec<PackageInfo> {
    let names: HashSet<String> = discovered.iter().map(|p| p.info.name.clone()).collect();

    discovered
        .into_iter()
        .map(|DiscoveredPackage { mut info, dependencies }| {
            let internal: IndexMap<String, String> = dependencies
                .into_iter()
                .filter(|(name, _)| *name != info.name && names.contains(name))
                .collect();
            info.dependencies = internal;
            info
        })
        .collect()
}

fn resolve_version(
    version_field: Option<&VersionField>,
    workspace_version: Option<&str>,
    manifest_path: &Path,
) -> Result<Version, ProjectError> {
    let version_str = match version_field {
        Some(VersionField::Literal(v)) => v.as_str(),
        Some(VersionField::Inherited(inherited)) if inherited.workspace => workspace_version
            .ok_or_else(|| ProjectError::VersionUnset {
                path: manifest_path.to_path_buf(),
                key: "workspace.package.version",
            })?,
        Some(VersionField::Inherited(_)) | None => {
            return Err(ProjectError::VersionUnset {
                path: manifest_path.to_path_buf(),
                key: "package.version",
            });
        }
    };

    version_str
        .parse()
        .map_err(|source| ProjectError::BadVersion {
            path: manifest_path.to_path_buf(),
            raw: version_str.to_string(),
            source,
        })
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, ProjectError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ProjectError::MemberPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn expand_glob_pattern(
    root: &Path,
    pattern: &str,
    excludes: &[String],
) -> Result<Vec<PathBuf>, ProjectError> {
    let glob = compile_glob(pattern)?;
    let excludes = excludes
        .iter()
        .map(|ex| compile_glob(ex))
        .collect::<Result<Vec<_>, _>>()?;

    let mut dirs = Vec::new();
    collect_matching_dirs(root, root, &glob, &excludes, &mut dirs)?;
    dirs.sort();

    Ok(dirs)
}

fn collect_matching_dirs(
    base: &Path,
    current: &Path,
    glob: &GlobMatcher,
    excludes: &[GlobMatcher],
    results: &mut Vec<PathBuf>,
) -> Result<(), ProjectError> {
    let entries = std::fs::read_dir(current).map_err(|source| ProjectError::io(current, source))?;
    for entry in entries {
        let path = entry.map_err(|source| ProjectError::io(current, source))?.path();
        if !path.is_dir() {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base) else {
            continue;
        };
        if excludes.iter().any(|ex| ex.is_match(relative)) {
            continue;
        }
        if glob.is_match(relative) {
            results.push(path.clone());
        }

        collect_matching_dirs(base, &path, glob, excludes, results)?;
    }

    Ok(())
}
