//! Discovery of a UniDesign installation: the compiled binary plus the
//! static resource bundles (`library`, `wread`, `extbin`) the binary expects
//! to find inside its working directory.

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming the installation root for [`Installation::from_env`].
pub const HOME_ENV_VAR: &str = "UNIDESIGN_HOME";

/// Fixed relative names of the read-only resource bundles every run needs.
pub const RESOURCE_BUNDLES: [&str; 3] = ["library", "wread", "extbin"];

const BINARY_NAMES: [&str; 2] = ["UniDesign", "UniDesign.exe"];
const BINARY_SUBDIRS: [&str; 2] = ["build", "bin"];

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("UNIDESIGN_HOME is not set; pass an explicit installation root")]
    HomeNotSet,

    #[error("UniDesign binary could not be located; checked {attempted:?}")]
    BinaryNotFound { attempted: Vec<PathBuf> },

    #[error("UniDesign binary at {path} exists but is not executable", path = path.display())]
    BinaryNotExecutable { path: PathBuf },

    #[error("expected resource directory '{name}' at {path}", path = path.display())]
    ResourceMissing { name: &'static str, path: PathBuf },
}

/// A validated UniDesign installation root.
#[derive(Debug, Clone)]
pub struct Installation {
    root: PathBuf,
    binary: PathBuf,
    library: PathBuf,
    wread: PathBuf,
    extbin: PathBuf,
}

impl Installation {
    /// Validates `root` as an installation: locates an executable binary in
    /// the root itself or its `build`/`bin` subdirectories and checks that
    /// all resource bundles are present.
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self, DiscoveryError> {
        let root = root.into();
        let binary = locate_binary(&root)?;
        let library = resource_dir(&root, "library")?;
        let wread = resource_dir(&root, "wread")?;
        let extbin = resource_dir(&root, "extbin")?;
        Ok(Self {
            root,
            binary,
            library,
            wread,
            extbin,
        })
    }

    /// Discovers the installation named by the `UNIDESIGN_HOME` environment
    /// variable.
    pub fn from_env() -> Result<Self, DiscoveryError> {
        match env::var_os(HOME_ENV_VAR) {
            Some(root) => Self::discover(PathBuf::from(root)),
            None => Err(DiscoveryError::HomeNotSet),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn library_dir(&self) -> &Path {
        &self.library
    }

    pub fn wread_dir(&self) -> &Path {
        &self.wread
    }

    pub fn extbin_dir(&self) -> &Path {
        &self.extbin
    }
}

fn resource_dir(root: &Path, name: &'static str) -> Result<PathBuf, DiscoveryError> {
    let path = root.join(name);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(DiscoveryError::ResourceMissing { name, path })
    }
}

fn locate_binary(root: &Path) -> Result<PathBuf, DiscoveryError> {
    let mut attempted = Vec::new();
    let mut found_non_executable = None;

    let search_roots = std::iter::once(root.to_path_buf())
        .chain(BINARY_SUBDIRS.iter().map(|subdir| root.join(subdir)));
    for dir in search_roots {
        for name in BINARY_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                if is_executable(&candidate) {
                    return Ok(candidate);
                }
                found_non_executable.get_or_insert(candidate.clone());
            }
            attempted.push(candidate);
        }
    }

    match found_non_executable {
        Some(path) => Err(DiscoveryError::BinaryNotExecutable { path }),
        None => Err(DiscoveryError::BinaryNotFound { attempted }),
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}
