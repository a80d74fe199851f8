//! Per-run workspace directories: allocation, static resource provisioning,
//! and drop-guarded deletion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::runner::StaticResource;

/// An isolated working directory owned by a single run. Dropping the value
/// deletes the directory unless [`persist`](Workspace::persist) was called,
/// which is what guarantees cleanup on every exit path of the runner.
pub(crate) struct Workspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl Workspace {
    pub(crate) fn allocate(base: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("unidesign_");
        let dir = match base {
            Some(base) => builder.tempdir_in(base)?,
            None => builder.tempdir()?,
        };
        let path = dir.path().to_path_buf();
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Makes each resource bundle visible under its fixed name, preferring a
    /// symlink and falling back to a recursive copy where the platform or
    /// filesystem refuses one. Existing entries are never overwritten.
    pub(crate) fn provision(&self, resources: &[StaticResource]) -> io::Result<()> {
        for resource in resources {
            let target = self.path.join(resource.name);
            if target.exists() {
                continue;
            }
            materialize(&resource.source, &target)?;
            debug!(name = resource.name, "resource bundle provisioned");
        }
        Ok(())
    }

    /// Detaches the directory from the drop guard so it outlives this value.
    pub(crate) fn persist(mut self) -> PathBuf {
        match self.dir.take() {
            Some(dir) => dir.keep(),
            None => self.path.clone(),
        }
    }
}

fn materialize(source: &Path, target: &Path) -> io::Result<()> {
    if symlink(source, target).is_ok() {
        return Ok(());
    }
    if source.is_dir() {
        copy_tree(source, target)
    } else {
        fs::copy(source, target).map(|_| ())
    }
}

#[cfg(unix)]
fn symlink(source: &Path, target: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn symlink(source: &Path, target: &Path) -> io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, target)
    } else {
        std::os::windows::fs::symlink_file(source, target)
    }
}

#[cfg(not(any(unix, windows)))]
fn symlink(_source: &Path, _target: &Path) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}

fn copy_tree(source: &Path, target: &Path) -> io::Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let dest = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}
