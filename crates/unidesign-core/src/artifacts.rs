//! Output artifact handles and workspace relocation.
//!
//! After a run finishes, the expected output files are probed under the
//! workspace. Depending on the caller's retention choice the files are
//! either wrapped in place (the whole workspace is kept) or copied into a
//! fresh directory while the workspace, undeclared files included, is
//! deleted. Either way the caller ends up with exactly one retained
//! directory and a [`Cleanup`] that removes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Handle to a single file produced by a UniDesign run.
///
/// The handle does not own the file exclusively; several handles may point
/// into the same retained directory, and the directory's [`Cleanup`] is what
/// removes them all.
#[derive(Debug, Clone)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_to_string(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    /// Copies the artifact into `dir` under its existing file name.
    pub fn copy_into(&self, dir: &Path) -> io::Result<PathBuf> {
        let name = self.path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "artifact path has no file name")
        })?;
        self.copy_as(dir, name)
    }

    /// Copies the artifact into `dir` under a caller-chosen name.
    pub fn copy_as(&self, dir: &Path, name: impl AsRef<Path>) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let dest = dir.join(name.as_ref());
        fs::copy(&self.path, &dest)?;
        Ok(dest)
    }
}

/// Deletes the directory that holds a job's retained files.
#[derive(Debug)]
pub struct Cleanup {
    dir: PathBuf,
    done: bool,
}

impl Cleanup {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self { dir, done: false }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Removes the retained directory. Safe to invoke repeatedly; a
    /// directory that is already gone is not an error.
    pub fn run(&mut self) -> io::Result<()> {
        if self.done {
            return Ok(());
        }
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.done = true;
        Ok(())
    }
}

/// Re-roots an absolute expected path onto the workspace by its file name.
/// Relative paths pass through unchanged.
pub(crate) fn workspace_relative(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

/// Wraps the expected file as an [`Artifact`] if it exists under `root`.
/// Absence is not an error; most commands produce only a subset of their
/// possible outputs.
pub(crate) fn probe(root: &Path, relative: &Path) -> Option<Artifact> {
    let candidate = root.join(workspace_relative(relative));
    candidate.exists().then(|| Artifact::new(candidate))
}

/// Settles a finished run's workspace into its retained form.
///
/// With `keep_workspace` the workspace itself is retained and becomes the
/// cleanup target. Otherwise the discovered expected files are copied into a
/// fresh directory, preserving their relative layout, and the original
/// workspace is deleted in full.
pub(crate) fn relocate_workspace(
    workdir: &Path,
    expected: &[PathBuf],
    keep_workspace: bool,
) -> io::Result<(PathBuf, Cleanup)> {
    if keep_workspace {
        return Ok((workdir.to_path_buf(), Cleanup::new(workdir.to_path_buf())));
    }

    let destination = tempfile::Builder::new()
        .prefix("unidesign_artifacts_")
        .tempdir()?
        .keep();
    for relative in expected {
        let relative = workspace_relative(relative);
        let source = workdir.join(&relative);
        if !source.exists() {
            continue;
        }
        let target = destination.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&source, &target)?;
    }
    if let Err(err) = fs::remove_dir_all(workdir) {
        debug!(workdir = %workdir.display(), %err, "could not remove original workspace");
    }
    Ok((destination.clone(), Cleanup::new(destination)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workdir_with(files: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let workdir = tmp.path().join("work");
        fs::create_dir(&workdir).unwrap();
        for name in files {
            let path = workdir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, *name).unwrap();
        }
        (tmp, workdir)
    }

    #[test]
    fn artifact_reads_text_and_bytes() {
        let (_tmp, workdir) = workdir_with(&["out.txt"]);
        let artifact = probe(&workdir, Path::new("out.txt")).unwrap();

        assert_eq!(artifact.read_to_string().unwrap(), "out.txt");
        assert_eq!(artifact.read_bytes().unwrap(), b"out.txt");
    }

    #[test]
    fn artifact_copies_under_default_and_custom_names() {
        let (_tmp, workdir) = workdir_with(&["out.txt"]);
        let dest = tempfile::tempdir().unwrap();
        let artifact = probe(&workdir, Path::new("out.txt")).unwrap();

        let copied = artifact.copy_into(dest.path()).unwrap();
        assert_eq!(copied, dest.path().join("out.txt"));

        let renamed = artifact.copy_as(dest.path(), "renamed.dat").unwrap();
        assert_eq!(fs::read_to_string(renamed).unwrap(), "out.txt");
    }

    #[test]
    fn probe_returns_none_for_missing_files() {
        let (_tmp, workdir) = workdir_with(&[]);
        assert!(probe(&workdir, Path::new("nope.txt")).is_none());
    }

    #[test]
    fn keep_mode_retains_the_workspace_in_place() {
        let (_tmp, workdir) = workdir_with(&["a.txt", "b.txt"]);
        let expected = vec![PathBuf::from("a.txt")];

        let (retained, mut cleanup) = relocate_workspace(&workdir, &expected, true).unwrap();
        assert_eq!(retained, workdir);
        assert!(retained.join("a.txt").exists());
        assert!(retained.join("b.txt").exists());

        cleanup.run().unwrap();
        assert!(!workdir.exists());
    }

    #[test]
    fn copy_mode_moves_declared_files_and_drops_the_rest() {
        let (_tmp, workdir) = workdir_with(&["a.txt", "sub/nested.txt", "undeclared.log"]);
        let expected = vec![
            PathBuf::from("a.txt"),
            PathBuf::from("sub/nested.txt"),
            PathBuf::from("absent.txt"),
        ];

        let (retained, mut cleanup) = relocate_workspace(&workdir, &expected, false).unwrap();
        assert_ne!(retained, workdir);
        assert!(!workdir.exists());
        assert!(retained.join("a.txt").exists());
        assert_eq!(
            fs::read_to_string(retained.join("sub/nested.txt")).unwrap(),
            "sub/nested.txt"
        );
        assert!(!retained.join("undeclared.log").exists());
        assert!(!retained.join("absent.txt").exists());

        cleanup.run().unwrap();
        assert!(!retained.exists());
    }

    #[test]
    fn absolute_expected_paths_are_rerooted_by_file_name() {
        let (_tmp, workdir) = workdir_with(&["LIG_PARAM.prm"]);
        let absolute = std::env::temp_dir().join("LIG_PARAM.prm");

        let artifact = probe(&workdir, &absolute).unwrap();
        assert_eq!(artifact.path(), workdir.join("LIG_PARAM.prm"));
    }

    #[test]
    fn cleanup_is_idempotent_and_tolerates_a_missing_directory() {
        let (_tmp, workdir) = workdir_with(&["a.txt"]);
        let mut cleanup = Cleanup::new(workdir.clone());

        cleanup.run().unwrap();
        assert!(!workdir.exists());
        cleanup.run().unwrap();

        let mut orphaned = Cleanup::new(workdir.join("never-created"));
        orphaned.run().unwrap();
    }
}
