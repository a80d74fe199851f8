//! Synchronous execution of the UniDesign binary inside disposable
//! workspaces.
//!
//! The runner owns the full lifecycle of one invocation: it allocates an
//! isolated workspace, links the static resource bundles into it, merges
//! environment layers, injects a freshly generated `--prefix`, runs the
//! child to completion, and deletes the workspace afterwards unless the
//! caller asked to keep it. A non-zero exit code is not an error at this
//! layer; it is surfaced verbatim in the [`RunRecord`] for the caller to
//! judge.

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{self, ConfigError};
use crate::install::Installation;
use crate::workspace::Workspace;

/// A read-only directory tree made visible inside every workspace under a
/// fixed relative name.
#[derive(Debug, Clone)]
pub struct StaticResource {
    pub name: &'static str,
    pub source: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Validation(#[from] ConfigError),

    #[error("UniDesign binary not found at {path}", path = path.display())]
    BinaryNotFound { path: PathBuf },

    #[error("UniDesign binary at {path} is not executable", path = path.display())]
    BinaryNotExecutable { path: PathBuf },

    #[error("UniDesign run exceeded the {limit:?} limit and was killed")]
    TimedOut { limit: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Per-call execution options.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Environment overrides applied on top of the ambient process
    /// environment and the runner's default overrides.
    pub env: HashMap<String, String>,
    /// Keep the workspace after the call instead of deleting it.
    pub persist_workspace: bool,
    /// Kill the child and fail the call once this much wall time has passed.
    pub timeout: Option<Duration>,
}

/// Externally observable outcome of one UniDesign invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    /// Compiled argument vector, excluding the injected `--prefix` pair.
    pub args: Vec<String>,
    /// Child exit code; `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Directory that held the run's inputs and outputs. Re-pointed at the
    /// retained location after artifact relocation.
    pub workdir: PathBuf,
    /// Unique output prefix injected via `--prefix`.
    pub prefix: String,
}

impl RunRecord {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Drives the UniDesign binary through isolated, disposable workspaces.
pub struct UniDesignRunner {
    binary: PathBuf,
    resources: Vec<StaticResource>,
    default_env: HashMap<String, String>,
    base_dir: Option<PathBuf>,
}

impl UniDesignRunner {
    pub fn new(installation: &Installation) -> Self {
        Self {
            binary: installation.binary().to_path_buf(),
            resources: vec![
                StaticResource {
                    name: "library",
                    source: installation.library_dir().to_path_buf(),
                },
                StaticResource {
                    name: "wread",
                    source: installation.wread_dir().to_path_buf(),
                },
                StaticResource {
                    name: "extbin",
                    source: installation.extbin_dir().to_path_buf(),
                },
            ],
            default_env: HashMap::new(),
            base_dir: None,
        }
    }

    /// Environment overrides applied to every run, below per-call overrides.
    pub fn with_default_env(mut self, env: HashMap<String, String>) -> Self {
        self.default_env = env;
        self
    }

    /// Parent directory under which per-run workspaces are allocated, so
    /// related workspaces can be co-located for inspection.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn run(&self, args: &[String]) -> Result<RunRecord, RunnerError> {
        self.run_with(args, &RunOptions::default())
    }

    pub fn run_with(&self, args: &[String], options: &RunOptions) -> Result<RunRecord, RunnerError> {
        if config::contains_prefix_flag(args) {
            return Err(ConfigError::ReservedPrefix.into());
        }

        let prefix = format!("unidesign_{}", Uuid::new_v4().simple());
        // The workspace guard deletes the directory on every exit path below;
        // only a successful run with persistence requested detaches it.
        let workspace = Workspace::allocate(self.base_dir.as_deref())?;
        workspace.provision(&self.resources)?;
        debug!(workdir = %workspace.path().display(), %prefix, "workspace provisioned");

        let env = self.merged_env(&options.env);
        let (exit_code, stdout, stderr) =
            self.spawn_and_wait(args, &prefix, workspace.path(), &env, options.timeout)?;
        info!(?exit_code, %prefix, "UniDesign run finished");

        let workdir = if options.persist_workspace {
            workspace.persist()
        } else {
            workspace.path().to_path_buf()
        };
        Ok(RunRecord {
            args: args.to_vec(),
            exit_code,
            stdout,
            stderr,
            workdir,
            prefix,
        })
    }

    /// Three env layers in increasing precedence: ambient process
    /// environment, runner defaults, per-call overrides.
    fn merged_env(&self, overrides: &HashMap<String, String>) -> HashMap<String, String> {
        let mut env: HashMap<String, String> = std::env::vars().collect();
        env.extend(
            self.default_env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        env.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        env
    }

    fn spawn_and_wait(
        &self,
        args: &[String],
        prefix: &str,
        workdir: &Path,
        env: &HashMap<String, String>,
        timeout: Option<Duration>,
    ) -> Result<(Option<i32>, String, String), RunnerError> {
        let mut child = Command::new(&self.binary)
            .arg("--prefix")
            .arg(prefix)
            .args(args)
            .current_dir(workdir)
            .env_clear()
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| self.classify_spawn_error(err))?;

        let stdout = child.stdout.take().map(drain_stream);
        let stderr = child.stderr.take().map(drain_stream);

        let status = match timeout {
            None => child.wait().map_err(RunnerError::Io)?,
            Some(limit) => {
                let started = Instant::now();
                loop {
                    match child.try_wait().map_err(RunnerError::Io)? {
                        Some(status) => break status,
                        None if started.elapsed() >= limit => {
                            warn!(?limit, "UniDesign run timed out; killing child");
                            let _ = child.kill();
                            let _ = child.wait();
                            join_stream(stdout);
                            join_stream(stderr);
                            return Err(RunnerError::TimedOut { limit });
                        }
                        None => std::thread::sleep(Duration::from_millis(20)),
                    }
                }
            }
        };

        Ok((status.code(), join_stream(stdout), join_stream(stderr)))
    }

    fn classify_spawn_error(&self, err: io::Error) -> RunnerError {
        match err.kind() {
            io::ErrorKind::NotFound => RunnerError::BinaryNotFound {
                path: self.binary.clone(),
            },
            io::ErrorKind::PermissionDenied => RunnerError::BinaryNotExecutable {
                path: self.binary.clone(),
            },
            _ => RunnerError::Io(err),
        }
    }
}

fn drain_stream(mut stream: impl Read + Send + 'static) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_stream(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn fake_installation(dir: &Path, script_body: &str) -> Installation {
        use std::os::unix::fs::PermissionsExt;

        let binary = dir.join("UniDesign");
        fs::write(&binary, format!("#!/bin/sh\n{script_body}")).unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
        for name in crate::install::RESOURCE_BUNDLES {
            let source = dir.join(name);
            fs::create_dir_all(&source).unwrap();
            fs::write(source.join("placeholder.txt"), name).unwrap();
        }
        Installation::discover(dir).unwrap()
    }

    // Marker-writing stand-in for the real binary: records its prefix and
    // working directory contents.
    #[cfg(unix)]
    const MARKER_SCRIPT: &str = r#"
prefix=""
while [ $# -gt 0 ]; do
  if [ "$1" = "--prefix" ]; then prefix="$2"; shift; fi
  shift
done
touch "${prefix}_marker.txt"
echo ok
"#;

    #[test]
    fn prefix_flag_in_caller_args_is_rejected_before_execution() {
        let tmp = tempfile::tempdir().unwrap();
        for name in crate::install::RESOURCE_BUNDLES {
            fs::create_dir_all(tmp.path().join(name)).unwrap();
        }
        // No binary on disk: reaching the spawn would fail differently, so a
        // Validation error proves the check ran first.
        let runner = UniDesignRunner {
            binary: tmp.path().join("UniDesign"),
            resources: Vec::new(),
            default_env: HashMap::new(),
            base_dir: Some(tmp.path().to_path_buf()),
        };

        let err = runner
            .run(&["--prefix".to_string(), "mine".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Validation(ConfigError::ReservedPrefix)
        ));

        let err = runner.run(&["--prefix=mine".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Validation(ConfigError::ReservedPrefix)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn run_injects_prefix_and_provisions_resources() {
        let tmp = tempfile::tempdir().unwrap();
        let install = fake_installation(tmp.path(), MARKER_SCRIPT);
        let runner = UniDesignRunner::new(&install);

        let args = vec!["--command".to_string(), "Smoke".to_string()];
        let record = runner
            .run_with(
                &args,
                &RunOptions {
                    persist_workspace: true,
                    ..RunOptions::default()
                },
            )
            .unwrap();

        assert!(record.prefix.starts_with("unidesign_"));
        assert_eq!(record.args, args);
        assert_eq!(record.exit_code, Some(0));
        assert_eq!(record.stdout, "ok\n");
        assert!(record.stderr.is_empty());
        assert!(
            record
                .workdir
                .join(format!("{}_marker.txt", record.prefix))
                .exists()
        );
        for name in crate::install::RESOURCE_BUNDLES {
            assert!(record.workdir.join(name).join("placeholder.txt").exists());
        }

        fs::remove_dir_all(&record.workdir).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn workspace_is_removed_when_persistence_is_not_requested() {
        let tmp = tempfile::tempdir().unwrap();
        let install = fake_installation(tmp.path(), "exit 0\n");
        let base = tmp.path().join("runs");
        fs::create_dir(&base).unwrap();
        let runner = UniDesignRunner::new(&install).with_base_dir(&base);

        let record = runner.run(&[]).unwrap();
        assert!(!record.workdir.exists());
        assert_eq!(fs::read_dir(&base).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn env_layers_merge_with_call_overrides_winning() {
        let tmp = tempfile::tempdir().unwrap();
        let install = fake_installation(tmp.path(), "printf '%s' \"$UD_PROBE\"\n");
        let runner = UniDesignRunner::new(&install).with_default_env(HashMap::from([(
            "UD_PROBE".to_string(),
            "default".to_string(),
        )]));

        let record = runner.run(&[]).unwrap();
        assert_eq!(record.stdout, "default");

        let record = runner
            .run_with(
                &[],
                &RunOptions {
                    env: HashMap::from([("UD_PROBE".to_string(), "call".to_string())]),
                    ..RunOptions::default()
                },
            )
            .unwrap();
        assert_eq!(record.stdout, "call");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_codes_are_surfaced_not_raised() {
        let tmp = tempfile::tempdir().unwrap();
        let install = fake_installation(tmp.path(), "echo 'no design found' >&2\nexit 7\n");
        let runner = UniDesignRunner::new(&install);

        let record = runner.run(&[]).unwrap();
        assert_eq!(record.exit_code, Some(7));
        assert!(!record.success());
        assert_eq!(record.stderr, "no design found\n");
    }

    #[cfg(unix)]
    #[test]
    fn missing_binary_at_invocation_is_a_discovery_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let install = fake_installation(tmp.path(), "exit 0\n");
        let runner = UniDesignRunner::new(&install);
        fs::remove_file(install.binary()).unwrap();

        let err = runner.run(&[]).unwrap_err();
        assert!(matches!(err, RunnerError::BinaryNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn timed_out_runs_are_killed_and_cleaned_up() {
        let tmp = tempfile::tempdir().unwrap();
        let install = fake_installation(tmp.path(), "sleep 30\n");
        let base = tmp.path().join("runs");
        fs::create_dir(&base).unwrap();
        let runner = UniDesignRunner::new(&install).with_base_dir(&base);

        let started = Instant::now();
        let err = runner
            .run_with(
                &[],
                &RunOptions {
                    timeout: Some(Duration::from_millis(100)),
                    persist_workspace: true,
                    ..RunOptions::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RunnerError::TimedOut { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(fs::read_dir(&base).unwrap().count(), 0);
    }

    #[test]
    fn run_record_serializes_for_downstream_tooling() {
        let record = RunRecord {
            args: vec!["--command".to_string(), "ComputeBinding".to_string()],
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
            workdir: PathBuf::from("/tmp/unidesign_x"),
            prefix: "unidesign_x".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["exit_code"], 0);
        assert_eq!(json["prefix"], "unidesign_x");
    }
}
