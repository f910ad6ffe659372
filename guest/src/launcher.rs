//! Process launching: image replacement and child spawning.

use crate::error::LaunchError;
use crate::status::RawStatus;
use nix::errno::Errno;
use nix::sys::signal::{SigHandler, Signal, signal};
use nix::unistd::{Pid, execve};
use std::convert::Infallible;
use std::ffi::{CString, OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment handed to every launched program, in the order it was captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(OsString, OsString)>,
}

impl Environment {
    /// Snapshot of the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsString, &OsString)> {
        self.vars.iter().map(|(k, v)| (k, v))
    }

    /// `KEY=VALUE` entries for `execve(2)`.
    fn to_cstrings(&self) -> Result<Vec<CString>, LaunchError> {
        self.vars
            .iter()
            .map(|(key, value)| {
                let mut entry = key.as_bytes().to_vec();
                entry.push(b'=');
                entry.extend_from_slice(value.as_bytes());
                CString::new(entry).map_err(|e| {
                    LaunchError::InvalidArgument(String::from_utf8_lossy(&e.into_vec()).into_owned())
                })
            })
            .collect()
    }
}

/// Starts programs on behalf of the init and chain flows.
pub trait Launcher {
    /// Replaces the current process image with `argv[0]`. Only returns on failure.
    fn replace_image(&self, argv: &[OsString], env: &Environment)
    -> Result<Infallible, LaunchError>;

    /// Starts `argv[0]` as a child sharing stdin, stdout and stderr.
    fn spawn_child(&self, argv: &[OsString], env: &Environment) -> Result<Pid, LaunchError>;

    /// Blocks until `pid` terminates.
    fn wait_child(&self, pid: Pid) -> Result<RawStatus, LaunchError>;
}

/// Launcher backed by the real process table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn replace_image(
        &self,
        argv: &[OsString],
        env: &Environment,
    ) -> Result<Infallible, LaunchError> {
        let program = argv.first().ok_or(LaunchError::EmptyArgv)?;
        let path = to_cstring(program)?;
        let args = argv
            .iter()
            .map(|arg| to_cstring(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let envp = env.to_cstrings()?;

        tracing::debug!("Replacing process image with {:?}", argv);

        // The Rust runtime ignores SIGPIPE and execve keeps ignored signals.
        unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) }.map_err(LaunchError::Signal)?;

        execve(&path, &args, &envp).map_err(|source| LaunchError::Exec {
            program: program.to_string_lossy().into_owned(),
            source,
        })
    }

    /// Like `execve`, a program without a `/` is resolved against the
    /// working directory, never against `PATH`.
    fn spawn_child(&self, argv: &[OsString], env: &Environment) -> Result<Pid, LaunchError> {
        let (program, args) = argv.split_first().ok_or(LaunchError::EmptyArgv)?;

        let child = Command::new(resolve_program(program))
            .arg0(program)
            .args(args)
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.to_string_lossy().into_owned(),
                source,
            })?;

        let pid = Pid::from_raw(child.id() as libc::pid_t);
        tracing::debug!("Spawned {:?} as pid {}", argv, pid);
        Ok(pid)
    }

    fn wait_child(&self, pid: Pid) -> Result<RawStatus, LaunchError> {
        let mut status: libc::c_int = 0;
        loop {
            let res = unsafe { libc::waitpid(pid.as_raw(), &mut status, 0) };
            match Errno::result(res) {
                Ok(_) => return Ok(RawStatus(status)),
                Err(Errno::EINTR) => continue,
                Err(source) => return Err(LaunchError::Wait { pid, source }),
            }
        }
    }
}

fn to_cstring(arg: &OsStr) -> Result<CString, LaunchError> {
    CString::new(arg.as_bytes())
        .map_err(|_| LaunchError::InvalidArgument(arg.to_string_lossy().into_owned()))
}

/// `Command` searches `PATH` for bare names; anchoring them to `.` keeps
/// the lookup identical to `execve(2)`.
fn resolve_program(program: &OsStr) -> PathBuf {
    if program.as_bytes().contains(&b'/') {
        PathBuf::from(program)
    } else {
        Path::new(".").join(program)
    }
}
