//! Test doubles for the launcher and mounter seams.

use crate::error::LaunchError;
use crate::launcher::{Environment, Launcher};
use crate::status::RawStatus;
use execvm_mount::{MountError, MountSpec, Mounter};
use nix::errno::Errno;
use nix::unistd::Pid;
use std::cell::RefCell;
use std::convert::Infallible;
use std::ffi::OsString;

pub fn argv(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

pub fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Records launches; every child "exits" with a fixed status and every
/// image replacement fails with `ENOEXEC` after being recorded.
pub struct FakeLauncher {
    status: RawStatus,
    spawned: RefCell<Vec<Vec<OsString>>>,
    replaced: RefCell<Vec<Vec<OsString>>>,
    envs: RefCell<Vec<Environment>>,
}

impl FakeLauncher {
    pub fn with_status(status: RawStatus) -> Self {
        Self {
            status,
            spawned: RefCell::default(),
            replaced: RefCell::default(),
            envs: RefCell::default(),
        }
    }

    pub fn exiting(code: u8) -> Self {
        Self::with_status(RawStatus(i32::from(code) << 8))
    }

    pub fn spawned(&self) -> Vec<Vec<OsString>> {
        self.spawned.borrow().clone()
    }

    pub fn replaced(&self) -> Vec<Vec<OsString>> {
        self.replaced.borrow().clone()
    }

    pub fn envs(&self) -> Vec<Environment> {
        self.envs.borrow().clone()
    }
}

impl Launcher for FakeLauncher {
    fn replace_image(
        &self,
        argv: &[OsString],
        env: &Environment,
    ) -> Result<Infallible, LaunchError> {
        self.replaced.borrow_mut().push(argv.to_vec());
        self.envs.borrow_mut().push(env.clone());
        Err(LaunchError::Exec {
            program: argv
                .first()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source: Errno::ENOEXEC,
        })
    }

    fn spawn_child(&self, argv: &[OsString], env: &Environment) -> Result<Pid, LaunchError> {
        self.spawned.borrow_mut().push(argv.to_vec());
        self.envs.borrow_mut().push(env.clone());
        Ok(Pid::from_raw(4242))
    }

    fn wait_child(&self, _pid: Pid) -> Result<RawStatus, LaunchError> {
        Ok(self.status)
    }
}

/// Records mounts and fails the mount whose target matches `fail_on`.
#[derive(Default)]
pub struct RecordingMounter {
    pub fail_on: Option<String>,
    applied: RefCell<Vec<MountSpec>>,
}

impl RecordingMounter {
    pub fn failing_on(target: &str) -> Self {
        Self {
            fail_on: Some(target.to_string()),
            ..Default::default()
        }
    }

    pub fn applied(&self) -> Vec<MountSpec> {
        self.applied.borrow().clone()
    }
}

impl Mounter for RecordingMounter {
    fn mount(&self, spec: &MountSpec) -> Result<(), MountError> {
        if self.fail_on.as_deref() == Some(spec.target.as_str()) {
            return Err(MountError::MountFailed {
                device: spec.device.clone(),
                target: spec.target.clone(),
                operation: "mount",
                source: Errno::EINVAL,
            });
        }
        self.applied.borrow_mut().push(spec.clone());
        Ok(())
    }
}
