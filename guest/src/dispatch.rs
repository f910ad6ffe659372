//! Mode dispatch on the first command-line token.

use crate::error::Error;
use crate::launcher::{Environment, Launcher};
use crate::{chain, init};
use execvm_mount::Mounter;
use std::convert::Infallible;
use std::ffi::OsString;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Init,
    Chain,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Mode::Init),
            "chain" => Ok(Mode::Chain),
            other => Err(Error::InvalidCommand(other.to_string())),
        }
    }
}

/// Routes `args` (program name already stripped) to the selected mode.
///
/// Never returns `Ok`: every mode ends in image replacement or an error.
pub fn dispatch<M, L>(
    args: &[OsString],
    mounter: &M,
    launcher: &L,
    env: &Environment,
) -> Result<Infallible, Error>
where
    M: Mounter + ?Sized,
    L: Launcher + ?Sized,
{
    let (command, rest) = args.split_first().ok_or(Error::MissingCommand)?;
    let command = command
        .to_str()
        .ok_or_else(|| Error::InvalidCommand(command.to_string_lossy().into_owned()))?;

    match command.parse::<Mode>()? {
        Mode::Init => init::run(rest, mounter, launcher, env),
        Mode::Chain => chain::run(rest, launcher, env),
    }
}
