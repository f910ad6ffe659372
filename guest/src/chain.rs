//! `execvm chain`: run one program, then become another if it succeeded.

use crate::error::Error;
use crate::launcher::{Environment, Launcher};
use crate::status::WaitOutcome;
use std::convert::Infallible;
use std::ffi::{OsStr, OsString};

/// Delimiter, first program, delimiter, second program.
pub const MIN_CHAIN_ARGS: usize = 4;

/// The two argument vectors of a chain command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainArgs {
    pub first: Vec<OsString>,
    pub second: Vec<OsString>,
}

impl ChainArgs {
    /// Splits `tokens` at the first token equal to `delimiter`.
    ///
    /// Later occurrences of the delimiter belong to the second vector.
    /// Tokens are compared byte for byte and need not be UTF-8.
    pub fn split(delimiter: &OsStr, tokens: &[OsString]) -> Result<Self, Error> {
        let pivot = tokens
            .iter()
            .position(|t| t == delimiter)
            .ok_or_else(|| Error::DelimiterNotFound {
                delimiter: delimiter.to_os_string(),
                tokens: tokens.to_vec(),
            })?;

        Ok(Self {
            first: tokens[..pivot].to_vec(),
            second: tokens[pivot + 1..].to_vec(),
        })
    }
}

/// Runs the chain flow on the arguments following `chain`.
///
/// The first program runs as a child with inherited stdio. A non-zero exit
/// comes back as [`Error::ChildExited`] carrying the same code; a clean exit
/// replaces this process with the second program.
pub fn run<L: Launcher + ?Sized>(
    args: &[OsString],
    launcher: &L,
    env: &Environment,
) -> Result<Infallible, Error> {
    if args.len() < MIN_CHAIN_ARGS {
        return Err(Error::ChainUsage);
    }

    let ChainArgs { first, second } = ChainArgs::split(&args[0], &args[1..])?;

    let pid = launcher.spawn_child(&first, env)?;
    let status = launcher.wait_child(pid)?;

    match status.outcome() {
        WaitOutcome::Exited(0) => {
            tracing::debug!("{:?} exited cleanly, continuing with {:?}", first, second);
        }
        WaitOutcome::Exited(code) => {
            tracing::debug!("{:?} exited with status {}", first, code);
            return Err(Error::ChildExited(code));
        }
        WaitOutcome::Signaled(signal) => {
            return Err(Error::ChildSignaled {
                argv: first,
                signal,
            });
        }
    }

    launcher.replace_image(&second, env).map_err(Error::from)
}
