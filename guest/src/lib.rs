//! execvm - minimal bootstrap for a fresh mount/process namespace.
//!
//! Two modes, both ending in process-image replacement or termination:
//!
//! - `execvm init <payload>` applies the mounts described by a base64 JSON
//!   payload and then execs the payload's program.
//! - `execvm chain <delim> <argv1...> <delim> <argv2...>` runs the first
//!   program to completion and execs the second only if the first exited 0;
//!   a non-zero exit code is propagated as this tool's own.

pub mod chain;
pub mod dispatch;
pub mod error;
pub mod init;
pub mod launcher;
pub mod logging;
pub mod payload;
pub mod status;

#[cfg(test)]
mod testing;

pub use dispatch::{Mode, dispatch};
pub use error::{Error, LaunchError, Stream};
pub use launcher::{Environment, Launcher, SystemLauncher};
pub use payload::InitCommand;
pub use status::{RawStatus, WaitOutcome};
