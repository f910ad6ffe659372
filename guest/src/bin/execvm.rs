//! execvm - namespace bootstrap.
//!
//! Usage:
//!   execvm init <payload>
//!   execvm chain <delimiter> <program> [args...] <delimiter> <program> [args...]

use execvm_guest::{Environment, Error, Stream, SystemLauncher, dispatch, logging};
use execvm_mount::SystemMounter;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    let args: Vec<_> = env::args_os().skip(1).collect();
    let environ = Environment::capture();

    match dispatch(&args, &SystemMounter, &SystemLauncher, &environ) {
        Err(e) => fail(e),
        // Modes only return on failure; success replaced this image.
        Ok(never) => match never {},
    }
}

fn fail(err: Error) -> ExitCode {
    tracing::debug!("Terminating: {:?}", err);

    match err.stream() {
        Some(Stream::Stdout) => println!("execvm: {}", err),
        Some(Stream::Stderr) => eprintln!("execvm: {}", err),
        None => {}
    }

    ExitCode::from(err.exit_code())
}
