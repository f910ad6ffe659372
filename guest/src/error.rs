use execvm_mount::MountError;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::unistd::Pid;
use std::ffi::OsString;
use thiserror::Error;

/// Failures of the process launcher.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("empty argument vector")]
    EmptyArgv,

    #[error("invalid argument {0:?}: contains a NUL byte")]
    InvalidArgument(String),

    #[error("exec {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: Errno,
    },

    #[error("spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("wait for pid {pid}: {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: Errno,
    },

    #[error("restore default SIGPIPE disposition: {0}")]
    Signal(#[source] Errno),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing command")]
    MissingCommand,

    #[error("invalid command {0}")]
    InvalidCommand(String),

    /// The mode name and the init payload must be UTF-8; program
    /// arguments are passed through as raw bytes.
    #[error("argument is not valid unicode: {0:?}")]
    NonUnicodeArgument(OsString),

    #[error("missing payload")]
    MissingPayload,

    #[error("usage: chain <delimiter> <program> [args...] <delimiter> <program> [args...]")]
    ChainUsage,

    #[error("could not find {} in {tokens:?}", .delimiter.to_string_lossy())]
    DelimiterNotFound {
        delimiter: OsString,
        tokens: Vec<OsString>,
    },

    #[error("failed to b64decode payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("failed to parse json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Mount(#[from] MountError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("process failed unexpectedly {argv:?}: killed by {}", signal_name(.signal))]
    ChildSignaled { argv: Vec<OsString>, signal: i32 },

    #[error("first program exited with status {0}")]
    ChildExited(u8),
}

/// Where a fatal diagnostic is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Error {
    /// Exit status the tool terminates with.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ChildExited(code) => *code,
            _ => 1,
        }
    }

    /// Stream the diagnostic belongs on, `None` when the exit is silent.
    ///
    /// JSON parse failures are reported on stdout for compatibility with
    /// existing callers that scrape it.
    pub fn stream(&self) -> Option<Stream> {
        match self {
            Error::ChildExited(_) => None,
            Error::Parse(_) => Some(Stream::Stdout),
            _ => Some(Stream::Stderr),
        }
    }
}

fn signal_name(signal: &i32) -> String {
    Signal::try_from(*signal)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| format!("signal {}", signal))
}
