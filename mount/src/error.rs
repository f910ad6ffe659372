use nix::errno::Errno;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MountError {
    #[error("{operation} of {device:?} on {target} failed: {source}")]
    MountFailed {
        device: String,
        target: String,
        operation: &'static str,
        #[source]
        source: Errno,
    },
}

impl MountError {
    pub fn target(&self) -> &str {
        match self {
            MountError::MountFailed { target, .. } => target,
        }
    }
}
