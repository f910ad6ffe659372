//! `execvm init`: apply the payload's mounts, then become its program.

use crate::error::Error;
use crate::launcher::{Environment, Launcher};
use crate::payload;
use execvm_mount::{MountError, MountSpec, Mounter};
use std::convert::Infallible;
use std::ffi::OsString;

/// Runs the init flow on the arguments following `init`.
///
/// Mounts are applied strictly in payload order and the first failure
/// aborts; mounts already applied are left in place.
pub fn run<M, L>(
    args: &[OsString],
    mounter: &M,
    launcher: &L,
    env: &Environment,
) -> Result<Infallible, Error>
where
    M: Mounter + ?Sized,
    L: Launcher + ?Sized,
{
    let encoded = args.first().ok_or(Error::MissingPayload)?;
    let encoded = encoded
        .to_str()
        .ok_or_else(|| Error::NonUnicodeArgument(encoded.clone()))?;
    let command = payload::parse(&payload::decode(encoded)?)?;

    apply_mounts(&command.mounts, mounter)?;

    let argv: Vec<OsString> = command.args.into_iter().map(OsString::from).collect();
    launcher.replace_image(&argv, env).map_err(Error::from)
}

/// Applies `mounts` in order, stopping at the first failure.
pub fn apply_mounts<M>(mounts: &[MountSpec], mounter: &M) -> Result<(), MountError>
where
    M: Mounter + ?Sized,
{
    for (index, spec) in mounts.iter().enumerate() {
        tracing::info!(
            "Applying mount {}/{}: {:?} on {:?} ({})",
            index + 1,
            mounts.len(),
            spec.device,
            spec.target,
            spec.fs_type
        );
        mounter.mount(spec)?;
    }
    Ok(())
}
