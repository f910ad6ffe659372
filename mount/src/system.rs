use crate::error::MountError;
use crate::options::MountOptions;
use crate::{MountSpec, Mounter};
use nix::errno::Errno;
use nix::mount::{MsFlags, mount};
use std::path::Path;

/// Performs mounts with `mount(2)`.
///
/// Up to three calls are made per mount: the mount itself, a propagation
/// change when one was requested, and a read-only remount for `bind,ro`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMounter;

impl Mounter for SystemMounter {
    fn mount(&self, spec: &MountSpec) -> Result<(), MountError> {
        let opts = MountOptions::parse(&spec.options);
        let target = Path::new(&spec.target);
        let fail = |operation: &'static str| {
            move |source: Errno| MountError::MountFailed {
                device: spec.device.clone(),
                target: spec.target.clone(),
                operation,
                source,
            }
        };

        tracing::debug!(
            "Mounting {:?} on {:?} (type {:?}) with flags {:?}, data {:?}",
            spec.device,
            target,
            spec.fs_type,
            opts.flags,
            opts.data
        );

        // A plain remount without data only changes propagation or read-only state.
        if !opts.is_remount() || !opts.data.is_empty() {
            mount(
                non_empty(&spec.device),
                target,
                non_empty(&spec.fs_type),
                opts.flags,
                non_empty(&opts.data),
            )
            .map_err(fail("mount"))?;
        }

        if !opts.propagation.is_empty() {
            mount(
                None::<&str>,
                target,
                None::<&str>,
                opts.propagation_flags(),
                None::<&str>,
            )
            .map_err(fail("propagation change"))?;
        }

        if opts.is_readonly_bind() {
            mount(
                None::<&str>,
                target,
                None::<&str>,
                opts.flags | MsFlags::MS_REMOUNT,
                None::<&str>,
            )
            .map_err(fail("read-only remount"))?;
        }

        tracing::info!("Mounted {:?} on {:?}", spec.device, target);
        Ok(())
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
