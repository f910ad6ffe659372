//! Mount collaborator for the execvm bootstrap.
//!
//! Exposes the [`Mounter`] capability ("apply one mount, fail loudly") and
//! [`SystemMounter`], which performs the real `mount(2)` calls using the
//! classic mount(8) option string syntax.

mod error;
mod options;
mod system;

pub use error::MountError;
pub use options::MountOptions;
pub use system::SystemMounter;

use serde::{Deserialize, Deserializer, Serialize};

/// One filesystem mount, as carried in the init payload.
///
/// Absent or `null` fields decode to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountSpec {
    /// Source path or pseudo-device name (`proc`, `tmpfs`, ...).
    #[serde(rename = "Device", deserialize_with = "nullable")]
    pub device: String,
    /// Mount point. Must already exist.
    #[serde(rename = "Target", deserialize_with = "nullable")]
    pub target: String,
    /// Filesystem driver name.
    #[serde(rename = "MType", deserialize_with = "nullable")]
    pub fs_type: String,
    /// Comma-separated option string.
    #[serde(rename = "Options", deserialize_with = "nullable")]
    pub options: String,
}

impl MountSpec {
    pub fn new(device: &str, target: &str, fs_type: &str, options: &str) -> Self {
        Self {
            device: device.to_string(),
            target: target.to_string(),
            fs_type: fs_type.to_string(),
            options: options.to_string(),
        }
    }
}

/// Applies a single mount.
pub trait Mounter {
    fn mount(&self, spec: &MountSpec) -> Result<(), MountError>;
}

impl<M: Mounter + ?Sized> Mounter for &M {
    fn mount(&self, spec: &MountSpec) -> Result<(), MountError> {
        (**self).mount(spec)
    }
}

fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
