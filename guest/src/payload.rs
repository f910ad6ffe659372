//! Init payload codec.
//!
//! The payload is URL-safe base64 of a JSON document:
//!
//! ```json
//! {"Mounts":[{"Device":"proc","Target":"/proc","MType":"proc","Options":""}],
//!  "Args":["/sbin/init"]}
//! ```
//!
//! Decoding requires `=` padding but skips `\r` and `\n`, so payloads
//! wrapped by the producer still decode, and ignores non-zero bits left
//! over in the final symbol.
//!
//! Parsing is tolerant: unknown fields are ignored and absent or `null`
//! fields decode to their empty value.

use crate::error::Error;
use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use execvm_mount::MountSpec;
use serde::{Deserialize, Deserializer, Serialize};

const PAYLOAD_ENGINE: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, PAD.with_decode_allow_trailing_bits(true));

/// Mounts to apply, in order, and the program to become afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitCommand {
    #[serde(rename = "Mounts", deserialize_with = "nullable")]
    pub mounts: Vec<MountSpec>,
    /// `args[0]` is the executable path.
    #[serde(rename = "Args", deserialize_with = "nullable")]
    pub args: Vec<String>,
}

impl InitCommand {
    /// Wire form accepted by `execvm init`.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(PAYLOAD_ENGINE.encode(serde_json::to_vec(self)?))
    }
}

pub fn decode(payload: &str) -> Result<Vec<u8>, Error> {
    if !payload.contains(['\r', '\n']) {
        return Ok(PAYLOAD_ENGINE.decode(payload)?);
    }
    let joined: String = payload.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    Ok(PAYLOAD_ENGINE.decode(joined)?)
}

pub fn parse(doc: &[u8]) -> Result<InitCommand, Error> {
    let command: Option<InitCommand> = serde_json::from_slice(doc)?;
    Ok(command.unwrap_or_default())
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
