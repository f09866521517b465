use crate::constants;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Limits applied by the codecs when writing into bounded buffers and when
/// decoding untrusted bytes
#[derive(Builder, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct WireConfig {
    /// Capacity of the outbound buffer used by the field writer
    #[builder(default = "constants::DEFAULT_MAX_BUFFER_SIZE")]
    pub max_buffer_size: usize,

    /// Maximum byte length of a decoded string
    #[builder(default = "constants::DEFAULT_MAX_STRING_LEN")]
    pub max_string_len: usize,

    /// Maximum element count of a decoded sequence, such as path segments
    #[builder(default = "constants::DEFAULT_MAX_PATH_SEGMENTS")]
    pub max_path_segments: usize,
}

impl WireConfig {
    /// Loads a configuration from JSON, using defaults for missing keys
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: constants::DEFAULT_MAX_BUFFER_SIZE,
            max_string_len: constants::DEFAULT_MAX_STRING_LEN,
            max_path_segments: constants::DEFAULT_MAX_PATH_SEGMENTS,
        }
    }
}
