use serde::{Deserialize, Serialize};

use crate::magnet::DEFAULT_TRACKERS;
use crate::record::DigestScheme;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub magnet: MagnetConfig,
    #[serde(default)]
    pub digest: DigestConfig,
}

/// Magnet link configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MagnetConfig {
    /// Announce URIs appended to every magnet link, in order
    #[serde(default = "default_trackers")]
    pub trackers: Vec<String>,
}

impl Default for MagnetConfig {
    fn default() -> Self {
        Self {
            trackers: default_trackers(),
        }
    }
}

fn default_trackers() -> Vec<String> {
    DEFAULT_TRACKERS.iter().map(|t| t.to_string()).collect()
}

/// Digest configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DigestConfig {
    /// Scheme used for newly built records (default: concatenated)
    #[serde(default)]
    pub scheme: DigestScheme,
}
