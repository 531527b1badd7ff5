//! Magnet URI construction for torrent records.
//!
//! Links have the form
//! `magnet:?xt=urn:btih:<hex>&dn=<escaped name>&tr=<tracker>...`.
//! The info hash is lowercase hex, the display name is percent-encoded
//! (spaces become `%20`), and tracker URIs are appended verbatim in order.

use crate::config::MagnetConfig;
use crate::record::TorrentRecord;

/// Announce endpoints appended to every link unless configured otherwise.
pub const DEFAULT_TRACKERS: [&str; 3] = [
    "udp://open.demonii.com:1337/announce",
    "udp://tracker.publicbt.com:80/announce",
    "udp://tracker.istole.it:80/announce",
];

/// Builds magnet URIs against a fixed tracker list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetLinkBuilder {
    trackers: Vec<String>,
}

impl MagnetLinkBuilder {
    /// Creates a builder with a custom tracker list.
    pub fn new<I, S>(trackers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trackers: trackers.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a builder from the `[magnet]` config section.
    pub fn from_config(config: &MagnetConfig) -> Self {
        Self::new(config.trackers.iter().cloned())
    }

    pub fn trackers(&self) -> &[String] {
        &self.trackers
    }

    /// Format the magnet URI for `record`.
    ///
    /// No validation is done on the info hash length or the name.
    pub fn build(&self, record: &TorrentRecord) -> String {
        let mut magnet = format!(
            "magnet:?xt=urn:btih:{}&dn={}",
            record.nice_info_hash(),
            urlencoding::encode(record.name())
        );

        for tracker in &self.trackers {
            magnet.push_str("&tr=");
            magnet.push_str(tracker);
        }

        magnet
    }
}

impl Default for MagnetLinkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKERS)
    }
}

/// Format a magnet URI with [`DEFAULT_TRACKERS`].
pub fn build_magnet_link(record: &TorrentRecord) -> String {
    MagnetLinkBuilder::default().build(record)
}
