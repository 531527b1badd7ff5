//! Test fixtures shared by unit and integration tests.
//!
//! # Example
//!
//! ```rust
//! use tordex_core::testing::fixtures;
//! use tordex_core::TorrentRecord;
//!
//! let record = fixtures::sample_record();
//! assert!(record.verify().is_ok());
//! assert_eq!(record, TorrentRecord::new(fixtures::sample_input()));
//! ```

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::record::{InfoHash, NewTorrentRecord, TorrentRecord};

    /// Info hash used by [`sample_input`].
    pub const SAMPLE_INFO_HASH: [u8; 20] = [
        0xc1, 0x2f, 0xe1, 0xc0, 0x6b, 0xba, 0x25, 0x4a, 0x9d, 0xc9, 0xf5, 0x19, 0xb3, 0x35,
        0xaa, 0x7c, 0x13, 0x67, 0xa8, 0x8a,
    ];

    /// Construction input for a movie record with two tags.
    pub fn sample_input() -> NewTorrentRecord {
        NewTorrentRecord {
            info_hash: InfoHash::from(SAMPLE_INFO_HASH),
            name: "Big Buck Bunny (2008) 1080p".to_string(),
            description: "Open movie by the Blender Foundation.".to_string(),
            category: "Movies".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            tags: vec!["1080p".to_string(), "x264".to_string()],
            size_bytes: 1024 * 1024 * 700, // 700 MB
            file_count: 2,
            seeders: 42,
            leechers: 7,
        }
    }

    /// A record built from [`sample_input`].
    pub fn sample_record() -> TorrentRecord {
        TorrentRecord::new(sample_input())
    }

    /// A record built from [`sample_input`] with `name` and `category`.
    pub fn record(name: &str, category: &str) -> TorrentRecord {
        let mut input = sample_input();
        input.name = name.to_string();
        input.category = category.to_string();
        TorrentRecord::new(input)
    }
}
