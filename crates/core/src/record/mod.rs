//! Torrent metadata records with a tamper-evident digest.
//!
//! A [`TorrentRecord`] captures a SHA-256 digest over its identity fields
//! when it is built. Records are immutable: every change goes through
//! [`TorrentRecord::edit`], which returns a new record with a fresh digest.
//! Records loaded back from storage keep whatever digest was stored, so
//! [`TorrentRecord::verify`] catches rows that were altered behind the
//! record's back.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use tordex_core::record::{InfoHash, NewTorrentRecord, TorrentRecord};
//!
//! let record = TorrentRecord::new(NewTorrentRecord {
//!     info_hash: InfoHash::from_bytes(vec![0xab; 20]),
//!     name: "Test Movie".to_string(),
//!     description: "A test".to_string(),
//!     category: "movies".to_string(),
//!     created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//!     tags: vec!["1080p".to_string()],
//!     size_bytes: 1 << 30,
//!     file_count: 1,
//!     seeders: 10,
//!     leechers: 2,
//! });
//!
//! assert!(record.verify().is_ok());
//! assert_eq!(record.category_name(), "Movies");
//!
//! let renamed = record.edit(|e| e.name = "Other Movie".to_string());
//! assert_ne!(renamed.digest(), record.digest());
//! assert!(renamed.verify().is_ok());
//! ```

mod digest;
mod error;
mod types;

pub use digest::{compute_digest, DigestScheme, HashFields, DIGEST_LEN};
pub use error::RecordError;
pub use types::{CountRange, InfoHash, NewTorrentRecord, RecordEdit, TorrentRecord};
