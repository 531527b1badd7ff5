//! Types for torrent records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::{debug, warn};

use super::digest::{compute_digest, DigestScheme, HashFields};
use super::error::RecordError;
use crate::category::Category;
use crate::config::DigestConfig;
use crate::magnet::MagnetLinkBuilder;
use crate::metrics;

/// Opaque torrent identifier supplied by the caller.
///
/// Usually the 20-byte SHA-1 of a v1 info dictionary, but any length is
/// accepted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InfoHash(Vec<u8>);

impl InfoHash {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a hex string (either case).
    pub fn from_hex(s: &str) -> Result<Self, RecordError> {
        if s.is_empty() {
            return Err(RecordError::InvalidInfoHash("empty string".to_string()));
        }
        hex::decode(s)
            .map(Self)
            .map_err(|e| RecordError::InvalidInfoHash(format!("{}: {}", s, e)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for InfoHash {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 20]> for InfoHash {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for InfoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for InfoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Stored rows may hold an empty hash; only caller input must be non-empty.
        let s = String::deserialize(deserializer)?;
        hex::decode(&s)
            .map(Self)
            .map_err(|e| serde::de::Error::custom(format!("invalid info hash {}: {}", s, e)))
    }
}

/// Swarm counter tracking the span of observed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountRange {
    low: u32,
    high: u32,
    current: u32,
}

impl CountRange {
    pub fn new(initial: u32) -> Self {
        Self {
            low: initial,
            high: initial,
            current: initial,
        }
    }

    /// Record a new observation, widening the range if needed.
    pub fn observe(&mut self, value: u32) {
        self.low = self.low.min(value);
        self.high = self.high.max(value);
        self.current = value;
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    /// Most recently observed value.
    pub fn current(&self) -> u32 {
        self.current
    }
}

/// Raw input for building a [`TorrentRecord`].
#[derive(Debug, Clone)]
pub struct NewTorrentRecord {
    pub info_hash: InfoHash,
    pub name: String,
    pub description: String,
    /// Category display name, matched case-insensitively.
    /// Unrecognized names resolve to [`Category::All`].
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub size_bytes: u64,
    pub file_count: u32,
    pub seeders: u32,
    pub leechers: u32,
}

/// Editable copy of a record's fields, handed to [`TorrentRecord::edit`].
///
/// The info hash is identity and cannot be edited.
#[derive(Debug, Clone)]
pub struct RecordEdit {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub size_bytes: u64,
    pub file_count: u32,
}

/// A torrent metadata record carrying a digest of its identity fields.
///
/// The digest covers the info hash, name, description, category id,
/// creation time (whole seconds) and tags in order. Size, file count and
/// the swarm counters are not covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentRecord {
    digest: String,
    #[serde(default)]
    scheme: DigestScheme,
    info_hash: InfoHash,
    name: String,
    description: String,
    size_bytes: u64,
    #[serde(rename = "category_id")]
    category: Category,
    created_at: DateTime<Utc>,
    tags: Vec<String>,
    file_count: u32,
    seeders: CountRange,
    leechers: CountRange,
    completed: CountRange,
}

impl TorrentRecord {
    /// Build a record and capture its digest with the default scheme.
    pub fn new(input: NewTorrentRecord) -> Self {
        Self::with_scheme(input, DigestScheme::default())
    }

    /// Build a record and capture its digest with `scheme`.
    pub fn with_scheme(input: NewTorrentRecord, scheme: DigestScheme) -> Self {
        let category = Category::from_name(&input.category).unwrap_or_else(|| {
            debug!(
                category = %input.category,
                info_hash = %input.info_hash,
                "Unrecognized category, using All"
            );
            Category::default()
        });

        let mut record = Self {
            digest: String::new(),
            scheme,
            info_hash: input.info_hash,
            name: input.name,
            description: input.description,
            size_bytes: input.size_bytes,
            category,
            created_at: input.created_at,
            tags: input.tags,
            file_count: input.file_count,
            seeders: CountRange::new(input.seeders),
            leechers: CountRange::new(input.leechers),
            completed: CountRange::new(0),
        };
        record.digest = record.compute_hash();
        record
    }

    /// Build a record with the scheme from the `[digest]` config section.
    pub fn from_config(input: NewTorrentRecord, config: &DigestConfig) -> Self {
        Self::with_scheme(input, config.scheme)
    }

    /// Compute the digest of the current field values.
    ///
    /// Does not touch the stored digest.
    pub fn compute_hash(&self) -> String {
        compute_digest(&self.hash_fields(), self.scheme)
    }

    /// Borrowed view of the hash-significant fields.
    pub fn hash_fields(&self) -> HashFields<'_> {
        HashFields {
            info_hash: self.info_hash.as_bytes(),
            name: &self.name,
            description: &self.description,
            category_id: self.category.id(),
            created_at: self.created_at,
            tags: &self.tags,
        }
    }

    /// Recompute the digest and compare it with the stored one.
    pub fn verify(&self) -> Result<(), RecordError> {
        let computed = self.compute_hash();
        if computed != self.digest {
            metrics::RECORD_VERIFICATIONS
                .with_label_values(&["mismatch"])
                .inc();
            warn!(
                info_hash = %self.info_hash,
                computed = %computed,
                stored = %self.digest,
                "Record digest mismatch"
            );
            return Err(RecordError::HashMismatch {
                computed,
                stored: self.digest.clone(),
            });
        }

        metrics::RECORD_VERIFICATIONS.with_label_values(&["ok"]).inc();
        Ok(())
    }

    /// Return a copy with the edits applied and a fresh digest.
    pub fn edit<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut RecordEdit),
    {
        let mut edit = RecordEdit {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            created_at: self.created_at,
            tags: self.tags.clone(),
            size_bytes: self.size_bytes,
            file_count: self.file_count,
        };
        f(&mut edit);

        let mut record = Self {
            digest: String::new(),
            scheme: self.scheme,
            info_hash: self.info_hash.clone(),
            name: edit.name,
            description: edit.description,
            size_bytes: edit.size_bytes,
            category: edit.category,
            created_at: edit.created_at,
            tags: edit.tags,
            file_count: edit.file_count,
            seeders: self.seeders,
            leechers: self.leechers,
            completed: self.completed,
        };
        record.digest = record.compute_hash();
        record
    }

    /// Return a copy whose digest matches its current fields.
    ///
    /// This is how a caller accepts a record that failed [`verify`](Self::verify).
    pub fn rehash(&self) -> Self {
        self.rehash_with(self.scheme)
    }

    /// Like [`rehash`](Self::rehash), switching to another digest scheme.
    pub fn rehash_with(&self, scheme: DigestScheme) -> Self {
        let mut record = self.clone();
        record.scheme = scheme;
        record.digest = record.compute_hash();
        record
    }

    /// Return a copy with new swarm observations folded into the counters.
    ///
    /// The counters are outside the digest, so the stored digest carries over.
    pub fn with_swarm(&self, seeders: u32, leechers: u32, completed: u32) -> Self {
        let mut record = self.clone();
        record.seeders.observe(seeders);
        record.leechers.observe(leechers);
        record.completed.observe(completed);
        record
    }

    /// Magnet URI using the default tracker list.
    pub fn magnet_link(&self) -> String {
        MagnetLinkBuilder::default().build(self)
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn scheme(&self) -> DigestScheme {
        self.scheme
    }

    pub fn info_hash(&self) -> &InfoHash {
        &self.info_hash
    }

    /// Info hash as lowercase hex.
    pub fn nice_info_hash(&self) -> String {
        self.info_hash.to_hex()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn category_id(&self) -> u8 {
        self.category.id()
    }

    pub fn category_name(&self) -> &'static str {
        self.category.name()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn file_count(&self) -> u32 {
        self.file_count
    }

    pub fn seeders(&self) -> CountRange {
        self.seeders
    }

    pub fn leechers(&self) -> CountRange {
        self.leechers
    }

    pub fn completed(&self) -> CountRange {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DIGEST_LEN;
    use crate::testing::fixtures;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_new_record_captures_digest() {
        let record = TorrentRecord::new(fixtures::sample_input());
        assert_eq!(record.digest().len(), DIGEST_LEN);
        assert_eq!(record.digest(), record.compute_hash());
        assert!(record.verify().is_ok());
    }

    #[test]
    fn test_compute_hash_is_deterministic() {
        let a = TorrentRecord::new(fixtures::sample_input());
        let b = TorrentRecord::new(fixtures::sample_input());
        assert_eq!(a.compute_hash(), a.compute_hash());
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_constructor_resolves_category() {
        let mut input = fixtures::sample_input();
        input.category = "GAMES".to_string();
        let record = TorrentRecord::new(input);
        assert_eq!(record.category(), Category::Games);
        assert_eq!(record.category_id(), 3);
        assert_eq!(record.category_name(), "Games");
    }

    #[test]
    fn test_constructor_unknown_category_is_all() {
        let mut input = fixtures::sample_input();
        input.category = "xyz".to_string();
        let record = TorrentRecord::new(input);
        assert_eq!(record.category_id(), 0);
        assert_eq!(record.category_name(), "All");
    }

    #[test]
    fn test_constructor_initializes_counters() {
        let record = TorrentRecord::new(fixtures::sample_input());
        assert_eq!(record.seeders(), CountRange::new(42));
        assert_eq!(record.leechers(), CountRange::new(7));
        assert_eq!(record.completed(), CountRange::new(0));
    }

    #[test]
    fn test_digest_sensitive_to_hash_fields() {
        let base = TorrentRecord::new(fixtures::sample_input());

        let variants = vec![
            base.edit(|e| e.name.push('!')),
            base.edit(|e| e.description = "changed".to_string()),
            base.edit(|e| e.category = Category::Books),
            base.edit(|e| e.created_at += Duration::seconds(1)),
            base.edit(|e| e.tags[0] = "720p".to_string()),
            base.edit(|e| e.tags.reverse()),
            base.edit(|e| e.tags.push("extra".to_string())),
        ];
        for variant in &variants {
            assert_ne!(variant.digest(), base.digest());
            assert!(variant.verify().is_ok());
        }

        let mut input = fixtures::sample_input();
        input.info_hash = InfoHash::from_bytes(vec![0xff; 20]);
        assert_ne!(TorrentRecord::new(input).digest(), base.digest());
    }

    #[test]
    fn test_digest_ignores_non_hash_fields() {
        let base = TorrentRecord::new(fixtures::sample_input());

        let resized = base.edit(|e| {
            e.size_bytes += 1;
            e.file_count += 3;
        });
        assert_eq!(resized.digest(), base.digest());

        let observed = base.with_swarm(100, 0, 5);
        assert_eq!(observed.digest(), base.digest());
        assert!(observed.verify().is_ok());

        let mut input = fixtures::sample_input();
        input.seeders = 1;
        input.leechers = 1000;
        assert_eq!(TorrentRecord::new(input).digest(), base.digest());
    }

    #[test]
    fn test_subsecond_time_does_not_change_digest() {
        let base = TorrentRecord::new(fixtures::sample_input());
        let shifted = base.edit(|e| e.created_at += Duration::milliseconds(500));
        assert_eq!(shifted.digest(), base.digest());
    }

    #[test]
    fn test_empty_tags() {
        let mut input = fixtures::sample_input();
        input.tags = vec![];
        let empty = TorrentRecord::new(input);
        assert!(empty.verify().is_ok());

        let mut input = fixtures::sample_input();
        input.tags = vec!["x".to_string()];
        let one = TorrentRecord::new(input);
        assert_ne!(empty.digest(), one.digest());
    }

    #[test]
    fn test_verify_detects_tampered_row() {
        let record = TorrentRecord::new(fixtures::sample_input());
        let mut row = serde_json::to_value(&record).unwrap();
        row["name"] = serde_json::json!("Tampered");

        let tampered: TorrentRecord = serde_json::from_value(row).unwrap();
        let err = tampered.verify().unwrap_err();
        match &err {
            RecordError::HashMismatch { computed, stored } => {
                assert_eq!(stored, record.digest());
                assert_eq!(computed, &tampered.compute_hash());
                assert_ne!(computed, stored);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_verify_detects_tampered_identity_columns() {
        let record = TorrentRecord::new(fixtures::sample_input());
        let row = serde_json::to_value(&record).unwrap();

        let edits = [
            ("created_at", serde_json::json!("2024-03-01T12:00:01Z")),
            ("category_id", serde_json::json!(9)),
            ("info_hash", serde_json::json!("ff".repeat(20))),
        ];
        for (column, value) in edits {
            let mut tampered_row = row.clone();
            tampered_row[column] = value;
            let tampered: TorrentRecord = serde_json::from_value(tampered_row).unwrap();
            assert!(
                matches!(tampered.verify(), Err(RecordError::HashMismatch { .. })),
                "change to {} not detected",
                column
            );
        }
    }

    #[test]
    fn test_empty_info_hash_round_trip() {
        let mut input = fixtures::sample_input();
        input.info_hash = InfoHash::from_bytes(vec![]);
        let record = TorrentRecord::new(input);
        assert!(record.verify().is_ok());

        let json = serde_json::to_string(&record).unwrap();
        let loaded: TorrentRecord = serde_json::from_str(&json).unwrap();
        assert!(loaded.info_hash().is_empty());
        assert_eq!(loaded, record);
        assert!(loaded.verify().is_ok());
    }

    #[test]
    fn test_stored_row_rejects_malformed_info_hash() {
        let record = TorrentRecord::new(fixtures::sample_input());
        let mut row = serde_json::to_value(&record).unwrap();
        row["info_hash"] = serde_json::json!("xyz");
        let result: Result<TorrentRecord, _> = serde_json::from_value(row);
        assert!(result.is_err());
    }

    #[test]
    fn test_rehash_recovers_tampered_row() {
        let record = TorrentRecord::new(fixtures::sample_input());
        let mut row = serde_json::to_value(&record).unwrap();
        row["tags"] = serde_json::json!(["other"]);

        let tampered: TorrentRecord = serde_json::from_value(row).unwrap();
        assert!(tampered.verify().is_err());
        assert!(tampered.rehash().verify().is_ok());
    }

    #[test]
    fn test_rehash_with_switches_scheme() {
        let record = TorrentRecord::new(fixtures::sample_input());
        let prefixed = record.rehash_with(DigestScheme::LengthPrefixed);
        assert_eq!(prefixed.scheme(), DigestScheme::LengthPrefixed);
        assert_ne!(prefixed.digest(), record.digest());
        assert!(prefixed.verify().is_ok());

        let built =
            TorrentRecord::with_scheme(fixtures::sample_input(), DigestScheme::LengthPrefixed);
        assert_eq!(built.digest(), prefixed.digest());
    }

    #[test]
    fn test_from_config_uses_configured_scheme() {
        let config = DigestConfig {
            scheme: DigestScheme::LengthPrefixed,
        };
        let record = TorrentRecord::from_config(fixtures::sample_input(), &config);
        assert_eq!(record.scheme(), DigestScheme::LengthPrefixed);
        assert!(record.verify().is_ok());
    }

    #[test]
    fn test_serde_round_trip_keeps_digest_valid() {
        let record = TorrentRecord::new(fixtures::sample_input());
        let json = serde_json::to_string(&record).unwrap();
        let loaded: TorrentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, record);
        assert!(loaded.verify().is_ok());
    }

    #[test]
    fn test_stored_row_without_scheme_defaults_to_concatenated() {
        let record = TorrentRecord::new(fixtures::sample_input());
        let mut row = serde_json::to_value(&record).unwrap();
        row.as_object_mut().unwrap().remove("scheme");
        assert_eq!(row["info_hash"], serde_json::json!(record.nice_info_hash()));
        assert_eq!(row["category_id"], serde_json::json!(5));

        let loaded: TorrentRecord = serde_json::from_value(row).unwrap();
        assert_eq!(loaded.scheme(), DigestScheme::Concatenated);
        assert!(loaded.verify().is_ok());
    }

    #[test]
    fn test_created_at_normalized_to_utc() {
        let offset = chrono::FixedOffset::east_opt(3 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap();

        let mut input = fixtures::sample_input();
        input.created_at = local.with_timezone(&Utc);
        let a = TorrentRecord::new(input);

        let mut input = fixtures::sample_input();
        input.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let b = TorrentRecord::new(input);

        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_info_hash_hex() {
        let hash = InfoHash::from_hex("0123456789ABCDEF").unwrap();
        assert_eq!(hash.as_bytes(), &[0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef]);
        assert_eq!(hash.to_hex(), "0123456789abcdef");
        assert_eq!(hash.to_string(), "0123456789abcdef");
        assert_eq!(format!("{:?}", hash), "InfoHash(0123456789abcdef)");
    }

    #[test]
    fn test_info_hash_invalid_hex() {
        assert!(matches!(
            InfoHash::from_hex("abc"),
            Err(RecordError::InvalidInfoHash(_))
        ));
        assert!(matches!(
            InfoHash::from_hex("zz"),
            Err(RecordError::InvalidInfoHash(_))
        ));
        assert!(matches!(
            InfoHash::from_hex(""),
            Err(RecordError::InvalidInfoHash(_))
        ));
    }

    #[test]
    fn test_count_range_observe() {
        let mut range = CountRange::new(10);
        range.observe(4);
        range.observe(25);
        range.observe(12);
        assert_eq!(range.low(), 4);
        assert_eq!(range.high(), 25);
        assert_eq!(range.current(), 12);
    }
}
