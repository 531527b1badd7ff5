//! Record digest computation.
//!
//! The digest is SHA-256 over the hash-significant fields, encoded with the
//! URL-safe base64 alphabet (with padding), which always yields 44 characters.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::metrics;

/// Length of an encoded digest string.
pub const DIGEST_LEN: usize = 44;

/// Byte layout used to feed the record fields into the hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestScheme {
    /// Fields back to back with no separators.
    ///
    /// `name = "ab", description = "c"` and `name = "a", description = "bc"`
    /// produce the same digest under this layout.
    #[default]
    Concatenated,
    /// Every variable-length field, and the tag count, is preceded by its
    /// length as a little-endian u64.
    LengthPrefixed,
}

impl DigestScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestScheme::Concatenated => "concatenated",
            DigestScheme::LengthPrefixed => "length_prefixed",
        }
    }
}

/// Borrowed view of the fields that participate in the digest.
#[derive(Debug, Clone, Copy)]
pub struct HashFields<'a> {
    pub info_hash: &'a [u8],
    pub name: &'a str,
    pub description: &'a str,
    pub category_id: u8,
    pub created_at: DateTime<Utc>,
    pub tags: &'a [String],
}

/// Compute the encoded digest of `fields` under `scheme`.
///
/// Pure apart from the hash counter; identical inputs always give identical
/// output.
pub fn compute_digest(fields: &HashFields<'_>, scheme: DigestScheme) -> String {
    let mut hasher = Sha256::new();

    match scheme {
        DigestScheme::Concatenated => {
            hasher.update(fields.info_hash);
            hasher.update(fields.name.as_bytes());
            hasher.update(fields.description.as_bytes());
            hasher.update([fields.category_id]);
            hasher.update(fields.created_at.timestamp().to_le_bytes());
            for tag in fields.tags {
                hasher.update(tag.as_bytes());
            }
        }
        DigestScheme::LengthPrefixed => {
            update_prefixed(&mut hasher, fields.info_hash);
            update_prefixed(&mut hasher, fields.name.as_bytes());
            update_prefixed(&mut hasher, fields.description.as_bytes());
            hasher.update([fields.category_id]);
            hasher.update(fields.created_at.timestamp().to_le_bytes());
            hasher.update((fields.tags.len() as u64).to_le_bytes());
            for tag in fields.tags {
                update_prefixed(&mut hasher, tag.as_bytes());
            }
        }
    }

    metrics::RECORDS_HASHED
        .with_label_values(&[scheme.as_str()])
        .inc();

    URL_SAFE.encode(hasher.finalize())
}

fn update_prefixed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
