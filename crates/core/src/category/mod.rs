//! Torrent category codec.
//!
//! Categories are a closed set of ten values. The numeric id is part of the
//! record digest, so the id/name pairing below must never change.

mod types;

pub use types::*;

/// Display name returned for ids outside the known range.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Map a category id to its display name.
///
/// Ids outside `0..=9` yield `"Unknown"`.
pub fn id_to_name(id: u8) -> &'static str {
    Category::from_id(id)
        .map(Category::name)
        .unwrap_or(UNKNOWN_CATEGORY_NAME)
}

/// Map a category name to its id, ignoring case.
///
/// Unrecognized names fall back to `0` ("All"). Use [`Category::from_name`]
/// when "unknown" needs to be told apart from an explicit "All".
pub fn name_to_id(name: &str) -> u8 {
    Category::from_name(name).unwrap_or_default().id()
}
