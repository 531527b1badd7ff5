//! Category enumeration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a category.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Unknown category: {0}")]
    Unknown(String),
}

/// Content category of a torrent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Category {
    #[default]
    All = 0,
    Anime = 1,
    Software = 2,
    Games = 3,
    Adult = 4,
    Movies = 5,
    Music = 6,
    Other = 7,
    SeriesTv = 8,
    Books = 9,
}

impl Category {
    /// Every category, in id order.
    pub const ALL: [Category; 10] = [
        Category::All,
        Category::Anime,
        Category::Software,
        Category::Games,
        Category::Adult,
        Category::Movies,
        Category::Music,
        Category::Other,
        Category::SeriesTv,
        Category::Books,
    ];

    /// Numeric id as fed into the record digest.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Human-readable display name.
    pub fn name(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Anime => "Anime",
            Category::Software => "Software",
            Category::Games => "Games",
            Category::Adult => "Adult",
            Category::Movies => "Movies",
            Category::Music => "Music",
            Category::Other => "Other",
            Category::SeriesTv => "Series & TV",
            Category::Books => "Books",
        }
    }

    /// Look up a category by id. Returns `None` for ids outside `0..=9`.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Look up a category by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name().to_lowercase() == lowered)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}

// Stored as the numeric id so persisted rows match the digest input.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u8::deserialize(deserializer)?;
        Category::from_id(id)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category id {}", id)))
    }
}
