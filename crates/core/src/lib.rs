pub mod category;
pub mod config;
pub mod magnet;
pub mod metrics;
pub mod record;
pub mod testing;

pub use category::{id_to_name, name_to_id, Category, CategoryError, UNKNOWN_CATEGORY_NAME};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DigestConfig,
    MagnetConfig,
};
pub use magnet::{build_magnet_link, MagnetLinkBuilder, DEFAULT_TRACKERS};
pub use metrics::register_metrics;
pub use record::{
    compute_digest, CountRange, DigestScheme, HashFields, InfoHash, NewTorrentRecord, RecordEdit,
    RecordError, TorrentRecord, DIGEST_LEN,
};
