use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Tracker entries are non-empty
/// - Tracker entries carry a scheme (`udp://`, `http://`, ...)
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    for (i, tracker) in config.magnet.trackers.iter().enumerate() {
        if tracker.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "magnet.trackers[{}] cannot be empty",
                i
            )));
        }
        if !tracker.contains("://") {
            return Err(ConfigError::ValidationError(format!(
                "magnet.trackers[{}] is not a URI: {}",
                i, tracker
            )));
        }
    }

    Ok(())
}
