//! Prometheus metrics for record hashing.
//!
//! The embedding application registers these on its own registry via
//! [`register_metrics`].

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts, Registry};

/// Digests computed, by scheme.
pub static RECORDS_HASHED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("tordex_records_hashed_total", "Total record digests computed"),
        &["scheme"], // "concatenated", "length_prefixed"
    )
    .unwrap()
});

/// Record verifications, by result.
pub static RECORD_VERIFICATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "tordex_record_verifications_total",
            "Total record digest verifications",
        ),
        &["result"], // "ok", "mismatch"
    )
    .unwrap()
});

/// Register all record metrics with `registry`.
pub fn register_metrics(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(RECORDS_HASHED.clone()))?;
    registry.register(Box::new(RECORD_VERIFICATIONS.clone()))?;
    Ok(())
}
