//! Merge rules: defaults, override order, conflict handling.

use crate::config::{default_interval_ms, default_min_interval_ms, default_store_path};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("engine.interval_ms", default_interval_ms())?
        .set_default("engine.min_interval_ms", default_min_interval_ms())?
        .set_default(
            "storage.store_path",
            default_store_path().to_string_lossy().to_string(),
        )
}
