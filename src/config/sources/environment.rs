//! Environment source: ENTRYLIST__ENGINE__INTERVAL_MS=500 and friends

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("ENTRYLIST")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
