//! Config loader facade: builds the layered configuration.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::EntryListConfig;
use config::{ConfigError, File};
use std::path::Path;

/// Loads [`EntryListConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file, workspace files, environment
    pub fn load(workspace_root: &Path) -> Result<EntryListConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load configuration from a single explicit file (environment still applies)
    pub fn load_from_file(path: &Path) -> Result<EntryListConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }
}
