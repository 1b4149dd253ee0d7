//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_config, format_list_body, format_list_names, format_user};
use crate::config::{ConfigLoader, EntryListConfig};
use crate::error::{ApiError, StorageError};
use crate::store::{KvListStore, List, ListStore, SledBackend};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: effective config and the opened list store.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: EntryListConfig,
    store: KvListStore<SledBackend>,
    store_path: PathBuf,
}

impl RunContext {
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        store_override: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Err(errors) = config.validate() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ApiError::ConfigError(messages.join("; ")));
        }

        let mut config = config;
        if let Some(path) = store_override {
            config.storage.store_path = path;
        }
        let store_path = config.storage.resolve_store_path(&workspace_root);
        std::fs::create_dir_all(&store_path).map_err(StorageError::IoError)?;
        let backend = SledBackend::open(&store_path)?;
        debug!(store = %store_path.display(), "List store opened");

        Ok(Self {
            config,
            store: KvListStore::new(backend),
            store_path,
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let output = match command {
            Commands::Lists { site, user, format } => {
                let lists = self.store.load(site, user);
                format_list_names(site, user, &lists, format)?
            }
            Commands::Show { site, user, list } => {
                let lists = self.store.load(site, user);
                let body = lists.get(list).ok_or_else(|| not_found(site, user, list))?;
                format_list_body(body)?
            }
            Commands::Import {
                site,
                user,
                list,
                file,
            } => {
                let body = read_list_file(file)?;
                self.store.delete_one(site, user, list)?;
                self.store.save(site, user, list, &body)?;
                info!(site = %site, user = %user, list = %list, entries = body.len(), "List imported");
                format!("Imported {} entr(ies) into {site}/{user}/{list}", body.len())
            }
            Commands::Delete { site, user, list } => {
                if !self.store.list_names(site, user).contains(list) {
                    return Err(not_found(site, user, list));
                }
                self.store.delete_one(site, user, list)?;
                info!(site = %site, user = %user, list = %list, "List deleted");
                format!("Deleted {site}/{user}/{list}")
            }
            Commands::Clear { site, user } => {
                let count = self.store.list_names(site, user).len();
                self.store.delete_all(site, user)?;
                info!(site = %site, user = %user, count, "Lists cleared");
                format!("Cleared {count} list(s) of {site}/{user}")
            }
            Commands::User { site } => {
                let user = self
                    .store
                    .recall_user(site)
                    .ok_or_else(|| ApiError::UserNotFound(site.clone()))?;
                format_user(site, &user)?
            }
            Commands::Config => format_config(&self.config)?,
        };
        self.store.backend().flush()?;
        Ok(output)
    }
}

fn not_found(site: &str, user: &str, list: &str) -> ApiError {
    ApiError::ListNotFound {
        site: site.to_string(),
        user: user.to_string(),
        list: list.to_string(),
    }
}

fn read_list_file(path: &Path) -> Result<List, ApiError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ApiError::InvalidListFile(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ApiError::InvalidListFile(format!("{}: {}", path.display(), e)))
}
