//! CLI presentation: text and JSON rendering of command results.

use crate::config::EntryListConfig;
use crate::context::UserInfo;
use crate::error::ApiError;
use crate::store::{List, Lists};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::ConfigError(e.to_string()))
}

pub fn format_list_names(site: &str, user: &str, lists: &Lists, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        let sizes: std::collections::BTreeMap<&str, usize> =
            lists.iter().map(|(name, list)| (name.as_str(), list.len())).collect();
        return to_json(&sizes);
    }
    if lists.is_empty() {
        return Ok(format!("No lists stored for {site}/{user}."));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["List", "Entries"]);
    for (name, list) in lists {
        table.add_row(vec![name.clone(), list.len().to_string()]);
    }
    Ok(format!("Lists for {site}/{user}:\n{table}\n\nTotal: {} list(s)", lists.len()))
}

pub fn format_list_body(list: &List) -> Result<String, ApiError> {
    to_json(list)
}

pub fn format_user(site: &str, user: &UserInfo) -> Result<String, ApiError> {
    let mut output = format!("{site}: {}", user.name);
    if let Some(payload) = &user.payload {
        output.push_str(&format!("\nPayload: {}", to_json(payload)?));
    }
    Ok(output)
}

pub fn format_config(config: &EntryListConfig) -> Result<String, ApiError> {
    toml::to_string_pretty(config).map_err(|e| ApiError::ConfigError(e.to_string()))
}
