//! Storage key naming.
//!
//! ```text
//! Lists-<site>-<user>            list index (JSON array of names)
//! List-<site>-<user>-<list>      list body  (JSON object id -> name)
//! <site>-lastUser                last user seen (JSON string)
//! <site>-lastUserPayload         payload of that user (any JSON)
//! ```

/// Separator between key components
pub const STORAGE_SEP: char = '-';

/// Builds storage keys for one (site, user) identity
#[derive(Debug, Clone, Copy)]
pub struct StorageKeys<'a> {
    site: &'a str,
    user: &'a str,
}

impl<'a> StorageKeys<'a> {
    pub fn new(site: &'a str, user: &'a str) -> Self {
        Self { site, user }
    }

    fn ident(&self) -> String {
        format!("{STORAGE_SEP}{}{STORAGE_SEP}{}", self.site, self.user)
    }

    /// Prefix shared by every list body of this identity
    pub fn list_prefix(&self) -> String {
        format!("List{}{STORAGE_SEP}", self.ident())
    }

    pub fn list_index(&self) -> String {
        format!("Lists{}", self.ident())
    }

    pub fn list(&self, list_name: &str) -> String {
        format!("{}{}", self.list_prefix(), list_name)
    }

    /// Recover the list name from a body key of this identity
    pub fn list_name_from_key<'k>(&self, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(self.list_prefix().as_str())
    }
}

pub fn last_user(site: &str) -> String {
    format!("{site}{STORAGE_SEP}lastUser")
}

pub fn last_user_payload(site: &str) -> String {
    format!("{site}{STORAGE_SEP}lastUserPayload")
}
