//! Integration tests for the CLI route table

use entrylist::cli::{map_error, Commands, RunContext};
use entrylist::{ApiError, KvListStore, ListStore, SledBackend, UserInfo};
use tempfile::TempDir;

struct Fixture {
    workspace: TempDir,
    store_dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            workspace: TempDir::new().unwrap(),
            store_dir: TempDir::new().unwrap(),
        }
    }

    fn context(&self) -> RunContext {
        RunContext::new(
            self.workspace.path().to_path_buf(),
            None,
            Some(self.store_dir.path().to_path_buf()),
        )
        .unwrap()
    }

    fn write_json(&self, name: &str, body: &str) -> std::path::PathBuf {
        let path = self.workspace.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }
}

fn args(site: &str, user: &str, list: &str) -> (String, String, String) {
    (site.to_string(), user.to_string(), list.to_string())
}

#[test]
fn test_import_then_lists_and_show() {
    let fx = Fixture::new();
    let file = fx.write_json("watchlist.json", r#"{"tt0111161": "The Shawshank Redemption", "tt0068646": "The Godfather"}"#);
    let ctx = fx.context();

    let (site, user, list) = args("IMDb", "guido", "Your Watchlist");
    let out = ctx
        .execute(&Commands::Import {
            site: site.clone(),
            user: user.clone(),
            list: list.clone(),
            file,
        })
        .unwrap();
    assert!(out.contains("Imported 2"));

    let out = ctx
        .execute(&Commands::Lists {
            site: site.clone(),
            user: user.clone(),
            format: "json".to_string(),
        })
        .unwrap();
    let sizes: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(sizes["Your Watchlist"], 2);

    let out = ctx.execute(&Commands::Show { site, user, list }).unwrap();
    let body: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(body["tt0068646"], "The Godfather");
}

#[test]
fn test_import_replaces_existing_list() {
    let fx = Fixture::new();
    let first = fx.write_json("a.json", r#"{"1": "A", "2": "B"}"#);
    let second = fx.write_json("b.json", r#"{"3": "C"}"#);
    let ctx = fx.context();

    for file in [first, second] {
        let (site, user, list) = args("Netflix", "_", "nfMyList");
        ctx.execute(&Commands::Import { site, user, list, file }).unwrap();
    }

    let (site, user, list) = args("Netflix", "_", "nfMyList");
    let out = ctx.execute(&Commands::Show { site, user, list }).unwrap();
    let body: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(body, serde_json::json!({"3": "C"}));
}

#[test]
fn test_invalid_list_file_is_rejected() {
    let fx = Fixture::new();
    let file = fx.write_json("bad.json", r#"["not", "an", "object"]"#);
    let ctx = fx.context();

    let (site, user, list) = args("Netflix", "_", "localHide");
    let err = ctx.execute(&Commands::Import { site, user, list, file }).unwrap_err();
    assert!(matches!(err, ApiError::InvalidListFile(_)));
    assert!(map_error(&err).contains("JSON object"));
}

#[test]
fn test_delete_and_clear() {
    let fx = Fixture::new();
    let file = fx.write_json("l.json", r#"{"1": "A"}"#);
    let ctx = fx.context();
    for name in ["a", "b", "c"] {
        let (site, user, list) = args("Netflix", "_", name);
        ctx.execute(&Commands::Import { site, user, list, file: file.clone() }).unwrap();
    }

    let (site, user, list) = args("Netflix", "_", "a");
    ctx.execute(&Commands::Delete { site, user, list }).unwrap();

    let (site, user, list) = args("Netflix", "_", "a");
    let err = ctx.execute(&Commands::Delete { site, user, list }).unwrap_err();
    assert!(matches!(err, ApiError::ListNotFound { .. }));

    let out = ctx
        .execute(&Commands::Clear {
            site: "Netflix".to_string(),
            user: "_".to_string(),
        })
        .unwrap();
    assert_eq!(out, "Cleared 2 list(s) of Netflix/_");

    let out = ctx
        .execute(&Commands::Lists {
            site: "Netflix".to_string(),
            user: "_".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(out, "No lists stored for Netflix/_.");
}

#[test]
fn test_user_command() {
    let fx = Fixture::new();
    {
        let backend = SledBackend::open(fx.store_dir.path()).unwrap();
        let store = KvListStore::new(backend);
        store.remember_user("IMDb", &UserInfo::new("guido")).unwrap();
        store.backend().flush().unwrap();
    }
    let ctx = fx.context();

    let out = ctx.execute(&Commands::User { site: "IMDb".to_string() }).unwrap();
    assert_eq!(out, "IMDb: guido");

    let err = ctx
        .execute(&Commands::User { site: "Netflix".to_string() })
        .unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound(_)));
}

#[test]
fn test_config_command_shows_effective_settings() {
    let fx = Fixture::new();
    let config_dir = fx.workspace.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[engine]\ninterval_ms = 2500\n").unwrap();

    let out = fx.context().execute(&Commands::Config).unwrap();
    assert!(out.contains("interval_ms = 2500"));
    assert!(out.contains(&fx.store_dir.path().display().to_string()));
}
