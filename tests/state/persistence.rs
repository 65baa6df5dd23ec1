use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use datawise::AppContext;
use datawise::alert::AlertKind;
use datawise::storage::FileStorage;
use datawise::store::Theme;

use super::api_harness::{config_for, sample_user};

fn file_context(dir: &TempDir) -> AppContext {
    let mut config = config_for("http://localhost:8000");
    config.storage_dir = dir.path().display().to_string();
    AppContext::new(config).unwrap()
}

#[test]
fn preferences_and_session_survive_restart() {
    let tmp = TempDir::new().unwrap();
    let ctx = file_context(&tmp);
    ctx.ui().set_theme(Theme::Dark);
    ctx.ui().toggle_sidebar();
    ctx.ui().add_alert(AlertKind::Success, "salvo");
    ctx.auth().login(sample_user(), "jwt-file".into());
    drop(ctx);

    let restarted = file_context(&tmp);
    let ui = restarted.ui().state();
    assert_eq!(ui.theme, Theme::Dark);
    assert!(ui.sidebar_collapsed);
    assert!(ui.alerts.is_empty());
    assert_eq!(restarted.auth().state().token.as_deref(), Some("jwt-file"));
}

#[test]
fn entries_use_versioned_envelope() {
    let tmp = TempDir::new().unwrap();
    let ctx = AppContext::with_storage(
        config_for("http://localhost:8000"),
        Arc::new(FileStorage::new(tmp.path())),
    );
    ctx.ui().set_theme(Theme::System);

    let raw = std::fs::read_to_string(tmp.path().join("ui-storage.json")).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 0);
    assert_eq!(value["state"]["theme"], "system");
    assert_eq!(value["state"]["sidebarCollapsed"], false);
}

#[test]
fn logout_removes_session_file() {
    let tmp = TempDir::new().unwrap();
    let ctx = file_context(&tmp);
    ctx.auth().login(sample_user(), "jwt".into());
    assert!(tmp.path().join("auth-storage.json").exists());

    ctx.auth().logout();
    assert!(!tmp.path().join("auth-storage.json").exists());
    assert!(!file_context(&tmp).auth().state().is_authenticated());
}

#[test]
fn unreadable_entry_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("ui-storage.json"), "not json").unwrap();
    std::fs::write(
        tmp.path().join("auth-storage.json"),
        r#"{"state":{"user":null,"token":"t"},"version":7}"#,
    )
    .unwrap();

    let ctx = file_context(&tmp);
    assert_eq!(ctx.ui().state().theme, Theme::Light);
    assert!(!ctx.auth().state().is_authenticated());
}
