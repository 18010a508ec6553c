//! Loading the run configuration from disk.

use assert_fs::prelude::*;
use assert_fs::TempDir;

use wallsync::{load_config, ConfigError, WallsyncError};

#[test]
fn test_load_config_from_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("wallsync.json");
    file.write_str(
        r#"
        {
            "version": "1.0",
            "wallpaper_directory": "static/wallpapers",
            "manifest_path": "static/data/list.json",
            "database_path": "wallpaper.db",
            "database_name": "wallpaper_db",
            "sql_script_path": "out/inserts.sql"
        }
        "#,
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.wallpaper_directory, "static/wallpapers");
    assert_eq!(config.sql_script_path, "out/inserts.sql");
    assert!(config.apply_inserts, "direct apply is the default");
    assert!(!config.categories.is_empty(), "built-in category map applies");
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    let result = load_config(temp.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn test_config_with_custom_category_map() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("wallsync.json");
    file.write_str(
        r#"
        {
            "version": "1.0",
            "wallpaper_directory": "w",
            "manifest_path": "list.json",
            "database_path": "db.sqlite",
            "fallback_category": "misc",
            "categories": [
                { "category": "nature", "keywords": ["forest", "ocean"] },
                { "category": "city", "keywords": ["skyline"], "tags": ["urban"] }
            ]
        }
        "#,
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.categories.len(), 2);
    assert_eq!(config.categories[1].tags, vec!["urban".to_string()]);
    assert_eq!(config.fallback_category, "misc");
}

#[test]
fn test_config_error_converts_into_top_level_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("wallsync.json");
    file.write_str(r#"{"version": "9.9"}"#).unwrap();

    let result: Result<_, WallsyncError> = load_config(file.path()).map_err(Into::into);
    assert!(matches!(result, Err(WallsyncError::Config(_))));
}
