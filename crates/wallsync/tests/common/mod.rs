//! Shared harness for reconciliation integration tests: an isolated
//! wallpaper directory, SQLite catalog and manifest path inside one temp dir.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::Local;
use rusqlite::Connection;
use tempfile::TempDir;

use wallsync::classifier::keywords::default_category_rules;
use wallsync::{Config, ManifestEntry, ManifestState, SyncOptions, SyncPipeline, SyncReport};

const CREATE_TABLE: &str = "CREATE TABLE wallpapers (
    id INTEGER PRIMARY KEY,
    user_id INTEGER,
    title TEXT NOT NULL,
    description TEXT,
    file_path TEXT NOT NULL,
    file_size TEXT,
    width INTEGER,
    height INTEGER,
    category TEXT,
    tags TEXT,
    format TEXT,
    views INTEGER DEFAULT 0,
    likes INTEGER DEFAULT 0,
    created_at TEXT,
    updated_at TEXT
)";

pub struct SyncHarness {
    temp_dir: TempDir,
    pub wallpapers_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub db_path: PathBuf,
    pub sql_script_path: PathBuf,
    pub prompt_corpus: Option<PathBuf>,
}

impl SyncHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path().to_path_buf();

        let wallpapers_dir = base.join("wallpapers");
        std::fs::create_dir_all(&wallpapers_dir).expect("Failed to create wallpapers dir");

        let db_path = base.join("wallpaper.db");
        let conn = Connection::open(&db_path).expect("Failed to create database");
        conn.execute(CREATE_TABLE, []).expect("Failed to create table");

        Self {
            temp_dir,
            wallpapers_dir,
            manifest_path: base.join("data").join("list.json"),
            db_path,
            sql_script_path: base.join("sync_inserts.sql"),
            prompt_corpus: None,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            version: "1.0".to_string(),
            wallpaper_directory: self.wallpapers_dir.to_string_lossy().into_owned(),
            manifest_path: self.manifest_path.to_string_lossy().into_owned(),
            database_path: self.db_path.to_string_lossy().into_owned(),
            database_name: "wallpaper_db".to_string(),
            sql_script_path: self.sql_script_path.to_string_lossy().into_owned(),
            prompt_corpus: self
                .prompt_corpus
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            apply_inserts: true,
            categories: default_category_rules(),
            fallback_category: "其他".to_string(),
        }
    }

    /// Run one sync pass with direct inserts enabled (the default).
    pub fn run(&self) -> wallsync::Result<SyncReport> {
        self.run_with(&SyncOptions {
            force_full_rebuild: false,
            apply_inserts: true,
        })
    }

    pub fn run_with(&self, options: &SyncOptions) -> wallsync::Result<SyncReport> {
        let pipeline = SyncPipeline::from_config(self.config())?;
        pipeline.run(options)
    }

    /// Drop a decodable image into the wallpaper directory.
    pub fn add_image(&self, name: &str, width: u32, height: u32) {
        let path = self.wallpapers_dir.join(name);
        image::RgbImage::new(width, height)
            .save(&path)
            .expect("Failed to write test image");
    }

    /// Drop a file with an image extension but undecodable contents.
    pub fn add_corrupt_image(&self, name: &str) {
        std::fs::write(self.wallpapers_dir.join(name), b"not image data")
            .expect("Failed to write corrupt image");
    }

    pub fn insert_db_row(&self, id: i64, filename: &str) {
        let conn = Connection::open(&self.db_path).expect("Failed to open database");
        conn.execute(
            "INSERT INTO wallpapers (id, user_id, title, description, file_path, file_size, \
             width, height, category, tags, format, views, likes, created_at, updated_at) \
             VALUES (?1, 1, ?2, '', ?3, '1.0 KB', 16, 9, '其他', '', 'JPEG', 0, 0, \
             '2025-01-01 00:00:00', '2025-01-01 00:00:00')",
            rusqlite::params![
                id,
                filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(filename),
                format!("static/wallpapers/{}", filename),
            ],
        )
        .expect("Failed to insert row");
    }

    pub fn db_row_count(&self) -> i64 {
        let conn = Connection::open(&self.db_path).expect("Failed to open database");
        conn.query_row("SELECT COUNT(*) FROM wallpapers", [], |row| row.get(0))
            .expect("Failed to count rows")
    }

    pub fn write_manifest_raw(&self, contents: &str) {
        if let Some(parent) = self.manifest_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create manifest dir");
        }
        std::fs::write(&self.manifest_path, contents).expect("Failed to write manifest");
    }

    pub fn write_prompt_corpus(&mut self, contents: &str) {
        let path = self.temp_dir.path().join("prompts.json");
        std::fs::write(&path, contents).expect("Failed to write prompt corpus");
        self.prompt_corpus = Some(path);
    }

    pub fn manifest_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.manifest_path).expect("Failed to read manifest")
    }

    pub fn manifest_entries(&self) -> Vec<ManifestEntry> {
        match wallsync::read_manifest(&self.manifest_path) {
            ManifestState::Loaded(entries) => entries,
            other => panic!("Expected a loaded manifest, got {:?}", other),
        }
    }
}

/// Expected id for the n-th allocation of a fresh run today.
pub fn todays_id(seq: u64) -> i64 {
    format!("{}{}", Local::now().format("%Y%m%d"), seq)
        .parse()
        .expect("id fits in i64")
}
