use std::path::Path;

use serde::{Deserialize, Serialize};

/// One unit of catalog truth, present in both the `wallpapers` table and the
/// manifest after a completed sync.
#[derive(Debug, Clone, PartialEq)]
pub struct WallpaperRecord {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub file_path: String,
    /// Human-formatted size ("512.3 KB"), derived from the byte count at scan time.
    pub file_size: String,
    pub width: u32,
    pub height: u32,
    pub category: String,
    pub tags: Vec<String>,
    pub format: String,
    pub views: i64,
    pub likes: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Denormalized projection of [`WallpaperRecord`] written to the JSON manifest
/// consumed by the front end. Field names follow the manifest on disk, not the
/// database columns (`path`/`size`/`name` rather than `file_path`/`file_size`/
/// `title`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: i64,
    pub filename: String,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub created_at: String,
}

impl From<&WallpaperRecord> for ManifestEntry {
    fn from(record: &WallpaperRecord) -> Self {
        Self {
            id: record.id,
            filename: basename(&record.file_path),
            name: record.title.clone(),
            path: record.file_path.clone(),
            description: record.description.clone(),
            size: record.file_size.clone(),
            width: record.width,
            height: record.height,
            category: record.category.clone(),
            tags: record.tags.clone(),
            format: record.format.clone(),
            views: record.views,
            likes: record.likes,
            created_at: record.created_at.clone(),
        }
    }
}

/// Caption-style text block from the optional external prompt corpus, used
/// only by the fuzzy-matching classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptEntry {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Last path component as an owned string.
pub fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Format a byte count as B/KB/MB with one decimal place, switching units at
/// 1024 and 1024*1024 bytes.
pub fn format_file_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes < KIB {
        format!("{:.1} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes / KIB)
    } else {
        format!("{:.1} MB", bytes / MIB)
    }
}
