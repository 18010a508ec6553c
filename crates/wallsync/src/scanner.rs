use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::ScanError;

/// Image extensions picked up by the scan, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Reserved subdirectory holding generated derivatives; never scanned.
pub const PREVIEW_DIR: &str = "preview";

#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Basename, e.g. "sunset.jpg".
    pub filename: String,
    /// Path relative to the wallpaper directory, with the platform separator.
    pub relative: String,
    /// Absolute (or config-relative) path usable for probing.
    pub path: PathBuf,
}

pub struct DirectoryScanner {
    wallpaper_directory: PathBuf,
}

impl DirectoryScanner {
    pub fn new<P: AsRef<Path>>(wallpaper_directory: P) -> Self {
        Self {
            wallpaper_directory: wallpaper_directory.as_ref().to_path_buf(),
        }
    }

    pub fn wallpaper_directory(&self) -> &Path {
        &self.wallpaper_directory
    }

    /// List the image files under the wallpaper directory, skipping the
    /// reserved preview subdirectory, ordered by filename.
    pub fn scan(&self) -> Result<Vec<ScannedFile>, ScanError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.wallpaper_directory)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == PREVIEW_DIR));

        for entry in walker {
            let entry = entry.map_err(|e| ScanError::Directory {
                path: self.wallpaper_directory.clone(),
                source: e,
            })?;
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !is_supported_extension(ext) {
                continue;
            }

            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let relative = path
                .strip_prefix(&self.wallpaper_directory)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            debug!("Found image: {}", path.display());
            files.push(ScannedFile {
                filename: filename.to_string(),
                relative,
                path: path.to_path_buf(),
            });
        }

        files.sort_by(|a, b| a.filename.cmp(&b.filename));

        info!(
            "Scanned {} images in {}",
            files.len(),
            self.wallpaper_directory.display()
        );
        Ok(files)
    }
}

pub fn is_supported_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}
