use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::ManifestEntry;
use crate::error::WriteError;

/// Outcome of reading the manifest. Corruption is a recoverable condition
/// handled by the reconciler, never an error propagated past this boundary.
#[derive(Debug)]
pub enum ManifestState {
    Loaded(Vec<ManifestEntry>),
    Missing,
    Corrupt(String),
}

/// On disk the manifest is either a bare entry array or, in the merged-prompt
/// variant, an object with a `wallpapers` key.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ManifestDocument {
    Entries(Vec<ManifestEntry>),
    Merged { wallpapers: Vec<ManifestEntry> },
}

pub fn read_manifest(path: &Path) -> ManifestState {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("Manifest {} not found", path.display());
            return ManifestState::Missing;
        }
        Err(e) => {
            warn!("Manifest {} unreadable: {}", path.display(), e);
            return ManifestState::Corrupt(e.to_string());
        }
    };

    match serde_json::from_str::<ManifestDocument>(&raw) {
        Ok(ManifestDocument::Entries(entries)) => ManifestState::Loaded(entries),
        Ok(ManifestDocument::Merged { wallpapers }) => ManifestState::Loaded(wallpapers),
        Err(e) => {
            warn!("Manifest {} failed to parse: {}", path.display(), e);
            ManifestState::Corrupt(e.to_string())
        }
    }
}

/// Write the manifest atomically: serialize to a sibling temp file, then
/// rename over the target. An interrupted run never leaves a half-written
/// manifest behind.
pub fn write_manifest(
    path: &Path,
    entries: &[ManifestEntry],
    merged: bool,
) -> Result<(), WriteError> {
    let json = if merged {
        serde_json::to_string_pretty(&ManifestDocument::Merged {
            wallpapers: entries.to_vec(),
        })?
    } else {
        serde_json::to_string_pretty(entries)?
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| WriteError::WriteFile {
        path: tmp.clone(),
        source: e,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| WriteError::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Wrote manifest {} ({} entries)", path.display(), entries.len());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "manifest".into());
    name.push(".tmp");
    path.with_file_name(name)
}
