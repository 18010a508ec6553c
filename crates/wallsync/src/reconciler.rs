use std::collections::HashSet;

use log::{info, warn};

use crate::catalog::{basename, ManifestEntry};
use crate::db::DbSnapshot;
use crate::manifest::ManifestState;
use crate::scanner::ScannedFile;

/// Result of the three-way diff between disk, database and manifest.
#[derive(Debug)]
pub struct ReconcilePlan {
    /// Disk files with no database row (matched by basename), in scan order.
    pub new_files: Vec<ScannedFile>,
    /// Files skipped because the scan produced the same basename twice.
    pub duplicate_basenames: usize,
    /// Manifest ids whose database row or disk file is gone. Reported only.
    pub stale_manifest: Vec<i64>,
    /// Database rows whose file is gone from disk. Reported only; deleting
    /// them requires explicit operator confirmation.
    pub orphaned_db: Vec<(i64, String)>,
    /// Regenerate the whole manifest from the database instead of patching.
    pub full_rebuild: bool,
    /// Prior manifest contents, empty when a full rebuild is scheduled.
    pub manifest_entries: Vec<ManifestEntry>,
}

/// Compute the add/keep/orphan partitions from the three source snapshots.
/// An absent, empty or unparseable manifest cannot be diffed safely, so those
/// states schedule a full rebuild from the database.
pub fn reconcile(
    scan: &[ScannedFile],
    db: &DbSnapshot,
    manifest: ManifestState,
    force_full_rebuild: bool,
) -> ReconcilePlan {
    let disk: HashSet<&str> = scan.iter().map(|f| f.filename.as_str()).collect();

    let (manifest_entries, mut full_rebuild) = match manifest {
        ManifestState::Loaded(entries) if !entries.is_empty() => (entries, false),
        ManifestState::Loaded(_) => {
            info!("Manifest is empty, scheduling full rebuild");
            (Vec::new(), true)
        }
        ManifestState::Missing => {
            info!("Manifest is missing, scheduling full rebuild");
            (Vec::new(), true)
        }
        ManifestState::Corrupt(reason) => {
            warn!("Manifest cannot be trusted ({}), scheduling full rebuild", reason);
            (Vec::new(), true)
        }
    };
    if force_full_rebuild {
        full_rebuild = true;
    }

    let mut new_files = Vec::new();
    let mut seen = HashSet::new();
    let mut duplicate_basenames = 0;
    for file in scan {
        if db.ids_by_basename.contains_key(&file.filename) {
            continue;
        }
        if !seen.insert(file.filename.clone()) {
            warn!("Duplicate basename in scan, keeping first: {}", file.relative);
            duplicate_basenames += 1;
            continue;
        }
        new_files.push(file.clone());
    }

    let stale_manifest: Vec<i64> = manifest_entries
        .iter()
        .filter(|e| !db.ids.contains(&e.id) || !disk.contains(e.filename.as_str()))
        .map(|e| e.id)
        .collect();

    let orphaned_db: Vec<(i64, String)> = db
        .rows
        .iter()
        .filter(|(_, file_path)| !disk.contains(basename(file_path).as_str()))
        .cloned()
        .collect();

    if !orphaned_db.is_empty() {
        warn!(
            "{} database rows have no file on disk; confirm before deleting: {:?}",
            orphaned_db.len(),
            orphaned_db.iter().map(|(id, _)| id).collect::<Vec<_>>()
        );
    }

    info!(
        "Reconciled: {} new, {} stale manifest entries, {} orphaned rows, full rebuild: {}",
        new_files.len(),
        stale_manifest.len(),
        orphaned_db.len(),
        full_rebuild
    );

    ReconcilePlan {
        new_files,
        duplicate_basenames,
        stale_manifest,
        orphaned_db,
        full_rebuild,
        manifest_entries,
    }
}
