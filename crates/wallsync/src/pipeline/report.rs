use std::fmt;
use std::path::PathBuf;

/// Human-readable outcome of one sync run, printed when the batch finishes.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Image files found on disk.
    pub scanned: usize,
    /// Files already present in the database and left alone.
    pub skipped: usize,
    /// Repeated basenames within the scan, kept once.
    pub duplicates: usize,
    /// Files whose image data could not be decoded; catalogued with zeroed
    /// dimensions.
    pub errored: usize,
    /// Newly catalogued records.
    pub new_records: usize,
    /// New records that were associated with a prompt entry.
    pub matched_prompts: usize,
    /// Manifest ids whose database row or disk file is gone.
    pub stale_manifest: Vec<i64>,
    /// Database rows whose disk file is gone; never deleted automatically.
    pub orphaned_db: Vec<(i64, String)>,
    pub full_rebuild: bool,
    pub manifest_written: bool,
    /// Entry count of the manifest after the run.
    pub manifest_entries: usize,
    /// Path of the generated INSERT script, when new rows existed.
    pub sql_script: Option<PathBuf>,
    /// Rows inserted directly into the database this run.
    pub applied_inserts: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- wallpaper catalog sync ---")?;
        writeln!(
            f,
            "scanned: {}  new: {}  skipped: {}  duplicates: {}  errored: {}",
            self.scanned, self.new_records, self.skipped, self.duplicates, self.errored
        )?;

        if self.full_rebuild {
            writeln!(f, "manifest: fully rebuilt ({} entries)", self.manifest_entries)?;
        } else if self.manifest_written {
            writeln!(f, "manifest: updated ({} entries)", self.manifest_entries)?;
        } else {
            writeln!(f, "manifest: unchanged ({} entries)", self.manifest_entries)?;
        }

        match &self.sql_script {
            Some(path) => writeln!(f, "sql script: {}", path.display())?,
            None => writeln!(f, "sql script: none (no new rows)")?,
        }

        if self.applied_inserts > 0 {
            writeln!(f, "database: {} rows inserted", self.applied_inserts)?;
        }

        if self.matched_prompts > 0 {
            writeln!(f, "prompts matched: {}", self.matched_prompts)?;
        }

        if !self.stale_manifest.is_empty() {
            writeln!(f, "stale manifest entries: {:?}", self.stale_manifest)?;
        }

        if !self.orphaned_db.is_empty() {
            writeln!(
                f,
                "{} database rows have no file on disk (confirm before deleting):",
                self.orphaned_db.len()
            )?;
            for (id, file_path) in &self.orphaned_db {
                writeln!(f, "  {} -> {}", id, file_path)?;
            }
        }

        Ok(())
    }
}
