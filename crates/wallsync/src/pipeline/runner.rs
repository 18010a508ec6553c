use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::Local;
use log::{debug, info};
use tracing::info_span;

use crate::allocator::IdAllocator;
use crate::catalog::{basename, ManifestEntry, WallpaperRecord};
use crate::classifier::{load_prompts, probe_image, CategoryMatcher, PromptMatcher};
use crate::config::Config;
use crate::db::Database;
use crate::error::{Result, WriteError};
use crate::guard::{check_manifest_duplicates, clear_allocation};
use crate::manifest::{read_manifest, write_manifest, ManifestState};
use crate::reconciler::reconcile;
use crate::scanner::{DirectoryScanner, ScannedFile};

use super::report::SyncReport;

/// Per-invocation switches, merged from the CLI and the config file.
#[derive(Debug, Default, Clone)]
pub struct SyncOptions {
    /// Regenerate the manifest from the database even when the current one
    /// parses.
    pub force_full_rebuild: bool,
    /// Insert the new rows directly in addition to generating the script.
    pub apply_inserts: bool,
}

/// One sequential reconciliation pass over disk, database and manifest.
pub struct SyncPipeline {
    config: Config,
    scanner: DirectoryScanner,
    matcher: CategoryMatcher,
    prompt_matcher: Option<PromptMatcher>,
}

impl SyncPipeline {
    pub fn from_config(config: Config) -> Result<Self> {
        let scanner = DirectoryScanner::new(&config.wallpaper_directory);
        let matcher = CategoryMatcher::new(
            config.categories.clone(),
            config.fallback_category.clone(),
        );
        let prompt_matcher = match &config.prompt_corpus {
            Some(path) => {
                let prompts = load_prompts(path)?;
                info!("Loaded {} prompts from {}", prompts.len(), path);
                Some(PromptMatcher::new(prompts))
            }
            None => None,
        };

        Ok(Self {
            config,
            scanner,
            matcher,
            prompt_matcher,
        })
    }

    pub fn run(&self, options: &SyncOptions) -> Result<SyncReport> {
        let _run_span = info_span!("sync").entered();
        let mut report = SyncReport::default();

        // Step 1: take the three source snapshots. A database that cannot be
        // opened or queried aborts here, before any output is produced.
        let scanned = {
            let _step = info_span!("scan").entered();
            self.scanner.scan()?
        };
        report.scanned = scanned.len();

        let mut db = Database::open(&self.config.database_path)?;
        let snapshot = db.snapshot()?;

        let manifest_path = Path::new(&self.config.manifest_path).to_path_buf();
        let manifest = read_manifest(&manifest_path);

        // Step 2: integrity gate, before anything is allocated or written.
        if let ManifestState::Loaded(entries) = &manifest {
            check_manifest_duplicates(entries)?;
        }

        // Step 3: three-way diff.
        let plan = {
            let _step = info_span!("reconcile").entered();
            reconcile(&scanned, &snapshot, manifest, options.force_full_rebuild)
        };
        report.full_rebuild = plan.full_rebuild;
        report.duplicates = plan.duplicate_basenames;
        report.skipped = report.scanned - plan.new_files.len() - plan.duplicate_basenames;

        // Step 4: classify and enrich the new files.
        let now = Local::now();
        let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
        let mut new_records = {
            let _step = info_span!("classify").entered();
            let mut records = Vec::with_capacity(plan.new_files.len());
            for file in &plan.new_files {
                records.push(self.classify_file(file, &timestamp, &mut report));
            }
            records
        };

        // Step 5: allocate ids, re-checked against every id observed at run
        // start so a concurrent writer cannot collide silently.
        {
            let _step = info_span!("allocate").entered();
            let mut taken: HashSet<i64> = snapshot.ids.clone();
            for entry in &plan.manifest_entries {
                taken.insert(entry.id);
            }
            let mut allocator = IdAllocator::seeded(now.date_naive(), &taken);
            for (record, file) in new_records.iter_mut().zip(&plan.new_files) {
                record.id = clear_allocation(&mut allocator, &mut taken, &file.filename)?;
                debug!("Allocated id {} for {}", record.id, file.filename);
            }
        }
        report.new_records = new_records.len();

        // Step 6: persist. Manifest first (atomic), then the SQL script; the
        // two are independently regenerable from the database on a rerun.
        let merged = self.prompt_matcher.is_some();
        {
            let _step = info_span!("write_manifest").entered();
            if plan.full_rebuild {
                let disk_index: HashMap<String, &ScannedFile> = scanned
                    .iter()
                    .map(|f| (f.filename.clone(), f))
                    .collect();
                let mut entries: Vec<ManifestEntry> = db
                    .all_records()?
                    .into_iter()
                    .map(|record| rebuild_entry(record, &disk_index))
                    .collect();
                entries.extend(new_records.iter().map(ManifestEntry::from));
                write_manifest(&manifest_path, &entries, merged)?;
                report.manifest_written = true;
                report.manifest_entries = entries.len();
            } else if new_records.is_empty() {
                info!("No new wallpapers, manifest left untouched");
                report.manifest_entries = plan.manifest_entries.len();
            } else {
                let mut entries = plan.manifest_entries.clone();
                entries.extend(new_records.iter().map(ManifestEntry::from));
                write_manifest(&manifest_path, &entries, merged)?;
                report.manifest_written = true;
                report.manifest_entries = entries.len();
            }
        }

        match crate::sqlgen::render_insert_script(&self.config.database_name, &new_records) {
            Some(script) => {
                let script_path = Path::new(&self.config.sql_script_path);
                std::fs::write(script_path, script).map_err(|e| WriteError::WriteFile {
                    path: script_path.to_path_buf(),
                    source: e,
                })?;
                info!("Wrote SQL script {}", script_path.display());
                report.sql_script = Some(script_path.to_path_buf());
            }
            None => info!("No new wallpapers, skipping SQL script"),
        }

        if options.apply_inserts {
            let _step = info_span!("apply_inserts").entered();
            report.applied_inserts = db.insert_records(&new_records)?;
        }

        report.stale_manifest = plan.stale_manifest;
        report.orphaned_db = plan.orphaned_db;
        Ok(report)
    }

    fn classify_file(
        &self,
        file: &ScannedFile,
        timestamp: &str,
        report: &mut SyncReport,
    ) -> WallpaperRecord {
        let probe = probe_image(&file.path);
        if !probe.readable {
            report.errored += 1;
        }

        let classification = self.matcher.classify(&file.filename);
        let mut tags = classification.tags;
        let mut description = String::new();

        if let Some(prompt_matcher) = &self.prompt_matcher {
            if let Some(m) = prompt_matcher.best_match(&file.filename) {
                debug!(
                    "Matched {} to prompt '{}' (score {:.3})",
                    file.filename, m.prompt.title, m.score
                );
                report.matched_prompts += 1;
                description = m.prompt.content.clone();
                for tag in &m.prompt.tags {
                    if !tags.contains(tag) {
                        tags.push(tag.clone());
                    }
                }
            }
        }

        let title = Path::new(&file.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&file.filename)
            .to_string();
        let file_path = format!(
            "{}/{}",
            self.config.wallpaper_directory.trim_end_matches('/'),
            file.relative
        );

        WallpaperRecord {
            id: 0, // assigned by the allocator
            user_id: 1,
            title,
            description,
            file_path,
            file_size: probe.file_size,
            width: probe.width,
            height: probe.height,
            category: classification.category,
            tags,
            format: probe.format,
            views: 0,
            likes: 0,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }
}

/// Manifest entry for a database record during a full rebuild. Records with
/// unset size or dimensions are re-probed from the file on disk when it still
/// exists.
fn rebuild_entry(
    mut record: WallpaperRecord,
    disk_index: &HashMap<String, &ScannedFile>,
) -> ManifestEntry {
    let needs_probe = record.width == 0
        || record.height == 0
        || record.file_size.is_empty()
        || record.format.is_empty();

    if needs_probe {
        if let Some(file) = disk_index.get(basename(&record.file_path).as_str()) {
            let probe = probe_image(&file.path);
            if record.width == 0 || record.height == 0 {
                record.width = probe.width;
                record.height = probe.height;
            }
            if record.file_size.is_empty() {
                record.file_size = probe.file_size;
            }
            if record.format.is_empty() {
                record.format = probe.format;
            }
        }
    }

    ManifestEntry::from(&record)
}
