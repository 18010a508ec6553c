pub mod allocator;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod db;
pub mod error;
pub mod guard;
pub mod manifest;
pub mod pipeline;
pub mod reconciler;
pub mod scanner;
pub mod sqlgen;

pub use catalog::{ManifestEntry, PromptEntry, WallpaperRecord};
pub use config::{load_config, CategoryRule, Config};
pub use error::{
    ConfigError, DbError, IntegrityError, Result, ScanError, WallsyncError, WriteError,
};
pub use manifest::{read_manifest, write_manifest, ManifestState};
pub use pipeline::{SyncOptions, SyncPipeline, SyncReport};
