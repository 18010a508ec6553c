use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallsyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Failed to read prompt corpus '{path}': {source}")]
    ReadPromptCorpus {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory scan failed for '{path}': {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

#[derive(Error, Debug)]
pub enum IntegrityError {
    #[error("Duplicate id {id} in manifest, resolve before syncing")]
    DuplicateId { id: i64 },

    #[error("Could not find a free id for '{filename}' after {attempts} attempts")]
    RetryBudgetExhausted { filename: String, attempts: u32 },

    #[error("Id space exhausted for date prefix {prefix}")]
    IdSpaceExhausted { prefix: String },
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to replace '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WallsyncError>;
