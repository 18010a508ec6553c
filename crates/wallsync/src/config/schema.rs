use serde::{Deserialize, Serialize};

/// Run configuration for one sync invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    /// Directory holding the wallpaper image files.
    pub wallpaper_directory: String,
    /// Path of the JSON manifest consumed by the front end.
    pub manifest_path: String,
    /// SQLite database file containing the `wallpapers` table.
    pub database_path: String,
    /// Database name emitted in the `USE` statement of the generated script.
    #[serde(default = "default_database_name")]
    pub database_name: String,
    /// Where the generated INSERT script is written.
    #[serde(default = "default_sql_script_path")]
    pub sql_script_path: String,
    /// Optional prompt corpus; enables fuzzy caption matching and the merged
    /// manifest format.
    #[serde(default)]
    pub prompt_corpus: Option<String>,
    /// Insert new rows into the database directly in addition to generating
    /// the SQL script.
    #[serde(default = "default_true")]
    pub apply_inserts: bool,
    /// Ordered category rules; earlier rules win ties.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,
    /// Category assigned when no rule matches.
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
}

/// One row of the category keyword map. Rule order is part of the contract:
/// classification assigns the first rule with a keyword match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
    /// Fixed tag list for this rule; when empty, tags are derived from the
    /// keywords found in the filename.
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_database_name() -> String {
    "wallpaper_db".to_string()
}

fn default_sql_script_path() -> String {
    "sync_inserts.sql".to_string()
}

fn default_true() -> bool {
    true
}

fn default_categories() -> Vec<CategoryRule> {
    crate::classifier::keywords::default_category_rules()
}

fn default_fallback_category() -> String {
    "其他".to_string()
}
