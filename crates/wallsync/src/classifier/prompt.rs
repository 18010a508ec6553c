use std::path::Path;

use serde::Deserialize;
use strsim::normalized_levenshtein;

use crate::catalog::PromptEntry;
use crate::error::ConfigError;

const ACCEPT_THRESHOLD: f64 = 0.3;
const TITLE_WEIGHT: f64 = 0.5;
const CONTENT_WEIGHT: f64 = 0.3;
const TAG_WEIGHT: f64 = 0.2;

/// Associates generated images with the caption/prompt entry they most likely
/// came from, using a weighted blend of title/content/tag similarity.
pub struct PromptMatcher {
    prompts: Vec<PromptEntry>,
}

#[derive(Debug)]
pub struct PromptMatch<'a> {
    pub prompt: &'a PromptEntry,
    pub score: f64,
}

/// The corpus is either a bare array or an object with a `prompts` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum PromptCorpus {
    Entries(Vec<PromptEntry>),
    Keyed { prompts: Vec<PromptEntry> },
}

pub fn load_prompts<P: AsRef<Path>>(path: P) -> Result<Vec<PromptEntry>, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadPromptCorpus {
        path: path.to_path_buf(),
        source: e,
    })?;

    match serde_json::from_str::<PromptCorpus>(&content)? {
        PromptCorpus::Entries(prompts) => Ok(prompts),
        PromptCorpus::Keyed { prompts } => Ok(prompts),
    }
}

impl PromptMatcher {
    pub fn new(prompts: Vec<PromptEntry>) -> Self {
        Self { prompts }
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Image basename with the extension and any trailing digit run (plus
    /// separators) stripped, lowercased for comparison.
    pub fn normalize_stem(filename: &str) -> String {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);
        let stripped = stem.trim_end_matches(|c: char| c.is_ascii_digit());
        let stripped = stripped.trim_end_matches(['_', '-', ' ']);
        stripped.to_lowercase()
    }

    fn similarity(a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        normalized_levenshtein(a, &b.to_lowercase())
    }

    /// Best prompt for the given image filename, if its composite score
    /// exceeds the acceptance threshold. Ties keep the first prompt that
    /// reached the best score.
    pub fn best_match(&self, filename: &str) -> Option<PromptMatch<'_>> {
        let stem = Self::normalize_stem(filename);
        let mut best: Option<PromptMatch<'_>> = None;

        for prompt in &self.prompts {
            let title_score = Self::similarity(&stem, &prompt.title);
            let content_score = prompt
                .content
                .split_whitespace()
                .map(|word| Self::similarity(&stem, word))
                .fold(0.0_f64, f64::max);
            let tag_score = prompt
                .tags
                .iter()
                .map(|tag| Self::similarity(&stem, tag))
                .fold(0.0_f64, f64::max);

            let score =
                TITLE_WEIGHT * title_score + CONTENT_WEIGHT * content_score + TAG_WEIGHT * tag_score;
            if score <= ACCEPT_THRESHOLD {
                continue;
            }

            let improved = match &best {
                Some(current) => score > current.score,
                None => true,
            };
            if improved {
                best = Some(PromptMatch { prompt, score });
            }
        }

        best
    }
}
