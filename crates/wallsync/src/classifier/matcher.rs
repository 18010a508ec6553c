use crate::config::schema::CategoryRule;

/// First-match-wins keyword classifier over an ordered rule list.
pub struct CategoryMatcher {
    rules: Vec<CategoryRule>,
    fallback: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: String,
    pub tags: Vec<String>,
}

impl CategoryMatcher {
    pub fn new(rules: Vec<CategoryRule>, fallback: String) -> Self {
        Self { rules, fallback }
    }

    /// Assign a category from the filename. Rules are checked in order and
    /// the first keyword hit decides; the fallback category applies when
    /// nothing matches.
    pub fn classify(&self, filename: &str) -> Classification {
        let haystack = filename.to_lowercase();

        for rule in &self.rules {
            for keyword in &rule.keywords {
                if !haystack.contains(&keyword.to_lowercase()) {
                    continue;
                }
                if !rule.tags.is_empty() {
                    return Classification {
                        category: rule.category.clone(),
                        tags: rule.tags.clone(),
                    };
                }
                // Matched keyword first, then any other keyword of the same
                // rule that also occurs in the filename.
                let mut tags = vec![keyword.clone()];
                for other in &rule.keywords {
                    if other != keyword && haystack.contains(&other.to_lowercase()) {
                        tags.push(other.clone());
                    }
                }
                return Classification {
                    category: rule.category.clone(),
                    tags,
                };
            }
        }

        Classification {
            category: self.fallback.clone(),
            tags: vec![self.fallback.clone()],
        }
    }
}
