use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Category name used when no keyword matches a topic.
pub const FALLBACK_CATEGORY: &str = "general";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryCatalog {
    pub categories: Vec<CategoryConfig>,
}

impl CategoryCatalog {
    /// Resolve the category for a topic and its related keywords.
    ///
    /// Matching is case-insensitive keyword containment against the topic
    /// first, then each related keyword. The first category whose keyword
    /// matches wins; catalog order is significant. Falls back to
    /// [`FALLBACK_CATEGORY`] when nothing matches.
    #[must_use]
    pub fn categorize(&self, topic: &str, related_keywords: &[String]) -> String {
        let topic_lower = topic.to_lowercase();
        let related_lower: Vec<String> =
            related_keywords.iter().map(|k| k.to_lowercase()).collect();

        for category in &self.categories {
            for keyword in &category.keywords {
                let kw = keyword.to_lowercase();
                if topic_lower.contains(&kw) || related_lower.iter().any(|r| r.contains(&kw)) {
                    return category.name.clone();
                }
            }
        }

        FALLBACK_CATEGORY.to_string()
    }
}

/// Load and validate the category catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_categories(path: &Path) -> Result<CategoryCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CategoryCatalog = serde_yaml::from_str(&content)?;
    validate_categories(&catalog)?;
    Ok(catalog)
}

fn validate_categories(catalog: &CategoryCatalog) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for category in &catalog.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if category.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no keywords",
                category.name
            )));
        }

        if category.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' contains an empty keyword",
                category.name
            )));
        }

        let lower_name = category.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{}'",
                category.name
            )));
        }
    }

    Ok(())
}
