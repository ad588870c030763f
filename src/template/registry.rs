//! Template catalog: category-keyed, ordered lists of template styles
//!
//! The catalog is normally owned by an external service and fetched per
//! content category. It can also be loaded from a TOML file for offline
//! rendering. When a fetch fails, callers fall back to the legacy presets.

use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use super::presets::LegacyPreset;
use super::style::TemplateStyle;

/// Errors that can occur while loading or querying a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse catalog response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown category: {category}")]
    CategoryNotFound { category: String },

    #[error("duplicate category: {category}")]
    DuplicateCategory { category: String },

    #[error("duplicate template id '{id}' in category {category}")]
    DuplicateTemplate { category: String, id: String },

    #[error("catalog fetch failed: {message}")]
    Unavailable { message: String },
}

/// One selectable template in a category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    style: TemplateStyle,
}

impl CatalogTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, style: TemplateStyle) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            style,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The style descriptor, stamped with this entry's id and name
    pub fn style(&self) -> TemplateStyle {
        TemplateStyle {
            id: Some(self.id.clone()),
            name: Some(self.name.clone()),
            ..self.style.clone()
        }
        .completed()
    }

    fn from_preset(preset: LegacyPreset) -> Self {
        Self::new(preset.id(), preset.name(), preset.style()).with_description(preset.description())
    }
}

/// All templates offered for one content category, in display order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryTemplates {
    #[serde(alias = "key")]
    pub category: String,
    #[serde(default, alias = "display_name")]
    pub category_display_name: Option<String>,
    #[serde(default)]
    pub templates: Vec<CatalogTemplate>,
}

impl CategoryTemplates {
    /// The three legacy presets, presented as a category
    pub fn legacy(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            category_display_name: None,
            templates: LegacyPreset::ALL
                .iter()
                .map(|p| CatalogTemplate::from_preset(*p))
                .collect(),
        }
    }

    /// Find a template by id
    pub fn get(&self, id: &str) -> Option<&CatalogTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Human-readable category name, derived from the key when not supplied
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.category_display_name {
            return name.clone();
        }
        self.category
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn check_unique(&self) -> Result<(), CatalogError> {
        for (i, t) in self.templates.iter().enumerate() {
            if self.templates[..i].iter().any(|other| other.id == t.id) {
                return Err(CatalogError::DuplicateTemplate {
                    category: self.category.clone(),
                    id: t.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Anything that can answer "which templates exist for this category"
pub trait CatalogSource {
    fn fetch(&self, category: &str) -> Result<CategoryTemplates, CatalogError>;
}

/// An in-memory catalog, typically loaded from TOML
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    categories: Vec<CategoryTemplates>,
}

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default, alias = "category")]
    categories: Vec<CategoryTemplates>,
}

impl TemplateCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a catalog from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(content)?;
        let mut catalog = Self::new();
        for category in parsed.categories {
            catalog.register(category)?;
        }
        debug!("loaded template catalog with {} categories", catalog.categories.len());
        Ok(catalog)
    }

    /// Add a category
    pub fn register(&mut self, category: CategoryTemplates) -> Result<(), CatalogError> {
        if self.contains(&category.category) {
            return Err(CatalogError::DuplicateCategory {
                category: category.category,
            });
        }
        category.check_unique()?;
        self.categories.push(category);
        Ok(())
    }

    /// Check if a category exists
    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Get a category by key
    pub fn get(&self, category: &str) -> Option<&CategoryTemplates> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Category keys, in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.category.as_str())
    }

    /// Find a template by id in any category
    pub fn find_template(&self, id: &str) -> Option<&CatalogTemplate> {
        self.categories.iter().find_map(|c| c.get(id))
    }
}

impl CatalogSource for TemplateCatalog {
    fn fetch(&self, category: &str) -> Result<CategoryTemplates, CatalogError> {
        self.get(category)
            .cloned()
            .ok_or_else(|| CatalogError::CategoryNotFound {
                category: category.to_string(),
            })
    }
}

/// Parse the JSON body returned by the catalog service
pub fn parse_fetch_response(body: &str) -> Result<CategoryTemplates, CatalogError> {
    let category: CategoryTemplates = serde_json::from_str(body)?;
    category.check_unique()?;
    Ok(category)
}

/// Fetch a category, substituting the legacy presets when the fetch fails
/// or returns no templates
pub fn templates_or_presets(source: &dyn CatalogSource, category: &str) -> CategoryTemplates {
    match source.fetch(category) {
        Ok(found) if !found.templates.is_empty() => found,
        Ok(_) => {
            warn!("catalog returned no templates for '{}', using legacy presets", category);
            CategoryTemplates::legacy(category)
        }
        Err(e) => {
            warn!("{}; using legacy presets for '{}'", e, category);
            CategoryTemplates::legacy(category)
        }
    }
}
