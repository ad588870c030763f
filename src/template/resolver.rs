//! Style resolution: template id → complete `TemplateStyle`
//!
//! A catalog-backed style is always used verbatim. Without one, the id is
//! mapped onto the legacy presets and anything unrecognised becomes the
//! blue preset. Resolution never fails.

use log::debug;

use super::presets::LegacyPreset;
use super::registry::{templates_or_presets, CatalogSource, CategoryTemplates};
use super::style::TemplateStyle;

/// Resolve a template id, preferring a catalog-supplied style
pub fn resolve_style(template_id: &str, catalog_style: Option<&TemplateStyle>) -> TemplateStyle {
    match catalog_style {
        Some(style) => style.clone().completed(),
        None => {
            let preset = LegacyPreset::from_id(template_id);
            debug!("template '{}' resolved to legacy preset {}", template_id, preset.id());
            preset.style()
        }
    }
}

/// Resolves template ids against one category's catalog listing
#[derive(Debug, Clone)]
pub struct StyleResolver {
    templates: CategoryTemplates,
}

impl StyleResolver {
    /// Resolver over an already-fetched category
    pub fn new(templates: CategoryTemplates) -> Self {
        Self { templates }
    }

    /// Resolver backed only by the legacy presets
    pub fn legacy() -> Self {
        Self::new(CategoryTemplates::legacy("legacy"))
    }

    /// Fetch a category from a source, falling back to the legacy presets
    pub fn for_category(source: &dyn CatalogSource, category: &str) -> Self {
        Self::new(templates_or_presets(source, category))
    }

    pub fn templates(&self) -> &CategoryTemplates {
        &self.templates
    }

    /// Resolve an id to a style
    pub fn resolve(&self, template_id: &str) -> TemplateStyle {
        let entry = self.templates.get(template_id).map(|t| t.style());
        resolve_style(template_id, entry.as_ref())
    }

    /// Keep a selection if the category offers it, otherwise pick the first
    /// template in the listing
    pub fn effective_id<'a>(&'a self, selected: Option<&'a str>) -> &'a str {
        match selected {
            Some(id) if self.templates.get(id).is_some() => id,
            _ => self
                .templates
                .templates
                .first()
                .map(|t| t.id.as_str())
                .unwrap_or(LegacyPreset::Blue.id()),
        }
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::legacy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::registry::CatalogTemplate;
    use crate::template::style::{ImagePosition, LayoutType};
    use pretty_assertions::assert_eq;

    fn category() -> CategoryTemplates {
        CategoryTemplates {
            category: "podcast".to_string(),
            category_display_name: None,
            templates: vec![CatalogTemplate::new(
                "pod_feature",
                "Feature",
                TemplateStyle::new()
                    .with_colors("#111827", "#FFFFFF", "#f59e0b")
                    .with_layout_type(LayoutType::PodcastFeature)
                    .with_image_position(ImagePosition::Left),
            )],
        }
    }

    #[test]
    fn test_catalog_style_used_verbatim() {
        let resolver = StyleResolver::new(category());
        let style = resolver.resolve("pod_feature");
        assert_eq!(style.accent_color, "#f59e0b");
        assert_eq!(style.layout_type, LayoutType::PodcastFeature);
        assert_eq!(style.id.as_deref(), Some("pod_feature"));
    }

    #[test]
    fn test_unknown_id_resolves_to_blue_preset() {
        let resolver = StyleResolver::new(category());
        assert_eq!(resolver.resolve("no_such_template"), LegacyPreset::Blue.style());
        assert_eq!(resolve_style("whatever", None), LegacyPreset::Blue.style());
    }

    #[test]
    fn test_unknown_id_is_deterministic() {
        let first = resolve_style("mystery", None);
        for _ in 0..5 {
            assert_eq!(resolve_style("mystery", None), first);
        }
    }

    #[test]
    fn test_legacy_ids_without_catalog() {
        let resolver = StyleResolver::legacy();
        assert_eq!(resolver.resolve("template2").background_color, "#1a1a1a");
        assert_eq!(resolver.resolve("template3").text_color, "#181a1c");
    }

    #[test]
    fn test_effective_id() {
        let resolver = StyleResolver::new(category());
        assert_eq!(resolver.effective_id(Some("pod_feature")), "pod_feature");
        assert_eq!(resolver.effective_id(Some("template1")), "pod_feature");
        assert_eq!(resolver.effective_id(None), "pod_feature");
        assert_eq!(StyleResolver::legacy().effective_id(None), "template1");
    }
}
