//! Template catalogs, fetch fallback and style resolution

use pretty_assertions::assert_eq;
use slide_render::template::{
    parse_fetch_response, templates_or_presets, CatalogError, CatalogSource, CategoryTemplates,
    ImagePosition, LayoutType, LegacyPreset,
};
use slide_render::{resolve_style, select, Layout, StyleResolver, TemplateCatalog, TemplateStyle};

const FETCH_RESPONSE: &str = r##"{
    "category": "podcast",
    "category_display_name": "Podcast",
    "templates": [
        {
            "id": "pod_dark",
            "name": "Podcast Dark",
            "background_color": "#111827",
            "background_gradient_end": "#000000",
            "text_color": "#FFFFFF",
            "accent_color": "#f59e0b",
            "layout_type": "podcast_feature",
            "image_position": "left"
        },
        {
            "id": "pod_wide",
            "name": "Podcast Wide",
            "backgroundColor": "#0f172a",
            "textColor": "#e2e8f0",
            "accentColor": "#38bdf8",
            "layoutType": "media_wide",
            "imagePosition": "left"
        }
    ]
}"##;

struct Unreachable;

impl CatalogSource for Unreachable {
    fn fetch(&self, _category: &str) -> Result<CategoryTemplates, CatalogError> {
        Err(CatalogError::Unavailable {
            message: "503 Service Unavailable".to_string(),
        })
    }
}

struct Fetched(&'static str);

impl CatalogSource for Fetched {
    fn fetch(&self, _category: &str) -> Result<CategoryTemplates, CatalogError> {
        parse_fetch_response(self.0)
    }
}

#[test]
fn test_fetch_failure_yields_presets_in_order() {
    let templates = templates_or_presets(&Unreachable, "research_spotlight");
    let ids: Vec<_> = templates.templates.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["template1", "template2", "template3"]);
    assert_eq!(templates.display_name(), "Research Spotlight");
}

#[test]
fn test_unknown_id_resolves_to_blue() {
    let resolver = StyleResolver::for_category(&Unreachable, "podcast");
    assert_eq!(resolver.resolve("nonexistent"), LegacyPreset::Blue.style());
    assert_eq!(resolve_style("", None), LegacyPreset::Blue.style());
    assert_eq!(resolver.resolve("template2"), LegacyPreset::Dark.style());
}

#[test]
fn test_catalog_entry_used_verbatim() {
    let resolver = StyleResolver::for_category(&Fetched(FETCH_RESPONSE), "podcast");
    let style = resolver.resolve("pod_dark");
    assert_eq!(style.id.as_deref(), Some("pod_dark"));
    assert_eq!(style.background_color, "#111827");
    assert_eq!(style.gradient_end(), "#000000");
    assert_eq!(style.accent_color, "#f59e0b");
    assert_eq!(style.layout_type, LayoutType::PodcastFeature);
    assert_eq!(select(&style), Layout::Podcast);
}

#[test]
fn test_camel_case_catalog_fields() {
    let resolver = StyleResolver::for_category(&Fetched(FETCH_RESPONSE), "podcast");
    let style = resolver.resolve("pod_wide");
    assert_eq!(style.text_color, "#e2e8f0");
    assert_eq!(style.image_position, ImagePosition::Left);
    assert_eq!(select(&style), Layout::MediaWide);
    // No gradient end: the background is a flat gradient of one color
    assert_eq!(style.gradient_end(), "#0f172a");
}

#[test]
fn test_effective_id_prefers_first_catalog_entry() {
    let resolver = StyleResolver::for_category(&Fetched(FETCH_RESPONSE), "podcast");
    assert_eq!(resolver.effective_id(None), "pod_dark");
    assert_eq!(resolver.effective_id(Some("pod_wide")), "pod_wide");
    assert_eq!(resolver.effective_id(Some("template1")), "pod_dark");
}

#[test]
fn test_unknown_keywords_degrade() {
    let body = r##"{"category": "x", "templates": [
        {"id": "odd", "name": "Odd", "layout_type": "diagonal", "image_position": "upside_down",
         "background_color": "", "text_color": "#000000", "accent_color": "#111111"}
    ]}"##;
    let style = parse_fetch_response(body).unwrap().get("odd").unwrap().style();
    assert_eq!(style.layout_type, LayoutType::SplitTextPrimary);
    assert_eq!(style.image_position, ImagePosition::Right);
    assert_eq!(style.background_color, TemplateStyle::default().background_color);
}

#[test]
fn test_toml_catalog_as_source() {
    let catalog = TemplateCatalog::from_toml(
        r##"
[[categories]]
category = "congrats"

[[categories.templates]]
id = "gold"
name = "Gold Frame"
background_color = "#1f2937"
text_color = "#FFFFFF"
accent_color = "#d4af37"
layout_type = "congrats_framed"
image_position = "right"
"##,
    )
    .unwrap();

    let templates = templates_or_presets(&catalog, "congrats");
    assert_eq!(templates.templates.len(), 1);
    assert_eq!(select(&templates.templates[0].style()), Layout::CongratsFramed);

    // A category the file does not list falls back like a failed fetch
    let missing = templates_or_presets(&catalog, "media_mention");
    assert_eq!(missing.templates.len(), 3);
}

#[test]
fn test_duplicate_ids_rejected() {
    let body = r#"{"category": "x", "templates": [
        {"id": "a", "name": "A"}, {"id": "a", "name": "Again"}
    ]}"#;
    assert!(matches!(
        parse_fetch_response(body),
        Err(CatalogError::DuplicateTemplate { .. })
    ));
}
