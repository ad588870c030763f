//! Template styles and their resolution
//!
//! A slide's look is driven by a single `TemplateStyle`. Styles come from an
//! external, category-keyed catalog when one is reachable, and from three
//! built-in legacy presets otherwise.
//!
//! # Example
//!
//! ```rust
//! use slide_render::template::{resolve_style, LegacyPreset};
//!
//! let style = resolve_style("template3", None);
//! assert_eq!(style, LegacyPreset::Light.style());
//!
//! // Unknown ids never fail
//! let style = resolve_style("does-not-exist", None);
//! assert_eq!(style, LegacyPreset::Blue.style());
//! ```

mod presets;
mod registry;
mod resolver;
mod style;

pub use presets::LegacyPreset;
pub use registry::{
    parse_fetch_response, templates_or_presets, CatalogError, CatalogSource, CatalogTemplate,
    CategoryTemplates, TemplateCatalog,
};
pub use resolver::{resolve_style, StyleResolver};
pub use style::{
    ImagePosition, ImageSize, LayoutType, TemplateStyle, TextAlignment, UnknownKeyword,
    DEFAULT_ACCENT, DEFAULT_BACKGROUND, DEFAULT_GRADIENT_END, DEFAULT_TEXT,
};
