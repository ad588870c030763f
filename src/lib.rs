//! Slide Render - template-driven rendering of promotional slides
//!
//! This library turns a handful of content fields and a template style into a
//! slide, laid out by one of nine layouts and serialized to HTML. The same
//! layout drives the inline preview, the lightbox preview and a fixed
//! 1920×1080 export surface that an external capture tool screenshots.
//!
//! # Example
//!
//! ```rust
//! use slide_render::render;
//!
//! let html = render(r#"{"headline": "Q3 Results", "eventDate": "Oct 1"}"#).unwrap();
//! assert!(html.contains("Q3 Results"));
//! assert!(html.contains(r#"data-slot="event-details""#));
//! ```

pub mod content;
pub mod error;
pub mod export;
pub mod image;
pub mod layout;
pub mod preview;
pub mod qr;
pub mod renderer;
pub mod template;

pub use content::SlideContent;
pub use error::{ContentError, ContentIssue};
pub use export::{
    BridgeError, DriverError, ExportBridge, ExportDriver, ExportPayload, ExportSurface,
    InjectError, PayloadError, RenderStatus,
};
pub use crate::image::{ImageError, ImageResourceManager};
pub use layout::{compute, select, Layout, RenderContext, SlideTree, Slot};
pub use preview::SlidePreview;
pub use renderer::{render_html, HtmlConfig};
pub use template::{resolve_style, CatalogError, StyleResolver, TemplateCatalog, TemplateStyle};

use std::time::Duration;

use layout::{Node, NodeKind};
use log::debug;
use thiserror::Error;

/// How long the built-in capture driver waits for each export marker
pub const DRIVER_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur during the render pipeline
///
/// Rendering itself never fails on content; these cover reading inputs and
/// driving the export handoff.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("template catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("export: {0}")]
    Bridge(#[from] BridgeError),

    #[error("export driver: {0}")]
    Driver(#[from] DriverError),

    #[error("export injection: {0}")]
    Inject(#[from] InjectError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Where the slide will be shown
    pub context: RenderContext,
    /// HTML output configuration
    pub html: HtmlConfig,
    /// Debug mode: dump the visual tree to stderr
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render context
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    /// Set the HTML configuration
    pub fn with_html(mut self, config: HtmlConfig) -> Self {
        self.html = config;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Lay out and serialize one slide
///
/// Image bytes that cannot be decoded fall back to the layout's no-image
/// treatment.
pub fn render_slide(content: &SlideContent, style: &TemplateStyle, config: &RenderConfig) -> String {
    let content = content.clone().normalized();
    let mut images = ImageResourceManager::new();
    if images.set_image(content.image.as_deref()).is_err() {
        debug!("rendering without the rejected image");
    }

    let tree = compute(
        &content,
        images.current().map(|h| h.source()),
        style,
        config.context,
    );
    if config.debug {
        dump_tree(&tree);
    }
    render_html(&tree, &config.html)
}

/// Render a JSON payload with default configuration
///
/// The payload uses the export injection format: content fields in camelCase
/// or snake_case, an optional base64 `imageData` and an optional
/// `templateStyle`.
pub fn render(payload_json: &str) -> Result<String, RenderError> {
    render_with_config(payload_json, RenderConfig::default())
}

/// Render a JSON payload with custom configuration
///
/// # Example
///
/// ```rust
/// use slide_render::{render_with_config, HtmlConfig, RenderConfig, RenderContext};
///
/// let config = RenderConfig::new()
///     .with_context(RenderContext::Lightbox)
///     .with_html(HtmlConfig::fragment());
///
/// let html = render_with_config(r#"{"headline": "Hello"}"#, config).unwrap();
/// assert!(html.starts_with("<div"));
/// ```
pub fn render_with_config(payload_json: &str, config: RenderConfig) -> Result<String, RenderError> {
    let payload = ExportPayload::from_json(payload_json)?;
    Ok(render_slide(&payload.content(), &payload.style(), &config))
}

/// Run a complete export handoff for one payload
///
/// Plays both sides: the export view waits for data, and a driver waits for
/// the ready-for-data marker, injects, then waits for the rendered status.
pub async fn export_surface(
    payload: ExportPayload,
    config: &RenderConfig,
) -> Result<ExportSurface, RenderError> {
    let (bridge, mut driver) = ExportBridge::new();
    let bridge = bridge.with_html(config.html.clone());

    let view = async { bridge.run().await.map_err(RenderError::from) };
    let capture = async {
        driver.wait_ready_for_data(DRIVER_TIMEOUT).await?;
        driver.inject(payload)?;
        driver.wait_rendered(DRIVER_TIMEOUT).await?;
        Ok::<_, RenderError>(())
    };

    let (surface, ()) = tokio::try_join!(view, capture)?;
    if config.debug {
        dump_tree(&surface.tree);
    }
    Ok(surface)
}

fn dump_tree(tree: &SlideTree) {
    fn print_node(node: &Node, depth: usize) {
        let indent = "  ".repeat(depth);
        let slot = node
            .slot
            .map(|s| format!(" [{}]", s))
            .unwrap_or_default();
        let kind = match &node.kind {
            NodeKind::Stack { direction, .. } => format!("stack {:?}", direction),
            NodeKind::Layer => "layer".to_string(),
            NodeKind::Inline => "inline".to_string(),
            NodeKind::Text { content, .. } => format!("text {:?}", content),
            NodeKind::Image { source, .. } => {
                format!("image {} {}x{}", source.id, source.width, source.height)
            }
            NodeKind::Placeholder { glyph } => match glyph {
                Some(g) => format!("placeholder {}", g.as_str()),
                None => "placeholder".to_string(),
            },
            NodeKind::Icon(g) => format!("icon {}", g.as_str()),
            NodeKind::QrCode(m) => match m {
                Some(m) => format!("qr {}x{}", m.width(), m.width()),
                None => "qr (empty)".to_string(),
            },
            NodeKind::CornerMark(c) => format!("corner {:?}", c),
        };
        eprintln!("{}{}{}", indent, kind, slot);
        for child in &node.children {
            print_node(child, depth + 1);
        }
    }
    eprintln!(
        "=== Slide Debug: {} ({}, {}) ===",
        tree.layout, tree.layout_type, tree.context
    );
    print_node(&tree.root, 0);
    eprintln!("====================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_headline_only() {
        let html = render(r#"{"headline": "Hello"}"#).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"data-slot="headline""#));
        assert!(html.contains(r#"data-slot="footer""#));
        assert!(!html.contains(r#"data-slot="qr-code""#));
    }

    #[test]
    fn test_render_escapes_content() {
        let html = render(r#"{"headline": "R&D <2025>"}"#).unwrap();
        assert!(html.contains("R&amp;D &lt;2025&gt;"));
        assert!(!html.contains("<2025>"));
    }

    #[test]
    fn test_render_export_context() {
        let config = RenderConfig::new()
            .with_context(RenderContext::Export)
            .with_html(HtmlConfig::fragment());
        let html = render_with_config(r#"{"headline": "Big"}"#, config).unwrap();
        assert!(html.contains(r#"data-status="ready""#));
        assert!(html.contains("width:1920px"));
    }

    #[test]
    fn test_render_rejects_bad_json() {
        assert!(matches!(render("{not json"), Err(RenderError::Payload(_))));
    }

    #[test]
    fn test_render_slide_with_corrupt_image() {
        let content = SlideContent::new()
            .with_headline("Broken")
            .with_image(b"garbage".to_vec());
        let html = render_slide(&content, &TemplateStyle::default(), &RenderConfig::new());
        assert!(html.contains("Broken"));
        assert!(!html.contains(r#"data-slot="image""#));
    }

    #[tokio::test]
    async fn test_export_surface_round_trip() {
        let payload = ExportPayload {
            headline: Some("Q3 Results".to_string()),
            ..Default::default()
        };
        let surface = export_surface(payload, &RenderConfig::new()).await.unwrap();
        assert_eq!(surface.status(), RenderStatus::Ready);
        assert_eq!(surface.tree.context, RenderContext::Export);
        assert!(surface.html.contains("Q3 Results"));
    }
}
