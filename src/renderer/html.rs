//! HTML generation from slide trees
//!
//! Every node becomes one element with an inline `style` attribute, so the
//! output needs no external stylesheet and renders the same in any browser
//! the capture driver uses.

use crate::layout::types::format_number;
use crate::layout::{
    Align, Corner, Direction, Justify, Node, NodeKind, NodeStyle, RenderContext, SlideTree,
    TextTag, EXPORT_HEIGHT, EXPORT_WIDTH,
};

use super::svg::{escape_xml, glyph_svg, qr_svg};
use super::HtmlConfig;

/// Element id of the export container observed by the capture driver
pub const CONTAINER_ID: &str = "slide-render-container";
/// Element id of the surface shown while waiting for data
pub const STATUS_ID: &str = "slide-render-status";

const BASE_CSS: &str = "*, *::before, *::after { box-sizing: border-box; } \
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; } \
    h1, p { margin: 0; }";

/// Build HTML elements incrementally
pub struct HtmlBuilder {
    config: HtmlConfig,
    lines: Vec<String>,
    indent: usize,
}

impl HtmlBuilder {
    /// Create a new HTML builder
    pub fn new(config: HtmlConfig) -> Self {
        let indent = if config.is_document() { 1 } else { 0 };
        Self {
            config,
            lines: vec![],
            indent,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone()
    }

    fn indent_str(&self) -> String {
        if self.config.indent {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.indent {
            "\n"
        } else {
            ""
        }
    }

    fn push(&mut self, line: String) {
        let line = format!("{}{}", self.indent_str(), line);
        self.lines.push(line);
    }

    /// Open an element; `attrs` is inserted verbatim after the tag name
    pub fn open(&mut self, tag: &str, attrs: &str) {
        self.push(format!("<{}{}>", tag, attrs));
        self.indent += 1;
    }

    /// Close the most recently opened element
    pub fn close(&mut self, tag: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.push(format!("</{}>", tag));
    }

    /// Add a complete element on one line
    pub fn element(&mut self, tag: &str, attrs: &str, inner: &str) {
        self.push(format!("<{}{}>{}</{}>", tag, attrs, inner, tag));
    }

    /// Add an element with no content
    pub fn void(&mut self, tag: &str, attrs: &str) {
        self.push(format!("<{}{}/>", tag, attrs));
    }

    /// Finish, wrapping in a document when configured
    pub fn build(self) -> String {
        let nl = self.newline();
        let body = self.lines.join(nl);
        let title = match &self.config.document {
            Some(title) => escape_xml(title),
            None => return body,
        };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>");
        html.push_str(nl);
        html.push_str(r#"<html lang="en">"#);
        html.push_str(nl);
        html.push_str("<head>");
        html.push_str(nl);
        html.push_str(r#"  <meta charset="utf-8">"#);
        html.push_str(nl);
        html.push_str(&format!("  <title>{}</title>", title));
        html.push_str(nl);
        html.push_str(&format!("  <style>{}</style>", BASE_CSS));
        html.push_str(nl);
        html.push_str("</head>");
        html.push_str(nl);
        html.push_str("<body>");
        html.push_str(nl);
        if !body.is_empty() {
            html.push_str(&body);
            html.push_str(nl);
        }
        html.push_str("</body>");
        html.push_str(nl);
        html.push_str("</html>");
        html.push_str(nl);
        html
    }
}

/// Render a slide tree to HTML
pub fn render_html(tree: &SlideTree, config: &HtmlConfig) -> String {
    let mut builder = HtmlBuilder::new(config.clone());
    let prefix = builder.prefix();

    let (id_attr, container_style) = match tree.context {
        RenderContext::Export => (
            format!(r#" id="{}" data-status="ready""#, CONTAINER_ID),
            format!(
                "position:relative;width:{}px;height:{}px;overflow:hidden",
                EXPORT_WIDTH, EXPORT_HEIGHT
            ),
        ),
        RenderContext::Lightbox => (
            String::new(),
            "position:relative;width:100%;height:100%".to_string(),
        ),
        RenderContext::Inline => (
            String::new(),
            "position:relative;width:100%;aspect-ratio:16/9".to_string(),
        ),
    };

    builder.open(
        "div",
        &format!(
            r#"{} class="{p}slide {p}{}" data-context="{}" data-layout="{}" data-layout-type="{}" style="{}""#,
            id_attr,
            tree.context,
            tree.context,
            tree.layout,
            tree.layout_type,
            container_style,
            p = prefix
        ),
    );
    render_node(&tree.root, false, &mut builder);
    builder.close("div");
    builder.build()
}

/// The surface shown on the export view until data has been rendered
pub fn render_loading(config: &HtmlConfig) -> String {
    let mut builder = HtmlBuilder::new(config.clone());
    builder.element(
        "div",
        &format!(
            r#" id="{}" data-status="loading" style="width:{}px;height:{}px;display:flex;align-items:center;justify-content:center""#,
            STATUS_ID, EXPORT_WIDTH, EXPORT_HEIGHT
        ),
        "Loading...",
    );
    builder.build()
}

fn render_node(node: &Node, in_layer: bool, builder: &mut HtmlBuilder) {
    let prefix = builder.prefix();
    let positions_children = matches!(node.kind, NodeKind::Layer)
        || node
            .children
            .iter()
            .any(|c| matches!(c.kind, NodeKind::CornerMark(_)));
    let position = if in_layer {
        "position:absolute;inset:0"
    } else if positions_children {
        "position:relative"
    } else {
        ""
    };
    let css = [position.to_string(), node_css(node)]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(";");

    let slot_attr = node
        .slot
        .map(|s| format!(r#" data-slot="{}""#, s))
        .unwrap_or_default();
    let style_attr = if css.is_empty() {
        String::new()
    } else {
        format!(r#" style="{}""#, escape_xml(&css))
    };

    match &node.kind {
        NodeKind::Text { content, tag } => {
            let tag = match tag {
                TextTag::Heading => "h1",
                TextTag::Paragraph => "p",
                TextTag::Block => "div",
                TextTag::Span => "span",
            };
            builder.element(
                tag,
                &format!("{}{}", slot_attr, style_attr),
                &escape_xml(content),
            );
        }
        NodeKind::Image { source, alt } => {
            builder.void(
                "img",
                &format!(
                    r#"{} class="{}image" src="{}" alt="{}" width="{}" height="{}"{}"#,
                    slot_attr,
                    prefix,
                    source.uri(),
                    escape_xml(alt),
                    source.width,
                    source.height,
                    style_attr
                ),
            );
        }
        NodeKind::Icon(glyph) => {
            builder.element(
                "span",
                &format!(r#" class="{}icon"{}"#, prefix, style_attr),
                &glyph_svg(*glyph, &format!("{}glyph", prefix)),
            );
        }
        NodeKind::QrCode(matrix) => {
            builder.element(
                "div",
                &format!(r#" class="{}qr"{}"#, prefix, style_attr),
                &qr_svg(matrix.as_ref(), &format!("{}qr-matrix", prefix)),
            );
        }
        NodeKind::Placeholder { glyph } => {
            let inner = glyph
                .map(|g| {
                    format!(
                        r#"<span style="width:40%;height:40%;opacity:0.5">{}</span>"#,
                        glyph_svg(g, &format!("{}glyph", prefix))
                    )
                })
                .unwrap_or_default();
            builder.element(
                "div",
                &format!(r#" class="{}placeholder"{}"#, prefix, style_attr),
                &inner,
            );
        }
        NodeKind::CornerMark(_) => {
            builder.element("div", &format!(r#" class="{}corner"{}"#, prefix, style_attr), "");
        }
        NodeKind::Stack { .. } | NodeKind::Layer | NodeKind::Inline => {
            let in_layer = matches!(node.kind, NodeKind::Layer);
            if node.children.is_empty() {
                builder.element("div", &format!("{}{}", slot_attr, style_attr), "");
                return;
            }
            builder.open("div", &format!("{}{}", slot_attr, style_attr));
            for child in &node.children {
                render_node(child, in_layer, builder);
            }
            builder.close("div");
        }
    }
}

/// Inline CSS declarations for one node
fn node_css(node: &Node) -> String {
    let mut decls: Vec<String> = Vec::new();
    let mut add = |property: &str, value: String| decls.push(format!("{}:{}", property, value));

    match &node.kind {
        NodeKind::Stack {
            direction,
            justify,
            align,
            gap,
        } => {
            add("display", "flex".to_string());
            if *direction == Direction::Column {
                add("flex-direction", "column".to_string());
            }
            if *justify != Justify::Start {
                add("justify-content", justify_css(*justify).to_string());
            }
            if *align != Align::Stretch {
                add("align-items", align_css(*align).to_string());
            }
            if let Some(gap) = gap {
                add("gap", gap.to_string());
            }
        }
        NodeKind::Placeholder { .. } => {
            add("display", "flex".to_string());
            add("align-items", "center".to_string());
            add("justify-content", "center".to_string());
        }
        NodeKind::Image { .. } => add("display", "block".to_string()),
        NodeKind::Icon(_) => {
            add("display", "inline-flex".to_string());
            add("flex-shrink", "0".to_string());
        }
        NodeKind::CornerMark(corner) => {
            add("position", "absolute".to_string());
            let (vertical, horizontal) = match corner {
                Corner::TopLeft => ("top", "left"),
                Corner::TopRight => ("top", "right"),
                Corner::BottomLeft => ("bottom", "left"),
                Corner::BottomRight => ("bottom", "right"),
            };
            add(vertical, "-4px".to_string());
            add(horizontal, "-4px".to_string());
            if let Some((width, color)) = &node.style.border {
                add(&format!("border-{}", vertical), format!("{} solid {}", width, color));
                add(&format!("border-{}", horizontal), format!("{} solid {}", width, color));
            }
        }
        NodeKind::Layer | NodeKind::Inline | NodeKind::Text { .. } | NodeKind::QrCode(_) => {}
    }

    style_css(&node.style, matches!(node.kind, NodeKind::CornerMark(_)), &mut add);
    decls.join(";")
}

fn style_css(style: &NodeStyle, skip_border: bool, add: &mut impl FnMut(&str, String)) {
    if let Some(v) = style.width {
        add("width", v.to_string());
    }
    if let Some(v) = style.height {
        add("height", v.to_string());
    }
    if let Some(v) = style.max_width {
        add("max-width", v.to_string());
    }
    if let Some(v) = style.flex {
        add("flex", format!("{} 1 0%", format_number(v)));
        add("min-width", "0".to_string());
    }
    if style.aspect_square {
        add("aspect-ratio", "1/1".to_string());
    }
    if let Some(v) = style.padding {
        add("padding", v.to_string());
    }
    if let Some(v) = style.padding_x {
        add("padding-left", v.to_string());
        add("padding-right", v.to_string());
    }
    if let Some(v) = style.margin_top {
        add("margin-top", v.to_string());
    }
    if style.push_end {
        add("margin-top", "auto".to_string());
    }
    if let Some(v) = style.margin_bottom {
        add("margin-bottom", v.to_string());
    }
    if let Some(v) = style.font_size {
        add("font-size", v.to_string());
    }
    if let Some(v) = style.font_weight {
        add("font-weight", v.to_string());
    }
    if let Some(v) = style.line_height {
        add("line-height", format_number(v));
    }
    if let Some(v) = &style.color {
        add("color", v.clone());
    }
    if let Some(v) = &style.background {
        add("background", v.to_string());
    }
    if let Some(v) = style.opacity {
        add("opacity", format_number(v));
    }
    if style.uppercase {
        add("text-transform", "uppercase".to_string());
    }
    if let Some(v) = style.letter_spacing {
        add("letter-spacing", v.to_string());
    }
    if let Some(lines) = style.line_clamp {
        add("display", "-webkit-box".to_string());
        add("-webkit-line-clamp", lines.to_string());
        add("-webkit-box-orient", "vertical".to_string());
        add("overflow", "hidden".to_string());
    }
    if let Some(v) = style.text_align {
        add("text-align", v.as_str().to_string());
    }
    if !skip_border {
        if let Some((width, color)) = &style.border {
            add("border", format!("{} solid {}", width, color));
        }
    }
    if style.circle {
        add("border-radius", "50%".to_string());
    } else if let Some(v) = style.radius {
        add("border-radius", v.to_string());
    }
    if let Some(v) = style.shadow {
        add("box-shadow", v.to_string());
    }
    if style.clip {
        add("overflow", "hidden".to_string());
    }
    if style.cover {
        add("object-fit", "cover".to_string());
    }
}

fn justify_css(justify: Justify) -> &'static str {
    match justify {
        Justify::Start => "flex-start",
        Justify::Center => "center",
        Justify::End => "flex-end",
        Justify::SpaceBetween => "space-between",
    }
}

fn align_css(align: Align) -> &'static str {
    match align {
        Align::Stretch => "stretch",
        Align::Start => "flex-start",
        Align::Center => "center",
        Align::End => "flex-end",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SlideContent;
    use crate::layout::{compute, Length, Slot};
    use crate::template::TemplateStyle;

    fn fragment() -> HtmlConfig {
        HtmlConfig::fragment().with_indent(false)
    }

    #[test]
    fn test_export_container() {
        let content = SlideContent::new().with_headline("Q3 Results");
        let tree = compute(&content, None, &TemplateStyle::new(), RenderContext::Export);
        let html = render_html(&tree, &fragment());
        assert!(html.starts_with(r#"<div id="slide-render-container" data-status="ready""#));
        assert!(html.contains("width:1920px;height:1080px"));
        assert!(html.contains(r#"data-layout="split-text-primary""#));
        assert!(html.contains(r#"<h1 data-slot="headline""#));
    }

    #[test]
    fn test_text_is_escaped() {
        let content = SlideContent::new().with_headline("R&D <Lab>");
        let tree = compute(&content, None, &TemplateStyle::new(), RenderContext::Inline);
        let html = render_html(&tree, &fragment());
        assert!(html.contains("R&amp;D &lt;Lab&gt;"));
        assert!(!html.contains("<Lab>"));
    }

    #[test]
    fn test_inline_description_clamped() {
        let content = SlideContent::new().with_description("Body");
        let style = TemplateStyle::new();
        let inline = render_html(&compute(&content, None, &style, RenderContext::Inline), &fragment());
        let export = render_html(&compute(&content, None, &style, RenderContext::Export), &fragment());
        assert!(inline.contains("-webkit-line-clamp:3"));
        assert!(!export.contains("line-clamp"));
    }

    #[test]
    fn test_document_wrapper() {
        let tree = compute(&SlideContent::new(), None, &TemplateStyle::new(), RenderContext::Lightbox);
        let html = render_html(&tree, &HtmlConfig::new().with_document("A & B"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(html.contains(r#"data-slot="footer""#));
    }

    #[test]
    fn test_loading_surface() {
        let html = render_loading(&fragment());
        assert_eq!(
            html,
            r#"<div id="slide-render-status" data-status="loading" style="width:1920px;height:1080px;display:flex;align-items:center;justify-content:center">Loading...</div>"#
        );
    }

    #[test]
    fn test_layer_children_are_absolute() {
        let node = Node::layer()
            .child(Node::placeholder(None))
            .child(Node::column().slot(Slot::Caption).style(|s| s.padding = Some(Length::Px(4.0))));
        let mut builder = HtmlBuilder::new(fragment());
        render_node(&node, false, &mut builder);
        let html = builder.build();
        assert!(html.starts_with(r#"<div style="position:relative">"#));
        assert!(html.contains(r#"data-slot="caption" style="position:absolute;inset:0;display:flex;flex-direction:column;padding:4px""#));
    }
}
