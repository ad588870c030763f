//! Shared slot renderers
//!
//! Every layout composes these. Each renderer returns `None` when its content
//! is absent, so a layout never has to decide visibility on its own: slot
//! presence depends on the content alone and never on the layout or context.

use log::warn;

use crate::content::{SlideContent, FOOTER_TEXT};
use crate::image::ImageSource;
use crate::qr::QrMatrix;
use crate::template::TemplateStyle;

use super::config::{RenderContext, SizeTable, SizeToken};
use super::types::{Align, Glyph, Justify, Length, Node, NodeKind, Paint, Slot, TextTag};

/// Label under the QR code
pub const QR_LABEL: &str = "Scan for more";

/// Everything a layout reads during one render pass
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub content: &'a SlideContent,
    pub style: &'a TemplateStyle,
    /// The live image reference, if any
    pub image: Option<&'a ImageSource>,
    pub sizes: SizeTable,
}

impl<'a> LayoutInput<'a> {
    pub fn new(
        content: &'a SlideContent,
        style: &'a TemplateStyle,
        image: Option<&'a ImageSource>,
        context: RenderContext,
    ) -> Self {
        Self {
            content,
            style,
            image,
            sizes: SizeTable::for_context(context),
        }
    }

    pub fn context(&self) -> RenderContext {
        self.sizes.context()
    }

    pub fn size(&self, token: SizeToken) -> Length {
        self.sizes.get(token)
    }

    /// A fixed spacing, given as its export pixel value
    pub fn space(&self, px: f64) -> Length {
        self.sizes.spacing(px)
    }
}

/// The slide's background paint: a 135° gradient between the two colors
pub fn background(style: &TemplateStyle) -> Paint {
    Paint::gradient(135, &[style.background_color.as_str(), style.gradient_end()])
}

/// Outermost node shared by every layout
pub fn slide_root(input: &LayoutInput<'_>, body: Node) -> Node {
    let root = body.style(|s| {
        s.width = Some(Length::full());
        s.height = Some(Length::full());
        s.background = Some(background(input.style));
        s.color = Some(input.style.text_color.clone());
        s.clip = true;
    });
    if input.context().is_export() {
        root
    } else {
        root.style(|s| {
            s.radius = Some(Length::Rem(0.5));
            s.shadow = Some("0 10px 15px rgba(0,0,0,0.1)");
        })
    }
}

/// Uppercase, tracked caption line
pub fn caption(input: &LayoutInput<'_>, size: SizeToken) -> Option<Node> {
    let text = input.content.caption.as_deref()?;
    Some(
        Node::text(text, TextTag::Block)
            .slot(Slot::Caption)
            .style(|s| {
                s.font_size = Some(input.size(size));
                s.opacity = Some(0.8);
                s.uppercase = true;
                s.letter_spacing = Some(input.space(2.0));
            }),
    )
}

/// Primary headline
pub fn headline(input: &LayoutInput<'_>, size: SizeToken) -> Option<Node> {
    let text = input.content.headline.as_deref()?;
    Some(
        Node::text(text, TextTag::Heading)
            .slot(Slot::Headline)
            .style(|s| {
                s.font_size = Some(input.size(size));
                s.font_weight = Some(700);
                s.line_height = Some(1.1);
            }),
    )
}

/// Body text, clamped to `lines` where the context constrains it
pub fn description(input: &LayoutInput<'_>, size: SizeToken, lines: u8) -> Option<Node> {
    let text = input.content.description.as_deref()?;
    let clamp = input.context().clamps_text().then_some(lines);
    Some(
        Node::text(text, TextTag::Paragraph)
            .slot(Slot::Description)
            .style(|s| {
                s.font_size = Some(input.size(size));
                s.opacity = Some(0.9);
                s.line_height = Some(1.4);
                s.line_clamp = clamp;
            }),
    )
}

/// Date, time and location lines, each with its glyph
pub fn event_details(input: &LayoutInput<'_>) -> Option<Node> {
    let content = input.content;
    if !content.has_event_details() {
        return None;
    }

    let line = |value: &Option<String>, glyph: Glyph, slot: Slot| {
        value.as_deref().map(|text| {
            Node::row()
                .align(Align::Center)
                .gap(input.space(12.0))
                .slot(slot)
                .child(Node::icon(glyph).style(|s| {
                    s.width = Some(input.size(SizeToken::Icon));
                    s.height = Some(input.size(SizeToken::Icon));
                }))
                .child(Node::text(text, TextTag::Span))
        })
    };

    Some(
        Node::column()
            .gap(input.space(8.0))
            .slot(Slot::EventDetails)
            .style(|s| {
                s.font_size = Some(input.size(SizeToken::BodySm));
                s.opacity = Some(0.9);
            })
            .maybe(line(&content.event_date, Glyph::Calendar, Slot::EventDate))
            .maybe(line(&content.event_time, Glyph::Clock, Slot::EventTime))
            .maybe(line(&content.event_location, Glyph::MapPin, Slot::EventLocation)),
    )
}

/// Author line with the name in the accent color
pub fn byline(input: &LayoutInput<'_>, prefix: Option<&str>, size: SizeToken) -> Option<Node> {
    let name = input.content.author_name.as_deref()?;
    let prefix = prefix.map(|p| Node::text(p, TextTag::Span).style(|s| s.opacity = Some(0.6)));
    Some(
        Node::inline()
            .slot(Slot::Byline)
            .style(|s| s.font_size = Some(input.size(size)))
            .maybe(prefix)
            .child(Node::text(name, TextTag::Span).style(|s| {
                s.color = Some(input.style.accent_color.clone());
                s.font_weight = Some(600);
            })),
    )
}

/// Constant branding line
pub fn footer(input: &LayoutInput<'_>) -> Node {
    Node::text(FOOTER_TEXT, TextTag::Block)
        .slot(Slot::Footer)
        .style(|s| {
            s.font_size = Some(input.size(SizeToken::BodySm));
            s.opacity = Some(0.6);
        })
}

/// QR code on a white tile with a short label
///
/// Present iff the content carries a publication link. A link that cannot be
/// encoded still yields the slot, with an empty tile.
pub fn qr_section(input: &LayoutInput<'_>) -> Option<Node> {
    let link = input.content.qr_link()?;
    let matrix = match QrMatrix::encode(link) {
        Ok(matrix) => Some(matrix),
        Err(e) => {
            warn!("could not encode publication link as QR code: {}", e);
            None
        }
    };
    let size = input.size(SizeToken::QrSize);
    let inset = if input.context().is_export() { 8.0 } else { 4.0 };

    Some(
        Node::column()
            .align(Align::Center)
            .gap(input.space(8.0))
            .slot(Slot::QrCode)
            .child(
                Node::new(NodeKind::QrCode(matrix)).style(|s| {
                    s.width = Some(size);
                    s.height = Some(size);
                    s.background = Some(Paint::solid("#FFFFFF"));
                    s.padding = Some(Length::Px(inset));
                    s.radius = Some(Length::Px(inset));
                }),
            )
            .child(Node::text(QR_LABEL, TextTag::Span).style(|s| {
                s.font_size = Some(input.size(SizeToken::Small));
                s.opacity = Some(0.7);
            })),
    )
}

/// The live image as a cover-fitted slot node
pub fn image(input: &LayoutInput<'_>, alt: &str) -> Option<Node> {
    input.image.map(|source| {
        Node::image(source, alt).slot(Slot::Image).style(|s| {
            s.width = Some(Length::full());
            s.height = Some(Length::full());
            s.cover = true;
        })
    })
}

/// The live image, or the given stand-in when there is none
pub fn image_or(input: &LayoutInput<'_>, alt: &str, placeholder: impl FnOnce() -> Node) -> Node {
    image(input, alt).unwrap_or_else(placeholder)
}

/// Accent-tinted gradient block
pub fn tinted_placeholder(input: &LayoutInput<'_>, glyph: Option<Glyph>) -> Node {
    let accent = &input.style.accent_color;
    Node::placeholder(glyph).style(|s| {
        s.width = Some(Length::full());
        s.height = Some(Length::full());
        s.background = Some(Paint::Gradient {
            angle: 135,
            stops: vec![tint(accent, 0x40), tint(accent, 0x20)],
        });
    })
}

/// Circular crop in an accent ring, with a person glyph when there is no image
pub fn circle_portrait(input: &LayoutInput<'_>, size: SizeToken, alt: &str) -> Node {
    let diameter = input.size(size);
    let accent = input.style.accent_color.clone();
    let inner = image_or(input, alt, || {
        tinted_placeholder(input, Some(Glyph::Person))
    });
    Node::layer().child(inner).style(|s| {
        s.width = Some(diameter);
        s.height = Some(diameter);
        s.circle = true;
        s.clip = true;
        s.border = Some((input.size(SizeToken::BorderWidth), accent));
        s.shadow = Some("0 10px 40px rgba(0,0,0,0.3)");
    })
}

/// Append an alpha byte to a `#rrggbb` color; other notations pass through
pub fn tint(color: &str, alpha: u8) -> String {
    if color.len() == 7 && color.starts_with('#') {
        format!("{}{:02x}", color, alpha)
    } else {
        color.to_string()
    }
}

/// Byline and footer on the left, QR code on the right
pub fn bottom_bar(input: &LayoutInput<'_>, prefix: Option<&str>, byline_size: SizeToken) -> Node {
    Node::row()
        .align(Align::End)
        .justify(Justify::SpaceBetween)
        .gap(input.space(24.0))
        .style(|s| s.push_end = true)
        .child(
            Node::column()
                .gap(input.space(8.0))
                .maybe(byline(input, prefix, byline_size))
                .child(footer(input)),
        )
        .maybe(qr_section(input))
}
