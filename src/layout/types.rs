//! Core types for the visual tree
//!
//! Layouts produce a tree of [`Node`]s that describes boxes, text, images and
//! glyphs with CSS-like flow semantics. The tree is independent of any output
//! format; the renderer serialises it.

use std::fmt;

use crate::image::ImageSource;
use crate::qr::QrMatrix;
use crate::template::{LayoutType, TextAlignment};

use super::config::RenderContext;
use super::selector::Layout;

/// Pixels per rem when converting relative units
pub const REM_PX: f64 = 16.0;

/// A length in one of the units a render context uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Rem(f64),
    Percent(f64),
}

impl Length {
    /// Convert to pixels; `basis` is the reference size for percentages
    pub fn to_px(&self, basis: f64) -> f64 {
        match *self {
            Length::Px(v) => v,
            Length::Rem(v) => v * REM_PX,
            Length::Percent(v) => v * basis / 100.0,
        }
    }

    /// Scale the value, keeping the unit
    pub fn scaled(&self, factor: f64) -> Length {
        match *self {
            Length::Px(v) => Length::Px(v * factor),
            Length::Rem(v) => Length::Rem(v * factor),
            Length::Percent(v) => Length::Percent(v * factor),
        }
    }

    pub fn full() -> Length {
        Length::Percent(100.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", format_number(*v)),
            Length::Rem(v) => write!(f, "{}rem", format_number(*v)),
            Length::Percent(v) => write!(f, "{}%", format_number(*v)),
        }
    }
}

/// Format a number without a trailing `.0` and with at most four decimals
pub(crate) fn format_number(v: f64) -> String {
    let rounded = (v * 10_000.0).round() / 10_000.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// A background fill
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    /// Linear gradient; `angle` follows CSS (0 = towards the top)
    Gradient { angle: u16, stops: Vec<String> },
}

impl Paint {
    pub fn solid(color: impl Into<String>) -> Self {
        Paint::Solid(color.into())
    }

    pub fn gradient(angle: u16, stops: &[&str]) -> Self {
        Paint::Gradient {
            angle,
            stops: stops.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::Solid(color) => f.write_str(color),
            Paint::Gradient { angle, stops } => {
                write!(f, "linear-gradient({}deg, {})", angle, stops.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

/// Cross-axis alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

/// Main-axis distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

/// Semantic role of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTag {
    Heading,
    Paragraph,
    Block,
    Span,
}

/// Built-in vector glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Calendar,
    Clock,
    MapPin,
    Microphone,
    Person,
    Award,
}

impl Glyph {
    pub fn as_str(&self) -> &'static str {
        match self {
            Glyph::Calendar => "calendar",
            Glyph::Clock => "clock",
            Glyph::MapPin => "map-pin",
            Glyph::Microphone => "microphone",
            Glyph::Person => "person",
            Glyph::Award => "award",
        }
    }
}

/// Named, independently optional content regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Caption,
    Headline,
    Description,
    EventDetails,
    EventDate,
    EventTime,
    EventLocation,
    Byline,
    Image,
    QrCode,
    Footer,
}

impl Slot {
    pub const ALL: [Slot; 11] = [
        Slot::Caption,
        Slot::Headline,
        Slot::Description,
        Slot::EventDetails,
        Slot::EventDate,
        Slot::EventTime,
        Slot::EventLocation,
        Slot::Byline,
        Slot::Image,
        Slot::QrCode,
        Slot::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Caption => "caption",
            Slot::Headline => "headline",
            Slot::Description => "description",
            Slot::EventDetails => "event-details",
            Slot::EventDate => "event-date",
            Slot::EventTime => "event-time",
            Slot::EventLocation => "event-location",
            Slot::Byline => "byline",
            Slot::Image => "image",
            Slot::QrCode => "qr-code",
            Slot::Footer => "footer",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which corner an ornament sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// What a node draws
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Flex container
    Stack {
        direction: Direction,
        justify: Justify,
        align: Align,
        gap: Option<Length>,
    },
    /// Children painted on top of each other, each covering the node
    Layer,
    /// Children flowed inline, like runs of one line of text
    Inline,
    Text { content: String, tag: TextTag },
    Image { source: ImageSource, alt: String },
    /// Neutral stand-in for a missing image
    Placeholder { glyph: Option<Glyph> },
    Icon(Glyph),
    /// QR matrix; `None` draws an empty tile
    QrCode(Option<QrMatrix>),
    /// L-shaped frame ornament
    CornerMark(Corner),
}

/// Box and text styling for one node
///
/// Everything is optional; unset properties inherit or use the output's
/// defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeStyle {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub max_width: Option<Length>,
    /// Flex grow factor (with a zero basis)
    pub flex: Option<f64>,
    pub padding: Option<Length>,
    pub padding_x: Option<Length>,
    pub margin_top: Option<Length>,
    pub margin_bottom: Option<Length>,
    /// Push to the end of the parent's main axis
    pub push_end: bool,
    pub font_size: Option<Length>,
    pub font_weight: Option<u16>,
    pub line_height: Option<f64>,
    pub color: Option<String>,
    pub background: Option<Paint>,
    pub opacity: Option<f64>,
    pub uppercase: bool,
    pub letter_spacing: Option<Length>,
    /// Maximum visible lines; overflow is truncated with an ellipsis
    pub line_clamp: Option<u8>,
    pub text_align: Option<TextAlignment>,
    /// Border width and color
    pub border: Option<(Length, String)>,
    pub radius: Option<Length>,
    /// Crop to a circle
    pub circle: bool,
    pub shadow: Option<&'static str>,
    pub aspect_square: bool,
    pub clip: bool,
    /// Image is scaled to cover the box
    pub cover: bool,
}

/// A node of the visual tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub slot: Option<Slot>,
    pub style: NodeStyle,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            slot: None,
            style: NodeStyle::default(),
            children: vec![],
        }
    }

    /// Vertical flex container
    pub fn column() -> Self {
        Self::new(NodeKind::Stack {
            direction: Direction::Column,
            justify: Justify::Start,
            align: Align::Stretch,
            gap: None,
        })
    }

    /// Horizontal flex container
    pub fn row() -> Self {
        Self::new(NodeKind::Stack {
            direction: Direction::Row,
            justify: Justify::Start,
            align: Align::Stretch,
            gap: None,
        })
    }

    pub fn layer() -> Self {
        Self::new(NodeKind::Layer)
    }

    pub fn inline() -> Self {
        Self::new(NodeKind::Inline)
    }

    pub fn text(content: impl Into<String>, tag: TextTag) -> Self {
        Self::new(NodeKind::Text {
            content: content.into(),
            tag,
        })
    }

    pub fn image(source: &ImageSource, alt: impl Into<String>) -> Self {
        Self::new(NodeKind::Image {
            source: source.clone(),
            alt: alt.into(),
        })
    }

    pub fn placeholder(glyph: Option<Glyph>) -> Self {
        Self::new(NodeKind::Placeholder { glyph })
    }

    pub fn icon(glyph: Glyph) -> Self {
        Self::new(NodeKind::Icon(glyph))
    }

    /// Tag this node as a content slot
    pub fn slot(mut self, slot: Slot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Adjust the style in place
    pub fn style(mut self, f: impl FnOnce(&mut NodeStyle)) -> Self {
        f(&mut self.style);
        self
    }

    /// Set the gap of a stack; no effect on other kinds
    pub fn gap(mut self, length: Length) -> Self {
        if let NodeKind::Stack { gap, .. } = &mut self.kind {
            *gap = Some(length);
        }
        self
    }

    pub fn justify(mut self, value: Justify) -> Self {
        if let NodeKind::Stack { justify, .. } = &mut self.kind {
            *justify = value;
        }
        self
    }

    pub fn align(mut self, value: Align) -> Self {
        if let NodeKind::Stack { align, .. } = &mut self.kind {
            *align = value;
        }
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child if present
    pub fn maybe(mut self, child: Option<Node>) -> Self {
        self.children.extend(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Visit this node and all descendants, depth first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |n| {
            if let NodeKind::Text { content, .. } = &n.kind {
                out.push_str(content);
            }
        });
        out
    }
}

/// The rendered visual tree of one slide
#[derive(Debug, Clone, PartialEq)]
pub struct SlideTree {
    pub layout: Layout,
    pub layout_type: LayoutType,
    pub context: RenderContext,
    pub root: Node,
}

impl SlideTree {
    /// Slots present in the tree, in document order and without repeats
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        self.root.walk(&mut |n| {
            if let Some(slot) = n.slot {
                if !slots.contains(&slot) {
                    slots.push(slot);
                }
            }
        });
        slots
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.find(slot).is_some()
    }

    /// First node tagged with `slot`
    pub fn find(&self, slot: Slot) -> Option<&Node> {
        fn search(node: &Node, slot: Slot) -> Option<&Node> {
            if node.slot == Some(slot) {
                return Some(node);
            }
            node.children.iter().find_map(|c| search(c, slot))
        }
        search(&self.root, slot)
    }

    /// Text of the first node tagged with `slot`
    pub fn text(&self, slot: Slot) -> Option<String> {
        self.find(slot).map(Node::text_content)
    }

    /// Number of nodes tagged with `slot`
    pub fn count(&self, slot: Slot) -> usize {
        let mut count = 0;
        self.root.walk(&mut |n| {
            if n.slot == Some(slot) {
                count += 1;
            }
        });
        count
    }

    /// Whether a no-image placeholder was drawn
    pub fn has_placeholder(&self) -> bool {
        let mut found = false;
        self.root.walk(&mut |n| {
            if matches!(n.kind, NodeKind::Placeholder { .. }) {
                found = true;
            }
        });
        found
    }
}
