//! Render contexts and their size token tables
//!
//! The same layout renders at three scales. Inline and lightbox previews are
//! sized in `rem` so they follow the host page; the export surface is a fixed
//! 1920×1080 pixel canvas. Layouts only ever ask for a [`SizeToken`], never a
//! literal unit, which keeps proportions matched across contexts.

use std::fmt;
use std::str::FromStr;

use super::types::Length;

/// Export canvas width in pixels
pub const EXPORT_WIDTH: f64 = 1920.0;
/// Export canvas height in pixels
pub const EXPORT_HEIGHT: f64 = 1080.0;

/// Where a slide is being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderContext {
    /// Small responsive preview embedded in the form
    #[default]
    Inline,
    /// Full-screen preview overlay
    Lightbox,
    /// Fixed 1920×1080 surface captured by the screenshot driver
    Export,
}

impl RenderContext {
    pub const ALL: [RenderContext; 3] = [
        RenderContext::Inline,
        RenderContext::Lightbox,
        RenderContext::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderContext::Inline => "inline",
            RenderContext::Lightbox => "lightbox",
            RenderContext::Export => "export",
        }
    }

    /// Whether descriptions may be line-clamped in this context
    pub fn clamps_text(&self) -> bool {
        matches!(self, RenderContext::Inline)
    }

    pub fn is_export(&self) -> bool {
        matches!(self, RenderContext::Export)
    }
}

impl fmt::Display for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" | "inline-preview" | "preview" => Ok(RenderContext::Inline),
            "lightbox" | "fullscreen" => Ok(RenderContext::Lightbox),
            "export" => Ok(RenderContext::Export),
            other => Err(format!("unknown render context '{}'", other)),
        }
    }
}

/// Named sizes used by layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeToken {
    HeadlineXl,
    HeadlineLg,
    HeadlineMd,
    BodyLg,
    BodyMd,
    BodySm,
    Caption,
    Small,
    PaddingLarge,
    PaddingMedium,
    PaddingSmall,
    Gap,
    GapLarge,
    QrSize,
    CircleImage,
    PortraitImage,
    BorderWidth,
    Icon,
}

/// Token → length lookup for one render context
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeTable {
    context: RenderContext,
}

impl SizeTable {
    pub fn for_context(context: RenderContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> RenderContext {
        self.context
    }

    /// Resolve a token to a concrete length
    pub fn get(&self, token: SizeToken) -> Length {
        use SizeToken::*;

        // (inline rem, lightbox rem, export px)
        let (inline, lightbox, export) = match token {
            HeadlineXl => (1.875, 3.5, 72.0),
            HeadlineLg => (1.5, 2.875, 60.0),
            HeadlineMd => (1.125, 2.25, 48.0),
            BodyLg => (0.875, 1.3125, 28.0),
            BodyMd => (0.75, 1.125, 24.0),
            BodySm => (0.625, 0.9375, 20.0),
            Caption => (0.75, 1.0625, 22.0),
            Small => (0.625, 0.875, 18.0),
            PaddingLarge => (1.5, 3.5, 80.0),
            PaddingMedium => (1.25, 2.75, 60.0),
            PaddingSmall => (1.0, 2.0, 40.0),
            Gap => (0.75, 1.0, 24.0),
            GapLarge => (1.5, 2.5, 40.0),
            CircleImage => (9.0, 14.0, 400.0),
            PortraitImage => (9.0, 14.0, 320.0),
            Icon => (0.75, 1.0, 24.0),
            // QR codes and borders are pixel-sized everywhere
            QrSize => {
                return Length::Px(match self.context {
                    RenderContext::Inline => 60.0,
                    RenderContext::Lightbox => 100.0,
                    RenderContext::Export => 140.0,
                })
            }
            BorderWidth => {
                return Length::Px(match self.context {
                    RenderContext::Export => 6.0,
                    _ => 4.0,
                })
            }
        };

        match self.context {
            RenderContext::Inline => Length::Rem(inline),
            RenderContext::Lightbox => Length::Rem(lightbox),
            RenderContext::Export => Length::Px(export),
        }
    }

    /// A fixed spacing value, scaled like body text
    ///
    /// `px` is the export-context value; previews get the rem equivalent at
    /// the same ratio as `BodyMd`.
    pub fn spacing(&self, px: f64) -> Length {
        match self.context {
            RenderContext::Export => Length::Px(px),
            RenderContext::Lightbox => Length::Rem(px / 16.0 * 0.75),
            RenderContext::Inline => Length::Rem(px / 16.0 * 0.5),
        }
    }
}
