//! Layout selection from a style descriptor

use std::fmt;

use crate::template::{ImagePosition, LayoutType, TemplateStyle};

/// The nine layout algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Full-bleed background image with text over a dark fade
    FullHero,
    /// Text column with a portrait card on the right
    SplitTextPrimary,
    /// Large image on the left, text on the right
    SplitImagePrimary,
    /// Centered composition around a circular crop
    Circular,
    /// Text only
    NoImage,
    /// White card with an image band on top
    MediaVertical,
    /// Wide article treatment with a framed image
    MediaWide,
    /// Bordered frame with corner ornaments
    CongratsFramed,
    /// Square artwork with episode text
    Podcast,
}

impl Layout {
    pub const ALL: [Layout; 9] = [
        Layout::FullHero,
        Layout::SplitTextPrimary,
        Layout::SplitImagePrimary,
        Layout::Circular,
        Layout::NoImage,
        Layout::MediaVertical,
        Layout::MediaWide,
        Layout::CongratsFramed,
        Layout::Podcast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::FullHero => "full-hero",
            Layout::SplitTextPrimary => "split-text-primary",
            Layout::SplitImagePrimary => "split-image-primary",
            Layout::Circular => "circular",
            Layout::NoImage => "no-image",
            Layout::MediaVertical => "media-vertical",
            Layout::MediaWide => "media-wide",
            Layout::CongratsFramed => "congrats-framed",
            Layout::Podcast => "podcast",
        }
    }

    /// Whether this layout ever draws the image slot
    pub fn shows_image(&self) -> bool {
        !matches!(self, Layout::NoImage)
    }

    /// A style that selects this layout
    pub fn representative_style(&self) -> TemplateStyle {
        let (layout_type, position) = match self {
            Layout::FullHero => (LayoutType::FullHero, ImagePosition::Full),
            Layout::SplitTextPrimary => (LayoutType::SplitTextPrimary, ImagePosition::Right),
            Layout::SplitImagePrimary => (LayoutType::SplitImagePrimary, ImagePosition::Left),
            Layout::Circular => (LayoutType::Circular, ImagePosition::Circular),
            Layout::NoImage => (LayoutType::None, ImagePosition::None),
            Layout::MediaVertical => (LayoutType::MediaVertical, ImagePosition::Right),
            Layout::MediaWide => (LayoutType::MediaWide, ImagePosition::Left),
            Layout::CongratsFramed => (LayoutType::CongratsFramed, ImagePosition::Right),
            Layout::Podcast => (LayoutType::PodcastStandard, ImagePosition::Left),
        };
        TemplateStyle::new()
            .with_layout_type(layout_type)
            .with_image_position(position)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Choose the layout for a style
///
/// Rules are tried in a fixed order and the first match wins, so styles
/// carrying conflicting hints always resolve the same way.
pub fn select(style: &TemplateStyle) -> Layout {
    select_hints(style.layout_type, style.image_position)
}

/// [`select`] over the two hint fields alone
pub fn select_hints(layout_type: LayoutType, position: ImagePosition) -> Layout {
    if layout_type == LayoutType::FullHero || position == ImagePosition::Full {
        return Layout::FullHero;
    }
    if position == ImagePosition::None {
        return Layout::NoImage;
    }
    if matches!(position, ImagePosition::Circular | ImagePosition::Center) {
        return Layout::Circular;
    }
    if position == ImagePosition::Left {
        return match layout_type {
            LayoutType::MediaWide => Layout::MediaWide,
            t if t.is_podcast() => Layout::Podcast,
            _ => Layout::SplitImagePrimary,
        };
    }
    match layout_type {
        LayoutType::MediaVertical => Layout::MediaVertical,
        LayoutType::CongratsFramed => Layout::CongratsFramed,
        _ => Layout::SplitTextPrimary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_beats_everything() {
        for layout_type in LayoutType::ALL {
            assert_eq!(select_hints(layout_type, ImagePosition::Full), Layout::FullHero);
        }
        for position in ImagePosition::ALL {
            assert_eq!(select_hints(LayoutType::FullHero, position), Layout::FullHero);
        }
    }

    #[test]
    fn test_left_sub_selection() {
        assert_eq!(select_hints(LayoutType::MediaWide, ImagePosition::Left), Layout::MediaWide);
        assert_eq!(select_hints(LayoutType::PodcastFeature, ImagePosition::Left), Layout::Podcast);
        assert_eq!(
            select_hints(LayoutType::CongratsFramed, ImagePosition::Left),
            Layout::SplitImagePrimary
        );
    }

    #[test]
    fn test_media_wide_needs_left() {
        assert_eq!(
            select_hints(LayoutType::MediaWide, ImagePosition::Right),
            Layout::SplitTextPrimary
        );
    }

    #[test]
    fn test_representative_styles_round_trip() {
        for layout in Layout::ALL {
            assert_eq!(select(&layout.representative_style()), layout);
        }
    }
}
