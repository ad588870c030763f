//! Layout dispatch

use log::debug;

use crate::content::SlideContent;
use crate::image::ImageSource;
use crate::template::TemplateStyle;

use super::config::RenderContext;
use super::selector::{select, Layout};
use super::slots::LayoutInput;
use super::types::{Node, SlideTree};
use super::{centered, feature, hero, media, split};

impl Layout {
    /// Run this layout's algorithm
    pub fn build(&self, input: &LayoutInput<'_>) -> Node {
        match self {
            Layout::FullHero => hero::full_hero(input),
            Layout::SplitTextPrimary => split::split_text_primary(input),
            Layout::SplitImagePrimary => split::split_image_primary(input),
            Layout::Circular => centered::circular(input),
            Layout::NoImage => centered::no_image(input),
            Layout::MediaVertical => media::media_vertical(input),
            Layout::MediaWide => media::media_wide(input),
            Layout::CongratsFramed => feature::congrats_framed(input),
            Layout::Podcast => feature::podcast(input),
        }
    }
}

/// Compute the visual tree for one slide
///
/// Pure and infallible: absent content only removes slots, and a missing
/// image only swaps in the layout's stand-in.
pub fn compute(
    content: &SlideContent,
    image: Option<&ImageSource>,
    style: &TemplateStyle,
    context: RenderContext,
) -> SlideTree {
    compute_with(select(style), content, image, style, context)
}

/// Compute the visual tree with an explicit layout, bypassing selection
///
/// Content is normalized first, so blank fields never produce slots.
pub fn compute_with(
    layout: Layout,
    content: &SlideContent,
    image: Option<&ImageSource>,
    style: &TemplateStyle,
    context: RenderContext,
) -> SlideTree {
    debug!(
        "laying out {} ({} / {}) for {}",
        layout, style.layout_type, style.image_position, context
    );
    let content = content.clone().normalized();
    let input = LayoutInput::new(&content, style, image, context);
    SlideTree {
        layout,
        layout_type: style.layout_type,
        context,
        root: layout.build(&input),
    }
}
