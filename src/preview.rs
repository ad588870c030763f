//! Interactive preview session
//!
//! Holds the content being edited, the selected style and the single live
//! image reference, and renders inline and lightbox trees on demand.

use log::debug;

use crate::content::SlideContent;
use crate::image::{ImageResourceManager, ImageStats};
use crate::layout::{compute, select, Layout, RenderContext, SlideTree};
use crate::template::TemplateStyle;

/// A mounted preview of one slide
#[derive(Debug, Default)]
pub struct SlidePreview {
    content: SlideContent,
    style: TemplateStyle,
    images: ImageResourceManager,
}

impl SlidePreview {
    pub fn new(style: TemplateStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Replace the content, syncing the image reference with it
    pub fn set_content(&mut self, content: SlideContent) {
        let content = content.normalized();
        if self.images.set_image(content.image.as_deref()).is_err() {
            debug!("preview continues with the no-image treatment");
        }
        self.content = content;
    }

    /// Change only the image
    pub fn set_image(&mut self, bytes: Option<Vec<u8>>) {
        let mut content = self.content.clone();
        content.image = bytes;
        self.set_content(content);
    }

    pub fn set_style(&mut self, style: TemplateStyle) {
        self.style = style;
    }

    pub fn content(&self) -> &SlideContent {
        &self.content
    }

    pub fn style(&self) -> &TemplateStyle {
        &self.style
    }

    /// The layout the current style selects
    pub fn layout(&self) -> Layout {
        select(&self.style)
    }

    pub fn render(&self, context: RenderContext) -> SlideTree {
        compute(
            &self.content,
            self.images.current().map(|h| h.source()),
            &self.style,
            context,
        )
    }

    /// The small responsive preview
    pub fn inline(&self) -> SlideTree {
        self.render(RenderContext::Inline)
    }

    /// The full-screen preview
    pub fn lightbox(&self) -> SlideTree {
        self.render(RenderContext::Lightbox)
    }

    pub fn image_stats(&self) -> ImageStats {
        self.images.stats()
    }
}
