//! Full-bleed hero layout

use super::config::SizeToken;
use super::slots::{self, LayoutInput};
use super::types::{Justify, Length, Node, Paint};

/// Background image under a dark fade, text anchored to the bottom
pub fn full_hero(input: &LayoutInput<'_>) -> Node {
    let backdrop = match slots::image(input, "Slide background") {
        Some(image) => Node::layer().child(image).child(Node::column().style(|s| {
            s.background = Some(Paint::gradient(
                0,
                &["rgba(0,0,0,0.8)", "rgba(0,0,0,0.4) 50%", "transparent"],
            ));
        })),
        // Neutral wash keeps the text legible on the plain background
        None => Node::placeholder(None).style(|s| {
            s.background = Some(Paint::gradient(
                180,
                &["rgba(0,0,0,0)", "rgba(0,0,0,0.35)"],
            ));
        }),
    };

    let text = Node::column()
        .justify(Justify::End)
        .gap(input.space(20.0))
        .style(|s| {
            s.height = Some(Length::full());
            s.padding = Some(input.size(SizeToken::PaddingLarge));
        })
        .maybe(slots::caption(input, SizeToken::Caption))
        .maybe(slots::headline(input, SizeToken::HeadlineXl))
        .maybe(
            slots::description(input, SizeToken::BodyLg, 3)
                .map(|d| d.style(|s| s.max_width = Some(input.space(1200.0)))),
        )
        .maybe(slots::event_details(input))
        .child(slots::bottom_bar(input, None, SizeToken::BodyLg));

    slots::slide_root(input, Node::layer().child(backdrop).child(text))
}
