//! Centered single-column layouts

use crate::template::TextAlignment;

use super::config::SizeToken;
use super::slots::{self, LayoutInput};
use super::types::{Align, Justify, Length, Node};

fn centered_column(input: &LayoutInput<'_>, padding: SizeToken) -> Node {
    Node::column()
        .align(Align::Center)
        .justify(Justify::Center)
        .style(|s| {
            s.height = Some(Length::full());
            s.padding = Some(input.size(padding));
            s.text_align = Some(TextAlignment::Center);
        })
}

fn spaced(node: Option<Node>, input: &LayoutInput<'_>, px: f64) -> Option<Node> {
    node.map(|n| n.style(|s| s.margin_bottom = Some(input.space(px))))
}

/// Portrait circle between caption and name, everything centered
pub fn circular(input: &LayoutInput<'_>) -> Node {
    let name = slots::byline(input, None, SizeToken::HeadlineMd)
        .map(|n| n.style(|s| s.font_weight = Some(700)));

    let footer_row = Node::row()
        .align(Align::Center)
        .gap(input.space(48.0))
        .style(|s| s.push_end = true)
        .maybe(slots::qr_section(input))
        .child(slots::footer(input));

    let portrait = slots::circle_portrait(input, SizeToken::PortraitImage, "Speaker")
        .style(|s| s.margin_bottom = Some(input.space(32.0)));

    let body = centered_column(input, SizeToken::PaddingMedium)
        .maybe(spaced(slots::caption(input, SizeToken::Caption), input, 24.0))
        .child(portrait)
        .maybe(spaced(name, input, 16.0))
        .maybe(spaced(slots::headline(input, SizeToken::HeadlineMd), input, 16.0))
        .maybe(spaced(
            slots::description(input, SizeToken::BodyMd, 3)
                .map(|d| d.style(|s| s.max_width = Some(input.space(900.0)))),
            input,
            24.0,
        ))
        .maybe(spaced(slots::event_details(input), input, 24.0))
        .child(footer_row);

    slots::slide_root(input, body)
}

/// Text only; the image slot never appears, whatever the content holds
pub fn no_image(input: &LayoutInput<'_>) -> Node {
    let footer_row = Node::row()
        .align(Align::Center)
        .gap(input.space(48.0))
        .style(|s| s.push_end = true)
        .maybe(slots::byline(input, None, SizeToken::BodyMd))
        .maybe(slots::qr_section(input))
        .child(slots::footer(input));

    let caption = slots::caption(input, SizeToken::BodyMd)
        .map(|c| c.style(|s| s.letter_spacing = Some(input.space(3.0))));

    let body = centered_column(input, SizeToken::PaddingLarge)
        .maybe(spaced(caption, input, 32.0))
        .maybe(spaced(
            slots::headline(input, SizeToken::HeadlineXl)
                .map(|h| h.style(|s| s.max_width = Some(input.space(1400.0)))),
            input,
            32.0,
        ))
        .maybe(spaced(
            slots::description(input, SizeToken::BodyLg, 4)
                .map(|d| d.style(|s| s.max_width = Some(input.space(1100.0)))),
            input,
            40.0,
        ))
        .maybe(spaced(slots::event_details(input), input, 32.0))
        .child(footer_row);

    slots::slide_root(input, body)
}
