//! Two-column layouts

use super::config::SizeToken;
use super::slots::{self, LayoutInput};
use super::types::{Align, Justify, Length, Node};

/// Text column on the left, circular portrait and QR code on the right
pub fn split_text_primary(input: &LayoutInput<'_>) -> Node {
    let body = Node::column()
        .justify(Justify::Center)
        .gap(input.space(24.0))
        .style(|s| s.flex = Some(1.0))
        .maybe(slots::headline(input, SizeToken::HeadlineXl))
        .maybe(slots::description(input, SizeToken::BodyLg, 3))
        .maybe(slots::event_details(input));

    let signature = Node::row()
        .align(Align::Center)
        .justify(Justify::SpaceBetween)
        .gap(input.space(24.0))
        .maybe(slots::byline(input, None, SizeToken::BodyLg))
        .child(slots::footer(input));

    let text = Node::column()
        .justify(Justify::SpaceBetween)
        .style(|s| {
            s.flex = Some(1.0);
            s.padding_x = Some(input.space(16.0));
        })
        .maybe(slots::caption(input, SizeToken::Caption))
        .child(body)
        .child(signature);

    let aside = Node::column()
        .align(Align::Center)
        .justify(Justify::Center)
        .gap(input.space(24.0))
        .style(|s| s.width = Some(Length::Percent(33.0)))
        .child(slots::circle_portrait(input, SizeToken::CircleImage, "Faculty"))
        .maybe(slots::qr_section(input));

    slots::slide_root(
        input,
        Node::row()
            .style(|s| s.padding = Some(input.size(SizeToken::PaddingLarge)))
            .child(text)
            .child(aside),
    )
}

/// Half-width image on the left, text on the right
pub fn split_image_primary(input: &LayoutInput<'_>) -> Node {
    let picture = Node::layer()
        .style(|s| s.width = Some(Length::Percent(50.0)))
        .child(slots::image_or(input, "Featured", || {
            slots::tinted_placeholder(input, None)
        }));

    let body = Node::column()
        .justify(Justify::Center)
        .gap(input.space(24.0))
        .style(|s| s.flex = Some(1.0))
        .maybe(slots::headline(input, SizeToken::HeadlineLg))
        .maybe(slots::description(input, SizeToken::BodyMd, 4))
        .maybe(slots::event_details(input));

    let text = Node::column()
        .justify(Justify::SpaceBetween)
        .style(|s| {
            s.width = Some(Length::Percent(50.0));
            s.padding = Some(input.size(SizeToken::PaddingMedium));
        })
        .maybe(slots::caption(input, SizeToken::Caption))
        .child(body)
        .child(slots::bottom_bar(input, None, SizeToken::BodyLg));

    slots::slide_root(input, Node::row().child(picture).child(text))
}
