//! Celebration and podcast layouts

use super::config::SizeToken;
use super::slots::{self, LayoutInput};
use super::types::{Align, Corner, Glyph, Justify, Length, Node, NodeKind, Paint};

/// Accent frame with corner ornaments, honoree name as the focal text
pub fn congrats_framed(input: &LayoutInput<'_>) -> Node {
    let accent = input.style.accent_color.clone();
    let picture_size = input.size(SizeToken::PortraitImage);

    let picture = slots::image_or(input, "Honoree", || {
        slots::tinted_placeholder(input, Some(Glyph::Award))
    });
    let picture = Node::layer().child(picture).style(|s| {
        s.width = Some(picture_size);
        s.height = Some(picture_size);
        s.radius = Some(input.space(8.0));
        s.clip = true;
    });

    let corners = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ]
    .map(|corner| {
        Node::new(NodeKind::CornerMark(corner)).style(|s| {
            s.width = Some(input.space(24.0));
            s.height = Some(input.space(24.0));
            s.border = Some((Length::Px(3.0), accent.clone()));
        })
    });

    let frame = Node::column()
        .style(|s| {
            s.padding = Some(input.space(20.0));
            s.border = Some((input.size(SizeToken::BorderWidth), accent.clone()));
            s.radius = Some(input.space(12.0));
        })
        .children(corners)
        .child(picture);

    let left = Node::column()
        .align(Align::Center)
        .justify(Justify::Center)
        .style(|s| s.width = Some(Length::Percent(40.0)))
        .child(frame);

    let caption = slots::caption(input, SizeToken::HeadlineMd).map(|c| {
        c.style(|s| {
            s.color = Some(accent.clone());
            s.letter_spacing = Some(input.space(4.0));
            s.opacity = None;
        })
    });
    let honoree = slots::byline(input, None, SizeToken::HeadlineXl)
        .map(|b| b.style(|s| s.font_weight = Some(700)));

    let closing = Node::row()
        .align(Align::End)
        .justify(Justify::SpaceBetween)
        .style(|s| s.margin_top = Some(input.space(48.0)))
        .child(slots::footer(input))
        .maybe(slots::qr_section(input));

    let right = Node::column()
        .justify(Justify::Center)
        .gap(input.space(16.0))
        .style(|s| {
            s.flex = Some(1.0);
            s.padding_x = Some(input.space(48.0));
        })
        .maybe(caption)
        .maybe(honoree)
        .maybe(slots::headline(input, SizeToken::HeadlineLg))
        .maybe(slots::description(input, SizeToken::BodyMd, 3))
        .maybe(slots::event_details(input))
        .child(closing);

    slots::slide_root(
        input,
        Node::row()
            .style(|s| s.padding = Some(input.size(SizeToken::PaddingMedium)))
            .child(left)
            .child(right),
    )
}

/// Square artwork on the left, episode details and host on the right
pub fn podcast(input: &LayoutInput<'_>) -> Node {
    let artwork = slots::image_or(input, "Podcast Artwork", || {
        Node::placeholder(Some(Glyph::Microphone)).style(|s| {
            s.width = Some(Length::full());
            s.height = Some(Length::full());
            s.background = Some(Paint::gradient(135, &["#374151", "#111827"]));
        })
    });
    let artwork = Node::layer().child(artwork).style(|s| {
        s.width = Some(Length::full());
        s.aspect_square = true;
        s.radius = Some(input.space(16.0));
        s.shadow = Some("0 20px 60px rgba(0,0,0,0.3)");
        s.clip = true;
    });

    let left = Node::column()
        .align(Align::Center)
        .justify(Justify::Center)
        .style(|s| {
            s.width = Some(Length::Percent(40.0));
            s.padding = Some(input.size(SizeToken::PaddingMedium));
        })
        .child(artwork);

    let top = Node::column()
        .gap(input.space(16.0))
        .maybe(
            slots::caption(input, SizeToken::BodySm)
                .map(|c| c.style(|s| s.opacity = Some(0.6))),
        )
        .maybe(slots::headline(input, SizeToken::HeadlineLg))
        .maybe(slots::description(input, SizeToken::BodyMd, 4))
        .maybe(slots::event_details(input));

    let right = Node::column()
        .justify(Justify::SpaceBetween)
        .style(|s| {
            s.flex = Some(1.0);
            s.padding = Some(input.size(SizeToken::PaddingMedium));
        })
        .child(top)
        .child(slots::bottom_bar(input, Some("Host: "), SizeToken::BodyMd));

    slots::slide_root(input, Node::row().child(left).child(right))
}
