//! Media-mention layouts

use super::config::SizeToken;
use super::slots::{self, LayoutInput};
use super::types::{Align, Justify, Length, Node, Paint};

/// Article cards always use dark text on white
const CARD_TEXT: &str = "#181a1c";
/// Neutral gray for a missing article image
const MISSING_IMAGE_GRAY: &str = "#e5e7eb";

fn gray_placeholder() -> Node {
    Node::placeholder(None).style(|s| {
        s.width = Some(Length::full());
        s.height = Some(Length::full());
        s.background = Some(Paint::solid(MISSING_IMAGE_GRAY));
    })
}

/// White article card with an image band, featured name on the right
pub fn media_vertical(input: &LayoutInput<'_>) -> Node {
    let band = Node::layer()
        .style(|s| {
            s.height = Some(Length::Percent(40.0));
            s.clip = true;
        })
        .child(slots::image_or(input, "Article", gray_placeholder));

    let article = Node::column()
        .gap(input.space(12.0))
        .style(|s| {
            s.flex = Some(1.0);
            s.padding = Some(input.space(40.0));
            s.color = Some(CARD_TEXT.to_string());
        })
        .maybe(
            slots::caption(input, SizeToken::Small)
                .map(|c| c.style(|s| s.opacity = Some(0.6))),
        )
        .maybe(slots::headline(input, SizeToken::HeadlineMd))
        .maybe(slots::description(input, SizeToken::BodyMd, 4))
        .maybe(slots::event_details(input));

    let card = Node::column()
        .style(|s| {
            s.flex = Some(1.0);
            s.background = Some(Paint::solid("#FFFFFF"));
            s.radius = Some(input.space(12.0));
            s.shadow = Some("0 10px 40px rgba(0,0,0,0.2)");
            s.clip = true;
        })
        .child(band)
        .child(article);

    let featured = slots::byline(input, Some("Featured: "), SizeToken::HeadlineMd).map(|b| {
        b.style(|s| {
            s.color = Some(input.style.accent_color.clone());
            s.font_weight = Some(600);
        })
    });

    let aside = Node::column()
        .justify(Justify::SpaceBetween)
        .style(|s| s.width = Some(Length::Percent(33.0)))
        .child(Node::column().maybe(featured))
        .child(
            Node::column()
                .align(Align::Center)
                .gap(input.space(24.0))
                .maybe(slots::qr_section(input))
                .child(slots::footer(input)),
        );

    slots::slide_root(
        input,
        Node::row()
            .gap(input.space(48.0))
            .style(|s| s.padding = Some(input.size(SizeToken::PaddingMedium)))
            .child(card)
            .child(aside),
    )
}

/// Image panel on the left, article text on the right
pub fn media_wide(input: &LayoutInput<'_>) -> Node {
    let picture = Node::layer()
        .style(|s| s.width = Some(Length::Percent(40.0)))
        .child(slots::image_or(input, "Article", gray_placeholder));

    let accent = input.style.accent_color.clone();
    let top = Node::column()
        .gap(input.space(16.0))
        .maybe(slots::caption(input, SizeToken::BodySm).map(|c| {
            c.style(|s| {
                s.color = Some(accent);
                s.letter_spacing = Some(input.space(1.0));
            })
        }))
        .maybe(slots::headline(input, SizeToken::HeadlineLg))
        .maybe(slots::description(input, SizeToken::BodyMd, 4))
        .maybe(slots::event_details(input));

    let text = Node::column()
        .justify(Justify::SpaceBetween)
        .style(|s| {
            s.flex = Some(1.0);
            s.padding = Some(input.size(SizeToken::PaddingMedium));
        })
        .child(top)
        .child(slots::bottom_bar(input, None, SizeToken::BodyMd));

    slots::slide_root(input, Node::row().child(picture).child(text))
}
