//! Which slots a slide shows depends on its content, never on its layout
//! or render context.

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgb};
use slide_render::layout::compute_with;
use slide_render::{ImageResourceManager, Layout, RenderContext, SlideContent, Slot};

const FIELDS: usize = 8;

fn png(width: u32, height: u32) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(width, height, Rgb([10, 20, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Content with the fields selected by `mask` bits, in slot order
fn content_for(mask: u32) -> SlideContent {
    let mut content = SlideContent::new();
    let bit = |i: u32| mask & (1 << i) != 0;
    if bit(0) {
        content = content.with_caption("Research Spotlight");
    }
    if bit(1) {
        content = content.with_headline("Q3 Results");
    }
    if bit(2) {
        content = content.with_description("What we learned this quarter");
    }
    if bit(3) {
        content = content.with_author("Jane Doe");
    }
    if bit(4) {
        content = content.with_publication_link("https://example.com/q3");
    }
    if bit(5) {
        content = content.with_event_date("Oct 1");
    }
    if bit(6) {
        content = content.with_event_time("5 PM");
    }
    if bit(7) {
        content = content.with_event_location("Room 100");
    }
    content
}

fn expected_slots(content: &SlideContent, layout: Layout, has_image: bool) -> Vec<Slot> {
    Slot::ALL
        .into_iter()
        .filter(|slot| match slot {
            Slot::Caption => content.caption.is_some(),
            Slot::Headline => content.headline.is_some(),
            Slot::Description => content.description.is_some(),
            Slot::EventDetails => content.has_event_details(),
            Slot::EventDate => content.event_date.is_some(),
            Slot::EventTime => content.event_time.is_some(),
            Slot::EventLocation => content.event_location.is_some(),
            Slot::Byline => content.author_name.is_some(),
            Slot::Image => has_image && layout.shows_image(),
            Slot::QrCode => content.qr_link().is_some(),
            Slot::Footer => true,
        })
        .collect()
}

fn sorted(mut slots: Vec<Slot>) -> Vec<Slot> {
    slots.sort();
    slots
}

#[test]
fn test_slots_follow_content_in_every_layout() {
    let mut images = ImageResourceManager::new();
    images.set_image(Some(&png(8, 6))).unwrap();
    let source = images.current().map(|h| h.source().clone());

    for layout in Layout::ALL {
        let style = layout.representative_style();
        for mask in 0..(1u32 << FIELDS) {
            let content = content_for(mask);
            for image in [None, source.as_ref()] {
                let tree = compute_with(layout, &content, image, &style, RenderContext::Inline);
                assert_eq!(
                    sorted(tree.slots()),
                    expected_slots(&content, layout, image.is_some()),
                    "layout {} mask {:08b} image {}",
                    layout,
                    mask,
                    image.is_some()
                );
            }
        }
    }
}

#[test]
fn test_each_slot_drawn_once() {
    let content = content_for(0xff);
    let mut images = ImageResourceManager::new();
    images.set_image(Some(&png(4, 4))).unwrap();
    let image = images.current().map(|h| h.source());

    for layout in Layout::ALL {
        let tree = compute_with(layout, &content, image, &layout.representative_style(), RenderContext::Export);
        for slot in tree.slots() {
            assert_eq!(tree.count(slot), 1, "{} drew {} more than once", layout, slot);
        }
    }
}

#[test]
fn test_slots_do_not_depend_on_context() {
    for layout in Layout::ALL {
        let style = layout.representative_style();
        for mask in [0x00, 0x02, 0x21, 0x58, 0x9c, 0xff] {
            let content = content_for(mask);
            let inline = compute_with(layout, &content, None, &style, RenderContext::Inline).slots();
            for context in [RenderContext::Lightbox, RenderContext::Export] {
                let other = compute_with(layout, &content, None, &style, context).slots();
                assert_eq!(other, inline, "layout {} mask {:08b} {}", layout, mask, context);
            }
        }
    }
}

#[test]
fn test_empty_content_keeps_footer() {
    for layout in Layout::ALL {
        let tree = compute_with(
            layout,
            &SlideContent::new(),
            None,
            &layout.representative_style(),
            RenderContext::Lightbox,
        );
        assert_eq!(tree.slots(), vec![Slot::Footer], "{}", layout);
        assert_eq!(tree.text(Slot::Footer).as_deref(), Some("Columbia Business School"));
    }
}

#[test]
fn test_whitespace_fields_are_absent() {
    let content = SlideContent::new()
        .with_headline("   ")
        .with_event_date("\t")
        .with_publication_link(" ")
        .normalized();
    let style = Layout::SplitTextPrimary.representative_style();
    let tree = compute_with(Layout::SplitTextPrimary, &content, None, &style, RenderContext::Inline);
    assert!(!tree.has_slot(Slot::Headline));
    assert!(!tree.has_slot(Slot::EventDetails));
    assert!(!tree.has_slot(Slot::QrCode));
}

#[test]
fn test_event_fields_keep_their_text() {
    let content = SlideContent::new()
        .with_event_date("Oct 1")
        .with_event_location("Room 100");
    for layout in Layout::ALL {
        let tree = compute_with(layout, &content, None, &layout.representative_style(), RenderContext::Export);
        assert_eq!(tree.text(Slot::EventDate).as_deref(), Some("Oct 1"), "{}", layout);
        assert_eq!(tree.text(Slot::EventLocation).as_deref(), Some("Room 100"), "{}", layout);
        assert!(!tree.has_slot(Slot::EventTime));
    }
}
