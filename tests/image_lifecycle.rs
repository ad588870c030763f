//! Image references across a preview session

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgb};
use slide_render::{ImageResourceManager, SlideContent, SlidePreview, Slot, TemplateStyle};

fn png(width: u32, height: u32, shade: u8) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(width, height, Rgb([shade, shade, shade]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn test_three_images_then_unmount() {
    let mut preview = SlidePreview::new(TemplateStyle::new());
    for shade in [10, 20, 30] {
        preview.set_image(Some(png(4, 3, shade)));
        assert!(preview.inline().has_slot(Slot::Image));
    }
    let stats = preview.image_stats();
    assert_eq!(stats.created, 3);
    assert_eq!(stats.released, 2);
    assert_eq!(stats.live(), 1);

    // Unmount
    let mut manager = ImageResourceManager::new();
    for shade in [10, 20, 30] {
        manager.set_image(Some(&png(4, 3, shade))).unwrap();
    }
    manager.clear();
    let stats = manager.stats();
    assert_eq!(stats.created, 3);
    assert_eq!(stats.released, 3);
    assert_eq!(stats.live(), 0);
}

#[test]
fn test_same_bytes_are_not_a_change() {
    let bytes = png(5, 5, 99);
    let mut manager = ImageResourceManager::new();
    manager.set_image(Some(&bytes)).unwrap();
    let first = manager.current().map(|h| h.id());
    manager.set_image(Some(&bytes.clone())).unwrap();
    assert_eq!(manager.current().map(|h| h.id()), first);
    assert_eq!(manager.stats().created, 1);
}

#[test]
fn test_dimensions_are_read() {
    let mut manager = ImageResourceManager::new();
    manager.set_image(Some(&png(7, 2, 0))).unwrap();
    let handle = manager.current().unwrap();
    assert_eq!(handle.dimensions(), (7, 2));
    assert_eq!(handle.source().mime, "image/png");
    assert!(handle.source().uri().starts_with("data:image/png;base64,"));
}

#[test]
fn test_rejected_image_releases_previous() {
    let mut manager = ImageResourceManager::new();
    manager.set_image(Some(&png(2, 2, 1))).unwrap();
    assert!(manager.set_image(Some(b"not an image")).is_err());
    assert!(manager.current().is_none());
    assert_eq!(manager.stats().released, 1);
    assert_eq!(manager.stats().live(), 0);
}

#[test]
fn test_removing_image_swaps_in_placeholder() {
    let mut preview = SlidePreview::new(TemplateStyle::new());
    preview.set_content(
        SlideContent::new()
            .with_headline("Portrait")
            .with_image(png(3, 3, 50)),
    );
    assert!(preview.lightbox().has_slot(Slot::Image));
    assert!(!preview.lightbox().has_placeholder());

    preview.set_image(None);
    assert!(!preview.lightbox().has_slot(Slot::Image));
    assert!(preview.lightbox().has_placeholder());
    assert_eq!(preview.image_stats().live(), 0);
}
