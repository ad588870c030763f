//! Inline SVG for glyphs and QR codes

use std::fmt::Write;

use crate::layout::Glyph;
use crate::qr::{QrMatrix, QUIET_ZONE};

/// Markup for a glyph on a 24×24 grid, drawn in `currentColor`
pub fn glyph_svg(glyph: Glyph, class: &str) -> String {
    let (filled, body) = glyph_body(glyph);
    let paint = if filled {
        r#"fill="currentColor""#
    } else {
        r#"fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round""#
    };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" data-glyph="{}" viewBox="0 0 24 24" width="100%" height="100%" {}>{}</svg>"#,
        class,
        glyph.as_str(),
        paint,
        body
    )
}

fn glyph_body(glyph: Glyph) -> (bool, &'static str) {
    match glyph {
        Glyph::Calendar => (
            false,
            r#"<rect x="3" y="4" width="18" height="18" rx="2" ry="2"/><line x1="16" y1="2" x2="16" y2="6"/><line x1="8" y1="2" x2="8" y2="6"/><line x1="3" y1="10" x2="21" y2="10"/>"#,
        ),
        Glyph::Clock => (
            false,
            r#"<circle cx="12" cy="12" r="10"/><polyline points="12 6 12 12 16 14"/>"#,
        ),
        Glyph::MapPin => (
            false,
            r#"<path d="M21 10c0 7-9 13-9 13s-9-6-9-13a9 9 0 0 1 18 0z"/><circle cx="12" cy="10" r="3"/>"#,
        ),
        Glyph::Microphone => (
            true,
            r#"<path d="M12 14c1.66 0 3-1.34 3-3V5c0-1.66-1.34-3-3-3S9 3.34 9 5v6c0 1.66 1.34 3 3 3zm5.3-3c0 3-2.54 5.1-5.3 5.1S6.7 14 6.7 11H5c0 3.41 2.72 6.23 6 6.72V21h2v-3.28c3.28-.48 6-3.3 6-6.72h-1.7z"/>"#,
        ),
        Glyph::Person => (
            false,
            r#"<circle cx="12" cy="8" r="4"/><path d="M4 21v-1a8 8 0 0 1 16 0v1"/>"#,
        ),
        Glyph::Award => (
            false,
            r#"<circle cx="12" cy="8" r="6"/><polyline points="8.21 13.89 7 23 12 20 17 23 15.79 13.88"/>"#,
        ),
    }
}

/// Markup for a QR matrix; `None` draws only the light background
pub fn qr_svg(matrix: Option<&QrMatrix>, class: &str) -> String {
    let width = matrix.map_or(21, QrMatrix::width);
    let side = width + 2 * QUIET_ZONE;

    let mut d = String::new();
    if let Some(matrix) = matrix {
        for (x, y) in matrix.dark_modules() {
            let _ = write!(d, "M{} {}h1v1h-1z", x + QUIET_ZONE, y + QUIET_ZONE);
        }
    }
    let modules = if d.is_empty() {
        String::new()
    } else {
        format!(r##"<path fill="#000000" d="{}"/>"##, d)
    };

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" class="{}" viewBox="0 0 {side} {side}" width="100%" height="100%" shape-rendering="crispEdges"><rect width="{side}" height="{side}" fill="#FFFFFF"/>{}</svg>"##,
        class,
        modules,
        side = side
    )
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
