//! HTML renderer for slide trees
//!
//! This module takes a SlideTree and produces an HTML string with inline
//! styles, embedding glyphs and QR codes as SVG.

pub mod config;
pub mod html;
pub mod svg;

pub use config::HtmlConfig;
pub use html::{render_html, render_loading, HtmlBuilder, CONTAINER_ID, STATUS_ID};
