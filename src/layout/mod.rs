//! Layout engine for slides
//!
//! Turns content, a resolved style and a render context into a visual tree.
//! The style picks one of nine layouts; every layout is assembled from the
//! same slot renderers so that which slots appear depends only on the
//! content.

pub mod config;
pub mod engine;
pub mod selector;
pub mod slots;
pub mod types;

mod centered;
mod feature;
mod hero;
mod media;
mod split;

pub use config::{RenderContext, SizeTable, SizeToken, EXPORT_HEIGHT, EXPORT_WIDTH};
pub use engine::{compute, compute_with};
pub use selector::{select, select_hints, Layout};
pub use slots::LayoutInput;
pub use types::*;
