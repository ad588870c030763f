//! Image resource management
//!
//! An uploaded image becomes displayable through an [`ImageHandle`]: a
//! transient reference (a `data:` URI) plus the metadata sniffed from the
//! bytes. Handles can only be created and released by an
//! [`ImageResourceManager`], and a manager holds at most one live handle at a
//! time. The lifecycle is `empty → referenced → empty`: every change of image
//! releases the previous handle before the next one is acquired, and dropping
//! the manager releases whatever is still live.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, ImageReader};
use log::{debug, warn};
use thiserror::Error;

/// Why bytes could not be turned into a displayable reference
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image data is empty")]
    Empty,

    #[error("unrecognised image format")]
    UnknownFormat,

    #[error("unsupported image format: {0:?}")]
    Unsupported(ImageFormat),

    #[error("corrupt image data: {0}")]
    Corrupt(String),
}

/// Identifier of one acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// The displayable part of a handle, cheap to clone into a visual tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub id: ImageId,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    uri: Arc<str>,
}

impl ImageSource {
    /// The `data:` URI to place in an `src`/`href` attribute
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// A live displayable reference to image bytes
///
/// Not `Clone`: exactly one owner exists, and it must hand the handle back to
/// the manager that created it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an acquired image handle must be released"]
pub struct ImageHandle {
    source: ImageSource,
    fingerprint: u64,
    owner: u64,
}

impl ImageHandle {
    pub fn id(&self) -> ImageId {
        self.source.id
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.source.width, self.source.height)
    }
}

/// Acquisition counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageStats {
    pub created: usize,
    pub released: usize,
}

impl ImageStats {
    pub fn live(&self) -> usize {
        self.created.saturating_sub(self.released)
    }
}

static NEXT_MANAGER: AtomicU64 = AtomicU64::new(1);

/// Owner of the image reference for one mounted view
#[derive(Debug)]
pub struct ImageResourceManager {
    id: u64,
    current: Option<ImageHandle>,
    next_id: u64,
    stats: ImageStats,
}

impl Default for ImageResourceManager {
    fn default() -> Self {
        Self {
            id: NEXT_MANAGER.fetch_add(1, Ordering::Relaxed),
            current: None,
            next_id: 0,
            stats: ImageStats::default(),
        }
    }
}

impl ImageResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a displayable reference for `bytes`
    pub fn acquire(&mut self, bytes: &[u8]) -> Result<ImageHandle, ImageError> {
        let (format, width, height) = sniff(bytes)?;
        let mime = mime_type(format).ok_or(ImageError::Unsupported(format))?;

        self.next_id += 1;
        let id = ImageId(self.next_id);
        let uri: Arc<str> = format!("data:{};base64,{}", mime, STANDARD.encode(bytes)).into();
        self.stats.created += 1;
        debug!("acquired {} ({}, {}x{}, {} bytes)", id, mime, width, height, bytes.len());

        Ok(ImageHandle {
            source: ImageSource {
                id,
                mime,
                width,
                height,
                uri,
            },
            fingerprint: fingerprint(bytes),
            owner: self.id,
        })
    }

    /// Release a handle created by this manager
    ///
    /// A handle from another manager is not counted and is handed back.
    pub fn release(&mut self, handle: ImageHandle) -> Result<(), ImageHandle> {
        if handle.owner != self.id {
            warn!("refusing to release {}: acquired by another manager", handle.id());
            return Err(handle);
        }
        self.stats.released += 1;
        debug!("released {}", handle.id());
        Ok(())
    }

    fn release_current(&mut self) {
        if let Some(previous) = self.current.take() {
            self.stats.released += 1;
            debug!("released {}", previous.id());
        }
    }

    /// Apply a change of the content's image
    ///
    /// Identical bytes are not a change. Otherwise the live handle (if any) is
    /// released first, then a new one is acquired. If acquisition fails the
    /// manager is left empty and the error is returned for the caller to
    /// report; rendering proceeds with the no-image treatment.
    pub fn set_image(&mut self, bytes: Option<&[u8]>) -> Result<(), ImageError> {
        let bytes = bytes.filter(|b| !b.is_empty());
        if let (Some(current), Some(new)) = (&self.current, bytes) {
            if current.fingerprint == fingerprint(new) {
                return Ok(());
            }
        }

        self.release_current();

        match bytes {
            Some(bytes) => match self.acquire(bytes) {
                Ok(handle) => {
                    self.current = Some(handle);
                    Ok(())
                }
                Err(e) => {
                    warn!("image rejected, rendering without it: {}", e);
                    Err(e)
                }
            },
            None => Ok(()),
        }
    }

    /// Release the live handle, if any
    pub fn clear(&mut self) {
        self.release_current();
    }

    /// The live handle
    pub fn current(&self) -> Option<&ImageHandle> {
        self.current.as_ref()
    }

    pub fn stats(&self) -> ImageStats {
        self.stats
    }
}

impl Drop for ImageResourceManager {
    fn drop(&mut self) {
        self.clear();
    }
}

fn sniff(bytes: &[u8]) -> Result<(ImageFormat, u32, u32), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageError::Corrupt(e.to_string()))?;
    let format = reader.format().ok_or(ImageError::UnknownFormat)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ImageError::Corrupt(e.to_string()))?;
    if width == 0 || height == 0 {
        return Err(ImageError::Corrupt("zero-sized image".to_string()));
    }
    Ok((format, width, height))
}

fn mime_type(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        _ => None,
    }
}

fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// Encode a tiny solid PNG, used by tests across the crate
#[cfg(test)]
pub(crate) fn test_png(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageBuffer, Rgb};

    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(width, height, |x, y| Rgb([(x * 40) as u8, (y * 40) as u8, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_png() {
        let mut manager = ImageResourceManager::new();
        let handle = manager.acquire(&test_png(4, 3)).expect("Should acquire");
        assert_eq!(handle.dimensions(), (4, 3));
        assert_eq!(handle.source().mime, "image/png");
        assert!(handle.source().uri().starts_with("data:image/png;base64,"));
        manager.release(handle).unwrap();
        assert_eq!(manager.stats().live(), 0);
    }

    #[test]
    fn test_foreign_handle_refused() {
        let mut a = ImageResourceManager::new();
        let mut b = ImageResourceManager::new();
        let handle = a.acquire(&test_png(2, 2)).unwrap();

        let handle = b.release(handle).unwrap_err();
        assert_eq!(b.stats(), ImageStats::default());
        assert_eq!(b.stats().live(), 0);

        a.release(handle).unwrap();
        assert_eq!(a.stats(), ImageStats { created: 1, released: 1 });
    }

    #[test]
    fn test_live_never_underflows() {
        let stats = ImageStats { created: 0, released: 1 };
        assert_eq!(stats.live(), 0);
    }

    #[test]
    fn test_corrupt_bytes_rejected() {
        let mut manager = ImageResourceManager::new();
        assert!(manager.acquire(b"definitely not an image").is_err());
        assert!(matches!(manager.acquire(&[]), Err(ImageError::Empty)));
        assert_eq!(manager.stats().created, 0);
    }

    #[test]
    fn test_truncated_png_rejected() {
        let png = test_png(8, 8);
        let mut manager = ImageResourceManager::new();
        assert!(manager.acquire(&png[..12]).is_err());
    }

    #[test]
    fn test_three_changes_create_and_release_three() {
        let images = [test_png(1, 1), test_png(2, 2), test_png(3, 3)];
        let mut manager = ImageResourceManager::new();

        for (i, bytes) in images.iter().enumerate() {
            manager.set_image(Some(bytes)).unwrap();
            let stats = manager.stats();
            assert_eq!(stats.created, i + 1);
            assert_eq!(stats.live(), 1, "only the newest reference may be live");
        }
        manager.clear();

        let stats = manager.stats();
        assert_eq!(stats.created, 3);
        assert_eq!(stats.released, 3);
    }

    #[test]
    fn test_same_bytes_do_not_churn() {
        let png = test_png(2, 2);
        let mut manager = ImageResourceManager::new();
        manager.set_image(Some(&png)).unwrap();
        let id = manager.current().unwrap().id();
        manager.set_image(Some(&png.clone())).unwrap();
        assert_eq!(manager.current().unwrap().id(), id);
        assert_eq!(manager.stats().created, 1);
    }

    #[test]
    fn test_failed_change_releases_previous() {
        let mut manager = ImageResourceManager::new();
        manager.set_image(Some(&test_png(2, 2))).unwrap();
        assert!(manager.set_image(Some(b"garbage")).is_err());
        assert!(manager.current().is_none());
        assert_eq!(manager.stats().live(), 0);
    }

    #[test]
    fn test_clearing_image() {
        let mut manager = ImageResourceManager::new();
        manager.set_image(Some(&test_png(2, 2))).unwrap();
        manager.set_image(None).unwrap();
        assert!(manager.current().is_none());
        assert_eq!(manager.stats(), ImageStats { created: 1, released: 1 });
    }
}
