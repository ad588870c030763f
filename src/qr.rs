//! QR code matrices for publication links

use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};

/// Modules of quiet zone drawn around a matrix
pub const QUIET_ZONE: usize = 2;

/// A square grid of dark/light modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Encode `data` at the low error correction level
    pub fn encode(data: &str) -> Result<Self, QrError> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)?;
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(Self {
            width: code.width(),
            dark,
        })
    }

    /// Modules per side, excluding the quiet zone
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    /// Coordinates of every dark module, row by row
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.dark
            .iter()
            .enumerate()
            .filter(|(_, d)| **d)
            .map(move |(i, _)| (i % self.width, i / self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_link() {
        let matrix = QrMatrix::encode("https://www8.gsb.columbia.edu/").expect("Should encode");
        // Version sizes are 17 + 4v
        assert_eq!((matrix.width() - 17) % 4, 0);
        // Finder pattern corner is always dark
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.dark_modules().count() > 0);
    }

    #[test]
    fn test_out_of_bounds_is_light() {
        let matrix = QrMatrix::encode("x").unwrap();
        assert!(!matrix.is_dark(matrix.width(), 0));
    }

    #[test]
    fn test_oversized_data_fails() {
        let huge = "a".repeat(8000);
        assert!(QrMatrix::encode(&huge).is_err());
    }
}
