//! Equality Oracle - Pixel Keys and SHA-256 Fingerprints
//!
//! Two graphics are equal when they look the same: both have no area, or
//! both rasterize to the same bitmap on a canvas of their own size. How the
//! tree was built and where the anchor sits do not matter. Graphics too
//! large for a canvas fall back to comparing their expressions.
//!
//! Rasterizing is expensive; this is meant for tests and deduplication,
//! not for hot paths.

use std::hash::{Hash, Hasher};

use sha2::{Digest, Sha256};

use crate::graphic::Graphic;
use crate::print::{print_expression, Locale};
use crate::render::{to_pixmap, CanvasError};

/// What equality compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PixelKey {
    /// Every graphic without area looks the same.
    ZeroArea,
    /// Canvas size and premultiplied RGBA bytes.
    Pixels {
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
    /// Too large for a canvas: only graphics built by the same expression
    /// are equal.
    Unrenderable(String),
}

impl PixelKey {
    pub fn of(graphic: &Graphic) -> Self {
        match to_pixmap(graphic) {
            Ok(pixmap) => PixelKey::Pixels {
                width: pixmap.width(),
                height: pixmap.height(),
                data: pixmap.data().to_vec(),
            },
            Err(CanvasError::EmptyArea { .. }) => PixelKey::ZeroArea,
            Err(CanvasError::TooLarge { .. }) => {
                PixelKey::Unrenderable(print_expression(graphic, Locale::En))
            }
        }
    }

    pub fn is_zero_area(&self) -> bool {
        matches!(self, PixelKey::ZeroArea)
    }

    fn to_bytes(&self) -> Vec<u8> {
        match self {
            PixelKey::ZeroArea => b"empty".to_vec(),
            PixelKey::Pixels {
                width,
                height,
                data,
            } => {
                let mut bytes = Vec::with_capacity(8 + data.len());
                bytes.extend_from_slice(&width.to_be_bytes());
                bytes.extend_from_slice(&height.to_be_bytes());
                bytes.extend_from_slice(data);
                bytes
            }
            PixelKey::Unrenderable(expression) => {
                let mut bytes = b"expression:".to_vec();
                bytes.extend_from_slice(expression.as_bytes());
                bytes
            }
        }
    }
}

impl PartialEq for Graphic {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || PixelKey::of(self) == PixelKey::of(other)
    }
}

impl Eq for Graphic {}

impl Hash for Graphic {
    fn hash<H: Hasher>(&self, state: &mut H) {
        PixelKey::of(self).hash(state);
    }
}

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Stable hex fingerprint of how a graphic looks. Equal graphics have equal
/// fingerprints.
pub fn fingerprint(graphic: &Graphic) -> String {
    sha256_hex(&PixelKey::of(graphic).to_bytes())
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};
    use crate::operations::{beside, compose, pin_at, rotate};
    use crate::point_names::Anchor;
    use crate::primitives::{circular_sector, empty_graphic, rectangle};
    use std::collections::HashSet;

    #[test]
    fn test_hash_deterministic() {
        let h1 = sha256_hex(b"test data");
        let h2 = sha256_hex(b"test data");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn test_same_pixels_are_equal() {
        let whole = rectangle(20.0, 10.0, RED).unwrap();
        let half = rectangle(10.0, 10.0, RED).unwrap();
        assert_eq!(whole, beside(&half, &half));
    }

    #[test]
    fn test_anchor_is_ignored() {
        let r = rectangle(10.0, 10.0, RED).unwrap();
        assert_eq!(r, pin_at(Anchor::TopLeft, &r));
    }

    #[test]
    fn test_color_and_size_matter() {
        let red = rectangle(10.0, 10.0, RED).unwrap();
        assert_ne!(red, rectangle(10.0, 10.0, BLUE).unwrap());
        assert_ne!(red, rectangle(10.0, 11.0, RED).unwrap());
    }

    #[test]
    fn test_zero_area_graphics_are_equal() {
        let flat = circular_sector(10.0, 0.0, RED).unwrap();
        assert_eq!(flat, empty_graphic());
        assert!(PixelKey::of(&flat).is_zero_area());
    }

    #[test]
    fn test_hash_follows_equality() {
        let r = rectangle(10.0, 10.0, RED).unwrap();
        let mut set = HashSet::new();
        set.insert(r.clone());
        set.insert(rotate(360.0, &r).unwrap());
        set.insert(compose(&empty_graphic(), &r));
        assert_eq!(set.len(), 1);
        assert_eq!(fingerprint(&r), fingerprint(&rotate(360.0, &r).unwrap()));
    }

    #[test]
    fn test_oversized_graphics_stay_distinct() {
        let wide = rectangle(1e9, 1.0, RED).unwrap();
        let wider = rectangle(2e9, 3.0, BLUE).unwrap();
        assert!(!PixelKey::of(&wide).is_zero_area());
        assert_ne!(wide, wider);
        assert_ne!(fingerprint(&wide), fingerprint(&wider));
        assert_eq!(wide, rectangle(1e9, 1.0, RED).unwrap());
        assert_ne!(wide, empty_graphic());
    }
}
