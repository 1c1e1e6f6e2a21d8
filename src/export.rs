//! Export - PNG Images, Data URIs and Frame Sequences
//!
//! Graphics without area cannot be exported: the attempt is logged and
//! reported as `ExportError::EmptyArea`.

use std::fs;
use std::path::Path;

use base64::Engine;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::debug::add_debug_info;
use crate::graphic::Graphic;
use crate::hashing::sha256_hex;
use crate::operations::{graphic_size, is_zero_area};
use crate::render::{to_pixmap, CanvasError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot export a graphic of size {width}x{height} as it has no area")]
    EmptyArea { width: u32, height: u32 },

    #[error("Cannot export a graphic of size {width}x{height}: the canvas is too large")]
    TooLarge { width: u32, height: u32 },

    #[error("The list of graphics cannot be empty")]
    EmptyFrames,

    #[error("Frame {index} is {found:?} but the first frame is {expected:?}")]
    DifferentSizes {
        index: usize,
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CanvasError> for ExportError {
    fn from(e: CanvasError) -> Self {
        match e {
            CanvasError::EmptyArea { width, height } => ExportError::EmptyArea { width, height },
            CanvasError::TooLarge { width, height } => ExportError::TooLarge { width, height },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub png: Vec<u8>,
    /// SHA-256 of the PNG bytes.
    pub hash: String,
}

impl ExportedImage {
    pub fn data_uri(&self) -> String {
        data_uri(&self.png)
    }
}

/// Encodes `graphic` as a PNG of its own size, optionally with the debug
/// overlay painted on top.
pub fn render_png(graphic: &Graphic, debug: bool) -> Result<ExportedImage, ExportError> {
    if is_zero_area(graphic) {
        let (width, height) = graphic_size(graphic);
        warn!(
            "Cannot show/save a graphic of size {}x{} as it has no area",
            width, height
        );
        return Err(ExportError::EmptyArea { width, height });
    }
    let target = if debug {
        add_debug_info(graphic)
    } else {
        graphic.clone()
    };
    let pixmap = to_pixmap(&target)?;
    let (width, height) = (pixmap.width(), pixmap.height());
    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    let hash = sha256_hex(&png);
    Ok(ExportedImage {
        width,
        height,
        png,
        hash,
    })
}

pub fn save_png(path: &Path, graphic: &Graphic, debug: bool) -> Result<ExportedImage, ExportError> {
    let image = render_png(graphic, debug)?;
    fs::write(path, &image.png)?;
    Ok(image)
}

/// `data:image/png;base64,...`
pub fn data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Renders an ordered sequence of frames. All frames must have the size of
/// the first one.
pub fn render_frames(graphics: &[Graphic]) -> Result<Vec<ExportedImage>, ExportError> {
    let first = graphics.first().ok_or(ExportError::EmptyFrames)?;
    let expected = graphic_size(first);
    for (index, graphic) in graphics.iter().enumerate() {
        let found = graphic_size(graphic);
        if found != expected {
            return Err(ExportError::DifferentSizes {
                index,
                expected,
                found,
            });
        }
    }
    graphics.iter().map(|g| render_png(g, false)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};
    use crate::primitives::{circular_sector, empty_graphic, rectangle};

    #[test]
    fn test_png_has_graphic_size() {
        let image = render_png(&rectangle(12.0, 7.0, RED).unwrap(), false).unwrap();
        assert_eq!((image.width, image.height), (12, 7));
        assert_eq!(&image.png[1..4], b"PNG");
        assert_eq!(image.hash, sha256_hex(&image.png));
    }

    #[test]
    fn test_debug_png_is_larger() {
        let image = render_png(&rectangle(100.0, 100.0, RED).unwrap(), true).unwrap();
        assert_eq!((image.width, image.height), (110, 110));
    }

    #[test]
    fn test_zero_area_is_rejected() {
        let err = render_png(&circular_sector(20.0, 0.0, RED).unwrap(), true).unwrap_err();
        assert!(matches!(err, ExportError::EmptyArea { width: 20, height: 0 }));
        assert!(render_png(&empty_graphic(), false).is_err());
    }

    #[test]
    fn test_oversized_graphic_is_not_empty() {
        let err = render_png(&rectangle(1e9, 1.0, RED).unwrap(), false).unwrap_err();
        assert!(matches!(
            err,
            ExportError::TooLarge {
                width: 1_000_000_000,
                height: 1
            }
        ));
    }

    #[test]
    fn test_data_uri_prefix() {
        let uri = data_uri(b"abc");
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_frames_must_share_size() {
        assert!(matches!(render_frames(&[]), Err(ExportError::EmptyFrames)));
        let a = rectangle(10.0, 10.0, RED).unwrap();
        let b = rectangle(10.0, 10.0, BLUE).unwrap();
        let c = rectangle(10.0, 12.0, BLUE).unwrap();
        assert_eq!(render_frames(&[a.clone(), b.clone()]).unwrap().len(), 2);
        assert!(matches!(
            render_frames(&[a, b, c]),
            Err(ExportError::DifferentSizes { index: 2, .. })
        ));
    }

    #[test]
    fn test_save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = save_png(&path, &rectangle(3.0, 3.0, RED).unwrap(), false).unwrap();
        assert_eq!(fs::read(&path).unwrap(), image.png);
    }
}
