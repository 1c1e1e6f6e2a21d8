//! Text Backend - Glyph Outlines from Font Files
//!
//! Fonts are indexed by family name from a list of directories. Asking for a
//! family that is not installed falls back to another font with a warning;
//! it is never an error.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, warn};
use ttf_parser::{Face, GlyphId};

use crate::outline::Outline;
use crate::point::Point;

/// Anything able to turn a string into glyph outlines.
///
/// The outline is laid out left to right with the baseline on `y = 0`, in
/// the y-down space of the canvas (ascenders have negative `y`).
pub trait GlyphSource: Send + Sync {
    fn text_outline(&self, content: &str, font: &str, size: f64) -> Outline;
}

#[derive(Debug, Clone)]
struct FontFile {
    family: String,
    path: PathBuf,
    index: u32,
}

/// Index of the font files found in a set of directories.
#[derive(Debug, Clone, Default)]
pub struct FontBook {
    fonts: Vec<FontFile>,
    fallback: Option<String>,
}

impl FontBook {
    /// Scans `dirs` recursively for `.ttf`, `.otf` and `.ttc` files.
    pub fn scan(dirs: &[PathBuf], fallback: Option<String>) -> Self {
        let mut fonts = Vec::new();
        let mut pending: Vec<PathBuf> = dirs.to_vec();
        while let Some(dir) = pending.pop() {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                } else if is_font_file(&path) {
                    index_file(&path, &mut fonts);
                }
            }
        }
        fonts.sort_by(|a, b| a.family.cmp(&b.family).then(a.path.cmp(&b.path)));
        debug!("Indexed {} font faces from {} directories", fonts.len(), dirs.len());
        Self { fonts, fallback }
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Installed family names, sorted, each listed once.
    pub fn families(&self) -> Vec<&str> {
        let mut families: Vec<&str> = self.fonts.iter().map(|f| f.family.as_str()).collect();
        families.dedup();
        families
    }

    fn find(&self, family: &str) -> Option<&FontFile> {
        self.fonts
            .iter()
            .find(|font| font.family.eq_ignore_ascii_case(family))
    }

    /// The font used for `family`: itself if installed, otherwise the
    /// configured fallback, otherwise the first indexed font.
    fn resolve(&self, family: &str) -> Option<&FontFile> {
        if let Some(font) = self.find(family) {
            return Some(font);
        }
        let substitute = self
            .fallback
            .as_deref()
            .and_then(|name| self.find(name))
            .or_else(|| self.fonts.first());
        match substitute {
            Some(font) => warn!(
                "Font '{}' is not available, using '{}' instead",
                family, font.family
            ),
            None => warn!("Font '{}' is not available and no fonts were found", family),
        }
        substitute
    }
}

impl GlyphSource for FontBook {
    fn text_outline(&self, content: &str, font: &str, size: f64) -> Outline {
        let mut outline = Outline::new();
        let Some(file) = self.resolve(font) else {
            return outline;
        };
        let data = match std::fs::read(&file.path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Cannot read font file {}: {}", file.path.display(), e);
                return outline;
            }
        };
        let face = match Face::parse(&data, file.index) {
            Ok(face) => face,
            Err(e) => {
                warn!("Cannot parse font file {}: {}", file.path.display(), e);
                return outline;
            }
        };
        let scale = size / f64::from(face.units_per_em());
        let mut pen = 0.0;
        for ch in content.chars() {
            let glyph = face.glyph_index(ch).unwrap_or(GlyphId(0));
            let mut builder = GlyphBuilder {
                outline: &mut outline,
                scale,
                pen,
            };
            face.outline_glyph(glyph, &mut builder);
            pen += f64::from(face.glyph_hor_advance(glyph).unwrap_or(0)) * scale;
        }
        outline
    }
}

/// Appends glyph contours to an outline, scaled from font units and
/// flipped so that the font's y-up becomes the canvas' y-down.
struct GlyphBuilder<'a> {
    outline: &'a mut Outline,
    scale: f64,
    pen: f64,
}

impl GlyphBuilder<'_> {
    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.pen + f64::from(x) * self.scale,
            -f64::from(y) * self.scale,
        )
    }
}

impl ttf_parser::OutlineBuilder for GlyphBuilder<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.outline.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.outline.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.map(x1, y1), self.map(x, y));
        self.outline.quad_to(c, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, p) = (self.map(x1, y1), self.map(x2, y2), self.map(x, y));
        self.outline.cubic_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.outline.close();
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
        .unwrap_or(false)
}

fn index_file(path: &Path, fonts: &mut Vec<FontFile>) {
    let Ok(data) = std::fs::read(path) else {
        return;
    };
    let count = ttf_parser::fonts_in_collection(&data).unwrap_or(1);
    for index in 0..count {
        let Ok(face) = Face::parse(&data, index) else {
            continue;
        };
        if let Some(family) = family_name(&face) {
            fonts.push(FontFile {
                family,
                path: path.to_path_buf(),
                index,
            });
        }
    }
}

fn family_name(face: &Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
        .find_map(|name| name.to_string())
}

/// Platform font directories, user directories included.
pub fn default_font_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = if cfg!(target_os = "macos") {
        vec!["/System/Library/Fonts".into(), "/Library/Fonts".into()]
    } else if cfg!(target_os = "windows") {
        vec!["C:\\Windows\\Fonts".into()]
    } else {
        vec!["/usr/share/fonts".into(), "/usr/local/share/fonts".into()]
    };
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        if cfg!(target_os = "macos") {
            dirs.push(home.join("Library/Fonts"));
        } else {
            dirs.push(home.join(".fonts"));
            dirs.push(home.join(".local/share/fonts"));
        }
    }
    dirs
}

static FONT_BOOK: OnceLock<FontBook> = OnceLock::new();

/// Installs the font book used by `text`. Only the first call (or the
/// first use of `text`) wins; returns whether `book` was installed.
pub fn install_font_book(book: FontBook) -> bool {
    FONT_BOOK.set(book).is_ok()
}

/// The process-wide font book, scanned from the platform directories on
/// first use unless one was installed before.
pub fn font_book() -> &'static FontBook {
    FONT_BOOK.get_or_init(|| FontBook::scan(&default_font_dirs(), None))
}
