//! Rendering onto a tiny-skia canvas.

use thiserror::Error;
use tiny_skia::{FillRule, Paint, Pixmap, Transform};

use crate::color::Color;
use crate::graphic::Graphic;
use crate::operations::{graphic_size, is_zero_area};
use crate::outline::{Affine, Outline};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("A graphic of size {width}x{height} has no area to paint")]
    EmptyArea { width: u32, height: u32 },

    #[error("Cannot allocate a {width}x{height} canvas")]
    TooLarge { width: u32, height: u32 },
}

/// Fills `outline`, mapped by `transform`, with a solid color.
pub fn fill_outline(
    pixmap: &mut Pixmap,
    outline: &Outline,
    transform: &Affine,
    color: Color,
    antialias: bool,
) {
    let Some(path) = outline.to_path(transform) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = antialias;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}

/// Paints `graphic` with the top-left corner of its bounds at the canvas
/// origin. Backgrounds are painted before their foregrounds.
pub fn render(graphic: &Graphic, pixmap: &mut Pixmap) {
    let origin = graphic.bounds().top_left();
    let base = Affine::translation(-origin.x, -origin.y);
    graphic.walk(base, |primitive, m| {
        fill_outline(
            pixmap,
            primitive.outline(),
            m,
            primitive.color,
            primitive.shape.antialias(),
        );
    });
}

/// A transparent canvas of exactly the graphic's size, painted.
pub fn to_pixmap(graphic: &Graphic) -> Result<Pixmap, CanvasError> {
    let (width, height) = graphic_size(graphic);
    if is_zero_area(graphic) {
        return Err(CanvasError::EmptyArea { width, height });
    }
    let mut pixmap = Pixmap::new(width, height).ok_or(CanvasError::TooLarge { width, height })?;
    render(graphic, &mut pixmap);
    Ok(pixmap)
}
