//! Primitive Builders - Shapes and Text
//!
//! Each builder validates its parameters, builds the outline in local
//! coordinates (top-left of the natural bounding box at the origin, except
//! for text which sits on the baseline) and picks the natural anchor.

use crate::color::Color;
use crate::error::Result;
use crate::graphic::{Graphic, Shape};
use crate::outline::{direction, Outline, Rect};
use crate::point::Point;
use crate::text::{font_book, GlyphSource};
use crate::validation::{check_length, check_range};

/// The graphic with no area. It is the identity of `compose`.
pub fn empty_graphic() -> Graphic {
    Graphic::empty()
}

pub fn rectangle(width: f64, height: f64, color: Color) -> Result<Graphic> {
    check_length("width", width)?;
    check_length("height", height)?;
    Ok(Graphic::primitive(
        Shape::Rectangle { width, height },
        color,
        Outline::rect(Rect::from_wh(width, height)),
        Point::new(width / 2.0, height / 2.0),
    ))
}

/// Ellipse inscribed in a `width` x `height` box; a circle when both match.
pub fn ellipse(width: f64, height: f64, color: Color) -> Result<Graphic> {
    check_length("width", width)?;
    check_length("height", height)?;
    Ok(Graphic::primitive(
        Shape::Ellipse { width, height },
        color,
        Outline::oval(Rect::from_wh(width, height)),
        Point::new(width / 2.0, height / 2.0),
    ))
}

/// Slice of a circle of `radius`, from 3 o'clock sweeping `angle` degrees
/// counter-clockwise. The anchor is the center of the circle.
///
/// A 0° sector has no area (its outline is the single radius at 0°); a 360°
/// sector is the whole circle.
pub fn circular_sector(radius: f64, angle: f64, color: Color) -> Result<Graphic> {
    check_length("radius", radius)?;
    check_range("angle", angle, 0.0, 360.0)?;
    let center = Point::new(radius, radius);
    let start = Point::new(2.0 * radius, radius);
    let outline = if angle == 360.0 {
        Outline::oval(Rect::from_wh(2.0 * radius, 2.0 * radius))
    } else if angle == 0.0 {
        Outline::polygon(&[center, start])
    } else {
        let mut outline = Outline::new();
        outline.move_to(center);
        outline.line_to(start);
        outline.arc_to(center, radius, radius, 0.0, angle);
        outline.close();
        outline
    };
    Ok(Graphic::primitive(
        Shape::CircularSector { radius, angle },
        color,
        outline,
        center,
    ))
}

/// Triangle with `side1` along the x axis and `side2` turned `angle` degrees
/// counter-clockwise from it. The anchor is the centroid.
pub fn triangle(side1: f64, side2: f64, angle: f64, color: Color) -> Result<Graphic> {
    check_length("side1", side1)?;
    check_length("side2", side2)?;
    check_range("angle", angle, 0.0, 180.0)?;
    let d = direction(angle);
    let vertices = [
        Point::ORIGIN,
        Point::new(side1, 0.0),
        Point::new(d.x * side2, d.y * side2),
    ];
    let centroid = Point::new(
        vertices.iter().map(|p| p.x).sum::<f64>() / 3.0,
        vertices.iter().map(|p| p.y).sum::<f64>() / 3.0,
    );
    Ok(Graphic::primitive(
        Shape::Triangle {
            side1,
            side2,
            angle,
        },
        color,
        Outline::polygon(&vertices),
        centroid,
    ))
}

/// Text in the process-wide font book. A missing font falls back to another
/// one with a logged warning.
pub fn text(content: &str, font: &str, size: f64, color: Color) -> Result<Graphic> {
    text_with(font_book(), content, font, size, color)
}

/// Text whose glyphs come from `source`. The anchor is on the baseline, at
/// the left edge of the glyphs.
pub fn text_with(
    source: &dyn GlyphSource,
    content: &str,
    font: &str,
    size: f64,
    color: Color,
) -> Result<Graphic> {
    check_length("size", size)?;
    let outline = source.text_outline(content, font, size);
    let anchor = outline
        .tight_bounds()
        .map(|b| Point::new(b.left, 0.0))
        .unwrap_or(Point::ORIGIN);
    Ok(Graphic::primitive(
        Shape::Text {
            content: content.to_string(),
            font: font.to_string(),
            size,
        },
        color,
        outline,
        anchor,
    ))
}
