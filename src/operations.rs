//! Operations - Combining Graphics
//!
//! Combinators only look at the anchor and bounds of their operands. None of
//! them mutates its inputs: every result is a new node sharing the operands.

use crate::error::{GraphicError, Result};
use crate::graphic::Graphic;
use crate::point::Point;
use crate::point_names::Anchor;
use crate::validation::check_finite;

/// Extents this close to a positive integer are taken as that integer.
const EXTENT_TOLERANCE: f64 = 1e-9;

/// Places `foreground` over `background`, joining them on their anchors.
/// The result keeps the background's anchor.
pub fn compose(foreground: &Graphic, background: &Graphic) -> Graphic {
    Graphic::composed(foreground.clone(), background.clone())
}

/// Moves the anchor of `graphic` to one of the nine named points of its
/// bounds. Any other point is rejected.
pub fn pin(point: Point, graphic: &Graphic) -> Result<Graphic> {
    let anchor = Anchor::from_point(point).ok_or(GraphicError::UnknownAnchor {
        x: point.x,
        y: point.y,
    })?;
    Ok(pin_at(anchor, graphic))
}

pub fn pin_at(anchor: Anchor, graphic: &Graphic) -> Graphic {
    Graphic::pinned(anchor, graphic.clone())
}

/// Rotates `graphic` counter-clockwise by `angle` degrees around its anchor.
/// Negative angles rotate clockwise.
pub fn rotate(angle: f64, graphic: &Graphic) -> Result<Graphic> {
    check_finite("angle", angle)?;
    Ok(Graphic::rotated(angle, graphic.clone()))
}

/// `foreground` centered over `background`.
pub fn overlay(foreground: &Graphic, background: &Graphic) -> Graphic {
    join(Anchor::Center, foreground, Anchor::Center, background)
}

/// `left` and `right` side by side, vertically centered.
pub fn beside(left: &Graphic, right: &Graphic) -> Graphic {
    join(Anchor::CenterRight, left, Anchor::CenterLeft, right)
}

/// `top` stacked on `bottom`, horizontally centered.
pub fn above(top: &Graphic, bottom: &Graphic) -> Graphic {
    join(Anchor::BottomCenter, top, Anchor::TopCenter, bottom)
}

fn join(first_at: Anchor, first: &Graphic, second_at: Anchor, second: &Graphic) -> Graphic {
    let composed = compose(&pin_at(first_at, first), &pin_at(second_at, second));
    pin_at(Anchor::Center, &composed)
}

/// Width in pixels, rounded up.
pub fn graphic_width(graphic: &Graphic) -> u32 {
    extent(graphic.bounds().width())
}

/// Height in pixels, rounded up.
pub fn graphic_height(graphic: &Graphic) -> u32 {
    extent(graphic.bounds().height())
}

pub fn graphic_size(graphic: &Graphic) -> (u32, u32) {
    (graphic_width(graphic), graphic_height(graphic))
}

/// A graphic with no area cannot be rendered or exported.
pub fn is_zero_area(graphic: &Graphic) -> bool {
    let (width, height) = graphic_size(graphic);
    width == 0 || height == 0
}

fn extent(value: f64) -> u32 {
    let nearest = value.round();
    let snapped = if nearest >= 1.0 && (value - nearest).abs() < EXTENT_TOLERANCE {
        nearest
    } else {
        value.ceil()
    };
    snapped.max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, GREEN, RED};
    use crate::outline::Rect;
    use crate::point::point;
    use crate::point_names::{bottom_right, center, top_left};
    use crate::primitives::{circular_sector, empty_graphic, rectangle};

    #[test]
    fn test_extent_rounding() {
        assert_eq!(extent(10.0), 10);
        assert_eq!(extent(10.2), 11);
        assert_eq!(extent(10.000_000_000_1), 10);
        assert_eq!(extent(9.999_999_999_9), 10);
        assert_eq!(extent(0.3), 1);
        assert_eq!(extent(0.0), 0);
        assert_eq!(extent(1e-10), 1);
        assert_eq!(extent(0.999_999_999_9), 1);
    }

    #[test]
    fn test_sliver_has_area() {
        let sliver = rectangle(1e-10, 5.0, RED).unwrap();
        assert_eq!(graphic_size(&sliver), (1, 5));
        assert!(!is_zero_area(&sliver));
        assert_ne!(sliver, empty_graphic());
    }

    #[test]
    fn test_pin_rejects_unnamed_point() {
        let r = rectangle(10.0, 10.0, RED).unwrap();
        let err = pin(point(0.5, 0.5), &r).unwrap_err();
        assert_eq!(err, GraphicError::UnknownAnchor { x: 0.5, y: 0.5 });
    }

    #[test]
    fn test_pin_named_points() {
        let r = rectangle(10.0, 20.0, RED).unwrap();
        assert_eq!(pin(top_left(), &r).unwrap().anchor(), point(0.0, 0.0));
        assert_eq!(pin(bottom_right(), &r).unwrap().anchor(), point(10.0, 20.0));
        assert_eq!(pin(center(), &r).unwrap().anchor(), point(5.0, 10.0));
    }

    #[test]
    fn test_beside_sizes_add() {
        let a = rectangle(10.0, 20.0, RED).unwrap();
        let b = rectangle(20.0, 20.0, GREEN).unwrap();
        let joined = beside(&a, &b);
        assert_eq!(graphic_size(&joined), (30, 20));
        let b = joined.bounds();
        assert_eq!(joined.anchor(), point(b.center_x(), b.center_y()));
    }

    #[test]
    fn test_above_sizes_add() {
        let a = rectangle(30.0, 10.0, RED).unwrap();
        let b = rectangle(30.0, 15.0, BLUE).unwrap();
        assert_eq!(graphic_size(&above(&a, &b)), (30, 25));
    }

    #[test]
    fn test_beside_centers_smaller_operand() {
        let small = rectangle(10.0, 10.0, RED).unwrap();
        let tall = rectangle(10.0, 30.0, BLUE).unwrap();
        let joined = beside(&small, &tall);
        // the left operand lands left of the right one, level with its middle
        assert_eq!(joined.bounds(), Rect::from_ltrb(-10.0, 0.0, 10.0, 30.0));
        assert_eq!(joined.anchor(), point(0.0, 15.0));
    }

    #[test]
    fn test_overlay_takes_larger_size() {
        let small = rectangle(10.0, 10.0, BLUE).unwrap();
        let big = rectangle(20.0, 20.0, RED).unwrap();
        assert_eq!(graphic_size(&overlay(&small, &big)), (20, 20));
    }

    #[test]
    fn test_rotate_rejects_non_finite() {
        let r = rectangle(10.0, 10.0, RED).unwrap();
        assert!(rotate(f64::INFINITY, &r).is_err());
        assert!(rotate(f64::NAN, &r).is_err());
    }

    #[test]
    fn test_rotated_square_grows() {
        let r = rectangle(10.0, 10.0, RED).unwrap();
        let turned = rotate(45.0, &r).unwrap();
        // the diagonal is 10 * sqrt(2)
        assert_eq!(graphic_size(&turned), (15, 15));
        assert_eq!(turned.anchor(), r.anchor());
    }

    #[test]
    fn test_zero_area() {
        assert!(is_zero_area(&empty_graphic()));
        assert!(is_zero_area(&circular_sector(20.0, 0.0, RED).unwrap()));
        assert!(!is_zero_area(&rectangle(1.0, 1.0, RED).unwrap()));
    }
}
