//! Debug Overlay - Bounds and Anchor Made Visible
//!
//! The overlay is an ordinary graphic composed over the original: a
//! red frame around the bounds and a yellow cross on the anchor.

use crate::color::{rgb_color, Color};
use crate::graphic::{Graphic, Shape};
use crate::operations::{compose, pin_at};
use crate::outline::{Outline, Rect};
use crate::point::Point;
use crate::point_names::Anchor;
use crate::primitives::{ellipse, empty_graphic, rectangle};

const BORDER_WIDTH: f64 = 5.0;
const BORDER_COLOR: Color = Color::opaque(240, 16, 16);
const CROSS_ARM: (f64, f64) = (35.0, 5.0);
const CROSS_COLOR: Color = Color::opaque(250, 200, 0);
const DOT_DIAMETER: f64 = 9.0;

/// Adds a frame around the bounds of `graphic` and a cross on its anchor.
///
/// The frame hugs the bounds even when the anchor lies outside them.
/// The anchor of the result is the anchor of `graphic`, so a debugged
/// graphic composes exactly like `graphic` itself.
pub fn add_debug_info(graphic: &Graphic) -> Graphic {
    let framed = compose(&frame(graphic), graphic);
    compose(&marker(), &framed)
}

/// A band of `BORDER_WIDTH` around the bounds, anchored on the anchor of
/// `graphic`. When the anchor lies within the bounds the band is four
/// L-shaped corners, each pinned on its inner corner so that all of them
/// meet on the anchor.
fn frame(graphic: &Graphic) -> Graphic {
    let a = graphic.anchor();
    let b = graphic.bounds();
    let o = b.outset(BORDER_WIDTH);
    if !b.contains(a) {
        return detached_frame(o, a);
    }
    let (left, right) = (a.x - o.left, o.right - a.x);
    let (up, down) = (a.y - o.top, o.bottom - a.y);

    let top_left = pin_at(Anchor::BottomRight, &corner(left, up));
    let top_right = pin_at(Anchor::BottomLeft, &Graphic::rotated(-90.0, corner(up, right)));
    let bottom_right = pin_at(Anchor::TopLeft, &Graphic::rotated(180.0, corner(right, down)));
    let bottom_left = pin_at(Anchor::TopRight, &Graphic::rotated(90.0, corner(down, left)));

    [top_right, bottom_right, bottom_left]
        .iter()
        .fold(top_left, |frame, piece| compose(piece, &frame))
}

/// Four bars around `outer`, each one carrying `anchor` so they compose
/// in place. Used when the anchor is off the bounds and no corner can reach
/// it without leaving the band.
fn detached_frame(outer: Rect, anchor: Point) -> Graphic {
    let t = BORDER_WIDTH;
    let bars = [
        Rect::from_ltrb(outer.left, outer.top, outer.right, outer.top + t),
        Rect::from_ltrb(outer.left, outer.bottom - t, outer.right, outer.bottom),
        Rect::from_ltrb(outer.left, outer.top + t, outer.left + t, outer.bottom - t),
        Rect::from_ltrb(outer.right - t, outer.top + t, outer.right, outer.bottom - t),
    ];
    bars.iter()
        .filter(|r| r.width() > 0.0 && r.height() > 0.0)
        .map(|r| {
            let shape = Shape::Rectangle {
                width: r.width(),
                height: r.height(),
            };
            Graphic::primitive(shape, BORDER_COLOR, Outline::rect(*r), anchor)
        })
        .reduce(|frame, bar| compose(&bar, &frame))
        .unwrap_or_else(empty_graphic)
}

/// An L with a `width` bar along the top and a `height` bar down the left.
fn corner(width: f64, height: f64) -> Graphic {
    let t = BORDER_WIDTH;
    compose(
        &pin_at(Anchor::TopLeft, &bar(width, t, BORDER_COLOR)),
        &pin_at(Anchor::TopLeft, &bar(t, height, BORDER_COLOR)),
    )
}

fn marker() -> Graphic {
    let (length, thickness) = CROSS_ARM;
    let arm = bar(length, thickness, CROSS_COLOR);
    let plus = compose(&arm, &Graphic::rotated(90.0, arm.clone()));
    let cross = Graphic::rotated(45.0, plus);
    let dot = ellipse(DOT_DIAMETER, DOT_DIAMETER, rgb_color(40, 40, 40))
        .unwrap_or_else(|_| empty_graphic());
    compose(&cross, &dot)
}

fn bar(width: f64, height: f64, color: Color) -> Graphic {
    rectangle(width, height, color).unwrap_or_else(|_| empty_graphic())
}
