//! The nine named points of a bounding box.
//!
//! Named points live in an abstract unit square centered on the origin:
//! `x` is -1 (left), 0 (center) or 1 (right) and `y` is 1 (top), 0 (center)
//! or -1 (bottom). `pin` maps them onto the actual bounds of a graphic.

use serde::{Deserialize, Serialize};

use crate::point::{point, translate, Point, I_HAT, J_HAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Center,
    Bottom,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// The abstract point for this anchor, derived from the center by
    /// translation along the basis vectors.
    pub fn point(self) -> Point {
        let center = point(0.0, 0.0);
        match self {
            Anchor::Center => center,
            Anchor::TopCenter => translate(center, J_HAT),
            Anchor::BottomCenter => translate(center, -J_HAT),
            Anchor::CenterLeft => translate(center, -I_HAT),
            Anchor::CenterRight => translate(center, I_HAT),
            Anchor::TopLeft => translate(center, -I_HAT + J_HAT),
            Anchor::TopRight => translate(center, I_HAT + J_HAT),
            Anchor::BottomLeft => translate(center, -(I_HAT + J_HAT)),
            Anchor::BottomRight => translate(center, I_HAT - J_HAT),
        }
    }

    /// Reverse lookup: only an exact match with one of the nine points
    /// has a name.
    pub fn from_point(p: Point) -> Option<Anchor> {
        Self::ALL.into_iter().find(|anchor| anchor.point() == p)
    }

    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::TopCenter => "top_center",
            Anchor::TopRight => "top_right",
            Anchor::CenterLeft => "center_left",
            Anchor::Center => "center",
            Anchor::CenterRight => "center_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomCenter => "bottom_center",
            Anchor::BottomRight => "bottom_right",
        }
    }

    pub fn from_name(name: &str) -> Option<Anchor> {
        Self::ALL.into_iter().find(|anchor| anchor.name() == name)
    }

    pub fn horizontal(self) -> Horizontal {
        match self.point().x {
            x if x < 0.0 => Horizontal::Left,
            x if x > 0.0 => Horizontal::Right,
            _ => Horizontal::Center,
        }
    }

    pub fn vertical(self) -> Vertical {
        match self.point().y {
            y if y > 0.0 => Vertical::Top,
            y if y < 0.0 => Vertical::Bottom,
            _ => Vertical::Center,
        }
    }
}

pub fn center() -> Point {
    Anchor::Center.point()
}

pub fn top_center() -> Point {
    Anchor::TopCenter.point()
}

pub fn bottom_center() -> Point {
    Anchor::BottomCenter.point()
}

pub fn center_left() -> Point {
    Anchor::CenterLeft.point()
}

pub fn center_right() -> Point {
    Anchor::CenterRight.point()
}

pub fn top_left() -> Point {
    Anchor::TopLeft.point()
}

pub fn top_right() -> Point {
    Anchor::TopRight.point()
}

pub fn bottom_left() -> Point {
    Anchor::BottomLeft.point()
}

pub fn bottom_right() -> Point {
    Anchor::BottomRight.point()
}

/// Name of a point, if it is one of the nine named points.
pub fn point_name(p: Point) -> Option<&'static str> {
    Anchor::from_point(p).map(Anchor::name)
}

pub fn named_point(name: &str) -> Option<Point> {
    Anchor::from_name(name).map(Anchor::point)
}
