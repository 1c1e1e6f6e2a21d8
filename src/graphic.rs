//! Graphic Tree - Persistent Nodes with Anchors
//!
//! A `Graphic` is a cheap, shareable handle on an immutable node. Nodes store
//! their anchor and bounds, computed once when they are built; the outline of
//! a composite node is only materialized when asked for.

use std::sync::Arc;

use crate::color::Color;
use crate::outline::{Affine, Outline, Rect};
use crate::point::{Point, Vector};
use crate::point_names::{Anchor, Horizontal, Vertical};

/// Parameters of a primitive shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle { width: f64, height: f64 },
    Ellipse { width: f64, height: f64 },
    CircularSector { radius: f64, angle: f64 },
    Triangle { side1: f64, side2: f64, angle: f64 },
    Text { content: String, font: String, size: f64 },
}

impl Shape {
    /// Text is antialiased; geometric shapes are painted with hard edges.
    pub fn antialias(&self) -> bool {
        matches!(self, Shape::Text { .. })
    }
}

/// A filled shape with its outline in local coordinates.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub shape: Shape,
    pub color: Color,
    outline: Outline,
}

impl Primitive {
    pub fn outline(&self) -> &Outline {
        &self.outline
    }
}

#[derive(Debug)]
pub enum Kind {
    Empty,
    Primitive(Primitive),
    Compose {
        foreground: Graphic,
        background: Graphic,
    },
    Pin {
        graphic: Graphic,
        anchor: Anchor,
    },
    Rotate {
        graphic: Graphic,
        angle: f64,
    },
}

#[derive(Debug)]
struct Node {
    kind: Kind,
    anchor: Point,
    bounds: Option<Rect>,
}

/// Immutable graphic; cloning shares the underlying tree.
#[derive(Debug, Clone)]
pub struct Graphic(Arc<Node>);

impl Graphic {
    fn from_node(kind: Kind, anchor: Point, bounds: Option<Rect>) -> Self {
        Graphic(Arc::new(Node {
            kind,
            anchor,
            bounds,
        }))
    }

    pub(crate) fn empty() -> Self {
        Self::from_node(Kind::Empty, Point::ORIGIN, None)
    }

    pub(crate) fn primitive(shape: Shape, color: Color, outline: Outline, anchor: Point) -> Self {
        let bounds = outline.tight_bounds();
        Self::from_node(
            Kind::Primitive(Primitive {
                shape,
                color,
                outline,
            }),
            anchor,
            bounds,
        )
    }

    pub(crate) fn composed(foreground: Graphic, background: Graphic) -> Self {
        let shift = background.anchor().offset_from(foreground.anchor());
        let moved = foreground
            .0
            .bounds
            .map(|b| b.translated(shift.dx(), shift.dy()));
        let bounds = match (background.0.bounds, moved) {
            (Some(bg), Some(fg)) => Some(bg.union(&fg)),
            (bg, fg) => bg.or(fg),
        };
        let anchor = background.anchor();
        Self::from_node(
            Kind::Compose {
                foreground,
                background,
            },
            anchor,
            bounds,
        )
    }

    pub(crate) fn pinned(anchor: Anchor, graphic: Graphic) -> Self {
        let b = graphic.bounds();
        let x = match anchor.horizontal() {
            Horizontal::Left => b.left,
            Horizontal::Center => b.center_x(),
            Horizontal::Right => b.right,
        };
        let y = match anchor.vertical() {
            Vertical::Top => b.top,
            Vertical::Center => b.center_y(),
            Vertical::Bottom => b.bottom,
        };
        let bounds = graphic.0.bounds;
        Self::from_node(Kind::Pin { graphic, anchor }, Point::new(x, y), bounds)
    }

    pub(crate) fn rotated(angle: f64, graphic: Graphic) -> Self {
        let anchor = graphic.anchor();
        let bounds = graphic
            .outline()
            .transformed(&Affine::rotation(angle, anchor))
            .tight_bounds();
        Self::from_node(Kind::Rotate { graphic, angle }, anchor, bounds)
    }

    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    /// The pinning position, in the same coordinates as `bounds`.
    pub fn anchor(&self) -> Point {
        self.0.anchor
    }

    /// Tight bounds of the outline; a zero rectangle at the origin when
    /// there is nothing to paint.
    pub fn bounds(&self) -> Rect {
        self.0.bounds.unwrap_or_default()
    }

    pub fn is_empty_graphic(&self) -> bool {
        matches!(self.kind(), Kind::Empty)
    }

    /// Whether two handles point at the same node.
    pub fn ptr_eq(&self, other: &Graphic) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Full outline of the tree, in this node's coordinates.
    pub fn outline(&self) -> Outline {
        let mut outline = Outline::new();
        self.walk(Affine::IDENTITY, |primitive, m| {
            outline.extend_transformed(primitive.outline(), m);
        });
        outline
    }

    /// Visits every primitive in paint order (background before foreground)
    /// with the map from its local coordinates to this node's coordinates
    /// followed by `base`.
    pub fn walk(&self, base: Affine, mut visit: impl FnMut(&Primitive, &Affine)) {
        let mut stack: Vec<(&Graphic, Affine)> = vec![(self, base)];
        while let Some((graphic, m)) = stack.pop() {
            match graphic.kind() {
                Kind::Empty => {}
                Kind::Primitive(primitive) => visit(primitive, &m),
                Kind::Compose {
                    foreground,
                    background,
                } => {
                    let shift: Vector = background.anchor().offset_from(foreground.anchor());
                    let moved = Affine::translation(shift.dx(), shift.dy()).then(&m);
                    stack.push((foreground, moved));
                    stack.push((background, m));
                }
                Kind::Pin { graphic, .. } => stack.push((graphic, m)),
                Kind::Rotate { graphic, angle } => {
                    let turn = Affine::rotation(*angle, graphic.anchor()).then(&m);
                    stack.push((graphic, turn));
                }
            }
        }
    }
}

impl Drop for Node {
    // Unlinks children one level at a time so dropping a deep tree does not
    // recurse once per level.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(&mut self.kind, &mut pending);
        while let Some(graphic) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(graphic.0) {
                detach_children(&mut node.kind, &mut pending);
            }
        }
    }
}

fn detach_children(kind: &mut Kind, pending: &mut Vec<Graphic>) {
    match std::mem::replace(kind, Kind::Empty) {
        Kind::Compose {
            foreground,
            background,
        } => {
            pending.push(foreground);
            pending.push(background);
        }
        Kind::Pin { graphic, .. } | Kind::Rotate { graphic, .. } => pending.push(graphic),
        Kind::Empty | Kind::Primitive(_) => {}
    }
}
