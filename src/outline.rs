//! Outline Backend - Paths, Bounds and Affine Maps
//!
//! Outlines are kept in `f64` node-local coordinates in a y-down space (the
//! same orientation as the raster). They are converted to `tiny_skia::Path`
//! only when painted.

use tiny_skia::PathBuilder;

use crate::point::Point;

/// Axis-aligned rectangle, y-down: `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_wh(width: f64, height: f64) -> Self {
        Self::from_ltrb(0.0, 0.0, width, height)
    }

    fn at(p: Point) -> Self {
        Self::from_ltrb(p.x, p.y, p.x, p.y)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    pub fn include(&mut self, p: Point) {
        self.left = self.left.min(p.x);
        self.top = self.top.min(p.y);
        self.right = self.right.max(p.x);
        self.bottom = self.bottom.max(p.y);
    }

    /// Edges included.
    pub fn contains(&self, p: Point) -> bool {
        (self.left..=self.right).contains(&p.x) && (self.top..=self.bottom).contains(&p.y)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::from_ltrb(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    pub fn outset(&self, amount: f64) -> Rect {
        Rect::from_ltrb(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }
}

/// Sine and cosine of an angle in degrees, exact at multiples of 90.
pub fn sin_cos_deg(deg: f64) -> (f64, f64) {
    let reduced = deg.rem_euclid(360.0);
    if reduced == 0.0 {
        (0.0, 1.0)
    } else if reduced == 90.0 {
        (1.0, 0.0)
    } else if reduced == 180.0 {
        (0.0, -1.0)
    } else if reduced == 270.0 {
        (-1.0, 0.0)
    } else {
        reduced.to_radians().sin_cos()
    }
}

/// 2D affine map: `x' = sx*x + kx*y + tx`, `y' = ky*x + sy*y + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub sx: f64,
    pub kx: f64,
    pub ky: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        sx: 1.0,
        kx: 0.0,
        ky: 0.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            tx: dx,
            ty: dy,
            ..Self::IDENTITY
        }
    }

    /// Counter-clockwise rotation by `deg` degrees about `about`, as seen on
    /// screen. The raster is y-down, so this is the matrix rotation by
    /// `-deg`. Every rotation in the crate is built here.
    pub fn rotation(deg: f64, about: Point) -> Self {
        let (sin, cos) = sin_cos_deg(-deg);
        Self {
            sx: cos,
            kx: -sin,
            ky: sin,
            sy: cos,
            tx: about.x - cos * about.x + sin * about.y,
            ty: about.y - sin * about.x - cos * about.y,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.sx * p.x + self.kx * p.y + self.tx,
            self.ky * p.x + self.sy * p.y + self.ty,
        )
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            sx: next.sx * self.sx + next.kx * self.ky,
            kx: next.sx * self.kx + next.kx * self.sy,
            ky: next.ky * self.sx + next.sy * self.ky,
            sy: next.ky * self.kx + next.sy * self.sy,
            tx: next.sx * self.tx + next.kx * self.ty + next.tx,
            ty: next.ky * self.tx + next.sy * self.ty + next.ty,
        }
    }
}

/// Unit vector at `deg` degrees counter-clockwise from 3 o'clock.
pub fn direction(deg: f64) -> Point {
    Affine::rotation(deg, Point::ORIGIN).apply(Point::new(1.0, 0.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

impl Segment {
    fn transformed(&self, m: &Affine) -> Segment {
        match *self {
            Segment::MoveTo(p) => Segment::MoveTo(m.apply(p)),
            Segment::LineTo(p) => Segment::LineTo(m.apply(p)),
            Segment::QuadTo(c, p) => Segment::QuadTo(m.apply(c), m.apply(p)),
            Segment::CubicTo(c1, c2, p) => Segment::CubicTo(m.apply(c1), m.apply(c2), m.apply(p)),
            Segment::Close => Segment::Close,
        }
    }
}

/// A set of closed contours.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    segments: Vec<Segment>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn move_to(&mut self, p: Point) {
        self.segments.push(Segment::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.segments.push(Segment::LineTo(p));
    }

    pub fn quad_to(&mut self, control: Point, p: Point) {
        self.segments.push(Segment::QuadTo(control, p));
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.segments.push(Segment::CubicTo(c1, c2, p));
    }

    pub fn close(&mut self) {
        self.segments.push(Segment::Close);
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Point]) -> Self {
        let mut outline = Self::new();
        if let Some((first, rest)) = points.split_first() {
            outline.move_to(*first);
            for p in rest {
                outline.line_to(*p);
            }
            outline.close();
        }
        outline
    }

    pub fn rect(rect: Rect) -> Self {
        Self::polygon(&[
            Point::new(rect.left, rect.top),
            Point::new(rect.right, rect.top),
            Point::new(rect.right, rect.bottom),
            Point::new(rect.left, rect.bottom),
        ])
    }

    /// Ellipse inscribed in `rect`, starting at 3 o'clock.
    pub fn oval(rect: Rect) -> Self {
        let center = Point::new(rect.center_x(), rect.center_y());
        let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
        let mut outline = Self::new();
        outline.move_to(Point::new(rect.right, center.y));
        outline.arc_to(center, rx, ry, 0.0, 360.0);
        outline.close();
        outline
    }

    /// Elliptical arc around `center` from `start` sweeping `sweep` degrees
    /// counter-clockwise. The current point must already be the arc start.
    pub fn arc_to(&mut self, center: Point, rx: f64, ry: f64, start: f64, sweep: f64) {
        let pieces = (sweep.abs() / 90.0).ceil().max(1.0) as usize;
        let step = sweep / pieces as f64;
        let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan();
        let on_ellipse = |d: Point| Point::new(center.x + rx * d.x, center.y + ry * d.y);
        let tangent = |deg: f64| {
            let t = direction(deg + 90.0);
            Point::new(rx * t.x * k, ry * t.y * k)
        };
        for i in 0..pieces {
            let from = start + step * i as f64;
            let to = from + step;
            let p0 = on_ellipse(direction(from));
            let p1 = on_ellipse(direction(to));
            let (t0, t1) = (tangent(from), tangent(to));
            self.cubic_to(
                Point::new(p0.x + t0.x, p0.y + t0.y),
                Point::new(p1.x - t1.x, p1.y - t1.y),
                p1,
            );
        }
    }

    pub fn extend(&mut self, other: &Outline) {
        self.segments.extend_from_slice(&other.segments);
    }

    pub fn extend_transformed(&mut self, other: &Outline, m: &Affine) {
        self.segments
            .extend(other.segments.iter().map(|segment| segment.transformed(m)));
    }

    pub fn transformed(&self, m: &Affine) -> Outline {
        let mut outline = Outline::new();
        outline.extend_transformed(self, m);
        outline
    }

    /// Smallest rectangle enclosing the outline, curves included (control
    /// points only count where the curve actually reaches). `None` when there
    /// are no segments.
    pub fn tight_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let mut include = |p: Point| {
            bounds = Some(match bounds {
                Some(mut rect) => {
                    rect.include(p);
                    rect
                }
                None => Rect::at(p),
            });
        };
        let mut current = Point::ORIGIN;
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) | Segment::LineTo(p) => {
                    include(p);
                    current = p;
                }
                Segment::QuadTo(c, p) => {
                    for t in quad_extrema(current, c, p) {
                        include(quad_at(current, c, p, t));
                    }
                    include(p);
                    current = p;
                }
                Segment::CubicTo(c1, c2, p) => {
                    for t in cubic_extrema(current, c1, c2, p) {
                        include(cubic_at(current, c1, c2, p, t));
                    }
                    include(p);
                    current = p;
                }
                Segment::Close => {}
            }
        }
        bounds
    }

    /// Path for the rasterizer, translated by `m`. `None` for outlines with
    /// nothing to fill.
    pub fn to_path(&self, m: &Affine) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for segment in &self.segments {
            match segment.transformed(m) {
                Segment::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
                Segment::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
                Segment::QuadTo(c, p) => {
                    builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32)
                }
                Segment::CubicTo(c1, c2, p) => builder.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                ),
                Segment::Close => builder.close(),
            }
        }
        builder.finish()
    }
}

fn quad_at(p0: Point, c: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * c.x + t * t * p1.x,
        mt * mt * p0.y + 2.0 * mt * t * c.y + t * t * p1.y,
    )
}

fn cubic_at(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}

fn quad_extrema(p0: Point, c: Point, p1: Point) -> Vec<f64> {
    let axis = |a: f64, b: f64, e: f64| {
        let denominator = a - 2.0 * b + e;
        if denominator == 0.0 {
            None
        } else {
            Some((a - b) / denominator)
        }
    };
    [axis(p0.x, c.x, p1.x), axis(p0.y, c.y, p1.y)]
        .into_iter()
        .flatten()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .collect()
}

fn cubic_extrema(p0: Point, c1: Point, c2: Point, p1: Point) -> Vec<f64> {
    let mut roots = Vec::with_capacity(4);
    for (a0, a1, a2, a3) in [(p0.x, c1.x, c2.x, p1.x), (p0.y, c1.y, c2.y, p1.y)] {
        // derivative: a t^2 + b t + c
        let a = 3.0 * (-a0 + 3.0 * a1 - 3.0 * a2 + a3);
        let b = 6.0 * (a0 - 2.0 * a1 + a2);
        let c = 3.0 * (a1 - a0);
        solve_quadratic(a, b, c, &mut roots);
    }
    roots.retain(|t| *t > 0.0 && *t < 1.0);
    roots
}

fn solve_quadratic(a: f64, b: f64, c: f64, roots: &mut Vec<f64>) {
    const EPSILON: f64 = 1e-12;
    if a.abs() < EPSILON {
        if b.abs() >= EPSILON {
            roots.push(-c / b);
        }
        return;
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return;
    }
    let root = discriminant.sqrt();
    roots.push((-b + root) / (2.0 * a));
    roots.push((-b - root) / (2.0 * a));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::from_ltrb(0.0, -20.0, 10.0, -10.0);
        assert!(r.contains(Point::new(0.0, -10.0)));
        assert!(r.contains(Point::new(5.0, -15.0)));
        assert!(!r.contains(Point::new(0.0, 0.0)));
        assert_eq!(r.outset(5.0), Rect::from_ltrb(-5.0, -25.0, 15.0, -5.0));
    }

    #[test]
    fn test_rect_outline_bounds() {
        let bounds = Outline::rect(Rect::from_wh(10.0, 20.0)).tight_bounds().unwrap();
        assert_eq!(bounds, Rect::from_wh(10.0, 20.0));
    }

    #[test]
    fn test_empty_outline_has_no_bounds() {
        assert_eq!(Outline::new().tight_bounds(), None);
        assert!(Outline::new().to_path(&Affine::IDENTITY).is_none());
    }

    #[test]
    fn test_rotation_is_counter_clockwise_on_screen() {
        // 3 o'clock turns to 12 o'clock, which is up in a y-down space
        assert_eq!(direction(90.0), Point::new(0.0, -1.0));
        assert_eq!(direction(180.0), Point::new(-1.0, 0.0));
        assert_eq!(direction(-90.0), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_rotation_about_point_keeps_it_fixed() {
        let about = Point::new(5.0, 7.0);
        let m = Affine::rotation(33.0, about);
        assert!(close_to(m.apply(about), about));
    }

    #[test]
    fn test_full_turn_is_identity() {
        let m = Affine::rotation(360.0, Point::new(3.0, 4.0));
        assert_eq!(m.apply(Point::new(10.0, -2.0)), Point::new(10.0, -2.0));
    }

    #[test]
    fn test_then_composes_in_order() {
        let m = Affine::translation(1.0, 0.0).then(&Affine::rotation(90.0, Point::ORIGIN));
        assert!(close_to(m.apply(Point::ORIGIN), Point::new(0.0, -1.0)));
    }

    #[test]
    fn test_oval_bounds_are_tight() {
        let bounds = Outline::oval(Rect::from_wh(40.0, 20.0)).tight_bounds().unwrap();
        assert!((bounds.width() - 40.0).abs() < 1e-9);
        assert!((bounds.height() - 20.0).abs() < 1e-9);
        assert!(bounds.left.abs() < 1e-9 && bounds.top.abs() < 1e-9);
    }

    #[test]
    fn test_half_arc_bounds() {
        let mut outline = Outline::new();
        outline.move_to(Point::new(20.0, 10.0));
        outline.arc_to(Point::new(10.0, 10.0), 10.0, 10.0, 0.0, 180.0);
        outline.close();
        let bounds = outline.tight_bounds().unwrap();
        assert!((bounds.top - 0.0).abs() < 1e-6);
        assert!((bounds.bottom - 10.0).abs() < 1e-9);
        assert!((bounds.width() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_transformed_rect_rotates_bounds() {
        let outline = Outline::rect(Rect::from_wh(10.0, 20.0));
        let rotated = outline.transformed(&Affine::rotation(90.0, Point::new(5.0, 10.0)));
        let bounds = rotated.tight_bounds().unwrap();
        assert!((bounds.width() - 20.0).abs() < 1e-9);
        assert!((bounds.height() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_sin_cos_reduces_angle() {
        assert_eq!(sin_cos_deg(450.0), (1.0, 0.0));
        assert_eq!(sin_cos_deg(-180.0), (0.0, -1.0));
    }
}
