//! Points and vectors in the 2D plane.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The vector from `other` to `self`.
    pub fn offset_from(self, other: Point) -> Vector {
        Vector::new(Point::new(self.x - other.x, self.y - other.y))
    }
}

/// A vector, stored as its terminal point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub terminal_point: Point,
}

impl Vector {
    pub const fn new(terminal_point: Point) -> Self {
        Self { terminal_point }
    }

    pub fn dx(self) -> f64 {
        self.terminal_point.x
    }

    pub fn dy(self) -> f64 {
        self.terminal_point.y
    }
}

/// Basis vector along the x axis.
pub const I_HAT: Vector = Vector::new(Point::new(1.0, 0.0));
/// Basis vector along the y axis.
pub const J_HAT: Vector = Vector::new(Point::new(0.0, 1.0));

pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

pub fn vector(terminal_point: Point) -> Vector {
    Vector::new(terminal_point)
}

/// Translates `point` by `vector`, component by component.
pub fn translate(point: Point, vector: Vector) -> Point {
    Point::new(point.x + vector.dx(), point.y + vector.dy())
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(translate(self.terminal_point, other))
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        self + -other
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self * -1.0
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        Vector::new(Point::new(self.dx() * scalar, self.dy() * scalar))
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, vector: Vector) -> Point {
        translate(self, vector)
    }
}
