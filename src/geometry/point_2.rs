// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

use num_traits::ToPrimitive;

/// A point in the plane with `f64` coordinates.
///
/// Equality and hashing are by value (`-0.0` and `0.0` are the same point);
/// ordering is lexicographic on `(x, y)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a point from any primitive numeric pair. Values that cannot be
    /// represented as `f64` become NaN and are rejected by the triangulation.
    pub fn from_vals<V: ToPrimitive>(vals: [V; 2]) -> Self {
        let [x, y] = vals;
        Self {
            x: x.to_f64().unwrap_or(f64::NAN),
            y: y.to_f64().unwrap_or(f64::NAN),
        }
    }

    pub fn squared_distance(&self, other: &Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        self.squared_distance(other).sqrt()
    }

    pub fn cross(&self, other: &Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn lerp(&self, other: &Point2, t: f64) -> Point2 {
        Point2 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl PartialEq for Point2 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point2 {}

impl Hash for Point2 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // normalize -0.0
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
    }
}

impl PartialOrd for Point2 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point2 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .partial_cmp(&other.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal))
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<'a, 'b> Add<&'b Point2> for &'a Point2 {
    type Output = Point2;
    fn add(self, rhs: &'b Point2) -> Point2 {
        Point2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        &self + &rhs
    }
}

impl<'a, 'b> Sub<&'b Point2> for &'a Point2 {
    type Output = Point2;
    fn sub(self, rhs: &'b Point2) -> Point2 {
        Point2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        &self - &rhs
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;
    fn mul(self, s: f64) -> Point2 {
        Point2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Point2 { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::Point2;
    use std::collections::HashSet;

    #[test]
    fn signed_zero_is_one_point() {
        let a = Point2::new(0.0, -0.0);
        let b = Point2::new(-0.0, 0.0);
        assert_eq!(a, b);
        let set: HashSet<Point2> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn lexicographic_order() {
        let mut pts = vec![
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 1.0),
        ];
        pts.sort();
        assert_eq!(pts[0], Point2::new(0.0, 1.0));
        assert_eq!(pts[2], Point2::new(1.0, 0.0));
    }
}
