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

use crate::geometry::{Aabb2, Point2};
use crate::kernel::orient2d;

/// Shoelace area of an open ring, positive for counter-clockwise rings.
pub fn signed_area(ring: &[Point2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let p = &ring[i];
        let q = &ring[(i + 1) % n];
        acc += p.cross(q);
    }
    acc * 0.5
}

/// Even-odd point in ring test. Points on the boundary may go either way.
pub fn ring_contains(ring: &[Point2], p: &Point2) -> bool {
    let n = ring.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = &ring[i];
        let b = &ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Drops vertices where the ring goes straight on, and consecutive duplicates.
pub fn remove_collinear(ring: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(ring.len());
    for p in ring {
        if out.last() != Some(p) {
            out.push(*p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }

    let mut changed = true;
    while changed && out.len() >= 3 {
        changed = false;
        let n = out.len();
        for i in 0..n {
            let a = out[(i + n - 1) % n];
            let b = out[i];
            let c = out[(i + 1) % n];
            if orient2d(&a, &b, &c) == 0 {
                out.remove(i);
                changed = true;
                break;
            }
        }
    }
    out
}

/// A polygon with one outer ring and any number of holes.
///
/// Normalized polygons have a counter-clockwise outer ring and clockwise
/// holes; rings are stored open (the first point is not repeated).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonWithHoles {
    pub outer: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl PolygonWithHoles {
    pub fn new(outer: Vec<Point2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Self {
        Self { outer, holes }
    }

    /// Area enclosed by the outer ring minus the holes.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        signed_area(&self.outer).abs() - holes
    }

    pub fn normalized(mut self) -> Self {
        if signed_area(&self.outer) < 0.0 {
            self.outer.reverse();
        }
        for h in &mut self.holes {
            if signed_area(h) > 0.0 {
                h.reverse();
            }
        }
        self
    }

    pub fn bbox(&self) -> Option<Aabb2> {
        Aabb2::from_iter(self.outer.iter())
    }

    pub fn contains(&self, p: &Point2) -> bool {
        ring_contains(&self.outer, p) && !self.holes.iter().any(|h| ring_contains(h, p))
    }

    /// Every ring of the polygon, outer first.
    pub fn rings(&self) -> impl Iterator<Item = &Vec<Point2>> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, s: f64) -> Vec<Point2> {
        vec![
            Point2::new(x, y),
            Point2::new(x + s, y),
            Point2::new(x + s, y + s),
            Point2::new(x, y + s),
        ]
    }

    #[test]
    fn area_with_hole() {
        let p = PolygonWithHoles::with_holes(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)])
            .normalized();
        assert_eq!(p.area(), 15.0);
        assert!(signed_area(&p.holes[0]) < 0.0);
        assert!(!p.contains(&Point2::new(1.5, 1.5)));
        assert!(p.contains(&Point2::new(3.0, 3.0)));
    }

    #[test]
    fn straight_vertices_are_dropped() {
        let ring = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(remove_collinear(&ring).len(), 4);
    }
}
