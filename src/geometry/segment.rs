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

/// Result of intersecting two closed segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    None,
    /// A single shared point. For proper crossings this is the rounded
    /// construction, clamped into both segments' bounding boxes.
    Point(Point2),
    /// Collinear segments sharing a piece of positive length.
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub a: Point2,
    pub b: Point2,
}

impl Segment2 {
    pub fn new(a: &Point2, b: &Point2) -> Self {
        Self { a: *a, b: *b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(&self.b)
    }

    pub fn bbox(&self) -> Aabb2 {
        Aabb2::from_points(&self.a, &self.b)
    }

    pub fn inverse(&self) -> Self {
        Self::new(&self.b, &self.a)
    }

    /// Exact test: `p` lies on the closed segment.
    pub fn is_point_on(&self, p: &Point2) -> bool {
        orient2d(&self.a, &self.b, p) == 0 && self.bbox().contains(p)
    }

    /// Parameter of the projection of `p` on the supporting line, 0 at `a`
    /// and 1 at `b`.
    pub fn project(&self, p: &Point2) -> f64 {
        let d = &self.b - &self.a;
        let len2 = d.dot(&d);
        if len2 == 0.0 {
            return 0.0;
        }
        (p - &self.a).dot(&d) / len2
    }

    /// Classifies the intersection with `other` using exact orientation
    /// signs. Only the crossing point of a proper intersection is rounded.
    pub fn intersect(&self, other: &Segment2) -> SegmentIntersection {
        if !self.bbox().intersects(&other.bbox()) {
            return SegmentIntersection::None;
        }
        let (a, b, c, d) = (&self.a, &self.b, &other.a, &other.b);
        let o1 = orient2d(a, b, c);
        let o2 = orient2d(a, b, d);
        if o1 == 0 && o2 == 0 {
            return self.collinear_overlap(other);
        }
        let o3 = orient2d(c, d, a);
        let o4 = orient2d(c, d, b);
        if o1 * o2 > 0 || o3 * o4 > 0 {
            return SegmentIntersection::None;
        }
        if o1 == 0 {
            return SegmentIntersection::Point(*c);
        }
        if o2 == 0 {
            return SegmentIntersection::Point(*d);
        }
        if o3 == 0 {
            return SegmentIntersection::Point(*a);
        }
        if o4 == 0 {
            return SegmentIntersection::Point(*b);
        }

        let r = b - a;
        let s = d - c;
        let t = (c - a).cross(&s) / r.cross(&s);
        let x = a.lerp(b, t);
        let x = self.bbox().clamp(&x);
        SegmentIntersection::Point(other.bbox().clamp(&x))
    }

    fn collinear_overlap(&self, other: &Segment2) -> SegmentIntersection {
        let axis = self.bbox().union(&other.bbox()).longest_axis();
        let key = |p: &Point2| if axis == 0 { p.x } else { p.y };
        let (lo1, hi1) = minmax(key(&self.a), key(&self.b));
        let (lo2, hi2) = minmax(key(&other.a), key(&other.b));
        let lo = lo1.max(lo2);
        let hi = hi1.min(hi2);
        if lo > hi {
            return SegmentIntersection::None;
        }
        if lo < hi {
            return SegmentIntersection::Overlap;
        }
        // touching at a single endpoint
        [self.a, self.b]
            .into_iter()
            .find(|p| *p == other.a || *p == other.b)
            .map_or(SegmentIntersection::None, SegmentIntersection::Point)
    }
}

fn minmax(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
