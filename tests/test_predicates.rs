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

use planar_arrangement::geometry::{
    Point2, PolygonWithHoles, Segment2, SegmentIntersection, remove_collinear, ring_contains,
    signed_area,
};
use planar_arrangement::kernel::{
    are_collinear, incircle, is_point_on_segment, orient2d, point_in_triangle,
};

fn p(x: f64, y: f64) -> Point2 {
    Point2::from_vals([x, y])
}

#[test]
fn test_orient2d_signs() {
    assert_eq!(orient2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)), 1);
    assert_eq!(orient2d(&p(0.0, 0.0), &p(0.0, 1.0), &p(1.0, 0.0)), -1);
    assert_eq!(orient2d(&p(0.0, 0.0), &p(1.0, 1.0), &p(3.0, 3.0)), 0);
}

#[test]
fn test_orient2d_exact_for_tiny_offsets() {
    let a = p(0.5, 0.5);
    let b = p(12.0, 12.0);
    let c = p(24.0, 24.0);
    assert_eq!(orient2d(&a, &b, &c), 0);

    let nudged = p(24.0, f64::from_bits(24.0f64.to_bits() + 1));
    assert_eq!(orient2d(&a, &b, &nudged), 1);

    let nudged = p(24.0, f64::from_bits(24.0f64.to_bits() - 1));
    assert_eq!(orient2d(&a, &b, &nudged), -1);
}

#[test]
fn test_orient2d_antisymmetric() {
    let pts = [p(0.1, 0.7), p(3.3, -1.2), p(-2.0, 5.5), p(1e-9, 1e9)];
    for a in &pts {
        for b in &pts {
            for c in &pts {
                assert_eq!(orient2d(a, b, c), -orient2d(b, a, c));
                assert_eq!(orient2d(a, b, c), orient2d(b, c, a));
            }
        }
    }
}

#[test]
fn test_incircle() {
    let a = p(0.0, 0.0);
    let b = p(1.0, 0.0);
    let c = p(0.0, 1.0);
    assert_eq!(incircle(&a, &b, &c, &p(0.5, 0.5)), 1);
    assert_eq!(incircle(&a, &b, &c, &p(5.0, 5.0)), -1);
    assert_eq!(incircle(&a, &b, &c, &p(1.0, 1.0)), 0);
    // Reversing the triangle flips the sign.
    assert_eq!(incircle(&a, &c, &b, &p(0.5, 0.5)), -1);
}

#[test]
fn test_point_helpers() {
    let a = p(0.0, 0.0);
    let b = p(2.0, 2.0);
    assert!(are_collinear(&a, &b, &p(-1.0, -1.0)));
    assert!(is_point_on_segment(&p(1.0, 1.0), &a, &b));
    assert!(is_point_on_segment(&b, &a, &b));
    assert!(!is_point_on_segment(&p(3.0, 3.0), &a, &b));
    assert!(!is_point_on_segment(&p(1.0, 1.1), &a, &b));

    let c = p(2.0, 0.0);
    assert!(point_in_triangle(&p(1.0, 0.5), &a, &c, &b));
    assert!(point_in_triangle(&p(1.0, 0.5), &a, &b, &c));
    assert!(point_in_triangle(&p(1.0, 0.0), &a, &c, &b));
    assert!(!point_in_triangle(&p(1.0, 1.5), &a, &c, &b));
}

#[test]
fn test_segment_intersection() {
    let s = Segment2::new(&p(0.0, 0.0), &p(2.0, 2.0));

    let cross = Segment2::new(&p(0.0, 2.0), &p(2.0, 0.0));
    assert_eq!(s.intersect(&cross), SegmentIntersection::Point(p(1.0, 1.0)));

    let touching = Segment2::new(&p(2.0, 2.0), &p(3.0, 0.0));
    assert_eq!(s.intersect(&touching), SegmentIntersection::Point(p(2.0, 2.0)));

    let overlap = Segment2::new(&p(1.0, 1.0), &p(5.0, 5.0));
    assert_eq!(s.intersect(&overlap), SegmentIntersection::Overlap);

    let end_to_end = Segment2::new(&p(2.0, 2.0), &p(4.0, 4.0));
    assert_eq!(s.intersect(&end_to_end), SegmentIntersection::Point(p(2.0, 2.0)));

    let apart = Segment2::new(&p(3.0, 3.0), &p(4.0, 4.0));
    assert_eq!(s.intersect(&apart), SegmentIntersection::None);

    let parallel = Segment2::new(&p(0.0, 1.0), &p(2.0, 3.0));
    assert_eq!(s.intersect(&parallel), SegmentIntersection::None);
}

#[test]
fn test_rounded_crossing_stays_in_both_boxes() {
    let s = Segment2::new(&p(0.0, 0.0), &p(1.0, 1e-12));
    let t = Segment2::new(&p(0.3, -1.0), &p(0.3000000001, 1.0));
    let SegmentIntersection::Point(x) = s.intersect(&t) else {
        panic!("segments cross");
    };
    assert!(s.bbox().contains(&x));
    assert!(t.bbox().contains(&x));
}

#[test]
fn test_polygon_helpers() {
    let ccw = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
    assert_eq!(signed_area(&ccw), 4.0);
    let cw: Vec<Point2> = ccw.iter().rev().copied().collect();
    assert_eq!(signed_area(&cw), -4.0);

    assert!(ring_contains(&ccw, &p(1.0, 1.0)));
    assert!(!ring_contains(&ccw, &p(3.0, 1.0)));

    let noisy = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(2.0, 2.0), p(0.0, 2.0)];
    assert_eq!(remove_collinear(&noisy).len(), 4);

    let hole = vec![p(0.5, 0.5), p(1.5, 0.5), p(1.5, 1.5), p(0.5, 1.5)];
    let poly = PolygonWithHoles::with_holes(cw, vec![hole]).normalized();
    assert!(signed_area(&poly.outer) > 0.0);
    assert!(signed_area(&poly.holes[0]) < 0.0);
    assert_eq!(poly.area(), 3.0);
    assert!(poly.contains(&p(0.25, 0.25)));
    assert!(!poly.contains(&p(1.0, 1.0)));
}
