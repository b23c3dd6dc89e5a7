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

use planar_arrangement::boolean::BooleanImpl;
use planar_arrangement::geometry::{Point2, signed_area};
use planar_arrangement::{
    ArrangementOptions, BooleanOp, PolygonWithHoles, UnionOptions, polygon_boolean, polygon_union,
};
use proptest::prelude::*;

fn p(x: f64, y: f64) -> Point2 {
    Point2::from_vals([x, y])
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> PolygonWithHoles {
    PolygonWithHoles::new(vec![p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)])
}

fn square(x: f64, y: f64, s: f64) -> PolygonWithHoles {
    rect(x, y, x + s, y + s)
}

fn total_area(polys: &[PolygonWithHoles]) -> f64 {
    polys.iter().map(|poly| poly.area()).sum()
}

fn run(a: &PolygonWithHoles, b: &PolygonWithHoles, op: BooleanOp) -> Vec<PolygonWithHoles> {
    polygon_boolean(
        std::slice::from_ref(a),
        std::slice::from_ref(b),
        op,
        ArrangementOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_intersection_of_offset_squares() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);
    let out = run(&a, &b, BooleanOp::Intersection);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].outer.len(), 4);
    assert!(out[0].holes.is_empty());
    assert_eq!(out[0].area(), 0.25);
    assert!(out[0].outer.contains(&p(0.5, 0.5)));
    assert!(out[0].outer.contains(&p(1.0, 1.0)));
}

#[test]
fn test_union_is_commutative() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);
    let ab = run(&a, &b, BooleanOp::Union);
    let ba = run(&b, &a, BooleanOp::Union);
    assert_eq!(ab.len(), 1);
    assert_eq!(ba.len(), 1);
    assert_eq!(ab[0].outer.len(), 8);
    assert_eq!(ab[0].area(), 1.75);
    assert_eq!(ba[0].area(), 1.75);
    assert!(signed_area(&ab[0].outer) > 0.0);
}

#[test]
fn test_difference_and_xor() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);

    assert!(run(&a, &a, BooleanOp::Difference).is_empty());

    let diff = run(&a, &b, BooleanOp::Difference);
    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].outer.len(), 6);
    assert_eq!(diff[0].area(), 0.75);

    // The two halves only touch at corners.
    let xor = run(&a, &b, BooleanOp::Xor);
    assert_eq!(xor.len(), 2);
    assert_eq!(total_area(&xor), 1.5);
}

#[test]
fn test_disjoint_operands() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(3.0, 0.0, 1.0);
    assert_eq!(run(&a, &b, BooleanOp::Union).len(), 2);
    assert!(run(&a, &b, BooleanOp::Intersection).is_empty());
    let diff = run(&a, &b, BooleanOp::Difference);
    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].area(), 1.0);
}

#[test]
fn test_disjoint_rectangles_union_area() {
    let a = rect(4.0, 2.0, 5.0, 3.0);
    let b = rect(2.0, 0.0, 5.0, 1.0);
    let union = run(&a, &b, BooleanOp::Union);
    assert_eq!(union.len(), 2);
    assert_eq!(total_area(&union), 4.0);
    assert!(run(&a, &b, BooleanOp::Intersection).is_empty());
    assert_eq!(total_area(&run(&b, &a, BooleanOp::Difference)), 3.0);
}

#[test]
fn test_union_with_holes() {
    let frame = PolygonWithHoles::with_holes(
        square(0.0, 0.0, 4.0).outer,
        vec![square(1.0, 1.0, 2.0).outer],
    );

    let island = square(1.5, 1.5, 1.0);
    let out = run(&frame, &island, BooleanOp::Union);
    assert_eq!(out.len(), 2);
    assert_eq!(total_area(&out), 13.0);
    assert!(run(&frame, &island, BooleanOp::Intersection).is_empty());

    let plug = square(1.0, 1.0, 2.0);
    let out = run(&frame, &plug, BooleanOp::Union);
    assert_eq!(out.len(), 1);
    assert!(out[0].holes.is_empty());
    assert_eq!(out[0].outer.len(), 4);
    assert_eq!(out[0].area(), 16.0);
}

#[test]
fn test_difference_cuts_hole() {
    let a = square(0.0, 0.0, 4.0);
    let b = square(1.0, 1.0, 2.0);
    let out = run(&a, &b, BooleanOp::Difference);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].holes.len(), 1);
    assert!(signed_area(&out[0].holes[0]) < 0.0);
    assert_eq!(out[0].area(), 12.0);
}

#[test]
fn test_clockwise_input_is_normalized() {
    let mut a = square(0.0, 0.0, 2.0);
    a.outer.reverse();
    let b = square(1.0, 0.0, 2.0);
    let out = a.boolean(&b, BooleanOp::Intersection).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].area(), 2.0);
}

#[test]
fn test_polygon_union_batches() {
    let mut polys: Vec<PolygonWithHoles> = (0..4).map(|i| square(0.5 * i as f64, 0.0, 1.0)).collect();
    polys.push(square(10.0, 0.0, 1.0));
    let options = UnionOptions {
        batch_size: 2,
        ..UnionOptions::default()
    };

    let out = polygon_union(&polys, &options).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(total_area(&out), 3.5);
    let strip = out.iter().find(|poly| poly.area() == 2.5).unwrap();
    assert_eq!(strip.outer.len(), 4);

    let same = polygon_union(&polys, &UnionOptions::default()).unwrap();
    assert_eq!(total_area(&same), 3.5);
}

#[test]
fn test_polygon_union_of_nothing() {
    assert!(polygon_union(&[], &UnionOptions::default()).unwrap().is_empty());
}

fn arb_rect() -> impl Strategy<Value = PolygonWithHoles> {
    (0i32..8, 0i32..8, 1i32..5, 1i32..5).prop_map(|(x, y, w, h)| {
        rect(x as f64, y as f64, (x + w) as f64, (y + h) as f64)
    })
}

proptest! {
    #[test]
    fn union_and_intersection_areas_add_up(a in arb_rect(), b in arb_rect()) {
        let union = total_area(&run(&a, &b, BooleanOp::Union));
        let inter = total_area(&run(&a, &b, BooleanOp::Intersection));
        prop_assert!((union + inter - a.area() - b.area()).abs() < 1e-9);

        let xor = total_area(&run(&a, &b, BooleanOp::Xor));
        prop_assert!((xor - (union - inter)).abs() < 1e-9);

        let ab = total_area(&run(&a, &b, BooleanOp::Difference));
        let ba = total_area(&run(&b, &a, BooleanOp::Difference));
        prop_assert!((ab + ba - xor).abs() < 1e-9);
    }
}
