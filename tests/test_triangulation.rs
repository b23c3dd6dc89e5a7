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

use planar_arrangement::geometry::{Point2, Segment2};
use planar_arrangement::{Cdt, CdtOptions, Error, Location, TriangulationQuery};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn p(x: f64, y: f64) -> Point2 {
    Point2::from_vals([x, y])
}

fn grid(n: usize) -> Vec<Point2> {
    let mut out = Vec::new();
    for i in 0..n {
        for j in 0..n {
            out.push(p(i as f64, j as f64));
        }
    }
    out
}

/// Wide rhombus whose Delaunay diagonal is the short vertical one.
fn rhombus() -> (Cdt, [Point2; 4]) {
    let pts = [p(0.0, 0.0), p(3.0, -1.0), p(6.0, 0.0), p(3.0, 1.0)];
    (Cdt::from_points(&pts).unwrap(), pts)
}

fn edge(cdt: &Cdt, a: &Point2, b: &Point2) -> Option<usize> {
    let u = cdt.vertex_at(a)?;
    let v = cdt.vertex_at(b)?;
    cdt.mesh().find_half_edge(u, v)
}

#[test]
fn test_unit_square() {
    let cdt = Cdt::from_points(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap();
    cdt.validate();
    assert!(cdt.has_area());
    assert_eq!(cdt.num_vertices(), 4);
    assert_eq!(cdt.num_triangles(), 2);
    assert_eq!(cdt.num_edges(), 5);
    assert_eq!(cdt.hull().len(), 4);
    assert!(cdt.is_delaunay());
}

#[test]
fn test_duplicates_collapse() {
    let cdt = Cdt::from_points(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0)]).unwrap();
    assert_eq!(cdt.num_vertices(), 3);
    assert_eq!(cdt.num_triangles(), 1);

    let mut cdt = cdt;
    let v = cdt.vertex_at(&p(1.0, 0.0)).unwrap();
    assert_eq!(cdt.insert(&p(1.0, 0.0)).unwrap(), v);
    assert_eq!(cdt.num_vertices(), 3);
}

#[test]
fn test_non_finite_point_is_rejected() {
    let mut cdt = Cdt::new(CdtOptions::default());
    let err = cdt.insert(&p(f64::NAN, 1.0)).unwrap_err();
    assert!(matches!(err, Error::NonFinitePoint { .. }));
    assert!(Cdt::from_points(&[p(0.0, 0.0), p(f64::INFINITY, 0.0)]).is_err());
    assert_eq!(cdt.num_vertices(), 0);
}

#[test]
fn test_collinear_chain() {
    let pts: Vec<Point2> = (0..5).map(|i| p(i as f64, 2.0 * i as f64)).collect();
    let mut cdt = Cdt::from_points(&pts).unwrap();
    cdt.validate();
    assert!(!cdt.has_area());
    assert_eq!(cdt.num_edges(), 4);
    assert_eq!(cdt.num_triangles(), 0);
    assert_eq!(cdt.hull().len(), 8);

    cdt.insert(&p(5.0, 0.0)).unwrap();
    cdt.validate();
    assert!(cdt.has_area());
    assert_eq!(cdt.num_triangles(), 4);
    assert!(cdt.is_delaunay());
}

#[test]
fn test_incremental_chain_extension() {
    let mut cdt = Cdt::new(CdtOptions::default());
    cdt.insert(&p(1.0, 1.0)).unwrap();
    cdt.insert(&p(3.0, 3.0)).unwrap();
    cdt.insert(&p(2.0, 2.0)).unwrap();
    cdt.insert(&p(0.0, 0.0)).unwrap();
    cdt.insert(&p(4.0, 4.0)).unwrap();
    cdt.validate();
    assert!(!cdt.has_area());
    assert_eq!(cdt.num_edges(), 4);
    assert!(edge(&cdt, &p(0.0, 0.0), &p(1.0, 1.0)).is_some());
    assert!(edge(&cdt, &p(2.0, 2.0), &p(3.0, 3.0)).is_some());
}

#[test]
fn test_locate() {
    let mut cdt = Cdt::new(CdtOptions::default());
    assert_eq!(cdt.locate(&p(0.0, 0.0)), Location::Disjoint);

    cdt.insert_all(&[p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0)]).unwrap();
    let v = cdt.vertex_at(&p(4.0, 0.0)).unwrap();
    assert_eq!(cdt.locate(&p(4.0, 0.0)), Location::Vertex(v));

    let Location::InFace(h) = cdt.locate(&p(1.0, 1.0)) else {
        panic!("point is inside the triangle");
    };
    assert!(!cdt.is_outer(h));

    let Location::OnEdge(h) = cdt.locate(&p(2.0, 0.0)) else {
        panic!("point is on the bottom edge");
    };
    let m = cdt.mesh();
    assert_eq!(m.position(m.source(h)).y, 0.0);
    assert_eq!(m.position(m.target(h)).y, 0.0);

    let Location::Outside(h) = cdt.locate(&p(5.0, 5.0)) else {
        panic!("point is outside the hull");
    };
    assert!(cdt.is_outer(h));
}

#[test]
fn test_erase_center_of_grid() {
    let mut cdt = Cdt::new(CdtOptions::default());
    cdt.insert_all(&grid(3)).unwrap();
    assert_eq!(cdt.num_triangles(), 8);

    assert!(cdt.erase_point(&p(1.0, 1.0)));
    assert!(!cdt.erase_point(&p(1.0, 1.0)));
    cdt.validate();
    assert!(cdt.is_delaunay());
    assert_eq!(cdt.num_vertices(), 8);
    assert_eq!(cdt.num_triangles(), 6);
    for v in cdt.vertices() {
        assert!(cdt.mesh().degree(v) >= 2);
    }
}

#[test]
fn test_erase_hull_vertex() {
    let mut cdt = Cdt::from_points(&grid(3)).unwrap();
    assert!(cdt.erase_point(&p(0.0, 0.0)));
    cdt.validate();
    assert!(cdt.is_delaunay());
    assert_eq!(cdt.num_vertices(), 8);
    // Hull becomes the pentagon-like boundary through (1,0) and (0,1).
    assert!(edge(&cdt, &p(1.0, 0.0), &p(0.0, 1.0)).is_some());
    assert_eq!(cdt.num_triangles(), 7);
}

#[test]
fn test_erase_down_to_chain() {
    let mut cdt = Cdt::from_points(&[p(0.0, 0.0), p(2.0, 0.0), p(1.0, 2.0), p(4.0, 0.0)]).unwrap();
    assert!(cdt.erase_point(&p(1.0, 2.0)));
    cdt.validate();
    assert!(!cdt.has_area());
    assert_eq!(cdt.num_edges(), 2);

    assert!(cdt.erase_point(&p(2.0, 0.0)));
    cdt.validate();
    assert_eq!(cdt.num_edges(), 1);
    assert!(edge(&cdt, &p(0.0, 0.0), &p(4.0, 0.0)).is_some());
}

#[test]
fn test_constraint_forces_edge() {
    let (mut cdt, [a, b, c, d]) = rhombus();
    assert!(edge(&cdt, &b, &d).is_some());
    assert!(edge(&cdt, &a, &c).is_none());

    cdt.insert_constraint(&a, &c, 1, 2).unwrap();
    cdt.validate();
    let h = edge(&cdt, &a, &c).expect("constraint edge exists");
    assert!(cdt.is_constraint(h));
    assert_eq!(cdt.color(h), 1);
    assert_eq!(cdt.color(h ^ 1), 2);
    assert!(edge(&cdt, &b, &d).is_none());
    assert_eq!(cdt.constraint_edges().len(), 1);
    assert!(cdt.is_delaunay());
}

#[test]
fn test_rectangle_diagonal_constraint() {
    let pts = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(0.0, 1.0)];
    for (s, t) in [(pts[0], pts[2]), (pts[1], pts[3])] {
        let mut cdt = Cdt::from_points(&pts).unwrap();
        cdt.insert_constraint(&s, &t, 1, 2).unwrap();
        cdt.validate();
        assert_eq!(cdt.num_triangles(), 2);
        assert_eq!(cdt.constraint_edges().len(), 1);
        let h = edge(&cdt, &s, &t).expect("diagonal is an edge");
        assert!(cdt.is_constraint(h));
        assert_eq!(cdt.color(h), 1);
        assert_eq!(cdt.color(h ^ 1), 2);
    }
}

#[test]
fn test_constraint_across_many_edges() {
    let mut pts = vec![p(0.0, 0.0), p(10.0, 0.0)];
    for i in 1..10 {
        pts.push(p(i as f64, 0.3));
        pts.push(p(i as f64, -0.3));
    }
    let mut cdt = Cdt::from_points(&pts).unwrap();
    let triangles = cdt.num_triangles();
    assert!(edge(&cdt, &pts[0], &pts[1]).is_none());

    cdt.insert_constraint(&pts[0], &pts[1], 1, 0).unwrap();
    cdt.validate();
    assert!(cdt.is_delaunay());
    assert_eq!(cdt.num_triangles(), triangles);
    assert_eq!(cdt.constraint_edges().len(), 1);
    let h = edge(&cdt, &pts[0], &pts[1]).unwrap();
    assert!(cdt.is_constraint(h));
    // Nothing crosses the horizontal axis any more.
    for [a, b, c] in cdt.triangles() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let (pu, pv) = (cdt.point(u), cdt.point(v));
            assert!(pu.y * pv.y >= 0.0, "edge {pu} - {pv} crosses the constraint");
        }
    }
}

#[test]
fn test_constraint_conflict_leaves_edges() {
    let (mut cdt, [a, b, c, d]) = rhombus();
    cdt.insert_constraint(&a, &c, 1, 0).unwrap();
    assert!(cdt.is_cross(&b, &d));
    assert!(!cdt.is_cross(&a, &b));

    let err = cdt.insert_constraint(&b, &d, 1, 0).unwrap_err();
    assert_eq!(err, Error::ConstraintConflict { from: b, to: d });
    cdt.validate();
    assert_eq!(cdt.constraint_edges().len(), 1);
    assert!(edge(&cdt, &a, &c).is_some());
}

#[test]
fn test_constraint_through_vertex_and_removal() {
    let mut cdt = Cdt::from_points(&grid(3)).unwrap();
    cdt.insert_constraint(&p(0.0, 0.0), &p(2.0, 2.0), 4, 0).unwrap();
    cdt.validate();
    assert_eq!(cdt.constraint_edges().len(), 2);
    let h = edge(&cdt, &p(1.0, 1.0), &p(2.0, 2.0)).unwrap();
    assert_eq!(cdt.color(h), 4);

    assert!(!cdt.remove_constraint(&p(0.0, 0.0), &p(2.0, 0.0)));
    assert!(cdt.remove_constraint(&p(0.0, 0.0), &p(2.0, 2.0)));
    assert!(cdt.constraint_edges().is_empty());
    cdt.validate();
    assert!(cdt.is_delaunay());
}

#[test]
fn test_remove_constraint_restores_delaunay() {
    let (mut cdt, [a, b, c, d]) = rhombus();
    cdt.insert_constraint(&a, &c, 1, 1).unwrap();
    assert!(cdt.remove_constraint(&a, &c));
    cdt.validate();
    assert!(edge(&cdt, &b, &d).is_some());
    assert!(cdt.constraint_edges().is_empty());
}

#[test]
fn test_insert_on_constraint_splits_it() {
    let (mut cdt, [a, _, c, _]) = rhombus();
    cdt.insert_constraint(&a, &c, 1, 2).unwrap();
    cdt.insert(&p(3.0, 0.0)).unwrap();
    cdt.validate();
    assert_eq!(cdt.constraint_edges().len(), 2);
    let h = edge(&cdt, &p(3.0, 0.0), &c).unwrap();
    assert!(cdt.is_constraint(h));
    assert_eq!(cdt.color(h), 1);
    assert_eq!(cdt.color(h ^ 1), 2);
}

#[test]
fn test_erase_constraint_endpoint() {
    let (mut cdt, [a, _, c, _]) = rhombus();
    cdt.insert_constraint(&a, &c, 1, 0).unwrap();
    assert!(cdt.erase_point(&a));
    cdt.validate();
    assert!(cdt.constraint_edges().is_empty());
    assert!(cdt.is_delaunay());
}

#[test]
fn test_seeded_point_cloud() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut cloud = |n: usize| -> Vec<Point2> {
        (0..n)
            .map(|_| p(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0)))
            .collect()
    };
    let base = cloud(500);
    let extra = cloud(200);

    let mut cdt = Cdt::from_points(&base).unwrap();
    cdt.validate();
    assert!(cdt.is_delaunay());
    assert_eq!(cdt.num_vertices(), 500);
    // Euler: 2n - h - 2 triangles for n points with h on the hull.
    assert_eq!(cdt.num_triangles(), 2 * 500 - cdt.hull().len() - 2);

    cdt.insert_all(&extra).unwrap();
    for q in base.iter().step_by(5) {
        assert!(cdt.erase_point(q));
    }
    cdt.validate();
    assert!(cdt.is_delaunay());
    assert_eq!(cdt.num_vertices(), 600);

    for q in extra.iter().step_by(7) {
        assert!(matches!(cdt.locate(q), Location::Vertex(_)));
    }
}

proptest! {
    #[test]
    fn random_inserts_and_erases_stay_delaunay(
        coords in prop::collection::vec((-20i32..20, -20i32..20), 1..60),
        erase_every in 2usize..5,
    ) {
        let pts: Vec<Point2> = coords.iter().map(|&(x, y)| p(x as f64, y as f64)).collect();
        let mut cdt = Cdt::new(CdtOptions::default());
        cdt.insert_all(&pts).unwrap();
        cdt.validate();
        prop_assert!(cdt.is_delaunay());

        for (i, q) in pts.iter().enumerate() {
            if i % erase_every == 0 {
                cdt.erase_point(q);
            }
        }
        cdt.validate();
        prop_assert!(cdt.is_delaunay());
        for v in cdt.vertices() {
            prop_assert!(cdt.num_vertices() == 1 || cdt.mesh().degree(v) > 0);
        }
    }

    #[test]
    fn divide_and_conquer_matches_incremental_size(
        coords in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 3..80),
    ) {
        let pts: Vec<Point2> = coords.iter().map(|&(x, y)| p(x, y)).collect();
        let batch = Cdt::from_points(&pts).unwrap();
        let mut incremental = Cdt::new(CdtOptions::default());
        incremental.insert_all(&pts).unwrap();
        batch.validate();
        incremental.validate();
        prop_assert!(batch.is_delaunay());
        prop_assert_eq!(batch.num_vertices(), incremental.num_vertices());
        prop_assert_eq!(batch.num_edges(), incremental.num_edges());
        prop_assert_eq!(batch.hull().len(), incremental.hull().len());
    }

    #[test]
    fn random_constraints_keep_constrained_delaunay(
        coords in prop::collection::vec((-20i32..20, -20i32..20), 3..40),
        pairs in prop::collection::vec((0usize..40, 0usize..40), 1..12),
    ) {
        let pts: Vec<Point2> = coords.iter().map(|&(x, y)| p(x as f64, y as f64)).collect();
        let mut cdt = Cdt::from_points(&pts).unwrap();
        let mut placed = Vec::new();
        for (i, j) in pairs {
            let (s, t) = (pts[i % pts.len()], pts[j % pts.len()]);
            if s == t || cdt.is_cross(&s, &t) {
                continue;
            }
            cdt.insert_constraint(&s, &t, 1, 2).unwrap();
            placed.push((s, t));
        }
        cdt.validate();
        prop_assert!(cdt.is_delaunay());

        for (s, t) in placed {
            let seg = Segment2::new(&s, &t);
            let mut on: Vec<Point2> = cdt
                .vertices()
                .map(|v| *cdt.point(v))
                .filter(|q| seg.is_point_on(q))
                .collect();
            on.sort_by(|a, b| seg.project(a).total_cmp(&seg.project(b)));
            for w in on.windows(2) {
                let h = edge(&cdt, &w[0], &w[1]);
                prop_assert!(h.is_some_and(|h| cdt.is_constraint(h)), "piece {} - {} is missing", w[0], w[1]);
            }
        }
    }
}
