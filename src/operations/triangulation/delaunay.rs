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

use ahash::AHashMap;
use tracing::debug;

use crate::error::{Result, check_finite};
use crate::geometry::{Aabb2, Point2};
use crate::kernel::{incircle, orient2d};
use crate::mesh::{HalfEdgeProperty, Mesh, PropertyMap};
use crate::operations::triangulation::{CdtOptions, TriangulationQuery};

/// Constrained Delaunay triangulation of a dynamic point set.
#[derive(Debug, Clone)]
pub struct Cdt {
    pub(crate) mesh: Mesh,
    pub(crate) is_outer: HalfEdgeProperty<bool>,
    pub(crate) is_constraint: HalfEdgeProperty<bool>,
    pub(crate) color: HalfEdgeProperty<u32>,
    pub(crate) in_flip_queue: HalfEdgeProperty<bool>,
    pub(crate) flip_queue: Vec<usize>,
    pub(crate) vertex_index: AHashMap<Point2, usize>,
    pub(crate) has_area: bool,
    pub(crate) options: CdtOptions,
}

impl Default for Cdt {
    fn default() -> Self {
        Self::new(CdtOptions::default())
    }
}

impl TriangulationQuery for Cdt {
    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn is_outer(&self, he: usize) -> bool {
        self.is_outer[he]
    }

    fn is_constraint(&self, he: usize) -> bool {
        self.is_constraint[he]
    }

    fn color(&self, he: usize) -> u32 {
        self.color[he]
    }
}

impl Cdt {
    pub fn new(options: CdtOptions) -> Self {
        Self {
            mesh: Mesh::new(),
            is_outer: PropertyMap::new(false),
            is_constraint: PropertyMap::new(false),
            color: PropertyMap::new(0),
            in_flip_queue: PropertyMap::new(false),
            flip_queue: Vec::new(),
            vertex_index: AHashMap::new(),
            has_area: false,
            options,
        }
    }

    /// Builds the Delaunay triangulation of `points` by divide and conquer.
    /// Duplicate points collapse to one vertex.
    pub fn from_points(points: &[Point2]) -> Result<Self> {
        Self::from_points_with_options(points, CdtOptions::default())
    }

    pub fn from_points_with_options(points: &[Point2], options: CdtOptions) -> Result<Self> {
        let mut cdt = Cdt::new(options);
        let mut ids = Vec::with_capacity(points.len());
        for p in points {
            check_finite(p)?;
            if !cdt.vertex_index.contains_key(p) {
                let v = cdt.mesh.add_vertex(*p);
                cdt.vertex_index.insert(*p, v);
                ids.push(v);
            }
        }
        cdt.triangulate_range(&mut ids);
        cdt.rebuild_outer_flags();
        debug!(
            vertices = ids.len(),
            triangles = cdt.num_triangles(),
            "built Delaunay triangulation"
        );
        Ok(cdt)
    }

    pub fn options(&self) -> &CdtOptions {
        &self.options
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_index.len()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.mesh.num_half_edges() / 2
    }

    /// True once the vertices span a region of positive area.
    pub fn has_area(&self) -> bool {
        self.has_area
    }

    pub fn vertex_at(&self, p: &Point2) -> Option<usize> {
        self.vertex_index.get(p).copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.mesh.vertex_ids()
    }

    pub fn set_color(&mut self, he: usize, color: u32) {
        self.color.set(he, color);
    }

    /// The left face of `he` is a counter-clockwise triangle.
    pub(crate) fn is_triangle(&self, he: usize) -> bool {
        let m = &self.mesh;
        let n = m.next(he);
        let nn = m.next(n);
        n != he
            && nn != he
            && m.next(nn) == he
            && orient2d(m.source_point(he), m.target_point(he), m.target_point(n)) > 0
    }

    /// Vertex ids of every triangle, counter-clockwise.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.triangle_handles()
            .into_iter()
            .map(|h| {
                let n = self.mesh.next(h);
                [self.mesh.source(h), self.mesh.target(h), self.mesh.target(n)]
            })
            .collect()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangle_handles().len()
    }

    /// Hull vertices in counter-clockwise order. For a collinear chain this is
    /// the chain walked from one end to the other and back.
    pub fn hull(&self) -> Vec<usize> {
        let Some(start) = self.mesh.half_edge_ids().find(|&h| self.is_outer[h]) else {
            return self.mesh.vertex_ids().collect();
        };
        let mut out: Vec<usize> = self
            .mesh
            .circular_list(start)
            .into_iter()
            .map(|h| self.mesh.source(h))
            .collect();
        out.reverse();
        out
    }

    /// Every non-constraint edge between two triangles is locally Delaunay.
    pub fn is_delaunay(&self) -> bool {
        self.mesh.half_edge_ids().all(|e| {
            let t = e ^ 1;
            if self.is_outer[e] || self.is_outer[t] || self.is_constraint[e] {
                return true;
            }
            let m = &self.mesh;
            let d = m.target_point(m.next(t));
            incircle(
                m.source_point(e),
                m.target_point(e),
                m.target_point(m.next(e)),
                d,
            ) <= 0
        })
    }

    /// Panics if the mesh links are broken or a face is neither a triangle
    /// nor exterior.
    pub fn validate(&self) {
        self.mesh.validate_connectivity();
        for h in self.mesh.half_edge_ids() {
            if !self.is_outer[h] {
                assert!(self.is_triangle(h), "interior half-edge {h} is not on a triangle");
            }
            if self.is_constraint[h] {
                assert!(self.is_constraint[h ^ 1], "constraint flag of {h} is one-sided");
            }
        }
    }

    fn clear_flags(&mut self, e: usize) {
        for h in [e, e ^ 1] {
            self.is_outer.reset(h);
            self.is_constraint.reset(h);
            self.color.reset(h);
        }
    }

    pub(crate) fn add_edge(&mut self, u: usize, v: usize) -> usize {
        let e = self.mesh.add_edge(u, v);
        self.clear_flags(e);
        e
    }

    pub(crate) fn join_edge(&mut self, a: usize, b: usize) -> usize {
        let e = self.mesh.join_edge(a, b);
        self.clear_flags(e);
        e
    }

    pub(crate) fn join_vertex(&mut self, a: usize, v: usize) -> usize {
        let e = self.mesh.join_vertex(a, v);
        self.clear_flags(e);
        e
    }

    /// Splits `e` at `v` and copies the flags of both halves onto the new pair.
    pub(crate) fn split_edge(&mut self, e: usize, v: usize) -> usize {
        let f = self.mesh.split_edge(e, v);
        for (old, new) in [(e, f), (e ^ 1, f ^ 1)] {
            let outer = self.is_outer[old];
            let constraint = self.is_constraint[old];
            let color = self.color[old];
            self.is_outer.set(new, outer);
            self.is_constraint.set(new, constraint);
            self.color.set(new, color);
        }
        f
    }

    pub(crate) fn rebuild_outer_flags(&mut self) {
        let ids: Vec<usize> = self.mesh.half_edge_ids().collect();
        let mut has_area = false;
        for h in ids {
            let inner = self.is_triangle(h);
            has_area |= inner;
            self.is_outer.set(h, !inner);
        }
        self.has_area = has_area;
    }

    fn triangulate_range(&mut self, ids: &mut [usize]) {
        let n = ids.len();
        if n < 2 {
            return;
        }
        let axis = Aabb2::from_iter(ids.iter().map(|&v| self.mesh.position(v)))
            .map_or(0, |bb| bb.longest_axis());
        let mesh = &self.mesh;
        ids.sort_unstable_by(|&a, &b| split_order(axis, mesh.position(a), mesh.position(b)));

        match n {
            2 => {
                self.add_edge(ids[0], ids[1]);
            }
            3 => {
                let (a, b, c) = (ids[0], ids[1], ids[2]);
                let ab = self.add_edge(a, b);
                let bc = self.join_vertex(ab, c);
                let m = &self.mesh;
                match orient2d(m.position(a), m.position(b), m.position(c)) {
                    1 => {
                        self.join_edge(bc, ab);
                    }
                    -1 => {
                        self.join_edge(ab ^ 1, bc ^ 1);
                    }
                    _ => {}
                }
            }
            _ => {
                let mid = n / 2;
                let l = ids[mid - 1];
                let r = ids[mid];
                let (lo, hi) = ids.split_at_mut(mid);
                self.triangulate_range(lo);
                self.triangulate_range(hi);
                self.merge(l, r);
            }
        }
    }

    /// Outgoing half-edge of `v` whose left face is not a triangle.
    fn open_edge_at(&self, v: usize) -> usize {
        self.mesh
            .outgoing(v)
            .into_iter()
            .find(|&h| !self.is_triangle(h))
            .expect("extreme vertex of a sub-triangulation lies on its hull")
    }

    /// Stitches two separable triangulations whose closest extreme vertices
    /// are `l` (last of the left half) and `r` (first of the right half).
    fn merge(&mut self, l: usize, r: usize) {
        let mut ld = self.open_edge_at(l);
        let mut rd = self.mesh.prev(self.open_edge_at(r));

        // lower common tangent
        loop {
            let m = &self.mesh;
            let pl = m.source_point(ld);
            let pr = m.target_point(rd);
            if orient2d(pl, pr, m.target_point(ld)) < 0 {
                ld = m.next(ld);
            } else if orient2d(pl, pr, m.source_point(rd)) < 0 {
                rd = m.prev(rd);
            } else {
                break;
            }
        }

        let mut basel = self.join_edge(rd, ld) ^ 1;
        let valid = |m: &Mesh, base: usize, x: usize| {
            orient2d(m.source_point(base), m.target_point(base), m.target_point(x)) > 0
        };

        loop {
            let pl = *self.mesh.source_point(basel);
            let pr = *self.mesh.target_point(basel);

            let mut lcand = self.mesh.rot_ccw(basel);
            if valid(&self.mesh, basel, lcand) {
                loop {
                    let nx = self.mesh.rot_ccw(lcand);
                    let m = &self.mesh;
                    if valid(m, basel, nx)
                        && incircle(&pl, &pr, m.target_point(lcand), m.target_point(nx)) > 0
                    {
                        self.mesh.erase_edge(lcand);
                        lcand = nx;
                    } else {
                        break;
                    }
                }
            }

            let mut rcand = self.mesh.next(basel);
            if valid(&self.mesh, basel, rcand) {
                loop {
                    let nx = self.mesh.rot_cw(rcand);
                    let m = &self.mesh;
                    if valid(m, basel, nx)
                        && incircle(&pl, &pr, m.target_point(rcand), m.target_point(nx)) > 0
                    {
                        self.mesh.erase_edge(rcand);
                        rcand = nx;
                    } else {
                        break;
                    }
                }
            }

            let m = &self.mesh;
            let lv = valid(m, basel, lcand);
            let rv = valid(m, basel, rcand);
            if !lv && !rv {
                break;
            }
            let take_right = !lv
                || (rv
                    && incircle(m.target_point(lcand), &pl, &pr, m.target_point(rcand)) > 0);
            basel = if take_right {
                self.join_edge(rcand, basel) ^ 1
            } else {
                self.join_edge(basel, lcand ^ 1) ^ 1
            };
        }
    }
}

/// Lexicographic order along `axis`. The y order is the x order of the
/// plane turned by a quarter, so orientation signs keep their meaning.
fn split_order(axis: usize, a: &Point2, b: &Point2) -> Ordering {
    if axis == 0 {
        a.cmp(b)
    } else {
        a.y.partial_cmp(&b.y)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.x.partial_cmp(&a.x).unwrap_or(Ordering::Equal))
    }
}
