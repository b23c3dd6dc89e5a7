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

use std::collections::VecDeque;

use ahash::AHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Point2;
use crate::kernel::{is_point_on_segment, orient2d};
use crate::mesh::Mesh;
use crate::operations::triangulation::{Cdt, Location, TriangulationQuery};

impl Cdt {
    /// A vertex close to `p`: the best of about √N random samples, refined by
    /// walking to closer neighbours until none is closer. `None` when empty.
    pub fn approximate_nearest_vertex(&self, p: &Point2) -> Option<usize> {
        let slots = self.mesh.vertices.len();
        if self.vertex_index.is_empty() {
            return None;
        }
        let seed = self.options.seed ^ p.x.to_bits() ^ p.y.to_bits().rotate_left(32);
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = (self.vertex_index.len() as f64).sqrt().ceil() as usize;

        let mut best: Option<(usize, f64)> = None;
        let mut tries = 0;
        while tries < 4 * samples.max(1) {
            tries += 1;
            let v = rng.random_range(0..slots);
            if self.mesh.is_vertex_removed(v) {
                continue;
            }
            let d = self.mesh.position(v).squared_distance(p);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((v, d));
            }
            if tries >= samples && best.is_some() {
                break;
            }
        }
        let (mut v, mut dist) = match best {
            Some(b) => b,
            None => {
                let v = self.mesh.vertex_ids().next()?;
                (v, self.mesh.position(v).squared_distance(p))
            }
        };

        loop {
            let mut improved = false;
            for w in self.mesh.neighbors(v) {
                let d = self.mesh.position(w).squared_distance(p);
                if d < dist {
                    v = w;
                    dist = d;
                    improved = true;
                }
            }
            if !improved {
                return Some(v);
            }
        }
    }

    /// Finds the vertex, edge or triangle containing `p`.
    pub fn locate(&self, p: &Point2) -> Location {
        if let Some(v) = self.vertex_at(p) {
            return Location::Vertex(v);
        }
        if self.vertex_index.len() < 2 {
            return Location::Disjoint;
        }
        if !self.has_area {
            return self.locate_in_chain(p);
        }

        let start = self
            .approximate_nearest_vertex(p)
            .and_then(|v| {
                self.mesh
                    .outgoing(v)
                    .into_iter()
                    .find(|&h| !self.is_outer[h])
            })
            .or_else(|| self.mesh.half_edge_ids().find(|&h| !self.is_outer[h]));
        let Some(start) = start else {
            return self.locate_brute_force(p);
        };
        self.walk(start, p)
            .unwrap_or_else(|| self.locate_brute_force(p))
    }

    /// Visibility walk from the triangle of `start`. Returns `None` when every
    /// queued alternative has been used up.
    fn walk(&self, start: usize, p: &Point2) -> Option<Location> {
        let m = &self.mesh;
        let mut visited: AHashSet<usize> = AHashSet::new();
        let mut alternates: VecDeque<usize> = VecDeque::new();
        let mut cur = Some(start);

        while let Some(h) = cur.take().or_else(|| alternates.pop_front()) {
            if !visited.insert(self.triangle_handle(h)) {
                continue;
            }
            let edges = [h, m.next(h), m.prev(h)];
            let o = edges.map(|e| orient2d(m.source_point(e), m.target_point(e), p));

            let mut crossed = edges.iter().zip(o).filter(|(_, s)| *s < 0).map(|(e, _)| *e);
            let Some(first) = crossed.next() else {
                return Some(classify_in_triangle(m, &edges, &o));
            };
            for e in std::iter::once(first).chain(crossed) {
                let t = e ^ 1;
                if self.is_outer[t] {
                    return Some(Location::Outside(t));
                }
                if cur.is_none() && !visited.contains(&self.triangle_handle(t)) {
                    cur = Some(t);
                } else {
                    alternates.push_back(t);
                }
            }
        }
        None
    }

    fn locate_brute_force(&self, p: &Point2) -> Location {
        let m = &self.mesh;
        for h in self.triangle_handles() {
            let edges = [h, m.next(h), m.prev(h)];
            let o = edges.map(|e| orient2d(m.source_point(e), m.target_point(e), p));
            if o.iter().all(|&s| s >= 0) {
                return classify_in_triangle(m, &edges, &o);
            }
        }
        for h in m.half_edge_ids() {
            if self.is_outer[h] && orient2d(m.source_point(h), m.target_point(h), p) > 0 {
                return Location::Outside(h);
            }
        }
        panic!("point location exhausted every triangle for {p}");
    }

    fn locate_in_chain(&self, p: &Point2) -> Location {
        let m = &self.mesh;
        for h in m.half_edge_ids() {
            if orient2d(m.source_point(h), m.target_point(h), p) > 0 {
                return Location::Outside(h);
            }
        }
        for h in m.half_edge_ids() {
            if is_point_on_segment(p, m.source_point(h), m.target_point(h)) {
                return Location::OnEdge(h);
            }
        }
        // collinear beyond one end: report the half-edge entering the nearer end
        let end = m
            .vertex_ids()
            .filter(|&v| m.degree(v) == 1)
            .min_by(|&a, &b| {
                let da = m.position(a).squared_distance(p);
                let db = m.position(b).squared_distance(p);
                da.total_cmp(&db)
            })
            .expect("a chain of two or more vertices has two ends");
        let out = m.vertices[end]
            .half_edge
            .expect("chain end has an edge");
        Location::Outside(out ^ 1)
    }
}

fn classify_in_triangle(m: &Mesh, edges: &[usize; 3], o: &[i32; 3]) -> Location {
    let zeros: Vec<usize> = (0..3).filter(|&i| o[i] == 0).collect();
    match zeros.as_slice() {
        [] => Location::InFace(edges[0]),
        [i] => Location::OnEdge(edges[*i]),
        [i, j] => {
            // the vertex shared by the two edges the point is on
            let (a, b) = (edges[*i], edges[*j]);
            if m.target(a) == m.source(b) {
                Location::Vertex(m.target(a))
            } else {
                Location::Vertex(m.target(b))
            }
        }
        _ => panic!("degenerate triangle at half-edge {}", edges[0]),
    }
}
