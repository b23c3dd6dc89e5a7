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

use tracing::trace;

use crate::geometry::Point2;
use crate::kernel::{incircle, orient2d, point_in_triangle};
use crate::operations::triangulation::Cdt;

impl Cdt {
    /// Removes vertex `v` with its edges, constraint edges included, and
    /// re-triangulates the hole.
    pub fn erase(&mut self, v: usize) {
        assert!(!self.mesh.is_vertex_removed(v), "vertex {v} already removed");
        let p = *self.mesh.position(v);
        self.vertex_index.remove(&p);

        if !self.has_area {
            self.erase_from_chain(v);
        } else {
            let on_hull = self
                .mesh
                .outgoing(v)
                .into_iter()
                .any(|h| self.is_outer[h] || self.is_outer[h ^ 1]);
            if on_hull {
                self.erase_hull_vertex(v);
            } else {
                self.erase_interior_vertex(v);
            }
            self.restore_delaunay();
        }
        trace!(vertex = v, on = %p, "erased vertex");
    }

    /// Removes the vertex at `p`, if any.
    pub fn erase_point(&mut self, p: &Point2) -> bool {
        match self.vertex_at(p) {
            Some(v) => {
                self.erase(v);
                true
            }
            None => false,
        }
    }

    fn erase_interior_vertex(&mut self, v: usize) {
        let link: Vec<usize> = self
            .mesh
            .outgoing(v)
            .into_iter()
            .map(|h| self.mesh.next(h))
            .collect();
        self.mesh.erase_vertex(v);

        let mut e = link[0];
        loop {
            let cycle = self.mesh.circular_list(e);
            let n = cycle.len();
            if n <= 3 {
                break;
            }
            let pts: Vec<Point2> = cycle
                .iter()
                .map(|&h| *self.mesh.source_point(h))
                .collect();
            let corner = |i: usize| (pts[i], pts[(i + 1) % n], pts[(i + 2) % n]);
            let others = |i: usize| (0..n).filter(move |&j| (j + n - i) % n > 2);

            let is_ear = |i: usize| {
                let (a, b, c) = corner(i);
                orient2d(&a, &b, &c) > 0
                    && others(i).all(|j| !point_in_triangle(&pts[j], &a, &b, &c))
            };
            let is_delaunay = |i: usize| {
                let (a, b, c) = corner(i);
                others(i).all(|j| incircle(&a, &b, &c, &pts[j]) <= 0)
            };

            let ears: Vec<usize> = (0..n).filter(|&i| is_ear(i)).collect();
            let pick = ears
                .iter()
                .copied()
                .find(|&i| is_delaunay(i))
                .or_else(|| ears.first().copied())
                .expect("the hole around an erased vertex always has an ear");

            let x = cycle[pick];
            let y = cycle[(pick + 1) % n];
            let cut = self.join_edge(y, x);
            self.enqueue_flip(cut);
            e = cut ^ 1;
        }
        for h in link {
            self.enqueue_flip(h);
        }
    }

    fn erase_hull_vertex(&mut self, v: usize) {
        let ring = self.mesh.outgoing(v);
        let h_out = ring
            .iter()
            .copied()
            .find(|&h| self.is_outer[h])
            .expect("hull vertex has an outgoing hull edge");
        let before = self.mesh.prev(self.mesh.prev(h_out));
        let after = self.mesh.next(h_out);
        let link: Vec<usize> = ring
            .iter()
            .filter(|&&h| !self.is_outer[h])
            .map(|&h| self.mesh.next(h))
            .collect();

        self.mesh.erase_vertex(v);
        for &x in &link {
            self.is_outer.set(x, true);
        }

        // the new boundary between `before` and `after` may be reflex
        let mut x = before;
        while x != after {
            let m = &self.mesh;
            let y = m.next(x);
            if orient2d(m.source_point(x), m.target_point(x), m.target_point(y)) > 0 {
                let cut = self.join_edge(y, x);
                self.is_outer.set(x, false);
                self.is_outer.set(y, false);
                self.is_outer.set(cut ^ 1, true);
                for h in [x, y, cut] {
                    self.enqueue_flip(h);
                }
                x = self.mesh.prev(cut ^ 1);
                continue;
            }
            x = y;
        }

        for h in link {
            self.enqueue_flip(h);
        }
        self.has_area = self.mesh.half_edge_ids().any(|h| !self.is_outer[h]);
        if !self.has_area {
            self.flip_queue.clear();
            self.in_flip_queue.clear();
        }
    }

    fn erase_from_chain(&mut self, v: usize) {
        let neighbors = self.mesh.erase_vertex(v);
        let [a, b] = neighbors[..] else {
            return;
        };
        let ha = self.mesh.vertices[a].half_edge;
        let hb = self.mesh.vertices[b].half_edge;
        let e = match (ha, hb) {
            (Some(ha), Some(hb)) => self.join_edge(ha ^ 1, hb),
            (Some(ha), None) => self.join_vertex(ha ^ 1, b),
            (None, Some(hb)) => self.join_vertex(hb ^ 1, a),
            (None, None) => self.add_edge(a, b),
        };
        self.is_outer.set(e, true);
        self.is_outer.set(e ^ 1, true);
    }
}
