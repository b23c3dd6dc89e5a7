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

use crate::error::{Result, check_finite};
use crate::geometry::Point2;
use crate::kernel::orient2d;
use crate::operations::triangulation::{Cdt, Location};

impl Cdt {
    /// Inserts `p` and restores the Delaunay property around it. Returns the
    /// existing vertex when `p` is already present.
    pub fn insert(&mut self, p: &Point2) -> Result<usize> {
        check_finite(p)?;
        let loc = self.locate(p);
        if let Location::Vertex(v) = loc {
            return Ok(v);
        }

        let v = self.mesh.add_vertex(*p);
        self.vertex_index.insert(*p, v);
        match loc {
            Location::Vertex(_) => unreachable!(),
            Location::Disjoint => {
                let other = self.mesh.vertex_ids().find(|&u| u != v);
                if let Some(u) = other {
                    let e = self.add_edge(u, v);
                    self.is_outer.set(e, true);
                    self.is_outer.set(e ^ 1, true);
                }
            }
            Location::OnEdge(e) => self.insert_on_edge(e, v),
            Location::InFace(h) => self.insert_in_face(h, v),
            Location::Outside(h) => self.insert_outside(h, v),
        }
        self.restore_delaunay();
        trace!(vertex = v, ?loc, "inserted point");
        Ok(v)
    }

    /// Inserts every point; returns the vertex ids in input order.
    pub fn insert_all(&mut self, points: &[Point2]) -> Result<Vec<usize>> {
        points.iter().map(|p| self.insert(p)).collect()
    }

    fn insert_in_face(&mut self, h: usize, v: usize) {
        let m = &self.mesh;
        let (e0, e1, e2) = (h, m.next(h), m.prev(h));
        let s0 = self.join_vertex(e2, v);
        let s1 = self.join_edge(e0, s0 ^ 1);
        self.join_edge(e1, s1 ^ 1);
        for e in [e0, e1, e2] {
            self.enqueue_flip(e);
        }
    }

    fn insert_on_edge(&mut self, e: usize, v: usize) {
        let t = e ^ 1;
        let left = !self.is_outer[e];
        let right = !self.is_outer[t];
        let m = &self.mesh;
        let (en, ep, tn, tp) = (m.next(e), m.prev(e), m.next(t), m.prev(t));

        let f = self.split_edge(e, v);
        if left {
            self.join_edge(e, ep);
        }
        if right {
            self.join_edge(f ^ 1, tp);
        }
        for x in [en, ep, tn, tp] {
            self.enqueue_flip(x);
        }
    }

    /// Fans `v` to every hull edge it sees. `h` is an outer half-edge with
    /// `v` strictly on its left, or the half-edge entering the chain end
    /// that `v` extends.
    fn insert_outside(&mut self, h: usize, v: usize) {
        let p = *self.mesh.position(v);
        if orient2d(self.mesh.source_point(h), self.mesh.target_point(h), &p) == 0 {
            let e = self.join_vertex(h, v);
            self.is_outer.set(e, true);
            self.is_outer.set(e ^ 1, true);
            return;
        }

        let m = &self.mesh;
        let visible = |x: usize| orient2d(m.source_point(x), m.target_point(x), &p) > 0;
        let mut first = h;
        while visible(m.prev(first)) && m.prev(first) != h {
            first = m.prev(first);
        }
        let mut last = h;
        while visible(m.next(last)) && m.next(last) != first {
            last = m.next(last);
        }

        let s = self.join_vertex(self.mesh.prev(first), v);
        self.is_outer.set(s, true);
        let mut hi = s ^ 1;
        let mut cur = first;
        loop {
            let after = self.mesh.next(cur);
            let ne = self.join_edge(cur, hi);
            self.is_outer.set(cur, false);
            self.enqueue_flip(cur);
            hi = ne ^ 1;
            if cur == last {
                break;
            }
            cur = after;
        }
        self.is_outer.set(hi, true);
        self.has_area = true;
    }
}
