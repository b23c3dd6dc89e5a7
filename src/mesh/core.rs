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

use crate::geometry::Point2;
use crate::mesh::basic_types::{Mesh, Remap, VertexRing};
use crate::mesh::half_edge::HalfEdge;
use crate::mesh::vertex::Vertex;

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an isolated vertex. No deduplication happens at this layer.
    pub fn add_vertex(&mut self, position: Point2) -> usize {
        self.vertices.push(Vertex::new(position));
        self.vertices.len() - 1
    }

    #[inline]
    fn link(&mut self, a: usize, b: usize) {
        self.half_edges[a].next = b;
        self.half_edges[b].prev = a;
    }

    /// Allocates the pair `u -> v` / `v -> u` with unset face links and
    /// returns the id of `u -> v`.
    fn alloc_pair(&mut self, u: usize, v: usize) -> usize {
        let e = match self.free_pairs.pop() {
            Some(e) => {
                self.half_edges[e] = HalfEdge::new(v, e + 1);
                self.half_edges[e + 1] = HalfEdge::new(u, e);
                e
            }
            None => {
                let e = self.half_edges.len();
                self.half_edges.push(HalfEdge::new(v, e + 1));
                self.half_edges.push(HalfEdge::new(u, e));
                e
            }
        };
        self.live_half_edges += 2;
        e
    }

    fn free_pair(&mut self, e: usize) {
        let e = e & !1;
        self.half_edges[e].removed = true;
        self.half_edges[e + 1].removed = true;
        self.free_pairs.push(e);
        self.live_half_edges -= 2;
    }

    /// Creates a free-standing edge `u -> v` whose two halves form their own
    /// face cycle. Use only when neither endpoint has edges yet.
    pub fn add_edge(&mut self, u: usize, v: usize) -> usize {
        let e = self.alloc_pair(u, v);
        let t = e ^ 1;
        self.link(e, t);
        self.link(t, e);
        self.vertices[u].half_edge.get_or_insert(e);
        self.vertices[v].half_edge.get_or_insert(t);
        e
    }

    /// Hangs the isolated vertex `v` off `target(a)`, inside the face of `a`.
    /// Returns the new half-edge `target(a) -> v`.
    pub fn join_vertex(&mut self, a: usize, v: usize) -> usize {
        debug_assert!(self.vertices[v].half_edge.is_none(), "vertex {v} is not isolated");
        let w = self.target(a);
        let an = self.next(a);
        let e = self.alloc_pair(w, v);
        let t = e ^ 1;
        self.link(a, e);
        self.link(e, t);
        self.link(t, an);
        self.vertices[v].half_edge = Some(t);
        e
    }

    /// Connects `target(a)` to `source(b)` so that `a -> e -> b` afterwards.
    ///
    /// When `a` and `b` share a face cycle the face is split in two; when they
    /// lie on different cycles the two cycles merge. Returns `e`.
    pub fn join_edge(&mut self, a: usize, b: usize) -> usize {
        let u = self.target(a);
        let v = self.source(b);
        let an = self.next(a);
        let bp = self.prev(b);
        let e = self.alloc_pair(u, v);
        let t = e ^ 1;
        self.link(a, e);
        self.link(e, b);
        self.link(bp, t);
        self.link(t, an);
        e
    }

    /// Removes the pair of `e` and stitches the surrounding cycles together.
    pub fn erase_edge(&mut self, e: usize) {
        let t = e ^ 1;
        let u = self.source(e);
        let v = self.target(e);
        let en = self.next(e);
        let ep = self.prev(e);
        let tn = self.next(t);
        let tp = self.prev(t);

        match (en == t, tn == e) {
            (true, true) => {
                self.vertices[u].half_edge = None;
                self.vertices[v].half_edge = None;
            }
            (true, false) => {
                self.link(ep, tn);
                self.vertices[v].half_edge = None;
                self.vertices[u].half_edge = Some(tn);
            }
            (false, true) => {
                self.link(tp, en);
                self.vertices[u].half_edge = None;
                self.vertices[v].half_edge = Some(en);
            }
            (false, false) => {
                self.link(ep, tn);
                self.link(tp, en);
                if self.vertices[u].half_edge == Some(e) {
                    self.vertices[u].half_edge = Some(tn);
                }
                if self.vertices[v].half_edge == Some(t) {
                    self.vertices[v].half_edge = Some(en);
                }
            }
        }
        self.free_pair(e);
    }

    /// Removes `v` and every edge around it, merging the incident faces into
    /// one. Returns the former neighbours in counter-clockwise order.
    pub fn erase_vertex(&mut self, v: usize) -> VertexRing {
        assert!(!self.vertices[v].removed, "vertex {v} already removed");
        let ring = self.outgoing(v);
        let neighbors = ring.iter().map(|&h| self.target(h)).collect();
        for h in ring {
            self.erase_edge(h);
        }
        self.vertices[v].removed = true;
        self.vertices[v].half_edge = None;
        neighbors
    }

    /// Inserts the isolated vertex `v` in the middle of `e = u -> w`.
    ///
    /// `e` keeps its id and becomes `u -> v`; the returned half-edge is the
    /// new `v -> w`. Only topology is touched: flags attached to `e` must be
    /// copied to the new pair by the caller.
    pub fn split_edge(&mut self, e: usize, v: usize) -> usize {
        let t = e ^ 1;
        let w = self.target(e);
        let en = self.next(e);
        let tp = self.prev(t);
        let f = self.alloc_pair(v, w);
        let ft = f ^ 1;
        self.half_edges[e].vertex = v;

        if en == t {
            self.link(e, f);
            self.link(f, ft);
            self.link(ft, t);
        } else {
            self.link(e, f);
            self.link(f, en);
            self.link(tp, ft);
            self.link(ft, t);
        }
        if self.vertices[w].half_edge == Some(t) {
            self.vertices[w].half_edge = Some(ft);
        }
        self.vertices[v].half_edge = Some(f);
        f
    }

    /// Replaces the diagonal of the quadrilateral formed by the two triangles
    /// sharing `e`. For `e = a -> b` with apexes `c` (left) and `d` (right),
    /// `e` becomes `d -> c` in place.
    pub fn flip_edge(&mut self, e: usize) {
        let t = e ^ 1;
        let en = self.next(e);
        let ep = self.prev(e);
        let tn = self.next(t);
        let tp = self.prev(t);
        debug_assert_eq!(self.next(en), ep, "left face of {e} is not a triangle");
        debug_assert_eq!(self.next(tn), tp, "right face of {e} is not a triangle");

        let a = self.source(e);
        let b = self.target(e);
        let c = self.target(en);
        let d = self.target(tn);

        self.half_edges[e].vertex = c;
        self.half_edges[t].vertex = d;

        self.link(tn, e);
        self.link(e, ep);
        self.link(ep, tn);

        self.link(t, tp);
        self.link(tp, en);
        self.link(en, t);

        if self.vertices[a].half_edge == Some(e) {
            self.vertices[a].half_edge = Some(tn);
        }
        if self.vertices[b].half_edge == Some(t) {
            self.vertices[b].half_edge = Some(en);
        }
    }

    /// Isomorphic copy with dense ids: erased records and the free list are
    /// dropped.
    pub fn compacted(&self) -> (Mesh, Remap) {
        let mut remap = Remap {
            vertices: vec![usize::MAX; self.vertices.len()],
            half_edges: vec![usize::MAX; self.half_edges.len()],
        };
        let mut out = Mesh::new();
        for v in self.vertex_ids() {
            remap.vertices[v] = out.add_vertex(self.vertices[v].position);
        }
        let mut next_id = 0;
        for e in (0..self.half_edges.len()).step_by(2) {
            if !self.half_edges[e].removed {
                remap.half_edges[e] = next_id;
                remap.half_edges[e + 1] = next_id + 1;
                next_id += 2;
            }
        }
        for e in self.half_edge_ids() {
            let h = &self.half_edges[e];
            let mut copy = HalfEdge::new(remap.vertices[h.vertex], remap.half_edges[h.twin]);
            copy.next = remap.half_edges[h.next];
            copy.prev = remap.half_edges[h.prev];
            out.half_edges.push(copy);
        }
        for v in self.vertex_ids() {
            out.vertices[remap.vertices[v]].half_edge =
                self.vertices[v].half_edge.map(|h| remap.half_edges[h]);
        }
        out.live_half_edges = out.half_edges.len();
        (out, remap)
    }
}
