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

use crate::error::{Error, Result, check_finite};
use crate::geometry::Point2;
use crate::kernel::{incircle, orient2d};
use crate::operations::triangulation::Cdt;

/// One advance of a segment walk from a vertex toward the segment target.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    /// An existing edge leads from the current vertex along the segment.
    Along(usize),
    /// The segment crosses these edges, in order, and reaches `apex`.
    Cross { crossed: Vec<usize>, apex: usize },
}

impl Cdt {
    /// Inserts the segment `s`-`t` as constraint edges, splitting it at every
    /// vertex it passes through. Half-edges pointing from `s` toward `t` get
    /// `color_st` OR-ed into their color, the opposite ones `color_ts`.
    ///
    /// Fails without touching any edge when the segment crosses an existing
    /// constraint; both endpoints are inserted regardless.
    pub fn insert_constraint(
        &mut self,
        s: &Point2,
        t: &Point2,
        color_st: u32,
        color_ts: u32,
    ) -> Result<()> {
        check_finite(s)?;
        check_finite(t)?;
        let vs = self.insert(s)?;
        let vt = self.insert(t)?;
        if vs == vt {
            return Ok(());
        }

        let mut cur = vs;
        while cur != vt {
            match self.next_step(cur, vt) {
                Step::Along(h) => cur = self.mesh.target(h),
                Step::Cross { crossed, apex } => {
                    if crossed.iter().any(|&e| self.is_constraint[e]) {
                        return Err(Error::ConstraintConflict { from: *s, to: *t });
                    }
                    cur = apex;
                }
            }
        }

        let mut cur = vs;
        while cur != vt {
            match self.next_step(cur, vt) {
                Step::Along(h) => {
                    self.mark_constraint(h, color_st, color_ts);
                    cur = self.mesh.target(h);
                }
                Step::Cross { crossed, apex } => {
                    let m = &self.mesh;
                    // `a` ends at `cur` and `b` leaves the apex
                    let a = m.next(crossed[0]);
                    let b = m.prev(crossed[crossed.len() - 1] ^ 1);
                    trace!(from = cur, to = apex, crossed = crossed.len(), "forcing constraint edge");
                    for e in crossed {
                        self.mesh.erase_edge(e);
                    }
                    let ne = self.join_edge(a, b);
                    self.triangulate_pseudo_polygons(ne);
                    self.mark_constraint(ne, color_st, color_ts);
                    cur = apex;
                }
            }
        }
        Ok(())
    }

    /// True when `s`-`t` properly crosses an existing constraint edge.
    pub fn is_cross(&self, s: &Point2, t: &Point2) -> bool {
        self.constraint_edges().into_iter().any(|e| {
            let a = self.mesh.source_point(e);
            let b = self.mesh.target_point(e);
            orient2d(a, b, s) * orient2d(a, b, t) < 0 && orient2d(s, t, a) * orient2d(s, t, b) < 0
        })
    }

    /// One half-edge (the even one) of every constraint edge.
    pub fn constraint_edges(&self) -> Vec<usize> {
        self.mesh
            .half_edge_ids()
            .filter(|&h| h & 1 == 0 && self.is_constraint[h])
            .collect()
    }

    /// Unflags the chain of collinear constraint edges from `s` to `t`.
    /// Returns false, changing nothing, when no such chain exists.
    pub fn remove_constraint(&mut self, s: &Point2, t: &Point2) -> bool {
        let (Some(vs), Some(vt)) = (self.vertex_at(s), self.vertex_at(t)) else {
            return false;
        };
        let mut chain = Vec::new();
        let mut cur = vs;
        while cur != vt {
            let step = self
                .mesh
                .outgoing(cur)
                .into_iter()
                .find(|&h| self.is_constraint[h] && self.heads_toward(cur, h, vt));
            match step {
                Some(h) => {
                    chain.push(h);
                    cur = self.mesh.target(h);
                }
                None => return false,
            }
        }
        for h in chain {
            self.unmark_constraint(h);
        }
        self.restore_delaunay();
        true
    }

    /// Turns the edge of `he` back into an ordinary, flippable edge.
    pub fn remove_constraint_edge(&mut self, he: usize) {
        self.unmark_constraint(he);
        self.restore_delaunay();
    }

    fn mark_constraint(&mut self, h: usize, color_fwd: u32, color_back: u32) {
        self.is_constraint.set(h, true);
        self.is_constraint.set(h ^ 1, true);
        *self.color.get_mut(h) |= color_fwd;
        *self.color.get_mut(h ^ 1) |= color_back;
    }

    fn unmark_constraint(&mut self, h: usize) {
        for x in [h, h ^ 1] {
            self.is_constraint.set(x, false);
            self.color.set(x, 0);
        }
        self.enqueue_flip(h);
    }

    /// `h` leaves `cur` along the ray from `cur` through `vt`.
    fn heads_toward(&self, cur: usize, h: usize, vt: usize) -> bool {
        let w = self.mesh.target(h);
        if w == vt {
            return true;
        }
        let pc = self.mesh.position(cur);
        let pt = self.mesh.position(vt);
        let pw = self.mesh.position(w);
        orient2d(pc, pt, pw) == 0 && (pw - pc).dot(&(pt - pc)) > 0.0
    }

    fn next_step(&self, cur: usize, vt: usize) -> Step {
        let m = &self.mesh;
        let ring = m.outgoing(cur);
        if let Some(&h) = ring.iter().find(|&&h| self.heads_toward(cur, h, vt)) {
            return Step::Along(h);
        }

        let pc = m.position(cur);
        let pt = m.position(vt);
        for &h in &ring {
            if self.is_outer[h] {
                continue;
            }
            let x = m.next(h);
            if orient2d(pc, m.target_point(h), pt) <= 0 || orient2d(pc, m.target_point(x), pt) >= 0
            {
                continue;
            }
            // `x` runs from the right of the segment to its left
            let mut crossed = vec![x];
            let mut e = x;
            loop {
                let t = e ^ 1;
                let r = m.target(m.next(t));
                if r == vt {
                    return Step::Cross { crossed, apex: r };
                }
                let o = orient2d(pc, pt, m.position(r));
                if o == 0 {
                    return Step::Cross { crossed, apex: r };
                }
                e = if o > 0 { m.next(t) } else { m.prev(t) };
                crossed.push(e);
            }
        }
        panic!("segment from vertex {cur} to vertex {vt} leaves the triangulation");
    }

    /// Re-triangulates the faces on both sides of the freshly forced edge
    /// `e`. For each face the apex is the polygon vertex whose circle with
    /// the base edge holds no other vertex; ties keep the earliest vertex.
    fn triangulate_pseudo_polygons(&mut self, e: usize) {
        let mut stack = vec![e, e ^ 1];
        while let Some(base) = stack.pop() {
            let cycle = self.mesh.circular_list(base);
            let n = cycle.len();
            if n <= 3 {
                continue;
            }
            let m = &self.mesh;
            let pa = m.source_point(base);
            let pb = m.target_point(base);
            let mut k = 2;
            for d in 3..n {
                if incircle(pa, pb, m.source_point(cycle[k]), m.source_point(cycle[d])) > 0 {
                    k = d;
                }
            }

            let bc = if k == 2 {
                cycle[1]
            } else {
                let bc = self.join_edge(base, cycle[k]);
                stack.push(bc ^ 1);
                bc
            };
            if k != n - 1 {
                let ca = self.join_edge(bc, base);
                stack.push(ca ^ 1);
            }
        }
    }
}
