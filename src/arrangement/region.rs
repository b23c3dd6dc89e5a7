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

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use crate::arrangement::Arrangement;
use crate::geometry::{Point2, PolygonWithHoles, ring_contains, signed_area};
use crate::operations::triangulation::{Location, TriangulationQuery};

impl Arrangement {
    /// Partitions the triangles into regions: maximal sets connected across
    /// non-constraint edges. Sets that reach the exterior are dropped; the
    /// rest are numbered in order of their smallest triangle handle.
    pub fn arrange(&mut self) {
        let tri = &self.cdt;
        let mut seen: AHashSet<usize> = AHashSet::new();
        let mut regions: Vec<Vec<usize>> = Vec::new();

        for start in tri.triangle_handles() {
            if !seen.insert(start) {
                continue;
            }
            let mut members = Vec::new();
            let mut bounded = true;
            let mut queue = VecDeque::from([start]);
            while let Some(t) = queue.pop_front() {
                members.push(t);
                for h in [t, tri.next(t), tri.prev(t)] {
                    if tri.is_constraint(h) {
                        continue;
                    }
                    let tw = tri.twin(h);
                    if tri.is_outer(tw) {
                        bounded = false;
                        continue;
                    }
                    let nt = tri.triangle_handle(tw);
                    if seen.insert(nt) {
                        queue.push_back(nt);
                    }
                }
            }
            if bounded {
                members.sort_unstable();
                regions.push(members);
            }
        }

        self.region_of.clear();
        for (id, members) in regions.iter().enumerate() {
            for &t in members {
                for h in [t, tri.next(t), tri.prev(t)] {
                    self.region_of.set(h, id);
                }
            }
        }
        debug!(regions = regions.len(), "arranged");
        self.regions = regions;
        self.modified = false;
    }

    fn assert_arranged(&self) {
        assert!(
            !self.modified,
            "arrangement was modified after the last call to arrange()"
        );
    }

    pub fn num_regions(&self) -> usize {
        self.assert_arranged();
        self.regions.len()
    }

    /// Triangle handles of region `i`.
    pub fn region(&self, i: usize) -> &[usize] {
        self.assert_arranged();
        &self.regions[i]
    }

    /// Region on the left of `he`.
    pub fn region_id(&self, he: usize) -> Option<usize> {
        self.assert_arranged();
        let r = self.region_of[he];
        (r != usize::MAX).then_some(r)
    }

    /// Triangle on the left of `he`, as its canonical handle.
    pub fn face(&self, he: usize) -> Option<usize> {
        self.assert_arranged();
        (!self.cdt.is_outer(he)).then(|| self.cdt.triangle_handle(he))
    }

    /// Region containing `p`. Points on vertices, and on constraint edges
    /// between two regions, belong to none.
    pub fn locate(&self, p: &Point2) -> Option<usize> {
        self.assert_arranged();
        match self.cdt.locate(p) {
            Location::InFace(h) => self.region_id(h),
            Location::OnEdge(h) => {
                let (a, b) = (self.region_id(h), self.region_id(h ^ 1));
                if a == b { a } else { None }
            }
            _ => None,
        }
    }

    /// Boundary of region `i` as a polygon with holes.
    pub fn get_region(&self, i: usize) -> PolygonWithHoles {
        self.assert_arranged();
        let label = |h: usize| self.region_id(h).filter(|&r| r == i);
        let cycles = trace_loops(&self.cdt, &label);
        let (outers, holes): (Vec<_>, Vec<_>) =
            cycles.into_iter().map(|(_, ring)| ring).partition(|r| signed_area(r) > 0.0);
        assert_eq!(
            outers.len(),
            1,
            "region {i} has {} outer boundaries",
            outers.len()
        );
        let outer = outers.into_iter().next().expect("exactly one outer boundary");
        PolygonWithHoles::with_holes(outer, holes)
    }
}

/// Closed boundary walks of the labelled triangles, each with its label.
///
/// A half-edge is on the boundary when its left triangle has a label and the
/// right one has a different label (or none). Each walk keeps its label on
/// the left, so outer boundaries come out counter-clockwise and holes
/// clockwise. A walk that comes back to a vertex it already passed is split
/// there into separate cycles.
pub(crate) fn trace_loops<T, F>(tri: &T, label: &F) -> Vec<(usize, Vec<Point2>)>
where
    T: TriangulationQuery,
    F: Fn(usize) -> Option<usize>,
{
    let lab = |h: usize| if tri.is_outer(h) { None } else { label(h) };
    let is_boundary = |h: usize| lab(h).is_some() && lab(h) != lab(tri.twin(h));
    let successor = |h: usize| {
        let mut cand = tri.next(h);
        let mut guard = 0usize;
        while !is_boundary(cand) {
            cand = tri.next(tri.twin(cand));
            guard += 1;
            assert!(guard < 1 << 24, "boundary walk does not close at half-edge {h}");
        }
        cand
    };

    let boundary: Vec<usize> = tri.half_edges().into_iter().filter(|&h| is_boundary(h)).collect();
    let mut used: AHashSet<usize> = AHashSet::new();
    let mut out = Vec::new();

    for &start in &boundary {
        if used.contains(&start) {
            continue;
        }
        let Some(id) = lab(start) else { continue };
        let mut path: Vec<usize> = Vec::new();
        let mut on_path: AHashMap<usize, usize> = AHashMap::new();
        let mut h = start;
        loop {
            used.insert(h);
            let v = tri.source(h);
            if let Some(at) = on_path.get(&v).copied() {
                // peel off the closed walk that started at `v`
                let cycle: Vec<usize> = path.drain(at..).collect();
                for &c in &cycle {
                    on_path.remove(&tri.source(c));
                }
                out.push((id, cycle.iter().map(|&c| *tri.point(tri.source(c))).collect()));
            }
            on_path.insert(v, path.len());
            path.push(h);
            h = successor(h);
            if h == start {
                break;
            }
        }
        if !path.is_empty() {
            out.push((id, path.iter().map(|&c| *tri.point(tri.source(c))).collect()));
        }
    }
    out
}

/// Turns labelled cycles into polygons: each counter-clockwise cycle is an
/// outer boundary and each clockwise one a hole of the outer boundary with
/// the same label that contains it.
pub(crate) fn assemble_polygons(cycles: Vec<(usize, Vec<Point2>)>) -> Vec<PolygonWithHoles> {
    let mut polygons: Vec<(usize, PolygonWithHoles)> = Vec::new();
    let mut holes: Vec<(usize, Vec<Point2>)> = Vec::new();
    for (id, ring) in cycles {
        if signed_area(&ring) > 0.0 {
            polygons.push((id, PolygonWithHoles::new(ring)));
        } else {
            holes.push((id, ring));
        }
    }

    for (id, hole) in holes {
        let same: Vec<usize> = (0..polygons.len()).filter(|&i| polygons[i].0 == id).collect();
        let owner = if same.len() == 1 {
            Some(same[0])
        } else {
            let probe = hole.iter().find(|p| {
                same.iter().all(|&i| !polygons[i].1.outer.contains(p))
            });
            probe.and_then(|p| {
                same.iter()
                    .copied()
                    .filter(|&i| ring_contains(&polygons[i].1.outer, p))
                    .min_by(|&a, &b| {
                        signed_area(&polygons[a].1.outer).total_cmp(&signed_area(&polygons[b].1.outer))
                    })
            })
        };
        if let Some(i) = owner {
            polygons[i].1.holes.push(hole);
        }
    }
    polygons.into_iter().map(|(_, p)| p).collect()
}
