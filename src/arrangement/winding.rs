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

use crate::arrangement::Arrangement;
use crate::arrangement::region::{assemble_polygons, trace_loops};
use crate::geometry::PolygonWithHoles;
use crate::operations::triangulation::TriangulationQuery;

impl Arrangement {
    /// Number of constraint crossings needed to reach each region from the
    /// exterior, indexed by region id.
    pub fn winding_numbers(&self) -> Vec<usize> {
        let n = self.num_regions();
        let exterior = n;
        let node = |h: usize| self.region_id(h).unwrap_or(exterior);

        let mut adjacency: Vec<AHashSet<usize>> = vec![AHashSet::new(); n + 1];
        for h in self.cdt.constraint_edges() {
            let (a, b) = (node(h), node(h ^ 1));
            if a != b {
                adjacency[a].insert(b);
                adjacency[b].insert(a);
            }
        }

        let mut dist = vec![usize::MAX; n + 1];
        dist[exterior] = 0;
        let mut queue = VecDeque::from([exterior]);
        while let Some(u) = queue.pop_front() {
            let mut next: Vec<usize> = adjacency[u].iter().copied().collect();
            next.sort_unstable();
            for v in next {
                if dist[v] == usize::MAX {
                    dist[v] = dist[u] + 1;
                    queue.push_back(v);
                }
            }
        }
        dist.truncate(n);
        dist
    }

    /// Regions with an odd winding number, merged into polygons. This is the
    /// even-odd fill of the inserted segments.
    pub fn even_odd_polygon(&self) -> Vec<PolygonWithHoles> {
        let winding = self.winding_numbers();
        let odd = |h: usize| {
            self.region_id(h)
                .filter(|&r| winding[r] != usize::MAX && winding[r] % 2 == 1)
                .map(|_| 0)
        };
        let components = self.components(&odd);
        let label = |h: usize| odd(h).map(|_| components[&self.cdt.triangle_handle(h)]);
        assemble_polygons(trace_loops(&self.cdt, &label))
    }

    /// Connected components, across any shared edge, of the triangles whose
    /// left half-edges `selected` accepts. Maps triangle handle to component.
    pub(crate) fn components<F>(&self, selected: &F) -> AHashMap<usize, usize>
    where
        F: Fn(usize) -> Option<usize>,
    {
        let tri = &self.cdt;
        let mut comp: AHashMap<usize, usize> = AHashMap::new();
        let mut next_id = 0;
        for start in tri.triangle_handles() {
            if selected(start).is_none() || comp.contains_key(&start) {
                continue;
            }
            comp.insert(start, next_id);
            let mut queue = VecDeque::from([start]);
            while let Some(t) = queue.pop_front() {
                for h in [t, tri.next(t), tri.prev(t)] {
                    let tw = tri.twin(h);
                    if tri.is_outer(tw) || selected(tw).is_none() {
                        continue;
                    }
                    let nt = tri.triangle_handle(tw);
                    if !comp.contains_key(&nt) {
                        comp.insert(nt, next_id);
                        queue.push_back(nt);
                    }
                }
            }
            next_id += 1;
        }
        comp
    }
}
