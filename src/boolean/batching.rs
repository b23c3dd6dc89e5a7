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

use tracing::debug;

use crate::arrangement::ArrangementOptions;
use crate::boolean::boolean::overlay;
use crate::error::Result;
use crate::geometry::{Aabb2, PolygonWithHoles};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnionOptions {
    /// Most groups merged by one arrangement; at most 32.
    pub batch_size: usize,
    pub threshold: f64,
    pub seed: u64,
}

impl Default for UnionOptions {
    fn default() -> Self {
        let arrangement = ArrangementOptions::default();
        Self {
            batch_size: 30,
            threshold: arrangement.threshold,
            seed: arrangement.seed,
        }
    }
}

/// Disjoint-set forest with path halving.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }
}

/// Groups polygons whose bounding boxes overlap, directly or through a chain
/// of others. Clusters come out in order of their first polygon.
fn cluster_by_bbox(polygons: &[PolygonWithHoles]) -> Vec<Vec<usize>> {
    let boxes: Vec<Option<Aabb2>> = polygons.iter().map(|p| p.bbox()).collect();
    let mut order: Vec<(usize, Aabb2)> = boxes
        .iter()
        .enumerate()
        .filter_map(|(i, b)| b.map(|b| (i, b)))
        .collect();
    order.sort_by(|a, b| a.1.min.x.total_cmp(&b.1.min.x));

    let mut sets = DisjointSet::new(polygons.len());
    let mut active: Vec<(usize, Aabb2)> = Vec::new();
    for &(i, bi) in &order {
        active.retain(|(_, bj)| bj.max.x >= bi.min.x);
        for &(j, bj) in &active {
            if bj.intersects(&bi) {
                sets.union(i, j);
            }
        }
        active.push((i, bi));
    }

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut slot: Vec<usize> = vec![usize::MAX; polygons.len()];
    for i in 0..polygons.len() {
        if boxes[i].is_none() {
            continue;
        }
        let root = sets.find(i);
        if slot[root] == usize::MAX {
            slot[root] = clusters.len();
            clusters.push(Vec::new());
        }
        clusters[slot[root]].push(i);
    }
    clusters
}

/// Union of any number of polygons. Polygons are clustered by overlapping
/// bounding boxes, and each cluster is merged in rounds of at most
/// `batch_size` groups per arrangement, every group being the disjoint result
/// of the previous round.
pub fn polygon_union(
    polygons: &[PolygonWithHoles],
    options: &UnionOptions,
) -> Result<Vec<PolygonWithHoles>> {
    assert!(
        (2..=32).contains(&options.batch_size),
        "batch size must be between 2 and 32"
    );
    let arrangement = ArrangementOptions {
        threshold: options.threshold,
        seed: options.seed,
    };

    let clusters = cluster_by_bbox(polygons);
    debug!(polygons = polygons.len(), clusters = clusters.len(), "polygon union");

    let mut out = Vec::new();
    for cluster in clusters {
        let mut groups: Vec<Vec<PolygonWithHoles>> = cluster
            .iter()
            .map(|&i| vec![polygons[i].clone().normalized()])
            .collect();
        if groups.len() == 1 {
            let single: [&[PolygonWithHoles]; 1] = [&groups[0]];
            out.extend(overlay(&single, arrangement, |mask| mask != 0)?);
            continue;
        }
        while groups.len() > 1 {
            let mut merged = Vec::with_capacity(groups.len().div_ceil(options.batch_size));
            for batch in groups.chunks(options.batch_size) {
                let refs: Vec<&[PolygonWithHoles]> = batch.iter().map(|g| g.as_slice()).collect();
                merged.push(overlay(&refs, arrangement, |mask| mask != 0)?);
            }
            groups = merged;
        }
        out.extend(groups.into_iter().flatten());
    }
    Ok(out)
}
