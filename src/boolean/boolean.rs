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

use tracing::debug;

use crate::arrangement::region::{assemble_polygons, trace_loops};
use crate::arrangement::{Arrangement, ArrangementOptions};
use crate::error::Result;
use crate::geometry::{PolygonWithHoles, remove_collinear};
use crate::operations::triangulation::TriangulationQuery;

/// Color bit of the first operand.
pub const RED: u32 = 1;
/// Color bit of the second operand.
pub const BLUE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Union,
    Intersection,
    Difference,
    Xor,
}

impl BooleanOp {
    /// Whether a region covered by the operands in `mask` belongs to the result.
    pub fn keeps(&self, mask: u32) -> bool {
        let red = mask & RED != 0;
        let blue = mask & BLUE != 0;
        match self {
            BooleanOp::Union => red || blue,
            BooleanOp::Intersection => red && blue,
            BooleanOp::Difference => red && !blue,
            BooleanOp::Xor => red != blue,
        }
    }
}

pub trait BooleanImpl {
    fn boolean(&self, other: &Self, op: BooleanOp) -> Result<Vec<PolygonWithHoles>>;
}

impl BooleanImpl for PolygonWithHoles {
    fn boolean(&self, other: &Self, op: BooleanOp) -> Result<Vec<PolygonWithHoles>> {
        polygon_boolean(
            std::slice::from_ref(self),
            std::slice::from_ref(other),
            op,
            ArrangementOptions::default(),
        )
    }
}

/// `a op b` for two sets of polygons. Each set should be free of
/// self-overlap; the result rings are free of straight vertices.
pub fn polygon_boolean(
    a: &[PolygonWithHoles],
    b: &[PolygonWithHoles],
    op: BooleanOp,
    options: ArrangementOptions,
) -> Result<Vec<PolygonWithHoles>> {
    overlay(&[a, b], options, |mask| op.keeps(mask))
}

/// Inserts group `i` with color bit `1 << i`, classifies every region by the
/// set of groups covering it and returns the regions `keep` accepts, merged
/// into polygons.
pub(crate) fn overlay<F>(
    groups: &[&[PolygonWithHoles]],
    options: ArrangementOptions,
    keep: F,
) -> Result<Vec<PolygonWithHoles>>
where
    F: Fn(u32) -> bool,
{
    assert!(groups.len() <= 32, "at most 32 groups fit in a color mask");
    let mut arr = Arrangement::new(options);
    for (i, group) in groups.iter().enumerate() {
        let color = 1u32 << i;
        for polygon in group.iter() {
            let polygon = polygon.clone().normalized();
            for ring in polygon.rings() {
                if ring.len() >= 2 {
                    arr.insert_polygon(ring, color)?;
                }
            }
        }
    }

    cancel_shared_colors(&mut arr);
    arr.arrange();
    let masks = propagate_masks(&arr);

    let selected = |h: usize| {
        arr.region_id(h)
            .filter(|&r| keep(masks[r]))
            .map(|_| 0)
    };
    let components = arr.components(&selected);
    let label = |h: usize| selected(h).map(|_| components[&arr.cdt.triangle_handle(h)]);
    let polygons: Vec<PolygonWithHoles> = assemble_polygons(trace_loops(&arr.cdt, &label))
        .into_iter()
        .filter_map(|p| {
            let outer = remove_collinear(&p.outer);
            if outer.len() < 3 {
                return None;
            }
            let holes = p
                .holes
                .iter()
                .map(|h| remove_collinear(h))
                .filter(|h| h.len() >= 3)
                .collect();
            Some(PolygonWithHoles::with_holes(outer, holes))
        })
        .collect();

    debug!(
        groups = groups.len(),
        regions = masks.len(),
        polygons = polygons.len(),
        conflicts = arr.conflicts(),
        "overlay"
    );
    Ok(polygons)
}

/// Bits present on both sides of an edge cancel out: that group has its
/// interior on both sides, so the edge bounds nothing for it. Edges left
/// without any color stop being constraints.
fn cancel_shared_colors(arr: &mut Arrangement) {
    let cdt = arr.cdt_mut();
    for h in cdt.constraint_edges() {
        let common = cdt.color(h) & cdt.color(h ^ 1);
        if common != 0 {
            cdt.set_color(h, cdt.color(h) & !common);
            cdt.set_color(h ^ 1, cdt.color(h ^ 1) & !common);
        }
        if cdt.color(h) == 0 && cdt.color(h ^ 1) == 0 {
            cdt.remove_constraint_edge(h);
        }
    }
}

/// Group mask of every region, found by walking from the exterior across
/// constraint edges: crossing `h` into its left region enters the groups of
/// `color(h)` and leaves those of `color(twin(h))`. Masks only grow, and a
/// region is revisited whenever its mask does.
fn propagate_masks(arr: &Arrangement) -> Vec<u32> {
    let n = arr.num_regions();
    let exterior = n;
    let cdt = arr.cdt();
    let node = |h: usize| arr.region_id(h).unwrap_or(exterior);

    let mut entering: Vec<Vec<usize>> = vec![Vec::new(); n + 1];
    for e in cdt.constraint_edges() {
        for h in [e, e ^ 1] {
            let (to, from) = (node(h), node(h ^ 1));
            if to != from {
                entering[from].push(h);
            }
        }
    }

    let mut mask = vec![0u32; n + 1];
    let mut reached = vec![false; n + 1];
    reached[exterior] = true;
    let mut queue = VecDeque::from([exterior]);
    while let Some(u) = queue.pop_front() {
        for &h in &entering[u] {
            let v = node(h);
            if v == exterior {
                continue;
            }
            let add = (mask[u] | cdt.color(h)) & !cdt.color(h ^ 1);
            if !reached[v] || mask[v] | add != mask[v] {
                reached[v] = true;
                mask[v] |= add;
                queue.push_back(v);
            }
        }
    }
    mask.truncate(n);
    mask
}
