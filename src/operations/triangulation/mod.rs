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

//! Dynamic constrained Delaunay triangulation over the half-edge mesh.
//!
//! Faces of the mesh are either counter-clockwise triangles or the single
//! exterior face, whose cycle runs clockwise around the convex hull. A
//! half-edge is flagged `is_outer` when the exterior lies on its left. While
//! every vertex is collinear there are no triangles and every half-edge is
//! outer.

pub mod constraint;
pub mod delaunay;
pub mod erase;
pub mod flip;
pub mod insert;
pub mod locate;

pub use delaunay::Cdt;

use crate::geometry::Point2;
use crate::mesh::Mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdtOptions {
    /// Seed of the sampling used to pick point-location start vertices.
    pub seed: u64,
}

impl Default for CdtOptions {
    fn default() -> Self {
        Self {
            seed: 0x5eed_cafe_f00d_d00d,
        }
    }
}

/// Where a query point falls relative to the triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// On an existing vertex.
    Vertex(usize),
    /// Strictly inside the edge of this half-edge.
    OnEdge(usize),
    /// Strictly inside the triangle on the left of this half-edge.
    InFace(usize),
    /// Outside the hull. The half-edge is outer and the point is strictly on
    /// its left, or, for a collinear point beyond a chain end, the half-edge
    /// enters that end.
    Outside(usize),
    /// Fewer than two vertices: there is no edge to relate the point to.
    Disjoint,
}

/// Read-only view of a triangulation used by the layers built on top of it.
pub trait TriangulationQuery {
    fn mesh(&self) -> &Mesh;
    fn is_outer(&self, he: usize) -> bool;
    fn is_constraint(&self, he: usize) -> bool;
    fn color(&self, he: usize) -> u32;

    fn point(&self, v: usize) -> &Point2 {
        self.mesh().position(v)
    }

    fn twin(&self, he: usize) -> usize {
        self.mesh().twin(he)
    }

    fn next(&self, he: usize) -> usize {
        self.mesh().next(he)
    }

    fn prev(&self, he: usize) -> usize {
        self.mesh().prev(he)
    }

    fn source(&self, he: usize) -> usize {
        self.mesh().source(he)
    }

    fn target(&self, he: usize) -> usize {
        self.mesh().target(he)
    }

    fn circular_list(&self, he: usize) -> Vec<usize> {
        self.mesh().circular_list(he)
    }

    /// Live half-edge ids in increasing order.
    fn half_edges(&self) -> Vec<usize> {
        self.mesh().half_edge_ids().collect()
    }

    /// Canonical handle of the triangle on the left of `he`: the smallest
    /// half-edge id of its cycle.
    fn triangle_handle(&self, he: usize) -> usize {
        let m = self.mesh();
        he.min(m.next(he)).min(m.prev(he))
    }

    /// Canonical half-edge of every triangle, in increasing id order.
    fn triangle_handles(&self) -> Vec<usize> {
        self.mesh()
            .half_edge_ids()
            .filter(|&h| !self.is_outer(h) && self.triangle_handle(h) == h)
            .collect()
    }
}
