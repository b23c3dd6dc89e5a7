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

use smallvec::SmallVec;

use crate::mesh::{half_edge::HalfEdge, vertex::Vertex};

/// Neighbour list around a vertex; most vertices have few enough to stay inline.
pub type VertexRing = SmallVec<[usize; 8]>;

/// Arena half-edge mesh. Ids are stable: erased records are tombstoned,
/// half-edge pairs are recycled through a free list and vertex ids are
/// never reused.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub half_edges: Vec<HalfEdge>,
    pub(crate) free_pairs: Vec<usize>,
    pub(crate) live_half_edges: usize,
}

/// Old-id to new-id tables produced by [`Mesh::compacted`]; erased ids map
/// to `usize::MAX`.
#[derive(Debug, Clone, Default)]
pub struct Remap {
    pub vertices: Vec<usize>,
    pub half_edges: Vec<usize>,
}
