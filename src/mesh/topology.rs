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
use crate::mesh::basic_types::{Mesh, VertexRing};

impl Mesh {
    #[inline]
    pub fn twin(&self, he: usize) -> usize {
        self.half_edges[he].twin
    }

    #[inline]
    pub fn next(&self, he: usize) -> usize {
        self.half_edges[he].next
    }

    #[inline]
    pub fn prev(&self, he: usize) -> usize {
        self.half_edges[he].prev
    }

    #[inline]
    pub fn target(&self, he: usize) -> usize {
        self.half_edges[he].vertex
    }

    #[inline]
    pub fn source(&self, he: usize) -> usize {
        self.half_edges[he ^ 1].vertex
    }

    /// Next outgoing half-edge counter-clockwise around `source(he)`.
    #[inline]
    pub fn rot_ccw(&self, he: usize) -> usize {
        self.twin(self.prev(he))
    }

    /// Next outgoing half-edge clockwise around `source(he)`.
    #[inline]
    pub fn rot_cw(&self, he: usize) -> usize {
        self.next(self.twin(he))
    }

    #[inline]
    pub fn position(&self, v: usize) -> &Point2 {
        &self.vertices[v].position
    }

    #[inline]
    pub fn source_point(&self, he: usize) -> &Point2 {
        self.position(self.source(he))
    }

    #[inline]
    pub fn target_point(&self, he: usize) -> &Point2 {
        self.position(self.target(he))
    }

    pub fn is_vertex_removed(&self, v: usize) -> bool {
        self.vertices[v].removed
    }

    pub fn is_half_edge_removed(&self, he: usize) -> bool {
        self.half_edges[he].removed
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.iter().filter(|v| !v.removed).count()
    }

    /// Number of live half-edges (twice the number of edges).
    pub fn num_half_edges(&self) -> usize {
        self.live_half_edges
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.removed)
            .map(|(i, _)| i)
    }

    pub fn half_edge_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.half_edges
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.removed)
            .map(|(i, _)| i)
    }

    /// Outgoing half-edges of `v` in counter-clockwise order.
    pub fn outgoing(&self, v: usize) -> VertexRing {
        let mut ring = VertexRing::new();
        let Some(start) = self.vertices[v].half_edge else {
            return ring;
        };
        let mut h = start;
        loop {
            ring.push(h);
            h = self.rot_ccw(h);
            if h == start || ring.len() > self.half_edges.len() {
                break;
            }
        }
        ring
    }

    /// Neighbour vertices of `v` in counter-clockwise order.
    pub fn neighbors(&self, v: usize) -> VertexRing {
        self.outgoing(v).into_iter().map(|h| self.target(h)).collect()
    }

    pub fn degree(&self, v: usize) -> usize {
        self.outgoing(v).len()
    }

    /// Half-edge from `u` to `v`, if the two are adjacent.
    pub fn find_half_edge(&self, u: usize, v: usize) -> Option<usize> {
        self.outgoing(u).into_iter().find(|&h| self.target(h) == v)
    }

    /// Half-edges of the face on the left of `he`, starting at `he`.
    pub fn circular_list(&self, he: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut h = he;
        loop {
            out.push(h);
            h = self.next(h);
            if h == he {
                break;
            }
            assert!(
                out.len() <= self.half_edges.len(),
                "face of half-edge {he} does not close"
            );
        }
        out
    }

    /// Panics with a description of the first broken link.
    pub fn validate_connectivity(&self) {
        for (i, h) in self.half_edges.iter().enumerate() {
            if h.removed {
                continue;
            }
            assert_eq!(h.twin, i ^ 1, "half-edge {i} is not paired with {}", i ^ 1);
            let t = &self.half_edges[h.twin];
            assert!(!t.removed, "half-edge {i} has a removed twin");
            assert_eq!(t.twin, i, "twin of twin of {i} is not {i}");
            assert!(!self.half_edges[h.next].removed, "next of {i} is removed");
            assert!(!self.half_edges[h.prev].removed, "prev of {i} is removed");
            assert_eq!(self.half_edges[h.next].prev, i, "next.prev of {i} is not {i}");
            assert_eq!(self.half_edges[h.prev].next, i, "prev.next of {i} is not {i}");
            assert_eq!(
                self.source(h.next),
                h.vertex,
                "next of {i} does not leave its target"
            );
            assert!(!self.vertices[h.vertex].removed, "half-edge {i} ends at a removed vertex");
        }

        for (v, vert) in self.vertices.iter().enumerate() {
            if vert.removed {
                continue;
            }
            if let Some(h) = vert.half_edge {
                assert!(!self.half_edges[h].removed, "vertex {v} points at a removed half-edge");
                assert_eq!(self.source(h), v, "half-edge of vertex {v} does not leave it");
            }
        }

        for i in self.half_edge_ids() {
            self.circular_list(i);
        }
    }
}
