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

use crate::kernel::incircle;
use crate::operations::triangulation::Cdt;

impl Cdt {
    /// Queues the edge of `he` for a Delaunay check, once.
    pub(crate) fn enqueue_flip(&mut self, he: usize) {
        let e = he & !1;
        if !self.in_flip_queue[e] {
            self.in_flip_queue.set(e, true);
            self.flip_queue.push(e);
        }
    }

    /// Flips queued edges until every one of them is locally Delaunay.
    /// Hull and constraint edges are never flipped.
    pub(crate) fn restore_delaunay(&mut self) {
        let mut flips = 0usize;
        while let Some(e) = self.flip_queue.pop() {
            self.in_flip_queue.set(e, false);
            let t = e ^ 1;
            if self.mesh.is_half_edge_removed(e)
                || self.is_outer[e]
                || self.is_outer[t]
                || self.is_constraint[e]
            {
                continue;
            }
            let m = &self.mesh;
            let (en, ep, tn, tp) = (m.next(e), m.prev(e), m.next(t), m.prev(t));
            let a = m.source_point(e);
            let b = m.target_point(e);
            let c = m.target_point(en);
            let d = m.target_point(tn);
            if incircle(a, b, c, d) > 0 {
                self.mesh.flip_edge(e);
                flips += 1;
                for x in [en, ep, tn, tp] {
                    self.enqueue_flip(x);
                }
            }
        }
        if flips > 0 {
            trace!(flips, "restored Delaunay property");
        }
    }
}
