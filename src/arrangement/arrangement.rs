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

use tracing::{debug, warn};

use crate::arrangement::ArrangementOptions;
use crate::error::{Error, Result, check_finite};
use crate::geometry::{Aabb2, Point2, Segment2, SegmentIntersection};
use crate::mesh::{HalfEdgeProperty, PropertyMap};
use crate::operations::triangulation::{Cdt, CdtOptions, TriangulationQuery};

/// An inserted segment, kept as the polyline it became after being split at
/// the points where later segments crossed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub points: Vec<Point2>,
    pub color_st: u32,
    pub color_ts: u32,
}

impl Line {
    pub fn pieces(&self) -> impl Iterator<Item = Segment2> + '_ {
        self.points.windows(2).map(|w| Segment2::new(&w[0], &w[1]))
    }

    pub fn bbox(&self) -> Option<Aabb2> {
        Aabb2::from_iter(self.points.iter())
    }
}

/// Planar arrangement of possibly crossing segments over a constrained
/// Delaunay triangulation.
#[derive(Debug, Clone)]
pub struct Arrangement {
    pub(crate) cdt: Cdt,
    incidence: Cdt,
    lines: Vec<Line>,
    options: ArrangementOptions,
    pub(crate) region_of: HalfEdgeProperty<usize>,
    pub(crate) regions: Vec<Vec<usize>>,
    pub(crate) modified: bool,
    conflicts: usize,
}

impl Default for Arrangement {
    fn default() -> Self {
        Self::new(ArrangementOptions::default())
    }
}

impl Arrangement {
    pub fn new(options: ArrangementOptions) -> Self {
        let cdt_options = CdtOptions { seed: options.seed };
        Self {
            cdt: Cdt::new(cdt_options),
            incidence: Cdt::new(cdt_options),
            lines: Vec::new(),
            options,
            region_of: PropertyMap::new(usize::MAX),
            regions: Vec::new(),
            modified: true,
            conflicts: 0,
        }
    }

    pub fn options(&self) -> &ArrangementOptions {
        &self.options
    }

    /// The underlying triangulation.
    pub fn cdt(&self) -> &Cdt {
        &self.cdt
    }

    pub(crate) fn cdt_mut(&mut self) -> &mut Cdt {
        self.modified = true;
        &mut self.cdt
    }

    /// Every inserted segment, as split so far.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of segment pieces dropped because they crossed an existing
    /// constraint after rounding.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// True when the triangulation changed since the last `arrange`.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Moves `p` onto an inserted point within the snap threshold, or
    /// records it as a new one.
    fn snap(&mut self, p: &Point2) -> Result<Point2> {
        if self.incidence.vertex_at(p).is_some() {
            return Ok(*p);
        }
        if self.options.threshold > 0.0 {
            if let Some(v) = self.incidence.approximate_nearest_vertex(p) {
                let q = *self.incidence.point(v);
                if q.distance_to(p) <= self.options.threshold {
                    return Ok(q);
                }
            }
        }
        self.incidence.insert(p)?;
        Ok(*p)
    }

    fn force_constraint(&mut self, a: &Point2, b: &Point2, c_ab: u32, c_ba: u32) -> Result<()> {
        match self.cdt.insert_constraint(a, b, c_ab, c_ba) {
            Err(Error::ConstraintConflict { from, to }) => {
                warn!(%from, %to, "segment crosses a constraint after rounding, skipped");
                self.conflicts += 1;
                Ok(())
            }
            other => other,
        }
    }

    /// Inserts the segment `s`-`t`. Half-edges running from `s` toward `t`
    /// get `color_st`, the opposite ones `color_ts`.
    pub fn insert(&mut self, s: &Point2, t: &Point2, color_st: u32, color_ts: u32) -> Result<()> {
        check_finite(s)?;
        check_finite(t)?;
        self.modified = true;
        let s = self.snap(s)?;
        let t = self.snap(t)?;
        if s == t {
            self.cdt.insert(&s)?;
            return Ok(());
        }

        let seg = Segment2::new(&s, &t);
        let bb = seg.bbox();
        let mut on_new = vec![s, t];
        let mut removed: Vec<Segment2> = Vec::new();
        let mut reinsert: Vec<(Segment2, u32, u32)> = Vec::new();

        for li in 0..self.lines.len() {
            if !self.lines[li].bbox().is_some_and(|lb| lb.intersects(&bb)) {
                continue;
            }
            let old = self.lines[li].points.clone();
            let (c_st, c_ts) = (self.lines[li].color_st, self.lines[li].color_ts);
            let mut points = vec![old[0]];
            for w in old.windows(2) {
                let piece = Segment2::new(&w[0], &w[1]);
                let cuts = self.cuts(&seg, &piece, &mut on_new)?;
                if !cuts.is_empty() {
                    removed.push(piece);
                    let mut prev = piece.a;
                    for x in cuts.iter().chain(std::iter::once(&piece.b)) {
                        reinsert.push((Segment2::new(&prev, x), c_st, c_ts));
                        prev = *x;
                    }
                    points.extend(cuts);
                }
                points.push(piece.b);
            }
            self.lines[li].points = points;
        }

        for piece in &removed {
            self.cdt.remove_constraint(&piece.a, &piece.b);
        }
        // pieces sharing a stretch with a removed one lost their flags there
        for line in &self.lines {
            for piece in line.pieces() {
                if removed
                    .iter()
                    .any(|r| r.intersect(&piece) == SegmentIntersection::Overlap)
                {
                    reinsert.push((piece, line.color_st, line.color_ts));
                }
            }
        }
        for (piece, c_ab, c_ba) in reinsert {
            self.force_constraint(&piece.a, &piece.b, c_ab, c_ba)?;
        }

        on_new.sort_by(|a, b| seg.project(a).total_cmp(&seg.project(b)));
        on_new.dedup();
        for w in on_new.windows(2) {
            self.force_constraint(&w[0], &w[1], color_st, color_ts)?;
        }
        debug!(
            pieces = on_new.len() - 1,
            split = removed.len(),
            "inserted segment into arrangement"
        );
        self.lines.push(Line {
            points: on_new,
            color_st,
            color_ts,
        });
        Ok(())
    }

    /// Points where `piece` has to be split for the new segment `seg`, sorted
    /// from `piece.a` to `piece.b`. Points the new segment must pass through
    /// are appended to `on_new`.
    fn cuts(
        &mut self,
        seg: &Segment2,
        piece: &Segment2,
        on_new: &mut Vec<Point2>,
    ) -> Result<Vec<Point2>> {
        let mut cuts = Vec::new();
        match seg.intersect(piece) {
            SegmentIntersection::None => {}
            SegmentIntersection::Point(x) => {
                let x = self.snap(&x)?;
                on_new.push(x);
                if x != piece.a && x != piece.b {
                    cuts.push(x);
                }
            }
            SegmentIntersection::Overlap => {
                for p in [piece.a, piece.b] {
                    if seg.is_point_on(&p) {
                        on_new.push(p);
                    }
                }
                for p in [seg.a, seg.b] {
                    if piece.is_point_on(&p) && p != piece.a && p != piece.b {
                        cuts.push(p);
                    }
                }
            }
        }
        cuts.sort_by(|a, b| piece.project(a).total_cmp(&piece.project(b)));
        cuts.dedup();
        Ok(cuts)
    }

    /// Inserts a closed ring, each edge colored `color` on the side facing
    /// along the ring. Counter-clockwise rings thus color their interior side.
    pub fn insert_polygon(&mut self, ring: &[Point2], color: u32) -> Result<()> {
        assert!(ring.len() >= 2, "a shape needs at least two points");
        if ring.len() == 2 {
            return self.insert(&ring[0], &ring[1], color, 0);
        }
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[(i + 1) % ring.len()];
            self.insert(&a, &b, color, 0)?;
        }
        Ok(())
    }
}
