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

//! Planar arrangements on top of a dynamic constrained Delaunay triangulation.
//!
//! Points and segments go into a [`Cdt`](operations::triangulation::Cdt); the
//! [`Arrangement`](arrangement::Arrangement) layer snaps and splits crossing
//! segments and partitions the triangulation into regions; the
//! [`boolean`] layer colors regions to compute unions, intersections and
//! differences of polygons.

pub mod arrangement;
pub mod boolean;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod mesh;
pub mod numeric;
pub mod operations;

pub use arrangement::{Arrangement, ArrangementOptions};
pub use boolean::{BooleanOp, UnionOptions, polygon_boolean, polygon_union};
pub use error::{Error, Result};
pub use geometry::{Aabb2, Point2, PolygonWithHoles};
pub use operations::triangulation::{Cdt, CdtOptions, Location, TriangulationQuery};
