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

//! Snap-rounded segment arrangement and its region partition.

pub mod arrangement;
pub mod region;
pub mod winding;

pub use arrangement::{Arrangement, Line};

use crate::operations::triangulation::CdtOptions;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrangementOptions {
    /// Points closer than this to an already inserted point are moved onto
    /// it. Zero keeps every distinct point.
    pub threshold: f64,
    pub seed: u64,
}

impl Default for ArrangementOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            seed: CdtOptions::default().seed,
        }
    }
}

impl ArrangementOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}
