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

//! Sign predicates with a floating-point filter and an exact fallback.
//!
//! The static error bounds are Shewchuk's: when the filter cannot certify the
//! sign, the determinant is recomputed over exact rationals.

use crate::geometry::Point2;
use crate::numeric::ExactRational;

const EPSILON: f64 = f64::EPSILON * 0.5;
const CCW_ERRBOUND_A: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
const ICC_ERRBOUND_A: f64 = (10.0 + 96.0 * EPSILON) * EPSILON;

#[inline(always)]
fn sign(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Returns:
/// - 1 if `a, b, c` turn counter-clockwise
/// - -1 if clockwise
/// - 0 if collinear
pub fn orient2d(a: &Point2, b: &Point2, c: &Point2) -> i32 {
    let detleft = (a.x - c.x) * (b.y - c.y);
    let detright = (a.y - c.y) * (b.x - c.x);
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return sign(det);
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return sign(det);
        }
        -detleft - detright
    } else {
        return sign(det);
    };

    let errbound = CCW_ERRBOUND_A * detsum;
    if det >= errbound || -det >= errbound {
        return sign(det);
    }
    orient2d_exact(a, b, c)
}

fn orient2d_exact(a: &Point2, b: &Point2, c: &Point2) -> i32 {
    let [ax, ay, bx, by, cx, cy] = [a.x, a.y, b.x, b.y, c.x, c.y].map(ExactRational::from_f64);
    let acx = &ax - &cx;
    let acy = &ay - &cy;
    let bcx = &bx - &cx;
    let bcy = &by - &cy;
    (&(&acx * &bcy) - &(&acy * &bcx)).sign()
}

/// Returns 1 if `d` lies strictly inside the circle through `a, b, c`
/// (given counter-clockwise), -1 if strictly outside, 0 if cocircular.
/// The sign flips when `a, b, c` are clockwise.
pub fn incircle(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> i32 {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;
    let errbound = ICC_ERRBOUND_A * permanent;
    if det > errbound || -det > errbound {
        return sign(det);
    }
    incircle_exact(a, b, c, d)
}

fn incircle_exact(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> i32 {
    let dx = ExactRational::from_f64(d.x);
    let dy = ExactRational::from_f64(d.y);
    let lift = |p: &Point2| {
        let x = &ExactRational::from_f64(p.x) - &dx;
        let y = &ExactRational::from_f64(p.y) - &dy;
        let l = &(&x * &x) + &(&y * &y);
        (x, y, l)
    };
    let (adx, ady, alift) = lift(a);
    let (bdx, bdy, blift) = lift(b);
    let (cdx, cdy, clift) = lift(c);

    let ta = &alift * &(&(&bdx * &cdy) - &(&cdx * &bdy));
    let tb = &blift * &(&(&cdx * &ady) - &(&adx * &cdy));
    let tc = &clift * &(&(&adx * &bdy) - &(&bdx * &ady));
    (&(&ta + &tb) + &tc).sign()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_test() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert_eq!(orient2d(&a, &b, &c), 1);
        assert_eq!(orient2d(&a, &c, &b), -1);
    }

    #[test]
    fn near_collinear_is_decided_exactly() {
        // the filter cannot decide these; the exact path must
        let a = Point2::new(0.5, 0.5);
        let b = Point2::new(12.0, 12.0);
        let c = Point2::new(24.0, 24.0);
        assert_eq!(orient2d(&a, &b, &c), 0);

        let c2 = Point2::new(24.0, 24.0 + 4.0 * f64::EPSILON * 24.0);
        assert_eq!(orient2d(&a, &b, &c2), 1);
    }

    #[test]
    fn cocircular_square() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(1.0, 1.0);
        let d = Point2::new(0.0, 1.0);
        assert_eq!(incircle(&a, &b, &c, &d), 0);
        assert_eq!(incircle(&a, &b, &c, &Point2::new(0.5, 0.5)), 1);
        assert_eq!(incircle(&a, &b, &c, &Point2::new(3.0, 3.0)), -1);
    }
}
