//! Unit-spaced stamp points between two pointer samples.

use kurbo::{Point, Vec2};

/// Points from `p0` (exclusive) to `p1` (inclusive), one stamp per pixel of Chebyshev
/// distance.
///
/// With `steps = round(max(|dx|, |dy|))`, yields `p0 + i * (dx, dy) / steps` for
/// `i in 1..steps` followed by `p1`. Short or zero-length segments yield only `p1`.
/// The iterator is `Clone`, so a copy taken before iteration restarts the sequence.
pub fn interpolate(p0: Point, p1: Point) -> Interpolation {
    let d = p1 - p0;
    let len = d.x.abs().max(d.y.abs());
    let steps = if len.is_finite() { len.round() as u32 } else { 0 };
    let step = if steps > 1 {
        d / f64::from(steps)
    } else {
        Vec2::ZERO
    };
    Interpolation {
        p0,
        p1,
        step,
        steps,
        next: 1,
        done: false,
    }
}

/// Lazy point sequence produced by [`interpolate`].
#[derive(Clone, Debug)]
pub struct Interpolation {
    p0: Point,
    p1: Point,
    step: Vec2,
    steps: u32,
    next: u32,
    done: bool,
}

impl Interpolation {
    /// Number of points strictly between the endpoints.
    pub fn intermediate_count(&self) -> usize {
        self.steps.saturating_sub(1) as usize
    }
}

impl Iterator for Interpolation {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        if self.next < self.steps {
            let p = self.p0 + self.step * f64::from(self.next);
            self.next += 1;
            return Some(p);
        }
        self.done = true;
        Some(self.p1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.done {
            0
        } else {
            self.steps.saturating_sub(self.next) as usize + 1
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Interpolation {}

impl std::iter::FusedIterator for Interpolation {}

#[cfg(test)]
#[path = "../../tests/unit/stroke/interp.rs"]
mod tests;
