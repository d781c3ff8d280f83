//! Scanline seed fill over a packed pixel buffer.
//!
//! Rows are scanned in alternating full passes: the downward queue is drained, then the
//! upward queue, and so on until both are empty. A row scan
//! only fills runs that touch an already filled pixel in the row it was reached from,
//! which keeps disconnected runs of the same color untouched.

use std::collections::VecDeque;

use crate::{
    foundation::error::{PaintError, PaintResult},
    raster::buffer::PixelBuffer,
};

/// Counters reported by [`flood_fill`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Pixels whose value was replaced.
    pub filled: usize,
    /// Queued rows scanned after the seed run.
    pub rows_scanned: usize,
}

/// Replace the 4-connected region of the seed's color around `(x, y)` with `fill_color`.
///
/// A seed that already holds `fill_color` is a no-op. A seed outside the buffer returns
/// [`PaintError::OutOfBounds`] and leaves the buffer untouched.
#[tracing::instrument(skip(buffer), fields(width = buffer.width(), height = buffer.height()))]
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    x: i64,
    y: i64,
    fill_color: u32,
) -> PaintResult<FillStats> {
    let extent = buffer.extent();
    if !extent.contains(x, y) {
        return Err(PaintError::OutOfBounds {
            x,
            y,
            width: extent.width,
            height: extent.height,
        });
    }

    let width = extent.width as usize;
    let height = extent.height as usize;
    let (sx, sy) = (x as usize, y as usize);
    let pixels = buffer.pixels_mut();
    let match_color = pixels[sy * width + sx];
    if match_color == fill_color {
        return Ok(FillStats::default());
    }

    let mut scan = Scan {
        pixels,
        filled: vec![false; width * height],
        width,
        match_color,
        fill_color,
        stats: FillStats::default(),
    };

    let base = sy * width;
    let mut lo = sx;
    while lo > 0 && scan.pixels[base + lo - 1] == match_color {
        lo -= 1;
    }
    let mut hi = sx + 1;
    while hi < width && scan.pixels[base + hi] == match_color {
        hi += 1;
    }
    scan.fill_run(sy, lo, hi);

    let mut queues = [RowQueue::new(height), RowQueue::new(height)];
    if sy + 1 < height {
        queues[Direction::Down.slot()].push(sy + 1);
    }
    if sy > 0 {
        queues[Direction::Up.slot()].push(sy - 1);
    }

    let mut dir = Direction::Down;
    loop {
        while let Some(row) = queues[dir.slot()].pop() {
            scan.scan_row(row, dir, height, &mut queues);
        }
        if queues[dir.reverse().slot()].is_empty() {
            break;
        }
        dir = dir.reverse();
    }

    tracing::debug!(
        filled = scan.stats.filled,
        rows_scanned = scan.stats.rows_scanned,
        "flood fill finished"
    );
    Ok(scan.stats)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
}

impl Direction {
    fn slot(self) -> usize {
        match self {
            Self::Down => 0,
            Self::Up => 1,
        }
    }

    fn reverse(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    /// Next row in scan direction.
    fn ahead(self, row: usize, height: usize) -> Option<usize> {
        match self {
            Self::Down => (row + 1 < height).then_some(row + 1),
            Self::Up => row.checked_sub(1),
        }
    }

    /// Row the scan came from.
    fn behind(self, row: usize, height: usize) -> Option<usize> {
        self.reverse().ahead(row, height)
    }
}

/// FIFO of row indices; a row is held at most once while pending.
struct RowQueue {
    rows: VecDeque<usize>,
    pending: Vec<bool>,
}

impl RowQueue {
    fn new(height: usize) -> Self {
        Self {
            rows: VecDeque::new(),
            pending: vec![false; height],
        }
    }

    fn push(&mut self, row: usize) {
        if !self.pending[row] {
            self.pending[row] = true;
            self.rows.push_back(row);
        }
    }

    fn pop(&mut self) -> Option<usize> {
        let row = self.rows.pop_front()?;
        self.pending[row] = false;
        Some(row)
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct Scan<'a> {
    pixels: &'a mut [u32],
    filled: Vec<bool>,
    width: usize,
    match_color: u32,
    fill_color: u32,
    stats: FillStats,
}

impl Scan<'_> {
    fn fill_run(&mut self, row: usize, start: usize, end: usize) {
        let base = row * self.width;
        self.pixels[base + start..base + end].fill(self.fill_color);
        self.filled[base + start..base + end].fill(true);
        self.stats.filled += end - start;
    }

    fn scan_row(&mut self, row: usize, dir: Direction, height: usize, queues: &mut [RowQueue; 2]) {
        let Some(prev) = dir.behind(row, height) else {
            return;
        };
        self.stats.rows_scanned += 1;

        let base = row * self.width;
        let prev_base = prev * self.width;
        let mut any_filled = false;
        let mut x = 0;
        while x < self.width {
            if self.pixels[base + x] != self.match_color {
                x += 1;
                continue;
            }

            let start = x;
            let mut touches = false;
            while x < self.width && self.pixels[base + x] == self.match_color {
                touches |= self.filled[prev_base + x];
                x += 1;
            }
            if !touches {
                continue;
            }

            self.fill_run(row, start, x);
            any_filled = true;

            // Arms of the region that turn back towards where the scan came from.
            if self.pixels[prev_base + start..prev_base + x].contains(&self.match_color) {
                queues[dir.reverse().slot()].push(prev);
            }
        }

        if any_filled && let Some(next) = dir.ahead(row, height) {
            queues[dir.slot()].push(next);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fill/scanline.rs"]
mod tests;
