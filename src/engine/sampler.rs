// Randomised neighbour window.
//
// A full O(n²) neighbour scan is out of reach at 100k agents per tick. Each
// agent instead looks at one contiguous, randomly placed run of at most
// `search_range + 1` slots. Over many ticks every agent meets a spread of
// neighbours; within a single tick the influence is noisy and partial.

use std::ops::Range;

use rand::Rng;

/// Half-open run of buffer indices. May be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborWindow {
    pub start: usize,
    pub end: usize,
}

impl NeighborWindow {
    pub const EMPTY: NeighborWindow = NeighborWindow { start: 0, end: 0 };

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Pick a random window into a buffer of `buffer_len` slots.
///
/// `start` is uniform in `[0, buffer_len)`, `end` uniform in
/// `(start, start + 1 + search_range]`, then clamped to `buffer_len`.
/// The result always satisfies `start <= end <= buffer_len`.
pub fn sample_window<R: Rng + ?Sized>(
    buffer_len: usize,
    search_range: usize,
    rng: &mut R,
) -> NeighborWindow {
    if buffer_len == 0 {
        return NeighborWindow::EMPTY;
    }

    let start = rng.gen_range(0..buffer_len);
    let upper = start.saturating_add(1).saturating_add(search_range);
    let end = rng.gen_range(start + 1..=upper).min(buffer_len);

    NeighborWindow { start, end: end.max(start) }
}
