use std::collections::VecDeque;

use tracing::warn;

/// Upper bound on the capacity reserved up front.
const INITIAL_CAPACITY_LIMIT: u32 = 1024;

/// Bounded list of recently observed positions.
///
/// Positions are expected in non-decreasing order; a position below the
/// largest one seen is logged and ignored. After each push, every retained
/// position lies within `window_size` of the largest position seen.
#[derive(Debug, Clone)]
pub struct SlidingPositionWindow {
    window_size: u32,
    positions: VecDeque<u32>,
    first: Option<u32>,
    last: Option<u32>,
}

impl SlidingPositionWindow {
    /// Create an empty window.
    pub fn new(window_size: u32) -> Self {
        Self {
            window_size,
            positions: VecDeque::with_capacity(
                (window_size / 2 + 1).min(INITIAL_CAPACITY_LIMIT) as usize,
            ),
            first: None,
            last: None,
        }
    }

    /// Record a position and prune those that fell out of the window.
    ///
    /// Returns `false` when `position` is below the largest position seen; the
    /// window is left unchanged in that case.
    pub fn push(&mut self, position: u32) -> bool {
        if let Some(last) = self.last.filter(|&last| position < last) {
            warn!(position, last, "ignoring out-of-order position in sliding window");
            return false;
        }
        self.last = Some(position);
        self.positions.push_back(position);

        while let Some(&oldest) = self.positions.front() {
            if position - oldest > self.window_size {
                self.positions.pop_front();
            } else {
                break;
            }
        }
        self.first = self.positions.front().copied();
        true
    }

    /// Smallest retained position.
    pub fn first(&self) -> Option<u32> {
        self.first
    }

    /// Largest position observed.
    pub fn last(&self) -> Option<u32> {
        self.last
    }

    /// Retained positions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.positions.iter().copied()
    }

    /// Number of retained positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no position is retained.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Maximum distance kept between the oldest and newest positions.
    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    /// Forget every position.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.first = None;
        self.last = None;
    }
}
