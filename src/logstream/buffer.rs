//! Bounded FIFO of display lines.

use std::collections::VecDeque;

use crate::logstream::line::LiveLine;

/// Ordered lines, never more than `capacity`. When full, the oldest line
/// is evicted before the newest is appended.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: VecDeque<LiveLine>,
    capacity: usize,
}

impl LineBuffer {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append `line`, returning true when the oldest line was evicted.
    pub fn append(&mut self, line: LiveLine) -> bool {
        let evicted = self.lines.len() == self.capacity;
        if evicted {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        evicted
    }

    /// Replace the contents, keeping the last `capacity` of `seed`.
    pub fn reset(&mut self, seed: Vec<LiveLine>) {
        let skip = seed.len().saturating_sub(self.capacity);
        self.lines.clear();
        self.lines.extend(seed.into_iter().skip(skip));
    }

    pub fn snapshot(&self) -> Vec<LiveLine> {
        self.lines.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiveLine> + '_ {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&LiveLine> {
        self.lines.back()
    }
}
