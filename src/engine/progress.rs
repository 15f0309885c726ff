use serde::Serialize;
use std::cmp::Ordering;

/// Completion fraction of a case: stages left behind over stages in the graph.
///
/// Kept as a rational so comparisons are exact; `ratio` and `percent` are
/// for display.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Progress {
    done: usize,
    total: usize,
}

impl Progress {
    /// `total` of zero is treated as one.
    pub fn new(done: usize, total: usize) -> Self {
        let total = total.max(1);
        Self {
            done: done.min(total),
            total,
        }
    }

    pub fn complete() -> Self {
        Self { done: 1, total: 1 }
    }

    pub fn done(&self) -> usize {
        self.done
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.done == self.total
    }

    pub fn ratio(&self) -> f64 {
        self.done as f64 / self.total as f64
    }

    pub fn percent(&self) -> u8 {
        (self.done * 100 / self.total) as u8
    }
}

impl PartialEq for Progress {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Progress {}

impl PartialOrd for Progress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Progress {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.done * other.total).cmp(&(other.done * self.total))
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
