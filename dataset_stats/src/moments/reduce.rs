use super::{merge, MeanPolicy, MomentTriple};

/// Folds a sequence of triples along a balanced binary tree.
///
/// A range of `len` triples is split into `len / 2` on the left and the rest
/// on the right. Floating-point merges are not associative, so the split rule
/// is part of the result: keep it fixed to reproduce earlier values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reducer {
    mean_policy: MeanPolicy,
    parallel_threshold: usize,
}

impl Reducer {
    /// Sequential reducer.
    pub fn new(mean_policy: MeanPolicy) -> Self {
        Self {
            mean_policy,
            parallel_threshold: 0,
        }
    }

    /// Ranges of at least `threshold` triples reduce their halves concurrently.
    /// `0` keeps the reduction on the calling thread. The merge tree and
    /// therefore the result are the same either way.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns `None` for an empty sequence.
    pub fn reduce(&self, triples: &[MomentTriple]) -> Option<MomentTriple> {
        if triples.is_empty() {
            return None;
        }
        Some(self.reduce_range(triples, 0, triples.len()))
    }

    fn reduce_range(&self, triples: &[MomentTriple], start: usize, end: usize) -> MomentTriple {
        let len = end - start;
        match len {
            1 => triples[start],
            2 => merge(&triples[start], &triples[start + 1], self.mean_policy),
            _ => {
                let mid = start + len / 2;
                let (left, right) = if self.parallel_threshold > 0 && len >= self.parallel_threshold
                {
                    rayon::join(
                        || self.reduce_range(triples, start, mid),
                        || self.reduce_range(triples, mid, end),
                    )
                } else {
                    (
                        self.reduce_range(triples, start, mid),
                        self.reduce_range(triples, mid, end),
                    )
                };
                merge(&left, &right, self.mean_policy)
            }
        }
    }
}
