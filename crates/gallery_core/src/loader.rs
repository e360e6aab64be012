use rand::Rng;

use crate::shuffle::shuffle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// Position 0, nothing handed out yet.
    Idle,
    Iterating,
    /// Position equals the dataset length. An empty loader starts here.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("data loader exhausted after {len} items")]
pub struct ExhaustedError {
    pub len: usize,
}

/// Resumable cursor over a fixed dataset, read through an index permutation.
///
/// The permutation is always a bijection onto `0..len`. `reset` restores the
/// identity order; `shuffle` permutes it in place without touching the
/// position, so shuffling mid-iteration may revisit or skip items. Call
/// `reset` first for a clean reshuffled pass.
#[derive(Debug, Clone)]
pub struct DataLoader<T> {
    data: Vec<T>,
    order: Vec<usize>,
    position: usize,
}

impl<T> DataLoader<T> {
    pub fn new(data: Vec<T>) -> Self {
        let order = (0..data.len()).collect();
        Self {
            data,
            order,
            position: 0,
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
        for (slot, index) in self.order.iter_mut().enumerate() {
            *index = slot;
        }
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        shuffle(&mut self.order, rng);
    }

    /// Returns the next item and whether it was the final one.
    pub fn next(&mut self) -> Result<(&T, bool), ExhaustedError> {
        let len = self.data.len();
        if self.position >= len {
            return Err(ExhaustedError { len });
        }
        let index = self.order[self.position];
        self.position += 1;
        Ok((&self.data[index], self.position == len))
    }

    pub fn done(&self) -> bool {
        self.position >= self.data.len()
    }

    pub fn state(&self) -> LoaderState {
        if self.done() {
            LoaderState::Exhausted
        } else if self.position == 0 {
            LoaderState::Idle
        } else {
            LoaderState::Iterating
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current permutation, one dataset index per position.
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

impl<T> Default for DataLoader<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
