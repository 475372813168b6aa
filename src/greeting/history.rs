use std::collections::VecDeque;

/// Recently shown greeting indices for one language, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentHistory {
    capacity: usize,
    indices: VecDeque<usize>,
}

impl RecentHistory {
    pub fn new(capacity: usize) -> Self {
        RecentHistory {
            capacity,
            indices: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append `index`, evicting the oldest entries past capacity.
    pub fn push(&mut self, index: usize) {
        self.indices.push_back(index);
        while self.indices.len() > self.capacity {
            self.indices.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}
