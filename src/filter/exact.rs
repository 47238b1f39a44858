use std::collections::HashSet;

use crate::filter::Filter;

/// Exact membership, the ground truth a bloom filter is measured against.
#[derive(Debug, Default)]
pub struct ExactSet {
    keys: HashSet<String>,
}

impl ExactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(self: &Self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(self: &Self) -> bool {
        self.keys.is_empty()
    }
}

impl Filter for ExactSet {
    fn insert(self: &mut Self, key: &str) {
        if !self.keys.contains(key) {
            self.keys.insert(key.to_string());
        }
    }

    fn contains(self: &Self, key: &str) -> bool {
        self.keys.contains(key)
    }
}
