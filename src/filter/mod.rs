pub mod bloom;
pub mod exact;

/// Basic membership trait, implemented by the bloom filter as well as the
/// exact reference set it is measured against.
pub trait Filter {
    fn insert(self: &mut Self, key: &str);

    fn contains(self: &Self, key: &str) -> bool;
}

#[cfg(test)]
pub mod correctness_tests {
    use rand::SeedableRng;

    use super::Filter;
    use crate::benchmarks::synthetic_keys;

    /// `count` distinct random keys, reproducible through `seed`.
    pub fn random_keys(count: usize, seed: u64) -> Vec<String> {
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(seed);
        synthetic_keys(count, &mut rng)
    }

    pub fn fill_from_keys(filter: &mut dyn Filter, inputs: &[String]) {
        inputs.iter().for_each(|key| filter.insert(key));
    }

    pub fn check_false_negatives(filter: &dyn Filter, expected_inputs: &[String]) {
        expected_inputs
            .iter()
            .for_each(|key| assert!(filter.contains(key), "filter does not contain {}", key));
    }

    /// estimate the false positive rate based on keys that are not part of the filter
    pub fn estimate_false_positive_rate(filter: &dyn Filter, missing: &[String]) -> f64 {
        let pos = missing.iter().filter(|key| filter.contains(key)).count();
        pos as f64 / missing.len() as f64
    }
}
