//! Bloom filter with double hashing, benchmarked against an exact hash set
//! on a shared operation trace.
//!
//! ```
//! use bloom_bench::filter::{bloom::BloomFilter, Filter};
//! use bloom_bench::params::FilterParams;
//!
//! let params = FilterParams::optimal(1_000_000, 0.01).unwrap();
//! assert_eq!((params.bits, params.probes), (9_585_059, 7));
//!
//! let mut filter = BloomFilter::with_params(params).unwrap();
//! filter.insert("abc");
//! assert!(filter.contains("abc"));
//! ```

pub mod benchmarks;
pub mod error;
pub mod filter;
pub mod params;
pub mod trace;
