pub mod hash;

use std::fmt;

use crate::error::Result;
use crate::filter::Filter;
use crate::params::FilterParams;

/// Bloom filter over a packed bit array of `m` bits, probing `k` positions
/// per key.
///
/// The `k` positions are derived from two base hashes by double hashing:
/// probe `i` is `(h1 + i * h2) % m`, with `h1 = fmix64(djb2(key)) % m` and
/// `h2 = fmix64(sdbm(key)) % m`. There is no delete, bits only ever go from
/// 0 to 1.
#[derive(PartialEq, Eq)]
pub struct BloomFilter {
    bits: Vec<u8>,
    m: u64,
    k: u64,
}

impl BloomFilter {
    /// Rejects `m == 0`, `k == 0` and `m < k`.
    pub fn try_new(m: u64, k: u64) -> Result<Self> {
        let params = FilterParams::new(m, k)?;
        let size = if m / 8 * 8 == m { m / 8 } else { m / 8 + 1 };
        Ok(BloomFilter {
            bits: vec![0; size as usize],
            m: params.bits,
            k: params.probes,
        })
    }

    pub fn with_params(params: FilterParams) -> Result<Self> {
        Self::try_new(params.bits, params.probes)
    }

    pub fn bits(self: &Self) -> u64 {
        self.m
    }

    pub fn probes(self: &Self) -> u64 {
        self.k
    }

    pub fn params(self: &Self) -> FilterParams {
        FilterParams {
            bits: self.m,
            probes: self.k,
        }
    }

    /// The `k` bit positions examined for `key`, in probe order.
    pub fn probe_positions<'a>(self: &'a Self, key: &str) -> impl Iterator<Item = u64> + 'a {
        let hashes = self.base_hashes(key);
        (0..self.k).map(move |i| self.probe(hashes, i))
    }

    /// Both base hashes, already reduced mod `m`.
    #[inline]
    fn base_hashes(self: &Self, key: &str) -> (u64, u64) {
        let (h1, h2) = hash::base_hashes(key);
        (h1 % self.m, h2 % self.m)
    }

    #[inline]
    fn probe(self: &Self, (h1, h2): (u64, u64), i: u64) -> u64 {
        h1.wrapping_add(i.wrapping_mul(h2)) % self.m
    }

    /// Number of bits set, only useful to observe saturation.
    pub fn bit_count(self: &Self) -> u64 {
        self.bits.iter().map(|byte| byte.count_ones() as u64).sum()
    }

    pub fn fill_ratio(self: &Self) -> f64 {
        self.bit_count() as f64 / self.m as f64
    }

    #[inline]
    fn is_set(self: &Self, bit: u64) -> bool {
        (self.bits[(bit >> 3) as usize] >> (bit & 7) as u8) & 1 == 1
    }
}

impl Filter for BloomFilter {
    fn insert(self: &mut Self, key: &str) {
        let hashes = self.base_hashes(key);
        for i in 0..self.k {
            let bit_to_set = self.probe(hashes, i);
            self.bits[(bit_to_set >> 3) as usize] |= 1 << (bit_to_set & 7) as u8;
        }
    }

    fn contains(self: &Self, key: &str) -> bool {
        self.probe_positions(key).all(|bit| self.is_set(bit))
    }
}

// The bit array can be megabytes, keep it out of debug output.
impl fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("m", &self.m)
            .field("k", &self.k)
            .field("bits_set", &self.bit_count())
            .finish()
    }
}
