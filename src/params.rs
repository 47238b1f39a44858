use std::f64::consts::LN_2;

use crate::error::{Error, Result};

/// Size of the bit array (`bits`, a.k.a. `m`) and number of probes per key
/// (`probes`, a.k.a. `k`) of a bloom filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct FilterParams {
    pub bits: u64,
    pub probes: u64,
}

impl FilterParams {
    /// Explicit parameters, validated the same way the filter validates them.
    pub fn new(bits: u64, probes: u64) -> Result<Self> {
        if bits == 0 {
            return Err(Error::ZeroBits);
        }
        if probes == 0 {
            return Err(Error::ZeroProbes);
        }
        if bits < probes {
            return Err(Error::TooFewBits { bits, probes });
        }
        Ok(Self { bits, probes })
    }

    /// Derive the optimal parameters for `n` expected elements at a target
    /// false positive probability `p`:
    ///
    /// - `m = ceil(-n * ln(p) / ln(2)^2)`
    /// - `k = round(m / n * ln(2))`
    ///
    /// `k` is clamped into `[1, m]`: for large `p` the formula rounds down to
    /// zero probes, which would yield a filter that answers "yes" to anything.
    pub fn optimal(n: u64, p: f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::ZeroExpectedElements);
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::FalsePositiveRateOutOfRange(p));
        }
        let n = n as f64;
        let bits = (-n * p.ln() / (LN_2 * LN_2)).ceil().max(1.0) as u64;
        let probes = (bits as f64 / n * LN_2).round() as u64;
        Ok(Self {
            bits,
            probes: probes.clamp(1, bits),
        })
    }

    /// Theoretical false positive rate after `inserted` distinct keys:
    /// `(1 - e^(-k * n / m))^k`.
    pub fn expected_false_positive_rate(self: &Self, inserted: u64) -> f64 {
        let k = self.probes as f64;
        let exponent = -k * inserted as f64 / self.bits as f64;
        (1.0 - exponent.exp()).powf(k)
    }
}

#[cfg(test)]
mod tests {
    use super::FilterParams;
    use crate::error::Error;

    #[test]
    fn one_million_at_one_percent() -> anyhow::Result<()> {
        let params = FilterParams::optimal(1_000_000, 0.01)?;
        assert_eq!(params.bits, 9_585_059);
        assert_eq!(params.probes, 7);
        Ok(())
    }

    #[test]
    fn small_filters() -> anyhow::Result<()> {
        // 10 bits per element, 7 functions --> < 1% fp
        let params = FilterParams::optimal(1_000, 0.01)?;
        assert_eq!(params.bits, 9_586);
        assert_eq!(params.probes, 7);
        let expected = params.expected_false_positive_rate(1_000);
        assert!(expected < 0.011, "expected fp rate {} !< 0.011", expected);
        Ok(())
    }

    #[test]
    fn probes_never_round_down_to_zero() -> anyhow::Result<()> {
        // m = 21, m / n * ln(2) ~ 0.015 would round to 0
        let params = FilterParams::optimal(1_000, 0.99)?;
        assert_eq!(params.bits, 21);
        assert_eq!(params.probes, 1);
        Ok(())
    }

    #[test]
    fn reject_degenerate_inputs() {
        assert!(matches!(
            FilterParams::optimal(0, 0.01),
            Err(Error::ZeroExpectedElements)
        ));
        for p in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(
                matches!(
                    FilterParams::optimal(100, p),
                    Err(Error::FalsePositiveRateOutOfRange(_))
                ),
                "p = {} must be rejected",
                p
            );
        }
        assert!(matches!(FilterParams::new(0, 3), Err(Error::ZeroBits)));
        assert!(matches!(FilterParams::new(10, 0), Err(Error::ZeroProbes)));
        assert!(matches!(
            FilterParams::new(2, 3),
            Err(Error::TooFewBits { bits: 2, probes: 3 })
        ));
    }

    #[test]
    fn expected_rate_grows_with_load() -> anyhow::Result<()> {
        let params = FilterParams::new(1 << 16, 7)?;
        assert_eq!(params.expected_false_positive_rate(0), 0.0);
        let light = params.expected_false_positive_rate(1_000);
        let heavy = params.expected_false_positive_rate(10_000);
        assert!(light < heavy, "{} !< {}", light, heavy);
        Ok(())
    }
}
