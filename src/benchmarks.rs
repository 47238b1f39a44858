use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, error, info, trace};
use rand::{distributions::Alphanumeric, Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::filter::{bloom::BloomFilter, exact::ExactSet, Filter};
use crate::params::FilterParams;
use crate::trace::{Opcode, Operation};

const SYNTHETIC_KEY_LENGTH: usize = 16;

/// Apply `operations` in order, collecting one answer per query.
pub fn replay(filter: &mut dyn Filter, operations: &[Operation]) -> Vec<bool> {
    let mut answers = vec![];
    for op in operations {
        match op.opcode {
            Opcode::Insert => filter.insert(&op.key),
            Opcode::Query => answers.push(filter.contains(&op.key)),
            Opcode::Unrecognized(symbol) => {
                trace!("skipping unrecognized opcode '{}' for '{}'", symbol, op.key)
            }
        }
    }
    answers
}

/// Times the whole replay as one unit, not the individual operations.
pub fn timed_replay(filter: &mut dyn Filter, operations: &[Operation]) -> (Vec<bool>, Duration) {
    let start = Instant::now();
    let answers = replay(filter, operations);
    (answers, start.elapsed())
}

/// Query outcomes of the bloom filter, classified against the exact set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Accuracy {
    pub queries: u64,
    /// queries for keys that are members
    pub true_positives: u64,
    /// queries for keys that are not members
    pub true_negatives: u64,
    pub false_positives: u64,
    /// must stay zero, anything else is a broken filter
    pub false_negatives: u64,
}

impl Accuracy {
    /// `None` if no non-member was ever queried, the rate is undefined then.
    pub fn false_positive_rate(self: &Self) -> Option<f64> {
        if self.true_negatives == 0 {
            None
        } else {
            Some(self.false_positives as f64 / self.true_negatives as f64)
        }
    }
}

/// Compare the answer streams position by position.
pub fn compare(bloom: &[bool], exact: &[bool]) -> Result<Accuracy> {
    if bloom.len() != exact.len() {
        return Err(Error::AnswerStreamMismatch {
            bloom: bloom.len(),
            exact: exact.len(),
        });
    }
    let mut accuracy = Accuracy::default();
    for (bloom_says, is_member) in bloom.iter().zip(exact) {
        accuracy.queries += 1;
        match (is_member, bloom_says) {
            (true, true) => accuracy.true_positives += 1,
            (true, false) => {
                accuracy.true_positives += 1;
                accuracy.false_negatives += 1;
            }
            (false, true) => {
                accuracy.true_negatives += 1;
                accuracy.false_positives += 1;
            }
            (false, false) => accuracy.true_negatives += 1,
        }
    }
    Ok(accuracy)
}

#[derive(Debug, serde::Serialize)]
pub struct BenchmarkResult {
    pub params: FilterParams,
    pub bloom_time: Duration,
    pub exact_time: Duration,
    /// written separately as `Y`/`N`, too large for a summary
    #[serde(skip)]
    pub bloom_answers: Vec<bool>,
    pub accuracy: Accuracy,
    pub bits_set: u64,
    /// distinct keys inserted over the whole trace
    pub distinct_keys: u64,
}

impl BenchmarkResult {
    pub fn expected_false_positive_rate(self: &Self) -> f64 {
        self.params.expected_false_positive_rate(self.distinct_keys)
    }
}

/// Replay the same trace through a fresh bloom filter and a fresh exact set,
/// then measure the bloom filter against the exact answers.
pub fn run_benchmark(operations: &[Operation], params: FilterParams) -> Result<BenchmarkResult> {
    let mut bloom = BloomFilter::with_params(params)?;
    let (bloom_answers, bloom_time) = timed_replay(&mut bloom, operations);
    debug!(
        "bloom filter: replayed {} operations in {:?}",
        operations.len(),
        bloom_time
    );

    let mut exact = ExactSet::new();
    let (exact_answers, exact_time) = timed_replay(&mut exact, operations);
    debug!(
        "exact set: replayed {} operations in {:?}",
        operations.len(),
        exact_time
    );

    let accuracy = compare(&bloom_answers, &exact_answers)?;
    if accuracy.false_negatives > 0 {
        error!(
            "bloom filter reported {} false negatives",
            accuracy.false_negatives
        );
    }
    info!(
        "bloom filter saturation: {} of {} bits set ({:.2}%)",
        bloom.bit_count(),
        bloom.bits(),
        bloom.fill_ratio() * 100.0
    );

    Ok(BenchmarkResult {
        params,
        bloom_time,
        exact_time,
        bloom_answers,
        accuracy,
        bits_set: bloom.bit_count(),
        distinct_keys: exact.len() as u64,
    })
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "m: {}, k: {}", self.params.bits, self.params.probes)?;
        writeln!(f, "Bloom filter time: {} ms", self.bloom_time.as_millis())?;
        writeln!(f, "Exact set time: {} ms", self.exact_time.as_millis())?;
        writeln!(f, "Member queries: {}", self.accuracy.true_positives)?;
        writeln!(
            f,
            "False positives in bloom filter: {}",
            self.accuracy.false_positives
        )?;
        match self.accuracy.false_positive_rate() {
            Some(rate) => write!(f, "False positive rate: {:.4} %", rate * 100.0)?,
            None => write!(f, "False positive rate: no data")?,
        }
        write!(
            f,
            " (expected {:.4} %)",
            self.expected_false_positive_rate() * 100.0
        )
    }
}

pub fn result_csv_header() -> String {
    [
        "bits",
        "probes",
        "distinct_keys",
        "bits_set",
        "queries",
        "true_positives",
        "true_negatives",
        "false_positives",
        "false_negatives",
        "fp_rate",
        "expected_fp_rate",
        "bloom_ms",
        "exact_ms",
    ]
    .iter()
    .join(",")
}

pub fn result_csv_line(result: &BenchmarkResult) -> String {
    let fp_rate = result
        .accuracy
        .false_positive_rate()
        .map(|rate| format!("{:.6}", rate))
        .unwrap_or_default();
    [
        result.params.bits.to_string(),
        result.params.probes.to_string(),
        result.distinct_keys.to_string(),
        result.bits_set.to_string(),
        result.accuracy.queries.to_string(),
        result.accuracy.true_positives.to_string(),
        result.accuracy.true_negatives.to_string(),
        result.accuracy.false_positives.to_string(),
        result.accuracy.false_negatives.to_string(),
        fp_rate,
        format!("{:.6}", result.expected_false_positive_rate()),
        format!("{:.3}", result.bloom_time.as_secs_f64() * 1000.0),
        format!("{:.3}", result.exact_time.as_secs_f64() * 1000.0),
    ]
    .iter()
    .join(",")
}

/// `count` distinct random alphanumeric keys.
pub fn synthetic_keys(count: usize, rng: &mut impl Rng) -> Vec<String> {
    let mut seen = HashSet::with_capacity(count);
    let mut keys = Vec::with_capacity(count);
    while keys.len() < count {
        let key: String = (&mut *rng)
            .sample_iter(&Alphanumeric)
            .take(SYNTHETIC_KEY_LENGTH)
            .map(char::from)
            .collect();
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

/// A reproducible trace: `inserts` distinct keys are inserted, followed by
/// `queries` queries. Each query hits an inserted key with probability
/// `member_ratio`, otherwise it asks for a key that was never inserted.
pub fn synthetic_trace(
    inserts: usize,
    queries: usize,
    member_ratio: f64,
    seed: u64,
) -> Result<Vec<Operation>> {
    if !(0.0..=1.0).contains(&member_ratio) {
        return Err(Error::MemberRatioOutOfRange(member_ratio));
    }
    // Uses a random generator starting from a fixed seed, so the same trace can
    // be generated again without storing it.
    let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(seed);
    let keys = synthetic_keys(inserts + queries, &mut rng);
    let (members, outsiders) = keys.split_at(inserts);

    let mut operations = Vec::with_capacity(inserts + queries);
    operations.extend(members.iter().map(Operation::insert));
    for outsider in outsiders {
        if !members.is_empty() && rng.gen_bool(member_ratio) {
            let member = &members[rng.gen_range(0..members.len())];
            operations.push(Operation::query(member));
        } else {
            operations.push(Operation::query(outsider));
        }
    }
    Ok(operations)
}
