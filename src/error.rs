use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("a bloom filter needs at least one bit")]
    ZeroBits,

    #[error("a bloom filter needs at least one probe per key")]
    ZeroProbes,

    #[error("{bits} bits cannot hold {probes} distinct probes")]
    TooFewBits { bits: u64, probes: u64 },

    #[error("expected element count must be positive")]
    ZeroExpectedElements,

    #[error("false positive rate {0} is outside of (0, 1)")]
    FalsePositiveRateOutOfRange(f64),

    #[error("member query ratio {0} is outside of [0, 1]")]
    MemberRatioOutOfRange(f64),

    #[error("answer streams differ in length: bloom {bloom}, exact {exact}")]
    AnswerStreamMismatch { bloom: usize, exact: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
