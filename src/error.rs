use snafu::Snafu;

/// Invalid input handed to the codec, the Chase layer or one of the channel
/// collaborators.
///
/// Every operation validates its arguments before doing any work, so an error
/// never leaves caller data half-modified.
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParameterError {
    /// Check bit count outside the supported range
    #[snafu(display("the number of check bits must be in 2..={max}, got {r}"))]
    InvalidCheckBits { r: usize, max: usize },

    /// A bit sequence has the wrong length
    #[snafu(display("{what} must be {expected} bits long, got {actual}"))]
    WrongLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A codeword is neither n nor n+1 bits long
    #[snafu(display("codeword must be {n} or {extended} bits long, got {actual}"))]
    WrongCodewordLength {
        n: usize,
        extended: usize,
        actual: usize,
    },

    /// A bit is something other than 0 or 1
    #[snafu(display("{what} bit {index} is {value}, expected 0 or 1"))]
    NonBinary {
        what: &'static str,
        index: usize,
        value: u8,
    },

    /// Empty input where at least one element is required
    #[snafu(display("{what} must not be empty"))]
    Empty { what: &'static str },

    /// Code length or distance is zero
    #[snafu(display("code length and distance must be positive, got n={n}, d={d}"))]
    InvalidCodeShape { n: usize, d: usize },

    /// Number of probe positions does not fit the code length
    #[snafu(display("cannot place {count} probe positions in a {n} bit word"))]
    InvalidProbeWeight { count: usize, n: usize },

    /// Enumeration would exceed the probe budget
    #[snafu(display("weight {weight} probes over {n} bits exceed the limit of {max} patterns"))]
    TooManyProbes { n: usize, weight: usize, max: usize },

    /// A reliability or soft decision vector is misaligned with its message
    #[snafu(display("{what} has {actual} values, expected {expected}"))]
    SoftLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A soft value is NaN or infinite
    #[snafu(display("soft decision {index} is not finite"))]
    NonFiniteSoft { index: usize },

    /// SNR is not usable to derive a noise variance
    #[snafu(display("SNR must be finite and positive in linear scale, got {snr_db} dB"))]
    InvalidSnr { snr_db: f64 },

    /// Bit flip probability outside [0, 1]
    #[snafu(display("error probability must be in [0, 1], got {p}"))]
    InvalidProbability { p: f64 },

    /// Passband carrier configuration is unusable
    #[snafu(display("invalid carrier configuration: {reason}"))]
    InvalidCarrier { reason: &'static str },

    /// Sample count does not split into whole symbols
    #[snafu(display(
        "sample count {samples} is not a multiple of {samples_per_symbol} samples per symbol"
    ))]
    PartialSymbol {
        samples: usize,
        samples_per_symbol: usize,
    },
}

pub type Result<T, E = ParameterError> = std::result::Result<T, E>;
