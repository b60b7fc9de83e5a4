use thiserror::Error;

/// Failures while reading or writing variable-length quantities.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VlqError {
    #[error("value {0} exceeds the 28-bit VLQ range")]
    Overflow(u32),
    #[error("VLQ ended before a terminating byte")]
    Truncated,
    #[error("VLQ longer than four bytes")]
    TooLong,
}

/// Invalid composer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ticks per quarter must be 1..=32767, got {0}")]
    TicksPerQuarter(u16),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("track encoding failed: {0}")]
    Vlq(#[from] VlqError),
    #[error("track chunk of {0} bytes does not fit a 32-bit length")]
    TrackTooLarge(usize),
}
