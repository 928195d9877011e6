use std::result;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected configuration, detected before any segment work is done.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("start must be <= stop (start {start}, stop {stop})")]
    InvalidInterval { start: u64, stop: u64 },

    /// Cooperative cancellation signalled by a user callback. Caught by
    /// the driver and never returned from the public API.
    #[error("sieving stopped by callback")]
    Stopped,
}

pub type Result<T> = result::Result<T, Error>;
