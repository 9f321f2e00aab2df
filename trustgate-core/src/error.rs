/// Errors produced by the `trustgate-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// An hour of day was outside `0..=23`.
    #[error("invalid hour {value}: must be in 0..=23")]
    InvalidHour { value: u8 },

    /// A trust score was above 100 or not a multiple of the signal weight.
    #[error("invalid trust score {value}: must be a multiple of 25 in 0..=100")]
    InvalidTrustScore { value: u8 },

    /// A caller trust threshold was outside `0..=100`.
    #[error("invalid trust threshold {value}: must be in 0..=100")]
    InvalidThreshold { value: u8 },
}
