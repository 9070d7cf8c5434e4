use thiserror::Error;

pub type ScaleResult<T> = Result<T, ScaleError>;

#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    #[error("date out of representable range: {0}")]
    DateOutOfRange(String),

    #[error("there is no year 0 in the proleptic calendar")]
    NoYearZero,

    #[error("invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
