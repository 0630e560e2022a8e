use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("tape is not sorted: record {index} at {at}s precedes {prev}s")]
    Unsorted { index: usize, at: u64, prev: u64 },

    #[error("tape parameter error: {0}")]
    Params(String),

    #[error("tape parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DemandResult<T> = Result<T, DemandError>;
