use fl_core::FlError;
use thiserror::Error;

use crate::FlowDefect;

#[derive(Debug, Error)]
pub enum TimetableError {
    #[error(transparent)]
    Core(#[from] FlError),

    #[error("model configuration error: {0}")]
    Config(String),

    #[error("flow record {record}: {defect}")]
    InvalidFlow {
        record: usize,
        #[source]
        defect: FlowDefect,
    },

    #[error("flow table parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TimetableResult<T> = Result<T, TimetableError>;
