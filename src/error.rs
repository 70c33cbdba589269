use std::path::{
    Path,
    PathBuf,
};

use polars::prelude::PolarsError;
use thiserror::Error;

/// Every failure the conversion can hit. All of them abort the run.
#[derive(Error, Debug)]
pub enum DreamingError {
    #[error("Input format error: {0}")]
    InputFormat(String),

    #[error(
        "Melting temperature {temperature} observed in sample '{sample}' has no \
         entry in the calibration table. The locus needs to be recalibrated."
    )]
    CalibrationCoverage {
        temperature: String,
        sample:      String,
    },

    #[error(
        "Calibration table holds {densities} distinct methylation densities, but \
         {n_cpgs} CpGs require exactly {expected}"
    )]
    Alignment {
        densities: usize,
        n_cpgs:    u32,
        expected:  usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl DreamingError {
    pub fn input_format<S: Into<String>>(message: S) -> Self {
        Self::InputFormat(message.into())
    }

    pub fn io<P: AsRef<Path>>(
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DreamingError>;
