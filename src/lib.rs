//! # dreaming-md
//!
//! `dreaming-md` converts raw DREAMing melting peak temperatures into a
//! methylation density table.
//!
//! A DREAMing assay splits a sample over many PCR wells and records, for each
//! well, the melting temperature of up to two products (`_L` and `_H`
//! columns). The melting temperature of a product tracks the methylation
//! density of the template. Given a calibration table mapping temperatures to
//! densities for the locus, the crate counts fragments per temperature,
//! pools temperatures by density and merges replicate assays. The result is
//! one row per density level, labelled with its number of unmethylated
//! (`numU`) and methylated (`numM`) CpGs, and one column per sample.
//!
//! ## Structure
//!
//! * [`data_structs`]: temperature bins, parsed column names, the raw table,
//!   the calibration table, per-sample records and the density table.
//! * [`io`]: CSV readers and writers and output file naming.
//! * [`tools`]: the load, aggregate, density and assemble stages and the
//!   [`PipelineConfig`](tools::pipeline::PipelineConfig) that runs them.
//! * [`utils`]: the Poisson correction and the shared thread pool.
//!
//! Number of threads used for per-sample aggregation can be configured with
//! the `DREAMING_NUM_THREADS` environment variable.
//!
//! ## Usage
//!
//! ```no_run
//! use dreaming_md::prelude::*;
//!
//! let config = PipelineConfig::new(14).with_background(true);
//! let output = config
//!     .run_files("20190211-DREAMing_raw.csv", "ZNF154MeltTempsToMD.csv")
//!     .unwrap();
//! let mut df = output.density_table.to_df().unwrap();
//! write_csv_path("methylation_density_table.csv", &mut df).unwrap();
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use error::{
    DreamingError,
    Result,
};
