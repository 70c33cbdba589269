//! Reading the two inputs and writing the output tables.
//!
//! The raw melt table is irregular (row labels mixing well numbers and
//! metadata names, ragged rows) and is read with the `csv` crate. The
//! calibration table is a plain two column CSV read through polars. Output
//! tables are polars DataFrames written with the polars CSV writer.

mod calibration;
mod melt;
mod naming;
mod write;

pub use calibration::{
    calibration_from_df,
    calibration_read_options,
    read_calibration_path,
    DENSITY_COL,
    TEMP_COL,
};
pub use melt::{
    read_melt_table,
    read_melt_table_path,
};
pub use naming::OutputNaming;
pub use write::{
    write_csv,
    write_csv_path,
    write_csv_paths,
    StagedCsv,
};
