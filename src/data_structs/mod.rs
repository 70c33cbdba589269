//! Data structures shared by the conversion stages.
//!
//! - [`TempBin`]: a melting temperature quantised to an exact integer bin,
//!   with the canonical `"80"` / `"80.8"` text label.
//! - [`SampleColumn`] and [`PeakSide`]: a parsed `<sample>_L[.<rep>]` column
//!   name of the raw table.
//! - [`RawMeltTable`]: the well-level melting temperature table, split into
//!   [`WellRow`]s and [`MetadataRow`]s.
//! - [`CalibrationTable`]: the temperature to methylation density mapping of
//!   a locus.
//! - [`SampleRecord`]: per-sample melt peak counts and metadata.
//! - [`DensityTable`]: the final numU/numM/MD table.
//! - [`typedef`]: type aliases for temperatures, densities and counts.

mod calibration;
mod column;
mod density;
mod melt_table;
mod record;
mod temp_bin;
pub mod typedef;

pub use calibration::CalibrationTable;
pub use column::{
    PeakSide,
    SampleColumn,
};
pub use density::{
    DensityRow,
    DensityTable,
    MD_COL,
    NUM_M_COL,
    NUM_U_COL,
};
pub use melt_table::{
    MetadataRow,
    RawMeltTable,
    WellRow,
};
pub use record::{
    MetaValue,
    SampleRecord,
    COPIES_LOADED_FIELD,
    SAMPLE_FIELD,
};
pub use temp_bin::TempBin;
