pub use crate::data_structs::typedef::*;
pub use crate::data_structs::{
    CalibrationTable,
    DensityRow,
    DensityTable,
    MetaValue,
    PeakSide,
    RawMeltTable,
    SampleColumn,
    SampleRecord,
    TempBin,
};
pub use crate::error::{
    DreamingError,
    Result,
};
pub use crate::io::{
    read_calibration_path,
    read_melt_table,
    read_melt_table_path,
    write_csv,
    write_csv_path,
    write_csv_paths,
    OutputNaming,
};
pub use crate::tools::pipeline::{
    PipelineConfig,
    PipelineOutput,
    RunSummary,
};
