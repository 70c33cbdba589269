use std::fs::File;
use std::path::Path;

use log::debug;
use polars::prelude::*;

use crate::data_structs::{
    CalibrationTable,
    TempBin,
};
use crate::error::{
    DreamingError,
    Result,
};

pub const TEMP_COL: &str = "temp";
pub const DENSITY_COL: &str = "MD";

pub fn calibration_read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(false))
}

/// Reads a calibration CSV with `temp` and `MD` columns.
pub fn read_calibration_path<P: AsRef<Path>>(path: P) -> Result<CalibrationTable> {
    let file = File::open(path.as_ref()).map_err(|e| DreamingError::io(&path, e))?;
    let df = calibration_read_options()
        .into_reader_with_file_handle(file)
        .finish()?;
    debug!(
        "Read calibration table {} with {} rows",
        path.as_ref().display(),
        df.height()
    );
    calibration_from_df(&df)
}

fn float_column(
    df: &DataFrame,
    name: &str,
) -> Result<Float64Chunked> {
    let column = df.column(name).map_err(|_| {
        DreamingError::input_format(format!(
            "Calibration table has no '{name}' column"
        ))
    })?;
    Ok(column.cast(&DataType::Float64)?.f64()?.clone())
}

/// Converts a `temp`/`MD` DataFrame into a [`CalibrationTable`], keeping row
/// order.
pub fn calibration_from_df(df: &DataFrame) -> Result<CalibrationTable> {
    let temps = float_column(df, TEMP_COL)?;
    let densities = float_column(df, DENSITY_COL)?;

    let pairs = temps
        .into_iter()
        .zip(densities.into_iter())
        .enumerate()
        .map(|(row, pair)| {
            match pair {
                (Some(temp), Some(density)) => {
                    let temp = TempBin::try_from_celsius(temp).map_err(|_| {
                        DreamingError::input_format(format!(
                            "Calibration row {}: '{temp}' is not a melting temperature",
                            row + 1
                        ))
                    })?;
                    Ok((temp, density))
                },
                _ => {
                    Err(DreamingError::input_format(format!(
                        "Calibration row {} has a missing or non-numeric value",
                        row + 1
                    )))
                },
            }
        })
        .collect::<Result<Vec<_>>>()?;

    CalibrationTable::from_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_from_df_canonicalises_temps() {
        let df = df!(
            TEMP_COL => [79.8, 80.0, 80.2],
            DENSITY_COL => [0.0, 0.07, 0.14],
        )
        .unwrap();
        let table = calibration_from_df(&df).unwrap();
        let labels: Vec<String> = table.entries().iter().map(|(t, _)| t.label()).collect();
        assert_eq!(labels, vec!["79.8", "80", "80.2"]);
        assert_eq!(table.density(&TempBin::from_celsius(80.0)), Some(0.07));
    }

    #[test]
    fn test_integer_temps_and_missing_columns() {
        let df = df!(
            TEMP_COL => [80i64, 81],
            DENSITY_COL => [0.0, 1.0],
        )
        .unwrap();
        assert_eq!(calibration_from_df(&df).unwrap().len(), 2);

        let df = df!("temperature" => [80.0], DENSITY_COL => [0.0]).unwrap();
        assert!(matches!(
            calibration_from_df(&df),
            Err(DreamingError::InputFormat(msg)) if msg.contains(TEMP_COL)
        ));
    }

    #[test]
    fn test_null_density() {
        let df = df!(
            TEMP_COL => [80.0, 80.2],
            DENSITY_COL => [Some(0.0), None],
        )
        .unwrap();
        assert!(calibration_from_df(&df).is_err());
    }

    #[test]
    fn test_unbinnable_temperature() {
        let df = df!(
            TEMP_COL => [80.0, 1e300],
            DENSITY_COL => [0.0, 1.0],
        )
        .unwrap();
        assert!(matches!(
            calibration_from_df(&df),
            Err(DreamingError::InputFormat(msg)) if msg.contains("row 2")
        ));
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "temp,MD\n79.2,0.0\n80,0.07\n80.8,0.28").unwrap();
        file.flush().unwrap();
        let table = read_calibration_path(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.distinct_densities(), vec![0.0, 0.07, 0.28]);
    }
}
