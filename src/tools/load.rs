use log::{
    debug,
    info,
};
use serde::Serialize;

use crate::data_structs::{
    CalibrationTable,
    RawMeltTable,
    TempBin,
};
use crate::error::{
    DreamingError,
    Result,
};

/// Validated inputs of a run and the facts derived from them.
#[derive(Debug, Clone)]
pub struct LoadedInput<'a> {
    pub table:       &'a RawMeltTable,
    pub calibration: &'a CalibrationTable,
    /// Sorted unique sample names.
    pub samples:     Vec<String>,
    /// Lowest and highest observed peak, if any well has one.
    pub range:       Option<(TempBin, TempBin)>,
    /// Every bin of the observed range at the configured resolution.
    pub bins:        Vec<TempBin>,
}

/// Summary of the inputs for the run log.
#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub min_temp:   Option<TempBin>,
    pub max_temp:   Option<TempBin>,
    pub resolution: f64,
    pub n_wells:    usize,
    pub n_samples:  usize,
}

/// Fails on the first observed temperature missing from the calibration
/// table, scanning columns left to right and wells top to bottom.
pub fn check_calibration_coverage(
    table: &RawMeltTable,
    calibration: &CalibrationTable,
) -> Result<()> {
    for (idx, column) in table.columns().iter().enumerate() {
        if let Some(temp) = table
            .column_temps(idx)
            .flatten()
            .find(|temp| !calibration.contains(temp))
        {
            return Err(DreamingError::CalibrationCoverage {
                temperature: temp.label(),
                sample:      column.sample.clone(),
            });
        }
    }
    Ok(())
}

impl<'a> LoadedInput<'a> {
    pub fn new(
        table: &'a RawMeltTable,
        calibration: &'a CalibrationTable,
        resolution: f64,
    ) -> Result<Self> {
        let step = TempBin::from_celsius(resolution);
        if step <= TempBin::from_celsius(0.0) {
            return Err(DreamingError::InvalidConfig(format!(
                "Melting temperature resolution {resolution} rounds to zero"
            )));
        }
        if calibration.is_empty() {
            return Err(DreamingError::input_format(
                "The calibration table is empty",
            ));
        }

        check_calibration_coverage(table, calibration)?;
        let range = table.temp_range();
        let bins = table.temp_bins(step)?;

        let samples = table.sample_names();
        debug!("Samples: {:?}", samples);

        Ok(Self {
            table,
            calibration,
            samples,
            range,
            bins,
        })
    }

    pub fn summary(
        &self,
        resolution: f64,
    ) -> InputSummary {
        InputSummary {
            min_temp: self.range.map(|(min, _)| min),
            max_temp: self.range.map(|(_, max)| max),
            resolution,
            n_wells: self.table.n_wells(),
            n_samples: self.samples.len(),
        }
    }
}

impl InputSummary {
    pub fn log(&self) {
        let show = |temp: Option<TempBin>| {
            temp.map(|t| t.label())
                .unwrap_or_else(|| "none".to_string())
        };
        info!("Wells per DREAMing assay = {}", self.n_wells);
        info!("Samples = {}", self.n_samples);
        info!("Minimum recorded melting peak = {}", show(self.min_temp));
        info!("Maximum recorded melting peak = {}", show(self.max_temp));
        info!("Melting degree C resolution = {}", self.resolution);
    }
}
