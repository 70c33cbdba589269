use log::debug;

use crate::data_structs::typedef::{
    CountType,
    DensityType,
};
use crate::data_structs::{
    CalibrationTable,
    SampleRecord,
};

/// Density assigned to the loaded copies in background mode.
pub const BACKGROUND_DENSITY: DensityType = 0.0;

/// Per-sample fragment counts pooled by methylation density.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCounts {
    pub samples: Vec<String>,
    /// Distinct densities, ascending, each with one count per sample.
    pub levels:  Vec<(DensityType, Vec<CountType>)>,
}

impl DensityCounts {
    pub fn densities(&self) -> Vec<DensityType> {
        self.levels.iter().map(|(density, _)| *density).collect()
    }
}

/// Distinct densities of `calibration`, plus the background density when
/// loaded copies are counted as background.
pub fn density_levels(
    calibration: &CalibrationTable,
    background: bool,
) -> Vec<DensityType> {
    let mut levels = calibration.distinct_densities();
    if background {
        if let Err(pos) = levels.binary_search_by(|d| d.total_cmp(&BACKGROUND_DENSITY)) {
            levels.insert(pos, BACKGROUND_DENSITY);
        }
    }
    levels
}

/// Relabels temperature bins with their calibrated density and sums the
/// counts of bins sharing a density.
///
/// Only calibrated bins are read, each once. Every density level is kept,
/// including levels no sample reached. With `background`, each sample's
/// `copies_loaded` is added to density 0.0.
pub fn map_densities(
    records: &[SampleRecord],
    calibration: &CalibrationTable,
    background: bool,
) -> DensityCounts {
    let densities = density_levels(calibration, background);
    // Every calibrated density and the background density are levels.
    let level_of = |density: DensityType| {
        densities.partition_point(|d| d.total_cmp(&density).is_lt())
    };

    let mut levels: Vec<(DensityType, Vec<CountType>)> = densities
        .iter()
        .map(|&density| (density, vec![0.0; records.len()]))
        .collect();

    for (col, record) in records.iter().enumerate() {
        for (temp, density) in calibration.entries() {
            levels[level_of(*density)].1[col] += record.count(temp);
        }
        if background {
            levels[level_of(BACKGROUND_DENSITY)].1[col] += record.copies_loaded.unwrap_or(0.0);
        }

        let uncalibrated = record
            .counts
            .iter()
            .filter(|(temp, count)| **count > 0.0 && !calibration.contains(temp))
            .count();
        if uncalibrated > 0 {
            debug!(
                "{}: dropped {uncalibrated} uncalibrated temperature bins",
                record.sample
            );
        }
    }

    DensityCounts {
        samples: records.iter().map(|r| r.sample.clone()).collect(),
        levels,
    }
}
