use std::path::Path;

use log::{
    info,
    warn,
};
use polars::prelude::DataFrame;
use serde::Serialize;

use super::aggregate::aggregate_samples;
use super::assemble::{
    assemble,
    melt_peak_counts_df,
};
use super::density::map_densities;
use super::load::{
    InputSummary,
    LoadedInput,
};
use crate::data_structs::typedef::{
    CpgType,
    DensityType,
};
use crate::data_structs::{
    CalibrationTable,
    DensityTable,
    RawMeltTable,
    SampleRecord,
    COPIES_LOADED_FIELD,
    SAMPLE_FIELD,
};
use crate::error::{
    DreamingError,
    Result,
};
use crate::io::{
    read_calibration_path,
    read_melt_table_path,
};
use crate::with_field_fn;

pub const DEFAULT_RESOLUTION: f64 = 0.2;

/// Parameters of one conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// CpGs covered by the DREAMing locus.
    pub n_cpgs:           CpgType,
    /// Count the loaded genomic equivalents as background fragments of
    /// density 0.
    pub background:       bool,
    /// Poisson-correct the peak counts of partially occupied columns.
    pub poisson:          bool,
    /// Melting temperature resolution of the thermocycler, in degrees.
    pub resolution:       f64,
    /// Metadata rows carried into the melt peak counts table.
    pub metadata_fields:  Vec<String>,
    /// Also produce the melt peak counts table.
    pub melt_peak_counts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            n_cpgs:           1,
            background:       false,
            poisson:          false,
            resolution:       DEFAULT_RESOLUTION,
            metadata_fields:  vec![
                SAMPLE_FIELD.to_string(),
                COPIES_LOADED_FIELD.to_string(),
            ],
            melt_peak_counts: false,
        }
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records:          Vec<SampleRecord>,
    pub density_table:    DensityTable,
    pub melt_peak_counts: Option<DataFrame>,
    pub summary:          RunSummary,
}

/// Run facts for the run log.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub input:          InputSummary,
    pub samples:        Vec<String>,
    pub n_unmethylated: Vec<CpgType>,
    pub n_methylated:   Vec<CpgType>,
    pub densities:      Vec<DensityType>,
}

impl RunSummary {
    pub fn log(&self) {
        self.input.log();
        info!("number of unmethylated CpGs: {:?}", self.n_unmethylated);
        info!("number of methylated CpGs: {:?}", self.n_methylated);
        info!("MDs: {:?}", self.densities);
    }
}

impl PipelineConfig {
    with_field_fn!(n_cpgs, CpgType);

    with_field_fn!(background, bool);

    with_field_fn!(poisson, bool);

    with_field_fn!(resolution, f64);

    with_field_fn!(metadata_fields, Vec<String>);

    with_field_fn!(melt_peak_counts, bool);

    pub fn new(n_cpgs: CpgType) -> Self {
        Self::default().with_n_cpgs(n_cpgs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_cpgs == 0 {
            return Err(DreamingError::InvalidConfig(
                "The locus must cover at least one CpG".to_string(),
            ));
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(DreamingError::InvalidConfig(format!(
                "Melting temperature resolution must be positive, got {}",
                self.resolution
            )));
        }
        Ok(())
    }

    /// Requested metadata fields, deduplicated, with `Sample` first when the
    /// request left it out.
    pub fn effective_metadata_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::with_capacity(self.metadata_fields.len() + 1);
        for field in self.metadata_fields.iter().map(|f| f.trim()) {
            if !field.is_empty() && !fields.iter().any(|f| f == field) {
                fields.push(field.to_string());
            }
        }
        if !fields.iter().any(|f| f == SAMPLE_FIELD) {
            warn!("'{SAMPLE_FIELD}' was not requested, adding it");
            fields.insert(0, SAMPLE_FIELD.to_string());
        }
        fields
    }

    pub fn log(&self) {
        info!("Parameters:");
        info!("\tnumber of CpGs = {}", self.n_cpgs);
        info!("\tinput2bg = {}", self.background);
        info!("\tPoisson Adjustment = {}", self.poisson);
        info!("\tMelting temperature resolution = {}", self.resolution);
        info!("\tIncluded information: {:?}", self.metadata_fields);
    }

    /// Runs the conversion on loaded inputs. Nothing is written.
    pub fn run(
        &self,
        table: &RawMeltTable,
        calibration: &CalibrationTable,
    ) -> Result<PipelineOutput> {
        self.validate()?;
        let fields = self.effective_metadata_fields();

        let input = LoadedInput::new(table, calibration, self.resolution)?;

        info!("Extracting raw melt peak counts from samples of interest...");
        let records = aggregate_samples(&input, &fields, self.poisson, self.background)?;

        let melt_peak_counts = if self.melt_peak_counts {
            Some(melt_peak_counts_df(&records, &fields, &input.bins)?)
        }
        else {
            None
        };

        info!("Converting to methylation density table...");
        let density_counts = map_densities(&records, calibration, self.background);
        let density_table = assemble(density_counts, self.n_cpgs)?;

        let summary = RunSummary {
            input:          input.summary(self.resolution),
            samples:        input.samples.clone(),
            n_unmethylated: density_table.rows.iter().map(|r| r.n_unmethylated).collect(),
            n_methylated:   density_table.rows.iter().map(|r| r.n_methylated).collect(),
            densities:      density_table.rows.iter().map(|r| r.density).collect(),
        };

        Ok(PipelineOutput {
            records,
            density_table,
            melt_peak_counts,
            summary,
        })
    }

    /// Reads both inputs from disk and runs the conversion.
    pub fn run_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        raw_path: P,
        calibration_path: Q,
    ) -> Result<PipelineOutput> {
        self.validate()?;
        let table = read_melt_table_path(raw_path)?;
        let calibration = read_calibration_path(calibration_path)?;
        self.run(&table, &calibration)
    }
}
