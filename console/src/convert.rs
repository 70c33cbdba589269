use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use dreaming_md::io::{
    write_csv_paths,
    OutputNaming,
};
use dreaming_md::tools::pipeline::{
    PipelineConfig,
    DEFAULT_RESOLUTION,
};
use log::info;

use crate::strings::convert as strings;
use crate::utils::{
    validate_input,
    validate_output_dir,
    UtilsArgs,
};

/// Inputs and conversion parameters shared by `convert` and `validate`.
#[derive(Args, Debug, Clone)]
pub(crate) struct ConversionParams {
    #[arg(long = "data", required = true, help = strings::DATA)]
    pub data: PathBuf,

    #[arg(long = "temps", required = true, help = strings::TEMPS)]
    pub temps: PathBuf,

    #[arg(long = "cpgs", required = true, help = strings::CPGS)]
    pub cpgs: u32,

    #[arg(long = "bg", default_value_t = false, help = strings::BG)]
    pub background: bool,

    #[arg(long = "pois", default_value_t = false, help = strings::POIS)]
    pub poisson: bool,

    #[arg(long = "tm", default_value_t = DEFAULT_RESOLUTION, help = strings::TM)]
    pub resolution: f64,

    #[arg(
        long = "info",
        value_delimiter = ',',
        default_value = "Sample,copies_loaded",
        help = strings::INFO
    )]
    pub info: Vec<String>,
}

impl ConversionParams {
    pub fn config(
        &self,
        melt_peak_counts: bool,
    ) -> PipelineConfig {
        PipelineConfig::new(self.cpgs)
            .with_background(self.background)
            .with_poisson(self.poisson)
            .with_resolution(self.resolution)
            .with_metadata_fields(self.info.clone())
            .with_melt_peak_counts(melt_peak_counts)
    }

    pub fn check_inputs(&self) -> anyhow::Result<()> {
        validate_input(&self.data)?;
        validate_input(&self.temps)?;
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ConvertArgs {
    #[clap(flatten)]
    pub params: ConversionParams,

    #[arg(long = "count-file", default_value_t = false, help = strings::COUNT_FILE)]
    pub count_file: bool,

    #[arg(long = "out", help = strings::OUT)]
    pub out: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        self.params.check_inputs()?;
        if let Some(out) = self.out.as_ref() {
            validate_output_dir(out)?;
        }

        let created = chrono::Local::now().date_naive();
        let naming = OutputNaming::new(
            &self.params.data,
            self.out.clone(),
            self.params.poisson,
            self.params.background,
            created,
        );
        utils.setup(Some(&naming.run_log()))?;

        let config = self.params.config(self.count_file);
        info!("{}", created.format("%Y-%m-%d"));
        info!(
            "Command: {}",
            std::env::args().collect::<Vec<_>>().join(" ")
        );
        info!("Parameters: {}", serde_json::to_string(&config)?);
        config.log();

        let mut output = config
            .run_files(&self.params.data, &self.params.temps)
            .with_context(|| {
                format!("Conversion of {} failed", self.params.data.display())
            })?;
        output.summary.log();

        let mut density_df = output.density_table.to_df()?;
        let mut tables = Vec::with_capacity(2);
        if let Some(counts) = output.melt_peak_counts.as_mut() {
            info!("Writing melt peak counts table...");
            tables.push((naming.melt_peak_counts(), counts));
        }
        tables.push((naming.density_table(), &mut density_df));
        write_csv_paths(tables)?;

        info!("Done");
        Ok(())
    }
}
