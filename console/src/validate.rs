use clap::Args;
use console::style;
use dreaming_md::DreamingError;

use crate::convert::ConversionParams;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct ValidateArgs {
    #[clap(flatten)]
    pub params: ConversionParams,
}

impl ValidateArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        utils.setup(None)?;
        self.params.check_inputs()?;

        let config = self.params.config(false);
        match config.run_files(&self.params.data, &self.params.temps) {
            Ok(output) => {
                let summary = &output.summary;
                eprintln!(
                    "{} {} samples, {} wells",
                    style("OK").green(),
                    style(summary.samples.len()).green(),
                    summary.input.n_wells,
                );
                if let (Some(min), Some(max)) = (summary.input.min_temp, summary.input.max_temp) {
                    eprintln!("Melt peaks from {min} to {max}");
                }
                eprintln!(
                    "Density levels ({}): {:?}",
                    output.density_table.len(),
                    summary.densities
                );
                Ok(())
            },
            Err(err) => {
                let kind = match &err {
                    DreamingError::InputFormat(_) => "malformed input",
                    DreamingError::CalibrationCoverage { .. } => "calibration coverage",
                    DreamingError::Alignment { .. } => "density alignment",
                    DreamingError::InvalidConfig(_) => "invalid parameters",
                    _ => "read failure",
                };
                eprintln!("Detected {}", style(kind).red());
                Err(err.into())
            },
        }
    }
}
