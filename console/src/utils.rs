use std::fs::File;
use std::io::{
    self,
    Write,
};
use std::path::Path;

use anyhow::{
    ensure,
    Context,
};
use clap::Args;
use dreaming_md::utils::THREADS_ENV;
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub struct UtilsArgs {
    #[arg(long, help = crate::strings::utils::THREADS)]
    pub threads: Option<usize>,

    #[arg(short, long, default_value_t = false, help = crate::strings::utils::VERBOSE)]
    pub verbose: bool,
}

/// Log sink writing every record to stderr and to the run log.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

impl UtilsArgs {
    /// Sizes the thread pool and installs the logger, duplicating records
    /// into `run_log` when given.
    pub fn setup(
        &self,
        run_log: Option<&Path>,
    ) -> anyhow::Result<()> {
        if let Some(threads) = self.threads {
            ensure!(threads > 0, "Number of threads must be positive");
            std::env::set_var(THREADS_ENV, threads.to_string());
        }

        let mut builder = pretty_env_logger::formatted_builder();
        builder.filter_level(if self.verbose {
            LevelFilter::Debug
        }
        else {
            LevelFilter::Info
        });
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        if let Some(path) = run_log {
            let file = File::create(path)
                .with_context(|| format!("Cannot create run log {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(TeeWriter { file })));
        }
        builder.try_init()?;
        Ok(())
    }
}

pub fn validate_input(path: &Path) -> anyhow::Result<()> {
    ensure!(path.exists(), "Path {} does not exist.", path.display());
    ensure!(path.is_file(), "Path {} is not a file.", path.display());
    Ok(())
}

pub fn validate_output_dir(path: &Path) -> anyhow::Result<()> {
    ensure!(path.exists(), "Output directory {} does not exist.", path.display());
    ensure!(path.is_dir(), "Output path {} is not a directory.", path.display());
    Ok(())
}
