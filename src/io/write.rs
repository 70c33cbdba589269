use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use log::info;
use polars::prelude::*;
use tempfile::NamedTempFile;

use crate::error::{
    DreamingError,
    Result,
};

/// Writes `df` as a comma separated table with a header and no index.
pub fn write_csv<W: Write>(
    sink: W,
    df: &mut DataFrame,
) -> Result<()> {
    CsvWriter::new(sink)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;
    Ok(())
}

/// A table fully written to a temporary file next to its destination,
/// waiting to be moved into place.
///
/// Dropping it removes the temporary file.
#[derive(Debug)]
pub struct StagedCsv {
    tmp:  NamedTempFile,
    path: PathBuf,
}

impl StagedCsv {
    /// Writes `df` into a temporary file in the directory of `path`.
    pub fn new<P: AsRef<Path>>(
        path: P,
        df: &mut DataFrame,
    ) -> Result<Self> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DreamingError::io(dir, e))?;
        write_csv(tmp.as_file_mut(), df)?;
        tmp.as_file_mut()
            .flush()
            .map_err(|e| DreamingError::io(tmp.path(), e))?;
        Ok(Self {
            tmp,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames the temporary file to the destination.
    pub fn persist(self) -> Result<PathBuf> {
        let Self { tmp, path } = self;
        tmp.persist(&path)
            .map_err(|e| DreamingError::io(&path, e.error))?;
        info!("Created: {}", path.display());
        Ok(path)
    }
}

/// Stages every table first and persists them only once all were written,
/// so a failed write leaves none of them behind.
pub fn write_csv_paths<P: AsRef<Path>>(
    tables: Vec<(P, &mut DataFrame)>
) -> Result<Vec<PathBuf>> {
    let staged = tables
        .into_iter()
        .map(|(path, df)| StagedCsv::new(path, df))
        .collect::<Result<Vec<_>>>()?;
    staged.into_iter().map(StagedCsv::persist).collect()
}

/// Writes `df` to `path` through a temporary file in the same directory, so
/// a failed write leaves no partial table behind.
pub fn write_csv_path<P: AsRef<Path>>(
    path: P,
    df: &mut DataFrame,
) -> Result<()> {
    StagedCsv::new(path, df)?.persist()?;
    Ok(())
}
