use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{
    debug,
    warn,
};

use crate::data_structs::RawMeltTable;
use crate::error::{
    DreamingError,
    Result,
};

/// Reads the curated raw DREAMing table.
///
/// The first column holds row labels (well numbers or metadata names) and
/// the header names the sample columns. Rows may be ragged. Header columns
/// with an empty name are dropped.
pub fn read_melt_table<R: Read>(reader: R) -> Result<RawMeltTable> {
    let mut csv_reader = csv::ReaderBuilder::default()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = csv_reader.headers()?.clone();
    let keep = header
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, name)| {
            if name.is_empty() {
                warn!("Dropping unnamed column {} of the raw table", idx + 1);
                None
            }
            else {
                Some(idx)
            }
        })
        .collect::<Vec<_>>();
    let names = keep
        .iter()
        .map(|&idx| header[idx].to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let label = record.get(0).unwrap_or_default().to_string();
        if label.is_empty() && record.iter().all(str::is_empty) {
            continue;
        }
        let dropped_value = header
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, name)| name.is_empty())
            .any(|(idx, _)| !record.get(idx).unwrap_or_default().is_empty());
        if dropped_value {
            return Err(DreamingError::input_format(format!(
                "Row '{label}' has a value under an unnamed column"
            )));
        }
        let mut cells = keep
            .iter()
            .map(|&idx| record.get(idx).unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        cells.extend(
            record
                .iter()
                .skip(header.len())
                .map(str::to_string),
        );
        rows.push((label, cells));
    }
    debug!("Read {} rows and {} sample columns", rows.len(), names.len());

    RawMeltTable::from_rows(&names, rows)
}

pub fn read_melt_table_path<P: AsRef<Path>>(path: P) -> Result<RawMeltTable> {
    let file = File::open(path.as_ref()).map_err(|e| DreamingError::io(&path, e))?;
    read_melt_table(file)
}
