use std::collections::BTreeSet;

use hashbrown::HashSet;
use itertools::Itertools;
use log::warn;

use super::column::{
    PeakSide,
    SampleColumn,
};
use super::temp_bin::TempBin;
use crate::error::{
    DreamingError,
    Result,
};

/// Upper bound on the temperature bins between the lowest and the highest
/// observed peak.
pub const MAX_TEMP_BINS: usize = 1_000_000;

/// One DREAMing reaction well: the peak temperature seen in each column, if
/// any.
#[derive(Debug, Clone, PartialEq)]
pub struct WellRow {
    pub well:  u32,
    pub temps: Vec<Option<TempBin>>,
}

/// A named, non-well row such as `copies_loaded`, `plate` or `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
    pub label:  String,
    pub values: Vec<Option<String>>,
}

/// The curated well-level melting temperature table.
///
/// Rows labelled with a positive integer are wells; any other label is a
/// metadata row. Every column belongs to exactly one sample and every sample
/// has at least one `_L` and one `_H` column.
#[derive(Debug, Clone)]
pub struct RawMeltTable {
    columns:  Vec<SampleColumn>,
    wells:    Vec<WellRow>,
    metadata: Vec<MetadataRow>,
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty()
        || cell.eq_ignore_ascii_case("nan")
        || cell.eq_ignore_ascii_case("na")
}

impl RawMeltTable {
    /// Builds the table from its header (column names, label column
    /// excluded) and its rows as `(label, cells)`.
    ///
    /// Short rows are padded with empty cells.
    pub fn from_rows<I>(
        header: &[String],
        rows: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<String>)>, {
        let columns = header
            .iter()
            .map(|name| name.parse::<SampleColumn>())
            .collect::<Result<Vec<_>>>()?;
        let n_columns = columns.len();

        let mut wells = Vec::new();
        let mut metadata = Vec::new();
        let mut seen_wells = HashSet::new();

        for (label, mut cells) in rows {
            let label = label.trim().to_string();
            if cells.len() > n_columns {
                let extra = cells.split_off(n_columns);
                if extra.iter().any(|cell| !is_missing(cell)) {
                    return Err(DreamingError::input_format(format!(
                        "Row '{label}' has {} cells, but the header names only \
                         {n_columns} columns",
                        n_columns + extra.len()
                    )));
                }
            }
            cells.resize(n_columns, String::new());

            match label.parse::<u32>() {
                Ok(well) if well > 0 => {
                    if !seen_wells.insert(well) {
                        return Err(DreamingError::input_format(format!(
                            "Well {well} appears more than once"
                        )));
                    }
                    let temps = cells
                        .iter()
                        .zip(columns.iter())
                        .map(|(cell, column)| {
                            if is_missing(cell) {
                                Ok(None)
                            }
                            else {
                                cell.parse::<TempBin>().map(Some).map_err(|_| {
                                    DreamingError::input_format(format!(
                                        "Well {well}, column '{column}': '{}' is not \
                                         a melting temperature",
                                        cell.trim()
                                    ))
                                })
                            }
                        })
                        .collect::<Result<Vec<_>>>()?;
                    wells.push(WellRow { well, temps });
                },
                _ => {
                    let values = cells
                        .into_iter()
                        .map(|cell| {
                            if is_missing(&cell) {
                                None
                            }
                            else {
                                Some(cell.trim().to_string())
                            }
                        })
                        .collect();
                    metadata.push(MetadataRow { label, values });
                },
            }
        }

        let table = Self {
            columns,
            wells,
            metadata,
        };
        table.check_pairing()?;
        if table.wells.is_empty() {
            return Err(DreamingError::input_format(
                "The raw table has no well rows (rows labelled 1..N)",
            ));
        }
        Ok(table)
    }

    fn check_pairing(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(DreamingError::input_format(
                "The raw table has no sample columns",
            ));
        }
        for sample in self.sample_names() {
            let sides: HashSet<PeakSide> = self
                .columns
                .iter()
                .filter(|column| column.sample == sample)
                .map(|column| column.side)
                .collect();
            for side in [PeakSide::Low, PeakSide::High] {
                if !sides.contains(&side) {
                    return Err(DreamingError::input_format(format!(
                        "Sample '{sample}' has no {} column",
                        side.suffix()
                    )));
                }
            }
        }
        Ok(())
    }

    crate::getter_fn!(columns, Vec<SampleColumn>);

    crate::getter_fn!(wells, Vec<WellRow>);

    crate::getter_fn!(metadata, Vec<MetadataRow>);

    pub fn n_wells(&self) -> usize {
        self.wells.len()
    }

    /// Unique sample names, sorted.
    pub fn sample_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.sample.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Indices of every column of `sample`, replicates included.
    ///
    /// Matching is on the parsed sample name, so `A` does not pick up the
    /// columns of `AB`.
    pub fn sample_columns(
        &self,
        sample: &str,
    ) -> Vec<usize> {
        self.columns
            .iter()
            .positions(|column| column.sample == sample)
            .collect()
    }

    /// Peak temperatures of one column across all wells.
    pub fn column_temps(
        &self,
        column: usize,
    ) -> impl Iterator<Item = Option<TempBin>> + '_ {
        self.wells.iter().map(move |row| row.temps[column])
    }

    pub fn metadata_row(
        &self,
        label: &str,
    ) -> Option<&MetadataRow> {
        let mut rows = self.metadata.iter().filter(|row| row.label == label);
        let first = rows.next();
        if first.is_some() && rows.next().is_some() {
            warn!("Metadata row '{label}' appears more than once, using the first");
        }
        first
    }

    /// Lowest and highest temperature observed in any well.
    pub fn temp_range(&self) -> Option<(TempBin, TempBin)> {
        self.wells
            .iter()
            .flat_map(|row| row.temps.iter().flatten())
            .copied()
            .minmax()
            .into_option()
    }

    /// Every bin between the observed minimum and maximum, `step` apart.
    ///
    /// Fails when an observed temperature falls off that grid.
    pub fn temp_bins(
        &self,
        step: TempBin,
    ) -> Result<Vec<TempBin>> {
        let Some((min, max)) = self.temp_range()
        else {
            return Ok(Vec::new());
        };
        for row in self.wells.iter() {
            for (temp, column) in row.temps.iter().zip(self.columns.iter()) {
                if let Some(temp) = temp {
                    if !temp.is_on_grid(min, step) {
                        return Err(DreamingError::input_format(format!(
                            "Well {}, column '{column}': {temp} is not on the {step} \
                             degree grid starting at {min}",
                            row.well
                        )));
                    }
                }
            }
        }
        match TempBin::range_len(min, max, step) {
            Some(len) if len <= MAX_TEMP_BINS => Ok(TempBin::range(min, max, step)),
            _ => {
                Err(DreamingError::input_format(format!(
                    "Melting temperatures span {min} to {max}, more than \
                     {MAX_TEMP_BINS} bins of {step} degrees"
                )))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn demo_table() -> RawMeltTable {
        RawMeltTable::from_rows(
            &strings(&["A_L", "A_H", "AB_L", "AB_H", "A_L.1", "A_H.1"]),
            vec![
                ("copies_loaded".to_string(), strings(&["100", "100", "50", "50", "80", "80"])),
                ("1".to_string(), strings(&["80", "", "80.2", "", "80", ""])),
                ("2".to_string(), strings(&["80.8", "82", "", "", "80.4", ""])),
                ("3".to_string(), strings(&["", "", "80", ""])),
                ("plate".to_string(), strings(&["A", "A", "B", "B", "C", "C"])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rows_split_into_wells_and_metadata() {
        let table = demo_table();
        assert_eq!(table.n_wells(), 3);
        assert_eq!(
            table.wells().iter().map(|w| w.well).collect_vec(),
            vec![1, 2, 3]
        );
        assert_eq!(
            table.metadata().iter().map(|m| m.label.as_str()).collect_vec(),
            vec!["copies_loaded", "plate"]
        );
        assert_eq!(table.wells()[2].temps.len(), 6);
    }

    #[test]
    fn test_sample_grouping_is_exact() {
        let table = demo_table();
        assert_eq!(table.sample_names(), vec!["A", "AB"]);
        assert_eq!(table.sample_columns("A"), vec![0, 1, 4, 5]);
        assert_eq!(table.sample_columns("AB"), vec![2, 3]);
    }

    #[test]
    fn test_temp_range_and_bins() {
        let table = demo_table();
        let (min, max) = table.temp_range().unwrap();
        assert_eq!(min.label(), "80");
        assert_eq!(max.label(), "82");
        let bins = table.temp_bins(TempBin::from_celsius(0.2)).unwrap();
        assert_eq!(bins.len(), 11);
        assert_eq!(bins.last().unwrap().label(), "82");
    }

    #[test]
    fn test_off_grid_temperature() {
        let table = RawMeltTable::from_rows(
            &strings(&["A_L", "A_H"]),
            vec![
                ("1".to_string(), strings(&["80", ""])),
                ("2".to_string(), strings(&["80.3", ""])),
            ],
        )
        .unwrap();
        assert!(matches!(
            table.temp_bins(TempBin::from_celsius(0.2)),
            Err(DreamingError::InputFormat(_))
        ));
    }

    #[test]
    fn test_missing_peak_side() {
        let result = RawMeltTable::from_rows(
            &strings(&["A_L", "B_L", "B_H"]),
            vec![("1".to_string(), strings(&["80", "80", ""]))],
        );
        assert!(matches!(result, Err(DreamingError::InputFormat(msg)) if msg.contains("'A'")));
    }

    #[test]
    fn test_no_wells() {
        let result = RawMeltTable::from_rows(
            &strings(&["A_L", "A_H"]),
            vec![("copies_loaded".to_string(), strings(&["10", "10"]))],
        );
        assert!(matches!(result, Err(DreamingError::InputFormat(_))));
    }

    #[test]
    fn test_bad_cell_and_duplicate_well() {
        let bad_cell = RawMeltTable::from_rows(
            &strings(&["A_L", "A_H"]),
            vec![("1".to_string(), strings(&["eighty", ""]))],
        );
        assert!(matches!(bad_cell, Err(DreamingError::InputFormat(msg)) if msg.contains("eighty")));

        let duplicate = RawMeltTable::from_rows(
            &strings(&["A_L", "A_H"]),
            vec![
                ("1".to_string(), strings(&["80", ""])),
                ("1".to_string(), strings(&["80", ""])),
            ],
        );
        assert!(matches!(duplicate, Err(DreamingError::InputFormat(_))));
    }

    #[test]
    fn test_missing_markers_and_trailing_cells() {
        let table = RawMeltTable::from_rows(
            &strings(&["A_L", "A_H"]),
            vec![("1".to_string(), strings(&["NaN", " ", "", ""]))],
        )
        .unwrap();
        assert_eq!(table.wells()[0].temps, vec![None, None]);
        assert!(table.temp_range().is_none());
        assert!(table.temp_bins(TempBin::from_celsius(0.2)).unwrap().is_empty());
    }

    #[test]
    fn test_extreme_temperatures() {
        let overflowing = RawMeltTable::from_rows(
            &strings(&["A_L", "A_H"]),
            vec![
                ("1".to_string(), strings(&["-1e300", ""])),
                ("2".to_string(), strings(&["1e300", ""])),
            ],
        );
        assert!(matches!(overflowing, Err(DreamingError::InputFormat(msg)) if msg.contains("1e300")));

        let wide = RawMeltTable::from_rows(
            &strings(&["A_L", "A_H"]),
            vec![
                ("1".to_string(), strings(&["80", ""])),
                ("2".to_string(), strings(&["1e15", ""])),
            ],
        )
        .unwrap();
        assert!(matches!(
            wide.temp_bins(TempBin::from_celsius(0.2)),
            Err(DreamingError::InputFormat(msg)) if msg.contains("bins")
        ));
    }
}
