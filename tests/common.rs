#![allow(dead_code)]
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use dreaming_md::prelude::*;
use itertools::Itertools;

/// Builds raw DREAMing tables and calibration tables for tests.
pub struct DemoTableBuilder {
    n_wells:  usize,
    columns:  Vec<(String, Vec<Option<f64>>)>,
    metadata: Vec<(String, Vec<String>)>,
}

impl DemoTableBuilder {
    pub fn new(n_wells: usize) -> Self {
        Self {
            n_wells,
            columns: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Adds one peak column. Missing wells at the end stay empty.
    pub fn column(
        mut self,
        name: &str,
        temps: &[Option<f64>],
    ) -> Self {
        assert!(temps.len() <= self.n_wells);
        let mut temps = temps.to_vec();
        temps.resize(self.n_wells, None);
        self.columns.push((name.to_string(), temps));
        self
    }

    /// Adds the `_L` and `_H` columns of one sample assay.
    pub fn sample(
        self,
        name: &str,
        low: &[Option<f64>],
        high: &[Option<f64>],
    ) -> Self {
        self.column(&format!("{name}_L"), low)
            .column(&format!("{name}_H"), high)
    }

    /// Metadata row with one value per column, in column order.
    pub fn metadata(
        mut self,
        label: &str,
        values: &[&str],
    ) -> Self {
        assert_eq!(values.len(), self.columns.len());
        self.metadata.push((
            label.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    pub fn to_csv(&self) -> String {
        let mut lines = Vec::new();
        lines.push(
            std::iter::once("sample")
                .chain(self.columns.iter().map(|(name, _)| name.as_str()))
                .join(","),
        );
        for (label, values) in self.metadata.iter() {
            lines.push(std::iter::once(label.as_str()).chain(values.iter().map(String::as_str)).join(","));
        }
        for well in 0..self.n_wells {
            let cells = self.columns.iter().map(|(_, temps)| {
                temps[well]
                    .map(|temp| TempBin::from_celsius(temp).label())
                    .unwrap_or_default()
            });
            lines.push(std::iter::once((well + 1).to_string()).chain(cells).join(","));
        }
        lines.join("\n") + "\n"
    }

    pub fn build(&self) -> RawMeltTable {
        read_melt_table(self.to_csv().as_bytes()).unwrap()
    }

    pub fn write(
        &self,
        dir: &Path,
        name: &str,
    ) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.to_csv()).unwrap();
        path
    }
}

pub fn calibration_csv(pairs: &[(f64, f64)]) -> String {
    std::iter::once("temp,MD".to_string())
        .chain(pairs.iter().map(|(temp, md)| format!("{temp},{md}")))
        .join("\n")
        + "\n"
}

pub fn calibration(pairs: &[(f64, f64)]) -> CalibrationTable {
    CalibrationTable::from_pairs(
        pairs
            .iter()
            .map(|&(temp, md)| (TempBin::from_celsius(temp), md)),
    )
    .unwrap()
}

pub fn write_calibration(
    dir: &Path,
    pairs: &[(f64, f64)],
) -> PathBuf {
    let path = dir.join("calibration.csv");
    fs::write(&path, calibration_csv(pairs)).unwrap();
    path
}

/// Calibration of a locus with `n_cpgs` CpGs: one 0.2 degree bin per
/// density level starting at `start`, evenly spaced densities.
pub fn linear_calibration(
    start: f64,
    n_cpgs: u32,
) -> Vec<(f64, f64)> {
    (0..=n_cpgs)
        .map(|i| {
            (
                TempBin::from_celsius(start + 0.2 * i as f64).celsius(),
                i as f64 / n_cpgs as f64,
            )
        })
        .collect()
}
