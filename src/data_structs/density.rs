use polars::prelude::*;
use serde::Serialize;

use super::typedef::{
    CountType,
    CpgType,
    DensityType,
};
use crate::error::Result;

pub const NUM_U_COL: &str = "numU";
pub const NUM_M_COL: &str = "numM";
pub const MD_COL: &str = "MD";

/// One methylation density level of the final table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityRow {
    /// Unmethylated CpGs at this level.
    pub n_unmethylated: CpgType,
    /// Methylated CpGs at this level.
    pub n_methylated:   CpgType,
    pub density:        DensityType,
    /// Fragment count per sample, in [`DensityTable::samples`] order.
    pub counts:         Vec<CountType>,
}

/// The methylation density table, rows in ascending density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityTable {
    pub samples: Vec<String>,
    pub rows:    Vec<DensityRow>,
}

impl DensityTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Counts of one sample down the density levels.
    pub fn sample_counts(
        &self,
        sample: &str,
    ) -> Option<Vec<CountType>> {
        let idx = self.samples.iter().position(|s| s == sample)?;
        Some(self.rows.iter().map(|row| row.counts[idx]).collect())
    }

    /// Columns `numU`, `numM`, `MD`, then one column per sample.
    pub fn to_df(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.samples.len() + 3);
        columns.push(
            Series::new(
                NUM_U_COL.into(),
                self.rows.iter().map(|row| row.n_unmethylated).collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                NUM_M_COL.into(),
                self.rows.iter().map(|row| row.n_methylated).collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                MD_COL.into(),
                self.rows.iter().map(|row| row.density).collect::<Vec<_>>(),
            )
            .into_column(),
        );
        for (idx, sample) in self.samples.iter().enumerate() {
            columns.push(
                Series::new(
                    sample.as_str().into(),
                    self.rows.iter().map(|row| row.counts[idx]).collect::<Vec<_>>(),
                )
                .into_column(),
            );
        }
        Ok(DataFrame::new(columns)?)
    }
}
