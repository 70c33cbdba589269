use hashbrown::HashMap;
use itertools::Itertools;
use log::warn;

use super::temp_bin::TempBin;
use super::typedef::DensityType;
use crate::error::{
    DreamingError,
    Result,
};

/// Ordered mapping from melting temperature bin to methylation density for
/// one DREAMing locus.
#[derive(Debug, Clone, Default)]
pub struct CalibrationTable {
    entries: Vec<(TempBin, DensityType)>,
    index:   HashMap<TempBin, usize>,
}

impl CalibrationTable {
    /// Builds the table in input order. A repeated temperature keeps its
    /// first position and takes the last density given for it.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (TempBin, DensityType)>, {
        let mut table = Self::default();
        for (temp, density) in pairs {
            if !(0.0..=1.0).contains(&density) {
                return Err(DreamingError::input_format(format!(
                    "Calibration density {density} for {temp} is outside [0, 1]"
                )));
            }
            // Normalises -0.0 so equal densities compare equal bitwise.
            let density = density + 0.0;

            if let Some(&idx) = table.index.get(&temp) {
                warn!(
                    "Calibration temperature {temp} is listed twice ({} and \
                     {density}), keeping {density}",
                    table.entries[idx].1
                );
                table.entries[idx].1 = density;
            }
            else {
                table.index.insert(temp, table.entries.len());
                table.entries.push((temp, density));
            }
        }
        Ok(table)
    }

    pub fn entries(&self) -> &[(TempBin, DensityType)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn density(
        &self,
        temp: &TempBin,
    ) -> Option<DensityType> {
        self.index.get(temp).map(|&idx| self.entries[idx].1)
    }

    pub fn contains(
        &self,
        temp: &TempBin,
    ) -> bool {
        self.index.contains_key(temp)
    }

    /// Distinct density values, ascending.
    pub fn distinct_densities(&self) -> Vec<DensityType> {
        self.entries
            .iter()
            .map(|(_, density)| *density)
            .sorted_by(|a, b| a.total_cmp(b))
            .dedup()
            .collect()
    }
}
