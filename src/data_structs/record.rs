use std::collections::BTreeMap;
use std::fmt::{
    Display,
    Formatter,
};

use serde::Serialize;

use super::temp_bin::TempBin;
use super::typedef::CountType;

/// Requested metadata field holding the sample name.
pub const SAMPLE_FIELD: &str = "Sample";
/// Metadata row holding the genomic equivalents loaded per assay.
pub const COPIES_LOADED_FIELD: &str = "copies_loaded";

/// Value of one requested metadata field for a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Number(CountType),
    Missing,
}

impl MetaValue {
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) => Some(number.to_string()),
            Self::Missing => None,
        }
    }

    pub fn as_number(&self) -> Option<CountType> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.parse().ok(),
            Self::Missing => None,
        }
    }
}

impl Display for MetaValue {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Missing => Ok(()),
        }
    }
}

/// Melt peak counts and metadata of one sample, replicates merged.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRecord {
    pub sample:        String,
    /// Fragment count per temperature bin, zero-filled over the observed
    /// range.
    pub counts:        BTreeMap<TempBin, CountType>,
    /// Requested metadata fields in request order.
    pub metadata:      Vec<(String, MetaValue)>,
    /// Total copies loaded over all assays of the sample.
    pub copies_loaded: Option<CountType>,
}

impl SampleRecord {
    pub fn new<I>(
        sample: &str,
        bins: I,
    ) -> Self
    where
        I: IntoIterator<Item = TempBin>, {
        Self {
            sample:        sample.to_string(),
            counts:        bins.into_iter().map(|bin| (bin, 0.0)).collect(),
            metadata:      Vec::new(),
            copies_loaded: None,
        }
    }

    /// Count for `bin`, zero when the sample never showed it.
    pub fn count(
        &self,
        bin: &TempBin,
    ) -> CountType {
        self.counts.get(bin).copied().unwrap_or(0.0)
    }

    pub fn add_count(
        &mut self,
        bin: TempBin,
        count: CountType,
    ) {
        *self.counts.entry(bin).or_insert(0.0) += count;
    }

    pub fn total(&self) -> CountType {
        self.counts.values().sum()
    }

    pub fn meta(
        &self,
        field: &str,
    ) -> Option<&MetaValue> {
        self.metadata
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}
