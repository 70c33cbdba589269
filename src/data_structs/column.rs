use std::fmt::{
    Display,
    Formatter,
};
use std::str::FromStr;

use serde::Serialize;

use crate::error::DreamingError;

/// Which of the (up to) two melt peaks of a well a column records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PeakSide {
    /// `_L`, the lower melting peak
    Low,
    /// `_H`, the peak farthest right on the melt trace
    High,
}

impl PeakSide {
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Low => "_L",
            Self::High => "_H",
        }
    }
}

/// A parsed raw table column name: `<sample>_L[.<replicate>]` or
/// `<sample>_H[.<replicate>]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SampleColumn {
    pub sample:    String,
    pub side:      PeakSide,
    pub replicate: Option<u32>,
}

impl SampleColumn {
    pub fn new(
        sample: &str,
        side: PeakSide,
        replicate: Option<u32>,
    ) -> Self {
        Self {
            sample: sample.to_string(),
            side,
            replicate,
        }
    }
}

impl FromStr for SampleColumn {
    type Err = DreamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        let (base, replicate) = match name.rsplit_once('.') {
            Some((head, tail))
                if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) =>
            {
                let replicate = tail.parse::<u32>().map_err(|_| {
                    DreamingError::input_format(format!(
                        "Column '{name}' has an unreadable replicate suffix"
                    ))
                })?;
                (head, Some(replicate))
            },
            _ => (name, None),
        };

        let (sample, side) = if let Some(sample) = base.strip_suffix(PeakSide::Low.suffix()) {
            (sample, PeakSide::Low)
        }
        else if let Some(sample) = base.strip_suffix(PeakSide::High.suffix()) {
            (sample, PeakSide::High)
        }
        else {
            return Err(DreamingError::input_format(format!(
                "Column '{name}' is not named <sample>_L[.<replicate>] or \
                 <sample>_H[.<replicate>]"
            )));
        };

        if sample.is_empty() {
            return Err(DreamingError::input_format(format!(
                "Column '{name}' has an empty sample name"
            )));
        }

        Ok(Self::new(sample, side, replicate))
    }
}

impl Display for SampleColumn {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}{}", self.sample, self.side.suffix())?;
        if let Some(replicate) = self.replicate {
            write!(f, ".{replicate}")?;
        }
        Ok(())
    }
}
