use std::fmt::{
    Display,
    Formatter,
};
use std::str::FromStr;

use serde::{
    Serialize,
    Serializer,
};

use super::typedef::TempType;
use crate::error::DreamingError;

/// Thousandths of a degree per bin unit.
const SCALE: TempType = 1000.0;
/// Largest accepted magnitude in bin units. Differences of two bins stay
/// within `i64`.
const MAX_UNITS: i64 = i64::MAX / 4;

/// A melting temperature quantised to a thousandth of a degree.
///
/// Bins are compared as integers, so `80`, `80.0` and `80.00` all land in
/// the same bin. The textual label drops trailing zeros and a trailing
/// decimal point, which gives the canonical `"80"`, `"80.8"` form used by
/// calibration tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TempBin(i64);

impl TempBin {
    pub fn from_celsius(temp: TempType) -> Self {
        Self((temp * SCALE).round() as i64)
    }

    /// Like [`TempBin::from_celsius`], but rejects values that are not finite
    /// or too large to bin.
    pub fn try_from_celsius(temp: TempType) -> Result<Self, DreamingError> {
        let units = (temp * SCALE).round();
        if !units.is_finite() || units.abs() > MAX_UNITS as TempType {
            return Err(DreamingError::input_format(format!(
                "'{temp}' is not a melting temperature"
            )));
        }
        Ok(Self(units as i64))
    }

    pub fn celsius(&self) -> TempType {
        self.0 as TempType / SCALE
    }

    /// Canonical text label, e.g. `"80"` or `"80.8"`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Number of bins [`TempBin::range`] yields, `None` on overflow.
    pub fn range_len(
        start: TempBin,
        end: TempBin,
        step: TempBin,
    ) -> Option<usize> {
        if step.0 <= 0 || end < start {
            return Some(0);
        }
        let span = end.0.checked_sub(start.0)?;
        usize::try_from(span / step.0).ok()?.checked_add(1)
    }

    /// Every bin from `start` to `end` inclusive, `step` apart.
    ///
    /// Returns an empty vector for a non-positive step or an inverted range.
    pub fn range(
        start: TempBin,
        end: TempBin,
        step: TempBin,
    ) -> Vec<TempBin> {
        if step.0 <= 0 || end < start {
            return Vec::new();
        }
        (start.0..=end.0)
            .step_by(step.0 as usize)
            .map(TempBin)
            .collect()
    }

    /// Whether `self` lies on the grid of `step` anchored at `origin`.
    pub fn is_on_grid(
        &self,
        origin: TempBin,
        step: TempBin,
    ) -> bool {
        step.0 > 0
            && self
                .0
                .checked_sub(origin.0)
                .is_some_and(|offset| offset.rem_euclid(step.0) == 0)
    }
}

impl Display for TempBin {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / SCALE as u64;
        let frac = abs % SCALE as u64;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        }
        else {
            let digits = format!("{frac:03}");
            write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl FromStr for TempBin {
    type Err = DreamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<TempType>() {
            Ok(temp) => {
                Self::try_from_celsius(temp).map_err(|_| {
                    DreamingError::input_format(format!(
                        "'{trimmed}' is not a melting temperature"
                    ))
                })
            },
            Err(_) => {
                Err(DreamingError::input_format(format!(
                    "'{trimmed}' is not a melting temperature"
                )))
            },
        }
    }
}

impl Serialize for TempBin {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("80", "80")]
    #[case("80.0", "80")]
    #[case("80.00", "80")]
    #[case("80.8", "80.8")]
    #[case(" 80.80 ", "80.8")]
    #[case("79.25", "79.25")]
    #[case("-1.5", "-1.5")]
    fn test_canonical_label(
        #[case] raw: &str,
        #[case] label: &str,
    ) {
        assert_eq!(raw.parse::<TempBin>().unwrap().label(), label);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("NaN")]
    #[case("inf")]
    #[case("1e300")]
    #[case("-1e300")]
    fn test_rejects_non_temperatures(#[case] raw: &str) {
        assert!(raw.parse::<TempBin>().is_err());
    }

    #[test]
    fn test_range_is_inclusive_and_exact() {
        let bins = TempBin::range(
            TempBin::from_celsius(79.2),
            TempBin::from_celsius(80.0),
            TempBin::from_celsius(0.2),
        );
        let labels: Vec<String> = bins.iter().map(TempBin::label).collect();
        assert_eq!(labels, vec!["79.2", "79.4", "79.6", "79.8", "80"]);
    }

    #[test]
    fn test_range_degenerate() {
        let t = TempBin::from_celsius(80.0);
        assert_eq!(TempBin::range(t, t, TempBin::from_celsius(0.2)), vec![t]);
        assert!(TempBin::range(t, TempBin::from_celsius(79.0), TempBin::from_celsius(0.2)).is_empty());
        assert!(TempBin::range(t, t, TempBin::from_celsius(0.0)).is_empty());
    }

    #[test]
    fn test_extreme_temperatures() {
        let far = "1e15".parse::<TempBin>().unwrap();
        assert_eq!(far.label(), "1000000000000000");
        let near = TempBin::from_celsius(80.0);
        let step = TempBin::from_celsius(0.2);
        assert!(TempBin(MAX_UNITS).is_on_grid(TempBin(-MAX_UNITS), TempBin(2)));
        assert!(!TempBin(i64::MAX).is_on_grid(TempBin(i64::MIN), step));
        assert_eq!(TempBin::range_len(near, far, step), Some(4_999_999_999_999_601));
        assert_eq!(TempBin::range_len(TempBin(i64::MIN), TempBin(i64::MAX), step), None);
        assert_eq!(TempBin::range_len(near, near, step), Some(1));
        assert_eq!(TempBin::range_len(far, near, step), Some(0));
    }

    #[test]
    fn test_grid() {
        let origin = TempBin::from_celsius(79.2);
        let step = TempBin::from_celsius(0.2);
        assert!(TempBin::from_celsius(80.8).is_on_grid(origin, step));
        assert!(!TempBin::from_celsius(80.9).is_on_grid(origin, step));
        assert!(TempBin::from_celsius(79.0).is_on_grid(origin, step));
    }
}
