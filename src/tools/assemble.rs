use polars::prelude::*;

use super::density::DensityCounts;
use crate::data_structs::typedef::CpgType;
use crate::data_structs::{
    DensityRow,
    DensityTable,
    MetaValue,
    SampleRecord,
    TempBin,
    COPIES_LOADED_FIELD,
};
use crate::error::{
    DreamingError,
    Result,
};

/// Pairs the ascending density levels with the CpG state sequence
/// `(n, 0), (n - 1, 1), ..., (0, n)`.
///
/// The levels must number exactly `n_cpgs + 1`.
pub fn assemble(
    counts: DensityCounts,
    n_cpgs: CpgType,
) -> Result<DensityTable> {
    let expected = n_cpgs as usize + 1;
    if counts.levels.len() != expected {
        return Err(DreamingError::Alignment {
            densities: counts.levels.len(),
            n_cpgs,
            expected,
        });
    }

    let rows = counts
        .levels
        .into_iter()
        .zip(0..=n_cpgs)
        .map(|((density, counts), n_methylated)| {
            DensityRow {
                n_unmethylated: n_cpgs - n_methylated,
                n_methylated,
                density,
                counts,
            }
        })
        .collect();

    Ok(DensityTable {
        samples: counts.samples,
        rows,
    })
}

/// The melt peak counts table: one row per sample, the requested metadata
/// fields followed by one column per temperature bin.
pub fn melt_peak_counts_df(
    records: &[SampleRecord],
    metadata_fields: &[String],
    bins: &[TempBin],
) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(metadata_fields.len() + bins.len());

    for field in metadata_fields {
        let values = records.iter().map(|record| record.meta(field));
        let column = if field == COPIES_LOADED_FIELD {
            Series::new(
                field.as_str().into(),
                values
                    .map(|value| value.and_then(MetaValue::as_number))
                    .collect::<Vec<_>>(),
            )
        }
        else {
            Series::new(
                field.as_str().into(),
                values
                    .map(|value| value.and_then(MetaValue::as_text))
                    .collect::<Vec<_>>(),
            )
        };
        columns.push(column.into_column());
    }

    for temp in bins {
        columns.push(
            Series::new(
                temp.label().into(),
                records.iter().map(|record| record.count(temp)).collect::<Vec<_>>(),
            )
            .into_column(),
        );
    }

    Ok(DataFrame::new(columns)?)
}
