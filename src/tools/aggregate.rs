use itertools::Itertools;
use log::{
    debug,
    warn,
};
use rayon::prelude::*;

use super::load::LoadedInput;
use crate::data_structs::typedef::CountType;
use crate::data_structs::{
    MetaValue,
    RawMeltTable,
    SampleRecord,
    TempBin,
    COPIES_LOADED_FIELD,
    SAMPLE_FIELD,
};
use crate::error::{
    DreamingError,
    Result,
};
use crate::utils::{
    n_threads,
    poisson_adjust,
    THREAD_POOL,
};

/// Fragment count per temperature for one column of wells.
///
/// Empty wells are skipped. A temperature shown by every well is counted as
/// `n_wells` as is; otherwise the count is Poisson adjusted when requested.
pub fn count_column<I>(
    temps: I,
    n_wells: usize,
    poisson: bool,
) -> Vec<(TempBin, CountType)>
where
    I: IntoIterator<Item = Option<TempBin>>, {
    temps
        .into_iter()
        .flatten()
        .counts()
        .into_iter()
        .sorted_by_key(|(temp, _)| *temp)
        .map(|(temp, count)| {
            let value = if count >= n_wells {
                n_wells as CountType
            }
            else if poisson {
                poisson_adjust(count, n_wells)
            }
            else {
                count as CountType
            };
            (temp, value)
        })
        .collect()
}

/// Half the summed `copies_loaded` over `columns`: each assay lists its
/// loaded copies under both its `_L` and `_H` column.
fn copies_loaded(
    table: &RawMeltTable,
    sample: &str,
    columns: &[usize],
) -> Result<Option<CountType>> {
    let Some(row) = table.metadata_row(COPIES_LOADED_FIELD)
    else {
        return Ok(None);
    };
    let mut total = 0.0;
    for &idx in columns {
        if let Some(value) = &row.values[idx] {
            let copies = value.parse::<CountType>().map_err(|_| {
                DreamingError::input_format(format!(
                    "Sample '{sample}': {COPIES_LOADED_FIELD} value '{value}' is not \
                     a number"
                ))
            })?;
            total += copies;
        }
    }
    Ok(Some(total / 2.0))
}

/// First non-empty value of a generic metadata row over `columns`.
fn first_metadata_value(
    table: &RawMeltTable,
    sample: &str,
    field: &str,
    columns: &[usize],
) -> Result<MetaValue> {
    let row = table.metadata_row(field).ok_or_else(|| {
        DreamingError::input_format(format!(
            "Requested metadata row '{field}' is not in the raw table"
        ))
    })?;
    let values = columns
        .iter()
        .filter_map(|&idx| row.values[idx].as_deref())
        .unique()
        .collect_vec();
    if values.len() > 1 {
        warn!(
            "Sample '{sample}' has differing '{field}' values {:?}, using '{}'",
            values, values[0]
        );
    }
    Ok(values
        .first()
        .map(|value| MetaValue::Text(value.to_string()))
        .unwrap_or(MetaValue::Missing))
}

/// Builds the [`SampleRecord`] of one sample from all of its columns.
pub fn aggregate_sample(
    input: &LoadedInput,
    sample: &str,
    metadata_fields: &[String],
    poisson: bool,
    background: bool,
) -> Result<SampleRecord> {
    let table = input.table;
    let n_wells = table.n_wells();
    let columns = table.sample_columns(sample);
    if columns.is_empty() {
        return Err(DreamingError::input_format(format!(
            "Sample '{sample}' has no columns"
        )));
    }

    let mut record = SampleRecord::new(sample, input.bins.iter().copied());
    for &idx in columns.iter() {
        for (temp, count) in count_column(table.column_temps(idx), n_wells, poisson) {
            record.add_count(temp, count);
        }
    }

    let needs_copies = background || metadata_fields.iter().any(|f| f == COPIES_LOADED_FIELD);
    if needs_copies {
        record.copies_loaded = copies_loaded(table, sample, &columns)?;
        if record.copies_loaded.is_none() {
            return Err(DreamingError::input_format(format!(
                "The raw table has no '{COPIES_LOADED_FIELD}' row"
            )));
        }
    }

    for field in metadata_fields {
        let value = match field.as_str() {
            SAMPLE_FIELD => MetaValue::Text(sample.to_string()),
            COPIES_LOADED_FIELD => {
                record
                    .copies_loaded
                    .map(MetaValue::Number)
                    .unwrap_or(MetaValue::Missing)
            },
            other => first_metadata_value(table, sample, other, &columns)?,
        };
        record.metadata.push((field.clone(), value));
    }

    debug!(
        "{sample}: {} columns, {} fragments",
        columns.len(),
        record.total()
    );
    Ok(record)
}

/// Aggregates every sample, in sorted sample order.
///
/// Samples are independent and run on the shared thread pool.
pub fn aggregate_samples(
    input: &LoadedInput,
    metadata_fields: &[String],
    poisson: bool,
    background: bool,
) -> Result<Vec<SampleRecord>> {
    debug!(
        "Aggregating {} samples on {} threads",
        input.samples.len(),
        n_threads()
    );
    THREAD_POOL.install(|| {
        input
            .samples
            .par_iter()
            .map(|sample| aggregate_sample(input, sample, metadata_fields, poisson, background))
            .collect::<Result<Vec<_>>>()
    })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rstest::*;

    use super::*;
    use crate::data_structs::CalibrationTable;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn bin(temp: f64) -> TempBin {
        TempBin::from_celsius(temp)
    }

    #[fixture]
    fn table() -> RawMeltTable {
        RawMeltTable::from_rows(
            &strings(&["A_L", "A_H", "A_L.1", "A_H.1", "AB_L", "AB_H"]),
            vec![
                ("copies_loaded".to_string(), strings(&["100", "100", "51", "51", "40", "40"])),
                ("1".to_string(), strings(&["80", "82", "80", "", "80.2", ""])),
                ("2".to_string(), strings(&["80", "", "80.2", "", "80.2", ""])),
                ("3".to_string(), strings(&["80", "", "", "", "80.2", ""])),
                ("4".to_string(), strings(&["80", "", "", "", "", ""])),
                ("plate".to_string(), strings(&["P1", "P1", "P2", "P2", "P1", ""])),
            ],
        )
        .unwrap()
    }

    #[fixture]
    fn calibration() -> CalibrationTable {
        CalibrationTable::from_pairs(
            [(80.0, 0.0), (80.2, 0.5), (80.4, 0.5), (80.6, 0.5), (80.8, 0.5), (81.0, 0.5)]
                .into_iter()
                .chain((0..6).map(|i| (81.2 + 0.2 * i as f64, 1.0)))
                .map(|(t, md)| (bin(t), md)),
        )
        .unwrap()
    }

    #[test]
    fn test_count_column_saturation() {
        let temps = vec![Some(bin(80.0)); 4];
        assert_eq!(count_column(temps.clone(), 4, false), vec![(bin(80.0), 4.0)]);
        assert_eq!(count_column(temps, 4, true), vec![(bin(80.0), 4.0)]);
    }

    #[test]
    fn test_count_column_poisson() {
        let temps = vec![Some(bin(80.0)), Some(bin(80.0)), Some(bin(80.8)), None];
        assert_eq!(
            count_column(temps.clone(), 4, false),
            vec![(bin(80.0), 2.0), (bin(80.8), 1.0)]
        );
        // -ln(1 - 2/4) * 4 = 2.77, -ln(1 - 1/4) * 4 = 1.15
        assert_eq!(
            count_column(temps, 4, true),
            vec![(bin(80.0), 3.0), (bin(80.8), 1.0)]
        );
    }

    #[rstest]
    fn test_aggregate_merges_replicates(
        table: RawMeltTable,
        calibration: CalibrationTable,
    ) {
        let input = LoadedInput::new(&table, &calibration, 0.2).unwrap();
        let fields = strings(&["Sample", "copies_loaded", "plate"]);
        let records = aggregate_samples(&input, &fields, false, false).unwrap();
        assert_eq!(records.len(), 2);

        let a = &records[0];
        assert_eq!(a.sample, "A");
        assert_eq!(a.count(&bin(80.0)), 5.0);
        assert_eq!(a.count(&bin(80.2)), 1.0);
        assert_eq!(a.count(&bin(82.0)), 1.0);
        assert_eq!(a.count(&bin(81.0)), 0.0);
        assert!(a.counts.contains_key(&bin(81.0)));
        assert_approx_eq!(a.copies_loaded.unwrap(), 151.0);
        assert_eq!(a.meta("Sample"), Some(&MetaValue::Text("A".to_string())));
        assert_eq!(a.meta("plate"), Some(&MetaValue::Text("P1".to_string())));

        let ab = &records[1];
        assert_eq!(ab.sample, "AB");
        assert_eq!(ab.count(&bin(80.0)), 0.0);
        assert_eq!(ab.count(&bin(80.2)), 3.0);
        assert_eq!(ab.meta("copies_loaded"), Some(&MetaValue::Number(40.0)));
    }

    #[rstest]
    fn test_aggregate_poisson_keeps_saturated_column(
        table: RawMeltTable,
        calibration: CalibrationTable,
    ) {
        let input = LoadedInput::new(&table, &calibration, 0.2).unwrap();
        let fields = strings(&["Sample"]);
        let records = aggregate_samples(&input, &fields, true, false).unwrap();
        // A_L is saturated at 80 (4 of 4), A_L.1 has 1 of 4 at 80: round(1.15)
        assert_eq!(records[0].count(&bin(80.0)), 5.0);
        // AB_L: 3 of 4 at 80.2: round(-ln(0.25) * 4) = round(5.55)
        assert_eq!(records[1].count(&bin(80.2)), 6.0);
    }

    #[rstest]
    fn test_missing_metadata_row(
        table: RawMeltTable,
        calibration: CalibrationTable,
    ) {
        let input = LoadedInput::new(&table, &calibration, 0.2).unwrap();
        let fields = strings(&["Sample", "date"]);
        assert!(matches!(
            aggregate_samples(&input, &fields, false, false),
            Err(DreamingError::InputFormat(msg)) if msg.contains("date")
        ));
    }

    #[test]
    fn test_background_requires_copies_loaded() {
        let table = RawMeltTable::from_rows(
            &strings(&["A_L", "A_H"]),
            vec![("1".to_string(), strings(&["80", ""]))],
        )
        .unwrap();
        let calibration = CalibrationTable::from_pairs([(bin(80.0), 0.0)]).unwrap();
        let input = LoadedInput::new(&table, &calibration, 0.2).unwrap();
        let fields = strings(&["Sample"]);
        assert!(aggregate_samples(&input, &fields, false, false).is_ok());
        assert!(matches!(
            aggregate_samples(&input, &fields, false, true),
            Err(DreamingError::InputFormat(_))
        ));
    }
}
