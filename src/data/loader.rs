use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::error::DataError;
use super::filter::RecordFilter;
use super::model::{parse_dob, Dataset, Record, DOB_LEN};

const FIRST_NAME: &str = "first_name";
const LAST_NAME: &str = "last_name";
const DOB: &str = "dob";

const HEADER_WIDTH: usize = 3;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a CSV file and wrap it in a [`RecordFilter`].
///
/// The header row must contain `first_name`, `last_name` and `dob`
/// (case-insensitive, any order).
pub fn load_csv(path: &Path) -> Result<RecordFilter> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening csv file {}", path.display()))?;
    let filter = load_csv_reader(file)
        .with_context(|| format!("loading records from {}", path.display()))?;
    log::info!("loaded {} records from {}", filter.dataset().len(), path.display());
    Ok(filter)
}

/// Same as [`load_csv`] for an already open source.
pub fn load_csv_reader<R: Read>(source: R) -> Result<RecordFilter> {
    let rows = read_rows(source)?;
    log::debug!("read {} raw csv rows", rows.len());
    let dataset = build_records(&rows).context("building records")?;
    Ok(RecordFilter::new(dataset))
}

/// Tokenize CSV text into rows of cells. No header handling and no trimming;
/// ragged rows are rejected by the reader.
fn read_rows<R: Read>(source: R) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(source);

    reader
        .records()
        .enumerate()
        .map(|(line, result)| {
            let record = result.with_context(|| format!("parsing csv row {line}"))?;
            Ok(record.iter().map(str::to_string).collect())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dataset builder
// ---------------------------------------------------------------------------

/// Column positions of the three required fields, resolved from the header.
#[derive(Debug, Clone, Copy)]
struct FieldIndex {
    first_name: usize,
    last_name: usize,
    dob: usize,
}

impl FieldIndex {
    fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self, DataError> {
        let positions: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| (cell.as_ref().to_lowercase(), i))
            .collect();

        let lookup = |name: &'static str| {
            positions
                .get(name)
                .copied()
                .ok_or(DataError::MissingColumn(name))
        };

        Ok(Self {
            first_name: lookup(FIRST_NAME)?,
            last_name: lookup(LAST_NAME)?,
            dob: lookup(DOB)?,
        })
    }
}

/// Turn raw rows (header first) into a [`Dataset`].
///
/// Fails without returning a partial dataset when the input has no data
/// rows, the header is not exactly three cells or lacks a required label,
/// or any `dob` cell is not a valid `YYYYMMDD` date.
pub fn build_records<R, S>(raw_rows: &[R]) -> Result<Dataset, DataError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let (header, rows) = match raw_rows.split_first() {
        Some((header, rows)) if !rows.is_empty() => (header.as_ref(), rows),
        _ => return Err(DataError::EmptyOrMalformed),
    };
    if header.len() != HEADER_WIDTH {
        return Err(DataError::EmptyOrMalformed);
    }

    let index = FieldIndex::from_header(header)?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, raw) in rows.iter().enumerate() {
        let cells = raw.as_ref();
        if cells.len() != HEADER_WIDTH {
            return Err(DataError::RowWidth {
                row,
                found: cells.len(),
                expected: HEADER_WIDTH,
            });
        }

        let dob = cells[index.dob].as_ref();
        if dob.len() != DOB_LEN {
            return Err(DataError::MalformedDob {
                row,
                value: dob.to_string(),
            });
        }
        let date_of_birth = parse_dob(dob).ok_or_else(|| DataError::UnparseableDob {
            row,
            value: dob.to_string(),
        })?;

        records.push(Record::new(
            cells[index.first_name].as_ref(),
            cells[index.last_name].as_ref(),
            date_of_birth,
        ));
    }

    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 3] = ["first_name", "last_name", "dob"];

    fn rows(data: &[[&str; 3]]) -> Vec<Vec<String>> {
        std::iter::once(&HEADER)
            .chain(data)
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn builds_one_record_per_data_row_in_order() {
        let raw = rows(&[
            ["Jane", "Doe", "19900101"],
            ["Jon", "Smith", "19850615"],
            ["Jane", "Doe", "19900101"],
        ]);
        let dataset = build_records(&raw).unwrap();

        assert_eq!(dataset.len(), raw.len() - 1);
        let rendered: Vec<String> = dataset.iter().map(Record::to_string).collect();
        assert_eq!(
            rendered,
            [
                "Jane, Doe, 19900101",
                "Jon, Smith, 19850615",
                "Jane, Doe, 19900101"
            ]
        );
    }

    #[test]
    fn resolves_columns_by_header_name() {
        let raw = vec![
            vec!["DOB", "Last_Name", "FIRST_NAME"],
            vec!["19700704", "Roe", "Richard"],
        ];
        let dataset = build_records(&raw).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.first_name, "Richard");
        assert_eq!(record.last_name, "Roe");
        assert_eq!(record.birth_year(), 1970);
    }

    #[test]
    fn keeps_names_verbatim() {
        let raw = rows(&[["", " Doe ", "19900101"]]);
        let dataset = build_records(&raw).unwrap();
        assert_eq!(dataset.records()[0].first_name, "");
        assert_eq!(dataset.records()[0].last_name, " Doe ");
    }

    #[test]
    fn rejects_missing_data_rows() {
        let empty: Vec<Vec<String>> = Vec::new();
        assert_eq!(build_records(&empty), Err(DataError::EmptyOrMalformed));
        assert_eq!(build_records(&rows(&[])), Err(DataError::EmptyOrMalformed));
    }

    #[test]
    fn rejects_wrong_header_width() {
        let narrow = vec![vec!["first_name", "last_name"], vec!["Jane", "Doe"]];
        assert_eq!(build_records(&narrow), Err(DataError::EmptyOrMalformed));

        let wide = vec![
            vec!["first_name", "last_name", "dob", "extra"],
            vec!["Jane", "Doe", "19900101", "x"],
        ];
        assert_eq!(build_records(&wide), Err(DataError::EmptyOrMalformed));
    }

    #[test]
    fn rejects_header_without_required_label() {
        let raw = vec![
            vec!["first_name", "surname", "dob"],
            vec!["Jane", "Doe", "19900101"],
        ];
        assert_eq!(
            build_records(&raw),
            Err(DataError::MissingColumn("last_name"))
        );

        let duplicated = vec![
            vec!["dob", "dob", "last_name"],
            vec!["19900101", "19900101", "Doe"],
        ];
        assert_eq!(
            build_records(&duplicated),
            Err(DataError::MissingColumn("first_name"))
        );
    }

    #[test]
    fn rejects_ragged_data_row() {
        let raw = vec![
            vec!["first_name", "last_name", "dob"],
            vec!["Jane", "Doe", "19900101"],
            vec!["Jon", "19850615"],
        ];
        assert_eq!(
            build_records(&raw),
            Err(DataError::RowWidth {
                row: 1,
                found: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn rejects_wrong_length_dob() {
        let raw = rows(&[["Jane", "Doe", "19900101"], ["Jon", "Smith", "2020101"]]);
        let err = build_records(&raw).unwrap_err();
        assert_eq!(
            err,
            DataError::MalformedDob {
                row: 1,
                value: "2020101".into()
            }
        );
        assert_eq!(err.to_string(), "record 1 has malformed dob: 2020101");
    }

    #[test]
    fn rejects_impossible_dob() {
        let raw = rows(&[["Jane", "Doe", "20201332"]]);
        assert_eq!(
            build_records(&raw),
            Err(DataError::UnparseableDob {
                row: 0,
                value: "20201332".into()
            })
        );
    }

    #[test]
    fn reads_rows_from_csv_text() {
        let text = "first_name,last_name,dob\nJane,Doe,19900101\n\"Smith, Jr\",Jon,19850615\n";
        let filter = load_csv_reader(text.as_bytes()).unwrap();
        let dataset = filter.dataset();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].first_name, "Smith, Jr");
    }

    #[test]
    fn csv_errors_carry_context() {
        let err = load_csv_reader("first_name,last_name,dob\nJane,Doe,1990\n".as_bytes())
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("building records"), "{message}");
        assert!(message.contains("malformed dob: 1990"), "{message}");
    }
}
