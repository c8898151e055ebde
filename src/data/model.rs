use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// `strftime` pattern of the `dob` column (`YYYYMMDD`).
pub const DOB_FORMAT: &str = "%Y%m%d";

/// Length in bytes of a well-formed `dob` cell.
pub const DOB_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Record – one person row
// ---------------------------------------------------------------------------

/// A single person (one data row of the source CSV).
///
/// Names are kept exactly as read; no trimming or case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "dob", serialize_with = "serialize_dob")]
    pub date_of_birth: NaiveDate,
}

impl Record {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
        }
    }

    /// Column header matching the [`Display`](fmt::Display) layout.
    pub const fn header() -> &'static str {
        "first_name, last_name, dob"
    }

    /// Calendar year of the date of birth.
    pub fn birth_year(&self) -> i32 {
        self.date_of_birth.year()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.first_name,
            self.last_name,
            self.date_of_birth.format(DOB_FORMAT)
        )
    }
}

fn serialize_dob<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DOB_FORMAT))
}

/// Parse an 8-digit `YYYYMMDD` string into a calendar date.
///
/// Returns `None` for anything that is not exactly eight ASCII digits or
/// does not name a real day (`20201332`, `20230229`, ...).
pub fn parse_dob(s: &str) -> Option<NaiveDate> {
    if s.len() != DOB_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[4..6].parse().ok()?;
    let day: u32 = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded record set
// ---------------------------------------------------------------------------

/// Records in source order (header excluded). Built once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// All records, in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
