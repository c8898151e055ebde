use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// RecordFilter – exact-match queries over a loaded dataset
// ---------------------------------------------------------------------------

/// Read-only query engine over a [`Dataset`].
///
/// Every query scans the records in source order and returns freshly
/// cloned matches, so results never alias the dataset. The type holds no
/// interior mutability and is safe to share across threads by reference.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    dataset: Dataset,
}

impl RecordFilter {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Records whose first name equals `name` byte for byte.
    pub fn by_first_name(&self, name: &str) -> Vec<Record> {
        self.matching(|r| r.first_name == name)
    }

    /// Records whose last name equals `name` byte for byte.
    pub fn by_last_name(&self, name: &str) -> Vec<Record> {
        self.matching(|r| r.last_name == name)
    }

    /// Records born in `year`, given as exactly four digits.
    pub fn by_birth_year(&self, year: &str) -> Result<Vec<Record>, ValidationError> {
        let year = parse_year(year)?;
        Ok(self.matching(|r| r.birth_year() == year))
    }

    fn matching(&self, predicate: impl Fn(&Record) -> bool) -> Vec<Record> {
        self.dataset
            .iter()
            .filter(|&r| predicate(r))
            .cloned()
            .collect()
    }
}

fn parse_year(year: &str) -> Result<i32, ValidationError> {
    if year.len() != 4 {
        return Err(ValidationError::YearLength(year.to_string()));
    }
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::YearNotInteger(year.to_string()));
    }
    year.parse()
        .map_err(|_| ValidationError::YearNotInteger(year.to_string()))
}

// ---------------------------------------------------------------------------
// Query – which field a lookup runs against
// ---------------------------------------------------------------------------

/// The three supported lookups, selected by the shell from a text key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    FirstName,
    LastName,
    BirthYear,
}

impl Query {
    pub const ALL: [Query; 3] = [Query::FirstName, Query::LastName, Query::BirthYear];

    /// Key the shell accepts for this query.
    pub fn key(self) -> &'static str {
        match self {
            Query::FirstName => "first_name",
            Query::LastName => "last_name",
            Query::BirthYear => "year",
        }
    }

    pub fn run(self, filter: &RecordFilter, value: &str) -> Result<Vec<Record>, ValidationError> {
        match self {
            Query::FirstName => Ok(filter.by_first_name(value)),
            Query::LastName => Ok(filter.by_last_name(value)),
            Query::BirthYear => filter.by_birth_year(value),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized filter parameter: {0:?}")]
pub struct UnknownQuery(pub String);

impl FromStr for Query {
    type Err = UnknownQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::ALL
            .into_iter()
            .find(|q| q.key() == s)
            .ok_or_else(|| UnknownQuery(s.to_string()))
    }
}
