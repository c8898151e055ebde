//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!   people.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  csv rows → header lookup → dob parsing → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ RecordFilter  │  immutable Vec<Record>, shared by reference
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Query    │  first_name / last_name / year → matching records
//!   └──────────┘
//! ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::{DataError, ValidationError};
pub use filter::{Query, RecordFilter, UnknownQuery};
pub use loader::{build_records, load_csv, load_csv_reader};
pub use model::{Dataset, Record};
