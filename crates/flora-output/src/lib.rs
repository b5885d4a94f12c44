//! CSV files for harvested plant records.
//!
//! [`CsvSink`] writes rows one at a time under a fixed header, honouring an
//! [`ExistingFile`] policy when the target already exists. The readers load
//! taxon lists produced by earlier runs and CSV exports returned by services.

pub mod error;
pub mod reader;
pub mod sink;

pub use error::{OutputError, Result};
pub use reader::{Row, distinct_column, read_column, read_rows, read_rows_from_str};
pub use sink::{CsvSink, ExistingFile};
