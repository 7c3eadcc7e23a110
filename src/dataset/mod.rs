//! Uploaded datasets and the grouped counts drawn from them.

pub mod aggregate;

use thiserror::Error;

pub use aggregate::{count_by, GroupBy, GroupedCount};

/// Column holding the affordability label in uploaded datasets.
pub const CATEGORY_COLUMN: &str = "price Category";

/// Problems with an upload. Shown as a warning; the dashboard stays usable.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("upload is larger than the {limit} byte limit")]
    TooLarge { limit: usize },
}

/// A parsed CSV upload: header row plus string records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Dataset {
    /// Parse CSV bytes. A body with no header row is an empty dataset.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, DatasetError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    /// Data rows read, header excluded.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolve every named column, or report all the missing ones.
    /// A header-less (empty) dataset resolves to nothing and is not an error.
    pub fn require_columns(&self, names: &[&str]) -> Result<Option<Vec<usize>>, DatasetError> {
        if self.headers.is_empty() {
            return Ok(None);
        }

        let mut found = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(i) => found.push(i),
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Some(found))
        } else {
            Err(DatasetError::MissingColumns(missing))
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &csv::StringRecord> {
        self.rows.iter()
    }
}
