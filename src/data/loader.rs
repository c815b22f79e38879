//! CSV Data Loader Module
//! Reads the incident extract with Polars and trims it to the charted columns.

use crate::data::schema::{DROPPED_COLUMNS, KEPT_COLUMNS};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Expected column '{0}' is missing")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Loads the incident CSV into a string-typed DataFrame.
pub struct IncidentLoader {
    df: Option<DataFrame>,
}

impl Default for IncidentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl IncidentLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars.
    ///
    /// Every column is read as a string so missing-value sentinels can be
    /// substituted uniformly during cleaning.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        // A zero-row inference window reads every column as String
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        info!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "Loaded incident CSV"
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Validate the schema and drop the columns not used downstream.
    ///
    /// Consumes the loaded DataFrame.
    pub fn prepare(&mut self) -> Result<DataFrame, LoaderError> {
        let df = self.df.take().ok_or(LoaderError::NoData)?;
        Self::select_columns(df)
    }

    fn select_columns(df: DataFrame) -> Result<DataFrame, LoaderError> {
        if let Some(missing) = KEPT_COLUMNS
            .iter()
            .chain(DROPPED_COLUMNS.iter())
            .find(|name| df.get_column_index(name).is_none())
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        let mut df = df;
        for name in DROPPED_COLUMNS {
            df = df.drop(name)?;
        }
        debug!(dropped = DROPPED_COLUMNS.len(), remaining = df.width(), "Dropped unused columns");

        Ok(df)
    }

    /// Get the number of rows in the loaded DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{create_test_csv, SAMPLE_ROWS};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_reads_all_columns_as_strings() {
        let file = create_test_csv(&SAMPLE_ROWS);
        let mut loader = IncidentLoader::new();
        let df = loader.load_csv(file.path()).unwrap();

        assert_eq!(df.height(), 4);
        assert_eq!(df.width(), 19);
        assert!(df.get_columns().iter().all(|c| c.dtype() == &DataType::String));
        assert_eq!(loader.get_row_count(), 4);
    }

    #[test]
    fn test_prepare_drops_unused_columns() {
        let file = create_test_csv(&SAMPLE_ROWS);
        let mut loader = IncidentLoader::new();
        loader.load_csv(file.path()).unwrap();
        let df = loader.prepare().unwrap();

        assert_eq!(df.width(), KEPT_COLUMNS.len());
        for name in DROPPED_COLUMNS {
            assert!(df.get_column_index(name).is_none(), "{} still present", name);
        }
        assert_eq!(loader.get_row_count(), 0);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let mut loader = IncidentLoader::new();
        let err = loader
            .load_csv(Path::new("definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "INCIDENT_KEY,OCCUR_DATE,BORO").unwrap();
        writeln!(file, "1,01/01/2020,BRONX").unwrap();

        let mut loader = IncidentLoader::new();
        loader.load_csv(file.path()).unwrap();
        let err = loader.prepare().unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "OCCUR_TIME"));
    }

    #[test]
    fn test_prepare_without_load_fails() {
        let mut loader = IncidentLoader::new();
        assert!(matches!(loader.prepare(), Err(LoaderError::NoData)));
    }
}
