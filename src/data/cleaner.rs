//! Data Cleaner Module
//! Null normalization, malformed-value correction and year derivation.

use crate::data::schema::{OCCUR_DATE, OCCUR_YEAR, PERP_AGE_GROUP, PERP_SEX, VIC_SEX};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

/// Sentinel for any missing value.
pub const UNKNOWN: &str = "UNKNOWN";
/// Sentinel the extract already uses for unknown sex.
pub const SEX_UNKNOWN: &str = "U";

/// Tokens read as missing, in addition to empty fields. Matches the default
/// NA set of common dataframe CSV readers. `(null)` is not in it and stays a
/// literal category.
pub const NULL_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Perpetrator age-group codes that are data-entry errors
/// (one record each in 2010, 2013 and 2015).
pub const BAD_AGE_GROUPS: [&str; 3] = ["1020", "940", "224"];

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Row {row}: cannot derive a year from date '{value}'")]
    InvalidDate { row: usize, value: String },
}

/// Applies the cleaning steps to a loaded incident table.
pub struct IncidentCleaner;

impl IncidentCleaner {
    /// Run every cleaning step in order.
    ///
    /// Stable under reapplication: cleaning an already-cleaned table returns
    /// an identical table.
    pub fn clean(df: DataFrame) -> Result<DataFrame, CleanError> {
        let string_columns: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| c.dtype() == &DataType::String)
            .map(|c| c.name().to_string())
            .collect();

        let fill_missing: Vec<Expr> = string_columns
            .iter()
            .map(|name| Self::fill_missing(name))
            .collect();

        let collapse_sex: Vec<Expr> = [PERP_SEX, VIC_SEX]
            .iter()
            .map(|name| Self::replace_value(name, UNKNOWN, SEX_UNKNOWN))
            .collect();

        let fix_age_group = Self::replace_any(PERP_AGE_GROUP, &BAD_AGE_GROUPS, UNKNOWN);

        let mut df = df
            .lazy()
            .with_columns(fill_missing)
            .with_columns(collapse_sex)
            .with_columns([fix_age_group])
            .collect()?;
        debug!(columns = string_columns.len(), "Normalized missing values");

        let years = Self::derive_years(&df)?;
        df.with_column(Column::new(OCCUR_YEAR.into(), years))?;

        info!(rows = df.height(), "Cleaned incident table");
        Ok(df)
    }

    /// Year from the last four characters of an `MM/DD/YYYY` date.
    pub fn derive_year(date: &str) -> Option<i32> {
        let len = date.chars().count();
        if len < 4 {
            return None;
        }
        let suffix: String = date.chars().skip(len - 4).collect();
        if !suffix.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok()
    }

    fn derive_years(df: &DataFrame) -> Result<Vec<i32>, CleanError> {
        let dates = df.column(OCCUR_DATE)?.str()?;
        dates
            .into_iter()
            .enumerate()
            .map(|(row, date)| {
                let date = date.unwrap_or(UNKNOWN);
                Self::derive_year(date).ok_or_else(|| CleanError::InvalidDate {
                    row,
                    value: date.to_string(),
                })
            })
            .collect()
    }

    /// Null, empty or a known null token → `UNKNOWN`.
    fn fill_missing(name: &str) -> Expr {
        let is_missing = NULL_TOKENS.iter().fold(
            col(name).is_null().or(col(name).eq(lit(""))),
            |acc, token| acc.or(col(name).eq(lit(*token))),
        );
        when(is_missing)
            .then(lit(UNKNOWN))
            .otherwise(col(name))
            .alias(name)
    }

    fn replace_value(name: &str, from: &str, to: &str) -> Expr {
        Self::replace_any(name, &[from], to)
    }

    fn replace_any(name: &str, from: &[&str], to: &str) -> Expr {
        let matches = from
            .iter()
            .fold(lit(false), |acc, value| acc.or(col(name).eq(lit(*value))));
        when(matches).then(lit(to)).otherwise(col(name)).alias(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{create_test_csv, SAMPLE_ROWS};
    use crate::data::IncidentLoader;

    fn sample_frame() -> DataFrame {
        let file = create_test_csv(&SAMPLE_ROWS);
        let mut loader = IncidentLoader::new();
        loader.load_csv(file.path()).unwrap();
        loader.prepare().unwrap()
    }

    fn values(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap_or("<null>").to_string())
            .collect()
    }

    #[test]
    fn test_no_nulls_after_cleaning() {
        let df = IncidentCleaner::clean(sample_frame()).unwrap();
        for column in df.get_columns() {
            assert_eq!(column.null_count(), 0, "nulls left in {}", column.name());
        }
    }

    #[test]
    fn test_sex_fields_never_unknown() {
        let df = IncidentCleaner::clean(sample_frame()).unwrap();
        for name in [PERP_SEX, VIC_SEX] {
            assert!(values(&df, name).iter().all(|v| v != UNKNOWN));
        }
        // Row 0 has an empty PERP_SEX, row 2 an empty VIC_SEX, row 3 "n/a"
        assert_eq!(values(&df, PERP_SEX), vec!["U", "M", "M", "U"]);
        assert_eq!(values(&df, VIC_SEX), vec!["M", "M", "U", "F"]);
    }

    #[test]
    fn test_missing_values_become_unknown() {
        let df = IncidentCleaner::clean(sample_frame()).unwrap();
        assert_eq!(values(&df, "PERP_RACE"), vec!["UNKNOWN", "BLACK", "WHITE", "UNKNOWN"]);
    }

    #[test]
    fn test_null_tokens_become_unknown() {
        let tokens: Vec<&str> = NULL_TOKENS.to_vec();
        let n = tokens.len();
        let df = df!(
            OCCUR_DATE => vec!["01/01/2020"; n],
            PERP_AGE_GROUP => vec!["18-24"; n],
            PERP_SEX => vec!["M"; n],
            VIC_SEX => vec!["F"; n],
            "PERP_RACE" => tokens
        )
        .unwrap();

        let df = IncidentCleaner::clean(df).unwrap();
        assert_eq!(values(&df, "PERP_RACE"), vec![UNKNOWN; n]);
    }

    #[test]
    fn test_token_classes() {
        let df = df!(
            OCCUR_DATE => vec!["01/01/2020"; 7],
            PERP_AGE_GROUP => vec!["18-24"; 7],
            PERP_SEX => ["n/a", "<NA>", "#N/A", "-NaN", "1.#QNAN", "(null)", "null "],
            VIC_SEX => vec!["F"; 7],
            "PERP_RACE" => ["n/a", "<NA>", "#N/A", "-NaN", "1.#QNAN", "(null)", "None"]
        )
        .unwrap();

        let df = IncidentCleaner::clean(df).unwrap();
        // "(null)" and padded tokens are ordinary values
        assert_eq!(
            values(&df, "PERP_RACE"),
            vec!["UNKNOWN", "UNKNOWN", "UNKNOWN", "UNKNOWN", "UNKNOWN", "(null)", "UNKNOWN"]
        );
        assert_eq!(values(&df, PERP_SEX), vec!["U", "U", "U", "U", "U", "(null)", "null "]);
    }

    #[test]
    fn test_bad_age_groups_become_unknown() {
        let df = df!(
            OCCUR_DATE => ["01/01/2010", "01/01/2013", "01/01/2015", "01/01/2019"],
            PERP_AGE_GROUP => ["1020", "940", "224", "18-24"],
            PERP_SEX => ["M", "M", "F", "M"],
            VIC_SEX => ["F", "M", "M", "M"]
        )
        .unwrap();

        let df = IncidentCleaner::clean(df).unwrap();
        assert_eq!(
            values(&df, PERP_AGE_GROUP),
            vec!["UNKNOWN", "UNKNOWN", "UNKNOWN", "18-24"]
        );
    }

    #[test]
    fn test_null_sex_becomes_u() {
        let df = df!(
            OCCUR_DATE => ["03/14/2019"],
            PERP_AGE_GROUP => [Some("25-44")],
            PERP_SEX => [None::<&str>],
            VIC_SEX => [Some("F")]
        )
        .unwrap();

        let df = IncidentCleaner::clean(df).unwrap();
        assert_eq!(values(&df, PERP_SEX), vec!["U"]);
    }

    #[test]
    fn test_year_is_derived() {
        let df = IncidentCleaner::clean(sample_frame()).unwrap();
        let years: Vec<Option<i32>> = df.column(OCCUR_YEAR).unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(years, vec![Some(2021), Some(2014), Some(2015), Some(2015)]);
    }

    #[test]
    fn test_derive_year() {
        assert_eq!(IncidentCleaner::derive_year("12/31/2019"), Some(2019));
        assert_eq!(IncidentCleaner::derive_year("2019"), Some(2019));
        assert_eq!(IncidentCleaner::derive_year("019"), None);
        assert_eq!(IncidentCleaner::derive_year("UNKNOWN"), None);
        assert_eq!(IncidentCleaner::derive_year("01/01/20x9"), None);
    }

    #[test]
    fn test_invalid_date_aborts() {
        let df = df!(
            OCCUR_DATE => [Some("01/01/2020"), None],
            PERP_AGE_GROUP => ["18-24", "<18"],
            PERP_SEX => ["M", "M"],
            VIC_SEX => ["F", "M"]
        )
        .unwrap();

        let err = IncidentCleaner::clean(df).unwrap_err();
        assert!(matches!(err, CleanError::InvalidDate { row: 1, ref value } if value == UNKNOWN));
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let once = IncidentCleaner::clean(sample_frame()).unwrap();
        let twice = IncidentCleaner::clean(once.clone()).unwrap();
        assert!(once.equals_missing(&twice));
    }
}
