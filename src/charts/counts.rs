//! Count Tabulation Module
//! Row counts per category, optionally split by a second (hue) field.

use crate::data::UNKNOWN;
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountError {
    #[error("Cannot tabulate column: {0}")]
    Column(#[from] PolarsError),
}

/// Counts for one chart: `counts[category][series]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    pub field: String,
    pub categories: Vec<String>,
    /// Hue levels, or just the field name when there is no hue.
    pub series: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl CountTable {
    /// Tabulate row counts of `field`, split by `hue` if given.
    ///
    /// Text categories keep the order they first appear in; numeric
    /// categories and hue levels are sorted.
    pub fn tally(df: &DataFrame, field: &str, hue: Option<&str>) -> Result<Self, CountError> {
        let categories = Self::labels(df, field)?;
        let hues = match hue {
            Some(hue) => Self::labels(df, hue)?,
            None => vec![field.to_string(); categories.len()],
        };

        let by_appearance = df.column(field)?.dtype() == &DataType::String;
        let category_levels = Self::levels(&categories, by_appearance);
        let series = Self::levels(&hues, false);

        let category_index: HashMap<&str, usize> = category_levels
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let series_index: HashMap<&str, usize> = series
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_str(), i))
            .collect();

        let mut counts = vec![vec![0usize; series.len()]; category_levels.len()];
        for (category, level) in categories.iter().zip(hues.iter()) {
            if let (Some(&c), Some(&s)) = (
                category_index.get(category.as_str()),
                series_index.get(level.as_str()),
            ) {
                counts[c][s] += 1;
            }
        }

        Ok(Self {
            field: field.to_string(),
            categories: category_levels,
            series,
            counts,
        })
    }

    /// Distinct values, either in first-seen order or sorted (numbers by
    /// value, ahead of any text).
    fn levels(values: &[String], by_appearance: bool) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut levels: Vec<String> = values
            .iter()
            .filter(|v| seen.insert(v.as_str()))
            .cloned()
            .collect();
        if !by_appearance {
            levels.sort_by(|a, b| match (a.parse::<f64>().ok(), b.parse::<f64>().ok()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            });
        }
        levels
    }

    /// Stringified column values, one per row.
    fn labels(df: &DataFrame, name: &str) -> Result<Vec<String>, CountError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or(UNKNOWN).to_string())
            .collect())
    }

    pub fn count(&self, category: usize, series: usize) -> usize {
        self.counts
            .get(category)
            .and_then(|row| row.get(series))
            .copied()
            .unwrap_or(0)
    }

    /// Total per category, summed across series.
    pub fn category_total(&self, category: usize) -> usize {
        self.counts.get(category).map(|row| row.iter().sum()).unwrap_or(0)
    }

    /// Largest single bar.
    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of every bar; equals the row count of the tallied frame.
    pub fn total(&self) -> usize {
        (0..self.categories.len()).map(|c| self.category_total(c)).sum()
    }

    pub fn has_hue(&self) -> bool {
        !(self.series.len() == 1 && self.series[0] == self.field)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
