//! Category distribution for comma-separated artifacts.
//!
//! The header row is skipped, every other row counts once towards the total and once towards
//! the category found in the configured column.
//!

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use csv::ReaderBuilder;
use tracing::{debug, trace};

use crate::{DataFormatError, Summarizer};

/// Default category column, the "state" column of the stadium dataset.
pub const DEF_COLUMN: usize = 4;

/// Row counts per category, in order of first appearance.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distribution {
    total: usize,
    categories: Vec<(String, usize)>,
}

impl Distribution {
    /// Read all rows of `data` and count the values in `column`.
    ///
    #[tracing::instrument(skip(data))]
    pub fn from_csv(data: &[u8], column: usize) -> Result<Self, DataFormatError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut categories: Vec<(String, usize)> = vec![];
        let mut total = 0;

        for (n, rec) in rdr.records().enumerate() {
            let rec = rec.map_err(|e| DataFormatError::Malformed(e.to_string()))?;
            trace!("rec={:?}", rec);

            // Row numbers are 1-based and count the header.
            //
            let value = rec.get(column).ok_or_else(|| {
                DataFormatError::MissingField(format!("column {} in row {}", column, n + 2))
            })?;

            total += 1;
            match index.get(value) {
                Some(&i) => categories[i].1 += 1,
                None => {
                    index.insert(value.to_string(), categories.len());
                    categories.push((value.to_string(), 1));
                }
            }
        }
        debug!("{} rows, {} categories", total, categories.len());

        if total == 0 {
            return Err(DataFormatError::DivisionByZeroGuard(
                "no data rows".to_string(),
            ));
        }
        Ok(Distribution { total, categories })
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, n)| *n)
    }

    /// Share of `count` in the total, as a percentage rounded to one decimal.
    ///
    pub fn percent(&self, count: usize) -> f64 {
        let pct = count as f64 / self.total as f64 * 100.;
        (pct * 10.).round() / 10.
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, usize)> {
        self.categories.iter()
    }
}

impl Display for Distribution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Stadiums: {}", self.total)?;
        for (state, count) in &self.categories {
            writeln!(
                f,
                "The state {} has {:.1}% of the total statdiums.",
                state,
                self.percent(*count)
            )?;
        }
        Ok(())
    }
}

/// Summarizer for `Kind::Delimited`.
///
#[derive(Clone, Copy, Debug)]
pub struct DelimitedSummary {
    /// Category column index
    pub column: usize,
}

impl Default for DelimitedSummary {
    fn default() -> Self {
        DelimitedSummary { column: DEF_COLUMN }
    }
}

impl DelimitedSummary {
    pub fn new(column: usize) -> Self {
        DelimitedSummary { column }
    }
}

impl Summarizer for DelimitedSummary {
    fn name(&self) -> &'static str {
        "delimited"
    }

    fn summarize(&self, data: &[u8]) -> Result<String, DataFormatError> {
        trace!("delimited::summarize({} bytes)", data.len());

        Ok(Distribution::from_csv(data, self.column)?.to_string())
    }
}
