//! Descriptive statistics over one integer column of a spreadsheet.
//!
//! The first worksheet is read, its first row gives the column names.  Every value of the
//! selected column must be coercible to an integer; the statistics are then count, mean,
//! sample standard deviation, min, quartiles (linear interpolation) and max.
//!

use std::fmt::{Display, Formatter};
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::{debug, trace};

use crate::{DataFormatError, Summarizer};

/// Default numeric column.
pub const DEF_FIELD: &str = "age";

/// Convert one cell into an integer, the way a dataframe `astype(int)` would.
///
/// Floats are truncated toward zero, booleans become 0/1, strings are parsed.  Empty or error
/// cells are refused.
///
pub fn coerce(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Data::Bool(b) => Some(*b as i64),
        Data::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Find `field` in the header row and coerce every value below it.
///
#[tracing::instrument(skip(rows))]
pub fn column<'a, I>(mut rows: I, field: &str) -> Result<Vec<i64>, DataFormatError>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows
        .next()
        .ok_or_else(|| DataFormatError::MissingField(field.to_string()))?;

    let idx = header
        .iter()
        .position(|c| matches!(c, Data::String(s) if s.trim() == field))
        .ok_or_else(|| DataFormatError::MissingField(field.to_string()))?;
    trace!("{} is column {}", field, idx);

    rows.enumerate()
        .map(|(n, row)| {
            let cell = row.get(idx).unwrap_or(&Data::Empty);
            coerce(cell).ok_or_else(|| {
                // Sheet rows are 1-based and the header is row 1.
                DataFormatError::TypeCoercionFailed(format!(
                    "{} in row {}: {:?}",
                    field,
                    n + 2,
                    cell
                ))
            })
        })
        .collect()
}

/// Open a workbook from memory (xls, xlsx, xlsb or ods) and extract `field`.
///
#[tracing::instrument(skip(data))]
pub fn read_column(data: &[u8], field: &str) -> Result<Vec<i64>, DataFormatError> {
    let mut wb = open_workbook_auto_from_rs(Cursor::new(data.to_vec()))
        .map_err(|e| DataFormatError::Malformed(e.to_string()))?;

    let range = wb
        .worksheet_range_at(0)
        .ok_or_else(|| DataFormatError::Malformed("no worksheet".to_string()))?
        .map_err(|e| DataFormatError::Malformed(e.to_string()))?;
    debug!("sheet is {:?}", range.get_size());

    column(range.rows(), field)
}

/// Linear interpolation between closest ranks, `q` in [0, 1].
///
fn quantile(sorted: &[i64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (sorted[lo] as f64, sorted[hi] as f64);
    a + (b - a) * (pos - lo as f64)
}

/// The statistics block.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Describe {
    pub field: String,
    pub count: usize,
    pub mean: f64,
    /// Undefined with less than two values
    pub std: Option<f64>,
    pub min: i64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: i64,
}

impl Describe {
    pub fn new(field: &str, values: &[i64]) -> Result<Self, DataFormatError> {
        if values.is_empty() {
            return Err(DataFormatError::DivisionByZeroGuard(format!(
                "no values in {}",
                field
            )));
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let n = count as f64;
        let mean = sorted.iter().map(|&v| v as f64).sum::<f64>() / n;
        let std = if count > 1 {
            let var = sorted
                .iter()
                .map(|&v| (v as f64 - mean).powi(2))
                .sum::<f64>()
                / (n - 1.);
            Some(var.sqrt())
        } else {
            None
        };

        Ok(Describe {
            field: field.to_string(),
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            q50: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

impl Display for Describe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let std = match self.std {
            Some(std) => format!("{:.6}", std),
            None => "NaN".to_string(),
        };
        let rows = [
            ("count", format!("{:.6}", self.count as f64)),
            ("mean", format!("{:.6}", self.mean)),
            ("std", std),
            ("min", format!("{:.6}", self.min as f64)),
            ("25%", format!("{:.6}", self.q25)),
            ("50%", format!("{:.6}", self.q50)),
            ("75%", format!("{:.6}", self.q75)),
            ("max", format!("{:.6}", self.max as f64)),
        ];
        let width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

        writeln!(f, "Descriptive statistics for {}:", self.field)?;
        for (label, value) in rows {
            writeln!(f, "{:<5}    {:>width$}", label, value, width = width)?;
        }
        Ok(())
    }
}

/// Summarizer for `Kind::Tabular`.
///
#[derive(Clone, Debug)]
pub struct TabularSummary {
    /// Column name
    pub field: String,
}

impl Default for TabularSummary {
    fn default() -> Self {
        TabularSummary::new(DEF_FIELD)
    }
}

impl TabularSummary {
    pub fn new(field: &str) -> Self {
        TabularSummary {
            field: field.to_string(),
        }
    }
}

impl Summarizer for TabularSummary {
    fn name(&self) -> &'static str {
        "tabular"
    }

    fn summarize(&self, data: &[u8]) -> Result<String, DataFormatError> {
        trace!("tabular::summarize({} bytes)", data.len());

        let values = read_column(data, &self.field)?;
        Ok(Describe::new(&self.field, &values)?.to_string())
    }
}
