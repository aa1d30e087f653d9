//! Average distance between entities, from a JSON record holding a list of names and a square
//! distance matrix.
//!
//! ```json
//! {
//!   "Stadiums": ["A", "B", "C"],
//!   "DistanceMatrix": [[0, 10, 20], [10, 0, 5], [20, 5, 0]]
//! }
//! ```
//!
//! Row `i` holds the distances from entity `i` to all the others, including itself (zero).
//! The average divides by `len - 1` to leave the self-distance out.
//!

use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::{DataFormatError, Summarizer};

const NAMES: &str = "Stadiums";
const MATRIX: &str = "DistanceMatrix";

/// Average distance per entity, in the original order.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Averages(Vec<(String, f64)>);

/// Fetch one top-level field and convert it into the expected type.
///
fn field<T: DeserializeOwned>(record: &Value, name: &str) -> Result<T, DataFormatError> {
    let value = record
        .get(name)
        .ok_or_else(|| DataFormatError::MissingField(name.to_string()))?;
    serde_json::from_value(value.clone())
        .map_err(|e| DataFormatError::TypeCoercionFailed(format!("{}: {}", name, e)))
}

/// Round to two decimals.
///
#[inline]
fn round2(v: f64) -> f64 {
    (v * 100.).round() / 100.
}

/// Shortest representation, always keeping a decimal part (`10.0`, `12.5`, `7.33`).
///
fn pretty(v: f64) -> String {
    if v.fract() == 0. {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

impl Averages {
    /// Parse the record and compute every average, validating the shape first.
    ///
    #[tracing::instrument(skip(data))]
    pub fn from_json(data: &[u8]) -> Result<Self, DataFormatError> {
        let record: Value =
            serde_json::from_slice(data).map_err(|e| DataFormatError::Malformed(e.to_string()))?;

        let names: Vec<String> = field(&record, NAMES)?;
        let matrix: Vec<Vec<f64>> = field(&record, MATRIX)?;
        debug!("{} names, {} rows", names.len(), matrix.len());

        Self::compute(names, &matrix)
    }

    /// Check that the matrix is square and matches the names, then average each row.
    ///
    pub fn compute(names: Vec<String>, matrix: &[Vec<f64>]) -> Result<Self, DataFormatError> {
        let n = names.len();
        if matrix.len() != n {
            return Err(DataFormatError::ShapeMismatch(format!(
                "{} {} but {} rows in {}",
                n,
                NAMES,
                matrix.len(),
                MATRIX
            )));
        }

        for (i, row) in matrix.iter().enumerate() {
            if row.len() != n {
                return Err(DataFormatError::ShapeMismatch(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if row.len() <= 1 {
                return Err(DataFormatError::DivisionByZeroGuard(format!(
                    "row {} has {} entries",
                    i,
                    row.len()
                )));
            }
        }

        let res = names
            .into_iter()
            .zip(matrix)
            .map(|(name, row)| {
                let avg = row.iter().sum::<f64>() / (row.len() - 1) as f64;
                trace!("{} -> {}", name, avg);
                (name, round2(avg))
            })
            .collect();
        Ok(Averages(res))
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, f64)> {
        self.0.iter()
    }
}

impl Display for Averages {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (name, avg) in &self.0 {
            writeln!(
                f,
                "{} is on average {} miles away from any other stadium.",
                name,
                pretty(*avg)
            )?;
        }
        Ok(())
    }
}

/// Summarizer for `Kind::Structured`.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuredSummary;

impl Summarizer for StructuredSummary {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn summarize(&self, data: &[u8]) -> Result<String, DataFormatError> {
        trace!("structured::summarize({} bytes)", data.len());

        Ok(Averages::from_json(data)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_averages_scenario() {
        let data = r##"{"Stadiums": ["A", "B"], "DistanceMatrix": [[0, 10], [10, 0]]}"##;

        let report = StructuredSummary.summarize(data.as_bytes()).unwrap();
        assert_eq!(
            "A is on average 10.0 miles away from any other stadium.\n\
            B is on average 10.0 miles away from any other stadium.\n",
            report
        );
    }

    #[test]
    fn test_averages_rounding() {
        let data = r##"{
            "Stadiums": ["A", "B", "C"],
            "DistanceMatrix": [[0, 10, 12], [10, 0, 4.5], [12, 4.5, 0]]
        }"##;

        let avg = Averages::from_json(data.as_bytes()).unwrap();
        assert_eq!(Some(11.0), avg.get("A"));
        assert_eq!(Some(7.25), avg.get("B"));
        assert_eq!(Some(8.25), avg.get("C"));

        let data = r##"{
            "Stadiums": ["A", "B", "C", "D"],
            "DistanceMatrix": [[0, 1, 1, 0], [1, 0, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]]
        }"##;
        let avg = Averages::from_json(data.as_bytes()).unwrap();
        assert_eq!(Some(0.67), avg.get("A"));
        assert_eq!(Some(0.33), avg.get("B"));
        assert_eq!(Some(0.0), avg.get("D"));
    }

    #[rstest]
    #[case(10., "10.0")]
    #[case(7.25, "7.25")]
    #[case(0.67, "0.67")]
    #[case(1234.5, "1234.5")]
    fn test_pretty(#[case] v: f64, #[case] s: &str) {
        assert_eq!(s, pretty(v));
    }

    #[rstest]
    #[case(r##"{"DistanceMatrix": [[0]]}"##, "MissingField")]
    #[case(r##"{"Stadiums": ["A"]}"##, "MissingField")]
    #[case(r##"[1, 2, 3]"##, "MissingField")]
    #[case(r##"{"Stadiums": "A", "DistanceMatrix": [[0]]}"##, "TypeCoercionFailed")]
    #[case(r##"{"Stadiums": ["A", "B"], "DistanceMatrix": [[0, "x"], [1, 0]]}"##, "TypeCoercionFailed")]
    #[case(r##"{"Stadiums": ["A", "B"], "DistanceMatrix": [[0, 1]]}"##, "ShapeMismatch")]
    #[case(r##"{"Stadiums": ["A", "B"], "DistanceMatrix": [[0, 1], [1, 0, 3]]}"##, "ShapeMismatch")]
    #[case(r##"{"Stadiums": ["A"], "DistanceMatrix": [[0]]}"##, "DivisionByZeroGuard")]
    #[case("{\"Stadiums\": [\"A\"", "Malformed")]
    fn test_averages_bad_input(#[case] data: &str, #[case] kind: &str) {
        let r = Averages::from_json(data.as_bytes());
        assert_eq!(kind, r.unwrap_err().kind());
    }

    #[test]
    fn test_averages_empty() {
        let data = r##"{"Stadiums": [], "DistanceMatrix": []}"##;

        let report = StructuredSummary.summarize(data.as_bytes()).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_averages_non_negative_finite() {
        let names: Vec<String> = (0..5).map(|i| format!("S{i}")).collect();
        let matrix: Vec<Vec<f64>> = (0..5)
            .map(|i| {
                (0..5)
                    .map(|j| if i == j { 0. } else { (i * 7 + j * 3) as f64 * 1.3 })
                    .collect()
            })
            .collect();

        let avg = Averages::compute(names.clone(), &matrix).unwrap();
        assert_eq!(5, avg.iter().count());
        for (name, v) in avg.iter() {
            assert!(names.contains(name));
            assert!(v.is_finite());
            assert!(*v >= 0.);
        }
    }
}
