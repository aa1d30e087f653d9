//! Define what kind of dataset we are dealing with.
//!
//! The kind drives two decisions: whether the fetched payload is kept as opaque bytes or
//! decoded as text, and which summarizer reads the persisted artifact.
//!
use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};

/// Supported dataset kinds.
///
/// # Example
///
/// ```rust
/// use harvest_common::Kind;
///
/// assert_eq!(Kind::Delimited, Kind::from_filename("data.csv"));
/// assert_eq!(Kind::Delimited, "delimited".parse::<Kind>().unwrap());
/// assert!(Kind::Tabular.is_binary());
/// ```
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Deserialize,
    Eq,
    EnumString,
    PartialEq,
    strum::Display,
    Serialize,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Kind {
    /// Plain text, summarised as word frequencies.
    #[default]
    Text,
    /// Spreadsheet workbook, summarised as descriptive statistics.
    Tabular,
    /// Comma-separated values, summarised as a category distribution.
    Delimited,
    /// JSON record, summarised as average pairwise distances.
    Structured,
}

impl Kind {
    /// Only spreadsheets travel as raw bytes, everything else is decoded text.
    ///
    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self, Kind::Tabular)
    }

    /// Deduce the kind from a file name extension, defaulting to `Text`.
    ///
    /// Kind names (`"delimited"`) are parsed with `FromStr` instead.
    ///
    pub fn from_filename(path: &str) -> Self {
        let extension = match path.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => return Kind::Text,
        };
        match extension.as_str() {
            "csv" => Kind::Delimited,
            "json" => Kind::Structured,
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Kind::Tabular,
            _ => Kind::Text,
        }
    }
}
