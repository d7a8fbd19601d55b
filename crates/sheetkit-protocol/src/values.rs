//! Value ranges and the options that control how values are read and written.

use serde::{Deserialize, Serialize};

use crate::requests::Dimension;

/// A cell value as carried in a value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl CellValue {
    /// Whether the cell came back empty.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Null or the empty string; the host pads short rows with either.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The number, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

/// A block of values addressed by an A1 range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<Dimension>,
    /// Row-major unless `major_dimension` says otherwise. Omitted by the
    /// host when the range is empty.
    pub values: Vec<Vec<CellValue>>,
}

impl ValueRange {
    /// Row-major values with no explicit range.
    pub fn rows(values: Vec<Vec<CellValue>>) -> Self {
        Self {
            range: None,
            major_dimension: Some(Dimension::Rows),
            values,
        }
    }
}

/// How read values are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueRenderOption {
    FormattedValue,
    #[default]
    UnformattedValue,
    Formula,
}

impl ValueRenderOption {
    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueRenderOption::FormattedValue => "FORMATTED_VALUE",
            ValueRenderOption::UnformattedValue => "UNFORMATTED_VALUE",
            ValueRenderOption::Formula => "FORMULA",
        }
    }
}

/// How dates and times are rendered when values are unformatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateTimeRenderOption {
    SerialNumber,
    #[default]
    FormattedString,
}

impl DateTimeRenderOption {
    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            DateTimeRenderOption::SerialNumber => "SERIAL_NUMBER",
            DateTimeRenderOption::FormattedString => "FORMATTED_STRING",
        }
    }
}

/// How written values are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored as-is
    Raw,
    /// Parsed as if typed into the UI (formulas, dates, numbers)
    #[default]
    UserEntered,
}

impl ValueInputOption {
    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

/// Query options for `values.get`.
///
/// The default reads unformatted values with dates as formatted strings,
/// row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueGetOptions {
    pub value_render_option: ValueRenderOption,
    pub date_time_render_option: DateTimeRenderOption,
    pub major_dimension: Dimension,
}

impl Default for ValueGetOptions {
    fn default() -> Self {
        Self {
            value_render_option: ValueRenderOption::UnformattedValue,
            date_time_render_option: DateTimeRenderOption::FormattedString,
            major_dimension: Dimension::Rows,
        }
    }
}

impl ValueGetOptions {
    /// Query-string pairs in the host's parameter names.
    pub fn query_pairs(&self) -> [(&'static str, &'static str); 3] {
        [
            ("valueRenderOption", self.value_render_option.as_str()),
            ("dateTimeRenderOption", self.date_time_render_option.as_str()),
            ("majorDimension", self.major_dimension.as_str()),
        ]
    }
}

/// Reply to a `values.update` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateValuesResponse {
    pub spreadsheet_id: String,
    pub updated_range: String,
    pub updated_rows: u32,
    pub updated_columns: u32,
    pub updated_cells: u32,
}

/// Reply to a `values.clear` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClearValuesResponse {
    pub spreadsheet_id: String,
    pub cleared_range: String,
}
