//! Batch-update request descriptors.

use serde::{Deserialize, Serialize};

use crate::metadata::{ProtectedRange, SheetProperties};

/// Body of a `spreadsheets.batchUpdate` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

impl BatchUpdateRequest {
    /// A batch of `requests`, applied in order.
    pub fn new(requests: Vec<Request>) -> Self {
        Self { requests }
    }

    /// A batch holding a single request.
    pub fn single(request: Request) -> Self {
        Self {
            requests: vec![request],
        }
    }

    /// Whether the batch has no requests.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Number of requests in the batch.
    pub fn len(&self) -> usize {
        self.requests.len()
    }
}

/// One operation inside a batch.
///
/// Serialized externally tagged, e.g. `{"deleteSheet": {"sheetId": 7}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    AddSheet(AddSheetRequest),
    DeleteSheet(DeleteSheetRequest),
    UpdateProtectedRange(UpdateProtectedRangeRequest),
    UpdateCells(UpdateCellsRequest),
    DeleteDuplicates(DeleteDuplicatesRequest),
    DeleteDimension(DeleteDimensionRequest),
}

/// Adds a tab with the given properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheetRequest {
    pub properties: SheetProperties,
}

/// Deletes a tab by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSheetRequest {
    pub sheet_id: i64,
}

/// Overwrites the masked fields of an existing protected range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProtectedRangeRequest {
    pub protected_range: ProtectedRange,
    /// Field mask naming which parts of `protected_range` to overwrite
    pub fields: String,
}

/// Writes cell data over a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCellsRequest {
    pub rows: Vec<RowData>,
    /// Field mask; `userEnteredValue` with empty `rows` clears values only
    pub fields: String,
    pub range: GridRange,
}

/// Cell data for one row of an `updateCells` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<serde_json::Value>,
}

/// Removes rows whose comparison columns repeat an earlier row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDuplicatesRequest {
    pub range: GridRange,
    pub comparison_columns: Vec<DimensionRange>,
}

/// Deletes a span of rows or columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDimensionRequest {
    pub range: DimensionRange,
}

/// A rectangle on one sheet with 0-based, half-open bounds.
///
/// A missing bound means "unbounded" on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}

impl GridRange {
    /// Fully bounded range: rows `[start_row, end_row)`, columns `[start_col, end_col)`.
    pub fn bounded(
        sheet_id: i64,
        start_row: u32,
        end_row: u32,
        start_col: u32,
        end_col: u32,
    ) -> Self {
        Self {
            sheet_id,
            start_row_index: Some(start_row),
            end_row_index: Some(end_row),
            start_column_index: Some(start_col),
            end_column_index: Some(end_col),
        }
    }
}

/// Rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
    Columns,
}

impl Dimension {
    /// Wire name, `ROWS` or `COLUMNS`.
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Rows => "ROWS",
            Dimension::Columns => "COLUMNS",
        }
    }
}

/// A run of rows or columns with 0-based, half-open bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: Dimension,
    pub start_index: u32,
    pub end_index: u32,
}

impl DimensionRange {
    /// The single 1-based row `row` as a 0-based half-open range.
    pub fn row(sheet_id: i64, row: u32) -> Self {
        Self {
            sheet_id,
            dimension: Dimension::Rows,
            start_index: row.saturating_sub(1),
            end_index: row,
        }
    }
}

/// Reply to a batch update. Individual replies are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchUpdateResponse {
    pub spreadsheet_id: String,
    pub replies: Vec<serde_json::Value>,
}
