//! Spreadsheet metadata as returned by `spreadsheets.get`.
//!
//! Responses are usually field-masked, so every struct tolerates missing
//! members.

use serde::{Deserialize, Serialize};

use crate::requests::GridRange;

/// A spreadsheet resource, possibly partial under a field mask.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spreadsheet {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub spreadsheet_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<SpreadsheetProperties>,
    pub sheets: Vec<SheetMetadata>,
}

impl Spreadsheet {
    /// Find a tab by its numeric id.
    pub fn sheet_by_id(&self, sheet_id: i64) -> Option<&SheetMetadata> {
        self.sheets.iter().find(|s| s.properties.sheet_id == sheet_id)
    }

    /// Find a tab by its title.
    pub fn sheet_by_title(&self, title: &str) -> Option<&SheetMetadata> {
        self.sheets.iter().find(|s| s.properties.title == title)
    }
}

/// Document-level properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpreadsheetProperties {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// One tab of a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetMetadata {
    pub properties: SheetProperties,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<GridData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protected_ranges: Vec<ProtectedRange>,
}

/// Where a tab sits and how large its grid is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
    pub index: u32,
    pub grid_properties: GridProperties,
}

/// Size and frozen panes of a tab grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridProperties {
    pub row_count: u32,
    pub column_count: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub frozen_row_count: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub frozen_column_count: u32,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Cell data for part of a sheet, starting at (`start_row`, `start_column`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridData {
    pub start_row: u32,
    pub start_column: u32,
    pub row_metadata: Vec<DimensionProperties>,
}

/// Per-row (or per-column) display properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DimensionProperties {
    pub hidden_by_filter: bool,
    pub hidden_by_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_size: Option<u32>,
}

/// A range only listed editors may change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtectedRange {
    pub protected_range_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<GridRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editors: Option<Editors>,
}

/// Who may edit a protected range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Editors {
    pub users: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_users_can_edit: Option<bool>,
}
