//! Configuration shared by every handle.

use std::time::Duration;

/// Grid size given to newly created sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: u32,
    pub columns: u32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            rows: 1000,
            columns: 12,
        }
    }
}

/// Page geometry for rendered exports.
///
/// Margins are in inches. `r1`/`c1`/`r2`/`c2` bound the printed cell area
/// (0-based, inclusive of the start).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    /// Paper size code (7 = A4 on the export endpoint)
    pub size: u32,
    pub portrait: bool,
    pub fit_width: bool,
    pub gridlines: bool,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: 7,
            portrait: true,
            fit_width: true,
            gridlines: false,
            top_margin: 0.5,
            bottom_margin: 0.25,
            left_margin: 0.5,
            right_margin: 0.5,
            first_row: 0,
            first_col: 0,
            last_row: 54,
            last_col: 14,
        }
    }
}

/// Configuration for sheetkit handles and the REST host implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetsConfig {
    /// Base URL of the batch API, without a trailing slash.
    pub api_base: String,
    /// Base URL of the export endpoint, without a trailing slash.
    pub export_base: String,
    /// Grid size for sheets created with [`Table::create_sheet`](crate::Table::create_sheet).
    pub new_sheet_grid: GridSize,
    /// Page layout for [`Sheet::export_to_folder`](crate::Sheet::export_to_folder).
    pub page: PageSetup,
    /// HTTP timeout for REST and export calls.
    pub timeout: Duration,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_base: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
            export_base: "https://docs.google.com/spreadsheets/d".to_string(),
            new_sheet_grid: GridSize::default(),
            page: PageSetup::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl SheetsConfig {
    /// Replace the batch API base URL (trailing slashes are dropped).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = trim_base(api_base.into());
        self
    }

    /// Replace the export base URL (trailing slashes are dropped).
    pub fn with_export_base(mut self, export_base: impl Into<String>) -> Self {
        self.export_base = trim_base(export_base.into());
        self
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}
