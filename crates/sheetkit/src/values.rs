//! Eagerly read value ranges.

use sheetkit_core::{A1Range, ErrorKind};
use sheetkit_protocol::{CellValue, GridData, ValueGetOptions};

use crate::error::{Error, Result};
use crate::host::BatchApi;

/// Field mask for the per-row filter metadata of every tab.
pub const ROW_METADATA_FIELDS: &str =
    "sheets(data(startRow,rowMetadata(hiddenByFilter,hiddenByUser)),properties(sheetId,title))";

/// The values of a range, read once when the accessor is built.
///
/// Rows are row-major. The host omits trailing empty rows, so there may be
/// fewer rows than the range asked for.
pub struct Values<'a> {
    batch: &'a dyn BatchApi,
    spreadsheet_id: String,
    sheet_id: i64,
    sheet_name: String,
    first_row: u32,
    values: Vec<Vec<CellValue>>,
}

impl<'a> Values<'a> {
    /// Read `range` with unformatted values and formatted-string dates.
    pub fn read(
        batch: &'a dyn BatchApi,
        spreadsheet_id: &str,
        sheet_id: i64,
        range: &A1Range,
    ) -> Result<Self> {
        let address = range.to_string();
        tracing::debug!(spreadsheet_id, range = %address, "reading values");

        let value_range =
            batch.get_values(spreadsheet_id, &address, &ValueGetOptions::default())?;

        Ok(Self {
            batch,
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_id,
            sheet_name: range.sheet_name.clone(),
            first_row: range.first_row,
            values: value_range.values,
        })
    }

    /// Fetched rows, row-major.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.values
    }

    /// Take the fetched rows.
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.values
    }

    /// 1-based document row of the first fetched row.
    pub fn first_row(&self) -> u32 {
        self.first_row
    }

    /// Number of fetched rows.
    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    /// Whether no rows were fetched.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Id of the tab the rows came from.
    pub fn sheet_id(&self) -> i64 {
        self.sheet_id
    }

    /// Title of the tab the rows came from.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// The fetched rows a basic filter currently shows.
    ///
    /// Fetches per-row filter metadata for the sheet and drops every fetched
    /// row flagged `hiddenByFilter`, keeping the original order. Rows hidden
    /// by the user (not by a filter) are kept.
    pub fn visible_rows(&self) -> Result<Vec<Vec<CellValue>>> {
        let spreadsheet = self
            .batch
            .get_spreadsheet(&self.spreadsheet_id, Some(ROW_METADATA_FIELDS))?;

        let sheet = spreadsheet.sheet_by_id(self.sheet_id).ok_or_else(|| {
            tracing::warn!(sheet_id = self.sheet_id, "{}", ErrorKind::SheetNotFound);
            Error::kind_with(ErrorKind::SheetNotFound, self.sheet_name.clone())
        })?;

        Ok(filter_visible(&self.values, self.first_row, sheet.data.first()))
    }
}

impl std::fmt::Debug for Values<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Values")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_id", &self.sheet_id)
            .field("sheet_name", &self.sheet_name)
            .field("first_row", &self.first_row)
            .field("rows", &self.values.len())
            .finish()
    }
}

/// Keep the rows of `values` that `grid` does not mark hidden by a filter.
///
/// `values[i]` is document row `first_row + i` (1-based). Its metadata entry
/// sits at `first_row - 1 + i - grid.start_row`. Rows without an entry, or
/// without any grid data at all, count as visible.
pub fn filter_visible(
    values: &[Vec<CellValue>],
    first_row: u32,
    grid: Option<&GridData>,
) -> Vec<Vec<CellValue>> {
    let Some(grid) = grid else {
        return values.to_vec();
    };

    let first_index = first_row.saturating_sub(1) as usize;
    let start_row = grid.start_row as usize;

    values
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            let hidden = (first_index + i)
                .checked_sub(start_row)
                .and_then(|idx| grid.row_metadata.get(idx))
                .map_or(false, |meta| meta.hidden_by_filter);
            !hidden
        })
        .map(|(_, row)| row.clone())
        .collect()
}
