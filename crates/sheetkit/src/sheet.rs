//! Sheet handle: one tab of a spreadsheet.

use std::fmt;

use sheetkit_core::{A1Cell, A1Range, ErrorKind, Span};
use sheetkit_protocol::{
    BatchUpdateRequest, BatchUpdateResponse, CellValue, ClearValuesResponse,
    DeleteDimensionRequest, DeleteDuplicatesRequest, Dimension, DimensionRange, GridRange,
    Request, SheetProperties, UpdateCellsRequest, UpdateValuesResponse, ValueInputOption,
    ValueRange,
};

use crate::config::SheetsConfig;
use crate::error::{Error, Result};
use crate::export::{
    download_dialog_html, ExportFormat, ExportUrl, Prompt, DOWNLOAD_DIALOG_HEIGHT,
};
use crate::host::{Exporter, Folder, HostClients, StoredFile, Ui};
use crate::values::Values;

/// Columns read by [`Sheet::values`] when the span covers all columns.
pub const DEFAULT_READ_COLUMNS: u32 = 99;

/// Columns cleared by [`Sheet::clear`] when the span covers all columns.
pub const DEFAULT_CLEAR_COLUMNS: u32 = 999;

/// Columns cleared by [`Sheet::clear_content`] when the span covers all columns.
pub const DEFAULT_CLEAR_CONTENT_COLUMNS: u32 = 99;

/// Field mask that makes `updateCells` touch values only.
const USER_ENTERED_VALUE: &str = "userEnteredValue";

/// Reference to a tab, by numeric sheet id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SheetRef {
    Id(i64),
    Name(String),
}

impl SheetRef {
    /// Reference by numeric sheet id.
    pub fn id(sheet_id: i64) -> Self {
        SheetRef::Id(sheet_id)
    }

    /// Reference by name; an empty name is rejected.
    pub fn name(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::kind_with(ErrorKind::NeedSheetId, "empty sheet name"));
        }
        Ok(SheetRef::Name(name))
    }

    fn matches(&self, properties: &SheetProperties) -> bool {
        match self {
            SheetRef::Id(id) => properties.sheet_id == *id,
            SheetRef::Name(name) => properties.title == *name,
        }
    }
}

impl From<i64> for SheetRef {
    fn from(sheet_id: i64) -> Self {
        SheetRef::Id(sheet_id)
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetRef::Id(id) => write!(f, "#{id}"),
            SheetRef::Name(name) => write!(f, "{name}"),
        }
    }
}

/// A handle to one tab, resolved once at construction.
///
/// Every operation is a single host round trip (two when a default extent
/// must be looked up first).
pub struct Sheet<'a> {
    clients: HostClients<'a>,
    config: &'a SheetsConfig,
    spreadsheet_id: String,
    sheet: SheetRef,
    properties: SheetProperties,
}

impl<'a> Sheet<'a> {
    /// Look up `sheet` among the document's tabs.
    pub fn resolve(
        clients: HostClients<'a>,
        config: &'a SheetsConfig,
        spreadsheet_id: &str,
        sheet: SheetRef,
    ) -> Result<Self> {
        if matches!(&sheet, SheetRef::Name(name) if name.is_empty()) {
            tracing::warn!("{}", ErrorKind::NeedSheetId);
            return Err(Error::kind_with(ErrorKind::NeedSheetId, "empty sheet name"));
        }

        let properties = clients
            .model
            .sheets(spreadsheet_id)?
            .into_iter()
            .find(|p| sheet.matches(p))
            .ok_or_else(|| {
                tracing::warn!(spreadsheet_id, sheet = %sheet, "{}", ErrorKind::SheetNotFound);
                Error::kind_with(ErrorKind::SheetNotFound, sheet.to_string())
            })?;

        tracing::debug!(
            spreadsheet_id,
            sheet_id = properties.sheet_id,
            title = %properties.title,
            "resolved sheet"
        );

        Ok(Self {
            clients,
            config,
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet,
            properties,
        })
    }

    /// Id of the document holding this tab.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// The reference this handle was resolved from.
    pub fn sheet_ref(&self) -> &SheetRef {
        &self.sheet
    }

    /// Numeric sheet id (the `gid` in document URLs).
    pub fn id(&self) -> i64 {
        self.properties.sheet_id
    }

    /// Tab title as seen at resolution time.
    pub fn name(&self) -> &str {
        &self.properties.title
    }

    /// Properties as seen at resolution time.
    pub fn properties(&self) -> &SheetProperties {
        &self.properties
    }

    /// Current properties, re-read from the host.
    pub fn current_properties(&self) -> Result<SheetProperties> {
        let id = self.id();
        self.clients
            .model
            .sheets(&self.spreadsheet_id)?
            .into_iter()
            .find(|p| p.sheet_id == id)
            .ok_or_else(|| Error::kind_with(ErrorKind::SheetNotFound, self.sheet.to_string()))
    }

    /// Last row with content (0 for an empty sheet).
    pub fn last_row(&self) -> Result<u32> {
        Ok(self.clients.model.last_row(&self.spreadsheet_id, self.name())?)
    }

    /// Current number of rows in the grid.
    pub fn max_rows(&self) -> Result<u32> {
        Ok(self.current_properties()?.grid_properties.row_count)
    }

    /// Current number of columns in the grid.
    pub fn max_columns(&self) -> Result<u32> {
        Ok(self.current_properties()?.grid_properties.column_count)
    }

    // -- Reading and writing values --

    /// Read a rectangle of values.
    ///
    /// All rows reads to the bottom of the data; all columns reads
    /// [`DEFAULT_READ_COLUMNS`] columns.
    pub fn values(&self, span: Span) -> Result<Values<'a>> {
        let range = self.a1_range(span, DEFAULT_READ_COLUMNS)?;
        Values::read(self.clients.batch, &self.spreadsheet_id, self.id(), &range)
    }

    /// Write a row-major grid with its top-left corner at (`first_row`, `first_col`).
    ///
    /// Values are parsed as if typed by a user, so strings starting with `=`
    /// become formulas.
    pub fn set_values(
        &self,
        values: Vec<Vec<CellValue>>,
        first_row: u32,
        first_col: u32,
    ) -> Result<UpdateValuesResponse> {
        let anchor = A1Cell::new(self.name(), first_row, first_col)?.to_string();
        tracing::debug!(range = %anchor, rows = values.len(), "writing values");

        Ok(self.clients.batch.update_values(
            &self.spreadsheet_id,
            &anchor,
            &ValueRange::rows(values),
            ValueInputOption::UserEntered,
        )?)
    }

    /// Clear contents and formats.
    ///
    /// All columns clears [`DEFAULT_CLEAR_COLUMNS`] columns.
    pub fn clear(&self, span: Span) -> Result<ClearValuesResponse> {
        let range = self.a1_range(span, DEFAULT_CLEAR_COLUMNS)?.to_string();
        tracing::debug!(range = %range, "clearing values and formats");
        Ok(self.clients.batch.clear_values(&self.spreadsheet_id, &range)?)
    }

    /// Clear values but keep formatting.
    ///
    /// All rows runs through the last row with content; all columns covers
    /// [`DEFAULT_CLEAR_CONTENT_COLUMNS`] columns.
    pub fn clear_content(&self, span: Span) -> Result<BatchUpdateResponse> {
        span.validate()?;
        let start_row = span.first_row - 1;
        let end_row = match span.rows.count() {
            Some(rows) => span_end(start_row, rows, ErrorKind::InvalidRow)?,
            None => self.last_row()?.max(span.first_row),
        };
        let start_col = span.first_col - 1;
        let end_col = span_end(
            start_col,
            span.columns.or(DEFAULT_CLEAR_CONTENT_COLUMNS),
            ErrorKind::InvalidColumn,
        )?;

        let request = Request::UpdateCells(UpdateCellsRequest {
            rows: Vec::new(),
            fields: USER_ENTERED_VALUE.to_string(),
            range: GridRange::bounded(self.id(), start_row, end_row, start_col, end_col),
        });
        self.submit(BatchUpdateRequest::single(request))
    }

    /// Delete rows that duplicate an earlier row within the span.
    ///
    /// Rows are compared on every column of the span. All rows/columns run
    /// to the edge of the grid.
    pub fn delete_duplicates(&self, span: Span) -> Result<BatchUpdateResponse> {
        span.validate()?;
        let grid = if span.rows.is_all() || span.columns.is_all() {
            Some(self.current_properties()?.grid_properties)
        } else {
            None
        };

        let start_row = span.first_row - 1;
        let end_row = match (span.rows.count(), grid) {
            (Some(rows), _) => span_end(start_row, rows, ErrorKind::InvalidRow)?,
            (None, Some(grid)) => grid.row_count.max(start_row),
            (None, None) => start_row,
        };
        let start_col = span.first_col - 1;
        let end_col = match (span.columns.count(), grid) {
            (Some(columns), _) => span_end(start_col, columns, ErrorKind::InvalidColumn)?,
            (None, Some(grid)) => grid.column_count.max(start_col),
            (None, None) => start_col,
        };

        let sheet_id = self.id();
        let request = Request::DeleteDuplicates(DeleteDuplicatesRequest {
            range: GridRange::bounded(sheet_id, start_row, end_row, start_col, end_col),
            comparison_columns: vec![DimensionRange {
                sheet_id,
                dimension: Dimension::Columns,
                start_index: start_col,
                end_index: end_col,
            }],
        });
        self.submit(BatchUpdateRequest::single(request))
    }

    /// Delete rows by their 1-based indices, in any order.
    ///
    /// An empty list is a no-op that does not contact the host.
    pub fn delete_rows(&self, rows: &[u32]) -> Result<BatchUpdateResponse> {
        let requests = delete_rows_requests(self.id(), rows)?;
        if requests.is_empty() {
            tracing::debug!(sheet_id = self.id(), "no rows to delete");
            return Ok(BatchUpdateResponse {
                spreadsheet_id: self.spreadsheet_id.clone(),
                replies: Vec::new(),
            });
        }

        tracing::info!(sheet_id = self.id(), count = requests.len(), "deleting rows");
        self.submit(BatchUpdateRequest::new(requests))
    }

    // -- Export --

    /// Render this tab and store it as `<name>.<ext>` in `folder`.
    pub fn export_to_folder(
        &self,
        name: &str,
        folder: &dyn Folder,
        format: ExportFormat,
        exporter: &dyn Exporter,
    ) -> Result<StoredFile> {
        let url = self.export_url(format).with_page(self.config.page).to_string();
        tracing::debug!(url = %url, "fetching export");

        let token = exporter.oauth_token()?;
        let bytes = exporter.fetch(&url, &token)?;

        let file_name = format!("{name}.{}", format.extension());
        let file = folder.create_file(&file_name, format.mime_type(), bytes)?;
        tracing::info!(file = %file.name, size = file.size, "stored export");
        Ok(file)
    }

    /// Ask the user's browser to download this tab.
    pub fn export_and_prompt_download(&self, format: ExportFormat, ui: &dyn Ui) -> Result<()> {
        let url = self.export_url(format).to_string();
        let html = download_dialog_html(&url);
        Ok(ui.show_modal_dialog(
            &html,
            DOWNLOAD_DIALOG_HEIGHT,
            Prompt::DownloadingSheet.text(),
        )?)
    }

    /// Export URL for this tab without page layout parameters.
    pub fn export_url(&self, format: ExportFormat) -> ExportUrl<'_> {
        ExportUrl::new(
            &self.config.export_base,
            &self.spreadsheet_id,
            self.id(),
            format,
        )
    }

    // -- Internal helpers --

    fn a1_range(&self, span: Span, default_columns: u32) -> Result<A1Range> {
        Ok(A1Range::new(
            self.name(),
            span.first_row,
            span.first_col,
            span.rows,
            span.columns.or(default_columns),
        )?)
    }

    fn submit(&self, batch: BatchUpdateRequest) -> Result<BatchUpdateResponse> {
        tracing::debug!(requests = batch.len(), "submitting batch update");
        Ok(self.clients.batch.batch_update(&self.spreadsheet_id, &batch)?)
    }
}

impl fmt::Debug for Sheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet", &self.sheet)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Exclusive 0-based end of `count` items from the 0-based `start`.
fn span_end(start: u32, count: u32, kind: ErrorKind) -> Result<u32> {
    start
        .checked_add(count)
        .ok_or_else(|| {
            Error::kind_with(kind, format!("{count} items from {start} overflow the grid"))
        })
}

/// One `deleteDimension` per distinct row, highest row first.
///
/// Deleting a row shifts every row below it up by one, so lower rows must be
/// deleted last for the remaining indices to stay valid.
pub fn delete_rows_requests(sheet_id: i64, rows: &[u32]) -> Result<Vec<Request>> {
    if rows.contains(&0) {
        return Err(Error::kind_with(ErrorKind::InvalidRow, "row indices are 1-based"));
    }

    let mut rows = rows.to_vec();
    rows.sort_unstable_by(|a, b| b.cmp(a));
    rows.dedup();

    Ok(rows
        .into_iter()
        .map(|row| {
            Request::DeleteDimension(DeleteDimensionRequest {
                range: DimensionRange::row(sheet_id, row),
            })
        })
        .collect())
}
