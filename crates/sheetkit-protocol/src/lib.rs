//! Wire types for the spreadsheet batch REST API.
//!
//! Everything here is plain serde data in the host's JSON shape (camelCase
//! field names, SCREAMING_CASE enum values). Nothing in this crate talks to
//! the network; `sheetkit` builds these values and hands them to a host
//! implementation.

mod metadata;
mod requests;
mod values;

pub use metadata::{
    DimensionProperties, Editors, GridData, GridProperties, ProtectedRange, SheetMetadata,
    SheetProperties, Spreadsheet, SpreadsheetProperties,
};
pub use requests::{
    AddSheetRequest, BatchUpdateRequest, BatchUpdateResponse, DeleteDimensionRequest,
    DeleteDuplicatesRequest, DeleteSheetRequest, Dimension, DimensionRange, GridRange, Request,
    RowData, UpdateCellsRequest, UpdateProtectedRangeRequest,
};
pub use values::{
    CellValue, ClearValuesResponse, DateTimeRenderOption, UpdateValuesResponse, ValueGetOptions,
    ValueInputOption, ValueRange, ValueRenderOption,
};
