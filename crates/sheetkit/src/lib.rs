//! Object-oriented handles over hosted spreadsheet documents.
//!
//! A [`Table`] is one spreadsheet document, a [`Sheet`] is one tab inside it
//! and [`Values`] is an eagerly read rectangle of cells. Every operation turns
//! into one or two calls on the host seams in [`host`], so the same handles
//! run against the REST API ([`RestClient`]) or any other implementation of
//! those traits.
//!
//! # Architecture
//!
//! ```text
//! Table / Sheet / Values (this crate)
//!     ├── DocumentModel  - tab list, last row, flush
//!     ├── BatchApi       - batchUpdate and values endpoints
//!     ├── Exporter       - authenticated export fetch
//!     ├── Folder         - export destination
//!     └── Ui             - download dialog
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetkit::{
//!     ExportFormat, HostClients, HttpExporter, LocalFolder, RestClient, SheetRef, SheetsConfig,
//!     Table,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SheetsConfig::default();
//!     let host = RestClient::new(&config, "ya29.token")?;
//!     let exporter = HttpExporter::new(&config, "ya29.token")?;
//!     let table = Table::open_with_config(HostClients::single(&host), Some("abc1234567"), config)?;
//!
//!     let sheet = table.create_sheet(894321, "Report", None)?;
//!     sheet.set_values(vec![vec!["Total".into(), "=SUM(B2:B9)".into()]], 1, 1)?;
//!     sheet.delete_rows(&[3, 7, 2])?;
//!
//!     let folder = LocalFolder::new("exports")?;
//!     let file = sheet.export_to_folder("Report", &folder, ExportFormat::Pdf, &exporter)?;
//!     println!("wrote {}", file.id);
//!
//!     let _ = table.sheet(SheetRef::Id(0))?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod folder;
pub mod host;
#[cfg(feature = "rest")]
pub mod rest;
pub mod sheet;
pub mod table;
pub mod values;

pub use config::{GridSize, PageSetup, SheetsConfig};
pub use error::{Error, HostError, HostResult, Result};
pub use export::{download_dialog_html, ExportFormat, ExportUrl, Prompt};
pub use folder::LocalFolder;
pub use host::{BatchApi, DocumentModel, Exporter, Folder, HostClients, StoredFile, Ui};
#[cfg(feature = "rest")]
pub use rest::{HttpExporter, RestClient};
pub use sheet::{delete_rows_requests, Sheet, SheetRef};
pub use table::{editor_update_requests, EditorChange, Table};
pub use values::{filter_visible, Values};

pub use sheetkit_core::{
    column_to_letters, letters_to_column, A1Cell, A1Range, ErrorKind, Extent, Span,
};
pub use sheetkit_protocol::{
    BatchUpdateRequest, BatchUpdateResponse, CellValue, ClearValuesResponse, Request,
    SheetProperties, Spreadsheet, UpdateValuesResponse, ValueRange,
};
