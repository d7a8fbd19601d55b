//! Host service seams.
//!
//! Every durable effect goes through one of these traits. The document model
//! and the batch API are two views of the same remote document; they are
//! only guaranteed to agree after [`DocumentModel::flush`].

use sheetkit_protocol::{
    BatchUpdateRequest, BatchUpdateResponse, ClearValuesResponse, SheetProperties, Spreadsheet,
    UpdateValuesResponse, ValueGetOptions, ValueInputOption, ValueRange,
};

use crate::error::HostResult;

/// High-level document object model.
pub trait DocumentModel {
    /// Id of the document the caller is currently attached to.
    fn active_spreadsheet_id(&self) -> HostResult<String>;

    /// All tabs of a document, in tab order.
    fn sheets(&self, spreadsheet_id: &str) -> HostResult<Vec<SheetProperties>>;

    /// 1-based index of the last row with content on a tab (0 when empty).
    fn last_row(&self, spreadsheet_id: &str, sheet_name: &str) -> HostResult<u32>;

    /// Apply pending changes so both host views see the same document.
    fn flush(&self) -> HostResult<()>;
}

/// REST-style batch API.
pub trait BatchApi {
    /// Document metadata, optionally narrowed by a field mask.
    fn get_spreadsheet(&self, spreadsheet_id: &str, fields: Option<&str>)
        -> HostResult<Spreadsheet>;

    /// Apply every request of the batch atomically.
    fn batch_update(
        &self,
        spreadsheet_id: &str,
        batch: &BatchUpdateRequest,
    ) -> HostResult<BatchUpdateResponse>;

    fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        options: &ValueGetOptions,
    ) -> HostResult<ValueRange>;

    fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        body: &ValueRange,
        input: ValueInputOption,
    ) -> HostResult<UpdateValuesResponse>;

    /// Remove values and formats from a range.
    fn clear_values(&self, spreadsheet_id: &str, range: &str) -> HostResult<ClearValuesResponse>;
}

/// Authenticated fetch of rendered exports.
pub trait Exporter {
    /// OAuth access token of the caller.
    fn oauth_token(&self) -> HostResult<String>;

    /// GET `url` with `Authorization: Bearer <token>` and return the body.
    fn fetch(&self, url: &str, bearer_token: &str) -> HostResult<Vec<u8>>;
}

/// A file created in a [`Folder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Host-specific identifier (a path for local folders)
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size: usize,
}

/// Destination for exported files.
pub trait Folder {
    fn create_file(&self, name: &str, mime_type: &str, bytes: Vec<u8>) -> HostResult<StoredFile>;
}

/// Interactive surface for user-facing dialogs.
pub trait Ui {
    fn show_modal_dialog(&self, html: &str, height: u32, title: &str) -> HostResult<()>;
}

/// The two document views every handle needs.
#[derive(Clone, Copy)]
pub struct HostClients<'a> {
    pub model: &'a dyn DocumentModel,
    pub batch: &'a dyn BatchApi,
}

impl<'a> HostClients<'a> {
    /// Pair a document model with a batch API, possibly from different hosts.
    pub fn new(model: &'a dyn DocumentModel, batch: &'a dyn BatchApi) -> Self {
        Self { model, batch }
    }

    /// Use one object for both views.
    pub fn single<H>(host: &'a H) -> Self
    where
        H: DocumentModel + BatchApi + 'a,
    {
        Self {
            model: host,
            batch: host,
        }
    }
}

impl std::fmt::Debug for HostClients<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostClients").finish_non_exhaustive()
    }
}
