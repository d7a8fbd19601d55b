//! Spreadsheet handle: one document and its tabs.

use sheetkit_core::ErrorKind;
use sheetkit_protocol::{
    AddSheetRequest, BatchUpdateRequest, BatchUpdateResponse, DeleteSheetRequest, Editors,
    GridProperties, ProtectedRange, Request, SheetProperties, Spreadsheet,
    UpdateProtectedRangeRequest,
};

use crate::config::SheetsConfig;
use crate::error::{Error, Result};
use crate::host::HostClients;
use crate::sheet::{Sheet, SheetRef};

/// Field mask for protected ranges and the tab they belong to.
pub const PROTECTED_RANGE_FIELDS: &str = "sheets(properties(sheetId,title),protectedRanges)";

/// Whether editors are being granted or revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorChange {
    Add,
    Remove,
}

/// A handle to one spreadsheet document.
///
/// # Example
///
/// ```rust,no_run
/// use sheetkit::{HostClients, RestClient, SheetRef, SheetsConfig, Span, Table};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = SheetsConfig::default();
///     let host = RestClient::new(&config, "ya29.token")?;
///     let table = Table::open_with_config(HostClients::single(&host), Some("abc1234567"), config)?;
///
///     let sheet = table.sheet(SheetRef::name("Sheet1")?)?;
///     for row in sheet.values(Span::default())?.rows() {
///         println!("{row:?}");
///     }
///     Ok(())
/// }
/// ```
pub struct Table<'a> {
    clients: HostClients<'a>,
    config: SheetsConfig,
    spreadsheet_id: String,
}

impl<'a> Table<'a> {
    /// Open a document by id, or the active document when `spreadsheet_id` is `None`.
    pub fn open(clients: HostClients<'a>, spreadsheet_id: Option<&str>) -> Result<Self> {
        Self::open_with_config(clients, spreadsheet_id, SheetsConfig::default())
    }

    /// Like [`Table::open`] with an explicit configuration.
    pub fn open_with_config(
        clients: HostClients<'a>,
        spreadsheet_id: Option<&str>,
        config: SheetsConfig,
    ) -> Result<Self> {
        let spreadsheet_id = match spreadsheet_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => clients.model.active_spreadsheet_id()?,
        };
        tracing::debug!(spreadsheet_id = %spreadsheet_id, "opened spreadsheet");

        Ok(Self {
            clients,
            config,
            spreadsheet_id,
        })
    }

    /// Spreadsheet id this handle addresses.
    pub fn id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Configuration the handle was opened with.
    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    /// Host clients shared by this handle and its sheets.
    pub fn clients(&self) -> HostClients<'a> {
        self.clients
    }

    /// Properties of every tab, in tab order.
    pub fn sheets(&self) -> Result<Vec<SheetProperties>> {
        Ok(self.clients.model.sheets(&self.spreadsheet_id)?)
    }

    /// Get a tab by id or name.
    pub fn sheet(&self, sheet: SheetRef) -> Result<Sheet<'_>> {
        Sheet::resolve(self.clients, &self.config, &self.spreadsheet_id, sheet)
    }

    /// Create a tab and return a handle to it.
    ///
    /// `None` appends the tab after the last one; `Some(0)` makes it the first.
    /// A host rejection is reported as [`Error::Operation`]. If the document
    /// model still lacks the tab after the flush the error kind is
    /// [`ErrorKind::UnexpectedResponse`].
    pub fn create_sheet(
        &self,
        sheet_id: i64,
        name: &str,
        index: Option<u32>,
    ) -> Result<Sheet<'_>> {
        let index = match index {
            Some(index) => index,
            None => self.clients.model.sheets(&self.spreadsheet_id)?.len() as u32,
        };

        let grid = self.config.new_sheet_grid;
        let request = Request::AddSheet(AddSheetRequest {
            properties: SheetProperties {
                sheet_id,
                title: name.to_string(),
                index,
                grid_properties: GridProperties {
                    row_count: grid.rows,
                    column_count: grid.columns,
                    ..GridProperties::default()
                },
            },
        });

        self.clients
            .batch
            .batch_update(&self.spreadsheet_id, &BatchUpdateRequest::single(request))
            .map_err(Error::boxed("create_sheet"))?;
        tracing::info!(sheet_id, name, index, "created sheet");

        // The object model must see the new tab before it can be resolved
        self.clients.model.flush()?;

        self.sheet(SheetRef::Id(sheet_id)).map_err(|err| match err.kind() {
            Some(ErrorKind::SheetNotFound) => Error::kind_with(
                ErrorKind::UnexpectedResponse,
                format!("sheet {sheet_id} missing after create"),
            ),
            _ => err,
        })
    }

    /// Delete a tab.
    ///
    /// A host rejection is reported as [`Error::Operation`].
    pub fn delete_sheet(&self, sheet_id: i64) -> Result<()> {
        let request = Request::DeleteSheet(DeleteSheetRequest { sheet_id });

        self.clients
            .batch
            .batch_update(&self.spreadsheet_id, &BatchUpdateRequest::single(request))
            .map_err(Error::boxed("delete_sheet"))?;
        tracing::info!(sheet_id, "deleted sheet");

        Ok(())
    }

    /// Add or remove editors on every protected range of every tab.
    ///
    /// Returns `None` without a batch call when the document has no
    /// protected ranges.
    pub fn change_editors_in_protected_ranges<S: AsRef<str>>(
        &self,
        emails: &[S],
        change: EditorChange,
    ) -> Result<Option<BatchUpdateResponse>> {
        let spreadsheet = self
            .clients
            .batch
            .get_spreadsheet(&self.spreadsheet_id, Some(PROTECTED_RANGE_FIELDS))?;

        let requests = editor_update_requests(&spreadsheet, emails, change);
        if requests.is_empty() {
            tracing::debug!(spreadsheet_id = %self.spreadsheet_id, "no protected ranges");
            return Ok(None);
        }

        tracing::info!(
            ranges = requests.len(),
            editors = emails.len(),
            ?change,
            "updating protected range editors"
        );
        let response = self.clients.batch.batch_update(
            &self.spreadsheet_id,
            &BatchUpdateRequest::new(requests),
        )?;
        Ok(Some(response))
    }
}

impl std::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Apply `change` to the editor list of `editors`.
///
/// Adding a present address or removing an absent one leaves the list as is.
pub fn apply_editor_change<S: AsRef<str>>(editors: &mut Vec<String>, emails: &[S], change: EditorChange) {
    for email in emails {
        let email = email.as_ref();
        match change {
            EditorChange::Add => {
                if !editors.iter().any(|e| e == email) {
                    editors.push(email.to_string());
                }
            }
            EditorChange::Remove => editors.retain(|e| e != email),
        }
    }
}

/// One `updateProtectedRange` (field mask `editors`) per protected range.
///
/// Only the user list changes; groups and `domainUsersCanEdit` are kept.
pub fn editor_update_requests<S: AsRef<str>>(
    spreadsheet: &Spreadsheet,
    emails: &[S],
    change: EditorChange,
) -> Vec<Request> {
    spreadsheet
        .sheets
        .iter()
        .flat_map(|sheet| sheet.protected_ranges.iter())
        .map(|range| {
            // The mask replaces the whole editors object, so groups and the
            // domain flag are sent back as read
            let mut editors = range.editors.clone().unwrap_or_default();
            apply_editor_change(&mut editors.users, emails, change);

            Request::UpdateProtectedRange(UpdateProtectedRangeRequest {
                protected_range: ProtectedRange {
                    protected_range_id: range.protected_range_id,
                    editors: Some(editors),
                    ..ProtectedRange::default()
                },
                fields: "editors".to_string(),
            })
        })
        .collect()
}
