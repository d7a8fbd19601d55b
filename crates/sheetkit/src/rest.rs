//! Host implementation over the Sheets v4 REST API.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use sheetkit_core::quoted_sheet_name;
use sheetkit_protocol::{
    BatchUpdateRequest, BatchUpdateResponse, ClearValuesResponse, SheetProperties, Spreadsheet,
    UpdateValuesResponse, ValueGetOptions, ValueInputOption, ValueRange,
};

use crate::config::SheetsConfig;
use crate::error::{HostError, HostResult};
use crate::host::{BatchApi, DocumentModel, Exporter};

/// Field mask for the tab list.
const SHEET_PROPERTIES_FIELDS: &str = "sheets.properties";

fn build_client(config: &SheetsConfig) -> HostResult<Client> {
    Ok(Client::builder().timeout(config.timeout).build()?)
}

/// Turn a non-2xx response into [`HostError::Status`].
fn check_status(response: Response) -> HostResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "host request failed");
    Err(HostError::Status {
        status: status.as_u16(),
        body,
    })
}

fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> HostResult<T> {
    let response = check_status(request.send()?)?;
    let bytes = response.bytes()?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Client for the batch API that also serves as the document model.
///
/// Writes are applied by the host before the call returns, so
/// [`DocumentModel::flush`] has nothing to do.
pub struct RestClient {
    client: Client,
    api_base: String,
    token: String,
    default_spreadsheet: Option<String>,
}

impl RestClient {
    /// Client for `config.api_base` authorized with the bearer `token`.
    pub fn new(config: &SheetsConfig, token: impl Into<String>) -> HostResult<Self> {
        Ok(Self {
            client: build_client(config)?,
            api_base: config.api_base.clone(),
            token: token.into(),
            default_spreadsheet: None,
        })
    }

    /// Document returned by [`DocumentModel::active_spreadsheet_id`].
    pub fn with_default_spreadsheet(mut self, spreadsheet_id: impl Into<String>) -> Self {
        self.default_spreadsheet = Some(spreadsheet_id.into());
        self
    }

    fn document_url(&self, spreadsheet_id: &str) -> String {
        format!("{}/{}", self.api_base, urlencoding::encode(spreadsheet_id))
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/values/{}",
            self.document_url(spreadsheet_id),
            urlencoding::encode(range)
        )
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("api_base", &self.api_base)
            .field("default_spreadsheet", &self.default_spreadsheet)
            .finish_non_exhaustive()
    }
}

impl BatchApi for RestClient {
    fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
        fields: Option<&str>,
    ) -> HostResult<Spreadsheet> {
        let mut request = self
            .client
            .get(self.document_url(spreadsheet_id))
            .bearer_auth(&self.token);
        if let Some(fields) = fields {
            request = request.query(&[("fields", fields)]);
        }
        read_json(request)
    }

    fn batch_update(
        &self,
        spreadsheet_id: &str,
        batch: &BatchUpdateRequest,
    ) -> HostResult<BatchUpdateResponse> {
        let url = format!("{}:batchUpdate", self.document_url(spreadsheet_id));
        tracing::debug!(url = %url, requests = batch.len(), "POST batchUpdate");
        read_json(self.client.post(url).bearer_auth(&self.token).json(batch))
    }

    fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        options: &ValueGetOptions,
    ) -> HostResult<ValueRange> {
        let request = self
            .client
            .get(self.values_url(spreadsheet_id, range))
            .bearer_auth(&self.token)
            .query(&options.query_pairs());
        read_json(request)
    }

    fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        body: &ValueRange,
        input: ValueInputOption,
    ) -> HostResult<UpdateValuesResponse> {
        let request = self
            .client
            .put(self.values_url(spreadsheet_id, range))
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", input.as_str())])
            .json(body);
        read_json(request)
    }

    fn clear_values(&self, spreadsheet_id: &str, range: &str) -> HostResult<ClearValuesResponse> {
        let url = format!("{}:clear", self.values_url(spreadsheet_id, range));
        read_json(
            self.client
                .post(url)
                .bearer_auth(&self.token)
                .json(&serde_json::json!({})),
        )
    }
}

impl DocumentModel for RestClient {
    fn active_spreadsheet_id(&self) -> HostResult<String> {
        self.default_spreadsheet
            .clone()
            .ok_or(HostError::NoActiveDocument)
    }

    fn sheets(&self, spreadsheet_id: &str) -> HostResult<Vec<SheetProperties>> {
        let spreadsheet = self.get_spreadsheet(spreadsheet_id, Some(SHEET_PROPERTIES_FIELDS))?;
        Ok(spreadsheet
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties)
            .collect())
    }

    fn last_row(&self, spreadsheet_id: &str, sheet_name: &str) -> HostResult<u32> {
        // A whole-sheet read starts at A1 and stops at the last row with data.
        // Always quoted so a tab named like a cell is not read as one.
        let range = quoted_sheet_name(sheet_name);
        let values = self.get_values(spreadsheet_id, &range, &ValueGetOptions::default())?;
        Ok(values.values.len() as u32)
    }

    fn flush(&self) -> HostResult<()> {
        Ok(())
    }
}

/// Fetches exports with a fixed bearer token.
pub struct HttpExporter {
    client: Client,
    token: String,
}

impl HttpExporter {
    /// Exporter that fetches with the bearer `token`.
    pub fn new(config: &SheetsConfig, token: impl Into<String>) -> HostResult<Self> {
        Ok(Self {
            client: build_client(config)?,
            token: token.into(),
        })
    }
}

impl std::fmt::Debug for HttpExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExporter").finish_non_exhaustive()
    }
}

impl Exporter for HttpExporter {
    fn oauth_token(&self) -> HostResult<String> {
        Ok(self.token.clone())
    }

    fn fetch(&self, url: &str, bearer_token: &str) -> HostResult<Vec<u8>> {
        let response = check_status(self.client.get(url).bearer_auth(bearer_token).send()?)?;
        Ok(response.bytes()?.to_vec())
    }
}
