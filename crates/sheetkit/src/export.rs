//! Export URLs and the download dialog.

use std::fmt;
use std::str::FromStr;

use crate::config::PageSetup;

/// Height in pixels of the download dialog.
pub const DOWNLOAD_DIALOG_HEIGHT: u32 = 100;

/// Output formats supported by the export endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Xlsx,
    Ods,
    Zip,
    Csv,
}

impl ExportFormat {
    /// Value of the `format` query parameter; also the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Ods => "ods",
            ExportFormat::Zip => "zip",
            ExportFormat::Csv => "csv",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// MIME type of the rendered bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Ods => "application/vnd.oasis.opendocument.spreadsheet",
            ExportFormat::Zip => "application/zip",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "xlsx" => Ok(ExportFormat::Xlsx),
            "ods" => Ok(ExportFormat::Ods),
            "zip" => Ok(ExportFormat::Zip),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "unknown export format '{other}' (expected pdf, xlsx, ods, zip or csv)"
            )),
        }
    }
}

/// User-facing text shown by interactive surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    DownloadingSheet,
}

impl Prompt {
    /// Text to show for this prompt.
    pub const fn text(self) -> &'static str {
        match self {
            Prompt::DownloadingSheet => "Downloading the sheet...",
        }
    }
}

/// URL of a rendered export of one tab.
///
/// With a [`PageSetup`] the full print-layout query is emitted; without one
/// only `format` and `gid` are sent and the endpoint picks its defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportUrl<'a> {
    pub export_base: &'a str,
    pub spreadsheet_id: &'a str,
    pub sheet_id: i64,
    pub format: ExportFormat,
    pub page: Option<PageSetup>,
}

impl<'a> ExportUrl<'a> {
    /// Export URL with endpoint defaults for the page layout.
    pub fn new(
        export_base: &'a str,
        spreadsheet_id: &'a str,
        sheet_id: i64,
        format: ExportFormat,
    ) -> Self {
        Self {
            export_base,
            spreadsheet_id,
            sheet_id,
            format,
            page: None,
        }
    }

    /// Send the full print-layout query from `page`.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = Some(page);
        self
    }
}

impl fmt::Display for ExportUrl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/export?format={}",
            self.export_base, self.spreadsheet_id, self.format
        )?;

        let Some(page) = &self.page else {
            return write!(f, "&gid={}", self.sheet_id);
        };

        write!(
            f,
            "&size={}&fzr=true&portrait={}&fitw={}&gridlines={}&printtitle=false\
             &top_margin={}&bottom_margin={}&left_margin={}&right_margin={}\
             &sheetnames=false&pagenum=UNDEFINED&attachment=true\
             &gid={}&r1={}&c1={}&r2={}&c2={}",
            page.size,
            page.portrait,
            page.fit_width,
            page.gridlines,
            page.top_margin,
            page.bottom_margin,
            page.left_margin,
            page.right_margin,
            self.sheet_id,
            page.first_row,
            page.first_col,
            page.last_row,
            page.last_col,
        )
    }
}

/// Dialog body that opens `url` in a new tab and closes itself.
pub fn download_dialog_html(url: &str) -> String {
    // The URL lands inside a single-quoted JS string
    let escaped = url.replace('\\', "\\\\").replace('\'', "\\'");
    format!("<script>window.open('{escaped}');google.script.host.close();</script>")
}
