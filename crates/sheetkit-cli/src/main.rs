//! sheetkit CLI - read and edit hosted spreadsheets

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sheetkit::{
    column_to_letters, letters_to_column, CellValue, EditorChange, ExportFormat, HostClients,
    HostResult, HttpExporter, LocalFolder, RestClient, Sheet, SheetRef, SheetsConfig, Span,
    Table, Ui,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetkit")]
#[command(author, version, about = "Read and edit hosted spreadsheets")]
struct Cli {
    /// Spreadsheet id
    #[arg(long, env = "SHEETKIT_SPREADSHEET", global = true)]
    spreadsheet: Option<String>,

    /// OAuth access token
    #[arg(long, env = "SHEETKIT_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Base URL of the batch API
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Base URL of the export endpoint
    #[arg(long, global = true)]
    export_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct SpanArgs {
    /// First row (1-based)
    #[arg(long, default_value_t = 1)]
    first_row: u32,

    /// First column (1-based)
    #[arg(long, default_value_t = 1)]
    first_col: u32,

    /// Number of rows (default: all)
    #[arg(long)]
    rows: Option<u32>,

    /// Number of columns (default depends on the command)
    #[arg(long)]
    columns: Option<u32>,
}

impl From<SpanArgs> for Span {
    fn from(args: SpanArgs) -> Self {
        Span::new(
            args.first_row,
            args.first_col,
            args.rows.into(),
            args.columns.into(),
        )
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EditorAction {
    Add,
    Remove,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tabs of the spreadsheet
    Sheets,

    /// Print a range as JSON lines, one row per line
    Read {
        /// Sheet id (all digits) or name
        sheet: String,

        #[command(flatten)]
        span: SpanArgs,

        /// Only rows a basic filter currently shows
        #[arg(long)]
        visible: bool,
    },

    /// Write JSON rows from stdin (one array per line)
    Write {
        /// Sheet id (all digits) or name
        sheet: String,

        #[arg(long, default_value_t = 1)]
        first_row: u32,

        #[arg(long, default_value_t = 1)]
        first_col: u32,
    },

    /// Clear a range
    Clear {
        /// Sheet id (all digits) or name
        sheet: String,

        #[command(flatten)]
        span: SpanArgs,

        /// Keep formatting, clear values only
        #[arg(long)]
        content_only: bool,
    },

    /// Delete duplicate rows within a range
    Dedupe {
        /// Sheet id (all digits) or name
        sheet: String,

        #[command(flatten)]
        span: SpanArgs,
    },

    /// Delete rows by 1-based index
    DeleteRows {
        /// Sheet id (all digits) or name
        sheet: String,

        #[arg(required = true)]
        rows: Vec<u32>,
    },

    /// Create a tab
    CreateSheet {
        id: i64,
        name: String,

        /// Tab position (default: last)
        #[arg(long)]
        index: Option<u32>,
    },

    /// Delete a tab
    DeleteSheet { id: i64 },

    /// Add or remove editors on every protected range
    Editors {
        #[arg(value_enum)]
        action: EditorAction,

        #[arg(required = true)]
        emails: Vec<String>,
    },

    /// Export a tab to a local directory
    Export {
        /// Sheet id (all digits) or name
        sheet: String,

        /// File name without extension
        name: String,

        #[arg(long, default_value = "pdf")]
        format: ExportFormat,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Print the browser download dialog instead of fetching
        #[arg(long)]
        prompt: bool,
    },

    /// Convert between column numbers and letters
    Column { value: String },
}

impl Cli {
    fn config(&self) -> SheetsConfig {
        let mut config = SheetsConfig::default();
        if let Some(base) = &self.api_base {
            config = config.with_api_base(base.as_str());
        }
        if let Some(base) = &self.export_base {
            config = config.with_export_base(base.as_str());
        }
        config
    }
}

/// Prints dialog bodies instead of showing them.
struct StdoutUi;

impl Ui for StdoutUi {
    fn show_modal_dialog(&self, html: &str, _height: u32, title: &str) -> HostResult<()> {
        eprintln!("{title}");
        let mut out = io::stdout().lock();
        writeln!(out, "{html}")?;
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Runs offline
    if let Commands::Column { value } = &cli.command {
        return column(value);
    }

    let config = cli.config();
    let token = cli
        .token
        .as_deref()
        .context("missing OAuth token; pass --token or set SHEETKIT_TOKEN")?;

    let mut host = RestClient::new(&config, token).context("Failed to build HTTP client")?;
    if let Some(id) = &cli.spreadsheet {
        host = host.with_default_spreadsheet(id.as_str());
    }
    let table = Table::open_with_config(
        HostClients::single(&host),
        cli.spreadsheet.as_deref(),
        config,
    )
    .context("Failed to open spreadsheet")?;

    match &cli.command {
        Commands::Sheets => list_sheets(&table),
        Commands::Read {
            sheet,
            span,
            visible,
        } => read(&table, sheet, (*span).into(), *visible),
        Commands::Write {
            sheet,
            first_row,
            first_col,
        } => write(&table, sheet, *first_row, *first_col),
        Commands::Clear {
            sheet,
            span,
            content_only,
        } => {
            let sheet = table.sheet(parse_sheet_ref(sheet)?)?;
            if *content_only {
                sheet.clear_content((*span).into())?;
            } else {
                let cleared = sheet.clear((*span).into())?;
                eprintln!("Cleared {}", cleared.cleared_range);
            }
            Ok(())
        }
        Commands::Dedupe { sheet, span } => {
            let sheet = table.sheet(parse_sheet_ref(sheet)?)?;
            sheet
                .delete_duplicates((*span).into())
                .context("Failed to delete duplicates")?;
            Ok(())
        }
        Commands::DeleteRows { sheet, rows } => {
            let sheet = table.sheet(parse_sheet_ref(sheet)?)?;
            sheet.delete_rows(rows).context("Failed to delete rows")?;
            eprintln!("Deleted {} row(s) from {}", rows.len(), sheet.name());
            Ok(())
        }
        Commands::CreateSheet { id, name, index } => {
            let sheet = table.create_sheet(*id, name, *index)?;
            println!("{}", serde_json::to_string(sheet.properties())?);
            Ok(())
        }
        Commands::DeleteSheet { id } => Ok(table.delete_sheet(*id)?),
        Commands::Editors { action, emails } => {
            let change = match action {
                EditorAction::Add => EditorChange::Add,
                EditorAction::Remove => EditorChange::Remove,
            };
            match table.change_editors_in_protected_ranges(emails, change)? {
                Some(response) => {
                    eprintln!("Updated {} protected range(s)", response.replies.len())
                }
                None => eprintln!("No protected ranges"),
            }
            Ok(())
        }
        Commands::Export {
            sheet,
            name,
            format,
            out,
            prompt,
        } => {
            let sheet = table.sheet(parse_sheet_ref(sheet)?)?;
            if *prompt {
                sheet.export_and_prompt_download(*format, &StdoutUi)?;
                return Ok(());
            }
            export(&sheet, name, *format, out, table.config(), token)
        }
        Commands::Column { value } => column(value),
    }
}

/// Digits name a sheet id; anything else is a sheet name.
fn parse_sheet_ref(s: &str) -> Result<SheetRef> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        let id = s
            .parse()
            .with_context(|| format!("Sheet id '{s}' is out of range"))?;
        return Ok(SheetRef::Id(id));
    }
    Ok(SheetRef::name(s)?)
}

fn list_sheets(table: &Table<'_>) -> Result<()> {
    let sheets = table.sheets().context("Failed to list sheets")?;
    let mut out = io::stdout().lock();

    writeln!(out, "{:>12}  {:>5}  {:>10}  TITLE", "ID", "INDEX", "GRID")?;
    for sheet in sheets {
        let grid = format!(
            "{}x{}",
            sheet.grid_properties.row_count, sheet.grid_properties.column_count
        );
        writeln!(
            out,
            "{:>12}  {:>5}  {:>10}  {}",
            sheet.sheet_id, sheet.index, grid, sheet.title
        )?;
    }
    Ok(())
}

fn read(table: &Table<'_>, sheet: &str, span: Span, visible: bool) -> Result<()> {
    let sheet = table.sheet(parse_sheet_ref(sheet)?)?;
    let values = sheet
        .values(span)
        .with_context(|| format!("Failed to read '{}'", sheet.name()))?;

    let rows = if visible {
        values.visible_rows().context("Failed to read filter state")?
    } else {
        values.into_rows()
    };

    let mut out = io::stdout().lock();
    for row in &rows {
        writeln!(out, "{}", serde_json::to_string(row)?)?;
    }
    Ok(())
}

fn write(table: &Table<'_>, sheet: &str, first_row: u32, first_col: u32) -> Result<()> {
    let sheet = table.sheet(parse_sheet_ref(sheet)?)?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (n, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line)
            .with_context(|| format!("Line {} is not a JSON array of values", n + 1))?;
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), "parsed input rows");
    let response = sheet.set_values(rows, first_row, first_col)?;
    eprintln!(
        "Updated {} ({} cells)",
        response.updated_range, response.updated_cells
    );
    Ok(())
}

fn export(
    sheet: &Sheet<'_>,
    name: &str,
    format: ExportFormat,
    out: &Path,
    config: &SheetsConfig,
    token: &str,
) -> Result<()> {
    let exporter = HttpExporter::new(config, token).context("Failed to build HTTP client")?;
    let folder = LocalFolder::new(out)
        .with_context(|| format!("Failed to create '{}'", out.display()))?;

    let file = sheet
        .export_to_folder(name, &folder, format, &exporter)
        .context("Failed to export sheet")?;
    println!("{}", file.id);
    Ok(())
}

fn column(value: &str) -> Result<()> {
    if let Ok(n) = value.parse::<u32>() {
        println!("{}", column_to_letters(n));
    } else {
        println!("{}", letters_to_column(value)?);
    }
    Ok(())
}
