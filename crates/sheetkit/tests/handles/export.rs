use pretty_assertions::assert_eq;
use sheetkit::{ExportFormat, LocalFolder, SheetRef, SheetsConfig, Table};

use crate::common::FakeHost;

#[test]
fn export_to_folder_fetches_with_token() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), Some("abc123")).unwrap();
    let sheet = table.sheet(SheetRef::Id(7)).unwrap();

    let file = sheet
        .export_to_folder("Invoice", &host, ExportFormat::Pdf, &host)
        .unwrap();
    assert_eq!(file.name, "Invoice.pdf");
    assert_eq!(file.mime_type, "application/pdf");
    assert_eq!(file.size, 8);

    let state = host.state.borrow();
    let (url, token) = &state.fetches[0];
    assert_eq!(token, "fake-token");
    assert!(url.starts_with("https://docs.google.com/spreadsheets/d/abc123/export?format=pdf&size=7"));
    assert!(url.contains("&gid=7&r1=0&c1=0&r2=54&c2=14"));
    assert_eq!(state.files[0].2, b"rendered".to_vec());
}

#[test]
fn export_to_local_folder() {
    let tmp = tempfile::tempdir().unwrap();
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    let folder = LocalFolder::new(tmp.path()).unwrap();
    let file = sheet
        .export_to_folder("Sheet1", &folder, ExportFormat::Xlsx, &host)
        .unwrap();

    assert_eq!(file.name, "Sheet1.xlsx");
    assert_eq!(std::fs::read(tmp.path().join("Sheet1.xlsx")).unwrap(), b"rendered");
}

#[test]
fn export_uses_configured_base() {
    let host = FakeHost::new();
    let config = SheetsConfig::default().with_export_base("http://localhost:8080/d/");
    let table = Table::open_with_config(host.clients(), None, config).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    assert_eq!(
        sheet.export_url(ExportFormat::Csv).to_string(),
        "http://localhost:8080/d/doc-1/export?format=csv&gid=0"
    );
}

#[test]
fn prompt_download_opens_dialog() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), Some("abc123")).unwrap();
    let sheet = table.sheet(SheetRef::Id(7)).unwrap();

    sheet
        .export_and_prompt_download(ExportFormat::Xlsx, &host)
        .unwrap();

    let state = host.state.borrow();
    let (html, height, title) = &state.dialogs[0];
    assert_eq!(
        html,
        "<script>window.open('https://docs.google.com/spreadsheets/d/abc123/export?format=xlsx&gid=7');\
         google.script.host.close();</script>"
    );
    assert_eq!(*height, 100);
    assert_eq!(title, "Downloading the sheet...");
    assert!(state.fetches.is_empty());
}
