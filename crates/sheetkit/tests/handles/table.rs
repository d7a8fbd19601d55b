use pretty_assertions::assert_eq;
use sheetkit::table::PROTECTED_RANGE_FIELDS;
use sheetkit::{EditorChange, Error, ErrorKind, SheetRef, Table};
use sheetkit_protocol::{Editors, ProtectedRange, Request, SheetMetadata, Spreadsheet};

use crate::common::{FakeHost, SPREADSHEET_ID};

#[test]
fn open_falls_back_to_active_document() {
    let host = FakeHost::new();

    assert_eq!(Table::open(host.clients(), None).unwrap().id(), SPREADSHEET_ID);
    assert_eq!(Table::open(host.clients(), Some("")).unwrap().id(), SPREADSHEET_ID);
    assert_eq!(Table::open(host.clients(), Some("other")).unwrap().id(), "other");
}

#[test]
fn create_sheet_appends_by_default() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();

    let sheet = table.create_sheet(42, "Report", None).unwrap();
    assert_eq!(sheet.id(), 42);
    assert_eq!(sheet.name(), "Report");
    assert_eq!(sheet.properties().index, 2);
    assert_eq!(host.state.borrow().flushes, 1);

    match &host.single_batch()[0] {
        Request::AddSheet(add) => {
            assert_eq!(add.properties.sheet_id, 42);
            assert_eq!(add.properties.title, "Report");
            assert_eq!(add.properties.index, 2);
            assert_eq!(add.properties.grid_properties.row_count, 1000);
            assert_eq!(add.properties.grid_properties.column_count, 12);
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn create_sheet_at_front() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();

    let sheet = table.create_sheet(42, "First", Some(0)).unwrap();
    assert_eq!(sheet.properties().index, 0);

    let titles: Vec<String> = table.sheets().unwrap().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["First", "Sheet1", "Data"]);
}

#[test]
fn create_sheet_rejection_is_boxed() {
    let host = FakeHost::new();
    host.state.borrow_mut().reject_batches = Some("duplicate sheet id".to_string());
    let table = Table::open(host.clients(), None).unwrap();

    let err = table.create_sheet(7, "Again", None).unwrap_err();
    assert_eq!(err.function_name(), Some("create_sheet"));
    assert_eq!(
        err.to_string(),
        "create_sheet() failed: host rejected the request: duplicate sheet id"
    );
    assert_eq!(host.state.borrow().flushes, 0);
}

#[test]
fn create_sheet_missing_after_flush() {
    let host = FakeHost::new();
    host.state.borrow_mut().lose_added_tabs = true;
    let table = Table::open(host.clients(), None).unwrap();

    let err = table.create_sheet(42, "Ghost", None).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::UnexpectedResponse));
    assert_eq!(host.state.borrow().flushes, 1);
}

#[test]
fn delete_sheet_sends_one_request() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();

    table.delete_sheet(7).unwrap();
    assert!(matches!(
        host.single_batch()[0],
        Request::DeleteSheet(ref d) if d.sheet_id == 7
    ));
    assert_eq!(table.sheets().unwrap().len(), 1);

    host.state.borrow_mut().reject_batches = Some("no such sheet".to_string());
    let err = table.delete_sheet(99).unwrap_err();
    assert!(matches!(err, Error::Operation { function_name: "delete_sheet", .. }));
}

#[test]
fn sheet_lookup_errors() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();

    assert_eq!(table.sheet(SheetRef::Name("Data".into())).unwrap().id(), 7);
    assert_eq!(table.sheet(SheetRef::Id(0)).unwrap().name(), "Sheet1");

    let err = table.sheet(SheetRef::Name("Missing".into())).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::SheetNotFound));
    assert!(err.to_string().starts_with("Error: sheet not found"));

    let err = table.sheet(SheetRef::Id(123)).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::SheetNotFound));

    let err = table.sheet(SheetRef::Name(String::new())).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NeedSheetId));
}

fn protected(id: i64, users: &[&str]) -> ProtectedRange {
    ProtectedRange {
        protected_range_id: id,
        editors: Some(Editors {
            users: users.iter().map(|u| u.to_string()).collect(),
            ..Editors::default()
        }),
        ..ProtectedRange::default()
    }
}

#[test]
fn change_editors_without_protected_ranges_is_noop() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();

    let response = table
        .change_editors_in_protected_ranges(&["a@gmail.com"], EditorChange::Add)
        .unwrap();
    assert!(response.is_none());
    assert!(host.batches().is_empty());
    assert_eq!(
        host.state.borrow().metadata_fields,
        vec![Some(PROTECTED_RANGE_FIELDS.to_string())]
    );
}

#[test]
fn change_editors_updates_every_range() {
    let host = FakeHost::new();
    host.state.borrow_mut().metadata = Spreadsheet {
        sheets: vec![
            SheetMetadata {
                protected_ranges: vec![protected(11, &["a@gmail.com", "b@gmail.com"])],
                ..SheetMetadata::default()
            },
            SheetMetadata {
                protected_ranges: vec![protected(12, &["b@gmail.com"])],
                ..SheetMetadata::default()
            },
        ],
        ..Spreadsheet::default()
    };
    let table = Table::open(host.clients(), None).unwrap();

    let emails = vec!["a@gmail.com".to_string()];
    table
        .change_editors_in_protected_ranges(&emails, EditorChange::Remove)
        .unwrap()
        .unwrap();

    let editors: Vec<(i64, Vec<String>)> = host
        .single_batch()
        .into_iter()
        .map(|r| match r {
            Request::UpdateProtectedRange(u) => (
                u.protected_range.protected_range_id,
                u.protected_range.editors.unwrap().users,
            ),
            other => panic!("unexpected request {other:?}"),
        })
        .collect();

    assert_eq!(
        editors,
        vec![
            (11, vec!["b@gmail.com".to_string()]),
            (12, vec!["b@gmail.com".to_string()]),
        ]
    );
}
