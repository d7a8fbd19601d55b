use pretty_assertions::assert_eq;
use sheetkit::values::ROW_METADATA_FIELDS;
use sheetkit::{CellValue, ErrorKind, SheetRef, Span, Table};
use sheetkit_protocol::{DimensionProperties, GridData, SheetMetadata, Spreadsheet};

use crate::common::{tab, FakeHost};

fn numbered_rows(n: usize) -> Vec<Vec<CellValue>> {
    (1..=n)
        .map(|i| vec![CellValue::from(format!("row {i}")), CellValue::Number(i as f64)])
        .collect()
}

fn filter_metadata(sheet_id: i64, hidden: &[bool]) -> Spreadsheet {
    Spreadsheet {
        sheets: vec![SheetMetadata {
            properties: tab(sheet_id, "Sheet1", 0),
            data: vec![GridData {
                row_metadata: hidden
                    .iter()
                    .map(|&hidden_by_filter| DimensionProperties {
                        hidden_by_filter,
                        ..DimensionProperties::default()
                    })
                    .collect(),
                ..GridData::default()
            }],
            ..SheetMetadata::default()
        }],
        ..Spreadsheet::default()
    }
}

#[test]
fn values_are_read_once() {
    let host = FakeHost::new();
    host.state.borrow_mut().values = numbered_rows(3);
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    let values = sheet.values(Span::default()).unwrap();
    assert_eq!(values.row_count(), 3);
    assert_eq!(values.first_row(), 1);
    assert_eq!(values.rows()[2][0].as_str(), Some("row 3"));
    assert_eq!(host.state.borrow().reads.len(), 1);
}

#[test]
fn visible_rows_drop_filtered_rows() {
    let host = FakeHost::new();
    {
        let mut state = host.state.borrow_mut();
        state.values = numbered_rows(5);
        state.metadata = filter_metadata(0, &[false, true, false, true, false]);
    }
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    let visible = sheet.values(Span::default()).unwrap().visible_rows().unwrap();
    let numbers: Vec<f64> = visible.iter().map(|r| r[1].as_f64().unwrap()).collect();
    assert_eq!(numbers, vec![1.0, 3.0, 5.0]);
    assert_eq!(
        host.state.borrow().metadata_fields,
        vec![Some(ROW_METADATA_FIELDS.to_string())]
    );
}

#[test]
fn visible_rows_align_with_first_row() {
    let host = FakeHost::new();
    {
        let mut state = host.state.borrow_mut();
        // The read starts at row 2, so the header's metadata entry is skipped
        state.values = numbered_rows(3);
        state.metadata = filter_metadata(0, &[true, false, true, false]);
    }
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    let visible = sheet
        .values(Span::from_corner(2, 1))
        .unwrap()
        .visible_rows()
        .unwrap();
    let numbers: Vec<f64> = visible.iter().map(|r| r[1].as_f64().unwrap()).collect();
    assert_eq!(numbers, vec![1.0, 3.0]);
}

#[test]
fn visible_rows_need_sheet_metadata() {
    let host = FakeHost::new();
    host.state.borrow_mut().metadata = filter_metadata(0, &[]);
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(7)).unwrap();

    let err = sheet
        .values(Span::default())
        .unwrap()
        .visible_rows()
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::SheetNotFound));
}
