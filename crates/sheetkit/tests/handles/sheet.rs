use pretty_assertions::assert_eq;
use sheetkit::{CellValue, ErrorKind, Extent, SheetRef, Span, Table};
use sheetkit_protocol::{Dimension, DimensionRange, GridRange, Request, ValueInputOption};

use crate::common::{tab, FakeHost};

fn grid(sheet_id: i64, rows: (u32, u32), cols: (u32, u32)) -> GridRange {
    GridRange::bounded(sheet_id, rows.0, rows.1, cols.0, cols.1)
}

#[test]
fn values_default_span_reads_first_99_columns() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    sheet.values(Span::default()).unwrap();
    sheet
        .values(Span::new(3, 2, Extent::Count(5), Extent::Count(4)))
        .unwrap();

    assert_eq!(
        host.state.borrow().reads,
        vec!["Sheet1!A1:CU".to_string(), "Sheet1!B3:E7".to_string()]
    );
}

#[test]
fn values_quote_sheet_names() {
    let host = FakeHost::new();
    host.state.borrow_mut().tabs.push(tab(9, "My Data", 2));
    let table = Table::open(host.clients(), None).unwrap();

    let sheet = table.sheet(SheetRef::Name("My Data".into())).unwrap();
    sheet.values(Span::from_corner(2, 1)).unwrap();

    assert_eq!(host.state.borrow().reads, vec!["'My Data'!A2:CU".to_string()]);
}

#[test]
fn values_reject_zero_corner() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    let err = sheet.values(Span::from_corner(1, 0)).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidColumn));
    let err = sheet.set_values(vec![], 0, 1).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidRow));
    assert!(host.state.borrow().reads.is_empty());
}

#[test]
fn set_values_writes_user_entered_at_anchor() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(7)).unwrap();

    let rows = vec![
        vec![CellValue::from("Total"), CellValue::from("=SUM(B1:B4)")],
        vec![CellValue::from(true), CellValue::Number(2.5)],
    ];
    let response = sheet.set_values(rows.clone(), 5, 3).unwrap();
    assert_eq!(response.updated_rows, 2);

    let state = host.state.borrow();
    let (range, body, input) = &state.writes[0];
    assert_eq!(range, "Data!C5");
    assert_eq!(body.values, rows);
    assert_eq!(*input, ValueInputOption::UserEntered);
}

#[test]
fn clear_defaults_to_999_columns() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    sheet.clear(Span::default()).unwrap();
    sheet
        .clear(Span::from_corner(4, 3).with_rows(Extent::Count(2)))
        .unwrap();

    assert_eq!(
        host.state.borrow().clears,
        vec!["Sheet1!A1:ALK".to_string(), "Sheet1!C4:ALM5".to_string()]
    );
}

#[test]
fn clear_content_runs_to_last_row() {
    let host = FakeHost::new();
    host.state
        .borrow_mut()
        .last_rows
        .insert("Sheet1".to_string(), 40);
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    sheet.clear_content(Span::from_corner(2, 1)).unwrap();

    match &host.single_batch()[0] {
        Request::UpdateCells(update) => {
            assert!(update.rows.is_empty());
            assert_eq!(update.fields, "userEnteredValue");
            assert_eq!(update.range, grid(0, (1, 40), (0, 99)));
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn clear_content_on_empty_sheet_covers_first_row() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(7)).unwrap();

    sheet
        .clear_content(Span::from_corner(5, 2).with_columns(Extent::Count(3)))
        .unwrap();

    match &host.single_batch()[0] {
        Request::UpdateCells(update) => assert_eq!(update.range, grid(7, (4, 5), (1, 4))),
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn delete_duplicates_bounded_span() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    sheet
        .delete_duplicates(Span::new(2, 1, Extent::Count(10), Extent::Count(3)))
        .unwrap();

    match &host.single_batch()[0] {
        Request::DeleteDuplicates(dedupe) => {
            assert_eq!(dedupe.range, grid(0, (1, 11), (0, 3)));
            assert_eq!(
                dedupe.comparison_columns,
                vec![DimensionRange {
                    sheet_id: 0,
                    dimension: Dimension::Columns,
                    start_index: 0,
                    end_index: 3,
                }]
            );
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn delete_duplicates_open_span_uses_grid_size() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(7)).unwrap();

    sheet.delete_duplicates(Span::default()).unwrap();

    match &host.single_batch()[0] {
        Request::DeleteDuplicates(dedupe) => {
            assert_eq!(dedupe.range, grid(7, (0, 1000), (0, 26)));
            assert_eq!(dedupe.comparison_columns[0].end_index, 26);
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn delete_rows_highest_first_in_one_batch() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(7)).unwrap();

    sheet.delete_rows(&[3, 7, 2]).unwrap();

    let deleted: Vec<(u32, u32)> = host
        .single_batch()
        .into_iter()
        .map(|r| match r {
            Request::DeleteDimension(d) => {
                assert_eq!(d.range.sheet_id, 7);
                assert_eq!(d.range.dimension, Dimension::Rows);
                (d.range.start_index, d.range.end_index)
            }
            other => panic!("unexpected request {other:?}"),
        })
        .collect();
    assert_eq!(deleted, vec![(6, 7), (2, 3), (1, 2)]);
}

#[test]
fn delete_no_rows_skips_host() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(7)).unwrap();

    let response = sheet.delete_rows(&[]).unwrap();
    assert!(response.replies.is_empty());
    assert!(host.batches().is_empty());
}

#[test]
fn oversized_spans_are_rejected_before_the_host() {
    let host = FakeHost::new();
    let table = Table::open(host.clients(), None).unwrap();
    let sheet = table.sheet(SheetRef::Id(0)).unwrap();

    // All columns from the last column still needs 99 of them
    let err = sheet.clear_content(Span::from_corner(1, u32::MAX)).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidColumn));

    let err = sheet
        .delete_duplicates(Span::from_corner(2, 1).with_rows(Extent::Count(u32::MAX)))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidRow));

    let err = sheet
        .values(Span::from_corner(1, 2).with_columns(Extent::Count(u32::MAX)))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidColumn));

    assert!(host.batches().is_empty());
    assert!(host.state.borrow().reads.is_empty());
}
