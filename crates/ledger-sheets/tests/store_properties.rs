//! Store behaviour through `dispatch`

use ledger_sheets::prelude::*;
use ledger_sheets::{CellContentKind, Change, FontSlant, TextAlign};
use pretty_assertions::assert_eq;

fn store() -> Store {
    Store::new(Workbook::new("wb-1", "Budget"))
}

fn cell<'a>(store: &'a Store, label: &str) -> Option<&'a Cell> {
    store
        .state()
        .workbook
        .sheet("sheet-1")
        .unwrap()
        .cell(label)
        .unwrap()
}

#[test]
fn test_update_cell_is_idempotent() {
    let patch = CellPatch::new().value(42).content_kind(CellContentKind::Value);
    let mut once = store();
    once.dispatch(Action::update_cell("sheet-1", Coordinates::new(2, 2), patch.clone()))
        .unwrap();

    let mut twice = store();
    for _ in 0..2 {
        twice
            .dispatch(Action::update_cell("sheet-1", Coordinates::new(2, 2), patch.clone()))
            .unwrap();
    }

    assert_eq!(cell(&once, "C3"), cell(&twice, "C3"));
    assert_eq!(once.history().len(), 1);
    assert_eq!(twice.history().len(), 2);
}

#[test]
fn test_single_cell_style_range_matches_merge() {
    let base = CellStyle::new().font_size(11.0).align(TextAlign::Left);
    let delta = CellStyle::new().bold(true).align(TextAlign::Right);

    let mut store = store();
    store
        .dispatch(Action::update_cell(
            "sheet-1",
            Coordinates::new(0, 0),
            CellPatch::new().style(base.clone()),
        ))
        .unwrap();
    let range = CellRange::single(Coordinates::new(0, 0), "sheet-1");
    store.dispatch(Action::apply_style(range, delta.clone())).unwrap();

    let style = cell(&store, "A1").unwrap().style.clone().unwrap();
    assert_eq!(style, base.merged(&delta));
}

#[test]
fn test_style_merge_is_shallow_union() {
    let mut store = store();
    store
        .dispatch(Action::apply_style(
            CellRange::parse("A1:B2", "sheet-1").unwrap(),
            CellStyle::new().italic(true).color(Color::RED),
        ))
        .unwrap();
    store
        .dispatch(Action::apply_style(
            CellRange::parse("A1:B2", "sheet-1").unwrap(),
            CellStyle::new().color(Color::BLUE),
        ))
        .unwrap();

    for label in ["A1", "A2", "B1", "B2"] {
        let style = cell(&store, label).unwrap().style.clone().unwrap();
        assert_eq!(style.font_style, Some(FontSlant::Italic), "{}", label);
        assert_eq!(style.color, Some(Color::BLUE), "{}", label);
    }

    // One entry per application, not per cell
    assert_eq!(store.history().len(), 2);
    let Change::StyleApplied { previous, .. } = &store.history().last().unwrap().change else {
        panic!("expected a style entry");
    };
    let labels: Vec<_> = previous.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["A1", "B1", "A2", "B2"]);
}

#[test]
fn test_update_then_read_c3() {
    let mut store = store();
    assert!(cell(&store, "C3").is_none());

    store
        .dispatch(Action::update_cell(
            "sheet-1",
            Coordinates::new(2, 2),
            CellPatch::new().value(42).content_kind(CellContentKind::Value),
        ))
        .unwrap();

    assert_eq!(cell(&store, "C3").unwrap().value, CellValue::Number(42.0));
}

#[test]
fn test_missing_sheet_keeps_active_sheet() {
    let mut store = store();
    let err = store.dispatch(Action::set_active_sheet("nope")).unwrap_err();

    assert_eq!(err, Error::SheetNotFound("nope".into()));
    assert_eq!(store.state().workbook.active_sheet_id(), "sheet-1");
    assert!(store.history().is_empty());
}

#[test]
fn test_style_range_on_other_sheet_is_rejected() {
    let mut store = store();
    store.dispatch(Action::AddSheet { name: Some("Q2".into()) }).unwrap();

    let range = CellRange::parse("A1:A3", "sheet-2").unwrap();
    let result = store.dispatch(Action::ApplyCellStyle {
        sheet_id: "sheet-1".into(),
        range,
        style: CellStyle::new().bold(true),
    });
    assert!(matches!(result, Err(Error::InvalidRange(_))));
    assert_eq!(store.history().len(), 1);
}

#[test]
fn test_snapshots_share_untouched_sheets() {
    let mut store = store();
    store.dispatch(Action::AddSheet { name: None }).unwrap();
    let before = store.state().clone();

    store
        .dispatch(Action::update_cell("sheet-2", Coordinates::new(0, 0), CellPatch::new().value(1)))
        .unwrap();
    let after = store.state();

    let same = |id: &str| {
        std::sync::Arc::ptr_eq(
            before.workbook.sheet_handle(id).unwrap(),
            after.workbook.sheet_handle(id).unwrap(),
        )
    };
    assert!(same("sheet-1"));
    assert!(!same("sheet-2"));
}
