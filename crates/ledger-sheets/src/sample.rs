//! Start-up workbook
//!
//! A small quarterly report used for demos: sheet "Financials" with sales,
//! expenses and a stored (unevaluated) profit formula.

use ledger_sheets_core::{
    Cell, CellContentKind, CellStyle, Coordinates, Dimensions, Sheet, Workbook,
};

/// Id of the sample workbook
pub const SAMPLE_WORKBOOK_ID: &str = "workbook-1";
/// Id of the sample sheet
pub const SAMPLE_SHEET_ID: &str = "sheet-1";

/// Build the "Enterprise Ledger v1.0" workbook
pub fn ledger_workbook() -> Workbook {
    let dims = Dimensions::new(50, 20);
    let mut sheet = Sheet::with_dimensions(SAMPLE_SHEET_ID, "Financials", dims);

    let bold = CellStyle::new().bold(true);
    let mut title = Cell::with_value(Coordinates::new(0, 0), "Quarterly Report");
    title.style = Some(bold.clone().font_size(16.0));
    put(&mut sheet, 0, 0, title);

    put(&mut sheet, 1, 0, Cell::with_value(Coordinates::new(1, 0), "Sales"));
    put(&mut sheet, 1, 1, Cell::with_value(Coordinates::new(1, 1), 12500));
    put(&mut sheet, 2, 0, Cell::with_value(Coordinates::new(2, 0), "Expenses"));
    put(&mut sheet, 2, 1, Cell::with_value(Coordinates::new(2, 1), 4800));

    let mut profit = Cell::with_value(Coordinates::new(3, 0), "Profit");
    profit.style = Some(bold.clone());
    put(&mut sheet, 3, 0, profit);

    let mut total = Cell::with_value(Coordinates::new(3, 1), 7700);
    total.formula = Some("=B2-B3".to_string());
    total.content_kind = CellContentKind::Formula;
    total.style = Some(bold);
    put(&mut sheet, 3, 1, total);

    Workbook::from_sheet(SAMPLE_WORKBOOK_ID, "Enterprise Ledger v1.0", sheet, dims)
}

fn put(sheet: &mut Sheet, row: u32, col: u32, cell: Cell) {
    sheet.put_cell(Coordinates::new(row, col), cell);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_sheets_core::CellValue;

    #[test]
    fn test_sample_contents() {
        let wb = ledger_workbook();
        assert_eq!(wb.name(), "Enterprise Ledger v1.0");
        assert_eq!(wb.active_sheet_id(), SAMPLE_SHEET_ID);

        let sheet = wb.active_sheet().unwrap();
        assert_eq!(sheet.name(), "Financials");
        assert_eq!(sheet.dimensions(), Dimensions::new(50, 20));
        assert_eq!(sheet.cell_count(), 7);

        let b4 = sheet.cell("B4").unwrap().unwrap();
        assert_eq!(b4.value, CellValue::Number(7700.0));
        assert_eq!(b4.formula.as_deref(), Some("=B2-B3"));
        assert!(b4.style.as_ref().unwrap().is_bold());

        let title = sheet.cell("A1").unwrap().unwrap();
        assert_eq!(title.style.as_ref().unwrap().font_size, Some(16.0));
    }
}
