//! Tab-delimited rendering of the printable rectangle

use tabula_core::Position;

use crate::cell::Cell;
use crate::sheet::Sheet;

pub(crate) fn values_string(sheet: &Sheet) -> String {
    render(sheet, |cell| cell.value(sheet).to_string())
}

pub(crate) fn texts_string(sheet: &Sheet) -> String {
    render(sheet, Cell::text)
}

/// Row-major walk of the bounding rectangle: `\t` between columns, `\n`
/// after every row, absent cells as empty strings
fn render(sheet: &Sheet, cell_text: impl Fn(&Cell) -> String) -> String {
    let size = sheet.printable_size();
    let mut out = String::new();

    for row in 0..size.rows {
        for col in 0..size.cols {
            if col > 0 {
                out.push('\t');
            }
            if let Some(cell) = sheet.cell_at(Position::new(row, col)) {
                out.push_str(&cell_text(cell));
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_values() {
        let mut sheet = Sheet::new();
        sheet.set("A1", "1").unwrap();
        sheet.set("B1", "=1+2").unwrap();
        sheet.set("A2", "'=text").unwrap();

        assert_eq!(sheet.print_values(), "1\t3\n=text\t\n");
    }

    #[test]
    fn test_print_texts() {
        let mut sheet = Sheet::new();
        sheet.set("A1", "1").unwrap();
        sheet.set("B1", "= 1 + 2").unwrap();
        sheet.set("A2", "'=text").unwrap();

        assert_eq!(sheet.print_texts(), "1\t=1+2\n'=text\t\n");
    }

    #[test]
    fn test_print_empty_sheet() {
        let sheet = Sheet::new();
        assert_eq!(sheet.print_values(), "");
        assert_eq!(sheet.print_texts(), "");
    }

    #[test]
    fn test_print_skips_nothing_inside_rectangle() {
        let mut sheet = Sheet::new();
        sheet.set("C2", "x").unwrap();

        // Two rows and three columns, everything but C2 blank
        assert_eq!(sheet.print_values(), "\t\t\n\t\tx\n");
    }

    #[test]
    fn test_write_values() {
        let mut sheet = Sheet::new();
        sheet.set("A1", "7").unwrap();

        let mut buf = Vec::new();
        sheet.write_values(&mut buf).unwrap();
        assert_eq!(buf, b"7\n");
    }
}
