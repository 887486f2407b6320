use calamine::{Data, Range, Reader, open_workbook_auto};
use deadcell_scanner::Cell;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("failed to open workbook: {0}")]
    Open(#[from] calamine::Error),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("sheet '{0}' contains no data")]
    EmptySheet(String),
}

/// The occupied cells of one worksheet, in row-major order, with absolute
/// zero-based coordinates. Built once by the loader and read-only after.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    sheet: String,
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl SheetGrid {
    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    /// Occupied rectangular bounds as (row count, column count).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.row == row && cell.col == col)
            .map(|cell| cell.value.as_str())
    }
}

/// Load one sheet of a workbook into a grid.
///
/// `sheet` selects a sheet by name; `None` takes the first sheet, which is
/// what spreadsheet users mean almost every time. The loader accepts any
/// format calamine auto-detects (xlsx, xls, xlsb, ods).
pub fn load_grid(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<SheetGrid, WorkbookError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_owned();

    let name = match sheet {
        Some(requested) => sheet_names
            .iter()
            .find(|name| name.as_str() == requested)
            .cloned()
            .ok_or_else(|| WorkbookError::SheetNotFound(requested.to_string()))?,
        None => sheet_names.first().cloned().ok_or(WorkbookError::NoSheets)?,
    };

    debug!("Reading sheet '{}' from {}", name, path.display());
    let range = workbook.worksheet_range(&name)?;
    grid_from_range(&name, &range)
}

/// Convert a calamine range into a grid of occupied cells.
///
/// Range iterators yield coordinates relative to `range.start()`, so the
/// start offset is added back to keep addresses absolute.
pub fn grid_from_range(sheet: &str, range: &Range<Data>) -> Result<SheetGrid, WorkbookError> {
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));

    let mut cells: Vec<Cell> = range
        .used_cells()
        .filter_map(|(row, col, data)| {
            cell_text(data).map(|value| Cell::new(row_offset + row, col_offset + col, value))
        })
        .collect();

    if cells.is_empty() {
        return Err(WorkbookError::EmptySheet(sheet.to_string()));
    }

    cells.sort_by_key(|cell| (cell.row, cell.col));
    let rows = cells.iter().map(|cell| cell.row).max().unwrap_or(0) + 1;
    let cols = cells.iter().map(|cell| cell.col).max().unwrap_or(0) + 1;

    Ok(SheetGrid {
        sheet: sheet.to_string(),
        rows,
        cols,
        cells,
    })
}

/// Render a cell as the text a spreadsheet user would read in it.
/// Error cells and empty cells are not occupied for our purposes.
fn cell_text(data: &Data) -> Option<String> {
    match data {
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) | Data::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_range() -> Range<Data> {
        let mut range = Range::new((0, 0), (3, 3));
        range.set_value((0, 0), Data::String("https://example.com/".to_string()));
        range.set_value((1, 1), Data::Float(42.0));
        range.set_value((2, 2), Data::String("plain text".to_string()));
        range.set_value((3, 0), Data::Bool(true));
        range
    }

    #[test]
    fn test_grid_from_range_collects_occupied_cells() {
        let grid = grid_from_range("Sheet1", &sample_range()).unwrap();

        assert_eq!(grid.sheet_name(), "Sheet1");
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.cells().len(), 4);
        assert_eq!(grid.cell_at(0, 0), Some("https://example.com/"));
        assert_eq!(grid.cell_at(1, 1), Some("42"));
        assert_eq!(grid.cell_at(3, 0), Some("true"));
        assert_eq!(grid.cell_at(0, 1), None);
    }

    #[test]
    fn test_grid_cells_are_row_major() {
        let grid = grid_from_range("Sheet1", &sample_range()).unwrap();
        let coords: Vec<(usize, usize)> = grid
            .cells()
            .iter()
            .map(|cell| (cell.row, cell.col))
            .collect();
        assert_eq!(coords, vec![(0, 0), (1, 1), (2, 2), (3, 0)]);
    }

    #[test]
    fn test_range_offset_keeps_absolute_coordinates() {
        // A sheet whose data starts at C3 rather than A1.
        let mut range = Range::new((2, 2), (2, 3));
        range.set_value((2, 2), Data::String("https://example.com/".to_string()));
        range.set_value((2, 3), Data::String("x".to_string()));

        let grid = grid_from_range("Offset", &range).unwrap();
        assert_eq!(grid.cell_at(2, 2), Some("https://example.com/"));
        assert_eq!(grid.cells()[0].address(), "C3");
    }

    #[test]
    fn test_empty_range_is_an_input_error() {
        let range: Range<Data> = Range::new((0, 0), (2, 2));
        let err = grid_from_range("Blank", &range).unwrap_err();
        assert!(matches!(err, WorkbookError::EmptySheet(name) if name == "Blank"));
    }

    #[test]
    fn test_numeric_cells_render_like_display_text() {
        let mut range = Range::new((0, 0), (0, 2));
        range.set_value((0, 0), Data::Int(7));
        range.set_value((0, 1), Data::Float(2.5));
        range.set_value((0, 2), Data::Float(3.0));

        let grid = grid_from_range("Numbers", &range).unwrap();
        assert_eq!(grid.cell_at(0, 0), Some("7"));
        assert_eq!(grid.cell_at(0, 1), Some("2.5"));
        assert_eq!(grid.cell_at(0, 2), Some("3"));
    }

    #[test]
    fn test_error_cells_are_not_occupied() {
        let mut range = Range::new((0, 0), (0, 1));
        range.set_value((0, 0), Data::Error(calamine::CellErrorType::Div0));
        range.set_value((0, 1), Data::String("kept".to_string()));

        let grid = grid_from_range("Errors", &range).unwrap();
        assert_eq!(grid.cells().len(), 1);
        assert_eq!(grid.cell_at(0, 1), Some("kept"));
    }

    #[test]
    fn test_load_grid_rejects_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-workbook.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        assert!(matches!(
            load_grid(&path, None),
            Err(WorkbookError::Open(_))
        ));
    }

    #[test]
    fn test_load_grid_rejects_missing_file() {
        assert!(matches!(
            load_grid("/definitely/not/here.xlsx", None),
            Err(WorkbookError::Open(_))
        ));
    }
}
