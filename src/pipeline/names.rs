//! Name extraction: one spreadsheet column slice → ordered raw names.
//!
//! The guest list is a plain workbook with no schema: the sheet is read
//! headerless and one contiguous column slice is pulled out in row order.
//! Cells are coerced to their text representation whatever their type —
//! numbers, dates, and formula results all become strings, and a blank cell
//! inside the slice becomes the empty string (the sanitizer later maps that
//! to its fallback token).
//!
//! Rows beyond the sheet's last populated row are dropped rather than
//! coerced, so a 25-row request against a 21-row sheet yields 20 names.
//! That shortfall is what the positional pairing in [`crate::convert`]
//! truncates against. A column index beyond the sheet's populated width is
//! an error instead: it means the coordinates point at the wrong sheet
//! entirely, not at a short list.

use crate::config::NameColumn;
use crate::error::Pdf2NamedError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

/// Read the configured column slice as raw, unsanitized names.
///
/// Row order is preserved. The returned list may be shorter than
/// `selection.row_count()` when the sheet ends early, and is empty when the whole
/// slice lies beyond the sheet.
pub fn read_names(path: &Path, selection: &NameColumn) -> Result<Vec<String>, Pdf2NamedError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| Pdf2NamedError::WorkbookFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(selection.sheet)
        .ok_or_else(|| Pdf2NamedError::SheetMissing {
            path: path.to_path_buf(),
            sheet: selection.sheet,
        })?
        .map_err(|e| Pdf2NamedError::WorkbookFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    // Absolute sheet coordinates of the last populated cell. An empty sheet
    // has no extent at all, which makes any column out of range.
    let (end_row, end_col) = range.end().unwrap_or((0, 0));
    let populated_width = if range.is_empty() { 0 } else { end_col as usize + 1 };

    if selection.column >= populated_width {
        return Err(Pdf2NamedError::ColumnOutOfRange {
            sheet: selection.sheet,
            column: selection.column,
            width: populated_width,
        });
    }

    let mut names = Vec::with_capacity(selection.row_count());
    for row in selection.first_row..=selection.last_row {
        let abs_row = row.saturating_sub(1) as u32; // rows are 1-based in the config
        if abs_row > end_row {
            break;
        }
        let text = match range.get_value((abs_row, selection.column as u32)) {
            Some(Data::Empty) | None => String::new(),
            Some(value) => value.to_string(),
        };
        names.push(text);
    }

    debug!(
        "Read {} raw names from '{}' (sheet {}, column {}, rows {}-{})",
        names.len(),
        path.display(),
        selection.sheet,
        selection.column,
        selection.first_row,
        selection.last_row
    );

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NameColumn;

    // Workbook-backed coverage lives in tests/e2e.rs, gated on the fixture
    // file. Here we cover the failure paths that need no fixture.

    #[test]
    fn missing_workbook_is_an_error() {
        let err = read_names(
            Path::new("/definitely/not/a/workbook.xlsx"),
            &NameColumn::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Pdf2NamedError::WorkbookFailed { .. }));
    }

    #[test]
    fn garbage_file_is_a_workbook_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("not_a_sheet.xlsx");
        std::fs::write(&path, b"this is not a zip archive").expect("write");

        let err = read_names(&path, &NameColumn::default()).unwrap_err();
        assert!(matches!(err, Pdf2NamedError::WorkbookFailed { .. }), "got: {err}");
    }
}
