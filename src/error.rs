//! Error types for the pdf2named library.
//!
//! Every failure in this pipeline is fatal to the run: a missing input, a
//! bad spreadsheet coordinate, a corrupt PDF, or an unwritable output
//! directory all abort before (or mid-way through) the write phase, and the
//! partial outputs already on disk are left as-is. [`Pdf2NamedError`] is the
//! single taxonomy for all of them.
//!
//! The one non-error soft path — the page list and the name list having
//! different lengths — is by design not represented here. It is a silent
//! positional truncation recorded in [`crate::output::RunStats`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2named library.
#[derive(Debug, Error)]
pub enum Pdf2NamedError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Spreadsheet errors ────────────────────────────────────────────────
    /// The workbook could not be opened or parsed.
    #[error("Failed to read workbook '{path}': {detail}")]
    WorkbookFailed { path: PathBuf, detail: String },

    /// The requested worksheet index does not exist in the workbook.
    #[error("Workbook '{path}' has no worksheet at index {sheet}")]
    SheetMissing { path: PathBuf, sheet: usize },

    /// The requested column index lies beyond the sheet's populated width.
    #[error("Column {column} is out of range for worksheet {sheet} (sheet has {width} populated columns)")]
    ColumnOutOfRange {
        sheet: usize,
        column: usize,
        width: usize,
    },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// Selected page numbers exceed the actual page count.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create an output directory.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding or writing failed for a page.
    #[error("Failed to write PNG for page {page} to '{path}': {detail}")]
    PngWriteFailed {
        page: usize,
        path: PathBuf,
        detail: String,
    },

    /// Single-page or merged PDF emission failed.
    #[error("Failed to write PDF '{path}': {detail}")]
    PdfWriteFailed { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install the pdfium shared library for your platform, or point\n\
PDFIUM_DYNAMIC_LIB_PATH at the directory containing an existing copy.\n\
Prebuilt binaries: https://github.com/bblanchon/pdfium-binaries\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
