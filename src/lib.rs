//! # pdf2named
//!
//! Split a page range of a PDF into individually named PNG images and
//! single-page PDF files, with each name taken from a row of a spreadsheet
//! column.
//!
//! ## Why this crate?
//!
//! The motivating workflow is batch invitation letters: a designer exports
//! one PDF with one personalised page per guest, and the guest list lives in
//! a spreadsheet. Mailing the letters needs one file per guest, named after
//! the guest — not `page-17.png`. This crate pairs the rendered pages with
//! the spreadsheet rows positionally and writes both a PNG (for messaging
//! apps) and a single-page PDF (for printing) per guest.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF + workbook
//!  │
//!  ├─ 1. Input     validate paths and PDF magic bytes
//!  ├─ 2. Names     read one column slice of the guest list (calamine)
//!  ├─ 3. Sanitize  normalise each name into a filesystem-safe token
//!  ├─ 4. Render    rasterise the page range via pdfium at a fixed DPI
//!  ├─ 5. Pair      zip pages with names, truncated to the shorter list
//!  └─ 6. Write     {N}_{name}.png + {N}_{name}.pdf (+ optional merged PDF)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2named::{convert, RunConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Defaults: pages 1–25, column 2, rows 2–26, 300 DPI,
//!     // outputs under ./images and ./pdf.
//!     let config = RunConfig::default();
//!     let output = convert("invitations.pdf", "guests.xlsx", &config)?;
//!     eprintln!("wrote {} pairs", output.stats.pairs_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2named` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdf2named = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{NameColumn, PageRange, RunConfig, RunConfigBuilder};
pub use convert::{convert, inspect};
pub use error::Pdf2NamedError;
pub use output::{DocumentInfo, RunOutput, RunStats, WrittenPage};
pub use pipeline::sanitize::sanitize_name;
pub use progress::{NoopProgressCallback, ProgressCallback, RunProgressCallback};
