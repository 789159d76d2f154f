//! Pipeline stages for the batch naming run.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch rendering backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ names ──▶ sanitize ─┐
//! (paths)  (calamine) (regex)   ├──▶ pair ──▶ write
//! input ──▶ render ─────────────┘    (zip)   (png + pdf)
//! (paths)  (pdfium)
//! ```
//!
//! 1. [`input`]    — validate the user-supplied PDF and workbook paths
//! 2. [`names`]    — extract one column slice of the guest list as raw text
//! 3. [`sanitize`] — normalise each raw name into a filesystem-safe token
//! 4. [`render`]   — rasterise the page range at the configured DPI
//! 5. [`write`]    — emit one PNG and one single-page PDF per pair, plus the
//!    optional merged document

pub mod input;
pub mod names;
pub mod render;
pub mod sanitize;
pub mod write;
