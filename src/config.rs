//! Configuration types for a batch naming run.
//!
//! All run behaviour is controlled through [`RunConfig`], built via its
//! [`RunConfigBuilder`]. Keeping every knob in one struct makes it trivial to
//! log a run's parameters, share a config between the library and the CLI,
//! and diff two runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The script this tool replaced hardcoded its paths, page range, and
//! spreadsheet coordinates as literals. Here they are fields of one
//! configuration record with the same values as defaults, so the common
//! invocation stays a one-liner while every parameter remains overridable.

use crate::error::Pdf2NamedError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A 1-based inclusive page range.
///
/// `PageRange::new(1, 25)` selects pages 1 through 25. The range is validated
/// at config build time; whether it fits the actual document is checked when
/// the PDF is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// First page, 1-based inclusive.
    pub first: usize,
    /// Last page, 1-based inclusive.
    pub last: usize,
}

impl PageRange {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Number of pages selected.
    pub fn count(&self) -> usize {
        self.last.saturating_sub(self.first).saturating_add(1)
    }

    /// Iterate the selected 1-based page numbers in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        self.first..=self.last
    }

    fn validate(&self) -> Result<(), String> {
        if self.first < 1 {
            return Err(format!("pages are 1-indexed, got first page {}", self.first));
        }
        if self.first > self.last {
            return Err(format!(
                "first page {} is after last page {}",
                self.first, self.last
            ));
        }
        Ok(())
    }
}

impl Default for PageRange {
    /// The invitation-letter workflow default: pages 1–25.
    fn default() -> Self {
        Self { first: 1, last: 25 }
    }
}

/// Where raw names come from: one column slice of one worksheet.
///
/// The sheet is read headerless; `column` is 0-based while `first_row` and
/// `last_row` are 1-based inclusive, mirroring how the rows are numbered in a
/// spreadsheet application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameColumn {
    /// 0-based worksheet index within the workbook.
    pub sheet: usize,
    /// 0-based column index.
    pub column: usize,
    /// First row, 1-based inclusive.
    pub first_row: usize,
    /// Last row, 1-based inclusive.
    pub last_row: usize,
}

impl NameColumn {
    /// Number of rows selected (before clipping to the sheet's actual extent).
    pub fn row_count(&self) -> usize {
        self.last_row
            .saturating_sub(self.first_row)
            .saturating_add(1)
    }

    fn validate(&self) -> Result<(), String> {
        if self.first_row < 1 {
            return Err(format!("rows are 1-indexed, got first row {}", self.first_row));
        }
        if self.first_row > self.last_row {
            return Err(format!(
                "first row {} is after last row {}",
                self.first_row, self.last_row
            ));
        }
        Ok(())
    }
}

impl Default for NameColumn {
    /// The invitation-letter workflow default: column 3 (0-based index 2),
    /// rows 2–26, so page 1 pairs with row 2.
    fn default() -> Self {
        Self {
            sheet: 0,
            column: 2,
            first_row: 2,
            last_row: 26,
        }
    }
}

/// Configuration for a batch naming run.
///
/// Built via [`RunConfig::builder()`] or [`RunConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2named::{PageRange, RunConfig};
///
/// let config = RunConfig::builder()
///     .pages(PageRange::new(1, 10))
///     .dpi(300)
///     .image_dir("./images")
///     .pdf_dir("./pdf")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct RunConfig {
    /// Page range to rasterise. Default: 1–25.
    pub pages: PageRange,

    /// Spreadsheet coordinates of the name column. Default: sheet 0,
    /// column 2, rows 2–26.
    pub names: NameColumn,

    /// Rendering DPI applied uniformly to all pages. Range: 72–600. Default: 300.
    ///
    /// 300 DPI is print quality: an A4 page renders to roughly
    /// 2480 × 3508 px (~35 MB of RGBA pixels). The full page range is held in
    /// memory at once, so very large ranges at high DPI add up quickly.
    pub dpi: u32,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Directory for the per-page PNG files (created if absent). Default: `./images`.
    pub image_dir: PathBuf,

    /// Directory for the per-page single-page PDFs (created if absent). Default: `./pdf`.
    pub pdf_dir: PathBuf,

    /// Base filename stem for the optional merged multi-page PDF.
    ///
    /// `None` (the default) disables merging. `Some("ThuMoi")` writes
    /// `ThuMoi_merged_{YYYYmmdd_HHMMSS}.pdf` into `pdf_dir` after the
    /// per-page outputs.
    pub merged_stem: Option<String>,

    /// Progress callback invoked as pages are rendered and written.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pages: PageRange::default(),
            names: NameColumn::default(),
            dpi: 300,
            password: None,
            image_dir: PathBuf::from("./images"),
            pdf_dir: PathBuf::from("./pdf"),
            merged_stem: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("pages", &self.pages)
            .field("names", &self.names)
            .field("dpi", &self.dpi)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("image_dir", &self.image_dir)
            .field("pdf_dir", &self.pdf_dir)
            .field("merged_stem", &self.merged_stem)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn RunProgressCallback>"),
            )
            .finish()
    }
}

impl RunConfig {
    /// Create a new builder for `RunConfig`.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn pages(mut self, pages: PageRange) -> Self {
        self.config.pages = pages;
        self
    }

    pub fn names(mut self, names: NameColumn) -> Self {
        self.config.names = names;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 600);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.image_dir = dir.into();
        self
    }

    pub fn pdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdf_dir = dir.into();
        self
    }

    pub fn merged_stem(mut self, stem: impl Into<String>) -> Self {
        self.config.merged_stem = Some(stem.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RunConfig, Pdf2NamedError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 600 {
            return Err(Pdf2NamedError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        c.pages
            .validate()
            .map_err(Pdf2NamedError::InvalidConfig)?;
        c.names
            .validate()
            .map_err(Pdf2NamedError::InvalidConfig)?;
        if let Some(ref stem) = c.merged_stem {
            if stem.is_empty() {
                return Err(Pdf2NamedError::InvalidConfig(
                    "merged_stem must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_workflow_constants() {
        let c = RunConfig::default();
        assert_eq!(c.pages, PageRange::new(1, 25));
        assert_eq!(c.names.column, 2);
        assert_eq!(c.names.first_row, 2);
        assert_eq!(c.names.last_row, 26);
        assert_eq!(c.dpi, 300);
        assert_eq!(c.image_dir, PathBuf::from("./images"));
        assert_eq!(c.pdf_dir, PathBuf::from("./pdf"));
        assert!(c.merged_stem.is_none());
    }

    #[test]
    fn page_range_count_and_iteration() {
        let r = PageRange::new(1, 25);
        assert_eq!(r.count(), 25);
        let pages: Vec<usize> = r.pages().collect();
        assert_eq!(pages.first(), Some(&1));
        assert_eq!(pages.last(), Some(&25));

        assert_eq!(PageRange::new(3, 3).count(), 1);
    }

    #[test]
    fn inverted_page_range_is_rejected() {
        let err = RunConfig::builder()
            .pages(PageRange::new(10, 2))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("after last page"));
    }

    #[test]
    fn zero_first_page_is_rejected() {
        let err = RunConfig::builder()
            .pages(PageRange::new(0, 5))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("1-indexed"));
    }

    #[test]
    fn inverted_row_range_is_rejected() {
        let names = NameColumn {
            first_row: 26,
            last_row: 2,
            ..NameColumn::default()
        };
        let err = RunConfig::builder().names(names).build().unwrap_err();
        assert!(err.to_string().contains("after last row"));
    }

    #[test]
    fn dpi_is_clamped_by_the_setter() {
        let c = RunConfig::builder().dpi(10_000).build().unwrap();
        assert_eq!(c.dpi, 600);
        let c = RunConfig::builder().dpi(1).build().unwrap();
        assert_eq!(c.dpi, 72);
    }

    #[test]
    fn empty_merged_stem_is_rejected() {
        let err = RunConfig::builder().merged_stem("").build().unwrap_err();
        assert!(err.to_string().contains("merged_stem"));
    }

    #[test]
    fn name_column_row_count() {
        assert_eq!(NameColumn::default().row_count(), 25);
    }
}
