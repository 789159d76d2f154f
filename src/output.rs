//! Output records returned by a run.
//!
//! [`RunOutput`] is what [`crate::convert::convert`] hands back: one
//! [`WrittenPage`] per pair that reached disk, the optional merged-PDF path,
//! and a [`RunStats`] block with counts and per-stage timings. Everything
//! derives `Serialize`/`Deserialize` so the CLI can emit it as JSON and so a
//! run record can be archived alongside the outputs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One (page, name) pair that was written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenPage {
    /// 1-based page number in the source PDF.
    pub page_num: usize,
    /// The sanitized name the files were named after.
    pub name: String,
    /// Path of the PNG written for this page.
    pub png_path: PathBuf,
    /// Path of the single-page PDF written for this page.
    pub pdf_path: PathBuf,
}

/// Counters and timings for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Pages rasterised from the source PDF.
    pub pages_rendered: usize,
    /// Raw names read from the spreadsheet (before sanitizing).
    pub names_read: usize,
    /// Pairs written (each pair is one PNG and one PDF).
    pub pairs_written: usize,
    /// Elements dropped by positional truncation: excess pages when the name
    /// list was shorter, or excess names when the page range was shorter.
    pub truncated: usize,
    /// Wall-clock time spent rasterising, in milliseconds.
    pub render_duration_ms: u64,
    /// Wall-clock time spent writing files, in milliseconds.
    pub write_duration_ms: u64,
    /// Total run time, in milliseconds.
    pub total_duration_ms: u64,
}

/// The result of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    /// Every pair written, in ascending page order.
    pub written: Vec<WrittenPage>,
    /// Path of the merged multi-page PDF, when merging was enabled.
    pub merged_path: Option<PathBuf>,
    /// Counters and timings.
    pub stats: RunStats,
}

/// Document facts gathered without rendering, for `inspect` mode.
///
/// Lets the user check the page count against the guest list before
/// committing to a full run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document title from the PDF metadata dictionary, if present.
    pub title: Option<String>,
    /// Document author, if present.
    pub author: Option<String>,
    /// Producer application, if present.
    pub producer: Option<String>,
    /// Total number of pages.
    pub page_count: usize,
    /// PDF specification version, e.g. "Pdf17".
    pub pdf_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_output_round_trips_through_json() {
        let output = RunOutput {
            written: vec![WrittenPage {
                page_num: 1,
                name: "Nguyen_Van_A".into(),
                png_path: PathBuf::from("images/1_Nguyen_Van_A.png"),
                pdf_path: PathBuf::from("pdf/1_Nguyen_Van_A.pdf"),
            }],
            merged_path: None,
            stats: RunStats {
                pages_rendered: 1,
                names_read: 1,
                pairs_written: 1,
                ..RunStats::default()
            },
        };

        let json = serde_json::to_string_pretty(&output).expect("must serialise");
        let back: RunOutput = serde_json::from_str(&json).expect("must deserialise");
        assert_eq!(back.written.len(), 1);
        assert_eq!(back.written[0].name, "Nguyen_Van_A");
        assert_eq!(back.stats.pairs_written, 1);
    }
}
