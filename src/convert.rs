//! Run entry points: pair rendered pages with sanitized names and write them.
//!
//! The pipeline is one strictly forward pass — read names, sanitize, render,
//! pair, write — with no stage depending on a later one. Everything the run
//! produces is described by the returned [`RunOutput`]; everything it needs
//! is in the [`RunConfig`] plus the two input paths.
//!
//! Pairing is positional: page `first` pairs with the first name row, and
//! the longer of the two sequences is truncated to the shorter. The
//! invitation workflow relies on this when the guest list is shorter than
//! the page range, so truncation is not an error here; it is counted in
//! [`RunStats`] and surfaced as a `warn!` diagnostic.

use crate::config::RunConfig;
use crate::error::Pdf2NamedError;
use crate::output::{DocumentInfo, RunOutput, RunStats, WrittenPage};
use crate::pipeline::{input, names, render, sanitize, write};
use image::DynamicImage;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// One (page, image, name) triple ready to be written.
type Pair = (usize, DynamicImage, String);

/// Convert a page range of a PDF into named PNGs and single-page PDFs.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `pdf_input`      — path to the source PDF
/// * `workbook_input` — path to the spreadsheet holding the name column
/// * `config`         — run configuration
///
/// # Errors
/// Any I/O, parse, or rendering failure is fatal and aborts the run;
/// outputs already written stay on disk.
pub fn convert(
    pdf_input: impl AsRef<str>,
    workbook_input: impl AsRef<str>,
    config: &RunConfig,
) -> Result<RunOutput, Pdf2NamedError> {
    let total_start = Instant::now();
    let pdf_input = pdf_input.as_ref();
    let workbook_input = workbook_input.as_ref();
    info!("Starting run: '{}' named from '{}'", pdf_input, workbook_input);

    // ── Step 1: Resolve inputs ───────────────────────────────────────────
    let pdf_path = input::resolve_pdf(pdf_input)?;
    let workbook_path = input::resolve_workbook(workbook_input)?;

    // ── Step 2: Read and sanitize names ──────────────────────────────────
    let raw_names = names::read_names(&workbook_path, &config.names)?;
    let sanitized: Vec<String> = raw_names.iter().map(|raw| sanitize::sanitize_name(raw)).collect();
    debug!("Sanitized {} names", sanitized.len());

    // ── Step 3: Rasterise the page range ─────────────────────────────────
    let render_start = Instant::now();
    let pages = render::render_range(
        &pdf_path,
        config.pages,
        config.dpi,
        config.password.as_deref(),
    )?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    info!("Rendered {} pages in {}ms", pages.len(), render_duration_ms);

    // ── Step 4: Pair positionally, truncating to the shorter list ────────
    let pages_rendered = pages.len();
    let names_read = sanitized.len();
    let (pairs, truncated) = pair_by_position(pages, sanitized);
    if truncated > 0 {
        warn!(
            "Page count ({}) and name count ({}) differ; writing {} pairs, dropping {}",
            pages_rendered,
            names_read,
            pairs.len(),
            truncated
        );
    }

    // ── Step 5: Write outputs ────────────────────────────────────────────
    let write_start = Instant::now();
    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(pairs.len());
    }
    let (written, merged_path) = write_outputs(&pairs, config)?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(written.len());
    }
    let write_duration_ms = write_start.elapsed().as_millis() as u64;

    let stats = RunStats {
        pages_rendered,
        names_read,
        pairs_written: written.len(),
        truncated,
        render_duration_ms,
        write_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Run complete: {} pairs written in {}ms",
        stats.pairs_written, stats.total_duration_ms
    );

    Ok(RunOutput {
        written,
        merged_path,
        stats,
    })
}

/// Gather document facts without rendering or writing anything.
///
/// Useful for checking the page count against the guest list before a run.
pub fn inspect(
    pdf_input: impl AsRef<str>,
    password: Option<&str>,
) -> Result<DocumentInfo, Pdf2NamedError> {
    let pdf_path = input::resolve_pdf(pdf_input.as_ref())?;
    render::inspect_document(&pdf_path, password)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Zip pages with names by position, truncating to the shorter sequence.
///
/// Returns the pairs and the number of elements dropped from the longer
/// side. Order is preserved.
fn pair_by_position(
    pages: Vec<(usize, DynamicImage)>,
    names: Vec<String>,
) -> (Vec<Pair>, usize) {
    let truncated = pages.len().abs_diff(names.len());
    let pairs = pages
        .into_iter()
        .zip(names)
        .map(|((page_num, img), name)| (page_num, img, name))
        .collect();
    (pairs, truncated)
}

/// Write the PNG pass, then the single-page-PDF pass, then the optional
/// merged document. Both per-page passes run in ascending page order.
fn write_outputs(
    pairs: &[Pair],
    config: &RunConfig,
) -> Result<(Vec<WrittenPage>, Option<PathBuf>), Pdf2NamedError> {
    write::ensure_dir(&config.image_dir)?;
    write::ensure_dir(&config.pdf_dir)?;

    let mut written = Vec::with_capacity(pairs.len());

    for (page_num, img, name) in pairs {
        let png_path = config
            .image_dir
            .join(write::paired_filename(*page_num, name, "png"));
        write::write_png(*page_num, img, &png_path)?;
        if let Some(ref cb) = config.progress_callback {
            cb.on_png_written(*page_num, &png_path);
        }
        written.push(WrittenPage {
            page_num: *page_num,
            name: name.clone(),
            png_path,
            pdf_path: PathBuf::new(), // filled by the PDF pass below
        });
    }

    for (record, (page_num, img, name)) in written.iter_mut().zip(pairs) {
        let pdf_path = config
            .pdf_dir
            .join(write::paired_filename(*page_num, name, "pdf"));
        let title = format!("{page_num}_{name}");
        write::write_single_page_pdf(img, config.dpi, &pdf_path, &title)?;
        if let Some(ref cb) = config.progress_callback {
            cb.on_pdf_written(*page_num, &pdf_path);
        }
        record.pdf_path = pdf_path;
    }

    let merged_path = match config.merged_stem {
        Some(ref stem) if !pairs.is_empty() => {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let path = config.pdf_dir.join(format!("{stem}_merged_{timestamp}.pdf"));
            let images: Vec<(usize, DynamicImage)> = pairs
                .iter()
                .map(|(page_num, img, _)| (*page_num, img.clone()))
                .collect();
            write::write_merged_pdf(&images, config.dpi, &path, stem)?;
            if let Some(ref cb) = config.progress_callback {
                cb.on_merged_written(&path);
            }
            Some(path)
        }
        Some(_) => {
            warn!("Merged PDF requested but no pairs were written; skipping");
            None
        }
        None => None,
    };

    Ok((written, merged_path))
}
