//! PDF rasterisation: render the selected page range to `DynamicImage`s.
//!
//! ## Why scale by DPI, not target width?
//!
//! The outputs here are print artifacts: a 300-DPI render of an A5 invitation
//! must come out at exactly A5 when the single-page PDF embeds it again at
//! the same DPI. Page dimensions in a PDF are expressed in points (1/72 in),
//! so a uniform `dpi / 72` scale factor reproduces every page at its true
//! physical size regardless of layout.
//!
//! The whole range is rendered before anything is written. That is safe
//! because the range is small for this workflow (tens of pages, not
//! thousands), and it keeps the write phase free of rendering failures.

use crate::config::PageRange;
use crate::error::Pdf2NamedError;
use crate::output::DocumentInfo;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Bind to the pdfium library and wrap binding failures in our error type.
fn bind_pdfium() -> Result<Pdfium, Pdf2NamedError> {
    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| Pdf2NamedError::PdfiumBindingFailed(e.to_string()))?;
    Ok(Pdfium::new(bindings))
}

/// Map a pdfium load error, distinguishing password problems from corruption.
fn map_load_error(e: PdfiumError, pdf_path: &Path, password: Option<&str>) -> Pdf2NamedError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if password.is_some() {
            Pdf2NamedError::WrongPassword {
                path: pdf_path.to_path_buf(),
            }
        } else {
            Pdf2NamedError::PasswordRequired {
                path: pdf_path.to_path_buf(),
            }
        }
    } else {
        Pdf2NamedError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: err_str,
        }
    }
}

/// Rasterise the 1-based inclusive page range of a PDF into images.
///
/// # Returns
/// A vector of `(page_number_1based, DynamicImage)` tuples in ascending page
/// order, one per page in the range.
///
/// # Errors
/// Fails when the document cannot be opened, when `range.last` exceeds the
/// document's page count, or when any page in the range fails to render.
pub fn render_range(
    pdf_path: &Path,
    range: PageRange,
    dpi: u32,
    password: Option<&str>,
) -> Result<Vec<(usize, DynamicImage)>, Pdf2NamedError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_file(pdf_path, password)
        .map_err(|e| map_load_error(e, pdf_path, password))?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages", total_pages);

    if range.last > total_pages {
        return Err(Pdf2NamedError::PageOutOfRange {
            page: range.last,
            total: total_pages,
        });
    }

    // Points are 1/72 in; scaling by dpi/72 yields exactly `dpi` pixels per inch.
    let scale = dpi as f32 / 72.0;
    let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);

    let mut results = Vec::with_capacity(range.count());

    for page_num in range.pages() {
        let idx = (page_num - 1) as u16;
        let page = pages
            .get(idx)
            .map_err(|e| Pdf2NamedError::RasterisationFailed {
                page: page_num,
                detail: format!("{:?}", e),
            })?;

        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            Pdf2NamedError::RasterisationFailed {
                page: page_num,
                detail: format!("{:?}", e),
            }
        })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px at {} DPI",
            page_num,
            image.width(),
            image.height(),
            dpi
        );

        results.push((page_num, image));
    }

    Ok(results)
}

/// Extract document facts from a PDF without rendering pages.
pub fn inspect_document(
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<DocumentInfo, Pdf2NamedError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_file(pdf_path, password)
        .map_err(|e| map_load_error(e, pdf_path, password))?;

    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentInfo {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}
