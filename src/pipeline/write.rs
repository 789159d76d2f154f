//! Output emission: rendered pages → PNG files and image-backed PDFs.
//!
//! PNGs are written straight from the rendered image. The PDF side re-embeds
//! the same pixels as a full-page image XObject: the page box is sized to
//! `pixels / dpi` inches, and the image is placed at the configured DPI, so
//! the single-page PDF prints at exactly the physical size of the source
//! page. Building the XObject from raw RGB8 (rather than handing printpdf an
//! encoded image) keeps this crate's image version independent of printpdf's.
//!
//! Files are overwritten silently when they already exist — re-running a
//! batch is the normal way to correct a guest list.

use crate::error::Pdf2NamedError;
use image::DynamicImage;
use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Px,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

const MM_PER_INCH: f64 = 25.4;

/// Compose the output filename for one (page, name) pair.
pub fn paired_filename(page_num: usize, name: &str, ext: &str) -> String {
    format!("{page_num}_{name}.{ext}")
}

/// Create an output directory, parents included.
pub fn ensure_dir(dir: &Path) -> Result<(), Pdf2NamedError> {
    std::fs::create_dir_all(dir).map_err(|e| Pdf2NamedError::OutputDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Pixel extent at the given DPI, in millimetres.
fn px_to_mm(px: u32, dpi: u32) -> f64 {
    px as f64 / dpi as f64 * MM_PER_INCH
}

/// Write one rendered page as a PNG file.
pub fn write_png(
    page_num: usize,
    img: &DynamicImage,
    path: &Path,
) -> Result<(), Pdf2NamedError> {
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| Pdf2NamedError::PngWriteFailed {
            page: page_num,
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    debug!("Wrote PNG {}", path.display());
    Ok(())
}

/// Place one page image onto a layer, filling the page at the given DPI.
fn place_page_image(layer: PdfLayerReference, img: &DynamicImage, dpi: u32) {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let xobject = ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: rgb.into_raw(),
        image_filter: None,
        clipping_bbox: None,
    };

    Image::from(xobject).add_to_layer(
        layer,
        ImageTransform {
            dpi: Some(dpi as f32),
            ..ImageTransform::default()
        },
    );
}

/// Serialise a finished document to disk.
fn save_document(doc: PdfDocumentReference, path: &Path) -> Result<(), Pdf2NamedError> {
    let file = File::create(path).map_err(|e| Pdf2NamedError::PdfWriteFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| Pdf2NamedError::PdfWriteFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
}

/// Write one rendered page as a single-page, image-backed PDF.
pub fn write_single_page_pdf(
    img: &DynamicImage,
    dpi: u32,
    path: &Path,
    title: &str,
) -> Result<(), Pdf2NamedError> {
    let width_mm = px_to_mm(img.width(), dpi);
    let height_mm = px_to_mm(img.height(), dpi);

    let (doc, page_idx, layer_idx) =
        PdfDocument::new(title, Mm(width_mm as f32), Mm(height_mm as f32), "page");
    place_page_image(doc.get_page(page_idx).get_layer(layer_idx), img, dpi);

    save_document(doc, path)?;
    debug!("Wrote single-page PDF {}", path.display());
    Ok(())
}

/// Combine all rendered pages into one multi-page, image-backed PDF.
///
/// Pages keep their individual dimensions; a mixed portrait/landscape range
/// produces a mixed-orientation document.
pub fn write_merged_pdf(
    pages: &[(usize, DynamicImage)],
    dpi: u32,
    path: &Path,
    title: &str,
) -> Result<(), Pdf2NamedError> {
    let Some(((_, first_img), rest)) = pages.split_first() else {
        return Err(Pdf2NamedError::Internal(
            "merged PDF requested but no pages were rendered".into(),
        ));
    };

    let (doc, page_idx, layer_idx) = PdfDocument::new(
        title,
        Mm(px_to_mm(first_img.width(), dpi) as f32),
        Mm(px_to_mm(first_img.height(), dpi) as f32),
        "page 1",
    );
    place_page_image(doc.get_page(page_idx).get_layer(layer_idx), first_img, dpi);

    for (page_num, img) in rest {
        let (page_idx, layer_idx) = doc.add_page(
            Mm(px_to_mm(img.width(), dpi) as f32),
            Mm(px_to_mm(img.height(), dpi) as f32),
            format!("page {page_num}"),
        );
        place_page_image(doc.get_page(page_idx).get_layer(layer_idx), img, dpi);
    }

    save_document(doc, path)?;
    debug!("Wrote merged PDF {} ({} pages)", path.display(), pages.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid_page(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 40, 40, 255])))
    }

    #[test]
    fn paired_filename_format() {
        assert_eq!(paired_filename(1, "Nguyen_Van_A", "png"), "1_Nguyen_Van_A.png");
        assert_eq!(paired_filename(25, "untitled", "pdf"), "25_untitled.pdf");
    }

    #[test]
    fn px_to_mm_round_trips_an_a4_page() {
        // A4 at 300 DPI is 2480 px wide; back to mm should be ~210.
        let mm = px_to_mm(2480, 300);
        assert!((mm - 210.0).abs() < 0.5, "got {mm}");
    }

    #[test]
    fn png_lands_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("1_test.png");

        write_png(1, &solid_page(40, 60), &path).expect("write must succeed");

        let bytes = std::fs::read(&path).expect("read back");
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn png_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("does/not/exist/1_test.png");

        let err = write_png(1, &solid_page(10, 10), &path).unwrap_err();
        assert!(matches!(err, Pdf2NamedError::PngWriteFailed { page: 1, .. }));
    }

    #[test]
    fn single_page_pdf_has_pdf_magic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("1_test.pdf");

        write_single_page_pdf(&solid_page(40, 60), 300, &path, "1_test").expect("write");

        let bytes = std::fs::read(&path).expect("read back");
        assert_eq!(&bytes[..4], b"%PDF");
    }

    #[test]
    fn merged_pdf_accepts_multiple_pages() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("merged.pdf");

        let pages = vec![
            (1usize, solid_page(40, 60)),
            (2usize, solid_page(60, 40)), // landscape second page
            (3usize, solid_page(40, 60)),
        ];
        write_merged_pdf(&pages, 300, &path, "merged").expect("write");

        let bytes = std::fs::read(&path).expect("read back");
        assert_eq!(&bytes[..4], b"%PDF");
        // A merged 3-pager must outweigh a single page of the same pixels.
        let single = dir.path().join("single.pdf");
        write_single_page_pdf(&solid_page(40, 60), 300, &single, "single").expect("write");
        assert!(bytes.len() > std::fs::read(&single).expect("read").len());
    }

    #[test]
    fn merged_pdf_with_no_pages_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("merged.pdf");

        let err = write_merged_pdf(&[], 300, &path, "merged").unwrap_err();
        assert!(matches!(err, Pdf2NamedError::Internal(_)));
        assert!(!path.exists());
    }

    #[test]
    fn ensure_dir_creates_parents_and_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a/b/c");

        ensure_dir(&nested).expect("first create");
        ensure_dir(&nested).expect("second create is fine");
        assert!(nested.is_dir());
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("1_test.png");
        std::fs::write(&path, b"stale").expect("seed");

        write_png(1, &solid_page(10, 10), &path).expect("overwrite");
        let bytes = std::fs::read(&path).expect("read back");
        assert_ne!(bytes, b"stale");
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
