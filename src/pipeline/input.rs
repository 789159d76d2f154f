//! Input resolution: validate the user-supplied paths before work starts.
//!
//! pdfium's error for a wrong path is an opaque load failure, and calamine's
//! is a zip error — neither tells the user "you typed the path wrong".
//! Checking existence, readability, and (for the PDF) the `%PDF` magic bytes
//! up front turns both into precise, actionable errors before any rendering
//! state is created.

use crate::error::Pdf2NamedError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a local PDF path, validating existence and `%PDF` magic bytes.
pub fn resolve_pdf(path_str: &str) -> Result<PathBuf, Pdf2NamedError> {
    let path = PathBuf::from(path_str);

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(Pdf2NamedError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2NamedError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2NamedError::FileNotFound { path });
        }
    }

    debug!("Resolved PDF: {}", path.display());
    Ok(path)
}

/// Resolve a local workbook path, validating existence and readability.
///
/// Format validation is left to calamine: it reads xlsx, xls, and ods, and
/// sniffing all three container formats here would just duplicate it.
pub fn resolve_workbook(path_str: &str) -> Result<PathBuf, Pdf2NamedError> {
    let path = PathBuf::from(path_str);

    match std::fs::File::open(&path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2NamedError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2NamedError::FileNotFound { path });
        }
    }

    debug!("Resolved workbook: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_pdf_is_file_not_found() {
        let err = resolve_pdf("/no/such/file.pdf").unwrap_err();
        assert!(matches!(err, Pdf2NamedError::FileNotFound { .. }));
    }

    #[test]
    fn non_pdf_magic_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fake.pdf");
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(b"GIF89a not a pdf").expect("write");

        let err = resolve_pdf(path.to_str().unwrap()).unwrap_err();
        match err {
            Pdf2NamedError::NotAPdf { magic, .. } => assert_eq!(&magic, b"GIF8"),
            other => panic!("expected NotAPdf, got {other}"),
        }
    }

    #[test]
    fn valid_magic_resolves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ok.pdf");
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(b"%PDF-1.7\n%fake body").expect("write");

        let resolved = resolve_pdf(path.to_str().unwrap()).expect("must resolve");
        assert_eq!(resolved, path);
    }

    #[test]
    fn tiny_file_without_full_magic_resolves() {
        // A sub-4-byte file cannot be magic-checked; pdfium reports the
        // corruption instead.
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tiny.pdf");
        std::fs::write(&path, b"%P").expect("write");

        assert!(resolve_pdf(path.to_str().unwrap()).is_ok());
    }

    #[test]
    fn missing_workbook_is_file_not_found() {
        let err = resolve_workbook("/no/such/guests.xlsx").unwrap_err();
        assert!(matches!(err, Pdf2NamedError::FileNotFound { .. }));
    }
}
