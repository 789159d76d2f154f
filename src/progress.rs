//! Progress-callback trait for per-file run events.
//!
//! Inject an [`Arc<dyn RunProgressCallback>`] via
//! [`crate::config::RunConfigBuilder::progress_callback`] to receive events
//! as the pipeline renders pages and writes files.
//!
//! The pipeline is strictly sequential, so events always arrive in page
//! order and never concurrently. The trait is still `Send + Sync` so a
//! callback can be shared with other threads of the host application (a UI
//! thread polling a counter, for example).

use std::path::Path;
use std::sync::Arc;

/// Called by the run pipeline as it renders and writes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait RunProgressCallback: Send + Sync {
    /// Called once after pairing, before any file is written.
    ///
    /// # Arguments
    /// * `total_pairs` — number of (page, name) pairs that will be written
    fn on_run_start(&self, total_pairs: usize) {
        let _ = total_pairs;
    }

    /// Called when a page's PNG has been written.
    ///
    /// # Arguments
    /// * `page_num` — 1-based page number
    /// * `path`     — path of the file just written
    fn on_png_written(&self, page_num: usize, path: &Path) {
        let _ = (page_num, path);
    }

    /// Called when a page's single-page PDF has been written.
    fn on_pdf_written(&self, page_num: usize, path: &Path) {
        let _ = (page_num, path);
    }

    /// Called when the optional merged multi-page PDF has been written.
    fn on_merged_written(&self, path: &Path) {
        let _ = path;
    }

    /// Called once after all writes complete.
    ///
    /// # Arguments
    /// * `total_pairs` — pairs written (PNG + PDF each)
    fn on_run_complete(&self, total_pairs: usize) {
        let _ = total_pairs;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl RunProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::RunConfig`].
pub type ProgressCallback = Arc<dyn RunProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct TrackingCallback {
        pngs: AtomicUsize,
        pdfs: AtomicUsize,
        started_with: AtomicUsize,
        finished_with: AtomicUsize,
        last_path: Mutex<Option<PathBuf>>,
    }

    impl RunProgressCallback for TrackingCallback {
        fn on_run_start(&self, total_pairs: usize) {
            self.started_with.store(total_pairs, Ordering::SeqCst);
        }

        fn on_png_written(&self, _page_num: usize, path: &Path) {
            self.pngs.fetch_add(1, Ordering::SeqCst);
            *self.last_path.lock().unwrap() = Some(path.to_path_buf());
        }

        fn on_pdf_written(&self, _page_num: usize, _path: &Path) {
            self.pdfs.fetch_add(1, Ordering::SeqCst);
        }

        fn on_run_complete(&self, total_pairs: usize) {
            self.finished_with.store(total_pairs, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(25);
        cb.on_png_written(1, Path::new("images/1_a.png"));
        cb.on_pdf_written(1, Path::new("pdf/1_a.pdf"));
        cb.on_merged_written(Path::new("pdf/merged.pdf"));
        cb.on_run_complete(25);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            pngs: AtomicUsize::new(0),
            pdfs: AtomicUsize::new(0),
            started_with: AtomicUsize::new(0),
            finished_with: AtomicUsize::new(0),
            last_path: Mutex::new(None),
        };

        tracker.on_run_start(2);
        tracker.on_png_written(1, Path::new("images/1_a.png"));
        tracker.on_png_written(2, Path::new("images/2_b.png"));
        tracker.on_pdf_written(1, Path::new("pdf/1_a.pdf"));
        tracker.on_pdf_written(2, Path::new("pdf/2_b.pdf"));
        tracker.on_run_complete(2);

        assert_eq!(tracker.started_with.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.pngs.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.pdfs.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.finished_with.load(Ordering::SeqCst), 2);
        assert_eq!(
            tracker.last_path.lock().unwrap().as_deref(),
            Some(Path::new("images/2_b.png"))
        );
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn RunProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_run_start(10);
        cb.on_png_written(1, Path::new("x.png"));
    }
}
