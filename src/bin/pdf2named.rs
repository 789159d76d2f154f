//! CLI binary for pdf2named.
//!
//! A thin shim over the library crate that maps CLI flags to `RunConfig`
//! and prints per-file progress notices.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2named::{
    convert, inspect, NameColumn, PageRange, ProgressCallback, RunConfig, RunProgressCallback,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback ────────────────────────────────────────────────────

/// Terminal progress: one `[OK]` line per file written, optionally under a
/// live indicatif bar. Two writes happen per pair (PNG pass, then PDF pass),
/// so the bar length is twice the pair count.
struct CliProgress {
    bar: Option<ProgressBar>,
}

impl CliProgress {
    fn with_bar() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Writing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar: Some(bar) })
    }

    fn plain() -> Arc<Self> {
        Arc::new(Self { bar: None })
    }

    fn notice(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }

    fn tick(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }
}

impl RunProgressCallback for CliProgress {
    fn on_run_start(&self, total_pairs: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length((total_pairs * 2) as u64);
        }
    }

    fn on_png_written(&self, page_num: usize, path: &Path) {
        self.notice(format!("[OK] Saved PNG p{page_num}: {}", path.display()));
        self.tick();
    }

    fn on_pdf_written(&self, page_num: usize, path: &Path) {
        self.notice(format!(
            "[OK] Saved single-page PDF p{page_num}: {}",
            path.display()
        ));
        self.tick();
    }

    fn on_merged_written(&self, path: &Path) {
        self.notice(format!("[OK] Merged single PDF: {}", path.display()));
    }

    fn on_run_complete(&self, _total_pairs: usize) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # The stock invitation-letter run: pages 1-25 named from column 3,
  # rows 2-26 of the guest list, at 300 DPI, into ./images and ./pdf
  pdf2named invitations.pdf guests.xlsx

  # A different slice of the sheet
  pdf2named --first-page 1 --last-page 40 --column 1 --first-row 2 --last-row 41 deck.pdf list.xlsx

  # Screen-resolution previews into custom directories
  pdf2named --dpi 96 --images-dir ./previews --pdf-dir ./previews invitations.pdf guests.xlsx

  # Additionally combine all pages into one timestamped PDF
  pdf2named --merge invitations.pdf guests.xlsx

  # Check the page count against the guest list first (no rendering)
  pdf2named --inspect-only invitations.pdf guests.xlsx

  # Machine-readable run record
  pdf2named --json invitations.pdf guests.xlsx > run.json

OUTPUT NAMING:
  images/{N}_{name}.png     one per page, N = 1-based page number
  pdf/{N}_{name}.pdf        same page as a single-page PDF
  pdf/{stem}_merged_{timestamp}.pdf   only with --merge

  Names are sanitized: forbidden characters and whitespace runs become
  single underscores, length is capped at 120 chars, and an empty cell
  becomes "untitled". Existing files are overwritten silently.

PAIRING:
  Page {first-page} pairs with row {first-row}. When the page range and the
  name rows disagree in length, the longer side is truncated to the shorter
  and the run still succeeds; the summary reports the dropped count.

SETUP:
  The pdfium shared library must be loadable at runtime. Prebuilt binaries:
  https://github.com/bblanchon/pdfium-binaries — set PDFIUM_DYNAMIC_LIB_PATH
  if it is not on the default search path.
"#;

/// Split a PDF into named page images and single-page PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2named",
    version,
    about = "Split a PDF into named page images and single-page PDFs",
    long_about = "Rasterise a page range of a PDF and write one PNG and one single-page PDF per \
page, each named from the matching row of a spreadsheet column (xlsx, xls, or ods).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Source PDF file.
    pdf: String,

    /// Workbook holding the name column (xlsx, xls, or ods).
    workbook: String,

    /// First page to render (1-based, inclusive).
    #[arg(long, env = "PDF2NAMED_FIRST_PAGE", default_value_t = 1)]
    first_page: usize,

    /// Last page to render (1-based, inclusive).
    #[arg(long, env = "PDF2NAMED_LAST_PAGE", default_value_t = 25)]
    last_page: usize,

    /// Worksheet index within the workbook (0-based).
    #[arg(long, env = "PDF2NAMED_SHEET", default_value_t = 0)]
    sheet: usize,

    /// Name column index (0-based).
    #[arg(long, env = "PDF2NAMED_COLUMN", default_value_t = 2)]
    column: usize,

    /// First name row (1-based, inclusive); pairs with --first-page.
    #[arg(long, env = "PDF2NAMED_FIRST_ROW", default_value_t = 2)]
    first_row: usize,

    /// Last name row (1-based, inclusive).
    #[arg(long, env = "PDF2NAMED_LAST_ROW", default_value_t = 26)]
    last_row: usize,

    /// Rendering DPI (72–600).
    #[arg(long, env = "PDF2NAMED_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// Directory for the PNG outputs.
    #[arg(long, env = "PDF2NAMED_IMAGES_DIR", default_value = "./images")]
    images_dir: PathBuf,

    /// Directory for the single-page PDF outputs.
    #[arg(long, env = "PDF2NAMED_PDF_DIR", default_value = "./pdf")]
    pdf_dir: PathBuf,

    /// Also combine all rendered pages into one timestamped multi-page PDF.
    #[arg(long, env = "PDF2NAMED_MERGE")]
    merge: bool,

    /// Filename stem for the merged PDF (default: the source PDF's stem).
    #[arg(long, env = "PDF2NAMED_MERGE_STEM", requires = "merge")]
    merge_stem: Option<String>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2NAMED_PASSWORD")]
    password: Option<String>,

    /// Output a structured JSON run record instead of progress lines.
    #[arg(long, env = "PDF2NAMED_JSON")]
    json: bool,

    /// Disable the progress bar (the [OK] lines still print).
    #[arg(long, env = "PDF2NAMED_NO_PROGRESS")]
    no_progress: bool,

    /// Print PDF facts only, no rendering or writing.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2NAMED_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2NAMED_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The [OK] notices are the user-facing feedback; keep library logs at
    // error level unless the user asks for more.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let info = inspect(&cli.pdf, cli.password.as_deref()).context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialise info")?
            );
        } else {
            println!("File:         {}", cli.pdf);
            if let Some(ref t) = info.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = info.author {
                println!("Author:       {}", a);
            }
            println!("Pages:        {}", info.page_count);
            println!("PDF Version:  {}", info.pdf_version);
            if let Some(ref p) = info.producer {
                println!("Producer:     {}", p);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let show_notices = !cli.quiet && !cli.json;
    let progress: Option<ProgressCallback> = if show_notices {
        let cb = if cli.no_progress {
            CliProgress::plain()
        } else {
            CliProgress::with_bar()
        };
        Some(cb as Arc<dyn RunProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress)?;

    // ── Run ──────────────────────────────────────────────────────────────
    let output = convert(&cli.pdf, &cli.workbook, &config).context("Run failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    if !cli.quiet {
        eprintln!(
            "{} {} pairs written  {}  →  {}, {}",
            green("✔"),
            bold(&output.stats.pairs_written.to_string()),
            dim(&format!(
                "(render {}ms, write {}ms)",
                output.stats.render_duration_ms, output.stats.write_duration_ms
            )),
            config.image_dir.display(),
            config.pdf_dir.display(),
        );
        if output.stats.truncated > 0 {
            eprintln!(
                "{} page and name counts differed: {} pages rendered, {} names read, {} dropped",
                cyan("⚠"),
                output.stats.pages_rendered,
                output.stats.names_read,
                output.stats.truncated,
            );
        }
        if let Some(ref merged) = output.merged_path {
            eprintln!("  merged: {}", bold(&merged.display().to_string()));
        }
    }

    Ok(())
}

/// Map CLI args to `RunConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<RunConfig> {
    let mut builder = RunConfig::builder()
        .pages(PageRange::new(cli.first_page, cli.last_page))
        .names(NameColumn {
            sheet: cli.sheet,
            column: cli.column,
            first_row: cli.first_row,
            last_row: cli.last_row,
        })
        .dpi(cli.dpi)
        .image_dir(&cli.images_dir)
        .pdf_dir(&cli.pdf_dir);

    if cli.merge {
        let stem = cli
            .merge_stem
            .clone()
            .or_else(|| {
                Path::new(&cli.pdf)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "output".to_string());
        builder = builder.merged_stem(stem);
    }

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
