//! Entry points for callers: validate, run, describe the outcome

use crate::document::SourceDocument;
use crate::info::{PdfInfo, read_info};
use crate::merge::merge_documents;
use crate::options::{PageSelectionOptions, PasswordOptions, WatermarkOptions};
use crate::protect::protect_document;
use crate::render::write_pdf;
use crate::result::OperationResult;
use crate::select;
use crate::settings::Settings;
use crate::types::*;
use crate::watermark;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Runs PDF operations against files on disk.
///
/// Holds nothing but its [`Settings`]; every call opens its own documents and
/// writes to its own uniquely named outputs.
#[derive(Debug, Clone, Default)]
pub struct PdfOperations {
    settings: Settings,
}

impl PdfOperations {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Split or extract pages of `source_path` into new PDFs
    pub fn select_pages(
        &self,
        source_path: impl AsRef<Path>,
        options: &PageSelectionOptions,
    ) -> Result<OperationResult> {
        options.validate()?;
        let source = SourceDocument::open(source_path, &self.settings)?;

        let targets = select::resolve(options.mode, source.page_count(), options.pages.as_deref())?;
        let plan = select::plan(
            options.mode,
            &targets,
            options.filename_prefix.as_deref(),
            source.stem(),
        );

        // Each call gets its own subdirectory under the base dir
        let base_dir = options
            .output_dir
            .as_deref()
            .unwrap_or(self.settings.temp_dir.as_path());
        let output_dir = unique_path(base_dir, "split", "");
        std::fs::create_dir_all(&output_dir)?;

        let files = select::assemble(&source, &plan, &output_dir)
            .map_err(|e| e.during("process pages"))?;

        log::info!(
            "Selected {} page(s) of {} into {} file(s) under {}",
            targets.len(),
            source.path().display(),
            files.len(),
            output_dir.display()
        );

        Ok(OperationResult::success(
            format!(
                "Successfully processed {} pages: {}",
                targets.len(),
                select::describe_pages(&targets)
            ),
            files,
        )
        .with_details(format!("Pages: {}", join_pages(&targets))))
    }

    /// Stamp a text or image watermark onto `source_path`
    pub fn add_watermark(
        &self,
        source_path: impl AsRef<Path>,
        options: &WatermarkOptions,
    ) -> Result<OperationResult> {
        options.validate()?;
        let source = SourceDocument::open(source_path, &self.settings)?;

        let output_path = match &options.output_file {
            Some(path) => path.clone(),
            None => unique_path(&self.settings.temp_dir, "watermarked", ".pdf"),
        };
        ensure_parent(&output_path)?;

        let outcome = watermark::apply(&source, options, &output_path)?;

        let mut details = format!(
            "Watermark type: {}, position: {}",
            options.watermark_type,
            options.position.index()
        );
        if !outcome.targets.dropped.is_empty() {
            details.push_str(&format!(
                ", skipped pages outside 1-{}: {}",
                source.page_count(),
                join_pages(&outcome.targets.dropped)
            ));
        }

        Ok(OperationResult::success(
            format!("Added watermark to {} pages", outcome.targets.pages.len()),
            vec![outcome.output_path],
        )
        .with_details(details))
    }

    /// Concatenate `sources` in order into one PDF
    pub fn merge(&self, sources: &[PathBuf], output: Option<PathBuf>) -> Result<OperationResult> {
        if sources.len() < 2 {
            return Err(PdfToolError::validation(
                "At least 2 PDF files are required for merging",
            ));
        }

        let documents = sources
            .iter()
            .map(|path| SourceDocument::open(path, &self.settings))
            .collect::<Result<Vec<_>>>()?;

        let output_path =
            output.unwrap_or_else(|| unique_path(&self.settings.temp_dir, "merged", ".pdf"));
        ensure_parent(&output_path)?;

        let mut merged = merge_documents(&documents).map_err(|e| e.during("merge PDFs"))?;
        write_pdf(&mut merged, &output_path).map_err(|e| e.during("merge PDFs"))?;

        let total: u32 = documents.iter().map(SourceDocument::page_count).sum();
        log::info!(
            "Merged {} files ({} pages) -> {}",
            documents.len(),
            total,
            output_path.display()
        );

        Ok(OperationResult::success(
            format!("Successfully merged {} PDF files", documents.len()),
            vec![output_path],
        )
        .with_details(format!("Total pages: {}", total)))
    }

    /// Page count and metadata of `source_path`
    pub fn info(&self, source_path: impl AsRef<Path>) -> Result<PdfInfo> {
        let source = SourceDocument::open(source_path, &self.settings)?;
        Ok(read_info(&source))
    }

    /// Encrypt `source_path` with a user password and permission flags
    pub fn protect(
        &self,
        source_path: impl AsRef<Path>,
        options: &PasswordOptions,
    ) -> Result<OperationResult> {
        options.validate()?;
        let source = SourceDocument::open(source_path, &self.settings)?;

        let output_path = match &options.output_file {
            Some(path) => path.clone(),
            None => unique_path(&self.settings.temp_dir, "protected", ".pdf"),
        };
        ensure_parent(&output_path)?;

        let mut doc = protect_document(&source, options).map_err(|e| e.during("protect PDF"))?;
        write_pdf(&mut doc, &output_path).map_err(|e| e.during("protect PDF"))?;

        log::info!(
            "Password protected {} -> {}",
            source.path().display(),
            output_path.display()
        );

        Ok(OperationResult::success(
            "PDF password protection applied",
            vec![output_path],
        )
        .with_details(format!(
            "User password set, allowed operations: {}",
            options.describe_permissions()
        )))
    }
}

/// `{dir}/{stem}_{uuid}{suffix}`
fn unique_path(dir: &Path, stem: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{}_{}{}", stem, Uuid::new_v4().simple(), suffix))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn join_pages(pages: &[u32]) -> String {
    pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Async wrappers
// ============================================================================

/// Select pages on a blocking worker thread
pub async fn select_pages(
    settings: Settings,
    source_path: PathBuf,
    options: PageSelectionOptions,
) -> Result<OperationResult> {
    options.validate()?;
    tokio::task::spawn_blocking(move || {
        PdfOperations::new(settings).select_pages(&source_path, &options)
    })
    .await?
}

/// Add a watermark on a blocking worker thread
pub async fn add_watermark(
    settings: Settings,
    source_path: PathBuf,
    options: WatermarkOptions,
) -> Result<OperationResult> {
    options.validate()?;
    tokio::task::spawn_blocking(move || {
        PdfOperations::new(settings).add_watermark(&source_path, &options)
    })
    .await?
}

/// Merge PDFs on a blocking worker thread
pub async fn merge_pdfs(
    settings: Settings,
    sources: Vec<PathBuf>,
    output: Option<PathBuf>,
) -> Result<OperationResult> {
    tokio::task::spawn_blocking(move || PdfOperations::new(settings).merge(&sources, output))
        .await?
}

/// Read document info on a blocking worker thread
pub async fn pdf_info(settings: Settings, source_path: PathBuf) -> Result<PdfInfo> {
    tokio::task::spawn_blocking(move || PdfOperations::new(settings).info(&source_path)).await?
}

/// Password protect a PDF on a blocking worker thread
pub async fn protect_pdf(
    settings: Settings,
    source_path: PathBuf,
    options: PasswordOptions,
) -> Result<OperationResult> {
    options.validate()?;
    tokio::task::spawn_blocking(move || PdfOperations::new(settings).protect(&source_path, &options))
        .await?
}
