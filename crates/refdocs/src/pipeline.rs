//! Pipeline - rendering orchestrator
//!
//! Drives every entry of every collection through the transformer, the
//! HTML renderer and the output writer, in order and on the calling
//! thread. Failures confined to one entry are recorded in the
//! [`RunReport`] and the run moves on.

use crate::collection::EntryCollection;
use crate::diagnostics::{Diagnostic, DiagnosticsCollector, RefdocsError, RefdocsResult};
use crate::entry::DocEntry;
use crate::html::HtmlRenderer;
use crate::markdown::MarkdownContext;
use crate::output::OutputWriter;
use crate::references::SymbolIndex;
use crate::renderable::{get_renderable, TransformContext};
use std::path::PathBuf;

/// Result of a pipeline run
#[derive(Debug)]
pub struct RunReport {
    /// Output directory
    pub output_dir: PathBuf,
    /// Files written, in processing order
    pub written: Vec<PathBuf>,
    /// Skipped entries and failed writes
    pub diagnostics: DiagnosticsCollector,
}

impl RunReport {
    /// Create an empty report
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Vec::new(),
            diagnostics: DiagnosticsCollector::new(),
        }
    }

    /// Whether any entry failed to render or write
    pub fn has_failures(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Written files relative to the output directory
    pub fn relative_paths(&self) -> Vec<String> {
        self.written
            .iter()
            .map(|path| {
                path.strip_prefix(&self.output_dir)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }
}

/// The rendering pipeline
pub struct Pipeline<'a> {
    markdown: &'a MarkdownContext,
    renderer: HtmlRenderer,
    output_dir: PathBuf,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline writing pages to `output_dir`
    pub fn new(
        markdown: &'a MarkdownContext,
        renderer: HtmlRenderer,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            markdown,
            renderer,
            output_dir: output_dir.into(),
        }
    }

    /// Render and write every entry.
    ///
    /// Per-entry failures are recorded in the report. Anything else,
    /// such as failing to create the output directory, aborts the run.
    pub fn run(&self, collections: &[EntryCollection]) -> RefdocsResult<RunReport> {
        let writer = OutputWriter::new(&self.output_dir);
        writer.prepare()?;

        let symbols = SymbolIndex::build(collections);
        tracing::debug!("indexed {} symbols", symbols.len());
        let ctx = TransformContext::new(self.markdown, &symbols, collections);

        let mut report = RunReport::new(&self.output_dir);
        for (c, collection) in collections.iter().enumerate() {
            for (e, entry) in collection.entries.iter().enumerate() {
                let page = symbols.plan().page(c, e);
                match self.process(entry, &collection.module_name, page, &ctx, &writer) {
                    Ok(path) => {
                        tracing::debug!("wrote {}", path.display());
                        report.written.push(path);
                    }
                    Err(err) if err.is_per_entry() => {
                        tracing::warn!(
                            "skipping {}#{}: {}",
                            collection.module_name,
                            entry.name(),
                            err
                        );
                        report
                            .diagnostics
                            .add(entry_diagnostic(&collection.module_name, entry, err));
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        tracing::info!(
            "wrote {} file(s) to {}, {} failure(s)",
            report.written.len(),
            self.output_dir.display(),
            report.diagnostics.error_count()
        );
        Ok(report)
    }

    fn process(
        &self,
        entry: &DocEntry,
        module_name: &str,
        page: Option<&str>,
        ctx: &TransformContext<'_>,
        writer: &OutputWriter,
    ) -> RefdocsResult<PathBuf> {
        let renderable = get_renderable(entry, module_name, ctx)?;
        let Some(page) = page else {
            return Err(RefdocsError::UnsupportedEntry {
                name: entry.name().to_string(),
                entry_type: entry.entry_type_tag().to_string(),
            });
        };
        let html = self.renderer.render_entry(&renderable)?;
        writer.write(page, &html)
    }
}

fn entry_diagnostic(module_name: &str, entry: &DocEntry, err: RefdocsError) -> Diagnostic {
    let diagnostic = Diagnostic::error(err.to_string()).for_entry(module_name, entry.name());
    match err {
        RefdocsError::Write { path, .. } => diagnostic.in_file(path),
        _ => diagnostic,
    }
}
