//! Render command
//!
//! Reads the parameter file and every input before touching the output
//! directory, so a fatal error leaves nothing written.

use crate::RenderCommand;
use anyhow::{Context, Result};
use refdocs::{
    parse_entry_files, Highlighter, HtmlConfig, HtmlRenderer, MarkdownContext, ParamFile,
    Pipeline,
};
use tokio::runtime::Runtime;

/// Run the pipeline. Returns `false` when any entry failed.
pub fn run(cmd: &RenderCommand, rt: &Runtime) -> Result<bool> {
    let params = ParamFile::read(&cmd.param_file)
        .with_context(|| format!("invalid parameter file {}", cmd.param_file.display()))?;

    let collections =
        parse_entry_files(&params.sources).context("failed to load doc entries")?;
    let entry_count: usize = collections.iter().map(|c| c.entries.len()).sum();
    tracing::info!(
        "loaded {} entries from {} file(s)",
        entry_count,
        params.sources.len()
    );

    let highlighter = rt
        .block_on(Highlighter::initialize())
        .context("failed to initialize syntax highlighter")?;
    let markdown = MarkdownContext::new(highlighter);

    let mut config = if cmd.standalone {
        HtmlConfig::standalone()
    } else {
        HtmlConfig::default()
    };
    if let Some(ref href) = cmd.stylesheet {
        config = config.with_stylesheet(href.as_str());
    }

    let renderer = HtmlRenderer::new(config).context("failed to compile templates")?;
    let pipeline = Pipeline::new(&markdown, renderer, &params.output_dir);

    let report = pipeline
        .run(&collections)
        .with_context(|| format!("cannot write to {}", params.output_dir.display()))?;

    report.diagnostics.print();
    report.diagnostics.print_summary();
    println!(
        "Rendered {} of {} entries to {}",
        report.written.len(),
        entry_count,
        params.output_dir.display()
    );

    Ok(!report.has_failures())
}
