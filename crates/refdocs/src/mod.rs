//! refdocs: API reference renderer
//!
//! This crate turns doc-entry JSON produced by an external extractor into
//! one HTML page per documented symbol or CLI command:
//! - Parsing module collections, CLI command trees and bare entries into
//!   [`EntryCollection`]s of typed [`DocEntry`] values
//! - Transforming entries into [`RenderableEntry`] values: Markdown to
//!   HTML, syntax-highlighted code blocks, resolved cross-references
//! - Rendering each entry through category templates
//! - Writing pages under collision-free file names
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ doc-entry JSON  │
//! └────────┬────────┘
//!          ▼
//!   ┌──────────────┐     ┌──────────────────┐
//!   │  collection  │     │ Highlighter      │
//!   └──────┬───────┘     │ (async init)     │
//!          │             └────────┬─────────┘
//!          ▼                      ▼
//!   ┌──────────────┐     ┌──────────────────┐
//!   │  renderable  │◄────┤ MarkdownContext  │
//!   └──────┬───────┘     └──────────────────┘
//!          ▼
//!   ┌──────────────┐     ┌──────────────────┐
//!   │     html     ├────►│     output       │
//!   └──────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use refdocs::{
//!     parse_entry_files, Highlighter, HtmlConfig, HtmlRenderer, MarkdownContext, Pipeline,
//! };
//!
//! # async fn render() -> refdocs::RefdocsResult<()> {
//! let markdown = MarkdownContext::new(Highlighter::initialize().await?);
//! let renderer = HtmlRenderer::new(HtmlConfig::default())?;
//! let collections = parse_entry_files(&["core.json", "cli.json"])?;
//! let report = Pipeline::new(&markdown, renderer, "out").run(&collections)?;
//! report.diagnostics.print();
//! # Ok(())
//! # }
//! ```

// Entry model
pub mod entry;
pub mod js_doc;
pub mod params;

// Entry kinds
pub mod class;
pub mod cli;
pub mod decorators;
pub mod r#enum;
pub mod function;
pub mod type_alias;

// Pipeline stages
pub mod collection;
pub mod html;
pub mod markdown;
pub mod output;
pub mod references;
pub mod renderable;

// Driver support
pub mod diagnostics;
pub mod param_file;
pub mod pipeline;
pub mod test;

// Re-exports for convenience
pub use class::{ClassEntry, MemberEntry};
pub use cli::{CliCommandEntry, CliOption, ParentCommand};
pub use collection::{parse_entry_files, EntryCollection};
pub use diagnostics::{Diagnostic, DiagnosticsCollector, RefdocsError, RefdocsResult};
pub use entry::{DocEntry, EntryType};
pub use function::FunctionEntry;
pub use html::types::HtmlConfig;
pub use html::HtmlRenderer;
pub use markdown::{Highlighter, MarkdownContext};
pub use output::{normalized_filename, OutputPlan, OutputWriter};
pub use param_file::ParamFile;
pub use pipeline::{Pipeline, RunReport};
pub use references::SymbolIndex;
pub use renderable::{get_renderable, RenderableEntry, TransformContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
