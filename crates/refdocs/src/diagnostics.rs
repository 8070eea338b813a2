//! Error types and diagnostics
//!
//! Fatal problems (bad param file, unparsable JSON, a collection missing
//! its required fields) are returned as [`RefdocsError`] and abort the run.
//! Problems confined to one entry or one output file are recorded as
//! [`Diagnostic`]s and reported together once the run finishes.

use std::io::{self, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use thiserror::Error;

/// Result type for refdocs operations
pub type RefdocsResult<T> = Result<T, RefdocsError>;

/// Main error type for refdocs
#[derive(Debug, Error)]
pub enum RefdocsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error outside of a specific input file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An input file could not be parsed
    #[error("Parse error in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// A collection payload lacks a required top-level field
    #[error("Invalid collection in {file}: {message}")]
    Collection { file: PathBuf, message: String },

    /// The driver's parameter file is malformed
    #[error("Invalid parameter file: {0}")]
    ParamFile(String),

    /// Entry kind has no renderer
    #[error("Unsupported entry `{name}` with entry type `{entry_type}`")]
    UnsupportedEntry { name: String, entry_type: String },

    /// Entry of a known kind whose shape does not match that kind
    #[error("Malformed entry `{name}` ({entry_type}): {reason}")]
    MalformedEntry {
        name: String,
        entry_type: String,
        reason: String,
    },

    /// Template registration or rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Output file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RefdocsError {
    /// Create a parse error
    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RefdocsError::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a collection-shape error
    pub fn collection(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RefdocsError::Collection {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a param file error
    pub fn param_file(message: impl Into<String>) -> Self {
        RefdocsError::ParamFile(message.into())
    }

    /// Create a malformed entry error
    pub fn malformed(
        name: impl Into<String>,
        entry_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RefdocsError::MalformedEntry {
            name: name.into(),
            entry_type: entry_type.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only concerns a single entry or file.
    ///
    /// The pipeline records these and keeps going.
    pub fn is_per_entry(&self) -> bool {
        matches!(
            self,
            RefdocsError::UnsupportedEntry { .. }
                | RefdocsError::MalformedEntry { .. }
                | RefdocsError::Template(_)
                | RefdocsError::Write { .. }
        )
    }
}

impl From<handlebars::TemplateError> for RefdocsError {
    fn from(err: handlebars::TemplateError) -> Self {
        RefdocsError::Template(err.to_string())
    }
}

impl From<handlebars::RenderError> for RefdocsError {
    fn from(err: handlebars::RenderError) -> Self {
        RefdocsError::Template(err.to_string())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Entry or file was not produced
    Error,
    /// Output was produced but something was off
    Warning,
    /// Informational message
    Info,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }

    fn color(&self) -> Color {
        match self {
            DiagnosticSeverity::Error => Color::Red,
            DiagnosticSeverity::Warning => Color::Yellow,
            DiagnosticSeverity::Info => Color::Blue,
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// Module the entry belongs to
    pub module: Option<String>,
    /// Entry name
    pub entry: Option<String>,
    /// Output file involved, if any
    pub file: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            module: None,
            entry: None,
            file: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Info, message)
    }

    /// Attach the entry this diagnostic is about
    pub fn for_entry(mut self, module: impl Into<String>, entry: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self.entry = Some(entry.into());
        self
    }

    /// Attach the output file
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    fn location(&self) -> Option<String> {
        let entry = match (&self.module, &self.entry) {
            (Some(module), Some(entry)) => Some(format!("{}#{}", module, entry)),
            (None, Some(entry)) => Some(entry.clone()),
            _ => None,
        };
        match (entry, &self.file) {
            (Some(entry), Some(file)) => Some(format!("{} ({})", entry, file.display())),
            (Some(entry), None) => Some(entry),
            (None, Some(file)) => Some(file.display().to_string()),
            (None, None) => None,
        }
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        match self.location() {
            Some(location) => format!(
                "{}: {}: {}",
                location,
                self.severity.display(),
                self.message
            ),
            None => format!("{}: {}", self.severity.display(), self.message),
        }
    }

    fn write_colored(&self, out: &mut impl WriteColor) -> io::Result<()> {
        if let Some(location) = self.location() {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(out, "{}", location)?;
            out.reset()?;
            write!(out, ": ")?;
        }
        out.set_color(ColorSpec::new().set_fg(Some(self.severity.color())).set_bold(true))?;
        write!(out, "{}", self.severity.display())?;
        out.reset()?;
        writeln!(out, ": {}", self.message)
    }
}

/// Collector for diagnostics during a run
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::error(message));
    }

    /// Add a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::warning(message));
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Print all diagnostics to stderr, colored when stderr is a terminal
    pub fn print(&self) {
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        for diagnostic in &self.diagnostics {
            if diagnostic.write_colored(&mut stderr).is_err() {
                eprintln!("{}", diagnostic.format());
            }
        }
    }

    /// Print summary
    pub fn print_summary(&self) {
        let errors = self.error_count();
        let warnings = self.warning_count();

        if errors > 0 || warnings > 0 {
            eprintln!("\n{} error(s), {} warning(s)", errors, warnings);
        }
    }
}
