//! Markdown rendering with code-block highlighting
//!
//! [`Highlighter::initialize`] is the only asynchronous step in a run: it
//! loads syntax and theme definitions on a blocking worker. The resulting
//! [`Highlighter`] is handed to [`MarkdownContext::new`], which the driver
//! constructs once and passes by reference to the transformer.

use crate::diagnostics::{RefdocsError, RefdocsResult};
use comrak::nodes::NodeValue;
use comrak::plugins::syntect::{SyntectAdapter, SyntectAdapterBuilder};
use comrak::{format_html_with_plugins, parse_document, Arena, Options, Plugins};
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

/// Fence languages and the grammar that stands in for them when the
/// syntax set has none of its own
const FENCE_FALLBACKS: &[(&str, &str)] = &[
    ("typescript", "js"),
    ("ts", "js"),
    ("tsx", "js"),
    ("mts", "js"),
    ("angular-ts", "js"),
    ("angular-html", "html"),
];

/// Loaded syntax and theme definitions
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Highlighter {
    /// Load the bundled syntax and theme definitions.
    ///
    /// Loading is CPU-bound, so it runs on tokio's blocking pool.
    pub async fn initialize() -> RefdocsResult<Self> {
        let (syntax_set, theme_set) = tokio::task::spawn_blocking(|| {
            (
                SyntaxSet::load_defaults_newlines(),
                ThemeSet::load_defaults(),
            )
        })
        .await
        .map_err(|e| RefdocsError::Io(std::io::Error::other(e)))?;

        tracing::debug!(
            "highlighter ready with {} syntaxes",
            syntax_set.syntaxes().len()
        );

        Ok(Self {
            syntax_set,
            theme_set,
        })
    }

    /// Whether a fenced-code language token is recognized
    pub fn supports(&self, token: &str) -> bool {
        self.syntax_set.find_syntax_by_token(token).is_some()
    }

    /// Fence languages to retarget, keeping only those this syntax set
    /// lacks and can stand in for
    fn fallbacks(&self) -> Vec<(&'static str, &'static str)> {
        FENCE_FALLBACKS
            .iter()
            .copied()
            .filter(|(lang, grammar)| !self.supports(lang) && self.supports(grammar))
            .collect()
    }
}

/// Markdown-to-HTML settings shared by every transformation in a run
pub struct MarkdownContext {
    options: Options<'static>,
    adapter: Option<SyntectAdapter>,
    fallbacks: Vec<(&'static str, &'static str)>,
}

impl MarkdownContext {
    /// Create a context that highlights fenced code blocks.
    ///
    /// Highlighting emits CSS classes rather than inline styles, so the
    /// site stylesheet controls colors.
    pub fn new(highlighter: Highlighter) -> Self {
        let fallbacks = highlighter.fallbacks();
        let adapter = SyntectAdapterBuilder::new()
            .syntax_set(highlighter.syntax_set)
            .theme_set(highlighter.theme_set)
            .css()
            .build();
        Self {
            options: options(),
            adapter: Some(adapter),
            fallbacks,
        }
    }

    /// Create a context that leaves code blocks unhighlighted
    pub fn without_highlighting() -> Self {
        Self {
            options: options(),
            adapter: None,
            fallbacks: Vec::new(),
        }
    }

    /// Render Markdown to HTML. Empty input renders as an empty string.
    pub fn render(&self, markdown: &str) -> String {
        if markdown.trim().is_empty() {
            return String::new();
        }

        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);
        if !self.fallbacks.is_empty() {
            for node in root.descendants() {
                if let NodeValue::CodeBlock(ref mut block) = node.data.borrow_mut().value {
                    if let Some(info) = self.retarget(&block.info) {
                        block.info = info;
                    }
                }
            }
        }

        let mut plugins = Plugins::default();
        if let Some(ref adapter) = self.adapter {
            plugins.render.codefence_syntax_highlighter = Some(adapter);
        }

        let mut html = Vec::new();
        if let Err(err) = format_html_with_plugins(root, &self.options, &mut html, &plugins) {
            tracing::warn!("failed to format Markdown: {}", err);
            return String::new();
        }
        String::from_utf8_lossy(&html).into_owned()
    }

    /// Render Markdown that is expected to be a single paragraph, without
    /// the surrounding `<p>` element.
    pub fn render_inline(&self, markdown: &str) -> String {
        let html = self.render(markdown);
        let trimmed = html.trim_end();
        match trimmed
            .strip_prefix("<p>")
            .and_then(|s| s.strip_suffix("</p>"))
        {
            Some(inner) if !inner.contains("<p>") => inner.to_string(),
            _ => html,
        }
    }

    /// Fence info string with its language swapped for a stand-in grammar
    fn retarget(&self, info: &str) -> Option<String> {
        let lang = info.split_whitespace().next()?;
        let (_, grammar) = self
            .fallbacks
            .iter()
            .find(|(from, _)| from.eq_ignore_ascii_case(lang))?;
        Some(format!("{}{}", grammar, &info[info.find(lang)? + lang.len()..]))
    }
}

fn options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = None;
    options.render.unsafe_ = false;
    options
}
