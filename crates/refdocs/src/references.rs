//! Cross-reference resolution
//!
//! Builds an index from symbol name to output page and uses it to
//! - turn `{@link Foo}` / `{@linkcode Foo.bar}` JSDoc references into
//!   Markdown links before Markdown rendering, and
//! - wrap identifiers in type strings that name a documented symbol in
//!   `<a href>` links.

use crate::collection::EntryCollection;
use crate::output::OutputPlan;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    /// `{@link Target}`, `{@link Target label}`, `{@link Target|label}`
    static ref LINK_REGEX: Regex = Regex::new(
        r"\{@(link|linkcode|linkplain)\s+([^}\s|]+)(?:\s*\|\s*|\s+)?([^}]*)\}"
    ).unwrap();

    /// Identifier tokens inside a TypeScript type string
    static ref IDENT_REGEX: Regex = Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").unwrap();
}

/// Symbol name to page lookup for a whole run
///
/// Also owns the run's [`OutputPlan`], so a link always points at the
/// file the entry is actually written to.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    targets: HashMap<String, String>,
    plan: OutputPlan,
}

impl SymbolIndex {
    /// Assign every entry its page and index the API entries.
    ///
    /// When two modules export the same name, the first one seen wins.
    /// CLI, unknown and malformed entries are not indexed.
    pub fn build(collections: &[EntryCollection]) -> Self {
        let mut index = Self {
            targets: HashMap::new(),
            plan: OutputPlan::assign(collections),
        };

        for (c, collection) in collections.iter().enumerate() {
            for (e, entry) in collection.entries.iter().enumerate() {
                if entry.info().is_none() {
                    continue;
                }
                if let Some(page) = index.plan.page(c, e) {
                    let page = page.to_string();
                    index.insert(entry.name(), page);
                }
            }
        }
        index
    }

    fn insert(&mut self, name: &str, page: String) {
        self.targets.entry(name.to_string()).or_insert(page);
    }

    /// Output pages of the run
    pub fn plan(&self) -> &OutputPlan {
        &self.plan
    }

    /// Page for a symbol, relative to the output root
    pub fn page(&self, name: &str) -> Option<&str> {
        self.targets.get(name).map(String::as_str)
    }

    /// Number of indexed symbols
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Where links are being emitted from
#[derive(Debug, Clone, Copy)]
pub struct LinkContext<'a> {
    pub index: &'a SymbolIndex,
    /// Directory depth of the page being rendered below the output root
    pub depth: usize,
    /// Name of the entry being rendered; never links to itself
    pub current: &'a str,
}

impl<'a> LinkContext<'a> {
    /// Create a context for a page at the output root
    pub fn new(index: &'a SymbolIndex, current: &'a str) -> Self {
        Self {
            index,
            depth: 0,
            current,
        }
    }

    /// Set the page depth
    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Relative href for a symbol, optionally pointing at a member anchor
    pub fn href(&self, name: &str, member: Option<&str>) -> Option<String> {
        let page = self.index.page(name)?;
        let mut href = "../".repeat(self.depth);
        href.push_str(&encode_path(page));
        if let Some(member) = member {
            href.push('#');
            href.push_str(&anchor(member));
        }
        Some(href)
    }
}

/// Percent-encode each segment of a relative path
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// In-page anchor for a member name
pub fn anchor(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Replace JSDoc `{@link}` references with Markdown.
///
/// Known targets become links; unknown ones fall back to inline code so
/// the reference still reads as a symbol name.
pub fn resolve_links(text: &str, ctx: &LinkContext<'_>) -> String {
    LINK_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            let kind = &caps[1];
            let target = &caps[2];
            let label = caps
                .get(3)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(target);

            let (symbol, member) = split_target(target);
            let label = if kind == "linkplain" {
                escape_brackets(label)
            } else {
                format!("`{}`", label)
            };

            match ctx.href(symbol, member) {
                Some(href) => format!("[{}]({})", label, href),
                None if kind == "linkplain" => label,
                None => format!("`{}`", label.trim_matches('`')),
            }
        })
        .into_owned()
}

fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.find(['.', '#']) {
        Some(idx) => (&target[..idx], Some(&target[idx + 1..]).filter(|m| !m.is_empty())),
        None => (target, None),
    }
}

fn escape_brackets(s: &str) -> String {
    s.replace('[', "\\[").replace(']', "\\]")
}

/// HTML-escape a type string, linking identifiers that name indexed symbols.
pub fn linkify_type(ty: &str, ctx: &LinkContext<'_>) -> String {
    let mut html = String::with_capacity(ty.len());
    let mut last = 0;

    for ident in IDENT_REGEX.find_iter(ty) {
        html.push_str(&html_escape::encode_text(&ty[last..ident.start()]));
        let name = ident.as_str();
        match ctx.href(name, None).filter(|_| name != ctx.current) {
            Some(href) => {
                html.push_str("<a href=\"");
                html.push_str(&href);
                html.push_str("\">");
                html.push_str(name);
                html.push_str("</a>");
            }
            None => html.push_str(name),
        }
        last = ident.end();
    }
    html.push_str(&html_escape::encode_text(&ty[last..]));

    html
}
