//! HTML renderer
//!
//! Turns a [`RenderableEntry`] into an HTML fragment. Each entry category
//! has a page template composed from shared partials (header, member,
//! signature, parameter, usage notes, CLI option, footer). Templates are
//! embedded at compile time and registered once per renderer.
//!
//! The registry runs in strict mode: a template that refers to a field the
//! data does not carry is a render error for that entry, never silently
//! empty output.

pub mod types;

use crate::diagnostics::RefdocsResult;
use crate::renderable::{RenderableBody, RenderableEntry};
use handlebars::Handlebars;
use serde::Serialize;
use types::{HtmlConfig, PageContext};

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("templates/header.hbs")),
    ("description", include_str!("templates/description.hbs")),
    ("usage_notes", include_str!("templates/usage_notes.hbs")),
    ("footer", include_str!("templates/footer.hbs")),
    ("param", include_str!("templates/param.hbs")),
    ("signature", include_str!("templates/signature.hbs")),
    ("member", include_str!("templates/member.hbs")),
    ("cli_option", include_str!("templates/cli_option.hbs")),
    ("cli_body", include_str!("templates/cli_body.hbs")),
];

const PAGES: &[(&str, &str)] = &[
    ("class", include_str!("templates/class.hbs")),
    ("function", include_str!("templates/function.hbs")),
    ("initializer_api", include_str!("templates/initializer_api.hbs")),
    ("constant", include_str!("templates/constant.hbs")),
    ("type_alias", include_str!("templates/type_alias.hbs")),
    ("enum", include_str!("templates/enum.hbs")),
    ("decorator", include_str!("templates/decorator.hbs")),
    ("block", include_str!("templates/block.hbs")),
    ("cli_command", include_str!("templates/cli_command.hbs")),
    ("cli_subcommand", include_str!("templates/cli_subcommand.hbs")),
    ("page", include_str!("templates/page.hbs")),
];

/// HTML renderer
///
/// Rendering is pure: the same entry always yields the same string.
pub struct HtmlRenderer {
    registry: Handlebars<'static>,
    config: HtmlConfig,
}

impl HtmlRenderer {
    /// Create a renderer, compiling every embedded template.
    pub fn new(config: HtmlConfig) -> RefdocsResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, *source)?;
        }

        Ok(Self { registry, config })
    }

    /// Render one entry
    pub fn render_entry(&self, entry: &RenderableEntry) -> RefdocsResult<String> {
        let fragment = self.render_template(template_name(&entry.body), entry)?;
        if !self.config.standalone {
            return Ok(fragment);
        }

        let title = match entry.module_name {
            Some(ref module) => format!("{} | {}", entry.name, module),
            None => entry.name.clone(),
        };
        self.render_template(
            "page",
            &PageContext {
                title,
                stylesheet: self.config.stylesheet.as_deref(),
                body: &fragment,
                generator: format!("{} v{}", crate::NAME, crate::VERSION),
            },
        )
    }

    /// Render a registered template with arbitrary data
    pub fn render_template<T: Serialize>(&self, name: &str, data: &T) -> RefdocsResult<String> {
        Ok(self.registry.render(name, data)?)
    }
}

/// Page template for an entry body
pub fn template_name(body: &RenderableBody) -> &'static str {
    match body {
        RenderableBody::Class(_) | RenderableBody::Interface(_) => "class",
        RenderableBody::Function(_) => "function",
        RenderableBody::InitializerApi(_) => "initializer_api",
        RenderableBody::Constant(_) => "constant",
        RenderableBody::TypeAlias(_) => "type_alias",
        RenderableBody::Enum(_) => "enum",
        RenderableBody::Decorator(_) => "decorator",
        RenderableBody::Block => "block",
        RenderableBody::Cli(cli) if cli.is_subcommand => "cli_subcommand",
        RenderableBody::Cli(_) => "cli_command",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::EntryCollection;
    use crate::diagnostics::RefdocsError;
    use crate::entry::DocEntry;
    use crate::markdown::MarkdownContext;
    use crate::references::SymbolIndex;
    use crate::renderable::{get_renderable, TransformContext};
    use crate::test::{
        mock_class, mock_cli_tree, mock_constant, mock_enum, mock_function_with_params,
        mock_method, mock_property, mock_string_param,
    };
    use serde_json::json;

    fn renderable(entry: &DocEntry, collections: &[EntryCollection]) -> RenderableEntry {
        let markdown = MarkdownContext::without_highlighting();
        let symbols = SymbolIndex::build(collections);
        let ctx = TransformContext::new(&markdown, &symbols, collections);
        get_renderable(entry, "@angular/core", &ctx).unwrap()
    }

    fn render(entry: &DocEntry) -> String {
        let renderer = HtmlRenderer::new(HtmlConfig::default()).unwrap();
        renderer.render_entry(&renderable(entry, &[])).unwrap()
    }

    #[test]
    fn test_all_templates_compile() {
        assert!(HtmlRenderer::new(HtmlConfig::default()).is_ok());
    }

    #[test]
    fn test_members_render_in_declaration_order() {
        let html = render(&mock_class(
            "Sequence",
            vec![
                mock_method("m1", vec![]),
                mock_method("m2", vec![]),
                mock_method("m3", vec![]),
            ],
        ));

        let m1 = html.find("id=\"m1\"").unwrap();
        let m2 = html.find("id=\"m2\"").unwrap();
        let m3 = html.find("id=\"m3\"").unwrap();
        assert!(m1 < m2 && m2 < m3);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let entry = renderable(
            &mock_class("Foo", vec![mock_property("bar", "string")]),
            &[],
        );
        let renderer = HtmlRenderer::new(HtmlConfig::default()).unwrap();
        let first = renderer.render_entry(&entry).unwrap();
        let second = renderer.render_entry(&entry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_class_page() {
        let html = render(&mock_class(
            "Router",
            vec![
                mock_method("navigate", vec![mock_string_param("url")]),
                mock_method("navigate", vec![]),
            ],
        ));

        assert!(html.contains("<h1>Router</h1>"));
        assert!(html.contains("<code>@angular/core</code>"));
        assert!(html.contains("class Router"));
        assert!(html.contains("<p>Mock class Router.</p>"));
        assert_eq!(html.matches("docs-reference-signature").count(), 2);
        assert!(html.contains("navigate(url: string): void"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render(&mock_function_with_params(
            "pick",
            vec![mock_string_param("a<b")],
            Some("Set<string>"),
        ));
        assert!(html.contains("a&lt;b"));
        assert!(!html.contains("a<b"));
        assert!(html.contains("Set&lt;string&gt;"));
    }

    #[test]
    fn test_deprecated_entry() {
        let entry = DocEntry::from_value(json!({
            "name": "OLD",
            "entryType": "constant",
            "type": "string",
            "deprecated": "Use NEW."
        }));
        let html = render(&entry);
        assert!(html.contains("docs-deprecated-label"));
        assert!(html.contains("Use NEW."));
    }

    #[test]
    fn test_other_categories_render() {
        assert!(render(&mock_constant("VERSION", "Version")).contains("const VERSION: Version"));
        assert!(render(&mock_enum("Color", &["Red"])).contains("id=\"red\""));

        let block = DocEntry::from_value(json!({
            "name": "@defer",
            "entryType": "block",
            "description": "Lazy loads content."
        }));
        assert!(render(&block).contains("Lazy loads content."));
    }

    #[test]
    fn test_cli_pages() {
        let collections = mock_cli_tree("ng", &["build"]);
        let renderer = HtmlRenderer::new(HtmlConfig::default()).unwrap();

        let root = renderer
            .render_entry(&renderable(&collections[0].entries[0], &collections))
            .unwrap();
        assert!(root.contains("<a href=\"ng/build.html\">build</a>"));
        assert!(root.contains("--verbose"));
        assert!(!root.contains("docs-breadcrumb"));

        let build = renderer
            .render_entry(&renderable(&collections[1].entries[0], &collections))
            .unwrap();
        assert!(build.contains("<a href=\"../ng.html\">ng</a>"));
        assert!(build.contains("Subcommand"));
    }

    #[test]
    fn test_standalone_page() {
        let renderer =
            HtmlRenderer::new(HtmlConfig::standalone().with_stylesheet("styles.css")).unwrap();
        let html = renderer
            .render_entry(&renderable(&mock_class("Foo", vec![]), &[]))
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Foo | @angular/core</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"styles.css\">"));
        assert!(html.contains("<h1>Foo</h1>"));
    }

    #[test]
    fn test_missing_field_fails_loudly() {
        let renderer = HtmlRenderer::new(HtmlConfig::default()).unwrap();
        let err = renderer
            .render_template("class", &json!({"name": "Half"}))
            .unwrap_err();
        assert!(matches!(err, RefdocsError::Template(_)));
        assert!(err.is_per_entry());
    }
}
