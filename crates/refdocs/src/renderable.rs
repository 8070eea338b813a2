//! Renderable transformation
//!
//! Converts a decoded [`DocEntry`] into a [`RenderableEntry`]: Markdown is
//! rendered to HTML, `{@link}` references and type strings are resolved
//! against the run's [`SymbolIndex`], deprecation and usage notes are
//! folded in from JSDoc tags, and method overloads are grouped under one
//! member.
//!
//! Every field of the renderable types is always serialized (options as
//! `null`) so the strict-mode templates never see a missing field.

use crate::class::{ClassEntry, MemberEntry, MemberInfo, PropertyMember};
use crate::cli::{display_value, CliCommandEntry, CliOption};
use crate::collection::{resolve_parent, EntryCollection, UNKNOWN_MODULE};
use crate::diagnostics::{RefdocsError, RefdocsResult};
use crate::entry::{DocEntry, EntryInfo, SourceLocation};
use crate::function::{CallableSet, FunctionSignature};
use crate::js_doc::{self, Deprecation, DeprecationInfo, JsDocTag};
use crate::markdown::MarkdownContext;
use crate::output;
use crate::params::ParameterEntry;
use crate::references::{self, LinkContext, SymbolIndex};
use indexmap::IndexMap;
use serde::Serialize;

/// Everything the transformer reads besides the entry itself
#[derive(Clone, Copy)]
pub struct TransformContext<'a> {
    /// Markdown settings shared by the run
    pub markdown: &'a MarkdownContext,
    /// Cross-reference targets
    pub symbols: &'a SymbolIndex,
    /// All collections of the run, for CLI parent lookup
    pub collections: &'a [EntryCollection],
}

impl<'a> TransformContext<'a> {
    /// Create a context
    pub fn new(
        markdown: &'a MarkdownContext,
        symbols: &'a SymbolIndex,
        collections: &'a [EntryCollection],
    ) -> Self {
        Self {
            markdown,
            symbols,
            collections,
        }
    }
}

/// An entry ready for templating
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableEntry {
    pub name: String,
    /// Raw entry type tag (`class`, `function`, ..., `cli`)
    pub entry_type: String,
    /// Label shown in the page header
    pub category: String,
    /// `None` for entries outside a module (CLI commands, bare entries)
    pub module_name: Option<String>,
    pub html_description: String,
    pub html_usage_notes: Option<String>,
    pub is_deprecated: bool,
    /// Deprecation message as inline HTML
    pub deprecation_message: Option<String>,
    /// Status badges such as "Developer Preview"
    pub badges: Vec<String>,
    /// `@see` references as inline HTML
    pub see_also: Vec<String>,
    /// `@example` blocks as HTML
    pub examples: Vec<String>,
    pub source: Option<SourceLocation>,
    /// Kind-specific content
    pub body: RenderableBody,
}

/// Kind-specific part of a renderable entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderableBody {
    Class(RenderableClass),
    Interface(RenderableClass),
    Function(RenderableFunction),
    InitializerApi(RenderableInitializerApi),
    Constant(RenderableDeclaration),
    TypeAlias(RenderableDeclaration),
    Enum(RenderableMembers),
    Decorator(RenderableDecorator),
    Block,
    Cli(RenderableCli),
}

/// Classes, interfaces and their Angular flavors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableClass {
    /// Declaration line as linkified HTML
    pub declaration: String,
    pub selector: Option<String>,
    pub export_as: Vec<String>,
    pub pipe_name: Option<String>,
    pub is_standalone: Option<bool>,
    /// Members in declaration order, overloads grouped
    pub members: Vec<RenderableMember>,
}

/// A member, or a group of method overloads sharing a name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableMember {
    pub name: String,
    /// In-page anchor
    pub anchor: String,
    /// `property`, `method`, `getter`, `setter` or `enum_item`
    pub member_type: String,
    /// Modifiers such as `readonly` or `static`
    pub tags: Vec<String>,
    /// Property or enum item type as linkified HTML
    pub type_html: Option<String>,
    /// Aliased input/output name
    pub alias: Option<String>,
    /// Enum item initializer
    pub value: Option<String>,
    /// Member description; empty for methods, whose overloads carry it
    pub html_description: String,
    pub is_deprecated: bool,
    pub deprecation_message: Option<String>,
    pub is_method: bool,
    /// Whether a method has more than one overload
    pub is_overloaded: bool,
    /// Method overloads in declaration order
    pub overloads: Vec<RenderableSignature>,
}

/// One callable signature
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableSignature {
    /// Full signature as linkified HTML
    pub code: String,
    pub html_description: String,
    pub params: Vec<RenderableParameter>,
    /// Return type as linkified HTML
    pub return_type: String,
    /// `@returns` text as inline HTML
    pub returns_description: Option<String>,
    pub html_usage_notes: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_message: Option<String>,
}

/// A parameter of a signature
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableParameter {
    pub name: String,
    pub type_html: String,
    pub html_description: String,
    pub is_optional: bool,
    pub is_rest_param: bool,
}

/// Overloads of a function
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableFunction {
    pub is_overloaded: bool,
    pub overloads: Vec<RenderableSignature>,
}

/// A named callable of an initializer API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableCallable {
    /// Display name, e.g. `input.required`
    pub name: String,
    pub anchor: String,
    pub overloads: Vec<RenderableSignature>,
}

/// Initializer API with its sub-functions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableInitializerApi {
    pub call: RenderableCallable,
    pub sub_functions: Vec<RenderableCallable>,
}

/// Constants and type aliases: a single code line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableDeclaration {
    pub code: String,
}

/// Enum items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableMembers {
    pub members: Vec<RenderableMember>,
}

/// A decorator and its options
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableDecorator {
    /// e.g. "class decorator"
    pub placement: String,
    pub members: Vec<RenderableMember>,
}

/// A CLI command page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableCli {
    /// Usage line
    pub command: String,
    pub is_subcommand: bool,
    /// "Command" or "Subcommand"
    pub label: String,
    pub aliases: Vec<String>,
    /// Breadcrumb back to the root command
    pub parent: Option<RenderableLink>,
    /// Positional arguments, ordered by position
    pub arguments: Vec<RenderableCliOption>,
    /// Flags in declaration order
    pub options: Vec<RenderableCliOption>,
    pub subcommands: Vec<RenderableLink>,
}

/// A link to another page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableLink {
    pub name: String,
    pub href: Option<String>,
    pub html_description: String,
}

/// A CLI option or positional argument
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableCliOption {
    pub name: String,
    /// `--name` for flags, `<name>` for arguments
    pub display_name: String,
    /// Aliases with their dashes, e.g. `-w`
    pub aliases: Vec<String>,
    #[serde(rename = "type")]
    pub ty: String,
    pub html_description: String,
    pub default: Option<String>,
    pub allowed_values: Vec<String>,
    pub is_deprecated: bool,
    pub deprecation_message: Option<String>,
}

/// Transform one entry.
///
/// Unknown and malformed entries are rejected; so are members,
/// parameters and options without a name. The caller records the error
/// and moves on to the next entry.
pub fn get_renderable(
    entry: &DocEntry,
    module_name: &str,
    ctx: &TransformContext<'_>,
) -> RefdocsResult<RenderableEntry> {
    match entry {
        DocEntry::Unknown(unknown) => Err(RefdocsError::UnsupportedEntry {
            name: unknown.name.clone(),
            entry_type: unknown.entry_type.clone(),
        }),
        DocEntry::Malformed(bad) => Err(RefdocsError::malformed(
            &bad.name,
            &bad.entry_type,
            &bad.reason,
        )),
        DocEntry::CliCommand(cmd) => cli_renderable(cmd, ctx),
        api => {
            let Some(info) = api.info() else {
                return Err(RefdocsError::UnsupportedEntry {
                    name: api.name().to_string(),
                    entry_type: api.entry_type_tag().to_string(),
                });
            };
            let t = Transformer::new(ctx, &info.name, 0);
            let body = match api {
                DocEntry::Class(class) => RenderableBody::Class(t.class(class, "class")?),
                DocEntry::Interface(class) => {
                    RenderableBody::Interface(t.class(class, "interface")?)
                }
                DocEntry::Function(function) => {
                    let overloads = function
                        .signatures()
                        .iter()
                        .map(|sig| t.signature(&info.name, sig, None))
                        .collect::<RefdocsResult<Vec<_>>>()?;
                    RenderableBody::Function(RenderableFunction {
                        is_overloaded: overloads.len() > 1,
                        overloads,
                    })
                }
                DocEntry::InitializerApi(api) => {
                    RenderableBody::InitializerApi(RenderableInitializerApi {
                        call: t.callable(&info.name, &api.call_function)?,
                        sub_functions: api
                            .sub_functions
                            .iter()
                            .map(|sub| t.callable(&format!("{}.{}", info.name, sub.name), sub))
                            .collect::<RefdocsResult<Vec<_>>>()?,
                    })
                }
                DocEntry::Constant(constant) => {
                    RenderableBody::Constant(RenderableDeclaration {
                        code: t.ty(&constant.declaration()),
                    })
                }
                DocEntry::TypeAlias(alias) => RenderableBody::TypeAlias(RenderableDeclaration {
                    code: format!("{} = {}", t.ty(&alias.head()), t.ty(&alias.ty)),
                }),
                DocEntry::Enum(e) => RenderableBody::Enum(RenderableMembers {
                    members: t.members(&e.members)?,
                }),
                DocEntry::Decorator(decorator) => RenderableBody::Decorator(RenderableDecorator {
                    placement: decorator.decorator_type.label().to_string(),
                    members: t.members(&decorator.members)?,
                }),
                _ => RenderableBody::Block,
            };
            Ok(t.entry(info, module_name, body))
        }
    }
}

fn module_label(module_name: &str) -> Option<String> {
    (module_name != UNKNOWN_MODULE && !module_name.is_empty()).then(|| module_name.to_string())
}

/// Per-entry rendering helpers
struct Transformer<'a> {
    markdown: &'a MarkdownContext,
    links: LinkContext<'a>,
}

impl<'a> Transformer<'a> {
    fn new(ctx: &TransformContext<'a>, current: &'a str, depth: usize) -> Self {
        Self {
            markdown: ctx.markdown,
            links: LinkContext::new(ctx.symbols, current).at_depth(depth),
        }
    }

    fn markdown(&self, text: &str) -> String {
        self.markdown
            .render(&references::resolve_links(text, &self.links))
    }

    fn inline(&self, text: &str) -> String {
        self.markdown
            .render_inline(&references::resolve_links(text, &self.links))
    }

    fn ty(&self, ty: &str) -> String {
        references::linkify_type(ty, &self.links)
    }

    fn deprecation(&self, field: Option<&Deprecation>, tags: &[JsDocTag]) -> (bool, Option<String>) {
        let DeprecationInfo {
            is_deprecated,
            message,
        } = js_doc::resolve_deprecation(field, tags);
        (is_deprecated, message.map(|m| self.inline(&m)))
    }

    fn malformed(&self, what: &str, reason: impl Into<String>) -> RefdocsError {
        RefdocsError::malformed(self.links.current, what, reason)
    }

    fn entry(&self, info: &EntryInfo, module_name: &str, body: RenderableBody) -> RenderableEntry {
        let (is_deprecated, deprecation_message) =
            self.deprecation(info.deprecated.as_ref(), &info.jsdoc_tags);
        let usage_notes =
            js_doc::resolve_usage_notes(info.usage_notes.as_deref(), &info.jsdoc_tags);

        RenderableEntry {
            name: info.name.clone(),
            entry_type: info.entry_type.as_str().to_string(),
            category: info.entry_type.display_name().to_string(),
            module_name: module_label(module_name),
            html_description: self.markdown(&info.description),
            html_usage_notes: usage_notes.map(|notes| self.markdown(notes)),
            is_deprecated,
            deprecation_message,
            badges: js_doc::badges(&info.jsdoc_tags),
            see_also: js_doc::tags_named(&info.jsdoc_tags, "see")
                .map(|tag| self.inline(tag.comment.trim()))
                .filter(|s| !s.is_empty())
                .collect(),
            examples: js_doc::tags_named(&info.jsdoc_tags, "example")
                .filter(|tag| !tag.comment.trim().is_empty())
                .map(|tag| self.example(&tag.comment))
                .collect(),
            source: info.source.clone(),
            body,
        }
    }

    /// Bare example code gets a TypeScript fence; Markdown passes through.
    fn example(&self, comment: &str) -> String {
        if comment.contains("```") {
            self.markdown(comment)
        } else {
            self.markdown(&format!("```typescript\n{}\n```", comment.trim()))
        }
    }

    fn class(&self, class: &ClassEntry, keyword: &str) -> RefdocsResult<RenderableClass> {
        Ok(RenderableClass {
            declaration: self.ty(&class.declaration(keyword)),
            selector: class.selector.clone(),
            export_as: class.export_as.clone(),
            pipe_name: class.pipe_name.clone(),
            is_standalone: class.is_standalone,
            members: self.members(&class.members)?,
        })
    }

    /// Members in declaration order. Methods sharing a name collapse into
    /// the group created by their first occurrence.
    fn members(&self, members: &[MemberEntry]) -> RefdocsResult<Vec<RenderableMember>> {
        let mut rendered: Vec<RenderableMember> = Vec::with_capacity(members.len());
        let mut method_groups: IndexMap<&str, usize> = IndexMap::new();

        for member in members {
            let info = member.info();
            if info.name.trim().is_empty() {
                return Err(self.malformed(
                    "member",
                    format!("{} member has no name", member.member_type()),
                ));
            }

            match member {
                MemberEntry::Method(method) => {
                    let overload = self.signature(
                        &info.name,
                        &method.signature(),
                        info.deprecated.as_ref(),
                    )?;
                    if let Some(&idx) = method_groups.get(info.name.as_str()) {
                        let group = &mut rendered[idx];
                        group.is_deprecated &= overload.is_deprecated;
                        group.overloads.push(overload);
                        group.is_overloaded = true;
                    } else {
                        method_groups.insert(info.name.as_str(), rendered.len());
                        let mut group = self.member(member, info);
                        group.html_description = String::new();
                        group.is_method = true;
                        group.is_deprecated = overload.is_deprecated;
                        group.overloads.push(overload);
                        rendered.push(group);
                    }
                }
                MemberEntry::Property(property)
                | MemberEntry::Getter(property)
                | MemberEntry::Setter(property) => {
                    let mut rendered_member = self.member(member, info);
                    rendered_member.type_html = Some(self.ty(&property.ty));
                    rendered_member.alias = property_alias(property);
                    if property.is_required_input == Some(true) && !info.has_tag("required") {
                        rendered_member.tags.push("required".to_string());
                    }
                    rendered.push(rendered_member);
                }
                MemberEntry::EnumItem(item) => {
                    let mut rendered_member = self.member(member, info);
                    rendered_member.type_html = (!item.ty.is_empty()).then(|| self.ty(&item.ty));
                    rendered_member.value = item.value.clone();
                    rendered.push(rendered_member);
                }
            }
        }

        Ok(rendered)
    }

    fn member(&self, member: &MemberEntry, info: &MemberInfo) -> RenderableMember {
        let (is_deprecated, deprecation_message) =
            self.deprecation(info.deprecated.as_ref(), &info.jsdoc_tags);
        RenderableMember {
            name: info.name.clone(),
            anchor: references::anchor(&info.name),
            member_type: member.member_type().to_string(),
            tags: info.member_tags.clone(),
            type_html: None,
            alias: None,
            value: None,
            html_description: self.markdown(&info.description),
            is_deprecated,
            deprecation_message,
            is_method: false,
            is_overloaded: false,
            overloads: Vec::new(),
        }
    }

    fn callable(&self, name: &str, set: &CallableSet) -> RefdocsResult<RenderableCallable> {
        Ok(RenderableCallable {
            name: name.to_string(),
            anchor: references::anchor(name),
            overloads: set
                .signatures()
                .iter()
                .map(|sig| self.signature(name, sig, None))
                .collect::<RefdocsResult<Vec<_>>>()?,
        })
    }

    fn signature(
        &self,
        name: &str,
        sig: &FunctionSignature,
        deprecated: Option<&Deprecation>,
    ) -> RefdocsResult<RenderableSignature> {
        let params = sig
            .params
            .iter()
            .map(|param| self.parameter(param, &sig.jsdoc_tags))
            .collect::<RefdocsResult<Vec<_>>>()?;
        let (is_deprecated, deprecation_message) = self.deprecation(deprecated, &sig.jsdoc_tags);

        Ok(RenderableSignature {
            code: self.signature_code(name, sig),
            html_description: self.markdown(&sig.description),
            params,
            return_type: self.ty(sig.return_type_or_void()),
            returns_description: js_doc::find_tag(&sig.jsdoc_tags, "returns")
                .map(|tag| self.inline(tag.comment.trim()))
                .filter(|s| !s.is_empty()),
            html_usage_notes: js_doc::resolve_usage_notes(None, &sig.jsdoc_tags)
                .map(|notes| self.markdown(notes)),
            is_deprecated,
            deprecation_message,
        })
    }

    fn signature_code(&self, name: &str, sig: &FunctionSignature) -> String {
        sig.declaration_with(
            name,
            |text| html_escape::encode_text(text).into_owned(),
            |ty| self.ty(ty),
        )
    }

    fn parameter(
        &self,
        param: &ParameterEntry,
        tags: &[JsDocTag],
    ) -> RefdocsResult<RenderableParameter> {
        if param.name.trim().is_empty() {
            return Err(self.malformed("parameter", "parameter has no name"));
        }
        let description = if param.description.trim().is_empty() {
            param_tag_description(tags, &param.name).unwrap_or_default()
        } else {
            param.description.as_str()
        };

        Ok(RenderableParameter {
            name: param.name.clone(),
            type_html: self.ty(&param.ty),
            html_description: self.inline(description),
            is_optional: param.is_optional,
            is_rest_param: param.is_rest_param,
        })
    }

    fn cli_option(&self, option: &CliOption) -> RenderableCliOption {
        let (is_deprecated, deprecation_message) =
            self.deprecation(option.deprecated.as_ref(), &[]);
        let display_name = if option.is_positional() {
            format!("<{}>", option.name)
        } else {
            format!("--{}", option.name)
        };

        RenderableCliOption {
            name: option.name.clone(),
            display_name,
            aliases: option
                .aliases
                .iter()
                .map(|alias| {
                    if alias.chars().count() == 1 {
                        format!("-{}", alias)
                    } else {
                        format!("--{}", alias)
                    }
                })
                .collect(),
            ty: option.ty.clone(),
            html_description: self.inline(&option.description),
            default: option.default.as_ref().map(display_value),
            allowed_values: option.allowed_values.iter().map(display_value).collect(),
            is_deprecated,
            deprecation_message,
        }
    }
}

fn property_alias(property: &PropertyMember) -> Option<String> {
    property
        .input_alias
        .as_ref()
        .or(property.output_alias.as_ref())
        .filter(|alias| **alias != property.info.name)
        .cloned()
}

/// `@param name description` -> `description`
fn param_tag_description<'t>(tags: &'t [JsDocTag], name: &str) -> Option<&'t str> {
    js_doc::tags_named(tags, "param").find_map(|tag| {
        let comment = tag.comment.trim();
        let (tag_name, rest) = comment
            .split_once(char::is_whitespace)
            .unwrap_or((comment, ""));
        (tag_name == name).then(|| rest.trim())
    })
}

fn cli_renderable(
    cmd: &CliCommandEntry,
    ctx: &TransformContext<'_>,
) -> RefdocsResult<RenderableEntry> {
    let parent = cmd
        .parent
        .and_then(|p| resolve_parent(ctx.collections, p).map(|root| (p, root)));
    let depth = output::depth(&output::cli_filename(
        parent.map(|(_, root)| root.name.as_str()),
        &cmd.name,
    ));
    let t = Transformer::new(ctx, &cmd.name, depth);

    if let Some(option) = cmd.options.iter().find(|o| o.name.trim().is_empty()) {
        return Err(t.malformed(
            "cli",
            format!("option of type `{}` has no name", option.ty),
        ));
    }

    let mut arguments: Vec<&CliOption> = cmd.options.iter().filter(|o| o.is_positional()).collect();
    arguments.sort_by_key(|o| o.positional);
    let options = cmd.options.iter().filter(|o| !o.is_positional());

    let mut subcommands = if cmd.is_subcommand() {
        Vec::new()
    } else {
        subcommand_pages(cmd, ctx, &t)
    };
    if subcommands.is_empty() {
        // No pages of their own: list them unlinked.
        subcommands = cmd
            .subcommands
            .iter()
            .map(|sub| RenderableLink {
                name: sub.name.clone(),
                href: None,
                html_description: t.inline(&sub.short_description),
            })
            .collect();
    }

    let parent_link = parent.map(|(p, root)| RenderableLink {
        name: root.name.clone(),
        href: ctx
            .symbols
            .plan()
            .page(p.collection, 0)
            .map(|page| format!("{}{}", "../".repeat(depth), references::encode_path(page))),
        html_description: t.inline(&root.short_description),
    });

    let (is_deprecated, deprecation_message) = t.deprecation(cmd.deprecated.as_ref(), &[]);
    let label = if cmd.is_subcommand() {
        "Subcommand"
    } else {
        "Command"
    };

    Ok(RenderableEntry {
        name: cmd.name.clone(),
        entry_type: "cli".to_string(),
        category: "CLI".to_string(),
        module_name: None,
        html_description: t.markdown(cmd.description()),
        html_usage_notes: None,
        is_deprecated,
        deprecation_message,
        badges: Vec::new(),
        see_also: Vec::new(),
        examples: Vec::new(),
        source: None,
        body: RenderableBody::Cli(RenderableCli {
            command: cmd.command.clone().unwrap_or_else(|| cmd.name.clone()),
            is_subcommand: cmd.is_subcommand(),
            label: label.to_string(),
            aliases: cmd.aliases.clone(),
            parent: parent_link,
            arguments: arguments.into_iter().map(|o| t.cli_option(o)).collect(),
            options: options.map(|o| t.cli_option(o)).collect(),
            subcommands,
        }),
    })
}

/// Links to the pages of the subcommands split out of `root`
fn subcommand_pages(
    root: &CliCommandEntry,
    ctx: &TransformContext<'_>,
    t: &Transformer<'_>,
) -> Vec<RenderableLink> {
    let plan = ctx.symbols.plan();
    ctx.collections
        .iter()
        .enumerate()
        .filter_map(|(c, collection)| {
            let sub = collection.entries.first()?.as_cli()?;
            let parent = resolve_parent(ctx.collections, sub.parent?)?;
            std::ptr::eq(parent, root).then(|| RenderableLink {
                name: sub.name.clone(),
                href: plan.page(c, 0).map(references::encode_path),
                html_description: t.inline(&sub.short_description),
            })
        })
        .collect()
}
