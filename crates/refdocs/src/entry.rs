//! Core documentation entry types
//!
//! This module provides `DocEntry`, the closed set of documented items the
//! pipeline knows how to render. Raw JSON is decoded one entry at a time
//! with [`DocEntry::from_value`]; entries that do not fit a known shape are
//! kept as [`DocEntry::Unknown`] or [`DocEntry::Malformed`] so that one bad
//! entry never poisons its collection.

use crate::class::ClassEntry;
use crate::cli::CliCommandEntry;
use crate::decorators::DecoratorEntry;
use crate::function::{FunctionEntry, InitializerApiEntry};
use crate::js_doc::{Deprecation, JsDocTag};
use crate::r#enum::EnumEntry;
use crate::type_alias::{ConstantEntry, TypeAliasEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source location recorded by the extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// Path of the declaring file
    pub file_path: String,
    /// 1-indexed first line
    #[serde(default)]
    pub start_line: usize,
    /// 1-indexed last line
    #[serde(default)]
    pub end_line: usize,
}

/// Discriminant of an API entry (`entryType` in the JSON)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Block,
    Component,
    Constant,
    Decorator,
    Directive,
    Element,
    Enum,
    Function,
    InitializerApiFunction,
    Interface,
    NgModule,
    Pipe,
    TypeAlias,
    UndecoratedClass,
    Class,
}

impl EntryType {
    /// All known entry types
    pub const ALL: [EntryType; 15] = [
        EntryType::Block,
        EntryType::Component,
        EntryType::Constant,
        EntryType::Decorator,
        EntryType::Directive,
        EntryType::Element,
        EntryType::Enum,
        EntryType::Function,
        EntryType::InitializerApiFunction,
        EntryType::Interface,
        EntryType::NgModule,
        EntryType::Pipe,
        EntryType::TypeAlias,
        EntryType::UndecoratedClass,
        EntryType::Class,
    ];

    /// Look up an entry type by its JSON tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// JSON tag for this entry type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Block => "block",
            EntryType::Component => "component",
            EntryType::Constant => "constant",
            EntryType::Decorator => "decorator",
            EntryType::Directive => "directive",
            EntryType::Element => "element",
            EntryType::Enum => "enum",
            EntryType::Function => "function",
            EntryType::InitializerApiFunction => "initializer_api_function",
            EntryType::Interface => "interface",
            EntryType::NgModule => "ng_module",
            EntryType::Pipe => "pipe",
            EntryType::TypeAlias => "type_alias",
            EntryType::UndecoratedClass => "undecorated_class",
            EntryType::Class => "class",
        }
    }

    /// Category label shown in page headers
    pub fn display_name(&self) -> &'static str {
        match self {
            EntryType::Block => "Block",
            EntryType::Component => "Component",
            EntryType::Constant => "Const",
            EntryType::Decorator => "Decorator",
            EntryType::Directive => "Directive",
            EntryType::Element => "Element",
            EntryType::Enum => "Enum",
            EntryType::Function => "Function",
            EntryType::InitializerApiFunction => "Initializer API",
            EntryType::Interface => "Interface",
            EntryType::NgModule => "NgModule",
            EntryType::Pipe => "Pipe",
            EntryType::TypeAlias => "Type Alias",
            EntryType::UndecoratedClass | EntryType::Class => "Class",
        }
    }

    /// Whether entries of this type decode as a [`ClassEntry`]
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            EntryType::Class
                | EntryType::UndecoratedClass
                | EntryType::Component
                | EntryType::Directive
                | EntryType::Pipe
                | EntryType::NgModule
        )
    }
}

/// Fields shared by every API entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInfo {
    /// Symbol name, unique within its module
    pub name: String,
    /// Entry discriminant
    pub entry_type: EntryType,
    /// Raw Markdown description
    #[serde(default)]
    pub description: String,
    /// Original doc comment text
    #[serde(default)]
    pub raw_comment: Option<String>,
    /// JSDoc tags in declaration order
    #[serde(default)]
    pub jsdoc_tags: Vec<JsDocTag>,
    /// Declaring file
    #[serde(default)]
    pub source: Option<SourceLocation>,
    /// Raw Markdown usage notes
    #[serde(default)]
    pub usage_notes: Option<String>,
    /// Explicit deprecation marker
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
}

impl EntryInfo {
    /// Create info with just a name and type
    pub fn new(name: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            name: name.into(),
            entry_type,
            description: String::new(),
            raw_comment: None,
            jsdoc_tags: Vec::new(),
            source: None,
            usage_notes: None,
            deprecated: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a JSDoc tag
    pub fn with_tag(mut self, tag: JsDocTag) -> Self {
        self.jsdoc_tags.push(tag);
        self
    }
}

/// Entry whose `entryType` is not one we render
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownEntry {
    pub name: String,
    /// Raw `entryType` (empty when absent)
    pub entry_type: String,
    /// The entry as extracted
    pub raw: Value,
}

/// Entry of a known kind that failed to decode
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedEntry {
    pub name: String,
    pub entry_type: String,
    pub reason: String,
}

/// A documented API or CLI element
#[derive(Debug, Clone, PartialEq)]
pub enum DocEntry {
    /// Class-like entries: classes, components, directives, pipes, NgModules
    Class(ClassEntry),
    Interface(ClassEntry),
    Function(FunctionEntry),
    InitializerApi(InitializerApiEntry),
    Constant(ConstantEntry),
    TypeAlias(TypeAliasEntry),
    Enum(EnumEntry),
    Decorator(DecoratorEntry),
    /// Template blocks and elements (description only)
    Block(EntryInfo),
    CliCommand(CliCommandEntry),
    Unknown(UnknownEntry),
    Malformed(MalformedEntry),
}

impl DocEntry {
    /// Decode one raw entry.
    ///
    /// Never fails: entries that cannot be decoded become `Unknown` or
    /// `Malformed` and are rejected later, per entry.
    pub fn from_value(value: Value) -> DocEntry {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let tag = match value.get("entryType") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => {
                return DocEntry::Malformed(MalformedEntry {
                    name,
                    entry_type: other.to_string(),
                    reason: "entryType must be a string".to_string(),
                })
            }
            None if is_cli_shape(&value) => return decode_cli(name, value),
            None => {
                return DocEntry::Unknown(UnknownEntry {
                    name,
                    entry_type: String::new(),
                    raw: value,
                })
            }
        };

        let Some(entry_type) = EntryType::from_tag(&tag) else {
            return DocEntry::Unknown(UnknownEntry {
                name,
                entry_type: tag,
                raw: value,
            });
        };

        if name.is_empty() {
            return DocEntry::Malformed(MalformedEntry {
                name,
                entry_type: tag,
                reason: "entry has no name".to_string(),
            });
        }

        decode_api(entry_type, value).unwrap_or_else(|err| {
            DocEntry::Malformed(MalformedEntry {
                name,
                entry_type: tag,
                reason: err.to_string(),
            })
        })
    }

    /// Symbol or command name
    pub fn name(&self) -> &str {
        match self {
            DocEntry::Class(e) | DocEntry::Interface(e) => &e.info.name,
            DocEntry::Function(e) => &e.info.name,
            DocEntry::InitializerApi(e) => &e.info.name,
            DocEntry::Constant(e) => &e.info.name,
            DocEntry::TypeAlias(e) => &e.info.name,
            DocEntry::Enum(e) => &e.info.name,
            DocEntry::Decorator(e) => &e.info.name,
            DocEntry::Block(info) => &info.name,
            DocEntry::CliCommand(e) => &e.name,
            DocEntry::Unknown(e) => &e.name,
            DocEntry::Malformed(e) => &e.name,
        }
    }

    /// Shared API fields (`None` for CLI, unknown and malformed entries)
    pub fn info(&self) -> Option<&EntryInfo> {
        match self {
            DocEntry::Class(e) | DocEntry::Interface(e) => Some(&e.info),
            DocEntry::Function(e) => Some(&e.info),
            DocEntry::InitializerApi(e) => Some(&e.info),
            DocEntry::Constant(e) => Some(&e.info),
            DocEntry::TypeAlias(e) => Some(&e.info),
            DocEntry::Enum(e) => Some(&e.info),
            DocEntry::Decorator(e) => Some(&e.info),
            DocEntry::Block(info) => Some(info),
            DocEntry::CliCommand(_) | DocEntry::Unknown(_) | DocEntry::Malformed(_) => None,
        }
    }

    /// The raw `entryType` tag, as used in output file names
    pub fn entry_type_tag(&self) -> &str {
        match self {
            DocEntry::CliCommand(_) => "cli",
            DocEntry::Unknown(e) => &e.entry_type,
            DocEntry::Malformed(e) => &e.entry_type,
            other => other
                .info()
                .map(|info| info.entry_type.as_str())
                .unwrap_or_default(),
        }
    }

    /// Whether this is a CLI command or subcommand
    pub fn is_cli(&self) -> bool {
        matches!(self, DocEntry::CliCommand(_))
    }

    /// The CLI payload, if this is a CLI entry
    pub fn as_cli(&self) -> Option<&CliCommandEntry> {
        match self {
            DocEntry::CliCommand(cmd) => Some(cmd),
            _ => None,
        }
    }
}

/// CLI commands carry no `entryType`; they are recognized by their
/// `command`/`subcommands` fields.
fn is_cli_shape(value: &Value) -> bool {
    value.get("command").is_some() || value.get("subcommands").is_some()
}

fn decode_cli(name: String, value: Value) -> DocEntry {
    match serde_json::from_value::<CliCommandEntry>(value) {
        Ok(cmd) if !cmd.name.is_empty() => DocEntry::CliCommand(cmd),
        Ok(_) => DocEntry::Malformed(MalformedEntry {
            name,
            entry_type: "cli".to_string(),
            reason: "command has no name".to_string(),
        }),
        Err(err) => DocEntry::Malformed(MalformedEntry {
            name,
            entry_type: "cli".to_string(),
            reason: err.to_string(),
        }),
    }
}

fn decode_api(entry_type: EntryType, value: Value) -> Result<DocEntry, serde_json::Error> {
    let entry = match entry_type {
        t if t.is_class_like() => DocEntry::Class(serde_json::from_value(value)?),
        EntryType::Interface => DocEntry::Interface(serde_json::from_value(value)?),
        EntryType::Function => DocEntry::Function(serde_json::from_value(value)?),
        EntryType::InitializerApiFunction => {
            DocEntry::InitializerApi(serde_json::from_value(value)?)
        }
        EntryType::Constant => DocEntry::Constant(serde_json::from_value(value)?),
        EntryType::TypeAlias => DocEntry::TypeAlias(serde_json::from_value(value)?),
        EntryType::Enum => DocEntry::Enum(serde_json::from_value(value)?),
        EntryType::Decorator => DocEntry::Decorator(serde_json::from_value(value)?),
        EntryType::Block | EntryType::Element => DocEntry::Block(serde_json::from_value(value)?),
        // Class-like types are handled by the guard above.
        _ => DocEntry::Class(serde_json::from_value(value)?),
    };
    Ok(entry)
}
