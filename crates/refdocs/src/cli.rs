//! CLI command entries
//!
//! CLI reference data is a two-level tree: a root command owning its
//! subcommands. When the tree is split into one collection per page, a
//! subcommand keeps a [`ParentCommand`] index pointing back at the root's
//! collection instead of a copy of the root itself.

use crate::js_doc::Deprecation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Non-owning link from a subcommand to its root command.
///
/// `collection` indexes the run's collection list; the root command is
/// the single entry of that collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentCommand {
    pub collection: usize,
}

/// A CLI option or positional argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOption {
    pub name: String,
    /// Value type (`string`, `boolean`, `number`, ...)
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default)]
    pub description: String,
    /// Default value, any JSON scalar
    #[serde(default)]
    pub default: Option<Value>,
    /// Allowed values
    #[serde(rename = "enum", default)]
    pub allowed_values: Vec<Value>,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Position for positional arguments
    #[serde(default)]
    pub positional: Option<u32>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
}

impl CliOption {
    /// Whether this is a positional argument rather than a flag
    pub fn is_positional(&self) -> bool {
        self.positional.is_some()
    }
}

/// Root command or subcommand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliCommandEntry {
    pub name: String,
    /// Usage line, e.g. `ng build [project]`
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub short_description: String,
    /// Long description (Markdown)
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
    #[serde(default)]
    pub options: Vec<CliOption>,
    /// Subcommands in declaration order
    #[serde(default)]
    pub subcommands: Vec<CliCommandEntry>,
    /// Set by the collection parser on synthesized subcommand entries
    #[serde(skip)]
    pub parent: Option<ParentCommand>,
}

impl CliCommandEntry {
    /// Create a command with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: None,
            short_description: String::new(),
            long_description: String::new(),
            aliases: Vec::new(),
            deprecated: None,
            options: Vec::new(),
            subcommands: Vec::new(),
            parent: None,
        }
    }

    /// Whether this is a subcommand split out of a tree
    pub fn is_subcommand(&self) -> bool {
        self.parent.is_some()
    }

    /// Description to render: the long form when present
    pub fn description(&self) -> &str {
        if self.long_description.trim().is_empty() {
            &self.short_description
        } else {
            &self.long_description
        }
    }
}

/// Render a JSON scalar the way it reads on a command line
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
