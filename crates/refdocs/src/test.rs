//! Test utilities and mock entries for refdocs.
//!
//! Mock builders for every entry kind the pipeline renders, plus a few
//! collection-level fixtures.
//!
//! # Example
//!
//! ```
//! use refdocs::test::{mock_class, mock_method, mock_collection};
//!
//! let class = mock_class("Router", vec![mock_method("navigate", vec![])]);
//! let collection = mock_collection("@angular/router", vec![class]);
//! assert_eq!(collection.entries.len(), 1);
//! ```

use crate::class::{ClassEntry, MemberEntry, MemberInfo, MethodMember, PropertyMember};
use crate::cli::{CliCommandEntry, CliOption};
use crate::collection::EntryCollection;
use crate::entry::{DocEntry, EntryInfo, EntryType};
use crate::function::FunctionEntry;
use crate::params::ParameterEntry;
use crate::r#enum::{EnumEntry, EnumMemberEntry};
use crate::type_alias::ConstantEntry;
use std::path::Path;

/// Create entry info with a generated description.
pub fn mock_info(name: &str, entry_type: EntryType) -> EntryInfo {
    EntryInfo::new(name, entry_type)
        .with_description(format!("Mock {} {}.", entry_type.as_str(), name))
}

/// Create a mock class entry with the given members.
///
/// # Example
///
/// ```
/// use refdocs::test::mock_class;
///
/// let entry = mock_class("Injector", vec![]);
/// assert_eq!(entry.name(), "Injector");
/// ```
pub fn mock_class(name: &str, members: Vec<MemberEntry>) -> DocEntry {
    DocEntry::Class(mock_class_entry(name, EntryType::Class, members))
}

/// Create a mock interface entry with the given members.
pub fn mock_interface(name: &str, members: Vec<MemberEntry>) -> DocEntry {
    DocEntry::Interface(mock_class_entry(name, EntryType::Interface, members))
}

fn mock_class_entry(name: &str, entry_type: EntryType, members: Vec<MemberEntry>) -> ClassEntry {
    ClassEntry {
        info: mock_info(name, entry_type),
        members,
        generics: vec![],
        extends: None,
        implements: vec![],
        is_abstract: false,
        selector: None,
        export_as: vec![],
        pipe_name: None,
        is_standalone: None,
    }
}

/// Create a mock function returning `void`.
pub fn mock_function(name: &str) -> DocEntry {
    mock_function_with_params(name, vec![], None)
}

/// Create a mock function with parameters and a return type.
pub fn mock_function_with_params(
    name: &str,
    params: Vec<ParameterEntry>,
    return_type: Option<&str>,
) -> DocEntry {
    DocEntry::Function(FunctionEntry {
        info: mock_info(name, EntryType::Function),
        params,
        return_type: return_type.map(String::from),
        generics: vec![],
        signatures: vec![],
        implementation: None,
    })
}

/// Create a mock constant.
pub fn mock_constant(name: &str, ty: &str) -> DocEntry {
    DocEntry::Constant(ConstantEntry {
        info: mock_info(name, EntryType::Constant),
        ty: ty.to_string(),
    })
}

/// Create a mock enum with items `name = index`.
pub fn mock_enum(name: &str, items: &[&str]) -> DocEntry {
    DocEntry::Enum(EnumEntry {
        info: mock_info(name, EntryType::Enum),
        members: items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                MemberEntry::EnumItem(EnumMemberEntry {
                    info: MemberInfo::new(*item),
                    ty: format!("{}.{}", name, item),
                    value: Some(i.to_string()),
                })
            })
            .collect(),
    })
}

/// Create a mock method member.
pub fn mock_method(name: &str, params: Vec<ParameterEntry>) -> MemberEntry {
    MemberEntry::Method(MethodMember {
        info: MemberInfo {
            description: format!("Mock method {}.", name),
            ..MemberInfo::new(name)
        },
        params,
        return_type: Some("void".to_string()),
        generics: vec![],
    })
}

/// Create a mock property member.
pub fn mock_property(name: &str, ty: &str) -> MemberEntry {
    MemberEntry::Property(PropertyMember {
        info: MemberInfo::new(name),
        ty: ty.to_string(),
        ..Default::default()
    })
}

/// Create a mock string parameter.
pub fn mock_string_param(name: &str) -> ParameterEntry {
    ParameterEntry::new(name, "string")
}

/// Create a mock collection.
pub fn mock_collection(module_name: &str, entries: Vec<DocEntry>) -> EntryCollection {
    EntryCollection::new(module_name, entries)
}

/// Create a mock CLI command with one flag option.
pub fn mock_cli_command(name: &str) -> CliCommandEntry {
    let mut cmd = CliCommandEntry::new(name);
    cmd.command = Some(format!("{} [options]", name));
    cmd.short_description = format!("Mock command {}.", name);
    cmd.options = vec![CliOption {
        name: "verbose".to_string(),
        ty: "boolean".to_string(),
        description: "Print more output.".to_string(),
        default: Some(serde_json::Value::Bool(false)),
        allowed_values: vec![],
        aliases: vec!["v".to_string()],
        positional: None,
        deprecated: None,
    }];
    cmd
}

/// Expand a mock CLI tree into collections the way the parser does.
pub fn mock_cli_tree(root: &str, subcommands: &[&str]) -> Vec<EntryCollection> {
    let mut cmd = mock_cli_command(root);
    cmd.subcommands = subcommands.iter().map(|s| mock_cli_command(s)).collect();

    let json = serde_json::to_string(&cmd).unwrap_or_default();
    let mut collections = Vec::new();
    // A serialized mock tree always parses; an empty list signals otherwise.
    let _ = crate::collection::parse_collection_json(
        &json,
        Path::new("mock-cli.json"),
        &mut collections,
    );
    collections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_class() {
        let entry = mock_class("Foo", vec![mock_method("bar", vec![])]);
        assert_eq!(entry.name(), "Foo");
        assert_eq!(entry.entry_type_tag(), "class");
    }

    #[test]
    fn test_mock_cli_tree() {
        let collections = mock_cli_tree("ng", &["build", "serve"]);
        assert_eq!(collections.len(), 3);
        assert!(collections[1].entries[0].as_cli().unwrap().is_subcommand());
    }

    #[test]
    fn test_mock_enum() {
        let DocEntry::Enum(e) = mock_enum("Color", &["Red", "Green"]) else {
            panic!("expected enum");
        };
        assert_eq!(e.members.len(), 2);
    }
}
