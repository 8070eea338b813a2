//! Entry collection parsing
//!
//! Reads extracted JSON files and normalizes them into
//! [`EntryCollection`]s. Three payload shapes are accepted:
//!
//! - a module collection `{ moduleName, entries: [...] }`, used as-is;
//! - a CLI command tree `{ name, subcommands: [...] }`, split into one
//!   collection for the root followed by one per subcommand;
//! - anything else that is an object, wrapped as a single-entry collection.
//!
//! Malformed JSON or a collection missing its required fields aborts the
//! whole run. Individual entries never do; see [`DocEntry::from_value`].

use crate::cli::{CliCommandEntry, ParentCommand};
use crate::diagnostics::{RefdocsError, RefdocsResult};
use crate::entry::{DocEntry, MalformedEntry};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Module name given to collections synthesized from bare entries and CLI trees
pub const UNKNOWN_MODULE: &str = "unknown";

/// Entries extracted from one logical module or CLI command file
#[derive(Debug, Clone, PartialEq)]
pub struct EntryCollection {
    /// Module specifier, e.g. `@angular/core`
    pub module_name: String,
    /// Entries in extraction order
    pub entries: Vec<DocEntry>,
}

impl EntryCollection {
    /// Create a collection
    pub fn new(module_name: impl Into<String>, entries: Vec<DocEntry>) -> Self {
        Self {
            module_name: module_name.into(),
            entries,
        }
    }

    /// Wrap a single entry under the `unknown` module
    pub fn single(entry: DocEntry) -> Self {
        Self::new(UNKNOWN_MODULE, vec![entry])
    }
}

/// Parse every input file, in order, into collections.
pub fn parse_entry_files<P: AsRef<Path>>(paths: &[P]) -> RefdocsResult<Vec<EntryCollection>> {
    let mut collections = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| RefdocsError::parse(path, format!("failed to read file: {}", e)))?;
        let before = collections.len();
        parse_collection_json(&content, path, &mut collections)?;
        tracing::debug!(
            "parsed {} into {} collection(s)",
            path.display(),
            collections.len() - before
        );
    }
    Ok(collections)
}

/// Parse one JSON document and append the resulting collections.
///
/// Appending (rather than returning a fresh list) lets CLI subcommands
/// record the absolute index of their root command's collection.
pub fn parse_collection_json(
    content: &str,
    file: &Path,
    collections: &mut Vec<EntryCollection>,
) -> RefdocsResult<()> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| RefdocsError::parse(file, e.to_string()))?;

    let Value::Object(mut map) = value else {
        return Err(RefdocsError::collection(
            file,
            "expected a JSON object at the top level",
        ));
    };

    if let Some(entries) = map.remove("entries") {
        collections.push(module_collection(file, &map, entries)?);
        return Ok(());
    }

    if map.contains_key("subcommands") {
        expand_cli_tree(file, map, collections)?;
        return Ok(());
    }

    collections.push(EntryCollection::single(DocEntry::from_value(Value::Object(
        map,
    ))));
    Ok(())
}

fn module_collection(
    file: &Path,
    map: &Map<String, Value>,
    entries: Value,
) -> RefdocsResult<EntryCollection> {
    let Value::Array(entries) = entries else {
        return Err(RefdocsError::collection(file, "`entries` must be an array"));
    };
    let module_name = map
        .get("moduleName")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            RefdocsError::collection(file, "missing required string field `moduleName`")
        })?;

    Ok(EntryCollection::new(
        module_name,
        entries.into_iter().map(DocEntry::from_value).collect(),
    ))
}

fn expand_cli_tree(
    file: &Path,
    map: Map<String, Value>,
    collections: &mut Vec<EntryCollection>,
) -> RefdocsResult<()> {
    let mut root: CliCommandEntry = serde_json::from_value(Value::Object(map))
        .map_err(|e| RefdocsError::collection(file, format!("invalid CLI command: {}", e)))?;
    if root.name.is_empty() {
        return Err(RefdocsError::collection(
            file,
            "CLI command is missing its `name`",
        ));
    }

    let parent = ParentCommand {
        collection: collections.len(),
    };
    let subcommands: Vec<DocEntry> = root
        .subcommands
        .iter()
        .enumerate()
        .map(|(position, sub)| {
            if sub.name.trim().is_empty() {
                return DocEntry::Malformed(MalformedEntry {
                    name: String::new(),
                    entry_type: "cli".to_string(),
                    reason: format!(
                        "subcommand #{} of `{}` has no name",
                        position + 1,
                        root.name
                    ),
                });
            }
            let mut sub = sub.clone();
            sub.parent = Some(parent);
            DocEntry::CliCommand(sub)
        })
        .collect();
    root.subcommands.retain(|sub| !sub.name.trim().is_empty());

    collections.push(EntryCollection::single(DocEntry::CliCommand(root)));
    collections.extend(subcommands.into_iter().map(EntryCollection::single));
    Ok(())
}

/// Look up the root command a subcommand points at.
pub fn resolve_parent(
    collections: &[EntryCollection],
    parent: ParentCommand,
) -> Option<&CliCommandEntry> {
    collections
        .get(parent.collection)?
        .entries
        .first()?
        .as_cli()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(json: &str) -> RefdocsResult<Vec<EntryCollection>> {
        let mut out = Vec::new();
        parse_collection_json(json, Path::new("test.json"), &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_module_collection_round_trip() {
        let collections = parse(
            r#"{
                "moduleName": "@x/y",
                "entries": [
                    {"name": "b", "entryType": "function", "params": []},
                    {"name": "a", "entryType": "constant", "type": "string"},
                    {"name": "c", "entryType": "interface", "members": []}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].module_name, "@x/y");
        let names: Vec<_> = collections[0].entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        let tags: Vec<_> = collections[0]
            .entries
            .iter()
            .map(|e| e.entry_type_tag())
            .collect();
        assert_eq!(tags, vec!["function", "constant", "interface"]);
    }

    #[test]
    fn test_cli_tree_expansion() {
        let collections = parse(
            r#"{
                "name": "ng",
                "command": "ng",
                "subcommands": [
                    {"name": "build", "command": "ng build"},
                    {"name": "serve", "command": "ng serve"},
                    {"name": "test", "command": "ng test"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(collections.len(), 4);
        for collection in &collections {
            assert_eq!(collection.module_name, UNKNOWN_MODULE);
            assert_eq!(collection.entries.len(), 1);
        }

        let root = collections[0].entries[0].as_cli().unwrap();
        assert_eq!(root.name, "ng");
        assert!(!root.is_subcommand());
        assert_eq!(root.subcommands.len(), 3);

        let names: Vec<_> = collections[1..]
            .iter()
            .map(|c| c.entries[0].name())
            .collect();
        assert_eq!(names, vec!["build", "serve", "test"]);

        for collection in &collections[1..] {
            let sub = collection.entries[0].as_cli().unwrap();
            let parent = resolve_parent(&collections, sub.parent.unwrap()).unwrap();
            assert_eq!(parent.name, root.name);
        }
    }

    #[test]
    fn test_parent_index_is_absolute() {
        let mut collections = Vec::new();
        parse_collection_json(
            r#"{"moduleName": "@angular/core", "entries": []}"#,
            Path::new("core.json"),
            &mut collections,
        )
        .unwrap();
        parse_collection_json(
            r#"{"name": "ng", "subcommands": [{"name": "add"}]}"#,
            Path::new("cli.json"),
            &mut collections,
        )
        .unwrap();

        let sub = collections[2].entries[0].as_cli().unwrap();
        assert_eq!(sub.parent, Some(ParentCommand { collection: 1 }));
        assert_eq!(
            resolve_parent(&collections, sub.parent.unwrap()).map(|c| c.name.as_str()),
            Some("ng")
        );
    }

    #[test]
    fn test_bare_entry_is_wrapped() {
        let collections = parse(r#"{"name": "Foo", "entryType": "class"}"#).unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].module_name, "unknown");
        assert_eq!(collections[0].entries[0].name(), "Foo");
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, RefdocsError::Parse { .. }));
    }

    #[test]
    fn test_missing_module_name_is_fatal() {
        let err = parse(r#"{"entries": []}"#).unwrap_err();
        assert!(err.to_string().contains("moduleName"));
    }

    #[test]
    fn test_non_array_entries_is_fatal() {
        let err = parse(r#"{"moduleName": "m", "entries": {}}"#).unwrap_err();
        assert!(matches!(err, RefdocsError::Collection { .. }));
    }

    #[test]
    fn test_top_level_array_is_fatal() {
        assert!(parse("[1, 2]").is_err());
    }

    #[test]
    fn test_bad_entry_does_not_fail_collection() {
        let collections = parse(
            r#"{"moduleName": "m", "entries": [
                {"name": "ok", "entryType": "constant"},
                {"name": "weird", "entryType": "hologram"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(collections[0].entries[1], DocEntry::Unknown(_)));
    }

    #[test]
    fn test_parse_entry_files_in_order() {
        let mut first = NamedTempFile::new().unwrap();
        write!(first, r#"{{"moduleName": "@a/one", "entries": []}}"#).unwrap();
        let mut second = NamedTempFile::new().unwrap();
        write!(second, r#"{{"moduleName": "@a/two", "entries": []}}"#).unwrap();

        let collections = parse_entry_files(&[first.path(), second.path()]).unwrap();
        let modules: Vec<_> = collections.iter().map(|c| c.module_name.as_str()).collect();
        assert_eq!(modules, vec!["@a/one", "@a/two"]);
    }

    #[test]
    fn test_nameless_subcommand_is_malformed() {
        let collections = parse(
            r#"{"name": "ng", "subcommands": [{"name": "build"}, {"name": ""}]}"#,
        )
        .unwrap();

        assert_eq!(collections.len(), 3);
        let DocEntry::Malformed(bad) = &collections[2].entries[0] else {
            panic!("expected malformed subcommand");
        };
        assert_eq!(bad.entry_type, "cli");
        assert!(bad.reason.contains("#2 of `ng`"));

        let root = collections[0].entries[0].as_cli().unwrap();
        let names: Vec<_> = root.subcommands.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["build"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = parse_entry_files(&["/definitely/not/here.json"]).unwrap_err();
        assert!(matches!(err, RefdocsError::Parse { .. }));
    }
}
