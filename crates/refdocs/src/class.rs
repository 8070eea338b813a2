//! Class, interface and member entries
//!
//! Classes, components, directives, pipes, NgModules and interfaces all
//! share [`ClassEntry`]. Members are discriminated by `memberType`.

use crate::entry::EntryInfo;
use crate::function::FunctionSignature;
use crate::js_doc::{Deprecation, JsDocTag};
use crate::params::{generics_to_typescript, GenericEntry, ParameterEntry};
use crate::r#enum::EnumMemberEntry;
use serde::{Deserialize, Serialize};

/// Fields shared by every member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub name: String,
    /// Modifiers such as `static`, `readonly`, `protected`, `optional`,
    /// `input`, `output`
    #[serde(default)]
    pub member_tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub jsdoc_tags: Vec<JsDocTag>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
}

impl MemberInfo {
    /// Create member info with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether the member carries the given modifier
    pub fn has_tag(&self, tag: &str) -> bool {
        self.member_tags.iter().any(|t| t == tag)
    }
}

/// Property, getter or setter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMember {
    #[serde(flatten)]
    pub info: MemberInfo,
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Public name when the property is an aliased input
    #[serde(default)]
    pub input_alias: Option<String>,
    /// Public name when the property is an aliased output
    #[serde(default)]
    pub output_alias: Option<String>,
    #[serde(default)]
    pub is_required_input: Option<bool>,
}

/// Method member; overloads appear as several methods sharing a name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMember {
    #[serde(flatten)]
    pub info: MemberInfo,
    #[serde(default)]
    pub params: Vec<ParameterEntry>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub generics: Vec<GenericEntry>,
}

impl MethodMember {
    /// This method as a standalone signature
    pub fn signature(&self) -> FunctionSignature {
        FunctionSignature {
            description: self.info.description.clone(),
            jsdoc_tags: self.info.jsdoc_tags.clone(),
            params: self.params.clone(),
            return_type: self.return_type.clone(),
            generics: self.generics.clone(),
        }
    }
}

/// A class, interface or enum member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "memberType", rename_all = "snake_case")]
pub enum MemberEntry {
    Property(PropertyMember),
    Method(MethodMember),
    Getter(PropertyMember),
    Setter(PropertyMember),
    EnumItem(EnumMemberEntry),
}

impl MemberEntry {
    /// Shared member fields
    pub fn info(&self) -> &MemberInfo {
        match self {
            MemberEntry::Property(p) | MemberEntry::Getter(p) | MemberEntry::Setter(p) => &p.info,
            MemberEntry::Method(m) => &m.info,
            MemberEntry::EnumItem(e) => &e.info,
        }
    }

    /// Member name
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// `memberType` tag
    pub fn member_type(&self) -> &'static str {
        match self {
            MemberEntry::Property(_) => "property",
            MemberEntry::Method(_) => "method",
            MemberEntry::Getter(_) => "getter",
            MemberEntry::Setter(_) => "setter",
            MemberEntry::EnumItem(_) => "enum_item",
        }
    }
}

/// Class-like entry or interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    #[serde(flatten)]
    pub info: EntryInfo,
    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<MemberEntry>,
    #[serde(default)]
    pub generics: Vec<GenericEntry>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub is_abstract: bool,
    /// Directive/component selector
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub export_as: Vec<String>,
    /// Pipe name used in templates
    #[serde(default)]
    pub pipe_name: Option<String>,
    #[serde(default)]
    pub is_standalone: Option<bool>,
}

impl ClassEntry {
    /// Declaration line, e.g. `abstract class Foo<T> extends Bar implements Baz`
    pub fn declaration(&self, keyword: &str) -> String {
        let mut sig = String::new();
        if self.is_abstract {
            sig.push_str("abstract ");
        }
        sig.push_str(keyword);
        sig.push(' ');
        sig.push_str(&self.info.name);
        sig.push_str(&generics_to_typescript(&self.generics));
        if let Some(ref ext) = self.extends {
            sig.push_str(" extends ");
            sig.push_str(ext);
        }
        if !self.implements.is_empty() {
            sig.push_str(" implements ");
            sig.push_str(&self.implements.join(", "));
        }
        sig
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_members_decode_by_member_type() {
        let class: ClassEntry = serde_json::from_value(json!({
            "name": "Router",
            "entryType": "class",
            "members": [
                {"name": "url", "memberType": "getter", "type": "string", "memberTags": ["readonly"]},
                {"name": "navigate", "memberType": "method", "params": [], "returnType": "Promise<boolean>"},
                {"name": "events", "memberType": "property", "type": "Observable<Event>"}
            ]
        }))
        .unwrap();

        assert_eq!(class.info.entry_type, EntryType::Class);
        let kinds: Vec<_> = class.members.iter().map(|m| m.member_type()).collect();
        assert_eq!(kinds, vec!["getter", "method", "property"]);
        assert!(class.members[0].info().has_tag("readonly"));
        assert_eq!(class.members[1].name(), "navigate");
    }

    #[test]
    fn test_unknown_member_type_fails() {
        let result: Result<ClassEntry, _> = serde_json::from_value(json!({
            "name": "Odd",
            "entryType": "class",
            "members": [{"name": "x", "memberType": "constructor"}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_declaration() {
        let mut class: ClassEntry = serde_json::from_value(json!({
            "name": "Store",
            "entryType": "class",
            "generics": [{"name": "T"}],
            "extends": "Base<T>",
            "implements": ["OnDestroy"]
        }))
        .unwrap();
        assert_eq!(
            class.declaration("class"),
            "class Store<T> extends Base<T> implements OnDestroy"
        );

        class.is_abstract = true;
        assert!(class.declaration("class").starts_with("abstract class Store<T>"));
    }

    #[test]
    fn test_method_signature_carries_description() {
        let method = MethodMember {
            info: MemberInfo {
                description: "Does it.".into(),
                ..MemberInfo::new("run")
            },
            params: vec![ParameterEntry::new("n", "number")],
            return_type: None,
            generics: vec![],
        };
        let sig = method.signature();
        assert_eq!(sig.description, "Does it.");
        assert_eq!(
            sig.declaration_with("run", str::to_string, str::to_string),
            "run(n: number): void"
        );
    }
}
