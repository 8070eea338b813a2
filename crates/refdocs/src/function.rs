//! Function and initializer API entries
//!
//! A function arrives in one of two shapes: the flat shape (`params`,
//! `returnType`, `generics` directly on the entry) or the overloaded shape
//! (`signatures[]` plus an `implementation`). [`FunctionEntry::signatures`]
//! normalizes both into a list of overloads.

use crate::entry::EntryInfo;
use crate::js_doc::JsDocTag;
use crate::params::{generics_to_typescript, GenericEntry, ParameterEntry};
use serde::{Deserialize, Serialize};

/// One callable signature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSignature {
    /// Per-overload description (Markdown)
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub jsdoc_tags: Vec<JsDocTag>,
    #[serde(default)]
    pub params: Vec<ParameterEntry>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub generics: Vec<GenericEntry>,
}

impl FunctionSignature {
    /// Return type, defaulting to `void`
    pub fn return_type_or_void(&self) -> &str {
        self.return_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("void")
    }

    /// Render as a TypeScript declaration for `name`.
    ///
    /// Names go through `text` and types through `ty`, so callers can
    /// escape the former and link the latter.
    pub fn declaration_with<T, Y>(&self, name: &str, text: T, ty: Y) -> String
    where
        T: Fn(&str) -> String,
        Y: Fn(&str) -> String,
    {
        format!(
            "{}{}({}): {}",
            text(name),
            ty(&generics_to_typescript(&self.generics)),
            self.params
                .iter()
                .map(|param| param.declaration_with(&text, &ty))
                .collect::<Vec<_>>()
                .join(", "),
            ty(self.return_type_or_void())
        )
    }
}

/// A top-level function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEntry {
    #[serde(flatten)]
    pub info: EntryInfo,
    #[serde(default)]
    pub params: Vec<ParameterEntry>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub generics: Vec<GenericEntry>,
    /// Overload signatures, in declaration order
    #[serde(default)]
    pub signatures: Vec<FunctionSignature>,
    /// Implementation signature of an overloaded function
    #[serde(default)]
    pub implementation: Option<FunctionSignature>,
}

impl FunctionEntry {
    /// The overloads to document.
    ///
    /// Declared `signatures` win; otherwise the flat fields form a single
    /// signature that inherits the entry's description and tags.
    pub fn signatures(&self) -> Vec<FunctionSignature> {
        if !self.signatures.is_empty() {
            return self.signatures.clone();
        }
        if let Some(ref implementation) = self.implementation {
            return vec![implementation.clone()];
        }
        vec![FunctionSignature {
            description: String::new(),
            jsdoc_tags: Vec::new(),
            params: self.params.clone(),
            return_type: self.return_type.clone(),
            generics: self.generics.clone(),
        }]
    }
}

/// Callable part of an initializer API (`input()`, `viewChild()`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallableSet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub signatures: Vec<FunctionSignature>,
    #[serde(default)]
    pub implementation: Option<FunctionSignature>,
}

impl CallableSet {
    /// Signatures to document, falling back to the implementation
    pub fn signatures(&self) -> Vec<FunctionSignature> {
        if !self.signatures.is_empty() {
            self.signatures.clone()
        } else {
            self.implementation.iter().cloned().collect()
        }
    }
}

/// An initializer API function with optional sub-functions
/// (e.g. `input` and `input.required`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializerApiEntry {
    #[serde(flatten)]
    pub info: EntryInfo,
    #[serde(default)]
    pub call_function: CallableSet,
    #[serde(default)]
    pub sub_functions: Vec<CallableSet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use pretty_assertions::assert_eq;

    fn function(json: serde_json::Value) -> FunctionEntry {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_flat_shape_single_signature() {
        let f = function(serde_json::json!({
            "name": "inject",
            "entryType": "function",
            "params": [{"name": "token", "type": "ProviderToken<T>"}],
            "returnType": "T",
            "generics": [{"name": "T"}]
        }));
        assert_eq!(f.info.entry_type, EntryType::Function);

        let sigs = f.signatures();
        assert_eq!(sigs.len(), 1);
        assert_eq!(
            sigs[0].declaration_with("inject", str::to_string, str::to_string),
            "inject<T>(token: ProviderToken<T>): T"
        );
    }

    #[test]
    fn test_overloaded_shape_keeps_order() {
        let f = function(serde_json::json!({
            "name": "provide",
            "entryType": "function",
            "signatures": [
                {"params": [{"name": "a", "type": "string"}], "returnType": "void"},
                {"params": [{"name": "b", "type": "number"}]}
            ],
            "implementation": {"params": [{"name": "x", "type": "unknown"}]}
        }));

        let rendered: Vec<_> = f
            .signatures()
            .iter()
            .map(|s| s.declaration_with("provide", str::to_string, str::to_string))
            .collect();
        assert_eq!(
            rendered,
            vec!["provide(a: string): void", "provide(b: number): void"]
        );
    }

    #[test]
    fn test_callable_set_falls_back_to_implementation() {
        let set = CallableSet {
            name: "input".into(),
            signatures: vec![],
            implementation: Some(FunctionSignature::default()),
        };
        assert_eq!(set.signatures().len(), 1);
    }
}
