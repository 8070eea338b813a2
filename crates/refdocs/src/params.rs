//! Parameter and generic type parameter entries
//!
//! Shared by functions, methods, decorators and initializer APIs.

use serde::{Deserialize, Serialize};

/// A function or method parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterEntry {
    /// Parameter name
    pub name: String,
    /// Raw Markdown description (from `@param`)
    #[serde(default)]
    pub description: String,
    /// TypeScript type as written
    #[serde(rename = "type", default)]
    pub ty: String,
    /// `name?: T`
    #[serde(default)]
    pub is_optional: bool,
    /// `...name: T[]`
    #[serde(default)]
    pub is_rest_param: bool,
}

impl ParameterEntry {
    /// Create a parameter with a name and type
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Declaration of the parameter, e.g. `...args?: T[]`, with the name
    /// passed through `text` and the type through `ty`
    pub fn declaration_with<T, Y>(&self, text: T, ty: Y) -> String
    where
        T: Fn(&str) -> String,
        Y: Fn(&str) -> String,
    {
        let mut out = String::new();
        if self.is_rest_param {
            out.push_str("...");
        }
        out.push_str(&text(&self.name));
        if self.is_optional {
            out.push('?');
        }
        if !self.ty.is_empty() {
            out.push_str(": ");
            out.push_str(&ty(&self.ty));
        }
        out
    }
}

/// A generic type parameter, e.g. `T extends object = {}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericEntry {
    pub name: String,
    #[serde(default)]
    pub constraint: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
}

impl GenericEntry {
    /// Create a bare type parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl std::fmt::Display for GenericEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref constraint) = self.constraint {
            write!(f, " extends {}", constraint)?;
        }
        if let Some(ref default) = self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// Render a generic parameter list, e.g. `<T, U extends T>`; empty when
/// there are no generics.
pub fn generics_to_typescript(generics: &[GenericEntry]) -> String {
    if generics.is_empty() {
        return String::new();
    }
    format!(
        "<{}>",
        generics
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}
