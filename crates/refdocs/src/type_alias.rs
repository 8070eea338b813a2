//! Constant and type alias entries

use crate::entry::EntryInfo;
use crate::params::{generics_to_typescript, GenericEntry};
use serde::{Deserialize, Serialize};

/// An exported constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantEntry {
    #[serde(flatten)]
    pub info: EntryInfo,
    #[serde(rename = "type", default)]
    pub ty: String,
}

impl ConstantEntry {
    /// Declaration, e.g. `const VERSION: Version`
    pub fn declaration(&self) -> String {
        if self.ty.is_empty() {
            format!("const {}", self.info.name)
        } else {
            format!("const {}: {}", self.info.name, self.ty)
        }
    }
}

/// A type alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasEntry {
    #[serde(flatten)]
    pub info: EntryInfo,
    /// Aliased type
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default)]
    pub generics: Vec<GenericEntry>,
}

impl TypeAliasEntry {
    /// Left-hand side of the alias, e.g. `type Mutable<T>`
    pub fn head(&self) -> String {
        format!(
            "type {}{}",
            self.info.name,
            generics_to_typescript(&self.generics)
        )
    }
}
