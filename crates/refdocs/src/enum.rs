//! Enum entries

use crate::class::{MemberEntry, MemberInfo};
use crate::entry::EntryInfo;
use serde::{Deserialize, Serialize};

/// A single enum item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMemberEntry {
    #[serde(flatten)]
    pub info: MemberInfo,
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Initializer as written in source
    #[serde(default)]
    pub value: Option<String>,
}

/// An enum declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumEntry {
    #[serde(flatten)]
    pub info: EntryInfo,
    /// Items in declaration order (`memberType: "enum_item"`)
    #[serde(default)]
    pub members: Vec<MemberEntry>,
}
