//! Decorator entries
//!
//! A decorator is documented through the options object it accepts; those
//! options arrive as property members.

use crate::class::MemberEntry;
use crate::entry::EntryInfo;
use serde::{Deserialize, Serialize};

/// Where a decorator may be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecoratorType {
    #[default]
    Class,
    Member,
    Parameter,
}

impl DecoratorType {
    /// Human-readable placement
    pub fn label(&self) -> &'static str {
        match self {
            DecoratorType::Class => "class decorator",
            DecoratorType::Member => "member decorator",
            DecoratorType::Parameter => "parameter decorator",
        }
    }
}

/// A decorator such as `@Component` or `@Input`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratorEntry {
    #[serde(flatten)]
    pub info: EntryInfo,
    #[serde(default)]
    pub decorator_type: DecoratorType,
    /// Options accepted by the decorator
    #[serde(default)]
    pub members: Vec<MemberEntry>,
}
