//! JSDoc tags and deprecation markers
//!
//! The extractor hands us JSDoc tags already split into `{name, comment}`
//! pairs. This module gives them a typed home and answers the questions
//! the transformer asks of them (is it deprecated, where are the usage
//! notes, which `@see` links exist).

use serde::{Deserialize, Serialize};

/// A single JSDoc tag as extracted from source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsDocTag {
    /// Tag name without the leading `@`
    pub name: String,
    /// Raw tag comment (Markdown)
    #[serde(default)]
    pub comment: String,
}

impl JsDocTag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
        }
    }
}

/// Deprecation marker.
///
/// API entries and CLI commands encode this either as a boolean or as the
/// deprecation message itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deprecation {
    /// `deprecated: true|false`
    Flag(bool),
    /// `deprecated: "Use X instead."`
    Message(String),
}

impl Deprecation {
    /// Whether this marker actually deprecates anything
    pub fn is_deprecated(&self) -> bool {
        match self {
            Deprecation::Flag(flag) => *flag,
            Deprecation::Message(_) => true,
        }
    }

    /// The deprecation message, if one was given
    pub fn message(&self) -> Option<&str> {
        match self {
            Deprecation::Message(msg) if !msg.trim().is_empty() => Some(msg.trim()),
            _ => None,
        }
    }
}

/// Find the first tag with the given name
pub fn find_tag<'a>(tags: &'a [JsDocTag], name: &str) -> Option<&'a JsDocTag> {
    tags.iter().find(|t| t.name == name)
}

/// All tags with the given name, in declaration order
pub fn tags_named<'a>(tags: &'a [JsDocTag], name: &'a str) -> impl Iterator<Item = &'a JsDocTag> {
    tags.iter().filter(move |t| t.name == name)
}

/// Resolved deprecation state of an entry or member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprecationInfo {
    pub is_deprecated: bool,
    pub message: Option<String>,
}

/// Combine an explicit `deprecated` field with a `@deprecated` tag.
///
/// The explicit field wins when it carries a message; otherwise the tag
/// comment is used.
pub fn resolve_deprecation(field: Option<&Deprecation>, tags: &[JsDocTag]) -> DeprecationInfo {
    let tag = find_tag(tags, "deprecated");
    let is_deprecated = field.map(Deprecation::is_deprecated).unwrap_or(false) || tag.is_some();
    if !is_deprecated {
        return DeprecationInfo::default();
    }

    let message = field
        .and_then(Deprecation::message)
        .map(str::to_string)
        .or_else(|| {
            tag.map(|t| t.comment.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        });

    DeprecationInfo {
        is_deprecated,
        message,
    }
}

/// Usage notes from an explicit field, falling back to `@usageNotes`
pub fn resolve_usage_notes<'a>(field: Option<&'a str>, tags: &'a [JsDocTag]) -> Option<&'a str> {
    field
        .filter(|s| !s.trim().is_empty())
        .or_else(|| find_tag(tags, "usageNotes").map(|t| t.comment.as_str()))
        .filter(|s| !s.trim().is_empty())
}

/// Status badges derived from tags
pub fn badges(tags: &[JsDocTag]) -> Vec<String> {
    let mut badges = Vec::new();
    if find_tag(tags, "developerPreview").is_some() {
        badges.push("Developer Preview".to_string());
    }
    if find_tag(tags, "experimental").is_some() {
        badges.push("Experimental".to_string());
    }
    badges
}
