// ABOUTME: Declarative response normalization shared by every provider and plugin
// ABOUTME: Maps provider JSON to Profile, Contact and Feed through ordered field-path candidates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! # Response normalization
//!
//! Providers describe their JSON shape as data: for every canonical field an
//! ordered list of dotted paths (`"from.name"`, `"emails.0.value"`). The evaluator
//! takes the first path that resolves to a scalar and never invents a value for
//! one that does not.
//!
//! Two things fail the whole batch, since both mean the provider changed its
//! contract: a missing or mistyped container (or a non-object entry inside it),
//! and a date that is present but does not parse. A missing leaf on one item is
//! not an error.

/// Date parsing per provider convention
pub mod dates;

pub use dates::{parse_date, DateFormat};

use serde_json::{Map, Value};
use socialgate_core::errors::ProviderError;
use socialgate_core::models::{Contact, Feed, Profile};
use thiserror::Error;

/// Ordered candidate paths for one canonical field
pub type FieldPaths = &'static [&'static str];

/// Why a response could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The body is not JSON
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
    /// A required container or root object is missing
    #[error("missing '{0}' in response")]
    MissingField(String),
    /// A container exists but has the wrong JSON type
    #[error("'{field}' is not {expected}")]
    UnexpectedType {
        /// Container path, or `<root>` for the body itself
        field: String,
        /// Expected JSON type
        expected: &'static str,
    },
    /// A date field is present but does not match the provider's format
    #[error("unparseable date in '{field}': {value} ({reason})")]
    InvalidDate {
        /// Source field path
        field: String,
        /// Raw value
        value: String,
        /// Parser message
        reason: String,
    },
}

impl NormalizeError {
    /// Report this failure as a provider parse error for `url`
    #[must_use]
    pub fn into_provider_error(self, provider: &str, url: &str) -> ProviderError {
        ProviderError::ResponseParseFailed {
            provider: provider.to_owned(),
            url: url.to_owned(),
            reason: self.to_string(),
        }
    }
}

/// Where the list of items lives in a collection response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// An array under this top-level path (`data`, `items`)
    Field(&'static str),
    /// The body itself is the array
    BareArray,
}

impl Container {
    fn label(self) -> &'static str {
        match self {
            Self::Field(name) => name,
            Self::BareArray => "<root>",
        }
    }
}

/// Field paths for a user profile response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileMapping {
    /// Object path the profile fields are relative to; `None` for the body itself
    pub root: Option<&'static str>,
    /// Paths for `validated_id`
    pub validated_id: FieldPaths,
    /// Paths for `display_name`
    pub display_name: FieldPaths,
    /// Paths for `first_name`
    pub first_name: FieldPaths,
    /// Paths for `last_name`
    pub last_name: FieldPaths,
    /// Paths for `email`
    pub email: FieldPaths,
    /// Paths for `gender`
    pub gender: FieldPaths,
    /// Paths for `location`
    pub location: FieldPaths,
    /// Paths for `language`
    pub language: FieldPaths,
    /// Paths for `profile_image_url`
    pub profile_image_url: FieldPaths,
    /// Paths for `profile_url`
    pub profile_url: FieldPaths,
    /// Prepended to the resolved `profile_url` value (e.g. a username)
    pub profile_url_prefix: Option<&'static str>,
}

/// Field paths for one entry of a contacts response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactMapping {
    /// Where the contact array lives
    pub container: Container,
    /// Paths for `id`
    pub id: FieldPaths,
    /// Paths for `display_name`
    pub display_name: FieldPaths,
    /// Paths for `first_name`
    pub first_name: FieldPaths,
    /// Paths for `last_name`
    pub last_name: FieldPaths,
    /// Paths for `profile_url`
    pub profile_url: FieldPaths,
    /// Prepended to the resolved `profile_url` value
    pub profile_url_prefix: Option<&'static str>,
    /// Paths for `profile_image_url`
    pub profile_image_url: FieldPaths,
}

/// Field paths for one entry of a feed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedMapping {
    /// Where the feed array lives
    pub container: Container,
    /// Paths for `id`
    pub id: FieldPaths,
    /// Paths for `from`
    pub from: FieldPaths,
    /// Paths for `screen_name`
    pub screen_name: FieldPaths,
    /// Message candidates in priority order
    pub message: FieldPaths,
    /// Paths for `created_at`
    pub created_at: FieldPaths,
    /// How `created_at` is encoded
    pub date_format: DateFormat,
}

/// Parse a response body as JSON
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidJson`] when the body is not JSON
pub fn parse_body(body: &[u8]) -> Result<Value, NormalizeError> {
    serde_json::from_slice(body).map_err(|e| NormalizeError::InvalidJson(e.to_string()))
}

/// Resolve a dotted path; numeric segments index into arrays
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Render a scalar as text; `null`, arrays and objects count as absent
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// First candidate path that resolves to a scalar, rendered as text
#[must_use]
pub fn first_text(value: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(value, path).and_then(scalar_text))
}

/// First candidate path that resolves to a scalar, with the path that matched
fn first_scalar<'a>(value: &'a Value, paths: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    paths.iter().find_map(|path| {
        lookup(value, path)
            .filter(|v| scalar_text(v).is_some())
            .map(|v| (*path, v))
    })
}

/// Split a display name into first and last name
///
/// The first whitespace token is the first name and the second, if any, the
/// last name; further tokens are dropped. A single token yields only a first
/// name, and a blank string yields neither.
#[must_use]
pub fn split_display_name(display_name: &str) -> (Option<String>, Option<String>) {
    let mut tokens = display_name.split_whitespace();
    let first = tokens.next().map(str::to_owned);
    let last = tokens.next().map(str::to_owned);
    (first, last)
}

/// Explicit first/last names if the provider sent either, else split the display name
fn resolve_names(
    item: &Value,
    first_paths: FieldPaths,
    last_paths: FieldPaths,
    display_name: Option<&str>,
) -> (Option<String>, Option<String>) {
    let first = first_text(item, first_paths);
    let last = first_text(item, last_paths);
    if first.is_some() || last.is_some() {
        return (first, last);
    }
    display_name.map_or((None, None), split_display_name)
}

fn prefixed(prefix: Option<&str>, value: Option<String>) -> Option<String> {
    match (prefix, value) {
        (Some(prefix), Some(value)) => Some(format!("{prefix}{value}")),
        (None, value) => value,
        (Some(_), None) => None,
    }
}

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, NormalizeError> {
    value.as_object().ok_or_else(|| NormalizeError::UnexpectedType {
        field: field.to_owned(),
        expected: "an object",
    })
}

/// Locate the item array of a collection response
///
/// # Errors
///
/// Returns an error when the container is missing or not an array
pub fn items(body: &Value, container: Container) -> Result<&[Value], NormalizeError> {
    let list = match container {
        Container::BareArray => body,
        Container::Field(name) => {
            lookup(body, name).ok_or_else(|| NormalizeError::MissingField(name.to_owned()))?
        }
    };
    list.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| NormalizeError::UnexpectedType {
            field: container.label().to_owned(),
            expected: "an array",
        })
}

/// Entries of a collection response, each required to be an object
fn entries(
    body: &Value,
    container: Container,
) -> Result<impl Iterator<Item = Result<&Value, NormalizeError>>, NormalizeError> {
    Ok(items(body, container)?
        .iter()
        .enumerate()
        .map(move |(index, item)| {
            if item.is_object() {
                Ok(item)
            } else {
                Err(NormalizeError::UnexpectedType {
                    field: format!("{}.{index}", container.label()),
                    expected: "an object",
                })
            }
        }))
}

/// Map a profile response
///
/// # Errors
///
/// Returns an error when the configured root object is missing or the body is
/// not an object
pub fn map_profile(
    body: &Value,
    mapping: &ProfileMapping,
    provider_id: &str,
) -> Result<Profile, NormalizeError> {
    let root = match mapping.root {
        Some(path) => {
            let root =
                lookup(body, path).ok_or_else(|| NormalizeError::MissingField(path.to_owned()))?;
            as_object(root, path)?;
            root
        }
        None => {
            as_object(body, "<root>")?;
            body
        }
    };

    let display_name = first_text(root, mapping.display_name);
    let (first_name, last_name) = resolve_names(
        root,
        mapping.first_name,
        mapping.last_name,
        display_name.as_deref(),
    );

    Ok(Profile {
        validated_id: first_text(root, mapping.validated_id),
        display_name,
        first_name,
        last_name,
        email: first_text(root, mapping.email),
        gender: first_text(root, mapping.gender),
        location: first_text(root, mapping.location),
        language: first_text(root, mapping.language),
        profile_image_url: first_text(root, mapping.profile_image_url),
        profile_url: prefixed(
            mapping.profile_url_prefix,
            first_text(root, mapping.profile_url),
        ),
        provider_id: provider_id.to_owned(),
    })
}

/// Map one contact entry; never fails
#[must_use]
pub fn map_contact(item: &Value, mapping: &ContactMapping) -> Contact {
    let display_name = first_text(item, mapping.display_name);
    let (first_name, last_name) = resolve_names(
        item,
        mapping.first_name,
        mapping.last_name,
        display_name.as_deref(),
    );
    Contact {
        id: first_text(item, mapping.id),
        display_name,
        first_name,
        last_name,
        profile_url: prefixed(
            mapping.profile_url_prefix,
            first_text(item, mapping.profile_url),
        ),
        profile_image_url: first_text(item, mapping.profile_image_url),
    }
}

/// Map a contacts response, preserving provider order
///
/// # Errors
///
/// Returns an error when the container is missing or not an array, or an
/// entry is not an object
pub fn map_contacts(body: &Value, mapping: &ContactMapping) -> Result<Vec<Contact>, NormalizeError> {
    entries(body, mapping.container)?
        .map(|item| item.map(|item| map_contact(item, mapping)))
        .collect()
}

/// Map one feed entry
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidDate`] when `created_at` is present but unparseable
pub fn map_feed(item: &Value, mapping: &FeedMapping) -> Result<Feed, NormalizeError> {
    let created_at = first_scalar(item, mapping.created_at)
        .map(|(path, raw)| {
            parse_date(raw, mapping.date_format).map_err(|reason| NormalizeError::InvalidDate {
                field: path.to_owned(),
                value: scalar_text(raw).unwrap_or_default(),
                reason,
            })
        })
        .transpose()?;

    Ok(Feed {
        id: first_text(item, mapping.id),
        from: first_text(item, mapping.from),
        screen_name: first_text(item, mapping.screen_name),
        message: first_text(item, mapping.message),
        created_at,
    })
}

/// Map a feed response; any bad date fails the whole batch
///
/// # Errors
///
/// Returns an error when the container is missing, or any entry is not an
/// object or has an unparseable date
pub fn map_feeds(body: &Value, mapping: &FeedMapping) -> Result<Vec<Feed>, NormalizeError> {
    entries(body, mapping.container)?
        .map(|item| item.and_then(|item| map_feed(item, mapping)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_walks_objects_and_arrays() {
        let value = json!({"emails": [{"value": "a@b.c"}], "from": {"name": "Ann"}});
        assert_eq!(lookup(&value, "from.name"), Some(&json!("Ann")));
        assert_eq!(lookup(&value, "emails.0.value"), Some(&json!("a@b.c")));
        assert_eq!(lookup(&value, "emails.1.value"), None);
        assert_eq!(lookup(&value, "from.name.first"), None);
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(scalar_text(&json!(42)), Some("42".to_owned()));
        assert_eq!(scalar_text(&json!(true)), Some("true".to_owned()));
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!({"a": 1})), None);
    }

    #[test]
    fn test_first_text_skips_null_candidates() {
        let value = json!({"message": null, "story": "went for a run"});
        assert_eq!(
            first_text(&value, &["message", "story"]),
            Some("went for a run".to_owned())
        );
    }

    #[test]
    fn test_split_display_name() {
        assert_eq!(
            split_display_name("Jane Q Roe"),
            (Some("Jane".to_owned()), Some("Q".to_owned()))
        );
        assert_eq!(split_display_name("  Cher "), (Some("Cher".to_owned()), None));
        assert_eq!(split_display_name("   "), (None, None));
    }

    #[test]
    fn test_missing_container_is_an_error() {
        let mapping = ContactMapping {
            container: Container::Field("data"),
            id: &["id"],
            display_name: &[],
            first_name: &[],
            last_name: &[],
            profile_url: &[],
            profile_url_prefix: None,
            profile_image_url: &[],
        };
        assert_eq!(
            map_contacts(&json!({"meta": {}}), &mapping),
            Err(NormalizeError::MissingField("data".to_owned()))
        );
        assert!(map_contacts(&json!({"data": {}}), &mapping).is_err());
    }

    #[test]
    fn test_non_object_entry_fails_batch() {
        let mapping = ContactMapping {
            container: Container::Field("data"),
            id: &["id"],
            display_name: &[],
            first_name: &[],
            last_name: &[],
            profile_url: &[],
            profile_url_prefix: None,
            profile_image_url: &[],
        };
        assert_eq!(
            map_contacts(&json!({"data": [{"id": "1"}, null]}), &mapping),
            Err(NormalizeError::UnexpectedType {
                field: "data.1".to_owned(),
                expected: "an object",
            })
        );
    }
}
