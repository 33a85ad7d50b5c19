// emoji-cz - A commit message helper with emoji commit types.
// Copyright (C) 2026 Jean-Philippe Cugnet <jean-philippe@cugnet.eu>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3 of the License.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Schema validation of the configuration.
//!
//! The validator checks a TOML document in four passes and stops at the first
//! violation found:
//!
//! 1. the required keys are present and all known keys have the proper type,
//! 2. the subject lengths form a valid range,
//! 3. the list, the questions, the messages and the format only reference
//!    known types, questions and placeholders,
//! 4. the commit type definitions are complete and consistent.

use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools as _;
use thiserror::Error;
use toml::{Table, Value};

use super::{CommitType, Config, DEFAULT_CLOSED_ISSUE_MESSAGE, Question};
use crate::template::{EMOJI_PLACEHOLDER, Template};

/// The top-level keys of a configuration document.
const KNOWN_KEYS: [&str; 10] = [
    "disableEmoji",
    "format",
    "maxMessageLength",
    "minMessageLength",
    "questions",
    "messages",
    "list",
    "types",
    "scopes",
    "closedIssueMessage",
];

/// The placeholders available in the format.
const KNOWN_PLACEHOLDERS: [&str; 4] =
    [EMOJI_PLACEHOLDER, "type", "scope", "subject"];

/// An error found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at `{field}`: {detail}")]
pub struct ConfigError {
    /// The kind of violation.
    pub kind: ConfigErrorKind,
    /// The path of the offending field, like `types.feat.emoji`.
    pub field: String,
    /// A description of the violation.
    pub detail: String,
}

/// Kinds of configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A required field is absent or empty.
    MissingField,
    /// A field does not have the expected type.
    TypeMismatch,
    /// A number is out of its valid range.
    InvalidRange,
    /// A field references something that is not defined.
    DanglingReference,
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::MissingField => "Missing field",
            Self::TypeMismatch => "Type mismatch",
            Self::InvalidRange => "Invalid range",
            Self::DanglingReference => "Dangling reference",
        };

        f.write_str(kind)
    }
}

impl ConfigError {
    /// Builds a new configuration error.
    fn new(
        kind: ConfigErrorKind,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            detail: detail.into(),
        }
    }
}

/// The configuration document, with each field checked for its type.
struct Shape<'a> {
    /// `disableEmoji`.
    disable_emoji: bool,
    /// `format`.
    format: &'a str,
    /// `maxMessageLength`.
    max_message_length: i64,
    /// `minMessageLength`.
    min_message_length: i64,
    /// `closedIssueMessage`.
    closed_issue_message: Option<&'a str>,
    /// `questions`.
    questions: Vec<&'a str>,
    /// `messages`.
    messages: Vec<(&'a str, &'a str)>,
    /// `list`.
    list: Vec<&'a str>,
    /// `scopes`.
    scopes: Vec<&'a str>,
    /// `types`.
    types: Vec<TypeShape<'a>>,
}

/// A commit type definition, with each field checked for its type.
struct TypeShape<'a> {
    /// The key in `types`.
    key: &'a str,
    /// `description`.
    description: &'a str,
    /// `emoji`.
    emoji: &'a str,
    /// `value`.
    value: &'a str,
}

/// Validates a configuration document.
///
/// On success, returns the strongly-typed configuration. The document itself
/// is left untouched.
#[tracing::instrument(level = "trace", skip_all)]
pub fn validate(document: &Table) -> Result<Config, ConfigError> {
    let shape = check_shape(document)?;
    let (min_message_length, max_message_length) = check_range(&shape)?;
    let (questions, messages) = check_references(&shape)?;
    let types = check_types(&shape.types)?;

    tracing::trace!(types = types.len(), "valid configuration");

    Ok(Config {
        disable_emoji: shape.disable_emoji,
        format: shape.format.to_owned(),
        max_message_length,
        min_message_length,
        closed_issue_message: shape
            .closed_issue_message
            .unwrap_or(DEFAULT_CLOSED_ISSUE_MESSAGE)
            .to_owned(),
        questions,
        list: shape.list.iter().map(|&key| key.to_owned()).collect(),
        scopes: shape.scopes.iter().map(|&scope| scope.to_owned()).collect(),
        messages,
        types,
    })
}

/// Returns the top-level keys of `document` that are not part of the schema.
pub fn unknown_keys(document: &Table) -> Vec<&str> {
    document
        .keys()
        .map(String::as_str)
        .filter(|key| !KNOWN_KEYS.contains(key))
        .collect()
}

/// Checks the presence and types of the fields.
fn check_shape(document: &Table) -> Result<Shape<'_>, ConfigError> {
    let closed_issue_message = document
        .get("closedIssueMessage")
        .map(|value| as_str(value, "closedIssueMessage"))
        .transpose()?;

    let scopes = match document.get("scopes") {
        Some(value) => as_str_array(value, "scopes")?,
        None => vec![],
    };

    Ok(Shape {
        disable_emoji: as_bool(
            required(document, "disableEmoji", "")?,
            "disableEmoji",
        )?,
        format: as_str(required(document, "format", "")?, "format")?,
        max_message_length: as_integer(
            required(document, "maxMessageLength", "")?,
            "maxMessageLength",
        )?,
        min_message_length: as_integer(
            required(document, "minMessageLength", "")?,
            "minMessageLength",
        )?,
        closed_issue_message,
        questions: as_str_array(
            required(document, "questions", "")?,
            "questions",
        )?,
        messages: as_str_table(
            required(document, "messages", "")?,
            "messages",
        )?,
        list: as_str_array(required(document, "list", "")?, "list")?,
        scopes,
        types: check_types_shape(required(document, "types", "")?)?,
    })
}

/// Checks the presence and types of the fields of the type definitions.
fn check_types_shape(types: &Value) -> Result<Vec<TypeShape<'_>>, ConfigError> {
    as_table(types, "types")?
        .iter()
        .map(|(key, definition)| {
            let path = format!("types.{key}");
            let definition = as_table(definition, &path)?;
            let field = |name: &str| {
                as_str(
                    required(definition, name, &path)?,
                    &format!("{path}.{name}"),
                )
            };

            Ok(TypeShape {
                key: key.as_str(),
                description: field("description")?,
                emoji: field("emoji")?,
                value: field("value")?,
            })
        })
        .collect()
}

/// Checks the subject length range.
fn check_range(shape: &Shape<'_>) -> Result<(usize, usize), ConfigError> {
    let max = usize::try_from(shape.max_message_length)
        .ok()
        .filter(|&max| max > 0)
        .ok_or_else(|| {
            ConfigError::new(
                ConfigErrorKind::InvalidRange,
                "maxMessageLength",
                format!(
                    "must be greater than 0, found {}",
                    shape.max_message_length
                ),
            )
        })?;

    let min = usize::try_from(shape.min_message_length).ok().ok_or_else(|| {
        ConfigError::new(
            ConfigErrorKind::InvalidRange,
            "minMessageLength",
            format!("must not be negative, found {}", shape.min_message_length),
        )
    })?;

    if min > max {
        return Err(ConfigError::new(
            ConfigErrorKind::InvalidRange,
            "minMessageLength",
            format!("must not be greater than maxMessageLength ({min} > {max})"),
        ));
    }

    Ok((min, max))
}

/// Checks that references point to defined items.
fn check_references(
    shape: &Shape<'_>,
) -> Result<(Vec<Question>, IndexMap<Question, String>), ConfigError> {
    if shape.list.is_empty() {
        return Err(ConfigError::new(
            ConfigErrorKind::MissingField,
            "list",
            "at least one commit type must be listed",
        ));
    }

    for (index, key) in shape.list.iter().enumerate() {
        if !shape.types.iter().any(|definition| definition.key == *key) {
            return Err(ConfigError::new(
                ConfigErrorKind::DanglingReference,
                format!("list[{index}]"),
                format!("there is no type `{key}` in types"),
            ));
        }
    }

    let questions = shape
        .questions
        .iter()
        .enumerate()
        .map(|(index, name)| {
            resolve_question(name, || format!("questions[{index}]"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let messages = shape
        .messages
        .iter()
        .map(|&(name, message)| {
            let question =
                resolve_question(name, || format!("messages.{name}"))?;
            Ok((question, message.to_owned()))
        })
        .collect::<Result<IndexMap<_, _>, ConfigError>>()?;

    if let Some(placeholder) = Template::parse(shape.format)
        .placeholders()
        .find(|placeholder| !KNOWN_PLACEHOLDERS.contains(placeholder))
    {
        return Err(ConfigError::new(
            ConfigErrorKind::DanglingReference,
            "format",
            format!(
                "unknown placeholder {{{placeholder}}}, expected one of {}",
                KNOWN_PLACEHOLDERS
                    .iter()
                    .map(|known| format!("{{{known}}}"))
                    .join(", ")
            ),
        ));
    }

    for mandatory in [Question::Type, Question::Subject] {
        if !questions.contains(&mandatory) {
            return Err(ConfigError::new(
                ConfigErrorKind::MissingField,
                "questions",
                format!("the `{mandatory}` question must be asked"),
            ));
        }
    }

    Ok((questions, messages))
}

/// Checks the content of the type definitions.
fn check_types(
    types: &[TypeShape<'_>],
) -> Result<IndexMap<String, CommitType>, ConfigError> {
    types
        .iter()
        .map(|definition| {
            let TypeShape {
                key,
                description,
                emoji,
                value,
            } = *definition;

            let contents = [("description", description), ("emoji", emoji)];
            for (name, content) in contents {
                if content.trim().is_empty() {
                    return Err(ConfigError::new(
                        ConfigErrorKind::MissingField,
                        format!("types.{key}.{name}"),
                        "must not be empty",
                    ));
                }
            }

            if value != key {
                return Err(ConfigError::new(
                    ConfigErrorKind::DanglingReference,
                    format!("types.{key}.value"),
                    format!("must be equal to the key `{key}`, found `{value}`"),
                ));
            }

            let commit_type = CommitType {
                key: key.to_owned(),
                description: description.to_owned(),
                emoji: emoji.to_owned(),
                value: value.to_owned(),
            };

            Ok((key.to_owned(), commit_type))
        })
        .collect()
}

/// Resolves a question name.
fn resolve_question(
    name: &str,
    field: impl FnOnce() -> String,
) -> Result<Question, ConfigError> {
    Question::from_name(name).ok_or_else(|| {
        ConfigError::new(
            ConfigErrorKind::DanglingReference,
            field(),
            format!(
                "unknown question `{name}`, expected one of {}",
                Question::ALL.iter().join(", ")
            ),
        )
    })
}

/// Gets a required key from a table.
fn required<'a>(
    table: &'a Table,
    key: &str,
    parent: &str,
) -> Result<&'a Value, ConfigError> {
    table.get(key).ok_or_else(|| {
        let field = if parent.is_empty() {
            key.to_owned()
        } else {
            format!("{parent}.{key}")
        };

        ConfigError::new(
            ConfigErrorKind::MissingField,
            field,
            "the key is required",
        )
    })
}

/// Builds a type mismatch error.
fn type_mismatch(value: &Value, field: &str, expected: &str) -> ConfigError {
    ConfigError::new(
        ConfigErrorKind::TypeMismatch,
        field,
        format!("expected {expected}, found {}", value.type_str()),
    )
}

/// Gets a boolean.
fn as_bool(value: &Value, field: &str) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| type_mismatch(value, field, "a boolean"))
}

/// Gets an integer.
fn as_integer(value: &Value, field: &str) -> Result<i64, ConfigError> {
    value
        .as_integer()
        .ok_or_else(|| type_mismatch(value, field, "an integer"))
}

/// Gets a string.
fn as_str<'a>(value: &'a Value, field: &str) -> Result<&'a str, ConfigError> {
    value
        .as_str()
        .ok_or_else(|| type_mismatch(value, field, "a string"))
}

/// Gets a table.
fn as_table<'a>(
    value: &'a Value,
    field: &str,
) -> Result<&'a Table, ConfigError> {
    value
        .as_table()
        .ok_or_else(|| type_mismatch(value, field, "a table"))
}

/// Gets an array of strings.
fn as_str_array<'a>(
    value: &'a Value,
    field: &str,
) -> Result<Vec<&'a str>, ConfigError> {
    value
        .as_array()
        .ok_or_else(|| type_mismatch(value, field, "an array"))?
        .iter()
        .enumerate()
        .map(|(index, item)| as_str(item, &format!("{field}[{index}]")))
        .collect()
}

/// Gets a table of strings.
fn as_str_table<'a>(
    value: &'a Value,
    field: &str,
) -> Result<Vec<(&'a str, &'a str)>, ConfigError> {
    as_table(value, field)?
        .iter()
        .map(|(key, item)| {
            Ok((key.as_str(), as_str(item, &format!("{field}.{key}"))?))
        })
        .collect()
}
