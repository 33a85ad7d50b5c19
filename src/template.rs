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

//! Commit header templates.
//!
//! A template is a string containing `{placeholder}` substitution points, like
//! `{emoji}{type}: {subject}`. A placeholder name starts with an ASCII letter
//! or an underscore, followed by ASCII alphanumeric characters or underscores.
//! Any other brace is kept as literal text.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

/// The name of the placeholder cleared when emoji are disabled.
pub const EMOJI_PLACEHOLDER: &str = "emoji";

/// Matches a placeholder and captures its name.
#[expect(
    clippy::expect_used,
    reason = "The regex is a literal, so it is known to be valid."
)]
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .expect("invalid placeholder regex")
});

/// Errors that can occur when formatting a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A placeholder of the template has no value.
    #[error("No value for the placeholder {{{placeholder}}}")]
    UnresolvedPlaceholder {
        /// The name of the placeholder.
        placeholder: String,
    },
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// The literal and placeholder segments, in order.
    segments: Vec<Segment>,
}

/// A segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Text kept as is.
    Literal(String),
    /// A named substitution point.
    Placeholder(String),
}

/// Formats `template` with `values`.
///
/// Each `{placeholder}` is replaced by its value in `values`. When
/// `disable_emoji` is set, `{emoji}` is replaced by an empty string regardless
/// of the supplied value. Unused values are ignored.
pub fn format(
    template: &str,
    values: &IndexMap<String, String>,
    disable_emoji: bool,
) -> Result<String, FormatError> {
    Template::parse(template).render(values, disable_emoji)
}

impl Template {
    /// Parses a template.
    ///
    /// Parsing never fails: anything that is not a placeholder is a literal.
    pub fn parse(template: &str) -> Self {
        let mut segments = vec![];
        let mut last_end = 0;

        for captures in PLACEHOLDER_REGEX.captures_iter(template) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1))
            else {
                continue;
            };

            if let Some(literal) = template.get(last_end..whole.start()) {
                push_literal(&mut segments, literal);
            }

            segments.push(Segment::Placeholder(name.as_str().to_owned()));
            last_end = whole.end();
        }

        if let Some(literal) = template.get(last_end..) {
            push_literal(&mut segments, literal);
        }

        Self { segments }
    }

    /// Returns the placeholder names, in template order.
    ///
    /// A placeholder used several times is yielded several times.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Renders the template with `values`.
    ///
    /// Fails on the first placeholder, in template order, that has no value.
    pub fn render(
        &self,
        values: &IndexMap<String, String>,
        disable_emoji: bool,
    ) -> Result<String, FormatError> {
        let mut output = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(name)
                    if disable_emoji && name == EMOJI_PLACEHOLDER => {}
                Segment::Placeholder(name) => {
                    let value = values.get(name).ok_or_else(|| {
                        FormatError::UnresolvedPlaceholder {
                            placeholder: name.clone(),
                        }
                    })?;
                    output.push_str(value);
                }
            }
        }

        Ok(output)
    }

    /// Substitutes the placeholders having a value in `values`.
    ///
    /// The other placeholders are kept, so that the result can be rendered or
    /// captured later on. When `disable_emoji` is set, `{emoji}` is cleared.
    pub fn bind(
        &self,
        values: &IndexMap<String, String>,
        disable_emoji: bool,
    ) -> Self {
        let mut segments = vec![];

        for segment in &self.segments {
            match segment {
                Segment::Placeholder(name)
                    if disable_emoji && name == EMOJI_PLACEHOLDER => {}
                Segment::Placeholder(name) => match values.get(name) {
                    Some(value) => push_literal(&mut segments, value),
                    None => segments.push(segment.clone()),
                },
                Segment::Literal(text) => push_literal(&mut segments, text),
            }
        }

        Self { segments }
    }

    /// Recovers the placeholder values from a rendered message.
    ///
    /// This is the reverse of [`Template::render`]: literals must match
    /// exactly, and each placeholder captures the shortest text that lets the
    /// rest of the template match. When a placeholder appears several times,
    /// all occurrences must capture the same text. When `disable_emoji` is set,
    /// `{emoji}` must be empty and is not part of the result.
    ///
    /// Returns `None` if the message does not have the structure of the
    /// template.
    pub fn capture(
        &self,
        message: &str,
        disable_emoji: bool,
    ) -> Option<IndexMap<String, String>> {
        let mut pattern = String::from("(?s)^");
        let mut names = vec![];

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
                Segment::Placeholder(name)
                    if disable_emoji && name == EMOJI_PLACEHOLDER => {}
                Segment::Placeholder(name) => {
                    pattern.push_str("(.*?)");
                    names.push(name.as_str());
                }
            }
        }

        pattern.push('$');

        let regex = Regex::new(&pattern).ok()?;
        let captures = regex.captures(message)?;

        let mut values = IndexMap::new();
        for (index, name) in names.into_iter().enumerate() {
            let value = captures.get(index + 1)?.as_str();
            match values.get(name) {
                Some(previous) if previous != value => return None,
                Some(_) => {}
                None => {
                    values.insert(name.to_owned(), value.to_owned());
                }
            }
        }

        Some(values)
    }
}

/// Pushes a literal, skipping empty ones.
fn push_literal(segments: &mut Vec<Segment>, literal: &str) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal.to_owned()));
    }
}
