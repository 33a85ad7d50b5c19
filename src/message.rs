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

//! Commit message composition and linting.

use std::sync::LazyLock;

use indexmap::{IndexMap, indexmap};
use regex::Regex;
use thiserror::Error;

use crate::{
    config::Config,
    template::{EMOJI_PLACEHOLDER, FormatError},
};

/// The prefix of the breaking change footer.
const BREAKING_CHANGE_PREFIX: &str = "BREAKING CHANGE: ";

/// Matches a breaking change token already typed at the start of the answer.
#[expect(
    clippy::expect_used,
    reason = "The regex is a literal, so it is known to be valid."
)]
static BREAKING_CHANGE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BREAKING[ -]CHANGE:\s*")
        .expect("invalid breaking change regex")
});

/// The answers used to build a commit message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Answers {
    /// The key of the commit type.
    pub r#type: String,
    /// The optional scope of the change.
    pub scope: Option<String>,
    /// The short description.
    pub subject: String,
    /// The optional long description.
    pub body: Option<String>,
    /// The optional breaking change description.
    pub breaking: Option<String>,
    /// The optional related issues.
    pub issues: Option<String>,
}

/// Errors on the length of the subject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubjectError {
    /// The subject is too short.
    #[error("The subject must be at least {min} characters long, found {actual}")]
    TooShort {
        /// The minimum length.
        min: usize,
        /// The actual length.
        actual: usize,
    },
    /// The subject is too long.
    #[error("The subject must not be longer than {max} characters, found {actual}")]
    TooLong {
        /// The maximum length.
        max: usize,
        /// The actual length.
        actual: usize,
    },
}

/// Errors that can occur when composing a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// The commit type is not offered by the configuration.
    #[error("Unknown commit type `{0}`")]
    UnknownType(String),
    /// The scope is not in the list of accepted scopes.
    #[error("Unknown scope `{0}`")]
    UnknownScope(String),
    /// The subject is invalid.
    #[error(transparent)]
    Subject(#[from] SubjectError),
    /// The header template cannot be formatted.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors found when linting a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintError {
    /// The message is empty.
    #[error("The commit message is empty")]
    Empty,
    /// The header does not follow the format.
    #[error("The header `{header}` does not follow the format `{format}`")]
    HeaderMismatch {
        /// The header of the message.
        header: String,
        /// The expected format.
        format: String,
    },
    /// The commit type is not offered by the configuration.
    #[error("Unknown commit type `{0}`")]
    UnknownType(String),
    /// The scope is not in the list of accepted scopes.
    #[error("Unknown scope `{0}`")]
    UnknownScope(String),
    /// The subject is invalid.
    #[error(transparent)]
    Subject(#[from] SubjectError),
}

/// Checks the length of the subject against the configuration.
///
/// The length is counted in characters.
pub fn check_subject(
    config: &Config,
    subject: &str,
) -> Result<(), SubjectError> {
    let actual = subject.chars().count();

    if actual < config.min_message_length() {
        Err(SubjectError::TooShort {
            min: config.min_message_length(),
            actual,
        })
    } else if actual > config.max_message_length() {
        Err(SubjectError::TooLong {
            max: config.max_message_length(),
            actual,
        })
    } else {
        Ok(())
    }
}

/// Composes a full commit message from the answers.
///
/// The header is built from the format of the configuration. The body, the
/// breaking change and the issues follow, separated by blank lines.
#[tracing::instrument(level = "trace", skip(config))]
pub fn compose(
    config: &Config,
    answers: &Answers,
) -> Result<String, ComposeError> {
    let commit_type = config
        .commit_type(&answers.r#type)
        .ok_or_else(|| ComposeError::UnknownType(answers.r#type.clone()))?;

    let scope = non_empty(answers.scope.as_deref());
    if let Some(scope) = scope.filter(|scope| !config.accepts_scope(scope)) {
        return Err(ComposeError::UnknownScope(scope.to_owned()));
    }

    check_subject(config, &answers.subject)?;

    let scope = scope.map(|scope| format!("({scope})")).unwrap_or_default();

    let mut values = type_values(commit_type.emoji(), commit_type.value());
    values.insert(String::from("scope"), scope);
    values.insert(String::from("subject"), answers.subject.clone());

    let header = config.template().render(&values, config.disable_emoji())?;

    let body = non_empty(answers.body.as_deref()).map(ToOwned::to_owned);
    let breaking = non_empty(answers.breaking.as_deref()).map(|breaking| {
        let breaking = BREAKING_CHANGE_TOKEN.replace(breaking, "");
        format!("{BREAKING_CHANGE_PREFIX}{breaking}")
    });
    let issues = non_empty(answers.issues.as_deref())
        .map(|issues| format!("{}{issues}", config.closed_issue_message()));

    let message = [Some(header), body, breaking, issues]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n\n");

    tracing::debug!(?message, "composed commit message");
    Ok(message)
}

/// Lints an existing commit message.
///
/// Lines starting with `#` are ignored, like Git does. On success, returns the
/// answers found in the header.
#[tracing::instrument(level = "trace", skip(config))]
pub fn lint(config: &Config, message: &str) -> Result<Answers, LintError> {
    let header = message
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim_end)
        .find(|line| !line.is_empty())
        .ok_or(LintError::Empty)?;

    let template = config.template();
    let matched = config.listed_types().find_map(|commit_type| {
        let known = type_values(commit_type.emoji(), commit_type.value());
        template
            .bind(&known, config.disable_emoji())
            .capture(header, config.disable_emoji())
            .map(|values| (commit_type, values))
    });

    let Some((commit_type, values)) = matched else {
        return Err(
            match template.capture(header, config.disable_emoji()) {
                Some(values) => LintError::UnknownType(
                    values.get("type").cloned().unwrap_or_default(),
                ),
                None => LintError::HeaderMismatch {
                    header: header.to_owned(),
                    format: config.format().to_owned(),
                },
            },
        );
    };

    let scope = values
        .get("scope")
        .map(|scope| {
            scope
                .strip_prefix('(')
                .and_then(|scope| scope.strip_suffix(')'))
                .unwrap_or(scope)
        })
        .filter(|scope| !scope.is_empty())
        .map(ToOwned::to_owned);

    if let Some(scope) =
        scope.as_deref().filter(|scope| !config.accepts_scope(scope))
    {
        return Err(LintError::UnknownScope(scope.to_owned()));
    }

    let subject = values.get("subject").cloned().unwrap_or_default();
    check_subject(config, &subject)?;

    Ok(Answers {
        r#type: commit_type.key().to_owned(),
        scope,
        subject,
        ..Answers::default()
    })
}

/// Returns the placeholder values defined by a commit type.
fn type_values(emoji: &str, value: &str) -> IndexMap<String, String> {
    indexmap! {
        String::from(EMOJI_PLACEHOLDER) => emoji.to_owned(),
        String::from("type") => value.to_owned(),
    }
}

/// Returns the trimmed text if it is not empty.
fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use indoc::{formatdoc, indoc};

    use super::*;

    fn answers(r#type: &str, subject: &str) -> Answers {
        Answers {
            r#type: r#type.to_owned(),
            subject: subject.to_owned(),
            ..Answers::default()
        }
    }

    fn config_with(extra: &str) -> Config {
        Config::from_toml(&formatdoc!(
            r#"
                disableEmoji = {disable_emoji}
                format = "{{emoji}}{{type}}{{scope}}: {{subject}}"
                maxMessageLength = 20
                minMessageLength = 3
                questions = ["type", "scope", "subject"]
                list = ["feat", "fix"]
                {extra}

                [messages]

                [types.feat]
                description = "New feature"
                emoji = "🎸"
                value = "feat"

                [types.fix]
                description = "Bug fix"
                emoji = "🐛"
                value = "fix"
            "#,
            disable_emoji = extra.contains("#no-emoji"),
            extra = extra,
        ))
        .unwrap()
    }

    #[test]
    fn compose_builds_the_header_from_the_default_format() {
        let config = Config::default();

        assert_eq!(
            compose(&config, &answers("feat", "add x")),
            Ok(String::from("🎸feat: add x"))
        );
    }

    #[test]
    fn compose_includes_the_scope_in_parentheses() {
        let config = config_with("");
        let answers = Answers {
            scope: Some(String::from("cli")),
            ..answers("fix", "fix y")
        };

        assert_eq!(
            compose(&config, &answers),
            Ok(String::from("🐛fix(cli): fix y"))
        );
    }

    #[test]
    fn compose_omits_an_empty_scope() {
        let config = config_with("");
        let answers = Answers {
            scope: Some(String::from("  ")),
            ..answers("fix", "fix y")
        };

        assert_eq!(
            compose(&config, &answers),
            Ok(String::from("🐛fix: fix y"))
        );
    }

    #[test]
    fn compose_clears_the_emoji_when_disabled() {
        let config = config_with("#no-emoji");

        assert_eq!(
            compose(&config, &answers("feat", "add x")),
            Ok(String::from("feat: add x"))
        );
    }

    #[test]
    fn compose_appends_body_breaking_change_and_issues() {
        let config = Config::default();
        let answers = Answers {
            body: Some(String::from("Some details.\n")),
            breaking: Some(String::from("BREAKING CHANGE: the API changed")),
            issues: Some(String::from("#23")),
            ..answers("feat", "add x")
        };

        assert_eq!(
            compose(&config, &answers).unwrap(),
            indoc! {"
                🎸feat: add x

                Some details.

                BREAKING CHANGE: the API changed

                Closes: #23"}
        );
    }

    #[test]
    fn compose_skips_empty_optional_parts() {
        let config = Config::default();
        let answers = Answers {
            body: Some(String::new()),
            issues: Some(String::from("#1")),
            ..answers("docs", "update readme")
        };

        assert_eq!(
            compose(&config, &answers),
            Ok(String::from("✏️docs: update readme\n\nCloses: #1"))
        );
    }

    #[test]
    fn compose_rejects_unknown_types() {
        assert_eq!(
            compose(&Config::default(), &answers("wip", "add x")),
            Err(ComposeError::UnknownType(String::from("wip")))
        );
    }

    #[test]
    fn compose_checks_the_subject_before_formatting() {
        assert_eq!(
            compose(&Config::default(), &answers("feat", "x")),
            Err(ComposeError::Subject(SubjectError::TooShort { min: 5, actual: 1 }))
        );
    }

    #[test]
    fn subject_length_is_counted_in_characters() {
        let config = config_with("");

        assert_eq!(check_subject(&config, "ééé"), Ok(()));
        assert_eq!(
            check_subject(&config, &"é".repeat(21)),
            Err(SubjectError::TooLong { max: 20, actual: 21 })
        );
    }

    #[test]
    fn subject_length_bounds_are_inclusive() {
        let config = config_with("");

        assert_eq!(check_subject(&config, "abc"), Ok(()));
        assert_eq!(check_subject(&config, &"a".repeat(20)), Ok(()));
    }

    #[test]
    fn lint_accepts_a_composed_message() {
        let config = config_with("");
        let answers = Answers {
            scope: Some(String::from("cli")),
            ..answers("fix", "fix y")
        };
        let message = compose(&config, &answers).unwrap();

        assert_eq!(lint(&config, &message), Ok(answers));
    }

    #[test]
    fn lint_ignores_comments_and_the_body() {
        let message = indoc! {"
            # Please enter the commit message for your changes.
            🎸feat: add x

            Some details.
        "};

        assert_eq!(
            lint(&Config::default(), message),
            Ok(answers("feat", "add x"))
        );
    }

    #[test]
    fn lint_accepts_messages_without_emoji_when_disabled() {
        let config = config_with("#no-emoji");

        assert_eq!(lint(&config, "feat: add x"), Ok(answers("feat", "add x")));
    }

    #[test]
    fn lint_rejects_a_mismatching_emoji() {
        assert_eq!(
            lint(&Config::default(), "🐛feat: add x"),
            Err(LintError::UnknownType(String::from("🐛feat")))
        );
    }

    #[test]
    fn lint_rejects_a_header_not_following_the_format() {
        assert_eq!(
            lint(&Config::default(), "add x"),
            Err(LintError::HeaderMismatch {
                header: String::from("add x"),
                format: String::from("{emoji}{type}: {subject}"),
            })
        );
    }

    #[test]
    fn lint_rejects_an_empty_message() {
        assert_eq!(
            lint(&Config::default(), "# comment\n\n"),
            Err(LintError::Empty)
        );
    }

    #[test]
    fn lint_checks_the_subject() {
        assert_eq!(
            lint(&Config::default(), "🎸feat: x"),
            Err(LintError::Subject(SubjectError::TooShort { min: 5, actual: 1 }))
        );
    }

    #[test]
    fn compose_accepts_a_listed_scope() {
        let config = config_with(r#"scopes = ["cli", "config"]"#);
        let answers = Answers {
            scope: Some(String::from("config")),
            ..answers("fix", "fix y")
        };

        assert_eq!(
            compose(&config, &answers),
            Ok(String::from("🐛fix(config): fix y"))
        );
    }

    #[test]
    fn compose_rejects_a_scope_absent_from_the_list() {
        let config = config_with(r#"scopes = ["cli", "config"]"#);
        let answers = Answers {
            scope: Some(String::from("bogus")),
            ..answers("fix", "fix y")
        };

        assert_eq!(
            compose(&config, &answers),
            Err(ComposeError::UnknownScope(String::from("bogus")))
        );
    }

    #[test]
    fn compose_accepts_no_scope_with_a_list() {
        let config = config_with(r#"scopes = ["cli", "config"]"#);

        assert_eq!(
            compose(&config, &answers("fix", "fix y")),
            Ok(String::from("🐛fix: fix y"))
        );
    }

    #[test]
    fn lint_rejects_a_scope_absent_from_the_list() {
        let config = config_with(r#"scopes = ["cli", "config"]"#);

        assert_eq!(
            lint(&config, "🐛fix(bogus): fix y"),
            Err(LintError::UnknownScope(String::from("bogus")))
        );
        assert_eq!(
            lint(&config, "🐛fix(cli): fix y"),
            Ok(Answers {
                scope: Some(String::from("cli")),
                ..answers("fix", "fix y")
            })
        );
    }

    #[test]
    fn compose_does_not_double_the_breaking_change_token() {
        let config = Config::default();
        let footer = |breaking: &str| {
            let answers = Answers {
                breaking: Some(breaking.to_owned()),
                ..answers("feat", "add x")
            };
            compose(&config, &answers).unwrap()
        };

        let expected = "🎸feat: add x\n\nBREAKING CHANGE: the API changed";
        assert_eq!(footer("the API changed"), expected);
        assert_eq!(footer("BREAKING CHANGE: the API changed"), expected);
        assert_eq!(footer("BREAKING CHANGE:the API changed"), expected);
        assert_eq!(footer("BREAKING-CHANGE: the API changed"), expected);
        assert_eq!(footer("BREAKING-CHANGE:  the API changed"), expected);
    }
}
