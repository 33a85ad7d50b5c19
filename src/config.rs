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

//! Configuration for emoji-cz.

mod validation;

pub use validation::{ConfigError, ConfigErrorKind, unknown_keys, validate};

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use indexmap::{IndexMap, indexmap};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::{template::Template, tracing::LogResult as _};

/// The name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "emoji-cz.toml";

/// An error that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The configuration file cannot be read.
    #[error("Failed to read {}", path.display())]
    Read {
        /// The path of the configuration file.
        path: PathBuf,
        /// The OS error.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not a valid configuration.
    #[error("Invalid configuration in {}", path.display())]
    InvalidConfig {
        /// The path of the configuration file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: FromTomlError,
    },
}

/// An error that can occur when building the configuration from TOML.
#[derive(Debug, Error)]
pub enum FromTomlError {
    /// The document is not valid TOML.
    #[error("Failed to parse the TOML document")]
    Parse(#[from] toml::de::Error),
    /// The document does not describe a valid configuration.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// An error that can occur when getting the Git repo root.
#[derive(Debug, Error)]
pub enum RepoRootError {
    /// Git cannot be run.
    #[error("Failed to run the git command")]
    CannotRunGit(#[from] io::Error),
    /// Git has returned an error.
    #[error("{0}")]
    GitError(String),
    /// The output of Git is not proper UTF-8.
    #[error("The output of the git command is not proper UTF-8")]
    EncodingError(#[from] std::string::FromUtf8Error),
}

/// The validated emoji-cz configuration.
///
/// A `Config` can only be obtained through [`validate`] (or its wrappers like
/// [`Config::from_toml`]) or [`Config::default`], so it always upholds the
/// invariants checked by the validator. It is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Whether to clear the `{emoji}` placeholder.
    disable_emoji: bool,
    /// The commit header template.
    format: String,
    /// The maximum length of the subject.
    max_message_length: usize,
    /// The minimum length of the subject.
    min_message_length: usize,
    /// The prefix of the issues footer.
    closed_issue_message: String,
    /// The questions to ask, in order.
    questions: Vec<Question>,
    /// The commit types to offer, in order.
    list: Vec<String>,
    /// The accepted scopes, any scope being accepted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scopes: Vec<String>,
    /// The prompt for each question.
    messages: IndexMap<Question, String>,
    /// The commit type definitions.
    types: IndexMap<String, CommitType>,
}

/// A commit type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitType {
    /// The key of the type in the configuration.
    #[serde(skip)]
    key: String,
    /// A human-readable description.
    description: String,
    /// The emoji associated to the type.
    emoji: String,
    /// The value written in the commit message.
    value: String,
}

/// A question asked to build a commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Question {
    /// The commit type.
    Type,
    /// The scope of the change.
    Scope,
    /// The short description.
    Subject,
    /// The long description.
    Body,
    /// The breaking changes.
    Breaking,
    /// The related issues.
    Issues,
}

impl Question {
    /// All the known questions.
    pub const ALL: [Self; 6] = [
        Self::Type,
        Self::Scope,
        Self::Subject,
        Self::Body,
        Self::Breaking,
        Self::Issues,
    ];

    /// Returns the name of the question in the configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Scope => "scope",
            Self::Subject => "subject",
            Self::Body => "body",
            Self::Breaking => "breaking",
            Self::Issues => "issues",
        }
    }

    /// Gets a question from its name in the configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|question| question.as_str() == name)
    }

    /// Returns the prompt used when the configuration does not define one.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Type => "Prefix:",
            Self::Scope => "Scope (optional):",
            Self::Subject => "Abstract:\n",
            Self::Body => "Details (optional):\n",
            Self::Breaking => "Breaking changes (optional):\n",
            Self::Issues => "Related issues (optional), e.g. #123:",
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Question {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl CommitType {
    /// Returns the key of the type.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the description of the type.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the emoji of the type.
    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    /// Returns the value written in commit messages.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Default for Config {
    fn default() -> Self {
        let default_types = indexmap! {
            "feat" => ("New feature", "🎸"),
            "fix" => ("Bug fix", "🐛"),
            "perf" => ("Performance improvement", "⚡️"),
            "refactor" => (
                "Change that neither fixes bug nor adds feature",
                "💡",
            ),
            "style" => (
                "Change that do not affect the meaning of code (white-space, formatting, etc)",
                "💄",
            ),
            "chore" => (
                "Change to the build process or auxiliary tools and libraries",
                "🤖",
            ),
            "docs" => ("Documentation change", "✏️"),
            "test" => ("Adding or correcting test", "💍"),
        };

        let questions = vec![Question::Type, Question::Subject, Question::Body];

        Self {
            disable_emoji: false,
            format: String::from("{emoji}{type}: {subject}"),
            max_message_length: 50,
            min_message_length: 5,
            closed_issue_message: String::from(DEFAULT_CLOSED_ISSUE_MESSAGE),
            messages: questions
                .iter()
                .map(|&question| {
                    (question, String::from(question.default_message()))
                })
                .collect(),
            questions,
            list: default_types.keys().map(|&key| String::from(key)).collect(),
            scopes: vec![],
            types: default_types
                .into_iter()
                .map(|(key, (description, emoji))| {
                    let commit_type = CommitType {
                        key: String::from(key),
                        description: String::from(description),
                        emoji: String::from(emoji),
                        value: String::from(key),
                    };
                    (String::from(key), commit_type)
                })
                .collect(),
        }
    }
}

/// The default prefix of the issues footer.
const DEFAULT_CLOSED_ISSUE_MESSAGE: &str = "Closes: ";

impl Config {
    /// Loads the configuration.
    ///
    /// If `path` is provided, the configuration is read from it and the file
    /// must exist. Otherwise, the configuration file is looked for at the root
    /// of the current Git repository, falling back to the default
    /// configuration when there is none.
    #[tracing::instrument(name = "load_config", level = "trace")]
    pub fn load(path: Option<&Path>) -> Result<Self, LoadError> {
        match Self::locate(path) {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no configuration file, using the default");
                Ok(Self::default())
            }
        }
    }

    /// Returns the path of the configuration file to load, if any.
    pub fn locate(path: Option<&Path>) -> Option<PathBuf> {
        match path {
            Some(path) => Some(path.to_owned()),
            None => config_file().filter(|path| path.is_file()),
        }
    }

    /// Loads the configuration from a given file.
    #[tracing::instrument(level = "trace")]
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        let document = Self::read_document(path)?;
        Self::from_document(path, &document)
    }

    /// Reads and parses a configuration file, without validating it.
    pub fn read_document(path: &Path) -> Result<toml::Table, LoadError> {
        tracing::debug!(?path, "loading the configuration");

        let contents = fs::read_to_string(path)
            .map_err(|source| LoadError::Read {
                path: path.to_owned(),
                source,
            })
            .log_err()?;

        contents
            .parse::<toml::Table>()
            .map_err(|error| LoadError::InvalidConfig {
                path: path.to_owned(),
                source: FromTomlError::Parse(error),
            })
            .log_err()
    }

    /// Validates a document read from `path`.
    pub fn from_document(
        path: &Path,
        document: &toml::Table,
    ) -> Result<Self, LoadError> {
        validate(document)
            .map_err(|error| LoadError::InvalidConfig {
                path: path.to_owned(),
                source: FromTomlError::Invalid(error),
            })
            .log_err()
    }

    /// Builds the configuration from its TOML representation.
    pub fn from_toml(toml: &str) -> Result<Self, FromTomlError> {
        let document: toml::Table = toml.parse()?;
        Ok(validate(&document)?)
    }

    /// Returns the TOML representation of the configuration.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Returns whether the `{emoji}` placeholder is cleared.
    pub const fn disable_emoji(&self) -> bool {
        self.disable_emoji
    }

    /// Returns the commit header template.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the parsed commit header template.
    pub fn template(&self) -> Template {
        Template::parse(&self.format)
    }

    /// Returns the maximum length of the subject.
    pub const fn max_message_length(&self) -> usize {
        self.max_message_length
    }

    /// Returns the minimum length of the subject.
    pub const fn min_message_length(&self) -> usize {
        self.min_message_length
    }

    /// Returns the prefix of the issues footer.
    pub fn closed_issue_message(&self) -> &str {
        &self.closed_issue_message
    }

    /// Returns the questions to ask, in order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the prompt for `question`.
    pub fn message(&self, question: Question) -> &str {
        self.messages
            .get(&question)
            .map_or_else(|| question.default_message(), String::as_str)
    }

    /// Returns the keys of the offered commit types, in order.
    pub fn list(&self) -> &[String] {
        &self.list
    }

    /// Returns the offered commit types, in order.
    pub fn listed_types(&self) -> impl Iterator<Item = &CommitType> {
        self.list.iter().filter_map(|key| self.types.get(key))
    }

    /// Returns the offered commit type for `key`.
    ///
    /// Types defined in the configuration but absent from the list are not
    /// offered, hence not returned.
    pub fn commit_type(&self, key: &str) -> Option<&CommitType> {
        if self.list.iter().any(|listed| listed == key) {
            self.types.get(key)
        } else {
            None
        }
    }

    /// Returns all the commit type definitions.
    pub const fn types(&self) -> &IndexMap<String, CommitType> {
        &self.types
    }

    /// Returns the accepted scopes.
    ///
    /// Any scope is accepted when the list is empty.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns whether `scope` is accepted.
    pub fn accepts_scope(&self, scope: &str) -> bool {
        self.scopes.is_empty() || self.scopes.iter().any(|known| known == scope)
    }
}

/// Returns the path of the configuration file in the current Git repository.
pub fn config_file() -> Option<PathBuf> {
    match repo_root() {
        Ok(repo_root) => Some(repo_root.join(CONFIG_FILE_NAME)),
        Err(error) => {
            tracing::debug!(%error, "cannot get the Git repo root");
            None
        }
    }
}

/// Returns the root of the current Git repository.
#[tracing::instrument(level = "trace")]
pub fn repo_root() -> Result<PathBuf, RepoRootError> {
    let git_rev_parse = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()?;

    if git_rev_parse.status.success() {
        let repo_root = String::from_utf8(git_rev_parse.stdout)?;
        Ok(PathBuf::from(repo_root.trim()))
    } else {
        let git_error = String::from_utf8(git_rev_parse.stderr)?;
        Err(RepoRootError::GitError(git_error.trim().to_owned()))
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();

        assert_eq!(Config::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn default_config_offers_the_types_in_order() {
        let config = Config::default();

        assert_eq!(
            config.listed_types().map(CommitType::key).collect::<Vec<_>>(),
            vec![
                "feat", "fix", "perf", "refactor", "style", "chore", "docs",
                "test"
            ]
        );
    }

    #[test]
    fn default_config_asks_type_subject_and_body() {
        assert_eq!(
            Config::default().questions(),
            &[Question::Type, Question::Subject, Question::Body]
        );
    }

    #[test]
    fn message_falls_back_to_the_default_prompt() {
        let config = Config::default();

        assert_eq!(config.message(Question::Type), "Prefix:");
        assert_eq!(config.message(Question::Scope), "Scope (optional):");
    }

    #[test]
    fn commit_type_only_returns_listed_types() {
        let config = Config::from_toml(
            r#"
                disableEmoji = false
                format = "{type}: {subject}"
                maxMessageLength = 50
                minMessageLength = 5
                questions = ["type", "subject"]
                list = ["feat"]

                [messages]

                [types.feat]
                description = "New feature"
                emoji = "🎸"
                value = "feat"

                [types.hidden]
                description = "Not offered"
                emoji = "🙈"
                value = "hidden"
            "#,
        )
        .unwrap();

        assert!(config.commit_type("feat").is_some());
        assert!(config.commit_type("hidden").is_none());
        assert_eq!(config.types().len(), 2);
    }

    #[test]
    fn from_toml_reports_parse_errors() {
        assert!(matches!(
            Config::from_toml("format = "),
            Err(FromTomlError::Parse(_))
        ));
    }

    #[test]
    fn from_toml_reports_invalid_configurations() {
        assert!(matches!(
            Config::from_toml("format = \"{type}\""),
            Err(FromTomlError::Invalid(_))
        ));
    }

    #[test]
    fn load_from_reports_missing_files() {
        let error =
            Config::load_from(Path::new("/nonexistent/emoji-cz.toml"))
                .unwrap_err();

        assert!(matches!(error, LoadError::Read { .. }));
    }

    #[test]
    fn read_document_reports_parse_errors_as_invalid_config() {
        let path = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/res/config/not-toml.toml"
        ));

        assert!(matches!(
            Config::read_document(path),
            Err(LoadError::InvalidConfig {
                source: FromTomlError::Parse(_),
                ..
            })
        ));
    }

    #[test]
    fn from_document_reports_validation_errors_as_invalid_config() {
        let path = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/res/config/dangling-list.toml"
        ));
        let document = Config::read_document(path).unwrap();

        assert!(matches!(
            Config::from_document(path, &document),
            Err(LoadError::InvalidConfig {
                source: FromTomlError::Invalid(ConfigError {
                    kind: ConfigErrorKind::DanglingReference,
                    ..
                }),
                ..
            })
        ));
    }

    #[test]
    fn accepts_scope_accepts_anything_without_a_list() {
        let config = Config::default();

        assert!(config.accepts_scope("anything"));
    }

    #[test]
    fn question_names_round_trip() {
        for question in Question::ALL {
            assert_eq!(Question::from_name(question.as_str()), Some(question));
        }

        assert_eq!(Question::from_name("lerna"), None);
    }
}
