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

//! The `init` subcommand.

use std::{fs, path::PathBuf};

use askama::Template;
use clap::Parser;
use eyre::{Result, bail};
use inquire::Confirm;
use thiserror::Error;

use super::helpers::ensure_in_git_worktree;
use crate::{
    config::{CONFIG_FILE_NAME, Config, Question, config_file},
    hint, success,
};

/// The header format when asking for a scope.
const FORMAT_WITH_SCOPE: &str = "{emoji}{type}{scope}: {subject}";

/// The init command.
#[derive(Debug, Parser)]
pub struct Init {
    /// Use the default configuration.
    #[arg(long, short = 'd')]
    default: bool,
    /// Force the init process.
    #[arg(long, short = 'f')]
    force: bool,
}

/// Usage errors of `emoji-cz init`.
#[derive(Debug, Error)]
pub enum InitError {
    /// A configuration already exists.
    #[error("There is already a configuration at {}", path.display())]
    ExistingConfig {
        /// The path of the existing configuration.
        path: PathBuf,
    },
    /// The path of the configuration file cannot be determined.
    #[error("Cannot determine where to write {CONFIG_FILE_NAME}")]
    NoConfigPath,
}

/// Parameters to generate an `emoji-cz.toml`.
///
/// Strings are stored already quoted for TOML.
#[derive(Debug, Template)]
#[template(path = "emoji-cz.toml.jinja", escape = "none")]
struct ConfigTemplate {
    /// Whether to disable emoji.
    disable_emoji: bool,
    /// The header format.
    format: String,
    /// The maximum subject length.
    max_message_length: usize,
    /// The minimum subject length.
    min_message_length: usize,
    /// The questions to ask.
    questions: Vec<Question>,
    /// The prefix of the issues footer.
    closed_issue_message: String,
    /// The prompts.
    messages: Vec<MessageEntry>,
    /// The commit types.
    types: Vec<TypeEntry>,
}

/// A prompt in the generated configuration.
#[derive(Debug)]
struct MessageEntry {
    /// The question.
    question: Question,
    /// The quoted prompt.
    message: String,
}

/// A commit type in the generated configuration.
#[derive(Debug)]
struct TypeEntry {
    /// The key of the type.
    key: String,
    /// The quoted description.
    description: String,
    /// The quoted emoji.
    emoji: String,
}

/// The answers of the init wizard.
#[derive(Debug, Default)]
struct Choices {
    /// Whether to leave the emoji out.
    disable_emoji: bool,
    /// Whether to ask for a scope.
    ask_scope: bool,
    /// Whether to ask for breaking changes.
    ask_breaking: bool,
    /// Whether to ask for related issues.
    ask_issues: bool,
}

impl super::Command for Init {
    #[tracing::instrument(name = "init", level = "trace", skip_all)]
    fn run(&self, options: &super::GlobalOptions) -> Result<()> {
        let config_file = match options.config_path() {
            Some(path) => path.to_owned(),
            None => {
                ensure_in_git_worktree()?;
                config_file().ok_or(InitError::NoConfigPath)?
            }
        };

        if !self.force && config_file.exists() {
            bail!(InitError::ExistingConfig { path: config_file });
        }

        let template = if self.default {
            ConfigTemplate::from_config(&Config::default())
        } else {
            ConfigTemplate::from_choices(&Choices::run_wizard()?)
        };

        tracing::debug!(?config_file, "writing the configuration");
        fs::write(&config_file, format!("{}\n", template.render()?))?;

        success!("A {CONFIG_FILE_NAME} has been created!");
        hint!("You can now edit it to adjust the configuration.");

        Ok(())
    }
}

impl ConfigTemplate {
    /// Builds the parameters reproducing `config`.
    fn from_config(config: &Config) -> Self {
        Self {
            disable_emoji: config.disable_emoji(),
            format: quoted(config.format()),
            max_message_length: config.max_message_length(),
            min_message_length: config.min_message_length(),
            questions: config.questions().to_vec(),
            closed_issue_message: quoted(config.closed_issue_message()),
            messages: config
                .questions()
                .iter()
                .map(|&question| MessageEntry {
                    question,
                    message: quoted(config.message(question)),
                })
                .collect(),
            types: config
                .listed_types()
                .map(|commit_type| TypeEntry {
                    key: commit_type.key().to_owned(),
                    description: quoted(commit_type.description()),
                    emoji: quoted(commit_type.emoji()),
                })
                .collect(),
        }
    }

    /// Builds the parameters from the default configuration and the choices.
    fn from_choices(choices: &Choices) -> Self {
        let mut template = Self::from_config(&Config::default());

        template.disable_emoji = choices.disable_emoji;

        if choices.ask_scope {
            template.format = quoted(FORMAT_WITH_SCOPE);
        }

        template.questions = [
            (Question::Type, true),
            (Question::Scope, choices.ask_scope),
            (Question::Subject, true),
            (Question::Body, true),
            (Question::Breaking, choices.ask_breaking),
            (Question::Issues, choices.ask_issues),
        ]
        .into_iter()
        .filter_map(|(question, ask)| ask.then_some(question))
        .collect();

        template.messages = template
            .questions
            .iter()
            .map(|&question| MessageEntry {
                question,
                message: quoted(question.default_message()),
            })
            .collect();

        template
    }
}

impl Choices {
    /// Runs the wizard for the configuration.
    fn run_wizard() -> Result<Self> {
        let use_emoji = Confirm::new("Show the emoji of the commit type?")
            .with_default(true)
            .prompt()?;

        Ok(Self {
            disable_emoji: !use_emoji,
            ask_scope: confirm("Ask for a scope?")?,
            ask_breaking: confirm("Ask for breaking changes?")?,
            ask_issues: confirm("Ask for related issues?")?,
        })
    }
}

/// Asks a yes / no question, defaulting to no.
fn confirm(message: &str) -> Result<bool> {
    Ok(Confirm::new(message).with_default(false).prompt()?)
}

/// Returns `text` as a quoted TOML string.
fn quoted(text: &str) -> String {
    toml::Value::String(text.to_owned()).to_string()
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use super::*;

    #[test]
    fn default_template_renders_the_default_config() {
        let rendered = ConfigTemplate::from_config(&Config::default())
            .render()
            .unwrap();

        assert_eq!(Config::from_toml(&rendered).unwrap(), Config::default());
    }

    #[test]
    fn default_template_is_commented() {
        let rendered = ConfigTemplate::from_config(&Config::default())
            .render()
            .unwrap();

        assert!(rendered.starts_with("# emoji-cz configuration."));
        assert!(rendered.contains("questions = [\"type\", \"subject\", \"body\"]"));
        assert!(rendered.contains("[types.feat]"));
    }

    #[test]
    fn choices_add_the_optional_questions() {
        let choices = Choices {
            disable_emoji: true,
            ask_scope: true,
            ask_breaking: true,
            ask_issues: true,
        };

        let rendered = ConfigTemplate::from_choices(&choices).render().unwrap();
        let config = Config::from_toml(&rendered).unwrap();

        assert!(config.disable_emoji());
        assert_eq!(config.format(), FORMAT_WITH_SCOPE);
        assert_eq!(config.questions(), &Question::ALL);
        assert_eq!(
            config.message(Question::Breaking),
            Question::Breaking.default_message()
        );
    }

    #[test]
    fn choices_without_options_keep_the_default_questions() {
        let rendered = ConfigTemplate::from_choices(&Choices::default())
            .render()
            .unwrap();
        let config = Config::from_toml(&rendered).unwrap();

        assert_eq!(config.questions(), Config::default().questions());
        assert_eq!(config.format(), Config::default().format());
    }

    #[test]
    fn quoted_escapes_special_characters() {
        let quoted = quoted("say \"hi\"\n");
        let parsed: toml::Table = format!("key = {quoted}").parse().unwrap();

        assert_eq!(parsed["key"].as_str(), Some("say \"hi\"\n"));
    }
}
