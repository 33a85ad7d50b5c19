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

//! The `commit` subcommand.

mod backend;

use std::fmt;

use clap::Parser;
use eyre::Result;
use inquire::{CustomUserError, Select, Text, validator::Validation};

use self::backend::{Backend, GitBackend, PrintBackend};
use super::helpers::ensure_in_git_worktree;
use crate::{
    command::helpers::load_config,
    config::{CommitType, Config, Question},
    message::{Answers, check_subject, compose},
};

/// The size of a page in the terminal.
const PAGE_SIZE: usize = 15;

/// The commit command.
#[derive(Debug, Parser)]
pub struct Commit {
    /// Print the commit message instead of calling `git commit`.
    #[arg(long)]
    print_only: bool,
    /// Extra arguments to be passed to `git commit`.
    #[arg(last = true)]
    extra_args: Vec<String>,
}

/// A commit type as displayed in the type selection.
struct TypeChoice<'a> {
    /// The commit type.
    commit_type: &'a CommitType,
    /// The width of the longest key.
    key_width: usize,
    /// Whether to show the emoji.
    show_emoji: bool,
}

impl fmt::Display for TypeChoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.commit_type.key();
        let key_width = self.key_width;
        let description = self.commit_type.description();

        if self.show_emoji {
            let emoji = self.commit_type.emoji();
            write!(f, "{key:key_width$}  {emoji}  {description}")
        } else {
            write!(f, "{key:key_width$}  {description}")
        }
    }
}

impl super::Command for Commit {
    #[tracing::instrument(name = "commit", level = "trace", skip_all)]
    fn run(&self, options: &super::GlobalOptions) -> Result<()> {
        let backend: Box<dyn Backend> = if self.print_only {
            Box::new(PrintBackend)
        } else {
            ensure_in_git_worktree()?;
            Box::new(GitBackend::new(&self.extra_args))
        };

        let config = load_config(options.config_path())?;
        let answers = run_wizard(&config)?;
        let commit_message = compose(&config, &answers)?;

        backend.call(&commit_message)?;

        Ok(())
    }
}

/// Runs the wizard to collect the answers from user input.
///
/// Questions are asked in the order of the configuration.
fn run_wizard(config: &Config) -> Result<Answers> {
    let mut answers = Answers::default();

    for &question in config.questions() {
        let prompt = prompt(config, question);

        match question {
            Question::Type => answers.r#type = ask_type(config, &prompt)?,
            Question::Scope => answers.scope = ask_scope(config, &prompt)?,
            Question::Subject => {
                answers.subject = ask_subject(config, &prompt)?;
            }
            Question::Body => answers.body = ask_optional(&prompt)?,
            Question::Breaking => answers.breaking = ask_optional(&prompt)?,
            Question::Issues => answers.issues = ask_optional(&prompt)?,
        }

        tracing::debug!(%question, ?answers, "question answered");
    }

    Ok(answers)
}

/// Returns the prompt text for a question.
fn prompt(config: &Config, question: Question) -> String {
    config.message(question).trim().to_owned()
}

/// Asks the user which type of commit they want.
fn ask_type(config: &Config, prompt: &str) -> Result<String> {
    let key_width = config
        .listed_types()
        .map(|commit_type| commit_type.key().chars().count())
        .max()
        .unwrap_or_default();

    let choices = config
        .listed_types()
        .map(|commit_type| TypeChoice {
            commit_type,
            key_width,
            show_emoji: !config.disable_emoji(),
        })
        .collect();

    let choice = Select::new(prompt, choices)
        .with_page_size(PAGE_SIZE)
        .with_formatter(&|choice| choice.value.commit_type.key().to_owned())
        .prompt()?;

    Ok(choice.commit_type.key().to_owned())
}

/// Asks the user to which scope the changes are applicable.
fn ask_scope(config: &Config, prompt: &str) -> Result<Option<String>> {
    if config.scopes().is_empty() {
        Ok(Text::new(prompt)
            .with_help_message("Press ESC or leave empty to omit the scope.")
            .prompt_skippable()?
            .filter(|scope| !scope.is_empty()))
    } else {
        let help_message = "↑↓ to move, enter to select, type to filter, ESC \
            to leave empty";

        Ok(Select::new(prompt, config.scopes().to_vec())
            .with_help_message(help_message)
            .with_page_size(PAGE_SIZE)
            .prompt_skippable()?)
    }
}

/// Asks the user for the short description.
fn ask_subject(config: &Config, prompt: &str) -> Result<String> {
    let placeholder = format!(
        "describe your change with a short description ({}-{} characters)",
        config.min_message_length(),
        config.max_message_length()
    );

    let validator_config = config.clone();
    let validator = move |subject: &str| -> Result<Validation, CustomUserError> {
        match check_subject(&validator_config, subject) {
            Ok(()) => Ok(Validation::Valid),
            Err(error) => Ok(Validation::Invalid(error.to_string().into())),
        }
    };

    Ok(Text::new(prompt)
        .with_placeholder(&placeholder)
        .with_validator(validator)
        .prompt()?)
}

/// Asks the user for an optional answer.
fn ask_optional(prompt: &str) -> Result<Option<String>> {
    Ok(Text::new(prompt)
        .with_help_message("Press ESC or leave empty to omit.")
        .prompt_skippable()?
        .filter(|answer| !answer.is_empty()))
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use super::*;

    #[test]
    fn type_choices_are_aligned() {
        let config = Config::default();
        let choice = |key: &str| {
            TypeChoice {
                commit_type: config.commit_type(key).unwrap(),
                key_width: 8,
                show_emoji: true,
            }
            .to_string()
        };

        assert_eq!(choice("feat"), "feat      🎸  New feature");
        assert_eq!(choice("refactor").find("💡"), choice("feat").find("🎸"));
    }

    #[test]
    fn type_choices_hide_the_emoji_when_disabled() {
        let config = Config::default();
        let choice = TypeChoice {
            commit_type: config.commit_type("fix").unwrap(),
            key_width: 3,
            show_emoji: false,
        };

        assert_eq!(choice.to_string(), "fix  Bug fix");
    }
}
