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

//! The command-line interface.

mod check;
mod commit;
mod format;
pub mod helpers;
mod init;
mod lint;

use std::{
    error::Error as _,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use eyre::Result;

use self::{
    check::Check,
    commit::Commit,
    format::Format,
    init::{Init, InitError},
    lint::Lint,
};
use crate::{
    config::LoadError,
    error, hint,
    message::{ComposeError, LintError},
};

/// A commit message helper with emoji commit types.
#[derive(Debug, Parser)]
#[command(author, version)]
pub struct EmojiCz {
    /// Options shared by all commands.
    #[command(flatten)]
    options: GlobalOptions,
    /// The command to run.
    #[command(subcommand)]
    command: EmojiCzCommand,
}

/// Options shared by all commands.
#[derive(Debug, clap::Args)]
struct GlobalOptions {
    /// Path of the configuration file.
    ///
    /// Defaults to `emoji-cz.toml` at the root of the Git repository, or to the
    /// built-in configuration if there is no such file.
    #[arg(long, short = 'c', global = true, env = "EMOJI_CZ_CONFIG")]
    config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Returns the explicit path of the configuration file, if any.
    fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// The emoji-cz commands.
#[derive(Debug, Subcommand)]
enum EmojiCzCommand {
    /// Initialises the configuration.
    Init(Init),
    /// Checks the configuration.
    Check(Check),
    /// Formats a commit message from the command line.
    Format(Format),
    /// Runs the commit wizard.
    Commit(Commit),
    /// Lints a commit message.
    Lint(Lint),
}

/// A command.
trait Command {
    /// Runs the command.
    fn run(&self, options: &GlobalOptions) -> Result<()>;
}

impl EmojiCz {
    /// Runs emoji-cz.
    pub fn run() -> Result<()> {
        crate::tracing::init();

        let Self { options, command } = Self::parse();
        tracing::debug!(?options, ?command, "parsed the command line");

        let result = match command {
            EmojiCzCommand::Init(init) => init.run(&options),
            EmojiCzCommand::Check(check) => check.run(&options),
            EmojiCzCommand::Format(format) => format.run(&options),
            EmojiCzCommand::Commit(commit) => commit.run(&options),
            EmojiCzCommand::Lint(lint) => lint.run(&options),
        };

        match result {
            Err(e) => handle_errors(e),
            Ok(()) => Ok(()),
        }
    }
}

/// Reports the usage errors nicely, and lets eyre handle the others.
fn handle_errors(e: color_eyre::Report) -> Result<()> {
    if let Some(e) = e.downcast_ref::<LoadError>() {
        error!("{e}");
        let mut source = e.source();
        while let Some(cause) = source {
            hint!("{cause}");
            source = cause.source();
        }
        hint!("You can check the configuration by running `emoji-cz check`.");
        std::process::exit(exitcode::CONFIG);
    } else if let Some(e) = e.downcast_ref::<ComposeError>() {
        error!("{e}");
        std::process::exit(exitcode::DATAERR);
    } else if let Some(e) = e.downcast_ref::<LintError>() {
        error!("{e}");
        std::process::exit(exitcode::DATAERR);
    } else if let Some(e) = e.downcast_ref::<InitError>() {
        match e {
            InitError::ExistingConfig { .. } => {
                error!("{e}");
                hint!(
                    "You can force the command by running `emoji-cz init -f`."
                );
            }
            InitError::NoConfigPath => {
                error!("{e}");
                hint!("You can pass an explicit path with `--config`.");
            }
        }
        std::process::exit(1);
    } else {
        Err(e)
    }
}
