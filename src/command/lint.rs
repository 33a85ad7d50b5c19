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

//! The `lint` subcommand.

use std::{fs, path::PathBuf};

use clap::Parser;
use eyre::{Context as _, Result};

use crate::{command::helpers::load_config, message::lint, success};

/// The lint command.
#[derive(Debug, Parser)]
pub struct Lint {
    /// Do not print anything when the message is valid.
    #[arg(long, short = 'q')]
    quiet: bool,
    /// The file containing the commit message, like `.git/COMMIT_EDITMSG`.
    file: PathBuf,
}

impl super::Command for Lint {
    #[tracing::instrument(name = "lint", level = "trace", skip_all)]
    fn run(&self, options: &super::GlobalOptions) -> Result<()> {
        let config = load_config(options.config_path())?;

        let message = fs::read_to_string(&self.file).wrap_err_with(|| {
            format!("Failed to read {}", self.file.display())
        })?;

        let answers = lint(&config, &message)?;
        tracing::debug!(?answers, "valid commit message");

        if !self.quiet {
            success!("The commit message is valid.");
        }

        Ok(())
    }
}
