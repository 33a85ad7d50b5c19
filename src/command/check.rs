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

//! The `check` subcommand.

use clap::Parser;
use eyre::Result;
use itertools::Itertools as _;

use crate::{
    config::{CONFIG_FILE_NAME, Config, unknown_keys},
    hint, success, warning,
};

/// The check command.
#[derive(Debug, Parser)]
pub struct Check {
    /// Print the effective configuration instead of a summary.
    #[arg(long)]
    print: bool,
}

impl super::Command for Check {
    #[tracing::instrument(name = "check", level = "trace", skip_all)]
    fn run(&self, options: &super::GlobalOptions) -> Result<()> {
        let path = Config::locate(options.config_path());

        let config = match &path {
            Some(path) => {
                let document = Config::read_document(path)?;
                let config = Config::from_document(path, &document)?;

                for key in unknown_keys(&document) {
                    warning!("Unknown key `{key}` in {}.", path.display());
                }

                config
            }
            None => Config::default(),
        };

        if self.print {
            print!("{}", config.to_toml()?);
            return Ok(());
        }

        match &path {
            Some(path) => {
                success!("The configuration in {} is valid.", path.display());
            }
            None => {
                success!(
                    "There is no {CONFIG_FILE_NAME}, the default configuration is used."
                );
            }
        }

        hint!("Commit types: {}", config.list().iter().join(", "));
        hint!("Questions: {}", config.questions().iter().join(", "));

        Ok(())
    }
}
