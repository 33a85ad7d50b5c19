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

//! The `format` subcommand.

use clap::Parser;
use eyre::Result;

use crate::{
    command::helpers::load_config,
    message::{Answers, compose},
};

/// The format command.
#[derive(Debug, Parser)]
pub struct Format {
    /// The commit type.
    #[arg(long = "type", short = 't')]
    r#type: String,
    /// The scope of the change.
    #[arg(long, short = 's')]
    scope: Option<String>,
    /// The long description.
    #[arg(long, short = 'b')]
    body: Option<String>,
    /// The breaking change description.
    #[arg(long)]
    breaking: Option<String>,
    /// The related issues.
    #[arg(long)]
    issues: Option<String>,
    /// The short description.
    subject: String,
}

impl super::Command for Format {
    #[tracing::instrument(name = "format", level = "trace", skip_all)]
    fn run(&self, options: &super::GlobalOptions) -> Result<()> {
        let config = load_config(options.config_path())?;

        let answers = Answers {
            r#type: self.r#type.clone(),
            scope: self.scope.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            breaking: self.breaking.clone(),
            issues: self.issues.clone(),
        };

        println!("{}", compose(&config, &answers)?);
        Ok(())
    }
}
