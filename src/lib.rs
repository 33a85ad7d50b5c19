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

//! A commit message helper with emoji commit types.
//!
//! The behaviour of `emoji-cz` is driven by a static configuration listing the
//! available commit types, their emoji, the questions to ask and the format of
//! the commit header. This crate provides:
//!
//! * the [`config`] schema validator, turning a TOML document into an
//!   immutable [`Config`](config::Config),
//! * the [`template`] formatter, substituting `{placeholders}` in the header
//!   template,
//! * the [`message`] composition and linting on top of both,
//! * the [`EmojiCz`] command-line interface.

pub mod command;
pub mod config;
pub mod message;
pub mod template;
mod tracing;

pub use command::EmojiCz;
