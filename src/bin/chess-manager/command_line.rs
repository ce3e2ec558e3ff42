// This file is part of chess-tournament-manager.
//
// chess-tournament-manager is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// chess-tournament-manager is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{io::Write as _, path::PathBuf};

use chess_tournament_manager::{COPYRIGHT, LONG_VERSION};
use clap::{CommandFactory, Parser};

/// Chess Tournament Manager
///
/// Registers players and runs Swiss-style tournaments from the console.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Chess Tournament Manager")]
pub(crate) struct Args {
    /// The database file [default: <data dir>/chess-tournament-manager/db.ron]
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Whether to log on the debug level
    #[arg(long)]
    pub debug: bool,

    /// Whether to skip the data file and keep everything in memory
    #[arg(long)]
    pub skip_the_data_file: bool,

    /// Build the manpage
    #[arg(long)]
    pub man: bool,
}

impl Args {
    pub(crate) fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command().name("chess-manager").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-18");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("chess-manager.1", buffer)?;
        Ok(())
    }
}
