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

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

mod command_line;

use std::{
    io::{self, Write},
    process::exit,
};

use chess_tournament_manager::{
    console::Console,
    controller::Controller,
    database::{Memory, RonFile, Storage},
    registry::Registry,
    utils,
};
use clap::Parser;
use log::{error, info};

use crate::command_line::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger(args.debug);

    if args.man {
        return Args::generate_man_page();
    }

    ctrlc::set_handler(|| {
        println!("\n\nProgram terminated by user. Goodbye!");
        exit(0);
    })?;

    if args.skip_the_data_file {
        info!("keeping the database in memory");
        run(Memory::default())
    } else {
        let path = args.data_file.unwrap_or_else(utils::data_file);
        info!("using the database {}", path.display());
        run(RonFile::new(path))
    }
}

fn run<S: Storage>(storage: S) -> anyhow::Result<()> {
    let registry = Registry::open(storage).inspect_err(|error| error!("{error}"))?;
    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut controller = Controller::new(registry, console, rand::rng());

    controller.run().inspect_err(|error| error!("{error}"))?;
    io::stdout().flush()?;
    Ok(())
}
