//! A console chess tournament manager.
//!
//! Players are registered once in a registry, copied into tournaments, and
//! paired round by round with a greedy Swiss-style engine that avoids repeat
//! opponents and prefers players with fewer matches and higher scores.
//!
//! ## Layout
//!
//! * [`player`], [`chess_match`], [`round`], [`tournament`] - the entities
//! * [`pairing`] - the helpers behind [`tournament::Tournament::create_round`]
//! * [`documents`] - the persisted form of the entities
//! * [`database`] - a document store over a RON file or memory
//! * [`registry`] - player and tournament operations over the store
//! * [`console`], [`view`], [`controller`] - the text interface

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

#![deny(clippy::panic)]

pub mod chess_match;
pub mod console;
pub mod controller;
pub mod database;
pub mod documents;
pub mod error;
pub mod pairing;
pub mod player;
pub mod registry;
pub mod round;
pub mod tournament;
pub mod utils;
pub mod view;

pub use error::Error;

pub const HOME: &str = "chess-tournament-manager";
pub const DATA_FILE: &str = "db.ron";

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Developers of the chess-tournament-manager project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 Developers of the chess-tournament-manager project
Licensed under the AGPLv3"
);
