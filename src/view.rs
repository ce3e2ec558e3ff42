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

//! Text tables for the console.

use std::fmt;

use crate::{
    database::DocId, player::Player, round::Round, tournament::Tournament, utils::format_date,
};

pub const WELCOME: &str = "Welcome to the chess tournament manager!";

pub const MAIN_MENU: &str = "
=== Main Menu ===
[1]. Players
[2]. Tournaments
[3]. Reports
[0]. Exit";

pub const PLAYERS_MENU: &str = "
=== Players ===
[1]. Show all players
[2]. Add players
[3]. Edit a player
[0]. Back";

pub const TOURNAMENTS_MENU: &str = "
=== Tournaments ===
[1]. Show all tournaments
[2]. Create a tournament
[3]. Edit a tournament
[4]. Start or resume a tournament
[0]. Back";

pub const TOURNAMENT_EDIT_MENU: &str = "
=== Edit Tournament ===
[1]. Show informations and players
[2]. Edit informations
[3]. Add players
[4]. Remove players
[0]. Back";

pub const REPORTS_MENU: &str = "
=== Reports ===
[1]. All players
[2]. All tournaments
[3]. Tournament details
[4]. Tournament players
[5]. Tournament rounds and matches
[0]. Back";

pub const CHOICE: &str = "Enter your choice : ";

fn rule(f: &mut fmt::Formatter<'_>, width: usize) -> fmt::Result {
    writeln!(f, "{}", "-".repeat(width))
}

/// Registered players, without scores.
pub struct PlayersTable<'a>(pub &'a [Player]);

impl fmt::Display for PlayersTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12} {:<20} {:<20} {:<12}",
            "ID", "Name", "Surname", "Birthday"
        )?;
        rule(f, 67)?;
        for player in self.0 {
            writeln!(
                f,
                "{:<12} {:<20} {:<20} {:<12}",
                player.national_chess_id, player.name, player.surname, player.birthday
            )?;
        }
        Ok(())
    }
}

/// Tournament players with their scores, numbered in the given order.
pub struct ScoresTable<'a>(pub &'a [Player]);

impl fmt::Display for ScoresTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>3} {:<12} {:<20} {:<20} {:>6}",
            "#", "ID", "Name", "Surname", "Score"
        )?;
        rule(f, 65)?;
        for (index, player) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{:>3} {:<12} {:<20} {:<20} {:>6.1}",
                index + 1,
                player.national_chess_id,
                player.name,
                player.surname,
                player.score
            )?;
        }
        Ok(())
    }
}

pub struct TournamentsTable<'a>(pub &'a [(DocId, Tournament)]);

impl fmt::Display for TournamentsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4} {:<24} {:<16} {:>7} {:<20} {:<20}",
            "ID", "Name", "Location", "Rounds", "Start", "End"
        )?;
        rule(f, 96)?;
        for (id, tournament) in self.0 {
            writeln!(
                f,
                "{:>4} {:<24} {:<16} {:>7} {:<20} {:<20}",
                id,
                tournament.name,
                tournament.location,
                format!(
                    "{}/{}",
                    tournament.current_round_number, tournament.number_of_rounds
                ),
                format_date(tournament.start_date.as_ref()),
                format_date(tournament.end_date.as_ref()),
            )?;
        }
        Ok(())
    }
}

pub struct TournamentInfo<'a>(pub &'a Tournament);

impl fmt::Display for TournamentInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tournament = self.0;
        writeln!(f, "Name: {}", tournament.name)?;
        writeln!(f, "Location: {}", tournament.location)?;
        writeln!(f, "Description: {}", tournament.description)?;
        writeln!(
            f,
            "Rounds: {}/{}",
            tournament.current_round_number, tournament.number_of_rounds
        )?;
        writeln!(f, "Status: {}", tournament.status())?;
        writeln!(f, "Start: {}", format_date(tournament.start_date.as_ref()))?;
        writeln!(f, "End: {}", format_date(tournament.end_date.as_ref()))
    }
}

/// The matches of a round, numbered from one.
pub struct RoundView<'a>(pub &'a Round);

impl fmt::Display for RoundView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let round = self.0;
        writeln!(
            f,
            "=== {} === (start: {}, end: {})",
            round.round_name,
            format_date(round.start_date.as_ref()),
            format_date(round.end_date.as_ref())
        )?;
        for (index, game) in round.matches.iter().enumerate() {
            writeln!(f, "[{}]. {game}", index + 1)?;
        }
        Ok(())
    }
}

pub struct RoundsReport<'a>(pub &'a Tournament);

impl fmt::Display for RoundsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for round in &self.0.rounds {
            writeln!(f, "{}", RoundView(round))?;
        }
        Ok(())
    }
}
