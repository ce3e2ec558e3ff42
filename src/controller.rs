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

//! The menus.
//!
//! Recoverable errors are printed and the menu continues. Storage and
//! terminal errors end the run.

use std::io::{BufRead, Write};

use log::{info, warn};
use rand::Rng;

use crate::{
    Error,
    console::Console,
    database::{DocId, Storage},
    player::{self, Player, PlayerUpdate},
    registry::{self, Registry, RosterReport},
    tournament::{DEFAULT_NUMBER_OF_ROUNDS, Tournament, TournamentStatus, TournamentUpdate},
    utils::split_ids,
    view::{
        self, PlayersTable, RoundView, RoundsReport, ScoresTable, TournamentInfo,
        TournamentsTable,
    },
};

pub struct Controller<S, R, I, O> {
    registry: Registry<S>,
    console: Console<I, O>,
    rng: R,
}

impl<S: Storage, R: Rng, I: BufRead, O: Write> Controller<S, R, I, O> {
    pub fn new(registry: Registry<S>, console: Console<I, O>, rng: R) -> Self {
        Self {
            registry,
            console,
            rng,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    #[must_use]
    pub fn console(&self) -> &Console<I, O> {
        &self.console
    }

    /// Shows the main menu until the user exits or the input closes.
    ///
    /// # Errors
    ///
    /// If saving fails or the terminal cannot be used.
    pub fn run(&mut self) -> Result<(), Error> {
        match self.main_menu() {
            Err(Error::EndOfInput) => {
                info!("the input was closed");
                Ok(())
            }
            result => result,
        }
    }

    fn main_menu(&mut self) -> Result<(), Error> {
        self.console.print(view::WELCOME)?;

        loop {
            self.console.print(view::MAIN_MENU)?;
            match self.console.choose(view::CHOICE, &["1", "2", "3", "0"])?.as_str() {
                "1" => self.players_menu()?,
                "2" => self.tournaments_menu()?,
                "3" => self.reports_menu()?,
                _ => {
                    self.console.print("\nGoodbye!\n")?;
                    return Ok(());
                }
            }
        }
    }

    fn players_menu(&mut self) -> Result<(), Error> {
        loop {
            self.console.print(view::PLAYERS_MENU)?;
            let result = match self.console.choose(view::CHOICE, &["1", "2", "3", "0"])?.as_str() {
                "1" => self.show_players(),
                "2" => self.add_players(),
                "3" => self.edit_player(),
                _ => return Ok(()),
            };
            self.recover(result)?;
        }
    }

    fn tournaments_menu(&mut self) -> Result<(), Error> {
        loop {
            self.console.print(view::TOURNAMENTS_MENU)?;
            let result = match self
                .console
                .choose(view::CHOICE, &["1", "2", "3", "4", "0"])?
                .as_str()
            {
                "1" => self.show_tournaments(),
                "2" => self.create_tournament(),
                "3" => self.edit_tournament(),
                "4" => self.start_tournament(),
                _ => return Ok(()),
            };
            self.recover(result)?;
        }
    }

    fn reports_menu(&mut self) -> Result<(), Error> {
        loop {
            self.console.print(view::REPORTS_MENU)?;
            let result = match self
                .console
                .choose(view::CHOICE, &["1", "2", "3", "4", "5", "0"])?
                .as_str()
            {
                "1" => self.show_players(),
                "2" => self.show_tournaments(),
                "3" => self.report_tournament_details(),
                "4" => self.report_tournament_players(),
                "5" => self.report_rounds_and_matches(),
                _ => return Ok(()),
            };
            self.recover(result)?;
        }
    }

    /// Prints recoverable errors and passes the rest on.
    fn recover(&mut self, result: Result<(), Error>) -> Result<(), Error> {
        match result {
            Err(error) if error.is_recoverable() => {
                warn!("{error}");
                self.console.print(format!("\n{error}\n"))
            }
            result => result,
        }
    }

    fn show_players(&mut self) -> Result<(), Error> {
        self.registry.sort_players()?;
        let players = self.registry.list_players();

        if players.is_empty() {
            return self.console.print("No players available.");
        }
        self.console.print(PlayersTable(&players))
    }

    fn add_players(&mut self) -> Result<(), Error> {
        loop {
            let name = self.console.prompt("Name : ")?;
            let surname = self.console.prompt("Surname : ")?;
            let birthday = self.console.prompt("Birthday (YYYY-MM-DD) : ")?;
            let national_chess_id = self.console.prompt("National chess ID : ")?;

            let player = Player::new(&name, &surname, &birthday, &national_chess_id)?;
            self.registry.register_player(&player)?;
            self.console.print(format!("\nAdded {player}.\n"))?;

            if !self.console.confirm("Add another player? (y/n) : ")? {
                return Ok(());
            }
        }
    }

    fn edit_player(&mut self) -> Result<(), Error> {
        self.show_players()?;
        let national_chess_id = self
            .console
            .prompt("Enter the national chess ID of the player you want to edit : ")?;
        let player = self.registry.find_player(&national_chess_id)?;

        self.console
            .print(format!("\n{player} (born {})", player.birthday))?;
        self.console.print("Leave a field blank to keep it.")?;
        let name = self.console.prompt("New name : ")?;
        let surname = self.console.prompt("New surname : ")?;
        let birthday = self.console.prompt("New birthday : ")?;
        let new_id = self.console.prompt("New national chess ID : ")?;

        let update = PlayerUpdate::from_answers(&name, &surname, &birthday, &new_id);
        self.registry.update_player(&national_chess_id, &update)?;
        self.console.print("\nPlayer successfully updated.\n")
    }

    fn show_tournaments(&mut self) -> Result<(), Error> {
        let tournaments = self.registry.list_tournaments();

        if tournaments.is_empty() {
            return self.console.print("No tournaments available.");
        }
        self.console.print(TournamentsTable(&tournaments))
    }

    fn create_tournament(&mut self) -> Result<(), Error> {
        let name = self.console.prompt("Tournament name : ")?;
        let location = self.console.prompt("Location : ")?;
        let description = self.console.prompt("Description : ")?;
        let number_of_rounds = self
            .console
            .parse_or_blank(&format!(
                "Number of rounds (default {DEFAULT_NUMBER_OF_ROUNDS}) : "
            ))?
            .unwrap_or(DEFAULT_NUMBER_OF_ROUNDS);

        self.show_players()?;
        let ids = self.console.prompt(
            "Enter the national chess IDs of the players, separated by commas : ",
        )?;
        let (players, missing) = self.registry.select_players(&split_ids(&ids));
        for id in missing {
            self.console
                .print(format!("Player with national chess ID {id} not found."))?;
        }

        let mut tournament = Tournament::new(&name, &location, &description, players, number_of_rounds);
        self.registry.create_tournament(&mut tournament)?;
        self.console.print("\nTournament saved.\n")
    }

    /// Lists the tournaments and loads the one the user picks.
    fn select_tournament(&mut self) -> Result<Option<(DocId, Tournament)>, Error> {
        let tournaments = self.registry.list_tournaments();
        if tournaments.is_empty() {
            self.console.print("No tournaments available.")?;
            return Ok(None);
        }
        self.console.print(TournamentsTable(&tournaments))?;

        let answer = self
            .console
            .prompt("Enter the ID of the tournament you want to select : ")?;
        let id: DocId = answer
            .parse()
            .map_err(|_| Error::InvalidInput(format!("{answer} is not a tournament ID")))?;

        let tournament = self.registry.load_tournament(id)?;
        Ok(Some((id, tournament)))
    }

    fn edit_tournament(&mut self) -> Result<(), Error> {
        let Some((id, mut tournament)) = self.select_tournament()? else {
            return Ok(());
        };
        self.console.print(TournamentInfo(&tournament))?;

        loop {
            self.console.print(view::TOURNAMENT_EDIT_MENU)?;
            let result = match self
                .console
                .choose(view::CHOICE, &["1", "2", "3", "4", "0"])?
                .as_str()
            {
                "1" => self.show_tournament(&tournament),
                "2" => self.edit_tournament_info(id, &mut tournament),
                "3" => self.add_tournament_players(id, &mut tournament),
                "4" => self.remove_tournament_players(id, &mut tournament),
                _ => return Ok(()),
            };
            self.recover(result)?;
        }
    }

    fn show_tournament(&mut self, tournament: &Tournament) -> Result<(), Error> {
        self.console.print(TournamentInfo(tournament))?;
        if tournament.players.is_empty() {
            return self.console.print("\nNo players available in this tournament.\n");
        }
        self.console.print(ScoresTable(&tournament.players))
    }

    fn edit_tournament_info(&mut self, id: DocId, tournament: &mut Tournament) -> Result<(), Error> {
        self.console.print(TournamentInfo(tournament))?;
        self.console.print("Leave a field blank to keep it.")?;

        let name = self.console.prompt("New name : ")?;
        let location = self.console.prompt("New location : ")?;
        let description = self.console.prompt("New description : ")?;
        let number_of_rounds = self.console.parse_or_blank("New number of rounds : ")?;

        let supplied = |answer: String| (!answer.is_empty()).then_some(answer);
        let update = TournamentUpdate {
            name: supplied(name),
            location: supplied(location),
            description: supplied(description),
            number_of_rounds,
        };

        let mut edited = tournament.clone();
        edited.apply_update(&update)?;
        self.registry.save_tournament(id, &edited)?;
        *tournament = edited;

        info!("updated tournament {id} {}", tournament.name);
        self.console.print("\nTournament successfully updated.\n")
    }

    fn add_tournament_players(&mut self, id: DocId, tournament: &mut Tournament) -> Result<(), Error> {
        self.console.print(ScoresTable(&tournament.players))?;
        self.show_players()?;

        let ids = self.console.prompt(
            "Enter the national chess IDs of the players to add, separated by commas : ",
        )?;
        let report = self.registry.add_tournament_players(tournament, &split_ids(&ids));
        self.print_roster_report(&report, "Added", "is already in the tournament")?;

        self.registry.save_tournament(id, tournament)?;
        self.console.print("\nTournament successfully updated.")
    }

    fn remove_tournament_players(
        &mut self,
        id: DocId,
        tournament: &mut Tournament,
    ) -> Result<(), Error> {
        self.console.print(ScoresTable(&tournament.players))?;

        let ids = self.console.prompt(
            "Enter the national chess IDs of the players to remove, separated by commas : ",
        )?;
        let report = registry::remove_tournament_players(tournament, &split_ids(&ids));
        self.print_roster_report(&report, "Removed", "")?;

        self.registry.save_tournament(id, tournament)?;
        self.console.print("\nTournament successfully updated.")
    }

    fn print_roster_report(
        &mut self,
        report: &RosterReport,
        changed: &str,
        duplicate: &str,
    ) -> Result<(), Error> {
        for player in &report.changed {
            self.console.print(format!("{changed} {player}."))?;
        }
        for id in &report.duplicates {
            self.console
                .print(format!("Player with national chess ID {id} {duplicate}."))?;
        }
        for id in &report.refused {
            self.console.print(format!(
                "Player with national chess ID {id} already has a match and stays in the tournament."
            ))?;
        }
        for id in &report.missing {
            self.console.print(format!(
                "Player with national chess ID {id} is not available."
            ))?;
        }
        Ok(())
    }

    fn start_tournament(&mut self) -> Result<(), Error> {
        let Some((id, tournament)) = self.select_tournament()? else {
            return Ok(());
        };
        self.run_tournament(id, tournament)
    }

    /// Plays rounds until the tournament ends or the user stops.
    ///
    /// A round that was created or started but not ended is picked up where
    /// it was left.
    fn run_tournament(&mut self, id: DocId, mut tournament: Tournament) -> Result<(), Error> {
        self.console.print(TournamentInfo(&tournament))?;

        if tournament.status() == TournamentStatus::Ended {
            self.console.print("Tournament already ended.")?;
            return self.show_final_results(&tournament);
        }
        if tournament.players.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "{} needs at least two players",
                tournament.name
            )));
        }

        tournament.set_start_date();
        self.registry.save_tournament(id, &tournament)?;

        loop {
            if tournament
                .current_round()
                .is_none_or(|round| round.is_finished())
            {
                if tournament.current_round_number >= tournament.number_of_rounds {
                    tournament.set_end_date();
                    self.registry.save_tournament(id, &tournament)?;
                    return self.show_final_results(&tournament);
                }

                let label = format!(
                    "\nCreate round {}? (y/n) : ",
                    tournament.current_round_number + 1
                );
                if !self.console.confirm(&label)? {
                    return self
                        .console
                        .print("Round creation cancelled.\nBack to Tournaments Menu...");
                }

                tournament.create_round(&mut self.rng)?;
                self.registry.save_tournament(id, &tournament)?;
            }

            let round = tournament.current_round().ok_or(Error::NoCurrentRound)?;
            self.console.print(RoundView(round))?;

            if !round.is_started() {
                let label = format!("Start {}? (y/n) : ", round.round_name);
                if !self.console.confirm(&label)? {
                    return self
                        .console
                        .print("Round start cancelled.\nBack to Tournaments Menu...");
                }

                tournament.start_current_round()?;
                self.registry.save_tournament(id, &tournament)?;
            }

            self.enter_results(&mut tournament)?;
            let status = tournament.end_current_round()?;
            self.registry.save_tournament(id, &tournament)?;

            let round = tournament.current_round().ok_or(Error::NoCurrentRound)?;
            self.console.print(format!("\n{}", RoundView(round)))?;

            if status == TournamentStatus::Ended {
                self.console.print("Tournament ended !!!")?;
                return self.show_final_results(&tournament);
            }

            let ranking = tournament.get_ranked_players(&mut self.rng);
            self.console.print(ScoresTable(&ranking))?;
        }
    }

    /// Asks for the result of every unplayed match of the current round.
    fn enter_results(&mut self, tournament: &mut Tournament) -> Result<(), Error> {
        let round_index = tournament
            .rounds
            .len()
            .checked_sub(1)
            .ok_or(Error::NoCurrentRound)?;
        let round = tournament.current_round().ok_or(Error::NoCurrentRound)?;

        self.console.print(format!("{} started !!!", round.round_name))?;

        let unplayed: Vec<_> = round
            .matches
            .iter()
            .enumerate()
            .filter(|(_, game)| !game.is_played())
            .map(|(index, game)| (index, game.to_string()))
            .collect();

        for (match_index, game) in unplayed {
            self.console.print(format!("\n[{}]. {game}", match_index + 1))?;
            let outcome = self.console.outcome()?;
            tournament.set_result(round_index, match_index, outcome)?;
        }

        Ok(())
    }

    fn show_final_results(&mut self, tournament: &Tournament) -> Result<(), Error> {
        let ranking = tournament.get_ranked_players(&mut self.rng);
        self.console
            .print(format!("\n=== Final results: {} ===", tournament.name))?;
        self.console.print(TournamentInfo(tournament))?;
        self.console.print(ScoresTable(&ranking))
    }

    fn report_tournament_details(&mut self) -> Result<(), Error> {
        if let Some((_, tournament)) = self.select_tournament()? {
            self.console.print(TournamentInfo(&tournament))?;
        }
        Ok(())
    }

    fn report_tournament_players(&mut self) -> Result<(), Error> {
        let Some((_, tournament)) = self.select_tournament()? else {
            return Ok(());
        };
        if tournament.players.is_empty() {
            return self.console.print("\nNo players available in this tournament.\n");
        }

        let mut players = tournament.players;
        player::sort_alphabetically(&mut players);
        self.console.print(ScoresTable(&players))
    }

    fn report_rounds_and_matches(&mut self) -> Result<(), Error> {
        let Some((_, tournament)) = self.select_tournament()? else {
            return Ok(());
        };
        if tournament.rounds.is_empty() {
            return self.console.print("\nNo rounds played yet.\n");
        }
        self.console.print(RoundsReport(&tournament))
    }
}
