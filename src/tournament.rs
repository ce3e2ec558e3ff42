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

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use chrono::NaiveDateTime;
use log::{debug, info};
use rand::{Rng, seq::SliceRandom};

use crate::{
    Error,
    chess_match::Outcome,
    pairing::{self, PairKey},
    player::{self, Player},
    round::Round,
    utils,
};

pub const DEFAULT_NUMBER_OF_ROUNDS: usize = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TournamentStatus {
    NotStarted,
    RoundInProgress,
    ReadyForNextRound,
    Ended,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::RoundInProgress => write!(f, "round in progress"),
            Self::ReadyForNextRound => write!(f, "ready for next round"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// A tournament with its own copy of the players.
///
/// Scores change on the copies only, the registry is never touched.
#[derive(Clone, Debug, PartialEq)]
pub struct Tournament {
    pub name: String,
    pub location: String,
    pub description: String,
    pub players: Vec<Player>,
    pub number_of_rounds: usize,
    pub current_round_number: usize,
    pub rounds: Vec<Round>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

impl Tournament {
    #[must_use]
    pub fn new(
        name: &str,
        location: &str,
        description: &str,
        players: Vec<Player>,
        number_of_rounds: usize,
    ) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            description: description.to_string(),
            players,
            number_of_rounds,
            current_round_number: 0,
            rounds: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    /// A started tournament is in a round until that round ends, including
    /// before its first round is paired.
    #[must_use]
    pub fn status(&self) -> TournamentStatus {
        if self.end_date.is_some() {
            TournamentStatus::Ended
        } else if self.start_date.is_none() {
            TournamentStatus::NotStarted
        } else if self.rounds.last().is_none_or(|round| !round.is_finished()) {
            TournamentStatus::RoundInProgress
        } else {
            TournamentStatus::ReadyForNextRound
        }
    }

    /// Stamps the start time unless the tournament already started.
    pub fn set_start_date(&mut self) {
        if self.start_date.is_none() {
            self.start_date = Some(utils::now());
        }
    }

    pub fn set_end_date(&mut self) {
        self.end_date = Some(utils::now());
    }

    /// Pairs the next round and appends it.
    ///
    /// # Errors
    ///
    /// If the tournament ended, every round was played, or the last round has
    /// not ended.
    pub fn create_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Round, Error> {
        if self.end_date.is_some() {
            return Err(Error::TournamentEnded);
        }
        if self.current_round_number >= self.number_of_rounds {
            return Err(Error::AllRoundsPlayed(self.number_of_rounds));
        }
        if let Some(round) = self.rounds.last()
            && !round.is_finished()
        {
            return Err(Error::RoundInProgress(round.round_name.clone()));
        }

        self.current_round_number += 1;

        let played_pairs = self.played_pairs();
        let counts = self.match_counts();
        let first_round = self.current_round_number == 1;

        let ordered = pairing::order_players(&self.players, &counts, first_round, rng);
        let (matches, left_over) = pairing::pair_players(ordered, &played_pairs);

        if let Some(player) = left_over {
            debug!("{}: {player} is not paired", self.name);
        }

        let round = Round::new(self.current_round_number, matches);
        info!(
            "{}: created {} with {} matches",
            self.name,
            round.round_name,
            round.matches.len()
        );

        self.rounds.push(round);
        self.rounds.last().ok_or(Error::NoCurrentRound)
    }

    #[must_use]
    pub fn played_pairs(&self) -> HashSet<PairKey> {
        pairing::played_pairs(&self.rounds)
    }

    #[must_use]
    pub fn match_counts(&self) -> HashMap<String, usize> {
        pairing::match_counts(&self.rounds)
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// # Errors
    ///
    /// If no round was created, or the round already started or ended.
    pub fn start_current_round(&mut self) -> Result<(), Error> {
        let round = self.rounds.last_mut().ok_or(Error::NoCurrentRound)?;
        if round.is_finished() {
            return Err(Error::NoCurrentRound);
        }
        if !round.is_started() {
            round.start_round();
            info!("{}: {} started", self.name, round.round_name);
        }
        Ok(())
    }

    /// Ends the current round, and the tournament with it after the last one.
    ///
    /// # Errors
    ///
    /// If there is no round in progress.
    pub fn end_current_round(&mut self) -> Result<TournamentStatus, Error> {
        let round = self.rounds.last_mut().ok_or(Error::NoCurrentRound)?;
        if round.is_finished() {
            return Err(Error::NoCurrentRound);
        }
        round.end_round();
        info!("{}: {} ended", self.name, round.round_name);

        if self.current_round_number == self.number_of_rounds {
            self.set_end_date();
            info!("{}: tournament ended", self.name);
        }

        Ok(self.status())
    }

    /// Records a result on the match and on the tournament's players.
    ///
    /// # Errors
    ///
    /// If the round or match does not exist, or one of its players is no
    /// longer in the tournament.
    pub fn set_result(
        &mut self,
        round_index: usize,
        match_index: usize,
        outcome: Outcome,
    ) -> Result<(), Error> {
        let game = self
            .rounds
            .get(round_index)
            .and_then(|round| round.matches.get(match_index))
            .ok_or(Error::NoSuchMatch {
                round_index,
                match_index,
            })?;

        let (points_1, points_2) = outcome.points();
        let sides = [
            (game.player_1.national_chess_id.clone(), points_1),
            (game.player_2.national_chess_id.clone(), points_2),
        ];

        for (national_chess_id, _) in &sides {
            if self.player(national_chess_id).is_none() {
                return Err(Error::NotFound(format!(
                    "player with national chess ID {national_chess_id} is not in the tournament"
                )));
            }
        }

        for (national_chess_id, points) in sides {
            if let Some(player) = self.player_mut(&national_chess_id) {
                player.score += points;
            }
        }

        if let Some(game) = self
            .rounds
            .get_mut(round_index)
            .and_then(|round| round.matches.get_mut(match_index))
        {
            game.set_result(outcome);
            info!("{}: {game} {outcome}", self.name);
        }

        Ok(())
    }

    /// Players by descending score, with ties in a fresh random order.
    pub fn get_ranked_players<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Player> {
        let mut players = self.players.clone();
        players.shuffle(rng);
        players.sort_by(|a, b| b.score.total_cmp(&a.score));
        players
    }

    #[must_use]
    pub fn player(&self, national_chess_id: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| player.national_chess_id == national_chess_id)
    }

    fn player_mut(&mut self, national_chess_id: &str) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|player| player.national_chess_id == national_chess_id)
    }

    /// # Errors
    ///
    /// If the player is already in the tournament.
    pub fn add_player(&mut self, player: Player) -> Result<(), Error> {
        if self.player(&player.national_chess_id).is_some() {
            return Err(Error::Duplicate(format!(
                "player with national chess ID {} is already in the tournament",
                player.national_chess_id
            )));
        }

        self.players.push(player);
        Ok(())
    }

    /// Takes a player out before they are paired.
    ///
    /// # Errors
    ///
    /// If the player is not in the tournament, or already has a match in one
    /// of its rounds.
    pub fn remove_player(&mut self, national_chess_id: &str) -> Result<Player, Error> {
        if self
            .rounds
            .iter()
            .flat_map(|round| &round.matches)
            .any(|game| game.involves(national_chess_id))
        {
            return Err(Error::AlreadyPaired(national_chess_id.to_string()));
        }

        let index = self
            .players
            .iter()
            .position(|player| player.national_chess_id == national_chess_id)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "player with national chess ID {national_chess_id} is not in the tournament"
                ))
            })?;

        Ok(self.players.remove(index))
    }

    pub fn sort_players_alphabetically(&mut self) {
        player::sort_alphabetically(&mut self.players);
    }

    /// # Errors
    ///
    /// If the new number of rounds is zero or below the rounds already played.
    pub fn apply_update(&mut self, update: &TournamentUpdate) -> Result<(), Error> {
        if let Some(number_of_rounds) = update.number_of_rounds
            && (number_of_rounds == 0 || number_of_rounds < self.current_round_number)
        {
            return Err(Error::InvalidInput(format!(
                "the number of rounds must be at least {}",
                self.current_round_number.max(1)
            )));
        }

        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(location) = &update.location {
            self.location.clone_from(location);
        }
        if let Some(description) = &update.description {
            self.description.clone_from(description);
        }
        if let Some(number_of_rounds) = update.number_of_rounds {
            self.number_of_rounds = number_of_rounds;
        }

        Ok(())
    }
}

/// The tournament fields to change. `None` keeps the old value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TournamentUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub number_of_rounds: Option<usize>,
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn players(count: usize) -> Vec<Player> {
        (0..count)
            .map(|i| Player::new(&format!("P{i}"), "Test", "2000-01-01", &format!("ID{i}")).unwrap())
            .collect()
    }

    fn play_round(tournament: &mut Tournament, rng: &mut StdRng, outcome: Outcome) {
        let index = tournament.rounds.len();
        let matches = tournament.create_round(rng).unwrap().matches.len();
        tournament.start_current_round().unwrap();
        for match_index in 0..matches {
            tournament.set_result(index, match_index, outcome).unwrap();
        }
        tournament.end_current_round().unwrap();
    }

    #[test]
    fn status_follows_the_rounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(4), 2);
        assert_eq!(tournament.status(), TournamentStatus::NotStarted);

        tournament.set_start_date();
        assert_eq!(tournament.status(), TournamentStatus::RoundInProgress);
        tournament.create_round(&mut rng).unwrap();
        assert_eq!(tournament.status(), TournamentStatus::RoundInProgress);
        assert!(matches!(
            tournament.create_round(&mut rng),
            Err(Error::RoundInProgress(_))
        ));

        tournament.start_current_round().unwrap();
        assert_eq!(
            tournament.end_current_round().unwrap(),
            TournamentStatus::ReadyForNextRound
        );

        play_round(&mut tournament, &mut rng, Outcome::Draw);
        assert_eq!(tournament.status(), TournamentStatus::Ended);
        assert_eq!(tournament.current_round_number, 2);
        assert!(tournament.end_date >= tournament.start_date);
        assert!(matches!(
            tournament.create_round(&mut rng),
            Err(Error::TournamentEnded)
        ));
    }

    #[test]
    fn rounds_stop_at_the_limit() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(2), 1);
        tournament.set_start_date();
        tournament.create_round(&mut rng).unwrap();
        tournament.start_current_round().unwrap();
        tournament.rounds[0].end_round();

        assert!(matches!(
            tournament.create_round(&mut rng),
            Err(Error::AllRoundsPlayed(1))
        ));
    }

    #[test]
    fn even_first_round_pairs_everyone() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(10), 4);
        let round = tournament.create_round(&mut rng).unwrap();

        assert_eq!(round.matches.len(), 5);
        let mut seen: Vec<_> = round
            .matches
            .iter()
            .flat_map(|game| [&game.player_1.national_chess_id, &game.player_2.national_chess_id])
            .cloned()
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn odd_first_round_leaves_one_out() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(3), 4);
        let matches = tournament.create_round(&mut rng).unwrap().matches.len();
        assert_eq!(matches, 1);

        let paired = &tournament.rounds[0].matches[0];
        let unpaired: Vec<_> = tournament
            .players
            .iter()
            .filter(|player| !paired.involves(&player.national_chess_id))
            .collect();
        assert_eq!(unpaired.len(), 1);
    }

    #[test]
    fn no_avoidable_repeats() {
        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut tournament = Tournament::new("Club", "Oslo", "", players(8), 7);
            tournament.set_start_date();

            for round_index in 0..7 {
                let before = tournament.played_pairs();
                let round = tournament.create_round(&mut rng).unwrap();

                // Replay the greedy choice: a repeat is only allowed when every
                // player still unpaired at that point had already met player 1.
                let mut remaining: Vec<_> = round
                    .matches
                    .iter()
                    .flat_map(|game| [&game.player_1, &game.player_2])
                    .map(|player| player.national_chess_id.clone())
                    .collect();

                for game in &round.matches {
                    remaining.retain(|id| id != &game.player_1.national_chess_id);
                    let key = PairKey::of(game);
                    if before.contains(&key) {
                        assert!(remaining.iter().all(|id| {
                            before.contains(&PairKey::new(&game.player_1.national_chess_id, id))
                        }));
                    }
                    remaining.retain(|id| id != &game.player_2.national_chess_id);
                }

                tournament.start_current_round().unwrap();
                for match_index in 0..tournament.rounds[round_index].matches.len() {
                    let outcome = if (seed as usize + match_index) % 2 == 0 {
                        Outcome::Player1Wins
                    } else {
                        Outcome::Draw
                    };
                    tournament.set_result(round_index, match_index, outcome).unwrap();
                }
                tournament.end_current_round().unwrap();
            }

            assert_eq!(tournament.status(), TournamentStatus::Ended);
        }
    }

    #[test]
    fn results_reach_the_roster() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(4), 3);
        tournament.set_start_date();
        play_round(&mut tournament, &mut rng, Outcome::Player1Wins);

        for game in &tournament.rounds[0].matches {
            assert_eq!(
                tournament.player(&game.player_1.national_chess_id).unwrap().score,
                1.0
            );
            assert_eq!(
                tournament.player(&game.player_2.national_chess_id).unwrap().score,
                0.0
            );
        }

        assert!(matches!(
            tournament.set_result(0, 9, Outcome::Draw),
            Err(Error::NoSuchMatch { .. })
        ));
    }

    #[test]
    fn later_rounds_prefer_fewer_matches() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(3), 2);
        tournament.set_start_date();
        play_round(&mut tournament, &mut rng, Outcome::Player1Wins);

        let rested = tournament
            .players
            .iter()
            .find(|player| !tournament.rounds[0].matches[0].involves(&player.national_chess_id))
            .unwrap()
            .national_chess_id
            .clone();

        let round = tournament.create_round(&mut rng).unwrap();
        assert_eq!(round.matches[0].player_1.national_chess_id, rested);
    }

    #[test]
    fn ranking_keeps_the_same_players() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(6), 3);
        tournament.set_start_date();
        play_round(&mut tournament, &mut rng, Outcome::Draw);

        let mut first: Vec<_> = tournament
            .get_ranked_players(&mut rng)
            .into_iter()
            .map(|player| player.national_chess_id)
            .collect();
        let mut second: Vec<_> = tournament
            .get_ranked_players(&mut rng)
            .into_iter()
            .map(|player| player.national_chess_id)
            .collect();
        first.sort();
        second.sort();
        assert_eq!(first, second);
    }

    #[test]
    fn ranking_orders_by_score() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(4), 3);
        tournament.players[2].score = 2.5;
        tournament.players[0].score = 1.0;

        let ranked = tournament.get_ranked_players(&mut rng);
        assert_eq!(ranked[0].national_chess_id, "ID2");
        assert_eq!(ranked[1].national_chess_id, "ID0");
        assert!(ranked[2].score == 0.0 && ranked[3].score == 0.0);
    }

    #[test]
    fn roster_changes() {
        let mut tournament = Tournament::new("Club", "Oslo", "", players(2), 3);
        let duplicate = tournament.players[0].clone();

        assert!(matches!(
            tournament.add_player(duplicate),
            Err(Error::Duplicate(_))
        ));
        assert!(matches!(
            tournament.remove_player("ID9"),
            Err(Error::NotFound(_))
        ));
        assert_eq!(tournament.remove_player("ID1").unwrap().name, "P1");
        assert_eq!(tournament.players.len(), 1);
    }

    #[test]
    fn paired_players_stay_in_the_roster() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(3), 2);
        tournament.set_start_date();
        tournament.create_round(&mut rng).unwrap();

        let game = tournament.rounds[0].matches[0].clone();
        assert!(matches!(
            tournament.remove_player(&game.player_1.national_chess_id),
            Err(Error::AlreadyPaired(_))
        ));

        let unpaired = tournament
            .players
            .iter()
            .find(|player| !game.involves(&player.national_chess_id))
            .map(|player| player.national_chess_id.clone())
            .unwrap();
        tournament.remove_player(&unpaired).unwrap();

        tournament.start_current_round().unwrap();
        tournament.set_result(0, 0, Outcome::Player1Wins).unwrap();
        let total: f64 = tournament.players.iter().map(|player| player.score).sum();
        assert_eq!(total, 1.0);
    }

    #[test]
    fn results_need_both_players() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(2), 1);
        tournament.set_start_date();
        tournament.create_round(&mut rng).unwrap();
        tournament.start_current_round().unwrap();

        // A stored tournament can still lose a paired player.
        let gone = tournament.rounds[0].matches[0].player_1.national_chess_id.clone();
        tournament.players.retain(|player| player.national_chess_id != gone);

        assert!(matches!(
            tournament.set_result(0, 0, Outcome::Player1Wins),
            Err(Error::NotFound(_))
        ));
        assert!(!tournament.rounds[0].matches[0].is_played());
        assert!(tournament.players.iter().all(|player| player.score == 0.0));
    }

    #[test]
    fn updates_keep_round_invariants() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut tournament = Tournament::new("Club", "Oslo", "", players(4), 3);
        tournament.set_start_date();
        play_round(&mut tournament, &mut rng, Outcome::Draw);
        play_round(&mut tournament, &mut rng, Outcome::Draw);

        let too_few = TournamentUpdate {
            number_of_rounds: Some(1),
            ..TournamentUpdate::default()
        };
        assert!(matches!(
            tournament.apply_update(&too_few),
            Err(Error::InvalidInput(_))
        ));

        let update = TournamentUpdate {
            name: Some("Club Championship".to_string()),
            number_of_rounds: Some(5),
            ..TournamentUpdate::default()
        };
        tournament.apply_update(&update).unwrap();
        assert_eq!(tournament.name, "Club Championship");
        assert_eq!(tournament.location, "Oslo");
        assert_eq!(tournament.number_of_rounds, 5);
    }
}
