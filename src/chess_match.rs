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

use std::{fmt, str::FromStr};

use crate::{Error, player::Player};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Draw,
    Player1Wins,
    Player2Wins,
}

impl Outcome {
    /// The points each side gains, player 1 first.
    #[must_use]
    pub fn points(self) -> (f64, f64) {
        match self {
            Self::Draw => (0.5, 0.5),
            Self::Player1Wins => (1.0, 0.0),
            Self::Player2Wins => (0.0, 1.0),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw => write!(f, "draw"),
            Self::Player1Wins => write!(f, "player_1_wins"),
            Self::Player2Wins => write!(f, "player_2_wins"),
        }
    }
}

impl FromStr for Outcome {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Error> {
        match string.trim() {
            "0" => Ok(Self::Draw),
            "1" => Ok(Self::Player1Wins),
            "2" => Ok(Self::Player2Wins),
            string => Err(Error::InvalidInput(format!(
                "'{string}' is not a match result, enter 1, 2 or 0"
            ))),
        }
    }
}

/// Two players facing each other in a round.
///
/// The players are snapshots taken when the round was paired; their scores
/// move together with the match scores when a result is recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub player_1: Player,
    pub player_2: Player,
    pub player_1_score: f64,
    pub player_2_score: f64,
}

impl Match {
    #[must_use]
    pub fn new(player_1: Player, player_2: Player) -> Self {
        Self {
            player_1,
            player_2,
            player_1_score: 0.0,
            player_2_score: 0.0,
        }
    }

    /// Adds the outcome to both sides.
    ///
    /// Calling this twice for the same game counts the game twice.
    pub fn set_result(&mut self, outcome: Outcome) {
        let (points_1, points_2) = outcome.points();

        self.player_1_score += points_1;
        self.player_1.score += points_1;
        self.player_2_score += points_2;
        self.player_2.score += points_2;
    }

    /// Whether a result was recorded. Every result hands out one point.
    #[must_use]
    pub fn is_played(&self) -> bool {
        self.player_1_score + self.player_2_score > 0.0
    }

    #[must_use]
    pub fn involves(&self, national_chess_id: &str) -> bool {
        self.player_1.national_chess_id == national_chess_id
            || self.player_2.national_chess_id == national_chess_id
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}|{}) {}",
            self.player_1, self.player_1_score, self.player_2_score, self.player_2
        )
    }
}
