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

//! The stored form of the entities.
//!
//! Timestamps are kept as ISO-8601 strings. Loading a tournament checks the
//! invariants the entities rely on, so a hand edited file cannot produce a
//! tournament that pairs past its last round.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    chess_match::Match,
    player::Player,
    round::Round,
    tournament::Tournament,
    utils::{format_timestamp, parse_timestamp},
};

/// A player in the registry. Scores are not stored here.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerDocument {
    pub name: String,
    pub surname: String,
    pub birthday: String,
    pub national_chess_id: String,
}

/// A player inside a tournament, with the tournament score.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScoredPlayerDocument {
    pub name: String,
    pub surname: String,
    pub birthday: String,
    pub national_chess_id: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MatchSideDocument {
    pub player: ScoredPlayerDocument,
    pub match_score: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MatchDocument(pub MatchSideDocument, pub MatchSideDocument);

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoundDocument {
    pub round_name: String,
    #[serde(default)]
    pub matches: Vec<MatchDocument>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TournamentDocument {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub players: Vec<ScoredPlayerDocument>,
    pub number_of_rounds: usize,
    #[serde(default)]
    pub current_round_number: usize,
    #[serde(default)]
    pub rounds: Vec<RoundDocument>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl From<&Player> for PlayerDocument {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            surname: player.surname.clone(),
            birthday: player.birthday.clone(),
            national_chess_id: player.national_chess_id.clone(),
        }
    }
}

impl From<PlayerDocument> for Player {
    fn from(document: PlayerDocument) -> Self {
        Self {
            name: document.name,
            surname: document.surname,
            birthday: document.birthday,
            national_chess_id: document.national_chess_id,
            score: 0.0,
        }
    }
}

impl From<&Player> for ScoredPlayerDocument {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            surname: player.surname.clone(),
            birthday: player.birthday.clone(),
            national_chess_id: player.national_chess_id.clone(),
            score: player.score,
        }
    }
}

impl From<ScoredPlayerDocument> for Player {
    fn from(document: ScoredPlayerDocument) -> Self {
        Self {
            name: document.name,
            surname: document.surname,
            birthday: document.birthday,
            national_chess_id: document.national_chess_id,
            score: document.score,
        }
    }
}

impl From<&Match> for MatchDocument {
    fn from(game: &Match) -> Self {
        Self(
            MatchSideDocument {
                player: ScoredPlayerDocument::from(&game.player_1),
                match_score: game.player_1_score,
            },
            MatchSideDocument {
                player: ScoredPlayerDocument::from(&game.player_2),
                match_score: game.player_2_score,
            },
        )
    }
}

impl From<MatchDocument> for Match {
    fn from(MatchDocument(side_1, side_2): MatchDocument) -> Self {
        Self {
            player_1: side_1.player.into(),
            player_2: side_2.player.into(),
            player_1_score: side_1.match_score,
            player_2_score: side_2.match_score,
        }
    }
}

impl From<&Round> for RoundDocument {
    fn from(round: &Round) -> Self {
        Self {
            round_name: round.round_name.clone(),
            matches: round.matches.iter().map(MatchDocument::from).collect(),
            start_date: round.start_date.as_ref().map(format_timestamp),
            end_date: round.end_date.as_ref().map(format_timestamp),
        }
    }
}

impl TryFrom<RoundDocument> for Round {
    type Error = Error;

    fn try_from(document: RoundDocument) -> Result<Self, Error> {
        let start_date = document.start_date.as_deref().map(parse_timestamp).transpose()?;
        let end_date = document.end_date.as_deref().map(parse_timestamp).transpose()?;

        if let (Some(start_date), Some(end_date)) = (start_date, end_date)
            && end_date < start_date
        {
            return Err(Error::Document(format!(
                "{} ends before it starts",
                document.round_name
            )));
        }

        Ok(Self {
            round_name: document.round_name,
            matches: document.matches.into_iter().map(Match::from).collect(),
            start_date,
            end_date,
        })
    }
}

impl From<&Tournament> for TournamentDocument {
    fn from(tournament: &Tournament) -> Self {
        Self {
            name: tournament.name.clone(),
            location: tournament.location.clone(),
            description: tournament.description.clone(),
            players: tournament
                .players
                .iter()
                .map(ScoredPlayerDocument::from)
                .collect(),
            number_of_rounds: tournament.number_of_rounds,
            current_round_number: tournament.current_round_number,
            rounds: tournament.rounds.iter().map(RoundDocument::from).collect(),
            start_date: tournament.start_date.as_ref().map(format_timestamp),
            end_date: tournament.end_date.as_ref().map(format_timestamp),
        }
    }
}

impl TryFrom<TournamentDocument> for Tournament {
    type Error = Error;

    fn try_from(document: TournamentDocument) -> Result<Self, Error> {
        if document.current_round_number > document.number_of_rounds {
            return Err(Error::Document(format!(
                "{}: round {} of {}",
                document.name, document.current_round_number, document.number_of_rounds
            )));
        }
        if document.rounds.len() != document.current_round_number {
            return Err(Error::Document(format!(
                "{}: {} rounds stored for round number {}",
                document.name,
                document.rounds.len(),
                document.current_round_number
            )));
        }

        let rounds = document
            .rounds
            .into_iter()
            .map(Round::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: document.name,
            location: document.location,
            description: document.description,
            players: document.players.into_iter().map(Player::from).collect(),
            number_of_rounds: document.number_of_rounds,
            current_round_number: document.current_round_number,
            rounds,
            start_date: document.start_date.as_deref().map(parse_timestamp).transpose()?,
            end_date: document.end_date.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}
