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

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("duplicate: {0}")]
    Duplicate(String),
    #[error("round: the tournament has already ended")]
    TournamentEnded,
    #[error("round: all {0} rounds have already been played")]
    AllRoundsPlayed(usize),
    #[error("round: {0} has not ended yet")]
    RoundInProgress(String),
    #[error("roster: player with national chess ID {0} already has a match in this tournament")]
    AlreadyPaired(String),
    #[error("round: there is no round to play")]
    NoCurrentRound,
    #[error("result: there is no match {match_index} in round {round_index}")]
    NoSuchMatch {
        round_index: usize,
        match_index: usize,
    },
    #[error("document: {0}")]
    Document(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("the input was closed")]
    EndOfInput,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the error only aborts the current operation.
    ///
    /// Storage and terminal failures end the run instead.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::EndOfInput | Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_fatal() {
        assert!(Error::NotFound("AB12345".to_string()).is_recoverable());
        assert!(Error::Duplicate("AB12345".to_string()).is_recoverable());
        assert!(Error::TournamentEnded.is_recoverable());
        assert!(Error::AlreadyPaired("AB12345".to_string()).is_recoverable());
        assert!(!Error::Storage("RON: db.ron".to_string()).is_recoverable());
        assert!(!Error::EndOfInput.is_recoverable());
    }

    #[test]
    fn messages() {
        assert_eq!(
            Error::AllRoundsPlayed(4).to_string(),
            "round: all 4 rounds have already been played"
        );
        assert_eq!(
            Error::NoSuchMatch {
                round_index: 1,
                match_index: 3
            }
            .to_string(),
            "result: there is no match 3 in round 1"
        );
    }
}
