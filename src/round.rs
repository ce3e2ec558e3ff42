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

use chrono::NaiveDateTime;

use crate::{chess_match::Match, utils};

#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    pub round_name: String,
    pub matches: Vec<Match>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

impl Round {
    #[must_use]
    pub fn new(number: usize, matches: Vec<Match>) -> Self {
        Self {
            round_name: format!("Round {number}"),
            matches,
            start_date: None,
            end_date: None,
        }
    }

    pub fn start_round(&mut self) {
        self.start_date = Some(utils::now());
    }

    /// Stamps the end time, never earlier than the start time.
    pub fn end_round(&mut self) {
        let now = utils::now();
        self.end_date = Some(match self.start_date {
            Some(start_date) if start_date > now => start_date,
            _ => now,
        });
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.start_date.is_some()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end_date.is_some()
    }
}
