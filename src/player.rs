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

use std::fmt;

use crate::Error;

/// A chess player, identified by their national chess ID.
///
/// The score only has meaning inside a tournament. Registry players always
/// carry a score of zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub name: String,
    pub surname: String,
    pub birthday: String,
    pub national_chess_id: String,
    pub score: f64,
}

impl Player {
    /// # Errors
    ///
    /// If any of the fields is empty.
    pub fn new(
        name: &str,
        surname: &str,
        birthday: &str,
        national_chess_id: &str,
    ) -> Result<Self, Error> {
        let fields = [
            ("name", name.trim()),
            ("surname", surname.trim()),
            ("birthday", birthday.trim()),
            ("national chess ID", national_chess_id.trim()),
        ];

        for (field, value) in fields {
            if value.is_empty() {
                return Err(Error::InvalidInput(format!("the {field} is empty")));
            }
        }

        Ok(Self {
            name: name.trim().to_string(),
            surname: surname.trim().to_string(),
            birthday: birthday.trim().to_string(),
            national_chess_id: national_chess_id.trim().to_string(),
            score: 0.0,
        })
    }

    fn sort_key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.surname.to_lowercase())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.national_chess_id, self.name, self.surname)
    }
}

/// Sorts case-insensitively by name, then surname.
pub fn sort_alphabetically(players: &mut [Player]) {
    players.sort_by_cached_key(Player::sort_key);
}

/// The fields to change on a registered player. `None` keeps the old value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub birthday: Option<String>,
    pub national_chess_id: Option<String>,
}

impl PlayerUpdate {
    /// Builds an update from prompt answers, where a blank answer means keep.
    #[must_use]
    pub fn from_answers(
        name: &str,
        surname: &str,
        birthday: &str,
        national_chess_id: &str,
    ) -> Self {
        Self {
            name: supplied(name),
            surname: supplied(surname),
            birthday: supplied(birthday),
            national_chess_id: supplied(national_chess_id),
        }
    }

    pub fn apply(&self, player: &mut Player) {
        if let Some(name) = &self.name {
            player.name.clone_from(name);
        }
        if let Some(surname) = &self.surname {
            player.surname.clone_from(surname);
        }
        if let Some(birthday) = &self.birthday {
            player.birthday.clone_from(birthday);
        }
        if let Some(national_chess_id) = &self.national_chess_id {
            player.national_chess_id.clone_from(national_chess_id);
        }
    }
}

fn supplied(answer: &str) -> Option<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        None
    } else {
        Some(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected() {
        for (name, surname, birthday, id) in [
            ("", "Carlsen", "1990-11-30", "NO1"),
            ("Magnus", " ", "1990-11-30", "NO1"),
            ("Magnus", "Carlsen", "", "NO1"),
            ("Magnus", "Carlsen", "1990-11-30", ""),
        ] {
            assert!(matches!(
                Player::new(name, surname, birthday, id),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn new_players_start_at_zero() {
        let player = Player::new(" Magnus ", "Carlsen", "1990-11-30", "NO1").unwrap();
        assert_eq!(player.name, "Magnus");
        assert_eq!(player.score, 0.0);
        assert_eq!(player.to_string(), "NO1 Magnus Carlsen");
    }

    #[test]
    fn alphabetical_order_ignores_case() {
        let mut players = vec![
            Player::new("bob", "Zed", "x", "1").unwrap(),
            Player::new("Alice", "smith", "x", "2").unwrap(),
            Player::new("alice", "Adams", "x", "3").unwrap(),
        ];
        sort_alphabetically(&mut players);

        let ids: Vec<_> = players.iter().map(|p| p.national_chess_id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }

    #[test]
    fn blank_answers_keep_fields() {
        let mut player = Player::new("Judit", "Polgar", "1976-07-23", "HU1").unwrap();
        let update = PlayerUpdate::from_answers("", "Polgár", "  ", "");
        update.apply(&mut player);

        assert_eq!(player.name, "Judit");
        assert_eq!(player.surname, "Polgár");
        assert_eq!(player.birthday, "1976-07-23");
        assert_eq!(player.national_chess_id, "HU1");
    }
}
