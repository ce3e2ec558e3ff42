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

//! The steps of Swiss-style round pairing.
//!
//! Pairing is greedy: the first unpaired player takes the first later player
//! they have not met yet, or the first later player at all when they have met
//! everyone left. This never repeats a pairing that could be avoided for that
//! player, but it does not search for a matching of the whole pool, so a
//! repeat can still be forced further down the list.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    hash::BuildHasher,
};

use rand::{Rng, seq::SliceRandom};

use crate::{chess_match::Match, player::Player, round::Round};

/// An unordered pair of national chess IDs, smallest first.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PairKey(String, String);

impl PairKey {
    #[must_use]
    pub fn new(first: &str, second: &str) -> Self {
        if first <= second {
            Self(first.to_string(), second.to_string())
        } else {
            Self(second.to_string(), first.to_string())
        }
    }

    #[must_use]
    pub fn of(game: &Match) -> Self {
        Self::new(
            &game.player_1.national_chess_id,
            &game.player_2.national_chess_id,
        )
    }
}

/// Every pair of players that already met in one of the rounds.
#[must_use]
pub fn played_pairs(rounds: &[Round]) -> HashSet<PairKey> {
    rounds
        .iter()
        .flat_map(|round| round.matches.iter().map(PairKey::of))
        .collect()
}

/// How many matches each player has played in the rounds.
#[must_use]
pub fn match_counts(rounds: &[Round]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    for game in rounds.iter().flat_map(|round| &round.matches) {
        for player in [&game.player_1, &game.player_2] {
            *counts.entry(player.national_chess_id.clone()).or_insert(0) += 1;
        }
    }

    counts
}

/// The order players are offered to the pairing.
///
/// The first round is a random permutation. Later rounds put players with
/// fewer matches first, then higher scores, with ties left in random order.
pub fn order_players<R: Rng + ?Sized, H: BuildHasher>(
    players: &[Player],
    counts: &HashMap<String, usize, H>,
    first_round: bool,
    rng: &mut R,
) -> Vec<Player> {
    let mut players = players.to_vec();
    players.shuffle(rng);

    if !first_round {
        let count = |player: &Player| counts.get(&player.national_chess_id).copied().unwrap_or(0);

        // The sort is stable, so the shuffle breaks the remaining ties.
        players.sort_by(|a, b| {
            count(a)
                .cmp(&count(b))
                .then_with(|| b.score.total_cmp(&a.score))
        });
    }

    players
}

/// Pairs the players in order, returning the matches and the player left
/// over when the count is odd.
#[must_use]
pub fn pair_players<H: BuildHasher>(
    players: Vec<Player>,
    played_pairs: &HashSet<PairKey, H>,
) -> (Vec<Match>, Option<Player>) {
    let mut unpaired = VecDeque::from(players);
    let mut matches = Vec::with_capacity(unpaired.len() / 2);

    while unpaired.len() >= 2 {
        let Some(player_1) = unpaired.pop_front() else {
            break;
        };

        let index = unpaired
            .iter()
            .position(|candidate| {
                !played_pairs.contains(&PairKey::new(
                    &player_1.national_chess_id,
                    &candidate.national_chess_id,
                ))
            })
            .unwrap_or(0);

        let Some(player_2) = unpaired.remove(index) else {
            break;
        };

        matches.push(Match::new(player_1, player_2));
    }

    (matches, unpaired.pop_front())
}
