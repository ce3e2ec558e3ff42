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

use log::{info, warn};

use crate::{
    Error,
    database::{Database, DocId, Storage, Table},
    documents::{PlayerDocument, TournamentDocument},
    player::{self, Player, PlayerUpdate},
    tournament::Tournament,
};

/// What happened to each ID given for a roster change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RosterReport {
    pub changed: Vec<Player>,
    pub duplicates: Vec<String>,
    pub missing: Vec<String>,
    pub refused: Vec<String>,
}

/// Player and tournament operations on top of the database.
#[derive(Debug)]
pub struct Registry<S> {
    database: Database<S>,
}

impl<S: Storage> Registry<S> {
    /// # Errors
    ///
    /// If the storage cannot be loaded.
    pub fn open(storage: S) -> Result<Self, Error> {
        Ok(Self {
            database: Database::open(storage)?,
        })
    }

    #[must_use]
    pub fn database(&self) -> &Database<S> {
        &self.database
    }

    /// Adds a player and keeps the players collection in alphabetical order.
    ///
    /// # Errors
    ///
    /// If the national chess ID is taken, or saving fails.
    pub fn register_player(&mut self, player: &Player) -> Result<(), Error> {
        if self.find_player(&player.national_chess_id).is_ok() {
            return Err(Error::Duplicate(format!(
                "player with national chess ID {} is already registered",
                player.national_chess_id
            )));
        }

        let document = PlayerDocument::from(player);
        self.database.write(|collections| {
            collections.players.insert(document);
            sort_documents(&mut collections.players);
        })?;

        info!("registered {player}");
        Ok(())
    }

    /// # Errors
    ///
    /// If no player has the national chess ID.
    pub fn find_player(&self, national_chess_id: &str) -> Result<Player, Error> {
        self.database
            .players()
            .get(|document| document.national_chess_id == national_chess_id)
            .map(|document| Player::from(document.data.clone()))
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "player with national chess ID {national_chess_id} not found"
                ))
            })
    }

    /// Changes the supplied fields of a registered player.
    ///
    /// # Errors
    ///
    /// If the player does not exist, the new ID is taken, or saving fails.
    pub fn update_player(
        &mut self,
        national_chess_id: &str,
        update: &PlayerUpdate,
    ) -> Result<Player, Error> {
        let mut player = self.find_player(national_chess_id)?;

        if let Some(new_id) = &update.national_chess_id
            && new_id != national_chess_id
            && self.find_player(new_id).is_ok()
        {
            return Err(Error::Duplicate(format!(
                "player with national chess ID {new_id} is already registered"
            )));
        }

        update.apply(&mut player);
        let document = PlayerDocument::from(&player);

        self.database.write(|collections| {
            collections.players.update(
                |stored| stored.national_chess_id == national_chess_id,
                |stored| *stored = document.clone(),
            );
        })?;

        info!("updated {national_chess_id} to {player}");
        Ok(player)
    }

    /// Every registered player, sorted by name and surname.
    #[must_use]
    pub fn list_players(&self) -> Vec<Player> {
        let mut players: Vec<_> = self
            .database
            .players()
            .all()
            .iter()
            .map(|document| Player::from(document.data.clone()))
            .collect();
        player::sort_alphabetically(&mut players);
        players
    }

    /// Rewrites the players collection in alphabetical order.
    ///
    /// # Errors
    ///
    /// If saving fails.
    pub fn sort_players(&mut self) -> Result<(), Error> {
        if self.database.players().is_empty() {
            return Ok(());
        }
        self.database
            .write(|collections| sort_documents(&mut collections.players))
    }

    /// Looks up registered players, reporting the IDs that are unknown.
    #[must_use]
    pub fn select_players(&self, national_chess_ids: &[String]) -> (Vec<Player>, Vec<String>) {
        let mut players: Vec<Player> = Vec::new();
        let mut missing = Vec::new();

        for id in national_chess_ids {
            match self.find_player(id) {
                Ok(player) => {
                    if !players.iter().any(|p| &p.national_chess_id == id) {
                        players.push(player);
                    }
                }
                Err(_) => missing.push(id.clone()),
            }
        }

        (players, missing)
    }

    /// Stores a new tournament, returning its document ID.
    ///
    /// # Errors
    ///
    /// If the name is empty, there are no rounds, or saving fails.
    pub fn create_tournament(&mut self, tournament: &mut Tournament) -> Result<DocId, Error> {
        if tournament.name.trim().is_empty() {
            return Err(Error::InvalidInput("the tournament name is empty".to_string()));
        }
        if tournament.number_of_rounds == 0 {
            return Err(Error::InvalidInput(
                "a tournament needs at least one round".to_string(),
            ));
        }

        tournament.sort_players_alphabetically();
        let document = TournamentDocument::from(&*tournament);
        let id = self
            .database
            .write(|collections| collections.tournaments.insert(document))?;

        info!("created tournament {id} {}", tournament.name);
        Ok(id)
    }

    /// # Errors
    ///
    /// If the tournament does not exist or its document is invalid.
    pub fn load_tournament(&self, id: DocId) -> Result<Tournament, Error> {
        let document = self
            .database
            .tournaments()
            .get_by_id(id)
            .ok_or_else(|| Error::NotFound(format!("tournament {id} not found")))?;

        Tournament::try_from(document.clone())
    }

    /// # Errors
    ///
    /// If the tournament does not exist or saving fails.
    pub fn save_tournament(&mut self, id: DocId, tournament: &Tournament) -> Result<(), Error> {
        if self.database.tournaments().get_by_id(id).is_none() {
            return Err(Error::NotFound(format!("tournament {id} not found")));
        }

        let document = TournamentDocument::from(tournament);
        self.database.write(|collections| {
            collections.tournaments.update_by_id(id, document);
        })
    }

    /// Every stored tournament with its ID. Invalid documents are skipped.
    #[must_use]
    pub fn list_tournaments(&self) -> Vec<(DocId, Tournament)> {
        self.database
            .tournaments()
            .all()
            .iter()
            .filter_map(|document| match Tournament::try_from(document.data.clone()) {
                Ok(tournament) => Some((document.id, tournament)),
                Err(error) => {
                    warn!("tournament {}: {error}", document.id);
                    None
                }
            })
            .collect()
    }

    /// Copies registered players into the tournament.
    ///
    /// Players already in the tournament are skipped, not an error.
    pub fn add_tournament_players(
        &self,
        tournament: &mut Tournament,
        national_chess_ids: &[String],
    ) -> RosterReport {
        let mut report = RosterReport::default();

        for id in national_chess_ids {
            match self.find_player(id) {
                Ok(player) => match tournament.add_player(player.clone()) {
                    Ok(()) => report.changed.push(player),
                    Err(error) => {
                        warn!("{error}");
                        report.duplicates.push(id.clone());
                    }
                },
                Err(_) => report.missing.push(id.clone()),
            }
        }

        tournament.sort_players_alphabetically();
        report
    }
}

/// Takes players out of a tournament.
pub fn remove_tournament_players(
    tournament: &mut Tournament,
    national_chess_ids: &[String],
) -> RosterReport {
    let mut report = RosterReport::default();

    for id in national_chess_ids {
        match tournament.remove_player(id) {
            Ok(player) => report.changed.push(player),
            Err(Error::NotFound(_)) => report.missing.push(id.clone()),
            Err(error) => {
                warn!("{error}");
                report.refused.push(id.clone());
            }
        }
    }

    report
}

fn sort_documents(players: &mut Table<PlayerDocument>) {
    let mut documents: Vec<_> = players
        .all()
        .iter()
        .map(|document| document.data.clone())
        .collect();
    documents.sort_by_cached_key(|document| {
        (document.name.to_lowercase(), document.surname.to_lowercase())
    });
    players.replace_all(documents);
}
