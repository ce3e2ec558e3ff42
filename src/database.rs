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

//! A small document store.
//!
//! Documents live in tables and get an ID on insert that is never handed out
//! again. The whole store is written back after every change.

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    documents::{PlayerDocument, TournamentDocument},
};

pub type DocId = u64;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Document<T> {
    pub id: DocId,
    pub data: T,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Table<T> {
    #[serde(default)]
    last_id: DocId,
    #[serde(default)]
    documents: Vec<Document<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            documents: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    #[must_use]
    pub fn all(&self) -> &[Document<T>] {
        &self.documents
    }

    pub fn get(&self, predicate: impl Fn(&T) -> bool) -> Option<&Document<T>> {
        self.documents.iter().find(|document| predicate(&document.data))
    }

    #[must_use]
    pub fn get_by_id(&self, id: DocId) -> Option<&T> {
        self.documents
            .iter()
            .find(|document| document.id == id)
            .map(|document| &document.data)
    }

    pub fn insert(&mut self, data: T) -> DocId {
        self.last_id += 1;
        self.documents.push(Document {
            id: self.last_id,
            data,
        });
        self.last_id
    }

    /// Applies `update` to every matching document, returning how many matched.
    pub fn update(
        &mut self,
        predicate: impl Fn(&T) -> bool,
        mut update: impl FnMut(&mut T),
    ) -> usize {
        let mut updated = 0;
        for document in &mut self.documents {
            if predicate(&document.data) {
                update(&mut document.data);
                updated += 1;
            }
        }
        updated
    }

    /// Replaces the document with the ID, returning whether it existed.
    pub fn update_by_id(&mut self, id: DocId, data: T) -> bool {
        match self.documents.iter_mut().find(|document| document.id == id) {
            Some(document) => {
                document.data = data;
                true
            }
            None => false,
        }
    }

    pub fn truncate(&mut self) {
        self.documents.clear();
    }

    /// Empties the table and inserts the documents again in the new order.
    pub fn replace_all(&mut self, documents: impl IntoIterator<Item = T>) {
        self.truncate();
        for data in documents {
            self.insert(data);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Collections {
    #[serde(default)]
    pub players: Table<PlayerDocument>,
    #[serde(default)]
    pub tournaments: Table<TournamentDocument>,
}

/// Where the collections are kept between runs.
pub trait Storage {
    /// # Errors
    ///
    /// If the stored collections cannot be read.
    fn load(&self) -> Result<Collections, Error>;

    /// # Errors
    ///
    /// If the collections cannot be written.
    fn save(&mut self, collections: &Collections) -> Result<(), Error>;
}

/// Stores the collections in one RON file.
#[derive(Clone, Debug)]
pub struct RonFile {
    path: PathBuf,
}

impl RonFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for RonFile {
    fn load(&self) -> Result<Collections, Error> {
        match fs::read_to_string(&self.path) {
            Ok(string) => ron::from_str(&string).map_err(|err| {
                Error::Storage(format!("RON: {}: {err}", self.path.display()))
            }),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    debug!("{} not found, starting empty", self.path.display());
                    Ok(Collections::default())
                }
                _ => Err(Error::Storage(format!("{}: {err}", self.path.display()))),
            },
        }
    }

    fn save(&mut self, collections: &Collections) -> Result<(), Error> {
        let string = ron::ser::to_string_pretty(collections, ron::ser::PrettyConfig::default())
            .map_err(|err| Error::Storage(format!("RON: {err}")))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|err| Error::Storage(format!("{}: {err}", parent.display())))?;
        }

        let mut file = File::create(&self.path).map_err(|err| {
            error!("save file (1): {err}");
            Error::Storage(format!("{}: {err}", self.path.display()))
        })?;
        file.write_all(string.as_bytes()).map_err(|err| {
            error!("save file (2): {err}");
            Error::Storage(format!("{}: {err}", self.path.display()))
        })?;

        debug!("saved {}", self.path.display());
        Ok(())
    }
}

/// Keeps nothing between runs.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    pub saves: usize,
}

impl Storage for Memory {
    fn load(&self) -> Result<Collections, Error> {
        Ok(Collections::default())
    }

    fn save(&mut self, _collections: &Collections) -> Result<(), Error> {
        self.saves += 1;
        Ok(())
    }
}

/// The collections and the storage they are written through to.
#[derive(Debug)]
pub struct Database<S> {
    storage: S,
    collections: Collections,
}

impl<S: Storage> Database<S> {
    /// # Errors
    ///
    /// If the storage cannot be loaded.
    pub fn open(storage: S) -> Result<Self, Error> {
        let collections = storage.load()?;
        debug!(
            "loaded {} players and {} tournaments",
            collections.players.len(),
            collections.tournaments.len()
        );

        Ok(Self {
            storage,
            collections,
        })
    }

    #[must_use]
    pub fn players(&self) -> &Table<PlayerDocument> {
        &self.collections.players
    }

    #[must_use]
    pub fn tournaments(&self) -> &Table<TournamentDocument> {
        &self.collections.tournaments
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Changes the collections and saves them.
    ///
    /// # Errors
    ///
    /// If saving fails.
    pub fn write<T>(&mut self, change: impl FnOnce(&mut Collections) -> T) -> Result<T, Error> {
        let value = change(&mut self.collections);
        self.storage.save(&self.collections)?;
        Ok(value)
    }
}
