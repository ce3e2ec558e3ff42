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

use std::{env, io::Write, path::PathBuf};

use chrono::{Local, NaiveDateTime, SubsecRound};
use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::{DATA_FILE, Error, HOME};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub fn init_logger(debug: bool) {
    let mut builder = Builder::new();

    builder.target(Target::Stderr);
    builder.format(|formatter, record| {
        writeln!(
            formatter,
            "{} [{}] ({}): {}",
            Local::now().format("%Y-%m-%d %H:%M:%S %z"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Ok(var) = env::var("RUST_LOG") {
        builder.parse_filters(&var);
    } else if debug {
        builder.filter(None, LevelFilter::Debug);
    } else {
        // if no RUST_LOG provided, default to logging at the Info level
        builder.filter(None, LevelFilter::Info);
    }

    builder.init();
}

/// The default database file, `<data dir>/chess-tournament-manager/db.ron`.
#[must_use]
pub fn data_file() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("data"));
    path.push(HOME);
    path.push(DATA_FILE);
    path
}

/// The current local time, truncated to what a stored timestamp can hold.
#[must_use]
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

#[must_use]
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// # Errors
///
/// If the string is not an ISO-8601 date and time.
pub fn parse_timestamp(string: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(string, TIMESTAMP_PARSE_FORMAT)
        .map_err(|error| Error::Document(format!("invalid timestamp '{string}': {error}")))
}

#[must_use]
pub fn format_date(timestamp: Option<&NaiveDateTime>) -> String {
    match timestamp {
        Some(timestamp) => timestamp.format(DISPLAY_FORMAT).to_string(),
        None => "Not available".to_string(),
    }
}

/// Splits a comma separated list of IDs, dropping empty entries.
#[must_use]
pub fn split_ids(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}
