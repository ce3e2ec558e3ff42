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

use std::{env, fs, io::Cursor, path::PathBuf, process};

use chess_tournament_manager::{
    Error,
    chess_match::Outcome,
    console::Console,
    controller::Controller,
    database::{RonFile, Storage},
    player::Player,
    registry::Registry,
    tournament::{Tournament, TournamentStatus},
    utils::split_ids,
};
use rand::{SeedableRng, rngs::StdRng};

fn temp_file(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("chess-tournament-manager-flow-{}-{name}", process::id()));
    path.push("db.ron");
    path
}

fn register_players<S: Storage>(registry: &mut Registry<S>, count: usize) {
    for i in 0..count {
        let player = Player::new(&format!("Player{i}"), "Flow", "1990-01-01", &format!("FL{i}")).unwrap();
        registry.register_player(&player).unwrap();
    }
}

fn play_round(tournament: &mut Tournament, rng: &mut StdRng) -> usize {
    tournament.create_round(rng).unwrap();
    tournament.start_current_round().unwrap();

    let round_index = tournament.rounds.len() - 1;
    let matches = tournament.rounds[round_index].matches.len();
    for match_index in 0..matches {
        let outcome = match match_index % 3 {
            0 => Outcome::Player1Wins,
            1 => Outcome::Draw,
            _ => Outcome::Player2Wins,
        };
        tournament.set_result(round_index, match_index, outcome).unwrap();
    }

    tournament.end_current_round().unwrap();
    matches
}

#[test]
fn a_tournament_survives_reopening_the_file() {
    let path = temp_file("reopen");
    let _ = fs::remove_dir_all(path.parent().unwrap());
    let mut rng = StdRng::seed_from_u64(2024);

    let mut registry = Registry::open(RonFile::new(&path)).unwrap();
    register_players(&mut registry, 6);
    let ids: Vec<_> = (0..6).map(|i| format!("FL{i}")).collect();
    let (players, missing) = registry.select_players(&ids);
    assert!(missing.is_empty());

    let mut tournament = Tournament::new("Flow Open", "Bergen", "classical", players, 3);
    let id = registry.create_tournament(&mut tournament).unwrap();
    tournament.set_start_date();

    let mut played = 0;
    for _ in 0..2 {
        played += play_round(&mut tournament, &mut rng);
        registry.save_tournament(id, &tournament).unwrap();
    }

    let reopened = Registry::open(RonFile::new(&path)).unwrap();
    let mut restored = reopened.load_tournament(id).unwrap();
    assert_eq!(restored, tournament);
    assert_eq!(restored.status(), TournamentStatus::ReadyForNextRound);

    played += play_round(&mut restored, &mut rng);
    assert_eq!(restored.status(), TournamentStatus::Ended);
    assert!(matches!(
        restored.create_round(&mut rng),
        Err(Error::TournamentEnded)
    ));

    let total: f64 = restored.players.iter().map(|player| player.score).sum();
    assert_eq!(total, f64::from(u32::try_from(played).unwrap()));

    let ranking = restored.get_ranked_players(&mut rng);
    assert!(ranking.windows(2).all(|pair| pair[0].score >= pair[1].score));

    // The registry copies never carry tournament scores.
    assert!(reopened.list_players().iter().all(|player| player.score == 0.0));

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn a_console_session_runs_a_tournament_and_rerunning_shows_results() {
    let path = temp_file("session");
    let _ = fs::remove_dir_all(path.parent().unwrap());

    let mut registry = Registry::open(RonFile::new(&path)).unwrap();
    register_players(&mut registry, 3);
    let (players, _) = registry.select_players(&split_ids("FL0, FL1, FL2"));
    let mut tournament = Tournament::new("Trio", "Oslo", "", players, 1);
    let id = registry.create_tournament(&mut tournament).unwrap();

    // Three players give one match and one player without a game.
    let script = "2\n4\n1\ny\ny\n0\n0\n0\n";
    let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let mut controller = Controller::new(registry, console, StdRng::seed_from_u64(9));
    controller.run().unwrap();

    let registry = Registry::open(RonFile::new(&path)).unwrap();
    let tournament = registry.load_tournament(id).unwrap();
    assert_eq!(tournament.status(), TournamentStatus::Ended);
    assert_eq!(tournament.rounds[0].matches.len(), 1);
    let total: f64 = tournament.players.iter().map(|player| player.score).sum();
    assert_eq!(total, 1.0);

    let console = Console::new(Cursor::new(b"2\n4\n1\n0\n0\n".to_vec()), Vec::new());
    let mut controller = Controller::new(registry, console, StdRng::seed_from_u64(9));
    controller.run().unwrap();

    let output = String::from_utf8(controller.console().output().clone()).unwrap();
    assert!(output.contains("Tournament already ended."));
    assert!(!output.contains("Create round"));

    let _ = fs::remove_dir_all(path.parent().unwrap());
}
