//! Drives a full session through key presses with a sync file attached.

use crossterm::event::KeyCode;
use tictactoe_core::{Game, GameStatus, Player, SyncSnapshot};
use tictactoe_tui::{Action, App, JsonLinesListener};

fn press(app: &mut App, keys: &[KeyCode]) {
    for key in keys {
        assert_eq!(app.handle_key(*key), Action::Continue);
    }
}

fn read_snapshots(path: &std::path::Path) -> Vec<SyncSnapshot> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_session_with_history_branch_is_synced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.jsonl");
    let game = Game::with_listener(JsonLinesListener::open(&path).unwrap());
    let mut app = App::new(game);

    // X: 1 2 3 across the top, O: 4 5.
    press(
        &mut app,
        &[
            KeyCode::Char('1'),
            KeyCode::Char('4'),
            KeyCode::Char('2'),
            KeyCode::Char('5'),
            KeyCode::Char('3'),
        ],
    );
    assert_eq!(app.game().status(), GameStatus::Won(Player::X));

    // Further moves are ignored and not synced.
    press(&mut app, &[KeyCode::Char('9')]);
    assert_eq!(read_snapshots(&path).len(), 5);

    // Back to move #3, then O blocks with 3.
    press(
        &mut app,
        &[KeyCode::Tab, KeyCode::Up, KeyCode::Up, KeyCode::Enter, KeyCode::Tab],
    );
    assert_eq!(app.game().step(), 3);
    press(&mut app, &[KeyCode::Char('3')]);
    assert_eq!(app.game().status(), GameStatus::InProgress { next: Player::X });

    let snapshots = read_snapshots(&path);
    assert_eq!(snapshots.len(), 6);
    let last = snapshots.last().unwrap();
    assert_eq!(last.step_number, 4);
    assert_eq!(last.squares[2], Some(Player::O));
    assert!(last.x_is_next);
    assert_eq!(app.game().history().len(), 5);
}
