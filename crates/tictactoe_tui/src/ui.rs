//! Stateless UI rendering.

use crate::app::{App, Focus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tictactoe_core::{Board, GameStatus, Player, Position, Square, winning_line};

const ROWS: [[Position; 3]; 3] = [
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
];

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board + history
            Constraint::Length(4), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(chunks[1]);

    draw_board(frame, body[0], app);
    draw_history(frame, body[1], app);
    draw_status(frame, chunks[2], app);

    let help = Paragraph::new("1-9/Enter: play  Tab: history  r: restart  q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.game().state();
    let board = state.board();
    let highlight = winning_line(board).map(|(_, line)| line);
    let cursor = (*app.focus() == Focus::Board).then_some(*app.cursor());

    let block = Block::default().borders(Borders::ALL).title("Board");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(center_rect(inner, 23, 5));

    for (i, positions) in ROWS.iter().enumerate() {
        let spans: Vec<Span> = positions
            .iter()
            .enumerate()
            .flat_map(|(col, pos)| {
                let cell = cell_span(board, *pos, cursor, highlight);
                let sep = (col < 2)
                    .then(|| Span::styled("│", Style::default().fg(Color::DarkGray)));
                std::iter::once(cell).chain(sep)
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            rows[i * 2],
        );
        if i < 2 {
            let sep = Paragraph::new("───────┼───────┼───────")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(sep, rows[i * 2 + 1]);
        }
    }
}

fn cell_span(
    board: &Board,
    pos: Position,
    cursor: Option<Position>,
    highlight: Option<[Position; 3]>,
) -> Span<'static> {
    let (symbol, mut style) = match board.get(pos) {
        Square::Empty => (
            format!("   {}   ", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            "   X   ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "   O   ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    if highlight.is_some_and(|line| line.contains(&pos)) {
        style = style.bg(Color::Green).fg(Color::Black);
    }
    if cursor == Some(pos) {
        style = style.bg(Color::White).fg(Color::Black);
    }

    Span::styled(symbol, style)
}

fn draw_history(frame: &mut Frame, area: Rect, app: &App) {
    let game = app.game();
    let history = game.history();

    let items: Vec<ListItem> = (0..history.len())
        .map(|step| {
            let label = match history.move_at(step) {
                None => "Go to game start".to_string(),
                Some(action) => format!("Go to move #{} ({})", step, action),
            };
            let style = if step == game.step() {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(label).style(style)
        })
        .collect();

    let border_style = match app.focus() {
        Focus::History => Style::default().fg(Color::Yellow),
        Focus::Board => Style::default(),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("History")
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let selected = match app.focus() {
        Focus::History => *app.selected(),
        Focus::Board => game.step(),
    };
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let status = app.game().status();
    let status_style = match status {
        GameStatus::Won(_) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        GameStatus::InProgress { .. } => Style::default().fg(Color::Yellow),
    };

    let mut lines = vec![Line::from(Span::styled(status.to_string(), status_style))];
    if let Some(message) = app.message() {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use ratatui::{Terminal, backend::TestBackend};
    use tictactoe_core::Game;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_new_game_shows_next_player_and_start() {
        let screen = render(&App::new(Game::new()));
        assert!(screen.contains("Next player: X"));
        assert!(screen.contains("Go to game start"));
    }

    #[test]
    fn test_won_game_shows_winner_and_moves() {
        let mut app = App::new(Game::new());
        for c in ['1', '4', '2', '5', '3'] {
            app.handle_key(KeyCode::Char(c));
        }
        let screen = render(&app);
        assert!(screen.contains("Winner: X"));
        assert!(screen.contains("Go to move #5"));
    }

    #[test]
    fn test_board_rows_have_cell_separators() {
        let mut app = App::new(Game::new());
        app.handle_key(KeyCode::Char('5'));
        let screen = render(&app);
        assert!(screen.contains("   1   │   2   │   3   "));
        assert!(screen.contains("   4   │   X   │   6   "));
    }
}
