//! Tic-tac-toe rules core.
//!
//! A pure, UI-agnostic implementation of the game: the host owns an explicit
//! [`GameState`] (or a [`Game`] with its [`History`]) and drives it through a
//! small call surface.
//!
//! - **Win evaluation**: [`evaluate_winner`] checks the eight lines in a fixed
//!   order.
//! - **Move acceptance**: [`GameState::apply_move`] places the next mark, or
//!   returns the state unchanged when the square is taken or the game is won.
//! - **History navigation**: [`jump_to_step`] returns any recorded step.
//! - **State sync**: a [`StateListener`] registered on a [`Game`] receives
//!   every accepted state.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameState, Player, evaluate_winner};
//!
//! let state = [0, 3, 1, 4, 2]
//!     .into_iter()
//!     .fold(GameState::new(), |s, i| s.apply_move(i));
//!
//! assert_eq!(evaluate_winner(state.board()), Some(Player::X));
//! assert_eq!(state.apply_move(5), state);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod game;
mod history;
mod invariants;
mod position;
mod rules;
mod state;
mod sync;
mod types;

pub use action::{Move, MoveError};
pub use contracts::{Contract, LegalMove, MoveContract, NoWinnerYet, SquareIsEmpty};
pub use game::Game;
pub use history::{History, HistoryError, jump_to_step};
pub use invariants::{
    BalancedMarksInvariant, HistoryMonotonicInvariant, Invariant, InvariantSet,
    InvariantViolation, MoveCountInvariant, SingleWinnerInvariant, StateInvariants,
};
pub use position::Position;
pub use rules::{LINES, evaluate_winner, winning_line};
pub use state::{GameState, GameStatus};
pub use sync::{FnListener, StateListener, SyncError, SyncSnapshot};
pub use types::{Board, Player, Square};
