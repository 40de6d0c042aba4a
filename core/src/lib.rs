//! Board model and game-state engine for a single-player mine-clearing game.
//!
//! A [`GameSession`] owns the [`Board`], applies reveal and flag requests,
//! tracks time net of pauses, and hands winning times to a [`Leaderboard`].
//! Drawing the board is left to the caller, which reads [`CellView`]s back.

pub use board::*;
pub use cell::*;
pub use config::*;
pub use display::*;
pub use error::*;
pub use leaderboard::*;
pub use player::*;
pub use reveal::*;
pub use session::*;
pub use storage::*;
pub use timer::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod display;
mod error;
mod leaderboard;
mod player;
mod reveal;
mod session;
mod storage;
mod timer;
mod types;
