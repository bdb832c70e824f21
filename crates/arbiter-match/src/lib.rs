//! Running chess games: the referee loop, per-move clocks, and players.

mod game;
mod player;
pub mod players;
mod time_control;

pub use game::{ForfeitReason, Game, GameOutcome};
pub use player::{Player, Prompt, Seat};
pub use players::interactive::ParseMoveError;
pub use time_control::{Blitz3, TimeControl, Untimed};
