pub mod board;
pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod event;
pub mod events;
pub mod game;
mod game_logic;
mod game_state;
pub mod play;
pub mod player;

pub use game::Game;
pub use game_state::Lifecycle;

use error::GameError;
use play::Standings;

/// Waits until enough players joined, then plays the match to the end.
pub async fn run_game(game: Game) -> Result<Standings, GameError> {
    game.wait_for_players().await;
    game.run().await
}
