use thiserror::Error;

use crate::player::PlayerId;

/// Failures the transport has to report. Rule violations are not errors:
/// an illegal move is simply not accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),
    #[error("the match has already started")]
    AlreadyStarted,
    #[error("{joined} players joined, {required} needed")]
    NotEnoughPlayers { joined: usize, required: usize },
    #[error("cannot deal from an empty deck")]
    EmptyDeck,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
