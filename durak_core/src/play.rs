use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// A card offered by `player`, identified by its position in their hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub player: PlayerId,
    pub hand_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    NotStarted,
    NotYourTurn,
    AlreadyPassed,
}

/// `Recorded` only means the move was queued; the round loop still checks it
/// against the board before the card leaves the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveReply {
    Recorded,
    NotAccepted(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassReply {
    Passed,
    AlreadyPassed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub attacker: PlayerId,
    pub defender: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    /// First player to empty their hand comes first.
    pub finish_order: Vec<PlayerId>,
    pub durak: Option<PlayerId>,
}
