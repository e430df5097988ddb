use serde::{Deserialize, Serialize};

use crate::{
    card::{Card, Suit},
    player::PlayerId,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Joined(PlayerId, String),
    MatchStarted(Suit),
    RoundStarted {
        attacker: PlayerId,
        defender: PlayerId,
    },
    Attacked(PlayerId, Card),
    Defended(PlayerId, Card),
    Passed(PlayerId),
    TimedOut(PlayerId),
    /// The defender picked up this many cards.
    Took(PlayerId, usize),
    /// This many cards left play after a successful defense.
    BeatenOff(usize),
    Refilled(PlayerId, usize),
    Finished(PlayerId),
    MatchOver { durak: Option<PlayerId> },
}
