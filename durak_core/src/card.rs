use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

pub const MIN_RANK: u8 = 2;
pub const MAX_RANK: u8 = 14;

#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum Suit {
    #[strum(serialize = "H")]
    #[serde(rename = "H")]
    Hearts,
    #[strum(serialize = "S")]
    #[serde(rename = "S")]
    Spades,
    #[strum(serialize = "D")]
    #[serde(rename = "D")]
    Diamonds,
    #[strum(serialize = "T")]
    #[serde(rename = "T")]
    Clubs,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("card text is empty")]
    Empty,
    #[error("unknown suit in card `{0}`")]
    Suit(String),
    #[error("invalid rank in card `{0}`")]
    Rank(String),
}

/// A playing card. Cards of the same suit are ordered by rank; cards of
/// different suits are unordered, so `a < b` is false whenever the suits
/// differ. Use [`beats`] when the trump suit matters.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    suit: Suit,
    rank: u8,
}

impl Card {
    pub fn new(suit: Suit, rank: u8) -> Self {
        Card { suit, rank }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn set_suit(&mut self, suit: Suit) {
        self.suit = suit;
    }

    pub fn set_rank(&mut self, rank: u8) {
        self.rank = rank;
    }

    /// Plain same-suit comparison: `a.rank < b.rank` for equal suits, false otherwise.
    pub fn compare(a: &Card, b: &Card) -> bool {
        a < b
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.suit == other.suit {
            Some(self.rank.cmp(&other.rank))
        } else {
            None
        }
    }
}

/// Whether `defense` legally covers `attack` given the match's trump suit.
///
/// Off-suit, non-trump covers go through the plain comparator and are
/// therefore never accepted.
pub fn beats(attack: &Card, defense: &Card, trump: Suit) -> bool {
    if attack.suit == defense.suit {
        Card::compare(attack, defense)
    } else if attack.suit == trump {
        false
    } else if defense.suit == trump {
        true
    } else {
        Card::compare(attack, defense)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let suit_char = chars.next().ok_or(ParseCardError::Empty)?;
        let suit = Suit::from_str(&suit_char.to_string())
            .map_err(|_| ParseCardError::Suit(s.to_string()))?;
        let rank = chars
            .as_str()
            .parse::<u8>()
            .ok()
            .filter(|r| (MIN_RANK..=MAX_RANK).contains(r))
            .ok_or_else(|| ParseCardError::Rank(s.to_string()))?;
        Ok(Card { suit, rank })
    }
}

impl TryFrom<String> for Card {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}
