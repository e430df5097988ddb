use serde::{Deserialize, Serialize};

use crate::card::{beats, Card, Suit};

pub const MAX_ATTACK_CARDS: usize = 7;

/// Snapshot of the table handed out to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub attack: Vec<Card>,
    pub defense: Vec<Card>,
    pub trump: Suit,
}

/// The table for the round in progress. `defense[i]` covers `attack[i]`.
pub struct Board {
    attack: Vec<Card>,
    defense: Vec<Card>,
    trump: Suit,
}

impl Board {
    pub fn new(trump: Suit) -> Self {
        Board {
            attack: vec![],
            defense: vec![],
            trump,
        }
    }

    pub fn trump_suit(&self) -> Suit {
        self.trump
    }

    pub fn attack_pile(&self) -> &[Card] {
        &self.attack
    }

    pub fn defense_pile(&self) -> &[Card] {
        &self.defense
    }

    /// Room is left and the rank is either the opening one, one already used
    /// to defend, or the pile is still empty.
    pub fn can_attack(&self, card: &Card) -> bool {
        if self.attack.len() >= MAX_ATTACK_CARDS {
            return false;
        }
        match self.attack.first() {
            None => true,
            Some(first) => {
                card.rank() == first.rank() || self.defense.iter().any(|d| d.rank() == card.rank())
            }
        }
    }

    /// Places `card` on the attack pile, or hands it back when not allowed.
    pub fn attack(&mut self, card: Card) -> Result<(), Card> {
        if !self.can_attack(&card) {
            return Err(card);
        }
        self.attack.push(card);
        Ok(())
    }

    /// `card` covers the latest attack card and that card is still uncovered.
    pub fn can_defend(&self, card: &Card) -> bool {
        if self.defense.len() >= self.attack.len() {
            return false;
        }
        self.attack
            .last()
            .is_some_and(|last| beats(last, card, self.trump))
    }

    pub fn defend(&mut self, card: Card) -> Result<(), Card> {
        if !self.can_defend(&card) {
            return Err(card);
        }
        self.defense.push(card);
        Ok(())
    }

    pub fn is_fully_beaten(&self) -> bool {
        self.attack.len() == self.defense.len()
    }

    /// Empties both piles, defense cards first.
    pub fn take_cards(&mut self) -> Vec<Card> {
        let mut cards = std::mem::take(&mut self.defense);
        cards.append(&mut self.attack);
        cards
    }

    pub fn reset(&mut self) {
        self.attack.clear();
        self.defense.clear();
    }

    pub fn snapshot(&self) -> BoardView {
        BoardView {
            attack: self.attack.clone(),
            defense: self.defense.clone(),
            trump: self.trump,
        }
    }
}
