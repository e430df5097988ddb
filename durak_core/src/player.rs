use crate::{card::Card, deck::Deck};

pub type PlayerId = usize;

pub struct Player {
    name: String,
    hand: Vec<Card>,
    has_passed: bool,
}

impl Player {
    pub fn new(name: String, hand: Vec<Card>) -> Self {
        Player {
            name,
            hand,
            has_passed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn has_cards(&self) -> bool {
        !self.hand.is_empty()
    }

    pub fn has_passed(&self) -> bool {
        self.has_passed
    }

    pub fn set_passed(&mut self, value: bool) {
        self.has_passed = value;
    }

    /// Removes and returns the card at `index`, if there is one.
    pub fn play(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    pub fn grab(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Draws from `deck` until the hand holds `hand_size` cards or the deck is empty.
    /// Returns the number of cards drawn.
    pub fn refill(&mut self, deck: &mut Deck, hand_size: usize) -> usize {
        let missing = hand_size.saturating_sub(self.hand.len());
        let drawn = deck.draw(missing);
        let count = drawn.len();
        self.hand.extend(drawn);
        count
    }
}
