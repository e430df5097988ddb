use itertools::iproduct;
use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::card::{Card, Suit, MAX_RANK};

/// The stock. Cards are drawn from the front; the last card decides the trump.
pub struct Deck {
    cards: Vec<Card>,
    trump: Option<Suit>,
}

impl Deck {
    pub fn new(base_rank: u8) -> Self {
        Deck::with_rng(base_rank, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(base_rank: u8, rng: &mut R) -> Self {
        let mut cards = iproduct!(base_rank..=MAX_RANK, Suit::iter())
            .map(|(rank, suit)| Card::new(suit, rank))
            .collect::<Vec<_>>();
        cards.shuffle(rng);
        Deck::from_cards(cards)
    }

    /// A deck stacked in the given order, top card first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let trump = cards.last().map(Card::suit);
        Deck { cards, trump }
    }

    /// Removes up to `count` cards from the top. Fewer cards than requested
    /// means the deck ran out.
    pub fn draw(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        self.cards.drain(..count).collect()
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        self.trump
    }

    pub fn last_card(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Shuffles the remaining cards. The trump suit stays as dealt.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn new_deck_should_hold_every_card_from_base_rank_once() {
        let deck = Deck::with_rng(6, &mut StdRng::seed_from_u64(7));
        assert_eq!(deck.len(), 36);
        let unique = deck.cards().iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), 36);
        assert!(deck.cards().iter().all(|c| (6..=14).contains(&c.rank())));
    }

    #[test]
    fn trump_should_be_suit_of_last_card() {
        let deck = Deck::with_rng(6, &mut StdRng::seed_from_u64(11));
        assert_eq!(deck.trump_suit(), deck.last_card().map(Card::suit));
    }

    #[test]
    fn draw_should_take_from_top_and_stop_at_exhaustion() {
        let mut deck = Deck::from_cards(vec![
            Card::new(Suit::Hearts, 6),
            Card::new(Suit::Clubs, 7),
            Card::new(Suit::Spades, 8),
        ]);
        assert_eq!(
            deck.draw(2),
            vec![Card::new(Suit::Hearts, 6), Card::new(Suit::Clubs, 7)]
        );
        assert_eq!(deck.draw(5), vec![Card::new(Suit::Spades, 8)]);
        assert!(deck.draw(1).is_empty());
        assert!(deck.is_empty());
    }

    #[test]
    fn trump_should_survive_an_empty_deck() {
        let mut deck = Deck::from_cards(vec![Card::new(Suit::Hearts, 6), Card::new(Suit::Diamonds, 9)]);
        deck.draw(2);
        assert_eq!(deck.trump_suit(), Some(Suit::Diamonds));
        assert_eq!(deck.last_card(), None);
    }

    #[test]
    fn reshuffle_should_keep_cards_and_trump() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut deck = Deck::with_rng(6, &mut rng);
        let trump = deck.trump_suit();
        let before = deck.cards().iter().copied().collect::<HashSet<_>>();
        deck.reshuffle(&mut rng);
        assert_eq!(deck.trump_suit(), trump);
        assert_eq!(deck.cards().iter().copied().collect::<HashSet<_>>(), before);
    }
}
