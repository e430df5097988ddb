use std::iter::once;

use itertools::Itertools;

use crate::{
    event::Event,
    game_state::{GameState, Phase},
    play::Roles,
};

/// How a waiting phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    Placed,
    Passed,
}

impl GameState {
    pub fn begin_round(&mut self, index: usize) -> Option<Roles> {
        let roles = self.roles_for_round(index)?;
        for player in self.players.values_mut() {
            player.set_passed(false);
        }
        self.roles = Some(roles);
        self.phase = Phase::Idle;
        self.exchanges = 0;
        self.pending = None;
        self.log.push(Event::RoundStarted {
            attacker: roles.attacker,
            defender: roles.defender,
        });
        log::info!(
            "round {index}: player {} attacks player {}",
            roles.attacker,
            roles.defender
        );
        Some(roles)
    }

    pub fn either_passed(&self, roles: Roles) -> bool {
        [roles.attacker, roles.defender]
            .iter()
            .any(|id| self.players.get(id).map_or(true, |p| p.has_passed()))
    }

    /// Whether another attack may follow: nobody passed and covers are left.
    pub fn round_open(&self, roles: Roles) -> bool {
        !self.either_passed(roles) && self.exchanges < self.config.max_exchanges
    }

    pub fn open_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.pending = None;
        }
    }

    /// Tries to finish the open phase. `None` means keep waiting.
    ///
    /// The pending move is consumed and checked against the current hand and
    /// board; an invalid one is dropped without touching anything.
    pub fn poll_phase(&mut self) -> Option<PhaseOutcome> {
        let phase = self.phase;
        let Some(actor) = self.waiting_for() else {
            return Some(PhaseOutcome::Passed);
        };
        let Some(player) = self.players.get_mut(&actor) else {
            self.close_phase();
            return Some(PhaseOutcome::Passed);
        };
        if player.has_passed() {
            self.close_phase();
            return Some(PhaseOutcome::Passed);
        }
        if !player.has_cards() {
            player.set_passed(true);
            self.log.push(Event::Passed(actor));
            log::debug!("player {actor} has no cards left and passes");
            self.close_phase();
            return Some(PhaseOutcome::Passed);
        }

        let pending = self.pending.take()?;
        if pending.player != actor {
            return None;
        }
        let Some(card) = player.hand().get(pending.hand_index).copied() else {
            log::debug!("player {actor} offered hand index {} out of range", pending.hand_index);
            return None;
        };
        let allowed = match phase {
            Phase::AwaitingAttack => self.board.can_attack(&card),
            Phase::AwaitingDefense => self.board.can_defend(&card),
            Phase::Idle => false,
        };
        if !allowed {
            log::debug!("player {actor} cannot play {card} now");
            return None;
        }

        let card = player.play(pending.hand_index)?;
        let placed = match phase {
            Phase::AwaitingDefense => self.board.defend(card),
            _ => self.board.attack(card),
        };
        if let Err(card) = placed {
            player.grab([card]);
            return None;
        }
        match phase {
            Phase::AwaitingDefense => {
                self.log.push(Event::Defended(actor, card));
                log::debug!("player {actor} covered with {card}");
                self.exchanges += 1;
                if self.exchanges < self.config.max_exchanges {
                    self.phase = Phase::AwaitingAttack;
                } else {
                    self.close_phase();
                }
            }
            _ => {
                self.log.push(Event::Attacked(actor, card));
                log::debug!("player {actor} attacked with {card}");
                self.phase = Phase::AwaitingDefense;
            }
        }
        Some(PhaseOutcome::Placed)
    }

    /// The wait ran out: a move that is already pending still counts,
    /// otherwise the waited-on player passes.
    pub fn expire_phase(&mut self) -> PhaseOutcome {
        if let Some(outcome) = self.poll_phase() {
            return outcome;
        }
        if let Some(actor) = self.waiting_for() {
            if let Some(player) = self.players.get_mut(&actor) {
                player.set_passed(true);
            }
            self.log.push(Event::TimedOut(actor));
            log::warn!("player {actor} timed out");
        }
        self.close_phase();
        PhaseOutcome::Passed
    }

    fn close_phase(&mut self) {
        self.phase = Phase::Idle;
        self.pending = None;
    }

    /// Settles the board after the exchanges: the defender takes everything
    /// unless every attack card is covered, in which case the cards leave play.
    pub fn finish_round(&mut self, roles: Roles) {
        let beaten = self.board.is_fully_beaten();
        let cards = self.board.take_cards();
        let count = cards.len();
        match self.players.get_mut(&roles.defender) {
            Some(defender) if !beaten => {
                defender.grab(cards);
                self.log.push(Event::Took(roles.defender, count));
                log::info!("player {} takes {count} cards", roles.defender);
            }
            _ => {
                self.discard.extend(cards);
                self.log.push(Event::BeatenOff(count));
                log::info!("{count} cards beaten off");
            }
        }
        self.board.reset();
        for player in self.players.values_mut() {
            player.set_passed(false);
        }
        self.close_phase();
        self.exchanges = 0;
        self.roles = None;

        if self.config.refill_hands {
            self.refill_hands(roles);
        }
        self.push_finished();
    }

    /// Attacker draws first, the defender last.
    fn refill_hands(&mut self, roles: Roles) {
        let order = once(roles.attacker)
            .chain(
                self.players
                    .keys()
                    .copied()
                    .filter(|&id| id != roles.attacker && id != roles.defender),
            )
            .chain(once(roles.defender))
            .collect_vec();
        for id in order {
            if let Some(player) = self.players.get_mut(&id) {
                let drawn = player.refill(&mut self.deck, self.config.hand_size);
                if drawn > 0 {
                    self.log.push(Event::Refilled(id, drawn));
                }
            }
        }
    }

    /// Moves every active player with an empty hand to the finish list, in id order.
    pub fn push_finished(&mut self) {
        let done = self
            .players
            .iter()
            .filter(|(_, p)| !p.has_cards())
            .map(|(&id, _)| id)
            .collect_vec();
        for id in done {
            if let Some(player) = self.players.remove(&id) {
                log::info!("player {id} ({}) is out of cards", player.name());
                self.finished.insert(id, player);
                self.ranking.push(id);
                self.log.push(Event::Finished(id));
            }
        }
    }
}
