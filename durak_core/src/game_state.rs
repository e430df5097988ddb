use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    card::Card,
    config::GameConfig,
    deck::Deck,
    error::GameError,
    event::Event,
    play::{MoveReply, PassReply, PendingMove, Rejection, Roles, Standings},
    player::{Player, PlayerId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Lobby,
    Running,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingAttack,
    AwaitingDefense,
}

pub struct GameState {
    pub config: GameConfig,
    pub deck: Deck,
    pub board: Board,
    pub players: BTreeMap<PlayerId, Player>,
    /// Players who emptied their hand; `ranking` keeps the order they did it in.
    pub finished: BTreeMap<PlayerId, Player>,
    pub ranking: Vec<PlayerId>,
    pub discard: Vec<Card>,
    pub next_id: PlayerId,
    pub lifecycle: Lifecycle,
    pub phase: Phase,
    /// Covers placed in the current round.
    pub exchanges: usize,
    pub roles: Option<Roles>,
    pub pending: Option<PendingMove>,
    pub log: Vec<Event>,
}

impl GameState {
    pub fn new(config: GameConfig, deck: Deck) -> Result<Self, GameError> {
        config.validate()?;
        let trump = deck.trump_suit().ok_or(GameError::EmptyDeck)?;
        Ok(GameState {
            config,
            deck,
            board: Board::new(trump),
            players: BTreeMap::new(),
            finished: BTreeMap::new(),
            ranking: vec![],
            discard: vec![],
            next_id: 0,
            lifecycle: Lifecycle::Lobby,
            phase: Phase::Idle,
            exchanges: 0,
            roles: None,
            pending: None,
            log: vec![],
        })
    }

    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, GameError> {
        if self.lifecycle != Lifecycle::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        let id = self.next_id;
        self.next_id += 1;
        let hand = self.deck.draw(self.config.hand_size);
        self.players.insert(id, Player::new(name.to_string(), hand));
        self.log.push(Event::Joined(id, name.to_string()));
        log::info!("{name} joined as player {id}");
        Ok(id)
    }

    /// Looks a player up among the active players first, then among those
    /// who already finished.
    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players
            .get(&id)
            .or_else(|| self.finished.get(&id))
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        if let Some(player) = self.players.get_mut(&id) {
            return Ok(player);
        }
        self.finished.get_mut(&id).ok_or(GameError::UnknownPlayer(id))
    }

    /// The player the current phase waits for, if any.
    pub fn waiting_for(&self) -> Option<PlayerId> {
        let roles = self.roles?;
        match self.phase {
            Phase::Idle => None,
            Phase::AwaitingAttack => Some(roles.attacker),
            Phase::AwaitingDefense => Some(roles.defender),
        }
    }

    pub fn submit_move(&mut self, id: PlayerId, hand_index: usize) -> Result<MoveReply, GameError> {
        let passed = self.player(id)?.has_passed();
        if self.lifecycle != Lifecycle::Running {
            return Ok(MoveReply::NotAccepted(Rejection::NotStarted));
        }
        if self.waiting_for() != Some(id) {
            return Ok(MoveReply::NotAccepted(Rejection::NotYourTurn));
        }
        if passed {
            return Ok(MoveReply::NotAccepted(Rejection::AlreadyPassed));
        }
        self.pending = Some(PendingMove {
            player: id,
            hand_index,
        });
        Ok(MoveReply::Recorded)
    }

    pub fn submit_pass(&mut self, id: PlayerId) -> Result<PassReply, GameError> {
        let player = self.player_mut(id)?;
        if player.has_passed() {
            return Ok(PassReply::AlreadyPassed);
        }
        player.set_passed(true);
        self.log.push(Event::Passed(id));
        log::debug!("player {id} passed");
        Ok(PassReply::Passed)
    }

    pub fn pass_states(&self) -> Vec<bool> {
        self.players.values().map(Player::has_passed).collect()
    }

    pub fn finish_order(&self) -> Vec<PlayerId> {
        self.ranking.clone()
    }

    /// Attacker and defender for round `index`, rotating over the players
    /// still holding cards. `None` once fewer than two remain.
    pub fn roles_for_round(&self, index: usize) -> Option<Roles> {
        let ids = self.players.keys().copied().collect::<Vec<_>>();
        if ids.len() < 2 {
            return None;
        }
        Some(Roles {
            attacker: ids[index % ids.len()],
            defender: ids[(index + 1) % ids.len()],
        })
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        if self.lifecycle != Lifecycle::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.len() < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                joined: self.players.len(),
                required: self.config.min_players,
            });
        }
        self.lifecycle = Lifecycle::Running;
        self.log.push(Event::MatchStarted(self.board.trump_suit()));
        log::info!(
            "match started with {} players, trump {}",
            self.players.len(),
            self.board.trump_suit()
        );
        self.push_finished();
        Ok(())
    }

    pub fn terminate(&mut self) -> Standings {
        self.lifecycle = Lifecycle::Terminated;
        self.phase = Phase::Idle;
        self.roles = None;
        self.pending = None;
        let durak = self.players.keys().next().copied();
        self.log.push(Event::MatchOver { durak });
        log::info!("match over, finish order {:?}, durak {:?}", self.finish_order(), durak);
        Standings {
            finish_order: self.finish_order(),
            durak,
        }
    }
}
