use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tokio::{sync::Notify, time};

use crate::{
    board::BoardView,
    card::Card,
    config::GameConfig,
    deck::Deck,
    error::GameError,
    event::Event,
    game_logic::PhaseOutcome,
    game_state::{GameState, Lifecycle, Phase},
    play::{MoveReply, PassReply, Roles, Standings},
    player::PlayerId,
};

struct Shared {
    state: Mutex<GameState>,
    wakeup: Notify,
}

/// Handle to one match. Clones share the match; separate `Game::new` calls don't.
///
/// The transport submits moves and passes through the handle while a task
/// drives [`Game::run`]. Every submission wakes the round loop, which then
/// re-checks the pending move under the lock.
#[derive(Clone)]
pub struct Game {
    shared: Arc<Shared>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let deck = Deck::new(config.base_rank);
        Game::with_deck(config, deck)
    }

    pub fn with_deck(config: GameConfig, deck: Deck) -> Result<Self, GameError> {
        Ok(Game {
            shared: Arc::new(Shared {
                state: Mutex::new(GameState::new(config, deck)?),
                wakeup: Notify::new(),
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, GameState> {
        self.shared.state.lock()
    }

    fn wake(&self) {
        self.shared.wakeup.notify_waiters();
    }

    pub fn add_player(&self, name: &str) -> Result<PlayerId, GameError> {
        let id = self.state().add_player(name)?;
        self.wake();
        Ok(id)
    }

    pub fn submit_move(&self, id: PlayerId, hand_index: usize) -> Result<MoveReply, GameError> {
        let reply = self.state().submit_move(id, hand_index)?;
        if reply == MoveReply::Recorded {
            self.wake();
        }
        Ok(reply)
    }

    pub fn submit_pass(&self, id: PlayerId) -> Result<PassReply, GameError> {
        let reply = self.state().submit_pass(id)?;
        self.wake();
        Ok(reply)
    }

    pub fn query_board(&self) -> BoardView {
        self.state().board.snapshot()
    }

    pub fn query_hand(&self, id: PlayerId) -> Result<Vec<Card>, GameError> {
        Ok(self.state().player(id)?.hand().to_vec())
    }

    /// Pass flags of the players still in the match, ordered by id.
    pub fn query_pass_states(&self) -> Vec<bool> {
        self.state().pass_states()
    }

    pub fn query_log(&self) -> Vec<Event> {
        self.state().log.clone()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state().lifecycle
    }

    pub fn player_count(&self) -> usize {
        self.state().players.len()
    }

    pub fn deck_len(&self) -> usize {
        self.state().deck.len()
    }

    pub fn discard_len(&self) -> usize {
        self.state().discard.len()
    }

    pub fn finish_order(&self) -> Vec<PlayerId> {
        self.state().finish_order()
    }

    pub fn current_roles(&self) -> Option<Roles> {
        self.state().roles
    }

    /// Resolves once enough players have joined to start.
    pub async fn wait_for_players(&self) {
        loop {
            let notified = self.shared.wakeup.notified();
            let ready = {
                let state = self.state();
                state.players.len() >= state.config.min_players
            };
            if ready {
                return;
            }
            notified.await;
        }
    }

    /// Plays rounds until at most one player holds cards.
    pub async fn run(&self) -> Result<Standings, GameError> {
        self.state().start()?;
        let mut index = 0;
        loop {
            let roles = self.state().begin_round(index);
            let Some(roles) = roles else {
                break;
            };
            self.play_round(roles).await;
            self.state().finish_round(roles);
            index += 1;
        }
        let standings = self.state().terminate();
        self.wake();
        Ok(standings)
    }

    async fn play_round(&self, roles: Roles) {
        while self.state().round_open(roles) {
            if self.await_phase(Phase::AwaitingAttack).await == PhaseOutcome::Placed {
                self.await_phase(Phase::AwaitingDefense).await;
            }
        }
    }

    async fn await_phase(&self, phase: Phase) -> PhaseOutcome {
        let deadline = {
            let mut state = self.state();
            state.open_phase(phase);
            state
                .config
                .turn_timeout()
                .map(|timeout| time::Instant::now() + timeout)
        };
        loop {
            let notified = self.shared.wakeup.notified();
            let outcome = self.state().poll_phase();
            if let Some(outcome) = outcome {
                return outcome;
            }
            match deadline {
                Some(deadline) => {
                    if time::timeout_at(deadline, notified).await.is_err() {
                        return self.state().expire_phase();
                    }
                }
                None => notified.await,
            }
        }
    }
}
