use serde::{Deserialize, Serialize};

use crate::{
    board::BoardView,
    card::Card,
    event::Event,
    game::Game,
    play::{MoveReply, PassReply},
    player::PlayerId,
};

/// What a remote client may ask for. Clients name themselves by the id
/// they got on registration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ClientRequest {
    Register { name: String },
    ThrowCard { player_id: PlayerId, hand_index: usize },
    Pass { player_id: PlayerId },
    Board,
    Hand { player_id: PlayerId },
    Passes,
    Log,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ServerReply {
    Registered(PlayerId),
    Move(MoveReply),
    Pass(PassReply),
    Board(BoardView),
    Hand(Vec<Card>),
    Passes(Vec<bool>),
    Log(Vec<Event>),
    Error(String),
}

pub fn handle_request(game: &Game, request: ClientRequest) -> ServerReply {
    let reply = match request {
        ClientRequest::Register { name } => game.add_player(&name).map(ServerReply::Registered),
        ClientRequest::ThrowCard {
            player_id,
            hand_index,
        } => game.submit_move(player_id, hand_index).map(ServerReply::Move),
        ClientRequest::Pass { player_id } => game.submit_pass(player_id).map(ServerReply::Pass),
        ClientRequest::Board => Ok(ServerReply::Board(game.query_board())),
        ClientRequest::Hand { player_id } => game.query_hand(player_id).map(ServerReply::Hand),
        ClientRequest::Passes => Ok(ServerReply::Passes(game.query_pass_states())),
        ClientRequest::Log => Ok(ServerReply::Log(game.query_log())),
    };
    reply.unwrap_or_else(|e| ServerReply::Error(e.to_string()))
}
