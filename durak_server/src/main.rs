use durak_core::{
    config::GameConfig,
    events::{handle_request, ClientRequest, ServerReply},
    run_game, Game,
};
use log::{error, info, warn};
use renet::{
    transport::{NetcodeServerTransport, ServerAuthentication, ServerConfig},
    ConnectionConfig, DefaultChannel, RenetServer, ServerEvent,
};
use std::{
    error::Error,
    fs,
    net::{SocketAddr, UdpSocket},
    time::{Duration, Instant, SystemTime},
};
use tokio::time;

fn load_config(path: &str) -> Result<GameConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let config: GameConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

/// Decodes one client message and answers it as JSON.
fn reply_for(game: &Game, message: &[u8]) -> String {
    let reply = match serde_json::from_slice::<ClientRequest>(message) {
        Ok(request) => handle_request(game, request),
        Err(e) => {
            warn!("undecodable request: {e}");
            ServerReply::Error(format!("bad request: {e}"))
        }
    };
    serde_json::to_string(&reply)
        .unwrap_or_else(|e| format!(r#"{{"Error":"cannot encode reply: {e}"}}"#))
}

async fn play_match(game: Game) {
    match run_game(game).await {
        Ok(standings) => info!(
            "finish order {:?}, durak {:?}",
            standings.finish_order, standings.durak
        ),
        Err(e) => error!("match aborted: {e}"),
    }
}

async fn serve(public_addr: SocketAddr, game: Game) -> Result<(), Box<dyn Error>> {
    let mut interval = time::interval(Duration::from_millis(50));
    let connection_config = ConnectionConfig::default();
    let mut server: RenetServer = RenetServer::new(connection_config);

    let current_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?;
    let server_config = ServerConfig {
        current_time,
        max_clients: 64,
        protocol_id: 0,
        public_addresses: vec![public_addr],
        authentication: ServerAuthentication::Unsecure,
    };
    let socket: UdpSocket = UdpSocket::bind(public_addr)?;
    let mut transport = NetcodeServerTransport::new(server_config, socket)?;
    info!("listening on {public_addr}");

    let mut last_updated = Instant::now();
    loop {
        let now = Instant::now();
        let duration = now - last_updated;
        last_updated = now;

        server.update(duration);
        transport.update(duration, &mut server)?;

        while let Some(event) = server.get_event() {
            match event {
                ServerEvent::ClientConnected { client_id } => {
                    info!("client {client_id} connected");
                }
                ServerEvent::ClientDisconnected { client_id, reason } => {
                    info!("client {client_id} disconnected: {reason}");
                }
            }
        }

        for client_id in server.clients_id() {
            while let Some(message) =
                server.receive_message(client_id, DefaultChannel::ReliableOrdered)
            {
                let reply = reply_for(&game, &message);
                server.send_message(client_id, DefaultChannel::ReliableOrdered, reply);
            }
        }

        transport.send_packets(&mut server);
        interval.tick().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    let Some(port) = args.get(1) else {
        println!("Usage: [SERVER_PORT] [CONFIG_JSON]");
        return Ok(());
    };
    let config = match args.get(2) {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let public_addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;

    let game = Game::new(config)?;
    tokio::spawn(play_match(game.clone()));
    serve(public_addr, game).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_for_should_answer_registration() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(
            reply_for(&game, br#"{"Register":{"name":"Foo"}}"#),
            r#"{"Registered":0}"#
        );
    }

    #[test]
    fn reply_for_should_report_garbage() {
        let game = Game::new(GameConfig::default()).unwrap();
        let reply: ServerReply = serde_json::from_str(&reply_for(&game, b"not json")).unwrap();
        assert!(matches!(reply, ServerReply::Error(msg) if msg.starts_with("bad request")));
    }

    #[test]
    fn reply_for_should_report_unknown_player() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(
            reply_for(&game, br#"{"Pass":{"player_id":3}}"#),
            r#"{"Error":"no player with id 3"}"#
        );
    }

    #[test]
    fn load_config_should_fail_on_missing_file() {
        assert!(load_config("/nonexistent/durak.json").is_err());
    }

    #[test]
    fn load_config_should_reject_unplayable_ranks() {
        let path = std::env::temp_dir().join(format!("durak-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"base_rank": 1}"#).unwrap();
        let loaded = load_config(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();
        let err = loaded.unwrap_err();
        assert!(err.to_string().starts_with("invalid config: base_rank"));
    }
}
