//! Signaling and lobby server for doctor/patient video calls.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin telecare-server
//! cargo run --bin telecare-server -- --host 0.0.0.0 --port 4000
//! ```
//!
//! Every option can also be set through the environment or a `.env` file.

use std::sync::Arc;

use clap::Parser;
use telecare_server::{
    domain::IceServerProvider,
    infrastructure::{
        ice_server::{EmptyIceServerProvider, TwilioIceServerProvider},
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryLobbyRepository, InMemoryParticipantRepository},
    },
    ui::{AppState, Server},
};
use telecare_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "telecare-server")]
#[command(about = "WebRTC signaling and lobby server for doctor/patient video calls", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "LOG_LEVEL", default_value = "debug")]
    log_level: String,

    /// Twilio account SID used to issue TURN credentials
    #[arg(long, env = "TWILIO_ACCOUNT_SID")]
    twilio_account_sid: Option<String>,

    /// Twilio auth token used to issue TURN credentials
    #[arg(long, env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    twilio_auth_token: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. ICE server provider
    // 4. AppState (UseCases)
    // 5. Server

    // 1. Create Repositories (in-memory)
    let participant_repository = Arc::new(InMemoryParticipantRepository::new());
    let lobby_repository = Arc::new(InMemoryLobbyRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Select the ICE server provider
    let ice_server_provider: Arc<dyn IceServerProvider> =
        match (args.twilio_account_sid, args.twilio_auth_token) {
            (Some(sid), Some(token)) if !sid.is_empty() && !token.is_empty() => {
                tracing::info!("TURN credentials will be issued by Twilio");
                Arc::new(TwilioIceServerProvider::new(sid, token))
            }
            _ => {
                tracing::warn!(
                    "Twilio credentials are not configured; /api/ice-servers returns no TURN servers"
                );
                Arc::new(EmptyIceServerProvider)
            }
        };

    // 4. Wire UseCases
    let state = AppState::new(
        participant_repository,
        lobby_repository,
        message_pusher,
        ice_server_provider,
        Arc::new(SystemClock),
    );

    // 5. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
