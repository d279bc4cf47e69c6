//! Baller event chat relay server binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin baller-server -- --port 8080 --demo-data
//! ```

use std::sync::Arc;

use clap::Parser;

use baller_server::domain::{Event, EventId, EventRsvp, RsvpStatus, User, UserId};
use baller_server::infrastructure::repository::InMemoryChatRepository;
use baller_server::{ServerConfig, run};
use baller_shared::setup_logger;

/// Event chat relay server for Baller
#[derive(Debug, Parser)]
#[command(name = "baller-server", version, about)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Seed the in-memory store with a demo event so the relay can be
    /// exercised end-to-end
    #[arg(long)]
    demo_data: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let repository = Arc::new(InMemoryChatRepository::new());
    if args.demo_data {
        seed_demo_data(&repository).await;
    }

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    // Run the server
    if let Err(e) = run(config, repository).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Insert a demo event (id 1) hosted by `demo-host`, with `demo-guest`
/// holding an RSVP.
async fn seed_demo_data(repository: &InMemoryChatRepository) {
    let host_id = UserId::new("demo-host".to_string()).expect("valid demo user id");
    let guest_id = UserId::new("demo-guest".to_string()).expect("valid demo user id");

    repository
        .insert_user(User::new(
            host_id.clone(),
            Some("Jordan".to_string()),
            Some("Hayes".to_string()),
            None,
        ))
        .await;
    repository
        .insert_user(User::new(
            guest_id.clone(),
            Some("Sam".to_string()),
            Some("Okafor".to_string()),
            None,
        ))
        .await;

    let event_id = EventId::new(1);
    repository
        .insert_event(Event::new(
            event_id,
            host_id,
            "Pickup basketball at Rucker Park".to_string(),
            "basketball".to_string(),
        ))
        .await;
    repository
        .insert_rsvp(EventRsvp::new(event_id, guest_id, RsvpStatus::Joined))
        .await;

    tracing::info!(
        "Seeded demo event {}: join as 'demo-host' or 'demo-guest'",
        event_id
    );
}
