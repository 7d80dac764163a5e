mod handlers;
mod server;

use chrono::{Duration, Local, Utc};
use clap::{Parser, Subcommand};

use courtslot_core::engine::{EngineConfig, ReservationEngine};

#[derive(Parser)]
#[command(
    name = "courtslot",
    about = "Courtslot — hold-based reservation engine for court time slots",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Courtslot HTTP reservation server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8100", env = "COURTSLOT_PORT")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Hold time-to-live in seconds
        #[arg(long, default_value = "600", env = "COURTSLOT_HOLD_TTL_SECS")]
        hold_ttl_secs: i64,

        /// Same-day booking lead time in minutes
        #[arg(long, default_value = "30", env = "COURTSLOT_LEAD_TIME_MINS")]
        lead_time_mins: i64,
    },

    /// Check a JSON booking request (stdin) against a fresh engine
    Check,

    /// Print version information
    Version,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            hold_ttl_secs,
            lead_time_mins,
        } => {
            let config = EngineConfig {
                hold_ttl: Duration::seconds(hold_ttl_secs),
                lead_time: Duration::minutes(lead_time_mins),
            };
            server::run(&host, port, config).await;
        }
        Commands::Check => {
            eprintln!("Reading booking request from stdin...");
            let mut input = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut input)
                .expect("Failed to read stdin");

            let req: handlers::BookRequest =
                serde_json::from_str(&input).expect("Invalid JSON booking request");

            let verdict = match handlers::parse_selection(&req.date, &req.court, &req.slots) {
                Ok((date, court, slots)) => {
                    let mut engine = ReservationEngine::new();
                    match engine.book(date, court, &slots, Utc::now(), Local::now().naive_local())
                    {
                        Ok(result) => serde_json::json!({ "success": true, "data": result }),
                        Err(e) => handlers::error_body(&e),
                    }
                }
                Err(e) => handlers::error_body(&e),
            };

            println!("{}", serde_json::to_string_pretty(&verdict).unwrap());
        }
        Commands::Version => {
            println!("courtslot {}", env!("CARGO_PKG_VERSION"));
            println!("In-memory court-slot reservation engine");
        }
    }
}
