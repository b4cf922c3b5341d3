use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use exam_seating::cli::{Cli, Command};
use exam_seating::display::print_seating_plan;
use exam_seating::parser::load_rooms;
use exam_seating::store::{JsonFileStore, MemoryStore, RecordStore, RoomRegistry};
use exam_seating::web;
use exam_seating::SeatingService;

fn build_service(cli: &Cli) -> Result<SeatingService> {
    let rooms = match &cli.rooms_file {
        Some(path) => {
            let rooms = load_rooms(path)
                .with_context(|| format!("Failed to load rooms from {}", path.display()))?;
            RoomRegistry::with_rooms(rooms)?
        }
        None => RoomRegistry::new(),
    };
    let room_count = rooms.len()?;
    info!(rooms = room_count, "Room directory ready");

    let records: Arc<dyn RecordStore> = match &cli.store_file {
        Some(path) => Arc::new(
            JsonFileStore::open(path)
                .with_context(|| format!("Failed to open seat records at {}", path.display()))?,
        ),
        None => Arc::new(MemoryStore::new()),
    };

    Ok(SeatingService::new(Arc::new(rooms), records))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Prefer RUST_LOG, fall back to --log-level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let service = build_service(&cli)?;

    match cli.command {
        Command::Allocate { ref room, ref ranges } => {
            if cli.store_file.is_none() {
                println!("Note: no --store-file given, seat records will not be kept");
            }
            let plan = service
                .allocate_seating(room, ranges)
                .with_context(|| format!("Failed to allocate seating for {}", room))?;
            print_seating_plan(&plan);
        }
        Command::Lookup { roll_number } => {
            let found = service.lookup_room(roll_number)?;
            println!(
                "Roll number {} -> room {}, seat {}",
                roll_number, found.room_assigned, found.seat_number
            );
        }
        Command::Serve { port } => {
            println!("Access the API at http://localhost:{}", port);
            web::start_server(port, service).await?;
        }
    }

    Ok(())
}
