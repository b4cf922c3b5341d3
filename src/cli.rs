use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::parser::parse_range_arg;
use crate::seating::BranchRange;

/// Exam seat allocation and room lookup
#[derive(Debug, Parser)]
#[command(name = "exam-seating", version, about)]
pub struct Cli {
    /// CSV file with the room directory (name,capacity,branches)
    #[arg(long, env = "SEATING_ROOMS_FILE", global = true)]
    pub rooms_file: Option<PathBuf>,

    /// JSON file holding seat records; in-memory when omitted
    #[arg(long, env = "SEATING_STORE_FILE", global = true)]
    pub store_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "SEATING_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seat the given branch ranges in a room and print the layout
    Allocate {
        /// Room name as listed in the rooms file
        #[arg(long)]
        room: String,

        /// Branch range, BRANCH:START-END; repeat for each branch
        #[arg(long = "range", required = true, value_parser = parse_range_arg)]
        ranges: Vec<BranchRange>,
    },

    /// Print the room and seat of a roll number
    Lookup { roll_number: u32 },

    /// Run the HTTP API
    Serve {
        #[arg(long, env = "SEATING_PORT", default_value_t = 8080)]
        port: u16,
    },
}
