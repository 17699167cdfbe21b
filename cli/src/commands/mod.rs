pub mod bridge;
pub mod plan;
pub mod sim;
pub mod utils;

pub use bridge::handle_bridge;
pub use plan::handle_plan;
pub use sim::handle_sim;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_ITEMS_FILE: &str = "data/samples/items_example.json";
pub const DEFAULT_POI_FILE: &str = "data/poi/store_A_poi.json";

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "shopping-path planner for the store AGV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a path from an item list and a POI map, printed as JSON
    Plan {
        /// Item list document
        #[arg(default_value = DEFAULT_ITEMS_FILE)]
        items: PathBuf,

        /// POI map document
        #[arg(default_value = DEFAULT_POI_FILE)]
        poi: PathBuf,

        /// Frame label for the path (overrides the map and config)
        #[arg(long)]
        frame: Option<String>,
    },
    /// Run the MQTT bridge: item lists in, global paths out
    Bridge {
        /// Exit after the first successfully published path
        #[arg(long, default_value_t = false)]
        once: bool,

        /// Exit after this many seconds (0 disables)
        #[arg(long = "timeout-s", value_name = "SECONDS", default_value_t = 0.0)]
        timeout_s: f64,
    },
    /// Print a fixed demonstration path
    Sim,
}

impl Commands {
    /// One-line usage shown after a failed run.
    pub fn usage_hint(&self) -> Option<&'static str> {
        match self {
            Commands::Plan { .. } => Some("usage: planner plan [ITEMS] [POI] [--frame FRAME]"),
            Commands::Bridge { .. } => {
                Some("usage: planner bridge [--once] [--timeout-s SECONDS]")
            }
            Commands::Sim => None,
        }
    }
}
