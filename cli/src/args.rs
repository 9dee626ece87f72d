use std::path::PathBuf;

use clap::Parser;
use minigolf_core::Rules;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keep score for a round of mini-golf", long_about = None)]
pub struct Args {
    /// File that holds the saved round, so a round survives restarts.
    #[arg(long, value_name = "PATH", default_value = ".minigolf-round.json")]
    pub store: PathBuf,
    /// Optional flavor text for each hole, one `[course]` section per course.
    #[arg(long, value_name = "PATH")]
    pub narrative: Option<PathBuf>,
    /// Don't award "Persistence" for holes that took ten or more strokes.
    #[arg(long)]
    pub no_persistence_achievement: bool,
    /// Log filter used when RUST_LOG isn't set.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    pub log: String,
}

impl Args {
    pub fn rules(&self) -> Rules {
        Rules {
            persistence_achievement: !self.no_persistence_achievement,
        }
    }
}
