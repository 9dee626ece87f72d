use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Parser;
use minigolf_core::game_states::GameState;
use minigolf_core::narrative::Narrative;
use minigolf_core::{Game, Intent, KeyValueStore, Persistence};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod args;
mod commands;
mod file_store;
mod render;

use args::Args;
use commands::Command;
use file_store::FileStore;

fn init_logging(default_filter: &str) {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

/// Flavor text is optional; anything that goes wrong just means no flavor text.
fn load_narrative(path: Option<&Path>) -> Narrative {
    let path = match path {
        Some(path) => path,
        None => return Narrative::empty(),
    };
    match fs::read_to_string(path) {
        Ok(text) => Narrative::parse(&text),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no narrative text");
            Narrative::empty()
        }
    }
}

/// Apply one command. Returns `false` once the user wants to leave.
fn step<S: KeyValueStore>(
    game: &mut Game<S>,
    command: Command,
    confirming_quit: &mut bool,
    out: &mut impl Write,
) -> io::Result<bool> {
    if *confirming_quit {
        *confirming_quit = false;
        if let Command::Confirm(true) = command {
            report(game, Intent::Quit, out)?;
        } else {
            writeln!(out, "Carrying on.")?;
        }
        return Ok(true);
    }

    match command {
        Command::Intent(intent) => report(game, intent, out)?,
        Command::Start => {
            let names = match game.state().setup() {
                Some(setup) => setup.roster().resolved_names(&mut rand::thread_rng()),
                None => vec![],
            };
            report(game, Intent::StartRound(names), out)?;
        }
        Command::Quit => {
            if let GameState::Setup(_) = game.state() {
                writeln!(out, "Nothing to quit. Type `exit` to leave.")?;
            } else {
                *confirming_quit = true;
                writeln!(out, "Abandon this round? Scores will be lost. (y/n)")?;
            }
        }
        Command::Confirm(_) => writeln!(out, "Nothing to confirm.")?,
        Command::Scorecard => match game.state().playing() {
            Some(playing) => writeln!(out, "{}", render::card(playing.round()))?,
            None => writeln!(out, "The scorecard is only available during a round.")?,
        },
        Command::Help => writeln!(out, "{}", commands::HELP)?,
        Command::Exit => return Ok(false),
    }
    Ok(true)
}

fn report<S: KeyValueStore>(
    game: &mut Game<S>,
    intent: Intent,
    out: &mut impl Write,
) -> io::Result<()> {
    match intent {
        Intent::RecordScore { player, strokes } => match game.record_score(player, strokes) {
            Ok(outcome) => {
                let name = game
                    .state()
                    .playing()
                    .and_then(|p| p.round().players().get(player))
                    .map(|p| p.name().to_string())
                    .unwrap_or_default();
                writeln!(out, "{}: {}", name, outcome.label())
            }
            Err(e) => writeln!(out, "{}", e),
        },
        intent => match game.dispatch(intent) {
            Ok(()) => Ok(()),
            Err(e) => writeln!(out, "{}", e),
        },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args.log);

    let narrative = load_narrative(args.narrative.as_deref());
    let persistence = Persistence::new(FileStore::new(args.store.clone()));
    let mut game = Game::resume(persistence, args.rules());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut confirming_quit = false;

    writeln!(out, "{}", render::state(game.state(), &narrative))?;
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match commands::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };
        let redraw = matches!(command, Command::Intent(_) | Command::Start | Command::Confirm(_));
        if !step(&mut game, command, &mut confirming_quit, &mut out)? {
            break;
        }
        if redraw && !confirming_quit {
            writeln!(out, "\n{}", render::state(game.state(), &narrative))?;
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use minigolf_core::{Game, MemoryStore, Persistence, Rules};

    use super::{step, Command};
    use minigolf_core::Intent;

    fn run(game: &mut Game<MemoryStore>, commands: Vec<Command>) -> String {
        let mut out = Vec::new();
        let mut confirming = false;
        for c in commands {
            step(game, c, &mut confirming, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let mut game = Game::new(Persistence::new(MemoryStore::new()), Rules::default());
        let text = run(
            &mut game,
            vec![
                Command::Start,
                Command::Quit,
                Command::Confirm(false),
                Command::Quit,
                Command::Intent(Intent::Advance),
            ],
        );
        assert!(text.contains("Carrying on."));
        assert!(game.state().playing().is_some());

        run(&mut game, vec![Command::Quit, Command::Confirm(true)]);
        assert!(game.state().setup().is_some());
    }

    #[test]
    fn test_score_reports_outcome() {
        let mut game = Game::new(Persistence::new(MemoryStore::new()), Rules::default());
        let text = run(
            &mut game,
            vec![
                Command::Intent(Intent::RenamePlayer(0, "Amy".to_string())),
                Command::Start,
                Command::Intent(Intent::RecordScore {
                    player: 0,
                    strokes: 1,
                }),
                Command::Intent(Intent::Advance),
                Command::Intent(Intent::Advance),
            ],
        );
        assert!(text.contains("Amy: hole in one"));
        assert!(text.contains("Enter scores for all players"));
    }
}
