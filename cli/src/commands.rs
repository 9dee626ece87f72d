use minigolf_core::types::CourseId;
use minigolf_core::Intent;

/// A line of user input, parsed.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    /// Start the round with the roster as it stands; blank names get placeholders.
    Start,
    /// Ask to abandon the round. Needs a `Confirm` before anything happens.
    Quit,
    Confirm(bool),
    Scorecard,
    Help,
    Exit,
}

pub const HELP: &str = "\
Before the round:
  course <dragon|wizard>   pick the course
  add                      add a player
  remove <n>               remove player n
  name <n> <name>          name player n
  start                    start the round
During the round:
  score <n> <strokes>      record strokes (1-11, 11 means 11 or more) for player n
  next                     go to the next hole
  back                     go back a hole (from hole 1, back to setup)
  card                     show the scorecard
  quit                     abandon the round
After the round:
  new                      start over
Any time:
  help, exit";

/// Players are numbered from 1 on screen.
fn player_index(arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| "Which player?".to_string())?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("{:?} is not a player number", arg)),
    }
}

pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some(c) => c.to_lowercase(),
        None => return Err("Type `help` to see the commands".to_string()),
    };

    let parsed = match command.as_str() {
        "course" => {
            let id = words.next().ok_or_else(|| "Which course?".to_string())?;
            let course = id.parse::<CourseId>().map_err(|e| e.to_string())?;
            Command::Intent(Intent::SelectCourse(course))
        }
        "add" => Command::Intent(Intent::AddPlayer),
        "remove" => Command::Intent(Intent::RemovePlayer(player_index(words.next())?)),
        "name" => {
            let index = player_index(words.next())?;
            let name = words.collect::<Vec<_>>().join(" ");
            Command::Intent(Intent::RenamePlayer(index, name))
        }
        "start" => Command::Start,
        "score" => {
            let player = player_index(words.next())?;
            let strokes = words
                .next()
                .ok_or_else(|| "How many strokes?".to_string())?
                .parse::<u8>()
                .map_err(|_| "Strokes must be between 1 and 11".to_string())?;
            Command::Intent(Intent::RecordScore { player, strokes })
        }
        "next" => Command::Intent(Intent::Advance),
        "back" => Command::Intent(Intent::Retreat),
        "card" => Command::Scorecard,
        "quit" => Command::Quit,
        "y" | "yes" => Command::Confirm(true),
        "n" | "no" => Command::Confirm(false),
        "new" => Command::Intent(Intent::NewRound),
        "help" | "?" => Command::Help,
        "exit" => Command::Exit,
        other => return Err(format!("Unknown command {:?}; type `help`", other)),
    };
    Ok(parsed)
}
