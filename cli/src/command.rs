use std::str::FromStr;

use stackmine_core::{BetStep, CellIndex, Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Target {
    Index(CellIndex),
    Coords(Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Target),
    Collect,
    Bet(f64),
    StepBet(BetStep),
    NewRound,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub(crate) enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("Could not read `{0}`")]
    BadArgument(String),
}

pub(crate) const HELP: &str = "\
commands:
  r <index> | r <row>,<col>   reveal a cell
  c                           collect the total win
  bet <amount> | + | -        change the bet (only before the first reveal)
  n                           start a new round
  s                           show the board
  q                           quit";

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let arg = words.next();

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => {
                let arg = arg.ok_or(ParseCommandError::MissingArgument("reveal"))?;
                Command::Reveal(parse_target(arg)?)
            }
            "c" | "collect" => Command::Collect,
            "bet" => {
                let arg = arg.ok_or(ParseCommandError::MissingArgument("bet"))?;
                let amount = arg
                    .trim_start_matches('$')
                    .parse()
                    .map_err(|_| ParseCommandError::BadArgument(arg.to_string()))?;
                Command::Bet(amount)
            }
            "+" => Command::StepBet(BetStep::Up),
            "-" => Command::StepBet(BetStep::Down),
            "n" | "new" => Command::NewRound,
            "s" | "show" => Command::Show,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        })
    }
}

fn parse_target(arg: &str) -> Result<Target, ParseCommandError> {
    let bad = || ParseCommandError::BadArgument(arg.to_string());
    match arg.split_once(',') {
        Some((row, col)) => {
            let row: Coord = row.trim().parse().map_err(|_| bad())?;
            let col: Coord = col.trim().parse().map_err(|_| bad())?;
            Ok(Target::Coords((row, col)))
        }
        None => arg.parse().map(Target::Index).map_err(|_| bad()),
    }
}
